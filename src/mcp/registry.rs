//! Capability registration for tools, resources and prompts
//!
//! The protocol engine looks handlers up here by tool name, resource URI or
//! prompt name. Listing order is registration order.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::errors::{AppError, ToolError};

pub type ToolArguments = Map<String, Value>;
pub type ToolHandler = fn(&ToolArguments) -> Result<String, ToolError>;
pub type ResourceHandler = fn() -> Result<String, AppError>;
pub type PromptArguments = HashMap<String, String>;
pub type PromptHandler = fn(&PromptArguments) -> PromptResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    String,
    Number,
}

impl ParameterKind {
    fn as_schema_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub kind: ParameterKind,
    pub description: &'static str,
    pub required: bool,
    pub allowed: &'static [&'static str],
    pub default: Option<&'static str>,
}

impl ParameterSpec {
    pub fn string(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: ParameterKind::String,
            description,
            required: false,
            allowed: &[],
            default: None,
        }
    }

    pub fn number(name: &'static str, description: &'static str) -> Self {
        Self {
            kind: ParameterKind::Number,
            ..Self::string(name, description)
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed = allowed;
        self
    }

    pub fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    fn to_schema(&self) -> Value {
        let mut property = Map::new();
        property.insert("type".to_string(), json!(self.kind.as_schema_type()));
        property.insert("description".to_string(), json!(self.description));
        if !self.allowed.is_empty() {
            property.insert("enum".to_string(), json!(self.allowed));
        }
        if let Some(default) = self.default {
            property.insert("default".to_string(), json!(default));
        }
        Value::Object(property)
    }
}

#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Vec<ParameterSpec>,
}

impl ToolDefinition {
    pub fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|parameter| (parameter.name.to_string(), parameter.to_schema()))
            .collect();
        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|parameter| parameter.required)
            .map(|parameter| parameter.name)
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    pub fn to_listing(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ResourceDefinition {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub mime_type: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptArgumentDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub arguments: Vec<PromptArgumentDefinition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptContent {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptMessage {
    pub role: Role,
    pub content: PromptContent,
}

impl PromptMessage {
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            content: PromptContent {
                kind: "text",
                text: text.into(),
            },
        }
    }
}

/// Wire shape of `prompts/get`: the title travels as `description`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptResult {
    #[serde(rename = "description")]
    pub title: String,
    pub messages: Vec<PromptMessage>,
}

pub struct RegisteredTool {
    pub definition: ToolDefinition,
    pub handler: ToolHandler,
}

pub struct RegisteredResource {
    pub definition: ResourceDefinition,
    pub handler: ResourceHandler,
}

pub struct RegisteredPrompt {
    pub definition: PromptDefinition,
    pub handler: PromptHandler,
}

#[derive(Default)]
pub struct Registry {
    tools: Vec<RegisteredTool>,
    resources: Vec<RegisteredResource>,
    prompts: Vec<RegisteredPrompt>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_tool(&mut self, definition: ToolDefinition, handler: ToolHandler) {
        let entry = RegisteredTool {
            definition,
            handler,
        };
        match self
            .tools
            .iter_mut()
            .find(|tool| tool.definition.name == entry.definition.name)
        {
            Some(existing) => *existing = entry,
            None => self.tools.push(entry),
        }
    }

    pub fn register_resource(&mut self, definition: ResourceDefinition, handler: ResourceHandler) {
        let entry = RegisteredResource {
            definition,
            handler,
        };
        match self
            .resources
            .iter_mut()
            .find(|resource| resource.definition.uri == entry.definition.uri)
        {
            Some(existing) => *existing = entry,
            None => self.resources.push(entry),
        }
    }

    pub fn register_prompt(&mut self, definition: PromptDefinition, handler: PromptHandler) {
        let entry = RegisteredPrompt {
            definition,
            handler,
        };
        match self
            .prompts
            .iter_mut()
            .find(|prompt| prompt.definition.name == entry.definition.name)
        {
            Some(existing) => *existing = entry,
            None => self.prompts.push(entry),
        }
    }

    pub fn tool(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.iter().find(|tool| tool.definition.name == name)
    }

    pub fn resource(&self, uri: &str) -> Option<&RegisteredResource> {
        self.resources
            .iter()
            .find(|resource| resource.definition.uri == uri)
    }

    pub fn prompt(&self, name: &str) -> Option<&RegisteredPrompt> {
        self.prompts
            .iter()
            .find(|prompt| prompt.definition.name == name)
    }

    pub fn tools(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter().map(|tool| &tool.definition)
    }

    pub fn resources(&self) -> impl Iterator<Item = &ResourceDefinition> {
        self.resources.iter().map(|resource| &resource.definition)
    }

    pub fn prompts(&self) -> impl Iterator<Item = &PromptDefinition> {
        self.prompts.iter().map(|prompt| &prompt.definition)
    }
}
