//! Model Context Protocol static resource providers
//!
//! Exposes server status and a table of mathematical constants as JSON
//! documents. Both are rebuilt on every read.

use std::{collections::BTreeMap, fmt::Display};

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

use crate::domain::tools::{CALCULATOR_TOOL, SYSTEM_INFO_TOOL};
use crate::domain::utils::{format_rfc3339, format_with, STATUS_CLOCK_LAYOUT};
use crate::errors::AppError;
use crate::mcp::registry::ResourceDefinition;

pub const SYSTEM_STATUS_RESOURCE_URI: &str = "system://status";
pub const MATH_CONSTANTS_RESOURCE_URI: &str = "math://constants";
pub const SERVER_DISPLAY_NAME: &str = "Tutorial MCP Server";

const JSON_MIME_TYPE: &str = "application/json";

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub timestamp: String,
    pub server_name: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    pub uptime_info: UptimeInfo,
    pub capabilities: [&'static str; 2],
}

#[derive(Debug, Serialize)]
pub struct UptimeInfo {
    pub current_time: String,
    pub unix_time: i64,
}

#[derive(Debug, Serialize)]
pub struct MathConstant {
    pub symbol: &'static str,
    pub value: f64,
    pub description: &'static str,
}

pub fn system_status_definition() -> ResourceDefinition {
    ResourceDefinition {
        uri: SYSTEM_STATUS_RESOURCE_URI,
        name: "System Status",
        description: "Provides current system status and server information",
        mime_type: JSON_MIME_TYPE,
    }
}

pub fn math_constants_definition() -> ResourceDefinition {
    ResourceDefinition {
        uri: MATH_CONSTANTS_RESOURCE_URI,
        name: "Mathematical Constants",
        description: "Common mathematical constants and their values",
        mime_type: JSON_MIME_TYPE,
    }
}

pub fn build_system_status<Tz>(now: &DateTime<Tz>) -> SystemStatus
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    SystemStatus {
        timestamp: format_rfc3339(now),
        server_name: SERVER_DISPLAY_NAME,
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        uptime_info: UptimeInfo {
            current_time: format_with(now, STATUS_CLOCK_LAYOUT),
            unix_time: now.timestamp(),
        },
        capabilities: [CALCULATOR_TOOL, SYSTEM_INFO_TOOL],
    }
}

pub fn system_status() -> Result<String, AppError> {
    serde_json::to_string_pretty(&build_system_status(&Local::now()))
        .map_err(|err| AppError::internal(format!("failed to marshal status: {err}")))
}

pub fn build_math_constants() -> BTreeMap<&'static str, MathConstant> {
    BTreeMap::from([
        (
            "pi",
            MathConstant {
                symbol: "π",
                value: std::f64::consts::PI,
                description: "The ratio of a circle's circumference to its diameter",
            },
        ),
        (
            "e",
            MathConstant {
                symbol: "e",
                value: std::f64::consts::E,
                description: "Euler's number, the base of natural logarithm",
            },
        ),
        (
            "phi",
            MathConstant {
                symbol: "φ",
                value: 1.618033988749895,
                description: "The golden ratio",
            },
        ),
        (
            "sqrt2",
            MathConstant {
                symbol: "√2",
                value: std::f64::consts::SQRT_2,
                description: "The square root of 2",
            },
        ),
    ])
}

pub fn math_constants() -> Result<String, AppError> {
    serde_json::to_string_pretty(&build_math_constants())
        .map_err(|err| AppError::internal(format!("failed to marshal constants: {err}")))
}
