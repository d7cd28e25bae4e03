//! Interactive tools exposed via Model Context Protocol
//!
//! Provides the `calculator` and `system_info` tools. Both validate their own
//! arguments: transports are not trusted to enforce the advertised schema.

use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Local, TimeZone};
use serde_json::Value;

use crate::domain::utils::{
    format_rfc3339, format_unix_seconds, format_with, DATETIME_HUMAN_LAYOUT, DATETIME_ISO_LAYOUT,
    DATE_HUMAN_LAYOUT, DATE_ISO_LAYOUT, TIME_HUMAN_LAYOUT, TIME_ISO_LAYOUT,
};
use crate::errors::ToolError;
use crate::mcp::registry::{ParameterSpec, ToolArguments, ToolDefinition};

pub const CALCULATOR_TOOL: &str = "calculator";
pub const SYSTEM_INFO_TOOL: &str = "system_info";

const CALCULATOR_OPERATIONS: &[&str] = &["add", "subtract", "multiply", "divide", "power", "sqrt"];
const INFO_TYPES: &[&str] = &["time", "date", "datetime"];
const OUTPUT_FORMATS: &[&str] = &["iso", "rfc3339", "unix", "human"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Sqrt,
}

impl Operation {
    fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Power => "^",
            Self::Sqrt => "√",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Self::Add => "addition",
            Self::Subtract => "subtraction",
            Self::Multiply => "multiplication",
            Self::Divide => "division",
            Self::Power => "power operation",
            Self::Sqrt => "square root",
        }
    }
}

impl FromStr for Operation {
    type Err = ToolError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "add" => Ok(Self::Add),
            "subtract" => Ok(Self::Subtract),
            "multiply" => Ok(Self::Multiply),
            "divide" => Ok(Self::Divide),
            "power" => Ok(Self::Power),
            "sqrt" => Ok(Self::Sqrt),
            other => Err(ToolError::UnknownOperation(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoType {
    Time,
    Date,
    DateTime,
}

impl FromStr for InfoType {
    type Err = ToolError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "time" => Ok(Self::Time),
            "date" => Ok(Self::Date),
            "datetime" => Ok(Self::DateTime),
            other => Err(ToolError::UnknownInfoType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Iso,
    Rfc3339,
    Unix,
    #[default]
    Human,
}

impl FromStr for OutputFormat {
    type Err = ToolError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "iso" => Ok(Self::Iso),
            "rfc3339" => Ok(Self::Rfc3339),
            "unix" => Ok(Self::Unix),
            "human" => Ok(Self::Human),
            other => Err(ToolError::UnknownFormat(other.to_string())),
        }
    }
}

pub fn calculator_definition() -> ToolDefinition {
    ToolDefinition {
        name: CALCULATOR_TOOL,
        description: "Perform basic mathematical calculations",
        parameters: vec![
            ParameterSpec::string("operation", "The mathematical operation to perform")
                .required()
                .one_of(CALCULATOR_OPERATIONS),
            ParameterSpec::number("first_number", "The first number for the operation").required(),
            ParameterSpec::number(
                "second_number",
                "The second number (not required for sqrt)",
            ),
        ],
    }
}

pub fn system_info_definition() -> ToolDefinition {
    ToolDefinition {
        name: SYSTEM_INFO_TOOL,
        description: "Get system information like current time and date",
        parameters: vec![
            ParameterSpec::string("info_type", "Type of system information to retrieve")
                .required()
                .one_of(INFO_TYPES),
            ParameterSpec::string("format", "Format for the output")
                .one_of(OUTPUT_FORMATS)
                .with_default("human"),
        ],
    }
}

/// Absent and `null` arguments read as `None`; anything else must be a string.
fn string_argument<'a>(
    arguments: &'a ToolArguments,
    name: &'static str,
) -> Result<Option<&'a str>, ToolError> {
    match arguments.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.as_str())),
        Some(_) => Err(ToolError::InvalidArgument {
            name,
            expected: "string",
        }),
    }
}

/// Accepts JSON numbers and strings holding a number.
fn number_argument(arguments: &ToolArguments, name: &'static str) -> Result<Option<f64>, ToolError> {
    let invalid = ToolError::InvalidArgument {
        name,
        expected: "number",
    };
    match arguments.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(value)) => value.as_f64().map(Some).ok_or(invalid),
        Some(Value::String(value)) => value.trim().parse::<f64>().map(Some).map_err(|_| invalid),
        Some(_) => Err(invalid),
    }
}

pub fn calculator(arguments: &ToolArguments) -> Result<String, ToolError> {
    let operation = string_argument(arguments, "operation")?
        .ok_or(ToolError::MissingArgument("operation"))?;
    let first_number = number_argument(arguments, "first_number")?
        .ok_or(ToolError::MissingArgument("first_number"))?;
    let operation: Operation = operation.parse()?;

    // Only binary operations read it; unusable values count as missing.
    let second_number = match operation {
        Operation::Sqrt => None,
        _ => number_argument(arguments, "second_number").ok().flatten(),
    };

    calculate(operation, first_number, second_number)
}

pub fn calculate(
    operation: Operation,
    first_number: f64,
    second_number: Option<f64>,
) -> Result<String, ToolError> {
    let required = || second_number.ok_or(ToolError::MissingSecondNumber(operation.noun()));

    let (second_number, result) = match operation {
        Operation::Sqrt => {
            if first_number < 0.0 {
                return Err(ToolError::NegativeSquareRoot);
            }
            return Ok(format!(
                "{}{:.2} = {:.6}",
                operation.symbol(),
                first_number,
                first_number.sqrt()
            ));
        }
        Operation::Add => {
            let second = required()?;
            (second, first_number + second)
        }
        Operation::Subtract => {
            let second = required()?;
            (second, first_number - second)
        }
        Operation::Multiply => {
            let second = required()?;
            (second, first_number * second)
        }
        Operation::Divide => {
            let second = required()?;
            if second == 0.0 {
                return Err(ToolError::DivisionByZero);
            }
            (second, first_number / second)
        }
        Operation::Power => {
            let second = required()?;
            (second, first_number.powf(second))
        }
    };

    Ok(format!(
        "{:.2} {} {:.2} = {:.6}",
        first_number,
        operation.symbol(),
        second_number,
        result
    ))
}

pub fn system_info(arguments: &ToolArguments) -> Result<String, ToolError> {
    let info_type: InfoType = string_argument(arguments, "info_type")?
        .ok_or(ToolError::MissingArgument("info_type"))?
        .parse()?;
    // Non-string formats fall back to the default like absent ones.
    let format = match string_argument(arguments, "format").ok().flatten() {
        None | Some("") => OutputFormat::default(),
        Some(value) => value.parse()?,
    };

    Ok(render_system_info(&Local::now(), info_type, format))
}

pub fn render_system_info<Tz>(
    now: &DateTime<Tz>,
    info_type: InfoType,
    format: OutputFormat,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let layout = match (format, info_type) {
        (OutputFormat::Rfc3339, _) => return format_rfc3339(now),
        (OutputFormat::Unix, _) => return format_unix_seconds(now),
        (OutputFormat::Iso, InfoType::Time) => TIME_ISO_LAYOUT,
        (OutputFormat::Iso, InfoType::Date) => DATE_ISO_LAYOUT,
        (OutputFormat::Iso, InfoType::DateTime) => DATETIME_ISO_LAYOUT,
        (OutputFormat::Human, InfoType::Time) => TIME_HUMAN_LAYOUT,
        (OutputFormat::Human, InfoType::Date) => DATE_HUMAN_LAYOUT,
        (OutputFormat::Human, InfoType::DateTime) => DATETIME_HUMAN_LAYOUT,
    };

    format_with(now, layout)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use regex::Regex;
    use serde_json::json;

    use super::*;

    fn arguments(value: Value) -> ToolArguments {
        value.as_object().cloned().expect("arguments object")
    }

    #[test]
    fn arithmetic_results_use_symbols_and_precision() {
        let cases = [
            ("add", 2.5, 3.25, "2.50 + 3.25 = 5.750000"),
            ("subtract", 10.0, 4.5, "10.00 - 4.50 = 5.500000"),
            ("multiply", 3.0, -2.0, "3.00 × -2.00 = -6.000000"),
            ("divide", 1.0, 3.0, "1.00 ÷ 3.00 = 0.333333"),
            ("power", 2.0, 10.0, "2.00 ^ 10.00 = 1024.000000"),
        ];

        for (operation, first, second, expected) in cases {
            let result = calculator(&arguments(json!({
                "operation": operation,
                "first_number": first,
                "second_number": second,
            })))
            .expect("calculation should succeed");
            assert_eq!(result, expected, "operation {operation}");
        }
    }

    #[test]
    fn add_matches_float_sum_for_sample_pairs() {
        let pairs = [(0.1, 0.2), (-7.25, 1e6), (123.456, -0.001), (0.0, 0.0)];

        for (first, second) in pairs {
            let result = calculate(Operation::Add, first, Some(second)).expect("add succeeds");
            let rendered = result.rsplit(" = ").next().expect("result after equals");
            assert_eq!(rendered, format!("{:.6}", first + second));
        }
    }

    #[test]
    fn divide_by_zero_is_rejected_for_any_dividend() {
        for dividend in [0.0, 1.0, -42.5, f64::MAX] {
            let error = calculate(Operation::Divide, dividend, Some(0.0))
                .expect_err("division by zero must fail");
            assert_eq!(error.to_string(), "cannot divide by zero");
        }
    }

    #[test]
    fn sqrt_uses_radical_form_and_ignores_second_number() {
        let result = calculator(&arguments(json!({
            "operation": "sqrt",
            "first_number": 2,
        })))
        .expect("sqrt should succeed");
        assert_eq!(result, "√2.00 = 1.414214");

        let with_second = calculate(Operation::Sqrt, 16.0, Some(99.0)).expect("sqrt succeeds");
        assert_eq!(with_second, "√16.00 = 4.000000");
    }

    #[test]
    fn sqrt_of_negative_number_fails() {
        let error = calculate(Operation::Sqrt, -4.0, None).expect_err("negative sqrt must fail");
        assert_eq!(error, ToolError::NegativeSquareRoot);
    }

    #[test]
    fn missing_second_number_names_the_operation() {
        let cases = [
            ("add", "second_number is required for addition"),
            ("subtract", "second_number is required for subtraction"),
            ("multiply", "second_number is required for multiplication"),
            ("divide", "second_number is required for division"),
            ("power", "second_number is required for power operation"),
        ];

        for (operation, expected) in cases {
            let error = calculator(&arguments(json!({
                "operation": operation,
                "first_number": 1,
            })))
            .expect_err("missing second number must fail");
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn missing_required_arguments_are_reported() {
        let error = calculator(&arguments(json!({"first_number": 1})))
            .expect_err("missing operation must fail");
        assert_eq!(error, ToolError::MissingArgument("operation"));

        let error = calculator(&arguments(json!({"operation": "add"})))
            .expect_err("missing first number must fail");
        assert_eq!(error, ToolError::MissingArgument("first_number"));
    }

    #[test]
    fn unknown_operation_is_rejected_even_without_schema_validation() {
        let error = calculator(&arguments(json!({
            "operation": "modulo",
            "first_number": 5,
            "second_number": 2,
        })))
        .expect_err("unknown operation must fail");
        assert_eq!(error.to_string(), "unknown operation: modulo");
    }

    #[test]
    fn non_numeric_first_number_is_rejected_by_name() {
        let error = calculator(&arguments(json!({
            "operation": "add",
            "first_number": "five",
        })))
        .expect_err("string operand must fail");
        assert_eq!(error.to_string(), "argument \"first_number\" is not a number");

        let error = calculator(&arguments(json!({
            "operation": 3,
            "first_number": 1,
        })))
        .expect_err("numeric operation must fail");
        assert_eq!(error.to_string(), "argument \"operation\" is not a string");
    }

    #[test]
    fn numeric_strings_are_accepted_as_operands() {
        let result = calculator(&arguments(json!({
            "operation": "multiply",
            "first_number": "1.5",
            "second_number": 4,
        })))
        .expect("numeric string should parse");
        assert_eq!(result, "1.50 × 4.00 = 6.000000");
    }

    #[test]
    fn sqrt_ignores_malformed_second_number() {
        let result = calculator(&arguments(json!({
            "operation": "sqrt",
            "first_number": 9,
            "second_number": "x",
        })))
        .expect("sqrt never reads second_number");
        assert_eq!(result, "√9.00 = 3.000000");
    }

    #[test]
    fn malformed_second_number_reports_operation_specific_error() {
        let error = calculator(&arguments(json!({
            "operation": "add",
            "first_number": 1,
            "second_number": {"value": 2},
        })))
        .expect_err("object operand must fail");
        assert_eq!(error.to_string(), "second_number is required for addition");

        let error = calculator(&arguments(json!({
            "operation": "power",
            "first_number": 2,
            "second_number": "lots",
        })))
        .expect_err("non-numeric string must fail");
        assert_eq!(error.to_string(), "second_number is required for power operation");
    }

    #[test]
    fn non_string_format_falls_back_to_human() {
        let result = system_info(&arguments(json!({
            "info_type": "date",
            "format": 5,
        })))
        .expect("format falls back to human");
        let human = Regex::new(r"^[A-Z][a-z]+day, [A-Z][a-z]+ \d{1,2}, \d{4}$").expect("regex");
        assert!(human.is_match(&result), "unexpected date: {result}");
    }

    #[test]
    fn every_info_type_and_format_matches_its_layout() {
        let now = Utc
            .with_ymd_and_hms(2026, 10, 19, 15, 7, 3)
            .single()
            .expect("valid timestamp");
        let rfc3339 = r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(Z|[+-]\d{2}:\d{2})$";
        let cases = [
            (InfoType::Time, OutputFormat::Iso, r"^\d{2}:\d{2}:\d{2}$"),
            (
                InfoType::Time,
                OutputFormat::Human,
                r"^\d{1,2}:\d{2}:\d{2} (AM|PM) \S+$",
            ),
            (InfoType::Date, OutputFormat::Iso, r"^\d{4}-\d{2}-\d{2}$"),
            (
                InfoType::Date,
                OutputFormat::Human,
                r"^[A-Z][a-z]+day, [A-Z][a-z]+ \d{1,2}, \d{4}$",
            ),
            (
                InfoType::DateTime,
                OutputFormat::Iso,
                r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}$",
            ),
            (
                InfoType::DateTime,
                OutputFormat::Human,
                r"^[A-Z][a-z]+day, [A-Z][a-z]+ \d{1,2}, \d{4} at \d{1,2}:\d{2}:\d{2} (AM|PM) \S+$",
            ),
            (InfoType::Time, OutputFormat::Rfc3339, rfc3339),
            (InfoType::Date, OutputFormat::Rfc3339, rfc3339),
            (InfoType::DateTime, OutputFormat::Rfc3339, rfc3339),
            (InfoType::Time, OutputFormat::Unix, r"^\d+$"),
            (InfoType::Date, OutputFormat::Unix, r"^\d+$"),
            (InfoType::DateTime, OutputFormat::Unix, r"^\d+$"),
        ];

        for (info_type, format, pattern) in cases {
            let rendered = render_system_info(&now, info_type, format);
            let layout = Regex::new(pattern).expect("valid pattern");
            assert!(
                layout.is_match(&rendered),
                "{info_type:?}/{format:?} rendered {rendered:?}"
            );
        }
    }

    #[test]
    fn fixed_instant_renders_exact_text() {
        let now = Utc
            .with_ymd_and_hms(2026, 10, 19, 15, 7, 3)
            .single()
            .expect("valid timestamp");

        assert_eq!(
            render_system_info(&now, InfoType::DateTime, OutputFormat::Human),
            "Monday, October 19, 2026 at 3:07:03 PM UTC"
        );
        assert_eq!(
            render_system_info(&now, InfoType::DateTime, OutputFormat::Iso),
            "2026-10-19T15:07:03"
        );
        assert_eq!(
            render_system_info(&now, InfoType::Date, OutputFormat::Rfc3339),
            "2026-10-19T15:07:03Z"
        );
    }

    #[test]
    fn unix_format_is_within_a_second_of_now() {
        let before = Utc::now().timestamp();
        let rendered = system_info(&arguments(json!({
            "info_type": "datetime",
            "format": "unix",
        })))
        .expect("system info should succeed");
        let after = Utc::now().timestamp();

        let seconds: i64 = rendered.parse().expect("unix seconds");
        assert!(seconds >= before - 1 && seconds <= after + 1);
    }

    #[test]
    fn format_defaults_to_human() {
        let rendered = system_info(&arguments(json!({"info_type": "date"})))
            .expect("system info should succeed");
        let layout = Regex::new(r"^[A-Z][a-z]+day, [A-Z][a-z]+ \d{1,2}, \d{4}$")
            .expect("valid pattern");
        assert!(layout.is_match(&rendered), "rendered {rendered:?}");
    }

    #[test]
    fn system_info_rejects_missing_and_unknown_values() {
        let error = system_info(&arguments(json!({}))).expect_err("missing info_type must fail");
        assert_eq!(error, ToolError::MissingArgument("info_type"));

        let error = system_info(&arguments(json!({"info_type": "weather"})))
            .expect_err("unknown info_type must fail");
        assert_eq!(error.to_string(), "unknown info_type: weather");

        let error = system_info(&arguments(json!({"info_type": "time", "format": "julian"})))
            .expect_err("unknown format must fail");
        assert_eq!(error, ToolError::UnknownFormat("julian".to_string()));
    }
}
