//! @ai:module:intent Field-level extraction and validation of JSON payloads
//! @ai:module:layer domain
//! @ai:module:public_api FieldReader
//! @ai:module:stateless false

use crate::error::ValidationErrors;
use serde_json::{Map, Value};

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";
const NOT_BLANK: &str = "This field may not be blank.";
const NOT_STRING: &str = "Not a valid string.";
const NOT_INTEGER: &str = "A valid integer is required.";
const NOT_NUMBER: &str = "A valid number is required.";
const NEGATIVE: &str = "Ensure this value is greater than or equal to 0.";

/// @ai:intent Reads typed fields out of a JSON object, collecting errors per field
pub struct FieldReader<'a> {
    object: Option<&'a Map<String, Value>>,
    errors: ValidationErrors,
}

impl<'a> FieldReader<'a> {
    /// @ai:intent Start reading a request body
    /// @ai:effects pure
    pub fn new(body: &'a Value) -> Self {
        let mut errors = ValidationErrors::new();
        let object = body.as_object();

        if object.is_none() {
            errors.add(
                "non_field_errors",
                format!(
                    "Invalid data. Expected a dictionary, but got {}.",
                    json_type_name(body)
                ),
            );
        }

        Self { object, errors }
    }

    /// @ai:intent Fetch a present, non-null value or record why it is missing
    /// @ai:effects state:write
    fn present(&mut self, field: &str) -> Option<&'a Value> {
        let object = self.object?;

        match object.get(field) {
            None => {
                self.errors.add(field, REQUIRED);
                None
            }
            Some(Value::Null) => {
                self.errors.add(field, NOT_NULL);
                None
            }
            Some(value) => Some(value),
        }
    }

    /// @ai:intent Read a required, non-blank string with an optional length cap
    /// @ai:effects state:write
    pub fn string(&mut self, field: &str, max_len: Option<usize>) -> Option<String> {
        let value = self.present(field)?;

        let Some(text) = value.as_str() else {
            self.errors.add(field, NOT_STRING);
            return None;
        };

        if text.trim().is_empty() {
            self.errors.add(field, NOT_BLANK);
            return None;
        }

        if let Some(max) = max_len {
            if text.chars().count() > max {
                self.errors.add(
                    field,
                    format!("Ensure this field has no more than {} characters.", max),
                );
                return None;
            }
        }

        Some(text.to_string())
    }

    /// @ai:intent Read a string constrained to a fixed set of choices
    /// @ai:effects state:write
    pub fn choice<T>(&mut self, field: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
        let value = self.present(field)?;

        let raw = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        match parse(&raw) {
            Some(choice) => Some(choice),
            None => {
                self.errors
                    .add(field, format!("\"{}\" is not a valid choice.", raw));
                None
            }
        }
    }

    /// @ai:intent Read a non-negative integer, falling back to a default when absent
    /// @ai:effects state:write
    pub fn count(&mut self, field: &str, default: Option<u64>) -> Option<u64> {
        if let (Some(object), Some(fallback)) = (self.object, default) {
            if !object.contains_key(field) {
                return Some(fallback);
            }
        }

        let value = self.present(field)?;

        let Some(number) = parse_integer(value) else {
            self.errors.add(field, NOT_INTEGER);
            return None;
        };

        if number < 0 {
            self.errors.add(field, NEGATIVE);
            return None;
        }

        Some(number as u64)
    }

    /// @ai:intent Read a non-negative finite float
    /// @ai:effects state:write
    pub fn duration_ms(&mut self, field: &str) -> Option<f64> {
        let value = self.present(field)?;

        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        let Some(number) = parsed.filter(|n| n.is_finite()) else {
            self.errors.add(field, NOT_NUMBER);
            return None;
        };

        if number < 0.0 {
            self.errors.add(field, NEGATIVE);
            return None;
        }

        Some(number)
    }

    /// @ai:intent Read a primary-key reference to another record
    /// @ai:effects state:write
    pub fn reference(&mut self, field: &str) -> Option<u64> {
        let value = self.present(field)?;

        match parse_integer(value) {
            Some(id) if id > 0 => Some(id as u64),
            Some(id) => {
                self.errors.add(
                    field,
                    format!("Invalid pk \"{}\" - object does not exist.", id),
                );
                None
            }
            None => {
                self.errors.add(
                    field,
                    format!(
                        "Incorrect type. Expected pk value, received {}.",
                        json_type_name(value)
                    ),
                );
                None
            }
        }
    }

    /// @ai:intent Finish reading and hand back collected errors
    /// @ai:effects pure
    pub fn into_errors(self) -> ValidationErrors {
        self.errors
    }
}

/// @ai:intent Accept integers, integral floats and numeric strings
/// @ai:post values outside the i64 range are rejected, never clamped
/// @ai:effects pure
fn parse_integer(value: &Value) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    const UPPER: f64 = i64::MAX as f64;
    const LOWER: f64 = i64::MIN as f64;

    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= LOWER && *f < UPPER)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
