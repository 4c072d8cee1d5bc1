//! Raw output: bare values for shell pipelines.

use crate::error::{Error, Result};
use crate::query::{QueryResult, QueryValue};

/// Format a query result as raw output.
///
/// Strings are printed without quotes, arrays of scalars one element per
/// line, and objects as compact JSON.
pub fn format_raw(result: &QueryResult) -> Result<String> {
    match result {
        QueryResult::FullTransaction(json) => {
            serde_json::to_string(json).map_err(|e| Error::FormatError(e.to_string()))
        }
        QueryResult::Single(value) => format_value_raw(value),
        QueryResult::Multiple(values) => {
            let formatted: Result<Vec<String>> = values.iter().map(format_value_raw).collect();
            Ok(formatted?.join("\n"))
        }
    }
}

/// Format a single value in raw mode.
fn format_value_raw(value: &QueryValue) -> Result<String> {
    match value {
        QueryValue::Null => Ok("null".to_string()),
        QueryValue::Bool(b) => Ok(b.to_string()),
        QueryValue::Number(n) => Ok(n.to_string()),
        QueryValue::String(s) => Ok(s.clone()),
        QueryValue::Array(arr) if arr.iter().all(is_scalar) => {
            let items: Result<Vec<String>> = arr.iter().map(format_value_raw).collect();
            Ok(items?.join("\n"))
        }
        QueryValue::Array(_) | QueryValue::Object(_) => {
            serde_json::to_string(value).map_err(|e| Error::FormatError(e.to_string()))
        }
    }
}

fn is_scalar(value: &QueryValue) -> bool {
    !matches!(value, QueryValue::Array(_) | QueryValue::Object(_))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_unquoted() {
        let value = QueryValue::String("Fj2Eoy".to_string());
        assert_eq!(format_value_raw(&value).unwrap(), "Fj2Eoy");
    }

    #[test]
    fn test_scalar_array_one_per_line() {
        let value = QueryValue::Array(vec![
            QueryValue::String("a".to_string()),
            QueryValue::Number(serde_json::Number::from(1)),
        ]);
        assert_eq!(format_value_raw(&value).unwrap(), "a\n1");
    }

    #[test]
    fn test_nested_array_as_json() {
        let value = QueryValue::Array(vec![QueryValue::Array(vec![QueryValue::Null])]);
        assert_eq!(format_value_raw(&value).unwrap(), "[[null]]");
    }

    #[test]
    fn test_object_as_compact_json() {
        let value = QueryValue::from(serde_json::json!({ "computeUnitLimit": 200000 }));
        assert_eq!(
            format_value_raw(&value).unwrap(),
            "{\"computeUnitLimit\":200000}"
        );
    }

    #[test]
    fn test_multiple() {
        let result = QueryResult::Multiple(vec![
            QueryValue::String("x".to_string()),
            QueryValue::String("y".to_string()),
        ]);
        assert_eq!(format_raw(&result).unwrap(), "x\ny");
    }
}
