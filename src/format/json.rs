//! JSON output formatting.

use crate::error::{Error, Result};
use crate::query::QueryResult;

/// Format a query result as JSON.
pub fn format_json(result: &QueryResult) -> Result<String> {
    serde_json::to_string_pretty(result).map_err(|e| Error::FormatError(e.to_string()))
}
