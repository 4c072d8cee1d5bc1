//! Query path parsing.

use crate::error::{Error, Result};

/// A segment in a query path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Named field access (e.g., "message", "accountKeys").
    Field(String),
    /// Array index access (e.g., "0", "[1]").
    Index(usize),
    /// Wildcard for all array elements ("*" or "[*]").
    Wildcard,
}

/// A parsed query path.
#[derive(Debug, Clone)]
pub struct QueryPath {
    /// The segments that make up this path.
    pub segments: Vec<PathSegment>,
}

impl QueryPath {
    /// Parse a query path.
    ///
    /// Dot-separated parts may carry bracketed selectors:
    ///
    /// - `"message.header"` → `[Field("message"), Field("header")]`
    /// - `"signatures.0"` → `[Field("signatures"), Index(0)]`
    /// - `"message.instructions[1].data"` → `[Field, Field, Index(1), Field]`
    /// - `"message.instructions[*]"` → `[Field, Field, Wildcard]`
    pub fn parse(input: &str) -> Result<Self> {
        let mut segments = Vec::new();
        if input.is_empty() {
            return Ok(QueryPath { segments });
        }

        for part in input.split('.') {
            Self::parse_part(part, &mut segments)?;
        }

        Ok(QueryPath { segments })
    }

    /// Parse one dot-separated part, which may be `name`, `name[i]...`, or `[i]...`.
    fn parse_part(part: &str, segments: &mut Vec<PathSegment>) -> Result<()> {
        if part.is_empty() {
            return Err(Error::InvalidQuery(
                "Empty path segment (consecutive dots?)".to_string(),
            ));
        }

        let (head, mut selectors) = match part.find('[') {
            Some(pos) => part.split_at(pos),
            None => (part, ""),
        };

        if !head.is_empty() {
            segments.push(Self::parse_bare(head)?);
        }

        while !selectors.is_empty() {
            let inner_end = selectors.find(']').ok_or_else(|| {
                Error::InvalidQuery(format!("Unclosed '[' in '{}'", part))
            })?;
            let inner = &selectors[1..inner_end];
            segments.push(match inner {
                "*" => PathSegment::Wildcard,
                _ => PathSegment::Index(inner.parse().map_err(|_| {
                    Error::InvalidQuery(format!("Invalid index '[{}]' in '{}'", inner, part))
                })?),
            });

            selectors = &selectors[inner_end + 1..];
            if !selectors.is_empty() && !selectors.starts_with('[') {
                return Err(Error::InvalidQuery(format!(
                    "Unexpected '{}' after ']' in '{}'",
                    selectors, part
                )));
            }
        }

        Ok(())
    }

    /// Parse a part without brackets.
    fn parse_bare(s: &str) -> Result<PathSegment> {
        if s.contains(']') {
            return Err(Error::InvalidQuery(format!("Unmatched ']' in '{}'", s)));
        }

        if s == "*" {
            return Ok(PathSegment::Wildcard);
        }

        if let Ok(idx) = s.parse::<usize>() {
            return Ok(PathSegment::Index(idx));
        }

        Ok(PathSegment::Field(s.to_string()))
    }

    /// Check if this path contains any wildcards.
    pub fn has_wildcard(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, PathSegment::Wildcard))
    }

    /// Check if this path is empty (no segments).
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
