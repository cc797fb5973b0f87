//! Minimal JSON path: `$`, `.field`, `[index]` and a trailing `[*]`.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
    /// Selects the array itself; only allowed last.
    All,
}

/// A parsed path such as `$.items[0].owner.login`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath {
    source: String,
    segments: Vec<Segment>,
}

/// Why a path expression was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct PathError(String);

impl JsonPath {
    /// Parses a path expression.
    ///
    /// # Errors
    ///
    /// Returns `PathError` when the expression is not `$` followed by
    /// `.field` and `[n]` segments, with `[*]` allowed only last.
    pub fn parse(expr: &str) -> Result<Self, PathError> {
        let source = expr.trim();
        let rest = source
            .strip_prefix('$')
            .ok_or_else(|| PathError("JSON path must start with '$'".to_string()))?;

        let mut segments = Vec::new();
        let mut chars = rest.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '.' => {
                    let mut key = String::new();
                    while let Some(&next) = chars.peek() {
                        if next == '.' || next == '[' {
                            break;
                        }
                        key.push(next);
                        chars.next();
                    }
                    if key.is_empty() {
                        return Err(PathError(format!("empty field name in '{source}'")));
                    }
                    segments.push(Segment::Key(key));
                }
                '[' => {
                    let mut index = String::new();
                    loop {
                        match chars.next() {
                            Some(']') => break,
                            Some(ch) => index.push(ch),
                            None => return Err(PathError(format!("unclosed '[' in '{source}'"))),
                        }
                    }
                    if index == "*" {
                        segments.push(Segment::All);
                    } else {
                        let idx = index
                            .parse()
                            .map_err(|_| PathError(format!("Invalid array index: {index}")))?;
                        segments.push(Segment::Index(idx));
                    }
                }
                other => {
                    return Err(PathError(format!(
                        "unexpected '{other}' in '{source}'"
                    )));
                }
            }
        }

        if segments
            .iter()
            .rev()
            .skip(1)
            .any(|s| matches!(s, Segment::All))
        {
            return Err(PathError(format!("'[*]' must be last in '{source}'")));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// Resolves the path; `None` when any segment is missing.
    #[must_use]
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(root, |current, segment| match segment {
                Segment::Key(key) => current.get(key.as_str()),
                Segment::Index(idx) => current.get(*idx),
                Segment::All => current.is_array().then_some(current),
            })
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
