//! Cell values stored in tree items

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// Row classification carried in the hidden type-tag column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RowKind {
    Company,
    Role,
    Interview,
    Person,
}

impl RowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowKind::Company => "COMPANY",
            RowKind::Role => "ROLE",
            RowKind::Interview => "INTERVIEW",
            RowKind::Person => "PERSON",
        }
    }
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A displayable scalar held by one column of a tree item.
///
/// `Empty` is the value of freshly inserted columns and children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Empty,
    Text(String),
    Integer(i64),
    Bool(bool),
    Tag(RowKind),
}

impl Value {
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> Option<RowKind> {
        match self {
            Value::Tag(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Text(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Tag(kind) => write!(f, "{}", kind),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<RowKind> for Value {
    fn from(kind: RowKind) -> Self {
        Value::Tag(kind)
    }
}

/// Dates are stored as ISO strings (`YYYY-MM-DD`).
impl From<NaiveDate> for Value {
    fn from(date: NaiveDate) -> Self {
        Value::Text(date.format("%Y-%m-%d").to_string())
    }
}
