use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned by the API. Servers send either a JSON number or a
/// string, and both must round-trip unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Int(i64),
    Text(String),
}

impl ResourceId {
    /// Integer value of the id. Text ids use their leading integer prefix
    /// (`"42abc"` → 42); anything without one maps to 0.
    pub fn numeric(&self) -> i64 {
        match self {
            ResourceId::Int(n) => *n,
            ResourceId::Text(s) => leading_integer(s).unwrap_or(0),
        }
    }
}

fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Int(n) => write!(f, "{n}"),
            ResourceId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(n: i64) -> Self {
        ResourceId::Int(n)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        ResourceId::Text(s.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        ResourceId::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_value() {
        assert_eq!(ResourceId::Int(-7).numeric(), -7);
        assert_eq!(ResourceId::from("42").numeric(), 42);
        assert_eq!(ResourceId::from("  12abc").numeric(), 12);
        assert_eq!(ResourceId::from("-3").numeric(), -3);
        assert_eq!(ResourceId::from("abc").numeric(), 0);
        assert_eq!(ResourceId::from("").numeric(), 0);
        assert_eq!(ResourceId::from("-").numeric(), 0);
    }

    #[test]
    fn test_deserialize_number_or_string() {
        let ids: Vec<ResourceId> = serde_json::from_str(r#"[5, "6f1c"]"#).unwrap();
        assert_eq!(ids, vec![ResourceId::Int(5), ResourceId::from("6f1c")]);
        assert_eq!(serde_json::to_string(&ids).unwrap(), r#"[5,"6f1c"]"#);
    }

    #[test]
    fn test_display_as_path_segment() {
        assert_eq!(format!("/notes/{}", ResourceId::Int(3)), "/notes/3");
        assert_eq!(format!("/notes/{}", ResourceId::from("ab")), "/notes/ab");
    }
}
