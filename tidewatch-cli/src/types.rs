//! Common types used across CLI modules

use anyhow::{Result, anyhow};
use serde_json::Value as JsonValue;

/// Length of the hex part of a generated id
const ID_HEX_LEN: usize = 32;

/// Identifier that can be either a full id or an unambiguous prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdOrPrefix {
    /// Full id, e.g. `job_0f3c...`
    Full(String),
    /// Lowercased prefix, always carrying the kind prefix (`job_`, `pipeline_`)
    Prefix(String),
}

impl IdOrPrefix {
    /// Parse user input for an id of the given kind
    ///
    /// The kind prefix may be omitted: `3fa` and `job_3fa` name the same job.
    pub fn parse(input: &str, kind_prefix: &str) -> Self {
        let lowered = input.trim().to_lowercase();
        let normalized = if lowered.starts_with(kind_prefix) {
            lowered
        } else {
            format!("{}{}", kind_prefix, lowered)
        };

        let hex = &normalized[kind_prefix.len()..];
        if hex.len() == ID_HEX_LEN && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            IdOrPrefix::Full(normalized)
        } else {
            IdOrPrefix::Prefix(normalized)
        }
    }

    /// Get the id if this is a full one
    pub fn as_full(&self) -> Option<&str> {
        match self {
            IdOrPrefix::Full(id) => Some(id),
            IdOrPrefix::Prefix(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            IdOrPrefix::Full(id) | IdOrPrefix::Prefix(id) => id,
        }
    }
}

impl std::fmt::Display for IdOrPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a single `key=value` pair
///
/// The value is read as JSON when it parses (`5`, `true`, `{"a":1}`), and
/// kept as a plain string otherwise.
pub fn parse_key_json(s: &str) -> Result<(String, JsonValue)> {
    let pos = s
        .find('=')
        .ok_or_else(|| anyhow!("invalid KEY=value: no `=` found in `{}`", s))?;
    let key = s[..pos].trim();
    if key.is_empty() {
        return Err(anyhow!("invalid KEY=value: empty key in `{}`", s));
    }

    let raw = &s[pos + 1..];
    let value = serde_json::from_str(raw).unwrap_or_else(|_| JsonValue::String(raw.to_string()));

    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_job_id() {
        let id = "job_0123456789abcdef0123456789abcdef";
        let parsed = IdOrPrefix::parse(id, "job_");
        assert_eq!(parsed.as_full(), Some(id));
    }

    #[test]
    fn test_bare_hex_gets_kind_prefix() {
        let parsed = IdOrPrefix::parse("0123456789ABCDEF0123456789abcdef", "job_");
        assert_eq!(
            parsed,
            IdOrPrefix::Full("job_0123456789abcdef0123456789abcdef".to_string())
        );

        let parsed = IdOrPrefix::parse("3fa", "pipeline_");
        assert_eq!(parsed, IdOrPrefix::Prefix("pipeline_3fa".to_string()));
        assert!(parsed.as_full().is_none());
    }

    #[test]
    fn test_prefixed_short_input_stays_prefix() {
        let parsed = IdOrPrefix::parse("job_3f", "job_");
        assert_eq!(parsed.to_string(), "job_3f");
    }

    #[test]
    fn test_parse_key_json_values() {
        assert_eq!(
            parse_key_json("lat=37.8").unwrap(),
            ("lat".to_string(), json!(37.8))
        );
        assert_eq!(
            parse_key_json("region=Bay Area").unwrap(),
            ("region".to_string(), json!("Bay Area"))
        );
        assert_eq!(
            parse_key_json("bbox=[1,2,3,4]").unwrap(),
            ("bbox".to_string(), json!([1, 2, 3, 4]))
        );
        assert_eq!(
            parse_key_json("query=a=b").unwrap(),
            ("query".to_string(), json!("a=b"))
        );
    }

    #[test]
    fn test_parse_key_json_rejects_malformed() {
        assert!(parse_key_json("novalue").is_err());
        assert!(parse_key_json("=5").is_err());
    }
}
