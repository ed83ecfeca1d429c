// Strict JSON helpers backed by serde_json. Key order is preserved.
use std::string::FromUtf8Error;

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("{0}")]
    Syntax(#[from] serde_json::Error),
    #[error("Output is not valid UTF-8: {0}")]
    Encoding(#[from] FromUtf8Error),
    #[error("Unknown indentation '{0}', expected \"tabs\", \"2\" or \"4\"")]
    Indentation(String),
}

/// Parses strict JSON into a `serde_json::Value`.
///
/// # Example
/// ```
/// use devtools_core::json::strict::parse_json;
/// let value = parse_json("{\"id\":1}")?;
/// assert_eq!(value["id"], 1);
/// # Ok::<(), devtools_core::json::JsonError>(())
/// ```
pub fn parse_json(input: &str) -> Result<Value, JsonError> {
    Ok(serde_json::from_str(input)?)
}

/// Pretty-prints strict JSON with a four space indent.
///
/// Anything outside plain JSON (trailing commas, comments, bare keys) is
/// rejected with serde_json's line/column message.
///
/// # Example
/// ```
/// use devtools_core::json::strict::format;
/// assert_eq!(format("{\"b\":1,\"a\":[true]}")?, "{\n    \"b\": 1,\n    \"a\": [\n        true\n    ]\n}");
/// assert!(format("{\"a\":1,}").is_err());
/// # Ok::<(), devtools_core::json::JsonError>(())
/// ```
pub fn format(input: &str) -> Result<String, JsonError> {
    let value = parse_json(input)?;
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}

/// Re-encodes strict JSON without any insignificant whitespace.
pub fn minify(input: &str) -> Result<String, JsonError> {
    let value = parse_json(input)?;
    Ok(serde_json::to_string(&value)?)
}
