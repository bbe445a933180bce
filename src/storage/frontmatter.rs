//! YAML frontmatter in markdown documents
//!
//! ADRs are markdown files whose metadata sits between `---` delimiters
//! at the top of the file.

use crate::model::SchemaError;

/// Splits a markdown document into `(frontmatter, body)`
pub fn split(content: &str) -> Result<(&str, &str), SchemaError> {
    let content = content.trim_start();

    let rest = content
        .strip_prefix("---")
        .ok_or_else(|| SchemaError::Syntax("Missing frontmatter (must start with ---)".into()))?;

    // The closing delimiter must start a line
    let end_pos = rest
        .find("\n---")
        .ok_or_else(|| SchemaError::Syntax("Missing frontmatter end delimiter (---)".into()))?;

    let yaml = rest[..end_pos].trim();
    let body = rest[end_pos + 4..].trim();

    Ok((yaml, body))
}
