//! Strict decoding of the concatenated input buffer.

use compono_model::Diagram;
use tracing::debug;

use crate::error::{InputError, InputResult};

/// Decoder for architecture documents.
pub struct DocumentParser;

impl DocumentParser {
    /// Decode `data` as a single YAML document.
    ///
    /// Decoding is strict: duplicate keys, unknown fields and trailing
    /// documents are all rejected. Sections missing from the input decode as
    /// empty mappings, but input holding no document at all (only comments or
    /// whitespace) fails with [`InputError::EmptyInput`].
    pub fn parse(data: &[u8]) -> InputResult<Diagram> {
        if data.is_empty() {
            return Err(InputError::EmptyInput);
        }

        let diagram: Diagram = serde_yaml::from_slice(data)?;
        if diagram.is_empty() && !has_document(data)? {
            return Err(InputError::EmptyInput);
        }

        debug!(
            "Decoded {} area(s), {} component(s), {} level(s), {} team(s), {} type(s)",
            diagram.areas.len(),
            diagram.components.len(),
            diagram.levels.len(),
            diagram.teams.len(),
            diagram.types.len()
        );
        Ok(diagram)
    }
}

/// Whether `data` holds a document with a non-null root.
fn has_document(data: &[u8]) -> InputResult<bool> {
    let root: serde_yaml::Value = serde_yaml::from_slice(data)?;
    Ok(!root.is_null())
}
