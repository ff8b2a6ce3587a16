use serde_json::error::Category;

use crate::data::BuildMetadata;
use crate::error::{Error, MetadataSyntaxError, Result};

/// Decode an `api/json` body into [`BuildMetadata`].
///
/// Malformed JSON fails with [`Error::Syntax`], which keeps the body and the
/// byte offset where parsing stopped. Well-formed JSON of the wrong shape
/// fails with [`Error::Decode`].
pub fn decode(raw: &[u8]) -> Result<BuildMetadata> {
    serde_json::from_slice(raw).map_err(|e| classify(raw, e))
}

fn classify(raw: &[u8], err: serde_json::Error) -> Error {
    match err.classify() {
        Category::Syntax | Category::Eof => {
            let offset = byte_offset(raw, err.line(), err.column());
            Error::Syntax(MetadataSyntaxError {
                raw: String::from_utf8_lossy(raw).into_owned(),
                message: err.to_string(),
                offset,
            })
        }
        Category::Data | Category::Io => Error::Decode(err),
    }
}

// serde_json reports 1-based lines and byte columns; column counts the
// offending byte, so line start + column is the number of bytes consumed.
fn byte_offset(raw: &[u8], line: usize, column: usize) -> usize {
    let line_start: usize = raw
        .split(|&b| b == b'\n')
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum();
    (line_start + column).min(raw.len())
}
