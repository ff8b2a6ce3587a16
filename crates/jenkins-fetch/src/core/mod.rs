//! Pure transformations: alias resolution, URL construction, decoding and
//! number formatting. Nothing in this module performs I/O.

mod decode;
mod format;
mod resolve;
mod url;

pub use decode::decode;
pub use format::{format_decimal, kilobytes_per_second};
pub use resolve::resolve_build;
pub use url::{artifact_url, metadata_url};
