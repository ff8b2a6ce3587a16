//! Immutable data types for Jenkins build metadata.
//!
//! A [`BuildMetadata`] is decoded fresh from every `api/json` response and is
//! never mutated afterwards. Fields the server may omit are `Option`s and
//! render through [`Placeholder`] rather than reflection-style helpers.

mod build;
mod display;
mod metadata;
mod timestamp;

pub use build::{LAST_SUCCESSFUL_BUILD, LATEST_BUILD};
pub use display::Placeholder;
pub use metadata::{
    Artifact, BuildInfo, BuildMetadata, ChangeSet, ChangeSetAuthor, ChangeSetItem, ChangeSetPath,
};
