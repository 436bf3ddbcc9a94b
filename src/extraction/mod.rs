//! Field extraction module
//!
//! This module holds the decision logic of the crate: the precedence rules
//! that pick among conflicting metadata sources, and the resolver that turns
//! page-relative icon/image references into absolute URLs.

pub mod fields;
pub mod resolve;

pub use fields::{extract_fields, ExtractedFields};
pub use resolve::{resolve_relative, UrlParts};
