//! Feature slices
//!
//! - `parsing` : lexing, tag scanning, syntax validation
//! - `output`  : tags-file / JSON / xref writers

pub mod output;
pub mod parsing;
