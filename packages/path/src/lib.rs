//! # Folio Path
//!
//! Path addressing for JSON document trees.
//!
//! A [`Path`] is an ordered list of [`Segment`]s, each either a mapping key or
//! a sequence index. Every read and write the editor performs is a path plus
//! one of the operations in [`ops`]:
//!
//! ```text
//! get(doc, path)            → Option<&Value>   (never fails on a missing path)
//! set(doc, path, value)     → materializes missing containers, then assigns
//! delete(doc, path)         → removes the key/index, no-op if an ancestor is absent
//! ensure_sequence(doc, path)→ &mut Vec<Value>, coercing the slot to a sequence
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use folio_path::{path, ops};
//! use serde_json::json;
//!
//! let mut doc = json!({});
//! ops::set(&mut doc, &path!["languages", "en", "sections", 0, "id"], json!("about"));
//!
//! assert_eq!(doc, json!({ "languages": { "en": { "sections": [{ "id": "about" }] } } }));
//! assert_eq!(ops::get(&doc, &path!["languages", "en", "sections", 0, "id"]), Some(&json!("about")));
//! ```

mod error;
pub mod ops;
mod path;

pub use error::PathError;
pub use ops::{delete, ensure_sequence, get, get_mut, set};
pub use path::{Path, Segment};

/// Build a [`Path`] from a list of keys and indices.
///
/// String-like arguments become [`Segment::Key`], `usize` arguments become
/// [`Segment::Index`].
#[macro_export]
macro_rules! path {
    () => {
        $crate::Path::root()
    };
    ($($segment:expr),+ $(,)?) => {
        $crate::Path::from(vec![$($crate::Segment::from($segment)),+])
    };
}
