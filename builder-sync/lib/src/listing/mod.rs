//! The registry listing: the `mev-builders` source file that declares
//! `BUILDERS` and `OTHER_BUILDERS` as arrays of `Builder { .. }` literals.
//!
//! [`parse_listing`] reads every `Builder` literal into a [`ParsedEntry`],
//! [`validate_entries`] turns those into [`RegistryEntry`] values or fails
//! naming what is missing, and [`render_listing`] writes a ranked registry
//! back out. Rendering never reads the original text, so
//! parse → validate → render → parse yields the same entries.
//!
//! [`RegistryEntry`]: crate::registry::RegistryEntry

mod parse;
mod render;
mod validation;

pub use parse::parse_listing;
pub use render::{render_entry, render_listing};
pub use validation::validate_entries;

/// An optional text field as written in the listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OptionalText {
    /// The field does not appear in the literal.
    #[default]
    Absent,
    /// `None` or `Some("")`.
    Empty,
    Value(String),
}

impl OptionalText {
    /// Collapses to the value, if there is a non-empty one.
    pub fn into_option(self) -> Option<String> {
        match self {
            OptionalText::Value(value) => Some(value),
            OptionalText::Absent | OptionalText::Empty => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, OptionalText::Absent)
    }
}

/// One `Builder { .. }` literal, field by field.
///
/// Fields that are missing, or written in a form the parser does not
/// recognise, are left unset; validation decides whether that is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedEntry {
    pub name: Option<String>,
    pub identifier: Option<String>,
    pub website: Option<String>,
    pub searcher_rpc: Option<String>,
    pub mev_share_rpc: OptionalText,
    pub extra_data: OptionalText,
    /// Variant name after `Signing::`.
    pub signing: Option<String>,
    pub account_required: Option<bool>,
}
