//! Multiple-choice widget driven by `alternatives.show` messages.
//!
//! [`AlternativesForm`] renders each pushed question into a [`Document`]
//! laid out like the alternatives panel and reports selection changes as
//! `alternatives.answer` messages.

mod document;
mod form;
pub mod template;

use thiserror::Error;

pub use document::{Document, FORM_ID, Node, TEMPLATE_ID, WORDING_ID};
pub use form::AlternativesForm;
pub use template::{AlternativeEntry, Fragment, FragmentNode};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    #[error("element #{id} not found")]
    MissingElement { id: String },

    #[error("element #{id} is a {found}, expected a {expected}")]
    WrongElement {
        id: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("alternatives template has no {missing}")]
    MalformedTemplate { missing: &'static str },

    #[error("alternative value {value:?} is not an integer")]
    InvalidValue { value: String },

    #[error("no alternative is selected")]
    NoSelection,

    #[error("no alternative at position {position} (form holds {len})")]
    NoSuchEntry { position: usize, len: usize },
}

impl WidgetError {
    fn wrong_element(id: &str, expected: &'static str, found: &'static str) -> Self {
        Self::WrongElement {
            id: id.to_string(),
            expected,
            found,
        }
    }
}
