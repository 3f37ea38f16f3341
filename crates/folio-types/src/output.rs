//! Rendering-agnostic terminal output.
//!
//! The interpreter classifies what it produced; the display layer decides
//! colors and layout. The serde shape is part of the public contract: an
//! embedding page receives these messages as JSON with a `kind` tag.

use serde::{Deserialize, Serialize};

/// One entry in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    /// Display name; directories carry a trailing `/`.
    pub name: String,
    /// Whether the entry can be opened with `open`.
    #[serde(rename = "isExecutable")]
    pub is_runnable: bool,
}

/// A typed output line produced by one command invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OutputMessage {
    /// Echo of the line the user entered.
    Command { text: String },
    /// Plain informational text.
    Normal { text: String },
    /// Recoverable failure, named to the user.
    Error { text: String },
    /// Non-fatal notice: usage hints, targets that cannot be opened.
    Warning { text: String },
    /// Directory listing.
    #[serde(rename = "list")]
    Listing { items: Vec<ListingEntry> },
}

impl OutputMessage {
    pub fn command(text: impl Into<String>) -> Self {
        Self::Command { text: text.into() }
    }

    pub fn normal(text: impl Into<String>) -> Self {
        Self::Normal { text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::Error { text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::Warning { text: text.into() }
    }

    /// The text payload, or `None` for listings.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Command { text }
            | Self::Normal { text }
            | Self::Error { text }
            | Self::Warning { text } => Some(text),
            Self::Listing { .. } => None,
        }
    }
}
