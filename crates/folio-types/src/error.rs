//! Error types for folio.
//!
//! These cover construction-time defects only: a malformed manifest, an
//! invalid tree. User-input problems (bad paths, unknown commands) are
//! never errors at this level; the interpreter reports them as typed
//! output messages instead.

use std::io;

/// Errors produced by the folio crates.
#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error("tree error: {0}")]
    Tree(String),

    #[error("manifest error: {0}")]
    Manifest(String),

    #[error("command error: {0}")]
    Command(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, FolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_error_display() {
        let e = FolioError::Tree("duplicate sibling".into());
        assert_eq!(format!("{e}"), "tree error: duplicate sibling");
    }

    #[test]
    fn manifest_error_display() {
        let e = FolioError::Manifest("missing root".into());
        assert_eq!(format!("{e}"), "manifest error: missing root");
    }

    #[test]
    fn command_error_display() {
        let e = FolioError::Command("bad dispatch".into());
        assert_eq!(format!("{e}"), "command error: bad dispatch");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: FolioError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let bad_toml = "this is [[[not valid toml";
        let toml_err = toml::from_str::<toml::Value>(bad_toml).unwrap_err();
        let e: FolioError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn json_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let e: FolioError = json_err.into();
        assert!(format!("{e}").contains("JSON error"));
    }

    #[test]
    fn error_is_debug() {
        let e = FolioError::Tree("test".into());
        assert!(format!("{e:?}").contains("Tree"));
    }

    #[test]
    fn result_alias_ok() {
        let r: Result<i32> = Ok(42);
        assert_eq!(r.unwrap(), 42);
    }

    #[test]
    fn result_alias_err() {
        let r: Result<i32> = Err(FolioError::Manifest("oops".into()));
        assert!(r.is_err());
    }
}
