//! Error type shared by every public operation.
//!
//! All failures are non-fatal and surface as an [`Error`] value; nothing
//! panics across the crate boundary.  Allocation failure on the Rust side
//! aborts the process (the standard allocator's behaviour), which is the
//! intended policy: there is no recovery path for a half-built record.
//! Allocation failure inside the interpreter is different: it is reported
//! by Lua and arrives here as [`Error::Load`] or [`Error::Lua`].

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Empty filename, empty path, or an empty path segment under the
    /// strict segment policy.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The interpreter failed to read, parse or execute the script.
    #[error("failed to load script {filename}: {source}")]
    Load {
        filename: String,
        #[source]
        source: mlua::Error,
    },

    /// A path segment resolved to nil.
    #[error("unable to find object '{segment}' in {path} from {filename}")]
    Lookup {
        segment: String,
        path: String,
        filename: String,
    },

    /// A field lookup was attempted on something that cannot be indexed.
    #[error("cannot look up '{segment}' in {path}: parent is a {kind}")]
    NotIndexable {
        segment: String,
        path: String,
        kind: &'static str,
    },

    /// The resolved value has no host representation (function, thread,
    /// userdata, ...).
    #[error("cannot represent {path}: value is a {kind}")]
    Type { path: String, kind: &'static str },

    #[error("{path} is not a table (found {kind})")]
    NotATable { path: String, kind: &'static str },

    #[error("{path} is a table, expected a scalar")]
    NotAScalar { path: String },

    /// A table contains one of its own ancestors.
    #[error("cyclic table reference at {path}")]
    Cycle { path: String },

    #[error("table nesting at {path} exceeds the depth limit of {limit}")]
    DepthExceeded { path: String, limit: usize },

    /// A release function was called on the wrong kind of record.
    #[error("release mismatch: expected a {expected} record, found a {found}")]
    TagMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Any other interpreter error (a raising `__index`, memory limit, ...).
    #[error(transparent)]
    Lua(#[from] mlua::Error),
}

impl Error {
    /// `true` for the "value not available" family: the path simply does
    /// not lead anywhere.  Callers treating a missing value as optional
    /// can match on this instead of on individual variants.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Lookup { .. } | Error::NotIndexable { .. })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
