//! Resolver configuration.
//!
//! | Setting        | Default   | Effect                                              |
//! |----------------|-----------|-----------------------------------------------------|
//! | `max_depth`    | 64        | deepest table nesting materialized                  |
//! | `segments`     | `Strict`  | how empty path segments (`a..b`, `.a`, `a.`) behave |
//! | `memory_limit` | none      | interpreter allocation cap, in bytes                |
//!
//! The core never reads the environment; hosts build a config in code (the
//! `fluxlua` binary maps its flags onto one).

/// Default limit on table nesting during materialization.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Treatment of empty segments in a dotted path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentPolicy {
    /// An empty segment is an invalid path.
    #[default]
    Strict,
    /// Empty segments are dropped, so `a..b` reads as `a.b`.  A path with
    /// no non-empty segment is still invalid.
    SkipEmpty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    pub max_depth: usize,
    pub segments: SegmentPolicy,
    pub memory_limit: Option<usize>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            segments: SegmentPolicy::Strict,
            memory_limit: None,
        }
    }
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_segments(mut self, segments: SegmentPolicy) -> Self {
        self.segments = segments;
        self
    }

    pub fn with_memory_limit(mut self, bytes: usize) -> Self {
        self.memory_limit = Some(bytes);
        self
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
