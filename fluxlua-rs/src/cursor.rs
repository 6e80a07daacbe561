//! Dotted-path navigation.
//!
//! A path such as `deep_table.mixed_table.prime` is split on `.`; the first
//! segment is looked up in the script's globals and every later segment is
//! a field lookup on the previous result.  Each step consumes a [`Cursor`]
//! and returns a new one, so there is no shared evaluation stack to
//! rebalance: the only interpreter reference a cursor holds is its current
//! value, and that reference is released when the cursor is dropped, on
//! every exit path.
//!
//! Lookups go through `mlua`'s `Table::get`, so `__index` metamethods are
//! honoured the same way `lua_getfield` honours them.

use mlua::prelude::*;

use crate::config::SegmentPolicy;
use crate::error::{Error, Result};

// ── Path splitting ────────────────────────────────────────────────────────────

/// Split a dotted path into segments without modifying it.
///
/// Under [`SegmentPolicy::Strict`] an empty segment (leading, trailing or
/// doubled `.`) is [`Error::InvalidInput`].  Under
/// [`SegmentPolicy::SkipEmpty`] empty segments are dropped.  Either way a
/// path with no usable segment is invalid.
pub fn split_path(path: &str, policy: SegmentPolicy) -> Result<Vec<&str>> {
    if path.is_empty() {
        return Err(Error::InvalidInput("empty path".into()));
    }

    let segments: Vec<&str> = match policy {
        SegmentPolicy::Strict => {
            let segments: Vec<&str> = path.split('.').collect();
            if segments.iter().any(|s| s.is_empty()) {
                return Err(Error::InvalidInput(format!("empty segment in path '{path}'")));
            }
            segments
        }
        SegmentPolicy::SkipEmpty => path.split('.').filter(|s| !s.is_empty()).collect(),
    };

    if segments.is_empty() {
        return Err(Error::InvalidInput(format!("path '{path}' has no segments")));
    }
    Ok(segments)
}

// ── Cursor ────────────────────────────────────────────────────────────────────

/// Position reached while walking a path.
///
/// `walked` is the prefix of the path consumed so far, used in error
/// messages and as the name of the resolved variable.
#[derive(Debug)]
pub struct Cursor<'a> {
    value: LuaValue,
    walked: String,
    filename: &'a str,
}

impl<'a> Cursor<'a> {
    /// Resolve the first segment against the globals table.
    pub fn global(lua: &Lua, filename: &'a str, segment: &str) -> Result<Self> {
        let value: LuaValue = lua.globals().get(segment)?;
        let cursor = Cursor { value, walked: segment.to_owned(), filename };
        cursor.ensure_present(segment)
    }

    /// Step into `segment` of the current value.
    pub fn field(self, segment: &str) -> Result<Self> {
        let parent = format!("{}.{segment}", self.walked);
        let value: LuaValue = match &self.value {
            LuaValue::Table(t) => t.get(segment)?,
            other => {
                return Err(Error::NotIndexable {
                    segment: segment.to_owned(),
                    path: parent,
                    kind: other.type_name(),
                })
            }
        };
        let cursor = Cursor { value, walked: parent, filename: self.filename };
        cursor.ensure_present(segment)
    }

    fn ensure_present(self, segment: &str) -> Result<Self> {
        if self.value.is_nil() {
            tracing::debug!(segment, path = %self.walked, file = self.filename, "lookup miss");
            return Err(Error::Lookup {
                segment: segment.to_owned(),
                path: self.walked,
                filename: self.filename.to_owned(),
            });
        }
        Ok(self)
    }

    pub fn into_value(self) -> LuaValue {
        self.value
    }
}

/// Walk every segment of `path` from the globals table and return the
/// value found at the end.  No assumption is made about its type.
pub fn resolve(lua: &Lua, filename: &str, path: &str, policy: SegmentPolicy) -> Result<LuaValue> {
    let segments = split_path(path, policy)?;
    let (first, rest) = segments
        .split_first()
        .ok_or_else(|| Error::InvalidInput(format!("path '{path}' has no segments")))?;

    let mut cursor = Cursor::global(lua, filename, first)?;
    for segment in rest {
        cursor = cursor.field(segment)?;
    }
    Ok(cursor.into_value())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn lua_with(src: &str) -> Lua {
        let lua = Lua::new();
        lua.load(src).exec().unwrap();
        lua
    }

    #[test]
    fn split_simple() {
        assert_eq!(split_path("a", SegmentPolicy::Strict).unwrap(), vec!["a"]);
        assert_eq!(split_path("a.b.c", SegmentPolicy::Strict).unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn split_strict_rejects_empty_segments() {
        for bad in ["", ".", ".a", "a.", "a..b"] {
            assert!(
                matches!(split_path(bad, SegmentPolicy::Strict), Err(Error::InvalidInput(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn split_skip_empty_drops_them() {
        let p = SegmentPolicy::SkipEmpty;
        assert_eq!(split_path(".a..b.", p).unwrap(), vec!["a", "b"]);
        assert!(matches!(split_path("...", p), Err(Error::InvalidInput(_))));
        assert!(matches!(split_path("", p), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn split_does_not_touch_input() {
        let path = String::from("x.y");
        let _ = split_path(&path, SegmentPolicy::Strict).unwrap();
        assert_eq!(path, "x.y");
    }

    #[test]
    fn resolve_global_and_nested() {
        let lua = lua_with("n = 10; t = { inner = { v = 'deep' } }");
        let v = resolve(&lua, "test.lua", "n", SegmentPolicy::Strict).unwrap();
        assert_eq!(v.as_i64(), Some(10));
        let v = resolve(&lua, "test.lua", "t.inner.v", SegmentPolicy::Strict).unwrap();
        assert_eq!(v.as_str().as_deref(), Some("deep"));
    }

    #[test]
    fn missing_global_names_segment() {
        let lua = lua_with("");
        let err = resolve(&lua, "test.lua", "nope", SegmentPolicy::Strict).unwrap_err();
        match err {
            Error::Lookup { segment, path, filename } => {
                assert_eq!(segment, "nope");
                assert_eq!(path, "nope");
                assert_eq!(filename, "test.lua");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn missing_intermediate_stops_walk() {
        let lua = lua_with("t = { a = {} }");
        let err = resolve(&lua, "f.lua", "t.b.c", SegmentPolicy::Strict).unwrap_err();
        assert!(matches!(&err, Error::Lookup { segment, path, .. } if segment == "b" && path == "t.b"));
    }

    #[test]
    fn field_of_scalar_is_not_indexable() {
        let lua = lua_with("n = 5");
        let err = resolve(&lua, "f.lua", "n.x", SegmentPolicy::Strict).unwrap_err();
        assert!(matches!(err, Error::NotIndexable { kind: "integer", .. }));
    }

    #[test]
    fn false_is_present() {
        let lua = lua_with("flag = false");
        let v = resolve(&lua, "f.lua", "flag", SegmentPolicy::Strict).unwrap();
        assert_eq!(v, LuaValue::Boolean(false));
    }

    #[test]
    fn index_metamethod_is_honoured() {
        let lua = lua_with(
            "proxy = setmetatable({}, { __index = function(_, k) return k .. '!' end })",
        );
        let v = resolve(&lua, "f.lua", "proxy.hello", SegmentPolicy::Strict).unwrap();
        assert_eq!(v.as_str().as_deref(), Some("hello!"));
    }

    #[test]
    fn skip_empty_policy_resolves() {
        let lua = lua_with("t = { a = 1 }");
        let v = resolve(&lua, "f.lua", "t..a", SegmentPolicy::SkipEmpty).unwrap();
        assert_eq!(v.as_i64(), Some(1));
    }
}
