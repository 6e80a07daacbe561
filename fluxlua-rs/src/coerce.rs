//! Conversion of interpreter values into host [`Value`]s.
//!
//! | Lua type                | Result                                   |
//! |-------------------------|------------------------------------------|
//! | nil                     | [`Error::Type`]; a successful walk never ends on nil |
//! | string                  | scalar; `num` is the numeric prefix or 0 |
//! | integer / float         | scalar; `str` is Lua's `tostring` text   |
//! | boolean                 | `("1", 1.0)` / `("0", 0.0)`              |
//! | table                   | [`Value::Table`], recursively            |
//! | function, thread, userdata, ... | [`Error::Type`]                  |
//!
//! Tables are enumerated in the interpreter's native `next` order, which
//! is unspecified except that the array part comes first, in index order.
//! Keys are captured by value before anything is converted, so integer
//! keys keep their exact decimal form.

use std::ffi::c_void;

use mlua::prelude::*;

use crate::config::ResolverConfig;
use crate::error::{Error, Result};
use crate::number::format_integer_key;
use crate::value::Value;

/// Coerce one resolved value.  `path` names it in error messages.
pub fn coerce(lua: &Lua, value: LuaValue, path: &str, config: &ResolverConfig) -> Result<Value> {
    Materializer::new(lua, config).coerce(value, path)
}

/// Materialize a value that must be a table.
pub fn materialize_table(
    lua: &Lua,
    value: LuaValue,
    path: &str,
    config: &ResolverConfig,
) -> Result<Value> {
    match value {
        LuaValue::Table(t) => Materializer::new(lua, config).table(t, path),
        other => Err(Error::NotATable { path: path.to_owned(), kind: other.type_name() }),
    }
}

// ── Materializer ──────────────────────────────────────────────────────────────

/// Recursive walker.  `ancestors` holds the identity of every table on the
/// current branch; meeting one of them again is a cycle.  Tables shared
/// between sibling branches are materialized once per occurrence.
struct Materializer<'l> {
    lua: &'l Lua,
    config: &'l ResolverConfig,
    ancestors: Vec<*const c_void>,
}

impl<'l> Materializer<'l> {
    fn new(lua: &'l Lua, config: &'l ResolverConfig) -> Self {
        Self { lua, config, ancestors: Vec::new() }
    }

    fn coerce(&mut self, value: LuaValue, path: &str) -> Result<Value> {
        match value {
            LuaValue::Nil => Err(Error::Type { path: path.to_owned(), kind: "nil" }),
            LuaValue::Boolean(b) => Ok(Value::boolean(b)),
            LuaValue::Integer(n) => Ok(Value::scalar(n.to_string())),
            LuaValue::Number(n) => Ok(Value::scalar(self.number_text(n)?)),
            LuaValue::String(s) => Ok(Value::scalar(lossy(&s))),
            LuaValue::Table(t) => self.table(t, path),
            other => Err(Error::Type { path: path.to_owned(), kind: other.type_name() }),
        }
    }

    fn table(&mut self, table: LuaTable, path: &str) -> Result<Value> {
        let id = table.to_pointer();
        if self.ancestors.contains(&id) {
            return Err(Error::Cycle { path: path.to_owned() });
        }
        if self.ancestors.len() >= self.config.max_depth {
            return Err(Error::DepthExceeded {
                path: path.to_owned(),
                limit: self.config.max_depth,
            });
        }

        self.ancestors.push(id);
        let entries = self.entries(table, path);
        self.ancestors.pop();

        Ok(Value::Table(entries?))
    }

    fn entries(&mut self, table: LuaTable, path: &str) -> Result<Vec<(String, Value)>> {
        let mut entries = Vec::new();
        for pair in table.pairs::<LuaValue, LuaValue>() {
            let (key, value) = pair?;
            let key = self.key_text(&key, path)?;
            let child_path = format!("{path}.{key}");
            let value = self.coerce(value, &child_path)?;
            entries.push((key, value));
        }
        tracing::trace!(path, count = entries.len(), "materialized table");
        Ok(entries)
    }

    fn key_text(&self, key: &LuaValue, path: &str) -> Result<String> {
        match key {
            LuaValue::Integer(n) => Ok(format_integer_key(*n)),
            LuaValue::Number(n) => self.number_text(*n),
            LuaValue::String(s) => Ok(lossy(s)),
            LuaValue::Boolean(b) => Ok(b.to_string()),
            other => Err(Error::Type {
                path: format!("{path}[<{} key>]", other.type_name()),
                kind: other.type_name(),
            }),
        }
    }

    /// Float text exactly as Lua's `tostring` renders it (`10.0`, `36.7`,
    /// `1e+100`).
    fn number_text(&self, n: f64) -> Result<String> {
        match self.lua.coerce_string(LuaValue::Number(n))? {
            Some(s) => Ok(lossy(&s)),
            None => Ok(n.to_string()),
        }
    }
}

fn lossy(s: &LuaString) -> String {
    String::from_utf8_lossy(&s.as_bytes()).into_owned()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
