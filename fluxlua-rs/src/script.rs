//! Loaded scripts.
//!
//! A [`Script`] owns one Lua 5.4 interpreter in which a script file has
//! been executed, plus the file's name for diagnostics.  Values are read
//! back by dotted path:
//!
//! ```no_run
//! use fluxlua::Script;
//!
//! let script = Script::load("settings.lua")?;
//! let width = script.get("window.width")?.num();
//! let title = script.get("window.title")?;
//! println!("{} ({width})", title.str());
//! # Ok::<(), fluxlua::Error>(())
//! ```
//!
//! `mlua::Lua` is neither `Send` nor `Sync`, and neither is `Script`: a
//! handle belongs to one thread and its calls are serialized by
//! construction.  Use one handle per worker if several threads need the
//! same file.
//!
//! Dropping a `Script` closes the interpreter; [`Script::close`] does the
//! same explicitly.

use std::path::Path;

use mlua::prelude::*;

use crate::coerce;
use crate::config::ResolverConfig;
use crate::cursor;
use crate::error::{Error, Result};
use crate::value::{Value, Variable};

pub struct Script {
    lua: Lua,
    filename: String,
    config: ResolverConfig,
}

impl Script {
    // ── Loading ───────────────────────────────────────────────────────────

    /// Load and execute `path` in a fresh interpreter with the default
    /// [`ResolverConfig`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(None, path, ResolverConfig::default())
    }

    /// Load and execute `path`, reusing `lua` if one is supplied.
    ///
    /// On failure no handle is produced and the interpreter (whether
    /// supplied or freshly created) is dropped.
    pub fn load_with(
        lua: Option<Lua>,
        path: impl AsRef<Path>,
        config: ResolverConfig,
    ) -> Result<Self> {
        let path = path.as_ref();
        let filename = path.display().to_string();
        if filename.is_empty() {
            return Err(Error::InvalidInput("empty filename".into()));
        }

        let lua = prepare(lua, &config)?;
        tracing::debug!(file = %filename, "loading script");
        lua.load(path)
            .exec()
            .map_err(|source| load_error(&filename, source))?;

        Ok(Self { lua, filename, config })
    }

    /// Execute an in-memory chunk.  `name` stands in for the filename in
    /// diagnostics and as the chunk name in Lua tracebacks.
    pub fn from_source(name: &str, source: &str) -> Result<Self> {
        Self::from_source_with(None, name, source, ResolverConfig::default())
    }

    pub fn from_source_with(
        lua: Option<Lua>,
        name: &str,
        source: &str,
        config: ResolverConfig,
    ) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::InvalidInput("empty script name".into()));
        }

        let lua = prepare(lua, &config)?;
        tracing::debug!(file = name, "loading script source");
        lua.load(source)
            .set_name(name)
            .exec()
            .map_err(|source| load_error(name, source))?;

        Ok(Self { lua, filename: name.to_owned(), config })
    }

    // ── Resolution ────────────────────────────────────────────────────────

    /// Resolve a dotted path and materialize whatever is found there.
    pub fn get(&self, path: &str) -> Result<Variable> {
        self.resolve(path, |lua, value, config| coerce::coerce(lua, value, path, config))
    }

    /// Like [`get`](Self::get), but a table is an error.
    pub fn get_scalar(&self, path: &str) -> Result<Variable> {
        let var = self.get(path)?;
        if var.is_table() {
            return Err(Error::NotAScalar { path: path.to_owned() });
        }
        Ok(var)
    }

    /// Like [`get`](Self::get), but the value must be a table.
    pub fn get_table(&self, path: &str) -> Result<Variable> {
        self.resolve(path, |lua, value, config| {
            coerce::materialize_table(lua, value, path, config)
        })
    }

    /// `true` if `path` leads to a non-nil value.  Nothing is materialized.
    pub fn contains(&self, path: &str) -> bool {
        cursor::resolve(&self.lua, &self.filename, path, self.config.segments).is_ok()
    }

    fn resolve<F>(&self, path: &str, materialize: F) -> Result<Variable>
    where
        F: FnOnce(&Lua, LuaValue, &ResolverConfig) -> Result<Value>,
    {
        let result = cursor::resolve(&self.lua, &self.filename, path, self.config.segments)
            .and_then(|value| materialize(&self.lua, value, &self.config));
        match result {
            Ok(value) => {
                tracing::debug!(path, kind = value.kind(), "resolved");
                Ok(Variable::new(path, value))
            }
            Err(e) => {
                tracing::debug!(path, file = %self.filename, error = %e, "resolve failed");
                Err(e)
            }
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// The underlying interpreter, for hosts that need more than reads.
    pub fn lua(&self) -> &Lua {
        &self.lua
    }

    /// Close the interpreter and release the handle.
    pub fn close(self) {
        tracing::debug!(file = %self.filename, "closing script");
    }
}

impl std::fmt::Debug for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Script")
            .field("filename", &self.filename)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn prepare(lua: Option<Lua>, config: &ResolverConfig) -> Result<Lua> {
    let lua = lua.unwrap_or_else(Lua::new);
    if let Some(limit) = config.memory_limit {
        lua.set_memory_limit(limit)?;
    }
    Ok(lua)
}

fn load_error(filename: &str, source: LuaError) -> Error {
    tracing::warn!(file = filename, error = %source, "failed to load script");
    Error::Load { filename: filename.to_owned(), source }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
