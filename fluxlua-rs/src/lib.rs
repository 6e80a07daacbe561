//! Read configuration values out of Lua scripts by dotted path.
//!
//! A script is executed once in its own Lua 5.4 interpreter (via `mlua`);
//! afterwards any binding it left behind can be read back with a path such
//! as `window.size.width`.  Leaf values arrive as a string plus a number,
//! tables arrive as ordered `(key, Value)` lists.
//!
//! | Module      | Contents                                             |
//! |-------------|------------------------------------------------------|
//! | [`script`]  | [`Script`]: load / resolve / close                   |
//! | [`cursor`]  | path splitting and namespace navigation              |
//! | [`coerce`]  | Lua value → [`Value`] conversion, table walking      |
//! | [`value`]   | [`Value`], [`Variable`], header-chain [`Record`]s     |
//! | [`number`]  | `atof`-style numeric parsing                         |
//! | [`config`]  | [`ResolverConfig`]                                   |
//! | [`error`]   | [`Error`] and [`Result`]                             |
//! | [`cli`]     | argument parsing for the `fluxlua` binary            |

pub mod cli;
pub mod coerce;
pub mod config;
pub mod cursor;
pub mod error;
pub mod number;
pub mod script;
pub mod value;

pub use config::{ResolverConfig, SegmentPolicy};
pub use error::{Error, Result};
pub use script::Script;
pub use value::{Record, Value, Variable, TABLE_TAG};
