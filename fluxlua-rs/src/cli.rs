//! Command-line argument parsing.
//!
//! Usage:
//!   fluxlua [-v] [-s] [-r] [-d<depth>] <script.lua> <path>...

use std::path::PathBuf;

use crate::config::{ResolverConfig, SegmentPolicy};

// ── Public types ──────────────────────────────────────────────────────────────

/// Parsed command-line arguments.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Script to load.
    pub script: PathBuf,
    /// Dotted paths to resolve, in order.
    pub paths: Vec<String>,
    /// Debug-level logging (`-v`).
    pub verbose: bool,
    /// Drop empty path segments instead of rejecting them (`-s`).
    pub skip_empty: bool,
    /// Print the flat header-chain records (`-r`).
    pub records: bool,
    /// Table nesting limit override (`-d<depth>`).
    pub max_depth: Option<usize>,
}

impl CliArgs {
    /// Resolver settings implied by the flags.
    pub fn resolver_config(&self) -> ResolverConfig {
        let mut config = ResolverConfig::new();
        if self.skip_empty {
            config = config.with_segments(SegmentPolicy::SkipEmpty);
        }
        if let Some(depth) = self.max_depth {
            config = config.with_max_depth(depth);
        }
        config
    }
}

pub const USAGE: &str = "Usage: fluxlua [-v] [-s] [-r] [-d<depth>] <script.lua> <path>...";

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse `std::env::args()` and return [`CliArgs`] or an error message.
pub fn parse_args() -> Result<CliArgs, String> {
    let raw: Vec<String> = std::env::args().collect();
    parse_argv(raw.get(1..).unwrap_or_default())
}

/// Parse a slice of argument strings (exposed for testing).
pub fn parse_argv(argv: &[String]) -> Result<CliArgs, String> {
    let mut args = CliArgs::default();
    let mut positional: Vec<String> = Vec::new();
    let mut i = 0;

    while i < argv.len() {
        let arg = argv[i].as_str();

        // `--` ends flag processing.
        if arg == "--" {
            positional.extend(argv[i + 1..].iter().cloned());
            break;
        }

        if !arg.starts_with('-') || arg == "-" {
            positional.push(arg.to_owned());
            i += 1;
            continue;
        }

        let chars: Vec<char> = arg[1..].chars().collect();
        let mut j = 0;
        while j < chars.len() {
            match chars[j] {
                'v' => args.verbose = true,
                's' => args.skip_empty = true,
                'r' => args.records = true,

                // -d<depth> or -d <depth>
                'd' => {
                    let value = if j + 1 < chars.len() {
                        let s: String = chars[j + 1..].iter().collect();
                        j = chars.len();
                        s
                    } else if i + 1 < argv.len() {
                        i += 1;
                        argv[i].clone()
                    } else {
                        return Err("-d requires a depth argument".to_owned());
                    };
                    let depth = value
                        .parse::<usize>()
                        .map_err(|_| format!("invalid depth: {value}"))?;
                    args.max_depth = Some(depth);
                }

                c => return Err(format!("unknown option: -{c}")),
            }
            j += 1;
        }
        i += 1;
    }

    if positional.is_empty() {
        return Err("missing script file".to_owned());
    }
    args.script = PathBuf::from(positional.remove(0));
    if positional.is_empty() {
        return Err("no paths to resolve".to_owned());
    }
    args.paths = positional;

    Ok(args)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
