use fluxlua::cli;
use fluxlua::Script;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = match cli::parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("fluxlua: {e}");
            eprintln!("{}", cli::USAGE);
            std::process::exit(1);
        }
    };

    // ── Logging ───────────────────────────────────────────────────────────────
    // RUST_LOG wins; otherwise -v selects debug output.
    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    // ── Load ──────────────────────────────────────────────────────────────────
    let script = match Script::load_with(None, &args.script, args.resolver_config()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("fluxlua: {e}");
            std::process::exit(1);
        }
    };

    // ── Resolve each path ─────────────────────────────────────────────────────
    let mut failed = false;
    for path in &args.paths {
        match script.get(path) {
            Ok(var) if args.records => {
                for record in var.to_records() {
                    println!("{record}");
                }
            }
            Ok(var) => println!("{var}"),
            Err(e) => {
                eprintln!("fluxlua: {e}");
                failed = true;
            }
        }
    }

    script.close();
    if failed {
        std::process::exit(2);
    }
}
