//! # Catacomb
//!
//! Generates a dungeon and prints it.
//!
//! ## Usage
//!
//! ```bash
//! catacomb 8 --seed 42 --summary
//! RUST_LOG=catacomb_procedural=debug catacomb --config config/catacomb.toml
//! ```

use std::process::ExitCode;

use catacomb::{run, HostArgs, USAGE};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only the map.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match HostArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!();
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    if args.help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(output) => {
            println!("{}", output.map);
            if let Some(summary) = output.summary {
                println!();
                println!("{summary}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}
