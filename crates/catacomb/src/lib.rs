//! # CATACOMB
//!
//! Command-line host for the dungeon generator.
//!
//! ```text
//! flags ──┐
//!         ├──> GeneratorConfig ──> Grid::generate ──> render ──> stdout
//! TOML ───┘
//! ```
//!
//! Precedence: flags over config file over defaults.
//!
//! ## Modules
//!
//! - `cli`: Flag parsing and config assembly
//! - `host`: One request, start to finish

pub mod cli;
pub mod host;

pub use cli::{CliError, HostArgs, USAGE};
pub use host::{run, HostOutput};
