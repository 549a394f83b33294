//! # Host Request
//!
//! Takes parsed flags to a finished map. The seed is always resolved up
//! front so any layout can be reproduced with `--seed`.

use catacomb_procedural::{GenerationReport, Grid, Marker};
use tracing::info;

use crate::cli::{CliError, HostArgs};

/// Everything the binary prints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostOutput {
    /// The rendered map.
    pub map: String,
    /// Feature summary, when requested.
    pub summary: Option<String>,
    /// Seed the dungeon was generated from.
    pub seed: u64,
    /// Generation outcome.
    pub report: GenerationReport,
}

/// Generates one dungeon for `args`.
///
/// # Errors
///
/// Returns a `CliError` if the configuration is invalid.
pub fn run(args: &HostArgs) -> Result<HostOutput, CliError> {
    let mut config = args.to_config()?;
    let seed = config.seed().value();
    config.seed = Some(seed);

    let mut grid = Grid::with_config(&config)?;
    let report = grid.generate();
    info!(seed, size = grid.size(), "dungeon ready");

    let summary = args.summary.then(|| summarize(&grid, seed, &report));
    Ok(HostOutput {
        map: grid.render(),
        summary,
        seed,
        report,
    })
}

fn summarize(grid: &Grid, seed: u64, report: &GenerationReport) -> String {
    let counts = grid.counts();
    let style = grid.style();
    let tally = [
        Marker::Wall,
        Marker::Door,
        Marker::Chest,
        Marker::Stairs,
        Marker::Empty,
    ]
    .iter()
    .map(|&m| format!("{} {}", style.token(m), counts.get(m)))
    .collect::<Vec<_>>()
    .join("  ");

    let mut out = format!(
        "Successfully generated a {size}x{size} dungeon (seed {seed})\n{tally}",
        size = grid.size()
    );
    if report.exhausted > 0 {
        out.push_str(&format!("\n{} tile(s) ran out of features", report.exhausted));
    }
    if report.probe_aborted {
        out.push_str("\ngeneration stopped early; some tiles were never collapsed");
    }
    out
}
