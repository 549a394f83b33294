//! # CATACOMB Procedural Generation
//!
//! Square dungeon layouts built by collapsing a grid of candidate features.
//!
//! ## Design Principles
//!
//! 1. **Superposition first**: Every tile starts with the full tileset
//! 2. **Fixed anchors**: Spawn sits at the origin, the boss at the far corner
//! 3. **One-hop propagation**: A committed feature filters its four neighbours
//! 4. **Degrade, never fail**: Exhaustion shrinks the dungeon, it never aborts it
//!
//! ## Core Components
//!
//! - `Feature` / `Tile`: Candidate sets and the adjacency rule
//! - `Grid`: Placement, collapse loop, propagation
//! - `RenderStyle`: Markers used by the text renderer
//! - `GeneratorConfig`: TOML-backed tunables
//!
//! ## Example
//!
//! ```rust,ignore
//! use catacomb_procedural::{GeneratorConfig, Grid};
//!
//! let config = GeneratorConfig::load("config/catacomb.toml")?;
//! let mut grid = Grid::with_config(&config)?;
//! let report = grid.generate();
//!
//! println!("{}", grid.render());
//! assert_eq!(report.steps, report.collapsed + report.exhausted);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod grid;
pub mod render;
pub mod seed;
pub mod tile;

pub use config::{GeneratorConfig, ProbePolicy};
pub use error::{DungeonError, DungeonResult};
pub use grid::{FeatureCounts, GenerationReport, Grid};
pub use render::{Marker, RenderStyle};
pub use seed::DungeonSeed;
pub use tile::{
    compatible_with, tileset, Direction, DoorRule, Feature, Tile, TileKind, VerticalDirection,
    TILESET,
};
