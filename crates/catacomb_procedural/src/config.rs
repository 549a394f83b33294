//! # Generator Configuration
//!
//! Tunables for one generation run, loaded from TOML:
//!
//! ```toml
//! size = 8
//! seed = 42
//! probe = "random-probe"
//! door_rule = "any-wall"
//!
//! [style]
//! wall = "[#]"
//! ```
//!
//! Every key is optional; missing keys take the defaults below.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DungeonError, DungeonResult};
use crate::render::RenderStyle;
use crate::seed::DungeonSeed;
use crate::tile::{DoorRule, Tile};

/// Default edge length of a generated dungeon.
pub const DEFAULT_SIZE: i64 = 5;

/// Cells in a `size × size` grid, or `None` if the grid is empty or too
/// large to allocate.
pub(crate) fn cell_count(size: usize) -> Option<usize> {
    let cells = size.checked_mul(size)?;
    let bytes = cells.checked_mul(std::mem::size_of::<Tile>())?;
    (size >= 1 && isize::try_from(bytes).is_ok()).then_some(cells)
}

/// How the engine picks the next tile to collapse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProbePolicy {
    /// Pick among all coordinates, retrying up to `size²` times while the
    /// pick is already collapsed. May end the run early.
    #[default]
    RandomProbe,
    /// Pick uniformly among the uncollapsed coordinates.
    Shuffle,
}

impl FromStr for ProbePolicy {
    type Err = DungeonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" | "random-probe" => Ok(Self::RandomProbe),
            "shuffle" => Ok(Self::Shuffle),
            other => Err(DungeonError::InvalidConfig(format!(
                "unknown probe policy {other:?} (expected random or shuffle)"
            ))),
        }
    }
}

impl FromStr for DoorRule {
    type Err = DungeonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any-wall" => Ok(Self::AnyWall),
            "facing" => Ok(Self::Facing),
            other => Err(DungeonError::InvalidConfig(format!(
                "unknown door rule {other:?} (expected any-wall or facing)"
            ))),
        }
    }
}

/// Configuration for one dungeon.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Edge length; the grid is `size × size`.
    pub size: i64,
    /// Fixed seed. `None` draws a fresh one per run.
    pub seed: Option<u64>,
    /// Tile selection policy.
    pub probe: ProbePolicy,
    /// Door compatibility rule.
    pub door_rule: DoorRule,
    /// Render markers.
    pub style: RenderStyle,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            seed: None,
            probe: ProbePolicy::default(),
            door_rule: DoorRule::default(),
            style: RenderStyle::default(),
        }
    }
}

impl GeneratorConfig {
    /// Default configuration with the given size.
    #[must_use]
    pub fn with_size(size: i64) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Parses TOML text and validates it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the text is not valid TOML for this schema,
    /// or any error from [`GeneratorConfig::validate`].
    pub fn from_toml_str(text: &str) -> DungeonResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| DungeonError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, otherwise as
    /// [`GeneratorConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> DungeonResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| DungeonError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Checks size and markers.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSize` for a size below one or a grid too large to
    /// allocate, `InvalidConfig` for bad markers.
    pub fn validate(&self) -> DungeonResult<()> {
        self.grid_size()?;
        self.style.validate()
    }

    /// The size as a grid dimension.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSize` for a size below one or one whose square
    /// overflows.
    pub fn grid_size(&self) -> DungeonResult<usize> {
        match usize::try_from(self.size) {
            Ok(size) if cell_count(size).is_some() => Ok(size),
            _ => Err(DungeonError::InvalidSize(self.size)),
        }
    }

    /// The seed for the next run: the configured one, or a fresh random one.
    #[must_use]
    pub fn seed(&self) -> DungeonSeed {
        self.seed.map_or_else(DungeonSeed::random, DungeonSeed::new)
    }
}
