//! # Text Rendering
//!
//! Turns a grid into a row-per-line text map. Each tile becomes one marker,
//! chosen by the first match in a fixed precedence:
//!
//! ```text
//! spawn > boss > wall > door > chest > stairs > empty
//! ```
//!
//! Collapsed tiles match exactly one branch. Uncollapsed tiles usually match
//! several, and the first one wins.

use serde::{Deserialize, Serialize};

use crate::error::{DungeonError, DungeonResult};
use crate::tile::{Feature, Tile, TileKind};

/// What a tile displays as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Spawn room.
    Spawn,
    /// Boss room.
    Boss,
    /// Has a wall candidate.
    Wall,
    /// Has a door candidate.
    Door,
    /// Has a chest candidate.
    Chest,
    /// Has a stairs candidate.
    Stairs,
    /// Nothing left.
    Empty,
}

impl Marker {
    /// All markers, in precedence order.
    pub const ALL: [Self; 7] = [
        Self::Spawn,
        Self::Boss,
        Self::Wall,
        Self::Door,
        Self::Chest,
        Self::Stairs,
        Self::Empty,
    ];

    /// Picks the marker for `tile`.
    #[must_use]
    pub fn for_tile(tile: &Tile) -> Self {
        match tile.kind {
            TileKind::Spawn => Self::Spawn,
            TileKind::Boss => Self::Boss,
            TileKind::Normal if tile.has(Feature::is_wall) => Self::Wall,
            TileKind::Normal if tile.has(Feature::is_door) => Self::Door,
            TileKind::Normal if tile.has(Feature::is_chest) => Self::Chest,
            TileKind::Normal if tile.has(Feature::is_stairs) => Self::Stairs,
            TileKind::Normal => Self::Empty,
        }
    }
}

/// Marker strings used by the renderer.
///
/// Markers must be non-empty and free of whitespace so every rendered line
/// splits back into exactly `size` tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// Spawn room marker.
    pub spawn: String,
    /// Boss room marker.
    pub boss: String,
    /// Wall marker.
    pub wall: String,
    /// Door marker.
    pub door: String,
    /// Chest marker.
    pub chest: String,
    /// Stairs marker.
    pub stairs: String,
    /// Empty tile marker.
    pub empty: String,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            spawn: "[**X**]".to_owned(),
            boss: "[**B**]".to_owned(),
            wall: "[W]".to_owned(),
            door: "[D]".to_owned(),
            chest: "[C]".to_owned(),
            stairs: "[S]".to_owned(),
            empty: "[.]".to_owned(),
        }
    }
}

impl RenderStyle {
    /// The string drawn for `marker`.
    #[must_use]
    pub fn token(&self, marker: Marker) -> &str {
        match marker {
            Marker::Spawn => &self.spawn,
            Marker::Boss => &self.boss,
            Marker::Wall => &self.wall,
            Marker::Door => &self.door,
            Marker::Chest => &self.chest,
            Marker::Stairs => &self.stairs,
            Marker::Empty => &self.empty,
        }
    }

    /// Checks that every marker can be told apart in the output.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for an empty marker or one containing whitespace.
    pub fn validate(&self) -> DungeonResult<()> {
        for marker in Marker::ALL {
            let token = self.token(marker);
            if token.is_empty() || token.chars().any(char::is_whitespace) {
                return Err(DungeonError::InvalidConfig(format!(
                    "marker for {marker:?} must be non-empty and contain no whitespace, got {token:?}"
                )));
            }
        }
        Ok(())
    }
}

/// Renders row-major `tiles` of a `size × size` grid.
///
/// Tokens within a row are joined by one space and rows by `\n`.
#[must_use]
pub fn render_tiles(tiles: &[Tile], size: usize, style: &RenderStyle) -> String {
    if size == 0 {
        return String::new();
    }
    tiles
        .chunks(size)
        .map(|row| {
            row.iter()
                .map(|tile| style.token(Marker::for_tile(tile)))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
