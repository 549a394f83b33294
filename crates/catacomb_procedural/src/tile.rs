//! # Tile Model
//!
//! A tile holds the features it may still become. Generation narrows that
//! list until one feature is left (or none, when neighbours ruled them all
//! out).
//!
//! ## Compatibility Rule
//!
//! Checked for every candidate of a neighbour, against the committed feature
//! set of the tile that just collapsed:
//!
//! ```text
//! candidate Wall  -> rejected if the fixed set has Door(facing)
//! candidate Door  -> rejected if the fixed set has any Wall   (DoorRule::AnyWall)
//!                    rejected if Wall present and candidate is Door(facing)
//!                                                             (DoorRule::Facing)
//! anything else   -> accepted
//! ```

use serde::{Deserialize, Serialize};

/// Compass direction between orthogonally adjacent tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Toward row `y - 1`.
    North,
    /// Toward row `y + 1`.
    South,
    /// Toward column `x + 1`.
    East,
    /// Toward column `x - 1`.
    West,
}

impl Direction {
    /// All four directions, in propagation order.
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// The direction pointing back.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// Coordinate delta `(dx, dy)` for one step in this direction.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
        }
    }
}

/// Which way a staircase leads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerticalDirection {
    /// Leads to the floor above.
    Up,
    /// Leads to the floor below.
    Down,
}

/// A structural feature a tile may exhibit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    /// An opening on one side of the tile.
    Door(Direction),
    /// Solid wall.
    Wall(bool),
    /// Treasure chest.
    Chest(bool),
    /// Staircase.
    Stairs(VerticalDirection),
}

impl Feature {
    /// Returns true for `Wall`.
    #[inline]
    #[must_use]
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall(_))
    }

    /// Returns true for `Door`.
    #[inline]
    #[must_use]
    pub const fn is_door(self) -> bool {
        matches!(self, Self::Door(_))
    }

    /// Returns true for `Chest`.
    #[inline]
    #[must_use]
    pub const fn is_chest(self) -> bool {
        matches!(self, Self::Chest(_))
    }

    /// Returns true for `Stairs`.
    #[inline]
    #[must_use]
    pub const fn is_stairs(self) -> bool {
        matches!(self, Self::Stairs(_))
    }
}

/// Every feature a fresh tile may become, in canonical order.
pub const TILESET: [Feature; 8] = [
    Feature::Door(Direction::North),
    Feature::Door(Direction::South),
    Feature::Door(Direction::East),
    Feature::Door(Direction::West),
    Feature::Wall(true),
    Feature::Chest(true),
    Feature::Stairs(VerticalDirection::Up),
    Feature::Stairs(VerticalDirection::Down),
];

/// Returns an owned copy of [`TILESET`].
#[must_use]
pub fn tileset() -> Vec<Feature> {
    TILESET.to_vec()
}

/// Role of a tile in the dungeon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TileKind {
    /// Regular room, collapsed by the engine.
    #[default]
    Normal,
    /// Player entry point.
    Spawn,
    /// Final encounter.
    Boss,
}

/// One grid cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    /// Features this tile may still become.
    pub candidates: Vec<Feature>,
    /// Whether the tile's state is settled.
    pub collapsed: bool,
    /// Role of the tile.
    pub kind: TileKind,
}

impl Tile {
    /// Creates an uncollapsed normal tile.
    #[must_use]
    pub fn new(candidates: Vec<Feature>) -> Self {
        Self {
            candidates,
            collapsed: false,
            kind: TileKind::Normal,
        }
    }

    /// Creates a special room, already collapsed.
    #[must_use]
    pub fn special(candidates: Vec<Feature>, kind: TileKind) -> Self {
        Self {
            candidates,
            collapsed: true,
            kind,
        }
    }

    /// Returns true for `TileKind::Normal`.
    #[inline]
    #[must_use]
    pub fn is_normal(&self) -> bool {
        self.kind == TileKind::Normal
    }

    /// The committed feature of a collapsed normal tile.
    ///
    /// `None` while uncollapsed, for special rooms, and for exhausted tiles.
    #[must_use]
    pub fn feature(&self) -> Option<Feature> {
        match (self.collapsed, self.kind, self.candidates.as_slice()) {
            (true, TileKind::Normal, [only]) => Some(*only),
            _ => None,
        }
    }

    /// Whether any candidate satisfies `pred`.
    #[inline]
    pub fn has(&self, pred: impl Fn(Feature) -> bool) -> bool {
        self.candidates.iter().any(|&f| pred(f))
    }
}

/// How a door candidate is checked against a walled neighbour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DoorRule {
    /// Any wall in the fixed set vetoes every door candidate.
    #[default]
    AnyWall,
    /// A wall only vetoes the door that opens toward it.
    Facing,
}

impl DoorRule {
    /// Decides whether `candidate` may stay on a neighbour.
    ///
    /// `fixed` is the feature set of the tile that just collapsed and
    /// `facing` is the direction from the neighbour back to that tile.
    #[must_use]
    pub fn compatible(self, candidate: Feature, fixed: &[Feature], facing: Direction) -> bool {
        match candidate {
            Feature::Wall(_) => !fixed.contains(&Feature::Door(facing)),
            Feature::Door(door) => {
                let walled = fixed.iter().any(|f| f.is_wall());
                match self {
                    Self::AnyWall => !walled,
                    Self::Facing => !(walled && door == facing),
                }
            }
            Feature::Chest(_) | Feature::Stairs(_) => true,
        }
    }
}

/// Reference compatibility rule ([`DoorRule::AnyWall`]).
#[inline]
#[must_use]
pub fn compatible_with(candidate: Feature, fixed: &[Feature], facing: Direction) -> bool {
    DoorRule::AnyWall.compatible(candidate, fixed, facing)
}
