//! # Dungeon Grid
//!
//! Owns the `size × size` tiles and runs generation:
//!
//! ```text
//! Grid::new(size)          every tile holds its own copy of the tileset
//!   -> place_special_rooms spawn at (0, 0), boss at (size-1, size-1)
//!   -> loop                pick uncollapsed tile, collapse, propagate
//!   -> render              text map
//! ```
//!
//! Propagation is one hop: a collapsed tile filters its four neighbours and
//! nothing further. Conflicts at distance two or more are not repaired, and
//! a tile whose candidates run out is left collapsed with no feature.
//!
//! Tiles are stored row-major, `cells[y * size + x]`.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::{cell_count, GeneratorConfig, ProbePolicy};
use crate::error::{DungeonError, DungeonResult};
use crate::render::{render_tiles, Marker, RenderStyle};
use crate::seed::DungeonSeed;
use crate::tile::{tileset, Direction, DoorRule, Feature, Tile, TileKind};

/// Outcome of one `generate` run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Collapse attempts made.
    pub steps: usize,
    /// Collapse steps that chose a feature.
    pub collapsed: usize,
    /// Tiles that had no candidates left when picked.
    pub exhausted: usize,
    /// Whether the random probe gave up before every tile collapsed.
    pub probe_aborted: bool,
}

/// Number of tiles showing each marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeatureCounts {
    /// Spawn rooms.
    pub spawn: usize,
    /// Boss rooms.
    pub boss: usize,
    /// Wall tiles.
    pub wall: usize,
    /// Door tiles.
    pub door: usize,
    /// Chest tiles.
    pub chest: usize,
    /// Stairs tiles.
    pub stairs: usize,
    /// Empty tiles.
    pub empty: usize,
}

impl FeatureCounts {
    /// Count for one marker.
    #[must_use]
    pub const fn get(&self, marker: Marker) -> usize {
        match marker {
            Marker::Spawn => self.spawn,
            Marker::Boss => self.boss,
            Marker::Wall => self.wall,
            Marker::Door => self.door,
            Marker::Chest => self.chest,
            Marker::Stairs => self.stairs,
            Marker::Empty => self.empty,
        }
    }

    /// Sum over all markers.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.spawn + self.boss + self.wall + self.door + self.chest + self.stairs + self.empty
    }

    fn add(&mut self, marker: Marker) {
        let slot = match marker {
            Marker::Spawn => &mut self.spawn,
            Marker::Boss => &mut self.boss,
            Marker::Wall => &mut self.wall,
            Marker::Door => &mut self.door,
            Marker::Chest => &mut self.chest,
            Marker::Stairs => &mut self.stairs,
            Marker::Empty => &mut self.empty,
        };
        *slot += 1;
    }
}

/// A square dungeon under generation.
#[derive(Clone, Debug)]
pub struct Grid {
    size: usize,
    tileset: Vec<Feature>,
    cells: Vec<Tile>,
    probe: ProbePolicy,
    door_rule: DoorRule,
    style: RenderStyle,
    seed: Option<DungeonSeed>,
}

impl Grid {
    /// Creates a `size × size` grid with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSize` if `size` is zero or its square overflows.
    pub fn new(size: usize) -> DungeonResult<Self> {
        if cell_count(size).is_none() {
            return Err(DungeonError::InvalidSize(
                i64::try_from(size).unwrap_or(i64::MAX),
            ));
        }
        Ok(Self::build(size, &GeneratorConfig::default()))
    }

    /// Creates a grid from a configuration.
    ///
    /// # Errors
    ///
    /// Returns any error from [`GeneratorConfig::validate`].
    pub fn with_config(config: &GeneratorConfig) -> DungeonResult<Self> {
        config.validate()?;
        Ok(Self::build(config.grid_size()?, config))
    }

    fn build(size: usize, config: &GeneratorConfig) -> Self {
        let tileset = tileset();
        let cells = Self::create_initial_grid(size, &tileset);
        Self {
            size,
            tileset,
            cells,
            probe: config.probe,
            door_rule: config.door_rule,
            style: config.style.clone(),
            seed: config.seed.map(DungeonSeed::new),
        }
    }

    fn create_initial_grid(size: usize, tileset: &[Feature]) -> Vec<Tile> {
        (0..size * size).map(|_| Tile::new(tileset.to_vec())).collect()
    }

    /// Edge length.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// The template every tile starts from.
    #[must_use]
    pub fn tileset(&self) -> &[Feature] {
        &self.tileset
    }

    /// All tiles, row-major.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.cells
    }

    /// Tile selection policy in use.
    #[must_use]
    pub const fn probe(&self) -> ProbePolicy {
        self.probe
    }

    /// Door compatibility rule in use.
    #[must_use]
    pub const fn door_rule(&self) -> DoorRule {
        self.door_rule
    }

    /// Render markers in use.
    #[must_use]
    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Tile at `(x, y)`, or `None` out of bounds.
    #[must_use]
    pub fn tile(&self, x: usize, y: usize) -> Option<&Tile> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Tile at `(0, 0)`.
    #[must_use]
    pub fn origin(&self) -> &Tile {
        &self.cells[0]
    }

    /// Whether signed coordinates fall inside the grid.
    #[must_use]
    pub fn in_bounds(&self, x: isize, y: isize) -> bool {
        usize::try_from(x).is_ok_and(|x| x < self.size)
            && usize::try_from(y).is_ok_and(|y| y < self.size)
    }

    /// Coordinates one step from `(x, y)` toward `dir`, if inside the grid.
    #[must_use]
    pub fn neighbor(&self, x: usize, y: usize, dir: Direction) -> Option<(usize, usize)> {
        let (dx, dy) = dir.offset();
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        (nx < self.size && ny < self.size).then_some((nx, ny))
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.size && y < self.size).then(|| y * self.size + x)
    }

    /// Whether any tile still awaits collapse.
    #[must_use]
    pub fn has_uncollapsed_tiles(&self) -> bool {
        self.cells.iter().any(|tile| !tile.collapsed)
    }

    /// Puts spawn at the origin and the boss at the far corner.
    ///
    /// Both are collapsed on placement and keep a full tileset copy. On a
    /// 1×1 grid the boss overwrites the spawn.
    pub fn place_special_rooms(&mut self) {
        let last = self.cells.len() - 1;
        self.cells[0] = Tile::special(self.tileset.clone(), TileKind::Spawn);
        self.cells[last] = Tile::special(self.tileset.clone(), TileKind::Boss);
    }

    /// Generates the dungeon with the configured seed, or a fresh one.
    pub fn generate(&mut self) -> GenerationReport {
        let seed = self.seed.unwrap_or_else(DungeonSeed::random);
        debug!(seed = seed.value(), size = self.size, "generating dungeon");
        self.generate_with(&mut seed.rng())
    }

    /// Generates the dungeon drawing from `rng`.
    ///
    /// Places the special rooms, then collapses tiles until none are left
    /// or the probe gives up. Exhausted tiles are logged and skipped.
    pub fn generate_with<R: Rng>(&mut self, rng: &mut R) -> GenerationReport {
        self.place_special_rooms();
        let mut report = GenerationReport::default();

        match self.probe {
            ProbePolicy::RandomProbe => {
                while self.has_uncollapsed_tiles() {
                    match self.choose_random_uncollapsed_tile(rng) {
                        Ok((x, y)) => self.step(x, y, rng, &mut report),
                        Err(err) => {
                            debug!(%err, "ending generation early");
                            report.probe_aborted = true;
                            break;
                        }
                    }
                }
            }
            ProbePolicy::Shuffle => {
                let mut order: Vec<(usize, usize)> = (0..self.size)
                    .flat_map(|y| (0..self.size).map(move |x| (x, y)))
                    .filter(|&(x, y)| self.tile(x, y).is_some_and(|t| !t.collapsed))
                    .collect();
                order.shuffle(rng);
                for (x, y) in order {
                    self.step(x, y, rng, &mut report);
                }
            }
        }

        info!(
            size = self.size,
            steps = report.steps,
            collapsed = report.collapsed,
            exhausted = report.exhausted,
            probe_aborted = report.probe_aborted,
            "dungeon generated"
        );
        report
    }

    fn step<R: Rng>(&mut self, x: usize, y: usize, rng: &mut R, report: &mut GenerationReport) {
        report.steps += 1;
        match self.collapse_tile(x, y, rng) {
            Ok(true) => report.collapsed += 1,
            Ok(false) => {}
            Err(err) => {
                warn!(%err, "tile left without a feature");
                report.exhausted += 1;
            }
        }
    }

    /// Probes random coordinates for an uncollapsed tile.
    ///
    /// # Errors
    ///
    /// Returns `ProbeExhausted` after `size²` picks that all hit collapsed tiles.
    pub fn choose_random_uncollapsed_tile<R: Rng>(
        &self,
        rng: &mut R,
    ) -> DungeonResult<(usize, usize)> {
        let attempts = self.size * self.size;
        for _ in 0..attempts {
            let x = rng.gen_range(0..self.size);
            let y = rng.gen_range(0..self.size);
            if self.tile(x, y).is_some_and(|t| !t.collapsed) {
                return Ok((x, y));
            }
        }
        Err(DungeonError::ProbeExhausted { attempts })
    }

    /// Commits the tile at `(x, y)` to one random candidate and propagates.
    ///
    /// Returns `Ok(false)` without touching anything for special rooms,
    /// collapsed tiles and out-of-bounds coordinates.
    ///
    /// # Errors
    ///
    /// Returns `ConstraintExhausted` if no candidates remain. The tile is
    /// still marked collapsed, with no feature.
    pub fn collapse_tile<R: Rng>(
        &mut self,
        x: usize,
        y: usize,
        rng: &mut R,
    ) -> DungeonResult<bool> {
        let Some(i) = self.index(x, y) else {
            return Ok(false);
        };
        let tile = &mut self.cells[i];
        if !tile.is_normal() || tile.collapsed {
            return Ok(false);
        }

        tile.collapsed = true;
        let Some(&feature) = tile.candidates.choose(rng) else {
            return Err(DungeonError::ConstraintExhausted { x, y });
        };
        tile.candidates.clear();
        tile.candidates.push(feature);
        debug!(x, y, ?feature, "collapsed tile");

        self.propagate_constraints(x, y);
        Ok(true)
    }

    /// Filters the candidates of the four neighbours of `(x, y)` against its
    /// current feature set.
    ///
    /// Special rooms are left alone. Collapsed normal neighbours are filtered
    /// too, so a committed feature that now conflicts is dropped.
    pub fn propagate_constraints(&mut self, x: usize, y: usize) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        let fixed = self.cells[i].candidates.clone();
        let rule = self.door_rule;

        for dir in Direction::ALL {
            let Some(j) = self
                .neighbor(x, y, dir)
                .and_then(|(nx, ny)| self.index(nx, ny))
            else {
                continue;
            };
            let neighbor = &mut self.cells[j];
            if !neighbor.is_normal() {
                continue;
            }
            let facing = dir.opposite();
            neighbor
                .candidates
                .retain(|&candidate| rule.compatible(candidate, &fixed, facing));
        }
    }

    /// Tallies tiles by the marker they render as.
    #[must_use]
    pub fn counts(&self) -> FeatureCounts {
        let mut counts = FeatureCounts::default();
        for tile in &self.cells {
            counts.add(Marker::for_tile(tile));
        }
        counts
    }

    /// Renders the grid as text, one line per row.
    #[must_use]
    pub fn render(&self) -> String {
        render_tiles(&self.cells, self.size, &self.style)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_zero_size_rejected() {
        assert_eq!(Grid::new(0).unwrap_err(), DungeonError::InvalidSize(0));
    }

    #[test]
    fn test_initial_tiles_own_full_tileset() {
        let grid = Grid::new(3).unwrap();
        assert_eq!(grid.tiles().len(), 9);
        for tile in grid.tiles() {
            assert_eq!(tile.candidates, grid.tileset());
            assert!(!tile.collapsed);
            assert_eq!(tile.kind, TileKind::Normal);
        }
    }

    #[test]
    fn test_neighbor_bounds() {
        let grid = Grid::new(3).unwrap();
        assert_eq!(grid.neighbor(0, 0, Direction::North), None);
        assert_eq!(grid.neighbor(0, 0, Direction::West), None);
        assert_eq!(grid.neighbor(0, 0, Direction::South), Some((0, 1)));
        assert_eq!(grid.neighbor(0, 0, Direction::East), Some((1, 0)));
        assert_eq!(grid.neighbor(2, 2, Direction::East), None);
        assert!(grid.in_bounds(2, 0));
        assert!(!grid.in_bounds(-1, 0));
        assert!(!grid.in_bounds(0, 3));
    }

    #[test]
    fn test_special_rooms_placed() {
        let mut grid = Grid::new(4).unwrap();
        grid.place_special_rooms();
        let spawn = grid.origin();
        let boss = grid.tile(3, 3).unwrap();
        assert_eq!(spawn.kind, TileKind::Spawn);
        assert_eq!(boss.kind, TileKind::Boss);
        assert!(spawn.collapsed && boss.collapsed);
        assert_eq!(boss.candidates.len(), grid.tileset().len());
    }

    #[test]
    fn test_collapse_skips_special_rooms() {
        let mut grid = Grid::new(2).unwrap();
        grid.place_special_rooms();
        assert_eq!(grid.collapse_tile(0, 0, &mut rng(1)), Ok(false));
        assert_eq!(grid.origin().candidates.len(), grid.tileset().len());
    }

    #[test]
    fn test_collapse_leaves_one_feature() {
        let mut grid = Grid::new(3).unwrap();
        assert_eq!(grid.collapse_tile(1, 1, &mut rng(5)), Ok(true));
        let tile = grid.tile(1, 1).unwrap();
        assert!(tile.collapsed);
        assert_eq!(tile.candidates.len(), 1);
        assert!(tile.feature().is_some());
    }

    #[test]
    fn test_collapse_empty_tile_is_exhausted() {
        let mut grid = Grid::new(2).unwrap();
        grid.cells[1].candidates.clear();
        assert_eq!(
            grid.collapse_tile(1, 0, &mut rng(2)),
            Err(DungeonError::ConstraintExhausted { x: 1, y: 0 })
        );
        let tile = grid.tile(1, 0).unwrap();
        assert!(tile.collapsed);
        assert!(tile.candidates.is_empty());
    }

    #[test]
    fn test_wall_strips_neighbour_doors() {
        let mut grid = Grid::new(3).unwrap();
        grid.cells[4] = Tile::new(vec![Feature::Wall(true)]);
        grid.cells[4].collapsed = true;
        grid.propagate_constraints(1, 1);

        for dir in Direction::ALL {
            let (nx, ny) = grid.neighbor(1, 1, dir).unwrap();
            let tile = grid.tile(nx, ny).unwrap();
            assert!(!tile.has(Feature::is_door), "door survived to the {dir:?}");
        }
        // Corners are two hops away.
        assert_eq!(grid.tile(0, 0).unwrap().candidates.len(), 8);
    }

    #[test]
    fn test_door_strips_wall_on_its_facing_side() {
        let mut grid = Grid::new(3).unwrap();
        grid.cells[4] = Tile::new(vec![Feature::Door(Direction::South)]);
        grid.propagate_constraints(1, 1);

        // The north neighbour looks back south toward the door.
        assert!(!grid.tile(1, 0).unwrap().has(Feature::is_wall));
        assert!(grid.tile(1, 2).unwrap().has(Feature::is_wall));
        assert!(grid.tile(0, 1).unwrap().has(Feature::is_wall));
    }

    #[test]
    fn test_propagation_spares_special_rooms() {
        let mut grid = Grid::new(2).unwrap();
        grid.place_special_rooms();
        grid.cells[1] = Tile::new(vec![Feature::Wall(true)]);
        grid.propagate_constraints(1, 0);
        assert_eq!(grid.origin().candidates.len(), 8);
        assert_eq!(grid.tile(1, 1).unwrap().candidates.len(), 8);
    }

    #[test]
    fn test_huge_size_rejected() {
        let huge = usize::MAX / 2;
        assert!(matches!(Grid::new(huge), Err(DungeonError::InvalidSize(_))));
        assert_eq!(
            Grid::with_config(&GeneratorConfig::with_size(1 << 32)).unwrap_err(),
            DungeonError::InvalidSize(1 << 32)
        );
    }

    #[test]
    fn test_wall_drops_committed_neighbour_door() {
        let mut grid = Grid::new(3).unwrap();
        grid.cells[4] = Tile::new(vec![Feature::Door(Direction::North)]);
        grid.cells[4].collapsed = true;
        grid.cells[1] = Tile::new(vec![Feature::Wall(true)]);
        grid.cells[1].collapsed = true;
        grid.propagate_constraints(1, 0);

        let door = grid.tile(1, 1).unwrap();
        assert!(door.collapsed);
        assert!(door.candidates.is_empty());
        assert_eq!(door.feature(), None);
        let rendered = grid.render();
        let middle: Vec<&str> = rendered.lines().nth(1).unwrap().split_whitespace().collect();
        assert_eq!(middle[1], "[.]");
    }

    #[test]
    fn test_probe_exhausts_on_collapsed_grid() {
        let mut grid = Grid::new(1).unwrap();
        grid.place_special_rooms();
        assert_eq!(
            grid.choose_random_uncollapsed_tile(&mut rng(3)),
            Err(DungeonError::ProbeExhausted { attempts: 1 })
        );
    }

    #[test]
    fn test_report_accounts_for_every_step() {
        let mut grid = Grid::new(6).unwrap();
        let report = grid.generate_with(&mut rng(11));
        assert_eq!(report.steps, report.collapsed + report.exhausted);
        assert!(report.steps <= 34);
    }

    #[test]
    fn test_counts_cover_grid() {
        let mut grid = Grid::new(5).unwrap();
        grid.generate_with(&mut rng(8));
        let counts = grid.counts();
        assert_eq!(counts.total(), 25);
        assert_eq!(counts.get(Marker::Spawn), 1);
        assert_eq!(counts.get(Marker::Boss), 1);
    }

    #[test]
    fn test_display_matches_render() {
        let mut grid = Grid::new(3).unwrap();
        grid.generate_with(&mut rng(4));
        assert_eq!(grid.to_string(), grid.render());
    }
}
