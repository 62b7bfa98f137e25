//! Dungeon grid and its derived distance field
//!
//! The grid is static terrain: which cells are intrinsically blocked and
//! which block sight. On top of it sits a per-cell distance field, flooded
//! from one origin (the player's cell) and consumed by monster AI. Occupancy
//! by blocking entities is deliberately not the grid's concern; callers
//! compose it with `EntityStore::blocks_at`.

use std::collections::VecDeque;

/// The 8 king-move neighbor offsets
pub const KING_MOVES: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// One terrain cell
#[derive(Debug, Clone, Copy)]
pub struct Tile {
    pub blocked: bool,
    pub block_sight: bool,
    /// King-move steps from the last flood origin; None = unreached
    distance: Option<u32>,
}

/// Static width x height terrain with a derived distance field
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Build from a map generator's blocked predicate.
    ///
    /// The core does not choose the generation algorithm; the caller supplies
    /// whatever dungeon it likes as a boolean grid.
    pub fn from_blocked(width: u32, height: u32, blocked: impl Fn(i32, i32) -> bool) -> Self {
        let width = width as i32;
        let height = height as i32;
        let mut tiles = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                let b = blocked(x, y);
                tiles.push(Tile {
                    blocked: b,
                    block_sight: b,
                    distance: None,
                });
            }
        }
        Self {
            width,
            height,
            tiles,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    pub fn tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.index(x, y).map(|i| &self.tiles[i])
    }

    /// True if the cell is out of bounds or intrinsically blocked.
    ///
    /// Out-of-bounds queries report blocked rather than failing.
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        self.tile(x, y).map_or(true, |t| t.blocked)
    }

    /// Distance from the last flood origin; None when unreached or out of
    /// bounds. The sentinel never compares as distance 0.
    pub fn distance_at(&self, x: i32, y: i32) -> Option<u32> {
        self.tile(x, y).and_then(|t| t.distance)
    }

    /// Flood the distance field from one origin.
    ///
    /// Uniform-cost BFS over intrinsically-unblocked cells; a cell's distance
    /// is the minimum number of king-move steps from the origin. Every prior
    /// distance is reset first, so a stale origin never leaks through.
    /// O(width x height) per call.
    pub fn recompute_distance(&mut self, origin_x: i32, origin_y: i32) {
        for tile in &mut self.tiles {
            tile.distance = None;
        }

        let mut queue: VecDeque<(i32, i32, u32)> = VecDeque::new();
        queue.push_back((origin_x, origin_y, 0));

        while let Some((x, y, d)) = queue.pop_front() {
            let Some(i) = self.index(x, y) else { continue };
            let tile = &mut self.tiles[i];
            if tile.blocked || tile.distance.is_some_and(|prev| prev <= d) {
                continue;
            }
            tile.distance = Some(d);
            for (dx, dy) in KING_MOVES {
                queue.push_back((x + dx, y + dy, d + 1));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// 5x5 arena: border walls, open interior
    fn arena() -> Grid {
        Grid::from_blocked(5, 5, |x, y| x == 0 || y == 0 || x == 4 || y == 4)
    }

    #[test]
    fn test_out_of_bounds_is_blocked() {
        let grid = arena();
        assert!(grid.is_blocked(-1, 2));
        assert!(grid.is_blocked(2, 5));
        assert!(!grid.is_blocked(2, 2));
    }

    #[test]
    fn test_distance_is_king_move_metric() {
        let mut grid = arena();
        grid.recompute_distance(1, 1);

        assert_eq!(grid.distance_at(1, 1), Some(0));
        assert_eq!(grid.distance_at(2, 2), Some(1));
        // Diagonal steps make the far corner 2 away, not 4
        assert_eq!(grid.distance_at(3, 3), Some(2));
        assert_eq!(grid.distance_at(3, 1), Some(2));
    }

    #[test]
    fn test_walls_stay_unreached() {
        let mut grid = arena();
        grid.recompute_distance(1, 1);
        assert_eq!(grid.distance_at(0, 0), None);
        assert_eq!(grid.distance_at(4, 2), None);
        assert_eq!(grid.distance_at(-3, 1), None);
    }

    #[test]
    fn test_flood_does_not_cross_walls() {
        // Two rooms separated by a full wall column
        let mut grid = Grid::from_blocked(7, 3, |x, y| x == 0 || y == 0 || x == 6 || y == 2 || x == 3);
        grid.recompute_distance(1, 1);

        assert_eq!(grid.distance_at(2, 1), Some(1));
        // The far room is unreachable, not distance 0
        assert_eq!(grid.distance_at(4, 1), None);
        assert_eq!(grid.distance_at(5, 1), None);
    }

    #[test]
    fn test_recompute_resets_stale_distances() {
        let mut grid = arena();
        grid.recompute_distance(1, 1);
        assert_eq!(grid.distance_at(1, 1), Some(0));

        grid.recompute_distance(3, 3);
        assert_eq!(grid.distance_at(3, 3), Some(0));
        assert_eq!(grid.distance_at(1, 1), Some(2));
    }

    #[test]
    fn test_origin_on_wall_reaches_nothing() {
        let mut grid = arena();
        grid.recompute_distance(0, 0);
        for y in 0..5 {
            for x in 0..5 {
                assert_eq!(grid.distance_at(x, y), None);
            }
        }
    }

    /// Reference shortest path by exhaustive relaxation, for comparison
    /// against the BFS flood.
    fn reference_distances(grid: &Grid, ox: i32, oy: i32) -> Vec<Option<u32>> {
        let (w, h) = (grid.width(), grid.height());
        let mut dist: Vec<Option<u32>> = vec![None; (w * h) as usize];
        if !grid.is_blocked(ox, oy) {
            dist[(oy * w + ox) as usize] = Some(0);
        }
        let mut changed = true;
        while changed {
            changed = false;
            for y in 0..h {
                for x in 0..w {
                    if grid.is_blocked(x, y) {
                        continue;
                    }
                    let best = KING_MOVES
                        .iter()
                        .filter(|(dx, dy)| !grid.is_blocked(x + dx, y + dy))
                        .filter_map(|(dx, dy)| dist[((y + dy) * w + (x + dx)) as usize])
                        .map(|d| d + 1)
                        .min();
                    let i = (y * w + x) as usize;
                    if let Some(candidate) = best {
                        if dist[i].map_or(true, |d| candidate < d) {
                            dist[i] = Some(candidate);
                            changed = true;
                        }
                    }
                }
            }
        }
        dist
    }

    proptest! {
        #[test]
        fn prop_flood_matches_reference(
            walls in proptest::collection::vec(any::<bool>(), 64),
            origin in 0usize..64,
        ) {
            let grid_walls = walls.clone();
            let mut grid = Grid::from_blocked(8, 8, move |x, y| grid_walls[(y * 8 + x) as usize]);
            let (ox, oy) = ((origin % 8) as i32, (origin / 8) as i32);
            grid.recompute_distance(ox, oy);

            let expected = reference_distances(&grid, ox, oy);
            for y in 0..8 {
                for x in 0..8 {
                    prop_assert_eq!(
                        grid.distance_at(x, y),
                        expected[(y * 8 + x) as usize],
                        "mismatch at ({}, {})", x, y
                    );
                }
            }
        }
    }
}
