//! Procedural maze: randomized depth-first carve of a cell grid, then
//! conversion of the surviving walls into axis-aligned rectangles.
//!
//! World space is y-up: a cell's north wall is at its larger y.

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::pga::Point;

/// Smallest column/row count the generator accepts
pub const MIN_CELLS: u32 = 2;
/// Largest column/row count the generator accepts
pub const MAX_CELLS: u32 = 128;
/// End trigger radius as a fraction of the smaller cell dimension
pub const END_RADIUS_FRACTION: f32 = 0.30;

/// Axis-aligned wall rectangle (min corner + size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MazeWall {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl MazeWall {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn max_y(&self) -> f32 {
        self.y + self.h
    }

    /// Closest point of the rectangle to `p` (axis-wise clamp)
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(self.x, self.max_x()), p.y.clamp(self.y, self.max_y()))
    }

    /// True if a circle strictly overlaps the rectangle
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        center.distance_squared(self.closest_point(center)) < radius * radius
    }
}

/// Cardinal wall slot of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::North, Dir::East, Dir::South, Dir::West];

    pub fn opposite(self) -> Dir {
        match self {
            Dir::North => Dir::South,
            Dir::East => Dir::West,
            Dir::South => Dir::North,
            Dir::West => Dir::East,
        }
    }

    fn offset(self) -> (i64, i64) {
        match self {
            Dir::North => (0, 1),
            Dir::East => (1, 0),
            Dir::South => (0, -1),
            Dir::West => (-1, 0),
        }
    }
}

/// Carved cell grid: which of each cell's four walls survived
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MazeGrid {
    pub cols: u32,
    pub rows: u32,
    walls: Vec<[bool; 4]>,
}

impl MazeGrid {
    fn closed(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            rows,
            walls: vec![[true; 4]; cols as usize * rows as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.cols as usize + x as usize
    }

    pub fn cell_count(&self) -> usize {
        self.walls.len()
    }

    pub fn has_wall(&self, x: u32, y: u32, dir: Dir) -> bool {
        self.walls[self.index(x, y)][dir as usize]
    }

    fn set_wall(&mut self, x: u32, y: u32, dir: Dir, present: bool) {
        let i = self.index(x, y);
        self.walls[i][dir as usize] = present;
    }

    /// In-grid neighbor of a cell in `dir`
    pub fn neighbor(&self, x: u32, y: u32, dir: Dir) -> Option<(u32, u32)> {
        let (dx, dy) = dir.offset();
        let nx = x as i64 + dx;
        let ny = y as i64 + dy;
        if nx < 0 || ny < 0 || nx >= self.cols as i64 || ny >= self.rows as i64 {
            None
        } else {
            Some((nx as u32, ny as u32))
        }
    }

    /// Number of cells reachable from `(x, y)` through open walls
    pub fn reachable_from(&self, x: u32, y: u32) -> usize {
        if self.walls.is_empty() {
            return 0;
        }
        let mut seen = vec![false; self.walls.len()];
        let mut stack = vec![(x, y)];
        seen[self.index(x, y)] = true;
        let mut count = 0;
        while let Some((cx, cy)) = stack.pop() {
            count += 1;
            for dir in Dir::ALL {
                if self.has_wall(cx, cy, dir) {
                    continue;
                }
                if let Some((nx, ny)) = self.neighbor(cx, cy, dir) {
                    let ni = self.index(nx, ny);
                    if !seen[ni] {
                        seen[ni] = true;
                        stack.push((nx, ny));
                    }
                }
            }
        }
        count
    }

    /// Number of interior walls removed by the carve
    pub fn open_passages(&self) -> usize {
        let mut open = 0;
        for y in 0..self.rows {
            for x in 0..self.cols {
                for dir in [Dir::North, Dir::East] {
                    if self.neighbor(x, y, dir).is_some() && !self.has_wall(x, y, dir) {
                        open += 1;
                    }
                }
            }
        }
        open
    }
}

/// Generator input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeParams {
    pub cols: u32,
    pub rows: u32,
    pub margin: f32,
    pub wall_thickness: f32,
    pub width: f32,
    pub height: f32,
    /// 0 draws a fresh seed from entropy; anything else is reproducible
    pub seed: u64,
}

/// Generated maze
#[derive(Debug, Clone, PartialEq)]
pub struct Maze {
    pub walls: Vec<MazeWall>,
    pub start: Point,
    pub end: Point,
    pub end_radius: f32,
    pub end_cell: (u32, u32),
    pub cell_size: Vec2,
    pub grid: MazeGrid,
}

impl Maze {
    /// A maze made of explicit walls only (no carved grid)
    pub fn from_walls(walls: Vec<MazeWall>, start: Point, end: Point, end_radius: f32) -> Self {
        Self {
            walls,
            start,
            end,
            end_radius,
            end_cell: (0, 0),
            cell_size: Vec2::ZERO,
            grid: MazeGrid::default(),
        }
    }

    /// Win test: player circle touches the end circle (distance via join norm)
    pub fn is_at_end(&self, player: &Point, player_radius: f32) -> bool {
        player.join(&self.end).norm() <= self.end_radius + player_radius
    }

    pub fn circle_overlaps_any_wall(&self, center: Vec2, radius: f32) -> bool {
        self.walls.iter().any(|w| w.overlaps_circle(center, radius))
    }
}

/// Seeded RNG; seed 0 pulls from entropy
pub(crate) fn rng_for_seed(seed: u64) -> Pcg32 {
    if seed == 0 {
        Pcg32::seed_from_u64(rand::random())
    } else {
        Pcg32::seed_from_u64(seed)
    }
}

/// Carve a perfect maze and extract its wall rectangles
pub fn generate(params: &MazeParams) -> Maze {
    let cols = params.cols.clamp(MIN_CELLS, MAX_CELLS);
    let rows = params.rows.clamp(MIN_CELLS, MAX_CELLS);
    let mut rng = rng_for_seed(params.seed);

    let inner_w = (params.width - 2.0 * params.margin).max(0.0);
    let inner_h = (params.height - 2.0 * params.margin).max(0.0);
    let cell_w = inner_w / cols as f32;
    let cell_h = inner_h / rows as f32;

    let mut grid = MazeGrid::closed(cols, rows);
    carve(&mut grid, &mut rng);

    // End cell: uniform over every cell except the start
    let end_cell = loop {
        let x = rng.random_range(0..cols);
        let y = rng.random_range(0..rows);
        if (x, y) != (0, 0) {
            break (x, y);
        }
    };

    // Exterior opening below the start cell
    grid.set_wall(0, 0, Dir::South, false);

    let walls = extract_walls(&grid, params.margin, params.wall_thickness, cell_w, cell_h);

    let center_of = |(x, y): (u32, u32)| {
        Point::new(
            params.margin + (x as f32 + 0.5) * cell_w,
            params.margin + (y as f32 + 0.5) * cell_h,
        )
    };

    log::info!(
        "Generated {}x{} maze: {} walls, {} passages, end cell {:?} (seed {})",
        cols,
        rows,
        walls.len(),
        grid.open_passages(),
        end_cell,
        params.seed
    );

    Maze {
        walls,
        start: center_of((0, 0)),
        end: center_of(end_cell),
        end_radius: END_RADIUS_FRACTION * cell_w.min(cell_h),
        end_cell,
        cell_size: Vec2::new(cell_w, cell_h),
        grid,
    }
}

/// Randomized depth-first backtracker from cell (0, 0)
fn carve(grid: &mut MazeGrid, rng: &mut Pcg32) {
    let mut visited = vec![false; grid.cell_count()];
    let mut stack = vec![(0u32, 0u32)];
    visited[grid.index(0, 0)] = true;

    while let Some(&(x, y)) = stack.last() {
        let mut dirs = Dir::ALL;
        dirs.shuffle(rng);

        let next = dirs.iter().find_map(|&dir| {
            grid.neighbor(x, y, dir)
                .filter(|&(nx, ny)| !visited[grid.index(nx, ny)])
                .map(|n| (dir, n))
        });

        match next {
            Some((dir, (nx, ny))) => {
                grid.set_wall(x, y, dir, false);
                grid.set_wall(nx, ny, dir.opposite(), false);
                visited[grid.index(nx, ny)] = true;
                stack.push((nx, ny));
            }
            None => {
                stack.pop();
            }
        }
    }
}

/// North and east walls per cell, then the south edge of the bottom row and
/// the west edge of the left column. Each shared wall is emitted once.
fn extract_walls(
    grid: &MazeGrid,
    margin: f32,
    thickness: f32,
    cell_w: f32,
    cell_h: f32,
) -> Vec<MazeWall> {
    let half = thickness * 0.5;
    let mut walls = Vec::new();

    for y in 0..grid.rows {
        for x in 0..grid.cols {
            let cx = margin + x as f32 * cell_w;
            let cy = margin + y as f32 * cell_h;
            if grid.has_wall(x, y, Dir::North) {
                walls.push(MazeWall::new(cx, cy + cell_h - half, cell_w, thickness));
            }
            if grid.has_wall(x, y, Dir::East) {
                walls.push(MazeWall::new(cx + cell_w - half, cy, thickness, cell_h));
            }
        }
    }
    for x in 0..grid.cols {
        if grid.has_wall(x, 0, Dir::South) {
            walls.push(MazeWall::new(margin + x as f32 * cell_w, margin - half, cell_w, thickness));
        }
    }
    for y in 0..grid.rows {
        if grid.has_wall(0, y, Dir::West) {
            walls.push(MazeWall::new(margin - half, margin + y as f32 * cell_h, thickness, cell_h));
        }
    }
    walls
}
