#![deny(clippy::all)]
#![forbid(unsafe_code)]

use rand::prelude::*;
use rand::rngs::SmallRng;
use std::mem;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("cell ({row}, {col}) is outside the {width}x{height} grid")]
pub struct OutOfBounds {
    pub row: u32,
    pub col: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Loc {
    pub row: u32,
    pub col: u32,
}

impl Loc {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    pub fn grid_index(&self, width: u32, height: u32) -> Option<usize> {
        if self.row < height && self.col < width {
            Some(self.row as usize * width as usize + self.col as usize)
        } else {
            None
        }
    }
}

#[derive(Clone, Debug)]
pub struct LifeGrid {
    width: u32,
    height: u32,
    cells: Vec<bool>,
    next_cells: Vec<bool>,
}

impl LifeGrid {
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0);
        let num_cells = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![false; num_cells],
            next_cells: vec![false; num_cells],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &bool> + Clone {
        self.cells.iter()
    }

    pub fn get(&self, loc: Loc) -> Result<bool, OutOfBounds> {
        Ok(self.cells[self.index(loc)?])
    }

    pub fn set(&mut self, loc: Loc, alive: bool) -> Result<(), OutOfBounds> {
        let index = self.index(loc)?;
        self.cells[index] = alive;
        Ok(())
    }

    pub fn toggle(&mut self, loc: Loc) -> Result<bool, OutOfBounds> {
        let index = self.index(loc)?;
        self.cells[index] = !self.cells[index];
        Ok(self.cells[index])
    }

    pub fn live_neighbors(&self, loc: Loc) -> Result<u32, OutOfBounds> {
        self.index(loc)?;
        Ok(self.count_live_neighbors(loc.row, loc.col))
    }

    pub fn next_generation(&mut self) {
        for row in 0..self.height {
            for col in 0..self.width {
                let index = row as usize * self.width as usize + col as usize;
                let alive = self.cells[index];
                let neighbors = self.count_live_neighbors(row, col);
                self.next_cells[index] = if alive {
                    (2..=3).contains(&neighbors)
                } else {
                    neighbors == 3
                };
            }
        }
        mem::swap(&mut self.next_cells, &mut self.cells);
    }

    pub fn randomize(&mut self, live_probability: f64, rand: &mut Random) {
        let live_probability = live_probability.clamp(0.0, 1.0);
        for cell in &mut self.cells {
            *cell = rand.next_bool(live_probability);
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        assert!(width > 0 && height > 0);
        let num_cells = width as usize * height as usize;
        self.width = width;
        self.height = height;
        self.cells = vec![false; num_cells];
        self.next_cells = vec![false; num_cells];
    }

    fn index(&self, loc: Loc) -> Result<usize, OutOfBounds> {
        loc.grid_index(self.width, self.height).ok_or(OutOfBounds {
            row: loc.row,
            col: loc.col,
            width: self.width,
            height: self.height,
        })
    }

    // Off-grid neighbors count as dead. The caller guarantees the center
    // itself is in bounds.
    fn count_live_neighbors(&self, row: u32, col: u32) -> u32 {
        let mut count = 0;
        for row_offset in [-1i64, 0, 1] {
            for col_offset in [-1i64, 0, 1] {
                if row_offset == 0 && col_offset == 0 {
                    continue;
                }
                let neighbor_row = row as i64 + row_offset;
                let neighbor_col = col as i64 + col_offset;
                if neighbor_row < 0
                    || neighbor_row >= self.height as i64
                    || neighbor_col < 0
                    || neighbor_col >= self.width as i64
                {
                    continue;
                }
                let index =
                    neighbor_row as usize * self.width as usize + neighbor_col as usize;
                if self.cells[index] {
                    count += 1;
                }
            }
        }
        count
    }
}

#[derive(Debug)]
pub struct Random {
    rng: SmallRng,
}

impl Random {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn next_bool(&mut self, p: f64) -> bool {
        self.rng.random_bool(p)
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live_cells(grid: &LifeGrid) -> Vec<Loc> {
        let mut result = vec![];
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                let loc = Loc::new(row, col);
                if grid.get(loc).unwrap() {
                    result.push(loc);
                }
            }
        }
        result
    }

    #[test]
    fn new_grid_is_all_dead() {
        let grid = LifeGrid::new(4, 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.num_cells(), 12);
        assert!(live_cells(&grid).is_empty());
    }

    #[test]
    fn set_then_get() {
        let mut grid = LifeGrid::new(3, 3);
        grid.set(Loc::new(1, 2), true).unwrap();
        assert!(grid.get(Loc::new(1, 2)).unwrap());
        assert!(!grid.get(Loc::new(2, 1)).unwrap());
    }

    #[test]
    fn access_outside_bounds_fails() {
        let mut grid = LifeGrid::new(3, 2);
        let expected = OutOfBounds {
            row: 2,
            col: 0,
            width: 3,
            height: 2,
        };
        assert_eq!(grid.get(Loc::new(2, 0)), Err(expected));
        assert_eq!(grid.set(Loc::new(2, 0), true), Err(expected));
        assert_eq!(grid.toggle(Loc::new(2, 0)), Err(expected));
        assert!(grid.get(Loc::new(0, 3)).is_err());
        assert!(grid.live_neighbors(Loc::new(0, 3)).is_err());
    }

    #[test]
    fn toggle_twice_restores_the_cell() {
        let mut grid = LifeGrid::new(3, 3);
        assert!(grid.toggle(Loc::new(1, 1)).unwrap());
        assert!(!grid.toggle(Loc::new(1, 1)).unwrap());
        assert!(!grid.get(Loc::new(1, 1)).unwrap());
    }

    #[test]
    fn counts_all_eight_neighbors() {
        let mut grid = LifeGrid::new(3, 3);
        for row in 0..3 {
            for col in 0..3 {
                grid.set(Loc::new(row, col), true).unwrap();
            }
        }
        assert_eq!(grid.live_neighbors(Loc::new(1, 1)).unwrap(), 8);
    }

    #[test]
    fn neighbors_beyond_the_edge_count_as_dead() {
        let mut grid = LifeGrid::new(3, 3);
        grid.set(Loc::new(0, 1), true).unwrap();
        grid.set(Loc::new(1, 0), true).unwrap();
        grid.set(Loc::new(1, 1), true).unwrap();
        assert_eq!(grid.live_neighbors(Loc::new(0, 0)).unwrap(), 3);
        assert_eq!(grid.live_neighbors(Loc::new(2, 2)).unwrap(), 1);
    }

    #[test]
    fn empty_grid_stays_empty() {
        let mut grid = LifeGrid::new(5, 5);
        grid.next_generation();
        assert!(live_cells(&grid).is_empty());
    }

    #[test]
    fn lone_cell_dies() {
        let mut grid = LifeGrid::new(5, 5);
        grid.set(Loc::new(2, 2), true).unwrap();
        grid.next_generation();
        assert!(live_cells(&grid).is_empty());
    }

    #[test]
    fn blinker_oscillates() {
        let mut grid = LifeGrid::new(3, 3);
        grid.set(Loc::new(1, 0), true).unwrap();
        grid.set(Loc::new(1, 1), true).unwrap();
        grid.set(Loc::new(1, 2), true).unwrap();

        grid.next_generation();
        assert_eq!(
            live_cells(&grid),
            vec![Loc::new(0, 1), Loc::new(1, 1), Loc::new(2, 1)]
        );

        grid.next_generation();
        assert_eq!(
            live_cells(&grid),
            vec![Loc::new(1, 0), Loc::new(1, 1), Loc::new(1, 2)]
        );
    }

    #[test]
    fn block_is_a_still_life() {
        let mut grid = LifeGrid::new(4, 4);
        let block = vec![
            Loc::new(1, 1),
            Loc::new(1, 2),
            Loc::new(2, 1),
            Loc::new(2, 2),
        ];
        for &loc in &block {
            grid.set(loc, true).unwrap();
        }
        grid.next_generation();
        assert_eq!(live_cells(&grid), block);
    }

    #[test]
    fn clear_kills_every_cell() {
        let mut grid = LifeGrid::new(4, 4);
        grid.randomize(1.0, &mut Random::new());
        grid.clear();
        assert!(live_cells(&grid).is_empty());
    }

    #[test]
    fn randomize_saturates_at_the_probability_extremes() {
        let mut grid = LifeGrid::new(6, 6);
        let mut rand = Random::new();
        grid.randomize(1.0, &mut rand);
        assert_eq!(live_cells(&grid).len(), grid.num_cells());
        grid.randomize(0.0, &mut rand);
        assert!(live_cells(&grid).is_empty());
    }

    #[test]
    fn randomize_clamps_the_probability() {
        let mut grid = LifeGrid::new(4, 4);
        let mut rand = Random::new();
        grid.randomize(1.5, &mut rand);
        assert_eq!(live_cells(&grid).len(), grid.num_cells());
        grid.randomize(-0.5, &mut rand);
        assert!(live_cells(&grid).is_empty());
    }

    #[test]
    fn resize_replaces_the_grid_with_dead_cells() {
        let mut grid = LifeGrid::new(3, 3);
        grid.set(Loc::new(0, 0), true).unwrap();
        grid.resize(5, 2);
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.num_cells(), 10);
        assert!(live_cells(&grid).is_empty());
        assert!(grid.get(Loc::new(2, 0)).is_err());
    }
}
