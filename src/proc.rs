use std::{collections::HashSet, fmt};

use rand::Rng;

use crate::{error::BoardError, pattern::Pattern};

pub const LIVE_GLYPH: char = 'o';
pub const DEAD_GLYPH: char = ' ';

type Result<T> = std::result::Result<T, BoardError>;

/// A board coordinate. `x` is the column, `y` is the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

impl Cell {
    #[inline]
    pub fn new(x: i64, y: i64) -> Self {
        Cell { x, y }
    }

    /// `None` when the shifted coordinate does not fit in an `i64`.
    #[inline]
    pub fn offset(&self, dx: i64, dy: i64) -> Option<Self> {
        Some(Cell {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }
}

impl From<(i64, i64)> for Cell {
    fn from((x, y): (i64, i64)) -> Self {
        Cell { x, y }
    }
}

/// Square, bounded life board.
///
/// `current` is the authoritative generation. `next` is scratch space which
/// `step` fills from `current` alone and then swaps in, so the two buffers
/// trade places every generation and nothing is allocated after construction.
#[derive(Clone)]
pub struct Board {
    size: usize,
    current: Vec<bool>,
    next: Vec<bool>,
}

// `next` is scratch: two boards are the same board when their current
// generations match, whatever the buffers held before.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.current == other.current
    }
}

impl Eq for Board {}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("size", &self.size)
            .field("live", &self.live_cells().collect::<Vec<_>>())
            .finish()
    }
}

impl Board {

    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(BoardError::ZeroSize);
        }

        let too_large = BoardError::TooLarge { size };
        let len = size.checked_mul(size).ok_or_else(|| too_large.clone())?;
        if i64::try_from(size).is_err() {
            return Err(too_large);
        }

        Ok(Board {
            size,
            current: Self::alloc_grid(len).ok_or_else(|| too_large.clone())?,
            next: Self::alloc_grid(len).ok_or(too_large)?,
        })
    }

    fn alloc_grid(len: usize) -> Option<Vec<bool>> {
        let mut grid = Vec::new();
        grid.try_reserve_exact(len).ok()?;
        grid.resize(len, false);
        Some(grid)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn live_count(&self) -> usize {
        self.current.iter().filter(|c| **c).count()
    }

    /// Live cells in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.current
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(i, _)| self.index_to_cell(i))
    }

    pub fn clear(&mut self) {
        self.current.fill(false);
    }

    pub fn set_cell(&mut self, cell: Cell, alive: bool) -> Result<()> {
        let i = self.index(cell)?;
        self.current[i] = alive;
        Ok(())
    }

    pub fn get_cell(&self, cell: Cell) -> Result<bool> {
        let i = self.index(cell)?;
        Ok(self.current[i])
    }

    /// Seeds up to `count` live cells using the thread-local generator.
    pub fn random_seed(&mut self, count: usize) -> usize {
        self.random_seed_with(count, &mut rand::rng())
    }

    /// Draws `count` coordinates and sets them alive. Repeated draws collapse
    /// onto the same cell, so the returned number of distinct cells drawn may
    /// be lower than `count`.
    pub fn random_seed_with<R: Rng>(&mut self, count: usize, rng: &mut R) -> usize {
        let size = self.size as i64;
        let cells: HashSet<Cell> = (0..count)
            .map(|_| Cell::new(rng.random_range(0..size), rng.random_range(0..size)))
            .collect();

        for cell in &cells {
            // drawn from [0, size), always addressable
            if let Some(i) = self.get_index(*cell) {
                self.current[i] = true;
            }
        }

        log::debug!("random seed drew {} distinct cells out of {count}", cells.len());
        cells.len()
    }

    /// Number of live cells among the eight surrounding `cell`. Positions
    /// beyond the edge count as dead; there is no wraparound.
    pub fn neighbor_count(&self, cell: Cell) -> usize {
        const OFFSETS: [(i64, i64); 8] = [
            (-1, -1),
            (0, -1),
            (1, -1),
            (-1, 0),
            (1, 0),
            (-1, 1),
            (0, 1),
            (1, 1),
        ];

        OFFSETS
            .iter()
            .filter_map(|(dx, dy)| cell.offset(*dx, *dy).and_then(|c| self.get(c)))
            .filter(|alive| *alive)
            .count()
    }

    /// Advances the board by one generation.
    pub fn step(&mut self) {
        self.next.fill(false);

        for i in 0..self.current.len() {
            let cell = self.index_to_cell(i);
            self.next[i] = Self::produce_value(self.current[i], self.neighbor_count(cell));
        }

        std::mem::swap(&mut self.current, &mut self.next);
    }

    fn produce_value(current: bool, neighbors: usize) -> bool {
        match (current, neighbors) {
            (true, 2..=3) => true,
            (false, 3) => true,
            _ => false,
        }
    }

    /// Text form of the board: the title on its own line (skipped when empty),
    /// then one line per row with every cell followed by a space.
    pub fn render(&self, title: &str) -> String {
        let mut s = String::with_capacity(title.len() + 1 + self.size * (self.size * 2 + 1));

        if !title.is_empty() {
            s.push_str(title);
            s.push('\n');
        }

        for row in self.current.chunks(self.size) {
            for alive in row {
                s.push(if *alive { LIVE_GLYPH } else { DEAD_GLYPH });
                s.push(' ');
            }
            s.push('\n');
        }
        s
    }

    /// Vertical three cell line centered on `center`. Fails without touching
    /// the board when either end falls outside it.
    pub fn set_blinker(&mut self, center: Cell) -> Result<()> {
        let cells = [self.shift(center, 0, -1)?, center, self.shift(center, 0, 1)?];
        self.set_all(&cells)
    }

    /// Sets every live cell of `pattern` shifted by `origin`. Nothing is
    /// written when any of them lands outside the board.
    pub fn place_pattern(&mut self, pattern: &Pattern, origin: Cell) -> Result<()> {
        let cells = pattern
            .cells()
            .iter()
            .map(|c| self.shift(*c, origin.x, origin.y))
            .collect::<Result<Vec<_>>>()?;
        self.set_all(&cells)
    }

    pub fn place_pattern_centered(&mut self, pattern: &Pattern) -> Result<()> {
        let size = self.size as i64;
        let origin = Cell::new(
            (size - pattern.width() as i64) / 2,
            (size - pattern.height() as i64) / 2,
        );
        self.place_pattern(pattern, origin)
    }

    fn set_all(&mut self, cells: &[Cell]) -> Result<()> {
        let indices = cells
            .iter()
            .map(|c| self.index(*c))
            .collect::<Result<Vec<_>>>()?;

        for i in indices {
            self.current[i] = true;
        }
        Ok(())
    }

    fn shift(&self, cell: Cell, dx: i64, dy: i64) -> Result<Cell> {
        cell.offset(dx, dy).ok_or(BoardError::OutOfRange {
            x: cell.x.saturating_add(dx),
            y: cell.y.saturating_add(dy),
            size: self.size,
        })
    }

    #[inline]
    fn get(&self, cell: Cell) -> Option<bool> {
        self.get_index(cell).map(|i| self.current[i])
    }

    #[inline]
    fn get_index(&self, cell: Cell) -> Option<usize> {
        let size = self.size as i64;
        if cell.x < 0 || cell.y < 0 || cell.x >= size || cell.y >= size {
            None
        } else {
            Some(cell.y as usize * self.size + cell.x as usize)
        }
    }

    fn index(&self, cell: Cell) -> Result<usize> {
        self.get_index(cell).ok_or(BoardError::OutOfRange {
            x: cell.x,
            y: cell.y,
            size: self.size,
        })
    }

    #[inline]
    fn index_to_cell(&self, i: usize) -> Cell {
        Cell::new((i % self.size) as i64, (i / self.size) as i64)
    }
}
