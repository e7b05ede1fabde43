use std::{fs, path::Path};

use crate::{error::PatternError, proc::Cell};

/// A figure in the plaintext `.cells` format, kept as the coordinates of its
/// live cells relative to the top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

impl Pattern {

    /// Parses a plaintext figure. Lines starting with `!` are comments,
    /// `O`, `o` and `*` are live, `.` and spaces are dead.
    pub fn from_plaintext(s: &str) -> Result<Self, PatternError> {
        let mut cells = vec![];
        let mut width = 0;
        let mut height = 0;

        let rows = s
            .lines()
            .enumerate()
            .filter(|(_, l)| !l.starts_with('!'))
            .enumerate();
        for (y, (line, row)) in rows {
            for (x, glyph) in row.trim_end().chars().enumerate() {
                match glyph {
                    'O' | 'o' | '*' => {
                        cells.push(Cell::new(x as i64, y as i64));
                        width = width.max(x + 1);
                        height = height.max(y + 1);
                    }
                    '.' | ' ' => {}
                    _ => {
                        return Err(PatternError::InvalidGlyph {
                            line: line + 1,
                            column: x + 1,
                            glyph,
                        })
                    }
                }
            }
        }

        if cells.is_empty() {
            return Err(PatternError::Empty);
        }

        Ok(Pattern { cells, width, height })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PatternError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| PatternError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_plaintext(&s)
    }

    pub fn blinker() -> Self {
        Pattern {
            cells: vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)],
            width: 1,
            height: 3,
        }
    }

    pub fn glider() -> Self {
        Pattern {
            cells: vec![
                Cell::new(1, 0),
                Cell::new(2, 1),
                Cell::new(0, 2),
                Cell::new(1, 2),
                Cell::new(2, 2),
            ],
            width: 3,
            height: 3,
        }
    }

    pub fn block() -> Self {
        Pattern {
            cells: vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(0, 1), Cell::new(1, 1)],
            width: 2,
            height: 2,
        }
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Side of the smallest square holding the whole figure.
    #[inline]
    pub fn bounding_box(&self) -> usize {
        self.width.max(self.height)
    }
}
