//! Board types shared by the engine transport and the renderer
//!
//! The client never mutates a board: every engine reply carries a complete
//! [`BoardSnapshot`] which replaces the previous one wholesale.

use std::fmt;

use crate::error::SnapshotError;

/// Smallest board the session accepts
pub const MIN_BOARD_SIZE: usize = 2;

/// Stone colors (and the empty cell)
///
/// Wire encoding: `0` = empty, `1` = black, `2` = white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stone {
    #[default]
    Empty,
    Black,
    White,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
            Stone::Empty => Stone::Empty,
        }
    }

    #[inline]
    pub fn from_code(code: u8) -> Option<Stone> {
        match code {
            0 => Some(Stone::Empty),
            1 => Some(Stone::Black),
            2 => Some(Stone::White),
            _ => None,
        }
    }

    #[inline]
    pub fn code(self) -> u8 {
        match self {
            Stone::Empty => 0,
            Stone::Black => 1,
            Stone::White => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stone::Empty => "Empty",
            Stone::Black => "Black",
            Stone::White => "White",
        }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position on the board (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    #[inline]
    pub fn to_index(self, board_size: usize) -> usize {
        self.row * board_size + self.col
    }

    #[inline]
    pub fn from_index(idx: usize, board_size: usize) -> Self {
        Self {
            row: idx / board_size,
            col: idx % board_size,
        }
    }

    #[inline]
    pub fn is_on_board(self, board_size: usize) -> bool {
        self.row < board_size && self.col < board_size
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Complete board state as returned by the engine, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    size: usize,
    cells: Vec<Stone>,
}

impl BoardSnapshot {
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![Stone::Empty; size * size],
        }
    }

    /// Decode the flat wire encoding. The length must be exactly `size²`.
    pub fn from_codes(size: usize, codes: &[u8]) -> Result<Self, SnapshotError> {
        let expected = size * size;
        if codes.len() != expected {
            return Err(SnapshotError::Length {
                expected,
                actual: codes.len(),
            });
        }

        let cells = codes
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                Stone::from_code(value).ok_or(SnapshotError::Cell { index, value })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { size, cells })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Stone at `pos`; off-board positions read as empty
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if pos.is_on_board(self.size) {
            self.cells[pos.to_index(self.size)]
        } else {
            Stone::Empty
        }
    }

    /// Occupied cells in row-major order
    pub fn stones(&self) -> impl Iterator<Item = (Pos, Stone)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, stone)| **stone != Stone::Empty)
            .map(move |(idx, stone)| (Pos::from_index(idx, size), *stone))
    }

    pub fn stone_count(&self) -> usize {
        self.stones().count()
    }
}
