use anyhow::{anyhow, Result};
use static_assertions::*;
use thiserror::Error;

use std::fmt;

use crate::counter::Counter;

/// A coordinate on the board, `x` is the column and `y` the row counted from the bottom
///
/// Coordinates are signed so that scanning past an edge produces an
/// off-board position rather than an overflow.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The position `steps` cells away in direction `(dx, dy)`
    pub fn step(self, (dx, dy): (i32, i32), steps: i32) -> Self {
        Self {
            x: self.x + dx * steps,
            y: self.y + dy * steps,
        }
    }
}

/// The largest width or height a board can have
pub const MAX_DIMENSION: usize = 255;

// positions are signed and terminal coordinates are u16
const_assert!(MAX_DIMENSION < i32::MAX as usize);
const_assert!(MAX_DIMENSION < u16::MAX as usize);

/// The dimensions of a board
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct BoardConfig {
    width: usize,
    height: usize,
}

impl BoardConfig {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(anyhow!(
                "Invalid board size {}x{}, both dimensions must be between 1 and {}",
                width,
                height,
                MAX_DIMENSION
            ));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn num_cells(&self) -> usize {
        self.width * self.height
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 7,
            height: 6,
        }
    }
}

/// Reasons a move cannot be applied to a board
#[derive(Copy, Clone, Eq, PartialEq, Debug, Error)]
pub enum InvalidMove {
    #[error("Invalid move, column {column} out of range for a board {width} columns wide")]
    ColumnOutOfRange { column: usize, width: usize },
    #[error("Invalid move, column {0} full")]
    ColumnFull(usize),
}

/// A snapshot of a game board
///
/// Boards are values: playing a move with [`Board::with_move`] returns a new
/// board and leaves the original untouched, so every node of a search tree
/// owns its own snapshot.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Board {
    config: BoardConfig,
    cells: Vec<Option<Counter>>, // cells are stored left-to-right, bottom-to-top
    heights: Vec<usize>,
    num_moves: usize,
}

impl Board {
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            cells: vec![None; config.num_cells()],
            heights: vec![0; config.width()],
            num_moves: 0,
        }
    }

    /// Builds a board from a string of 1-indexed columns, players alternate starting with `O`
    pub fn from_moves<S: AsRef<str>>(config: BoardConfig, moves: S) -> Result<Self> {
        let mut board = Self::new(config);
        let mut counter = Counter::O;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column) if column >= 1 && column <= config.width() => {
                    board = board.with_move(column - 1, counter)?;
                    counter = counter.other();
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    /// Builds a board from a picture of it, one line per row from the top down
    ///
    /// `.` is an empty cell, `O` and `X` are counters. Blank lines and
    /// surrounding whitespace are ignored.
    pub fn from_diagram<S: AsRef<str>>(diagram: S) -> Result<Self> {
        let rows: Vec<&str> = diagram
            .as_ref()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let height = rows.len();
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        let mut board = Self::new(BoardConfig::new(width, height)?);

        for (i, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(anyhow!(
                    "row {} has {} cells, expected {}",
                    i + 1,
                    row.chars().count(),
                    width
                ));
            }
            let y = height - 1 - i;
            for (x, c) in row.chars().enumerate() {
                board.cells[x + width * y] = match c {
                    '.' => None,
                    _ => Some(Counter::from_char(c).ok_or_else(|| {
                        anyhow!("could not parse '{}' as a cell", c)
                    })?),
                };
            }
        }

        // columns fill bottom-up, so an empty cell can't sit below a counter
        for x in 0..width {
            let filled = (0..height)
                .take_while(|&y| board.cells[x + width * y].is_some())
                .count();
            if (filled..height).any(|y| board.cells[x + width * y].is_some()) {
                return Err(anyhow!("column {} has a floating counter", x + 1));
            }
            board.heights[x] = filled;
            board.num_moves += filled;
        }

        Ok(board)
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn width(&self) -> usize {
        self.config.width()
    }

    pub fn height(&self) -> usize {
        self.config.height()
    }

    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.x >= 0
            && (pos.x as usize) < self.width()
            && pos.y >= 0
            && (pos.y as usize) < self.height()
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.is_valid_position(pos) {
            Some(pos.x as usize + self.width() * pos.y as usize)
        } else {
            None
        }
    }

    pub fn has_counter_at(&self, pos: Position) -> bool {
        self.counter_at(pos).is_some()
    }

    /// The counter at `pos`, `None` if the cell is empty or off the board
    pub fn counter_at(&self, pos: Position) -> Option<Counter> {
        self.index(pos).and_then(|i| self.cells[i])
    }

    /// The number of counters in `column`
    pub fn column_height(&self, column: usize) -> usize {
        self.heights.get(column).copied().unwrap_or(0)
    }

    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    pub fn empty_cells(&self) -> usize {
        self.config.num_cells() - self.num_moves
    }

    /// Iterates over every occupied cell and the counter in it
    pub fn occupied(&self) -> impl Iterator<Item = (Position, Counter)> + '_ {
        let width = self.width();
        self.cells.iter().enumerate().filter_map(move |(i, &cell)| {
            cell.map(|counter| {
                (
                    Position::new((i % width) as i32, (i / width) as i32),
                    counter,
                )
            })
        })
    }

    /// Returns a new board with `counter` dropped into `column`
    pub fn with_move(&self, column: usize, counter: Counter) -> Result<Self, InvalidMove> {
        if column >= self.width() {
            return Err(InvalidMove::ColumnOutOfRange {
                column,
                width: self.width(),
            });
        }
        let row = self.heights[column];
        if row >= self.height() {
            return Err(InvalidMove::ColumnFull(column));
        }

        let mut next = self.clone();
        next.cells[column + self.width() * row] = Some(counter);
        next.heights[column] += 1;
        next.num_moves += 1;
        Ok(next)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in (0..self.height()).rev() {
            for x in 0..self.width() {
                let c = self
                    .counter_at(Position::new(x as i32, y as i32))
                    .map_or('.', Counter::to_char);
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
