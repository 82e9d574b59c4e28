//! Text maps: render a [`Grid`] with its endpoints and path, or parse one
//! back from text.
//!
//! | Char | Meaning |
//! |---|---|
//! | `O` | origin |
//! | `X` | destination |
//! | `#` | blocked cell |
//! | `.` | free cell |
//! | `*` | free cell on the path |

use std::collections::HashSet;

use crate::error::MapParseError;
use crate::geom::Coord;
use crate::grid::{CellState, Grid};

pub const ORIGIN: char = 'O';
pub const DESTINATION: char = 'X';
pub const BLOCKED: char = '#';
pub const FREE: char = '.';
pub const PATH: char = '*';

/// Render `grid` one character per cell, one `\n`-terminated line per row.
///
/// Path cells are marked only when `path` is given and non-empty. The
/// origin marker wins over the destination marker when they coincide.
pub fn render(grid: &Grid, origin: Coord, destination: Coord, path: Option<&[Coord]>) -> String {
    let on_path: HashSet<Coord> = path.unwrap_or_default().iter().copied().collect();
    let size = grid.size();
    let mut out = String::with_capacity(size.len() + size.rows.max(0) as usize);

    for (c, state) in grid.iter() {
        let ch = if c == origin {
            ORIGIN
        } else if c == destination {
            DESTINATION
        } else if state == CellState::Blocked {
            BLOCKED
        } else if on_path.contains(&c) {
            PATH
        } else {
            FREE
        };
        out.push(ch);
        if c.col == size.cols - 1 {
            out.push('\n');
        }
    }
    out
}

/// A grid parsed from text, with the endpoint markers it contained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMap {
    pub grid: Grid,
    pub origin: Option<Coord>,
    pub destination: Option<Coord>,
}

/// Parse a text map in the format produced by [`render`].
///
/// Surrounding whitespace is trimmed; trailing `\r` on each line is ignored.
/// Every line must have the same width.
pub fn parse_map(text: &str) -> Result<ParsedMap, MapParseError> {
    let lines: Vec<&str> = text
        .trim()
        .lines()
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect();
    let width = lines.first().map_or(0, |l| l.chars().count());
    if width == 0 {
        return Err(MapParseError::Empty);
    }

    for (i, line) in lines.iter().enumerate() {
        let found = line.chars().count();
        if found != width {
            return Err(MapParseError::InconsistentWidth {
                line: i,
                expected: width,
                found,
            });
        }
    }

    let mut grid = Grid::new(lines.len() as i32, width as i32).map_err(|_| MapParseError::Empty)?;
    let mut origin = None;
    let mut destination = None;

    for (row, line) in lines.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            let coord = Coord::new(row as i32, col as i32);
            let slot = match ch {
                FREE | PATH => None,
                BLOCKED => {
                    grid.set(coord, CellState::Blocked)
                        .map_err(|_| MapParseError::InvalidChar { ch, coord })?;
                    None
                }
                ORIGIN => Some(&mut origin),
                DESTINATION => Some(&mut destination),
                _ => return Err(MapParseError::InvalidChar { ch, coord }),
            };
            if let Some(slot) = slot {
                if slot.is_some() {
                    return Err(MapParseError::DuplicateMarker { marker: ch, coord });
                }
                *slot = Some(coord);
            }
        }
    }

    Ok(ParsedMap {
        grid,
        origin,
        destination,
    })
}
