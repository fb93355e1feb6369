//! Board file codec.
//!
//! Format: the row count and the column count on their own lines, then one
//! `row col` pair per live cell. Blank lines are ignored.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::torus::{Grid, LifeError};

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("board I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("line {line}: cell ({row},{col}) outside {rows}x{cols} board")]
    OutOfRange {
        line: usize,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error(transparent)]
    Grid(#[from] LifeError),
}

fn parse_dim(
    lines: &mut impl Iterator<Item = (usize, String)>,
    what: &str,
) -> Result<usize, BoardError> {
    let (line, text) = lines.next().ok_or_else(|| BoardError::Parse {
        line: 0,
        message: format!("missing {what}"),
    })?;
    text.parse().map_err(|_| BoardError::Parse {
        line,
        message: format!("bad {what} {text:?}"),
    })
}

pub fn parse_board(text: &str) -> Result<Grid, BoardError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim().to_owned()))
        .filter(|(_, l)| !l.is_empty());

    let rows = parse_dim(&mut lines, "row count")?;
    let cols = parse_dim(&mut lines, "column count")?;
    let mut grid = Grid::new(rows, cols)?;

    for (line, text) in lines {
        let mut fields = text.split_whitespace();
        let (Some(r), Some(c), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(BoardError::Parse {
                line,
                message: format!("expected `row col`, got {text:?}"),
            });
        };
        let parse = |s: &str| {
            s.parse::<usize>().map_err(|_| BoardError::Parse {
                line,
                message: format!("bad coordinate {s:?}"),
            })
        };
        let (row, col) = (parse(r)?, parse(c)?);
        if row >= rows || col >= cols {
            return Err(BoardError::OutOfRange {
                line,
                row,
                col,
                rows,
                cols,
            });
        }
        grid.set(row, col, true);
    }
    Ok(grid)
}

pub fn format_board(grid: &Grid) -> String {
    let mut out = format!("{}\n{}\n", grid.rows(), grid.cols());
    grid.for_each_live(|row, col| {
        out.push_str(&format!("{row} {col}\n"));
    });
    out
}

pub fn load_board(path: impl AsRef<Path>) -> Result<Grid, BoardError> {
    let text = fs::read_to_string(path)?;
    parse_board(&text)
}

pub fn save_board(path: impl AsRef<Path>, grid: &Grid) -> Result<(), BoardError> {
    fs::write(path, format_board(grid))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{BoardError, format_board, load_board, parse_board, save_board};
    use crate::torus::{Grid, LifeError};

    #[test]
    fn parses_dimensions_and_live_cells() {
        let grid = parse_board("4\n6\n0 0\n3 5\n\n1 2\n1 2\n").unwrap();
        assert_eq!((grid.rows(), grid.cols()), (4, 6));
        assert_eq!(grid.population(), 3);
        assert!(grid.get(3, 5));
        assert!(grid.get(1, 2));
    }

    #[test]
    fn formats_live_cells_in_row_major_order() {
        let grid = parse_board("3\n3\n2 1\n0 2\n").unwrap();
        assert_eq!(format_board(&grid), "3\n3\n0 2\n2 1\n");
    }

    #[test]
    fn rejects_out_of_range_and_malformed_lines() {
        assert!(matches!(
            parse_board("2\n2\n2 0\n"),
            Err(BoardError::OutOfRange { line: 3, row: 2, .. })
        ));
        assert!(matches!(
            parse_board("2\n2\n1\n"),
            Err(BoardError::Parse { line: 3, .. })
        ));
        assert!(matches!(
            parse_board("2\nx\n"),
            Err(BoardError::Parse { line: 2, .. })
        ));
        assert!(matches!(parse_board(""), Err(BoardError::Parse { line: 0, .. })));
    }

    #[test]
    fn zero_sized_board_is_a_grid_error() {
        assert!(matches!(
            parse_board("0\n5\n"),
            Err(BoardError::Grid(LifeError::EmptyGrid { rows: 0, cols: 5 }))
        ));
    }

    #[test]
    fn save_then_load_preserves_board() {
        let mut grid = Grid::new(5, 7).unwrap();
        grid.set_cells_alive([(0, 0), (2, 3), (4, 6), (4, 0)]);
        let path = std::env::temp_dir().join(format!(
            "torus-life-board-{}-{:?}.txt",
            std::process::id(),
            std::thread::current().id()
        ));

        save_board(&path, &grid).unwrap();
        let loaded = load_board(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.unwrap(), grid);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("torus-life-board-does-not-exist.txt");
        assert!(matches!(load_board(&path), Err(BoardError::Io(_))));
    }
}
