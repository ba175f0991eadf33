//! Wave layouts
//!
//! A pattern row is 12 symbolic cells, one per 32px column:
//! `.` gap, `E` random enemy, `P` random boxed power-up, `1`-`3` a boss.

use super::catalog::BossKind;

/// One cell of a pattern row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Gap,
    Enemy,
    PowerUp,
    Boss(BossKind),
}

impl Cell {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Cell::Gap),
            'E' => Some(Cell::Enemy),
            'P' => Some(Cell::PowerUp),
            '1' => Some(Cell::Boss(BossKind::Gull)),
            '2' => Some(Cell::Boss(BossKind::Crab)),
            '3' => Some(Cell::Boss(BossKind::Kraken)),
            _ => None,
        }
    }
}

/// Single row or stacked rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternLayout {
    SingleLine,
    MultiLine,
}

pub const SINGLE_LINE: &[&str] = &[
    "E.E.E.E.E.E.",
    ".E.E.E.E.E.E",
    "EE..EP..EE..",
    "..EEE..EEE..",
    "E....P....E.",
    "EEE......EEE",
    ".P..EEEE..P.",
    "E.E.P.E.E.P.",
];

/// Stacked layouts; row 0 enters the screen first
pub const MULTI_LINE: &[[&str; 3]] = &[
    ["E..........E", ".E........E.", "..E..P...E.."],
    ["EEEE....EEEE", "....P..P....", "EEEE....EEEE"],
    ["....1.......", "E.E.....E.E.", ".P.E.E.E..P."],
    ["2.........E.", "...E.E.E....", "E..P...P..E."],
    ["...E.3..E...", "E.E.....E.E.", "..P......P.."],
    ["P.E.E..E.E.P", ".E.E.EE.E.E.", "E.E.E..E.E.E"],
];

/// Non-gap cells of a row with their column index
pub fn cells(row: &str) -> impl Iterator<Item = (usize, Cell)> + '_ {
    row.chars()
        .enumerate()
        .filter_map(|(column, symbol)| match Cell::from_symbol(symbol) {
            Some(Cell::Gap) | None => None,
            Some(cell) => Some((column, cell)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PATTERN_COLUMNS;

    fn assert_valid(row: &str) {
        assert_eq!(row.chars().count(), PATTERN_COLUMNS, "row {row:?}");
        for symbol in row.chars() {
            assert!(Cell::from_symbol(symbol).is_some(), "bad symbol in {row:?}");
        }
    }

    #[test]
    fn test_catalog_rows_are_well_formed() {
        for row in SINGLE_LINE {
            assert_valid(row);
        }
        for rows in MULTI_LINE {
            for row in rows {
                assert_valid(row);
            }
        }
    }

    #[test]
    fn test_cells_skip_gaps_and_keep_columns() {
        let found: Vec<_> = cells("E..P.2......").collect();
        assert_eq!(
            found,
            vec![
                (0, Cell::Enemy),
                (3, Cell::PowerUp),
                (5, Cell::Boss(BossKind::Crab)),
            ]
        );
    }

    #[test]
    fn test_unknown_symbol_is_rejected() {
        assert_eq!(Cell::from_symbol('x'), None);
    }
}
