use ca_rules1d::{Rule, RuleError, State};

/// The space-time diagram of a simulation.
///
/// Generation 0 is the initial row, and generation `i` is computed from
/// generation `i - 1`. All rows have the same width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Number of cells in a row.
    width: usize,

    /// Number of rows.
    generations: usize,

    /// The cells, row by row.
    cells: Vec<State>,
}

impl Grid {
    /// Create an empty grid with room for `generations` rows.
    fn with_capacity(width: usize, generations: usize) -> Self {
        Self {
            width,
            generations: 0,
            cells: Vec::with_capacity(width * generations),
        }
    }

    /// Append a row.
    fn push_row(&mut self, row: &[State]) {
        debug_assert_eq!(row.len(), self.width);
        self.cells.extend_from_slice(row);
        self.generations += 1;
    }

    /// The last row.
    fn last_row(&self) -> &[State] {
        &self.cells[self.cells.len() - self.width..]
    }

    /// Number of cells in a row.
    #[inline]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows, including the initial row.
    #[inline]
    pub const fn generations(&self) -> usize {
        self.generations
    }

    /// A row of the grid.
    pub fn row(&self, generation: usize) -> Option<&[State]> {
        (generation < self.generations)
            .then(|| &self.cells[generation * self.width..(generation + 1) * self.width])
    }

    /// The state of a cell.
    pub fn get(&self, generation: usize, index: usize) -> Option<State> {
        if index < self.width {
            self.row(generation).map(|row| row[index])
        } else {
            None
        }
    }

    /// Iterate over the rows, starting from the initial row.
    pub fn rows(&self) -> impl Iterator<Item = &[State]> + '_ {
        (0..self.generations).filter_map(|generation| self.row(generation))
    }

    /// All the cells, row by row.
    pub fn cells(&self) -> &[State] {
        &self.cells
    }
}

/// Repeat the row cyclically so that it has `radius` extra cells on each side.
///
/// The `i`-th window of size `2 * radius + 1` of the result is the
/// neighborhood of the `i`-th cell.
fn pad_periodic(row: &[State], radius: usize) -> Vec<State> {
    let len = row.len();
    if len == 0 {
        return Vec::new();
    }
    let shift = len - radius % len;
    (0..len + 2 * radius)
        .map(|i| row[(i + shift) % len])
        .collect()
}

/// The neighborhood of the cell at `index`, with periodic boundary conditions.
///
/// The neighborhood always has `2 * radius + 1` cells, even if this is more
/// than the width of the row.
///
/// ```rust
/// # use ca1d_lib::neighborhood;
/// assert_eq!(neighborhood(&[1, 2, 3], 0, 1), vec![3, 1, 2]);
/// assert_eq!(neighborhood(&[1, 2, 3], 2, 1), vec![2, 3, 1]);
/// ```
///
/// # Panics
///
/// Panics if `index` is out of bounds.
pub fn neighborhood(row: &[State], index: usize, radius: usize) -> Vec<State> {
    assert!(index < row.len(), "index out of bounds");
    let len = row.len();
    let shift = len - radius % len;
    (index..=index + 2 * radius)
        .map(|i| row[(i + shift) % len])
        .collect()
}

/// Compute the next row.
///
/// Every cell is computed from the same row, so the update is synchronous.
///
/// # Errors
///
/// Fails as soon as the rule fails on some neighborhood.
pub fn step(row: &[State], radius: usize, rule: &Rule) -> Result<Vec<State>, RuleError> {
    pad_periodic(row, radius)
        .windows(2 * radius + 1)
        .enumerate()
        .map(|(index, neighborhood)| rule.evaluate(neighborhood, index))
        .collect()
}

/// Evolve a one-dimensional cellular automaton.
///
/// The result has `steps` rows, the first of which is `initial`. The row wraps
/// around at both ends.
///
/// ```rust
/// # use ca1d_lib::{evolve, init_simple, Rule};
/// let grid = evolve(&init_simple(7, 1), 3, &Rule::Nks(30), 1).unwrap();
/// assert_eq!(grid.row(1).unwrap(), &[0, 0, 1, 1, 1, 0, 0]);
/// assert_eq!(grid.row(2).unwrap(), &[0, 1, 1, 0, 0, 1, 0]);
/// ```
///
/// # Errors
///
/// Fails as soon as the rule fails on some neighborhood. No partial grid is
/// returned.
pub fn evolve(
    initial: &[State],
    steps: usize,
    rule: &Rule,
    radius: usize,
) -> Result<Grid, RuleError> {
    let mut grid = Grid::with_capacity(initial.len(), steps);

    if steps == 0 {
        return Ok(grid);
    }

    grid.push_row(initial);

    for generation in 1..steps {
        let next = step(grid.last_row(), radius, rule)?;
        log::trace!("Generation {}: {:?}", generation, next);
        grid.push_row(&next);
    }

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ca_rules1d::RuleTable;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_neighborhood_wraps() {
        let row = [b'A', b'B', b'C'];
        assert_eq!(neighborhood(&row, 0, 1), b"CAB");
        assert_eq!(neighborhood(&row, 1, 1), b"ABC");
        assert_eq!(neighborhood(&row, 2, 1), b"BCA");
        assert_eq!(neighborhood(&row, 0, 2), b"BCABC");
        assert_eq!(neighborhood(&row, 1, 0), b"B");

        // The neighborhood may be wider than the row.
        assert_eq!(neighborhood(&row, 0, 4), b"CABCABCAB");
        assert_eq!(neighborhood(&[7], 0, 2), vec![7; 5]);
    }

    #[test]
    fn test_windows_match_neighborhood() {
        let row = [0, 1, 2, 3, 4, 5, 6];
        for radius in 0..10 {
            let padded = pad_periodic(&row, radius);
            let windows = padded.windows(2 * radius + 1).collect::<Vec<_>>();
            assert_eq!(windows.len(), row.len());
            for (index, window) in windows.into_iter().enumerate() {
                assert_eq!(window, neighborhood(&row, index, radius));
            }
        }
    }

    #[test]
    fn test_synchronous_update() {
        let grid = evolve(&[0, 0, 1, 0, 0], 2, &Rule::Nks(254), 1).unwrap();
        assert_eq!(grid.row(0).unwrap(), &[0, 0, 1, 0, 0]);
        assert_eq!(grid.row(1).unwrap(), &[0, 1, 1, 1, 0]);

        // The rule only ever sees neighborhoods of the previous row.
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = {
            let seen = Arc::clone(&seen);
            Rule::function(move |neighborhood, index| {
                seen.lock().unwrap().push((index, neighborhood.to_vec()));
                1
            })
        };
        step(&[0, 0, 1, 0, 0], 1, &recorder).unwrap();
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (0, vec![0, 0, 0]),
                (1, vec![0, 0, 1]),
                (2, vec![0, 1, 0]),
                (3, vec![1, 0, 0]),
                (4, vec![0, 0, 0]),
            ]
        );
    }

    #[test]
    fn test_shape() {
        for width in [1, 2, 5, 16] {
            for steps in [1, 2, 10] {
                for radius in [0, 1, 3] {
                    let initial = vec![0; width];
                    let grid = evolve(&initial, steps, &Rule::Nks(0), radius).unwrap();
                    assert_eq!(grid.generations(), steps);
                    assert_eq!(grid.width(), width);
                    assert_eq!(grid.rows().count(), steps);
                    assert!(grid.rows().all(|row| row.len() == width));
                    assert_eq!(grid.cells().len(), width * steps);
                }
            }
        }

        let empty = evolve(&[0, 1, 0], 0, &Rule::Nks(30), 1).unwrap();
        assert_eq!(empty.generations(), 0);
        assert_eq!(empty.row(0), None);

        let no_cells = evolve(&[], 3, &Rule::Nks(30), 1).unwrap();
        assert_eq!(no_cells.generations(), 3);
        assert_eq!(no_cells.row(2), Some(&[][..]));
    }

    #[test]
    fn test_rule_30() {
        let grid = evolve(&[0, 0, 0, 1, 0, 0, 0], 4, &Rule::Nks(30), 1).unwrap();
        assert_eq!(
            grid.rows().collect::<Vec<_>>(),
            vec![
                &[0, 0, 0, 1, 0, 0, 0][..],
                &[0, 0, 1, 1, 1, 0, 0][..],
                &[0, 1, 1, 0, 0, 1, 0][..],
                &[1, 1, 0, 1, 1, 1, 1][..],
            ]
        );
        assert_eq!(grid.get(3, 0), Some(1));
        assert_eq!(grid.get(3, 7), None);
        assert_eq!(grid.get(4, 0), None);
    }

    #[test]
    fn test_wrap_around_evolution() {
        // Rule 170 shifts every cell one step to the left.
        let grid = evolve(&[1, 0, 0, 0], 5, &Rule::Nks(170), 1).unwrap();
        assert_eq!(grid.row(1).unwrap(), &[0, 0, 0, 1]);
        assert_eq!(grid.row(4).unwrap(), &[1, 0, 0, 0]);
    }

    #[test]
    fn test_totalistic_evolution() {
        let rule = Rule::Totalistic {
            states: 3,
            number: 777,
        };
        let grid = evolve(&[0, 0, 2, 0, 0], 2, &rule, 1).unwrap();
        // Sums are 0, 2, 2, 2, 0.
        assert_eq!(grid.row(1).unwrap(), &[0, 2, 2, 2, 0]);
    }

    #[test]
    fn test_missing_neighborhood() {
        let table: RuleTable = [("000", 0), ("001", 1), ("010", 1), ("100", 1)]
            .into_iter()
            .collect();
        let rule = Rule::from(table);

        assert!(evolve(&[0, 0, 1, 0, 0], 2, &rule, 1).is_ok());
        assert_eq!(
            evolve(&[0, 0, 1, 0, 0], 3, &rule, 1),
            Err(RuleError::MissingNeighborhood("011".to_string()))
        );
    }

    #[test]
    fn test_index_is_passed() {
        let rule = Rule::function(|_, index| (index % 3) as State);
        let grid = evolve(&[0; 6], 2, &rule, 1).unwrap();
        assert_eq!(grid.row(1).unwrap(), &[0, 1, 2, 0, 1, 2]);
    }
}
