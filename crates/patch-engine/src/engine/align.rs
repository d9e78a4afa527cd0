//! Line-level edit distance.

/// Minimum line edits between prefixes of two sequences.
///
/// `get(i, j)` is the number of insert/delete/substitute operations needed
/// to turn the first `i` lines of the left sequence into the first `j` lines
/// of the right one. The first row and column are seeded with zero, so
/// unmatched lines at the matrix edge are not charged here; the formatter's
/// drain step emits them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<usize>,
}

impl CostMatrix {
    fn zeroed(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    /// Number of rows (`len(left) + 1`).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (`len(right) + 1`).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cost at row `i`, column `j`.
    ///
    /// # Panics
    ///
    /// Panics when `i >= rows()` or `j >= cols()`.
    pub fn get(&self, i: usize, j: usize) -> usize {
        assert!(i < self.rows && j < self.cols, "cost index out of bounds");
        self.cells[i * self.cols + j]
    }

    /// Edit distance between the full sequences.
    pub fn distance(&self) -> usize {
        self.get(self.rows - 1, self.cols - 1)
    }

    fn set(&mut self, i: usize, j: usize, value: usize) {
        self.cells[i * self.cols + j] = value;
    }
}

/// Fill the cost matrix for `left` against `right`.
///
/// Lines are atomic tokens: equal lines match for free, any other step
/// (substitution, deletion, insertion) costs one. Runs in
/// `O(len(left) * len(right))` time and memory.
pub fn align<L, R>(left: &[L], right: &[R]) -> CostMatrix
where
    L: AsRef<str>,
    R: AsRef<str>,
{
    let mut cost = CostMatrix::zeroed(left.len() + 1, right.len() + 1);

    for (i, left_line) in left.iter().enumerate() {
        for (j, right_line) in right.iter().enumerate() {
            let value = if left_line.as_ref() == right_line.as_ref() {
                cost.get(i, j)
            } else {
                1 + cost.get(i, j + 1).min(cost.get(i + 1, j)).min(cost.get(i, j))
            };
            cost.set(i + 1, j + 1, value);
        }
    }

    cost
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows(cost: &CostMatrix) -> Vec<Vec<usize>> {
        (0..cost.rows())
            .map(|i| (0..cost.cols()).map(|j| cost.get(i, j)).collect())
            .collect()
    }

    #[test]
    fn test_dimensions() {
        let cost = align(&["a", "b"], &["a", "b", "c"]);
        assert_eq!(cost.rows(), 3);
        assert_eq!(cost.cols(), 4);
    }

    #[test]
    fn test_empty_inputs() {
        let cost = align::<&str, &str>(&[], &[]);
        assert_eq!(rows(&cost), vec![vec![0]]);
        assert_eq!(cost.distance(), 0);
    }

    #[test]
    fn test_boundary_is_zero_seeded() {
        let cost = align(&["a", "b", "c"], &["x"]);
        for i in 0..cost.rows() {
            assert_eq!(cost.get(i, 0), 0);
        }
        assert_eq!(cost.get(0, 1), 0);
    }

    #[test]
    fn test_identical_sequences_cost_nothing() {
        let lines = ["fn main() {", "    run();", "}"];
        let cost = align(&lines, &lines);
        assert_eq!(cost.distance(), 0);
    }

    #[test]
    fn test_single_substitution_matrix() {
        let cost = align(&["a", "b", "c"], &["a", "x", "c"]);
        assert_eq!(
            rows(&cost),
            vec![
                vec![0, 0, 0, 0],
                vec![0, 0, 1, 1],
                vec![0, 1, 1, 2],
                vec![0, 1, 2, 1],
            ]
        );
    }

    #[test]
    #[should_panic(expected = "cost index out of bounds")]
    fn test_get_out_of_bounds() {
        let cost = align(&["a"], &["b"]);
        cost.get(2, 0);
    }
}
