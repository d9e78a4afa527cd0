//! Turn a cost matrix into a tagged patch.

use super::align::CostMatrix;
use crate::model::{Patch, PatchLine};
use serde::{Deserialize, Serialize};

/// How the formatter walks the cost matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BacktraceMode {
    /// Output-compatible walk used by earlier review tooling.
    ///
    /// Walks forward from `(1, 1)` while both indices are strictly below the
    /// sequence lengths and detects matches by cost equality. Known quirks
    /// kept for output stability: the last line pair is never matched, so
    /// identical trailing lines come out as a removal plus an addition, and
    /// an unequal pair can be tagged as context when costs happen to tie.
    #[default]
    Compatible,

    /// Backtrace from the end of both sequences toward the origin.
    ///
    /// Matches are detected by comparing line values, so context lines always
    /// occur in both inputs and every line of both inputs is consumed.
    Exact,
}

/// Build the patch for `left` against `right` from a filled cost matrix.
///
/// Equivalent to [`format_patch_with`] in [`BacktraceMode::Compatible`].
pub fn format_patch<L, R>(left: &[L], right: &[R], cost: &CostMatrix, file_path: &str) -> Patch
where
    L: AsRef<str>,
    R: AsRef<str>,
{
    format_patch_with(left, right, cost, file_path, BacktraceMode::Compatible)
}

/// Build the patch for `left` against `right` using the given walk.
///
/// Deletions win only when strictly cheaper than insertions; ties favour
/// insertion. `cost` must come from [`align`](super::align) on the same
/// sequences.
pub fn format_patch_with<L, R>(
    left: &[L],
    right: &[R],
    cost: &CostMatrix,
    file_path: &str,
    mode: BacktraceMode,
) -> Patch
where
    L: AsRef<str>,
    R: AsRef<str>,
{
    debug_assert_eq!(cost.rows(), left.len() + 1);
    debug_assert_eq!(cost.cols(), right.len() + 1);

    let lines = match mode {
        BacktraceMode::Compatible => walk_forward(left, right, cost),
        BacktraceMode::Exact => walk_backward(left, right, cost),
    };
    Patch::with_lines(file_path, lines)
}

fn walk_forward<L, R>(left: &[L], right: &[R], cost: &CostMatrix) -> Vec<PatchLine>
where
    L: AsRef<str>,
    R: AsRef<str>,
{
    let mut lines = Vec::with_capacity(left.len() + right.len());
    let (mut l, mut r) = (1, 1);

    while l < left.len() && r < right.len() {
        if cost.get(l, r) == cost.get(l - 1, r - 1) {
            lines.push(PatchLine::Context(left[l - 1].as_ref().to_string()));
            l += 1;
            r += 1;
        } else if cost.get(l - 1, r) < cost.get(l, r - 1) {
            lines.push(PatchLine::Removed(left[l - 1].as_ref().to_string()));
            l += 1;
        } else {
            lines.push(PatchLine::Added(right[r - 1].as_ref().to_string()));
            r += 1;
        }
    }

    lines.extend(
        left[l - 1..]
            .iter()
            .map(|line| PatchLine::Removed(line.as_ref().to_string())),
    );
    lines.extend(
        right[r - 1..]
            .iter()
            .map(|line| PatchLine::Added(line.as_ref().to_string())),
    );
    lines
}

fn walk_backward<L, R>(left: &[L], right: &[R], cost: &CostMatrix) -> Vec<PatchLine>
where
    L: AsRef<str>,
    R: AsRef<str>,
{
    // Collected in reverse; an addition is pushed before its paired removal
    // so the final order lists removals first.
    let mut reversed = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (left.len(), right.len());

    while i > 0 && j > 0 {
        let left_line = left[i - 1].as_ref();
        let right_line = right[j - 1].as_ref();

        if left_line == right_line {
            reversed.push(PatchLine::Context(left_line.to_string()));
            i -= 1;
            j -= 1;
            continue;
        }

        let deletion = cost.get(i - 1, j);
        let insertion = cost.get(i, j - 1);
        let substitution = cost.get(i - 1, j - 1);

        if substitution <= deletion && substitution <= insertion {
            reversed.push(PatchLine::Added(right_line.to_string()));
            reversed.push(PatchLine::Removed(left_line.to_string()));
            i -= 1;
            j -= 1;
        } else if deletion < insertion {
            reversed.push(PatchLine::Removed(left_line.to_string()));
            i -= 1;
        } else {
            reversed.push(PatchLine::Added(right_line.to_string()));
            j -= 1;
        }
    }

    reversed.extend(
        right[..j]
            .iter()
            .rev()
            .map(|line| PatchLine::Added(line.as_ref().to_string())),
    );
    reversed.extend(
        left[..i]
            .iter()
            .rev()
            .map(|line| PatchLine::Removed(line.as_ref().to_string())),
    );

    reversed.reverse();
    reversed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::align;
    use pretty_assertions::assert_eq;

    fn ctx(text: &str) -> PatchLine {
        PatchLine::Context(text.to_string())
    }

    fn del(text: &str) -> PatchLine {
        PatchLine::Removed(text.to_string())
    }

    fn add(text: &str) -> PatchLine {
        PatchLine::Added(text.to_string())
    }

    fn diff(left: &[&str], right: &[&str], mode: BacktraceMode) -> Patch {
        let cost = align(left, right);
        format_patch_with(left, right, &cost, "file.txt", mode)
    }

    /// Small deterministic generator for property checks.
    fn pseudo_random_lines(seed: u64, len: usize) -> Vec<String> {
        let mut state = seed;
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                format!("line {}", (state >> 33) % 4)
            })
            .collect()
    }

    #[test]
    fn test_header_is_file_path() {
        let patch = diff(&["a"], &["a"], BacktraceMode::Compatible);
        assert_eq!(patch.file_path, "file.txt");
    }

    #[test]
    fn test_compatible_single_substitution_fixture() {
        let patch = diff(&["a", "b", "c"], &["a", "x", "c"], BacktraceMode::Compatible);
        assert_eq!(
            patch.lines,
            vec![ctx("a"), add("x"), del("b"), del("c"), add("c")]
        );
    }

    #[test]
    fn test_compatible_identity_drains_last_pair() {
        let patch = diff(&["a", "b", "c"], &["a", "b", "c"], BacktraceMode::Compatible);
        assert_eq!(patch.lines, vec![ctx("a"), ctx("b"), del("c"), add("c")]);

        let patch = diff(&["only"], &["only"], BacktraceMode::Compatible);
        assert_eq!(patch.lines, vec![del("only"), add("only")]);
    }

    #[test]
    fn test_compatible_tie_favours_insertion() {
        let patch = diff(&["x", "a"], &["a", "y"], BacktraceMode::Compatible);
        assert_eq!(patch.lines, vec![add("a"), del("x"), del("a"), add("y")]);
    }

    #[test]
    fn test_default_mode_is_compatible() {
        let left = ["a", "b", "c"];
        let right = ["a", "x", "c"];
        let cost = align(&left, &right);
        assert_eq!(BacktraceMode::default(), BacktraceMode::Compatible);
        assert_eq!(
            format_patch(&left, &right, &cost, "file.txt"),
            format_patch_with(&left, &right, &cost, "file.txt", BacktraceMode::Compatible)
        );
    }

    #[test]
    fn test_exact_single_substitution() {
        let patch = diff(&["a", "b", "c"], &["a", "x", "c"], BacktraceMode::Exact);
        assert_eq!(patch.lines, vec![ctx("a"), del("b"), add("x"), ctx("c")]);
    }

    #[test]
    fn test_exact_shifted_lines() {
        let patch = diff(&["x", "a"], &["a", "y"], BacktraceMode::Exact);
        assert_eq!(patch.lines, vec![del("x"), ctx("a"), add("y")]);
    }

    #[test]
    fn test_total_rewrite_both_modes() {
        for mode in [BacktraceMode::Compatible, BacktraceMode::Exact] {
            let patch = diff(&[], &["x", "y", "z"], mode);
            assert_eq!(patch.lines, vec![add("x"), add("y"), add("z")]);

            let patch = diff(&["x", "y", "z"], &[], mode);
            assert_eq!(patch.lines, vec![del("x"), del("y"), del("z")]);

            let patch = diff(&[], &[], mode);
            assert!(patch.lines.is_empty());
        }
    }

    #[test]
    fn test_exact_identity() {
        for seed in 0..20 {
            let lines = pseudo_random_lines(seed, (seed as usize) % 9);
            let cost = align(&lines, &lines);
            let patch = format_patch_with(&lines, &lines, &cost, "p", BacktraceMode::Exact);
            assert!(!patch.has_changes(), "seed {} produced changes", seed);
            assert_eq!(patch.lines.len(), lines.len());
        }
    }

    #[test]
    fn test_exact_reconstruction() {
        for seed in 0..50 {
            let left = pseudo_random_lines(seed, (seed as usize * 7) % 11);
            let right = pseudo_random_lines(seed + 1000, (seed as usize * 5) % 13);
            let cost = align(&left, &right);
            let patch = format_patch_with(&left, &right, &cost, "p", BacktraceMode::Exact);

            assert_eq!(patch.left_lines().collect::<Vec<_>>(), left, "seed {}", seed);
            assert_eq!(patch.right_lines().collect::<Vec<_>>(), right, "seed {}", seed);
        }
    }

    #[test]
    fn test_compatible_reconstruction_fixtures() {
        let fixtures: [(&[&str], &[&str]); 4] = [
            (&["a", "b", "c"], &["a", "x", "c"]),
            (&["a", "b", "c"], &["a", "b", "c", "d"]),
            (&["fn main() {", "}"], &["fn main() {", "    run();", "}"]),
            (&["x", "a"], &["a", "y"]),
        ];

        for (left, right) in fixtures {
            let patch = diff(left, right, BacktraceMode::Compatible);
            assert_eq!(patch.left_lines().collect::<Vec<_>>(), left);
            assert_eq!(patch.right_lines().collect::<Vec<_>>(), right);
        }
    }
}
