//! Plain-text rendering of patches.

use crate::model::{Patch, PatchLine};
use std::fmt;

impl fmt::Display for PatchLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind().prefix(), self.text())
    }
}

impl fmt::Display for Patch {
    /// Header as a bare path line, then one prefixed line per entry.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_path)?;
        for line in &self.lines {
            write!(f, "\n{}", line)?;
        }
        Ok(())
    }
}

/// Render several patches, one after another, separated by a newline.
pub fn render_patches<'a>(patches: impl IntoIterator<Item = &'a Patch>) -> String {
    patches
        .into_iter()
        .map(Patch::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_patch() {
        let patch = Patch::with_lines(
            "src/lib.rs",
            vec![
                PatchLine::Context("a".into()),
                PatchLine::Removed("b".into()),
                PatchLine::Added("x".into()),
            ],
        );
        assert_eq!(patch.to_string(), "src/lib.rs\n a\n- b\n+ x");
    }

    #[test]
    fn test_render_header_only() {
        assert_eq!(Patch::new("empty.txt").to_string(), "empty.txt");
    }

    #[test]
    fn test_render_patches_joined() {
        let first = Patch::with_lines("a.txt", vec![PatchLine::Added("1".into())]);
        let second = Patch::with_lines("b.txt", vec![PatchLine::Removed("2".into())]);
        assert_eq!(
            render_patches([&first, &second]),
            "a.txt\n+ 1\nb.txt\n- 2"
        );
        assert_eq!(render_patches(Vec::<&Patch>::new()), "");
    }
}
