//! Indentation depth tracking for a single translation pass.

/// Default number of spaces per nesting level.
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Nesting depth shared by the statement translators of one pass.
///
/// Every block opener calls [`increase`](Self::increase) before translating
/// its children and [`decrease`](Self::decrease) after, so the depth is back
/// to its starting value once the block is done.
#[derive(Debug, Clone)]
pub struct Indentation {
    depth: usize,
    width: usize,
}

impl Indentation {
    pub fn new(width: usize) -> Self {
        Self { depth: 0, width }
    }

    pub fn increase(&mut self) {
        self.depth += 1;
    }

    pub fn decrease(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whitespace for the current depth.
    pub fn prefix(&self) -> String {
        " ".repeat(self.depth * self.width)
    }
}

impl Default for Indentation {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_tracks_depth() {
        let mut indent = Indentation::default();
        assert_eq!(indent.prefix(), "");
        indent.increase();
        indent.increase();
        assert_eq!(indent.prefix(), "        ");
        indent.decrease();
        assert_eq!(indent.prefix(), "    ");
        assert_eq!(indent.depth(), 1);
    }

    #[test]
    fn test_decrease_saturates() {
        let mut indent = Indentation::new(2);
        indent.decrease();
        assert_eq!(indent.depth(), 0);
        indent.increase();
        assert_eq!(indent.prefix(), "  ");
    }
}
