//! Per-direction growth enables.

/// Which directions growth may travel in.
///
/// A growth step from `p` to `p + (dx, dy)` is permitted when every
/// non-zero component points in an enabled direction. On an 8-connected
/// lattice a diagonal therefore needs both of its components enabled.
/// Rows grow downward: `up` is `dy = -1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Directions {
    /// Allow steps toward `y - 1`.
    pub up: bool,
    /// Allow steps toward `y + 1`.
    pub down: bool,
    /// Allow steps toward `x - 1`.
    pub left: bool,
    /// Allow steps toward `x + 1`.
    pub right: bool,
}

impl Directions {
    /// Every direction enabled.
    pub const ALL: Self = Self {
        up: true,
        down: true,
        left: true,
        right: true,
    };

    /// Explicit enables in `up, down, left, right` order.
    pub const fn new(up: bool, down: bool, left: bool, right: bool) -> Self {
        Self {
            up,
            down,
            left,
            right,
        }
    }

    /// Whether the step `(dx, dy)` is permitted.
    pub fn allows(&self, dx: i32, dy: i32) -> bool {
        (dy >= 0 || self.up)
            && (dy <= 0 || self.down)
            && (dx >= 0 || self.left)
            && (dx <= 0 || self.right)
    }

    /// `true` if no direction is enabled.
    pub fn is_empty(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }
}

impl Default for Directions {
    fn default() -> Self {
        Self::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_allows_everything() {
        for dx in -1..=1 {
            for dy in -1..=1 {
                assert!(Directions::ALL.allows(dx, dy));
            }
        }
    }

    #[test]
    fn down_only() {
        let d = Directions::new(false, true, false, false);
        assert!(d.allows(0, 1));
        assert!(!d.allows(0, -1));
        assert!(!d.allows(1, 0));
        assert!(!d.allows(1, 1));
    }

    #[test]
    fn diagonal_needs_both_components() {
        let d = Directions::new(false, true, false, true);
        assert!(d.allows(1, 1));
        assert!(!d.allows(-1, 1));
    }
}
