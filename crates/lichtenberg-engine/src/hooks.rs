//! Early-termination callbacks for [`Simulator::simulate`](crate::Simulator::simulate).

use lichtenberg_core::CellGrid;
use std::fmt;

/// Called after each break with the broken cell's `(x, y)`.
/// Returning `true` stops the run.
pub type BreakHook<'a> = Box<dyn FnMut(i32, i32) -> bool + 'a>;

/// Called at the end of each loop with `(loop, max_loop, grid)`.
/// Returning `true` stops the run.
pub type LoopHook<'a> = Box<dyn FnMut(u32, u32, &CellGrid) -> bool + 'a>;

/// Optional callbacks run synchronously inside the growth loop.
///
/// # Examples
///
/// ```
/// use lichtenberg_engine::Hooks;
///
/// // Stop as soon as anything reaches the bottom row of a 64-row grid.
/// let hooks = Hooks::new().on_break(|_x, y| y == 63);
/// # let _ = hooks;
/// ```
#[derive(Default)]
pub struct Hooks<'a> {
    on_break: Option<BreakHook<'a>>,
    on_loop: Option<LoopHook<'a>>,
}

impl<'a> Hooks<'a> {
    /// No callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-break callback.
    pub fn on_break(mut self, f: impl FnMut(i32, i32) -> bool + 'a) -> Self {
        self.on_break = Some(Box::new(f));
        self
    }

    /// Set the per-loop callback.
    pub fn on_loop(mut self, f: impl FnMut(u32, u32, &CellGrid) -> bool + 'a) -> Self {
        self.on_loop = Some(Box::new(f));
        self
    }

    pub(crate) fn fire_break(&mut self, x: i32, y: i32) -> bool {
        self.on_break.as_mut().is_some_and(|f| f(x, y))
    }

    pub(crate) fn fire_loop(&mut self, current: u32, max_loop: u32, grid: &CellGrid) -> bool {
        self.on_loop
            .as_mut()
            .is_some_and(|f| f(current, max_loop, grid))
    }
}

impl fmt::Debug for Hooks<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("on_break", &self.on_break.is_some())
            .field("on_loop", &self.on_loop.is_some())
            .finish()
    }
}
