/// Runs a closure exactly once when the guard is consumed or dropped.
///
/// The closure also runs while unwinding, which is what makes it usable as a
/// finalize phase.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use errno_rail::contract::Finally;
///
/// let ran = Cell::new(0);
/// {
///     let _guard = Finally::new(|| ran.set(ran.get() + 1));
/// }
/// assert_eq!(ran.get(), 1);
/// ```
#[must_use = "the closure runs as soon as an unbound guard is dropped"]
pub struct Finally<F: FnOnce()> {
    action: Option<F>,
}

impl<F: FnOnce()> Finally<F> {
    /// Arms a guard that runs `action` once, at the latest when dropped.
    #[inline]
    pub fn new(action: F) -> Self {
        Self { action: Some(action) }
    }

    /// Runs the closure now instead of at scope exit.
    #[inline]
    pub fn run(mut self) {
        if let Some(action) = self.action.take() {
            action();
        }
    }

    /// Disarms the guard; the closure never runs.
    #[inline]
    pub fn cancel(mut self) {
        self.action = None;
    }
}

impl<F: FnOnce()> Drop for Finally<F> {
    fn drop(&mut self) {
        if let Some(action) = self.action.take() {
            action();
        }
    }
}

/// Shorthand for [`Finally::new`].
#[inline]
pub fn defer<F: FnOnce()>(action: F) -> Finally<F> {
    Finally::new(action)
}
