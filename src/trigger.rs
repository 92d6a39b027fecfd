//! One-shot latch guarding the celebration sequence.

/// Fires its celebration at most once for the lifetime of the page.
///
/// Both the startup check and every countdown tick after expiry call
/// [`CelebrationLatch::fire`]; only the first call runs the closure.
#[derive(Debug, Default)]
pub struct CelebrationLatch {
    has_fired: bool,
}

impl CelebrationLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_fired(&self) -> bool {
        self.has_fired
    }

    /// Run `celebrate` if the latch has not fired yet. Returns whether it ran.
    pub fn fire(&mut self, celebrate: impl FnOnce()) -> bool {
        if self.has_fired {
            return false;
        }
        self.has_fired = true;
        celebrate();
        true
    }
}
