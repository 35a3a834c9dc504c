/// Default suppression window for edge notifications.
pub const EDGE_THROTTLE_MS: u64 = 50;

/// Leading-edge throttle for one notification channel.
///
/// The first call fires and opens a suppression window of `window_ms`; calls inside the window
/// are dropped (there is no trailing call). The window cannot be shortened once opened, only
/// cleared with [`EdgeThrottle::cancel`] at teardown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeThrottle {
    window_ms: u64,
    suppressed_until: Option<u64>,
}

impl EdgeThrottle {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            suppressed_until: None,
        }
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    pub fn is_suppressed(&self, now_ms: u64) -> bool {
        self.suppressed_until.is_some_and(|until| now_ms < until)
    }

    /// Returns `true` when the notification should fire at `now_ms`.
    pub fn try_fire(&mut self, now_ms: u64) -> bool {
        if self.is_suppressed(now_ms) {
            return false;
        }
        self.suppressed_until = Some(now_ms.saturating_add(self.window_ms));
        true
    }

    pub fn cancel(&mut self) {
        self.suppressed_until = None;
    }
}

impl Default for EdgeThrottle {
    fn default() -> Self {
        Self::new(EDGE_THROTTLE_MS)
    }
}
