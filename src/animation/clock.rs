use instant::Instant;
use std::time::Duration;

/// Measures the time between render ticks for hosts that don't track it
/// themselves. Works on wasm through `instant`.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    max_delta: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: None,
            max_delta: Duration::from_millis(250),
        }
    }

    /// Caps the delta reported after long stalls (window hidden, debugger)
    pub fn with_max_delta(max_delta: Duration) -> Self {
        Self {
            last: None,
            max_delta,
        }
    }

    /// Time since the previous call; zero on the first call
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let delta = self
            .last
            .map(|last| now.duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last = Some(now);
        delta.min(self.max_delta)
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
