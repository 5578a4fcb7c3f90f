use crate::{
    animation::easing::{Easing, EasingType},
    core::geo::Point,
    traits::Lerp,
};
use std::{fmt, sync::Arc, time::Duration};

/// One step of a running resolution tween
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    /// Interpolated resolution for this tick
    pub resolution: f64,
    /// Screen point the zoom is anchored at
    pub anchor: Point,
    /// True on the final frame, which carries the exact end resolution
    pub finished: bool,
}

#[derive(Debug, Clone, Copy)]
struct ZoomTween {
    begin: f64,
    end: f64,
    anchor: Point,
    elapsed: Duration,
    duration: Duration,
    paused: bool,
}

/// Cooperative, restartable resolution tween.
///
/// Nothing happens on its own: the owner calls [`ZoomAnimator::advance`]
/// once per frame with the time since the previous frame. Starting a new
/// tween replaces the running one.
#[derive(Clone)]
pub struct ZoomAnimator {
    current: Option<ZoomTween>,
    easing: Arc<dyn Easing>,
}

impl ZoomAnimator {
    pub fn new() -> Self {
        Self::with_easing(EasingType::default())
    }

    pub fn with_easing<E: Easing + 'static>(easing: E) -> Self {
        Self {
            current: None,
            easing: Arc::new(easing),
        }
    }

    pub fn set_easing<E: Easing + 'static>(&mut self, easing: E) {
        self.easing = Arc::new(easing);
    }

    /// Starts tweening from `begin` to `end`, dropping whatever was running
    pub fn start(&mut self, begin: f64, end: f64, duration: Duration, anchor: Point) {
        if self.current.is_some() {
            log::trace!("Superseding running zoom animation");
        }
        log::debug!(
            "Zoom animation {:.6} -> {:.6} over {:?}",
            begin,
            end,
            duration
        );
        self.current = Some(ZoomTween {
            begin,
            end,
            anchor,
            elapsed: Duration::ZERO,
            duration,
            paused: false,
        });
    }

    /// Moves the tween forward by `delta` and returns the frame to apply.
    ///
    /// A paused tween resumes on this call without consuming `delta`.
    pub fn advance(&mut self, delta: Duration) -> Option<AnimationFrame> {
        let tween = self.current.as_mut()?;

        if tween.paused {
            tween.paused = false;
            return None;
        }

        tween.elapsed = tween.elapsed.saturating_add(delta);
        if tween.elapsed >= tween.duration {
            let frame = AnimationFrame {
                resolution: tween.end,
                anchor: tween.anchor,
                finished: true,
            };
            self.current = None;
            return Some(frame);
        }

        let t = tween.elapsed.as_secs_f64() / tween.duration.as_secs_f64();
        let progress = self.easing.ease(t);
        Some(AnimationFrame {
            resolution: tween.begin.lerp(&tween.end, progress),
            anchor: tween.anchor,
            finished: false,
        })
    }

    /// Freezes the running tween; the next `advance` resumes it
    pub fn pause(&mut self) {
        if let Some(tween) = self.current.as_mut() {
            tween.paused = true;
        }
    }

    pub fn stop(&mut self) {
        self.current = None;
    }

    pub fn is_animating(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.current.map(|tween| tween.paused).unwrap_or(false)
    }

    /// Resolution the running tween is heading for
    pub fn target(&self) -> Option<f64> {
        self.current.map(|tween| tween.end)
    }
}

impl Default for ZoomAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ZoomAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoomAnimator")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
