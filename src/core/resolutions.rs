//! Discrete resolution ladder used for zoom stepping and clamping.

use crate::{
    core::constants::{WEB_MERCATOR_LEVELS, WEB_MERCATOR_MAX_RESOLUTION},
    MapError, Result,
};
use serde::{Deserialize, Serialize};

/// Ordered set of resolutions the view snaps to when stepping in or out.
///
/// Entries are strictly increasing: index 0 is the most zoomed-in
/// resolution, the last entry the coarsest. An empty ladder is allowed; it
/// turns stepping into a no-op and clamping into the identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct ResolutionLadder {
    resolutions: Vec<f64>,
}

impl ResolutionLadder {
    /// Creates a ladder from strictly increasing, finite, positive values
    pub fn new(resolutions: Vec<f64>) -> Result<Self> {
        if let Some(bad) = resolutions.iter().find(|r| !r.is_finite() || **r <= 0.0) {
            return Err(MapError::InvalidResolutions(format!(
                "resolution {} is not a positive finite number",
                bad
            )));
        }
        if let Some(pair) = resolutions.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(MapError::InvalidResolutions(format!(
                "resolutions must be strictly increasing, found {} before {}",
                pair[0], pair[1]
            )));
        }
        Ok(Self { resolutions })
    }

    /// Creates a ladder from values in any order, dropping duplicates
    pub fn from_unsorted(mut resolutions: Vec<f64>) -> Result<Self> {
        resolutions.sort_by(|a, b| a.total_cmp(b));
        resolutions.dedup();
        Self::new(resolutions)
    }

    /// `levels` resolutions halving from `max_resolution` downward
    pub fn powers_of_two(max_resolution: f64, levels: usize) -> Result<Self> {
        let resolutions = (0..levels)
            .rev()
            .map(|level| max_resolution / 2_f64.powi(level as i32))
            .collect();
        Self::new(resolutions)
    }

    /// The usual spherical mercator tile pyramid, zoom levels 0..=19
    pub fn web_mercator() -> Self {
        Self {
            resolutions: (0..WEB_MERCATOR_LEVELS)
                .rev()
                .map(|level| WEB_MERCATOR_MAX_RESOLUTION / 2_f64.powi(level as i32))
                .collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.resolutions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.resolutions.len()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.resolutions
    }

    pub fn min(&self) -> Option<f64> {
        self.resolutions.first().copied()
    }

    pub fn max(&self) -> Option<f64> {
        self.resolutions.last().copied()
    }

    /// Next finer step: the largest entry strictly below `current`, or the
    /// minimum when nothing is below it
    pub fn zoom_in(&self, current: f64) -> f64 {
        let Some(min) = self.min() else {
            return current;
        };
        self.resolutions
            .iter()
            .rev()
            .copied()
            .find(|r| *r < current)
            .unwrap_or(min)
    }

    /// Next coarser step: the smallest entry strictly above `current`, or
    /// the maximum when nothing is above it
    pub fn zoom_out(&self, current: f64) -> f64 {
        let Some(max) = self.max() else {
            return current;
        };
        self.resolutions
            .iter()
            .copied()
            .find(|r| *r > current)
            .unwrap_or(max)
    }

    /// Clamps `resolution` into the ladder's range
    pub fn clip_to_extremes(&self, resolution: f64) -> f64 {
        match (self.min(), self.max()) {
            (Some(min), Some(max)) => resolution.clamp(min, max),
            _ => resolution,
        }
    }
}

impl TryFrom<Vec<f64>> for ResolutionLadder {
    type Error = MapError;

    fn try_from(resolutions: Vec<f64>) -> Result<Self> {
        Self::new(resolutions)
    }
}

impl From<ResolutionLadder> for Vec<f64> {
    fn from(ladder: ResolutionLadder) -> Self {
        ladder.resolutions
    }
}

/// Center and resolution that fit the box spanned by two world corners into
/// a view of the given pixel size.
///
/// Returns `(center_x, center_y, resolution)`. The larger of the two
/// axis ratios wins so the whole box stays visible. Callers must reject
/// boxes with zero width or height first.
pub fn derive_from_box(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    view_width: f64,
    view_height: f64,
) -> (f64, f64, f64) {
    let center_x = (x1 + x2) / 2.0;
    let center_y = (y1 + y2) / 2.0;
    let resolution = ((x2 - x1).abs() / view_width).max((y2 - y1).abs() / view_height);
    (center_x, center_y, resolution)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ladder() -> ResolutionLadder {
        ResolutionLadder::new(vec![1.0, 2.0, 4.0, 8.0, 16.0]).unwrap()
    }

    #[test]
    fn test_step_from_ladder_value() {
        let ladder = ladder();
        assert_eq!(ladder.zoom_in(4.0), 2.0);
        assert_eq!(ladder.zoom_out(4.0), 8.0);
    }

    #[test]
    fn test_step_from_off_ladder_value() {
        let ladder = ladder();
        assert_eq!(ladder.zoom_in(5.0), 4.0);
        assert_eq!(ladder.zoom_out(5.0), 8.0);
        assert_eq!(ladder.zoom_in(0.3), 1.0);
        assert_eq!(ladder.zoom_out(100.0), 16.0);
    }

    #[test]
    fn test_repeated_zoom_in_stops_at_minimum() {
        let ladder = ladder();
        let mut resolution = 16.0;
        for _ in 0..10 {
            resolution = ladder.zoom_in(resolution);
            assert!(resolution >= 1.0);
        }
        assert_eq!(resolution, 1.0);
    }

    #[test]
    fn test_zoom_in_after_zoom_out_returns() {
        let ladder = ladder();
        for r in [1.0, 2.0, 4.0, 8.0] {
            assert_eq!(ladder.zoom_in(ladder.zoom_out(r)), r);
        }
        // Off-ladder input lands on the adjacent step below the zoomed-out value
        assert_eq!(ladder.zoom_in(ladder.zoom_out(3.0)), 2.0);
    }

    #[test]
    fn test_clip_is_idempotent() {
        let ladder = ladder();
        for r in [0.01, 1.0, 3.3, 16.0, 1e9] {
            let once = ladder.clip_to_extremes(r);
            assert_eq!(ladder.clip_to_extremes(once), once);
            assert!((1.0..=16.0).contains(&once));
        }
    }

    #[test]
    fn test_empty_ladder_is_noop() {
        let ladder = ResolutionLadder::empty();
        assert_eq!(ladder.zoom_in(3.0), 3.0);
        assert_eq!(ladder.zoom_out(3.0), 3.0);
        assert_eq!(ladder.clip_to_extremes(3.0), 3.0);
    }

    #[test]
    fn test_rejects_unordered_and_invalid() {
        assert!(ResolutionLadder::new(vec![2.0, 1.0]).is_err());
        assert!(ResolutionLadder::new(vec![1.0, 1.0]).is_err());
        assert!(ResolutionLadder::new(vec![0.0, 1.0]).is_err());
        assert!(ResolutionLadder::new(vec![1.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_from_unsorted() {
        let ladder = ResolutionLadder::from_unsorted(vec![8.0, 1.0, 4.0, 1.0]).unwrap();
        assert_eq!(ladder.as_slice(), &[1.0, 4.0, 8.0]);
    }

    #[test]
    fn test_powers_of_two() {
        let ladder = ResolutionLadder::powers_of_two(16.0, 5).unwrap();
        assert_eq!(ladder, self::ladder());
    }

    #[test]
    fn test_web_mercator_ladder() {
        let ladder = ResolutionLadder::web_mercator();
        assert_eq!(ladder.len(), 20);
        assert_eq!(ladder.max(), Some(WEB_MERCATOR_MAX_RESOLUTION));
        assert!(ResolutionLadder::new(ladder.as_slice().to_vec()).is_ok());
    }

    #[test]
    fn test_deserialize_validates() {
        let ladder: ResolutionLadder = serde_json::from_str("[1.0, 2.0]").unwrap();
        assert_eq!(ladder.len(), 2);
        assert!(serde_json::from_str::<ResolutionLadder>("[2.0, 1.0]").is_err());
    }

    #[test]
    fn test_derive_from_box() {
        let (x, y, resolution) = derive_from_box(0.0, 0.0, 100.0, 50.0, 200.0, 200.0);
        assert_eq!((x, y), (50.0, 25.0));
        assert_eq!(resolution, 0.5);
    }

    #[test]
    fn test_derive_from_box_order_independent() {
        let a = derive_from_box(-3.0, 7.0, 41.0, -9.5, 640.0, 480.0);
        let b = derive_from_box(41.0, -9.5, -3.0, 7.0, 640.0, 480.0);
        assert_eq!(a, b);
    }
}
