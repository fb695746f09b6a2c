//! Horizontal node positions across a half-lane section.

use serde::Serialize;

use crate::error::{PavementError, PavementResult};

/// x-coordinates (m) of a half-lane, including the tyre-load edges.
pub const HALF_LANE_X: [f64; 6] = [0.0, 0.475, 0.725, 2.275, 2.525, 3.0];

/// Ordered, non-decreasing sequence of x-coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct XProfile(Vec<f64>);

impl XProfile {
    /// The fixed half-lane profile used for every pavement type.
    pub fn half_lane() -> Self {
        XProfile(HALF_LANE_X.to_vec())
    }

    /// Build an alternate profile. Rejects empty, non-finite or decreasing input.
    pub fn new(xs: Vec<f64>) -> PavementResult<Self> {
        if xs.is_empty() {
            return Err(PavementError::InvalidProfile("profile is empty".to_string()));
        }
        if let Some(bad) = xs.iter().find(|x| !x.is_finite()) {
            return Err(PavementError::InvalidProfile(format!(
                "non-finite x-coordinate {bad}"
            )));
        }
        if let Some(pair) = xs.windows(2).find(|pair| pair[1] < pair[0]) {
            return Err(PavementError::InvalidProfile(format!(
                "x-coordinates decrease from {} to {}",
                pair[0], pair[1]
            )));
        }
        Ok(XProfile(xs))
    }

    pub fn xs(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Horizontal extent `(min, max)`.
    pub fn span(&self) -> (f64, f64) {
        // Non-empty and sorted by construction.
        (self.0[0], self.0[self.0.len() - 1])
    }
}

impl Default for XProfile {
    fn default() -> Self {
        Self::half_lane()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_lane_profile() {
        let profile = XProfile::half_lane();
        assert_eq!(profile.len(), 6);
        assert_eq!(profile.span(), (0.0, 3.0));
        assert_eq!(profile.xs()[2], 0.725);
    }

    #[test]
    fn test_rejects_bad_profiles() {
        assert!(XProfile::new(vec![]).is_err());
        assert!(XProfile::new(vec![0.0, f64::NAN]).is_err());
        let err = XProfile::new(vec![0.0, 2.0, 1.0]).unwrap_err();
        assert!(format!("{err}").contains("decrease"));
    }

    #[test]
    fn test_accepts_repeated_positions() {
        let profile = XProfile::new(vec![0.0, 1.0, 1.0, 2.0]).unwrap();
        assert_eq!(profile.len(), 4);
    }
}
