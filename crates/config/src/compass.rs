#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Compass {
    /// Degrees either side of the Qibla that still count as aligned (clamped
    /// to 0..=180).
    pub alignment_tolerance: f64,
}

impl Default for Compass {
    fn default() -> Self {
        Self {
            alignment_tolerance: 5.0,
        }
    }
}

impl Compass {
    pub fn clamp(self) -> Self {
        let tolerance = if self.alignment_tolerance.is_nan() {
            Self::default().alignment_tolerance
        } else {
            self.alignment_tolerance.clamp(0.0, 180.0)
        };
        Self {
            alignment_tolerance: tolerance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn nan_falls_back_to_default() {
        let compass = Compass {
            alignment_tolerance: f64::NAN,
        }
        .clamp();
        assert_eq!(compass, Compass::default());
    }

    proptest! {
        #[test]
        fn clamp_limits_tolerance(tolerance in -1000.0f64..1000.0) {
            let compass = Compass { alignment_tolerance: tolerance }.clamp();
            prop_assert!((0.0..=180.0).contains(&compass.alignment_tolerance));
        }
    }
}
