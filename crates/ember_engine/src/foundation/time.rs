//! Time management utilities

use std::fmt;

/// Frame-to-frame elapsed wall time in fractional seconds
///
/// Computed once per frame by the application loop and passed by value into
/// every layer's update hook for that frame.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Timestep(f32);

impl Timestep {
    /// Create a timestep from a duration in seconds
    pub fn new(seconds: f32) -> Self {
        Self(seconds)
    }

    /// Get the timestep in seconds
    pub fn seconds(self) -> f32 {
        self.0
    }

    /// Get the timestep in milliseconds
    pub fn millis(self) -> f32 {
        self.0 * 1000.0
    }
}

impl From<f32> for Timestep {
    fn from(seconds: f32) -> Self {
        Self::new(seconds)
    }
}

impl fmt::Display for Timestep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}ms", self.millis())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_timestep_units() {
        let ts = Timestep::new(0.016);
        assert_relative_eq!(ts.seconds(), 0.016);
        assert_relative_eq!(ts.millis(), 16.0);
    }

    #[test]
    fn test_timestep_from_f32() {
        let ts: Timestep = 0.5.into();
        assert_relative_eq!(ts.seconds(), 0.5);
    }
}
