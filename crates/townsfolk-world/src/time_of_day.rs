//! Day/night cycle driven by elapsed time
//!
//! The phase is a pure function of elapsed milliseconds so render code can be
//! tested with a synthetic clock.

use serde::{Deserialize, Serialize};

/// Cyclic day/night configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DayCycle {
    /// Angular rate of the cycle in radians per millisecond
    pub angular_rate: f32,
    /// Street lamps are lit while the phase is below this value
    pub lamp_threshold: f32,
    /// Night tint opacity is `max(0, night_tint_max - phase)`
    pub night_tint_max: f32,
}

impl Default for DayCycle {
    fn default() -> Self {
        Self {
            angular_rate: 0.0005,
            lamp_threshold: 0.45,
            night_tint_max: 0.55,
        }
    }
}

impl DayCycle {
    /// Day progress in [0, 1]: 0 is deepest night, 1 is brightest noon
    pub fn phase(&self, elapsed_ms: f32) -> f32 {
        ((elapsed_ms * self.angular_rate).sin() + 1.0) / 2.0
    }

    /// Whether street lamps are lit
    pub fn lamps_lit(&self, elapsed_ms: f32) -> bool {
        self.phase(elapsed_ms) < self.lamp_threshold
    }

    /// Opacity of the screen-space night tint
    pub fn night_alpha(&self, elapsed_ms: f32) -> f32 {
        (self.night_tint_max - self.phase(elapsed_ms)).max(0.0)
    }

    /// Full cycle length in milliseconds
    pub fn period_ms(&self) -> f32 {
        std::f32::consts::TAU / self.angular_rate
    }

    /// Get time period name
    pub fn period_name(&self, elapsed_ms: f32) -> &'static str {
        let phase = self.phase(elapsed_ms);
        // Rising half of the sine is morning, falling half is evening
        let rising = (elapsed_ms * self.angular_rate).cos() >= 0.0;
        if phase < 0.2 {
            "Night"
        } else if phase < self.lamp_threshold {
            if rising { "Dawn" } else { "Dusk" }
        } else if phase < 0.85 {
            if rising { "Morning" } else { "Afternoon" }
        } else {
            "Noon"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_bounds() {
        let cycle = DayCycle::default();
        for step in 0..200 {
            let t = step as f32 * 157.0;
            let phase = cycle.phase(t);
            assert!((0.0..=1.0).contains(&phase), "phase {} out of range at {}", phase, t);
        }
    }

    #[test]
    fn test_start_of_session_is_mid_cycle() {
        let cycle = DayCycle::default();
        assert!((cycle.phase(0.0) - 0.5).abs() < 1e-6);
        assert!(!cycle.lamps_lit(0.0));
        assert!((cycle.night_alpha(0.0) - 0.05).abs() < 1e-5);
    }

    #[test]
    fn test_noon_and_midnight() {
        let cycle = DayCycle::default();
        let quarter = cycle.period_ms() / 4.0;

        // sin peaks at a quarter period
        assert!((cycle.phase(quarter) - 1.0).abs() < 1e-4);
        assert_eq!(cycle.night_alpha(quarter), 0.0);
        assert!(!cycle.lamps_lit(quarter));
        assert_eq!(cycle.period_name(quarter), "Noon");

        let midnight = quarter * 3.0;
        assert!(cycle.phase(midnight) < 1e-4);
        assert!(cycle.lamps_lit(midnight));
        assert!((cycle.night_alpha(midnight) - 0.55).abs() < 1e-3);
        assert_eq!(cycle.period_name(midnight), "Night");
    }
}
