//! Settings types deserialized from `agplan.toml`.

use serde::Deserialize;
use std::time::Duration;

/// The top-level floorplanner settings.
///
/// Every section is optional; an empty file yields [`Settings::default`].
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Settings {
    /// Area and candidate-shape estimation constants.
    #[serde(default)]
    pub area: AreaSettings,
    /// Communication weight scheme.
    #[serde(default)]
    pub weights: WeightSettings,
    /// Solve policy.
    #[serde(default)]
    pub solver: SolverSettings,
    /// Result validation.
    #[serde(default)]
    pub validation: ValidationSettings,
}

/// Constants used to turn resource usage into candidate rectangles.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AreaSettings {
    /// Logic cells per placement unit.
    pub luts_per_slice: f64,
    /// Inflation applied to both extents of generated shapes.
    pub slack_factor: f64,
    /// Width/height coefficients; each yields the shape
    /// `(c * sqrt(area) * slack, sqrt(area) / c * slack)`.
    pub aspect_ratios: Vec<f64>,
}

impl Default for AreaSettings {
    fn default() -> Self {
        Self {
            luts_per_slice: 8.0,
            slack_factor: 1.35,
            aspect_ratios: vec![0.2, 0.25, 0.333, 0.5, 0.75, 1.0, 1.33, 2.0, 3.0, 4.0, 5.0],
        }
    }
}

/// Communication weight scheme between partition pairs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct WeightSettings {
    /// Weight of every non-hole pair.
    pub base: f64,
    /// Added per channel between two top-level partitions.
    pub per_channel: f64,
    /// Multiplier for a parent/child pair.
    pub parent_child_multiplier: f64,
}

impl Default for WeightSettings {
    fn default() -> Self {
        Self {
            base: 1.0,
            per_channel: 10.0,
            parent_child_multiplier: 100.0,
        }
    }
}

/// Which mixed-integer backend solves the placement model.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SolverBackend {
    /// Pure-Rust branch and bound (default, always available).
    #[default]
    Microlp,
    /// HiGHS, when the engine is built with the `highs` feature.
    Highs,
}

/// Bounds on the solve.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SolverSettings {
    /// Backend selection.
    pub backend: SolverBackend,
    /// Wall-clock cap in seconds.
    pub time_limit_secs: f64,
    /// Branch-and-bound node budget.
    pub iteration_limit: u32,
    /// Accepted relative optimality gap.
    pub mip_gap: f64,
}

impl SolverSettings {
    /// Returns the wall-clock cap as a [`Duration`].
    ///
    /// A value too large for a `Duration` saturates; validated settings never
    /// carry one.
    pub fn time_limit(&self) -> Duration {
        Duration::try_from_secs_f64(self.time_limit_secs).unwrap_or(Duration::MAX)
    }
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            backend: SolverBackend::default(),
            time_limit_secs: 60.0,
            iteration_limit: 10_000,
            mip_gap: 0.95,
        }
    }
}

/// Checks applied to the solver's answer.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ValidationSettings {
    /// A resolved center coordinate below this value marks a degenerate solve.
    pub degenerate_threshold: f64,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            degenerate_threshold: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_build_stage_constants() {
        let s = Settings::default();
        assert_eq!(s.area.luts_per_slice, 8.0);
        assert_eq!(s.area.slack_factor, 1.35);
        assert_eq!(s.area.aspect_ratios.len(), 11);
        assert_eq!(s.weights.parent_child_multiplier, 100.0);
        assert_eq!(s.solver.backend, SolverBackend::Microlp);
        assert_eq!(s.validation.degenerate_threshold, 1.0);
    }

    #[test]
    fn time_limit_duration() {
        let s = SolverSettings {
            time_limit_secs: 0.25,
            ..SolverSettings::default()
        };
        assert_eq!(s.time_limit(), Duration::from_millis(250));
    }

    #[test]
    fn oversized_time_limit_saturates() {
        let s = SolverSettings {
            time_limit_secs: 1e300,
            ..SolverSettings::default()
        };
        assert_eq!(s.time_limit(), Duration::MAX);
    }
}
