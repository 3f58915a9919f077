//! Settings file loading and validation.

use crate::error::SettingsError;
use crate::types::Settings;
use std::path::Path;
use std::time::Duration;

/// Name of the settings file inside a build directory.
pub const SETTINGS_FILE: &str = "agplan.toml";

/// Loads and validates `agplan.toml` from a directory.
pub fn load_settings(dir: &Path) -> Result<Settings, SettingsError> {
    let content = std::fs::read_to_string(dir.join(SETTINGS_FILE))?;
    load_settings_from_str(&content)
}

/// Parses and validates settings from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_settings_from_str(content: &str) -> Result<Settings, SettingsError> {
    let settings: Settings =
        toml::from_str(content).map_err(|e| SettingsError::ParseError(e.to_string()))?;
    validate_settings(&settings)?;
    Ok(settings)
}

fn positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Rejects values the estimator or solver cannot work with.
fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    let area = &settings.area;
    if !positive_finite(area.luts_per_slice) {
        return Err(SettingsError::invalid("area.luts_per_slice", "must be a positive finite number"));
    }
    if !positive_finite(area.slack_factor) {
        return Err(SettingsError::invalid("area.slack_factor", "must be a positive finite number"));
    }
    if area.aspect_ratios.is_empty() {
        return Err(SettingsError::invalid("area.aspect_ratios", "must not be empty"));
    }
    if !area.aspect_ratios.iter().all(|&c| positive_finite(c)) {
        return Err(SettingsError::invalid(
            "area.aspect_ratios",
            "coefficients must be positive finite numbers",
        ));
    }

    let solver = &settings.solver;
    if !positive_finite(solver.time_limit_secs)
        || Duration::try_from_secs_f64(solver.time_limit_secs).is_err()
    {
        return Err(SettingsError::invalid(
            "solver.time_limit_secs",
            "must be a positive number of seconds",
        ));
    }
    if !(0.0..=1.0).contains(&solver.mip_gap) {
        return Err(SettingsError::invalid("solver.mip_gap", "must be within [0, 1]"));
    }
    if solver.iteration_limit == 0 {
        return Err(SettingsError::invalid("solver.iteration_limit", "must be nonzero"));
    }
    Ok(())
}
