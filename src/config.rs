/// Tuning parameters for the simulation, loadable from a JSON file.
///
/// The defaults are the shipped gameplay values; a user can override them by
/// dropping a `tuning.json` next to the executable or under
/// `~/.platformer/`. Missing files fall back to the defaults, missing fields
/// fall back per-field.
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration applied while airborne, units/s².
    pub gravity: f32,
    /// Player horizontal speed, units/s.
    pub player_run_speed: f32,
    /// Enemy patrol speed, units/s.
    pub enemy_run_speed: f32,
    /// Vertical velocity set on jump and on a stomp bounce. Negative is up.
    pub jump_impulse: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            gravity: 550.0,
            player_run_speed: 75.0,
            enemy_run_speed: 45.0,
            jump_impulse: -150.0,
        }
    }
}

impl Tuning {
    pub fn load_from_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let tuning: Tuning = serde_json::from_str(&content)?;
        Ok(tuning)
    }

    /// Loads the first tuning file found, or the defaults. Candidate paths:
    /// `tuning.json` in the working directory, then `~/.platformer/tuning.json`.
    pub fn load_or_default() -> Self {
        let mut candidates = vec![PathBuf::from("tuning.json")];
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".platformer/tuning.json"));
        }

        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Tuning::load_from_file(&path) {
                Ok(tuning) => {
                    log::info!("loaded tuning from {}", path.display());
                    return tuning;
                }
                Err(err) => {
                    log::warn!("ignoring bad tuning file {}: {}", path.display(), err);
                }
            }
        }

        Tuning::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_shipped_values() {
        let tuning = Tuning::default();
        assert_eq!(tuning.gravity, 550.0);
        assert_eq!(tuning.player_run_speed, 75.0);
        assert_eq!(tuning.enemy_run_speed, 45.0);
        assert_eq!(tuning.jump_impulse, -150.0);
    }

    #[test]
    fn test_partial_json_fills_in_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "gravity": 900.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 900.0);
        assert_eq!(tuning.jump_impulse, -150.0);
    }
}
