//! Player-tunable generation settings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest same-number cluster bound the token rules support
pub const MAX_TOUCHING_SAME_NUMBER: u8 = 2;

/// How harbors are distributed over the islands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HarborPlacementMode {
    /// Every island gets at least one harbor before the rest are spread out
    #[default]
    Balanced,
    /// Harbors go wherever a valid slot comes up first
    Random,
}

/// Errors for settings that can never be satisfied
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("At least one island is required")]
    NoIslands,

    #[error("{islands} islands cannot be formed from {land} land tiles")]
    TooManyIslands { islands: u8, land: usize },

    #[error("Islands need at least one field")]
    NoFieldsPerIsland,

    #[error("{islands} islands of at least {min_fields} fields need more than {land} land tiles")]
    MinFieldsUnsatisfiable {
        islands: u8,
        min_fields: u8,
        land: usize,
    },

    #[error("Same-resource clusters must allow at least one field")]
    NoResourceCluster,

    #[error("Touching same numbers must be between 0 and 2, got {0}")]
    NumberClusterOutOfRange(u8),

    #[error("Invalid settings document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings for one board generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Number of separate islands the land is split into
    pub island_count: u8,
    /// Smallest allowed island
    pub min_fields_per_island: u8,
    /// Keep the most likely numbers (6 and 8) from touching each other
    pub prevent_high_value_adjacency: bool,
    /// How many extra same-number tokens may join a cluster (0-2)
    pub max_touching_same_number: u8,
    /// Largest allowed cluster of one terrain kind
    pub max_touching_same_resource: u8,
    /// Harbor distribution mode
    pub harbor_placement: HarborPlacementMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            island_count: 1,
            min_fields_per_island: 3,
            prevent_high_value_adjacency: true,
            max_touching_same_number: 0,
            max_touching_same_resource: 1,
            harbor_placement: HarborPlacementMode::Balanced,
        }
    }
}

impl Settings {
    /// Parse a settings document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check that the settings can be satisfied with `land` land tiles
    pub fn validate(&self, land: usize) -> Result<(), SettingsError> {
        if self.island_count == 0 {
            return Err(SettingsError::NoIslands);
        }
        if self.island_count as usize > land {
            return Err(SettingsError::TooManyIslands {
                islands: self.island_count,
                land,
            });
        }
        if self.min_fields_per_island == 0 {
            return Err(SettingsError::NoFieldsPerIsland);
        }
        if self.min_fields_per_island as usize * self.island_count as usize > land {
            return Err(SettingsError::MinFieldsUnsatisfiable {
                islands: self.island_count,
                min_fields: self.min_fields_per_island,
                land,
            });
        }
        if self.max_touching_same_resource == 0 {
            return Err(SettingsError::NoResourceCluster);
        }
        if self.max_touching_same_number > MAX_TOUCHING_SAME_NUMBER {
            return Err(SettingsError::NumberClusterOutOfRange(
                self.max_touching_same_number,
            ));
        }
        Ok(())
    }

    /// The nearest settings that pass [`Settings::validate`] for `land` tiles
    pub fn clamped(&self, land: usize) -> Settings {
        let land = land.clamp(1, u8::MAX as usize) as u8;
        let island_count = self.island_count.clamp(1, land);
        let max_fields = (land / island_count).max(1);

        Settings {
            island_count,
            min_fields_per_island: self.min_fields_per_island.clamp(1, max_fields),
            max_touching_same_number: self.max_touching_same_number.min(MAX_TOUCHING_SAME_NUMBER),
            max_touching_same_resource: self.max_touching_same_resource.max(1),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_are_valid_for_standard_land() {
        assert!(Settings::default().validate(23).is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"islandCount": 3, "harborPlacement": "random"}"#).unwrap();
        assert_eq!(
            settings,
            Settings {
                island_count: 3,
                harbor_placement: HarborPlacementMode::Random,
                ..Settings::default()
            }
        );
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            Settings::from_json(r#"{"islandCount": "many"}"#),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_validate_rejects_unsatisfiable_settings() {
        let base = Settings::default();

        let none = Settings { island_count: 0, ..base.clone() };
        assert!(matches!(none.validate(23), Err(SettingsError::NoIslands)));

        let crowded = Settings { island_count: 24, min_fields_per_island: 1, ..base.clone() };
        assert!(matches!(crowded.validate(23), Err(SettingsError::TooManyIslands { .. })));

        let greedy = Settings { island_count: 4, min_fields_per_island: 6, ..base.clone() };
        assert!(matches!(
            greedy.validate(23),
            Err(SettingsError::MinFieldsUnsatisfiable { .. })
        ));

        let numbers = Settings { max_touching_same_number: 3, ..base.clone() };
        assert!(matches!(
            numbers.validate(23),
            Err(SettingsError::NumberClusterOutOfRange(3))
        ));

        let resources = Settings { max_touching_same_resource: 0, ..base };
        assert!(matches!(resources.validate(23), Err(SettingsError::NoResourceCluster)));
    }

    #[test]
    fn test_clamped_settings_validate() {
        let wild = Settings {
            island_count: 40,
            min_fields_per_island: 9,
            prevent_high_value_adjacency: false,
            max_touching_same_number: 7,
            max_touching_same_resource: 0,
            harbor_placement: HarborPlacementMode::Random,
        };
        let clamped = wild.clamped(23);
        assert!(clamped.validate(23).is_ok());
        assert_eq!(clamped.island_count, 23);
        assert_eq!(clamped.min_fields_per_island, 1);
        assert_eq!(clamped.max_touching_same_number, 2);
        assert_eq!(clamped.max_touching_same_resource, 1);
        assert!(!clamped.prevent_high_value_adjacency);
        assert_eq!(clamped.harbor_placement, HarborPlacementMode::Random);
    }

    #[test]
    fn test_clamp_keeps_valid_settings() {
        let settings = Settings { island_count: 3, min_fields_per_island: 5, ..Settings::default() };
        assert_eq!(settings.clamped(23), settings);
    }
}
