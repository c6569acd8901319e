//! Settings resolution: settings file, then flag overrides, then validation.

use archipelago_core::{HarborPlacementMode, Settings, SettingsError};
use clap::ValueEnum;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Harbor distribution as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HarborMode {
    Balanced,
    Random,
}

impl From<HarborMode> for HarborPlacementMode {
    fn from(mode: HarborMode) -> Self {
        match mode {
            HarborMode::Balanced => HarborPlacementMode::Balanced,
            HarborMode::Random => HarborPlacementMode::Random,
        }
    }
}

/// Settings given as individual flags
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub islands: Option<u8>,
    pub min_fields: Option<u8>,
    pub allow_high_value_adjacency: bool,
    pub max_same_number: Option<u8>,
    pub max_same_resource: Option<u8>,
    pub harbors: Option<HarborMode>,
}

impl Overrides {
    /// Apply every flag that was given on top of `settings`
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(islands) = self.islands {
            settings.island_count = islands;
        }
        if let Some(min_fields) = self.min_fields {
            settings.min_fields_per_island = min_fields;
        }
        if self.allow_high_value_adjacency {
            settings.prevent_high_value_adjacency = false;
        }
        if let Some(max) = self.max_same_number {
            settings.max_touching_same_number = max;
        }
        if let Some(max) = self.max_same_resource {
            settings.max_touching_same_resource = max;
        }
        if let Some(mode) = self.harbors {
            settings.harbor_placement = mode.into();
        }
        settings
    }
}

/// Read a settings file, or the defaults when no file is given
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };

    let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "Loaded settings file");
    Ok(Settings::from_json(&json)?)
}

/// Build the final settings for `land` land tiles
pub fn resolve(
    path: Option<&Path>,
    overrides: &Overrides,
    land: usize,
    clamp: bool,
) -> Result<Settings, ConfigError> {
    let settings = overrides.apply(load_settings(path)?);

    if clamp {
        let clamped = settings.clamped(land);
        if clamped != settings {
            warn!(?settings, ?clamped, "Settings clamped to what the board can hold");
        }
        return Ok(clamped);
    }

    settings.validate(land)?;
    Ok(settings)
}
