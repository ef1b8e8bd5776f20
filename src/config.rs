//! Hand tracking settings persisted as TOML
//!
//! ```toml
//! filter_profile = "stable"
//! activate_on_startup = true
//! head_tracking = "6dof"
//! ```

use std::path::{Path, PathBuf};

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::filter::FilterProfile;
use crate::frame::HeadTrackingCapability;

/// User-facing hand tracking configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
#[serde(default, deny_unknown_fields)]
pub struct HandTrackingSettings {
    /// Joint filter profile applied when tracking starts
    pub filter_profile: FilterProfile,
    /// Start hand tracking as soon as the session starts
    pub activate_on_startup: bool,
    /// Head tracking mode of the target glasses
    pub head_tracking: HeadTrackingCapability,
}

impl Default for HandTrackingSettings {
    fn default() -> Self {
        Self {
            filter_profile: FilterProfile::Responsive,
            activate_on_startup: true,
            head_tracking: HeadTrackingCapability::SixDoF,
        }
    }
}

impl HandTrackingSettings {
    /// `<config dir>/viture/hand_tracking.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("viture")
            .join("hand_tracking.toml")
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_toml(&content)?;
        info!(path = %path.display(), profile = ?settings.filter_profile, "Loaded hand tracking settings");
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "No hand tracking settings found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}
