use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const PREFERENCES_VERSION: u32 = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphStyle {
    #[serde(rename = "3D")]
    ThreeD,
    #[serde(rename = "2D")]
    TwoD,
}

/// Persisted display preferences for the force-graph view. Distinct from the
/// radical page's session-local Jōyō toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphPreferences {
    pub style: GraphStyle,
    pub rotate: bool,
    pub out_links: bool,
    pub particles: bool,
    pub joyo_only: bool,
}

impl Default for GraphPreferences {
    fn default() -> Self {
        Self {
            style: GraphStyle::ThreeD,
            rotate: true,
            out_links: true,
            particles: true,
            joyo_only: false,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct StoredPreferences {
    state: GraphPreferences,
    version: u32,
}

/// Read preferences from `path`. A missing file, unreadable JSON, or an
/// unknown schema version all fall back to the defaults.
pub fn load_preferences(path: &Path) -> GraphPreferences {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => return GraphPreferences::default(),
    };

    match serde_json::from_str::<StoredPreferences>(&raw) {
        Ok(stored) if stored.version == PREFERENCES_VERSION => stored.state,
        Ok(stored) => {
            warn!(
                version = stored.version,
                "unknown preference schema version, using defaults"
            );
            GraphPreferences::default()
        }
        Err(error) => {
            warn!(%error, "unreadable preference file, using defaults");
            GraphPreferences::default()
        }
    }
}

pub fn save_preferences(path: &Path, prefs: &GraphPreferences) -> Result<()> {
    let stored = StoredPreferences {
        state: *prefs,
        version: PREFERENCES_VERSION,
    };
    let raw = serde_json::to_string_pretty(&stored).context("failed to encode preferences")?;
    fs::write(path, raw).with_context(|| format!("failed to write {}", path.display()))
}
