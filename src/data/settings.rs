use crate::data::persistence::Persistable;
use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Settings {
    /// Minimum number of days between the start and end of a stay. A range
    /// shorter than this cannot be applied.
    pub min_stay_days: i64,
    /// Placeholder shown in the duration field while nothing is selected.
    pub field_placeholder: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            min_stay_days: 15,
            field_placeholder: "Enter storage duration".to_string(),
        }
    }
}

/// Wrapper that reads the `settings` key from config.yaml, leaving room for
/// other top-level keys to share the file later.
#[derive(Serialize, Deserialize, Default, Debug)]
struct SettingsWrapper {
    #[serde(default)]
    settings: Settings,
}

impl Persistable for SettingsWrapper {
    fn filename() -> &'static str {
        "config.yaml"
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Ok(SettingsWrapper::load()?.settings)
    }

    pub fn save(&self) -> Result<()> {
        let wrapper = SettingsWrapper {
            settings: self.clone(),
        };
        wrapper.save()
    }

    pub fn load_from(dir: &std::path::Path) -> Result<Self> {
        Ok(SettingsWrapper::load_from(dir)?.settings)
    }

    pub fn save_to(&self, dir: &std::path::Path) -> Result<()> {
        let wrapper = SettingsWrapper {
            settings: self.clone(),
        };
        wrapper.save_to(dir)
    }
}
