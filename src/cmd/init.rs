use crate::data::persistence::get_config_dir;
use crate::data::Settings;
use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn run() -> Result<()> {
    let dir = get_config_dir()?;
    fs::create_dir_all(&dir)?;
    run_in_dir(&dir)?;
    println!("Config initialized at {}", dir.display());
    Ok(())
}

/// Writes a default config.yaml into `dir`. Exposed for unit testing.
pub(crate) fn run_in_dir(dir: &Path) -> Result<()> {
    Settings::default().save_to(dir)
}
