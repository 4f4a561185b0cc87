use anyhow::{Context, Result};
use rangepick::PickerConfig;
use rangepick::data::persistence::get_data_dir;
use std::path::Path;

pub fn run(settings: &PickerConfig) -> Result<()> {
    let dir = get_data_dir()?;
    run_in_dir(settings, &dir)?;
    println!("Wrote {}", dir.join("config.yaml").display());
    Ok(())
}

/// Validates `settings` and writes them as config.yaml in `dir`. Exposed for unit testing.
pub(crate) fn run_in_dir(settings: &PickerConfig, dir: &Path) -> Result<()> {
    settings.validate()?;
    settings
        .save_to(dir)
        .with_context(|| format!("failed to write config.yaml in {}", dir.display()))
}
