pub mod play;
pub mod roster;
pub mod serve;
pub mod shuffle;

use std::path::Path;

use ar_run::TrackerConfig;

/// Load the tracker configuration, falling back to defaults without a path.
pub fn load_config(path: Option<&Path>) -> Result<TrackerConfig, String> {
    match path {
        Some(path) => TrackerConfig::load_from_file(path)
            .map_err(|e| format!("{}: {e}", path.display())),
        None => Ok(TrackerConfig::default()),
    }
}
