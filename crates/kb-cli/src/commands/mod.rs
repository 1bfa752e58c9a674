pub mod graph;
pub mod play;

use std::path::Path;

use kb_fiction::SessionConfig;

/// Read session settings from a JSON file, or use the defaults.
fn load_config(path: Option<&Path>) -> Result<SessionConfig, String> {
    let Some(path) = path else {
        return Ok(SessionConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read config '{}': {e}", path.display()))?;
    serde_json::from_str(&text)
        .map_err(|e| format!("invalid config '{}': {e}", path.display()))
}
