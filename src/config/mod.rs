mod settings;

pub use settings::{ApiSettings, Config, OrganizationSettings, ReportSettings};

use crate::error::{ReportError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.member-reports/)
pub fn config_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "member-reports") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.member-reports/
    let home = dirs_home().ok_or_else(|| {
        ReportError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".member-reports"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Output dir from config; relative paths hang off the config dir.
pub fn resolve_output_dir(output_dir: &str, cfg_dir: &Path) -> PathBuf {
    let expanded = expand_path(output_dir);
    if expanded.is_absolute() {
        expanded
    } else {
        cfg_dir.join(expanded)
    }
}

/// Directory holding the JSON snapshots of backend collections
pub fn data_dir(cfg_dir: &Path) -> PathBuf {
    cfg_dir.join("data")
}

/// Load the main config.toml
pub fn load_config(cfg_dir: &Path) -> Result<Config> {
    if !cfg_dir.exists() {
        return Err(ReportError::ConfigNotFound(cfg_dir.to_path_buf()));
    }
    let path = cfg_dir.join("config.toml");
    if !path.exists() {
        return Err(ReportError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| ReportError::ConfigParse { path, source: e })
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[organization]
name = "Your Community Association"
# id = "org-123"    # optional, limits reports to one organization

[report]
currency_symbol = "$"
output_dir = "output"   # relative to this config directory, or absolute / ~/...

[subscriptions]
lifetime = 250.0              # expected per year, "Lifetime" members
yearly_janaza_fund = 500.0    # expected per year, "Yearly + Janaza Fund" members

[api]
# base_url = "https://members.example.org/api"
# token = "..."
timeout_secs = 10
"#;
