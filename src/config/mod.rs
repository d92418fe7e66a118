mod company;
mod settings;

pub use company::CompanyProfile;
pub use settings::{PdfSettings, Settings};

use crate::error::{InvoiceError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Data directory used when nothing else is configured, relative to the
/// working directory.
pub const FALLBACK_DATA_DIR: &str = "data";

/// Get the settings directory path (XDG config dir, or ~/.invoicedesk/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "invoicedesk") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = dirs_home().ok_or_else(|| {
        InvoiceError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".invoicedesk"))
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

pub fn settings_file(config_dir: &Path) -> PathBuf {
    config_dir.join("settings.toml")
}

/// Load settings.toml (defaults if missing)
pub fn load_settings(config_dir: &Path) -> Result<Settings> {
    let path = settings_file(config_dir);
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| InvoiceError::ConfigParse { path, source: e })
}

/// Pick the base data directory and make sure it exists.
///
/// Precedence: explicit override, then `data_dir` from the settings, then the
/// platform default. If the chosen directory cannot be created the relative
/// `data` directory is used instead.
pub fn resolve_data_dir(explicit: Option<&Path>, settings: &Settings) -> PathBuf {
    let preferred = explicit
        .map(Path::to_path_buf)
        .or_else(|| settings.data_dir.as_deref().map(expand_path))
        .unwrap_or_else(platform_data_dir);

    prepare_data_dir(preferred, Path::new(FALLBACK_DATA_DIR))
}

fn prepare_data_dir(preferred: PathBuf, fallback: &Path) -> PathBuf {
    match fs::create_dir_all(&preferred) {
        Ok(()) => {
            info!(data_dir = %preferred.display(), "using data directory");
            preferred
        }
        Err(e) => {
            warn!(
                data_dir = %preferred.display(),
                fallback = %fallback.display(),
                error = %e,
                "cannot create data directory, using fallback"
            );
            if let Err(e) = fs::create_dir_all(fallback) {
                warn!(error = %e, "cannot create fallback data directory");
            }
            fallback.to_path_buf()
        }
    }
}

/// On macOS the data lives inside the application bundle
/// (`<App>.app/Contents/Resources/data`), found by walking up from the
/// executable at `<App>.app/Contents/MacOS/<exe>`.
fn platform_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        let bundle = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.ancestors().nth(3).map(Path::to_path_buf));
        if let Some(bundle) = bundle {
            return bundle.join("Contents").join("Resources").join("data");
        }
    }

    PathBuf::from(FALLBACK_DATA_DIR)
}

/// Template content for settings.toml
pub const SETTINGS_TEMPLATE: &str = r#"# Base directory holding one sub-directory per company.
# Defaults to ./data (or the app bundle's Resources/data on macOS).
# data_dir = "~/invoicedesk-data"

# Companies loaded at startup. When empty, every company directory found
# under data_dir is loaded.
companies = []

[pdf]
currency_symbol = "Rs. "
# Replacement Typst template; it must read its data from json("data.json").
# template = "~/invoicedesk/invoice.typ"
"#;
