use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Hosted data store connection (`[store]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the hosted store, e.g. `https://xyz.supabase.co`.
    pub base_url: String,
    /// Project API key sent with every request.
    pub api_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".to_string(),
            api_key: String::new(),
        }
    }
}

/// Media host used for treatment photos and consent documents (`[media]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Upload endpoint base, overridable for local testing.
    #[serde(default = "default_media_base_url")]
    pub base_url: String,
    /// Cloud/account identifier in the upload URL path.
    pub cloud_name: String,
    /// Unsigned upload preset name sent with each upload.
    pub upload_preset: String,
}

fn default_media_base_url() -> String {
    "https://api.cloudinary.com".to_string()
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            base_url: default_media_base_url(),
            cloud_name: String::new(),
            upload_preset: "dermaflow".to_string(),
        }
    }
}

/// Transactional email provider backing the `Notifier` trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    Sendgrid,
    Resend,
}

/// Reminder email settings (`[email]`, optional: reminders are skipped when absent).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub provider: EmailProvider,
    pub api_key: String,
    /// Verified sender address.
    pub from_address: String,
    /// Provider endpoint base, overridable for local testing.
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Global configuration loaded from `~/.config/dermaflow/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DermaConfig {
    pub store: StoreConfig,
    #[serde(default)]
    pub media: MediaConfig,
    /// Optional; when missing, appointment reminders are disabled.
    #[serde(default)]
    pub email: Option<EmailConfig>,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("dermaflow")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DermaConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Like `load_or_init` but at an explicit path (used by tests).
pub fn load_or_init_at(path: &Path) -> Result<DermaConfig> {
    if !path.exists() {
        let default_cfg = DermaConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: DermaConfig = toml::from_str(&data)?;
    Ok(cfg)
}
