use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use luxe_bridge::config::Config;
use tokio::{
    fs::{OpenOptions, create_dir_all, read_to_string},
    io::AsyncWriteExt,
};

/// Errors that can occur while loading or resolving application configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to determine the user's configuration directory. This usually
    /// occurs when required environment variables are missing (e.g., `$HOME`
    /// on Unix or `%APPDATA%` on Windows).
    #[error("failed to obtain user's directories")]
    DirectoriesNotFound,
    /// An I/O error occurred while reading or writing the configuration file.
    #[error("failed to read config: {0}")]
    IoError(#[from] std::io::Error),
    /// The configuration file contains invalid TOML or does not match the expected structure.
    #[error("failed to deserialize config: {0}")]
    DeserializeError(#[from] toml::de::Error),
    /// Failed to serialize the configuration to TOML (e.g., when saving changes).
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

fn config_path() -> Result<PathBuf, ConfigError> {
    match ProjectDirs::from("com", "pinchofluxe", "luxe") {
        Some(path) => Ok(path.config_dir().join("config.toml")),
        None => Err(ConfigError::DirectoriesNotFound),
    }
}

/// Loads the application configuration from the user's configuration
/// directory, writing the defaults there on first run. Mail credentials from
/// the environment are applied on top.
pub async fn load_config() -> Result<Config, ConfigError> {
    let mut config = load_config_from(&config_path()?).await?;
    apply_mail_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Loads the configuration stored at `config_path`, creating the file with
/// default values if it does not exist yet.
pub async fn load_config_from(config_path: &Path) -> Result<Config, ConfigError> {
    log::info!("Loading configuration from {config_path:?}");
    if config_path.exists() {
        let contents = read_to_string(config_path).await?;
        let config: Config = toml::from_str(&contents)?;
        return Ok(config);
    }

    let config = Config::default();
    save_config_to(config_path, &config).await?;
    Ok(config)
}

/// Serializes `config` to pretty-printed TOML at `config_path`.
pub async fn save_config_to(config_path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = config_path.parent() {
        create_dir_all(parent).await?;
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(config_path)
        .await?;

    let contents = toml::to_string_pretty(config)?;
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await?;

    Ok(())
}

/// Replaces mail credentials with the non-empty values `lookup` returns for
/// the `LUXE_EMAILJS_*` variables.
pub fn apply_mail_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    let mail = &mut config.mail;
    let fields = [
        ("LUXE_EMAILJS_SERVICE_ID", &mut mail.service_id),
        ("LUXE_EMAILJS_INQUIRY_TEMPLATE_ID", &mut mail.inquiry_template_id),
        ("LUXE_EMAILJS_CONTACT_TEMPLATE_ID", &mut mail.contact_template_id),
        ("LUXE_EMAILJS_PUBLIC_KEY", &mut mail.public_key),
    ];

    for (variable, field) in fields {
        if let Some(value) = lookup(variable).filter(|value| !value.trim().is_empty()) {
            log::debug!("Using {variable} from the environment");
            *field = value.trim().to_string();
        }
    }
}
