use serde::Deserialize;
use service_core::error::AppError;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub store: StoreSettings,
    #[serde(default)]
    pub admin: AdminSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    /// Directory holding the JSON snapshot files.
    pub data_dir: PathBuf,
}

/// The single admin credential. The original application ships a hard-coded
/// plaintext pair; it is kept here so deployments can at least override it.
#[derive(Debug, Deserialize, Clone)]
pub struct AdminSettings {
    #[serde(default = "default_admin_username")]
    pub username: String,
    #[serde(default = "default_admin_password")]
    pub password: String,
    #[serde(default = "default_admin_name")]
    pub nama: String,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            password: default_admin_password(),
            nama: default_admin_name(),
        }
    }
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

fn default_admin_name() -> String {
    "Administrator".to_string()
}

pub fn get_configuration() -> Result<Settings, AppError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");

    // Support running from either the workspace root or the crate directory.
    let configuration_directory = if base_path.ends_with("tuition-service") {
        base_path.join("config")
    } else {
        base_path.join("tuition-service").join("config")
    };

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")).required(true))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize::<Settings>()?)
}
