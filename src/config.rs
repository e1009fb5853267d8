use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub cosmos_endpoint: String,
    pub cosmos_key: String,
    pub cosmos_database: String,
    pub submission_user_id: String,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            cosmos_endpoint: get_env("COSMOS_ENDPOINT")?,
            cosmos_key: get_env("COSMOS_KEY")?,
            cosmos_database: env::var("COSMOS_DATABASE").unwrap_or_else(|_| "tutor".to_string()),
            // Static identity until real authentication lands; handlers pass
            // this through to the submission operation.
            submission_user_id: env::var("SUBMISSION_USER_ID")
                .unwrap_or_else(|_| "test-user-01".to_string()),
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
