use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "ConfigHelper::default_host")]
    pub host: String,

    #[serde(default)]
    pub token: Option<String>,

    #[serde(default = "ConfigHelper::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: ConfigHelper::default_host(),
            token: None,
            request_timeout_secs: ConfigHelper::default_request_timeout_secs(),
        }
    }
}
