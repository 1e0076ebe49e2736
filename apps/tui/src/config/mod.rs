#[allow(clippy::module_inception)]
mod config;

pub use config::{
    init_app_config, AppConfig, API_URL_VAR, HIDE_DRAFTS_VAR, HTTP_TIMEOUT_VAR, LEGACY_API_URL_VAR,
    LOG_FILE_VAR,
};
