use std::time::Duration;

use showdeck_core::{CatalogConfig, DEFAULT_API_BASE, DEFAULT_IMAGE_BASE, DEFAULT_LANGUAGE};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: String,
    pub api_base: String,
    pub image_base: String,
    pub language: String,
    pub search_debounce_ms: u64,  // 300 default
    pub request_timeout_secs: u64, // 30 default
    pub cover_parallel: u32,      // 6 default
    pub texture_cache_limit: u32, // 512 default
    pub theme: String,            // "dark" | "light"
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            image_base: DEFAULT_IMAGE_BASE.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            search_debounce_ms: 300,
            request_timeout_secs: 30,
            cover_parallel: 6,
            texture_cache_limit: 512,
            theme: "dark".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn is_complete(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            api_base: self.api_base.clone(),
            api_key: self.api_key.trim().to_string(),
            language: self.language.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
        }
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}
