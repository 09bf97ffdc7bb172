use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::models::Config;

const CONFIG_FILE: &str = "showdeck_config.txt";

pub fn config_dir() -> PathBuf {
    directories::ProjectDirs::from("org", "showdeck", "ShowDeck")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn config_file_path() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}

pub fn read_config() -> Result<Config, io::Error> {
    // Per-user file first, then one next to the working directory
    let content = match fs::read_to_string(config_file_path()) {
        Ok(s) => s,
        Err(_e) => fs::read_to_string(CONFIG_FILE)?,
    };
    Ok(parse_config(&content))
}

pub fn parse_config(content: &str) -> Config {
    let mut cfg = Config::default();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((k, v)) = line.split_once('=') {
            let v = v.trim();
            match k.trim() {
                "api_key" => cfg.api_key = v.to_string(),
                "api_base" => cfg.api_base = v.to_string(),
                "image_base" => cfg.image_base = v.to_string(),
                "language" => cfg.language = v.to_string(),
                "search_debounce_ms" => cfg.search_debounce_ms = v.parse::<u64>().unwrap_or(300),
                "request_timeout_secs" => cfg.request_timeout_secs = v.parse::<u64>().unwrap_or(30),
                "cover_parallel" => cfg.cover_parallel = v.parse::<u32>().unwrap_or(6).max(1),
                "texture_cache_limit" => cfg.texture_cache_limit = v.parse::<u32>().unwrap_or(512),
                "theme" => cfg.theme = v.to_string(),
                "log_level" => cfg.log_level = v.to_string(),
                _ => {}
            }
        }
    }
    cfg
}

/// `TMDB_API_KEY` and `SHOWDECK_LOG` win over the file.
pub fn apply_env_overrides(cfg: &mut Config) {
    if let Ok(key) = std::env::var("TMDB_API_KEY") {
        if !key.trim().is_empty() {
            cfg.api_key = key.trim().to_string();
        }
    }
    if let Ok(level) = std::env::var("SHOWDECK_LOG") {
        if !level.trim().is_empty() {
            cfg.log_level = level.trim().to_string();
        }
    }
}

pub fn render_config(cfg: &Config) -> String {
    let mut out = String::new();
    out.push_str(&format!("api_key={}\n", cfg.api_key));
    out.push_str(&format!("api_base={}\n", cfg.api_base));
    out.push_str(&format!("image_base={}\n", cfg.image_base));
    out.push_str(&format!("language={}\n", cfg.language));
    out.push_str(&format!("search_debounce_ms={}\n", cfg.search_debounce_ms));
    out.push_str(&format!("request_timeout_secs={}\n", cfg.request_timeout_secs));
    out.push_str(&format!("cover_parallel={}\n", cfg.cover_parallel));
    out.push_str(&format!("texture_cache_limit={}\n", cfg.texture_cache_limit));
    out.push_str(&format!("theme={}\n", cfg.theme));
    out.push_str(&format!("log_level={}\n", cfg.log_level));
    out
}

pub fn save_config(cfg: &Config) -> Result<(), io::Error> {
    let path = config_file_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let mut file = fs::File::create(&path)?;
    file.write_all(render_config(cfg).as_bytes())?;
    log::info!("saved config to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_reads_known_keys() {
        let cfg = parse_config(
            "# comment\napi_key = abc123\nlanguage=de-DE\nsearch_debounce_ms=450\ntheme=light\nunknown=1\n",
        );
        assert_eq!(cfg.api_key, "abc123");
        assert_eq!(cfg.language, "de-DE");
        assert_eq!(cfg.search_debounce_ms, 450);
        assert_eq!(cfg.theme, "light");
        assert_eq!(cfg.api_base, showdeck_core::DEFAULT_API_BASE);
        assert!(cfg.is_complete());
    }

    #[test]
    fn test_parse_config_falls_back_on_bad_numbers() {
        let cfg = parse_config("search_debounce_ms=soon\ncover_parallel=0\ntexture_cache_limit=lots\n");
        assert_eq!(cfg.search_debounce_ms, 300);
        assert_eq!(cfg.texture_cache_limit, 512);
        assert_eq!(cfg.cover_parallel, 1);
        assert!(!cfg.is_complete());
    }

    #[test]
    fn test_rendered_config_parses_back() {
        let cfg = Config {
            api_key: "k".into(),
            request_timeout_secs: 12,
            ..Config::default()
        };
        assert_eq!(parse_config(&render_config(&cfg)), cfg);
    }
}
