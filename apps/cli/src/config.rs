//! Client configuration.

use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Resolved client settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    /// Directory export files are written to.
    pub export_dir: PathBuf,
}

impl Config {
    /// Resolve settings from flags, `.env` / `FLASHDECK_API_URL`, then defaults.
    pub fn load(api_url: Option<String>, export_dir: Option<PathBuf>) -> Self {
        dotenvy::dotenv().ok();
        Self::resolve(
            api_url,
            std::env::var("FLASHDECK_API_URL").ok(),
            export_dir,
            dirs::download_dir(),
        )
    }

    fn resolve(
        api_url_flag: Option<String>,
        api_url_env: Option<String>,
        export_dir_flag: Option<PathBuf>,
        download_dir: Option<PathBuf>,
    ) -> Self {
        let api_url = api_url_flag
            .or(api_url_env)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            api_url: api_url.trim().trim_end_matches('/').to_string(),
            export_dir: export_dir_flag
                .or(download_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_env() {
        let config = Config::resolve(
            Some("http://flag:1/".into()),
            Some("http://env:2".into()),
            None,
            None,
        );
        assert_eq!(config.api_url, "http://flag:1");
    }

    #[test]
    fn env_used_without_flag() {
        let config = Config::resolve(None, Some("http://env:2".into()), None, None);
        assert_eq!(config.api_url, "http://env:2");
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::resolve(None, Some("  ".into()), None, None);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.export_dir, PathBuf::from("."));
    }

    #[test]
    fn export_dir_prefers_flag() {
        let config = Config::resolve(
            None,
            None,
            Some(PathBuf::from("/tmp/out")),
            Some(PathBuf::from("/home/me/Downloads")),
        );
        assert_eq!(config.export_dir, PathBuf::from("/tmp/out"));

        let config = Config::resolve(None, None, None, Some(PathBuf::from("/home/me/Downloads")));
        assert_eq!(config.export_dir, PathBuf::from("/home/me/Downloads"));
    }
}
