use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("MORAINE_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MINIMAL: &str = r#"
[tracker]
api_url = "https://hyp3.example.com"
username = "user"
password = "secret"

[archive]
bucket = "archive-bucket"
"#;

    #[test]
    fn test_load_config_from_str_valid() {
        let config = load_config_from_str(MINIMAL).unwrap();
        assert_eq!(config.archive.bucket, "archive-bucket");
        assert_eq!(config.transfer.chunk_size, 10);
        assert_eq!(config.transfer.workers, 8);
    }

    #[test]
    fn test_load_config_from_str_missing_tracker() {
        let toml = r#"
[archive]
bucket = "archive-bucket"
"#;
        let result = load_config_from_str(toml);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
{MINIMAL}
[transfer]
chunk_size = 25
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.tracker.username, "user");
        assert_eq!(config.transfer.chunk_size, 25);
        assert_eq!(config.transfer.workers, 8);
    }
}
