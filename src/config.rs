use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::lexer::LexerLimits;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub prompt: String,
    pub max_tokens: usize,
    pub max_token_length: usize,
    pub log_level: Option<String>,
}

impl Config {
    pub fn lexer_limits(&self) -> LexerLimits {
        LexerLimits {
            max_tokens: self.max_tokens,
            max_token_len: self.max_token_length,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        ConfigLoader::default_config()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Reads `key=value` files. Blank lines and lines starting with `#` are
/// ignored. Values are taken verbatim after the first `=`, so a prompt may
/// end in a space.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn default_config() -> Config {
        let limits = LexerLimits::default();
        Config {
            prompt: "$ ".to_string(),
            max_tokens: limits.max_tokens,
            max_token_length: limits.max_token_len,
            log_level: None,
        }
    }

    /// `~/.tinyshrc`
    pub fn default_path() -> Option<PathBuf> {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".tinyshrc"))
    }

    /// Loads `path` when given. Otherwise the default file is used if it
    /// exists, and the built-in defaults if not.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::load_from_file(&path),
                _ => Ok(Self::default_config()),
            },
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let src = fs::read_to_string(path)?;
        Self::load_from_str(&src)
    }

    pub fn load_from_str(src: &str) -> Result<Config, ConfigError> {
        let mut config = Self::default_config();

        for (lineno, line) in src.lines().enumerate() {
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::Parse(format!("line {}: no '=' found: {}", lineno + 1, line)));
            };

            match key.trim() {
                "prompt" => config.prompt = value.to_string(),
                "max_tokens" => config.max_tokens = parse_limit(value, lineno)?,
                "max_token_length" => config.max_token_length = parse_limit(value, lineno)?,
                "log_level" => config.log_level = Some(value.trim().to_string()),
                other => {
                    return Err(ConfigError::Parse(format!("line {}: unknown key: {}", lineno + 1, other)));
                }
            }
        }

        Ok(config)
    }
}

fn parse_limit(value: &str, lineno: usize) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::Parse(format!(
            "line {}: expected a positive integer, got '{}'",
            lineno + 1,
            value.trim()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConfigLoader::default_config();
        assert_eq!(config.prompt, "$ ");
        assert_eq!(config.lexer_limits(), LexerLimits::default());
        assert_eq!(config.log_level, None);
    }

    #[test]
    fn test_all_keys() {
        let src = "# tinysh settings\n\nprompt=tiny> \nmax_tokens = 10\nmax_token_length=64\nlog_level=debug\n";
        let config = ConfigLoader::load_from_str(src).unwrap();
        assert_eq!(config.prompt, "tiny> ");
        assert_eq!(config.max_tokens, 10);
        assert_eq!(config.max_token_length, 64);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        let config = ConfigLoader::load_from_str("max_tokens=3\n").unwrap();
        assert_eq!(config.prompt, "$ ");
        assert_eq!(config.max_tokens, 3);
        assert_eq!(config.max_token_length, LexerLimits::default().max_token_len);
    }

    #[test]
    fn test_unknown_key() {
        let err = ConfigLoader::load_from_str("colour=red\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(ref msg) if msg.contains("unknown key: colour")));
    }

    #[test]
    fn test_line_without_equals() {
        let err = ConfigLoader::load_from_str("prompt=ok\njunk\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(ref msg) if msg.starts_with("line 2")));
    }

    #[test]
    fn test_limits_must_be_positive_integers() {
        assert!(ConfigLoader::load_from_str("max_tokens=0").is_err());
        assert!(ConfigLoader::load_from_str("max_tokens=-1").is_err());
        assert!(ConfigLoader::load_from_str("max_token_length=lots").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tinyshrc");
        fs::write(&path, "prompt=% \n").unwrap();

        let config = ConfigLoader::load(Some(path.as_path())).unwrap();
        assert_eq!(config.prompt, "% ");
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ConfigLoader::load(Some(dir.path().join("absent").as_path()));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
