use anyhow::{Context, Result};
use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub words_file: Option<PathBuf>, // Built-in tech words when unset
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup, e.g. a map in tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("PORT").unwrap_or_else(|| "8080".to_string());

        Ok(Self {
            host: host
                .parse()
                .with_context(|| format!("Invalid HOST \"{}\"", host))?,
            port: port
                .parse()
                .with_context(|| format!("Invalid PORT \"{}\"", port))?,
            words_file: lookup("WORDS_FILE")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.host, IpAddr::from([127, 0, 0, 1]));
        assert_eq!(config.port, 8080);
        assert!(config.words_file.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("WORDS_FILE", "/srv/words.txt"),
        ]))
        .unwrap();

        assert_eq!(config.host, IpAddr::from([0, 0, 0, 0]));
        assert_eq!(config.port, 9000);
        assert_eq!(config.words_file, Some(PathBuf::from("/srv/words.txt")));
    }

    #[test]
    fn test_invalid_port_is_reported() {
        let error = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(error.to_string().contains("Invalid PORT"));
    }

    #[test]
    fn test_blank_words_file_means_builtin() {
        let config = Config::from_lookup(lookup(&[("WORDS_FILE", "  ")])).unwrap();
        assert!(config.words_file.is_none());
    }
}
