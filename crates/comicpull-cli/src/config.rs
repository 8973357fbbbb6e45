use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_LIBRARY: &str = "library";
pub const DEFAULT_SOURCE: &str = "readcomicsonline.ru";
pub const DEFAULT_CONFIG_FILE: &str = "comicpull.json";

pub const LIBRARY_ENV: &str = "COMICPULL_LIBRARY";
pub const SOURCE_ENV: &str = "COMICPULL_SOURCE";

/// Defaults for `--library-path` and `--source-url`, resolved once at start-up.
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    pub library_path: PathBuf,
    pub source_url: String,
}

/// Optional JSON config file. Every field may be left out.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    library_path: Option<PathBuf>,
    source_url: Option<String>,
}

/// Load defaults: environment over config file over built-ins.
///
/// An explicitly named config file must exist; the implicit
/// `comicpull.json` in the working directory is read only if present.
pub fn load_defaults(config_path: Option<&Path>) -> Result<Defaults> {
    let file = match config_path {
        Some(path) => read_config_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            read_config_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => FileConfig::default(),
    };
    Ok(merge(file, |key| std::env::var(key).ok()))
}

fn read_config_file(path: &Path) -> Result<FileConfig> {
    tracing::debug!(path = %path.display(), "Reading config file");
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

fn merge(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Defaults {
    let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    let library_path = non_empty(LIBRARY_ENV)
        .map(PathBuf::from)
        .or(file.library_path)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LIBRARY));
    let source_url = non_empty(SOURCE_ENV)
        .or(file.source_url)
        .unwrap_or_else(|| DEFAULT_SOURCE.to_string());

    Defaults {
        library_path,
        source_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_builtin_defaults() {
        let defaults = merge(FileConfig::default(), env(&[]));
        assert_eq!(defaults.library_path, PathBuf::from(DEFAULT_LIBRARY));
        assert_eq!(defaults.source_url, DEFAULT_SOURCE);
    }

    #[test]
    fn test_env_overrides_file() {
        let file = FileConfig {
            library_path: Some("/from/file".into()),
            source_url: Some("xoxocomic.com".into()),
        };
        let defaults = merge(file, env(&[(LIBRARY_ENV, "/from/env")]));
        assert_eq!(defaults.library_path, PathBuf::from("/from/env"));
        assert_eq!(defaults.source_url, "xoxocomic.com");
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let defaults = merge(FileConfig::default(), env(&[(SOURCE_ENV, "  ")]));
        assert_eq!(defaults.source_url, DEFAULT_SOURCE);
    }

    #[test]
    fn test_read_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comicpull.json");
        std::fs::write(&path, r#"{ "library_path": "/mnt/comics" }"#).unwrap();

        let file = read_config_file(&path).unwrap();
        assert_eq!(file.library_path, Some(PathBuf::from("/mnt/comics")));
        assert_eq!(file.source_url, None);
    }

    #[test]
    fn test_unknown_config_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comicpull.json");
        std::fs::write(&path, r#"{ "libary_path": "/typo" }"#).unwrap();
        assert!(read_config_file(&path).is_err());
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_defaults(Some(&dir.path().join("missing.json"))).is_err());
    }
}
