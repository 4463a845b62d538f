use crate::checker::dictionary::DEFAULT_MIN_FREQUENCY;
use crate::error::ProofreadError;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG_FILE: &str = ".proofread.toml";

#[derive(Debug, Clone)]
pub struct Config {
    /// Bulk word list, one word per line, optionally gzip-compressed.
    pub dictionary: Option<PathBuf>,

    /// Curated additions using `stem/ending` shorthand.
    pub additions: Option<PathBuf>,

    pub posts_dir: Option<PathBuf>,

    /// Posts mined for vocabulary. Defaults to `posts_dir`.
    pub corpus_dir: Option<PathBuf>,

    pub min_frequency: u32,

    pub ignore_patterns: Vec<String>,
}

/// One config file as written; absent keys leave lower layers alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub dictionary: Option<PathBuf>,
    pub additions: Option<PathBuf>,
    pub posts_dir: Option<PathBuf>,
    pub corpus_dir: Option<PathBuf>,
    pub min_frequency: Option<u32>,
    pub ignore_patterns: Option<Vec<String>>,
}

fn default_ignore_patterns() -> Vec<String> {
    vec![
        r"https?://\S+".to_string(),                                    // URLs
        r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}".to_string(), // Emails
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: None,
            additions: None,
            posts_dir: None,
            corpus_dir: None,
            min_frequency: DEFAULT_MIN_FREQUENCY,
            ignore_patterns: default_ignore_patterns(),
        }
    }
}

/// Values given on the command line; `None` leaves the file setting alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub dictionary: Option<PathBuf>,
    pub additions: Option<PathBuf>,
    pub posts_dir: Option<PathBuf>,
    pub corpus_dir: Option<PathBuf>,
    pub min_frequency: Option<u32>,
    pub ignore_patterns: Vec<String>,
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(overrides: Overrides) -> Result<Self> {
        let mut config = Self::default();

        // Load global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global_config = Self::from_file(&global_path)?;
                config = config.merge(global_config);
            }
        }

        // Load local config (overrides global)
        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            let local_config = Self::from_file(&local_path)?;
            config = config.merge(local_config);
        }

        Ok(config.apply(overrides))
    }

    pub fn from_file(path: &Path) -> Result<ConfigFile> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge(mut self, file: ConfigFile) -> Self {
        if file.dictionary.is_some() {
            self.dictionary = file.dictionary;
        }
        if file.additions.is_some() {
            self.additions = file.additions;
        }
        if file.posts_dir.is_some() {
            self.posts_dir = file.posts_dir;
        }
        if file.corpus_dir.is_some() {
            self.corpus_dir = file.corpus_dir;
        }
        if let Some(min_frequency) = file.min_frequency {
            self.min_frequency = min_frequency;
        }
        if let Some(ignore_patterns) = file.ignore_patterns {
            self.ignore_patterns = ignore_patterns;
        }
        self
    }

    fn apply(mut self, overrides: Overrides) -> Self {
        if overrides.dictionary.is_some() {
            self.dictionary = overrides.dictionary;
        }
        if overrides.additions.is_some() {
            self.additions = overrides.additions;
        }
        if overrides.posts_dir.is_some() {
            self.posts_dir = overrides.posts_dir;
        }
        if overrides.corpus_dir.is_some() {
            self.corpus_dir = overrides.corpus_dir;
        }
        if let Some(min_frequency) = overrides.min_frequency {
            self.min_frequency = min_frequency;
        }
        self.ignore_patterns.extend(overrides.ignore_patterns);
        self
    }

    pub fn dictionary_path(&self) -> Result<&Path, ProofreadError> {
        self.dictionary
            .as_deref()
            .ok_or_else(|| ProofreadError::NotConfigured("dictionary"))
    }

    pub fn posts_path(&self) -> Result<&Path, ProofreadError> {
        self.posts_dir
            .as_deref()
            .ok_or_else(|| ProofreadError::NotConfigured("posts directory"))
    }

    /// Corpus directory, falling back to the posts directory.
    pub fn corpus_path(&self) -> Result<&Path, ProofreadError> {
        match &self.corpus_dir {
            Some(dir) => Ok(dir.as_path()),
            None => self.posts_path(),
        }
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "proofread").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.min_frequency, 3);
        assert_eq!(config.ignore_patterns.len(), 2);
        assert!(config.dictionary_path().is_err());
    }

    #[test]
    fn test_merge_configs() {
        let global = ConfigFile {
            dictionary: Some(PathBuf::from("global.txt")),
            additions: Some(PathBuf::from("extra.txt")),
            ..Default::default()
        };
        let local = ConfigFile {
            dictionary: Some(PathBuf::from("local.txt")),
            min_frequency: Some(5),
            ..Default::default()
        };

        let merged = Config::default().merge(global).merge(local);
        assert_eq!(merged.dictionary, Some(PathBuf::from("local.txt")));
        assert_eq!(merged.additions, Some(PathBuf::from("extra.txt")));
        assert_eq!(merged.min_frequency, 5);
    }

    #[test]
    fn test_local_file_can_restore_defaults() {
        let global = ConfigFile {
            min_frequency: Some(1),
            ignore_patterns: Some(vec!["TODO".to_string()]),
            ..Default::default()
        };
        let local = ConfigFile {
            min_frequency: Some(DEFAULT_MIN_FREQUENCY),
            ignore_patterns: Some(default_ignore_patterns()),
            ..Default::default()
        };

        let merged = Config::default().merge(global).merge(local);
        assert_eq!(merged.min_frequency, DEFAULT_MIN_FREQUENCY);
        assert_eq!(merged.ignore_patterns, default_ignore_patterns());
    }

    #[test]
    fn test_overrides_win() {
        let config = Config {
            posts_dir: Some(PathBuf::from("posts")),
            ..Default::default()
        }
        .apply(Overrides {
            min_frequency: Some(1),
            ignore_patterns: vec!["TODO".to_string()],
            ..Default::default()
        });

        assert_eq!(config.min_frequency, 1);
        assert_eq!(config.ignore_patterns.len(), 3);
        assert_eq!(config.corpus_path().unwrap(), Path::new("posts"));
    }

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "dictionary = \"words.gz\"\nposts_dir = \"posts\"\nmin_frequency = 4\n",
        )
        .unwrap();

        let file = Config::from_file(&path).unwrap();
        assert_eq!(file.dictionary, Some(PathBuf::from("words.gz")));
        assert_eq!(file.min_frequency, Some(4));
        assert_eq!(file.ignore_patterns, None);

        let config = Config::default().merge(file);
        assert_eq!(config.ignore_patterns, default_ignore_patterns());
    }
}
