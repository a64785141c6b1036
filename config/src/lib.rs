use anyhow::Error;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DatasetKind {
    TmdbMerged,
    ImdbSimple,
}

impl DatasetKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tmdb-merged" => Some(Self::TmdbMerged),
            "imdb-simple" => Some(Self::ImdbSimple),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatasetConfig {
    pub kind: DatasetKind,
    pub path: PathBuf,
    pub poster_base_url: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            kind: DatasetKind::TmdbMerged,
            path: PathBuf::from("merged_movies.csv"),
            poster_base_url: "https://image.tmdb.org/t/p/w500".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Length of every recommendation list
    pub top_n: usize,
    /// Maximum number of autocomplete suggestions
    pub suggestions: usize,
    /// Minimum fuzzy score for a title to count as a match
    pub fuzzy_cutoff: f64,
    /// Minimum vote count for the top-rated lists
    pub min_votes: u64,
    /// Overrides the dataset's default text fields when not empty
    pub document_fields: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_n: 5,
            suggestions: 10,
            fuzzy_cutoff: 0.75,
            min_votes: 50,
            document_fields: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub path: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: PathBuf::from("similarity_0.bin"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub engine: EngineConfig,
    pub cache: CacheConfig,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        let parsed: Self = toml::from_str(&contents)?;
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Error;

    #[test]
    fn load_example_config() -> Result<(), Error> {
        let expected = Config {
            dataset: DatasetConfig {
                kind: DatasetKind::TmdbMerged,
                path: "data/merged_movies.csv".into(),
                poster_base_url: "https://image.tmdb.org/t/p/w500".into(),
            },
            engine: EngineConfig {
                top_n: 5,
                suggestions: 10,
                fuzzy_cutoff: 0.75,
                min_votes: 50,
                document_fields: vec!["overview".into()],
            },
            cache: CacheConfig {
                enabled: true,
                path: "data/similarity_0.bin".into(),
            },
        };

        let loaded = Config::load("example.toml")?;
        assert_eq!(expected, loaded);

        Ok(())
    }

    #[test]
    fn missing_sections_use_defaults() -> Result<(), Error> {
        let parsed: Config = toml::from_str(
            r#"
            [dataset]
            kind = "imdb-simple"
            path = "movie.csv"

            [engine]
            top_n = 8
            "#,
        )?;

        assert_eq!(parsed.dataset.kind, DatasetKind::ImdbSimple);
        assert_eq!(parsed.engine.top_n, 8);
        assert_eq!(parsed.engine.suggestions, 10);
        assert_eq!(parsed.cache, CacheConfig::default());

        Ok(())
    }

    #[test]
    fn dataset_kind_names() {
        assert_eq!(DatasetKind::from_name("tmdb-merged"), Some(DatasetKind::TmdbMerged));
        assert_eq!(DatasetKind::from_name("imdb-simple"), Some(DatasetKind::ImdbSimple));
        assert_eq!(DatasetKind::from_name("books"), None);
    }
}
