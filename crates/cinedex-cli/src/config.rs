//! Configuration: `cinedex.toml`, the `CINEDEX_DB` environment variable, and
//! command-line flags, in increasing order of precedence.
//!
//! ```toml
//! database = "data/cinedex.db"
//! format = "table"
//! log_level = "info"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::Level;

use cinedex_core::error::CatalogError;
use cinedex_query::OutputFormat;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "cinedex.toml";

/// Environment variable overriding the database path.
pub const DB_ENV: &str = "CINEDEX_DB";

const DEFAULT_DATABASE: &str = "cinedex.db";

/// Contents of a config file. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub database: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub log_level: Option<String>,
}

impl FileConfig {
    /// Read the config file.
    ///
    /// An explicit path must exist. Without one, `./cinedex.toml` is used if
    /// present, otherwise defaults apply.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] if the file is unreadable or invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self, CatalogError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = std::fs::read_to_string(&path).map_err(|e| {
            CatalogError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::parse(&text)
            .map_err(|e| CatalogError::Config(format!("{}: {e}", path.display())))
    }

    /// # Errors
    ///
    /// Returns the TOML error message for malformed input or unknown keys.
    pub fn parse(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| e.to_string())
    }
}

/// Effective settings after applying precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database: PathBuf,
    pub format: OutputFormat,
    pub log_level: Option<Level>,
}

/// Flag values that override the file and environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub database: Option<PathBuf>,
    pub format: Option<OutputFormat>,
}

impl Settings {
    /// Merge flags, environment, and file config.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] for an unrecognized `log_level`.
    pub fn resolve(
        overrides: Overrides,
        env_database: Option<PathBuf>,
        file: FileConfig,
    ) -> Result<Self, CatalogError> {
        let log_level = file
            .log_level
            .as_deref()
            .map(|level| {
                level
                    .parse::<Level>()
                    .map_err(|_| CatalogError::Config(format!("invalid log_level '{level}'")))
            })
            .transpose()?;

        Ok(Self {
            database: overrides
                .database
                .or(env_database)
                .or(file.database)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE)),
            format: overrides.format.or(file.format).unwrap_or_default(),
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_keys() {
        let file = FileConfig::parse(
            r#"
database = "data/movies.db"
format = "markdown"
log_level = "debug"
"#,
        )
        .unwrap();
        assert_eq!(file.database, Some(PathBuf::from("data/movies.db")));
        assert_eq!(file.format, Some(OutputFormat::Markdown));
        assert_eq!(file.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(FileConfig::parse("databse = \"x.db\"").is_err());
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let settings =
            Settings::resolve(Overrides::default(), None, FileConfig::default()).unwrap();
        assert_eq!(settings.database, PathBuf::from("cinedex.db"));
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.log_level, None);
    }

    #[test]
    fn flags_beat_environment_beat_file() {
        let file = FileConfig {
            database: Some(PathBuf::from("file.db")),
            format: Some(OutputFormat::Table),
            log_level: Some("info".to_string()),
        };

        let from_file = Settings::resolve(Overrides::default(), None, file.clone()).unwrap();
        assert_eq!(from_file.database, PathBuf::from("file.db"));
        assert_eq!(from_file.format, OutputFormat::Table);
        assert_eq!(from_file.log_level, Some(Level::INFO));

        let from_env = Settings::resolve(
            Overrides::default(),
            Some(PathBuf::from("env.db")),
            file.clone(),
        )
        .unwrap();
        assert_eq!(from_env.database, PathBuf::from("env.db"));

        let from_flags = Settings::resolve(
            Overrides {
                database: Some(PathBuf::from("flag.db")),
                format: Some(OutputFormat::Markdown),
            },
            Some(PathBuf::from("env.db")),
            file,
        )
        .unwrap();
        assert_eq!(from_flags.database, PathBuf::from("flag.db"));
        assert_eq!(from_flags.format, OutputFormat::Markdown);
    }

    #[test]
    fn invalid_log_level_is_a_config_error() {
        let file = FileConfig {
            log_level: Some("loud".to_string()),
            ..Default::default()
        };
        let err = Settings::resolve(Overrides::default(), None, file).unwrap_err();
        assert!(matches!(err, CatalogError::Config(_)));
    }
}
