//! Layered configuration: built-in defaults, an optional YAML file, then
//! command-line flags.

use anyhow::Context;
use loadgen_populate::{ConfigError, LoadArgs, LoadConfig};
use loadgen_populate_mysql::{MySQLConnection, MySQLConnectionArgs};
use loadgen_record::RecordConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Keys accepted in the YAML config file. Missing keys keep their defaults
/// and unknown keys are ignored.
#[derive(Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
    pub run_only_faker: bool,
    pub num_workers: usize,
    #[serde(rename = "dbRecords2Process")]
    pub db_records: u64,
    pub pcent_output: u32,
    pub min_days: i64,
    pub max_days: i64,
    pub delay_last_login: i64,
    pub seed: Option<u64>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Settings::default().into()
    }
}

impl From<Settings> for FileConfig {
    fn from(settings: Settings) -> Self {
        let Settings {
            connection,
            load,
            run_only_faker,
            ..
        } = settings;
        Self {
            host: connection.host,
            port: connection.port,
            user: connection.user,
            password: connection.password,
            dbname: connection.dbname,
            run_only_faker,
            num_workers: load.workers,
            db_records: load.target,
            pcent_output: load.pcent_output,
            min_days: load.record.min_created_ago,
            max_days: load.record.max_created_ago,
            delay_last_login: load.record.max_last_login_delay,
            seed: load.seed,
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub connection: MySQLConnection,
    pub load: LoadConfig,
    pub run_only_faker: bool,
    /// File the settings were read from, if any.
    pub config_path: Option<PathBuf>,
}

impl Settings {
    /// Read settings from a YAML file on top of the defaults.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let file: FileConfig = if content.trim().is_empty() {
            FileConfig::default()
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        };

        let mut settings = Self::from(file);
        settings.config_path = Some(path.to_path_buf());
        Ok(settings)
    }

    /// Defaults, then the file at `config_path`, then the given flags.
    pub fn resolve(
        config_path: Option<&Path>,
        connection_args: &MySQLConnectionArgs,
        load_args: &LoadArgs,
    ) -> anyhow::Result<Self> {
        let mut settings = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        connection_args.apply_to(&mut settings.connection);
        load_args.apply_to(&mut settings.load);
        if let Some(run_only_faker) = load_args.run_only_faker {
            settings.run_only_faker = run_only_faker;
        }
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.load.validate()
    }
}

impl From<FileConfig> for Settings {
    fn from(file: FileConfig) -> Self {
        Self {
            connection: MySQLConnection {
                host: file.host,
                port: file.port,
                user: file.user,
                password: file.password,
                dbname: file.dbname,
            },
            load: LoadConfig {
                workers: file.num_workers,
                target: file.db_records,
                pcent_output: file.pcent_output,
                record: RecordConfig {
                    min_created_ago: file.min_days,
                    max_created_ago: file.max_days,
                    max_last_login_delay: file.delay_last_login,
                },
                seed: file.seed,
            },
            run_only_faker: file.run_only_faker,
            config_path: None,
        }
    }
}
