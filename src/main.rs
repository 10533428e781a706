//! Command-line interface for mysqldbgen
//!
//! # Usage Examples
//!
//! ```bash
//! # Defaults: localhost:3306, root/root, database mytestdb, 100 records
//! mysqldbgen
//!
//! # Larger load, connection taken from the environment
//! MYSQL_HOST=db.internal MYSQL_PASSWORD=secret \
//!   mysqldbgen --numWorkers 16 --dbRecords2Process 1000000 --pcentOutput 1
//!
//! # YAML config with camelCase keys, flags win over file values
//! mysqldbgen --config mysqldbgen.yaml --dbname other
//! ```

use clap::Parser;
use loadgen_populate::LoadArgs;
use loadgen_populate_mysql::MySQLConnectionArgs;
use mysqldbgen::{cancel_on_ctrl_c, Settings};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mysqldbgen")]
#[command(about = "Fill a MySQL database with synthetic test records")]
#[command(version)]
struct Cli {
    /// Path to YAML config file (optional)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    connection: MySQLConnectionArgs,

    #[command(flatten)]
    load: LoadArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::resolve(cli.config.as_deref(), &cli.connection, &cli.load)?;

    let cancel = CancellationToken::new();
    cancel_on_ctrl_c(cancel.clone());

    mysqldbgen::run(&settings, cancel).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_faker_flag_overrides_config_file() {
        let cli = Cli::parse_from(["mysqldbgen", "--config", "x.yaml", "--runOnlyFaker=false"]);
        assert_eq!(cli.load.run_only_faker, Some(false));
    }

    #[test]
    fn test_cli_parses_all_layers() {
        let cli = Cli::parse_from([
            "mysqldbgen",
            "--config",
            "mysqldbgen.yaml",
            "--host",
            "db.internal",
            "--numWorkers",
            "4",
            "--runOnlyFaker",
        ]);

        assert_eq!(cli.config, Some(PathBuf::from("mysqldbgen.yaml")));
        assert_eq!(cli.connection.host.as_deref(), Some("db.internal"));
        assert_eq!(cli.load.num_workers, Some(4));
        assert_eq!(cli.load.run_only_faker, Some(true));
    }
}
