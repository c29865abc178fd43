//! `wwdtm`: query a Wait Wait Don't Tell Me! stats database from the shell.
//!
//! Reads `wwdtm.toml` (or the path given with `--config`), opens the SQLite
//! stats database read-only and prints the requested records as JSON.
//!
//! # Usage
//!
//! ```
//! wwdtm --database stats.sqlite guest get tom-hanks --details
//! wwdtm show get 2018-10-27 --details
//! WWDTM_PATH=stats.sqlite wwdtm panelist get paula-poundstone --details --decimal
//! ```

mod command;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use command::Command;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use wwdtm_store_sqlite::{Database, DatabaseConfig};

#[derive(Parser)]
#[command(author, version, about = "Wait Wait Don't Tell Me! stats lookup")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "wwdtm.toml")]
  config: PathBuf,

  /// Stats database path. Overrides the configured `path`.
  #[arg(short, long, global = true)]
  database: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

fn main() -> anyhow::Result<()> {
  // Logs go to stderr so stdout stays valid JSON.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("WWDTM"))
    .set_override_option(
      "path",
      cli.database.map(|p| p.to_string_lossy().into_owned()),
    )
    .context("failed to apply --database")?
    .build()
    .context("failed to read config file")?;

  let mut db_config: DatabaseConfig = settings
    .try_deserialize()
    .context("failed to deserialise database config; set `path` or pass --database")?;
  db_config.path = expand_tilde(&db_config.path);

  let db = Database::open(&db_config)
    .with_context(|| format!("failed to open stats database at {:?}", db_config.path))?;
  tracing::debug!(path = %db_config.path.display(), "database ready");

  let output = cli.command.run(db)?;
  println!("{}", serde_json::to_string_pretty(&output)?);
  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
