//! Error type for `wwdtm-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] wwdtm_core::Error),

  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("date parse error: {0}")]
  DateParse(String),

  /// Decimal scores were requested from a database without the
  /// `panelistscore_decimal` column.
  #[error("decimal scores are not available in this database")]
  DecimalScoresUnavailable,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
