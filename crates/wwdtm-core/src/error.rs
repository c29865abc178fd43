//! Error types for `wwdtm-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// None of the location slug rules matched the supplied fields.
  #[error("invalid location information provided")]
  InvalidLocation,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
