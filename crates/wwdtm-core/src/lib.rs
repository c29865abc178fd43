//! Core types for the Wait Wait Don't Tell Me! stats data layer.
//!
//! Record shapes returned by the store, ID validation, slug derivation and the
//! score and ranking arithmetic. Nothing here touches a database;
//! `wwdtm-store-sqlite` builds on these types.

pub mod appearance;
pub mod entity;
pub mod error;
pub mod guest;
pub mod host;
pub mod location;
pub mod panelist;
pub mod pronoun;
pub mod rank;
pub mod scorekeeper;
pub mod show;
pub mod slug;
pub mod stats;
pub mod validation;

pub use error::{Error, Result};
pub use validation::valid_id;
