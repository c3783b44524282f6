//! Wire types for the Acquia Cloud API v2 endpoints consumed by `drush-alias`.

pub mod hosting;
pub mod types;

pub use hosting::HostingType;
pub use types::*;
