//! CADASTUR registry lookup and guide name validation.
//!
//! The registry is a delimited flat file published by the tourism ministry.
//! [`RegistryIndex`] parses it into buckets keyed by registration number,
//! [`RegistryService`] owns the time-limited cache around the current index
//! and answers [`RegistryService::validate`] queries, and [`Verdict`] maps
//! the outcome onto the response vocabulary used by the signup endpoint.
//!
//! ```no_run
//! use cadastur_lookup::{RegistryConfig, RegistryService};
//!
//! let service = RegistryService::new(RegistryConfig::from_env());
//! service.refresh();
//!
//! let result = service.validate("Julieli Ferrari Santos", "214.679.858-79")?;
//! assert!(result.valid && !result.exact_match);
//! # Ok::<(), cadastur_lookup::RegistryError>(())
//! ```

pub mod columns;
pub mod config;
pub mod csv;
mod error;
pub mod index;
pub mod matching;
pub mod service;
pub mod source;
pub mod verdict;

pub use config::RegistryConfig;
pub use error::{ConfigError, RegistryError};
pub use index::{RegistryEntry, RegistryIndex};
pub use matching::{ValidationResult, match_entries};
pub use service::RegistryService;
pub use source::SourceLocator;
pub use verdict::{RegistrationRequest, RequestRejection, Verdict};
