//! Configuration section resolution.
//!
//! ```no_run
//! use deploy_cfg::config::{ConfigDocument, KeySpec, Overrides, ResolutionRequest};
//!
//! let doc = ConfigDocument::load("deploy.cfg")?;
//! let mut overrides = Overrides::new();
//! overrides.insert("port", "9090");
//!
//! let resolved = ResolutionRequest::new()
//!     .key(KeySpec::required("port").overridable())
//!     .require("server-threads")
//!     .resolve(doc.section("NarrativeMethodStore")?, &overrides)?;
//!
//! assert_eq!(resolved.get("port"), Some("9090"));
//! # Ok::<(), deploy_cfg::ConfigError>(())
//! ```

mod document;
mod error;
mod file;
mod overrides;
mod request;

pub use document::{ConfigDocument, ConfigSection};
pub use error::ConfigError;
pub use file::Format;
pub use overrides::Overrides;
pub use request::{KeySpec, ResolutionRequest, ResolutionResult, ValueOrigin};
