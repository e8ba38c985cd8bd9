//! Configuration library for the profile-update client.
//!
//! Settings come from an optional TOML file, the process environment (after
//! an optional `.env` file has been applied) and built-in defaults, in that
//! order of increasing precedence for the environment. The composed
//! [`ClientConfig`] is checked by [`validation::apply_guard_rails`] before it
//! is handed out.

pub mod constants;
pub mod loader;
pub mod models;
pub mod sources;
pub mod util;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader};
pub use models::{ClientConfig, ConfigMetadata, TokenConfig};
pub use sources::{EnvConfig, FileConfig, FileTokenConfig};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
