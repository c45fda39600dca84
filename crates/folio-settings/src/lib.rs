//! # folio-settings
//!
//! Configuration management with layered sources for the folio backend.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults** — [`FolioSettings::default()`]
//! 2. **Settings file** — `folio.json` (deep-merged over defaults)
//! 3. **Environment variables** — `FOLIO_*` overrides (highest priority)
//!
//! There is no ambient global: the binary loads settings once at startup and
//! hands the server an `Arc<FolioSettings>` snapshot.
//!
//! # Usage
//!
//! ```no_run
//! let settings = folio_settings::load_settings().unwrap_or_default();
//! println!("listening on {}:{}", settings.server.host, settings.server.port);
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;
