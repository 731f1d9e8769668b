//! Process-wide ephemeris handle.
//!
//! The handle is created at most once. [`init`] installs an explicit
//! configuration; [`handle`] falls back to the default configuration when
//! nothing was installed. After the first call every access is lock-free.

use std::sync::{Arc, OnceLock};

use crate::engine::{AnalyticEphemeris, EphemerisConfig};
use crate::error::EphemerisError;

static ENGINE: OnceLock<Arc<AnalyticEphemeris>> = OnceLock::new();

/// Install the shared ephemeris with `config`.
///
/// Calling `init` again with the same configuration is a no-op; a different
/// configuration fails with [`EphemerisError::AlreadyInitialized`].
pub fn init(config: EphemerisConfig) -> Result<Arc<AnalyticEphemeris>, EphemerisError> {
    if let Some(existing) = ENGINE.get() {
        return if existing.config() == &config {
            Ok(Arc::clone(existing))
        } else {
            Err(EphemerisError::AlreadyInitialized)
        };
    }
    let engine = Arc::new(AnalyticEphemeris::new(config.clone())?);
    let installed = ENGINE.get_or_init(|| engine);
    if installed.config() == &config {
        Ok(Arc::clone(installed))
    } else {
        Err(EphemerisError::AlreadyInitialized)
    }
}

/// Shared handle, initialising with defaults on first use.
pub fn handle() -> Arc<AnalyticEphemeris> {
    Arc::clone(ENGINE.get_or_init(|| Arc::new(AnalyticEphemeris::with_default())))
}

/// Whether the shared handle has been created.
pub fn is_initialized() -> bool {
    ENGINE.get().is_some()
}
