//! Solar panel power estimation for sun-tracking panels on LEO spacecraft.
//!
//! The pipeline combines orbital state, eclipse geometry, and illuminated
//! panel cross-section into a per-timestep power series. Keeping the logic
//! in a library crate lets multiple front-ends (CLI, batch jobs) share it.

pub mod comparator;
pub mod oracle;
pub mod pipeline;

pub use power_attitude as attitude;
pub use power_config as config;
pub use power_core;
pub use power_eclipse as eclipse;
pub use power_elements as elements;
pub use power_export as export;
pub use power_importer as importer;
pub use power_irradiance as irradiance;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
