// Module declarations for the library crate.

pub mod cli;
pub mod config;
pub mod seed;
pub mod stamp;
pub mod telemetry;
pub mod util;

// Re-export the two entry points for the binary and tests.
pub use seed::seed_defaults;
pub use stamp::stamp;
