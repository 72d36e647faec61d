//! Standard hook implementations.

pub mod logging;

pub use logging::LoggingHook;
