//! Small helpers shared by the workspace binaries: environment lookups and
//! tracing setup.

pub mod env;
pub mod logging;
