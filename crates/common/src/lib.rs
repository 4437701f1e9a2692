//! Shared runtime helpers for the talent hub binaries: logging setup and
//! startup environment checks.

pub mod utils;
pub mod env;
