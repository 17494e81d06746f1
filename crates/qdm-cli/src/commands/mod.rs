//! CLI command implementations.

pub mod common;
pub mod density;
pub mod gates;
pub mod init;
pub mod sweep;
pub mod version;
pub mod width;
