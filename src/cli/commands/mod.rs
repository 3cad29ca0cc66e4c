//! Command implementations

pub mod generate;
pub mod init;
pub mod validate;
