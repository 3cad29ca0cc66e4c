//! S3-compatible blob storage adapter

pub mod client;
pub mod sign;

pub use client::S3Client;
