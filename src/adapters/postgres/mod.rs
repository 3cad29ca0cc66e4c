//! Pooled PostgreSQL client shared by the store adapters

pub mod client;

pub use client::StoreClient;
