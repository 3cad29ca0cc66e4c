//! External integrations
//!
//! - [`postgres`] - pooled client shared by the relational stores
//! - [`roster`] - paginated reader over the entity store
//! - [`activity`] - aggregating reader over the event store
//! - [`registry`] - report metadata writer
//! - [`s3`] - blob storage client with SigV4 signing

pub mod activity;
pub mod postgres;
pub mod registry;
pub mod roster;
pub mod s3;
