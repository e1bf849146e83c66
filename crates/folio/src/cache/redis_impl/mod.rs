//! Redis cache backend.
//!
//! [`RedisConnector`] opens multiplexed connections that the cache client
//! supervises; [`RedisCache`] implements the byte-level [`Cache`] trait on
//! top of one connection.
//!
//! [`Cache`]: folio_core::cache::Cache

mod cache;
mod error;

pub use cache::{RedisCache, RedisConnector};
