//! Redis error mapping to CacheError.

use folio_core::cache::CacheError;

/// Maps Redis errors to CacheError.
///
/// Errors that mean the connection itself is unusable become
/// `ConnectionFailed`, which moves the client to the fallback store.
pub fn map_redis_error(err: redis::RedisError) -> CacheError {
    if err.is_connection_refusal()
        || err.is_timeout()
        || err.is_connection_dropped()
        || err.is_io_error()
    {
        CacheError::ConnectionFailed(err.to_string())
    } else {
        CacheError::OperationFailed(err.to_string())
    }
}
