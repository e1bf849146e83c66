use std::time::Duration;

/// TTL class chosen by the caller of a cache-aside read.
///
/// Aggregates (archives, listings, dashboard stats) change rarely relative to
/// how often they are read and use the long class; single items use the
/// short one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheTtl {
    /// Single items (default 1 hour).
    Short,
    /// Archive and aggregate views (default 6 hours).
    Long,
    /// An explicit TTL, e.g. dashboard stats.
    Custom(Duration),
}

impl CacheTtl {
    /// Default TTL of the short class.
    pub const SHORT: Duration = Duration::from_secs(3600);

    /// Default TTL of the long class.
    pub const LONG: Duration = Duration::from_secs(21_600);

    /// Resolves the class against configured short and long TTLs.
    pub fn resolve(self, short: Duration, long: Duration) -> Duration {
        match self {
            CacheTtl::Short => short,
            CacheTtl::Long => long,
            CacheTtl::Custom(ttl) => ttl,
        }
    }
}

/// Expiry applied by every cache store: whole seconds, at least one.
///
/// Redis `SET EX` and `EXPIRE` only take whole, non-zero seconds; the
/// fallback store rounds the same way so both expire an entry alike.
pub fn store_ttl(ttl: Duration) -> Duration {
    Duration::from_secs(ttl.as_secs().max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_ttl_rounds_to_whole_seconds() {
        assert_eq!(store_ttl(Duration::ZERO), Duration::from_secs(1));
        assert_eq!(store_ttl(Duration::from_millis(300)), Duration::from_secs(1));
        assert_eq!(store_ttl(Duration::from_millis(2500)), Duration::from_secs(2));
        assert_eq!(store_ttl(Duration::from_secs(3600)), Duration::from_secs(3600));
    }

    #[test]
    fn test_resolve_with_defaults() {
        assert_eq!(
            CacheTtl::Short.resolve(CacheTtl::SHORT, CacheTtl::LONG),
            Duration::from_secs(3600)
        );
        assert_eq!(
            CacheTtl::Long.resolve(CacheTtl::SHORT, CacheTtl::LONG),
            Duration::from_secs(21_600)
        );
    }

    #[test]
    fn test_custom_ignores_configured_classes() {
        let ttl = CacheTtl::Custom(Duration::from_secs(600));
        assert_eq!(
            ttl.resolve(Duration::from_secs(1), Duration::from_secs(2)),
            Duration::from_secs(600)
        );
    }
}
