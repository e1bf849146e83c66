mod error;
mod keys;
mod patterns;
mod reconnect;
mod serialization;
mod traits;
mod ttl;

pub use error::{CacheError, Result};
pub use keys::{
    blog_key, dashboard_stats_key, denylist_key, login_attempts_key, login_block_key,
    project_key, view_total_key, view_tracking_key, view_tracking_key_for, view_visitor_key,
    views_pattern, BLOG_ARCHIVE_KEY, BLOG_LIST_KEY, DASHBOARD_STATS_KEY, PROJECT_LIST_KEY,
};
pub use patterns::pattern_matches;
pub use reconnect::{reconnect_delay, ReconnectPolicy};
pub use serialization::{decode_value, encode_value, is_empty_value, parse_counter};
pub use traits::Cache;
pub use ttl::{store_ttl, CacheTtl};
