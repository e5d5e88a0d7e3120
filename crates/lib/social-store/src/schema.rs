pub const DOC_SCHEDULED_POSTS: &str = "scheduled_posts.json";
pub const DOC_ANALYTICS_CACHE: &str = "analytics_cache.json";
pub const DOC_TRENDS_CACHE: &str = "trends_cache.json";
pub const DOC_COMPETITORS: &str = "competitors.json";

/// Wall-clock format used for `schedule_time` values (local time, 24-hour).
pub const SCHEDULE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub const POST_ID_LEN: usize = 8;

#[must_use]
pub fn make_cache_key(parts: &[&str]) -> String {
    parts.join("|")
}

#[must_use]
pub fn make_analytics_key(platform: &str, timeframe: &str, metric_type: &str) -> String {
    make_cache_key(&[platform, timeframe, metric_type])
}

#[must_use]
pub fn make_trends_key(platform: &str, category: &str, location: &str) -> String {
    make_cache_key(&[platform, category, location])
}
