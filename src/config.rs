//! Frontend Configuration
//!
//! Compile-time settings plus per-controller defaults.

/// Feed endpoint, read at compile time from `BLOG_FEED_URL`
pub const FEED_URL: &str = match option_env!("BLOG_FEED_URL") {
    Some(url) => url,
    None => "/data/posts.json",
};

/// Quiet period before a search keystroke is applied
pub const SEARCH_DEBOUNCE_MS: u32 = 250;

/// Lines kept by the in-memory log buffer
pub const LOG_BUFFER_LINES: usize = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct FeedConfig {
    pub url: String,
    pub per_page: usize,
    /// Total attempts per fetch
    pub retries: u32,
    pub retry_base_delay_ms: u32,
    pub cache_ttl_ms: f64,
    pub cache_capacity: usize,
    pub request_timeout_ms: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: FEED_URL.to_string(),
            per_page: 6,
            retries: 3,
            retry_base_delay_ms: 1000,
            cache_ttl_ms: 5.0 * 60.0 * 1000.0,
            cache_capacity: 16,
            request_timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavConfig {
    /// Widths below this use the collapsible mobile menu
    pub mobile_breakpoint_px: f64,
    /// Shrinks the observed region to the viewport's vertical center
    pub spy_root_margin: &'static str,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint_px: 768.0,
            spy_root_margin: "-50% 0px -50% 0px",
        }
    }
}
