//! Browser implementations of the feed client's seams.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde_json::Value;

use super::error::FeedError;
use super::fetch::{Clock, Delay, FeedClient, Transport};
use crate::config::FeedConfig;

pub type BrowserFeedClient = FeedClient<GlooTransport, TimerDelay, BrowserClock>;

thread_local! {
    /// One client per feed URL so its cache outlives any single component
    static CLIENTS: RefCell<HashMap<String, Rc<BrowserFeedClient>>> =
        RefCell::new(HashMap::new());
}

impl BrowserFeedClient {
    pub fn browser(config: FeedConfig) -> Self {
        FeedClient::new(GlooTransport, TimerDelay, BrowserClock, config)
    }

    /// The page-wide client for `config.url`; the first config for a URL wins
    pub fn shared(config: FeedConfig) -> Rc<Self> {
        CLIENTS.with(|clients| {
            clients
                .borrow_mut()
                .entry(config.url.clone())
                .or_insert_with(|| Rc::new(Self::browser(config)))
                .clone()
        })
    }
}

/// `fetch` via gloo-net; the request is aborted if its future is dropped
pub struct GlooTransport;

struct AbortOnDrop(Option<web_sys::AbortController>);

impl AbortOnDrop {
    fn signal(&self) -> Option<web_sys::AbortSignal> {
        self.0.as_ref().map(|controller| controller.signal())
    }

    fn disarm(mut self) {
        self.0 = None;
    }
}

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        if let Some(controller) = self.0.take() {
            controller.abort();
        }
    }
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn get_json(&self, url: &str) -> Result<Value, FeedError> {
        let controller = web_sys::AbortController::new()
            .map_err(|e| FeedError::Network(format!("{:?}", e)))?;
        let guard = AbortOnDrop(Some(controller));
        let signal = guard.signal();

        let response = Request::get(url)
            .abort_signal(signal.as_ref())
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(FeedError::Status(response.status()));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| FeedError::Decode(e.to_string()))?;
        guard.disarm();
        Ok(body)
    }
}

pub struct TimerDelay;

#[async_trait(?Send)]
impl Delay for TimerDelay {
    async fn sleep(&self, ms: u32) {
        TimeoutFuture::new(ms).await;
    }
}

pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(url: &str) -> FeedConfig {
        FeedConfig {
            url: url.to_string(),
            ..FeedConfig::default()
        }
    }

    #[test]
    fn test_shared_client_is_reused_per_url() {
        let first = BrowserFeedClient::shared(config_for("/data/posts.json"));
        let again = BrowserFeedClient::shared(config_for("/data/posts.json"));
        let other = BrowserFeedClient::shared(config_for("/data/other.json"));

        assert!(Rc::ptr_eq(&first, &again));
        assert!(!Rc::ptr_eq(&first, &other));
        assert_eq!(other.url(), "/data/other.json");
    }
}
