//! Feed Client
//!
//! Cache lookup, then a bounded number of timeout-limited attempts with
//! linear backoff. The whole operation can be cancelled from the outside.

use std::cell::RefCell;
use std::future::Future;
use std::pin::pin;

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::future::{select, Either, FutureExt, Shared};
use serde_json::Value;

use super::cache::TtlCache;
use super::error::FeedError;
use crate::config::FeedConfig;
use crate::models::BlogEntry;

/// Issues a GET and returns the decoded JSON body.
/// Non-success statuses must map to `FeedError::Status`.
#[async_trait(?Send)]
pub trait Transport {
    async fn get_json(&self, url: &str) -> Result<Value, FeedError>;
}

#[async_trait(?Send)]
pub trait Delay {
    async fn sleep(&self, ms: u32);
}

pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Fires cancellation when `cancel` is called or the handle is dropped
pub struct CancelHandle(oneshot::Sender<()>);

#[derive(Clone)]
pub struct CancelSignal(Shared<oneshot::Receiver<()>>);

pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = oneshot::channel();
    (CancelHandle(tx), CancelSignal(rx.shared()))
}

impl CancelHandle {
    pub fn cancel(self) {
        let _ = self.0.send(());
    }
}

impl CancelSignal {
    pub async fn cancelled(&self) {
        let _ = self.0.clone().await;
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.peek().is_some()
    }
}

/// Run `fut` unless `cancel` fires first
async fn until_cancelled<F: Future>(fut: F, cancel: &CancelSignal) -> Option<F::Output> {
    let fut = pin!(fut);
    let cancelled = pin!(cancel.cancelled());
    match select(fut, cancelled).await {
        Either::Left((output, _)) => Some(output),
        Either::Right(_) => None,
    }
}

/// Accept only a JSON array of entries
pub fn decode_entries(body: Value) -> Result<Vec<BlogEntry>, FeedError> {
    if !body.is_array() {
        return Err(FeedError::NotAnArray);
    }
    serde_json::from_value(body).map_err(|e| FeedError::Decode(e.to_string()))
}

pub struct FeedClient<T, D, C> {
    transport: T,
    delay: D,
    clock: C,
    config: FeedConfig,
    cache: RefCell<TtlCache<Vec<BlogEntry>>>,
}

impl<T: Transport, D: Delay, C: Clock> FeedClient<T, D, C> {
    pub fn new(transport: T, delay: D, clock: C, config: FeedConfig) -> Self {
        let cache = TtlCache::new(config.cache_capacity, config.cache_ttl_ms);
        Self {
            transport,
            delay,
            clock,
            config,
            cache: RefCell::new(cache),
        }
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Fetch all posts, served from cache while fresh
    pub async fn fetch_posts(
        &self,
        cancel: &CancelSignal,
    ) -> Result<Vec<BlogEntry>, FeedError> {
        let url = self.config.url.as_str();
        let cached = self.cache.borrow_mut().get(url, self.clock.now_ms()).cloned();
        if let Some(entries) = cached {
            log::debug!("[BLOG] cache hit for {} ({} posts)", url, entries.len());
            return Ok(entries);
        }

        let retries = self.config.retries.max(1);
        let mut last = FeedError::Network("no attempt made".to_string());

        for remaining in (1..=retries).rev() {
            let attempt = retries - remaining + 1;
            match self.attempt(url, cancel).await {
                Ok(entries) => {
                    log::info!("[BLOG] fetched {} posts on attempt {}", entries.len(), attempt);
                    self.cache
                        .borrow_mut()
                        .insert(url, entries.clone(), self.clock.now_ms());
                    return Ok(entries);
                }
                Err(err) if !err.is_retryable() => return Err(err),
                Err(err) => {
                    log::warn!("[BLOG] attempt {}/{} failed: {}", attempt, retries, err);
                    last = err;
                }
            }

            if remaining > 1 {
                let wait = self.config.retry_base_delay_ms.saturating_mul(remaining);
                log::debug!("[BLOG] retrying in {}ms", wait);
                if until_cancelled(self.delay.sleep(wait), cancel).await.is_none() {
                    return Err(FeedError::Cancelled);
                }
            }
        }

        Err(FeedError::Exhausted {
            attempts: retries,
            last: Box::new(last),
        })
    }

    async fn attempt(&self, url: &str, cancel: &CancelSignal) -> Result<Vec<BlogEntry>, FeedError> {
        let timeout_ms = self.config.request_timeout_ms;
        let bounded = async {
            let request = pin!(self.transport.get_json(url));
            let timeout = pin!(self.delay.sleep(timeout_ms));
            match select(request, timeout).await {
                Either::Left((body, _)) => body,
                Either::Right(_) => Err(FeedError::Timeout(timeout_ms)),
            }
        };
        let body = until_cancelled(bounded, cancel).await.ok_or(FeedError::Cancelled)??;
        decode_entries(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    /// Replays queued responses; an empty queue hangs forever
    #[derive(Clone, Default)]
    struct FakeTransport {
        responses: Rc<RefCell<VecDeque<Result<Value, FeedError>>>>,
        calls: Rc<Cell<u32>>,
    }

    impl FakeTransport {
        fn with(responses: Vec<Result<Value, FeedError>>) -> Self {
            let fake = Self::default();
            fake.responses.borrow_mut().extend(responses);
            fake
        }
    }

    #[async_trait(?Send)]
    impl Transport for FakeTransport {
        async fn get_json(&self, _url: &str) -> Result<Value, FeedError> {
            self.calls.set(self.calls.get() + 1);
            let next = self.responses.borrow_mut().pop_front();
            match next {
                Some(response) => response,
                None => futures::future::pending().await,
            }
        }
    }

    /// Records every completed sleep; `hang` makes sleeps never finish
    #[derive(Clone, Default)]
    struct FakeDelay {
        slept: Rc<RefCell<Vec<u32>>>,
        hang: bool,
    }

    #[async_trait(?Send)]
    impl Delay for FakeDelay {
        async fn sleep(&self, ms: u32) {
            if self.hang {
                futures::future::pending::<()>().await;
            }
            self.slept.borrow_mut().push(ms);
        }
    }

    #[derive(Clone, Default)]
    struct FakeClock(Rc<Cell<f64>>);

    impl Clock for FakeClock {
        fn now_ms(&self) -> f64 {
            self.0.get()
        }
    }

    fn posts() -> Value {
        json!([
            {"title": "First", "category": "x", "reading_time": "5", "published_date": "2024-01-01"},
            {"title": "Second", "category": "y", "reading_time": 10, "published_date": "2024-01-02"}
        ])
    }

    fn client(
        transport: &FakeTransport,
        delay: &FakeDelay,
        clock: &FakeClock,
    ) -> FeedClient<FakeTransport, FakeDelay, FakeClock> {
        let config = FeedConfig {
            url: "/data/posts.json".to_string(),
            ..FeedConfig::default()
        };
        FeedClient::new(transport.clone(), delay.clone(), clock.clone(), config)
    }

    #[test]
    fn test_fresh_cache_skips_network() {
        let transport = FakeTransport::with(vec![Ok(posts()), Ok(posts())]);
        let (delay, clock) = (FakeDelay::default(), FakeClock::default());
        let client = client(&transport, &delay, &clock);
        let (_handle, cancel) = cancel_pair();

        let first = block_on(client.fetch_posts(&cancel)).expect("first fetch");
        clock.0.set(4.0 * 60.0 * 1000.0);
        let second = block_on(client.fetch_posts(&cancel)).expect("cached fetch");

        assert_eq!(transport.calls.get(), 1);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);

        clock.0.set(5.0 * 60.0 * 1000.0 + 1.0);
        block_on(client.fetch_posts(&cancel)).expect("refetch after expiry");
        assert_eq!(transport.calls.get(), 2);
    }

    #[test]
    fn test_retries_until_success_with_two_delays() {
        let transport = FakeTransport::with(vec![
            Err(FeedError::Status(500)),
            Err(FeedError::Network("connection reset".to_string())),
            Ok(posts()),
        ]);
        let (delay, clock) = (FakeDelay::default(), FakeClock::default());
        let client = client(&transport, &delay, &clock);
        let (_handle, cancel) = cancel_pair();

        let entries = block_on(client.fetch_posts(&cancel)).expect("third attempt succeeds");

        assert_eq!(entries[0].title, "First");
        assert_eq!(transport.calls.get(), 3);
        assert_eq!(*delay.slept.borrow(), vec![3000, 2000]);
    }

    #[test]
    fn test_non_array_body_is_retried_then_surfaced() {
        let transport = FakeTransport::with(vec![
            Ok(json!({"posts": []})),
            Err(FeedError::Status(503)),
            Ok(json!("oops")),
        ]);
        let (delay, clock) = (FakeDelay::default(), FakeClock::default());
        let client = client(&transport, &delay, &clock);
        let (_handle, cancel) = cancel_pair();

        let err = block_on(client.fetch_posts(&cancel)).unwrap_err();

        assert_eq!(transport.calls.get(), 3);
        assert_eq!(
            err,
            FeedError::Exhausted {
                attempts: 3,
                last: Box::new(FeedError::NotAnArray)
            }
        );
        assert_eq!(
            err.to_string(),
            "failed to fetch posts after 3 attempts: response is not a JSON array"
        );
        // Nothing cached on failure
        assert!(client.cache.borrow().is_empty());
    }

    #[test]
    fn test_malformed_entries_are_decode_errors() {
        let err = decode_entries(json!([{"category": "missing title"}])).unwrap_err();
        assert!(matches!(err, FeedError::Decode(_)));
        assert_eq!(decode_entries(json!([])), Ok(vec![]));
    }

    #[test]
    fn test_hanging_request_times_out() {
        let transport = FakeTransport::default();
        let (delay, clock) = (FakeDelay::default(), FakeClock::default());
        let client = client(&transport, &delay, &clock);
        let (_handle, cancel) = cancel_pair();

        let err = block_on(client.fetch_posts(&cancel)).unwrap_err();

        assert_eq!(transport.calls.get(), 3);
        match err {
            FeedError::Exhausted { last, .. } => assert_eq!(*last, FeedError::Timeout(10_000)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_cancel_during_backoff_stops_retrying() {
        let transport = FakeTransport::with(vec![Err(FeedError::Status(500)), Ok(posts())]);
        let delay = FakeDelay { hang: true, ..FakeDelay::default() };
        let clock = FakeClock::default();
        let client = client(&transport, &delay, &clock);
        let (handle, cancel) = cancel_pair();
        handle.cancel();

        let err = block_on(client.fetch_posts(&cancel)).unwrap_err();

        assert_eq!(err, FeedError::Cancelled);
        assert_eq!(transport.calls.get(), 1);
        assert!(cancel.is_cancelled());
    }

    #[test]
    fn test_cancel_interrupts_in_flight_request() {
        let transport = FakeTransport::default();
        let delay = FakeDelay { hang: true, ..FakeDelay::default() };
        let clock = FakeClock::default();
        let client = client(&transport, &delay, &clock);
        let (handle, cancel) = cancel_pair();

        let mut fetch = Box::pin(client.fetch_posts(&cancel));
        assert!(fetch.as_mut().now_or_never().is_none(), "request should still be pending");
        assert_eq!(transport.calls.get(), 1);

        handle.cancel();
        let err = block_on(fetch).unwrap_err();

        assert_eq!(err, FeedError::Cancelled);
        assert_eq!(transport.calls.get(), 1);
        assert!(delay.slept.borrow().is_empty());
    }

    #[test]
    fn test_dropping_handle_cancels() {
        let (handle, cancel) = cancel_pair();
        assert!(!cancel.is_cancelled());
        drop(handle);
        block_on(cancel.cancelled());
        assert!(cancel.is_cancelled());
    }
}
