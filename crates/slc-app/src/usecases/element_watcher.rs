//! Waits for platform-rendered elements to appear.
//!
//! Platform pages render their share UI lazily, so handlers poll for the
//! element ids they need. Production policy never gives up: an element that
//! is never rendered keeps its wait pending until the page goes away.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use slc_core::config::WatcherSettings;
use slc_core::dom::ElementHandle;
use slc_core::ids::ElementId;
use slc_core::ports::DomPort;
use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// Polling policy for [`ElementWatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchPolicy {
    pub interval: Duration,
    /// `None` polls until the element appears or the watcher is cancelled.
    pub max_attempts: Option<u32>,
}

impl WatchPolicy {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

    pub fn unbounded(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
        }
    }

    pub fn bounded(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts: Some(max_attempts),
        }
    }
}

impl Default for WatchPolicy {
    fn default() -> Self {
        Self::unbounded(Self::DEFAULT_INTERVAL)
    }
}

impl From<&WatcherSettings> for WatchPolicy {
    fn from(settings: &WatcherSettings) -> Self {
        Self {
            interval: Duration::from_millis(settings.poll_interval_ms),
            max_attempts: settings.max_attempts,
        }
    }
}

/// Error type for element waits that end without an element.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WatchError {
    #[error("gave up waiting for {id} after {attempts} checks")]
    AttemptsExhausted { id: ElementId, attempts: u32 },

    #[error("wait for {id} was cancelled")]
    Cancelled { id: ElementId },
}

/// Resolves element ids to handles, once per id.
///
/// Concurrent waits for the same id share one poll loop, so checks for an id
/// never overlap. Resolved handles are cached for the watcher's lifetime.
pub struct ElementWatcher {
    dom: Arc<dyn DomPort>,
    policy: WatchPolicy,
    cancel: CancellationToken,
    slots: Mutex<HashMap<ElementId, Arc<OnceCell<ElementHandle>>>>,
}

impl ElementWatcher {
    pub fn new(dom: Arc<dyn DomPort>, policy: WatchPolicy) -> Self {
        Self {
            dom,
            policy,
            cancel: CancellationToken::new(),
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn policy(&self) -> WatchPolicy {
        self.policy
    }

    /// Wait until `id` is present and return its handle.
    ///
    /// # Returns
    /// - `Ok(handle)` once the element exists; later calls return the same
    ///   handle immediately
    /// - `Err(WatchError::AttemptsExhausted)` only under a bounded policy
    /// - `Err(WatchError::Cancelled)` after [`ElementWatcher::cancel`]
    pub async fn wait_for(&self, id: &ElementId) -> Result<ElementHandle, WatchError> {
        let slot = self.slot(id);
        let resolved = slot.get_or_try_init(|| self.poll(id)).await.cloned();
        resolved
    }

    /// Cached handle for `id`, without polling.
    pub fn resolved(&self, id: &ElementId) -> Option<ElementHandle> {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .and_then(|slot| slot.get().cloned())
    }

    /// Stop every pending and future wait.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn slot(&self, id: &ElementId) -> Arc<OnceCell<ElementHandle>> {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(id.clone())
            .or_default()
            .clone()
    }

    async fn poll(&self, id: &ElementId) -> Result<ElementHandle, WatchError> {
        let mut attempts: u32 = 0;
        loop {
            if self.cancel.is_cancelled() {
                return Err(WatchError::Cancelled { id: id.clone() });
            }

            if let Some(handle) = self.dom.get_element_by_id(id) {
                debug!(element = %id, attempts = attempts + 1, "Element found");
                return Ok(handle);
            }

            attempts = attempts.saturating_add(1);
            if let Some(max) = self.policy.max_attempts {
                if attempts >= max {
                    debug!(element = %id, attempts, "Giving up on element");
                    return Err(WatchError::AttemptsExhausted {
                        id: id.clone(),
                        attempts,
                    });
                }
            }

            trace!(element = %id, attempts, "Element not rendered yet");
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    return Err(WatchError::Cancelled { id: id.clone() });
                }
                _ = tokio::time::sleep(self.policy.interval) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slc_core::dom::{ClickHandler, DomEvent, EventListener, ListenerOptions};
    use slc_platform::adapters::InMemoryDom;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Page that renders the element after a fixed number of lookups.
    struct LateDom {
        lookups: AtomicU32,
        appears_after: u32,
    }

    impl LateDom {
        fn new(appears_after: u32) -> Self {
            Self {
                lookups: AtomicU32::new(0),
                appears_after,
            }
        }

        fn lookups(&self) -> u32 {
            self.lookups.load(Ordering::SeqCst)
        }
    }

    impl DomPort for LateDom {
        fn get_element_by_id(&self, id: &ElementId) -> Option<ElementHandle> {
            let n = self.lookups.fetch_add(1, Ordering::SeqCst) + 1;
            (n > self.appears_after).then(|| ElementHandle::new(id.clone(), 7))
        }

        fn add_event_listener(
            &self,
            _element: &ElementHandle,
            _event: DomEvent,
            _listener: EventListener,
            _options: ListenerOptions,
        ) -> anyhow::Result<()> {
            Ok(())
        }

        fn click_handler(&self, _element: &ElementHandle) -> Option<ClickHandler> {
            None
        }

        fn set_click_handler(&self, _element: &ElementHandle, _handler: ClickHandler) -> anyhow::Result<()> {
            Ok(())
        }

        fn input_value(&self, _id: &ElementId) -> Option<String> {
            None
        }

        fn set_input_value(&self, _id: &ElementId, _value: &str) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn id() -> ElementId {
        ElementId::from("copy-button")
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_polls_until_element_appears() {
        let dom = Arc::new(LateDom::new(3));
        let watcher = ElementWatcher::new(dom.clone(), WatchPolicy::default());

        let started = tokio::time::Instant::now();
        let handle = watcher.wait_for(&id()).await.unwrap();

        assert_eq!(handle.id(), &id());
        assert_eq!(dom.lookups(), 4);
        let waited = started.elapsed();
        assert!(waited >= Duration::from_millis(1500), "waited {:?}", waited);
        assert!(waited < Duration::from_millis(2000), "waited {:?}", waited);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolved_id_is_not_polled_again() {
        let dom = Arc::new(LateDom::new(0));
        let watcher = ElementWatcher::new(dom.clone(), WatchPolicy::default());

        let first = watcher.wait_for(&id()).await.unwrap();
        let second = watcher.wait_for(&id()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(dom.lookups(), 1);
        assert_eq!(watcher.resolved(&id()), Some(first));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_waits_share_one_poll_loop() {
        let dom = Arc::new(LateDom::new(2));
        let watcher = Arc::new(ElementWatcher::new(dom.clone(), WatchPolicy::default()));

        let a = tokio::spawn({
            let watcher = watcher.clone();
            async move { watcher.wait_for(&id()).await }
        });
        let b = tokio::spawn({
            let watcher = watcher.clone();
            async move { watcher.wait_for(&id()).await }
        });

        let a = a.await.unwrap().unwrap();
        let b = b.await.unwrap().unwrap();

        assert_eq!(a, b);
        assert_eq!(dom.lookups(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bounded_policy_gives_up() {
        let dom = Arc::new(LateDom::new(u32::MAX));
        let watcher = ElementWatcher::new(
            dom.clone(),
            WatchPolicy::bounded(Duration::from_millis(500), 3),
        );

        let err = watcher.wait_for(&id()).await.unwrap_err();

        assert_eq!(
            err,
            WatchError::AttemptsExhausted {
                id: id(),
                attempts: 3
            }
        );
        assert_eq!(dom.lookups(), 3);
        assert_eq!(watcher.resolved(&id()), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_halts_pending_wait() {
        let dom = Arc::new(LateDom::new(u32::MAX));
        let watcher = Arc::new(ElementWatcher::new(dom.clone(), WatchPolicy::default()));

        let pending = tokio::spawn({
            let watcher = watcher.clone();
            async move { watcher.wait_for(&id()).await }
        });

        tokio::time::sleep(Duration::from_millis(1200)).await;
        watcher.cancel();

        let err = pending.await.unwrap().unwrap_err();
        assert_eq!(err, WatchError::Cancelled { id: id() });
        assert_eq!(dom.lookups(), 3);

        // cancelled watchers never touch the page again
        assert!(watcher.wait_for(&id()).await.is_err());
        assert_eq!(dom.lookups(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_resolves_to_rerendered_element() {
        let dom = Arc::new(InMemoryDom::new());
        let removed = dom.insert_element(id());
        dom.remove_element(id());
        let watcher = Arc::new(ElementWatcher::new(dom.clone(), WatchPolicy::default()));

        let pending = tokio::spawn({
            let watcher = watcher.clone();
            async move { watcher.wait_for(&id()).await }
        });

        tokio::time::sleep(Duration::from_millis(1200)).await;
        assert!(!pending.is_finished());
        let rendered = dom.insert_element(id());

        let handle = pending.await.unwrap().unwrap();
        assert_eq!(handle, rendered);
        assert_ne!(handle, removed);
        assert_eq!(watcher.resolved(&id()), Some(rendered));
    }

    #[test]
    fn test_policy_from_settings() {
        let policy = WatchPolicy::from(&WatcherSettings {
            poll_interval_ms: 250,
            max_attempts: Some(8),
        });
        assert_eq!(policy, WatchPolicy::bounded(Duration::from_millis(250), 8));
        assert_eq!(WatchPolicy::default().max_attempts, None);
    }
}
