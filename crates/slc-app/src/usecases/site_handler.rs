//! Per-page handler orchestrator.
//!
//! Executes the actions returned by [`HandlerStateMachine`] against the page:
//! watches for triggers, attaches listeners and runs the platform's
//! clipboard interception strategy.
//!
//! [`HandlerStateMachine`]: slc_core::handler::HandlerStateMachine

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use slc_core::dom::{DomEvent, ElementHandle, EventListener, ListenerOptions};
use slc_core::handler::{HandlerAction, HandlerEvent};
use slc_core::ids::ElementId;
use slc_core::ports::{ClipboardTextPort, DomPort};
use slc_core::{HandlerPhase, HandlerState, ListenMode, Normalizer, PlatformSpec};
use tokio::runtime::Handle;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::usecases::clipboard_interceptor::{rewrite_copied_link, CopyOverride};
use crate::usecases::element_watcher::{ElementWatcher, WatchError, WatchPolicy};

/// Page capabilities granted by the host.
#[derive(Clone)]
pub struct PageHost {
    pub dom: Arc<dyn DomPort>,
    pub clipboard: Arc<dyn ClipboardTextPort>,
}

impl PageHost {
    pub fn new(dom: Arc<dyn DomPort>, clipboard: Arc<dyn ClipboardTextPort>) -> Self {
        Self { dom, clipboard }
    }
}

/// Triggers the handler resolves through the watcher.
#[derive(Debug, Clone, Copy)]
enum Trigger {
    Share,
    Inner,
    Copy,
}

impl Trigger {
    fn element_id(self, spec: &PlatformSpec) -> Option<&ElementId> {
        match self {
            Trigger::Share => Some(&spec.elements.share_trigger),
            Trigger::Inner => spec.elements.inner_trigger.as_ref(),
            Trigger::Copy => spec.elements.copy_trigger.as_ref(),
        }
    }

    fn slot(self, state: &mut HandlerState) -> &mut Option<ElementHandle> {
        match self {
            Trigger::Share => &mut state.share_trigger,
            Trigger::Inner => &mut state.inner_trigger,
            Trigger::Copy => &mut state.copy_trigger,
        }
    }

    fn found_event(self) -> HandlerEvent {
        match self {
            Trigger::Share => HandlerEvent::ShareTriggerFound,
            Trigger::Inner => HandlerEvent::InnerTriggerFound,
            Trigger::Copy => HandlerEvent::CopyTriggerFound,
        }
    }
}

/// Handler for one page load of a supported platform.
///
/// Owns the page's [`HandlerState`]. Listener closures and watch tasks hold
/// the handler weakly; dropping the last `Arc` cancels pending watches.
pub struct SiteHandler {
    spec: Arc<PlatformSpec>,
    normalizer: Arc<Normalizer>,
    dom: Arc<dyn DomPort>,
    clipboard: Arc<dyn ClipboardTextPort>,
    watcher: Arc<ElementWatcher>,
    state: Mutex<HandlerState>,
    runtime: Handle,
}

impl SiteHandler {
    pub fn new(
        spec: Arc<PlatformSpec>,
        normalizer: Arc<Normalizer>,
        host: PageHost,
        policy: WatchPolicy,
        runtime: Handle,
    ) -> Arc<Self> {
        let watcher = Arc::new(ElementWatcher::new(host.dom.clone(), policy));
        let state = HandlerState::new(spec.strategy);
        Arc::new(Self {
            spec,
            normalizer,
            dom: host.dom,
            clipboard: host.clipboard,
            watcher,
            state: Mutex::new(state),
            runtime,
        })
    }

    /// Begin watching for the share trigger. Later calls are no-ops.
    pub fn start(self: &Arc<Self>) {
        info!(platform = %self.spec.kind, "Starting site handler");
        self.dispatch(HandlerEvent::Start);
    }

    /// Feed one event through the state machine and run its actions.
    pub fn dispatch(self: &Arc<Self>, event: HandlerEvent) {
        let actions = self.lock_state().apply(event);
        for action in actions {
            self.execute(action);
        }
    }

    pub fn phase(&self) -> HandlerPhase {
        self.lock_state().phase()
    }

    /// Copy of the current handler state.
    pub fn state(&self) -> HandlerState {
        self.lock_state().clone()
    }

    pub fn spec(&self) -> &PlatformSpec {
        &self.spec
    }

    /// Stop pending element watches. Listeners already attached stay in
    /// place.
    pub fn shutdown(&self) {
        debug!(platform = %self.spec.kind, "Shutting down site handler");
        self.watcher.cancel();
    }

    fn lock_state(&self) -> MutexGuard<'_, HandlerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn execute(self: &Arc<Self>, action: HandlerAction) {
        match action {
            HandlerAction::WatchShareTrigger => self.watch(Trigger::Share),
            HandlerAction::WatchCopyTrigger => self.watch(Trigger::Copy),
            HandlerAction::WatchInnerTrigger => self.watch(Trigger::Inner),
            HandlerAction::AttachShareListeners => self.attach_share_listeners(),
            HandlerAction::AttachInnerListener => self.attach_inner_listener(),
            HandlerAction::InstallCopyOverride => self.install_copy_override(),
            HandlerAction::RewriteClipboard => self.rewrite_clipboard(),
        }
    }

    fn watch(self: &Arc<Self>, trigger: Trigger) {
        let Some(id) = trigger.element_id(&self.spec).cloned() else {
            warn!(platform = %self.spec.kind, ?trigger, "No element id configured");
            return;
        };

        let handler = Arc::downgrade(self);
        let watcher = self.watcher.clone();
        let span = info_span!(
            "usecase.site_handler.watch",
            platform = %self.spec.kind,
            element = %id
        );
        self.runtime.spawn(
            async move {
                match watcher.wait_for(&id).await {
                    Ok(element) => {
                        if let Some(handler) = handler.upgrade() {
                            handler.on_found(trigger, element);
                        }
                    }
                    Err(e @ WatchError::Cancelled { .. }) => debug!("{}", e),
                    Err(e) => warn!("{}", e),
                }
            }
            .instrument(span),
        );
    }

    fn on_found(self: &Arc<Self>, trigger: Trigger, element: ElementHandle) {
        let fresh = {
            let mut state = self.lock_state();
            let slot = trigger.slot(&mut state);
            if slot.is_some() {
                false
            } else {
                *slot = Some(element);
                true
            }
        };
        if fresh {
            self.dispatch(trigger.found_event());
        }
    }

    fn listener(self: &Arc<Self>, event: HandlerEvent) -> EventListener {
        let handler = Arc::downgrade(self);
        Arc::new(move || {
            if let Some(handler) = handler.upgrade() {
                handler.dispatch(event);
            }
        })
    }

    fn attach_share_listeners(self: &Arc<Self>) {
        let Some(share) = self.lock_state().share_trigger.clone() else {
            warn!(platform = %self.spec.kind, "Share trigger not resolved");
            return;
        };

        self.attach(
            &share,
            DomEvent::Click,
            HandlerEvent::ShareTriggerClicked,
            self.spec.share_listen_mode,
        );
        if self.spec.elements.inner_trigger.is_some() {
            self.attach(
                &share,
                DomEvent::MouseEnter,
                HandlerEvent::ShareTriggerHovered,
                ListenMode::Once,
            );
        }
    }

    fn attach_inner_listener(self: &Arc<Self>) {
        let Some(inner) = self.lock_state().inner_trigger.clone() else {
            warn!(platform = %self.spec.kind, "Inner share trigger not resolved");
            return;
        };
        self.attach(
            &inner,
            DomEvent::Click,
            HandlerEvent::InnerTriggerClicked,
            ListenMode::Persistent,
        );
    }

    fn attach(
        self: &Arc<Self>,
        element: &ElementHandle,
        dom_event: DomEvent,
        event: HandlerEvent,
        mode: ListenMode,
    ) {
        let listener = self.listener(event);
        match self
            .dom
            .add_event_listener(element, dom_event, listener, ListenerOptions::from(mode))
        {
            Ok(()) => debug!(
                element = %element.id(),
                event = dom_event.as_str(),
                ?mode,
                "Listener attached"
            ),
            Err(e) => warn!(
                element = %element.id(),
                event = dom_event.as_str(),
                "Failed to attach listener: {}",
                e
            ),
        }
    }

    fn install_copy_override(self: &Arc<Self>) {
        let Some(url_input) = self.spec.elements.url_input.clone() else {
            warn!(platform = %self.spec.kind, "No URL input configured, copy override skipped");
            return;
        };

        let interceptor = CopyOverride::new(
            self.dom.clone(),
            self.clipboard.clone(),
            self.normalizer.clone(),
            url_input,
            self.runtime.clone(),
        );
        let mut state = self.lock_state();
        if let Err(e) = interceptor.install(&mut state) {
            warn!(platform = %self.spec.kind, "Failed to install copy override: {}", e);
        }
    }

    fn rewrite_clipboard(self: &Arc<Self>) {
        let clipboard = self.clipboard.clone();
        let normalizer = self.normalizer.clone();
        let span = info_span!("usecase.site_handler.rewrite_clipboard", platform = %self.spec.kind);
        // Spawned so listeners registered before ours finish their copy first.
        self.runtime.spawn(
            async move {
                rewrite_copied_link(clipboard.as_ref(), &normalizer).await;
            }
            .instrument(span),
        );
    }
}

impl Drop for SiteHandler {
    fn drop(&mut self) {
        self.watcher.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slc_platform::adapters::{InMemoryClipboard, InMemoryDom};
    use std::time::Duration;

    struct Page {
        dom: Arc<InMemoryDom>,
        clipboard: Arc<InMemoryClipboard>,
    }

    impl Page {
        fn new() -> Self {
            Self {
                dom: Arc::new(InMemoryDom::new()),
                clipboard: Arc::new(InMemoryClipboard::new()),
            }
        }

        fn host(&self) -> PageHost {
            PageHost::new(self.dom.clone(), self.clipboard.clone())
        }
    }

    fn handler(spec: PlatformSpec, page: &Page) -> Arc<SiteHandler> {
        let normalizer = Normalizer::from_spec(&spec).unwrap();
        SiteHandler::new(
            Arc::new(spec),
            Arc::new(normalizer),
            page.host(),
            WatchPolicy::default(),
            Handle::current(),
        )
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_waits_for_share_trigger() {
        let page = Page::new();
        let handler = handler(PlatformSpec::youtube(), &page);

        handler.start();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(handler.phase(), HandlerPhase::AwaitingShareTrigger);

        page.dom.insert_element("top-level-buttons-computed");
        tokio::time::sleep(Duration::from_millis(600)).await;

        assert_eq!(handler.phase(), HandlerPhase::AwaitingCopyTrigger);
        assert_eq!(
            page.dom.listener_count("top-level-buttons-computed", DomEvent::Click),
            1
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_start_is_ignored() {
        let page = Page::new();
        page.dom.insert_element("share-btn-outer");
        let handler = handler(PlatformSpec::bilibili(), &page);

        handler.start();
        handler.start();
        settle().await;

        assert_eq!(handler.phase(), HandlerPhase::Active);
        assert_eq!(page.dom.listener_count("share-btn-outer", DomEvent::Click), 1);
        assert_eq!(page.dom.listener_count("share-btn-outer", DomEvent::MouseEnter), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_share_click_installs_override_once_copy_button_renders() {
        let page = Page::new();
        page.dom.insert_element("top-level-buttons-computed");
        let handler = handler(PlatformSpec::youtube(), &page);

        handler.start();
        settle().await;
        page.dom.click("top-level-buttons-computed");
        tokio::time::sleep(Duration::from_millis(1200)).await;
        assert_eq!(handler.phase(), HandlerPhase::AwaitingCopyTrigger);

        page.dom.insert_element("copy-button");
        page.dom.insert_input("share-url", "https://youtu.be/dQw4w9WgXcQ?si=abc");
        tokio::time::sleep(Duration::from_millis(600)).await;

        let state = handler.state();
        assert_eq!(handler.phase(), HandlerPhase::Active);
        assert!(state.override_installed);
        assert!(page.dom.has_click_handler("copy-button"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_youtube_share_listener_fires_once() {
        let page = Page::new();
        page.dom.insert_element("top-level-buttons-computed");
        let handler = handler(PlatformSpec::youtube(), &page);

        handler.start();
        settle().await;
        page.dom.click("top-level-buttons-computed");

        assert_eq!(
            page.dom.listener_count("top-level-buttons-computed", DomEvent::Click),
            0
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_pending_watch() {
        let page = Page::new();
        let handler = handler(PlatformSpec::youtube(), &page);

        handler.start();
        settle().await;
        handler.shutdown();
        page.dom.insert_element("top-level-buttons-computed");
        tokio::time::sleep(Duration::from_secs(2)).await;

        assert_eq!(handler.phase(), HandlerPhase::AwaitingShareTrigger);
        assert!(handler.state().share_trigger.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_handler_stops_polling() {
        let page = Page::new();
        let handler = handler(PlatformSpec::youtube(), &page);

        handler.start();
        settle().await;
        drop(handler);
        tokio::time::sleep(Duration::from_millis(600)).await;
        let before = page.dom.operation_count();
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(page.dom.operation_count(), before);
    }
}
