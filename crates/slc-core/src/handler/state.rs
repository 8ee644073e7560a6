use crate::dom::ElementHandle;
use crate::handler::{HandlerAction, HandlerEvent, HandlerPhase, HandlerStateMachine};
use crate::platform::InterceptStrategy;

/// Per-page-load record owned by exactly one site handler.
///
/// Populated incrementally as elements are discovered; dropped with the
/// page.
#[derive(Debug, Clone)]
pub struct HandlerState {
    strategy: InterceptStrategy,
    phase: HandlerPhase,
    pub share_trigger: Option<ElementHandle>,
    pub inner_trigger: Option<ElementHandle>,
    pub copy_trigger: Option<ElementHandle>,
    pub override_installed: bool,
}

impl HandlerState {
    pub fn new(strategy: InterceptStrategy) -> Self {
        Self {
            strategy,
            phase: HandlerPhase::Idle,
            share_trigger: None,
            inner_trigger: None,
            copy_trigger: None,
            override_installed: false,
        }
    }

    pub fn phase(&self) -> HandlerPhase {
        self.phase
    }

    pub fn strategy(&self) -> InterceptStrategy {
        self.strategy
    }

    /// Feed an event through the state machine and return the actions the
    /// orchestrator must run.
    pub fn apply(&mut self, event: HandlerEvent) -> Vec<HandlerAction> {
        let (next, actions) = HandlerStateMachine::transition(self.strategy, self.phase, event);
        record_transition(self.phase, next, event);
        self.phase = next;
        actions
    }
}

#[cfg(feature = "tracing")]
fn record_transition(from: HandlerPhase, to: HandlerPhase, event: HandlerEvent) {
    if from != to {
        tracing::debug!(?from, ?to, ?event, "handler phase changed");
    }
}

#[cfg(not(feature = "tracing"))]
fn record_transition(_from: HandlerPhase, _to: HandlerPhase, _event: HandlerEvent) {}
