//! Site handler state machine.

use crate::platform::InterceptStrategy;

/// Handler lifecycle phase.
///
/// 处理器生命周期阶段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerPhase {
    /// Not started.
    Idle,
    /// Polling for the share trigger.
    AwaitingShareTrigger,
    /// Share trigger attached; waiting for the copy trigger (override only).
    AwaitingCopyTrigger,
    /// Interception in place. Terminal for the page lifetime.
    Active,
}

/// Events that drive the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerEvent {
    Start,
    ShareTriggerFound,
    ShareTriggerClicked,
    ShareTriggerHovered,
    InnerTriggerFound,
    InnerTriggerClicked,
    CopyTriggerFound,
}

/// Side-effects produced by state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerAction {
    WatchShareTrigger,
    /// Click listener (once or persistent per platform) plus, when the
    /// platform has an inner trigger, a one-shot hover listener.
    AttachShareListeners,
    WatchCopyTrigger,
    InstallCopyOverride,
    WatchInnerTrigger,
    AttachInnerListener,
    RewriteClipboard,
}

/// Pure handler state machine.
///
/// 纯状态机：不包含副作用。
pub struct HandlerStateMachine;

impl HandlerStateMachine {
    pub fn transition(
        strategy: InterceptStrategy,
        phase: HandlerPhase,
        event: HandlerEvent,
    ) -> (HandlerPhase, Vec<HandlerAction>) {
        use HandlerAction as A;
        use HandlerEvent as E;
        use HandlerPhase as P;
        use InterceptStrategy as S;

        match (strategy, phase, event) {
            (_, P::Idle, E::Start) => (P::AwaitingShareTrigger, vec![A::WatchShareTrigger]),

            (S::Override, P::AwaitingShareTrigger, E::ShareTriggerFound) => {
                (P::AwaitingCopyTrigger, vec![A::AttachShareListeners])
            }
            (S::PostCopy, P::AwaitingShareTrigger, E::ShareTriggerFound) => {
                (P::Active, vec![A::AttachShareListeners])
            }

            (S::Override, P::AwaitingCopyTrigger, E::ShareTriggerClicked) => {
                (P::AwaitingCopyTrigger, vec![A::WatchCopyTrigger])
            }
            (S::Override, P::AwaitingCopyTrigger, E::CopyTriggerFound) => {
                (P::Active, vec![A::InstallCopyOverride])
            }

            (S::PostCopy, P::Active, E::ShareTriggerClicked) => {
                (P::Active, vec![A::RewriteClipboard])
            }
            (S::PostCopy, P::Active, E::ShareTriggerHovered) => {
                (P::Active, vec![A::WatchInnerTrigger])
            }
            (S::PostCopy, P::Active, E::InnerTriggerFound) => {
                (P::Active, vec![A::AttachInnerListener])
            }
            (S::PostCopy, P::Active, E::InnerTriggerClicked) => {
                (P::Active, vec![A::RewriteClipboard])
            }

            (_, phase, _event) => (phase, Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(
        strategy: InterceptStrategy,
        phase: HandlerPhase,
        event: HandlerEvent,
    ) -> (HandlerPhase, Vec<HandlerAction>) {
        HandlerStateMachine::transition(strategy, phase, event)
    }

    #[test]
    fn handler_state_machine_start_watches_share_trigger() {
        for strategy in [InterceptStrategy::Override, InterceptStrategy::PostCopy] {
            let (next, actions) = step(strategy, HandlerPhase::Idle, HandlerEvent::Start);
            assert_eq!(next, HandlerPhase::AwaitingShareTrigger);
            assert_eq!(actions, vec![HandlerAction::WatchShareTrigger]);
        }
    }

    #[test]
    fn handler_state_machine_override_walks_to_active() {
        let s = InterceptStrategy::Override;

        let (phase, actions) = step(s, HandlerPhase::AwaitingShareTrigger, HandlerEvent::ShareTriggerFound);
        assert_eq!(phase, HandlerPhase::AwaitingCopyTrigger);
        assert_eq!(actions, vec![HandlerAction::AttachShareListeners]);

        let (phase, actions) = step(s, phase, HandlerEvent::ShareTriggerClicked);
        assert_eq!(phase, HandlerPhase::AwaitingCopyTrigger);
        assert_eq!(actions, vec![HandlerAction::WatchCopyTrigger]);

        let (phase, actions) = step(s, phase, HandlerEvent::CopyTriggerFound);
        assert_eq!(phase, HandlerPhase::Active);
        assert_eq!(actions, vec![HandlerAction::InstallCopyOverride]);
    }

    #[test]
    fn handler_state_machine_override_ignores_late_copy_trigger() {
        let (phase, actions) = step(
            InterceptStrategy::Override,
            HandlerPhase::Active,
            HandlerEvent::CopyTriggerFound,
        );
        assert_eq!(phase, HandlerPhase::Active);
        assert!(actions.is_empty());
    }

    #[test]
    fn handler_state_machine_post_copy_goes_straight_to_active() {
        let (phase, actions) = step(
            InterceptStrategy::PostCopy,
            HandlerPhase::AwaitingShareTrigger,
            HandlerEvent::ShareTriggerFound,
        );
        assert_eq!(phase, HandlerPhase::Active);
        assert_eq!(actions, vec![HandlerAction::AttachShareListeners]);
    }

    #[test]
    fn handler_state_machine_post_copy_rewrites_on_every_click() {
        let s = InterceptStrategy::PostCopy;
        for event in [HandlerEvent::ShareTriggerClicked, HandlerEvent::InnerTriggerClicked] {
            let (phase, actions) = step(s, HandlerPhase::Active, event);
            assert_eq!(phase, HandlerPhase::Active);
            assert_eq!(actions, vec![HandlerAction::RewriteClipboard]);
        }
    }

    #[test]
    fn handler_state_machine_post_copy_hover_watches_inner_trigger() {
        let s = InterceptStrategy::PostCopy;
        let (_, actions) = step(s, HandlerPhase::Active, HandlerEvent::ShareTriggerHovered);
        assert_eq!(actions, vec![HandlerAction::WatchInnerTrigger]);

        let (_, actions) = step(s, HandlerPhase::Active, HandlerEvent::InnerTriggerFound);
        assert_eq!(actions, vec![HandlerAction::AttachInnerListener]);
    }

    #[test]
    fn handler_state_machine_idle_ignores_clicks() {
        let (phase, actions) = step(
            InterceptStrategy::PostCopy,
            HandlerPhase::Idle,
            HandlerEvent::ShareTriggerClicked,
        );
        assert_eq!(phase, HandlerPhase::Idle);
        assert!(actions.is_empty());
    }

    #[test]
    fn handler_state_machine_restart_is_ignored() {
        let (phase, actions) = step(
            InterceptStrategy::Override,
            HandlerPhase::AwaitingShareTrigger,
            HandlerEvent::Start,
        );
        assert_eq!(phase, HandlerPhase::AwaitingShareTrigger);
        assert!(actions.is_empty());
    }
}
