//! Reaction windows with veto chains (nope-style stacks).
//!
//! A nopeable action opens a window. The other players are asked in turn
//! order whether they respond; each may pass or push a veto. A veto cancels
//! whatever is below it and reopens the window to everybody except its
//! author, so vetoes can be vetoed in turn.
//!
//! When every pending responder has passed the stack resolves by parity:
//!
//! | depth | vetoes | base action |
//! |-------|--------|-------------|
//! | 1     | 0      | executes    |
//! | 2     | 1      | cancelled   |
//! | 3     | 2      | executes    |
//! | 4     | 3      | cancelled   |
//!
//! The resolver only tracks the protocol. Executing effects is the forward
//! model's job (see `rules::engine`).

use std::collections::VecDeque;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::action::Action;
use crate::core::config::PhaseId;
use crate::core::error::KernelError;
use crate::core::player::PlayerId;

/// One entry of a reaction stack.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackEntry {
    pub author: PlayerId,
    pub action: Action,
    /// `false` only for the bottom entry (the action being contested).
    pub is_veto: bool,
}

/// An open reaction window.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReactionWindow {
    /// Index 0 is the contested action; later entries are vetoes.
    stack: Vec<StackEntry>,
    /// Players still to answer the top entry, front first.
    pending: VecDeque<PlayerId>,
    /// Phase to restore once the window closes.
    saved_phase: Option<PhaseId>,
}

impl ReactionWindow {
    #[must_use]
    pub fn entries(&self) -> &[StackEntry] {
        &self.stack
    }

    #[must_use]
    pub fn pending(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.pending.iter().copied()
    }

    #[must_use]
    pub fn saved_phase(&self) -> Option<PhaseId> {
        self.saved_phase
    }
}

/// Outcome of a closed window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// The contested action.
    pub entry: StackEntry,
    /// Whether it survived the veto chain.
    pub executes: bool,
    pub vetoes: usize,
    pub restore_phase: Option<PhaseId>,
}

/// What happened after a push or pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReactionStep {
    /// The window is still open and waits on this player.
    Awaiting(PlayerId),
    Resolved(Resolution),
}

/// Explicit resolver state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReactionState {
    #[default]
    Idle,
    AwaitingResponse(ReactionWindow),
}

impl ReactionState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, ReactionState::Idle)
    }

    #[must_use]
    pub fn window(&self) -> Option<&ReactionWindow> {
        match self {
            ReactionState::Idle => None,
            ReactionState::AwaitingResponse(window) => Some(window),
        }
    }

    /// The responder whose answer is awaited.
    #[must_use]
    pub fn awaiting(&self) -> Option<PlayerId> {
        self.window().and_then(|w| w.pending.front().copied())
    }

    /// Number of entries on the stack (0 when idle).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.window().map_or(0, |w| w.stack.len())
    }

    /// True once nobody is left to answer the top entry.
    #[must_use]
    pub fn all_responses_exhausted(&self) -> bool {
        self.window().map_or(true, |w| w.pending.is_empty())
    }

    /// Open a window for a nopeable action.
    ///
    /// `responders` are asked in the given order; the author is skipped.
    /// Fails if a window is already open or nobody could respond.
    pub fn open(
        &mut self,
        author: PlayerId,
        action: Action,
        responders: &[PlayerId],
        saved_phase: Option<PhaseId>,
    ) -> Result<PlayerId, KernelError> {
        if !self.is_idle() {
            return Err(KernelError::IllegalPhaseTransition(
                "reaction window already open".to_string(),
            ));
        }
        let pending: VecDeque<PlayerId> = responders.iter().copied().filter(|&p| p != author).collect();
        let first = pending.front().copied().ok_or_else(|| {
            KernelError::IllegalPhaseTransition(format!("no responders for {}", author))
        })?;

        debug!("reaction window opened by {} ({} responders)", author, pending.len());
        *self = ReactionState::AwaitingResponse(ReactionWindow {
            stack: vec![StackEntry {
                author,
                action,
                is_veto: false,
            }],
            pending,
            saved_phase,
        });
        Ok(first)
    }

    /// Push a veto from the awaited responder and reopen the window.
    pub fn push_veto(
        &mut self,
        author: PlayerId,
        action: Action,
        responders: &[PlayerId],
    ) -> Result<ReactionStep, KernelError> {
        let window = self.window_for(author)?;
        window.stack.push(StackEntry {
            author,
            action,
            is_veto: true,
        });
        window.pending = responders.iter().copied().filter(|&p| p != author).collect();
        debug!("{} vetoed (depth {})", author, window.stack.len());
        Ok(self.step())
    }

    /// Record a pass from the awaited responder.
    pub fn pass(&mut self, player: PlayerId) -> Result<ReactionStep, KernelError> {
        self.window_for(player)?.pending.pop_front();
        Ok(self.step())
    }

    /// The open window, if `player` is the one it waits on.
    fn window_for(&mut self, player: PlayerId) -> Result<&mut ReactionWindow, KernelError> {
        match self {
            ReactionState::AwaitingResponse(window) => match window.pending.front() {
                Some(&p) if p == player => Ok(window),
                Some(&p) => Err(KernelError::IllegalPhaseTransition(format!(
                    "awaiting {}, got {}",
                    p, player
                ))),
                None => Err(KernelError::IllegalPhaseTransition(
                    "reaction window has no pending responder".to_string(),
                )),
            },
            ReactionState::Idle => Err(KernelError::IllegalPhaseTransition(
                "no reaction window open".to_string(),
            )),
        }
    }

    /// Resolve the window once nobody is left to answer.
    fn step(&mut self) -> ReactionStep {
        if let Some(next) = self.awaiting() {
            return ReactionStep::Awaiting(next);
        }
        let closed = match self {
            ReactionState::AwaitingResponse(window) => std::mem::take(window),
            ReactionState::Idle => ReactionWindow::default(),
        };
        *self = ReactionState::Idle;
        ReactionStep::Resolved(Self::resolve(closed))
    }

    fn resolve(window: ReactionWindow) -> Resolution {
        let depth = window.stack.len();
        let executes = depth % 2 == 1;
        let entry = window.stack.into_iter().next().unwrap_or_else(|| StackEntry {
            author: PlayerId::new(0),
            action: Action::pass(),
            is_veto: false,
        });
        debug!(
            "reaction window closed: depth {}, {}",
            depth,
            if executes { "executes" } else { "cancelled" }
        );
        Resolution {
            entry,
            executes,
            vetoes: depth.saturating_sub(1),
            restore_phase: window.saved_phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TemplateId;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);
    const P2: PlayerId = PlayerId::new(2);

    fn skip() -> Action {
        Action::new(TemplateId::new(1))
    }

    fn nope() -> Action {
        Action::new(TemplateId::new(2))
    }

    #[test]
    fn test_open_skips_author() {
        let mut state = ReactionState::default();
        let first = state.open(P1, skip(), &[P2, P0, P1], None).unwrap();

        assert_eq!(first, P2);
        assert_eq!(state.depth(), 1);
        assert_eq!(state.window().unwrap().pending().collect::<Vec<_>>(), vec![P2, P0]);
    }

    #[test]
    fn test_open_twice_fails() {
        let mut state = ReactionState::default();
        state.open(P0, skip(), &[P1], None).unwrap();
        assert!(matches!(
            state.open(P0, skip(), &[P1], None),
            Err(KernelError::IllegalPhaseTransition(_))
        ));
    }

    #[test]
    fn test_open_without_responders_fails() {
        let mut state = ReactionState::default();
        assert!(state.open(P0, skip(), &[P0], None).is_err());
        assert!(state.is_idle());
    }

    #[test]
    fn test_all_pass_executes() {
        let mut state = ReactionState::default();
        state.open(P0, skip(), &[P1, P2], Some(PhaseId::new(3))).unwrap();

        assert_eq!(state.pass(P1).unwrap(), ReactionStep::Awaiting(P2));
        match state.pass(P2).unwrap() {
            ReactionStep::Resolved(r) => {
                assert!(r.executes);
                assert_eq!(r.vetoes, 0);
                assert_eq!(r.entry.author, P0);
                assert_eq!(r.restore_phase, Some(PhaseId::new(3)));
            }
            other => panic!("expected resolution, got {:?}", other),
        }
        assert!(state.is_idle());
    }

    #[test]
    fn test_veto_reopens_to_everyone_else() {
        let mut state = ReactionState::default();
        state.open(P0, skip(), &[P1, P2], None).unwrap();

        let step = state.push_veto(P1, nope(), &[P2, P0, P1]).unwrap();
        assert_eq!(step, ReactionStep::Awaiting(P2));
        assert_eq!(state.depth(), 2);
        assert!(state.window().unwrap().entries()[1].is_veto);
        assert_eq!(state.window().unwrap().pending().collect::<Vec<_>>(), vec![P2, P0]);
    }

    #[test]
    fn test_parity_table() {
        for vetoes in 0..4usize {
            let mut state = ReactionState::default();
            state.open(P0, skip(), &[P1], None).unwrap();

            // Two players alternate vetoes
            let mut last = P0;
            for i in 0..vetoes {
                let author = if i % 2 == 0 { P1 } else { P0 };
                state.push_veto(author, nope(), &[P0, P1]).unwrap();
                last = author;
            }
            let responder = if last == P0 { P1 } else { P0 };
            match state.pass(responder).unwrap() {
                ReactionStep::Resolved(r) => {
                    assert_eq!(r.vetoes, vetoes);
                    assert_eq!(r.executes, vetoes % 2 == 0, "vetoes = {}", vetoes);
                }
                other => panic!("expected resolution, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_wrong_player_rejected() {
        let mut state = ReactionState::default();
        state.open(P0, skip(), &[P1, P2], None).unwrap();
        let before = state.clone();

        assert!(matches!(state.pass(P2), Err(KernelError::IllegalPhaseTransition(_))));
        assert!(matches!(
            state.push_veto(P0, nope(), &[P1, P2]),
            Err(KernelError::IllegalPhaseTransition(_))
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_pass_while_idle_rejected() {
        let mut state = ReactionState::default();
        assert!(state.pass(P0).is_err());
        assert!(state.all_responses_exhausted());
        assert_eq!(state.awaiting(), None);
    }
}
