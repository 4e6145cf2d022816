//! Forward model trait for game implementations.
//!
//! Games implement `ForwardModel` to define their rules:
//! - How the initial state is dealt
//! - What actions are legal
//! - How actions modify state
//! - Which actions can be contested, and how
//! - Win/loss conditions
//!
//! The provided methods (`setup`, `legal_actions`, `apply`, `end_turn`, ...)
//! are the kernel: they drive the lifecycle, the reaction resolver, turn
//! order and history, calling back into the game's hooks.
//!
//! ## Apply pipeline
//!
//! 1. Reject terminal (`GameOver`) and un-set-up states.
//! 2. Work on a clone (O(1) with `im`); commit only on success.
//! 3. While a reaction window is open: pass or veto from the awaited
//!    responder. A closing window executes or cancels the contested action.
//! 4. Otherwise: a nopeable action opens a window (or executes at once when
//!    nobody can respond); a plain action executes.
//! 5. After an effect: `after_action`, `check_terminal`, then `end_turn`
//!    unless the effect held the turn.

use log::{debug, error, trace};
use serde::{Deserialize, Serialize};

use super::index::ActionIndex;
use crate::core::action::{Action, ActionRecord};
use crate::core::config::{GameConfig, TemplateId};
use crate::core::entity::EntityId;
use crate::core::error::KernelError;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::core::state::{GameState, Lifecycle, PlayerResult};
use crate::stack::{ReactionStep, StackEntry};

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Draw (no winner).
    Draw,
    /// Multiple winners (team games, shared victory).
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::Draw => false,
        }
    }

    /// The standing this result gives `player`.
    #[must_use]
    pub fn outcome_for(&self, player: PlayerId) -> PlayerResult {
        match self {
            GameResult::Draw => PlayerResult::Draw,
            _ if self.is_winner(player) => PlayerResult::Win,
            _ => PlayerResult::Lose,
        }
    }
}

/// Whether the active player keeps the turn after an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnControl {
    /// Move to the next player.
    Advance,
    /// Same player acts again (more choices this turn).
    Hold,
}

/// How an action interacts with reaction windows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReactionKind {
    /// Executes immediately.
    #[default]
    Plain,
    /// Opens a window others may veto before it executes.
    Nopeable,
    /// Cancels the entry below it. Only legal inside a window.
    Veto,
}

/// Forward model trait.
///
/// ## Implementation Notes
///
/// - Hooks receive the state being built by `apply`; errors abandon it.
/// - `compute_actions` must return at least one action for the current
///   player of every non-terminal state.
/// - All randomness must come from `state.rng`.
/// - Actions reference entities by id only.
pub trait ForwardModel {
    // === Required hooks ===

    /// Get the game configuration.
    fn config(&self) -> &GameConfig;

    /// Populate the containers `setup` created and deal.
    fn initialize(&self, state: &mut GameState) -> Result<(), KernelError>;

    /// Run an action's effect.
    fn execute(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<TurnControl, KernelError>;

    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    fn check_terminal(&self, state: &GameState) -> Option<GameResult>;

    /// Estimated standing of `player` while the game runs. Clamped to [0, 1].
    fn heuristic(&self, state: &GameState, player: PlayerId) -> f64;

    // === Action enumeration ===

    /// Legal actions for `player` outside reaction windows.
    ///
    /// Default implementation builds actions from templates and pointers.
    fn compute_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action> {
        let mut actions = Vec::new();
        for template in self.legal_templates(state, player) {
            self.enumerate_actions_for_template(state, player, template, &[], &mut actions);
        }
        actions
    }

    /// Legal templates for the default `compute_actions`.
    fn legal_templates(&self, _state: &GameState, _player: PlayerId) -> Vec<TemplateId> {
        Vec::new()
    }

    /// Legal entity pointers for an action being built.
    ///
    /// Called iteratively as pointers are selected. Returns empty when no
    /// more pointers are needed.
    fn legal_pointers(
        &self,
        _state: &GameState,
        _player: PlayerId,
        _template: TemplateId,
        _prior_pointers: &[EntityId],
    ) -> Vec<EntityId> {
        Vec::new()
    }

    /// Helper to enumerate actions for a template recursively.
    fn enumerate_actions_for_template(
        &self,
        state: &GameState,
        player: PlayerId,
        template: TemplateId,
        prior_pointers: &[EntityId],
        out: &mut Vec<Action>,
    ) {
        let next_pointers = self.legal_pointers(state, player, template, prior_pointers);

        if next_pointers.is_empty() {
            out.push(Action::with_pointers(template, prior_pointers));
        } else {
            for pointer in next_pointers {
                let mut pointers = prior_pointers.to_vec();
                pointers.push(pointer);
                self.enumerate_actions_for_template(state, player, template, &pointers, out);
            }
        }
    }

    // === Reaction hooks ===

    fn reaction_kind(&self, _state: &GameState, _action: &Action) -> ReactionKind {
        ReactionKind::Plain
    }

    /// Vetoes `player` may push in the open window. Pass is added by the kernel.
    fn reaction_actions(&self, _state: &GameState, _player: PlayerId) -> Vec<Action> {
        Vec::new()
    }

    /// Who may answer `author`, in the order they are asked.
    ///
    /// Default: every other player still in the game, in turn order
    /// starting after the author.
    fn responders(&self, state: &GameState, author: PlayerId) -> Vec<PlayerId> {
        let n = state.player_count();
        let delta = if state.public.turn_delta < 0 { -1 } else { 1 };
        (1..n as i32)
            .map(|step| author.offset(delta * step, n))
            .filter(|&p| state.is_in_game(p))
            .collect()
    }

    /// Runs when a nopeable action is declared, before anyone answers.
    fn on_declared(
        &self,
        _state: &mut GameState,
        _player: PlayerId,
        _action: &Action,
    ) -> Result<(), KernelError> {
        Ok(())
    }

    /// Runs when a contested action is cancelled.
    fn on_vetoed(
        &self,
        _state: &mut GameState,
        _player: PlayerId,
        _action: &Action,
    ) -> Result<TurnControl, KernelError> {
        Ok(TurnControl::Hold)
    }

    /// Runs after every effect, before the terminal check.
    fn after_action(
        &self,
        _state: &mut GameState,
        _player: PlayerId,
        _action: &Action,
    ) -> Result<(), KernelError> {
        Ok(())
    }

    // === Kernel ===

    /// Create the declared containers, deal, and mark the state ready.
    ///
    /// The same seed gives the same initial state.
    fn setup(&self, state: &mut GameState) -> Result<(), KernelError> {
        if state.lifecycle() != Lifecycle::Uninitialized {
            return Err(KernelError::IllegalPhaseTransition(format!(
                "setup on a {:?} state",
                state.lifecycle()
            )));
        }
        let config = self.config();
        if config.player_count != state.player_count() {
            return Err(KernelError::InvalidAction(format!(
                "model expects {} players, state has {}",
                config.player_count,
                state.player_count()
            )));
        }

        let mut next = state.clone();
        for container in &config.containers {
            next.create_container(container);
        }
        next.public.phase = config.initial_phase;
        self.initialize(&mut next)?;
        next.set_lifecycle(Lifecycle::Ready);

        if let Some(result) = self.check_terminal(&next) {
            next.finish(result);
        }
        *state = next;
        Ok(())
    }

    /// Legal actions in `state`, empty only if the game is over.
    ///
    /// While a reaction window is open these are the awaited responder's
    /// vetoes plus `Action::pass()`.
    fn legal_actions(&self, state: &GameState) -> Vec<Action> {
        if state.lifecycle() != Lifecycle::Ready {
            return Vec::new();
        }
        if let Some(responder) = state.reaction.awaiting() {
            let mut actions = self.reaction_actions(state, responder);
            actions.push(Action::pass());
            return actions;
        }

        let player = state.current_player();
        let actions = self.compute_actions(state, player);
        if actions.is_empty() {
            error!("no legal actions for {} in a non-terminal state", player);
            debug_assert!(false, "forward model returned no actions for {}", player);
        }
        actions
    }

    /// The player who must act next.
    fn acting_player(&self, state: &GameState) -> PlayerId {
        state.reaction.awaiting().unwrap_or_else(|| state.current_player())
    }

    /// Apply an action. On error `state` is unchanged.
    fn apply(&self, state: &mut GameState, action: &Action) -> Result<(), KernelError> {
        match state.lifecycle() {
            Lifecycle::Terminal => return Err(KernelError::GameOver),
            Lifecycle::Uninitialized => {
                return Err(KernelError::IllegalPhaseTransition(
                    "apply before setup".to_string(),
                ))
            }
            Lifecycle::Ready => {}
        }

        let mut next = state.clone();
        let player = self.acting_player(&next);
        trace!("{} applies {:?}", player, action);

        let turn = next.public.turn_number;
        let sequence = next.public.next_sequence();
        next.public
            .record_action(ActionRecord::new(player, action.clone(), turn, sequence));

        if next.reaction.is_idle() {
            self.apply_idle(&mut next, player, action)?;
        } else {
            self.apply_in_window(&mut next, player, action)?;
        }

        *state = next;
        Ok(())
    }

    #[doc(hidden)]
    fn apply_idle(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<(), KernelError> {
        if action.is_pass() {
            return Err(KernelError::IllegalPhaseTransition(
                "pass outside a reaction window".to_string(),
            ));
        }
        match self.reaction_kind(state, action) {
            ReactionKind::Veto => Err(KernelError::IllegalPhaseTransition(format!(
                "{} is a veto but no reaction window is open",
                action.template
            ))),
            ReactionKind::Plain => {
                let control = self.execute(state, player, action)?;
                self.finish_action(state, player, action, control)
            }
            ReactionKind::Nopeable => {
                self.on_declared(state, player, action)?;
                let responders: Vec<PlayerId> = self
                    .responders(state, player)
                    .into_iter()
                    .filter(|&p| p != player)
                    .collect();
                if responders.is_empty() {
                    let control = self.execute(state, player, action)?;
                    return self.finish_action(state, player, action, control);
                }

                let saved = state.public.phase;
                state.reaction.open(player, action.clone(), &responders, Some(saved))?;
                if let Some(phase) = self.config().reaction_phase {
                    state.public.phase = phase;
                }
                Ok(())
            }
        }
    }

    #[doc(hidden)]
    fn apply_in_window(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<(), KernelError> {
        let step = if action.is_pass() {
            state.reaction.pass(player)?
        } else if self.reaction_kind(state, action) == ReactionKind::Veto {
            let responders = self.responders(state, player);
            let step = state.reaction.push_veto(player, action.clone(), &responders)?;
            // Vetoes take effect as they are played
            self.execute(state, player, action)?;
            step
        } else {
            return Err(KernelError::IllegalPhaseTransition(format!(
                "{} while awaiting a reaction",
                action.template
            )));
        };

        match step {
            ReactionStep::Awaiting(next) => {
                trace!("reaction window waits on {}", next);
                Ok(())
            }
            ReactionStep::Resolved(resolution) => {
                if let Some(phase) = resolution.restore_phase {
                    state.public.phase = phase;
                }
                let StackEntry { author, action, .. } = resolution.entry;
                let control = if resolution.executes {
                    self.execute(state, author, &action)?
                } else {
                    debug!("{} cancelled by {} veto(es)", action.template, resolution.vetoes);
                    self.on_vetoed(state, author, &action)?
                };
                self.finish_action(state, author, &action, control)
            }
        }
    }

    #[doc(hidden)]
    fn finish_action(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: &Action,
        control: TurnControl,
    ) -> Result<(), KernelError> {
        self.after_action(state, player, action)?;
        if let Some(result) = self.check_terminal(state) {
            state.finish(result);
            return Ok(());
        }
        if control == TurnControl::Advance {
            self.end_turn(state);
        }
        Ok(())
    }

    /// Pass the turn to the next player still in the game.
    ///
    /// The next seat is `active + turn_delta` (mod player count); direction
    /// effects change `turn_delta`, never this formula.
    fn end_turn(&self, state: &mut GameState) {
        let n = state.player_count();
        let delta = state.public.turn_delta;
        let mut next = state.current_player();
        for _ in 0..n {
            next = next.offset(delta, n);
            if state.is_in_game(next) {
                break;
            }
        }
        state.public.active_player = next;
        state.public.advance_turn();
        debug!("turn {}: {} to act", state.public.turn_number, next);
    }

    #[must_use]
    fn is_terminal(&self, state: &GameState) -> bool {
        state.is_terminal()
    }

    /// Terminal result value for finished players, clamped heuristic otherwise.
    fn score(&self, state: &GameState, player: PlayerId) -> f64 {
        match state.player_result(player).value() {
            Some(value) => value,
            None => self.heuristic(state, player).clamp(0.0, 1.0),
        }
    }

    /// Index the legal actions by the game's template list.
    fn action_index(&self, state: &GameState) -> ActionIndex {
        ActionIndex::build(self.config(), self.legal_actions(state))
    }

    /// Apply the first legal action of a slot.
    fn apply_slot(&self, state: &mut GameState, slot: usize) -> Result<(), KernelError> {
        let action = self
            .action_index(state)
            .action_for(slot)
            .cloned()
            .ok_or_else(|| KernelError::InvalidAction(format!("slot {} has no legal action", slot)))?;
        self.apply(state, &action)
    }

    /// Apply uniformly random legal actions until the game ends or
    /// `max_steps` actions were applied. Returns the number applied.
    ///
    /// Run it on a copy; the state passed in is played forward.
    fn rollout(
        &self,
        state: &mut GameState,
        rng: &mut GameRng,
        max_steps: usize,
    ) -> Result<usize, KernelError> {
        let mut steps = 0;
        while steps < max_steps && !state.is_terminal() {
            let actions = self.legal_actions(state);
            let action = rng
                .choose(&actions)
                .cloned()
                .ok_or_else(|| KernelError::InvalidAction("no legal actions to roll out".to_string()))?;
            self.apply(state, &action)?;
            steps += 1;
        }
        trace!("rollout applied {} actions", steps);
        Ok(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{ContainerConfig, GameParameters, TemplateConfig};
    use crate::items::{Item, ItemKind};

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);
    const P2: PlayerId = PlayerId::new(2);

    const TAKE: TemplateId = TemplateId(0);
    const BOOST: TemplateId = TemplateId(1);
    const BLOCK: TemplateId = TemplateId(2);

    /// Players take counters from a pile; the first to 3 wins. BOOST is a
    /// nopeable +2 and BLOCK vetoes it.
    struct Counters {
        config: GameConfig,
        pile: EntityId,
    }

    impl Counters {
        fn new(players: usize) -> Self {
            let mut config = GameConfig::new(players)
                .with_template(TemplateConfig::no_args(TAKE, "Take"))
                .with_template(TemplateConfig::no_args(BOOST, "Boost"))
                .with_template(TemplateConfig::no_args(BLOCK, "Block"));
            let pile = config.add_container(ContainerConfig::new("Pile"));
            Self { config, pile }
        }
    }

    impl ForwardModel for Counters {
        fn config(&self) -> &GameConfig {
            &self.config
        }

        fn initialize(&self, state: &mut GameState) -> Result<(), KernelError> {
            for _ in 0..20 {
                state.create_item(Item::new(ItemKind::new(0)), self.pile)?;
            }
            Ok(())
        }

        fn legal_templates(&self, _state: &GameState, _player: PlayerId) -> Vec<TemplateId> {
            vec![TAKE, BOOST]
        }

        fn execute(
            &self,
            state: &mut GameState,
            player: PlayerId,
            action: &Action,
        ) -> Result<TurnControl, KernelError> {
            match action.template {
                TAKE => {
                    state.container_mut(self.pile)?.draw()?;
                    state.public.modify_player_state(player, "score", 1);
                    Ok(TurnControl::Advance)
                }
                BOOST => {
                    state.public.modify_player_state(player, "score", 2);
                    Ok(TurnControl::Advance)
                }
                BLOCK => {
                    state.public.modify_player_state(player, "blocks", 1);
                    Ok(TurnControl::Hold)
                }
                other => Err(KernelError::InvalidAction(format!("unknown {}", other))),
            }
        }

        fn check_terminal(&self, state: &GameState) -> Option<GameResult> {
            state
                .players_in_game()
                .into_iter()
                .find(|&p| state.public.get_player_state(p, "score", 0) >= 3)
                .map(GameResult::Winner)
        }

        fn heuristic(&self, state: &GameState, player: PlayerId) -> f64 {
            state.public.get_player_state(player, "score", 0) as f64 / 3.0
        }

        fn reaction_kind(&self, _state: &GameState, action: &Action) -> ReactionKind {
            match action.template {
                BOOST => ReactionKind::Nopeable,
                BLOCK => ReactionKind::Veto,
                _ => ReactionKind::Plain,
            }
        }

        fn reaction_actions(&self, _state: &GameState, _player: PlayerId) -> Vec<Action> {
            vec![Action::new(BLOCK)]
        }
    }

    fn ready(players: usize) -> (Counters, GameState) {
        let model = Counters::new(players);
        let mut state = GameState::new(GameParameters::new(1), players);
        model.setup(&mut state).unwrap();
        (model, state)
    }

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(P1);
        assert!(!result.is_winner(P0));
        assert!(result.is_winner(P1));
        assert_eq!(result.outcome_for(P0), PlayerResult::Lose);
        assert_eq!(GameResult::Draw.outcome_for(P0), PlayerResult::Draw);
        assert!(GameResult::Winners(vec![P0, P2]).is_winner(P2));
    }

    #[test]
    fn test_setup_creates_declared_containers() {
        let (model, state) = ready(2);
        assert_eq!(state.lifecycle(), Lifecycle::Ready);
        assert_eq!(state.container_size(model.pile).unwrap(), 20);
    }

    #[test]
    fn test_setup_twice_fails() {
        let (model, mut state) = ready(2);
        let before = state.clone();
        assert!(model.setup(&mut state).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_apply_before_setup() {
        let model = Counters::new(2);
        let mut state = GameState::new(GameParameters::new(0), 2);
        assert!(model.legal_actions(&state).is_empty());
        assert!(matches!(
            model.apply(&mut state, &Action::new(TAKE)),
            Err(KernelError::IllegalPhaseTransition(_))
        ));
    }

    #[test]
    fn test_plain_action_advances_turn() {
        let (model, mut state) = ready(3);
        model.apply(&mut state, &Action::new(TAKE)).unwrap();

        assert_eq!(state.current_player(), P1);
        assert_eq!(state.public.turn_number, 2);
        assert_eq!(state.public.get_player_state(P0, "score", 0), 1);
        assert_eq!(state.public.action_history.len(), 1);
    }

    #[test]
    fn test_nopeable_opens_window() {
        let (model, mut state) = ready(3);
        model.apply(&mut state, &Action::new(BOOST)).unwrap();

        assert_eq!(state.reaction.awaiting(), Some(P1));
        assert_eq!(model.legal_actions(&state), vec![Action::new(BLOCK), Action::pass()]);
        assert_eq!(state.public.get_player_state(P0, "score", 0), 0);

        model.apply(&mut state, &Action::pass()).unwrap();
        assert_eq!(state.reaction.awaiting(), Some(P2));
        model.apply(&mut state, &Action::pass()).unwrap();

        assert!(state.reaction.is_idle());
        assert_eq!(state.public.get_player_state(P0, "score", 0), 2);
        assert_eq!(state.current_player(), P1);
    }

    #[test]
    fn test_veto_cancels_and_executes_eagerly() {
        let (model, mut state) = ready(2);
        model.apply(&mut state, &Action::new(BOOST)).unwrap();
        model.apply(&mut state, &Action::new(BLOCK)).unwrap();

        // The block's own effect is already applied
        assert_eq!(state.public.get_player_state(P1, "blocks", 0), 1);
        assert_eq!(state.reaction.awaiting(), Some(P0));

        model.apply(&mut state, &Action::pass()).unwrap();
        assert_eq!(state.public.get_player_state(P0, "score", 0), 0);
        // Default on_vetoed holds the turn
        assert_eq!(state.current_player(), P0);
    }

    #[test]
    fn test_single_player_nopeable_executes_at_once() {
        let (model, mut state) = ready(1);
        model.apply(&mut state, &Action::new(BOOST)).unwrap();
        assert!(state.reaction.is_idle());
        assert_eq!(state.public.get_player_state(P0, "score", 0), 2);
    }

    #[test]
    fn test_illegal_actions_leave_state_unchanged() {
        let (model, mut state) = ready(2);
        let before = state.clone();
        assert!(model.apply(&mut state, &Action::pass()).is_err());
        assert!(model.apply(&mut state, &Action::new(BLOCK)).is_err());
        assert!(model.apply(&mut state, &Action::new(TemplateId(9))).is_err());
        assert_eq!(state, before);

        model.apply(&mut state, &Action::new(BOOST)).unwrap();
        let before = state.clone();
        assert!(model.apply(&mut state, &Action::new(TAKE)).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_game_over() {
        let (model, mut state) = ready(2);
        for _ in 0..5 {
            model.apply(&mut state, &Action::new(TAKE)).unwrap();
        }
        assert!(model.is_terminal(&state));
        assert!(model.legal_actions(&state).is_empty());
        assert_eq!(state.result(), Some(&GameResult::Winner(P0)));
        assert_eq!(model.score(&state, P0), 1.0);
        assert_eq!(model.score(&state, P1), 0.0);
        assert_eq!(model.apply(&mut state, &Action::new(TAKE)), Err(KernelError::GameOver));
    }

    #[test]
    fn test_end_turn_skips_eliminated_and_follows_delta() {
        let (model, mut state) = ready(4);
        state.set_player_result(PlayerId::new(1), PlayerResult::Lose);

        model.end_turn(&mut state);
        assert_eq!(state.current_player(), P2);

        state.reverse_direction();
        model.end_turn(&mut state);
        assert_eq!(state.current_player(), P0);
        model.end_turn(&mut state);
        assert_eq!(state.current_player(), PlayerId::new(3));
    }

    #[test]
    fn test_default_responders_follow_turn_order() {
        let (model, mut state) = ready(4);
        assert_eq!(model.responders(&state, P2), vec![PlayerId::new(3), P0, P1]);
        state.reverse_direction();
        assert_eq!(model.responders(&state, P2), vec![P1, P0, PlayerId::new(3)]);
    }

    #[test]
    fn test_score_clamps_heuristic() {
        let (model, mut state) = ready(2);
        state.public.set_player_state(P0, "score", 10);
        assert_eq!(model.score(&state, P0), 1.0);
        assert!((model.score(&state, P1) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_apply_slot() {
        let (model, mut state) = ready(2);
        model.apply_slot(&mut state, 0).unwrap();
        assert_eq!(state.public.get_player_state(P0, "score", 0), 1);
        assert!(matches!(
            model.apply_slot(&mut state, 2),
            Err(KernelError::InvalidAction(_))
        ));
    }

    #[test]
    fn test_rollout_plays_to_the_end() {
        let (model, mut state) = ready(3);
        let steps = model.rollout(&mut state, &mut GameRng::new(4), 1_000).unwrap();
        assert!(state.is_terminal());
        assert_eq!(state.public.action_history.len(), steps);

        let (model, mut state) = ready(3);
        assert_eq!(model.rollout(&mut state, &mut GameRng::new(4), 2).unwrap(), 2);
    }

    #[test]
    fn test_rollout_needs_setup() {
        let model = Counters::new(2);
        let mut state = GameState::new(GameParameters::new(1), 2);
        assert!(model.rollout(&mut state, &mut GameRng::new(1), 10).is_err());
    }
}
