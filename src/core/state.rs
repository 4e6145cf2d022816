//! Game state: public information plus the entity registry.
//!
//! ## PublicState
//!
//! Observable by all players:
//! - Phase, turn, active player, turn direction
//! - Per-player results (who is still in the game)
//! - Per-player and per-turn integer state
//! - Action history
//!
//! ## GameState
//!
//! The complete state tree:
//! - Public state
//! - Entity registry (containers, items, item locations)
//! - Lifecycle and final result
//! - Reaction resolver state
//! - Gameplay RNG and a separate redeterminization RNG
//!
//! ## Copies
//!
//! `GameState::copy(None)` is a faithful copy. `copy(Some(observer))` is a
//! determinized copy: everything `observer` cannot see is resampled from
//! what they could consistently believe. Both are cheap thanks to `im`.

use im::Vector;
use log::{debug, error};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::config::{ContainerConfig, GameParameters, PhaseId};
use super::entity::EntityId;
use super::error::KernelError;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::containers::{Container, EntityRegistry, InsertPosition};
use crate::determinize::redeterminize;
use crate::items::Item;
use crate::rules::GameResult;
use crate::stack::ReactionState;

/// Where a state is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Created but not set up by a forward model.
    #[default]
    Uninitialized,
    /// In play.
    Ready,
    /// Game over. No further actions are accepted.
    Terminal,
}

/// One player's standing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerResult {
    /// Still in the game.
    #[default]
    Ongoing,
    Win,
    Lose,
    Draw,
}

impl PlayerResult {
    /// Score of a finished player: 1 for a win, 0.5 for a draw, 0 for a loss.
    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            PlayerResult::Ongoing => None,
            PlayerResult::Win => Some(1.0),
            PlayerResult::Draw => Some(0.5),
            PlayerResult::Lose => Some(0.0),
        }
    }
}

/// Public game state - observable by all players.
///
/// ## State Values (i64 only)
///
/// `player_state` and `turn_state` use `FxHashMap<String, i64>`:
/// - Booleans: use 0/1
/// - Entity references: use EntityId.0 as i64
/// - Enums: use discriminant values
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicState {
    player_count: usize,

    /// Current phase (game-specific, opaque to the kernel).
    pub phase: PhaseId,

    /// Turn number (starts at 1).
    pub turn_number: u32,

    /// Action sequence within turn.
    pub action_sequence: u32,

    /// Player whose turn it is.
    pub active_player: PlayerId,

    /// Seat offset applied by `ForwardModel::end_turn`. 1 is clockwise,
    /// -1 counter-clockwise.
    pub turn_delta: i32,

    pub player_results: PlayerMap<PlayerResult>,

    /// Per-player state - games define keys.
    pub player_state: PlayerMap<FxHashMap<String, i64>>,

    /// Per-turn state (cleared on turn advance).
    pub turn_state: FxHashMap<String, i64>,

    pub action_history: Vector<ActionRecord>,
}

fn hash_sorted<H: std::hash::Hasher>(map: &FxHashMap<String, i64>, hasher: &mut H) {
    use std::hash::Hash;
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by_key(|(k, _)| *k);
    entries.hash(hasher);
}

impl std::hash::Hash for PublicState {
    fn hash<H: std::hash::Hasher>(&self, hasher: &mut H) {
        self.player_count.hash(hasher);
        self.phase.hash(hasher);
        self.turn_number.hash(hasher);
        self.action_sequence.hash(hasher);
        self.active_player.hash(hasher);
        self.turn_delta.hash(hasher);
        self.player_results.hash(hasher);
        for (_, map) in self.player_state.iter() {
            hash_sorted(map, hasher);
        }
        hash_sorted(&self.turn_state, hasher);
        self.action_history.hash(hasher);
    }
}

impl PublicState {
    /// Create a new public state.
    ///
    /// ## Defaults
    ///
    /// - `active_player`: Player 0
    /// - `phase`: PhaseId(0)
    /// - `turn_number`: 1
    /// - `turn_delta`: 1
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            player_count,
            phase: PhaseId::default(),
            turn_number: 1,
            action_sequence: 0,
            active_player: PlayerId::new(0),
            turn_delta: 1,
            player_results: PlayerMap::with_default(player_count),
            player_state: PlayerMap::with_default(player_count),
            turn_state: FxHashMap::default(),
            action_history: Vector::new(),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.player_count)
    }

    // === Player State ===

    #[must_use]
    pub fn get_player_state(&self, player: PlayerId, key: &str, default: i64) -> i64 {
        self.player_state[player].get(key).copied().unwrap_or(default)
    }

    pub fn set_player_state(&mut self, player: PlayerId, key: impl Into<String>, value: i64) {
        self.player_state[player].insert(key.into(), value);
    }

    /// Modify a player state value by delta.
    pub fn modify_player_state(&mut self, player: PlayerId, key: &str, delta: i64) {
        let current = self.get_player_state(player, key, 0);
        self.player_state[player].insert(key.to_string(), current + delta);
    }

    // === Turn State ===

    #[must_use]
    pub fn get_turn_state(&self, key: &str, default: i64) -> i64 {
        self.turn_state.get(key).copied().unwrap_or(default)
    }

    pub fn set_turn_state(&mut self, key: impl Into<String>, value: i64) {
        self.turn_state.insert(key.into(), value);
    }

    // === Turn Advancement ===

    /// Advance to next turn, clearing turn_state.
    pub fn advance_turn(&mut self) {
        self.turn_number += 1;
        self.turn_state.clear();
        self.action_sequence = 0;
    }

    /// Flip the direction of play.
    pub fn reverse_direction(&mut self) {
        self.turn_delta = -self.turn_delta;
    }

    // === Action History ===

    pub fn record_action(&mut self, record: ActionRecord) {
        self.action_history.push_back(record);
    }

    /// Get the next action sequence number and increment.
    pub fn next_sequence(&mut self) -> u32 {
        let seq = self.action_sequence;
        self.action_sequence += 1;
        seq
    }
}

/// Full game state including hidden information.
///
/// Equality and hashing cover everything except the two random streams, so
/// a faithful copy compares equal to its source.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub public: PublicState,

    registry: EntityRegistry,

    lifecycle: Lifecycle,

    result: Option<GameResult>,

    /// Reaction window bookkeeping. Driven by the forward model.
    pub reaction: ReactionState,

    parameters: GameParameters,

    /// Gameplay RNG (deals, shuffles, random effects).
    pub rng: GameRng,

    /// Source for determinized copies. Never used for gameplay.
    redeterminization_rng: GameRng,
}

impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.public == other.public
            && self.registry == other.registry
            && self.lifecycle == other.lifecycle
            && self.result == other.result
            && self.reaction == other.reaction
            && self.parameters == other.parameters
    }
}

impl Eq for GameState {}

impl std::hash::Hash for GameState {
    fn hash<H: std::hash::Hasher>(&self, hasher: &mut H) {
        self.public.hash(hasher);
        self.registry.hash(hasher);
        self.lifecycle.hash(hasher);
        self.result.hash(hasher);
        self.reaction.hash(hasher);
        self.parameters.hash(hasher);
    }
}

impl GameState {
    /// Create an empty, un-set-up state.
    ///
    /// ```
    /// use rust_tabletop::core::{GameParameters, GameState, Lifecycle};
    ///
    /// let state = GameState::new(GameParameters::new(42), 3);
    /// assert_eq!(state.player_count(), 3);
    /// assert_eq!(state.lifecycle(), Lifecycle::Uninitialized);
    /// ```
    #[must_use]
    pub fn new(parameters: GameParameters, player_count: usize) -> Self {
        let rng = GameRng::new(parameters.seed);
        let redeterminization_rng = match parameters.redeterminization_seed {
            Some(seed) => GameRng::new(seed),
            None => rng.for_context("redeterminization"),
        };
        Self {
            public: PublicState::new(player_count),
            registry: EntityRegistry::new(player_count),
            lifecycle: Lifecycle::Uninitialized,
            result: None,
            reaction: ReactionState::Idle,
            parameters,
            rng,
            redeterminization_rng,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.public.player_count()
    }

    #[must_use]
    pub fn parameters(&self) -> &GameParameters {
        &self.parameters
    }

    // === Lifecycle ===

    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub(crate) fn set_lifecycle(&mut self, lifecycle: Lifecycle) {
        debug!("lifecycle {:?} -> {:?}", self.lifecycle, lifecycle);
        self.lifecycle = lifecycle;
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.lifecycle == Lifecycle::Terminal
    }

    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// End the game. Players still `Ongoing` receive their outcome from
    /// `result`; players already out keep theirs.
    pub fn finish(&mut self, result: GameResult) {
        for player in PlayerId::all(self.player_count()) {
            if self.public.player_results[player] == PlayerResult::Ongoing {
                self.public.player_results[player] = result.outcome_for(player);
            }
        }
        debug!("game over: {:?}", result);
        self.result = Some(result);
        self.set_lifecycle(Lifecycle::Terminal);
    }

    // === Players ===

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.public.active_player
    }

    #[must_use]
    pub fn player_result(&self, player: PlayerId) -> PlayerResult {
        self.public.player_results[player]
    }

    pub fn set_player_result(&mut self, player: PlayerId, result: PlayerResult) {
        self.public.player_results[player] = result;
    }

    #[must_use]
    pub fn is_in_game(&self, player: PlayerId) -> bool {
        self.public.player_results[player] == PlayerResult::Ongoing
    }

    /// Players still in the game, in seat order.
    #[must_use]
    pub fn players_in_game(&self) -> Vec<PlayerId> {
        PlayerId::all(self.player_count()).filter(|&p| self.is_in_game(p)).collect()
    }

    pub fn set_turn_delta(&mut self, delta: i32) {
        self.public.turn_delta = delta;
    }

    pub fn reverse_direction(&mut self) {
        self.public.reverse_direction();
    }

    // === Entities ===

    #[must_use]
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut EntityRegistry {
        &mut self.registry
    }

    pub fn create_container(&mut self, config: &ContainerConfig) -> EntityId {
        self.registry.create_container(config)
    }

    /// Register an item at the back of `container`.
    pub fn create_item(&mut self, item: Item, container: EntityId) -> Result<EntityId, KernelError> {
        self.registry.create_item(item, container)
    }

    pub fn container(&self, id: EntityId) -> Result<&Container, KernelError> {
        self.registry.container(id)
    }

    pub fn container_mut(&mut self, id: EntityId) -> Result<&mut Container, KernelError> {
        self.registry.container_mut(id)
    }

    pub fn item(&self, id: EntityId) -> Result<&Item, KernelError> {
        self.registry.item(id)
    }

    pub fn item_mut(&mut self, id: EntityId) -> Result<&mut Item, KernelError> {
        self.registry.item_mut(id)
    }

    /// Move an item into `to`. Atomic: on error nothing has moved.
    pub fn move_item(
        &mut self,
        item: EntityId,
        to: EntityId,
        position: InsertPosition,
    ) -> Result<(), KernelError> {
        self.registry.move_item(item, to, position)
    }

    /// Move the front item of `from` to the back of `to`.
    pub fn draw_into(&mut self, from: EntityId, to: EntityId) -> Result<EntityId, KernelError> {
        self.registry.draw_into(from, to)
    }

    /// Shuffle a container with the gameplay RNG.
    pub fn shuffle_container(&mut self, id: EntityId) -> Result<(), KernelError> {
        let container = self.registry.container_mut(id)?;
        container.shuffle(&mut self.rng);
        Ok(())
    }

    /// Reveal an item to a player wherever it currently is.
    pub fn reveal_to(&mut self, item: EntityId, player: PlayerId) -> Result<(), KernelError> {
        let container = self
            .registry
            .location_of(item)
            .ok_or(KernelError::DanglingReference(item))?;
        self.registry.container_mut(container)?.reveal_to(item, player)?;
        Ok(())
    }

    pub fn container_size(&self, id: EntityId) -> Result<usize, KernelError> {
        Ok(self.registry.container(id)?.len())
    }

    #[must_use]
    pub fn location_of(&self, item: EntityId) -> Option<EntityId> {
        self.registry.location_of(item)
    }

    #[must_use]
    pub fn total_items(&self) -> usize {
        self.registry.total_items()
    }

    // === Copies ===

    /// Copy this state, determinized for `observer`.
    ///
    /// `None` returns a faithful clone and leaves this state untouched.
    /// `Some(p)` resamples every item `p` cannot see, drawing from this
    /// state's redeterminization stream, which advances. The copy gets a
    /// fork of that stream and a freshly seeded gameplay stream, so
    /// rollouts on it cannot foresee the real game's shuffles.
    ///
    /// ```
    /// use rust_tabletop::core::{GameParameters, GameState, PlayerId};
    ///
    /// let mut state = GameState::new(GameParameters::new(1), 2);
    /// let copy = state.copy(Some(PlayerId::new(0)));
    /// assert_eq!(copy.total_items(), state.total_items());
    /// ```
    #[must_use]
    pub fn copy(&mut self, observer: Option<PlayerId>) -> GameState {
        match observer {
            None => self.clone(),
            Some(_) => {
                let mut stream = self.redeterminization_rng.fork();
                self.copy_with(observer, &mut stream)
            }
        }
    }

    /// Like `copy`, drawing randomness from a caller-owned stream.
    ///
    /// `rng` is only read for `Some(observer)`.
    #[must_use]
    pub fn copy_with(&self, observer: Option<PlayerId>, rng: &mut GameRng) -> GameState {
        let mut copy = self.clone();
        if let Some(observer) = observer {
            copy.redeterminization_rng = rng.fork();
            // Upcoming deals are as hidden as the cards themselves
            copy.rng = GameRng::new(rng.next_seed());

            if let Err(err) = redeterminize(&mut copy.registry, observer, rng) {
                error!("redeterminization for {} failed: {}", observer, err);
                copy.registry = self.registry.clone();
            }
        }
        copy
    }
}
