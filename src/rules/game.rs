//! Episode driver.
//!
//! `Game` bundles a forward model with one state and notifies observers
//! (renderers, loggers, metric collectors) as the episode unfolds. Policies
//! are plain closures: the kernel has no opinion on how agents choose.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::engine::{ForwardModel, GameResult};
use crate::core::action::Action;
use crate::core::config::GameParameters;
use crate::core::error::KernelError;
use crate::core::player::PlayerId;
use crate::core::state::GameState;

/// Callbacks fired by `Game`. All methods default to doing nothing.
pub trait StateObserver {
    fn on_setup(&mut self, _state: &GameState) {}

    /// After `action` by `player` was applied.
    fn on_action(&mut self, _state: &GameState, _player: PlayerId, _action: &Action) {}

    fn on_game_over(&mut self, _state: &GameState, _result: &GameResult) {}
}

/// Settings for one episode. Deserializable so a runner can read it from
/// a file; the kernel itself never parses anything.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub seed: u64,

    #[serde(default)]
    pub redeterminization_seed: Option<u64>,

    /// Stop after this many applied actions even if the game continues.
    #[serde(default = "RunConfig::default_max_steps")]
    pub max_steps: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            redeterminization_seed: None,
            max_steps: Self::default_max_steps(),
        }
    }
}

impl RunConfig {
    fn default_max_steps() -> usize {
        10_000
    }

    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn with_max_steps(mut self, max: usize) -> Self {
        self.max_steps = max;
        self
    }

    pub fn with_redeterminization_seed(mut self, seed: u64) -> Self {
        self.redeterminization_seed = Some(seed);
        self
    }

    #[must_use]
    pub fn parameters(&self) -> GameParameters {
        GameParameters {
            seed: self.seed,
            redeterminization_seed: self.redeterminization_seed,
        }
    }
}

/// How an episode ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: usize,
    /// `None` if the step limit was hit first.
    pub result: Option<GameResult>,
}

/// A model, its state, and the observers watching them.
pub struct Game<M: ForwardModel> {
    model: M,
    state: GameState,
    observers: Vec<Box<dyn StateObserver>>,
}

impl<M: ForwardModel> Game<M> {
    /// Create and set up a game.
    pub fn new(model: M, parameters: GameParameters) -> Result<Self, KernelError> {
        Self::with_observers(model, parameters, Vec::new())
    }

    /// Create a game whose observers also see the setup.
    pub fn with_observers(
        model: M,
        parameters: GameParameters,
        mut observers: Vec<Box<dyn StateObserver>>,
    ) -> Result<Self, KernelError> {
        let mut state = GameState::new(parameters, model.config().player_count);
        model.setup(&mut state)?;
        for observer in &mut observers {
            observer.on_setup(&state);
        }
        Ok(Self {
            model,
            state,
            observers,
        })
    }

    pub fn add_observer(&mut self, observer: Box<dyn StateObserver>) {
        self.observers.push(observer);
    }

    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for search code that copies the state.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        self.model.legal_actions(&self.state)
    }

    /// Apply one action and notify observers.
    pub fn step(&mut self, action: &Action) -> Result<(), KernelError> {
        let player = self.model.acting_player(&self.state);
        self.model.apply(&mut self.state, action)?;

        for observer in &mut self.observers {
            observer.on_action(&self.state, player, action);
        }
        if let Some(result) = self.state.result() {
            for observer in &mut self.observers {
                observer.on_game_over(&self.state, result);
            }
        }
        Ok(())
    }

    /// Play until the game ends or `max_steps` actions were applied.
    ///
    /// `policy` receives the state and the legal actions and returns the
    /// index of its choice.
    pub fn run<P>(&mut self, mut policy: P, max_steps: usize) -> Result<RunSummary, KernelError>
    where
        P: FnMut(&GameState, &[Action]) -> usize,
    {
        let mut steps = 0;
        while steps < max_steps && !self.state.is_terminal() {
            let actions = self.legal_actions();
            let choice = policy(&self.state, &actions);
            let action = actions.get(choice).ok_or_else(|| {
                KernelError::InvalidAction(format!(
                    "policy chose {} of {} actions",
                    choice,
                    actions.len()
                ))
            })?;
            self.step(action)?;
            steps += 1;
        }

        if !self.state.is_terminal() {
            warn!("episode stopped after {} steps without a result", steps);
        }
        debug!("episode finished after {} steps", steps);
        Ok(RunSummary {
            steps,
            result: self.state.result().cloned(),
        })
    }

    /// Consume the game, returning the final state.
    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }
}
