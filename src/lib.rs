//! # rust-tabletop
//!
//! A simulation kernel for hidden-information tabletop games, built for
//! search agents that need to copy, redeterminize, and roll states forward
//! millions of times.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: No hardcoded containers, templates, phases, or
//!    item types. Games configure these at startup.
//!
//! 2. **N-Player First**: Every API takes `player_count` as context.
//!    No convenience methods that assume 2 players.
//!
//! 3. **Visibility Is Data**: Who can see what lives on the containers
//!    (a per-container mode plus per-item reveals), so any observer's
//!    information set can be computed from the state alone.
//!
//! ## Architecture
//!
//! - **Determinized Copies**: `GameState::copy(Some(player))` returns a
//!   world consistent with what `player` has seen, reshuffling everything
//!   hidden from them within its exchange group.
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, so copies
//!   and atomic `apply` stay cheap.
//!
//! - **Reaction Stack**: Nopeable actions open a window where vetoes stack;
//!   parity of the stack decides whether the contested action happens.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, players, state, actions, RNG, configuration, errors
//! - `containers`: Visibility-tracked containers and the entity registry
//! - `items`: Item instances and the type catalog
//! - `determinize`: Hidden-information resampling
//! - `rules`: The `ForwardModel` trait, episode driver, action index
//! - `stack`: Reaction windows
//! - `games`: Reference game implementations

pub mod core;
pub mod containers;
pub mod items;
pub mod determinize;
pub mod rules;
pub mod stack;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    EntityId, PlayerId, PlayerMap, PlayerMask,
    GameRng, GameRngState,
    ContainerConfig, ExchangeGroup, Visibility,
    TemplateId, TemplateConfig, PhaseId, GameConfig, GameParameters,
    Action, ActionRecord,
    ContainerError, KernelError,
    Lifecycle, PlayerResult, PublicState, GameState,
    StateSnapshot,
};

pub use crate::containers::{Container, Entity, EntityRegistry, InsertPosition};

pub use crate::items::{Item, ItemCatalog, ItemDefinition, ItemKind};

pub use crate::determinize::{redeterminize, DeterminizationSummary};

pub use crate::rules::{
    ActionIndex, ForwardModel, Game, GameResult, ReactionKind, RunConfig, RunSummary,
    StateObserver, TurnControl,
};

pub use crate::stack::{ReactionState, ReactionStep, Resolution, StackEntry};
