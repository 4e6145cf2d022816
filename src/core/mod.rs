//! Core kernel types: entities, players, state, actions, RNG, configuration.
//!
//! This module contains the fundamental building blocks that are game-agnostic.
//! Games configure these via `GameConfig` rather than modifying the core.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;
pub mod state;
pub mod snapshot;

pub use entity::EntityId;
pub use player::{PlayerId, PlayerMap, PlayerMask};
pub use rng::{GameRng, GameRngState};
pub use config::{
    ContainerConfig, ExchangeGroup, GameConfig, GameParameters, PhaseId, TemplateConfig,
    TemplateId, Visibility,
};
pub use action::{Action, ActionRecord};
pub use error::{ContainerError, KernelError};
pub use state::{GameState, Lifecycle, PlayerResult, PublicState};
pub use snapshot::{decode_state, encode_state, ContainerView, StateSnapshot};
