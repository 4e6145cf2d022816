//! Forward model: the contract between games and the kernel.
//!
//! Games implement `ForwardModel` to define:
//! - Setup and dealing
//! - Legal actions for each game state
//! - How actions modify state
//! - Which actions can be contested
//! - Win/loss conditions
//!
//! The kernel calls into `ForwardModel` but never interprets
//! game-specific concepts directly.

pub mod engine;
pub mod game;
pub mod index;

pub use engine::{ForwardModel, GameResult, ReactionKind, TurnControl};
pub use game::{Game, RunConfig, RunSummary, StateObserver};
pub use index::ActionIndex;
