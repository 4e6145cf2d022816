//! "Kittens": a bomb-drawing card game for exercising the kernel.
//!
//! - Each player starts with a Defuse and a few cards from a shared deck
//! - On your turn: play any number of action cards, then draw one card
//! - Drawing a Bomb eliminates you unless you discard a Defuse; a defused
//!   bomb goes back into the draw pile at a depth of your choice
//! - Any played action card can be Noped, and Nopes can be Noped in turn
//! - Last player standing wins
//!
//! Hands and the draw pile share one exchange group, so a determinized
//! copy deals unknown cards across both. Supports 2-5 players.

mod game;

pub use game::{phases, Card, Kittens, KittensBuilder, KittensContainers, Templates};
