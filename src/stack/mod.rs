//! Reaction stacks.
//!
//! Contested actions (nope-style cards) are resolved by an explicit state
//! machine rather than by callbacks: `ReactionState` records the stack and
//! who still has to answer, and reports a `Resolution` once everybody has.
//!
//! ```
//! use rust_tabletop::core::{Action, PlayerId, TemplateId};
//! use rust_tabletop::stack::{ReactionState, ReactionStep};
//!
//! let (p0, p1) = (PlayerId::new(0), PlayerId::new(1));
//! let mut reaction = ReactionState::default();
//! reaction.open(p0, Action::new(TemplateId::new(1)), &[p1], None).unwrap();
//!
//! // One veto: the contested action is cancelled
//! reaction.push_veto(p1, Action::new(TemplateId::new(2)), &[p0]).unwrap();
//! match reaction.pass(p0).unwrap() {
//!     ReactionStep::Resolved(r) => assert!(!r.executes),
//!     ReactionStep::Awaiting(_) => unreachable!(),
//! }
//! ```

mod reaction;

pub use reaction::{ReactionState, ReactionStep, ReactionWindow, Resolution, StackEntry};
