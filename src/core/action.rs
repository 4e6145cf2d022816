//! Action representation: template + entity pointers + integer parameters.
//!
//! Actions are immutable values. They name the "verb" with a template and
//! refer to the "nouns" by `EntityId` only, never by live reference, so an
//! action computed against a state replays faithfully against any copy that
//! preserves identifiers. Non-entity arguments (a depth in a pile, a chosen
//! ordering) travel as integer parameters.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::TemplateId;
use super::entity::EntityId;
use super::player::PlayerId;

/// A complete game action.
///
/// ```
/// use rust_tabletop::core::{Action, EntityId, TemplateId};
///
/// let draw = Action::new(TemplateId::new(0));
/// let play = Action::with_pointers(TemplateId::new(1), &[EntityId(12)]);
/// let place = Action::new(TemplateId::new(2)).with_params(&[3]);
///
/// assert!(draw.is_no_arg());
/// assert_eq!(play.pointer(0), Some(EntityId(12)));
/// assert_eq!(place.param(0), Some(3));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub template: TemplateId,

    /// Entity pointers (cards, containers, target players).
    pub pointers: SmallVec<[EntityId; 3]>,

    /// Integer arguments that are not entities.
    pub params: SmallVec<[i64; 2]>,
}

impl Action {
    /// Create an action with no pointers.
    #[must_use]
    pub fn new(template: TemplateId) -> Self {
        Self {
            template,
            pointers: SmallVec::new(),
            params: SmallVec::new(),
        }
    }

    /// Create an action with the given pointers.
    #[must_use]
    pub fn with_pointers(template: TemplateId, pointers: &[EntityId]) -> Self {
        Self {
            template,
            pointers: SmallVec::from_slice(pointers),
            params: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: &[i64]) -> Self {
        self.params = SmallVec::from_slice(params);
        self
    }

    /// The kernel's reaction-window pass.
    #[must_use]
    pub fn pass() -> Self {
        Self::new(TemplateId::PASS)
    }

    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.template == TemplateId::PASS
    }

    #[must_use]
    pub fn pointer(&self, index: usize) -> Option<EntityId> {
        self.pointers.get(index).copied()
    }

    #[must_use]
    pub fn param(&self, index: usize) -> Option<i64> {
        self.params.get(index).copied()
    }

    /// Check if this action carries no pointers and no parameters.
    #[must_use]
    pub fn is_no_arg(&self) -> bool {
        self.pointers.is_empty() && self.params.is_empty()
    }
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the turn.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash(a: &Action) -> u64 {
        let mut h = DefaultHasher::new();
        a.hash(&mut h);
        h.finish()
    }

    #[test]
    fn test_pass() {
        let pass = Action::pass();
        assert!(pass.is_pass());
        assert!(pass.is_no_arg());
        assert!(!Action::new(TemplateId::new(0)).is_pass());
    }

    #[test]
    fn test_accessors() {
        let action = Action::with_pointers(TemplateId::new(1), &[EntityId(5), EntityId(10)])
            .with_params(&[2, -1]);

        assert_eq!(action.pointer(1), Some(EntityId(10)));
        assert_eq!(action.pointer(2), None);
        assert_eq!(action.param(1), Some(-1));
        assert!(!action.is_no_arg());
    }

    #[test]
    fn test_value_equality_and_hash() {
        let a1 = Action::with_pointers(TemplateId::new(1), &[EntityId(5)]).with_params(&[0]);
        let a2 = Action::with_pointers(TemplateId::new(1), &[EntityId(5)]).with_params(&[0]);
        let a3 = Action::with_pointers(TemplateId::new(1), &[EntityId(5)]).with_params(&[1]);
        let a4 = Action::with_pointers(TemplateId::new(2), &[EntityId(5)]).with_params(&[0]);

        assert_eq!(a1, a2);
        assert_eq!(hash(&a1), hash(&a2));
        assert_ne!(a1, a3);
        assert_ne!(a1, a4);
    }

    #[test]
    fn test_usable_as_transposition_key() {
        let mut visits = std::collections::HashMap::new();
        *visits.entry(Action::pass()).or_insert(0) += 1;
        *visits.entry(Action::pass()).or_insert(0) += 1;
        assert_eq!(visits[&Action::pass()], 2);
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::with_pointers(TemplateId::new(1), &[EntityId(5)]).with_params(&[4]);
        let json = serde_json::to_string(&action).unwrap();
        let deserialized: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(action, deserialized);
    }

    #[test]
    fn test_action_record() {
        let record = ActionRecord::new(PlayerId::new(1), Action::pass(), 2, 3);
        assert_eq!(record.player, PlayerId::new(1));
        assert!(record.action.is_pass());
        assert_eq!((record.turn, record.sequence), (2, 3));
    }
}
