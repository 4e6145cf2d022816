//! Snapshots and checkpoints.
//!
//! - `StateSnapshot`: what one observer (or an omniscient viewer) can see:
//!   the public state plus every container's layout, with hidden items
//!   blanked out. For renderers and replay logs.
//! - `encode_state` / `decode_state`: the complete state, random streams
//!   included, as bincode bytes. A decoded state continues exactly where
//!   the encoded one stopped.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::error::KernelError;
use super::player::PlayerId;
use super::state::{GameState, Lifecycle, PublicState};
use crate::items::ItemKind;
use crate::rules::GameResult;

/// One container as seen by the snapshot's observer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerView {
    pub id: EntityId,
    pub name: String,
    pub owner: Option<PlayerId>,
    /// Front to back. `None` for items the observer cannot see.
    pub items: Vec<Option<(EntityId, ItemKind)>>,
}

impl ContainerView {
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items the observer can identify.
    #[must_use]
    pub fn known(&self) -> usize {
        self.items.iter().filter(|i| i.is_some()).count()
    }
}

/// Observable layout of a state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub observer: Option<PlayerId>,
    pub public: PublicState,
    pub lifecycle: Lifecycle,
    pub result: Option<GameResult>,
    pub containers: Vec<ContainerView>,
}

impl StateSnapshot {
    /// Capture `state` as `observer` sees it (`None` sees everything).
    #[must_use]
    pub fn capture(state: &GameState, observer: Option<PlayerId>) -> Self {
        let registry = state.registry();
        let containers = registry
            .containers()
            .map(|c| ContainerView {
                id: c.id,
                name: c.name.clone(),
                owner: c.owner,
                items: c
                    .iter()
                    .map(|item| {
                        let visible = observer.map_or(true, |o| c.is_visible_to(item, o));
                        if !visible {
                            return None;
                        }
                        registry.item(item).ok().map(|i| (item, i.kind))
                    })
                    .collect(),
            })
            .collect();

        Self {
            observer,
            public: state.public.clone(),
            lifecycle: state.lifecycle(),
            result: state.result().cloned(),
            containers,
        }
    }

    #[must_use]
    pub fn container(&self, id: EntityId) -> Option<&ContainerView> {
        self.containers.iter().find(|c| c.id == id)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, KernelError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KernelError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl GameState {
    /// Observable layout of this state for `observer`.
    #[must_use]
    pub fn snapshot(&self, observer: Option<PlayerId>) -> StateSnapshot {
        StateSnapshot::capture(self, observer)
    }
}

/// Encode the complete state, both random streams included.
pub fn encode_state(state: &GameState) -> Result<Vec<u8>, KernelError> {
    Ok(bincode::serialize(state)?)
}

pub fn decode_state(bytes: &[u8]) -> Result<GameState, KernelError> {
    Ok(bincode::deserialize(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{ContainerConfig, GameParameters};
    use crate::items::Item;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn state() -> (GameState, EntityId, EntityId) {
        let mut state = GameState::new(GameParameters::new(4), 2);
        let hand = state.create_container(&ContainerConfig::new("Hand").with_owner(P0).owner_only());
        let discard = state.create_container(&ContainerConfig::new("Discard"));
        for k in 0..3 {
            state.create_item(Item::new(ItemKind::new(k)), hand).unwrap();
        }
        state.create_item(Item::new(ItemKind::new(9)), discard).unwrap();
        (state, hand, discard)
    }

    #[test]
    fn test_observer_view_blanks_hidden_items() {
        let (state, hand, discard) = state();

        let mine = state.snapshot(Some(P0));
        assert_eq!(mine.container(hand).unwrap().known(), 3);

        let theirs = state.snapshot(Some(P1));
        let view = theirs.container(hand).unwrap();
        assert_eq!(view.len(), 3);
        assert_eq!(view.known(), 0);
        assert_eq!(theirs.container(discard).unwrap().known(), 1);

        assert_eq!(state.snapshot(None).container(hand).unwrap().known(), 3);
    }

    #[test]
    fn test_snapshot_bytes() {
        let (state, _, _) = state();
        let snapshot = state.snapshot(Some(P1));
        let bytes = snapshot.to_bytes().unwrap();
        assert_eq!(StateSnapshot::from_bytes(&bytes).unwrap(), snapshot);
        assert!(matches!(
            StateSnapshot::from_bytes(&bytes[..3]),
            Err(KernelError::Serialization(_))
        ));
    }

    #[test]
    fn test_checkpoint_resumes_rng() {
        let (mut state, _, _) = state();
        state.rng.gen_range(0..10);

        let bytes = encode_state(&state).unwrap();
        let mut restored = decode_state(&bytes).unwrap();

        assert_eq!(restored, state);
        assert_eq!(restored.rng.gen_range(0..1000), state.rng.gen_range(0..1000));
    }
}
