//! Redeterminization of hidden items.
//!
//! Given an observer, every item the observer cannot see is a random
//! variable. This module draws one consistent assignment:
//!
//! 1. Walk the containers in id order and collect the slots hidden from the
//!    observer.
//! 2. Pool the slots by `ExchangeGroup`. A container without a group is a
//!    pool of its own (it only ever reshuffles within itself).
//! 3. Shuffle each pool's items with the supplied stream and write them back
//!    into the same slots.
//!
//! Container sizes, the total item count, and every item the observer can
//! see are unchanged. An item that lands in a different slot loses its
//! reveal mask: who had seen it is no longer consistent with where it is.

use std::collections::BTreeMap;

use log::{debug, trace};

use crate::containers::EntityRegistry;
use crate::core::config::ExchangeGroup;
use crate::core::entity::EntityId;
use crate::core::error::KernelError;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;

/// Key of one interchangeable population of hidden items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PoolKey {
    Group(ExchangeGroup),
    /// A container that exchanges with nothing.
    Solo(EntityId),
}

/// One hidden slot: a position in a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    pub container: EntityId,
    pub index: usize,
    pub item: EntityId,
}

/// What a redeterminization pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeterminizationSummary {
    /// Pools with at least one hidden slot.
    pub pools: usize,
    /// Hidden slots resampled.
    pub slots: usize,
    /// Slots whose item changed.
    pub moved: usize,
}

/// Group the slots hidden from `observer` into pools, in id order.
#[must_use]
pub fn hidden_pools(registry: &EntityRegistry, observer: PlayerId) -> BTreeMap<PoolKey, Vec<Slot>> {
    let mut pools: BTreeMap<PoolKey, Vec<Slot>> = BTreeMap::new();

    for container in registry.containers() {
        if container.is_fully_visible_to(observer) {
            continue;
        }
        let key = container
            .exchange_group
            .map_or(PoolKey::Solo(container.id), PoolKey::Group);
        let slots = pools.entry(key).or_default();
        for index in container.hidden_slots(observer) {
            if let Some(item) = container.get(index) {
                slots.push(Slot {
                    container: container.id,
                    index,
                    item,
                });
            }
        }
    }

    pools.retain(|_, slots| !slots.is_empty());
    pools
}

/// Resample everything `observer` cannot see, in place.
pub fn redeterminize(
    registry: &mut EntityRegistry,
    observer: PlayerId,
    rng: &mut GameRng,
) -> Result<DeterminizationSummary, KernelError> {
    let pools = hidden_pools(registry, observer);
    let mut summary = DeterminizationSummary {
        pools: pools.len(),
        ..DeterminizationSummary::default()
    };

    for (key, slots) in pools {
        let mut items: Vec<EntityId> = slots.iter().map(|s| s.item).collect();
        rng.shuffle(&mut items);
        trace!("pool {:?}: {} hidden slots", key, slots.len());

        // Masks are cleared first so an item moving into a container it was
        // revealed in does not keep a stale entry.
        for (slot, &item) in slots.iter().zip(&items) {
            if slot.item != item {
                registry.container_mut(slot.container)?.conceal(slot.item);
            }
        }
        for (slot, &item) in slots.iter().zip(&items) {
            summary.slots += 1;
            if slot.item == item {
                continue;
            }
            summary.moved += 1;
            let container = registry.container_mut(slot.container)?;
            container.conceal(item);
            container.set(slot.index, item);
            registry.set_location(item, slot.container);
        }
    }

    debug!(
        "redeterminized for {}: {} pools, {} slots, {} moved",
        observer, summary.pools, summary.slots, summary.moved
    );
    Ok(summary)
}
