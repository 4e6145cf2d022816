//! Per-call action index.
//!
//! Learning agents want a fixed action space. Instead of a global action
//! tree rebuilt every step, the index maps the game's template list (plus
//! one trailing slot for pass) onto whatever is legal right now.

use crate::core::action::Action;
use crate::core::config::{GameConfig, TemplateId};

/// Legal actions bucketed by template slot.
///
/// Slot `i` is `config.templates[i]`; the last slot is the reaction pass.
///
/// ```
/// use rust_tabletop::core::{Action, GameConfig, TemplateConfig, TemplateId};
/// use rust_tabletop::rules::ActionIndex;
///
/// let config = GameConfig::new(2)
///     .with_template(TemplateConfig::no_args(TemplateId::new(0), "Draw"))
///     .with_template(TemplateConfig::new(TemplateId::new(1), "Play", 1));
/// let index = ActionIndex::build(&config, vec![Action::new(TemplateId::new(0))]);
///
/// assert_eq!(index.mask(), vec![true, false, false]);
/// assert_eq!(index.action_for(0), Some(&Action::new(TemplateId::new(0))));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionIndex {
    templates: Vec<TemplateId>,
    slots: Vec<Vec<Action>>,
}

impl ActionIndex {
    /// Bucket `actions` by template. Actions with an undeclared template
    /// are dropped.
    #[must_use]
    pub fn build(config: &GameConfig, actions: Vec<Action>) -> Self {
        let mut templates: Vec<TemplateId> = config.templates.iter().map(|t| t.id).collect();
        templates.push(TemplateId::PASS);
        let mut slots = vec![Vec::new(); templates.len()];

        for action in actions {
            match templates.iter().position(|&t| t == action.template) {
                Some(slot) => slots[slot].push(action),
                None => log::warn!("{} is not a declared template", action.template),
            }
        }
        Self { templates, slots }
    }

    /// Number of slots (templates + pass).
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Vec::is_empty)
    }

    /// One flag per slot: does it hold a legal action?
    #[must_use]
    pub fn mask(&self) -> Vec<bool> {
        self.slots.iter().map(|s| !s.is_empty()).collect()
    }

    /// First legal action in a slot.
    #[must_use]
    pub fn action_for(&self, slot: usize) -> Option<&Action> {
        self.slots.get(slot).and_then(|s| s.first())
    }

    /// All legal actions in a slot (pointer and parameter variants).
    #[must_use]
    pub fn choices(&self, slot: usize) -> &[Action] {
        self.slots.get(slot).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn slot_of(&self, template: TemplateId) -> Option<usize> {
        self.templates.iter().position(|&t| t == template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TemplateConfig;
    use crate::core::entity::EntityId;

    fn config() -> GameConfig {
        GameConfig::new(2)
            .with_template(TemplateConfig::no_args(TemplateId::new(0), "Draw"))
            .with_template(TemplateConfig::new(TemplateId::new(1), "Play", 1))
    }

    #[test]
    fn test_buckets_by_template() {
        let index = ActionIndex::build(
            &config(),
            vec![
                Action::with_pointers(TemplateId::new(1), &[EntityId(5)]),
                Action::with_pointers(TemplateId::new(1), &[EntityId(6)]),
                Action::pass(),
            ],
        );

        assert_eq!(index.len(), 3);
        assert_eq!(index.mask(), vec![false, true, true]);
        assert_eq!(index.choices(1).len(), 2);
        assert_eq!(index.action_for(2), Some(&Action::pass()));
        assert!(index.action_for(0).is_none());
        assert!(index.choices(7).is_empty());
    }

    #[test]
    fn test_undeclared_template_dropped() {
        let index = ActionIndex::build(&config(), vec![Action::new(TemplateId::new(9))]);
        assert!(index.is_empty());
        assert_eq!(index.slot_of(TemplateId::PASS), Some(2));
        assert_eq!(index.slot_of(TemplateId::new(9)), None);
    }
}
