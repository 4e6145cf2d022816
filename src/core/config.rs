//! Game configuration types.
//!
//! Games configure the kernel at build time by providing:
//! - `ContainerConfig`: containers (hands, piles) with visibility and pooling role
//! - `TemplateConfig`: action types (the game's fixed action space)
//! - `GameConfig`: combines the above with phase information
//! - `GameParameters`: seeds for the two random streams
//!
//! The kernel never hardcodes containers, phases or action types.

use serde::{Deserialize, Serialize};

use super::{EntityId, PlayerId, PlayerMask};

/// Who can see the items of a container.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    /// Face-up for everybody (discard pile, table).
    VisibleToAll,
    /// Face-down for everybody (draw pile).
    HiddenToAll,
    /// Only the container owner sees (hand).
    VisibleToOwner,
    /// Explicit per-observer flags.
    Mask(PlayerMask),
}

/// Semantic role used when pooling hidden items during determinization.
///
/// Containers sharing a group hold interchangeable hidden populations from
/// an observer's viewpoint (opponents' hands and the face-down draw pile).
/// Containers without a group are only ever reshuffled within themselves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExchangeGroup(pub u16);

impl ExchangeGroup {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }
}

/// Declaration of a single container.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerConfig {
    /// Human-readable name (for debugging/display).
    pub name: String,

    /// Owner. `None` for shared containers.
    pub owner: Option<PlayerId>,

    pub visibility: Visibility,

    /// Pool membership for redeterminization.
    pub exchange_group: Option<ExchangeGroup>,
}

impl ContainerConfig {
    /// A shared, face-up container with no exchange group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: None,
            visibility: Visibility::VisibleToAll,
            exchange_group: None,
        }
    }

    #[must_use]
    pub fn with_owner(mut self, owner: PlayerId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Only the owner sees (like a hand).
    #[must_use]
    pub fn owner_only(mut self) -> Self {
        self.visibility = Visibility::VisibleToOwner;
        self
    }

    /// Nobody sees (like a face-down pile).
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visibility = Visibility::HiddenToAll;
        self
    }

    #[must_use]
    pub fn with_mask(mut self, mask: PlayerMask) -> Self {
        self.visibility = Visibility::Mask(mask);
        self
    }

    #[must_use]
    pub fn in_group(mut self, group: ExchangeGroup) -> Self {
        self.exchange_group = Some(group);
        self
    }
}

/// Action template identifier. Games define what action types exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TemplateId(pub u16);

impl TemplateId {
    /// Reserved for the reaction-window pass. Games must not declare it.
    pub const PASS: TemplateId = TemplateId(u16::MAX);

    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if *self == Self::PASS {
            write!(f, "Template(pass)")
        } else {
            write!(f, "Template({})", self.0)
        }
    }
}

/// Configuration for an action template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub id: TemplateId,

    /// Human-readable name (for debugging/display).
    pub name: String,

    /// Number of entity pointers the action carries.
    pub pointer_count: usize,
}

impl TemplateConfig {
    pub fn new(id: TemplateId, name: impl Into<String>, pointer_count: usize) -> Self {
        Self {
            id,
            name: name.into(),
            pointer_count,
        }
    }

    /// A template with no pointers (like "Draw").
    pub fn no_args(id: TemplateId, name: impl Into<String>) -> Self {
        Self::new(id, name, 0)
    }
}

/// Opaque phase identifier. Games define their own phases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhaseId(pub u32);

impl PhaseId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Complete game configuration.
///
/// Container ids are handed out when containers are declared, so a game
/// knows every container id before any state exists:
///
/// ```
/// use rust_tabletop::core::{ContainerConfig, EntityId, GameConfig};
///
/// let mut config = GameConfig::new(2);
/// let pile = config.add_container(ContainerConfig::new("Draw Pile").hidden());
/// let discard = config.add_container(ContainerConfig::new("Discard"));
///
/// assert_eq!(pile, EntityId(2));
/// assert_eq!(discard, EntityId(3));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of players (1-255).
    pub player_count: usize,

    /// Containers created by `ForwardModel::setup`, in declaration order.
    pub containers: Vec<ContainerConfig>,

    pub templates: Vec<TemplateConfig>,

    pub initial_phase: PhaseId,

    /// Phase entered while a reaction window is open, if the game tracks one.
    pub reaction_phase: Option<PhaseId>,
}

impl GameConfig {
    pub fn new(player_count: usize) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            player_count,
            containers: Vec::new(),
            templates: Vec::new(),
            initial_phase: PhaseId::default(),
            reaction_phase: None,
        }
    }

    /// Declare a container and return the id it will have once set up.
    pub fn add_container(&mut self, container: ContainerConfig) -> EntityId {
        let id = EntityId(EntityId::first_non_player(self.player_count) + self.containers.len() as u32);
        self.containers.push(container);
        id
    }

    #[must_use]
    pub fn with_template(mut self, template: TemplateConfig) -> Self {
        assert!(template.id != TemplateId::PASS, "TemplateId::PASS is reserved");
        self.templates.push(template);
        self
    }

    #[must_use]
    pub fn with_initial_phase(mut self, phase: PhaseId) -> Self {
        self.initial_phase = phase;
        self
    }

    #[must_use]
    pub fn with_reaction_phase(mut self, phase: PhaseId) -> Self {
        self.reaction_phase = Some(phase);
        self
    }

    #[must_use]
    pub fn get_template(&self, id: TemplateId) -> Option<&TemplateConfig> {
        self.templates.iter().find(|t| t.id == id)
    }
}

/// Seeds for one episode.
///
/// The redeterminization seed defaults to a named context stream derived
/// from `seed`; it never shares state with the gameplay stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameParameters {
    pub seed: u64,
    #[serde(default)]
    pub redeterminization_seed: Option<u64>,
}

impl GameParameters {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            redeterminization_seed: None,
        }
    }

    #[must_use]
    pub fn with_redeterminization_seed(mut self, seed: u64) -> Self {
        self.redeterminization_seed = Some(seed);
        self
    }
}

impl Default for GameParameters {
    fn default() -> Self {
        Self::new(0)
    }
}
