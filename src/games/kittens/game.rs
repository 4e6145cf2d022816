//! Kittens game implementation.

use log::debug;

use crate::containers::InsertPosition;
use crate::core::{
    Action, ContainerConfig, EntityId, ExchangeGroup, GameConfig, GameParameters, GameState,
    KernelError, PhaseId, PlayerId, PlayerResult, TemplateConfig, TemplateId,
};
use crate::items::{Item, ItemCatalog, ItemDefinition, ItemKind};
use crate::rules::{ForwardModel, GameResult, ReactionKind, TurnControl};

/// Card faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Card {
    Bomb,
    Defuse,
    Nope,
    Skip,
    Shuffle,
    Peek,
    Reverse,
    Filler,
}

impl Card {
    pub const ALL: [Card; 8] = [
        Card::Bomb,
        Card::Defuse,
        Card::Nope,
        Card::Skip,
        Card::Shuffle,
        Card::Peek,
        Card::Reverse,
        Card::Filler,
    ];

    #[must_use]
    pub fn kind(self) -> ItemKind {
        ItemKind::new(self as u32)
    }

    #[must_use]
    pub fn from_kind(kind: ItemKind) -> Option<Card> {
        Self::ALL.get(kind.raw() as usize).copied()
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Card::Bomb => "Bomb",
            Card::Defuse => "Defuse",
            Card::Nope => "Nope",
            Card::Skip => "Skip",
            Card::Shuffle => "Shuffle",
            Card::Peek => "Peek",
            Card::Reverse => "Reverse",
            Card::Filler => "Filler",
        }
    }

    /// Cards that can be played from hand in the main phase.
    #[must_use]
    pub fn is_playable(self) -> bool {
        matches!(self, Card::Skip | Card::Shuffle | Card::Peek | Card::Reverse)
    }
}

/// Action templates for the kittens game.
#[derive(Clone, Copy, Debug)]
pub struct Templates {
    /// Draw the top card, ending the turn.
    pub draw: TemplateId,
    /// Play an action card (pointer: the card).
    pub play: TemplateId,
    /// Veto the top of the reaction stack (pointer: the Nope card).
    pub nope: TemplateId,
    /// Put a defused bomb back (param: depth in the draw pile).
    pub place_bomb: TemplateId,
}

impl Templates {
    fn new() -> Self {
        Self {
            draw: TemplateId::new(0),
            play: TemplateId::new(1),
            nope: TemplateId::new(2),
            place_bomb: TemplateId::new(3),
        }
    }
}

/// Game phases.
pub mod phases {
    use crate::core::PhaseId;

    pub const MAIN: PhaseId = PhaseId(0);
    /// The active player holds a defused bomb and must put it back.
    pub const DEFUSE: PhaseId = PhaseId(1);
    /// A reaction window is open.
    pub const REACTION: PhaseId = PhaseId(2);
}

/// Container ids, fixed by the configuration.
#[derive(Clone, Debug)]
pub struct KittensContainers {
    pub hands: Vec<EntityId>,
    pub draw_pile: EntityId,
    pub discard: EntityId,
}

const BOMB_KEY: &str = "defused_bomb";

/// The kittens forward model.
#[derive(Clone)]
pub struct Kittens {
    config: GameConfig,
    catalog: ItemCatalog,
    templates: Templates,
    containers: KittensContainers,
    hand_size: usize,
    total_defuses: usize,
    peek_count: usize,
    deck: Vec<(Card, usize)>,
}

/// Builder for creating a Kittens game.
pub struct KittensBuilder {
    player_count: usize,
    hand_size: usize,
    total_defuses: usize,
    peek_count: usize,
    deck: Vec<(Card, usize)>,
}

impl Default for KittensBuilder {
    fn default() -> Self {
        Self {
            player_count: 2,
            hand_size: 4,
            total_defuses: 6,
            peek_count: 3,
            deck: vec![
                (Card::Nope, 4),
                (Card::Skip, 4),
                (Card::Shuffle, 3),
                (Card::Peek, 4),
                (Card::Reverse, 3),
                (Card::Filler, 12),
            ],
        }
    }
}

impl KittensBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_count(mut self, count: usize) -> Self {
        assert!((2..=5).contains(&count), "Player count must be 2-5");
        self.player_count = count;
        self
    }

    /// Cards dealt to each player in addition to their Defuse.
    pub fn hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    /// Defuses in the game; each player is dealt one, the rest go in the pile.
    pub fn total_defuses(mut self, count: usize) -> Self {
        self.total_defuses = count;
        self
    }

    pub fn peek_count(mut self, count: usize) -> Self {
        self.peek_count = count;
        self
    }

    /// Set how many copies of an action or filler card the deck holds.
    pub fn cards(mut self, card: Card, count: usize) -> Self {
        assert!(
            !matches!(card, Card::Bomb | Card::Defuse),
            "Bombs and defuses are added by the setup"
        );
        match self.deck.iter_mut().find(|(c, _)| *c == card) {
            Some(entry) => entry.1 = count,
            None => self.deck.push((card, count)),
        }
        self
    }

    /// Build the forward model.
    pub fn model(self) -> Kittens {
        let deck_size: usize = self.deck.iter().map(|(_, n)| n).sum();
        assert!(
            deck_size >= self.player_count * self.hand_size,
            "Deck too small to deal {} cards to {} players",
            self.hand_size,
            self.player_count
        );

        let templates = Templates::new();
        let mut config = GameConfig::new(self.player_count)
            .with_template(TemplateConfig::no_args(templates.draw, "Draw"))
            .with_template(TemplateConfig::new(templates.play, "Play", 1))
            .with_template(TemplateConfig::new(templates.nope, "Nope", 1))
            .with_template(TemplateConfig::no_args(templates.place_bomb, "PlaceBomb"))
            .with_initial_phase(phases::MAIN)
            .with_reaction_phase(phases::REACTION);

        let hidden = ExchangeGroup::new(0);
        let hands: Vec<EntityId> = PlayerId::all(self.player_count)
            .map(|p| {
                config.add_container(
                    ContainerConfig::new(format!("Player {} Hand", p.0))
                        .with_owner(p)
                        .owner_only()
                        .in_group(hidden),
                )
            })
            .collect();
        let draw_pile = config.add_container(ContainerConfig::new("Draw Pile").hidden().in_group(hidden));
        let discard = config.add_container(ContainerConfig::new("Discard Pile"));

        let mut catalog = ItemCatalog::new();
        for card in Card::ALL {
            catalog.register(ItemDefinition::new(card.kind(), card.name()));
        }

        Kittens {
            config,
            catalog,
            templates,
            containers: KittensContainers {
                hands,
                draw_pile,
                discard,
            },
            hand_size: self.hand_size,
            total_defuses: self.total_defuses,
            peek_count: self.peek_count,
            deck: self.deck,
        }
    }

    /// Build the model and a set-up initial state.
    pub fn build(self, seed: u64) -> Result<(Kittens, GameState), KernelError> {
        let game = self.model();
        let mut state = GameState::new(GameParameters::new(seed), game.config.player_count);
        game.setup(&mut state)?;
        Ok((game, state))
    }
}

impl Kittens {
    pub fn templates(&self) -> &Templates {
        &self.templates
    }

    pub fn containers(&self) -> &KittensContainers {
        &self.containers
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> EntityId {
        self.containers.hands[player.index()]
    }

    /// The face of an item.
    pub fn card(&self, state: &GameState, item: EntityId) -> Result<Card, KernelError> {
        let kind = state.item(item)?.kind;
        Card::from_kind(kind).ok_or_else(|| KernelError::InvalidAction(format!("unknown card {}", kind)))
    }

    /// Cards of one face in a player's hand, front to back.
    pub fn cards_in_hand(&self, state: &GameState, player: PlayerId, card: Card) -> Vec<EntityId> {
        state
            .container(self.hand(player))
            .map(|hand| {
                hand.iter()
                    .filter(|&id| self.card(state, id).ok() == Some(card))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Check that `item` is a `card`-type card in `player`'s hand.
    fn require_in_hand(
        &self,
        state: &GameState,
        player: PlayerId,
        item: Option<EntityId>,
        accept: impl Fn(Card) -> bool,
    ) -> Result<EntityId, KernelError> {
        let item = item.ok_or_else(|| KernelError::InvalidAction("missing card pointer".to_string()))?;
        if state.location_of(item) != Some(self.hand(player)) {
            return Err(KernelError::InvalidAction(format!("{} is not in {}'s hand", item, player)));
        }
        let card = self.card(state, item)?;
        if !accept(card) {
            return Err(KernelError::InvalidAction(format!("{} cannot be played here", card.name())));
        }
        Ok(item)
    }

    fn require_phase(&self, state: &GameState, phase: PhaseId) -> Result<(), KernelError> {
        if state.public.phase == phase {
            Ok(())
        } else {
            Err(KernelError::IllegalPhaseTransition(format!(
                "expected phase {:?}, in {:?}",
                phase, state.public.phase
            )))
        }
    }

    fn draw(&self, state: &mut GameState, player: PlayerId) -> Result<TurnControl, KernelError> {
        self.require_phase(state, phases::MAIN)?;
        let drawn = state.draw_into(self.containers.draw_pile, self.hand(player))?;
        if self.card(state, drawn)? != Card::Bomb {
            return Ok(TurnControl::Advance);
        }

        match self.cards_in_hand(state, player, Card::Defuse).first() {
            Some(&defuse) => {
                state.move_item(defuse, self.containers.discard, InsertPosition::Back)?;
                // Everyone saw the bomb come off the pile
                for p in PlayerId::all(state.player_count()) {
                    state.reveal_to(drawn, p)?;
                }
                state.public.set_turn_state(BOMB_KEY, i64::from(drawn.raw()));
                state.public.phase = phases::DEFUSE;
                debug!("{} defused a bomb", player);
                Ok(TurnControl::Hold)
            }
            None => {
                state.move_item(drawn, self.containers.discard, InsertPosition::Back)?;
                state.set_player_result(player, PlayerResult::Lose);
                debug!("{} exploded", player);
                Ok(TurnControl::Advance)
            }
        }
    }

    fn place_bomb(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<TurnControl, KernelError> {
        self.require_phase(state, phases::DEFUSE)?;
        let pile = self.containers.draw_pile;
        let depth = action
            .param(0)
            .ok_or_else(|| KernelError::InvalidAction("missing depth".to_string()))?;
        let pile_len = state.container_size(pile)?;
        if depth < 0 || depth as usize > pile_len {
            return Err(KernelError::InvalidAction(format!(
                "depth {} outside 0..={}",
                depth, pile_len
            )));
        }
        let bomb = state.public.get_turn_state(BOMB_KEY, -1);
        if bomb < 0 {
            return Err(KernelError::InvalidAction("no bomb to place".to_string()));
        }

        let bomb = EntityId(bomb as u32);
        state.move_item(bomb, pile, InsertPosition::Index(depth as usize))?;
        // The placing player knows where it went
        state.reveal_to(bomb, player)?;
        state.public.phase = phases::MAIN;
        Ok(TurnControl::Advance)
    }

    fn resolve_play(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<TurnControl, KernelError> {
        let item = action
            .pointer(0)
            .ok_or_else(|| KernelError::InvalidAction("missing card pointer".to_string()))?;
        let pile = self.containers.draw_pile;

        match self.card(state, item)? {
            Card::Skip => Ok(TurnControl::Advance),
            Card::Shuffle => {
                state.shuffle_container(pile)?;
                state.container_mut(pile)?.clear_reveals();
                Ok(TurnControl::Hold)
            }
            Card::Peek => {
                let top = state.container(pile)?.peek_n(self.peek_count);
                for id in top {
                    state.reveal_to(id, player)?;
                }
                Ok(TurnControl::Hold)
            }
            Card::Reverse => {
                state.reverse_direction();
                Ok(TurnControl::Advance)
            }
            other => Err(KernelError::InvalidAction(format!("{} has no effect", other.name()))),
        }
    }
}

impl ForwardModel for Kittens {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn initialize(&self, state: &mut GameState) -> Result<(), KernelError> {
        let pile = self.containers.draw_pile;
        let players = state.player_count();

        for &(card, count) in &self.deck {
            for _ in 0..count {
                state.create_item(Item::new(card.kind()), pile)?;
            }
        }
        state.shuffle_container(pile)?;

        for player in PlayerId::all(players) {
            let hand = self.hand(player);
            state.create_item(Item::new(Card::Defuse.kind()).with_owner(player), hand)?;
            for _ in 0..self.hand_size {
                let card = state.draw_into(pile, hand)?;
                state.item_mut(card)?.owner = Some(player);
            }
        }

        for _ in players..self.total_defuses {
            state.create_item(Item::new(Card::Defuse.kind()), pile)?;
        }
        for _ in 1..players {
            state.create_item(Item::new(Card::Bomb.kind()), pile)?;
        }
        state.shuffle_container(pile)?;
        Ok(())
    }

    fn compute_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action> {
        if state.public.phase == phases::DEFUSE {
            let pile_len = state.container_size(self.containers.draw_pile).unwrap_or(0);
            return (0..=pile_len as i64)
                .map(|depth| Action::new(self.templates.place_bomb).with_params(&[depth]))
                .collect();
        }

        // One play per card face, like choosing a face rather than a copy
        let mut actions: Vec<Action> = Card::ALL
            .iter()
            .filter(|c| c.is_playable())
            .filter_map(|&c| self.cards_in_hand(state, player, c).first().copied())
            .map(|id| Action::with_pointers(self.templates.play, &[id]))
            .collect();
        actions.push(Action::new(self.templates.draw));
        actions
    }

    fn execute(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<TurnControl, KernelError> {
        let t = self.templates;
        match action.template {
            id if id == t.draw => self.draw(state, player),
            id if id == t.place_bomb => self.place_bomb(state, player, action),
            id if id == t.play => self.resolve_play(state, player, action),
            id if id == t.nope => {
                let card = self.require_in_hand(state, player, action.pointer(0), |c| c == Card::Nope)?;
                state.move_item(card, self.containers.discard, InsertPosition::Back)?;
                Ok(TurnControl::Hold)
            }
            other => Err(KernelError::InvalidAction(format!("unknown template {}", other))),
        }
    }

    fn check_terminal(&self, state: &GameState) -> Option<GameResult> {
        let alive = state.players_in_game();
        match alive.len() {
            0 => Some(GameResult::Draw),
            1 => Some(GameResult::Winner(alive[0])),
            _ => None,
        }
    }

    /// Half hand-size share among live players, half holding a Defuse.
    fn heuristic(&self, state: &GameState, player: PlayerId) -> f64 {
        if !state.is_in_game(player) {
            return 0.0;
        }
        let size = |p: PlayerId| state.container_size(self.hand(p)).unwrap_or(0) as f64;
        let total: f64 = state.players_in_game().into_iter().map(size).sum();
        let share = if total > 0.0 { size(player) / total } else { 0.0 };
        let defused = if self.cards_in_hand(state, player, Card::Defuse).is_empty() {
            0.0
        } else {
            1.0
        };
        (0.5 * share + 0.5 * defused).clamp(0.0, 1.0)
    }

    fn reaction_kind(&self, _state: &GameState, action: &Action) -> ReactionKind {
        match action.template {
            id if id == self.templates.play => ReactionKind::Nopeable,
            id if id == self.templates.nope => ReactionKind::Veto,
            _ => ReactionKind::Plain,
        }
    }

    fn reaction_actions(&self, state: &GameState, player: PlayerId) -> Vec<Action> {
        self.cards_in_hand(state, player, Card::Nope)
            .first()
            .map(|&id| vec![Action::with_pointers(self.templates.nope, &[id])])
            .unwrap_or_default()
    }

    /// The played card goes to the discard as soon as it is declared.
    fn on_declared(
        &self,
        state: &mut GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<(), KernelError> {
        self.require_phase(state, phases::MAIN)?;
        let card = self.require_in_hand(state, player, action.pointer(0), Card::is_playable)?;
        state.move_item(card, self.containers.discard, InsertPosition::Back)?;
        Ok(())
    }
}
