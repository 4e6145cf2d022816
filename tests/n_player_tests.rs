//! N-Player capability verification tests.
//!
//! These tests verify that the kernel has no hidden 2-player assumptions:
//! id spaces, turn order, reaction windows and determinization all scale
//! with the player count.

use rust_tabletop::core::{
    Action, ContainerConfig, EntityId, ExchangeGroup, GameParameters, GameRng, GameState, PlayerId,
    PlayerMask,
};
use rust_tabletop::games::kittens::{Card, KittensBuilder};
use rust_tabletop::items::{Item, ItemKind};
use rust_tabletop::rules::ForwardModel;

/// Test that GameState correctly handles varying player counts.
#[test]
fn test_game_state_player_counts() {
    for player_count in [1, 2, 3, 4, 5, 6, 7, 8] {
        let state = GameState::new(GameParameters::new(42), player_count);
        assert_eq!(state.player_count(), player_count);
        assert_eq!(state.players_in_game().len(), player_count);

        for player in PlayerId::all(player_count) {
            let entity = EntityId::player(player);
            assert!(entity.is_player(player_count));
            assert_eq!(entity.as_player(player_count), Some(player));
        }

        // Containers and items start right after the player ids
        let mut state = state;
        let container = state.create_container(&ContainerConfig::new("Box"));
        assert_eq!(container, EntityId(player_count as u32));
        assert!(!container.is_player(player_count));
    }
}

/// Test that player state works for all players in N-player games.
#[test]
fn test_player_state_n_players() {
    let player_count = 6;
    let mut state = GameState::new(GameParameters::new(42), player_count);

    for player in PlayerId::all(player_count) {
        let score = (player.0 as i64 + 1) * 10; // 10, 20, 30, ...
        state.public.set_player_state(player, "score", score);
    }

    for player in PlayerId::all(player_count) {
        let expected = (player.0 as i64 + 1) * 10;
        assert_eq!(state.public.get_player_state(player, "score", 0), expected);
    }
}

/// Test kittens set up and run for every supported player count.
#[test]
fn test_kittens_all_player_counts() {
    for player_count in 2..=5 {
        let (game, mut state) = KittensBuilder::new().player_count(player_count).build(42).unwrap();

        for player in PlayerId::all(player_count) {
            assert_eq!(state.container_size(game.hand(player)).unwrap(), 5);
        }
        let bombs = state
            .registry()
            .items()
            .filter(|i| i.kind == Card::Bomb.kind())
            .count();
        assert_eq!(bombs, player_count - 1);

        let mut rng = GameRng::new(player_count as u64);
        let mut steps = 0;
        while !game.is_terminal(&state) && steps < 5_000 {
            let actions = game.legal_actions(&state);
            let action = rng.choose(&actions).unwrap().clone();
            game.apply(&mut state, &action).unwrap();
            steps += 1;
        }
        assert!(game.is_terminal(&state), "{}-player game did not finish", player_count);
        // Exactly one survivor
        assert_eq!(state.players_in_game().len(), 1);
    }
}

/// Test turn order cycles through all players correctly.
#[test]
fn test_turn_order_n_players() {
    let (game, mut state) = KittensBuilder::new().player_count(5).build(42).unwrap();
    let mut seen_players = vec![false; 5];

    // Always draw: every turn is a single action unless a bomb comes up
    for _ in 0..10 {
        if game.is_terminal(&state) {
            break;
        }
        let active = state.current_player();
        seen_players[active.index()] = true;

        let actions = game.legal_actions(&state);
        let action = actions.last().unwrap().clone();
        game.apply(&mut state, &action).unwrap();
    }

    assert!(seen_players.iter().all(|&x| x));
}

/// Test reaction windows ask every other player in turn order.
#[test]
fn test_reaction_window_n_players() {
    let player_count = 5;
    let (game, mut state) = KittensBuilder::new()
        .player_count(player_count)
        .hand_size(0)
        .build(3)
        .unwrap();

    let pile = game.containers().draw_pile;
    let skip = state
        .container(pile)
        .unwrap()
        .iter()
        .find(|&id| game.card(&state, id).unwrap() == Card::Skip)
        .unwrap();
    let p2 = PlayerId::new(2);
    state.public.active_player = p2;
    state
        .move_item(skip, game.hand(p2), rust_tabletop::InsertPosition::Back)
        .unwrap();

    game.apply(&mut state, &Action::with_pointers(game.templates().play, &[skip])).unwrap();
    let pending: Vec<PlayerId> = state.reaction.window().unwrap().pending().collect();
    assert_eq!(
        pending,
        vec![PlayerId::new(3), PlayerId::new(4), PlayerId::new(0), PlayerId::new(1)]
    );

    for _ in 0..player_count - 1 {
        game.apply(&mut state, &Action::pass()).unwrap();
    }
    assert!(state.reaction.is_idle());
    assert_eq!(state.current_player(), PlayerId::new(3));
}

/// Test per-item reveals for N players.
#[test]
fn test_reveal_masks_n_players() {
    let player_count = 7;
    let mut state = GameState::new(GameParameters::new(42), player_count);
    let pile = state.create_container(&ContainerConfig::new("Pile").hidden().in_group(ExchangeGroup::new(0)));
    let item = state.create_item(Item::new(ItemKind::new(1)), pile).unwrap();

    for player in PlayerId::all(player_count).filter(|p| p.0 % 2 == 0) {
        state.reveal_to(item, player).unwrap();
    }

    let container = state.container(pile).unwrap();
    let expected = PlayerMask::from_flags(&[true, false, true, false, true, false, true]);
    assert_eq!(container.reveal_mask(item), Some(&expected));
    for player in PlayerId::all(player_count) {
        assert_eq!(container.is_visible_to(item, player), player.0 % 2 == 0);
    }
}

/// Test determinized copies for every seat of a 5-player game.
#[test]
fn test_copy_for_each_seat() {
    let (game, mut state) = KittensBuilder::new().player_count(5).build(77).unwrap();

    for observer in PlayerId::all(5) {
        let copy = state.copy(Some(observer));
        assert_eq!(copy.total_items(), state.total_items());
        assert_eq!(
            copy.container(game.hand(observer)).unwrap(),
            state.container(game.hand(observer)).unwrap()
        );
        for other in PlayerId::all(5) {
            assert_eq!(
                copy.container_size(game.hand(other)).unwrap(),
                state.container_size(game.hand(other)).unwrap()
            );
        }
    }
}

/// Test player_count boundary values.
#[test]
fn test_player_count_boundaries() {
    let state1 = GameState::new(GameParameters::new(42), 1);
    assert_eq!(state1.player_count(), 1);
    assert!(EntityId(0).is_player(1));
    assert!(!EntityId(1).is_player(1));

    let state8 = GameState::new(GameParameters::new(42), 8);
    assert_eq!(state8.player_count(), 8);
    for i in 0..8 {
        assert!(EntityId(i).is_player(8));
    }
    assert!(!EntityId(8).is_player(8));
}

/// Test deterministic replay with different player counts.
#[test]
fn test_deterministic_replay_n_players() {
    for player_count in [3, 4, 5] {
        let (game, mut state1) = KittensBuilder::new().player_count(player_count).build(42).unwrap();
        let mut rng = GameRng::new(9);
        let mut played = Vec::new();

        for _ in 0..60 {
            if game.is_terminal(&state1) {
                break;
            }
            let actions = game.legal_actions(&state1);
            let action = rng.choose(&actions).unwrap().clone();
            game.apply(&mut state1, &action).unwrap();
            played.push(action);
        }

        let (_, mut state2) = KittensBuilder::new().player_count(player_count).build(42).unwrap();
        for action in &played {
            game.apply(&mut state2, action).unwrap();
        }

        assert_eq!(state1, state2, "{}-player replay diverged", player_count);
    }
}
