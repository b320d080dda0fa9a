extern crate efg_cfr;

mod common;

#[cfg(test)]
mod tests {
    use super::common::coin_game;
    use efg_cfr::{
        action::Action,
        error::Error,
        game::{Game, GameBuilder},
        games::{
            leduc,
            one_card::{self, info_set_id, BET, CHECK},
        },
        info_set::InformationSetId,
        node::NodeId,
        player::Player,
        strategy::{self, Strategy},
    };
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::BTreeMap;

    /// Follow `path` from the root of `game`.
    fn walk(game: &Game, path: &[Action]) -> NodeId {
        path.iter().fold(game.root(), |node_id, action| {
            game.child(node_id, *action).unwrap()
        })
    }

    fn is_configuration_error(result: Result<Game, Error>) -> bool {
        matches!(result, Err(Error::Configuration(_)))
    }

    #[test]
    fn kuhn_information_sets() {
        let game = one_card::game(3).unwrap();
        let jack_queen = walk(&game, &[one_card::card(1), one_card::card(2)]);
        let jack_king = walk(&game, &[one_card::card(1), one_card::card(3)]);
        let queen_king = walk(&game, &[one_card::card(2), one_card::card(3)]);

        // P1 cannot see P2's card.
        assert_eq!(game.info_set_id(jack_queen), game.info_set_id(jack_king));
        assert_ne!(game.info_set_id(jack_queen), game.info_set_id(queen_king));
        assert_eq!(
            game.info_set_id(jack_queen),
            Some(&info_set_id(Player::P1, 1, &[]))
        );

        // P2 cannot see P1's card.
        let after_check = |node_id| game.child(node_id, CHECK).unwrap();
        assert_ne!(
            game.info_set_id(after_check(jack_queen)),
            game.info_set_id(after_check(jack_king))
        );
        let queen_jack = walk(&game, &[one_card::card(2), one_card::card(1)]);
        let king_jack = walk(&game, &[one_card::card(3), one_card::card(1)]);
        assert_eq!(
            game.info_set_id(game.child(queen_jack, BET).unwrap()),
            game.info_set_id(game.child(king_jack, BET).unwrap())
        );
        assert_eq!(
            game.info_set_id(game.child(king_jack, BET).unwrap()),
            Some(&info_set_id(Player::P2, 1, &[BET]))
        );
    }

    #[test]
    fn chance_and_terminal_nodes_have_no_information_set() {
        let game = one_card::game(3).unwrap();
        assert!(game.info_set_id(game.root()).is_none());
        let terminal = walk(&game, &[one_card::card(1), one_card::card(2), CHECK, CHECK]);
        assert!(game.is_terminal(terminal));
        assert!(game.info_set_id(terminal).is_none());
    }

    #[test]
    fn information_set_map_covers_every_node() {
        let game = one_card::game(3).unwrap();
        for player in Player::PLAYERS.iter() {
            let map = game.build_information_set_map(*player);
            assert_eq!(map.len(), game.len());
            assert_eq!(map[&game.root()], InformationSetId::new(*player, vec![]));
            for (node_id, info_set_id) in map.iter() {
                if game.player(*node_id) == Some(*player) {
                    assert_eq!(game.info_set_id(*node_id), Some(info_set_id));
                }
            }
        }
    }

    #[test]
    fn information_set_display() {
        let id = info_set_id(Player::P2, 3, &[BET]);
        assert_eq!(id.to_string(), "P2[?,3,1]");
    }

    #[test]
    fn complete_fills_missing_information_sets() {
        let game = one_card::game(3).unwrap();
        let completed = game.complete(&Strategy::new());
        assert_eq!(completed, strategy::uniform(&game));
        assert_eq!(game.complete(&completed), completed);

        let mut partial = strategy::constant(&game, Player::P1, BET);
        let kept = partial.clone();
        partial = game.complete(&partial);
        for (id, dist) in kept.iter() {
            assert_eq!(&partial[id], dist);
        }
        assert_eq!(partial.len(), 12);
    }

    #[test]
    fn leduc_has_288_information_sets() {
        let game = leduc::game(3).unwrap();
        assert_eq!(game.info_sets().count(), 288);
        assert_eq!(
            game.info_sets()
                .filter(|(id, _)| id.player() == Player::P1)
                .count(),
            144
        );
    }

    #[test]
    fn leduc_fold_and_showdown_payoffs() {
        use leduc::{card, CALL, FOLD, RAISE};
        let game = leduc::game(3).unwrap();
        // P1 holds the king, P2 the jack.
        let deal = [card(2), card(0)];

        // P1 raises and P2 folds: P2 loses the ante.
        let fold = walk(&game, &[deal[0], deal[1], RAISE, FOLD]);
        assert_eq!(game.utility(fold, Player::P1), Some(1.0));
        assert_eq!(game.utility(fold, Player::P2), Some(-1.0));

        // Both check through, a queen falls, both check again: king high.
        let showdown = walk(&game, &[deal[0], deal[1], CALL, CALL, card(1), CALL, CALL]);
        assert_eq!(game.utility(showdown, Player::P1), Some(1.0));

        // A jack on the board pairs P2.
        let paired = walk(&game, &[deal[0], deal[1], RAISE, CALL, card(0), RAISE, CALL]);
        assert_eq!(game.utility(paired, Player::P1), Some(-7.0));
    }

    #[test]
    fn leduc_caps_raises() {
        use leduc::{card, CALL, FOLD, RAISE};
        let game = leduc::game(3).unwrap();
        let capped = walk(&game, &[card(0), card(1), RAISE, RAISE]);
        assert_eq!(game.actions(capped), vec![FOLD, CALL]);
        let open = walk(&game, &[card(0), card(1)]);
        assert_eq!(game.actions(open), vec![CALL, RAISE]);
    }

    #[test]
    fn utilities_are_zero_sum() {
        let game = leduc::game(2).unwrap();
        for (node_id, node) in game.nodes() {
            if node.is_terminal() {
                let p1 = game.utility(node_id, Player::P1).unwrap();
                let p2 = game.utility(node_id, Player::P2).unwrap();
                assert_eq!(p1, -p2);
                assert_eq!(game.utility(node_id, Player::C), None);
            } else {
                assert!(game.utility(node_id, Player::P1).is_none());
            }
        }
    }

    #[test]
    fn chance_sampling_follows_probabilities() {
        let mut builder = GameBuilder::new();
        let a = builder.terminal(1.0).unwrap();
        let b = builder.terminal(-1.0).unwrap();
        let root = builder
            .chance(&[], vec![(Action::new(0), 0.25, a), (Action::new(1), 0.75, b)])
            .unwrap();
        let game = builder.build(root).unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        let mut counts: BTreeMap<Action, usize> = BTreeMap::new();
        let n = 20_000;
        for _ in 0..n {
            let action = game.sample_chance_action(root, &mut rng).unwrap();
            *counts.entry(action).or_insert(0) += 1;
        }
        let frequency = counts[&Action::new(0)] as f64 / n as f64;
        assert!((frequency - 0.25).abs() < 0.02, "frequency: {}", frequency);
        assert!(game.sample_chance_action(a, &mut rng).is_none());
    }

    #[test]
    fn hidden_chance_is_unobserved() {
        let game = coin_game(true);
        let ids: Vec<&InformationSetId> = game.info_sets().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![&InformationSetId::new(Player::P2, vec![None])]);
        assert_eq!(coin_game(false).info_sets().count(), 2);
    }

    #[test]
    fn decision_without_actions_is_rejected() {
        let mut builder = GameBuilder::new();
        let root = builder.decision(Player::P1, &[], Vec::<(Action, NodeId)>::new()).unwrap();
        assert!(is_configuration_error(builder.build(root)));
    }

    #[test]
    fn chance_must_sum_to_one() {
        let mut builder = GameBuilder::new();
        let a = builder.terminal(1.0).unwrap();
        let b = builder.terminal(0.0).unwrap();
        let root = builder
            .chance(&[], vec![(Action::new(0), 0.5, a), (Action::new(1), 0.4, b)])
            .unwrap();
        assert!(is_configuration_error(builder.build(root)));
    }

    #[test]
    fn negative_chance_probability_is_rejected() {
        let mut builder = GameBuilder::new();
        let a = builder.terminal(1.0).unwrap();
        let b = builder.terminal(0.0).unwrap();
        let root = builder
            .chance(&[], vec![(Action::new(0), 1.5, a), (Action::new(1), -0.5, b)])
            .unwrap();
        assert!(is_configuration_error(builder.build(root)));
    }

    #[test]
    fn duplicate_action_is_rejected() {
        let mut builder = GameBuilder::new();
        let a = builder.terminal(1.0).unwrap();
        let b = builder.terminal(0.0).unwrap();
        let result = builder.decision(Player::P1, &[], vec![(CHECK, a), (CHECK, b)]);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn missing_child_is_rejected() {
        let mut builder = GameBuilder::new();
        let result = builder.decision(Player::P1, &[], vec![(CHECK, NodeId::new(5))]);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn chance_player_needs_probabilities() {
        let mut builder = GameBuilder::new();
        let a = builder.terminal(1.0).unwrap();
        let result = builder.decision(Player::C, &[], vec![(CHECK, a)]);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn shared_child_is_rejected() {
        let mut builder = GameBuilder::new();
        let a = builder.terminal(1.0).unwrap();
        let root = builder.decision(Player::P1, &[], vec![(CHECK, a), (BET, a)]).unwrap();
        assert!(is_configuration_error(builder.build(root)));
    }

    #[test]
    fn unreachable_node_is_rejected() {
        let mut builder = GameBuilder::new();
        let a = builder.terminal(1.0).unwrap();
        let _orphan = builder.terminal(2.0).unwrap();
        let root = builder.decision(Player::P1, &[], vec![(CHECK, a)]).unwrap();
        assert!(is_configuration_error(builder.build(root)));
    }

    #[test]
    fn inconsistent_action_sets_are_rejected() {
        // P2 cannot see the coin but is offered different actions after it.
        let mut builder = GameBuilder::new();
        let heads = {
            let a = builder.terminal(1.0).unwrap();
            let b = builder.terminal(-1.0).unwrap();
            builder.decision(Player::P2, &[], vec![(CHECK, a), (BET, b)]).unwrap()
        };
        let tails = {
            let a = builder.terminal(1.0).unwrap();
            builder.decision(Player::P2, &[], vec![(CHECK, a)]).unwrap()
        };
        let root = builder
            .chance(&[Player::P2], vec![(Action::new(0), 0.5, heads), (Action::new(1), 0.5, tails)])
            .unwrap();
        assert!(is_configuration_error(builder.build(root)));
    }

    #[test]
    fn non_finite_terminal_is_rejected() {
        let mut builder = GameBuilder::new();
        assert!(matches!(builder.terminal(f64::NAN), Err(Error::Configuration(_))));
    }
}
