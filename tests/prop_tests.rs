//! Property tests for deck, layout, detection and move legality.
//!
//! Properties tested:
//! - Every seed yields a 104-card deck holding each card exactly twice
//! - Every seed yields a layout binding 48 cards to 96 distinct cells
//! - A straight run of any length from 5 to 10 is detected once with its
//!   full length
//! - Every enumerated legal move validates, and applying it conserves cards

use proptest::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

use sequence_engine::board::{detect, Board};
use sequence_engine::cards::{new_deck, LayoutMap};
use sequence_engine::core::{Card, Color, Coord, GameRng, PlayerId, RulesConfig};
use sequence_engine::rules::{GameState, Hand, RulesEngine, SequenceRules};

fn config() -> ProptestConfig {
    ProptestConfig::with_cases(48)
}

proptest! {
    #![proptest_config(config())]

    /// Property: the deck is two full standard sets.
    #[test]
    fn prop_deck_has_two_of_each(seed in any::<u64>()) {
        let deck = new_deck(&mut GameRng::new(seed));
        prop_assert_eq!(deck.len(), 104);

        let mut counts: FxHashMap<Card, usize> = FxHashMap::default();
        for card in deck {
            *counts.entry(card).or_default() += 1;
        }
        prop_assert_eq!(counts.len(), Card::DISTINCT);
        prop_assert!(counts.values().all(|&n| n == 2));
    }

    /// Property: the layout is a bijection from positional cards to pairs
    /// of non-corner cells.
    #[test]
    fn prop_layout_is_bijection(seed in any::<u64>()) {
        let layout = LayoutMap::generate(&mut GameRng::new(seed));
        let mut cells: FxHashSet<Coord> = FxHashSet::default();
        for (card, pair) in layout.iter() {
            prop_assert!(card.is_positional());
            for cell in pair {
                prop_assert!(!cell.is_corner());
                prop_assert!(cells.insert(cell));
            }
        }
        prop_assert_eq!(cells.len(), 96);
    }

    /// Property: a straight horizontal run is found with its exact length.
    #[test]
    fn prop_row_run_detected(row in 1u8..9, start in 0u8..6, len in 5u8..=10) {
        prop_assume!(start + len <= 10);
        let color = Color::Personal(PlayerId::new(1));
        let rules = RulesConfig::default();

        let mut board = Board::new();
        for col in start..start + len {
            board.place(Coord::at(row, col), color).unwrap();
        }

        let last = Coord::at(row, start + len - 1);
        let found = detect(&board, last, color, &rules);
        prop_assert_eq!(found.len(), 1);
        prop_assert_eq!(found[0].length, len as usize);
        prop_assert_eq!(found[0].cells.len(), len as usize);
    }

    /// Property: enumerated moves are legal and applying them keeps every
    /// card accounted for.
    #[test]
    fn prop_legal_moves_apply_cleanly(seed in any::<u64>(), turns in 1usize..40) {
        let rules = SequenceRules::default();
        let mut rng = GameRng::new(seed);
        let layout = LayoutMap::generate(&mut rng.for_context("layout"));
        let mut game = GameState::new(&mut rng);
        let colors = [Color::Personal(PlayerId::new(1)), Color::Personal(PlayerId::new(2))];

        let mut hands: Vec<Hand> = (0..2)
            .map(|_| (0..7).filter_map(|_| game.deck.draw(&mut rng)).collect())
            .collect();

        for turn in 0..turns {
            if game.is_over() {
                break;
            }
            let seat = turn % 2;
            let moves = rules.legal_moves(&game, &layout, &hands[seat], colors[seat]);
            let Some(&mv) = rng.choose(&moves) else { break };

            prop_assert!(rules.validate(&game, &layout, &hands[seat], colors[seat], mv).is_ok());
            rules
                .play(&mut game, &layout, &mut hands[seat], colors[seat], mv, 2, &mut rng)
                .unwrap();

            let in_hands: usize = hands.iter().map(|h| h.len()).sum();
            prop_assert_eq!(game.deck.draw_len() + game.deck.discard_len() + in_hands, 104);
            for corner in Coord::CORNERS {
                prop_assert!(game.board.get(corner).color().is_none());
            }
        }
    }
}
