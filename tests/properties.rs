//! Properties checked over seeded random playouts

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use checkers::board::geometry::adjacent;
use checkers::rules::{destinations, jump_closure};
use checkers::search::{EntryType, TranspositionTable};
use checkers::{Bitboard, GameState, Move};

const PLAYOUTS: u64 = 24;
const PLIES: usize = 120;

/// Random legal game from the initial position, returning every move played.
fn random_playout(seed: u64) -> (GameState, Vec<Move>) {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut game = GameState::new();
    let mut played = Vec::new();

    for _ in 0..PLIES {
        if game.is_game_over() {
            break;
        }
        let moves = game.legal_moves();
        let mv = moves[rng.random_range(0..moves.len())];
        game.try_apply_move(mv).unwrap();
        played.push(mv);
    }
    (game, played)
}

#[test]
fn apply_then_undo_restores_state() {
    for seed in 0..PLAYOUTS {
        let (mut game, played) = random_playout(seed);

        let mut history = Vec::new();
        for &mv in played.iter().rev() {
            history.push(game.clone());
            game.undo_move(mv);
        }
        assert_eq!(game, GameState::new(), "seed {seed}");

        for (&mv, expected) in played.iter().zip(history.iter().rev()) {
            game.apply_move(mv);
            assert_eq!(&game, expected, "seed {seed}");
        }
    }
}

#[test]
fn incremental_hash_matches_recomputed() {
    for seed in 0..PLAYOUTS {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let mut game = GameState::new();
        for _ in 0..PLIES {
            if game.is_game_over() {
                break;
            }
            let moves = game.legal_moves();
            game.apply_move(moves[rng.random_range(0..moves.len())]);
            assert_eq!(game.hash(), game.compute_hash(), "seed {seed}");
        }
    }
}

#[test]
fn moves_land_on_empty_cells() {
    for seed in 0..PLAYOUTS {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let mut game = GameState::new();
        for _ in 0..PLIES {
            if game.is_game_over() {
                break;
            }
            let moves = game.legal_moves();
            for mv in &moves {
                assert!(game.board().is_empty(mv.dst), "{mv} lands on a piece");
                assert!(game.mover_pieces().contains(mv.src));
                assert_ne!(mv.src, mv.dst);
            }
            game.apply_move(moves[rng.random_range(0..moves.len())]);
        }
    }
}

#[test]
fn red_opening_moves_land_on_empty_cells() {
    let game = GameState::new();
    let moves = game.legal_moves();
    assert!(!moves.is_empty());
    for mv in moves {
        assert!(game.board().is_empty(mv.dst));
        assert!(checkers::Color::Red.home().contains(mv.src));
    }
}

#[test]
fn jump_closure_stays_on_vacant_cells() {
    for seed in 0..PLAYOUTS {
        let (game, _) = random_playout(seed);
        let board = game.board();
        for src in board.occupied() {
            let closure = jump_closure(board, src);
            assert!(!closure.contains(src), "closure of {src} contains itself");
            assert!((closure & board.occupied()).is_empty());

            // Every landing is reachable by a chain of single hops
            let mut reached = Bitboard::from_cell(src);
            let mut frontier = reached;
            while !frontier.is_empty() {
                let mut next = Bitboard::EMPTY;
                for cell in frontier {
                    for over in adjacent(cell) & board.occupied() {
                        let landing = 2 * i16::from(over) - i16::from(cell);
                        if let Ok(landing) = u8::try_from(landing) {
                            if adjacent(over).contains(landing)
                                && board.is_empty(landing)
                                && !reached.contains(landing)
                            {
                                next.set(landing);
                            }
                        }
                    }
                }
                reached |= next;
                frontier = next;
            }
            reached.clear(src);
            assert_eq!(reached, closure, "seed {seed}, src {src}");
        }
    }
}

#[test]
fn destinations_are_steps_or_jumps() {
    for seed in 0..PLAYOUTS {
        let (game, _) = random_playout(seed);
        let board = game.board();
        for src in board.occupied() {
            let steps = adjacent(src) & board.vacant();
            assert_eq!(destinations(board, src), steps | jump_closure(board, src));
        }
    }
}

#[test]
fn blocked_piece_has_no_moves() {
    let game: GameState = "122000000/200000000/200000000/000000000/000000000/\
                           000000000/000000000/000000000/000000000 r 3"
        .parse()
        .unwrap();
    assert!(game.destinations(0).is_empty());
    assert!(game.legal_moves().is_empty());

    let mut copy = game.clone();
    assert!(copy.try_apply_move(Move::new(0, 1)).is_err());
    assert_eq!(copy, game);
}

#[test]
fn shallow_entries_never_cut_off() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
    let mut tt = TranspositionTable::new(1);
    for _ in 0..1000 {
        let hash: u64 = rng.random();
        let stored: i8 = rng.random_range(0..10);
        let requested: i8 = rng.random_range(0..10);
        tt.store(hash, stored, 0, EntryType::Exact, None);
        let hit = tt.probe(hash, requested, -100, 100);
        assert_eq!(hit.is_some(), stored >= requested);
    }
}

#[test]
fn empty_board_text_roundtrip() {
    let text = "000000000/000000000/000000000/000000000/000000000/\
                000000000/000000000/000000000/000000000 r 5";
    let game: GameState = text.parse().unwrap();
    assert_eq!(game.to_string(), text);
}
