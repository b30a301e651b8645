//! Property and scenario tests for the tic-tac-toe engine.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use tictactoe_bot::games::tictactoe::{
    available_moves, choose_opponent_move, has_winner, is_draw, play_turn, winner, LINES, OPPONENT_MARK, PLAYER_MARK,
};
use tictactoe_bot::{Board, Cell, Coord, GameError, GameState, Mark, Opponent, Outcome, Phase, RandomOpponent};

fn at(row: usize, col: usize) -> Coord {
    Coord::new(row, col).unwrap()
}

fn board(rows: [&str; 3]) -> Board {
    let mut cells = [[Cell::Empty; 3]; 3];
    for (r, row) in rows.iter().enumerate() {
        for (c, glyph) in row.chars().enumerate() {
            cells[r][c] = Cell::from_glyph(glyph).unwrap();
        }
    }
    Board::from_rows(cells)
}

/// Always answers with one fixed cell.
struct Fixed(Coord);

impl Opponent for Fixed {
    fn choose_move(&self, _board: &Board) -> Option<Coord> {
        Some(self.0)
    }
}

#[test]
fn test_eight_distinct_lines() {
    let lines: HashSet<_> = LINES.iter().collect();
    assert_eq!(lines.len(), 8);
    for line in LINES.iter() {
        let cells: HashSet<_> = line.iter().collect();
        assert_eq!(cells.len(), 3);
    }
}

#[test]
fn test_every_line_wins_for_either_mark() {
    for mark in [Mark::X, Mark::O] {
        for line in LINES.iter() {
            let mut b = Board::new();
            for &coord in line {
                b = b.apply_move(coord, mark).unwrap();
            }
            assert_eq!(winner(&b), Some(mark), "line {line:?}");
        }
    }
}

#[test]
fn test_full_board_without_line_is_draw() {
    let b = board(["XOX", "XOO", "OXX"]);
    assert!(!has_winner(&b));
    assert!(is_draw(&b));
    assert_eq!(GameState::from_board(b).phase(), Phase::Terminal(Outcome::Draw));
}

#[test]
fn test_win_on_last_cell_beats_draw() {
    let b = board(["XOX", "OXO", "OXX"]);
    assert_eq!(winner(&b), Some(Mark::X));
    assert_eq!(GameState::from_board(b).phase(), Phase::Terminal(Outcome::PlayerWin));
}

#[test]
fn test_first_turn_places_both_marks() {
    let report = play_turn(&GameState::new(), at(0, 0), &RandomOpponent::seeded(1)).unwrap();
    let b = report.state.board();

    assert_eq!(b.get(at(0, 0)), Cell::Occupied(PLAYER_MARK));
    assert_eq!(b.count(PLAYER_MARK), 1);
    assert_eq!(b.count(OPPONENT_MARK), 1);
    let reply = report.opponent_move.unwrap();
    assert_ne!(reply, at(0, 0));
    assert_eq!(report.phase(), Phase::AwaitingPlayerMove);
}

#[test]
fn test_player_completes_row() {
    let state = GameState::from_board(board(["XX.", "OO.", "..."]));
    let report = play_turn(&state, at(0, 2), &Fixed(at(2, 2))).unwrap();

    assert_eq!(report.phase(), Phase::Terminal(Outcome::PlayerWin));
    assert_eq!(report.opponent_move, None);
    assert_eq!(report.state.board().get(at(2, 2)), Cell::Empty);
}

#[test]
fn test_occupied_cell_is_rejected_without_change() {
    let state = GameState::from_board(board(["X..", ".O.", "..."]));
    let err = play_turn(&state, at(1, 1), &Fixed(at(2, 2))).unwrap_err();
    assert_eq!(err, GameError::CellOccupied(at(1, 1)));
    assert_eq!(state.board(), &board(["X..", ".O.", "..."]));
}

#[test]
fn test_finished_game_rejects_moves() {
    let state = GameState::from_board(board(["XXX", "OO.", "..."]));
    assert_eq!(play_turn(&state, at(2, 2), &Fixed(at(2, 1))).unwrap_err(), GameError::GameOver);
}

#[test]
fn test_random_opponent_only_picks_empty_cells() {
    let mut rng = StdRng::seed_from_u64(99);
    let b = board(["XOX", "O.X", "X.O"]);
    let free: HashSet<_> = available_moves(&b).into_iter().collect();
    assert_eq!(free, HashSet::from([at(1, 1), at(2, 1)]));
    for _ in 0..50 {
        let pick = choose_opponent_move(&b, &mut rng).unwrap();
        assert!(free.contains(&pick));
    }
    assert_eq!(choose_opponent_move(&board(["XOX", "XOO", "OXX"]), &mut rng), None);
}

#[test]
fn test_random_games_terminate_and_keep_invariants() {
    let opponent = RandomOpponent::seeded(2024);
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..200 {
        let mut state = GameState::new();
        let mut turns = 0;
        while !state.phase().is_terminal() {
            let coord = choose_opponent_move(state.board(), &mut rng).unwrap();
            let report = play_turn(&state, coord, &opponent).unwrap();
            let (x, o) = (report.state.board().count(Mark::X), report.state.board().count(Mark::O));
            assert!(x == o || x == o + 1);
            if report.phase().is_terminal() {
                assert_eq!(
                    report.opponent_move.is_none(),
                    x == o + 1,
                    "opponent only skips its reply when the player ended the game"
                );
            }
            state = report.state;
            turns += 1;
        }
        assert!(turns <= 5);
    }
}
