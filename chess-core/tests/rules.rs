//! 规则场景测试（通过对外接口驱动）

use chess_core::{
    Attacks, Fen, Game, MoveExecutor, MoveGenerator, MoveKind, MoveStatus, Outcome, Piece, PieceType,
    Side, Square,
};

fn sq(name: &str) -> Square {
    Square::parse(name).unwrap()
}

#[test]
fn test_en_passant_scenario() {
    let mut game = Game::new();
    for text in ["e2e4", "a7a6", "e4e5", "d7d5"] {
        game.play_coordinate(text).unwrap();
    }
    assert_eq!(game.state().en_passant, Some(sq("d6")));

    let ep = game
        .legal_moves_from(sq("e5"))
        .into_iter()
        .find(|m| m.kind == MoveKind::EnPassant)
        .unwrap();
    assert_eq!(ep.to, sq("d6"));

    let status = game.play(ep.from, ep.to).unwrap();
    assert_eq!(
        status,
        MoveStatus::Committed {
            captured: Some(Piece::new(PieceType::Pawn, Side::Black))
        }
    );
    assert_eq!(game.state().board.get(sq("d5")), None);
    assert_eq!(game.captured().lost_by(Side::Black), &[PieceType::Pawn]);
}

#[test]
fn test_en_passant_expires_after_one_move() {
    let mut game = Game::new();
    for text in ["e2e4", "a7a6", "e4e5", "d7d5", "h2h3", "h7h6"] {
        game.play_coordinate(text).unwrap();
    }
    assert!(game
        .legal_moves_from(sq("e5"))
        .iter()
        .all(|m| m.kind != MoveKind::EnPassant));
}

#[test]
fn test_kingside_castle_scenario() {
    let mut game = Game::new();
    for text in ["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6"] {
        game.play_coordinate(text).unwrap();
    }
    let castle = game
        .legal_moves_from(sq("e1"))
        .into_iter()
        .find(|m| m.kind == MoveKind::CastleKingside)
        .expect("castling should be available");

    game.play(castle.from, castle.to).unwrap();
    assert_eq!(game.state().board.get(sq("g1")), Some(Piece::new(PieceType::King, Side::White)));
    assert_eq!(game.state().board.get(sq("f1")), Some(Piece::new(PieceType::Rook, Side::White)));
    assert!(!game.state().castling.white.king_side);
    assert!(!game.state().castling.white.queen_side);
}

#[test]
fn test_castle_blocked_when_transit_attacked() {
    // 黑象控制 f1
    let game = Game::from_fen("4k3/8/8/8/8/8/6b1/4K2R w K - 0 1").unwrap();
    assert!(game
        .legal_moves_from(sq("e1"))
        .iter()
        .all(|m| m.kind != MoveKind::CastleKingside));

    let game = Game::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    assert!(game
        .legal_moves_from(sq("e1"))
        .iter()
        .any(|m| m.kind == MoveKind::CastleKingside));
}

#[test]
fn test_outcome_classification() {
    let game = Game::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
    assert_eq!(game.outcome(), Outcome::Checkmate { winner: Side::White });

    let game = Game::from_fen("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1").unwrap();
    assert_eq!(game.outcome(), Outcome::Stalemate);
}

#[test]
fn test_promotion_flow() {
    let mut game = Game::from_fen("8/4P1k1/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let before = *game.state();

    assert_eq!(game.play(sq("e7"), sq("e8")).unwrap(), MoveStatus::PromotionPending);
    assert_eq!(*game.state(), before);
    assert_eq!(game.side_to_move(), Side::White);

    game.resolve_promotion(PieceType::Rook).unwrap();
    assert_eq!(game.state().board.get(sq("e8")), Some(Piece::new(PieceType::Rook, Side::White)));
    assert_eq!(game.side_to_move(), Side::Black);
    assert!(game.pending_promotion().is_none());
}

#[test]
fn test_legal_moves_keep_king_safe_along_games() {
    // 沿几条确定的路线检查：每个合法走法执行后走棋方的王都不受攻击，FEN 往返一致
    for pick in 0..4usize {
        let mut state = chess_core::BoardState::initial();
        for ply in 0..40usize {
            let moves = MoveGenerator::generate_legal(&state);
            if moves.is_empty() {
                break;
            }
            let mover = state.side_to_move;
            for mv in &moves {
                let next = MoveExecutor::apply_auto_queen(&state, mv).state;
                let king = next.board.find_king(mover).unwrap();
                assert!(!Attacks::is_attacked(&next.board, king, mover));
            }

            let mv = moves[(ply * 7 + pick * 13) % moves.len()];
            state = MoveExecutor::apply_auto_queen(&state, &mv).state;
            assert_eq!(Fen::parse(&Fen::to_string(&state)).unwrap(), state);
        }
    }
}
