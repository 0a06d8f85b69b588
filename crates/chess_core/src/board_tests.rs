use super::*;
use crate::moves::Promotion;

#[test]
fn rejects_wrong_length() {
    assert_eq!(
        Position::from_encoding("invalid_state_string").unwrap_err(),
        EncodingError::BadLength(20)
    );
    let long = "0".repeat(72);
    assert_eq!(
        Position::from_encoding(&long).unwrap_err(),
        EncodingError::BadLength(72)
    );
}

#[test]
fn rejects_bad_piece_code() {
    let mut encoding = String::from(START_ENCODING);
    encoding.replace_range(0..1, "x");
    assert_eq!(
        Position::from_encoding(&encoding).unwrap_err(),
        EncodingError::BadPieceCode {
            index: 0,
            code: 'x'
        }
    );
}

#[test]
fn rejects_bad_flag() {
    let mut encoding = String::from(START_ENCODING);
    encoding.replace_range(64..65, "2");
    assert_eq!(
        Position::from_encoding(&encoding).unwrap_err(),
        EncodingError::BadFlag {
            index: 64,
            code: '2'
        }
    );
}

#[test]
fn parses_starting_position() {
    let pos = Position::from_encoding(START_ENCODING).unwrap();
    assert_eq!(pos.side_to_move, Color::White);
    assert_eq!(pos.castling, CastlingFlags::default());
    assert_eq!(pos.en_passant, None);
    assert_eq!(
        pos.piece_at(0, 4),
        Some(Piece {
            color: Color::Black,
            kind: PieceKind::King
        })
    );
    assert_eq!(
        pos.piece_at(6, 0),
        Some(Piece {
            color: Color::White,
            kind: PieceKind::Pawn
        })
    );
    assert_eq!(pos.piece_at(4, 4), None);
}

#[test]
fn startpos_matches_start_encoding() {
    assert_eq!(Position::startpos().to_encoding(), START_ENCODING);
}

#[test]
fn encoding_round_trips_without_en_passant() {
    let pos = Position::from_encoding(START_ENCODING).unwrap();
    assert_eq!(pos.to_encoding(), START_ENCODING);

    let rebuilt = Position::from_encoding(&pos.to_encoding()).unwrap();
    assert_eq!(rebuilt.to_encoding(), START_ENCODING);
}

#[test]
fn en_passant_target_is_lost_across_encoding() {
    // Known limitation: the 71-character form has no en-passant slot, so a
    // round trip right after a double step drops the capture opportunity.
    let mut pos = Position::startpos();
    pos.make_move(Move::new(6, 4, 4, 4));
    assert_eq!(pos.en_passant, Some((5, 4)));

    let rebuilt = Position::from_encoding(&pos.to_encoding()).unwrap();
    assert_eq!(rebuilt.en_passant, None);
    assert_eq!(rebuilt.to_encoding(), pos.to_encoding());
}

#[test]
fn make_move_relocates_piece() {
    let mut pos = Position::startpos();
    pos.make_move(Move::new(6, 4, 4, 4)); // e2-e4
    assert_eq!(
        pos.piece_at(4, 4),
        Some(Piece {
            color: Color::White,
            kind: PieceKind::Pawn
        })
    );
    assert_eq!(pos.piece_at(6, 4), None);
    assert_eq!(pos.side_to_move, Color::Black);
}

#[test]
fn unmake_move_restores_prior_state() {
    let mut pos = Position::startpos();
    let before = pos.to_encoding();
    pos.make_move(Move::new(6, 4, 4, 4));
    pos.unmake_move();
    assert_eq!(pos.to_encoding(), before);
    assert_eq!(pos.en_passant, None);
    assert_eq!(pos.side_to_move, Color::White);
}

#[test]
fn unmake_move_on_empty_history_is_a_noop() {
    let mut pos = Position::startpos();
    pos.unmake_move();
    assert_eq!(pos.to_encoding(), START_ENCODING);
}

#[test]
fn double_step_sets_en_passant_target_for_one_ply() {
    let mut pos = Position::startpos();
    pos.make_move(Move::new(6, 4, 4, 4)); // e2-e4
    assert_eq!(pos.en_passant, Some((5, 4)));
    pos.make_move(Move::new(1, 0, 2, 0)); // a7-a6, quiet move clears it
    assert_eq!(pos.en_passant, None);
}

#[test]
fn pawn_promotes_to_queen_by_default() {
    // Lone white pawn on (1,0) plus both kings out of the way.
    let encoding = "0000k000P000000000000000000000000000000000000000000000000000K0001000000";
    let mut pos = Position::from_encoding(encoding).unwrap();
    pos.make_move(Move::new(1, 0, 0, 0));
    assert_eq!(
        pos.piece_at(0, 0),
        Some(Piece {
            color: Color::White,
            kind: PieceKind::Queen
        })
    );
    assert_eq!(pos.piece_at(1, 0), None);
}

#[test]
fn promotion_choice_is_respected_and_undone() {
    let encoding = "0000k000P000000000000000000000000000000000000000000000000000K0001000000";
    let mut pos = Position::from_encoding(encoding).unwrap();
    pos.make_move(Move::promoting(1, 0, 0, 0, Promotion::Rook));
    assert_eq!(
        pos.piece_at(0, 0),
        Some(Piece {
            color: Color::White,
            kind: PieceKind::Rook
        })
    );
    pos.unmake_move();
    assert_eq!(
        pos.piece_at(1, 0),
        Some(Piece {
            color: Color::White,
            kind: PieceKind::Pawn
        })
    );
    assert_eq!(pos.piece_at(0, 0), None);
}

#[test]
fn king_side_castle_moves_both_pieces() {
    // e1/h1 unmoved, f1 and g1 empty.
    let encoding = "r000k00r000000000000000000000000000000000000000000000000R000K00R1000000";
    let mut pos = Position::from_encoding(encoding).unwrap();
    pos.make_move(Move::new(7, 4, 7, 6));
    assert_eq!(
        pos.piece_at(7, 6),
        Some(Piece {
            color: Color::White,
            kind: PieceKind::King
        })
    );
    assert_eq!(
        pos.piece_at(7, 5),
        Some(Piece {
            color: Color::White,
            kind: PieceKind::Rook
        })
    );
    assert_eq!(pos.piece_at(7, 4), None);
    assert_eq!(pos.piece_at(7, 7), None);
    assert!(pos.castling.white_king_moved);
}

#[test]
fn queen_side_castle_moves_both_pieces() {
    let encoding = "r000k00r000000000000000000000000000000000000000000000000R000K00R1000000";
    let mut pos = Position::from_encoding(encoding).unwrap();
    pos.make_move(Move::new(7, 4, 7, 2));
    assert_eq!(
        pos.piece_at(7, 2),
        Some(Piece {
            color: Color::White,
            kind: PieceKind::King
        })
    );
    assert_eq!(
        pos.piece_at(7, 3),
        Some(Piece {
            color: Color::White,
            kind: PieceKind::Rook
        })
    );
    assert_eq!(pos.piece_at(7, 4), None);
    assert_eq!(pos.piece_at(7, 0), None);
}

#[test]
fn unmake_restores_castle_and_flags() {
    let encoding = "r000k00r000000000000000000000000000000000000000000000000R000K00R1000000";
    let mut pos = Position::from_encoding(encoding).unwrap();
    let before = pos.to_encoding();
    pos.make_move(Move::new(7, 4, 7, 6));
    pos.unmake_move();
    assert_eq!(pos.to_encoding(), before);
    assert!(!pos.castling.white_king_moved);
}

#[test]
fn king_move_sets_and_unmake_clears_moved_flag() {
    let mut pos = Position::startpos();
    pos.make_move(Move::new(6, 4, 4, 4));
    pos.make_move(Move::new(1, 4, 3, 4));
    pos.make_move(Move::new(7, 4, 6, 4)); // Ke2
    assert!(pos.castling.white_king_moved);
    pos.unmake_move();
    assert!(!pos.castling.white_king_moved);
}

#[test]
fn en_passant_capture_removes_passed_pawn() {
    let mut pos = Position::startpos();
    pos.make_move(Move::new(6, 4, 4, 4)); // e2-e4
    pos.make_move(Move::new(1, 0, 2, 0)); // a7-a6
    pos.make_move(Move::new(4, 4, 3, 4)); // e4-e5
    pos.make_move(Move::new(1, 3, 3, 3)); // d7-d5, double step past e5
    assert_eq!(pos.en_passant, Some((2, 3)));

    pos.make_move(Move::new(3, 4, 2, 3)); // e5xd6 en passant
    assert_eq!(
        pos.piece_at(2, 3),
        Some(Piece {
            color: Color::White,
            kind: PieceKind::Pawn
        })
    );
    assert_eq!(pos.piece_at(3, 3), None, "passed pawn must be removed");
    assert_eq!(pos.piece_at(3, 4), None);
}

#[test]
fn en_passant_capture_unmakes_exactly() {
    let mut pos = Position::startpos();
    pos.make_move(Move::new(6, 4, 4, 4));
    pos.make_move(Move::new(1, 0, 2, 0));
    pos.make_move(Move::new(4, 4, 3, 4));
    pos.make_move(Move::new(1, 3, 3, 3));
    let before = pos.to_encoding();
    let ep = pos.en_passant;

    pos.make_move(Move::new(3, 4, 2, 3));
    pos.unmake_move();
    assert_eq!(pos.to_encoding(), before);
    assert_eq!(pos.en_passant, ep);
    assert_eq!(
        pos.piece_at(3, 3),
        Some(Piece {
            color: Color::Black,
            kind: PieceKind::Pawn
        })
    );
}

#[test]
fn make_unmake_stack_unwinds_to_origin() {
    let mut pos = Position::startpos();
    let moves = [
        Move::new(6, 4, 4, 4), // e4
        Move::new(1, 4, 3, 4), // e5
        Move::new(7, 6, 5, 5), // Nf3
        Move::new(0, 1, 2, 2), // Nc6
        Move::new(7, 5, 4, 2), // Bc4
    ];
    for mv in moves {
        pos.make_move(mv);
    }
    for _ in 0..moves.len() {
        pos.unmake_move();
    }
    assert_eq!(pos.to_encoding(), START_ENCODING);
    assert_eq!(pos.en_passant, None);
}

#[test]
fn square_attack_scan() {
    let pos = Position::startpos();
    // (5,0) is covered by the b2 pawn, and by nothing black.
    assert!(pos.is_square_attacked(5, 0, Color::White));
    assert!(!pos.is_square_attacked(5, 0, Color::Black));
    // Knights cover (5,2) from b1.
    assert!(pos.is_square_attacked(5, 2, Color::White));
}

#[test]
fn check_detection() {
    let pos = Position::startpos();
    assert!(!pos.in_check(Color::White));
    assert!(!pos.in_check(Color::Black));

    // Smothered corner: white king a1 boxed in by black queens.
    let mated = "0nbqkbnr00qqqqqq0000000000000000000000000000000000000000K00000001000000";
    let pos = Position::from_encoding(mated).unwrap();
    assert!(pos.in_check(Color::White));
    assert!(pos.is_square_attacked(7, 0, Color::Black));
    assert!(pos.is_square_attacked(6, 0, Color::Black));
    assert!(pos.is_square_attacked(7, 1, Color::Black));
}

#[test]
fn checkmate_and_stalemate_are_disjoint() {
    let mated = "0nbqkbnr00qqqqqq0000000000000000000000000000000000000000K00000001000000";
    let pos = Position::from_encoding(mated).unwrap();
    assert!(pos.is_checkmate());
    assert!(!pos.is_stalemate());
    assert!(pos.is_terminal());

    // Black king a8 stalemated by the b6 queen.
    let stale = "k0000000000000000Q000000000000000000000000000000000000000000000K0000000";
    let pos = Position::from_encoding(stale).unwrap();
    assert!(pos.is_stalemate());
    assert!(!pos.is_checkmate());
    assert!(pos.is_terminal());

    let pos = Position::startpos();
    assert!(!pos.is_terminal());
}

#[test]
fn display_renders_the_grid() {
    let rendered = Position::startpos().to_string();
    assert!(rendered.starts_with("0 r n b q k b n r"));
    assert!(rendered.ends_with("  0 1 2 3 4 5 6 7"));
}
