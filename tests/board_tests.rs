//! Board tests - walls, locking, row completion and collapse

use console_tetris::core::{Board, Tetromino};
use console_tetris::types::{
    ContractError, PieceKind, Rotation, CELL_CLEARING, CELL_EMPTY, CELL_WALL, FIELD_HEIGHT,
    FIELD_WIDTH,
};

fn fill_row(board: &mut Board, y: i32, value: u8) {
    for x in 1..(board.width() as i32 - 1) {
        board.set(x, y, value);
    }
}

#[test]
fn test_board_new_has_walls() {
    let board = Board::new();
    assert_eq!(board.width(), FIELD_WIDTH);
    assert_eq!(board.height(), FIELD_HEIGHT);

    for y in 0..FIELD_HEIGHT as i32 {
        assert_eq!(board.get(0, y), Some(CELL_WALL));
        assert_eq!(board.get(FIELD_WIDTH as i32 - 1, y), Some(CELL_WALL));
    }
    for x in 0..FIELD_WIDTH as i32 {
        assert_eq!(board.get(x, FIELD_HEIGHT as i32 - 1), Some(CELL_WALL));
    }
    for y in 0..FIELD_HEIGHT as i32 - 1 {
        for x in 1..FIELD_WIDTH as i32 - 1 {
            assert_eq!(board.get(x, y), Some(CELL_EMPTY), "({}, {})", x, y);
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(FIELD_WIDTH as i32, 0), None);
    assert_eq!(board.get(0, FIELD_HEIGHT as i32), None);
}

#[test]
fn test_walls_cannot_be_overwritten() {
    let mut board = Board::new();
    assert!(!board.set(0, 5, 3));
    assert!(!board.set(4, FIELD_HEIGHT as i32 - 1, 3));
    assert!(!board.set(4, 4, CELL_WALL));
    assert_eq!(board.get(0, 5), Some(CELL_WALL));
    assert_eq!(board.get(4, 4), Some(CELL_EMPTY));
}

#[test]
fn test_with_size_rejects_tiny_fields() {
    assert!(matches!(
        Board::with_size(3, 18),
        Err(ContractError::FieldTooSmall { .. })
    ));
    let board = Board::with_size(8, 10).unwrap();
    assert_eq!(board.interior_width(), 6);
    assert_eq!(board.interior_height(), 9);
}

#[test]
fn test_lock_writes_only_filled_cells() {
    let mut board = Board::new();
    let piece = Tetromino {
        kind: PieceKind::T,
        rotation: Rotation::North,
        x: 3,
        y: 5,
    };
    assert_eq!(board.lock(&piece), 4);
    assert_eq!(board.occupied_count(), 4);
    for (x, y) in piece.cells() {
        assert_eq!(board.get(x, y), Some(PieceKind::T.cell_value()));
    }
}

#[test]
fn test_scan_marks_only_full_rows() {
    let mut board = Board::new();
    fill_row(&mut board, 16, 2);
    fill_row(&mut board, 14, 5);
    fill_row(&mut board, 15, 1);
    board.set(4, 15, CELL_EMPTY);

    let rows = board.scan_completed_rows();
    assert_eq!(rows, vec![14, 16]);
    assert!(board.row(14)[1..11].iter().all(|c| *c == CELL_CLEARING));
    assert!(board.row(16)[1..11].iter().all(|c| *c == CELL_CLEARING));
    assert_eq!(board.get(1, 15), Some(1));
    // Walls keep their value on marked rows.
    assert_eq!(board.get(0, 14), Some(CELL_WALL));
}

#[test]
fn test_collapse_non_adjacent_rows() {
    let mut board = Board::new();
    fill_row(&mut board, 16, 2);
    fill_row(&mut board, 14, 5);
    board.set(3, 15, 6);
    board.set(5, 13, 7);

    let mut rows = board.scan_completed_rows();
    board.collapse_rows(&mut rows);
    assert!(rows.is_empty());

    // Row 15 drops one row, row 13 drops two (one per cleared row below it).
    assert_eq!(board.get(3, 16), Some(6));
    assert_eq!(board.get(5, 15), Some(7));
    assert_eq!(board.occupied_count(), 2);
    assert!(board.row(0)[1..11].iter().all(|c| *c == CELL_EMPTY));
}

#[test]
fn test_collapse_top_row() {
    let mut board = Board::new();
    fill_row(&mut board, 0, 3);
    let mut rows = board.scan_completed_rows();
    assert_eq!(rows, vec![0]);
    board.collapse_rows(&mut rows);
    assert_eq!(board.occupied_count(), 0);
}

#[test]
fn test_clear_keeps_walls() {
    let mut board = Board::new();
    fill_row(&mut board, 10, 4);
    board.clear();
    assert_eq!(board, Board::new());
}
