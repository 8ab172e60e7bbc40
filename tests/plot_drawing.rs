use pixel_pieces::plot::{PlotCommand, PlotPiece};
use pixel_pieces::{Bitmap, Pen, PenEvent, Piece, Point};

fn press(piece: &mut PlotPiece, pen: &mut Pen, at: Point) {
    pen.begin_tick();
    pen.press(at);
    piece.act(PenEvent::Touch, pen);
}

fn release(piece: &mut PlotPiece, pen: &mut Pen, at: Point) {
    pen.begin_tick();
    pen.release(at);
    piece.act(PenEvent::Lift, pen);
}

#[test]
fn test_click_adds_point() {
    let mut piece = PlotPiece::new();
    let mut pen = Pen::new();
    let cell = piece.grid().get(2, 3);

    press(&mut piece, &mut pen, cell);
    assert!(piece.is_marking());
    release(&mut piece, &mut pen, cell + Point::new(1, 1));

    assert!(!piece.is_marking());
    assert_eq!(piece.commands(), &[PlotCommand::Point { x: 2, y: 3 }]);
}

#[test]
fn test_drag_between_cells_adds_line() {
    let mut piece = PlotPiece::new();
    let mut pen = Pen::new();
    let grid = *piece.grid();

    press(&mut piece, &mut pen, grid.get(0, 0));
    release(&mut piece, &mut pen, grid.get(5, 9));

    assert_eq!(
        piece.commands(),
        &[PlotCommand::Line { x0: 0, y0: 0, x1: 5, y1: 9 }]
    );
}

#[test]
fn test_touch_outside_grid_marks_nothing() {
    let mut piece = PlotPiece::new();
    let mut pen = Pen::new();

    press(&mut piece, &mut pen, Point::new(2, 2));
    assert!(!piece.is_marking());
    release(&mut piece, &mut pen, Point::new(2, 2));
    assert!(piece.commands().is_empty());
}

#[test]
fn test_lift_outside_grid_drops_mark() {
    let mut piece = PlotPiece::new();
    let mut pen = Pen::new();

    let start = piece.grid().get(1, 1);
    press(&mut piece, &mut pen, start);
    release(&mut piece, &mut pen, Point::new(63, 63));
    assert!(!piece.is_marking());
    assert!(piece.commands().is_empty());
}

#[test]
fn test_saved_drawing_reopens() {
    let mut piece = PlotPiece::new();
    let mut pen = Pen::new();
    let grid = *piece.grid();
    press(&mut piece, &mut pen, grid.get(1, 1));
    release(&mut piece, &mut pen, grid.get(1, 1));
    press(&mut piece, &mut pen, grid.get(0, 2));
    release(&mut piece, &mut pen, grid.get(4, 8));

    let dir = std::env::temp_dir().join(format!("pixel-pieces-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = piece.save_to(&dir, 1_639_000_000).unwrap();
    assert!(path.ends_with("1639000000.json"));

    let mut reopened = PlotPiece::new();
    assert_eq!(reopened.open(&path).unwrap(), 2);
    assert_eq!(reopened.commands(), piece.commands());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_open_missing_file_keeps_drawing() {
    let mut piece = PlotPiece::new();
    piece.decode(r#"{ "resolution": [6, 10], "commands": [{ "name": "point", "args": [0, 0] }] }"#)
        .unwrap();
    assert!(piece.open(std::path::Path::new("/nonexistent/drawing.json")).is_err());
    assert_eq!(piece.commands().len(), 1);
}

#[test]
fn test_decode_repaints() {
    let mut piece = PlotPiece::new();
    let mut screen = Bitmap::blank(64, 64);
    let pen = Pen::new();
    assert!(piece.paint(&mut screen, &pen, 0));
    assert!(!piece.paint(&mut screen, &pen, 1));

    piece.decode(r#"{ "resolution": [6, 10], "commands": [] }"#).unwrap();
    assert!(piece.paint(&mut screen, &pen, 2));
}
