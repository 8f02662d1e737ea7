//! Composition-time presenter wiring: register presentation components explicitly,
//! then attach them all to a freshly built target in priority order.

use presenters::{Presenter, PresenterSet};

/// The model being presented.
struct Board {
    columns: u32,
    rows: u32,
}

/// Sizes the playfield; must run before anything that draws into it.
struct LayoutPresenter;

impl Presenter<Board> for LayoutPresenter {
    fn priority(&self) -> i32 {
        -10
    }

    fn attach(&mut self, board: &Board) {
        println!("layout: sizing grid to {}x{}", board.columns, board.rows);
    }
}

/// Paints the tiles; default priority is fine.
struct TilePresenter;

impl Presenter<Board> for TilePresenter {
    fn attach(&mut self, board: &Board) {
        println!("tiles: painting {} cells", board.columns * board.rows);
    }
}

fn main() {
    let mut presenters = PresenterSet::new();

    // Registration order does not matter; priority decides.
    presenters.register(TilePresenter);
    presenters.register(LayoutPresenter);
    presenters.register_fn(10, |_: &Board| println!("effects: ready"));

    let board = Board {
        columns: 8,
        rows: 8,
    };

    presenters.attach_all(&board);
}
