pub mod bag;
pub mod board;
pub mod modifier;
pub mod rack;
pub mod square;
pub mod tile;

pub use bag::TileBag;
pub use board::{Board, BoardError, STANDARD_SIZE};
pub use modifier::Modifier;
pub use rack::{RACK_CAPACITY, Rack};
pub use square::{Square, SquareId};
pub use tile::{BLANK, Placement, Tile};
