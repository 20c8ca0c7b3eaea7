pub mod serialization;
pub mod session;

pub use serialization::{GameSnapshot, PlayerSnapshot};
pub use session::{Game, MoveOutcome, PlacedTile, Player};
