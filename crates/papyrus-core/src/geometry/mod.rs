pub mod axis;
pub mod boundary;
pub mod position;

pub use axis::{Axis, Direction, Orientation};
pub use boundary::Boundary;
pub use position::Position;
