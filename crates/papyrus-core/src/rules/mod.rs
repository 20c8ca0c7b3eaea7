pub mod discovery;
pub mod error;
pub mod scorer;
pub mod traversal;
pub mod validator;

pub use discovery::{cross_words, discover, extend, gaps, run_through};
pub use error::ValidationError;
pub use scorer::{FULL_RACK_BONUS, MoveScore, ScoredWord, score_move, score_word};
pub use traversal::{Walk, empty_run, filled_run, furthest_reach, walk_while};
pub use validator::{ValidatedMove, validate, validate_boundary};
