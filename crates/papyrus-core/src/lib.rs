#![deny(warnings)]
pub mod dictionary;
pub mod game;
pub mod geometry;
pub mod model;
pub mod rules;

pub use dictionary::{Dictionary, DictionaryError, WordList};
pub use rules::ValidationError;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "papyrus"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::AppInfo;

    #[test]
    fn exposes_static_metadata() {
        assert_eq!(AppInfo::name(), "papyrus");
        assert!(!AppInfo::version().is_empty());
    }
}
