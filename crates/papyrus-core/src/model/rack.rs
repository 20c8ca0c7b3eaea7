use crate::model::tile::{BLANK, Placement, Tile};

pub const RACK_CAPACITY: usize = 7;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rack {
    tiles: Vec<Tile>,
}

impl Rack {
    pub fn new() -> Self {
        Self {
            tiles: Vec::with_capacity(RACK_CAPACITY),
        }
    }

    pub fn with_tiles(tiles: Vec<Tile>) -> Self {
        let mut rack = Self::new();
        for tile in tiles {
            rack.add(tile);
        }
        rack
    }

    /// Builds a rack from letters, `?` standing for a blank. Unknown
    /// characters are skipped.
    pub fn from_letters(letters: &str) -> Self {
        Self::with_tiles(letters.chars().filter_map(Tile::standard).collect())
    }

    pub fn add(&mut self, tile: Tile) {
        self.tiles.push(tile.returned_to_rack());
    }

    /// Removes a tile by letter; blanks are addressed with `?`. The removed
    /// tile is returned in the held state.
    pub fn take(&mut self, letter: char) -> Option<Tile> {
        let wanted = letter.to_ascii_uppercase();
        let index = self.tiles.iter().position(|tile| {
            if wanted == BLANK {
                tile.blank
            } else {
                !tile.blank && tile.letter == wanted
            }
        })?;
        Some(self.tiles.remove(index).with_placement(Placement::Held))
    }

    pub fn contains(&self, letter: char) -> bool {
        let wanted = letter.to_ascii_uppercase();
        self.tiles.iter().any(|tile| tile.letter == wanted)
    }

    pub fn missing(&self) -> usize {
        RACK_CAPACITY.saturating_sub(self.tiles.len())
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn letters(&self) -> String {
        self.tiles.iter().map(|tile| tile.letter).collect()
    }

    pub fn total_value(&self) -> u32 {
        self.tiles.iter().map(|tile| tile.value).sum()
    }
}
