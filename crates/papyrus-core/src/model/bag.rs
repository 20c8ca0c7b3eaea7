use crate::model::tile::{BLANK, Tile};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

const DISTRIBUTION: [(char, usize); 27] = [
    ('A', 9),
    ('B', 2),
    ('C', 2),
    ('D', 4),
    ('E', 12),
    ('F', 2),
    ('G', 3),
    ('H', 2),
    ('I', 9),
    ('J', 1),
    ('K', 1),
    ('L', 4),
    ('M', 2),
    ('N', 6),
    ('O', 8),
    ('P', 2),
    ('Q', 1),
    ('R', 6),
    ('S', 4),
    ('T', 6),
    ('U', 4),
    ('V', 2),
    ('W', 2),
    ('X', 1),
    ('Y', 2),
    ('Z', 1),
    (BLANK, 2),
];

#[derive(Debug, Clone)]
pub struct TileBag {
    tiles: Vec<Tile>,
}

impl TileBag {
    pub fn standard() -> Self {
        let mut tiles = Vec::with_capacity(100);
        for (letter, count) in DISTRIBUTION.iter().copied() {
            if let Some(tile) = Tile::standard(letter) {
                tiles.extend(std::iter::repeat_n(tile, count));
            }
        }
        Self { tiles }
    }

    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut bag = Self::standard();
        bag.tiles.shuffle(rng);
        bag
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    /// Takes up to `count` tiles from the top of the bag.
    pub fn draw(&mut self, count: usize) -> Vec<Tile> {
        let take = count.min(self.tiles.len());
        self.tiles.split_off(self.tiles.len() - take)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}
