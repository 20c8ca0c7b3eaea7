use crate::dictionary::Dictionary;
use crate::geometry::{Axis, Boundary, Direction, Position};
use crate::model::bag::TileBag;
use crate::model::board::Board;
use crate::model::rack::{RACK_CAPACITY, Rack};
use crate::model::square::SquareId;
use crate::model::tile::BLANK;
use crate::rules::error::ValidationError;
use crate::rules::scorer::{ScoredWord, score_move};
use crate::rules::validator::validate;
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

/// A tile the acting player puts down this turn. Blanks name the letter they
/// stand for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedTile {
    pub row: usize,
    pub col: usize,
    pub letter: char,
    #[serde(default)]
    pub blank: bool,
}

impl PlacedTile {
    pub fn new(row: usize, col: usize, letter: char) -> Self {
        Self {
            row,
            col,
            letter: letter.to_ascii_uppercase(),
            blank: false,
        }
    }

    pub fn blank(row: usize, col: usize, letter: char) -> Self {
        Self {
            blank: true,
            ..Self::new(row, col, letter)
        }
    }

    pub const fn id(&self) -> SquareId {
        SquareId::new(self.row, self.col)
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    rack: Rack,
    score: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, rack: Rack) -> Self {
        Self {
            name: name.into(),
            rack,
            score: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rack(&self) -> &Rack {
        &self.rack
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}

/// Result of a previewed or submitted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub player: usize,
    pub boundary: Boundary,
    pub words: Vec<ScoredWord>,
    pub bonus: u32,
    pub score: u32,
    /// Squares that received a tile; empty for previews.
    pub changed: Vec<SquareId>,
    pub committed: bool,
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    bag: TileBag,
    players: Vec<Player>,
    current: usize,
    turn: u32,
    seed: u64,
    scoreless_turns: usize,
}

impl Game {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        let seed: u64 = rand::random();
        Self::with_seed(names, seed)
    }

    pub fn with_seed<S: AsRef<str>>(names: &[S], seed: u64) -> Self {
        Self::with_board(Board::standard(), names, seed)
    }

    /// Deals a full rack to every player from a bag shuffled with `seed`.
    /// Without names a single player named "Player" is seated.
    pub fn with_board<S: AsRef<str>>(board: Board, names: &[S], seed: u64) -> Self {
        let mut bag = TileBag::shuffled_with_seed(seed);
        let players: Vec<Player> = names
            .iter()
            .map(|name| Player::new(name.as_ref(), Rack::with_tiles(bag.draw(RACK_CAPACITY))))
            .collect();
        Self::from_parts(board, bag, players, seed)
    }

    /// Assembles a game from prepared parts, e.g. fixed racks. An empty
    /// seating gets a single "Player" dealt from `bag`.
    pub fn from_parts(board: Board, mut bag: TileBag, mut players: Vec<Player>, seed: u64) -> Self {
        if players.is_empty() {
            players.push(Player::new("Player", Rack::with_tiles(bag.draw(RACK_CAPACITY))));
        }
        Self {
            board,
            bag,
            players,
            current: 0,
            turn: 1,
            seed,
            scoreless_turns: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn bag_len(&self) -> usize {
        self.bag.len()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_player_index(&self) -> usize {
        self.current
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Validates and scores the placements for the current player. With
    /// `submit` the move is committed: tiles become fixed, the rack is
    /// refilled and the turn passes. Without it nothing changes.
    pub fn play<D: Dictionary + ?Sized>(
        &mut self,
        placements: &[PlacedTile],
        submit: bool,
        dictionary: &D,
    ) -> Result<MoveOutcome, ValidationError> {
        if self.is_over() {
            return Err(ValidationError::message("the game is over"));
        }

        let size = self.board.size();
        let mut staged = self.board.clone();
        let mut rack = self.players[self.current].rack.clone();
        let mut placed = Vec::with_capacity(placements.len());
        for tile in placements {
            if !tile.letter.is_ascii_alphabetic() {
                return Err(ValidationError::message(format!(
                    "'{}' is not a letter",
                    tile.letter
                )));
            }
            let key = if tile.blank { BLANK } else { tile.letter };
            let taken = rack.take(key).ok_or_else(|| {
                ValidationError::message(format!("rack has no '{key}' tile"))
            })?;
            staged.place(tile.row, tile.col, taken.with_letter(tile.letter))?;
            let position =
                Position::from_row_col(Axis::horizontal(Direction::Backward), tile.row, tile.col, size)
                    .ok_or(ValidationError::InvalidArrangement)?;
            placed.push(position);
        }

        let validated = validate(&staged, &placed, rack.len(), dictionary)?;
        let score = score_move(&staged, &validated, placements.len());
        let mut outcome = MoveOutcome {
            player: self.current,
            boundary: validated.boundary,
            words: score.words,
            bonus: score.bonus,
            score: score.total,
            changed: Vec::new(),
            committed: false,
        };
        if !submit {
            return Ok(outcome);
        }

        let mut changed: Vec<SquareId> = placements.iter().map(PlacedTile::id).collect();
        changed.sort();
        for id in &changed {
            staged.fix(*id);
        }
        self.board = staged;
        for tile in self.bag.draw(rack.missing()) {
            rack.add(tile);
        }

        let player = &mut self.players[self.current];
        player.rack = rack;
        player.score += outcome.score;

        let words: Vec<&str> = outcome.words.iter().map(|w| w.word.as_str()).collect();
        event!(
            target: "papyrus_core::game",
            Level::INFO,
            turn = self.turn,
            player = %player.name,
            words = %words.join(","),
            score = outcome.score,
            total = player.score,
            bag = self.bag.len(),
            "move committed"
        );

        outcome.changed = changed;
        outcome.committed = true;
        self.scoreless_turns = 0;
        self.advance();
        Ok(outcome)
    }

    /// Gives up the turn without playing.
    pub fn pass_turn(&mut self) {
        event!(
            target: "papyrus_core::game",
            Level::INFO,
            turn = self.turn,
            player = %self.players[self.current].name,
            "turn passed"
        );
        self.scoreless_turns += 1;
        self.advance();
    }

    fn advance(&mut self) {
        self.turn += 1;
        self.current = (self.current + 1) % self.players.len();
    }

    /// Over once the bag is empty and someone has played out, or after two
    /// full rounds of passes.
    pub fn is_over(&self) -> bool {
        let played_out = self.bag.is_empty() && self.players.iter().any(|p| p.rack.is_empty());
        played_out || self.scoreless_turns >= self.players.len() * 2
    }

    /// Scores with unplayed tiles deducted; a player who went out collects
    /// everyone else's leftovers.
    pub fn final_scores(&self) -> Vec<u32> {
        let leftovers: u32 = self.players.iter().map(|p| p.rack.total_value()).sum();
        self.players
            .iter()
            .map(|player| {
                if player.rack.is_empty() && self.bag.is_empty() {
                    player.score + leftovers
                } else {
                    player.score.saturating_sub(player.rack.total_value())
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Game, PlacedTile, Player};
    use crate::dictionary::WordList;
    use crate::model::bag::TileBag;
    use crate::model::board::Board;
    use crate::model::rack::Rack;
    use crate::model::square::SquareId;
    use crate::model::tile::Tile;
    use crate::rules::error::ValidationError;

    fn game(racks: &[&str], bag: &str) -> Game {
        let players = racks
            .iter()
            .enumerate()
            .map(|(i, letters)| Player::new(format!("P{}", i + 1), Rack::from_letters(letters)))
            .collect();
        let bag = TileBag::from_tiles(bag.chars().filter_map(Tile::standard).collect());
        Game::from_parts(Board::standard(), bag, players, 7)
    }

    fn cat() -> Vec<PlacedTile> {
        vec![
            PlacedTile::new(7, 6, 'C'),
            PlacedTile::new(7, 7, 'A'),
            PlacedTile::new(7, 8, 'T'),
        ]
    }

    #[test]
    fn seeded_games_deal_full_racks() {
        let game = Game::with_seed(&["Ann", "Bo"], 11);
        assert_eq!(game.players().len(), 2);
        assert!(game.players().iter().all(|p| p.rack().len() == 7));
        assert_eq!(game.bag_len(), 86);
        let again = Game::with_seed(&["Ann", "Bo"], 11);
        assert_eq!(game.players()[0].rack(), again.players()[0].rack());
    }

    #[test]
    fn preview_does_not_change_the_game() {
        let mut game = game(&["CATXYZQ", "EEEEEEE"], "AAAA");
        let words = WordList::from_words(["CAT"]);
        let outcome = game.play(&cat(), false, &words).unwrap();
        assert_eq!(outcome.score, 10);
        assert!(!outcome.committed);
        assert!(outcome.changed.is_empty());
        assert!(game.board().is_empty());
        assert_eq!(game.current_player().rack().len(), 7);
        assert_eq!(game.turn(), 1);
    }

    #[test]
    fn submit_commits_refills_and_advances() {
        let mut game = game(&["CATXYZQ", "EEEEEEE"], "AAAA");
        let words = WordList::from_words(["CAT"]);
        let outcome = game.play(&cat(), true, &words).unwrap();
        assert!(outcome.committed);
        assert_eq!(
            outcome.changed,
            vec![SquareId::new(7, 6), SquareId::new(7, 7), SquareId::new(7, 8)]
        );
        assert_eq!(game.players()[0].score(), 10);
        assert_eq!(game.players()[0].rack().len(), 7);
        assert_eq!(game.bag_len(), 1);
        assert_eq!(game.current_player_index(), 1);
        assert!(game.board().square_at(7, 7).unwrap().tile().unwrap().is_fixed());
    }

    #[test]
    fn missing_rack_letter_is_a_message() {
        let mut game = game(&["CAXXXXX"], "");
        let err = game.play(&cat(), false, &WordList::from_words(["CAT"])).unwrap_err();
        assert!(matches!(err, ValidationError::Message(text) if text.contains('T')));
    }

    #[test]
    fn blanks_play_as_their_letter_for_zero() {
        let mut game = game(&["CA?XXXX"], "");
        let tiles = [
            PlacedTile::new(7, 6, 'C'),
            PlacedTile::new(7, 7, 'A'),
            PlacedTile::blank(7, 8, 't'),
        ];
        let outcome = game.play(&tiles, true, &WordList::from_words(["CAT"])).unwrap();
        assert_eq!(outcome.words[0].word, "CAT");
        assert_eq!(outcome.score, 8);
    }

    #[test]
    fn empty_seating_gets_a_default_player() {
        let mut game = Game::from_parts(Board::standard(), TileBag::from_tiles(Vec::new()), Vec::new(), 1);
        assert_eq!(game.players().len(), 1);
        assert_eq!(game.current_player().name(), "Player");
        game.pass_turn();
        assert_eq!(game.current_player_index(), 0);
        assert_eq!(game.turn(), 2);

        let dealt = Game::from_parts(Board::standard(), TileBag::shuffled_with_seed(3), Vec::new(), 3);
        assert_eq!(dealt.current_player().rack().len(), 7);
        assert_eq!(dealt.bag_len(), 93);
    }

    #[test]
    fn non_letters_are_refused_before_touching_the_rack() {
        let mut game = game(&["CA?XXXX"], "");
        let tiles = [
            PlacedTile::new(7, 6, 'C'),
            PlacedTile::new(7, 7, 'A'),
            PlacedTile::new(7, 8, '?'),
        ];
        let err = game.play(&tiles, false, &WordList::from_words(["CAT"])).unwrap_err();
        assert_eq!(err, ValidationError::message("'?' is not a letter"));

        let blank = [PlacedTile::blank(7, 7, '1')];
        let err = game.play(&blank, false, &WordList::from_words(["CAT"])).unwrap_err();
        assert!(matches!(err, ValidationError::Message(text) if text.contains("not a letter")));
        assert_eq!(game.current_player().rack().len(), 7);
    }

    #[test]
    fn repeated_passes_end_the_game() {
        let mut game = game(&["CAT", "DOG"], "");
        for _ in 0..4 {
            assert!(!game.is_over());
            game.pass_turn();
        }
        assert!(game.is_over());
        let err = game.play(&cat(), false, &WordList::from_words(["CAT"])).unwrap_err();
        assert!(matches!(err, ValidationError::Message(_)));
    }

    #[test]
    fn going_out_collects_leftovers() {
        let mut game = game(&["CAT", "QZ"], "");
        game.play(&cat(), true, &WordList::from_words(["CAT"])).unwrap();
        assert!(game.is_over());
        assert_eq!(game.final_scores(), vec![10 + 20, 0]);
    }
}
