use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> Playing
/// - NotStarted -> Completed
/// - Playing -> GameOver
/// - Playing -> Completed
/// - any -> NotStarted (new game)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    /// Board not generated yet, only its parameters are known.
    NotStarted(GameConfig),
    Playing(Board),
    /// Lost, the board is fully disclosed.
    GameOver(Board),
    /// Won, every safe cell is revealed.
    Completed(Board),
}

impl Default for GameState {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::default())
    }
}

/// Requests the state machine accepts.
#[derive(Clone, Debug, PartialEq)]
pub enum Msg {
    Reveal(Pos),
    Flag(Pos),
    /// Reveal the neighbors of a satisfied number.
    Chord(Pos),
    /// Delivery of a board previously asked for with a [`GenerateRequest`].
    Generated(GenerateResponse),
    NewGame(Difficulty),
}

/// What a message did to the game, so a renderer knows whether to repaint.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    NoChange,
    Changed,
    Exploded,
    Won,
}

impl Outcome {
    pub const fn has_update(self) -> bool {
        use Outcome::*;
        match self {
            NoChange => false,
            Changed => true,
            Exploded => true,
            Won => true,
        }
    }
}

/// Result of feeding one message through [`GameState::update`].
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct Transition {
    pub state: GameState,
    pub outcome: Outcome,
    /// Board generation the caller has to run and deliver back as [`Msg::Generated`].
    pub request: Option<GenerateRequest>,
}

impl Transition {
    fn new(state: GameState, outcome: Outcome) -> Self {
        Self {
            state,
            outcome,
            request: None,
        }
    }

    fn unchanged(state: GameState) -> Self {
        Self::new(state, Outcome::NoChange)
    }
}

impl GameState {
    /// Starts a game with custom parameters.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::NotStarted(config))
    }

    pub const fn from_difficulty(difficulty: Difficulty) -> Self {
        Self::NotStarted(difficulty.config())
    }

    pub fn size(&self) -> Size {
        match self {
            Self::NotStarted(config) => config.size,
            Self::Playing(board) | Self::GameOver(board) | Self::Completed(board) => board.size(),
        }
    }

    pub fn board(&self) -> Option<&Board> {
        match self {
            Self::NotStarted(_) => None,
            Self::Playing(board) | Self::GameOver(board) | Self::Completed(board) => Some(board),
        }
    }

    pub fn stats(&self) -> Option<BoardStats> {
        self.board().map(Board::stats)
    }

    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::GameOver(_) | Self::Completed(_))
    }

    /// Consumes the current state and a message, producing the next state.
    pub fn update(self, msg: Msg) -> Transition {
        use GameState::*;

        match (self, msg) {
            (_, Msg::NewGame(difficulty)) => {
                log::debug!("New {} game", difficulty);
                Transition::new(Self::from_difficulty(difficulty), Outcome::Changed)
            }
            (NotStarted(config), Msg::Reveal(pos)) => {
                if let Err(err) = config.validate() {
                    log::warn!("Not generating a board for {:?}: {}", config, err);
                    return Transition::unchanged(NotStarted(config));
                }
                if !config.contains(pos) {
                    return Transition::unchanged(NotStarted(config));
                }
                log::debug!("First reveal at {:?}, requesting board", pos);
                Transition {
                    state: NotStarted(config),
                    outcome: Outcome::NoChange,
                    request: Some(GenerateRequest::new(config, pos)),
                }
            }
            (NotStarted(config), Msg::Generated(response)) => Self::start(config, response),
            (Playing(board), Msg::Reveal(pos)) => Self::reveal(board, pos),
            (Playing(mut board), Msg::Flag(pos)) => {
                let outcome = if board.flag(pos).has_update() {
                    Outcome::Changed
                } else {
                    Outcome::NoChange
                };
                Transition::new(Playing(board), outcome)
            }
            (Playing(board), Msg::Chord(pos)) => Self::chord(board, pos),
            (state, Msg::Generated(response)) => {
                log::warn!(
                    "Ignoring board generated for {:?}, game is no longer waiting for one",
                    response.request.target
                );
                Transition::unchanged(state)
            }
            (state, msg) => {
                log::trace!("Ignoring {:?}", msg);
                Transition::unchanged(state)
            }
        }
    }

    fn start(config: GameConfig, response: GenerateResponse) -> Transition {
        if response.request.config != config || !response.matches_config() {
            log::warn!("Ignoring board generated for a different game");
            return Transition::unchanged(Self::NotStarted(config));
        }
        if let Err(err) = config.validate() {
            log::warn!("Ignoring board generated for {:?}: {}", config, err);
            return Transition::unchanged(Self::NotStarted(config));
        }

        let target = response.request.target;
        match response.accept() {
            Ok(minefield) => {
                let mut board = Board::new(&minefield);
                board.cascade_reveal(target);
                Self::settle(board)
            }
            Err(retry) => Transition {
                state: Self::NotStarted(config),
                outcome: Outcome::NoChange,
                request: Some(retry),
            },
        }
    }

    fn reveal(mut board: Board, pos: Pos) -> Transition {
        let cell = match board.get(pos) {
            Some(GameCell::Unrevealed(cell) | GameCell::Flagged(cell)) => cell,
            Some(GameCell::Revealed(_)) | None => return Transition::unchanged(Self::Playing(board)),
        };

        match cell {
            Cell::Bomb { .. } => Self::explode(board, pos),
            Cell::Empty => {
                board.cascade_reveal(pos);
                Self::settle(board)
            }
            Cell::BombNeighbor(_) => {
                board.reveal(pos);
                Self::settle(board)
            }
        }
    }

    fn chord(mut board: Board, pos: Pos) -> Transition {
        let targets = board.chord_targets(pos);
        if targets.is_empty() {
            return Transition::unchanged(Self::Playing(board));
        }

        let bomb = targets
            .iter()
            .copied()
            .find(|&target| board.peek(target).is_some_and(Cell::is_bomb));
        if let Some(bomb) = bomb {
            return Self::explode(board, bomb);
        }

        for target in targets {
            board.cascade_reveal(target);
        }
        Self::settle(board)
    }

    fn explode(mut board: Board, pos: Pos) -> Transition {
        log::debug!("Bomb at {:?} exploded", pos);
        board.mark_exploded(pos);
        board.reveal_all();
        Transition::new(Self::GameOver(board), Outcome::Exploded)
    }

    fn settle(board: Board) -> Transition {
        if board.stats().is_complete() {
            log::debug!("All safe cells revealed");
            Transition::new(Self::Completed(board), Outcome::Won)
        } else {
            Transition::new(Self::Playing(board), Outcome::Changed)
        }
    }
}
