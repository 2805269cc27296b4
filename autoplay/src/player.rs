use rand::prelude::*;
use sweeper_core::*;

/// Plays by trivial deduction, falling back to random guesses.
pub struct Player {
    rng: SmallRng,
}

impl Player {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Next message to send, `None` once the game is over.
    pub fn next_move(&mut self, state: &GameState) -> Option<Msg> {
        match state {
            GameState::NotStarted(config) => {
                let row = self.rng.random_range(0..config.rows());
                let col = self.rng.random_range(0..config.columns());
                Some(Msg::Reveal((row, col)))
            }
            GameState::Playing(board) => Some(deduce(board).unwrap_or_else(|| self.guess(board))),
            GameState::GameOver(_) | GameState::Completed(_) => None,
        }
    }

    fn guess(&mut self, board: &Board) -> Msg {
        let mut hidden = positions(board, |cell| matches!(cell, GameCell::Unrevealed(_)));
        if hidden.is_empty() {
            // every hidden cell carries a flag, so one of them is wrong
            hidden = positions(board, GameCell::is_flagged);
        }
        let pos = hidden.choose(&mut self.rng).copied().unwrap_or((0, 0));
        log::trace!("Guessing {:?} out of {} candidates", pos, hidden.len());
        Msg::Reveal(pos)
    }
}

/// Finds a number whose surroundings are fully determined.
fn deduce(board: &Board) -> Option<Msg> {
    let grid = board.grid();
    for (pos, &cell) in grid.indexed_iter() {
        let GameCell::Revealed(Cell::BombNeighbor(count)) = cell else {
            continue;
        };
        let count = usize::from(count);

        let mut hidden = Vec::new();
        let mut flagged = 0;
        for (neighbor_pos, neighbor) in grid.iter_neighbor_cells(pos) {
            match neighbor {
                GameCell::Unrevealed(_) => hidden.push(neighbor_pos),
                GameCell::Flagged(_) => flagged += 1,
                GameCell::Revealed(_) => {}
            }
        }

        if hidden.is_empty() {
            continue;
        }
        if flagged == count {
            return Some(Msg::Chord(pos));
        }
        if flagged + hidden.len() == count {
            return Some(Msg::Flag(hidden[0]));
        }
    }
    None
}

fn positions(board: &Board, keep: impl Fn(GameCell) -> bool) -> Vec<Pos> {
    board
        .grid()
        .indexed_iter()
        .filter(|&(_, &cell)| keep(cell))
        .map(|(pos, _)| pos)
        .collect()
}
