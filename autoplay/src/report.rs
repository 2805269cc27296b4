use serde::Serialize;
use std::fmt;
use sweeper_core::Difficulty;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Ending {
    Won,
    Lost,
    /// Gave up after hitting the move limit.
    Stalled,
}

/// How a single simulated game went.
#[derive(Clone, Debug, Serialize)]
pub struct GameRecord {
    pub ending: Ending,
    pub moves: u32,
    pub generation_attempts: u32,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct Report {
    pub difficulty: String,
    pub seed: u64,
    pub games: u32,
    pub won: u32,
    pub lost: u32,
    pub stalled: u32,
    pub total_moves: u64,
    pub max_generation_attempts: u32,
}

impl Report {
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty: difficulty.to_string(),
            seed,
            ..Default::default()
        }
    }

    pub fn record(&mut self, record: &GameRecord) {
        self.games += 1;
        match record.ending {
            Ending::Won => self.won += 1,
            Ending::Lost => self.lost += 1,
            Ending::Stalled => self.stalled += 1,
        }
        self.total_moves += u64::from(record.moves);
        self.max_generation_attempts = self.max_generation_attempts.max(record.generation_attempts);
    }

    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            f64::from(self.won) / f64::from(self.games)
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "difficulty: {} (seed {})", self.difficulty, self.seed)?;
        writeln!(
            f,
            "games: {}, won: {}, lost: {}, stalled: {}",
            self.games, self.won, self.lost, self.stalled
        )?;
        writeln!(f, "win rate: {:.1}%", self.win_rate() * 100.0)?;
        write!(
            f,
            "moves: {}, max generation attempts: {}",
            self.total_moves, self.max_generation_attempts
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ending: Ending, moves: u32) -> GameRecord {
        GameRecord {
            ending,
            moves,
            generation_attempts: 1,
        }
    }

    #[test]
    fn tallies_endings() {
        let mut report = Report::new(Difficulty::Easy, 0);
        report.record(&record(Ending::Won, 10));
        report.record(&record(Ending::Lost, 3));
        report.record(&record(Ending::Lost, 4));
        report.record(&record(Ending::Won, 20));

        assert_eq!(report.games, 4);
        assert_eq!(report.won, 2);
        assert_eq!(report.total_moves, 37);
        assert!((report.win_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_report_has_zero_win_rate() {
        assert_eq!(Report::new(Difficulty::Hard, 1).win_rate(), 0.0);
    }
}
