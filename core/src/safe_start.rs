use serde::{Deserialize, Serialize};

use crate::*;

/// Request for a minefield whose `target` cell is not a bomb.
///
/// The state machine hands these out instead of generating inline, so the caller decides
/// where randomness comes from and when the work runs. Each attempt is one request; an
/// unsafe result turns into a follow-up request with the same target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub config: GameConfig,
    pub target: Pos,
    pub attempt: u32,
}

impl GenerateRequest {
    pub fn new(config: GameConfig, target: Pos) -> Self {
        Self {
            config,
            target,
            attempt: 1,
        }
    }

    /// Runs this attempt with the default shuffling generator.
    pub fn run(self, seed: u64) -> Result<GenerateResponse> {
        self.run_with(ShuffleMinefieldGenerator::new(seed))
    }

    pub fn run_with(self, generator: impl MinefieldGenerator) -> Result<GenerateResponse> {
        let minefield = generator.generate(self.config)?;
        Ok(GenerateResponse {
            request: self,
            minefield,
        })
    }

    #[must_use]
    pub fn retry(self) -> Self {
        Self {
            attempt: self.attempt.saturating_add(1),
            ..self
        }
    }
}

/// A generated candidate, delivered back to the state machine as a message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub request: GenerateRequest,
    pub minefield: Minefield,
}

impl GenerateResponse {
    /// Whether the minefield has the requested shape.
    pub fn matches_config(&self) -> bool {
        let config = self.request.config;
        self.minefield.size() == config.size
            && self.minefield.iter().filter(|cell| cell.is_bomb()).count()
                == usize::from(config.bombs)
    }

    pub fn is_safe(&self) -> bool {
        self.minefield
            .get(self.request.target)
            .is_some_and(|cell| !cell.is_bomb())
    }

    /// Accepts the candidate when its target is safe, otherwise hands back the next attempt.
    pub fn accept(self) -> core::result::Result<Minefield, GenerateRequest> {
        if self.is_safe() {
            Ok(self.minefield)
        } else {
            log::debug!(
                "Attempt {} put a bomb under {:?}, retrying",
                self.request.attempt,
                self.request.target
            );
            Err(self.request.retry())
        }
    }
}
