/// Counters carried across generations.
///
/// The caller owns the session and lends it to each [`Generation`] run; it
/// tracks which generation is being evaluated and the best score any
/// generation has reached so far.
///
/// [`Generation`]: crate::Generation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    generation: u32,
    best_score: u32,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the current generation, starting at 1 once the first
    /// generation has begun. 0 before any generation.
    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Highest score reached by any generation of this session.
    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Advances to the next generation index.
    pub fn begin_generation(&mut self) -> u32 {
        self.generation += 1;
        self.generation
    }

    /// Records the running score of the current generation.
    ///
    /// The best score never decreases.
    pub fn record_score(&mut self, score: u32) {
        if score > self.best_score {
            self.best_score = score;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_counter() {
        let mut session = Session::new();
        assert_eq!(session.generation(), 0);
        assert_eq!(session.begin_generation(), 1);
        assert_eq!(session.begin_generation(), 2);
        assert_eq!(session.generation(), 2);
    }

    #[test]
    fn test_best_score_is_non_decreasing() {
        let mut session = Session::new();
        let mut prev = 0;
        for score in [0, 3, 1, 7, 7, 2, 0, 8] {
            session.record_score(score);
            assert!(session.best_score() >= prev);
            assert!(session.best_score() >= score);
            prev = session.best_score();
        }
        assert_eq!(session.best_score(), 8);
    }
}
