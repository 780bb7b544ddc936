use tracing::debug;

pub const CORRECT_GUESS_POINTS: i32 = 2;
pub const WIN_BONUS: i32 = 10;
pub const LOSS_POINTS: i32 = 0;
pub const HINT_PENALTY: i32 = 2;

/// Receiver of score deltas outside the engine, e.g. the player's stored
/// record. Called once per scoring event.
pub trait ScoreSink: Send {
    fn add_score(&mut self, points: i32);
}

impl<F> ScoreSink for F
where
    F: FnMut(i32) + Send,
{
    fn add_score(&mut self, points: i32) {
        self(points)
    }
}

/// Sink used when no persistence collaborator is attached.
pub struct NoopScoreSink;

impl ScoreSink for NoopScoreSink {
    fn add_score(&mut self, _points: i32) {}
}

/// Counters that survive restarts within one mount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub total_points: i32,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
}

pub struct ScoreLedger {
    score: i32,
    stats: SessionStats,
    sink: Box<dyn ScoreSink>,
}

impl ScoreLedger {
    pub fn new(sink: Box<dyn ScoreSink>) -> Self {
        Self {
            score: 0,
            stats: SessionStats::default(),
            sink,
        }
    }

    pub fn without_sink() -> Self {
        Self::new(Box::new(NoopScoreSink))
    }

    /// Add `points` to the session score and the cumulative total, and
    /// forward the same delta to the sink.
    pub fn apply_delta(&mut self, points: i32) {
        self.score += points;
        self.stats.total_points += points;
        debug!(points, score = self.score, "Score delta applied");
        self.sink.add_score(points);
    }

    /// Count a finished game and apply its bonus. Returns the delta applied.
    pub fn record_outcome(&mut self, won: bool) -> i32 {
        self.stats.games_played += 1;
        let delta = if won {
            self.stats.wins += 1;
            WIN_BONUS
        } else {
            self.stats.losses += 1;
            LOSS_POINTS
        };
        self.apply_delta(delta);
        delta
    }

    /// Zero the session score; cumulative counters are kept.
    pub fn reset_session(&mut self) {
        self.score = 0;
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }
}

impl std::fmt::Debug for ScoreLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreLedger")
            .field("score", &self.score)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
