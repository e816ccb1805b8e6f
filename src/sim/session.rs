//! Run lifecycle: phases, countdown, and scoring
//!
//! Transitions are reported as explicit event values returned from each
//! operation instead of a stored observer callback, so the host loop (and
//! the tests) consume them synchronously.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::highscores::HighScoreStore;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, nothing running
    Ready,
    /// Active run
    Playing,
    /// Reserved; no current transition enters or leaves this state
    Paused,
    /// Run ended with all goals collected
    Win,
    /// Countdown expired
    GameOver,
}

/// Events produced by session operations, in the order they occurred
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Phase transition; never emitted for re-entering the same phase
    PhaseChanged(GamePhase),
    /// A goal was collected and scored
    GoalCollected { goal_id: u32, points: u32 },
    /// A winning run beat the persisted record
    NewHighScore(u32),
}

/// Owns score, countdown, goal-count progress, and the phase transitions.
pub struct Session {
    phase: GamePhase,
    score: u32,
    goals_collected: u32,
    time_remaining: f32,
    store: Box<dyn HighScoreStore>,
}

impl Session {
    pub fn new(store: Box<dyn HighScoreStore>) -> Self {
        Self {
            phase: GamePhase::Ready,
            score: 0,
            goals_collected: 0,
            time_remaining: TIME_LIMIT_SECS,
            store,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn goals_collected(&self) -> u32 {
        self.goals_collected
    }

    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    pub fn high_score(&self) -> u32 {
        self.store.load()
    }

    /// Full reset, then straight into a run
    pub fn start_game(&mut self) -> Vec<GameEvent> {
        let mut events = self.reset();
        events.extend(self.set_phase(GamePhase::Playing));
        log::info!("run started, {TIME_LIMIT_SECS}s on the clock");
        events
    }

    /// Advance the countdown. No-op unless playing; clamps at zero and ends
    /// the run when the clock runs out.
    pub fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        if self.phase != GamePhase::Playing {
            return Vec::new();
        }
        self.time_remaining = (self.time_remaining - dt).max(0.0);
        if self.time_remaining == 0.0 {
            log::info!("time expired at {} goals", self.goals_collected);
            return self.set_phase(GamePhase::GameOver);
        }
        Vec::new()
    }

    /// Score a collected goal. No-op unless playing. Awards
    /// `100 + floor(T×2)` points, and on the winning goal an extra
    /// `floor(T×10)` bonus before transitioning to Win.
    pub fn on_goal_collected(&mut self, goal_id: u32) -> Vec<GameEvent> {
        if self.phase != GamePhase::Playing {
            return Vec::new();
        }

        self.goals_collected += 1;
        let mut points = GOAL_BASE_POINTS + (self.time_remaining * TIME_POINTS_FACTOR) as u32;

        let won = self.goals_collected >= GOALS_TO_WIN;
        if won {
            points += (self.time_remaining * WIN_BONUS_FACTOR) as u32;
        }
        self.score += points;

        let mut events = vec![GameEvent::GoalCollected { goal_id, points }];
        if won {
            events.extend(self.set_phase(GamePhase::Win));
            if self.score > self.store.load() {
                log::info!("new high score: {}", self.score);
                self.store.save(self.score);
                events.push(GameEvent::NewHighScore(self.score));
            }
        }
        events
    }

    /// Return to Ready and zero all run bookkeeping. Idempotent.
    pub fn reset(&mut self) -> Vec<GameEvent> {
        self.score = 0;
        self.goals_collected = 0;
        self.time_remaining = TIME_LIMIT_SECS;
        self.set_phase(GamePhase::Ready)
    }

    /// Transition helper; silent when the phase does not actually change
    fn set_phase(&mut self, phase: GamePhase) -> Vec<GameEvent> {
        if self.phase == phase {
            return Vec::new();
        }
        self.phase = phase;
        vec![GameEvent::PhaseChanged(phase)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryHighScore;

    fn session() -> Session {
        Session::new(Box::new(MemoryHighScore::default()))
    }

    fn playing() -> Session {
        let mut s = session();
        s.start_game();
        s
    }

    #[test]
    fn starts_ready() {
        let s = session();
        assert_eq!(s.phase(), GamePhase::Ready);
        assert_eq!(s.score(), 0);
        assert_eq!(s.time_remaining(), TIME_LIMIT_SECS);
    }

    #[test]
    fn start_game_transitions_to_playing() {
        let mut s = session();
        let events = s.start_game();
        assert!(events.contains(&GameEvent::PhaseChanged(GamePhase::Playing)));
        assert_eq!(s.phase(), GamePhase::Playing);
    }

    #[test]
    fn score_formula_is_exact() {
        let mut s = playing();
        // Burn the clock down to a known value: 60 - 12.5 = 47.5s left
        s.update(12.5);
        let events = s.on_goal_collected(1);
        // 100 + floor(47.5 × 2) = 195
        assert_eq!(
            events[0],
            GameEvent::GoalCollected { goal_id: 1, points: 195 }
        );
        assert_eq!(s.score(), 195);
        assert_eq!(s.goals_collected(), 1);
    }

    #[test]
    fn tenth_goal_wins_with_bonus() {
        let mut s = playing();
        s.update(10.0); // 50s remaining
        for id in 1..=9 {
            s.on_goal_collected(id);
        }
        assert_eq!(s.phase(), GamePhase::Playing);
        let base_score = s.score();

        let events = s.on_goal_collected(10);
        // 100 + floor(50×2) + floor(50×10) = 700
        assert_eq!(
            events[0],
            GameEvent::GoalCollected { goal_id: 10, points: 700 }
        );
        assert!(events.contains(&GameEvent::PhaseChanged(GamePhase::Win)));
        assert_eq!(s.score(), base_score + 700);
        assert_eq!(s.phase(), GamePhase::Win);
    }

    #[test]
    fn win_publishes_high_score_once_beaten() {
        let mut s = Session::new(Box::new(MemoryHighScore::new(2_000)));
        s.start_game();
        for id in 1..=10 {
            s.on_goal_collected(id);
        }
        // 10 × (100 + 120) + 600 bonus = 2800 > 2000
        assert!(s.score() > 2_000);
        assert_eq!(s.high_score(), s.score());
    }

    #[test]
    fn losing_score_does_not_touch_the_record() {
        let mut s = Session::new(Box::new(MemoryHighScore::new(1_000_000)));
        s.start_game();
        for id in 1..=10 {
            s.on_goal_collected(id);
        }
        assert_eq!(s.phase(), GamePhase::Win);
        assert_eq!(s.high_score(), 1_000_000);
    }

    #[test]
    fn countdown_clamps_and_ends_the_run() {
        let mut s = playing();
        let events = s.update(59.0);
        assert!(events.is_empty());

        let events = s.update(5.0);
        assert_eq!(s.time_remaining(), 0.0);
        assert_eq!(events, vec![GameEvent::PhaseChanged(GamePhase::GameOver)]);
    }

    #[test]
    fn terminal_phases_ignore_updates() {
        let mut s = playing();
        s.update(TIME_LIMIT_SECS + 1.0);
        assert_eq!(s.phase(), GamePhase::GameOver);

        assert!(s.update(1.0).is_empty());
        assert!(s.on_goal_collected(99).is_empty());
        assert_eq!(s.score(), 0);
        assert_eq!(s.goals_collected(), 0);
    }

    #[test]
    fn collection_before_start_is_ignored() {
        let mut s = session();
        assert!(s.on_goal_collected(1).is_empty());
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn reset_is_idempotent_and_notifies_once() {
        let mut s = playing();
        s.update(3.0);
        s.on_goal_collected(1);

        let first = s.reset();
        assert_eq!(first, vec![GameEvent::PhaseChanged(GamePhase::Ready)]);
        let again = s.reset();
        assert!(again.is_empty(), "re-entering Ready must not re-notify");

        assert_eq!(s.score(), 0);
        assert_eq!(s.goals_collected(), 0);
        assert_eq!(s.time_remaining(), TIME_LIMIT_SECS);
        assert_eq!(s.phase(), GamePhase::Ready);
    }
}
