//! Host-facing frame wiring
//!
//! One `advance` call per rendered frame: elapsed wall-clock time (capped to
//! avoid the spiral of death) accumulates and drains in fixed-size physics
//! slices, each reading the latest smoothed gravity. Only after every slice
//! is consumed does gameplay logic observe the hero position — goal
//! collection first, then the countdown.

use glam::Vec3;

use super::goals::{Goal, GoalLifecycle};
use super::gravity::GravityMapper;
use super::physics::RigidBodySimulator;
use super::session::{GameEvent, GamePhase, Session};
use crate::consts::*;
use crate::highscores::HighScoreStore;
use crate::tuning::Tuning;

/// The whole gameplay core wired together, one instance per running game.
pub struct GameWorld {
    mapper: GravityMapper,
    physics: RigidBodySimulator,
    goals: GoalLifecycle,
    session: Session,
    accumulator: f32,
}

impl GameWorld {
    pub fn new(seed: u64, store: Box<dyn HighScoreStore>, tuning: Tuning) -> Self {
        let mut physics = RigidBodySimulator::new();
        physics.add_boundaries();
        physics.add_hero_body(HERO_START, HERO_RADIUS);

        let mut goals = GoalLifecycle::new(seed);
        goals.spawn_initial();

        log::info!("world created, seed {seed}");
        Self {
            mapper: GravityMapper::new(tuning.gravity_smoothing),
            physics,
            goals,
            session: Session::new(store),
            accumulator: 0.0,
        }
    }

    /// Feed a tilt (or drag-derived pseudo-tilt) sample into the gravity
    /// mapper. Degrees; beta forward/back, gamma left/right.
    pub fn tilt(&mut self, beta_deg: f32, gamma_deg: f32) {
        self.mapper.update(beta_deg, gamma_deg);
    }

    /// Advance one frame by `elapsed` seconds of wall-clock time.
    pub fn advance(&mut self, elapsed: f32) -> Vec<GameEvent> {
        let elapsed = elapsed.clamp(0.0, MAX_FRAME_TIME);

        self.accumulator += elapsed;
        while self.accumulator >= SIM_DT {
            let gravity = self.mapper.gravity_vector();
            self.physics.update(SIM_DT, gravity);
            self.accumulator -= SIM_DT;
        }

        let mut events = Vec::new();
        if self.session.phase() == GamePhase::Playing {
            // Hero position is read exactly once per frame, after all slices
            if let Some(hero) = self.physics.hero_position() {
                if let Some(goal_id) = self.goals.update(elapsed, hero) {
                    events.extend(self.session.on_goal_collected(goal_id));
                }
            }
        }
        events.extend(self.session.update(elapsed));
        events
    }

    /// Full reset, then start a run
    pub fn start(&mut self) -> Vec<GameEvent> {
        self.reset_gameplay();
        self.session.start_game()
    }

    /// Synchronous overwrite back to the Ready state
    pub fn reset(&mut self) -> Vec<GameEvent> {
        self.reset_gameplay();
        self.session.reset()
    }

    fn reset_gameplay(&mut self) {
        self.mapper.reset();
        self.physics.warp_hero(HERO_START);
        self.goals.reset_all();
        self.accumulator = 0.0;
    }

    // --- Read-only surface for the external renderer/HUD ---

    pub fn hero_position(&self) -> Vec3 {
        self.physics.hero_position().unwrap_or(HERO_START)
    }

    pub fn hero_rotation(&self) -> f32 {
        self.physics.hero_rotation().unwrap_or(0.0)
    }

    pub fn goals(&self) -> &[Goal] {
        self.goals.goals()
    }

    /// Animation clock for goal pulse/rotation effects
    pub fn goal_clock(&self) -> f32 {
        self.goals.clock()
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase()
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    pub fn goals_collected(&self) -> u32 {
        self.session.goals_collected()
    }

    pub fn time_remaining(&self) -> f32 {
        self.session.time_remaining()
    }

    pub fn high_score(&self) -> u32 {
        self.session.high_score()
    }

    /// Current smoothed-gravity target, for debug overlays
    pub fn gravity_target(&self) -> Vec3 {
        self.mapper.target()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryHighScore;

    fn world() -> GameWorld {
        GameWorld::new(11, Box::new(MemoryHighScore::default()), Tuning::default())
    }

    /// Park the hero on a goal by teleporting the physics body
    fn warp_onto_goal(w: &mut GameWorld) {
        let target = w.goals()[0].position;
        w.physics
            .warp_hero(Vec3::new(target.x, HERO_RADIUS, target.z));
    }

    #[test]
    fn slice_count_is_chunking_independent() {
        let mut a = world();
        let mut b = world();
        a.start();
        b.start();
        a.tilt(0.0, 45.0);
        b.tilt(0.0, 45.0);

        for _ in 0..8 {
            a.advance(SIM_DT);
        }
        for _ in 0..2 {
            b.advance(4.0 * SIM_DT);
        }

        let pa = a.hero_position();
        let pb = b.hero_position();
        assert!((pa - pb).length() < 1e-4, "{pa} vs {pb}");
    }

    #[test]
    fn lag_spike_is_capped() {
        let mut a = world();
        let mut b = world();
        a.start();
        b.start();
        a.tilt(0.0, 45.0);
        b.tilt(0.0, 45.0);

        // Ten-second stall must simulate no more than MAX_FRAME_TIME worth
        a.advance(10.0);
        b.advance(MAX_FRAME_TIME);

        let pa = a.hero_position();
        let pb = b.hero_position();
        assert!((pa - pb).length() < 1e-4);
        assert!(a.time_remaining() >= TIME_LIMIT_SECS - MAX_FRAME_TIME - 1e-4);
    }

    #[test]
    fn collection_flows_into_the_session() {
        let mut w = world();
        w.start();
        warp_onto_goal(&mut w);

        let events = w.advance(SIM_DT);
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::GoalCollected { .. })),
            "no collection in {events:?}"
        );
        assert_eq!(w.goals_collected(), 1);
        assert!(w.score() > 0);
        assert_eq!(w.goals().len(), 1);
    }

    #[test]
    fn full_run_wins_and_records_high_score() {
        let mut w = world();
        w.start();

        let mut saw_win = false;
        let mut saw_record = false;
        for _ in 0..GOALS_TO_WIN {
            warp_onto_goal(&mut w);
            for event in w.advance(SIM_DT) {
                match event {
                    GameEvent::PhaseChanged(GamePhase::Win) => saw_win = true,
                    GameEvent::NewHighScore(score) => {
                        saw_record = true;
                        assert_eq!(score, w.score());
                    }
                    _ => {}
                }
            }
        }

        assert!(saw_win);
        assert!(saw_record);
        assert_eq!(w.phase(), GamePhase::Win);
        assert_eq!(w.high_score(), w.score());

        // Terminal: further collections change nothing
        let final_score = w.score();
        warp_onto_goal(&mut w);
        assert!(w.advance(SIM_DT).is_empty());
        assert_eq!(w.score(), final_score);
    }

    #[test]
    fn countdown_runs_out_to_game_over() {
        let mut w = world();
        w.start();

        let mut last_remaining = w.time_remaining();
        let mut ended = false;
        for _ in 0..700 {
            let events = w.advance(MAX_FRAME_TIME);
            assert!(w.time_remaining() <= last_remaining, "timer went up");
            last_remaining = w.time_remaining();
            if events.contains(&GameEvent::PhaseChanged(GamePhase::GameOver)) {
                ended = true;
                break;
            }
        }
        assert!(ended);
        assert_eq!(w.time_remaining(), 0.0);
    }

    #[test]
    fn goals_are_inert_outside_playing() {
        let mut w = world();
        warp_onto_goal(&mut w);
        assert!(w.advance(SIM_DT).is_empty());
        assert_eq!(w.goals_collected(), 0);
    }

    #[test]
    fn reset_restores_ready_state() {
        let mut w = world();
        w.start();
        w.tilt(30.0, 30.0);
        for _ in 0..30 {
            w.advance(SIM_DT);
        }

        let events = w.reset();
        assert_eq!(events, vec![GameEvent::PhaseChanged(GamePhase::Ready)]);
        assert_eq!(w.phase(), GamePhase::Ready);
        assert_eq!(w.score(), 0);
        assert_eq!(w.time_remaining(), TIME_LIMIT_SECS);
        assert_eq!(w.hero_position(), HERO_START);
        assert_eq!(w.gravity_target(), Vec3::ZERO);
        assert_eq!(w.goals().len(), 1);
    }
}
