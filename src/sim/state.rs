//! Game session state machine
//!
//! A session owns every piece of mutable game data. Hosts drive it through
//! the four commands (`start`, `toggle_pause`, `retry`, `return_to_menu`)
//! and the tick engine advances it one step at a time.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Grid, Velocity};
use super::snake::Snake;
use super::spawner::spawn_apple;
use crate::consts::*;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Menu shown, no game data
    Idle,
    /// Ticks advance the snake
    Running,
    /// Ticks are ignored until resumed
    Paused,
    /// Run ended; final board and score kept for display
    Over,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverReason {
    WallCollision,
    SelfCollision,
    /// Snake covers every cell, nowhere left for an apple
    BoardFull,
}

/// Things that happened during a step (for HUD and logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    AppleEaten { score: u64 },
    GameOver(OverReason),
}

/// Immutable view handed to the render adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub grid_size: u32,
    /// Head first
    pub snake: Vec<Cell>,
    /// Absent only once the board is full
    pub apple: Option<Cell>,
}

/// RNG state wrapper for reproducibility
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Per-run board data, dropped when returning to the menu
#[derive(Debug, Clone)]
pub(crate) struct Board {
    pub(crate) snake: Snake,
    pub(crate) apple: Option<Cell>,
    pub(crate) velocity: Velocity,
}

/// The authoritative game session
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(crate) grid: Grid,
    rng_state: RngState,
    pub(crate) rng: Pcg32,
    state: SessionState,
    over_reason: Option<OverReason>,
    score: u64,
    /// Tick interval for the current run (ms)
    speed_ms: u32,
    /// Interval a fresh run starts with (ms)
    default_speed_ms: u32,
    pub(crate) board: Option<Board>,
    /// Completed steps in the current run
    pub(crate) time_ticks: u64,
}

impl GameSession {
    /// Create an idle session
    pub fn new(grid_size: u32, speed_ms: u32, seed: u64) -> Self {
        let rng_state = RngState::new(seed);
        Self {
            grid: Grid::new(grid_size),
            rng: rng_state.to_rng(),
            rng_state,
            state: SessionState::Idle,
            over_reason: None,
            score: 0,
            speed_ms,
            default_speed_ms: speed_ms,
            board: None,
            time_ticks: 0,
        }
    }

    /// Idle -> Running
    pub fn start(&mut self) -> bool {
        if self.state != SessionState::Idle {
            log::debug!("start() ignored in {:?}", self.state);
            return false;
        }
        self.begin_run();
        true
    }

    /// Over -> Running, same reset as `start`
    pub fn retry(&mut self) -> bool {
        if self.state != SessionState::Over {
            log::debug!("retry() ignored in {:?}", self.state);
            return false;
        }
        self.begin_run();
        true
    }

    /// Running <-> Paused; no-op elsewhere
    pub fn toggle_pause(&mut self) -> bool {
        self.state = match self.state {
            SessionState::Running => SessionState::Paused,
            SessionState::Paused => SessionState::Running,
            other => {
                log::debug!("toggle_pause() ignored in {:?}", other);
                return false;
            }
        };
        log::info!("Session {:?}", self.state);
        true
    }

    /// Any active or finished run -> Idle, discarding board data
    pub fn return_to_menu(&mut self) -> bool {
        if self.state == SessionState::Idle {
            return false;
        }
        self.state = SessionState::Idle;
        self.over_reason = None;
        self.board = None;
        self.score = 0;
        self.time_ticks = 0;
        log::info!("Returned to menu");
        true
    }

    fn begin_run(&mut self) {
        let snake = Snake::new(self.grid.center());
        let apple = spawn_apple(&self.grid, &snake, &mut self.rng);
        self.board = Some(Board {
            snake,
            apple,
            velocity: Velocity::STILL,
        });
        self.score = 0;
        self.speed_ms = self.default_speed_ms;
        self.over_reason = None;
        self.time_ticks = 0;
        self.state = SessionState::Running;
        log::info!(
            "Run started (seed {}, {} ms/tick, apple at {:?})",
            self.rng_state.seed,
            self.speed_ms,
            apple
        );
        if apple.is_none() {
            self.end_run(OverReason::BoardFull);
        }
    }

    /// Change the interval future runs start with; only from the menu
    pub fn set_default_speed(&mut self, speed_ms: u32) -> bool {
        if self.state != SessionState::Idle {
            log::debug!("Speed change ignored in {:?}", self.state);
            return false;
        }
        self.default_speed_ms = speed_ms;
        self.speed_ms = speed_ms;
        log::info!("Speed set to {} ms/tick", speed_ms);
        true
    }

    /// Transition to Over, keeping the final board
    pub(crate) fn end_run(&mut self, reason: OverReason) {
        self.state = SessionState::Over;
        self.over_reason = Some(reason);
        log::info!("Game over: {:?} (score {})", reason, self.score);
    }

    pub(crate) fn add_score(&mut self) -> u64 {
        self.score += APPLE_SCORE;
        self.score
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn over_reason(&self) -> Option<OverReason> {
        self.over_reason
    }

    /// True once a run ended because the snake filled the board
    pub fn board_full(&self) -> bool {
        self.over_reason == Some(OverReason::BoardFull)
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn speed_ms(&self) -> u32 {
        self.speed_ms
    }

    /// Speed shown on the HUD, out of 10
    pub fn speed_display(&self) -> u32 {
        speed_display(self.speed_ms)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Committed velocity (STILL while idle)
    pub fn velocity(&self) -> Velocity {
        self.board.as_ref().map(|b| b.velocity).unwrap_or_default()
    }

    pub fn snake(&self) -> Option<&Snake> {
        self.board.as_ref().map(|b| &b.snake)
    }

    pub fn apple(&self) -> Option<Cell> {
        self.board.as_ref().and_then(|b| b.apple)
    }

    /// Read-only view for the renderer; `None` while idle
    pub fn snapshot(&self) -> Option<BoardSnapshot> {
        self.board.as_ref().map(|b| BoardSnapshot {
            grid_size: self.grid.size(),
            snake: b.snake.cells().collect(),
            apple: b.apple,
        })
    }

    /// Replace the board of a running session (tests only)
    #[cfg(test)]
    pub(crate) fn set_board(&mut self, snake: Snake, apple: Option<Cell>, velocity: Velocity) {
        self.board = Some(Board {
            snake,
            apple,
            velocity,
        });
    }
}

/// Map a tick interval to the 0-10 HUD speed value
pub fn speed_display(speed_ms: u32) -> u32 {
    let value = (SPEED_DISPLAY_BASE_MS as f32 - speed_ms as f32) / SPEED_DISPLAY_STEP_MS as f32;
    value.round().clamp(0.0, 10.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(GRID_SIZE, DEFAULT_TICK_MS, 12345)
    }

    #[test]
    fn test_start_fresh_session() {
        let mut s = session();
        assert_eq!(s.state(), SessionState::Idle);
        assert!(s.snapshot().is_none());

        assert!(s.start());
        assert_eq!(s.state(), SessionState::Running);
        assert_eq!(s.score(), 0);
        assert_eq!(s.velocity(), Velocity::STILL);

        let snap = s.snapshot().unwrap();
        assert_eq!(snap.snake, vec![Cell::new(10, 10)]);
        let apple = snap.apple.unwrap();
        assert_ne!(apple, Cell::new(10, 10));
        assert!(s.grid().contains(apple));
    }

    #[test]
    fn test_seed_is_reported() {
        let mut s = session();
        assert_eq!(s.seed(), 12345);
        s.start();
        s.return_to_menu();
        assert_eq!(s.seed(), 12345);
    }

    #[test]
    fn test_illegal_transitions_are_noops() {
        let mut s = session();
        assert!(!s.toggle_pause());
        assert!(!s.retry());
        assert!(!s.return_to_menu());
        assert_eq!(s.state(), SessionState::Idle);

        s.start();
        assert!(!s.start());
        assert!(!s.retry());
        assert_eq!(s.state(), SessionState::Running);
    }

    #[test]
    fn test_double_pause_toggle_is_identity() {
        let mut s = session();
        s.start();
        let before = s.snapshot();
        let score = s.score();

        s.toggle_pause();
        assert_eq!(s.state(), SessionState::Paused);
        s.toggle_pause();
        assert_eq!(s.state(), SessionState::Running);
        assert_eq!(s.snapshot(), before);
        assert_eq!(s.score(), score);
    }

    #[test]
    fn test_retry_resets_run() {
        let mut s = session();
        s.start();
        s.add_score();
        s.end_run(OverReason::WallCollision);
        assert_eq!(s.state(), SessionState::Over);
        assert_eq!(s.score(), APPLE_SCORE);
        assert!(s.snapshot().is_some());

        assert!(s.retry());
        assert_eq!(s.state(), SessionState::Running);
        assert_eq!(s.score(), 0);
        assert_eq!(s.over_reason(), None);
        assert_eq!(s.snapshot().unwrap().snake.len(), 1);
    }

    #[test]
    fn test_return_to_menu_discards_board() {
        let mut s = session();
        s.start();
        s.toggle_pause();
        assert!(s.return_to_menu());
        assert_eq!(s.state(), SessionState::Idle);
        assert!(s.snapshot().is_none());
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_speed_change_only_from_menu() {
        let mut s = session();
        assert!(s.set_default_speed(110));
        s.start();
        assert_eq!(s.speed_ms(), 110);
        assert_eq!(s.speed_display(), 6);

        assert!(!s.set_default_speed(200));
        assert_eq!(s.speed_ms(), 110);

        s.return_to_menu();
        assert!(s.set_default_speed(200));
        s.start();
        assert_eq!(s.speed_ms(), 200);
    }

    #[test]
    fn test_speed_display() {
        assert_eq!(speed_display(150), 3);
        assert_eq!(speed_display(200), 0);
        assert_eq!(speed_display(50), 10);
        assert_eq!(speed_display(500), 0);
    }
}
