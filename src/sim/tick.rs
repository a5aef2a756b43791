//! Fixed-interval simulation step
//!
//! One call advances a running session by exactly one cell.

use rand_pcg::Pcg32;

use super::grid::Grid;
use super::intent::{Direction, commit};
use super::spawner::spawn_apple;
use super::state::{Board, GameEvent, GameSession, OverReason, SessionState};

/// Input consumed by a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Pending direction taken from the intent slot
    pub direction: Option<Direction>,
}

/// Result of moving the board one cell
enum Step {
    Stationary,
    Moved,
    Ate,
    /// Apple eaten and no free cell remains
    Filled,
    Crashed(OverReason),
}

/// Advance the session by one step; no-op unless Running
pub fn tick(session: &mut GameSession, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if session.state() != SessionState::Running {
        return events;
    }

    let step = match session.board.as_mut() {
        Some(board) => {
            board.velocity = commit(board.velocity, input.direction);
            advance(board, &session.grid, &mut session.rng)
        }
        None => return events,
    };

    match step {
        Step::Stationary => return events,
        Step::Moved => {}
        Step::Ate => {
            let score = session.add_score();
            events.push(GameEvent::AppleEaten { score });
        }
        Step::Filled => {
            let score = session.add_score();
            events.push(GameEvent::AppleEaten { score });
            session.end_run(OverReason::BoardFull);
            events.push(GameEvent::GameOver(OverReason::BoardFull));
        }
        Step::Crashed(reason) => {
            session.end_run(reason);
            events.push(GameEvent::GameOver(reason));
        }
    }
    session.time_ticks += 1;

    events
}

fn advance(board: &mut Board, grid: &Grid, rng: &mut Pcg32) -> Step {
    // Nothing moves until the first direction is committed
    if board.velocity.is_still() {
        return Step::Stationary;
    }

    let next = board.snake.head().offset(board.velocity);
    if !grid.contains(next) {
        return Step::Crashed(OverReason::WallCollision);
    }
    if board.snake.would_collide(next) {
        return Step::Crashed(OverReason::SelfCollision);
    }

    board.snake.push_head(next);

    let ate = board.apple == Some(next);
    if ate {
        board.snake.grow();
        board.apple = spawn_apple(grid, &board.snake, rng);
    }

    board.snake.settle();

    match (ate, board.apple) {
        (false, _) => Step::Moved,
        (true, Some(_)) => Step::Ate,
        (true, None) => Step::Filled,
    }
}
