//! Tick engine
//!
//! Owns the one authoritative [`GameSession`], the shared intent slot and the
//! render sink. The host owns the actual recurring timer; the engine hands out
//! a [`TimerHandle`] when a timer should exist and tells the host which one to
//! cancel on teardown. Timer callbacks carrying a stale handle are ignored, so
//! a tick that fires after teardown can't touch discarded state.

use std::sync::Arc;

use crate::input::InputEvent;
use crate::renderer::RenderSink;
use crate::sim::{GameEvent, GameSession, IntentSlot, SessionState, TickInput, tick};

/// Identity of one recurring timer the host should run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    pub id: u64,
    pub interval_ms: u32,
}

/// Drives a session from timer callbacks and input events
pub struct TickEngine<R: RenderSink> {
    session: GameSession,
    intents: Arc<IntentSlot>,
    renderer: R,
    timer: Option<TimerHandle>,
    next_timer_id: u64,
    /// Input listeners attached (false after teardown)
    listening: bool,
}

impl<R: RenderSink> TickEngine<R> {
    pub fn new(session: GameSession, renderer: R) -> Self {
        Self {
            session,
            intents: Arc::new(IntentSlot::new()),
            renderer,
            timer: None,
            next_timer_id: 1,
            listening: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Currently armed timer
    pub fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Start a run; returns the timer the host must schedule
    pub fn start(&mut self) -> Option<TimerHandle> {
        if !self.session.start() {
            return None;
        }
        Some(self.begin())
    }

    /// Restart after game over; returns the timer the host must schedule
    pub fn retry(&mut self) -> Option<TimerHandle> {
        if !self.session.retry() {
            return None;
        }
        Some(self.begin())
    }

    /// Pausing keeps the timer alive; ticks just stop stepping
    pub fn toggle_pause(&mut self) -> bool {
        self.session.toggle_pause()
    }

    /// Interval for the next run; refused once a run exists
    pub fn set_speed(&mut self, speed_ms: u32) -> bool {
        self.session.set_default_speed(speed_ms)
    }

    /// Back to the menu; returns the timer the host must cancel
    pub fn return_to_menu(&mut self) -> Option<TimerHandle> {
        self.session.return_to_menu();
        self.teardown()
    }

    /// Drop the timer and detach input; safe to call repeatedly
    pub fn teardown(&mut self) -> Option<TimerHandle> {
        self.listening = false;
        self.intents.clear();
        let cancelled = self.timer.take();
        if let Some(handle) = cancelled {
            log::debug!("Timer {} cancelled", handle.id);
        }
        cancelled
    }

    fn begin(&mut self) -> TimerHandle {
        self.intents.clear();
        self.listening = true;

        let handle = TimerHandle {
            id: self.next_timer_id,
            interval_ms: self.session.speed_ms(),
        };
        self.next_timer_id += 1;
        if let Some(old) = self.timer.replace(handle) {
            log::debug!("Timer {} replaced by {}", old.id, handle.id);
        }

        self.publish();
        handle
    }

    /// Route a normalized input event
    pub fn handle_input(&mut self, event: InputEvent) {
        if !self.listening {
            log::debug!("Input {:?} after teardown ignored", event);
            return;
        }
        match event.direction() {
            Some(dir) if self.session.state() == SessionState::Running => self.intents.write(dir),
            Some(dir) => log::debug!("Direction {:?} ignored in {:?}", dir, self.session.state()),
            None => {
                self.toggle_pause();
            }
        }
    }

    /// Timer callback: one step if the handle is current and the run is live
    pub fn on_timer(&mut self, handle: TimerHandle) -> Vec<GameEvent> {
        if self.timer != Some(handle) {
            log::debug!("Stray tick from timer {} ignored", handle.id);
            return Vec::new();
        }
        if self.session.state() != SessionState::Running {
            return Vec::new();
        }

        let input = TickInput {
            direction: self.intents.take(),
        };
        let events = tick(&mut self.session, &input);
        self.publish();
        events
    }

    /// Redraw the current board, if any
    pub fn publish(&mut self) {
        if let Some(snapshot) = self.session.snapshot() {
            self.renderer.draw(&snapshot);
        }
    }
}
