//! Pomodoro focus timer as an explicit state machine.
//!
//! The machine is advanced one second at a time by [`Pomodoro::tick`]; the
//! periodic scheduler lives outside (the CLI drives it from a tokio
//! interval, tests call `tick` in a loop). Nothing here is persisted across
//! a process restart.

use serde::{Deserialize, Serialize};

/// The two alternating phases of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Focus,
    Break,
}

/// Configured phase durations in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroSettings {
    pub focus_minutes: u32,
    pub break_minutes: u32,
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            focus_minutes: 25,
            break_minutes: 5,
        }
    }
}

impl PomodoroSettings {
    fn duration_secs(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Focus => self.focus_minutes * 60,
            Phase::Break => self.break_minutes * 60,
        }
    }
}

/// Emitted by [`Pomodoro::tick`] when a phase runs to completion. The
/// focus-complete event is the one-way notification hook: the caller may log
/// the finished session as a study entry, or ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// A focus phase finished; carries its configured length.
    FocusCompleted { minutes: u32 },
    /// A break finished; the next focus phase has started.
    BreakCompleted,
}

/// The timer state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pomodoro {
    phase: Phase,
    remaining_secs: u32,
    running: bool,
    completed_sessions: u32,
    settings: PomodoroSettings,
}

impl Pomodoro {
    pub fn new(settings: PomodoroSettings) -> Self {
        Self {
            phase: Phase::Focus,
            remaining_secs: settings.duration_secs(Phase::Focus),
            running: false,
            completed_sessions: 0,
            settings,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Focus phases completed since construction. Resets do not clear it.
    pub fn completed_sessions(&self) -> u32 {
        self.completed_sessions
    }

    pub fn settings(&self) -> PomodoroSettings {
        self.settings
    }

    /// Start the countdown. No effect on phase or counter.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Pause the countdown. No effect on phase or counter.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Stop, return to Focus, and restore the full focus duration. The
    /// session counter keeps its value.
    pub fn reset(&mut self) {
        self.running = false;
        self.phase = Phase::Focus;
        self.remaining_secs = self.settings.duration_secs(Phase::Focus);
    }

    /// Replace the configured durations and reset immediately.
    pub fn update_settings(&mut self, settings: PomodoroSettings) {
        self.settings = settings;
        self.reset();
    }

    /// Advance the machine by one second of wall-clock time.
    ///
    /// Does nothing while paused. When the counter reaches zero the phase
    /// flips, the counter is reloaded with the new phase's duration, and the
    /// corresponding [`TickEvent`] is returned.
    pub fn tick(&mut self) -> Option<TickEvent> {
        if !self.running || self.remaining_secs == 0 {
            return None;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs > 0 {
            return None;
        }
        match self.phase {
            Phase::Focus => {
                self.completed_sessions += 1;
                self.phase = Phase::Break;
                self.remaining_secs = self.settings.duration_secs(Phase::Break);
                Some(TickEvent::FocusCompleted {
                    minutes: self.settings.focus_minutes,
                })
            }
            Phase::Break => {
                self.phase = Phase::Focus;
                self.remaining_secs = self.settings.duration_secs(Phase::Focus);
                Some(TickEvent::BreakCompleted)
            }
        }
    }
}

impl Default for Pomodoro {
    fn default() -> Self {
        Self::new(PomodoroSettings::default())
    }
}
