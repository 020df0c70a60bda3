//! Work/break cycle state machine.
//!
//! ```text
//! WorkRunning -> BreakDecision -> BreakRunning -> ContinueDecision -> WorkRunning
//!                     |                                  |
//!                     v                                  v
//!                   Exited                             Exited
//! ```
//!
//! The controller owns the session (tag + consecutive-completion counter)
//! and drives the countdown; everything side-effecting reaches it through
//! the [`Prompt`], [`Screen`] and [`Alerts`] collaborator traits.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, CoreError};
use crate::events::CycleEvent;
use crate::glyph::{format_mmss, render, GlyphTemplate};
use crate::storage::TagLedger;

use super::countdown::{Countdown, CountdownStatus};

/// Work segments before a long break; the counter resets when one is taken.
const WORK_SEGMENTS_PER_LONG_BREAK: u32 = 4;

const SHORT_BREAK_RATIO: f64 = 0.2;
const LONG_BREAK_RATIO: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleState {
    WorkRunning,
    BreakDecision,
    BreakRunning,
    ContinueDecision,
    Exited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Work,
    ShortBreak,
    LongBreak,
}

impl SegmentKind {
    pub fn label(self) -> &'static str {
        match self {
            SegmentKind::Work => "Work",
            SegmentKind::ShortBreak => "Break",
            SegmentKind::LongBreak => "Long break",
        }
    }
}

/// User decision after a work segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakChoice {
    Break,
    Exit,
}

/// User decision after a break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinueChoice {
    Work,
    Exit,
}

/// Blocking one-of-N decision point. The controller calls these
/// synchronously and waits for the answer.
pub trait Prompt {
    fn break_or_exit(&mut self) -> Result<BreakChoice, CoreError>;
    fn work_or_exit(&mut self) -> Result<ContinueChoice, CoreError>;
    /// Ask for the next session's tag; `current` is offered as the default.
    fn next_tag(&mut self, current: &str) -> Result<String, CoreError>;
}

/// Sink for rendered countdown frames.
pub trait Screen {
    fn segment_started(&mut self, kind: SegmentKind, tag: &str) -> Result<(), CoreError>;
    fn draw(&mut self, frame: &[String]) -> Result<(), CoreError>;
    fn segment_finished(&mut self) -> Result<(), CoreError>;
}

/// Fire-and-forget notification/sound dispatch. Implementations swallow
/// their own failures; a missing notification daemon must never stop the
/// cycle.
pub trait Alerts {
    fn segment_complete(&self, kind: SegmentKind);
}

/// Timing configuration, passed in at construction.
///
/// Break lengths derive from the work duration: 20% for a short break, 60%
/// for a long one.
#[derive(Debug, Clone, Copy)]
pub struct CycleConfig {
    work: Duration,
}

impl CycleConfig {
    pub fn new(work: Duration) -> Result<Self, ConfigError> {
        if work.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "work".into(),
                message: "work duration must be positive".into(),
            });
        }
        Ok(Self { work })
    }

    pub fn from_minutes(minutes: f64) -> Result<Self, ConfigError> {
        if !minutes.is_finite() || minutes <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "timer.work_minutes".into(),
                message: format!("{minutes} is not a positive number of minutes"),
            });
        }
        Ok(Self {
            work: Duration::from_secs_f64(minutes * 60.0),
        })
    }

    pub fn work(&self) -> Duration {
        self.work
    }

    pub fn short_break(&self) -> Duration {
        self.work.mul_f64(SHORT_BREAK_RATIO)
    }

    pub fn long_break(&self) -> Duration {
        self.work.mul_f64(LONG_BREAK_RATIO)
    }
}

/// Drives one full work/break cycle until the user exits.
pub struct CycleController<'a> {
    config: CycleConfig,
    countdown: Countdown,
    template: &'a GlyphTemplate,
    ledger: &'a mut TagLedger,
    prompt: &'a mut dyn Prompt,
    screen: &'a mut dyn Screen,
    alerts: &'a dyn Alerts,
    tag: String,
    work_count: u32,
    state: CycleState,
    pending_break: Option<SegmentKind>,
    events: Vec<CycleEvent>,
}

impl<'a> CycleController<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: CycleConfig,
        countdown: Countdown,
        template: &'a GlyphTemplate,
        ledger: &'a mut TagLedger,
        prompt: &'a mut dyn Prompt,
        screen: &'a mut dyn Screen,
        alerts: &'a dyn Alerts,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            config,
            countdown,
            template,
            ledger,
            prompt,
            screen,
            alerts,
            tag: tag.into(),
            work_count: 0,
            state: CycleState::WorkRunning,
            pending_break: None,
            events: Vec::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> CycleState {
        self.state
    }

    pub fn work_count(&self) -> u32 {
        self.work_count
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn events(&self) -> &[CycleEvent] {
        &self.events
    }

    // ── Driving ──────────────────────────────────────────────────────

    /// Run the state machine to the `Exited` state.
    pub fn run(&mut self) -> Result<(), CoreError> {
        while self.state != CycleState::Exited {
            match self.state {
                CycleState::WorkRunning => self.work_segment()?,
                CycleState::BreakDecision => self.break_decision()?,
                CycleState::BreakRunning => self.break_segment()?,
                CycleState::ContinueDecision => self.continue_decision()?,
                CycleState::Exited => {}
            }
        }
        self.record(CycleEvent::Exited { at: Utc::now() });
        Ok(())
    }

    fn work_segment(&mut self) -> Result<(), CoreError> {
        let duration = self.config.work();
        self.screen.segment_started(SegmentKind::Work, &self.tag)?;
        self.record(CycleEvent::WorkStarted {
            tag: self.tag.clone(),
            duration_ms: duration.as_millis() as u64,
            at: Utc::now(),
        });
        let status = self.run_countdown(duration)?;
        self.screen.segment_finished()?;
        match status {
            CountdownStatus::Completed => {
                self.work_count += 1;
                if !self.tag.trim().is_empty() {
                    if let Err(err) = self.ledger.increment(&self.tag) {
                        warn!(error = %err, tag = %self.tag, "tag ledger update failed; cycle continues");
                    }
                }
                self.alerts.segment_complete(SegmentKind::Work);
                self.record(CycleEvent::WorkCompleted {
                    tag: self.tag.clone(),
                    work_count: self.work_count,
                    at: Utc::now(),
                });
            }
            CountdownStatus::Aborted => {
                self.record(CycleEvent::WorkAborted {
                    tag: self.tag.clone(),
                    at: Utc::now(),
                });
            }
        }
        self.state = CycleState::BreakDecision;
        Ok(())
    }

    fn break_decision(&mut self) -> Result<(), CoreError> {
        match self.prompt.break_or_exit()? {
            BreakChoice::Exit => self.state = CycleState::Exited,
            BreakChoice::Break => {
                let kind = if self.work_count < WORK_SEGMENTS_PER_LONG_BREAK {
                    SegmentKind::ShortBreak
                } else {
                    self.work_count = 0;
                    SegmentKind::LongBreak
                };
                self.pending_break = Some(kind);
                self.state = CycleState::BreakRunning;
            }
        }
        Ok(())
    }

    fn break_segment(&mut self) -> Result<(), CoreError> {
        let kind = self.pending_break.take().unwrap_or(SegmentKind::ShortBreak);
        let duration = self.break_duration(kind);
        self.screen.segment_started(kind, &self.tag)?;
        self.record(CycleEvent::BreakStarted {
            kind,
            duration_ms: duration.as_millis() as u64,
            at: Utc::now(),
        });
        let status = self.run_countdown(duration)?;
        self.screen.segment_finished()?;
        if status == CountdownStatus::Completed {
            self.alerts.segment_complete(kind);
        }
        self.record(CycleEvent::BreakFinished {
            kind,
            aborted: status == CountdownStatus::Aborted,
            at: Utc::now(),
        });
        self.state = CycleState::ContinueDecision;
        Ok(())
    }

    fn continue_decision(&mut self) -> Result<(), CoreError> {
        match self.prompt.work_or_exit()? {
            ContinueChoice::Exit => self.state = CycleState::Exited,
            ContinueChoice::Work => {
                self.tag = self.prompt.next_tag(&self.tag)?.trim().to_string();
                self.state = CycleState::WorkRunning;
            }
        }
        Ok(())
    }

    fn break_duration(&self, kind: SegmentKind) -> Duration {
        match kind {
            SegmentKind::ShortBreak => self.config.short_break(),
            SegmentKind::LongBreak => self.config.long_break(),
            SegmentKind::Work => self.config.work(),
        }
    }

    fn run_countdown(&mut self, duration: Duration) -> Result<CountdownStatus, CoreError> {
        self.countdown.cancel_token().reset();
        let countdown = &self.countdown;
        let template = self.template;
        let screen = &mut *self.screen;
        countdown.run(duration, |remaining| {
            let frame = render(&format_mmss(remaining), template)?;
            screen.draw(&frame)
        })
    }

    fn record(&mut self, event: CycleEvent) {
        debug!(?event, "cycle event");
        self.events.push(event);
    }
}
