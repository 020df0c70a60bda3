//! # Tomata Core Library
//!
//! Core business logic for tomata, a terminal work/break interval timer
//! with tagged session history. The CLI binary is a thin layer over this
//! library: it parses flags, owns the terminal, and implements the
//! collaborator traits the cycle controller calls.
//!
//! ## Architecture
//!
//! - **Timer**: a blocking, wall-clock-based countdown plus the explicit
//!   work/break cycle state machine that drives it
//! - **Glyph**: declarative big-digit templates and the renderer that turns
//!   `MM:SS` strings into block-character frames
//! - **Storage**: SQLite-backed tag ledger and TOML configuration
//!
//! ## Key Components
//!
//! - [`CycleController`]: work/break/long-break state machine
//! - [`Countdown`]: cancellable second-resolution countdown
//! - [`TemplateStore`]: glyph theme loader with per-style caching
//! - [`TagLedger`]: per-tag completion counts with ranked summaries

pub mod error;
pub mod events;
pub mod glyph;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, LedgerError, RenderError, TemplateError};
pub use events::CycleEvent;
pub use glyph::{format_mmss, render, GlyphTemplate, Style, TemplateStore};
pub use storage::{Config, TagLedger, TagRecord};
pub use timer::{
    Alerts, BreakChoice, CancelToken, ContinueChoice, Countdown, CountdownStatus, CycleConfig,
    CycleController, CycleState, Prompt, Screen, SegmentKind,
};
