mod countdown;
mod cycle;

pub use countdown::{CancelToken, Countdown, CountdownStatus};
pub use cycle::{
    Alerts, BreakChoice, ContinueChoice, CycleConfig, CycleController, CycleState, Prompt, Screen,
    SegmentKind,
};
