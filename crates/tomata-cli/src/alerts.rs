//! Desktop notification and sound dispatch.
//!
//! Fire-and-forget: a missing notification daemon or audio device logs a
//! warning and the cycle keeps running.

use std::time::Duration;

use notify_rust::Notification;
use rodio::source::{SineWave, Source};
use rodio::{OutputStream, Sink};
use tracing::warn;

use tomata_core::{Alerts, SegmentKind};

pub struct DesktopAlerts {
    notifications: bool,
    sound: bool,
}

impl DesktopAlerts {
    pub fn new(notifications: bool, sound: bool) -> Self {
        Self {
            notifications,
            sound,
        }
    }
}

impl Alerts for DesktopAlerts {
    fn segment_complete(&self, kind: SegmentKind) {
        if self.notifications {
            let (summary, body) = match kind {
                SegmentKind::Work => ("Work segment complete", "Time for a break."),
                SegmentKind::ShortBreak => ("Break over", "Back to work?"),
                SegmentKind::LongBreak => ("Long break over", "Back to work?"),
            };
            if let Err(err) = Notification::new()
                .appname("tomata")
                .summary(summary)
                .body(body)
                .show()
            {
                warn!(error = %err, "desktop notification failed");
            }
        }
        if self.sound {
            if let Err(err) = beep() {
                warn!(error = %err, "alert sound failed");
            }
        }
    }
}

fn beep() -> Result<(), Box<dyn std::error::Error>> {
    let (_stream, handle) = OutputStream::try_default()?;
    let sink = Sink::try_new(&handle)?;
    sink.append(
        SineWave::new(880.0)
            .take_duration(Duration::from_millis(350))
            .amplify(0.20),
    );
    sink.sleep_until_end();
    Ok(())
}
