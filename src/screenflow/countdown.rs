use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::screenflow::models::TextStyle;
use crate::screenflow::window::{Clock, Surface};

/// Defaults for both countdown variants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CountdownSettings {
    pub start: u32,
    pub interval_secs: f64,
    pub duration_secs: f64,
}

impl Default for CountdownSettings {
    fn default() -> Self {
        CountdownSettings {
            start: 3,
            interval_secs: 1.0,
            duration_secs: 3.0,
        }
    }
}

fn countdown_text(seconds: u64) -> String {
    format!("Task will begin in {} s", seconds)
}

/// Counts down from `start` to 1, one number per `interval`.
///
/// Blocks for about `start * interval`.
pub fn show_static_countdown<W: Surface, C: Clock>(
    win: &mut W,
    clock: &C,
    start: u32,
    interval: Duration,
    style: &TextStyle,
) -> Result<()> {
    debug!(start, ?interval, "Static countdown");
    for i in (1..=start).rev() {
        win.draw_text(&countdown_text(u64::from(i)), style)?;
        win.flip()?;
        clock.sleep(interval);
    }
    Ok(())
}

/// Redraws the remaining time every frame until `duration` has elapsed.
///
/// Shows `floor(remaining) + 1`, so the last second reads "1 s" and never
/// "0 s". The number of frames depends on how fast `flip` returns.
pub fn show_realtime_countdown<W: Surface, C: Clock>(
    win: &mut W,
    clock: &C,
    duration: Duration,
    style: &TextStyle,
) -> Result<()> {
    debug!(?duration, "Realtime countdown");
    let started = clock.now();
    loop {
        let elapsed = clock.now().saturating_duration_since(started);
        if elapsed >= duration {
            break;
        }
        let remaining = duration - elapsed;
        win.draw_text(&countdown_text(remaining.as_secs() + 1), style)?;
        win.flip()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screenflow::testing::{FakeClock, FakeWindow};

    #[test]
    fn test_static_countdown_sequence() {
        let mut win = FakeWindow::new();
        let clock = FakeClock::new(Duration::ZERO);

        show_static_countdown(
            &mut win,
            &clock,
            3,
            Duration::from_secs(1),
            &TextStyle::default(),
        )
        .unwrap();

        assert_eq!(
            win.texts(),
            vec![
                "Task will begin in 3 s",
                "Task will begin in 2 s",
                "Task will begin in 1 s"
            ]
        );
        assert_eq!(clock.elapsed(), Duration::from_secs(3));
    }

    #[test]
    fn test_static_countdown_from_zero_draws_nothing() {
        let mut win = FakeWindow::new();
        let clock = FakeClock::new(Duration::ZERO);

        show_static_countdown(&mut win, &clock, 0, Duration::from_secs(1), &TextStyle::default())
            .unwrap();

        assert!(win.frames.is_empty());
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_realtime_countdown_never_shows_zero() {
        let mut win = FakeWindow::new();
        // One step per clock read, roughly a 60 Hz frame
        let clock = FakeClock::new(Duration::from_millis(16));

        show_realtime_countdown(&mut win, &clock, Duration::from_secs(3), &TextStyle::default())
            .unwrap();

        let texts = win.texts();
        assert!(!texts.is_empty());
        assert_eq!(texts.first().unwrap(), "Task will begin in 3 s");
        assert_eq!(texts.last().unwrap(), "Task will begin in 1 s");
        assert!(texts.iter().all(|t| !t.contains(" 0 s")));
        for shown in ["3", "2", "1"] {
            assert!(texts.contains(&countdown_text(shown.parse().unwrap())));
        }
        assert!(clock.elapsed() >= Duration::from_secs(3));
    }

    #[test]
    fn test_realtime_countdown_zero_duration_returns_at_once() {
        let mut win = FakeWindow::new();
        let clock = FakeClock::new(Duration::from_millis(16));

        show_realtime_countdown(&mut win, &clock, Duration::ZERO, &TextStyle::default()).unwrap();

        assert!(win.frames.is_empty());
    }
}
