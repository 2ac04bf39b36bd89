//! The refresh loop: resolve the current period and paint it, on a fixed
//! cadence, until told to stop.
//!
//! ```text
//!   ┌──────── interval tick ────────┐
//!   │ clock.now() → resolver.resolve() → screen.show_label()
//!   └───────────────────────────────┘
//!        shutdown (Ctrl-C) → break → ScreenGuard drop → clear + release
//! ```
//!
//! All state lives in the [`Presenter`] value owned by the loop; the
//! resolver itself is pure and shared read-only.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use schoolclock::{PeriodResolver, ResolvedPeriod};

use crate::clock::Clock;
use crate::display::{DisplayError, Screen, ScreenGuard};

/// Default refresh cadence.
pub const DEFAULT_REFRESH: Duration = Duration::from_secs(30);

pub struct Presenter<S: Screen, C: Clock> {
    resolver: Arc<PeriodResolver>,
    screen: ScreenGuard<S>,
    clock: C,
    last: Option<ResolvedPeriod>,
}

impl<S: Screen, C: Clock> Presenter<S, C> {
    /// Takes ownership of `screen`; it is released when the presenter is
    /// dropped, whichever way the loop exits.
    pub fn new(resolver: Arc<PeriodResolver>, screen: S, clock: C) -> Self {
        Self {
            resolver,
            screen: ScreenGuard::new(screen),
            clock,
            last: None,
        }
    }

    /// Resolve once and repaint.
    pub fn tick(&mut self) -> Result<&ResolvedPeriod, DisplayError> {
        let now = self.clock.now();
        let period = self.resolver.resolve(now);
        self.screen.show_label(period.label())?;

        if self.last.as_ref() != Some(&period) {
            info!(at = %now.format("%H:%M"), period = %period, "Period changed");
        } else {
            debug!(at = %now.format("%H:%M"), period = %period, "Refreshed");
        }
        Ok(self.last.insert(period))
    }

    /// Most recently painted period.
    pub fn last(&self) -> Option<&ResolvedPeriod> {
        self.last.as_ref()
    }

    /// Tick every `every` (first tick immediately) until `shutdown`
    /// completes.  The screen is cleared and released on return, including
    /// when a repaint fails.
    pub async fn run<F>(mut self, every: Duration, shutdown: F) -> Result<(), DisplayError>
    where
        F: Future<Output = ()>,
    {
        let (w, h) = self.screen.size();
        info!(
            refresh_secs = every.as_secs_f64(),
            width = w,
            height = h,
            "Presentation loop started"
        );

        let mut interval = tokio::time::interval(every);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("Exiting...");
                    break;
                }
                _ = interval.tick() => {
                    self.tick()?;
                }
            }
        }

        self.screen.release()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveTime;
    use schoolclock::config::{DocumentFormat, ScheduleLoader};
    use std::sync::Mutex;

    const DAY: &str = r#"{
        "school_name": "Test",
        "school_start_time": "08:00",
        "school_end_time": "15:00",
        "has_homeroom": true,
        "homeroom_duration": 15,
        "homeroom_period_name": "Homeroom",
        "days_per_cycle": 5,
        "class_duration": 45,
        "time_between_classes": 5,
        "periods": [ { "number": 1, "name": "Period 1", "duration": 45 } ]
    }"#;

    fn resolver() -> Arc<PeriodResolver> {
        let s = ScheduleLoader::load_from_str(DAY, DocumentFormat::Json).unwrap();
        Arc::new(PeriodResolver::new(s))
    }

    fn at(h: u32, m: u32) -> FixedClock {
        FixedClock(NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    /// Screen that records every call; `fail_show` makes painting fail.
    #[derive(Clone, Default)]
    struct Recorder {
        log: Arc<Mutex<Vec<String>>>,
        fail_show: bool,
    }

    impl Recorder {
        fn events(&self) -> Vec<String> {
            self.log.lock().unwrap().clone()
        }
    }

    impl Screen for Recorder {
        fn size(&self) -> (u16, u16) {
            (128, 128)
        }
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.log.lock().unwrap().push("clear".into());
            Ok(())
        }
        fn show_label(&mut self, label: &str) -> Result<(), DisplayError> {
            if self.fail_show {
                return Err(DisplayError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "bus error",
                )));
            }
            self.log.lock().unwrap().push(format!("show:{label}"));
            Ok(())
        }
        fn release(&mut self) -> Result<(), DisplayError> {
            self.log.lock().unwrap().push("release".into());
            Ok(())
        }
    }

    #[test]
    fn tick_paints_resolved_label() {
        let screen = Recorder::default();
        let mut p = Presenter::new(resolver(), screen.clone(), at(8, 5));
        assert_eq!(p.tick().unwrap().label(), "Homeroom");
        assert_eq!(screen.events(), vec!["show:Homeroom"]);
        assert_eq!(p.last().map(|r| r.label()), Some("Homeroom"));
    }

    #[test]
    fn tick_shows_passing_and_sentinels() {
        for (clock, expected) in [
            (at(8, 17), "Passing period"),
            (at(7, 59), "School hasn't started yet"),
            (at(15, 1), "School is over"),
        ] {
            let mut p = Presenter::new(resolver(), Recorder::default(), clock);
            assert_eq!(p.tick().unwrap().label(), expected);
        }
    }

    #[test]
    fn dropping_presenter_releases_screen() {
        let screen = Recorder::default();
        {
            let mut p = Presenter::new(resolver(), screen.clone(), at(8, 20));
            p.tick().unwrap();
        }
        assert_eq!(screen.events(), vec!["show:Period 1", "clear", "release"]);
    }

    #[tokio::test]
    async fn immediate_shutdown_still_releases() {
        let screen = Recorder::default();
        let p = Presenter::new(resolver(), screen.clone(), at(8, 20));
        p.run(Duration::from_millis(10), async {}).await.unwrap();
        assert_eq!(screen.events(), vec!["clear", "release"]);
    }

    #[tokio::test]
    async fn run_ticks_until_shutdown_then_releases() {
        let screen = Recorder::default();
        let p = Presenter::new(resolver(), screen.clone(), at(8, 20));
        p.run(
            Duration::from_millis(5),
            tokio::time::sleep(Duration::from_millis(40)),
        )
        .await
        .unwrap();

        let events = screen.events();
        assert!(events.len() >= 3, "expected at least one paint: {events:?}");
        assert!(events[..events.len() - 2]
            .iter()
            .all(|e| e == "show:Period 1"));
        assert_eq!(&events[events.len() - 2..], ["clear", "release"]);
    }

    #[tokio::test]
    async fn paint_failure_ends_loop_and_releases() {
        let screen = Recorder {
            fail_show: true,
            ..Default::default()
        };
        let p = Presenter::new(resolver(), screen.clone(), at(8, 20));
        let result = p
            .run(Duration::from_millis(5), std::future::pending())
            .await;
        assert!(matches!(result, Err(DisplayError::Io(_))));
        assert_eq!(screen.events(), vec!["clear", "release"]);
    }
}
