//! Interval scheduler for sync passes
//!
//! Runs one pass immediately on start, then repeats on a fixed interval as
//! a background tokio task. A pass failure is logged and the timer keeps
//! ticking; only an explicit stop ends the loop.

use crate::config::SchedulerConfig;
use crate::core::pipeline::SyncPass;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Snapshot of scheduler state for status reporting
#[derive(Debug, Clone)]
pub struct SchedulerStatus {
    pub running: bool,
    pub interval_hours: u64,
    pub next_run: Option<DateTime<Utc>>,
}

/// Fixed-interval scheduler driving a [`SyncPass`]
pub struct SyncScheduler {
    pass: Arc<dyn SyncPass>,
    interval_hours: u64,
    running: Arc<AtomicBool>,
    timer: Mutex<Option<TimerTask>>,
    next_run: Arc<Mutex<Option<DateTime<Utc>>>>,
}

struct TimerTask {
    handle: JoinHandle<()>,
    shutdown: watch::Sender<bool>,
}

impl SyncScheduler {
    /// Create a scheduler from configuration
    pub fn new(pass: Arc<dyn SyncPass>, config: &SchedulerConfig) -> Self {
        Self {
            pass,
            interval_hours: config.interval_hours,
            running: Arc::new(AtomicBool::new(false)),
            timer: Mutex::new(None),
            next_run: Arc::new(Mutex::new(None)),
        }
    }

    /// Start the scheduler
    ///
    /// Runs the first pass before returning, then arms the interval timer.
    /// Calling start while already running is a logged no-op.
    pub async fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            tracing::warn!("Scheduler is already running, ignoring start");
            return;
        }

        tracing::info!(
            interval_hours = self.interval_hours,
            "Starting sync scheduler"
        );

        let period = Duration::from_secs(self.interval_hours * 3600);
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let pass = Arc::clone(&self.pass);
        let next_run = Arc::clone(&self.next_run);
        let interval_hours = self.interval_hours;

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now().into(), period);
            // First tick of interval_at fires at the given start instant.
            interval.tick().await;

            loop {
                // The shutdown signal is only consulted between passes, so a
                // pass already underway always runs to completion.
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    _ = interval.tick() => {}
                }

                run_pass(pass.as_ref()).await;

                // A stop that arrived mid-pass takes effect here.
                if *shutdown_rx.borrow() {
                    break;
                }
                set_next_run(&next_run, interval_hours);
            }
        });

        // Armed before the inline pass so a stop during it reaches the timer.
        if let Ok(mut timer) = self.timer.lock() {
            *timer = Some(TimerTask { handle, shutdown });
        }

        // First pass runs inline so startup surfaces fetch problems right away.
        run_pass(self.pass.as_ref()).await;

        if self.running.load(Ordering::SeqCst) {
            set_next_run(&self.next_run, self.interval_hours);
        }
    }

    /// Stop the scheduler
    ///
    /// Signals the timer task to exit before its next tick. A pass already
    /// in flight runs to completion; stopping while idle is a logged no-op.
    pub fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            tracing::warn!("Scheduler is not running, ignoring stop");
            return;
        }

        if let Ok(mut timer) = self.timer.lock() {
            if let Some(task) = timer.take() {
                let _ = task.shutdown.send(true);
            }
        }
        if let Ok(mut next_run) = self.next_run.lock() {
            *next_run = None;
        }

        tracing::info!("Sync scheduler stopped");
    }

    /// Current scheduler state
    pub fn status(&self) -> SchedulerStatus {
        SchedulerStatus {
            running: self.running.load(Ordering::SeqCst),
            interval_hours: self.interval_hours,
            next_run: self.next_run.lock().ok().and_then(|guard| *guard),
        }
    }
}

impl Drop for SyncScheduler {
    fn drop(&mut self) {
        if let Ok(mut timer) = self.timer.lock() {
            if let Some(task) = timer.take() {
                task.handle.abort();
            }
        }
    }
}

fn set_next_run(next_run: &Mutex<Option<DateTime<Utc>>>, interval_hours: u64) {
    if let Ok(mut guard) = next_run.lock() {
        *guard = Some(Utc::now() + ChronoDuration::hours(interval_hours as i64));
    }
}

/// Run one pass for today's date, logging outcome and elapsed time
async fn run_pass(pass: &dyn SyncPass) {
    let date = Utc::now().date_naive();
    let started = Instant::now();

    tracing::info!(date = %date, "Starting sync pass");

    match pass.run(date).await {
        Ok(()) => {
            tracing::info!(
                date = %date,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Sync pass completed"
            );
        }
        Err(e) => {
            tracing::error!(
                date = %date,
                elapsed_ms = started.elapsed().as_millis() as u64,
                error = %e,
                "Sync pass failed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Result, SyncError};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::AtomicUsize;

    struct CountingPass {
        runs: AtomicUsize,
        fail: bool,
    }

    impl CountingPass {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                runs: AtomicUsize::new(0),
                fail,
            })
        }

        fn count(&self) -> usize {
            self.runs.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SyncPass for CountingPass {
        async fn run(&self, _date: NaiveDate) -> Result<()> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(SyncError::Other("simulated failure".to_string()))
            } else {
                Ok(())
            }
        }
    }

    struct SlowPass {
        started: AtomicUsize,
        completed: AtomicUsize,
        delay: Duration,
    }

    impl SlowPass {
        fn new(delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                started: AtomicUsize::new(0),
                completed: AtomicUsize::new(0),
                delay,
            })
        }
    }

    #[async_trait]
    impl SyncPass for SlowPass {
        async fn run(&self, _date: NaiveDate) -> Result<()> {
            self.started.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.completed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn config(interval_hours: u64) -> SchedulerConfig {
        SchedulerConfig { interval_hours }
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_runs_immediate_pass() {
        let pass = CountingPass::new(false);
        let scheduler = SyncScheduler::new(pass.clone(), &config(1));

        scheduler.start().await;
        assert_eq!(pass.count(), 1);
        assert!(scheduler.status().running);

        scheduler.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_fires_repeat_passes() {
        let pass = CountingPass::new(false);
        let scheduler = SyncScheduler::new(pass.clone(), &config(1));

        scheduler.start().await;
        assert_eq!(pass.count(), 1);

        tokio::time::sleep(Duration::from_secs(3600) + Duration::from_millis(10)).await;
        assert_eq!(pass.count(), 2);

        tokio::time::sleep(Duration::from_secs(3600)).await;
        assert_eq!(pass.count(), 3);

        scheduler.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_start_is_noop() {
        let pass = CountingPass::new(false);
        let scheduler = SyncScheduler::new(pass.clone(), &config(1));

        scheduler.start().await;
        scheduler.start().await;
        assert_eq!(pass.count(), 1);

        scheduler.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_before_start_is_noop() {
        let pass = CountingPass::new(false);
        let scheduler = SyncScheduler::new(pass.clone(), &config(1));

        scheduler.stop();
        assert!(!scheduler.status().running);
        assert_eq!(pass.count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_pass_does_not_stop_ticks() {
        let pass = CountingPass::new(true);
        let scheduler = SyncScheduler::new(pass.clone(), &config(1));

        scheduler.start().await;
        tokio::time::sleep(Duration::from_secs(7200) + Duration::from_millis(10)).await;
        assert!(pass.count() >= 3);
        assert!(scheduler.status().running);

        scheduler.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_ticks() {
        let pass = CountingPass::new(false);
        let scheduler = SyncScheduler::new(pass.clone(), &config(1));

        scheduler.start().await;
        scheduler.stop();

        tokio::time::sleep(Duration::from_secs(7200)).await;
        assert_eq!(pass.count(), 1);
        assert!(!scheduler.status().running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_lets_inflight_pass_finish() {
        let pass = SlowPass::new(Duration::from_secs(600));
        let scheduler = SyncScheduler::new(pass.clone(), &config(1));

        // Inline first pass completes during start.
        scheduler.start().await;
        assert_eq!(pass.started.load(Ordering::SeqCst), 1);
        assert_eq!(pass.completed.load(Ordering::SeqCst), 1);

        // Advance across the first tick so the second pass is mid-run.
        tokio::time::sleep(Duration::from_secs(3000) + Duration::from_millis(10)).await;
        assert_eq!(pass.started.load(Ordering::SeqCst), 2);
        assert_eq!(pass.completed.load(Ordering::SeqCst), 1);

        scheduler.stop();

        // The pass underway still runs to completion.
        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(pass.completed.load(Ordering::SeqCst), 2);

        // No further passes after the stop.
        tokio::time::sleep(Duration::from_secs(7200)).await;
        assert_eq!(pass.started.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_during_first_pass_disarms_timer() {
        let pass = SlowPass::new(Duration::from_secs(600));
        let scheduler = Arc::new(SyncScheduler::new(pass.clone(), &config(1)));

        let starter = Arc::clone(&scheduler);
        let start_task = tokio::spawn(async move { starter.start().await });

        // Let start reach the inline pass, then stop before it finishes.
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(pass.started.load(Ordering::SeqCst), 1);
        scheduler.stop();

        start_task.await.unwrap();
        assert_eq!(pass.completed.load(Ordering::SeqCst), 1);
        assert!(!scheduler.status().running);
        assert!(scheduler.status().next_run.is_none());

        // The timer was disarmed along with the stop.
        tokio::time::sleep(Duration::from_secs(7200)).await;
        assert_eq!(pass.started.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_reports_next_run_while_running() {
        let pass = CountingPass::new(false);
        let scheduler = SyncScheduler::new(pass.clone(), &config(2));

        assert!(scheduler.status().next_run.is_none());
        scheduler.start().await;
        assert!(scheduler.status().next_run.is_some());
        assert_eq!(scheduler.status().interval_hours, 2);

        scheduler.stop();
        assert!(scheduler.status().next_run.is_none());
    }
}
