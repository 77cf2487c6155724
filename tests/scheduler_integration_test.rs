//! Integration tests for the sync scheduler
//!
//! Drives the scheduler through its public API with a stub pass and
//! tokio's paused clock.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tariff_sync::config::SchedulerConfig;
use tariff_sync::core::pipeline::SyncPass;
use tariff_sync::core::SyncScheduler;
use tariff_sync::domain::{Result, SyncError};

struct RecordingPass {
    runs: AtomicUsize,
    fail_every_other: bool,
}

impl RecordingPass {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            runs: AtomicUsize::new(0),
            fail_every_other: false,
        })
    }

    fn flaky() -> Arc<Self> {
        Arc::new(Self {
            runs: AtomicUsize::new(0),
            fail_every_other: true,
        })
    }

    fn count(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SyncPass for RecordingPass {
    async fn run(&self, _date: NaiveDate) -> Result<()> {
        let run = self.runs.fetch_add(1, Ordering::SeqCst);
        if self.fail_every_other && run % 2 == 0 {
            Err(SyncError::Other("simulated pass failure".to_string()))
        } else {
            Ok(())
        }
    }
}

fn hourly() -> SchedulerConfig {
    SchedulerConfig { interval_hours: 1 }
}

#[tokio::test(start_paused = true)]
async fn test_immediate_pass_then_interval() {
    let pass = RecordingPass::new();
    let scheduler = SyncScheduler::new(pass.clone(), &hourly());

    scheduler.start().await;
    assert_eq!(pass.count(), 1, "first pass must run on start");

    tokio::time::sleep(Duration::from_secs(3600) + Duration::from_millis(50)).await;
    assert_eq!(pass.count(), 2);

    tokio::time::sleep(Duration::from_secs(2 * 3600)).await;
    assert_eq!(pass.count(), 4);

    scheduler.stop();
}

#[tokio::test(start_paused = true)]
async fn test_flaky_pass_keeps_schedule() {
    let pass = RecordingPass::flaky();
    let scheduler = SyncScheduler::new(pass.clone(), &hourly());

    scheduler.start().await;
    tokio::time::sleep(Duration::from_secs(3 * 3600) + Duration::from_millis(50)).await;

    assert_eq!(pass.count(), 4);
    assert!(scheduler.status().running);

    scheduler.stop();
}

#[tokio::test(start_paused = true)]
async fn test_stop_then_restart() {
    let pass = RecordingPass::new();
    let scheduler = SyncScheduler::new(pass.clone(), &hourly());

    scheduler.start().await;
    scheduler.stop();
    assert!(!scheduler.status().running);

    tokio::time::sleep(Duration::from_secs(3600)).await;
    assert_eq!(pass.count(), 1, "no ticks after stop");

    scheduler.start().await;
    assert_eq!(pass.count(), 2, "restart runs a fresh immediate pass");
    assert!(scheduler.status().running);

    scheduler.stop();
}

#[tokio::test(start_paused = true)]
async fn test_status_interval_and_next_run() {
    let pass = RecordingPass::new();
    let scheduler = SyncScheduler::new(pass, &SchedulerConfig { interval_hours: 3 });

    let idle = scheduler.status();
    assert!(!idle.running);
    assert_eq!(idle.interval_hours, 3);
    assert!(idle.next_run.is_none());

    scheduler.start().await;
    let running = scheduler.status();
    assert!(running.running);
    assert!(running.next_run.is_some());

    scheduler.stop();
}
