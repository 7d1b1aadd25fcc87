//! Phase clock: the single time source of a session
//!
//! A clock delivers ticks to one [`TickSink`] at a time. Arming a clock
//! that is already armed cancels the running timer first, so at most one
//! timer is ever live per clock.

use crate::error::{BreatheError, Result};
use crossbeam_channel::{bounded, select, tick, Sender};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, trace};

/// Callback invoked once per tick
pub type TickSink = Arc<dyn Fn() + Send + Sync>;

/// Source of periodic ticks
pub trait Clock: Send + 'static {
    /// Start delivering ticks to `sink`, replacing any armed timer
    fn arm(&mut self, sink: TickSink) -> Result<()>;

    /// Stop delivering ticks. No-op when not armed.
    fn disarm(&mut self);

    /// Check if a timer is currently armed
    fn is_armed(&self) -> bool;
}

/// Handle to the worker thread of an armed [`IntervalClock`]
struct ActiveTimer {
    stop_tx: Sender<()>,
    cancelled: Arc<AtomicBool>,
}

impl ActiveTimer {
    fn cancel(self) {
        self.cancelled.store(true, Ordering::SeqCst);
        // A full channel means stop was already requested
        let _ = self.stop_tx.try_send(());
    }
}

/// Wall-clock ticker backed by a dedicated thread
///
/// Each arming spawns one worker that waits on a crossbeam `tick` channel
/// and a stop channel. Disarming never joins the worker, so it is safe to
/// call from inside a tick callback; a cancelled worker stops delivering
/// before its next tick.
pub struct IntervalClock {
    interval: Duration,
    active: Option<ActiveTimer>,
}

impl Default for IntervalClock {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl IntervalClock {
    /// Create a clock ticking every `interval`
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            active: None,
        }
    }

    /// Tick interval
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Clock for IntervalClock {
    fn arm(&mut self, sink: TickSink) -> Result<()> {
        self.disarm();

        let (stop_tx, stop_rx) = bounded::<()>(1);
        let cancelled = Arc::new(AtomicBool::new(false));
        let worker_cancelled = Arc::clone(&cancelled);
        let interval = self.interval;

        thread::Builder::new()
            .name("phase-clock".into())
            .spawn(move || {
                let ticker = tick(interval);
                debug!("Phase clock armed ({:?})", interval);
                loop {
                    select! {
                        recv(stop_rx) -> _ => break,
                        recv(ticker) -> _ => {
                            if worker_cancelled.load(Ordering::SeqCst) {
                                break;
                            }
                            trace!("Phase clock tick");
                            sink();
                        }
                    }
                }
                debug!("Phase clock worker exiting");
            })
            .map_err(|e| BreatheError::ClockError(format!("Failed to spawn clock thread: {}", e)))?;

        self.active = Some(ActiveTimer { stop_tx, cancelled });
        Ok(())
    }

    fn disarm(&mut self) {
        if let Some(active) = self.active.take() {
            active.cancel();
            debug!("Phase clock disarmed");
        }
    }

    fn is_armed(&self) -> bool {
        self.active.is_some()
    }
}

impl Drop for IntervalClock {
    fn drop(&mut self) {
        self.disarm();
    }
}

/// Shared slot between a [`ManualClock`] and its tickers
#[derive(Default)]
struct ManualSlot {
    sink: Mutex<Option<TickSink>>,
    arms: AtomicUsize,
}

/// Clock that only ticks when told to
///
/// Used by tests and scripted scenarios to drive a session deterministically.
#[derive(Default)]
pub struct ManualClock {
    slot: Arc<ManualSlot>,
}

impl ManualClock {
    /// Create a manual clock with no timer armed
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle that fires ticks on this clock
    pub fn ticker(&self) -> ManualTicker {
        ManualTicker {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl Clock for ManualClock {
    fn arm(&mut self, sink: TickSink) -> Result<()> {
        *self.slot.sink.lock() = Some(sink);
        self.slot.arms.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn disarm(&mut self) {
        self.slot.sink.lock().take();
    }

    fn is_armed(&self) -> bool {
        self.slot.sink.lock().is_some()
    }
}

/// Fires ticks on a [`ManualClock`]
#[derive(Clone)]
pub struct ManualTicker {
    slot: Arc<ManualSlot>,
}

impl ManualTicker {
    /// Deliver one tick; returns false when nothing is armed
    pub fn tick(&self) -> bool {
        // Release the slot before calling out; the sink may disarm the clock
        let sink = self.slot.sink.lock().clone();
        match sink {
            Some(sink) => {
                sink();
                true
            }
            None => false,
        }
    }

    /// Deliver `count` ticks, stopping early if the clock gets disarmed
    pub fn tick_n(&self, count: u64) -> u64 {
        let mut delivered = 0;
        for _ in 0..count {
            if !self.tick() {
                break;
            }
            delivered += 1;
        }
        delivered
    }

    /// Check if a timer is armed
    pub fn is_armed(&self) -> bool {
        self.slot.sink.lock().is_some()
    }

    /// Total number of times the clock has been armed
    pub fn arm_count(&self) -> usize {
        self.slot.arms.load(Ordering::SeqCst)
    }
}
