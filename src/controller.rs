//! Session controller
//!
//! Owns the live [`SessionState`] and the [`Clock`] that drives it. The
//! controller is the only writer of session state:
//! - **Clock**: calls back into the controller once per tick
//! - **UI**: calls `start`/`stop`/`reset`, reads `snapshot`, polls `events`
//! - **Observers**: notified synchronously on the ticking thread
//!
//! Every arming of the clock carries a generation number. `stop`, `reset`
//! and `start` bump the generation, so a tick from a timer that has been
//! replaced or cancelled can never touch the state.

use crate::clock::{Clock, TickSink};
use crate::error::Result;
use crate::session::{step, Phase, SessionParams, SessionState, Transition};
use chrono::{DateTime, Utc};
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::{Mutex, ReentrantMutex, RwLock};
use std::sync::{Arc, Weak};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Identity of one run of the breathing exercise
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionRun {
    /// Unique id of this run
    pub id: Uuid,
    /// When the run was started
    pub started_at: DateTime<Utc>,
    /// Parameters the run was started with
    pub params: SessionParams,
}

impl SessionRun {
    fn begin(params: SessionParams) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            params,
        }
    }
}

/// Notifications published by the controller
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// A new run began from the initial state
    Started { run: SessionRun, state: SessionState },
    /// A tick was applied
    Ticked(SessionState),
    /// The phase flipped on this tick
    PhaseChanged { from: Phase, state: SessionState },
    /// An exhale ended, closing one cycle
    CycleCompleted(SessionState),
    /// No cycles left; the clock has been released
    Completed {
        run: SessionRun,
        finished_at: DateTime<Utc>,
        state: SessionState,
    },
    /// The session was stopped; state is frozen
    Stopped(SessionState),
    /// State returned to its initial values
    Reset(SessionState),
}

impl SessionEvent {
    /// Snapshot carried by the event
    pub fn state(&self) -> SessionState {
        match self {
            SessionEvent::Started { state, .. }
            | SessionEvent::PhaseChanged { state, .. }
            | SessionEvent::Completed { state, .. } => *state,
            SessionEvent::Ticked(state)
            | SessionEvent::CycleCompleted(state)
            | SessionEvent::Stopped(state)
            | SessionEvent::Reset(state) => *state,
        }
    }
}

/// Synchronous subscriber to session events
///
/// Called on the thread that delivered the tick.
pub trait SessionObserver: Send + Sync {
    fn on_event(&self, event: &SessionEvent);
}

impl<F> SessionObserver for F
where
    F: Fn(&SessionEvent) + Send + Sync,
{
    fn on_event(&self, event: &SessionEvent) {
        self(event)
    }
}

/// Handle returned by [`SessionController::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

#[derive(Default)]
struct Observers {
    next_id: u64,
    callbacks: Vec<(ObserverId, Arc<dyn SessionObserver>)>,
    channels: Vec<Sender<SessionEvent>>,
}

struct Core {
    state: SessionState,
    running: bool,
    generation: u64,
    run: Option<SessionRun>,
}

struct Shared<C: Clock> {
    params: SessionParams,
    core: RwLock<Core>,
    clock: Mutex<C>,
    /// Serialises tick application with lifecycle calls. Reentrant so an
    /// observer may call `stop` from inside a notification.
    dispatch: ReentrantMutex<()>,
    observers: Mutex<Observers>,
}

/// Orchestrates the phase clock and the session state machine
pub struct SessionController<C: Clock> {
    shared: Arc<Shared<C>>,
}

impl<C: Clock> Clone for SessionController<C> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<C: Clock> SessionController<C> {
    /// Create a stopped controller showing the initial state
    pub fn new(params: SessionParams, clock: C) -> Self {
        let core = Core {
            state: SessionState::initial(&params),
            running: false,
            generation: 0,
            run: None,
        };
        Self {
            shared: Arc::new(Shared {
                params,
                core: RwLock::new(core),
                clock: Mutex::new(clock),
                dispatch: ReentrantMutex::new(()),
                observers: Mutex::new(Observers::default()),
            }),
        }
    }

    /// Begin a new run from the initial state and arm the clock
    ///
    /// Calling this while running restarts cleanly: the old timer is
    /// cancelled before the new one is armed. `Started` is published only
    /// once the clock is armed; if arming fails a session that was running
    /// reports `Stopped` instead.
    pub fn start(&self) -> Result<SessionRun> {
        let _dispatch = self.shared.dispatch.lock();
        let params = self.shared.params;
        let run = SessionRun::begin(params);

        let (generation, state, was_running) = {
            let mut core = self.shared.core.write();
            let was_running = core.running;
            core.generation += 1;
            core.state = SessionState::initial(&params);
            core.running = false;
            (core.generation, core.state, was_running)
        };

        if state.is_complete() {
            self.shared.clock.lock().disarm();
            self.shared.core.write().run = Some(run);
            info!("Session {} started with no cycles", run.id);
            self.publish(&[
                SessionEvent::Started { run, state },
                SessionEvent::Completed {
                    run,
                    finished_at: Utc::now(),
                    state,
                },
            ]);
            return Ok(run);
        }

        let armed = self.shared.clock.lock().arm(self.tick_sink(generation));
        if let Err(e) = armed {
            self.shared.core.write().generation += 1;
            if was_running {
                self.publish(&[SessionEvent::Stopped(state)]);
            }
            return Err(e);
        }

        {
            let mut core = self.shared.core.write();
            core.run = Some(run);
            core.running = true;
        }
        info!(
            "Session {} started: {} cycles of {}s phases",
            run.id,
            params.total_cycles(),
            params.phase_seconds()
        );
        self.publish(&[SessionEvent::Started { run, state }]);
        Ok(run)
    }

    /// Disarm the clock and freeze the snapshot
    ///
    /// Once this returns, no tick can change the state until the next
    /// `start`. Stopping a stopped controller is a no-op.
    pub fn stop(&self) {
        let _dispatch = self.shared.dispatch.lock();
        let state = {
            let mut core = self.shared.core.write();
            if !core.running {
                return;
            }
            core.running = false;
            core.generation += 1;
            core.state
        };
        self.shared.clock.lock().disarm();
        let total = self.shared.params.total_cycles();
        info!(
            "Session stopped after {} of {} cycles",
            state.completed_cycles(total),
            total
        );
        self.publish(&[SessionEvent::Stopped(state)]);
    }

    /// Return to the initial state without touching sound settings
    ///
    /// A running session keeps running from the top with a fresh timer; a
    /// stopped one stays stopped. If the fresh timer cannot be armed the
    /// session is stopped and `Stopped` is published in place of `Reset`.
    pub fn reset(&self) -> Result<()> {
        let _dispatch = self.shared.dispatch.lock();
        let params = self.shared.params;

        let (generation, state, rearm) = {
            let mut core = self.shared.core.write();
            core.generation += 1;
            core.state = SessionState::initial(&params);
            let rearm = core.running && !core.state.is_complete();
            core.running = false;
            (core.generation, core.state, rearm)
        };

        if !rearm {
            self.shared.clock.lock().disarm();
            debug!("Session reset while stopped");
            self.publish(&[SessionEvent::Reset(state)]);
            return Ok(());
        }

        let armed = self.shared.clock.lock().arm(self.tick_sink(generation));
        if let Err(e) = armed {
            self.shared.core.write().generation += 1;
            self.publish(&[SessionEvent::Stopped(state)]);
            return Err(e);
        }

        {
            let mut core = self.shared.core.write();
            core.run = Some(SessionRun::begin(params));
            core.running = true;
        }
        debug!("Session reset and restarted");
        self.publish(&[SessionEvent::Reset(state)]);
        Ok(())
    }

    /// Apply one externally delivered tick
    ///
    /// Ignored unless the session is running.
    pub fn on_tick(&self) {
        let generation = self.shared.core.read().generation;
        self.handle_tick(generation);
    }

    /// Current session snapshot
    pub fn snapshot(&self) -> SessionState {
        self.shared.core.read().state
    }

    /// Check if the clock is driving the session
    pub fn is_running(&self) -> bool {
        self.shared.core.read().running
    }

    /// Parameters every run uses
    pub fn params(&self) -> SessionParams {
        self.shared.params
    }

    /// The current or most recent run, if any was started
    pub fn run(&self) -> Option<SessionRun> {
        self.shared.core.read().run
    }

    /// Register a synchronous observer
    pub fn subscribe(&self, observer: Arc<dyn SessionObserver>) -> ObserverId {
        let mut observers = self.shared.observers.lock();
        observers.next_id += 1;
        let id = ObserverId(observers.next_id);
        observers.callbacks.push((id, observer));
        id
    }

    /// Remove an observer; returns false if it was not registered
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut observers = self.shared.observers.lock();
        let before = observers.callbacks.len();
        observers.callbacks.retain(|(oid, _)| *oid != id);
        observers.callbacks.len() != before
    }

    /// Channel of every event published from now on
    ///
    /// Dropping the receiver unsubscribes it.
    pub fn events(&self) -> Receiver<SessionEvent> {
        let (tx, rx) = unbounded();
        self.shared.observers.lock().channels.push(tx);
        rx
    }

    fn tick_sink(&self, generation: u64) -> TickSink {
        let weak: Weak<Shared<C>> = Arc::downgrade(&self.shared);
        Arc::new(move || {
            if let Some(shared) = weak.upgrade() {
                SessionController { shared }.handle_tick(generation);
            }
        })
    }

    fn handle_tick(&self, generation: u64) {
        let _dispatch = self.shared.dispatch.lock();
        let params = self.shared.params;

        let (before, after, transition, run) = {
            let mut core = self.shared.core.write();
            if !core.running || core.generation != generation {
                return;
            }
            let before = core.state;
            let (after, transition) = step(before, &params);
            core.state = after;
            if after.is_complete() {
                core.running = false;
                core.generation += 1;
            }
            (before, after, transition, core.run)
        };

        if transition == Transition::Idle {
            return;
        }

        debug!(
            "Tick: {} {}s, {} cycles left",
            after.phase, after.seconds_remaining, after.cycles_remaining
        );

        let mut events = vec![SessionEvent::Ticked(after)];
        if transition.flipped_phase() {
            events.push(SessionEvent::PhaseChanged {
                from: before.phase,
                state: after,
            });
        }
        if let Transition::CycleCompleted { remaining } = transition {
            debug!("Cycle completed, {} remaining", remaining);
            events.push(SessionEvent::CycleCompleted(after));
        }
        if after.is_complete() {
            self.shared.clock.lock().disarm();
            match run {
                Some(run) => {
                    info!("Session {} complete", run.id);
                    events.push(SessionEvent::Completed {
                        run,
                        finished_at: Utc::now(),
                        state: after,
                    });
                }
                None => warn!("Session completed without a recorded run"),
            }
        }

        self.publish(&events);
    }

    fn publish(&self, events: &[SessionEvent]) {
        // Copy the subscriber list so observers may (un)subscribe re-entrantly
        let callbacks: Vec<Arc<dyn SessionObserver>> = {
            let mut observers = self.shared.observers.lock();
            observers.channels.retain(|tx| {
                events.iter().all(|event| tx.send(event.clone()).is_ok())
            });
            observers
                .callbacks
                .iter()
                .map(|(_, observer)| Arc::clone(observer))
                .collect()
        };

        for event in events {
            for observer in &callbacks {
                observer.on_event(event);
            }
        }
    }
}
