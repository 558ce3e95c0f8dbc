use crate::config::TICK_INTERVAL;
use crate::notify::Notifier;
use crate::storage::SharedStore;
use chrono::{Local, NaiveDateTime};
use log::{error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Clock seam so ticks can be driven from a fixed time source in tests.
pub trait Clock: Send {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the local wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

fn format_time(now: &NaiveDateTime) -> String {
    now.format("%H:%M").to_string()
}

fn format_date(now: &NaiveDateTime) -> String {
    now.format("%Y-%m-%d").to_string()
}

/// Poll loop that matches reminder times against the wall clock and fires
/// each reminder at most once per calendar day.
///
/// The loop carries the last observed date; when a tick sees a different
/// date it clears every notified flag before matching, so any number of
/// skipped days collapses into a single reset. There is no catch-up firing
/// for minutes that passed while the process was suspended.
pub struct Scheduler<C: Clock, N: Notifier> {
    store: SharedStore,
    notifier: N,
    clock: C,
    current_date: String,
}

impl<C: Clock, N: Notifier> Scheduler<C, N> {
    pub fn new(store: SharedStore, notifier: N, clock: C) -> Self {
        let current_date = format_date(&clock.now());
        Self {
            store,
            notifier,
            clock,
            current_date,
        }
    }

    /// One iteration of the poll loop: handle day rollover, then deliver
    /// every eligible reminder and persist its notified flag.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        let current_time = format_time(&now);
        let current_date = format_date(&now);

        if current_date != self.current_date {
            info!(
                "Date changed from {} to {}, resetting notification status",
                self.current_date, current_date
            );
            self.current_date = current_date;
            if let Err(e) = self.store.lock().reset_daily_notifications() {
                error!("Failed to reset notification status: {}", e);
            }
        }

        // Snapshot under the lock, deliver outside it
        let reminders = self.store.lock().list();
        for reminder in reminders {
            if !reminder.is_eligible(&current_time) {
                continue;
            }
            match self.notifier.notify(&reminder.title, &reminder.description) {
                Ok(()) => {
                    // Delivery ran outside the lock, so re-read the record
                    // and flip only the notified flag; a user edit or delete
                    // made meanwhile must not be overwritten by the stale
                    // snapshot
                    let mut store = self.store.lock();
                    let current = store.list().into_iter().find(|r| r.id == reminder.id);
                    match current {
                        Some(mut current) if current.time == reminder.time => {
                            current.notified = true;
                            if let Err(e) = store.update(current) {
                                error!("Failed to persist notified flag: {}", e);
                            }
                        }
                        Some(_) => {
                            info!(
                                "Reminder {} was rescheduled during delivery, leaving it armed",
                                reminder.id
                            );
                        }
                        None => {
                            info!("Reminder {} was deleted during delivery", reminder.id);
                        }
                    }
                }
                Err(e) => {
                    // Leave notified false so the next tick retries while
                    // the minute still matches
                    warn!("Notification delivery failed: {}", e);
                }
            }
        }
    }

    fn run(&mut self, running: &AtomicBool) {
        info!("Notification scheduler started");
        while running.load(Ordering::SeqCst) {
            self.tick();
            thread::sleep(TICK_INTERVAL);
        }
        info!("Notification scheduler stopped");
    }
}

/// Owner handle for the background scheduler thread.
pub struct SchedulerHandle {
    running: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Signal the loop to stop and join the thread before returning. The
    /// flag is checked once per iteration, so shutdown can take up to one
    /// tick interval plus any in-flight delivery.
    pub fn shutdown(self) {
        self.running.store(false, Ordering::SeqCst);
        if self.handle.join().is_err() {
            error!("Scheduler thread panicked");
        }
    }
}

/// Spawn the scheduler poll loop on a dedicated thread.
pub fn start<C, N>(store: SharedStore, notifier: N, clock: C) -> SchedulerHandle
where
    C: Clock + 'static,
    N: Notifier + 'static,
{
    let running = Arc::new(AtomicBool::new(true));
    let flag = running.clone();
    let handle = thread::spawn(move || {
        let mut scheduler = Scheduler::new(store, notifier, clock);
        scheduler.run(&flag);
    });
    SchedulerHandle { running, handle }
}
