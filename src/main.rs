use log::{error, info, warn};
use reminderd::config::LOCK_FILE_NAME;
use reminderd::notify::DesktopNotifier;
use reminderd::scheduler::{self, SystemClock};
use reminderd::storage::{self, ReminderStore, SharedStore};
use reminderd::{AppError, AppResult};
use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Exclusive single-instance guard. The lock file is created with
/// `create_new` and removed on drop; a pre-existing file means another
/// instance holds it (or crashed without cleaning up, in which case the
/// logged path tells the user what to remove).
struct InstanceLock {
    path: PathBuf,
}

impl InstanceLock {
    fn acquire(dir: &Path) -> AppResult<Self> {
        let path = dir.join(LOCK_FILE_NAME);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                let _ = write!(file, "{}", std::process::id());
                Ok(Self { path })
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Err(AppError::lock(format!(
                "another instance is already running (lock file {})",
                path.display()
            ))),
            Err(e) => Err(AppError::lock(e.to_string())),
        }
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Default to starting minimized, matching the desktop host
    let mut start_minimized = true;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--minimize" | "-m" => start_minimized = true,
            "--show" | "-s" => start_minimized = false,
            other => warn!("Ignoring unknown argument: {}", other),
        }
    }

    match run(start_minimized) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(start_minimized: bool) -> AppResult<()> {
    let data_dir = storage::app_data_dir()?;
    let _lock = InstanceLock::acquire(&data_dir)?;

    let store = SharedStore::new(ReminderStore::open()?);

    // Flags persisted on a previous day must not suppress today's popups
    if let Err(e) = store.lock().reset_daily_notifications() {
        warn!("Startup notification reset failed: {}", e);
    }

    info!(
        "Starting {} with {} reminders",
        if start_minimized { "minimized" } else { "visible" },
        store.lock().list().len()
    );

    let handle = scheduler::start(store, DesktopNotifier, SystemClock);
    info!("Scheduler running; type 'quit' or close stdin to exit");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        match line {
            Ok(l) if l.trim() == "quit" => break,
            Ok(_) => {}
            Err(_) => break,
        }
    }

    handle.shutdown();
    Ok(())
}
