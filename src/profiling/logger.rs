//! JSONL file logger for profiling events.

use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;

use super::event::{EventType, ProfileEvent};

/// Set by `init()`; events logged before that are dropped
static LOGGER: Mutex<Option<ProfileLogger>> = Mutex::new(None);

static EVENT_COUNT: AtomicU64 = AtomicU64::new(0);

/// Directory the profile files are written to
const PROFILE_DIR: &str = "data";

/// Flush the buffered writer every this many events
const FLUSH_EVERY: u64 = 100;

pub struct ProfileLogger {
    writer: BufWriter<File>,
    session_id: String,
}

impl ProfileLogger {
    fn new() -> std::io::Result<Self> {
        let session_id = Utc::now().format("%Y%m%d_%H%M%S").to_string();
        let filename = format!("{}/leitner_profile_{}.jsonl", PROFILE_DIR, session_id);

        create_dir_all(PROFILE_DIR)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&filename)?;

        tracing::info!("Profiling enabled: writing to {}", filename);

        Ok(Self {
            writer: BufWriter::new(file),
            session_id,
        })
    }

    fn log(&mut self, event: ProfileEvent) {
        match serde_json::to_string(&event) {
            Ok(json) => {
                if let Err(e) = writeln!(self.writer, "{}", json) {
                    tracing::warn!("Failed to write profile event: {}", e);
                }
                if EVENT_COUNT.load(Ordering::Relaxed) % FLUSH_EVERY == 0 {
                    self.flush();
                }
                tracing::trace!(target: "profile", "{}", json);
            }
            Err(e) => tracing::warn!("Failed to serialize profile event: {}", e),
        }
        EVENT_COUNT.fetch_add(1, Ordering::Relaxed);
    }

    fn flush(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!("Failed to flush profile log: {}", e);
        }
    }
}

/// Open a timestamped JSONL file under `data/`. Call once from main.
pub fn init() {
    let Ok(mut guard) = LOGGER.lock() else {
        tracing::error!("Profiler lock poisoned");
        return;
    };
    if guard.is_some() {
        tracing::warn!("Profiler already initialized");
        return;
    }

    match ProfileLogger::new() {
        Ok(logger) => {
            let session_id = logger.session_id.clone();
            *guard = Some(logger);
            drop(guard);
            log_event(EventType::SessionStart { session_id });
        }
        Err(e) => {
            tracing::error!("Failed to initialize profiler: {}", e);
        }
    }
}

/// Log the session end and flush. Call before the process exits.
pub fn shutdown() {
    let total_events = EVENT_COUNT.load(Ordering::Relaxed);
    log_event(EventType::SessionEnd { total_events });

    if let Ok(mut guard) = LOGGER.lock() {
        if let Some(logger) = guard.as_mut() {
            logger.flush();
            tracing::info!("Profiling session ended: {} events logged", total_events);
        }
        *guard = None;
    }
}

fn write(event: ProfileEvent) {
    if let Ok(mut guard) = LOGGER.lock() {
        if let Some(logger) = guard.as_mut() {
            logger.log(event);
        }
    }
}

pub fn log_event(event_type: EventType) {
    write(ProfileEvent::new(event_type));
}

pub fn log_timed(name: &str, duration: Duration) {
    write(ProfileEvent::with_duration(
        EventType::TimedScope {
            name: name.to_string(),
        },
        duration,
    ));
}
