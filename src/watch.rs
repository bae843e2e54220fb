//! localconfig.vdf watcher
//!
//! Polls the file (Steam rewrites it with a rename, so the parent directory
//! is watched) and runs an editor pass whenever it changes. The file stamp
//! recorded after each pass keeps the watcher from reacting to its own write.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, channel};
use std::time::{Duration, SystemTime};

use notify::{Config as NotifyConfig, Event, EventKind, PollWatcher, RecursiveMode, Watcher};

use crate::vdf::set_launch_options_for_all_apps;

pub const POLL_INTERVAL: Duration = Duration::from_secs(2);
/// Pause before re-checking whether Steam is still writing
pub const SETTLE_DELAY: Duration = Duration::from_millis(500);
/// Extra wait when the file was still changing after the settle pause
pub const SETTLE_RETRY: Duration = Duration::from_secs(2);

#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("watch failed: {0}")]
    Notify(#[from] notify::Error),

    #[error("{} has no parent directory", .0.display())]
    NoParent(PathBuf),
}

/// Modification time and size of the watched file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileStamp {
    pub modified: SystemTime,
    pub len: u64,
}

impl FileStamp {
    pub fn of(path: &Path) -> Option<Self> {
        let meta = std::fs::metadata(path).ok()?;
        Some(Self {
            modified: meta.modified().ok()?,
            len: meta.len(),
        })
    }
}

/// Decides whether a stamp is a change worth processing
#[derive(Debug, Default)]
pub struct ChangeFilter {
    last: Option<FileStamp>,
}

impl ChangeFilter {
    pub fn new(initial: Option<FileStamp>) -> Self {
        Self { last: initial }
    }

    pub fn is_change(&self, current: FileStamp) -> bool {
        self.last != Some(current)
    }

    pub fn record(&mut self, stamp: Option<FileStamp>) {
        self.last = stamp;
    }
}

pub struct ConfigWatcher {
    path: PathBuf,
    launch_option: String,
    processing: Arc<AtomicBool>,
    filter: ChangeFilter,
    _watcher: PollWatcher,
    events: Receiver<()>,
}

impl ConfigWatcher {
    pub fn new(path: &Path, launch_option: &str) -> Result<Self, WatchError> {
        let parent = path
            .parent()
            .ok_or_else(|| WatchError::NoParent(path.to_path_buf()))?
            .to_path_buf();
        let file_name = path.file_name().map(|f| f.to_os_string());

        let processing = Arc::new(AtomicBool::new(false));
        let guard = Arc::clone(&processing);
        let (tx, rx) = channel::<()>();

        let mut watcher = PollWatcher::new(
            move |result: notify::Result<Event>| {
                let Ok(event) = result else {
                    return;
                };
                if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    return;
                }
                let ours = event
                    .paths
                    .iter()
                    .any(|p| p.file_name() == file_name.as_deref());
                if !ours || guard.load(Ordering::SeqCst) {
                    return;
                }
                let _ = tx.send(());
            },
            NotifyConfig::default().with_poll_interval(POLL_INTERVAL),
        )?;
        watcher.watch(&parent, RecursiveMode::NonRecursive)?;

        Ok(Self {
            path: path.to_path_buf(),
            launch_option: launch_option.to_string(),
            processing,
            filter: ChangeFilter::new(FileStamp::of(path)),
            _watcher: watcher,
            events: rx,
        })
    }

    /// Run one editor pass with the re-entrancy guard held
    pub fn process(&mut self) {
        self.processing.store(true, Ordering::SeqCst);

        match set_launch_options_for_all_apps(&self.path, &self.launch_option) {
            Ok(report) if report.written => log::info!("Launch options applied"),
            Ok(_) => {}
            Err(e) => log::error!("Failed to apply launch options to {}: {}", self.path.display(), e),
        }

        self.filter.record(FileStamp::of(&self.path));
        self.processing.store(false, Ordering::SeqCst);
        log::info!("Ready for next change...");
    }

    /// Block forever, processing each external change
    pub fn run(&mut self) {
        log::info!("Watching {} for changes", self.path.display());
        log::info!("Launch option: {}", self.launch_option);

        while self.events.recv().is_ok() {
            // Drop events queued while the previous pass ran
            while self.events.try_recv().is_ok() {}

            let Some(current) = self.settled_stamp() else {
                log::error!("{} not found", self.path.display());
                continue;
            };
            if !self.filter.is_change(current) {
                continue;
            }

            log::info!(
                "{} changed (size: {})",
                self.path.display(),
                current.len
            );
            self.process();
        }
    }

    /// Wait until Steam looks done writing and return the final stamp
    fn settled_stamp(&self) -> Option<FileStamp> {
        let first = FileStamp::of(&self.path)?;
        std::thread::sleep(SETTLE_DELAY);
        let second = FileStamp::of(&self.path)?;
        if first == second {
            return Some(second);
        }
        log::info!("File still being written, waiting...");
        std::thread::sleep(SETTLE_RETRY);
        FileStamp::of(&self.path)
    }
}

/// Keep running when the launching terminal goes away
pub fn ignore_sighup() {
    // SAFETY: installing SIG_IGN has no handler code to race with
    unsafe {
        libc::signal(libc::SIGHUP, libc::SIG_IGN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn stamp(secs: u64, len: u64) -> FileStamp {
        FileStamp {
            modified: SystemTime::UNIX_EPOCH + Duration::from_secs(secs),
            len,
        }
    }

    // ── ChangeFilter ────────────────────────────────────────────

    #[test]
    fn recorded_stamp_is_not_a_change() {
        let mut filter = ChangeFilter::new(Some(stamp(10, 100)));
        assert!(!filter.is_change(stamp(10, 100)));
        assert!(filter.is_change(stamp(11, 100)));
        assert!(filter.is_change(stamp(10, 101)));

        filter.record(Some(stamp(11, 100)));
        assert!(!filter.is_change(stamp(11, 100)));
    }

    #[test]
    fn everything_is_a_change_without_history() {
        assert!(ChangeFilter::default().is_change(stamp(0, 0)));
    }

    // ── ConfigWatcher ───────────────────────────────────────────

    #[test]
    fn own_write_is_not_seen_as_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("localconfig.vdf");
        fs::write(
            &path,
            "\"apps\"\n{\n\t\"1234\"\n\t{\n\t\t\"cloud\"\n\t\t{\n\t\t\t\"last_sync_state\"\t\t\"x\"\n\t\t}\n\t}\n}\n",
        )
        .unwrap();

        let mut watcher = ConfigWatcher::new(&path, "~/dlo/run %command%").unwrap();
        watcher.process();

        assert!(fs::read_to_string(&path).unwrap().contains("\"LaunchOptions\""));
        let after = FileStamp::of(&path).unwrap();
        assert!(!watcher.filter.is_change(after));
        assert!(!watcher.processing.load(Ordering::SeqCst));
    }

    #[test]
    fn file_without_parent_is_rejected() {
        assert!(matches!(
            ConfigWatcher::new(Path::new("/"), "x %command%"),
            Err(WatchError::NoParent(_))
        ));
    }
}
