use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicBool, AtomicU32, Ordering};

/// One recording session: `Idle → Recording → Ready → Idle`.
///
/// The flags and the byte counter are atomics so the capture context can
/// drive the session while any other context polls it; `active` and
/// `ready` are never both true. Completion is additionally published
/// through a single-slot signal so an async consumer can await it
/// instead of polling.
///
/// During a session the state is advanced only from the capture context
/// ([`advance`](Self::advance) / [`complete`](Self::complete));
/// [`reset`](Self::reset) must only be called once no capture is
/// running.
pub struct RecordingSession {
    active: AtomicBool,
    ready: AtomicBool,
    bytes_written: AtomicU32,
    target_bytes: u32,
    completed: Signal<CriticalSectionRawMutex, ()>,
}

impl RecordingSession {
    /// A new idle session with a fixed byte budget
    /// (`sample_rate * 2 * duration_seconds` for 16-bit mono PCM, so an
    /// even count).
    pub const fn new(target_bytes: u32) -> Self {
        Self {
            active: AtomicBool::new(false),
            ready: AtomicBool::new(false),
            bytes_written: AtomicU32::new(0),
            target_bytes,
            completed: Signal::new(),
        }
    }

    /// Begin a session. Refused (returns `false`) while a recording is
    /// in progress or a finished one awaits consumption.
    pub fn start(&self) -> bool {
        if self.active.load(Ordering::SeqCst) || self.ready.load(Ordering::SeqCst)
        {
            return false;
        }
        self.bytes_written.store(0, Ordering::SeqCst);
        self.completed.reset();
        self.active.store(true, Ordering::SeqCst);
        true
    }

    pub fn is_recording(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn is_recording_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    pub fn bytes_written(&self) -> u32 {
        self.bytes_written.load(Ordering::SeqCst)
    }

    pub const fn target_bytes(&self) -> u32 {
        self.target_bytes
    }

    /// Account for `n` persisted bytes; returns `true` once the budget
    /// is reached. Capture context only.
    pub fn advance(&self, n: u32) -> bool {
        let written = self.bytes_written.fetch_add(n, Ordering::SeqCst) + n;
        written >= self.target_bytes
    }

    /// Flip `Recording → Ready` and publish the completion event.
    /// Capture context only, after the final flush.
    pub fn complete(&self) {
        self.active.store(false, Ordering::SeqCst);
        self.ready.store(true, Ordering::SeqCst);
        self.completed.signal(());
    }

    /// Return to `Idle`, discarding the finished (or aborted) session.
    pub fn reset(&self) {
        self.active.store(false, Ordering::SeqCst);
        self.ready.store(false, Ordering::SeqCst);
        self.bytes_written.store(0, Ordering::SeqCst);
        self.completed.reset();
    }

    /// Wait until the in-progress session reaches `Ready`.
    pub async fn wait_ready(&self) {
        self.completed.wait().await
    }
}
