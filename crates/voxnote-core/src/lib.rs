#![no_std]

//! Capture core for the voxnote fixed-duration voice recorder.
//!
//! Audio flows from a double-buffered ADC sampler through a PCM encoder
//! into a raw-flash-backed WAV writer. A finished recording is replayed
//! from flash as a pull-based byte stream, sized for chunked HTTP upload
//! without ever holding the whole file in RAM.
//!
//! The moving parts, in data-flow order:
//!
//! - [`Recorder`]: owns the capture pipeline; one session at a time.
//! - [`PcmEncoder`]: unsigned ADC codes to signed 16-bit PCM.
//! - [`FlashWriter`]: erase-then-program commits at the flash device's
//!   granularity.
//! - [`RecordingSession`]: the `Idle → Recording → Ready` state machine,
//!   shared between the capture context and the polling consumer.
//! - [`FlashStream`]: bounded-chunk replay of the written region.

mod encoder;
mod error;
mod recorder;
mod session;
mod stream;
mod wav;
mod writer;

pub use encoder::PcmEncoder;
pub use error::{Error, RecordError};
pub use recorder::Recorder;
pub use session::RecordingSession;
pub use stream::FlashStream;
pub use wav::{WavHeader, WAV_HEADER_LEN};
pub use writer::FlashWriter;

/// Capture sample rate in Hz.
pub const SAMPLE_RATE_HZ: u32 = 16_000;

/// Fixed capture duration per recording session.
pub const CAPTURE_SECONDS: u32 = 4;

/// PCM bytes one session persists: 16-bit mono at the capture rate.
pub const TARGET_BYTES: u32 = SAMPLE_RATE_HZ * 2 * CAPTURE_SECONDS;

/// Samples per hardware buffer (100 ms at the capture rate).
pub const ADC_BUF_LEN: usize = 1_600;

/// Erase/program granularity of the backing flash region.
pub const FLASH_PAGE: usize = 4_096;

/// Refill size of the flash replay stream, matched to the upload
/// transport's TCP buffer.
pub const STREAM_CHUNK: usize = 2_440;

/// Recorder preconfigured for the on-board flash geometry.
pub type VoxnoteRecorder<'s, F> = Recorder<'s, F, FLASH_PAGE>;

/// Replay stream preconfigured for the upload chunk size.
pub type VoxnoteStream<'a, F> = FlashStream<'a, F, STREAM_CHUNK>;
