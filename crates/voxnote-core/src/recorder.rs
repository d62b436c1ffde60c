use adc_sampler::{AdcDma, Config, Sampler, SamplerState};
use embedded_storage::nor_flash::NorFlash;

use crate::encoder::PcmEncoder;
use crate::error::{Error, RecordError};
use crate::session::RecordingSession;
use crate::stream::FlashStream;
use crate::wav::WavHeader;
use crate::writer::FlashWriter;

/// The capture pipeline: encoder and flash-backed WAV writer, driven by
/// a double-buffered sampler, one session at a time.
///
/// Construction claims a flash region sized for the session budget and
/// emits the WAV header; [`record`](Self::record) fills the region;
/// [`stream`](Self::stream) replays it; [`reset`](Self::reset) prepares
/// the next session. The session flags stay shared, so other contexts
/// can poll progress while a capture runs.
pub struct Recorder<'s, F: NorFlash, const PAGE: usize> {
    writer: FlashWriter<F, PAGE>,
    encoder: PcmEncoder,
    header: WavHeader,
    session: &'s RecordingSession,
}

impl<'s, F: NorFlash, const PAGE: usize> Recorder<'s, F, PAGE> {
    /// Claim the region and write the header for the first session.
    pub fn new(
        flash: F,
        session: &'s RecordingSession,
        config: Config,
    ) -> Result<Self, Error<F::Error>> {
        let header = WavHeader::new(config.sample_rate_hz, session.target_bytes());
        let mut writer = FlashWriter::new(flash, header.file_len())?;
        writer.write_all(&header.to_bytes())?;
        Ok(Self {
            writer,
            encoder: PcmEncoder::new(config.resolution),
            header,
            session,
        })
    }

    pub fn is_recording(&self) -> bool {
        self.session.is_recording()
    }

    pub fn is_recording_ready(&self) -> bool {
        self.session.is_recording_ready()
    }

    /// Capture one session: run the sampler until exactly the session's
    /// byte budget has been encoded and persisted, then flush and mark
    /// the session `Ready`.
    ///
    /// Refused with [`RecordError::Busy`] while a session is recording
    /// or awaiting consumption. On a capture or storage error the
    /// session returns to `Idle` and the region contents are undefined.
    pub async fn record<T: AdcDma, const N: usize>(
        &mut self,
        sampler: &mut Sampler<T>,
        bufs: &mut [[u16; N]; 2],
    ) -> Result<(), RecordError<T::Error, F::Error>> {
        if !self.session.start() {
            return Err(RecordError::Busy);
        }

        let writer = &mut self.writer;
        let encoder = &self.encoder;
        let session = self.session;
        let mut storage: Result<(), Error<F::Error>> = Ok(());

        let run = sampler
            .run_sampler(bufs, |buf| {
                // Clamp the final buffer so the region holds exactly the
                // budgeted byte count. Samples are two bytes, so an odd
                // budget rounds up rather than stalling short of it.
                let remaining =
                    session.target_bytes().saturating_sub(session.bytes_written());
                let take = (remaining.div_ceil(2) as usize).min(buf.len());

                for &raw in &buf[..take] {
                    let pcm = encoder.encode(raw);
                    if let Err(e) = writer.write_all(&pcm.to_le_bytes()) {
                        storage = Err(e);
                        return SamplerState::Stopped;
                    }
                }

                if session.advance((take * 2) as u32) {
                    if let Err(e) = writer.flush() {
                        storage = Err(e);
                        return SamplerState::Stopped;
                    }
                    session.complete();
                    return SamplerState::Stopped;
                }
                SamplerState::Sampled
            })
            .await;

        if let Err(e) = run {
            self.session.reset();
            return Err(RecordError::Adc(e));
        }
        if let Err(e) = storage {
            self.session.reset();
            return Err(RecordError::Storage(e));
        }
        Ok(())
    }

    /// Replay the finished recording as a pull-based byte stream:
    /// header first, then the PCM data, in write order.
    ///
    /// The stream borrows the recorder, so no capture or reset can run
    /// until it is dropped.
    pub fn stream<const CHUNK: usize>(
        &mut self,
    ) -> Result<FlashStream<'_, F, CHUNK>, Error<F::Error>> {
        if !self.session.is_recording_ready() {
            return Err(Error::NotReady);
        }
        FlashStream::new(self.writer.flash_mut(), self.header.file_len())
    }

    /// Discard the finished session and re-emit the header for the next
    /// one.
    pub fn reset(&mut self) -> Result<(), Error<F::Error>> {
        self.session.reset();
        self.writer.reset();
        self.writer.write_all(&self.header.to_bytes())
    }
}
