#![no_std]
#![allow(async_fn_in_trait)]

//! Generic double-buffered ADC sampler.
//!
//! A timer-paced ADC with a DMA engine fills one fixed-size sample buffer
//! while the CPU consumes the other; on each buffer-complete event the
//! roles swap. This crate captures that ping-pong contract behind the
//! [`AdcDma`] trait so the same sampler loop runs against a real
//! timer/ADC/DMA chain or a host-side test double.
//!
//! Buffer ownership is an explicit index into a fixed two-element array,
//! toggled after each completion, rather than implicit DMA descriptor
//! state.

/// Continuation decision returned by the sampler callback after each
/// completed buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SamplerState {
    /// Keep sampling into the other buffer.
    Sampled,
    /// Finish the run after this buffer.
    Stopped,
}

/// ADC conversion depth. The converter emits unsigned codes in
/// `0..(1 << bits)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    Bits8,
    Bits10,
    Bits12,
}

impl Resolution {
    pub const fn bits(self) -> u32 {
        match self {
            Resolution::Bits8 => 8,
            Resolution::Bits10 => 10,
            Resolution::Bits12 => 12,
        }
    }

    /// The code produced by a quiescent input at half of full scale.
    pub const fn midpoint(self) -> u16 {
        1 << (self.bits() - 1)
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::Bits12
    }
}

/// Capture configuration.
///
/// The conversion clocking itself (timer period, DMA descriptors) belongs
/// to the [`AdcDma`] implementation; this struct carries the parameters
/// downstream consumers need to interpret the samples.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub resolution: Resolution,
    pub sample_rate_hz: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self { resolution: Resolution::default(), sample_rate_hz: 16_000 }
    }
}

/// The hardware seam: a timer-paced ADC feeding a DMA engine.
///
/// `capture` resolves once `buf` holds the next `buf.len()` conversions
/// in capture order. Implementations wrap the platform's buffer-complete
/// signal; they must not skip or reorder conversions between consecutive
/// calls.
pub trait AdcDma {
    type Error: core::fmt::Debug;

    async fn capture(&mut self, buf: &mut [u16]) -> Result<(), Self::Error>;
}

/// Double-buffered sampler over an [`AdcDma`] source.
pub struct Sampler<T: AdcDma> {
    adc: T,
    config: Config,
}

impl<T: AdcDma> Sampler<T> {
    pub fn new(adc: T, config: Config) -> Self {
        Self { adc, config }
    }

    pub fn config(&self) -> Config {
        self.config
    }

    /// Capture a single buffer of samples.
    pub async fn sample(&mut self, buf: &mut [u16]) -> Result<(), T::Error> {
        self.adc.capture(buf).await
    }

    /// Run a continuous double-buffered sampler.
    ///
    /// Buffers are filled strictly alternately, `bufs[0]` first. After
    /// each completed buffer the `sampler` callback is invoked with its
    /// contents; return [`SamplerState::Sampled`] to continue or
    /// [`SamplerState::Stopped`] to finish. A capture error aborts the
    /// run and propagates.
    ///
    /// The callback runs in the capture context and must complete before
    /// the next buffer-complete event; it must not block unboundedly.
    pub async fn run_sampler<S, const N: usize>(
        &mut self,
        bufs: &mut [[u16; N]; 2],
        mut sampler: S,
    ) -> Result<(), T::Error>
    where
        S: FnMut(&[u16; N]) -> SamplerState,
    {
        let mut parity = 0;
        loop {
            self.adc.capture(&mut bufs[parity]).await?;
            if let SamplerState::Stopped = sampler(&bufs[parity]) {
                return Ok(());
            }
            parity ^= 1;
        }
    }
}
