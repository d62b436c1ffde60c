use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use adc_sampler::{AdcDma, Config, Resolution, Sampler, SamplerState};

// ---------------------------------------------------------------------------
// Mock ADC/DMA sources
// ---------------------------------------------------------------------------

/// Fills each requested buffer with consecutive conversion codes and logs
/// the address of the buffer it was asked to fill.
struct RampAdc {
    next: u16,
    captures: Arc<AtomicUsize>,
    buf_addrs: Arc<Mutex<Vec<usize>>>,
}

impl RampAdc {
    fn new() -> (Self, Arc<AtomicUsize>, Arc<Mutex<Vec<usize>>>) {
        let captures = Arc::new(AtomicUsize::new(0));
        let buf_addrs = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                next: 0,
                captures: captures.clone(),
                buf_addrs: buf_addrs.clone(),
            },
            captures,
            buf_addrs,
        )
    }
}

impl AdcDma for RampAdc {
    type Error = ();

    async fn capture(&mut self, buf: &mut [u16]) -> Result<(), ()> {
        self.captures.fetch_add(1, Ordering::SeqCst);
        self.buf_addrs.lock().unwrap().push(buf.as_ptr() as usize);
        for slot in buf.iter_mut() {
            *slot = self.next;
            self.next = self.next.wrapping_add(1);
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq)]
struct AdcFault;

/// Fails on the n-th capture (0-based).
struct FaultyAdc {
    fail_at: usize,
    calls: usize,
}

impl AdcDma for FaultyAdc {
    type Error = AdcFault;

    async fn capture(&mut self, buf: &mut [u16]) -> Result<(), AdcFault> {
        if self.calls == self.fail_at {
            return Err(AdcFault);
        }
        self.calls += 1;
        buf.fill(0);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[futures_test::test]
async fn buffers_alternate_strictly() {
    let (adc, captures, addrs) = RampAdc::new();
    let mut sampler = Sampler::new(adc, Config::default());
    let mut bufs = [[0u16; 8]; 2];

    let mut seen = 0;
    sampler
        .run_sampler(&mut bufs, |_| {
            seen += 1;
            if seen == 6 {
                SamplerState::Stopped
            } else {
                SamplerState::Sampled
            }
        })
        .await
        .unwrap();

    assert_eq!(captures.load(Ordering::SeqCst), 6);

    // Exactly two distinct hardware buffers, in ping-pong order.
    let addrs = addrs.lock().unwrap();
    assert_ne!(addrs[0], addrs[1]);
    for (i, addr) in addrs.iter().enumerate() {
        assert_eq!(*addr, addrs[i % 2]);
    }
}

#[futures_test::test]
async fn sample_order_is_preserved_across_buffers() {
    let (adc, _, _) = RampAdc::new();
    let mut sampler = Sampler::new(adc, Config::default());
    let mut bufs = [[0u16; 4]; 2];

    let mut collected = Vec::new();
    sampler
        .run_sampler(&mut bufs, |buf| {
            collected.extend_from_slice(buf);
            if collected.len() >= 12 {
                SamplerState::Stopped
            } else {
                SamplerState::Sampled
            }
        })
        .await
        .unwrap();

    let expected: Vec<u16> = (0..12).collect();
    assert_eq!(collected, expected);
}

#[futures_test::test]
async fn stop_finishes_after_current_buffer() {
    let (adc, captures, _) = RampAdc::new();
    let mut sampler = Sampler::new(adc, Config::default());
    let mut bufs = [[0u16; 4]; 2];

    sampler.run_sampler(&mut bufs, |_| SamplerState::Stopped).await.unwrap();

    assert_eq!(captures.load(Ordering::SeqCst), 1);
}

#[futures_test::test]
async fn capture_error_aborts_the_run() {
    let adc = FaultyAdc { fail_at: 2, calls: 0 };
    let mut sampler = Sampler::new(adc, Config::default());
    let mut bufs = [[0u16; 4]; 2];

    let mut completed = 0;
    let result = sampler
        .run_sampler(&mut bufs, |_| {
            completed += 1;
            SamplerState::Sampled
        })
        .await;

    assert_eq!(result, Err(AdcFault));
    assert_eq!(completed, 2);
}

#[futures_test::test]
async fn one_shot_sample_fills_the_buffer() {
    let (adc, captures, _) = RampAdc::new();
    let mut sampler = Sampler::new(adc, Config::default());

    let mut buf = [0u16; 16];
    sampler.sample(&mut buf).await.unwrap();

    assert_eq!(captures.load(Ordering::SeqCst), 1);
    assert_eq!(buf[0], 0);
    assert_eq!(buf[15], 15);
}

#[test]
fn default_config_is_12_bit_16_khz() {
    let config = Config::default();
    assert_eq!(config.resolution, Resolution::Bits12);
    assert_eq!(config.sample_rate_hz, 16_000);
}

#[test]
fn resolution_midpoints() {
    assert_eq!(Resolution::Bits8.midpoint(), 128);
    assert_eq!(Resolution::Bits10.midpoint(), 512);
    assert_eq!(Resolution::Bits12.midpoint(), 2048);
}
