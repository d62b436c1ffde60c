use embedded_storage::nor_flash::NorFlash;
use heapless::Vec;

use crate::error::Error;

/// Append-only writer over a fixed flash region starting at offset 0.
///
/// Bytes accumulate in a RAM buffer of the device's erase/program
/// granularity; each time it fills, the sector at the write cursor is
/// erased and programmed in one commit and the cursor advances. The
/// cursor is bounds-checked against the region capacity on every commit.
///
/// Commits are bounded busy-wait operations on the flash device. The
/// capture path accepts that latency as part of its real-time budget.
pub struct FlashWriter<F: NorFlash, const PAGE: usize> {
    flash: F,
    offset: u32,
    capacity: u32,
    buf: Vec<u8, PAGE>,
}

impl<F: NorFlash, const PAGE: usize> FlashWriter<F, PAGE> {
    /// A writer over the first `region_len` bytes of `flash`, rounded up
    /// to whole pages. `PAGE` must be a multiple of the device's erase
    /// and program granularity.
    pub fn new(flash: F, region_len: u32) -> Result<Self, Error<F::Error>> {
        if PAGE == 0
            || PAGE % F::ERASE_SIZE != 0
            || PAGE % F::WRITE_SIZE != 0
        {
            return Err(Error::Granularity);
        }
        let capacity = region_len.div_ceil(PAGE as u32) * PAGE as u32;
        if capacity as usize > flash.capacity() {
            return Err(Error::RegionOverflow);
        }
        Ok(Self { flash, offset: 0, capacity, buf: Vec::new() })
    }

    pub fn write(&mut self, byte: u8) -> Result<(), Error<F::Error>> {
        if self.buf.push(byte).is_err() {
            // The buffer is drained the moment it fills, so a failed
            // push means the region itself is exhausted.
            return Err(Error::RegionOverflow);
        }
        if self.buf.is_full() {
            self.commit()?;
        }
        Ok(())
    }

    pub fn write_all(&mut self, bytes: &[u8]) -> Result<(), Error<F::Error>> {
        for &byte in bytes {
            self.write(byte)?;
        }
        Ok(())
    }

    /// Commit the buffered tail, zero-padded to the program granularity.
    /// Used once at end-of-session; bytes past the WAV data length are
    /// outside the logically valid range.
    pub fn flush(&mut self) -> Result<(), Error<F::Error>> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let padded = self.buf.len().next_multiple_of(F::WRITE_SIZE);
        self.buf.resize(padded, 0).map_err(|_| Error::Granularity)?;
        self.commit()
    }

    /// Cursor back to the start of the region, buffer discarded. Must
    /// only be called once no replay of the previous session is
    /// outstanding.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.buf.clear();
    }

    pub(crate) fn flash_mut(&mut self) -> &mut F {
        &mut self.flash
    }

    fn commit(&mut self) -> Result<(), Error<F::Error>> {
        let end = self.offset + PAGE as u32;
        if end > self.capacity {
            return Err(Error::RegionOverflow);
        }
        self.flash.erase(self.offset, end)?;
        self.flash.write(self.offset, &self.buf)?;
        self.offset = end;
        self.buf.clear();
        Ok(())
    }
}
