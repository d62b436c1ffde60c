use embedded_storage::nor_flash::ReadNorFlash;

use crate::error::Error;

/// Pull-based byte stream over a recorded flash region.
///
/// Refills a `CHUNK`-byte buffer from flash as the cursor advances, so
/// an upload consumer can drain the whole recording without it ever
/// being resident in RAM. Read-only by contract; the region must be
/// finished before streaming begins, and the mutable borrow of the
/// flash device keeps any writer out for the stream's lifetime.
pub struct FlashStream<'a, F: ReadNorFlash, const CHUNK: usize> {
    flash: &'a mut F,
    /// Next refill offset into the region.
    flash_addr: u32,
    total_len: u32,
    consumed: u32,
    buf: [u8; CHUNK],
    pos: usize,
    filled: usize,
}

impl<'a, F: ReadNorFlash, const CHUNK: usize> FlashStream<'a, F, CHUNK> {
    /// A stream over the first `total_len` bytes of `flash`. The device
    /// must be byte-readable.
    pub fn new(flash: &'a mut F, total_len: u32) -> Result<Self, Error<F::Error>> {
        if CHUNK == 0 || F::READ_SIZE != 1 {
            return Err(Error::Granularity);
        }
        if total_len as usize > flash.capacity() {
            return Err(Error::RegionOverflow);
        }
        let mut stream = Self {
            flash,
            flash_addr: 0,
            total_len,
            consumed: 0,
            buf: [0; CHUNK],
            pos: 0,
            filled: 0,
        };
        if total_len > 0 {
            stream.refill()?;
        }
        Ok(stream)
    }

    pub const fn total_len(&self) -> u32 {
        self.total_len
    }

    /// Bytes obtainable before the next refill, or `None` once the
    /// logical end of the region has been consumed.
    pub fn available(&self) -> Option<usize> {
        let remaining = (self.total_len - self.consumed) as usize;
        if remaining == 0 {
            return None;
        }
        Some((self.filled - self.pos).min(remaining))
    }

    /// The next byte, advancing the cursor. Refills from flash
    /// transparently; past the logical end this is an error, not stale
    /// data.
    pub fn read(&mut self) -> Result<u8, Error<F::Error>> {
        if self.consumed >= self.total_len {
            return Err(Error::EndOfStream);
        }
        let byte = self.buf[self.pos];
        self.pos += 1;
        self.consumed += 1;
        if self.pos == self.filled && self.consumed < self.total_len {
            self.refill()?;
        }
        Ok(byte)
    }

    /// The next byte without advancing.
    pub fn peek(&self) -> Result<u8, Error<F::Error>> {
        if self.consumed >= self.total_len {
            return Err(Error::EndOfStream);
        }
        Ok(self.buf[self.pos])
    }

    fn refill(&mut self) -> Result<(), Error<F::Error>> {
        let n = (CHUNK as u32).min(self.total_len - self.flash_addr) as usize;
        self.flash.read(self.flash_addr, &mut self.buf[..n])?;
        self.flash_addr += n as u32;
        self.pos = 0;
        self.filled = n;
        Ok(())
    }
}
