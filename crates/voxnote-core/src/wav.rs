/// Size of the canonical RIFF/WAVE header preceding the PCM data.
pub const WAV_HEADER_LEN: usize = 44;

/// The 44-byte header for a mono, 16-bit PCM WAV file.
///
/// The data length is fixed up front from the capture budget; a session
/// always runs to exactly that budget, so the optimistic header is also
/// the exact one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WavHeader {
    sample_rate: u32,
    data_len: u32,
}

impl WavHeader {
    pub const fn new(sample_rate: u32, data_len: u32) -> Self {
        Self { sample_rate, data_len }
    }

    pub const fn data_len(&self) -> u32 {
        self.data_len
    }

    /// Total file length: header plus PCM data.
    pub const fn file_len(&self) -> u32 {
        WAV_HEADER_LEN as u32 + self.data_len
    }

    pub fn to_bytes(&self) -> [u8; WAV_HEADER_LEN] {
        let mut h = [0u8; WAV_HEADER_LEN];
        h[0..4].copy_from_slice(b"RIFF");
        h[4..8].copy_from_slice(&(36 + self.data_len).to_le_bytes());
        h[8..12].copy_from_slice(b"WAVE");
        h[12..16].copy_from_slice(b"fmt ");
        h[16..20].copy_from_slice(&16u32.to_le_bytes());
        h[20..22].copy_from_slice(&1u16.to_le_bytes()); // PCM
        h[22..24].copy_from_slice(&1u16.to_le_bytes()); // mono
        h[24..28].copy_from_slice(&self.sample_rate.to_le_bytes());
        h[28..32].copy_from_slice(&(self.sample_rate * 2).to_le_bytes());
        h[32..34].copy_from_slice(&2u16.to_le_bytes()); // block align
        h[34..36].copy_from_slice(&16u16.to_le_bytes()); // bits per sample
        h[36..40].copy_from_slice(b"data");
        h[40..44].copy_from_slice(&self.data_len.to_le_bytes());
        h
    }
}
