use derive_more::From;

/// Errors from the flash-backed pipeline (writer and replay stream).
#[derive(Debug, Clone, Copy, PartialEq, Eq, From)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E: core::fmt::Debug> {
    /// The flash device reported an erase, program, or read failure.
    #[from]
    Flash(E),
    /// The configured page size does not match the device's erase/program
    /// granularity, or the device is not byte-readable.
    Granularity,
    /// A commit would pass the end of the fixed capture region.
    RegionOverflow,
    /// The recording has not reached `Ready`; there is nothing to stream.
    NotReady,
    /// The logical end of the recorded region has been consumed.
    EndOfStream,
}

impl<E: core::fmt::Debug + core::fmt::Display> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Flash(err) => write!(f, "flash device error: {}", err),
            Error::Granularity => {
                write!(f, "page size does not match the device granularity")
            }
            Error::RegionOverflow => {
                write!(f, "write past the end of the capture region")
            }
            Error::NotReady => write!(f, "recording is not ready"),
            Error::EndOfStream => write!(f, "end of recorded region"),
        }
    }
}

/// Errors from a capture run: the sampling side and the storage side
/// fail independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, From)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordError<A: core::fmt::Debug, E: core::fmt::Debug> {
    /// A session is already recording or awaiting consumption.
    Busy,
    /// The ADC/DMA source failed mid-capture.
    Adc(A),
    /// The flash pipeline failed mid-capture.
    #[from]
    Storage(Error<E>),
}

impl<A, E> core::fmt::Display for RecordError<A, E>
where
    A: core::fmt::Debug + core::fmt::Display,
    E: core::fmt::Debug + core::fmt::Display,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RecordError::Busy => write!(f, "a session is already in progress"),
            RecordError::Adc(err) => write!(f, "capture source error: {}", err),
            RecordError::Storage(err) => write!(f, "storage error: {}", err),
        }
    }
}
