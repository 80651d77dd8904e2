/// Configuration errors.
///
/// Returned before any register has been written, so a failed call leaves the peripheral as it
/// was.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// GPIO pin number outside `0..=15`.
    InvalidPin(u8),
    /// Timer channel index outside `1..=4`.
    InvalidChannel(u8),
    /// Input capture filter outside `0..=15`.
    FilterOutOfRange(u8),
    /// Priorities do not fit the active priority grouping.
    PriorityOutOfRange { preemption: u8, sub: u8 },
    /// Baud rate is zero or its divider does not fit the baud rate register.
    InvalidBaudRate(u32),
}
