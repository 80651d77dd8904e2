use crate::device::Registers;
use crate::rcc::{Bus, Gate};
use crate::{clock, gpio, Error};

// USART_CR1
pub(super) const UE: u32 = 1 << 13;
pub(super) const M: u32 = 1 << 12;
pub(super) const PCE: u32 = 1 << 10;
pub(super) const PS: u32 = 1 << 9;
pub(super) const TE: u32 = 1 << 3;
pub(super) const RE: u32 = 1 << 2;
// USART_CR2
pub(super) const STOP_MASK: u32 = 0b11 << 12;
// USART_CR3
pub(super) const RTSE: u32 = 1 << 8;
pub(super) const CTSE: u32 = 1 << 9;

/// Available USART peripherals.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Usart {
    Usart1,
    Usart2,
    Usart3,
}

impl Usart {
    /// Clock gate of this USART.
    #[inline]
    pub const fn gate(self) -> Gate {
        match self {
            Self::Usart1 => Gate::apb2(14),
            Self::Usart2 => Gate::apb1(17),
            Self::Usart3 => Gate::apb1(18),
        }
    }

    /// The transmit pin, without remapping.
    #[inline]
    pub const fn tx_pin(self) -> gpio::Gpio {
        match self {
            Self::Usart1 => gpio::PA9,
            Self::Usart2 => gpio::PA2,
            Self::Usart3 => gpio::PB10,
        }
    }

    /// The receive pin, without remapping.
    #[inline]
    pub const fn rx_pin(self) -> gpio::Gpio {
        match self {
            Self::Usart1 => gpio::PA10,
            Self::Usart2 => gpio::PA3,
            Self::Usart3 => gpio::PB11,
        }
    }

    /// Clock speed of the bus the USART is connected to.
    #[inline]
    pub fn clock_speed<R: Registers>(self, regs: &R) -> u32 {
        match self.gate().bus {
            Bus::Apb1 => clock::apb1_speed(regs),
            Bus::Apb2 => clock::apb2_speed(regs),
        }
    }
}

/// Baud rate register value: `clock / baudrate` as a 12.4 fixed point number, rounded to the
/// nearest sixteenth.
pub(super) fn brr(clock: u32, baudrate: u32) -> Result<u32, Error> {
    if baudrate == 0 {
        return Err(Error::InvalidBaudRate(baudrate));
    }
    // Hundredths of the divider.
    let divider = 25 * clock as u64 / (4 * baudrate as u64);
    let mantissa = divider / 100;
    let fraction = ((divider - mantissa * 100) * 16 + 50) / 100;
    // A fraction rounded up to 16 carries into the mantissa.
    let brr = (mantissa << 4) + fraction;
    if mantissa == 0 || brr > 0xFFFF {
        return Err(Error::InvalidBaudRate(baudrate));
    }
    Ok(brr as u32)
}
