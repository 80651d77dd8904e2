use core::convert::TryFrom;

use crate::device::TimBlock;
use crate::rcc::Gate;
use crate::Error;

// TIMx_CR1
pub(super) const CEN: u32 = 1 << 0;
pub(super) const DIR_CMS_MASK: u32 = 0b111 << 4;
pub(super) const CKD_MASK: u32 = 0b11 << 8;
// TIMx_EGR
pub(super) const UG: u32 = 1 << 0;
// TIMx_BDTR
pub(super) const MOE: u32 = 1 << 15;

/// Timers with a time base this crate can configure.
///
/// The basic timers TIM6 and TIM7 have no channels and are left out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Timer {
    Tim1,
    Tim2,
    Tim3,
    Tim4,
    Tim5,
    Tim8,
    Tim9,
    Tim10,
    Tim11,
}

/// Timer channel.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    C1 = 0,
    C2 = 1,
    C3 = 2,
    C4 = 3,
}

impl Timer {
    /// Clock gate of this timer.
    #[inline]
    pub const fn gate(self) -> Gate {
        match self {
            Timer::Tim1 => Gate::apb2(11),
            Timer::Tim2 => Gate::apb1(0),
            Timer::Tim3 => Gate::apb1(1),
            Timer::Tim4 => Gate::apb1(2),
            Timer::Tim5 => Gate::apb1(3),
            Timer::Tim8 => Gate::apb2(13),
            Timer::Tim9 => Gate::apb2(19),
            Timer::Tim10 => Gate::apb2(20),
            Timer::Tim11 => Gate::apb2(21),
        }
    }

    /// Advanced control timers have a repetition counter and a main output enable.
    #[inline]
    pub const fn is_advanced(self) -> bool {
        matches!(self, Timer::Tim1 | Timer::Tim8)
    }

    /// Whether the timer can count down or center aligned. The others only count up.
    #[inline]
    pub const fn has_counter_mode(self) -> bool {
        !matches!(self, Timer::Tim9 | Timer::Tim10 | Timer::Tim11)
    }

    /// Number of capture/compare channels.
    #[inline]
    pub const fn channels(self) -> u8 {
        match self {
            Timer::Tim9 => 2,
            Timer::Tim10 | Timer::Tim11 => 1,
            _ => 4,
        }
    }

    #[inline]
    pub(super) fn check(self, channel: Channel) -> Result<(), Error> {
        if (channel as u8) < self.channels() {
            Ok(())
        } else {
            Err(Error::InvalidChannel(channel.number()))
        }
    }
}

impl Channel {
    /// Channel number as printed in the reference manual, starting at one.
    #[inline]
    pub const fn number(self) -> u8 {
        self as u8 + 1
    }

    /// Bit offset of the channel in TIMx_CCMR1 or TIMx_CCMR2.
    #[inline]
    pub(super) const fn ccmr_shift(self) -> u32 {
        8 * (self as u32 % 2)
    }

    /// Bit offset of the channel in TIMx_CCER.
    #[inline]
    pub(super) const fn ccer_shift(self) -> u32 {
        4 * self as u32
    }
}

/// Channel from its number, `1..=4`.
impl TryFrom<u8> for Channel {
    type Error = Error;

    fn try_from(number: u8) -> Result<Self, Error> {
        match number {
            1 => Ok(Channel::C1),
            2 => Ok(Channel::C2),
            3 => Ok(Channel::C3),
            4 => Ok(Channel::C4),
            _ => Err(Error::InvalidChannel(number)),
        }
    }
}

/// Start the counter.
#[inline]
pub(super) fn enable(tim: &TimBlock) {
    update!(tim.cr1, 0, CEN);
}

/// Read-modify-write the channel's half of its capture/compare mode register.
#[inline]
pub(super) fn update_ccmr(tim: &TimBlock, channel: Channel, clear: u32, set: u32) {
    let shift = channel.ccmr_shift();
    // Input and output views alias the same register.
    match channel {
        Channel::C1 | Channel::C2 => update!(tim.ccmr1_output(), clear << shift, set << shift),
        Channel::C3 | Channel::C4 => update!(tim.ccmr2_output(), clear << shift, set << shift),
    }
}

/// Read-modify-write the channel's nibble of TIMx_CCER.
#[inline]
pub(super) fn update_ccer(tim: &TimBlock, channel: Channel, clear: u32, set: u32) {
    let shift = channel.ccer_shift();
    update!(tim.ccer, clear << shift, set << shift);
}

#[inline]
pub(super) fn write_ccr(tim: &TimBlock, channel: Channel, ccr: u16) {
    match channel {
        Channel::C1 => store!(tim.ccr1, ccr as u32),
        Channel::C2 => store!(tim.ccr2, ccr as u32),
        Channel::C3 => store!(tim.ccr3, ccr as u32),
        Channel::C4 => store!(tim.ccr4, ccr as u32),
    }
}
