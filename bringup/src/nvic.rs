//! Interrupt controller.
//!
//! The STM32F1 implements four priority bits per interrupt. The [PriorityGrouping] splits them
//! between the preemption priority, which decides whether an interrupt may interrupt another
//! handler, and the sub-priority, which only orders pending interrupts. Lower values win.

use cortex_m::interrupt::Nr;

use crate::device::Registers;
use crate::Error;

/// Implemented priority bits.
const PRIORITY_BITS: u8 = 4;
const VECTKEY: u32 = 0x05FA << 16;
const PRIGROUP_SHIFT: u32 = 8;
const PRIGROUP_MASK: u32 = 0b111 << PRIGROUP_SHIFT;

/// Split of the priority bits: `GroupN` uses `N` bits for the preemption priority and the
/// remaining `4 - N` for the sub-priority.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PriorityGrouping {
    Group0 = 0,
    Group1 = 1,
    Group2 = 2,
    Group3 = 3,
    Group4 = 4,
}

impl PriorityGrouping {
    /// Bits used for the preemption priority.
    #[inline]
    pub const fn preemption_bits(self) -> u8 {
        self as u8
    }

    /// Bits used for the sub-priority.
    #[inline]
    pub const fn sub_bits(self) -> u8 {
        PRIORITY_BITS - self as u8
    }

    #[inline]
    fn prigroup(self) -> u32 {
        (7 - self as u32) << PRIGROUP_SHIFT
    }

    /// Encode both priorities into the upper bits of a priority register.
    fn encode(self, preemption: u8, sub: u8) -> Result<u8, Error> {
        if preemption >> self.preemption_bits() != 0 || sub >> self.sub_bits() != 0 {
            return Err(Error::PriorityOutOfRange { preemption, sub });
        }
        let priority = (preemption << self.sub_bits()) | sub;
        Ok(priority << (8 - PRIORITY_BITS))
    }
}

/// Interrupt channel configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub preemption_priority: u8,
    pub sub_priority: u8,
    /// Unmask the interrupt. When false only the mask is set; the priority is left alone.
    pub enabled: bool,
}

/// Select how the priority bits are split, for the whole system.
///
/// Set it once, before configuring any interrupt channel, and pass the same grouping to
/// [configure].
pub fn set_priority_grouping<R: Registers>(regs: &R, grouping: PriorityGrouping) {
    unsafe { regs.scb().aircr.write(VECTKEY | grouping.prigroup()) };
    debug!("priority grouping {}", grouping);
}

/// The active priority grouping.
pub fn priority_grouping<R: Registers>(regs: &R) -> PriorityGrouping {
    let prigroup = (regs.scb().aircr.read() & PRIGROUP_MASK) >> PRIGROUP_SHIFT;
    match prigroup {
        7 => PriorityGrouping::Group0,
        6 => PriorityGrouping::Group1,
        5 => PriorityGrouping::Group2,
        4 => PriorityGrouping::Group3,
        // Fewer sub-priority bits than implemented all mean four preemption bits.
        _ => PriorityGrouping::Group4,
    }
}

/// Configure the priority of an interrupt channel and unmask or mask it.
///
/// Priorities are interpreted with the given `grouping`, which must match the one set with
/// [set_priority_grouping]. A priority that does not fit its share of the bits is rejected with
/// [Error::PriorityOutOfRange] before anything is written.
pub fn configure<R: Registers, I: Nr>(
    regs: &R,
    grouping: PriorityGrouping,
    interrupt: I,
    config: Config,
) -> Result<(), Error> {
    let nr = interrupt.nr() as usize;
    let nvic = regs.nvic();
    let bit = 1 << (nr % 32);

    if config.enabled {
        let priority = grouping.encode(config.preemption_priority, config.sub_priority)?;
        unsafe {
            nvic.ipr[nr].write(priority);
            nvic.iser[nr / 32].write(bit);
        }
    } else {
        unsafe { nvic.icer[nr / 32].write(bit) };
    }
    trace!("irq {=usize} {}", nr, config);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::Sandbox;
    use stm32f1xx_hal::pac::Interrupt;

    const GROUPINGS: [PriorityGrouping; 5] = [
        PriorityGrouping::Group0,
        PriorityGrouping::Group1,
        PriorityGrouping::Group2,
        PriorityGrouping::Group3,
        PriorityGrouping::Group4,
    ];

    #[test]
    fn grouping_round_trips_through_aircr() {
        let regs = Sandbox::new();
        for &grouping in GROUPINGS.iter() {
            set_priority_grouping(&*regs, grouping);
            assert_eq!(regs.scb().aircr.read() >> 16, 0x05FA);
            assert_eq!(priority_grouping(&*regs), grouping);
        }
        set_priority_grouping(&*regs, PriorityGrouping::Group4);
        assert_eq!(regs.scb().aircr.read() & PRIGROUP_MASK, 0x300);
    }

    #[test]
    fn enabling_writes_priority_and_unmasks() {
        let regs = Sandbox::new();
        let config = Config {
            preemption_priority: 2,
            sub_priority: 1,
            enabled: true,
        };
        configure(&*regs, PriorityGrouping::Group2, Interrupt::USART1, config).unwrap();
        let nvic = regs.nvic();
        // 0b10 preemption, 0b01 sub, in the upper nibble.
        assert_eq!(nvic.ipr[37].read(), 0b1001 << 4);
        assert_eq!(nvic.iser[1].read(), 1 << 5);
        assert_eq!(nvic.icer[1].read(), 0);
    }

    #[test]
    fn grouping_changes_the_encoding() {
        let regs = Sandbox::new();
        let config = Config {
            preemption_priority: 0,
            sub_priority: 15,
            enabled: true,
        };
        configure(&*regs, PriorityGrouping::Group0, Interrupt::TIM2, config).unwrap();
        assert_eq!(regs.nvic().ipr[28].read(), 0xF0);
        assert_eq!(regs.nvic().iser[0].read(), 1 << 28);

        let config = Config {
            preemption_priority: 15,
            sub_priority: 0,
            enabled: true,
        };
        configure(&*regs, PriorityGrouping::Group4, Interrupt::EXTI0, config).unwrap();
        assert_eq!(regs.nvic().ipr[6].read(), 0xF0);
        // Set-enable only writes the new bit; the sandbox keeps the last write.
        assert_eq!(regs.nvic().iser[0].read(), 1 << 6);
        assert_eq!(regs.nvic().ipr[28].read(), 0xF0);
    }

    #[test]
    fn disabling_only_masks() {
        let regs = Sandbox::new();
        let config = Config {
            preemption_priority: 3,
            sub_priority: 3,
            enabled: false,
        };
        configure(&*regs, PriorityGrouping::Group2, Interrupt::TIM2, config).unwrap();
        assert_eq!(regs.nvic().icer[0].read(), 1 << 28);
        assert_eq!(regs.nvic().iser[0].read(), 0);
        assert_eq!(regs.nvic().ipr[28].read(), 0);
    }

    #[test]
    fn priorities_must_fit_the_grouping() {
        let regs = Sandbox::new();
        let untouched = regs.bytes().to_vec();
        for &(grouping, preemption, sub) in [
            (PriorityGrouping::Group0, 1, 0),
            (PriorityGrouping::Group1, 2, 0),
            (PriorityGrouping::Group2, 0, 4),
            (PriorityGrouping::Group4, 0, 1),
        ]
        .iter()
        {
            let config = Config {
                preemption_priority: preemption,
                sub_priority: sub,
                enabled: true,
            };
            assert_eq!(
                configure(&*regs, grouping, Interrupt::TIM3, config),
                Err(Error::PriorityOutOfRange { preemption, sub })
            );
        }
        assert_eq!(regs.bytes(), &untouched[..]);
    }
}
