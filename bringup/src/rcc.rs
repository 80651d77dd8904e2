//! Peripheral clock gates.
//!
//! A peripheral ignores register accesses until its clock gate is enabled. Each peripheral
//! identity in this crate maps to exactly one [Gate], so no identity can be left unclocked.

use crate::device::Registers;

/// Peripheral bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bus {
    /// Low speed bus, at most 36MHz.
    Apb1,
    /// High speed bus, at most 72MHz.
    Apb2,
}

/// Clock enable bit of a peripheral.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Gate {
    pub bus: Bus,
    pub bit: u8,
}

impl Gate {
    #[inline]
    pub const fn apb1(bit: u8) -> Self {
        Self { bus: Bus::Apb1, bit }
    }

    #[inline]
    pub const fn apb2(bit: u8) -> Self {
        Self { bus: Bus::Apb2, bit }
    }

    #[inline]
    const fn mask(self) -> u32 {
        1 << self.bit
    }
}

/// Alternate function IO: EXTI routing and pin remapping.
pub const AFIO: Gate = Gate::apb2(0);

/// Enable the clock of a peripheral.
///
/// Enabling an already enabled gate has no effect.
#[inline]
pub fn enable<R: Registers>(regs: &R, gate: Gate) {
    let rcc = regs.rcc();
    match gate.bus {
        Bus::Apb1 => update!(rcc.apb1enr, 0, gate.mask()),
        Bus::Apb2 => update!(rcc.apb2enr, 0, gate.mask()),
    }
}

/// Disable the clock of a peripheral.
#[inline]
pub fn disable<R: Registers>(regs: &R, gate: Gate) {
    let rcc = regs.rcc();
    match gate.bus {
        Bus::Apb1 => update!(rcc.apb1enr, gate.mask(), 0),
        Bus::Apb2 => update!(rcc.apb2enr, gate.mask(), 0),
    }
}

/// Whether the clock of a peripheral is enabled.
#[inline]
pub fn is_enabled<R: Registers>(regs: &R, gate: Gate) -> bool {
    let rcc = regs.rcc();
    let bits = match gate.bus {
        Bus::Apb1 => rcc.apb1enr.read().bits(),
        Bus::Apb2 => rcc.apb2enr.read().bits(),
    };
    bits & gate.mask() != 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::Sandbox;

    #[test]
    fn enable_sets_only_the_gate_bit() {
        let regs = Sandbox::new();
        enable(&*regs, Gate::apb1(17));
        assert_eq!(regs.rcc().apb1enr.read().bits(), 1 << 17);
        assert_eq!(regs.rcc().apb2enr.read().bits(), 0);

        enable(&*regs, Gate::apb2(3));
        enable(&*regs, Gate::apb2(3));
        assert_eq!(regs.rcc().apb2enr.read().bits(), 1 << 3);
        assert!(is_enabled(&*regs, Gate::apb2(3)));
        assert!(!is_enabled(&*regs, Gate::apb1(3)));
    }

    #[test]
    fn disable_keeps_other_gates() {
        let regs = Sandbox::new();
        enable(&*regs, AFIO);
        enable(&*regs, Gate::apb2(2));
        disable(&*regs, AFIO);
        assert!(!is_enabled(&*regs, AFIO));
        assert!(is_enabled(&*regs, Gate::apb2(2)));
    }
}
