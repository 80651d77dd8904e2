//! System clock setup.

use crate::device::Registers;

/// System clock speed in Hertz after [init].
pub const SPEED: u32 = 72_000_000;

/// Internal RC oscillator, the system clock after reset.
const HSI: u32 = 8_000_000;
/// External crystal of the blue pill.
const HSE: u32 = 8_000_000;

// RCC_CR
const HSEON: u32 = 1 << 16;
const HSERDY: u32 = 1 << 17;
const CSSON: u32 = 1 << 19;
const PLLON: u32 = 1 << 24;
const PLLRDY: u32 = 1 << 25;

// RCC_CFGR
const SW_PLL: u32 = 0b10;
const SWS_MASK: u32 = 0b11 << 2;
const SWS_SHIFT: u32 = 2;
const SWS_PLL: u32 = 0b10 << SWS_SHIFT;
const HPRE_SHIFT: u32 = 4;
const PPRE1_SHIFT: u32 = 8;
const PPRE1_DIV2: u32 = 0b100 << PPRE1_SHIFT;
const PPRE2_SHIFT: u32 = 11;
const PLLSRC_HSE: u32 = 1 << 16;
const PLLXTPRE: u32 = 1 << 17;
const PLLMUL_SHIFT: u32 = 18;
const PLLMUL_9: u32 = 0b0111 << PLLMUL_SHIFT;

// FLASH_ACR
const LATENCY_MASK: u32 = 0b111;
const LATENCY_WS2: u32 = 0b010;
const PRFTBE: u32 = 1 << 4;

/// Setup of the system clock.
///
/// Runs the core at [SPEED] from the PLL, APB1 at half speed and APB2 at full speed. Assumes an
/// `8MHz` external crystal is used, as on the blue pill.
///
/// # Safety
///
/// Changes the clock of every peripheral; call once before configuring anything else.
pub unsafe fn init<R: Registers>(regs: &R) {
    let flash = regs.flash();
    let rcc = regs.rcc();

    // Prefetch buffer on, two wait states for 48MHz < SYSCLK <= 72MHz.
    store!(flash.acr, PRFTBE | LATENCY_WS2);
    while flash.acr.read().bits() & LATENCY_MASK != LATENCY_WS2 {}

    update!(rcc.cr, 0, HSEON | CSSON);
    while rcc.cr.read().bits() & HSERDY == 0 {}

    store!(rcc.cfgr, PLLSRC_HSE | PLLMUL_9 | PPRE1_DIV2);
    update!(rcc.cr, 0, PLLON);
    while rcc.cr.read().bits() & PLLRDY == 0 {}

    update!(rcc.cfgr, 0b11, SW_PLL);
    while rcc.cfgr.read().bits() & SWS_MASK != SWS_PLL {}

    debug!("system clock at {=u32} Hz", SPEED);
}

/// System clock speed as selected in RCC_CFGR.
///
/// Assumes the external oscillator, if used, is the `8MHz` crystal.
pub fn sysclk_speed<R: Registers>(regs: &R) -> u32 {
    let cfgr = regs.rcc().cfgr.read().bits();
    match (cfgr >> SWS_SHIFT) & 0b11 {
        0b01 => HSE,
        0b10 => {
            let source = if cfgr & PLLSRC_HSE == 0 {
                HSI / 2
            } else if cfgr & PLLXTPRE != 0 {
                HSE / 2
            } else {
                HSE
            };
            // 0b0000 multiplies by 2, 0b1110 and 0b1111 both by 16.
            let pllmul = ((cfgr >> PLLMUL_SHIFT) & 0b1111).min(0b1110) + 2;
            source * pllmul
        }
        _ => HSI,
    }
}

/// AHB clock speed: the system clock after the AHB prescaler.
pub fn hclk_speed<R: Registers>(regs: &R) -> u32 {
    let hpre = (regs.rcc().cfgr.read().bits() >> HPRE_SHIFT) & 0b1111;
    let shift = match hpre {
        0b1000..=0b1011 => hpre - 0b0111,
        // There is no division by 32.
        0b1100..=0b1111 => hpre - 0b0110,
        _ => 0,
    };
    sysclk_speed(regs) >> shift
}

/// Clock speed for peripherals connected to APB1.
pub fn apb1_speed<R: Registers>(regs: &R) -> u32 {
    bus_speed(regs, PPRE1_SHIFT)
}

/// Clock speed for peripherals connected to APB2.
pub fn apb2_speed<R: Registers>(regs: &R) -> u32 {
    bus_speed(regs, PPRE2_SHIFT)
}

fn bus_speed<R: Registers>(regs: &R, shift: u32) -> u32 {
    let ppre = (regs.rcc().cfgr.read().bits() >> shift) & 0b111;
    if (ppre & 4) > 0 {
        hclk_speed(regs) >> ((ppre & 3) + 1)
    } else {
        hclk_speed(regs)
    }
}

/// RCC_CFGR once [init] has switched to the PLL.
#[cfg(test)]
pub(crate) const CFGR_72MHZ: u32 = SWS_PLL | SW_PLL | PLLSRC_HSE | PLLMUL_9 | PPRE1_DIV2;
