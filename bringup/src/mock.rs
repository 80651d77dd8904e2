//! In-memory register map for the unit tests.

use crate::device::*;
use crate::{gpio::Port, timer::Timer, uart::Usart};

/// Zero initialized copies of every register block, as after a reset with all clocks gated.
#[repr(C)]
pub(crate) struct Sandbox {
    rcc: RccBlock,
    flash: FlashBlock,
    afio: AfioBlock,
    exti: ExtiBlock,
    gpio: [GpioBlock; 5],
    tim: [TimBlock; 9],
    usart: [UsartBlock; 3],
    nvic: NvicBlock,
    scb: ScbBlock,
}

impl Sandbox {
    pub(crate) fn new() -> Box<Self> {
        // All blocks are plain volatile cells, for which all zeroes is a valid value. Allocating
        // zeroed memory in place also zeroes any padding read back by `bytes`.
        let layout = std::alloc::Layout::new::<Self>();
        unsafe {
            let ptr = std::alloc::alloc_zeroed(layout) as *mut Self;
            assert!(!ptr.is_null());
            Box::from_raw(ptr)
        }
    }

    /// Raw view of every register, for comparing two sandboxes.
    pub(crate) fn bytes(&self) -> &[u8] {
        unsafe {
            core::slice::from_raw_parts(
                self as *const Self as *const u8,
                core::mem::size_of::<Self>(),
            )
        }
    }
}

/// Read back a register the PAC only exposes for writing.
pub(crate) fn peek<T>(reg: &T) -> u32 {
    unsafe { core::ptr::read_volatile(reg as *const T as *const u32) }
}

impl Registers for Sandbox {
    fn rcc(&self) -> &RccBlock {
        &self.rcc
    }

    fn flash(&self) -> &FlashBlock {
        &self.flash
    }

    fn afio(&self) -> &AfioBlock {
        &self.afio
    }

    fn exti(&self) -> &ExtiBlock {
        &self.exti
    }

    fn gpio(&self, port: Port) -> &GpioBlock {
        &self.gpio[port.index() as usize]
    }

    fn tim(&self, timer: Timer) -> &TimBlock {
        let index = match timer {
            Timer::Tim1 => 0,
            Timer::Tim2 => 1,
            Timer::Tim3 => 2,
            Timer::Tim4 => 3,
            Timer::Tim5 => 4,
            Timer::Tim8 => 5,
            Timer::Tim9 => 6,
            Timer::Tim10 => 7,
            Timer::Tim11 => 8,
        };
        &self.tim[index]
    }

    fn usart(&self, usart: Usart) -> &UsartBlock {
        let index = match usart {
            Usart::Usart1 => 0,
            Usart::Usart2 => 1,
            Usart::Usart3 => 2,
        };
        &self.usart[index]
    }

    fn nvic(&self) -> &NvicBlock {
        &self.nvic
    }

    fn scb(&self) -> &ScbBlock {
        &self.scb
    }
}
