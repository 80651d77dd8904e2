//! Register map access.
//!
//! Every configuration function writes through a [Registers] implementation instead of stealing
//! the peripherals itself. [Device] maps it onto the memory mapped peripherals of the chip.

use cortex_m::peripheral::{NVIC, SCB};
use stm32f1xx_hal::pac;

use crate::{gpio::Port, timer::Timer, uart::Usart};

pub type RccBlock = pac::rcc::RegisterBlock;
pub type FlashBlock = pac::flash::RegisterBlock;
pub type AfioBlock = pac::afio::RegisterBlock;
pub type ExtiBlock = pac::exti::RegisterBlock;
pub type GpioBlock = pac::gpioa::RegisterBlock;
pub type UsartBlock = pac::usart1::RegisterBlock;
pub type NvicBlock = cortex_m::peripheral::nvic::RegisterBlock;
pub type ScbBlock = cortex_m::peripheral::scb::RegisterBlock;

/// Timer register layout.
///
/// All F1 timers share the register offsets of the advanced control timer; registers a timer does
/// not implement are reserved and never touched for that timer.
pub type TimBlock = pac::tim1::RegisterBlock;

/// Access to the peripheral register blocks.
pub trait Registers {
    fn rcc(&self) -> &RccBlock;
    fn flash(&self) -> &FlashBlock;
    fn afio(&self) -> &AfioBlock;
    fn exti(&self) -> &ExtiBlock;
    fn gpio(&self, port: Port) -> &GpioBlock;
    fn tim(&self, timer: Timer) -> &TimBlock;
    fn usart(&self, usart: Usart) -> &UsartBlock;
    fn nvic(&self) -> &NvicBlock;
    fn scb(&self) -> &ScbBlock;
}

/// The memory mapped peripherals of the STM32F103.
#[derive(Clone, Copy, Debug)]
pub struct Device {
    _private: (),
}

impl Device {
    /// Get access to the peripheral registers.
    ///
    /// # Safety
    ///
    /// No ownership is tracked. The caller must make sure no interrupt handler touches a
    /// peripheral while it is being configured through this handle.
    #[inline]
    pub unsafe fn steal() -> Self {
        Self { _private: () }
    }
}

impl Registers for Device {
    #[inline]
    fn rcc(&self) -> &RccBlock {
        unsafe { &*pac::RCC::ptr() }
    }

    #[inline]
    fn flash(&self) -> &FlashBlock {
        unsafe { &*pac::FLASH::ptr() }
    }

    #[inline]
    fn afio(&self) -> &AfioBlock {
        unsafe { &*pac::AFIO::ptr() }
    }

    #[inline]
    fn exti(&self) -> &ExtiBlock {
        unsafe { &*pac::EXTI::ptr() }
    }

    #[inline]
    fn gpio(&self, port: Port) -> &GpioBlock {
        let ptr = match port {
            Port::A => pac::GPIOA::ptr() as *const GpioBlock,
            Port::B => pac::GPIOB::ptr() as *const GpioBlock,
            Port::C => pac::GPIOC::ptr() as *const GpioBlock,
            Port::D => pac::GPIOD::ptr() as *const GpioBlock,
            Port::E => pac::GPIOE::ptr() as *const GpioBlock,
        };
        unsafe { &*ptr }
    }

    #[inline]
    fn tim(&self, timer: Timer) -> &TimBlock {
        let ptr = match timer {
            Timer::Tim1 => pac::TIM1::ptr() as *const TimBlock,
            Timer::Tim2 => pac::TIM2::ptr() as *const TimBlock,
            Timer::Tim3 => pac::TIM3::ptr() as *const TimBlock,
            Timer::Tim4 => pac::TIM4::ptr() as *const TimBlock,
            Timer::Tim5 => pac::TIM5::ptr() as *const TimBlock,
            Timer::Tim8 => pac::TIM8::ptr() as *const TimBlock,
            Timer::Tim9 => pac::TIM9::ptr() as *const TimBlock,
            Timer::Tim10 => pac::TIM10::ptr() as *const TimBlock,
            Timer::Tim11 => pac::TIM11::ptr() as *const TimBlock,
        };
        unsafe { &*ptr }
    }

    #[inline]
    fn usart(&self, usart: Usart) -> &UsartBlock {
        let ptr = match usart {
            Usart::Usart1 => pac::USART1::ptr() as *const UsartBlock,
            Usart::Usart2 => pac::USART2::ptr() as *const UsartBlock,
            Usart::Usart3 => pac::USART3::ptr() as *const UsartBlock,
        };
        unsafe { &*ptr }
    }

    #[inline]
    fn nvic(&self) -> &NvicBlock {
        unsafe { &*NVIC::ptr() }
    }

    #[inline]
    fn scb(&self) -> &ScbBlock {
        unsafe { &*SCB::ptr() }
    }
}
