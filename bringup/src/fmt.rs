//! Logging macros.
//!
//! Forwarded to `defmt` when the `defmt` feature is enabled, otherwise the arguments are only
//! borrowed so that they do not trigger unused warnings.
#![allow(unused_macros)]

macro_rules! trace {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::trace!($s $(, $x)*);
            #[cfg(not(feature = "defmt"))]
            let _ = ($( & $x ),*);
        }
    };
}

macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::debug!($s $(, $x)*);
            #[cfg(not(feature = "defmt"))]
            let _ = ($( & $x ),*);
        }
    };
}

macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::warn!($s $(, $x)*);
            #[cfg(not(feature = "defmt"))]
            let _ = ($( & $x ),*);
        }
    };
}

/// Read-modify-write of a PAC register: clear the bits in `clear`, then set the bits in `set`.
macro_rules! update {
    ($reg:expr, $clear:expr, $set:expr) => {
        $reg.modify(|r, w| {
            #[allow(unused_unsafe)]
            let w = unsafe { w.bits((r.bits() & !($clear)) | ($set)) };
            w
        })
    };
}

/// Overwrite a PAC register.
macro_rules! store {
    ($reg:expr, $value:expr) => {
        $reg.write(|w| {
            #[allow(unused_unsafe)]
            let w = unsafe { w.bits($value) };
            w
        })
    };
}
