use super::{Gpio, Pin, Port};

macro_rules! pinout {
    ($port:ident: $($name:ident => $pin:ident,)+) => {
        $(
            pub const $name: Gpio = Gpio(Port::$port, Pin::$pin);
        )+
    };
}

pinout!(A:
    PA0 => P0, PA1 => P1, PA2 => P2, PA3 => P3, PA4 => P4, PA5 => P5, PA6 => P6, PA7 => P7,
    PA8 => P8, PA9 => P9, PA10 => P10, PA11 => P11, PA12 => P12, PA13 => P13, PA14 => P14,
    PA15 => P15,
);

pinout!(B:
    PB0 => P0, PB1 => P1, PB2 => P2, PB3 => P3, PB4 => P4, PB5 => P5, PB6 => P6, PB7 => P7,
    PB8 => P8, PB9 => P9, PB10 => P10, PB11 => P11, PB12 => P12, PB13 => P13, PB14 => P14,
    PB15 => P15,
);

pinout!(C:
    PC0 => P0, PC1 => P1, PC2 => P2, PC3 => P3, PC4 => P4, PC5 => P5, PC6 => P6, PC7 => P7,
    PC8 => P8, PC9 => P9, PC10 => P10, PC11 => P11, PC12 => P12, PC13 => P13, PC14 => P14,
    PC15 => P15,
);

pinout!(D:
    PD0 => P0, PD1 => P1, PD2 => P2, PD3 => P3, PD4 => P4, PD5 => P5, PD6 => P6, PD7 => P7,
    PD8 => P8, PD9 => P9, PD10 => P10, PD11 => P11, PD12 => P12, PD13 => P13, PD14 => P14,
    PD15 => P15,
);

pinout!(E:
    PE0 => P0, PE1 => P1, PE2 => P2, PE3 => P3, PE4 => P4, PE5 => P5, PE6 => P6, PE7 => P7,
    PE8 => P8, PE9 => P9, PE10 => P10, PE11 => P11, PE12 => P12, PE13 => P13, PE14 => P14,
    PE15 => P15,
);
