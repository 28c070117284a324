use avr_device::atmega128a::ADC;

#[derive(Clone, Copy)]
#[repr(u8)]
pub enum AdcChannel {
    Adc0 = 0,
    Adc1 = 1,
    Adc2 = 2,
    Adc3 = 3,
    Adc4 = 4,
    Adc5 = 5,
    Adc6 = 6,
    Adc7 = 7,
}

#[derive(Clone, Copy)]
#[repr(u8)]
pub enum AdcReference {
    Aref = 0,            // External AREF
    Avcc = 1,            // AVCC with external cap at AREF
    Internal2_56V = 3,   // Internal 2.56V with external cap at AREF
}

// ADCSRA
const ADEN: u8 = 1 << 7;
const ADSC: u8 = 1 << 6;
// Div128: 125kHz conversion clock at 16MHz
const PRESCALER_DIV128: u8 = 0b111;

pub struct Adc {
    adc: ADC,
}

impl Adc {
    pub fn new(adc: ADC) -> Self {
        adc.adcsra.write(|w| unsafe { w.bits(ADEN | PRESCALER_DIV128) });
        let mut adc = Self { adc };
        adc.set_reference(AdcReference::Avcc);
        adc
    }

    pub fn set_reference(&mut self, reference: AdcReference) {
        self.adc
            .admux
            .modify(|r, w| unsafe { w.bits((r.bits() & 0x3F) | ((reference as u8) << 6)) });
    }

    /// Blocking 10-bit conversion, roughly 100us.
    pub fn read_channel(&mut self, channel: AdcChannel) -> u16 {
        // Select channel
        self.adc
            .admux
            .modify(|r, w| unsafe { w.bits((r.bits() & 0xE0) | (channel as u8)) });

        // Start conversion and wait for completion
        self.adc.adcsra.modify(|r, w| unsafe { w.bits(r.bits() | ADSC) });
        while self.adc.adcsra.read().bits() & ADSC != 0 {}

        self.adc.adc.read().bits() & 0x03FF
    }

    pub fn release(self) -> ADC {
        self.adc.adcsra.write(|w| unsafe { w.bits(0) });
        self.adc
    }
}
