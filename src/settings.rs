/// Crystal oscillator frequency in Hz.
pub const SX127X_FXOSC: u64 = 32_000_000;
/// The synthesizer step is FXOSC / 2^19.
pub const SX127X_FSTEP_SHIFT: u32 = 19;

pub const CHIP_VERSION: u8 = 0x12;

pub const RF_OPMODE_LOWFREQUENCYMODEON: u8 = 0x08;
pub const RF_PACONFIG_MAX_POWER: u8 = 0x70;
pub const RF_OOKPEAK_THRESHTYPE_PEAK: u8 = 0x08;
pub const RF_SYNCCONFIG_OFF: u8 = 0x00;
pub const RF_PACKETCONFIG_CONTINUOUS: u8 = 0x00;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Modulation {
    Fsk = 0x00,
    Ook = 0x20,
}

impl Modulation {
    pub fn name(self) -> &'static str {
        match self {
            Self::Fsk => "FSK",
            Self::Ook => "OOK",
        }
    }
}

/// Power amplifier output pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PaPin {
    Rfo = 0x00,
    PaBoost = 0x80,
}

impl PaPin {
    pub fn name(self) -> &'static str {
        match self {
            Self::Rfo => "RFO",
            Self::PaBoost => "PA_BOOST",
        }
    }

    /// Valid output power range in dBm for this pin.
    pub fn power_range(self) -> (i8, i8) {
        match self {
            Self::Rfo => (0, 14),
            Self::PaBoost => (2, 17),
        }
    }

    pub fn clamp_power(self, power: i8) -> i8 {
        let (min, max) = self.power_range();
        power.clamp(min, max)
    }

    /// RegPaConfig value for `power`, clamped to this pin's range first.
    pub fn pa_config(self, power: i8) -> u8 {
        let (floor, _) = self.power_range();
        let power = self.clamp_power(power);
        ((power - floor) as u8) | self as u8 | RF_PACONFIG_MAX_POWER
    }
}

/// Channel filter bandwidth presets, stored as the raw RegRxBw value
/// (mantissa field in bits 4..3, exponent in bits 2..0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxBandwidth {
    Bw2_6kHz = 0x17,
    Bw3_1kHz = 0x0F,
    Bw3_9kHz = 0x07,
    Bw5_2kHz = 0x16,
    Bw6_3kHz = 0x0E,
    Bw7_8kHz = 0x06,
    Bw10_4kHz = 0x15,
    Bw12_5kHz = 0x0D,
    Bw15_6kHz = 0x05,
    Bw20_8kHz = 0x14,
    Bw25_0kHz = 0x0C,
    Bw31_3kHz = 0x04,
    Bw41_7kHz = 0x13,
    Bw50_0kHz = 0x0B,
    Bw62_5kHz = 0x03,
    Bw83_3kHz = 0x12,
    Bw100_0kHz = 0x0A,
    Bw125_0kHz = 0x02,
    Bw166_7kHz = 0x11,
    Bw200_0kHz = 0x09,
    Bw250_0kHz = 0x01,
}

impl RxBandwidth {
    pub const ALL: [RxBandwidth; 21] = [
        Self::Bw2_6kHz,
        Self::Bw3_1kHz,
        Self::Bw3_9kHz,
        Self::Bw5_2kHz,
        Self::Bw6_3kHz,
        Self::Bw7_8kHz,
        Self::Bw10_4kHz,
        Self::Bw12_5kHz,
        Self::Bw15_6kHz,
        Self::Bw20_8kHz,
        Self::Bw25_0kHz,
        Self::Bw31_3kHz,
        Self::Bw41_7kHz,
        Self::Bw50_0kHz,
        Self::Bw62_5kHz,
        Self::Bw83_3kHz,
        Self::Bw100_0kHz,
        Self::Bw125_0kHz,
        Self::Bw166_7kHz,
        Self::Bw200_0kHz,
        Self::Bw250_0kHz,
    ];

    #[inline]
    pub fn raw(self) -> u8 {
        self as u8
    }

    pub fn from_raw(raw: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|bw| bw.raw() == raw)
    }

    pub fn hz(self) -> f32 {
        rx_bandwidth_hz(self.raw())
    }
}

/// Decodes a raw RegRxBw value into the filter bandwidth in Hz.
pub fn rx_bandwidth_hz(raw: u8) -> f32 {
    let mant = 16 + (raw as u32 >> 3) * 4;
    let exp = raw as u32 & 0x07;
    SX127X_FXOSC as f32 / (mant * (1 << (exp + 2))) as f32
}

/// Synthesizer word for a carrier frequency, split MSB, MID, LSB.
pub fn frf_bytes(frequency: u32) -> [u8; 3] {
    let frf = ((frequency as u64) << SX127X_FSTEP_SHIFT) / SX127X_FXOSC;
    [
        ((frf >> 16) & 0xFF) as u8,
        ((frf >> 8) & 0xFF) as u8,
        (frf & 0xFF) as u8,
    ]
}

/// RegOokFix value for a floor in dBm. The fractional half-dB is truncated.
pub fn ook_fix(rx_floor: f32) -> u8 {
    (256 + (rx_floor * 2.0) as i32) as u8
}

#[cfg(test)]
mod test {
    use super::*;

    fn frf_to_hz(bytes: [u8; 3]) -> f64 {
        let frf = (bytes[0] as u64) << 16 | (bytes[1] as u64) << 8 | bytes[2] as u64;
        frf as f64 * SX127X_FXOSC as f64 / (1u64 << SX127X_FSTEP_SHIFT) as f64
    }

    #[test]
    fn test_frf_bytes() {
        assert_eq!(frf_bytes(433_920_000), [0x6C, 0x7A, 0xE1]);
        assert_eq!(frf_bytes(868_000_000), [0xD9, 0x00, 0x00]);
        assert_eq!(frf_bytes(915_000_000), [0xE4, 0xC0, 0x00]);
    }

    #[test]
    fn test_frf_within_one_step() {
        let step = SX127X_FXOSC as f64 / (1u64 << SX127X_FSTEP_SHIFT) as f64;
        let mut frequency = 137_000_000u32;
        while frequency <= 1_020_000_000 {
            let back = frf_to_hz(frf_bytes(frequency));
            let error = frequency as f64 - back;
            assert!((0.0..step).contains(&error), "{frequency} -> {back}");
            frequency += 7_777_777;
        }
    }

    #[test]
    fn test_pa_boost_clamp_and_encode() {
        let table_test: [(i8, i8, u8); 7] = [
            (i8::MIN, 2, 0xF0),
            (-5, 2, 0xF0),
            (2, 2, 0xF0),
            (10, 10, 0xF8),
            (17, 17, 0xFF),
            (20, 17, 0xFF),
            (i8::MAX, 17, 0xFF),
        ];

        table_test.into_iter().for_each(|(requested, stored, reg)| {
            let clamped = PaPin::PaBoost.clamp_power(requested);
            assert_eq!(clamped, stored);
            assert_eq!(PaPin::PaBoost.pa_config(clamped), reg);
            // out of range requests encode the same as their clamped value
            assert_eq!(PaPin::PaBoost.pa_config(requested), reg);
        });
    }

    #[test]
    fn test_rfo_clamp_and_encode() {
        let table_test: [(i8, i8, u8); 6] = [
            (i8::MIN, 0, 0x70),
            (-1, 0, 0x70),
            (0, 0, 0x70),
            (14, 14, 0x7E),
            (20, 14, 0x7E),
            (i8::MAX, 14, 0x7E),
        ];

        table_test.into_iter().for_each(|(requested, stored, reg)| {
            let clamped = PaPin::Rfo.clamp_power(requested);
            assert_eq!(clamped, stored);
            assert_eq!(PaPin::Rfo.pa_config(clamped), reg);
            // out of range requests encode the same as their clamped value
            assert_eq!(PaPin::Rfo.pa_config(requested), reg);
        });
    }

    #[test]
    fn test_rx_bandwidth_decode() {
        assert_eq!(rx_bandwidth_hz(0x05), 15_625.0);
        assert_eq!(rx_bandwidth_hz(0x0A), 100_000.0);
        assert_eq!(rx_bandwidth_hz(0x01), 250_000.0);
        assert!((rx_bandwidth_hz(0x17) - 2_604.1667).abs() < 0.01);
    }

    #[test]
    fn test_rx_bandwidth_presets_match_names() {
        assert_eq!(RxBandwidth::Bw50_0kHz.hz(), 50_000.0);
        assert_eq!(RxBandwidth::Bw12_5kHz.hz(), 12_500.0);
        assert!((RxBandwidth::Bw166_7kHz.hz() - 166_666.67).abs() < 0.1);
        assert_eq!(RxBandwidth::from_raw(0x0A), Some(RxBandwidth::Bw100_0kHz));
        assert_eq!(RxBandwidth::from_raw(0x00), None);

        // presets are ordered narrowest first
        RxBandwidth::ALL.windows(2).for_each(|pair| {
            assert!(pair[0].hz() < pair[1].hz());
        });
    }

    #[test]
    fn test_ook_fix() {
        assert_eq!(ook_fix(-80.0), 0x60);
        assert_eq!(ook_fix(-94.0), 68);
        assert_eq!(ook_fix(-128.0), 0x00);
        // -1.25 * 2 = -2.5 truncates to -2
        assert_eq!(ook_fix(-1.25), 254);
    }
}
