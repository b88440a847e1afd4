use crate::settings::{Modulation, PaPin, RxBandwidth};

pub const MIN_FREQUENCY: u32 = 137_000_000;
pub const MAX_FREQUENCY: u32 = 1_020_000_000;
pub const MIN_RX_FLOOR: f32 = -128.0;
pub const MAX_RX_FLOOR: f32 = -1.0;

#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    MissingFrequency,
    MissingModulation,
    FrequencyOutOfRange(u32),
    RxFloorOutOfRange(f32),
    PaPowerOutOfRange(i8),
}

/// Radio settings applied by [`Sx127x::setup`](crate::Sx127x::setup).
///
/// Built through [`Config::builder`] and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    frequency: u32,
    modulation: Modulation,
    rx_bandwidth: RxBandwidth,
    rx_floor: f32,
    rx_start: bool,
    pa_pin: PaPin,
    pa_power: i8,
    transmit_hooks: bool,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Carrier frequency in Hz.
    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    pub fn modulation(&self) -> Modulation {
        self.modulation
    }

    pub fn rx_bandwidth(&self) -> RxBandwidth {
        self.rx_bandwidth
    }

    /// OOK threshold floor in dBm. Only used by the OOK demodulator.
    pub fn rx_floor(&self) -> f32 {
        self.rx_floor
    }

    pub fn rx_start(&self) -> bool {
        self.rx_start
    }

    pub fn pa_pin(&self) -> PaPin {
        self.pa_pin
    }

    /// Requested output power in dBm, before clamping to the pin's range.
    pub fn pa_power(&self) -> i8 {
        self.pa_power
    }

    pub fn transmit_hooks(&self) -> bool {
        self.transmit_hooks
    }
}

pub struct ConfigBuilder {
    frequency: Option<u32>,
    modulation: Option<Modulation>,
    rx_bandwidth: RxBandwidth,
    rx_floor: f32,
    rx_start: bool,
    pa_pin: PaPin,
    pa_power: i8,
    transmit_hooks: bool,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        ConfigBuilder {
            frequency: None,
            modulation: None,
            rx_bandwidth: RxBandwidth::Bw50_0kHz,
            rx_floor: -94.0,
            rx_start: true,
            pa_pin: PaPin::PaBoost,
            pa_power: 17,
            transmit_hooks: true,
        }
    }
}

impl ConfigBuilder {
    pub fn frequency(mut self, frequency: u32) -> Self {
        self.frequency = Some(frequency);
        self
    }

    pub fn modulation(mut self, modulation: Modulation) -> Self {
        self.modulation = Some(modulation);
        self
    }

    pub fn rx_bandwidth(mut self, rx_bandwidth: RxBandwidth) -> Self {
        self.rx_bandwidth = rx_bandwidth;
        self
    }

    pub fn rx_floor(mut self, rx_floor: f32) -> Self {
        self.rx_floor = rx_floor;
        self
    }

    pub fn rx_start(mut self, rx_start: bool) -> Self {
        self.rx_start = rx_start;
        self
    }

    pub fn pa_pin(mut self, pa_pin: PaPin) -> Self {
        self.pa_pin = pa_pin;
        self
    }

    /// Requested power in dBm. Values outside the selected pin's range are
    /// accepted here and clamped when the chip is configured.
    pub fn pa_power(mut self, pa_power: i8) -> Self {
        self.pa_power = pa_power;
        self
    }

    pub fn transmit_hooks(mut self, enabled: bool) -> Self {
        self.transmit_hooks = enabled;
        self
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        let frequency = self.frequency.ok_or(ConfigError::MissingFrequency)?;
        let modulation = self.modulation.ok_or(ConfigError::MissingModulation)?;

        if !(MIN_FREQUENCY..=MAX_FREQUENCY).contains(&frequency) {
            return Err(ConfigError::FrequencyOutOfRange(frequency));
        }

        if !(MIN_RX_FLOOR..=MAX_RX_FLOOR).contains(&self.rx_floor) {
            return Err(ConfigError::RxFloorOutOfRange(self.rx_floor));
        }

        // Clamping handles the upper end of each pin's range, negative
        // requests are rejected outright.
        if self.pa_power < 0 {
            return Err(ConfigError::PaPowerOutOfRange(self.pa_power));
        }

        Ok(Config {
            frequency,
            modulation,
            rx_bandwidth: self.rx_bandwidth,
            rx_floor: self.rx_floor,
            rx_start: self.rx_start,
            pa_pin: self.pa_pin,
            pa_power: self.pa_power,
            transmit_hooks: self.transmit_hooks,
        })
    }
}
