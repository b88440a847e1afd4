use crate::config::Config;
use crate::listener::TransmitListener;
use crate::read_write::{ReadWrite, SpiInterface};
use crate::registers::Register;
use crate::report::ConfigReport;
use crate::settings::{
    frf_bytes, ook_fix, rx_bandwidth_hz, Modulation, CHIP_VERSION, RF_OOKPEAK_THRESHTYPE_PEAK,
    RF_OPMODE_LOWFREQUENCYMODEON, RF_PACKETCONFIG_CONTINUOUS, RF_SYNCCONFIG_OFF,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

pub struct Sx127x<RW, RESET, D> {
    pub bus: RW,
    pub reset_pin: RESET,
    pub delay: D,
    config: Config,
    pa_power: i8,
    current_mode: Sx127xMode,
    failed: bool,
}

#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sx127xError {
    ResetError,
    SpiWriteError,
    SpiReadError,
    /// RegVersion held something other than 0x12: no chip, or not an SX127x.
    VersionMismatch(u8),
    /// The driver failed during setup and no longer talks to the chip.
    Failed,
}

/// Mode field of RegOpMode.
///
/// `TxFs` and `RxFs` are only passed through on the way to `Tx` and `Rx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sx127xMode {
    Sleep = 0x00,
    Standby = 0x01,
    TxFs = 0x02,
    Tx = 0x03,
    RxFs = 0x04,
    Rx = 0x05,
}

impl<SPI, NSS, RESET, D> Sx127x<SpiInterface<SPI, NSS>, RESET, D>
where
    SPI: SpiBus,
    NSS: OutputPin,
    RESET: OutputPin,
    D: DelayNs,
{
    pub fn from_spi(spi: SPI, nss_pin: NSS, reset_pin: RESET, delay: D, config: Config) -> Self {
        Self::new(SpiInterface::new(spi, nss_pin), reset_pin, delay, config)
    }
}

impl<RW, RESET, D> Sx127x<RW, RESET, D>
where
    RW: ReadWrite,
    RESET: OutputPin,
    D: DelayNs,
{
    pub fn new(bus: RW, reset_pin: RESET, delay: D, config: Config) -> Self {
        Sx127x {
            bus,
            reset_pin,
            delay,
            pa_power: config.pa_power(),
            config,
            current_mode: Sx127xMode::Sleep,
            failed: false,
        }
    }

    pub fn release(self) -> (RW, RESET, D) {
        (self.bus, self.reset_pin, self.delay)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn mode(&self) -> Sx127xMode {
        self.current_mode
    }

    /// Output power in dBm. Clamped to the PA pin's range once setup ran.
    pub fn pa_power(&self) -> i8 {
        self.pa_power
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Resets the chip, checks its version and programs continuous mode
    /// with the configured frequency, bandwidth and PA settings. Ends in
    /// standby, or in RX when `rx_start` is set.
    ///
    /// Any error marks the driver as failed for good.
    pub fn setup(&mut self) -> Result<(), Sx127xError> {
        if self.failed {
            return Err(Sx127xError::Failed);
        }

        debug!("Setting up SX127x...");
        let result = self.configure();
        if let Err(ref err) = result {
            self.failed = true;
            error!("Configuring SX127x failed: {}", err);
        }
        result
    }

    fn configure(&mut self) -> Result<(), Sx127xError> {
        self.reset()?;

        // check silicon version to make sure hw is ok
        let version = self.read_register(Register::Version)?;
        if version != CHIP_VERSION {
            return Err(Sx127xError::VersionMismatch(version));
        }

        // modulation and LF port must be set, in sleep, before the frequency
        self.write_mode(Sx127xMode::Sleep)?;
        self.delay.delay_ms(1);

        self.set_frequency(self.config.frequency())?;
        self.write_register(Register::RxBw, self.config.rx_bandwidth().raw())?;
        self.set_pa_power()?;
        self.set_continuous_mode()?;
        self.set_ook_threshold(self.config.rx_floor())?;

        self.standby()?;
        if self.config.rx_start() {
            self.rx()?;
        }

        debug!("SX127x ready in {}", self.current_mode);
        Ok(())
    }

    fn reset(&mut self) -> Result<(), Sx127xError> {
        self.bus
            .release_nss()
            .map_err(|_| Sx127xError::SpiWriteError)?;
        self.reset_pin
            .set_low()
            .map_err(|_| Sx127xError::ResetError)?;
        self.delay.delay_ms(1);
        self.reset_pin
            .set_high()
            .map_err(|_| Sx127xError::ResetError)?;
        self.delay.delay_ms(10);
        Ok(())
    }

    /// Silicon revision from RegVersion, 0x12 on a healthy SX127x.
    pub fn read_version(&mut self) -> Result<u8, Sx127xError> {
        self.ensure_healthy()?;
        self.read_register(Register::Version)
    }

    fn set_frequency(&mut self, frequency: u32) -> Result<(), Sx127xError> {
        let [msb, mid, lsb] = frf_bytes(frequency);
        self.write_register(Register::FrfMsb, msb)?;
        self.write_register(Register::FrfMid, mid)?;
        self.write_register(Register::FrfLsb, lsb)?;
        Ok(())
    }

    fn set_pa_power(&mut self) -> Result<(), Sx127xError> {
        let pa_pin = self.config.pa_pin();
        let clamped_power = pa_pin.clamp_power(self.config.pa_power());

        self.write_register(Register::PaConfig, pa_pin.pa_config(clamped_power))?;
        self.pa_power = clamped_power;
        Ok(())
    }

    fn set_continuous_mode(&mut self) -> Result<(), Sx127xError> {
        self.write_register(Register::PacketConfig1, RF_PACKETCONFIG_CONTINUOUS)?;
        self.write_register(Register::PacketConfig2, RF_PACKETCONFIG_CONTINUOUS)?;
        Ok(())
    }

    fn set_ook_threshold(&mut self, rx_floor: f32) -> Result<(), Sx127xError> {
        // no bit synchronizer and no sync word in direct mode
        self.write_register(Register::SyncConfig, RF_SYNCCONFIG_OFF)?;
        self.write_register(Register::OokPeak, RF_OOKPEAK_THRESHTYPE_PEAK)?;
        // written with FSK too, the demodulator ignores it there
        self.write_register(Register::OokFix, ook_fix(rx_floor))?;
        Ok(())
    }

    pub fn set_mode_standby(&mut self) -> Result<(), Sx127xError> {
        self.ensure_healthy()?;
        self.standby()
    }

    pub fn set_mode_rx(&mut self) -> Result<(), Sx127xError> {
        self.ensure_healthy()?;
        self.rx()
    }

    pub fn set_mode_tx(&mut self) -> Result<(), Sx127xError> {
        self.ensure_healthy()?;
        self.tx()
    }

    fn ensure_healthy(&self) -> Result<(), Sx127xError> {
        match self.failed {
            true => Err(Sx127xError::Failed),
            false => Ok(()),
        }
    }

    fn standby(&mut self) -> Result<(), Sx127xError> {
        self.write_mode(Sx127xMode::Standby)?;
        // oscillator settling
        self.delay.delay_ms(1);
        Ok(())
    }

    fn rx(&mut self) -> Result<(), Sx127xError> {
        self.write_mode(Sx127xMode::RxFs)?;
        // PLL lock before the receiver is enabled
        self.delay.delay_ms(1);
        self.write_mode(Sx127xMode::Rx)
    }

    fn tx(&mut self) -> Result<(), Sx127xError> {
        self.write_mode(Sx127xMode::TxFs)?;
        self.delay.delay_ms(1);
        self.write_mode(Sx127xMode::Tx)
    }

    fn op_mode(&self, mode: Sx127xMode) -> u8 {
        self.config.modulation() as u8 | RF_OPMODE_LOWFREQUENCYMODEON | mode as u8
    }

    fn write_mode(&mut self, mode: Sx127xMode) -> Result<(), Sx127xError> {
        trace!("SX127x mode {} -> {}", self.current_mode, mode);
        self.write_register(Register::OpMode, self.op_mode(mode))?;
        self.current_mode = mode;
        Ok(())
    }

    pub fn config_report(&self) -> ConfigReport {
        let rx_floor = match self.config.modulation() {
            Modulation::Ook => Some(self.config.rx_floor()),
            Modulation::Fsk => None,
        };

        ConfigReport {
            frequency: self.config.frequency(),
            modulation: self.config.modulation(),
            rx_bandwidth_hz: rx_bandwidth_hz(self.config.rx_bandwidth().raw()),
            rx_start: self.config.rx_start(),
            rx_floor,
            pa_pin: self.config.pa_pin(),
            pa_power: self.pa_power,
            failed: self.failed,
        }
    }

    pub fn dump_config(&self) {
        let report = self.config_report();

        info!("SX127x:");
        info!("  Frequency: {} MHz", report.frequency_mhz());
        info!("  Modulation: {}", report.modulation.name());
        info!("  Rx Bandwidth: {} kHz", report.rx_bandwidth_khz());
        info!("  Rx Start: {}", report.rx_start);
        if let Some(rx_floor) = report.rx_floor {
            info!("  Rx Floor: {} dBm", rx_floor);
        }
        info!("  PA Pin: {}", report.pa_pin.name());
        info!("  PA Power: {} dBm", report.pa_power);
        if report.failed {
            error!("Configuring SX127x failed");
        }
    }

    fn write_register(&mut self, register: Register, value: u8) -> Result<(), Sx127xError> {
        self.bus
            .write_register(register, value)
            .map_err(|_| Sx127xError::SpiWriteError)?;
        Ok(())
    }

    fn read_register(&mut self, register: Register) -> Result<u8, Sx127xError> {
        self.bus
            .read_register(register)
            .map_err(|_| Sx127xError::SpiReadError)
    }
}

impl<RW, RESET, D> TransmitListener for Sx127x<RW, RESET, D>
where
    RW: ReadWrite,
    RESET: OutputPin,
    D: DelayNs,
{
    type Error = Sx127xError;

    fn on_transmit_request_begin(&mut self) -> Result<(), Sx127xError> {
        if !self.config.transmit_hooks() {
            debug!("Transmit hooks disabled, staying in {}", self.current_mode);
            return Ok(());
        }
        debug!("Set tx mode");
        self.set_mode_tx()
    }

    fn on_transmit_request_complete(&mut self) -> Result<(), Sx127xError> {
        if !self.config.transmit_hooks() {
            debug!("Transmit hooks disabled, staying in {}", self.current_mode);
            return Ok(());
        }
        self.set_mode_standby()?;
        debug!("Set standby mode");
        Ok(())
    }
}
