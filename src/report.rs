use core::fmt;

use crate::settings::{Modulation, PaPin};

/// Snapshot of the applied settings, as printed at boot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfigReport {
    pub frequency: u32,
    pub modulation: Modulation,
    pub rx_bandwidth_hz: f32,
    pub rx_start: bool,
    /// Present only with OOK modulation.
    pub rx_floor: Option<f32>,
    pub pa_pin: PaPin,
    pub pa_power: i8,
    pub failed: bool,
}

impl ConfigReport {
    pub fn frequency_mhz(&self) -> f64 {
        self.frequency as f64 / 1_000_000.0
    }

    pub fn rx_bandwidth_khz(&self) -> f32 {
        self.rx_bandwidth_hz / 1000.0
    }
}

impl fmt::Display for ConfigReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SX127x:")?;
        writeln!(f, "  Frequency: {:.3} MHz", self.frequency_mhz())?;
        writeln!(f, "  Modulation: {}", self.modulation.name())?;
        writeln!(f, "  Rx Bandwidth: {:.1} kHz", self.rx_bandwidth_khz())?;
        writeln!(f, "  Rx Start: {}", self.rx_start)?;
        if let Some(rx_floor) = self.rx_floor {
            writeln!(f, "  Rx Floor: {:.1} dBm", rx_floor)?;
        }
        writeln!(f, "  PA Pin: {}", self.pa_pin.name())?;
        writeln!(f, "  PA Power: {} dBm", self.pa_power)?;
        if self.failed {
            writeln!(f, "Configuring SX127x failed")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_fsk() {
        let report = ConfigReport {
            frequency: 868_000_000,
            modulation: Modulation::Fsk,
            rx_bandwidth_hz: 50_000.0,
            rx_start: false,
            rx_floor: None,
            pa_pin: PaPin::PaBoost,
            pa_power: 17,
            failed: false,
        };

        assert_eq!(
            format!("{report}"),
            "SX127x:\n\
             \x20 Frequency: 868.000 MHz\n\
             \x20 Modulation: FSK\n\
             \x20 Rx Bandwidth: 50.0 kHz\n\
             \x20 Rx Start: false\n\
             \x20 PA Pin: PA_BOOST\n\
             \x20 PA Power: 17 dBm\n"
        );
    }

    #[test]
    fn test_display_ook_failed() {
        let report = ConfigReport {
            frequency: 433_920_000,
            modulation: Modulation::Ook,
            rx_bandwidth_hz: 15_625.0,
            rx_start: true,
            rx_floor: Some(-94.0),
            pa_pin: PaPin::Rfo,
            pa_power: 14,
            failed: true,
        };

        let text = format!("{report}");
        assert!(text.contains("  Frequency: 433.920 MHz\n"));
        assert!(text.contains("  Rx Bandwidth: 15.6 kHz\n"));
        assert!(text.contains("  Rx Floor: -94.0 dBm\n"));
        assert!(text.contains("  PA Pin: RFO\n"));
        assert!(text.ends_with("Configuring SX127x failed\n"));
    }
}
