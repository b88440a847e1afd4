#[allow(dead_code)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Register {
    Fifo = 0x00, // FIFO read/write access.
    OpMode = 0x01, // Operating mode, modulation and LF port selection.
    BitrateMsb = 0x02, // Bitrate most significant byte.
    BitrateLsb = 0x03, // Bitrate least significant byte.
    FdevMsb = 0x04, // Frequency deviation most significant byte.
    FdevLsb = 0x05, // Frequency deviation least significant byte.
    FrfMsb = 0x06, // Carrier frequency most significant byte.
    FrfMid = 0x07, // Carrier frequency middle byte.
    FrfLsb = 0x08, // Carrier frequency least significant byte.
    PaConfig = 0x09, // PA selection and output power control.
    PaRamp = 0x0A, // PA ramp time and modulation shaping.
    Ocp = 0x0B, // Overcurrent protection.
    Lna = 0x0C, // Low-noise amplifier settings.
    RxBw = 0x12, // Channel filter bandwidth.
    AfcBw = 0x13, // AFC channel filter bandwidth.
    OokPeak = 0x14, // OOK peak demodulator settings.
    OokFix = 0x15, // OOK fixed threshold / peak floor.
    OokAvg = 0x16, // OOK average demodulator settings.
    SyncConfig = 0x27, // Bit synchronizer and sync word control.
    PacketConfig1 = 0x30, // Packet mode settings 1.
    PacketConfig2 = 0x31, // Packet mode settings 2, data mode selection.
    PayloadLength = 0x32, // Payload length.
    DioMapping1 = 0x40, // Mapping of pins DIO0 to DIO3.
    DioMapping2 = 0x41, // Mapping of pins DIO4 and DIO5, ClkOut frequency.
    Version = 0x42, // Silicon revision.
}

const READ_MASK: u8 = 0x7F;
const WRITE_MASK: u8 = 0x80;

impl Register {
    #[inline]
    pub fn read(self) -> u8 {
        (self as u8) & READ_MASK
    }

    #[inline]
    pub fn write(self) -> u8 {
        (self as u8) | WRITE_MASK
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_address_masks() {
        assert_eq!(Register::OpMode.read(), 0x01);
        assert_eq!(Register::OpMode.write(), 0x81);
        assert_eq!(Register::Version.read(), 0x42);
        assert_eq!(Register::Version.write(), 0xC2);
        assert_eq!(Register::PacketConfig2.write(), 0xB1);
    }
}
