use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::registers::Register;

#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterfaceError {
    Spi,
    Nss,
}

/// Single register access, one bus transaction per call.
pub trait ReadWrite {
    type Error;

    fn read_register(&mut self, register: Register) -> Result<u8, Self::Error>;

    /// Writes `value` and returns the byte shifted out by the chip while
    /// `value` was clocked in.
    fn write_register(&mut self, register: Register, value: u8) -> Result<u8, Self::Error>;

    /// Puts the select line in its idle (high) state.
    fn release_nss(&mut self) -> Result<(), Self::Error>;
}

/// SPI bus plus a chip select line driven by hand around each transaction.
pub struct SpiInterface<SPI, NSS> {
    pub spi: SPI,
    pub nss: NSS,
}

impl<SPI, NSS> SpiInterface<SPI, NSS> {
    pub fn new(spi: SPI, nss: NSS) -> Self {
        SpiInterface { spi, nss }
    }

    pub fn release(self) -> (SPI, NSS) {
        (self.spi, self.nss)
    }
}

impl<SPI, NSS> SpiInterface<SPI, NSS>
where
    SPI: SpiBus,
    NSS: OutputPin,
{
    fn single_transfer(&mut self, address: u8, value: u8) -> Result<u8, InterfaceError> {
        self.nss.set_low().map_err(|_| InterfaceError::Nss)?;
        let result = self.exchange(address, value);
        // NSS goes back high even when the exchange failed
        let released = self.nss.set_high().map_err(|_| InterfaceError::Nss);
        let response = result?;
        released?;
        Ok(response)
    }

    fn exchange(&mut self, address: u8, value: u8) -> Result<u8, InterfaceError> {
        let mut buffer = [address];
        self.spi
            .transfer_in_place(&mut buffer)
            .map_err(|_| InterfaceError::Spi)?;

        buffer[0] = value;
        self.spi
            .transfer_in_place(&mut buffer)
            .map_err(|_| InterfaceError::Spi)?;
        self.spi.flush().map_err(|_| InterfaceError::Spi)?;
        Ok(buffer[0])
    }
}

impl<SPI, NSS> ReadWrite for SpiInterface<SPI, NSS>
where
    SPI: SpiBus,
    NSS: OutputPin,
{
    type Error = InterfaceError;

    fn read_register(&mut self, register: Register) -> Result<u8, Self::Error> {
        self.single_transfer(register.read(), 0x00)
    }

    fn write_register(&mut self, register: Register, value: u8) -> Result<u8, Self::Error> {
        self.single_transfer(register.write(), value)
    }

    fn release_nss(&mut self) -> Result<(), Self::Error> {
        self.nss.set_high().map_err(|_| InterfaceError::Nss)
    }
}
