//! # SX127x Radio Driver
//!
//! A blocking, `no_std` driver for the Semtech SX1276/77/78/79 transceivers
//! running in FSK/OOK continuous mode. Packet handling is switched off: the
//! chip is used as a plain modulator/demodulator whose data line is driven
//! (or sampled) by something else.
//!
//! The driver resets the chip, checks its silicon version, programs the
//! carrier frequency, receive bandwidth, PA and OOK threshold and then moves
//! between standby, receive and transmit on request.
//!
//! ## Example
//!
//! ```ignore
//! use sx127x_rs::{Config, Modulation, PaPin, RxBandwidth, Sx127x, TransmitListener};
//!
//! let config = Config::builder()
//!     .frequency(433_920_000)
//!     .modulation(Modulation::Ook)
//!     .rx_bandwidth(RxBandwidth::Bw100_0kHz)
//!     .pa_pin(PaPin::Rfo)
//!     .build()?;
//!
//! let mut radio = Sx127x::from_spi(spi_bus, nss_pin, reset_pin, delay, config);
//! radio.setup()?;
//! radio.dump_config();
//!
//! // around an outgoing burst on the DIO2 data line
//! radio.on_transmit_request_begin()?;
//! radio.on_transmit_request_complete()?;
//! ```

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod listener;
pub mod read_write;
pub mod registers;
pub mod report;
pub mod settings;
pub mod sx127x;


pub use config::{Config, ConfigBuilder, ConfigError};
pub use listener::TransmitListener;
pub use read_write::{InterfaceError, ReadWrite, SpiInterface};
pub use report::ConfigReport;
pub use settings::{Modulation, PaPin, RxBandwidth};
pub use sx127x::{Sx127x, Sx127xError, Sx127xMode};
