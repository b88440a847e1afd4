/// Hooks called by whatever drives the modulated data line during a
/// transmission (a pulse generator, an RMT peripheral, a bit-banging task).
///
/// The source calls [`on_transmit_request_begin`](Self::on_transmit_request_begin)
/// right before it starts toggling the data pin and
/// [`on_transmit_request_complete`](Self::on_transmit_request_complete) once
/// it is done.
pub trait TransmitListener {
    type Error;

    fn on_transmit_request_begin(&mut self) -> Result<(), Self::Error>;

    fn on_transmit_request_complete(&mut self) -> Result<(), Self::Error>;
}
