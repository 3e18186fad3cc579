//! Pulse playback over a GPIO data pin.
//!
//! This module bridges the codec's [`TransmitSink`] boundary onto
//! `embedded-hal` digital output and delay traits, for driving a bare
//! OOK transmitter module (e.g. an FS1000A-style board) directly from a
//! digital pin: carrier on while the pin is high, off while it is low.
//!
//! The transmitter plays each pulse as it is pushed, so encoding a
//! message into it transmits the message. For a buffered render that can
//! be inspected or replayed, use [`PulseTrain`](crate::pulse::PulseTrain)
//! instead.
//!
//! ## Example
//!
//! ```rust
//! # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
//! # use embedded_hal_mock::eh1::delay::NoopDelay;
//! use gs558::driver::PinTransmitter;
//! use gs558::message::Gs558Message;
//! use gs558::protocol::{Gs558Protocol, RemoteProtocol};
//!
//! # let mut expectations = vec![PinTransaction::set(PinState::Low)];
//! # for _ in 0..gs558::consts::FRAME_PULSE_LEN {
//! #     expectations.push(PinTransaction::set(PinState::High));
//! #     expectations.push(PinTransaction::set(PinState::Low));
//! # }
//! # let tx_pin = Pin::new(&expectations);
//! let mut tx = PinTransmitter::new(tx_pin, NoopDelay);
//! Gs558Protocol.encode(&mut tx, &Gs558Message::new(5, 100, 3));
//! # let (mut pin, _) = tx.release();
//! # pin.done();
//! ```
//!
//! ## Timing notes
//!
//! Pulse widths are held with the provided [`DelayNs`], so timing is only
//! as accurate as the delay source. The widest width in a frame is the
//! 11.88 ms sync gap; a busy-wait delay stalls the core for the duration
//! of the burst (~450 ms for a full 8-frame burst).

use crate::pulse::{Pulse, TransmitSink};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// A [`TransmitSink`] that replays pulses onto an OOK data pin.
///
/// The pin idles low (carrier off). Each pushed pulse drives the pin
/// high for `high_us`, then low for `low_us`.
///
/// Only the baseband (0 Hz) carrier declaration can be honored by a bare
/// data pin; the declared value is recorded and exposed through
/// [`carrier_hz`](PinTransmitter::carrier_hz) so the caller can route a
/// non-zero declaration to hardware that modulates.
#[derive(Debug)]
pub struct PinTransmitter<TX, D>
where
    TX: OutputPin,
    D: DelayNs,
{
    tx: TX,
    delay: D,
    carrier_hz: u32,
}

impl<TX, D> PinTransmitter<TX, D>
where
    TX: OutputPin,
    D: DelayNs,
{
    /// Creates a transmitter over `tx`, driving the pin low (idle).
    pub fn new(tx: TX, delay: D) -> Self {
        let mut tx = tx;
        let _ = tx.set_low(); // Ensure idle
        Self {
            tx,
            delay,
            carrier_hz: 0,
        }
    }

    /// The most recently declared carrier frequency in Hz.
    pub fn carrier_hz(&self) -> u32 {
        self.carrier_hz
    }

    /// Consumes the transmitter, returning the pin and delay source.
    pub fn release(self) -> (TX, D) {
        (self.tx, self.delay)
    }

    fn write_tx(&mut self, on: bool) {
        if on {
            let _ = self.tx.set_high();
        } else {
            let _ = self.tx.set_low();
        }
    }
}

impl<TX, D> TransmitSink for PinTransmitter<TX, D>
where
    TX: OutputPin,
    D: DelayNs,
{
    fn set_carrier_hz(&mut self, hz: u32) {
        self.carrier_hz = hz;
    }

    fn push(&mut self, pulse: Pulse) {
        self.write_tx(true);
        self.delay.delay_us(pulse.high_us);
        self.write_tx(false);
        self.delay.delay_us(pulse.low_us);
    }
}
