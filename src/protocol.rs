//! The GS558 frame grammar: encoder, decoder, and protocol dispatch.
//!
//! [`Gs558Protocol`] renders a [`Gs558Message`] into a pulse sequence and
//! recovers a message from one. Both directions share the bit-timing
//! table in [`crate::consts`].
//!
//! Decoding is a strict linear grammar with one decision point per step
//! and no backtracking: sync, 24 data bits, doubled stop. The protocol
//! has no redundancy, so a timing mismatch anywhere invalidates the whole
//! frame and the decoder rejects rather than guessing. Bit meaning is
//! positional; partial recovery is not possible.
//!
//! [`RemoteProtocol`] is the capability interface a dispatcher sees, and
//! [`ProtocolRegistry`] is an ordered first-match dispatcher over several
//! implementations sharing one captured train.

use crate::consts::{
    CARRIER_BASEBAND_HZ, DEVICE_BITS, FRAME_REPEATS, GROUP_BITS, ONE_HIGH_US, ONE_LOW_US,
    PAYLOAD_BITS, STOP_HIGH_US, STOP_LOW_US, SYNC_HIGH_US, SYNC_LOW_US, ZERO_HIGH_US, ZERO_LOW_US,
};
use crate::error::FrameMismatch;
use crate::message::{Description, Gs558Message};
use crate::pulse::{Pulse, PulseCursor, ReceiveSource, TransmitSink};

use core::fmt;

#[cfg(not(feature = "std"))]
use crate::consts::MAX_PROTOCOLS;
#[cfg(not(feature = "std"))]
use heapless::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

/// Capability interface implemented by each supported remote protocol.
///
/// A dispatcher holds an ordered set of these and tries each in turn
/// against a captured pulse train; see [`ProtocolRegistry`].
pub trait RemoteProtocol {
    /// The structured message this protocol carries.
    type Message;

    /// Renders `msg` into `dst` as one complete frame, including the
    /// carrier declaration.
    fn encode(&self, dst: &mut dyn TransmitSink, msg: &Self::Message);

    /// Attempts to recover a message from `src`.
    ///
    /// Returns `None` when the pulse sequence does not match this
    /// protocol's grammar. Pulses consumed before the mismatch stay
    /// consumed; the offending pulse does not.
    fn decode(&self, src: &mut dyn ReceiveSource) -> Option<Self::Message>;

    /// Renders a decoded message for logging.
    fn describe(&self, msg: &Self::Message) -> Description;
}

/// Codec for GS558-family smoke-detector remotes.
///
/// # Example
///
/// ```rust
/// use gs558::message::Gs558Message;
/// use gs558::protocol::{Gs558Protocol, RemoteProtocol};
/// use gs558::pulse::PulseTrain;
///
/// let protocol = Gs558Protocol;
/// let msg = Gs558Message::new(5, 100, 3);
///
/// let mut train = PulseTrain::new();
/// protocol.encode(&mut train, &msg);
///
/// let mut cursor = train.cursor();
/// assert_eq!(protocol.decode(&mut cursor), Some(msg));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Gs558Protocol;

impl Gs558Protocol {
    fn one(&self, dst: &mut dyn TransmitSink) {
        dst.push(Pulse::new(ONE_HIGH_US, ONE_LOW_US));
    }

    fn zero(&self, dst: &mut dyn TransmitSink) {
        dst.push(Pulse::new(ZERO_HIGH_US, ZERO_LOW_US));
    }

    fn sync(&self, dst: &mut dyn TransmitSink) {
        dst.push(Pulse::new(SYNC_HIGH_US, SYNC_LOW_US));
    }

    fn stop(&self, dst: &mut dyn TransmitSink) {
        dst.push(Pulse::new(STOP_HIGH_US, STOP_LOW_US));
        dst.push(Pulse::new(STOP_HIGH_US, STOP_LOW_US));
    }

    fn emit_bits(&self, dst: &mut dyn TransmitSink, value: u32, bits: u32) {
        for i in (0..bits).rev() {
            if value & (1 << i) != 0 {
                self.one(dst);
            } else {
                self.zero(dst);
            }
        }
    }

    fn emit_frame(&self, dst: &mut dyn TransmitSink, msg: &Gs558Message) {
        let msg = msg.masked();
        self.sync(dst);
        self.emit_bits(dst, msg.device as u32, DEVICE_BITS);
        self.emit_bits(dst, msg.group as u32, GROUP_BITS);
        self.emit_bits(dst, msg.payload as u32, PAYLOAD_BITS);
        self.stop(dst);
    }

    fn read_bits(&self, src: &mut dyn ReceiveSource, bits: u32) -> Result<u32, FrameMismatch> {
        let mut out = 0u32;
        for _ in 0..bits {
            out <<= 1;
            if src.expect_pulse(ONE_HIGH_US, ONE_LOW_US) {
                out |= 1;
            } else if !src.expect_pulse(ZERO_HIGH_US, ZERO_LOW_US) {
                // Neither symbol at this position invalidates the frame.
                return Err(FrameMismatch);
            }
        }
        Ok(out)
    }

    /// Emits `repeats` back-to-back frames into `dst`.
    ///
    /// Remotes send each frame [`FRAME_REPEATS`] times, the stop sequence
    /// of one frame directly followed by the sync of the next.
    pub fn encode_repeated(&self, dst: &mut dyn TransmitSink, msg: &Gs558Message, repeats: u8) {
        dst.set_carrier_hz(CARRIER_BASEBAND_HZ);
        for _ in 0..repeats {
            self.emit_frame(dst, msg);
        }
    }

    /// Emits one full burst: [`FRAME_REPEATS`] copies of the frame.
    pub fn encode_burst(&self, dst: &mut dyn TransmitSink, msg: &Gs558Message) {
        self.encode_repeated(dst, msg, FRAME_REPEATS);
    }

    /// Strict decode: consumes one complete frame from `src` or fails at
    /// the first grammar mismatch.
    ///
    /// The grammar is: one sync pulse, five device bits, fifteen group
    /// bits, four payload bits (all MSB first), then two stop pulses.
    pub fn try_decode(&self, src: &mut dyn ReceiveSource) -> Result<Gs558Message, FrameMismatch> {
        if !src.expect_pulse(SYNC_HIGH_US, SYNC_LOW_US) {
            return Err(FrameMismatch);
        }

        let device = self.read_bits(src, DEVICE_BITS)? as u8;
        let group = self.read_bits(src, GROUP_BITS)? as u16;
        let payload = self.read_bits(src, PAYLOAD_BITS)? as u8;

        if !(src.expect_pulse(STOP_HIGH_US, STOP_LOW_US)
            && src.expect_pulse(STOP_HIGH_US, STOP_LOW_US))
        {
            return Err(FrameMismatch);
        }

        Ok(Gs558Message {
            device,
            group,
            payload,
        })
    }

    /// Writes a decoded message to the logger.
    #[cfg(feature = "log")]
    pub fn dump(&self, msg: &Gs558Message) {
        log::debug!(
            "received GS558 frame: device=0x{:04X} group={} payload={}",
            msg.device,
            msg.group,
            msg.payload
        );
    }
}

impl RemoteProtocol for Gs558Protocol {
    type Message = Gs558Message;

    fn encode(&self, dst: &mut dyn TransmitSink, msg: &Gs558Message) {
        dst.set_carrier_hz(CARRIER_BASEBAND_HZ);
        self.emit_frame(dst, msg);
    }

    fn decode(&self, src: &mut dyn ReceiveSource) -> Option<Gs558Message> {
        self.try_decode(src).ok()
    }

    fn describe(&self, msg: &Gs558Message) -> Description {
        msg.describe()
    }
}

/// Ordered collection of protocols tried in turn against one capture.
///
/// The registry rewinds the cursor before each candidate, so every
/// protocol sees the capture from the start; the first one whose grammar
/// matches wins.
pub struct ProtocolRegistry<'a, M> {
    #[cfg(feature = "std")]
    protocols: Vec<&'a dyn RemoteProtocol<Message = M>>,
    #[cfg(not(feature = "std"))]
    protocols: Vec<&'a dyn RemoteProtocol<Message = M>, MAX_PROTOCOLS>,
}

impl<'a, M> ProtocolRegistry<'a, M> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            protocols: Vec::new(),
        }
    }

    /// Appends a protocol to the candidate order.
    ///
    /// Returns whether it was registered; a no_std registry refuses once
    /// [`MAX_PROTOCOLS`](crate::consts::MAX_PROTOCOLS) is reached.
    pub fn register(&mut self, protocol: &'a dyn RemoteProtocol<Message = M>) -> bool {
        #[cfg(feature = "std")]
        {
            self.protocols.push(protocol);
            true
        }
        #[cfg(not(feature = "std"))]
        {
            self.protocols.push(protocol).is_ok()
        }
    }

    /// Number of registered protocols.
    pub fn len(&self) -> usize {
        self.protocols.len()
    }

    /// Whether the registry holds no protocols.
    pub fn is_empty(&self) -> bool {
        self.protocols.is_empty()
    }

    /// Tries each protocol in registration order and returns the first
    /// successful decode.
    pub fn decode_first(&self, cursor: &mut PulseCursor<'_>) -> Option<M> {
        for protocol in self.protocols.iter() {
            cursor.reset();
            if let Some(msg) = protocol.decode(cursor) {
                return Some(msg);
            }
        }
        None
    }
}

impl<M> Default for ProtocolRegistry<'_, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> fmt::Debug for ProtocolRegistry<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtocolRegistry")
            .field("len", &self.protocols.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FRAME_PULSE_LEN, TRAIN_CAP};
    use crate::pulse::PulseTrain;

    const SYNC: Pulse = Pulse::new(SYNC_HIGH_US, SYNC_LOW_US);
    const STOP: Pulse = Pulse::new(STOP_HIGH_US, STOP_LOW_US);
    const ONE: Pulse = Pulse::new(ONE_HIGH_US, ONE_LOW_US);
    const ZERO: Pulse = Pulse::new(ZERO_HIGH_US, ZERO_LOW_US);

    fn encode_to_train(msg: &Gs558Message) -> PulseTrain {
        let mut train = PulseTrain::new();
        Gs558Protocol.encode(&mut train, msg);
        train
    }

    #[test]
    fn test_concrete_frame_layout() {
        // device=5 -> 00101, group=100 -> 000000001100100, payload=3 -> 0011
        let train = encode_to_train(&Gs558Message::new(5, 100, 3));

        assert_eq!(train.carrier_hz(), 0);
        assert_eq!(train.len(), FRAME_PULSE_LEN);

        let mut expected = vec![SYNC];
        expected.extend([ZERO, ZERO, ONE, ZERO, ONE]);
        expected.extend([
            ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ZERO, ONE, ONE, ZERO, ZERO, ONE, ZERO, ZERO,
        ]);
        expected.extend([ZERO, ZERO, ONE, ONE]);
        expected.extend([STOP, STOP]);
        assert_eq!(train.pulses(), expected.as_slice());
    }

    #[test]
    fn test_concrete_frame_decodes() {
        let msg = Gs558Message::new(5, 100, 3);
        let train = encode_to_train(&msg);
        let mut cursor = train.cursor();
        assert_eq!(Gs558Protocol.decode(&mut cursor), Some(msg));
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_round_trip_across_field_ranges() {
        let protocol = Gs558Protocol;
        for device in [0u8, 1, 5, 16, 31] {
            for group in [0u16, 1, 100, 0x2AAA, 32_767] {
                for payload in [0u8, 3, 9, 15] {
                    let msg = Gs558Message::new(device, group, payload);
                    let train = encode_to_train(&msg);
                    let decoded = protocol.try_decode(&mut train.cursor());
                    assert_eq!(decoded, Ok(msg));
                }
            }
        }
    }

    #[test]
    fn test_round_trip_survives_timing_jitter() {
        let msg = Gs558Message::new(21, 0x5555, 9);
        let train = encode_to_train(&msg);

        // Stretch every width by 10%, well inside the 25% window.
        let jittered: Vec<Pulse> = train
            .pulses()
            .iter()
            .map(|p| Pulse::new(p.high_us + p.high_us / 10, p.low_us + p.low_us / 10))
            .collect();
        let mut cursor = PulseCursor::new(&jittered);
        assert_eq!(Gs558Protocol.decode(&mut cursor), Some(msg));
    }

    #[test]
    fn test_out_of_range_fields_truncate_to_wire_width() {
        // 5-bit wraparound: device 32 encodes identically to device 0,
        // and likewise for the group and payload widths.
        let wrapped = encode_to_train(&Gs558Message::new(32, 32_768 + 100, 16 + 3));
        let plain = encode_to_train(&Gs558Message::new(0, 100, 3));
        assert_eq!(wrapped, plain);

        let decoded = Gs558Protocol.try_decode(&mut wrapped.cursor());
        assert_eq!(decoded, Ok(Gs558Message::new(0, 100, 3)));
    }

    #[test]
    fn test_rejects_corrupted_sync_gap() {
        let train = encode_to_train(&Gs558Message::new(5, 100, 3));
        let mut pulses = train.pulses().to_vec();
        pulses[0].low_us = 5_000;

        let mut cursor = PulseCursor::new(&pulses);
        assert_eq!(Gs558Protocol.try_decode(&mut cursor), Err(FrameMismatch));
        // The sync candidate was not consumed.
        assert_eq!(cursor.remaining(), pulses.len());
    }

    #[test]
    fn test_rejects_corrupted_second_stop() {
        let train = encode_to_train(&Gs558Message::new(5, 100, 3));
        let mut pulses = train.pulses().to_vec();
        pulses.last_mut().unwrap().high_us = 2_000;

        let mut cursor = PulseCursor::new(&pulses);
        assert_eq!(Gs558Protocol.decode(&mut cursor), None);
    }

    #[test]
    fn test_rejects_truncated_frame() {
        let train = encode_to_train(&Gs558Message::new(5, 100, 3));
        let mut pulses = train.pulses().to_vec();
        let _ = pulses.pop();

        let mut cursor = PulseCursor::new(&pulses);
        assert_eq!(Gs558Protocol.decode(&mut cursor), None);
    }

    #[test]
    fn test_rejects_unknown_bit_symbol_without_consuming_it() {
        let train = encode_to_train(&Gs558Message::new(5, 100, 3));
        let mut pulses = train.pulses().to_vec();
        // Third data bit: matches neither the one nor the zero timing.
        pulses[3] = Pulse::new(800, 800);

        let mut cursor = PulseCursor::new(&pulses);
        assert_eq!(Gs558Protocol.decode(&mut cursor), None);
        // Sync and two good bits consumed; the bad pulse still pending.
        assert_eq!(cursor.remaining(), pulses.len() - 3);
    }

    #[test]
    fn test_empty_source_rejects() {
        let mut cursor = PulseCursor::new(&[]);
        assert_eq!(Gs558Protocol.try_decode(&mut cursor), Err(FrameMismatch));
    }

    #[test]
    fn test_burst_emits_full_repeat_count() {
        let mut train = PulseTrain::new();
        Gs558Protocol.encode_burst(&mut train, &Gs558Message::new(5, 100, 3));
        assert_eq!(train.len(), TRAIN_CAP);
        assert_eq!(train.len(), FRAME_PULSE_LEN * FRAME_REPEATS as usize);
    }

    #[test]
    fn test_back_to_back_frames_decode_sequentially() {
        let msg = Gs558Message::new(17, 12_345, 7);
        let mut train = PulseTrain::new();
        Gs558Protocol.encode_repeated(&mut train, &msg, 3);

        let mut cursor = train.cursor();
        for _ in 0..3 {
            assert_eq!(Gs558Protocol.decode(&mut cursor), Some(msg));
        }
        assert_eq!(cursor.remaining(), 0);
        assert_eq!(Gs558Protocol.decode(&mut cursor), None);
    }

    /// A protocol that never matches, for dispatch-order tests.
    #[derive(Debug)]
    struct NeverMatches;

    impl RemoteProtocol for NeverMatches {
        type Message = Gs558Message;

        fn encode(&self, _dst: &mut dyn TransmitSink, _msg: &Gs558Message) {}

        fn decode(&self, src: &mut dyn ReceiveSource) -> Option<Gs558Message> {
            // Consume a pulse to prove the registry rewinds between tries.
            let _ = src.expect_pulse(SYNC_HIGH_US, SYNC_LOW_US);
            None
        }

        fn describe(&self, msg: &Gs558Message) -> Description {
            msg.describe()
        }
    }

    #[test]
    fn test_registry_tries_protocols_in_order() {
        let gs558 = Gs558Protocol;
        let never = NeverMatches;
        let mut registry: ProtocolRegistry<'_, Gs558Message> = ProtocolRegistry::new();
        assert!(registry.register(&never));
        assert!(registry.register(&gs558));
        assert_eq!(registry.len(), 2);

        let msg = Gs558Message::new(5, 100, 3);
        let train = encode_to_train(&msg);
        let mut cursor = train.cursor();
        assert_eq!(registry.decode_first(&mut cursor), Some(msg));
    }

    #[test]
    fn test_registry_returns_none_when_nothing_matches() {
        let gs558 = Gs558Protocol;
        let mut registry: ProtocolRegistry<'_, Gs558Message> = ProtocolRegistry::new();
        assert!(registry.register(&gs558));

        let noise = [Pulse::new(100, 100), Pulse::new(200, 200)];
        let mut cursor = PulseCursor::new(&noise);
        assert!(registry.decode_first(&mut cursor).is_none());
    }
}
