//! Constants shared by the encode and decode paths.
//!
//! This module is the single source of truth for the GS558 bit-timing
//! table and frame layout. Both the encoder and the decoder read their
//! nominal pulse widths from here; if the two sides ever disagreed,
//! round-tripping a message through the codec would break.
//!
//! These values match the timings captured from GS558-family smoke
//! detector remotes (450 µs marks, an 11.88 ms sync gap, and two
//! asymmetric bit symbols around ~1.8 ms per bit).
//!
//! ## Frame layout
//!
//! ```text
//! S DDDDD GGGGGGGGGGGGGGG PPPP EE
//!
//! S = sync pulse (450 µs high, 11880 µs low)
//! D = device id, 5 bits, MSB first
//! G = group id, 15 bits, MSB first
//! P = payload nibble, 4 bits, MSB first
//! E = stop pulse (450 µs high, 450 µs low), sent twice
//! ```
//!
//! A `1` bit is a long mark with a short gap; a `0` bit is a short mark
//! with a long gap. Remotes send the whole frame [`FRAME_REPEATS`] times
//! back to back, each stop sequence directly followed by the next sync.

/// High (mark) time of the sync pulse, in microseconds.
pub const SYNC_HIGH_US: u32 = 450;

/// Low (gap) time of the sync pulse, in microseconds.
///
/// The long gap is what distinguishes a frame start from in-frame
/// pulses and from noise between bursts.
pub const SYNC_LOW_US: u32 = 11_880;

/// High (mark) time of a stop pulse, in microseconds.
pub const STOP_HIGH_US: u32 = 450;

/// Low (gap) time of a stop pulse, in microseconds.
pub const STOP_LOW_US: u32 = 450;

/// High (mark) time of a `1` bit, in microseconds.
pub const ONE_HIGH_US: u32 = 1_240;

/// Low (gap) time of a `1` bit, in microseconds.
pub const ONE_LOW_US: u32 = 510;

/// High (mark) time of a `0` bit, in microseconds.
pub const ZERO_HIGH_US: u32 = 470;

/// Low (gap) time of a `0` bit, in microseconds.
pub const ZERO_LOW_US: u32 = 1_300;

/// Width of the device id field, in bits.
pub const DEVICE_BITS: u32 = 5;

/// Width of the group id field, in bits.
pub const GROUP_BITS: u32 = 15;

/// Width of the payload field, in bits.
pub const PAYLOAD_BITS: u32 = 4;

/// Total number of data bits in one frame.
pub const FRAME_DATA_BITS: u32 = DEVICE_BITS + GROUP_BITS + PAYLOAD_BITS;

/// Number of pulse units in one complete frame: one sync, one pulse per
/// data bit, and the doubled stop.
pub const FRAME_PULSE_LEN: usize = 1 + FRAME_DATA_BITS as usize + 2;

/// How many times a remote repeats each frame on the air.
///
/// The protocol has no acknowledgement; repetition is its only hedge
/// against a missed frame.
pub const FRAME_REPEATS: u8 = 8;

/// Capacity of a buffered pulse train: one full repeated burst.
pub const TRAIN_CAP: usize = FRAME_PULSE_LEN * FRAME_REPEATS as usize;

/// Default matching tolerance of [`PulseCursor`](crate::pulse::PulseCursor),
/// as a percentage of the nominal pulse width.
pub const DEFAULT_TOLERANCE_PCT: u32 = 25;

/// Carrier frequency declared by the encoder, in Hz.
///
/// Zero means baseband on-off keying: the signal is raw pulse timing,
/// not modulated onto a carrier.
pub const CARRIER_BASEBAND_HZ: u32 = 0;

/// Maximum number of protocols a [`ProtocolRegistry`](crate::protocol::ProtocolRegistry)
/// can hold in a no_std build.
pub const MAX_PROTOCOLS: usize = 8;
