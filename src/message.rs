//! The decoded remote message and its diagnostic rendering.
//!
//! A [`Gs558Message`] is a plain value: three fixed-width unsigned fields
//! with no internal ownership or lifecycle. Encode and decode both create
//! it fresh, and the caller consumes it immediately.

use crate::consts::{DEVICE_BITS, GROUP_BITS, PAYLOAD_BITS};
use core::fmt;

#[cfg(not(feature = "std"))]
use heapless::String;

/// Rendered form of a message, as returned by [`Gs558Message::describe`].
///
/// A growable `String` under `std`; a fixed-capacity `heapless::String`
/// otherwise. The capacity covers the widest possible rendering.
#[cfg(feature = "std")]
pub type Description = String;

/// Rendered form of a message, as returned by [`Gs558Message::describe`].
///
/// A growable `String` under `std`; a fixed-capacity `heapless::String`
/// otherwise. The capacity covers the widest possible rendering.
#[cfg(not(feature = "std"))]
pub type Description = String<48>;

/// One GS558 remote frame payload.
///
/// All fields are unsigned and fixed-width, transmitted most significant
/// bit first. Values wider than the field are truncated to the field
/// width on encode, mirroring the fixed-width registers in the remotes
/// themselves; see [`Gs558Message::masked`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Gs558Message {
    /// Transmitter identity, 5 bits (0–31).
    pub device: u8,
    /// Group/channel identifier, 15 bits (0–32767).
    pub group: u16,
    /// Command/status nibble, 4 bits (0–15).
    pub payload: u8,
}

impl Gs558Message {
    /// Bitmask of the device field's wire width.
    pub const DEVICE_MASK: u8 = (1 << DEVICE_BITS) - 1;

    /// Bitmask of the group field's wire width.
    pub const GROUP_MASK: u16 = (1 << GROUP_BITS) - 1;

    /// Bitmask of the payload field's wire width.
    pub const PAYLOAD_MASK: u8 = (1 << PAYLOAD_BITS) - 1;

    /// Creates a message from raw field values.
    ///
    /// Values are stored as given; truncation to the wire width happens
    /// on encode.
    pub const fn new(device: u8, group: u16, payload: u8) -> Self {
        Self {
            device,
            group,
            payload,
        }
    }

    /// Returns the message with every field truncated to its wire width.
    ///
    /// This is exactly what the encoder transmits: out-of-range values
    /// wrap rather than error, so `device = 32` goes on the air as
    /// `device = 0`.
    pub const fn masked(self) -> Self {
        Self {
            device: self.device & Self::DEVICE_MASK,
            group: self.group & Self::GROUP_MASK,
            payload: self.payload & Self::PAYLOAD_MASK,
        }
    }

    /// Renders the message for logging.
    ///
    /// Pure formatting with no hidden state: rendering the same message
    /// twice produces identical output.
    pub fn describe(&self) -> Description {
        #[cfg(feature = "std")]
        {
            format!("{self}")
        }
        #[cfg(not(feature = "std"))]
        {
            use core::fmt::Write as _;
            let mut out = Description::new();
            let _ = write!(out, "{self}");
            out
        }
    }
}

impl fmt::Display for Gs558Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "device=0x{:04X} group={} payload={}",
            self.device, self.group, self.payload
        )
    }
}
