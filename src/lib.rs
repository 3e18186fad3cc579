//! # gs558
//!
//! A portable, no_std codec for the fixed-format RF signal used by
//! GS558-family 433 MHz smoke-detector remotes.
//!
//! The crate converts a structured message (device id, group id, payload
//! nibble) into a timed sequence of on/off pulse durations for
//! transmission, and converts a received pulse sequence back into the
//! structured message. The hard part lives in the decoder: interpreting
//! physical pulse-width measurements as a bitstream under timing jitter,
//! with strict sync/stop framing and no error correction. A sequence
//! that does not match the grammar exactly is rejected outright — this
//! is a life-safety-adjacent device class where a spurious accept is
//! worse than a missed frame.
//!
//! ## Crate features
//! | Feature     | Description |
//! |-------------|-------------|
//! | `std`       | Disables `#![no_std]` support and replaces `heapless` collections with their `std` counterparts |
//! | `log`       | Enables logging of decoded frames via the `log` crate |
//! | `defmt-0-3` | Derives `defmt::Format` on message and pulse types |
//!
//! ## Usage
//!
//! ```rust
//! use gs558::message::Gs558Message;
//! use gs558::protocol::{Gs558Protocol, RemoteProtocol};
//! use gs558::pulse::PulseTrain;
//!
//! let protocol = Gs558Protocol;
//! let msg = Gs558Message::new(5, 100, 3);
//!
//! // Encode: sync + 24 data bits + doubled stop, baseband carrier.
//! let mut train = PulseTrain::new();
//! protocol.encode(&mut train, &msg);
//! assert_eq!(train.len(), 27);
//!
//! // Decode: a cursor over measured pulses with a tolerance window.
//! let mut cursor = train.cursor();
//! assert_eq!(protocol.decode(&mut cursor), Some(msg));
//! ```
//!
//! To key an actual transmitter module, encode into a
//! [`PinTransmitter`](crate::driver::PinTransmitter) instead of a
//! [`PulseTrain`](crate::pulse::PulseTrain); it plays each pulse on an
//! `embedded-hal` output pin as it is pushed.
//!
//! ## Integration notes
//!
//! - The decoder pulls pulses lazily through
//!   [`ReceiveSource`](crate::pulse::ReceiveSource) and stops at the
//!   first mismatch, so a dispatcher can probe many protocols cheaply
//!   against one capture; see
//!   [`ProtocolRegistry`](crate::protocol::ProtocolRegistry).
//! - Tolerance and clock resolution belong to the receive source, not
//!   the codec; the codec supplies only the nominal widths in
//!   [`consts`].
//! - Encode and decode are single synchronous calls over bounded input
//!   with no shared mutable state; the timing table is immutable and
//!   safe to read from any number of threads.
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
pub use heapless;

pub mod consts;
pub mod driver;
pub mod error;
pub mod message;
pub mod protocol;
pub mod pulse;
