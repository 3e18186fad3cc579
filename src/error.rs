//! The codec's single decode failure.

use thiserror::Error;

/// The observed pulse sequence does not conform to the frame grammar.
///
/// This is the only error the decoder produces. The protocol carries no
/// checksum, so a wrong symbol, an exhausted source, and garbled timing
/// all collapse into the same total rejection; a partially decoded
/// message is never returned. Retry policy (e.g. listening for the next
/// sync) belongs to the caller.
///
/// Encoding has no error path: out-of-range fields are truncated to
/// their wire width instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("pulse sequence does not match the GS558 frame grammar")]
pub struct FrameMismatch;
