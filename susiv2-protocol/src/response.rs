//! Replies sent back to the host tool.
//!
//! A reply is a single [`ACK`] or [`NAK`] byte. Positive replies may carry up
//! to [`MAX_READBACK_SIZE`] bytes read back from the decoder, followed by
//! their CRC-8.

use crate::crc8;

pub const ACK: u8 = 0x06;
pub const NAK: u8 = 0x15;

pub const MAX_READBACK_SIZE: usize = 4;

/// ACK, read-back, CRC-8.
pub const ANSWER_SIZE: usize = 1 + MAX_READBACK_SIZE + 1;

pub const MAX_RESPONSE_SIZE: usize = 16;

pub type Readback = heapless::Vec<u8, MAX_READBACK_SIZE>;

/// Decoder feedback for a single command. `None` if the decoder did not
/// acknowledge it, otherwise whatever it read back (possibly nothing).
pub type Feedback = Option<Readback>;

pub type Response = heapless::Vec<u8, MAX_RESPONSE_SIZE>;

/// Reply formatted for the ZSP programmer.
pub type Answer = heapless::Vec<u8, ANSWER_SIZE>;

fn reply<const N: usize>(acknowledged: bool, data: Option<&[u8]>) -> heapless::Vec<u8, N> {
    const { assert!(N >= ANSWER_SIZE) };

    if !acknowledged {
        return [NAK].into_iter().collect();
    }

    let data = data.unwrap_or_default();
    debug_assert!(
        data.len() <= MAX_READBACK_SIZE,
        "read-back of {} bytes exceeds {}",
        data.len(),
        MAX_READBACK_SIZE
    );
    let data = &data[..data.len().min(MAX_READBACK_SIZE)];
    let crc = (!data.is_empty()).then(|| crc8(data));

    [ACK]
        .into_iter()
        .chain(data.iter().copied())
        .chain(crc)
        .collect()
}

/// Build a reply. Anything not acknowledged is a NAK; an acknowledgement
/// without data is a bare ACK.
pub fn response(acknowledged: bool, data: Option<&[u8]>) -> Response {
    reply(acknowledged, data)
}

pub fn feedback2response(feedback: &Feedback) -> Response {
    reply(feedback.is_some(), feedback.as_deref())
}

pub fn answer_zsp(readback: Option<Readback>) -> Answer {
    reply(readback.is_some(), readback.as_deref())
}
