//! Conversion of SUSIV2 frames into the ZUSI packets they carry.

use crate::command::FEATURES_SIZE;
use crate::fields::get_size;
use crate::outcome::value;
use crate::validate::validate;
use crate::Outcome;

/// Bytes in front of the embedded ZUSI packet.
pub const PREAMBLE_SIZE: usize = 5;

/// No SUSIV2 frame is shorter than a preamble followed by a Features packet.
pub const MIN_FRAME_SIZE: usize = PREAMBLE_SIZE + FEATURES_SIZE;

/// Bound a ZUSI packet to the length its command requires and validate it.
///
/// Bytes past the resolved length belong to whatever follows and are left
/// out of the returned view.
pub fn packet(bytes: &[u8]) -> Outcome<&[u8]> {
    let size = value!(get_size(bytes));
    let packet = match bytes.get(..size) {
        Some(packet) => packet,
        None => return Outcome::Incomplete,
    };
    validate(packet).map(|()| packet)
}

/// Strip the preamble without any checks.
pub fn frame2packet_no_validate(frame: &[u8]) -> &[u8] {
    frame.get(PREAMBLE_SIZE..).unwrap_or_default()
}

/// Extract the validated ZUSI packet from a SUSIV2 frame.
pub fn frame2packet(frame: &[u8]) -> Outcome<&[u8]> {
    if frame.len() < MIN_FRAME_SIZE {
        return Outcome::Incomplete;
    }
    packet(&frame[PREAMBLE_SIZE..])
}

/// In-place variant of [`frame2packet_no_validate`].
pub fn format_no_validate(frame: &mut &[u8]) {
    *frame = frame2packet_no_validate(*frame);
}

/// In-place variant of [`frame2packet`]. On success `frame` is narrowed to
/// the ZUSI packet, otherwise it is left untouched.
pub fn format(frame: &mut &[u8]) -> Outcome<()> {
    let packet = value!(frame2packet(*frame));
    *frame = packet;
    Outcome::Value(())
}
