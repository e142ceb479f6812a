//! Single-field accessors on a ZUSI packet.
//!
//! Every accessor takes a span starting at the command byte and decides on
//! its own whether the command may carry the requested field. Asking for a
//! field the command does not have is [`Outcome::Corrupt`], running out of
//! bytes is [`Outcome::Incomplete`].

use tracing::trace;

use crate::command::{
    counted_size, Command, LengthRule, ADDR_POS, ADDR_SIZE, CMD_POS, COUNT_POS, DATA_POS,
    EXIT_FLAGS_POS,
};
use crate::outcome::value;
use crate::Outcome;

pub const MAX_DATA_SIZE: usize = 256;

pub type Data = heapless::Vec<u8, MAX_DATA_SIZE>;

pub fn get_command(packet: &[u8]) -> Outcome<Command> {
    match packet.get(CMD_POS) {
        Some(&byte) => match Command::try_from(byte) {
            Ok(command) => Outcome::Value(command),
            Err(err) => {
                trace!("Unknown command byte {:#04x}", byte);
                Outcome::Corrupt(err)
            }
        },
        None => Outcome::Incomplete,
    }
}

fn command_with(packet: &[u8], field: &str, allowed: fn(Command) -> bool) -> Outcome<Command> {
    let command = value!(get_command(packet));
    if allowed(command) {
        Outcome::Value(command)
    } else {
        trace!("{:?} packets carry no {}", command, field);
        Outcome::corrupt()
    }
}

pub fn get_count(packet: &[u8]) -> Outcome<u8> {
    value!(command_with(packet, "count", Command::has_count));
    match packet.get(COUNT_POS) {
        Some(&count) => Outcome::Value(count),
        None => Outcome::Incomplete,
    }
}

/// Big-endian 4-byte address.
pub fn get_address(packet: &[u8]) -> Outcome<u32> {
    value!(command_with(packet, "address", Command::has_address));
    match packet.get(ADDR_POS..ADDR_POS + ADDR_SIZE) {
        Some(&[a, b, c, d]) => Outcome::Value(u32::from_be_bytes([a, b, c, d])),
        _ => Outcome::Incomplete,
    }
}

/// Payload of a write packet, `count + 1` bytes long.
pub fn get_data(packet: &[u8]) -> Outcome<Data> {
    value!(command_with(packet, "data", Command::has_data));
    let count = value!(get_count(packet));
    let end = DATA_POS + count as usize + 1;
    match packet.get(DATA_POS..end) {
        Some(bytes) => match Data::from_slice(bytes) {
            Ok(data) => Outcome::Value(data),
            Err(()) => Outcome::corrupt(),
        },
        None => Outcome::Incomplete,
    }
}

pub fn get_exit_flags(packet: &[u8]) -> Outcome<u8> {
    value!(command_with(packet, "exit flags", |command| command == Command::Exit));
    match packet.get(EXIT_FLAGS_POS) {
        Some(&flags) => Outcome::Value(flags),
        None => Outcome::Incomplete,
    }
}

/// Total length the packet must occupy, resolved from its command and, for
/// write commands, its count byte.
pub fn get_size(packet: &[u8]) -> Outcome<usize> {
    match value!(get_command(packet)).length_rule() {
        LengthRule::Fixed(size) => Outcome::Value(size),
        LengthRule::Counted => get_count(packet).map(counted_size),
    }
}

/// Trailing checksum byte. Only reported once the span is exactly as long
/// as its command requires; a shorter or longer span is incomplete.
pub fn get_checksum(packet: &[u8]) -> Outcome<u8> {
    let size = value!(get_size(packet));
    match packet.last() {
        Some(&crc) if packet.len() == size => Outcome::Value(crc),
        _ => Outcome::Incomplete,
    }
}
