//! SUSIV2 frames and the ZUSI packets they carry.
//!
//! Everything here works on caller-supplied byte windows and reports one of
//! three [`Outcome`]s: a value, an incomplete window, or corrupt bytes.

pub use command::{Command, LengthRule};
pub use fields::{
    get_address, get_checksum, get_command, get_count, get_data, get_exit_flags, get_size, Data,
};
pub use outcome::{Outcome, ProtocolError};
pub use response::{
    answer_zsp, feedback2response, response, Answer, Feedback, Readback, Response, ACK,
    ANSWER_SIZE, MAX_READBACK_SIZE, MAX_RESPONSE_SIZE, NAK,
};
pub use transcode::{
    format, format_no_validate, frame2packet, frame2packet_no_validate, packet, MIN_FRAME_SIZE,
    PREAMBLE_SIZE,
};
pub use utils::crc8;
pub use validate::validate;

use command::DATA_POS;
use outcome::value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Packet<'a> {
    CvRead {
        count: u8,
        address: u32,
    },
    CvWrite {
        address: u32,
        data: &'a [u8],
    },
    ZppErase {
        security: [u8; 2],
    },
    ZppWrite {
        address: u32,
        data: &'a [u8],
    },
    Features,
    Exit {
        security: [u8; 2],
        flags: u8,
    },
    ZppLcDcQuery {
        developer_code: [u8; 4],
    },
}

impl<'a> Packet<'a> {
    /// Decode a validated packet. Bytes past the packet's length are ignored.
    pub fn from_bytes(bytes: &'a [u8]) -> Outcome<Self> {
        let bounded = value!(packet(bytes));
        let command = value!(get_command(bounded));
        match parser::parse_body(command, &bounded[1..bounded.len() - 1]) {
            Ok((_, packet)) => Outcome::Value(packet),
            Err(_) => Outcome::corrupt(),
        }
    }

    pub fn command(&self) -> Command {
        match self {
            Packet::CvRead { .. } => Command::CvRead,
            Packet::CvWrite { .. } => Command::CvWrite,
            Packet::ZppErase { .. } => Command::ZppErase,
            Packet::ZppWrite { .. } => Command::ZppWrite,
            Packet::Features => Command::Features,
            Packet::Exit { .. } => Command::Exit,
            Packet::ZppLcDcQuery { .. } => Command::ZppLcDcQuery,
        }
    }

    /// Encoded length including the checksum.
    pub fn size(&self) -> usize {
        let data_len = match self {
            Packet::CvWrite { data, .. } | Packet::ZppWrite { data, .. } => data.len(),
            _ => 0,
        };
        match self.command().length_rule() {
            LengthRule::Fixed(size) => size,
            LengthRule::Counted => DATA_POS + data_len + 1,
        }
    }

    pub fn iter_bytes(&'a self) -> iterator::PacketIterator<'a> {
        iterator::PacketIterator::new(self)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.iter_bytes().collect::<Vec<u8>>()
    }
}

pub mod command;
mod fields;
mod iterator;
mod outcome;
mod parser;
mod response;
mod transcode;
mod utils;
mod validate;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes() {
        assert_eq!(
            Packet::from_bytes(b"\x07\x55\xAA\x02\x7D"),
            Outcome::Value(Packet::Exit {
                security: [0x55, 0xAA],
                flags: 0x02
            })
        );
        assert_eq!(
            Packet::from_bytes(b"\x05\x00\x00\x00\x01\x00\x42\x98\xFF"),
            Outcome::Value(Packet::ZppWrite {
                address: 0x100,
                data: b"\x42"
            })
        );
        assert!(Packet::from_bytes(b"\x07\x55\xAA\x02").is_incomplete());
        assert!(Packet::from_bytes(b"\x07\x55\xAA\x02\x7E").is_corrupt());
        assert!(Packet::from_bytes(b"\x08").is_corrupt());
    }

    #[test]
    fn test_round_trip_through_frame() {
        let data = [0x10u8, 0x20, 0x30];
        let packet = Packet::CvWrite {
            address: 0x0000_0400,
            data: &data,
        };
        let bytes = packet.to_bytes();
        assert_eq!(bytes.len(), packet.size());

        let mut frame = vec![0x00, 0x00, 0x00, 0x00, 0x01];
        frame.extend_from_slice(&bytes);
        frame.extend_from_slice(&Packet::Features.to_bytes());

        let inner = frame2packet(&frame).value().unwrap();
        assert_eq!(inner, &bytes[..]);
        assert_eq!(Packet::from_bytes(inner), Outcome::Value(packet));
        assert_eq!(get_address(inner), Outcome::Value(0x0400));
        assert_eq!(get_data(inner).map(|d| d.to_vec()), Outcome::Value(data.to_vec()));
    }

    #[test]
    fn test_sizes() {
        assert_eq!(Packet::Features.size(), 2);
        assert_eq!(
            Packet::CvRead {
                count: 3,
                address: 0
            }
            .size(),
            7
        );
        assert_eq!(
            Packet::ZppWrite {
                address: 0,
                data: &[0; 256]
            }
            .size(),
            command::counted_size(255)
        );
    }
}
