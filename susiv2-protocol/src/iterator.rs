use crc::Digest;

use crate::command::{ADDR_POS, CMD_POS, COUNT_POS, DATA_POS, EXIT_FLAGS_POS, SECURITY_POS};
use crate::utils::crc8_digest;
use crate::Packet;

pub struct PacketIterator<'a> {
    packet: &'a Packet<'a>,
    index: usize,
    digest: Option<Digest<'static, u8>>,
}

impl<'a> PacketIterator<'a> {
    pub(crate) fn new(packet: &'a Packet<'a>) -> Self {
        if let Packet::CvWrite { data, .. } | Packet::ZppWrite { data, .. } = packet {
            debug_assert!(
                (1..=256).contains(&data.len()),
                "write packets carry 1 to 256 data bytes, got {}",
                data.len()
            );
        }
        Self {
            packet,
            index: 0,
            digest: Some(crc8_digest()),
        }
    }

    fn body_byte(&self) -> Option<u8> {
        let i = self.index;
        if i == CMD_POS {
            return Some(self.packet.command().into());
        }
        let b = match *self.packet {
            Packet::CvRead { count, address } => match i {
                COUNT_POS => count,
                _ if (ADDR_POS..DATA_POS).contains(&i) => address.to_be_bytes()[i - ADDR_POS],
                _ => return None,
            },
            Packet::CvWrite { address, data } | Packet::ZppWrite { address, data } => match i {
                COUNT_POS => data.len().wrapping_sub(1) as u8,
                _ if (ADDR_POS..DATA_POS).contains(&i) => address.to_be_bytes()[i - ADDR_POS],
                _ => *data.get(i - DATA_POS)?,
            },
            Packet::ZppErase { security } => *security.get(i - SECURITY_POS)?,
            Packet::Features => return None,
            Packet::Exit { security, flags } => match i {
                EXIT_FLAGS_POS => flags,
                _ => *security.get(i - SECURITY_POS)?,
            },
            Packet::ZppLcDcQuery { developer_code } => *developer_code.get(i - 1)?,
        };
        Some(b)
    }
}

impl Iterator for PacketIterator<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        let b = match self.body_byte() {
            Some(b) => {
                if let Some(digest) = self.digest.as_mut() {
                    digest.update(&[b]);
                }
                b
            }
            None => self.digest.take()?.finalize(),
        };
        self.index += 1;
        Some(b)
    }
}
