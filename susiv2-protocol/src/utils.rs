use crc::{Crc, Digest, CRC_8_MAXIM_DOW};

static CRC8: Crc<u8> = Crc::<u8>::new(&CRC_8_MAXIM_DOW);

/// Dallas/Maxim 1-Wire CRC-8, as used by ZUSI and SUSIV2.
pub fn crc8(bytes: &[u8]) -> u8 {
    CRC8.checksum(bytes)
}

pub(crate) fn crc8_digest() -> Digest<'static, u8> {
    CRC8.digest()
}
