use tracing::trace;

use crate::fields::{get_checksum, get_command};
use crate::{crc8, Outcome};

/// Validate a ZUSI packet whose bounds are already known.
///
/// The checksum covers every byte before the trailing checksum byte.
pub fn validate(packet: &[u8]) -> Outcome<()> {
    match (get_command(packet), get_checksum(packet)) {
        (Outcome::Corrupt(err), _) | (_, Outcome::Corrupt(err)) => Outcome::Corrupt(err),
        (Outcome::Value(command), Outcome::Value(crc)) => {
            let expected = crc8(&packet[..packet.len() - 1]);
            if crc == expected {
                Outcome::Value(())
            } else {
                trace!(
                    "{:?} packet checksum mismatch: got {:#04x}, expected {:#04x}",
                    command,
                    crc,
                    expected
                );
                Outcome::corrupt()
            }
        }
        _ => Outcome::Incomplete,
    }
}
