//! ZUSI command identifiers and the field layout they imply.

use crate::ProtocolError;

pub const CMD_POS: usize = 0;
pub const COUNT_POS: usize = 1;
pub const ADDR_POS: usize = 2;
pub const ADDR_SIZE: usize = 4;
pub const DATA_POS: usize = ADDR_POS + ADDR_SIZE;
pub const SECURITY_POS: usize = 1;
pub const EXIT_FLAGS_POS: usize = 3;

pub const CV_READ_SIZE: usize = 7;
pub const ZPP_ERASE_SIZE: usize = 4;
pub const FEATURES_SIZE: usize = 2;
pub const EXIT_SIZE: usize = 5;
pub const ZPP_LC_DC_QUERY_SIZE: usize = 6;

/// Length of a CvWrite or ZppWrite packet. `count` is the number of data
/// bytes minus one.
pub const fn counted_size(count: u8) -> usize {
    7 + count as usize + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    CvRead = 0x01,
    CvWrite = 0x02,
    ZppErase = 0x04,
    ZppWrite = 0x05,
    Features = 0x06,
    Exit = 0x07,
    ZppLcDcQuery = 0x0D,
}

/// How the total packet length follows from the command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthRule {
    Fixed(usize),
    /// Derived from the count byte, see [`counted_size`].
    Counted,
}

impl Command {
    pub const fn length_rule(self) -> LengthRule {
        match self {
            Command::CvRead => LengthRule::Fixed(CV_READ_SIZE),
            Command::CvWrite | Command::ZppWrite => LengthRule::Counted,
            Command::ZppErase => LengthRule::Fixed(ZPP_ERASE_SIZE),
            Command::Features => LengthRule::Fixed(FEATURES_SIZE),
            Command::Exit => LengthRule::Fixed(EXIT_SIZE),
            Command::ZppLcDcQuery => LengthRule::Fixed(ZPP_LC_DC_QUERY_SIZE),
        }
    }

    pub const fn has_count(self) -> bool {
        matches!(
            self,
            Command::CvRead | Command::CvWrite | Command::ZppWrite
        )
    }

    pub const fn has_address(self) -> bool {
        self.has_count()
    }

    pub const fn has_data(self) -> bool {
        matches!(self, Command::CvWrite | Command::ZppWrite)
    }
}

impl TryFrom<u8> for Command {
    type Error = ProtocolError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Ok(match byte {
            0x01 => Command::CvRead,
            0x02 => Command::CvWrite,
            0x04 => Command::ZppErase,
            0x05 => Command::ZppWrite,
            0x06 => Command::Features,
            0x07 => Command::Exit,
            0x0D => Command::ZppLcDcQuery,
            _ => return Err(ProtocolError),
        })
    }
}

impl From<Command> for u8 {
    fn from(command: Command) -> Self {
        command as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_bytes() {
        for byte in 0..=u8::MAX {
            match Command::try_from(byte) {
                Ok(command) => assert_eq!(u8::from(command), byte),
                Err(err) => assert_eq!(err, ProtocolError),
            }
        }
        assert!(Command::try_from(0x00).is_err());
        assert!(Command::try_from(0x03).is_err());
        assert_eq!(Command::try_from(0x0D), Ok(Command::ZppLcDcQuery));
    }

    #[test]
    fn test_length_rules() {
        assert_eq!(Command::CvRead.length_rule(), LengthRule::Fixed(7));
        assert_eq!(Command::ZppErase.length_rule(), LengthRule::Fixed(4));
        assert_eq!(Command::Features.length_rule(), LengthRule::Fixed(2));
        assert_eq!(Command::Exit.length_rule(), LengthRule::Fixed(5));
        assert_eq!(Command::ZppLcDcQuery.length_rule(), LengthRule::Fixed(6));
        assert_eq!(Command::CvWrite.length_rule(), LengthRule::Counted);
        assert_eq!(Command::ZppWrite.length_rule(), LengthRule::Counted);
        assert_eq!(counted_size(0), 8);
        assert_eq!(counted_size(3), 11);
        assert_eq!(counted_size(255), 263);
    }
}
