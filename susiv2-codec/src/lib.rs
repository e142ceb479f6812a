use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::io::{Error, ErrorKind};
use susiv2_protocol::{frame2packet, Outcome, PREAMBLE_SIZE};
use tokio_util::codec::{Decoder, Encoder};
use tracing::trace;

/// Splits SUSIV2 frames off a byte stream and yields the ZUSI packets they
/// carry. Replies are written verbatim.
///
/// Corrupt frames are reported as [`ErrorKind::InvalidData`] with the buffer
/// left as it was; resynchronising is up to the caller.
#[derive(Debug, Default, Clone, Copy)]
pub struct Susiv2Codec;

impl Decoder for Susiv2Codec {
    type Item = Bytes;
    type Error = Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let packet_len = match frame2packet(src.chunk()) {
            Outcome::Value(packet) => packet.len(),
            Outcome::Incomplete => return Ok(None),
            Outcome::Corrupt(err) => return Err(Error::new(ErrorKind::InvalidData, err)),
        };

        let mut packet = src.split_to(PREAMBLE_SIZE + packet_len);
        packet.advance(PREAMBLE_SIZE);
        trace!("Decoded packet {:02x?}", packet.as_ref());

        Ok(Some(packet.freeze()))
    }
}

impl<const N: usize> Encoder<heapless::Vec<u8, N>> for Susiv2Codec {
    type Error = Error;

    fn encode(
        &mut self,
        item: heapless::Vec<u8, N>,
        dst: &mut BytesMut,
    ) -> Result<(), Self::Error> {
        trace!("Encoding response {:02x?}", item.as_slice());

        dst.put_slice(&item);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::{SinkExt, StreamExt};
    use susiv2_protocol::{answer_zsp, crc8, response, Packet, Readback, ACK, NAK};
    use tokio_util::codec::FramedRead;

    const PREAMBLE: [u8; PREAMBLE_SIZE] = [0x00, 0x00, 0x00, 0x02, 0x01];

    fn frame(packet: &Packet) -> Vec<u8> {
        let mut frame = PREAMBLE.to_vec();
        frame.extend(packet.iter_bytes());
        frame
    }

    #[test]
    fn test_decode() {
        let exit = Packet::Exit {
            security: [0x55, 0xAA],
            flags: 0x02,
        };
        let mut src = BytesMut::from(&frame(&exit)[..]);
        src.extend_from_slice(&[0x00, 0x00]);

        let packet = Susiv2Codec.decode(&mut src).unwrap().unwrap();
        assert_eq!(packet.as_ref(), b"\x07\x55\xAA\x02\x7D");
        // the start of the next frame stays buffered
        assert_eq!(src.as_ref(), &[0x00, 0x00]);
        assert_eq!(Susiv2Codec.decode(&mut src).unwrap(), None);
    }

    #[test]
    fn test_decode_incomplete() {
        let bytes = frame(&Packet::CvRead {
            count: 0,
            address: 0x10,
        });
        let mut src = BytesMut::new();
        for &b in &bytes[..bytes.len() - 1] {
            src.put_u8(b);
            assert_eq!(Susiv2Codec.decode(&mut src).unwrap(), None);
        }
        assert_eq!(src.len(), bytes.len() - 1);

        src.put_u8(bytes[bytes.len() - 1]);
        let packet = Susiv2Codec.decode(&mut src).unwrap().unwrap();
        assert_eq!(packet.as_ref(), &bytes[PREAMBLE_SIZE..]);
        assert!(src.is_empty());
    }

    #[test]
    fn test_decode_corrupt() {
        let mut bytes = frame(&Packet::Features);
        *bytes.last_mut().unwrap() ^= 0x01;
        let mut src = BytesMut::from(&bytes[..]);

        let err = Susiv2Codec.decode(&mut src).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert_eq!(src.as_ref(), &bytes[..]);
    }

    #[test]
    fn test_encode() {
        let mut dst = BytesMut::new();
        Susiv2Codec.encode(response(false, None), &mut dst).unwrap();
        Susiv2Codec
            .encode(answer_zsp(Some(Readback::from_slice(&[0x2A]).unwrap())), &mut dst)
            .unwrap();
        assert_eq!(dst.as_ref(), &[NAK, ACK, 0x2A, crc8(&[0x2A])]);
    }

    #[tokio::test]
    async fn test_framed_request_reply() -> Result<(), Box<dyn std::error::Error>> {
        let cv_read = Packet::CvRead {
            count: 0,
            address: 0x07,
        };
        let mock = tokio_test::io::Builder::new()
            .read(&frame(&cv_read))
            .write(&[ACK, 0x2A, crc8(&[0x2A])])
            .build();
        let mut framed = Susiv2Codec.framed(mock);

        let packet = framed.next().await.unwrap()?;
        assert_eq!(Packet::from_bytes(&packet), Outcome::Value(cv_read));

        framed.send(response(true, Some(&[0x2A]))).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_framed_split_reads() -> Result<(), Box<dyn std::error::Error>> {
        let data = [0xAFu8, 0xBF, 0xCF, 0xDF];
        let cv_write = frame(&Packet::CvWrite {
            address: 0xFF,
            data: &data,
        });
        let features = frame(&Packet::Features);
        let mut both = cv_write[3..].to_vec();
        both.extend_from_slice(&features);

        let mock = tokio_test::io::Builder::new()
            .read(&cv_write[..3])
            .read(&both)
            .build();
        let mut packets = FramedRead::new(mock, Susiv2Codec);

        assert_eq!(
            packets.next().await.unwrap()?.as_ref(),
            b"\x02\x03\x00\x00\x00\xFF\xAF\xBF\xCF\xDF\xD3"
        );
        assert_eq!(packets.next().await.unwrap()?.as_ref(), b"\x06\xDD");
        assert!(packets.next().await.is_none());

        Ok(())
    }
}
