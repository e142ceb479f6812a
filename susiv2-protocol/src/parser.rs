use nom::bytes::complete::take;
use nom::combinator::{all_consuming, map_res, success};
use nom::number::complete::{be_u32, be_u8};
use nom::{IResult, Parser};

use crate::{Command, Packet};

type ParseResult<'a, O> = IResult<&'a [u8], O>;

fn count(i: &[u8]) -> ParseResult<'_, u8> {
    be_u8(i)
}

fn address(i: &[u8]) -> ParseResult<'_, u32> {
    be_u32(i)
}

fn security(i: &[u8]) -> ParseResult<'_, [u8; 2]> {
    map_res(take(2usize), |b: &[u8]| <[u8; 2]>::try_from(b)).parse(i)
}

fn developer_code(i: &[u8]) -> ParseResult<'_, [u8; 4]> {
    map_res(take(4usize), |b: &[u8]| <[u8; 4]>::try_from(b)).parse(i)
}

fn write_body(i: &[u8]) -> ParseResult<'_, (u32, &[u8])> {
    let (i, count) = count(i)?;
    (address, take(count as usize + 1)).parse(i)
}

fn cv_read(i: &[u8]) -> ParseResult<'_, Packet<'_>> {
    (count, address)
        .map(|(count, address)| Packet::CvRead { count, address })
        .parse(i)
}

fn cv_write(i: &[u8]) -> ParseResult<'_, Packet<'_>> {
    write_body
        .map(|(address, data)| Packet::CvWrite { address, data })
        .parse(i)
}

fn zpp_write(i: &[u8]) -> ParseResult<'_, Packet<'_>> {
    write_body
        .map(|(address, data)| Packet::ZppWrite { address, data })
        .parse(i)
}

fn zpp_erase(i: &[u8]) -> ParseResult<'_, Packet<'_>> {
    security
        .map(|security| Packet::ZppErase { security })
        .parse(i)
}

fn exit(i: &[u8]) -> ParseResult<'_, Packet<'_>> {
    (security, be_u8)
        .map(|(security, flags)| Packet::Exit { security, flags })
        .parse(i)
}

fn zpp_lc_dc_query(i: &[u8]) -> ParseResult<'_, Packet<'_>> {
    developer_code
        .map(|developer_code| Packet::ZppLcDcQuery { developer_code })
        .parse(i)
}

/// Decode the fields between the command byte and the checksum.
pub fn parse_body(command: Command, body: &[u8]) -> ParseResult<'_, Packet<'_>> {
    match command {
        Command::CvRead => all_consuming(cv_read).parse(body),
        Command::CvWrite => all_consuming(cv_write).parse(body),
        Command::ZppErase => all_consuming(zpp_erase).parse(body),
        Command::ZppWrite => all_consuming(zpp_write).parse(body),
        Command::Features => all_consuming(success(Packet::Features)).parse(body),
        Command::Exit => all_consuming(exit).parse(body),
        Command::ZppLcDcQuery => all_consuming(zpp_lc_dc_query).parse(body),
    }
}
