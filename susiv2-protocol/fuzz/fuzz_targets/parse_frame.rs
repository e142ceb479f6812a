#![no_main]

use libfuzzer_sys::fuzz_target;
use susiv2_protocol::{frame2packet, Outcome, Packet};

fuzz_target!(|data: &[u8]| {
    if let Outcome::Value(bytes) = frame2packet(data) {
        if let Outcome::Value(packet) = Packet::from_bytes(bytes) {
            assert_eq!(packet.to_bytes(), bytes);
        }
    }
});
