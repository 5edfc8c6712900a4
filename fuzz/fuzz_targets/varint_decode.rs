#![no_main]
use libfuzzer_sys::fuzz_target;
use msgtx_codec::serialization::varint::{decode_varint_with_policy, encode_varint};

fuzz_target!(|data: &[u8]| {
    if let Ok((value, consumed)) = decode_varint_with_policy(data, true) {
        assert_eq!(encode_varint(value), &data[..consumed]);
    }

    if let Ok((value, consumed)) = decode_varint_with_policy(data, false) {
        assert!(encode_varint(value).len() <= consumed);
    }
});
