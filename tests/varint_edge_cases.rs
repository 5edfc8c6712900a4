//! VarInt encoding edge cases
//!
//! Width boundaries must match Bitcoin Core's CompactSize byte-for-byte,
//! otherwise every length prefix in the payload shifts.

use msgtx_codec::config::CodecConfig;
use msgtx_codec::error::CodecError;
use msgtx_codec::serialization::varint::{
    decode_varint, decode_varint_with_policy, encode_varint, varint_size, write_varint,
};
use msgtx_codec::serialization::{deserialize_transaction_with_config, serialize_transaction};
use msgtx_codec::types::*;

#[test]
fn test_varint_boundary_widths() {
    let test_cases = vec![
        (0x00, 1),
        (0xfc, 1),
        (0xfd, 3),
        (0xffff, 3),
        (0x10000, 5),
        (0xffffffff, 5),
        (0x100000000, 9),
    ];

    for (value, expected_bytes) in test_cases {
        let encoded = encode_varint(value);
        assert_eq!(encoded.len(), expected_bytes, "Wrong encoding length for value {value}");
        assert_eq!(varint_size(value), expected_bytes);

        let (decoded, bytes_consumed) = decode_varint(&encoded).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(bytes_consumed, expected_bytes);
    }
}

#[test]
fn test_varint_boundary_bytes() {
    assert_eq!(encode_varint(0xfc), vec![0xfc]);
    assert_eq!(encode_varint(0xfd), vec![0xfd, 0xfd, 0x00]);
    assert_eq!(encode_varint(0xffff), vec![0xfd, 0xff, 0xff]);
    assert_eq!(encode_varint(0x10000), vec![0xfe, 0x00, 0x00, 0x01, 0x00]);
    assert_eq!(encode_varint(0xffffffff), vec![0xfe, 0xff, 0xff, 0xff, 0xff]);
    assert_eq!(
        encode_varint(0x100000000),
        vec![0xff, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]
    );
}

#[test]
fn test_varint_maximum_value() {
    let (decoded, bytes_consumed) = decode_varint(&encode_varint(u64::MAX)).unwrap();
    assert_eq!(decoded, u64::MAX);
    assert_eq!(bytes_consumed, 9);
}

#[test]
fn test_varint_invalid_encoding_rejected() {
    // Value 252 encoded with 0xfd prefix
    assert_eq!(
        decode_varint(&[0xfd, 252, 0]),
        Err(CodecError::NonCanonicalVarInt { value: 252, width: 3 })
    );
    // Value 65535 encoded with 0xfe prefix
    assert!(decode_varint(&[0xfe, 255, 255, 0, 0])
        .unwrap_err()
        .is_malformed_length());
    // Value 0xffffffff encoded with 0xff prefix
    assert!(decode_varint(&[0xff, 255, 255, 255, 255, 0, 0, 0, 0]).is_err());
}

#[test]
fn test_varint_permissive_policy() {
    assert_eq!(decode_varint_with_policy(&[0xfd, 0x01, 0x00], false), Ok((1, 3)));
    assert_eq!(
        decode_varint_with_policy(&[0xfe, 0xff, 0xff, 0x00, 0x00], false),
        Ok((0xffff, 5))
    );
}

#[test]
fn test_varint_truncated_data() {
    for data in [
        &[][..],
        &[0xfd],
        &[0xfd, 0],
        &[0xfe],
        &[0xfe, 0, 0, 0],
        &[0xff],
        &[0xff, 0, 0, 0, 0, 0, 0, 0],
    ] {
        let err = decode_varint(data).unwrap_err();
        assert!(err.is_unexpected_eof(), "{data:?} gave {err:?}");
    }
}

#[test]
fn test_write_varint_matches_encode() {
    for value in [0u64, 0xfc, 0xfd, 0x1234, 0x10000, 0xdeadbeef, 0x100000000] {
        let mut out = Vec::new();
        let written = write_varint(&mut out, value).unwrap();
        assert_eq!(written, out.len());
        assert_eq!(out, encode_varint(value));
    }
}

/// A transaction whose output count uses a non-minimal 0xfd form
fn non_canonical_count_payload() -> Vec<u8> {
    let tx = Transaction {
        version: 1,
        flag: 0,
        inputs: vec![TransactionInput {
            prevout: OutPoint::new([3; 32], 0),
            script_sig: vec![],
            sequence: 0,
        }],
        outputs: vec![TransactionOutput {
            value: 1,
            script_pubkey: vec![0x51],
        }],
        witnesses: vec![],
        lock_time: 0,
    };
    let canonical = serialize_transaction(&tx).unwrap();
    // version(4) + input count(1) + input(41) -> output count at offset 46
    let mut payload = canonical[..46].to_vec();
    payload.extend_from_slice(&[0xfd, 0x01, 0x00]);
    payload.extend_from_slice(&canonical[47..]);
    payload
}

#[test]
fn test_strictness_flag_in_transaction_decode() {
    let payload = non_canonical_count_payload();

    let err = deserialize_transaction_with_config(&payload, &CodecConfig::default()).unwrap_err();
    assert_eq!(err, CodecError::NonCanonicalVarInt { value: 1, width: 3 });

    let tx = deserialize_transaction_with_config(&payload, &CodecConfig::permissive()).unwrap();
    assert_eq!(tx.outputs.len(), 1);
    // Re-encoding always produces the minimal form
    assert_eq!(serialize_transaction(&tx).unwrap().len(), payload.len() - 2);
}

#[test]
fn test_permissive_decode_reencodes_minimal() {
    // version, wide zero input count, zero output count, lock time
    let payload = [1, 0, 0, 0, 0xfd, 0, 0, 0, 0, 0, 0, 0];

    assert_eq!(
        deserialize_transaction_with_config(&payload, &CodecConfig::default()),
        Err(CodecError::NonCanonicalVarInt { value: 0, width: 3 })
    );

    let tx = deserialize_transaction_with_config(&payload, &CodecConfig::permissive()).unwrap();
    assert!(tx.inputs.is_empty());
    assert!(tx.outputs.is_empty());
    assert_eq!(
        serialize_transaction(&tx).unwrap(),
        vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0]
    );
}
