//! Segregated witness stack wire format
//!
//! One stack per input, present only in segwit-encoded transactions:
//! - VarInt: item count
//! - For each item:
//!   - VarInt: item length
//!   - Item bytes
//!
//! Zero-length items are valid and occupy a stack slot (e.g. the dummy
//! element consumed by OP_CHECKMULTISIG).

use super::reader::WireReader;
use super::varint::{push_varint, read_bounded_length, varint_size};
use crate::config::WireLimits;
use crate::constants::MIN_WITNESS_ITEM_SIZE;
use crate::error::Result;
use crate::types::Witness;

/// Read one witness stack
pub fn read_witness(reader: &mut WireReader<'_>, limits: &WireLimits) -> Result<Witness> {
    let item_count = read_bounded_length(
        reader,
        "witness item count",
        limits.max_message_size / MIN_WITNESS_ITEM_SIZE,
        limits.reject_non_canonical_varints,
    )?;

    let mut witness = Witness::with_capacity(item_count.min(reader.remaining()));
    for _ in 0..item_count {
        let item_len = read_bounded_length(
            reader,
            "witness item length",
            limits.max_witness_item_length,
            limits.reject_non_canonical_varints,
        )?;
        witness.push(reader.read_slice(item_len)?.to_vec());
    }

    Ok(witness)
}

/// Append one witness stack
pub fn write_witness(buf: &mut Vec<u8>, witness: &Witness) {
    push_varint(buf, witness.len() as u64);
    for item in witness {
        push_varint(buf, item.len() as u64);
        buf.extend_from_slice(item);
    }
}

/// Encoded size of one witness stack, including all prefixes
pub fn witness_encoded_size(witness: &Witness) -> usize {
    varint_size(witness.len() as u64)
        + witness
            .iter()
            .map(|item| varint_size(item.len() as u64) + item.len())
            .sum::<usize>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    #[test]
    fn test_zero_length_item_keeps_slot() {
        let data = [0x03, 0x00, 0x02, 0xaa, 0xbb, 0x00];
        let mut reader = WireReader::new(&data);
        let witness = read_witness(&mut reader, &WireLimits::default()).unwrap();

        assert_eq!(witness, vec![vec![], vec![0xaa, 0xbb], vec![]]);
        assert!(reader.is_empty());

        let mut buf = Vec::new();
        write_witness(&mut buf, &witness);
        assert_eq!(buf, data);
        assert_eq!(witness_encoded_size(&witness), data.len());
    }

    #[test]
    fn test_empty_stack() {
        let mut buf = Vec::new();
        write_witness(&mut buf, &Witness::new());
        assert_eq!(buf, vec![0x00]);
        assert_eq!(
            read_witness(&mut WireReader::new(&buf), &WireLimits::default()),
            Ok(Witness::new())
        );
    }

    #[test]
    fn test_item_length_above_limit() {
        let limits = WireLimits {
            max_witness_item_length: 520,
            ..WireLimits::default()
        };
        let data = [0x01, 0xfd, 0x09, 0x02];
        assert_eq!(
            read_witness(&mut WireReader::new(&data), &limits),
            Err(CodecError::MalformedLength {
                field: "witness item length",
                declared: 521,
                max: 520
            })
        );
    }

    #[test]
    fn test_truncated_item() {
        let data = [0x02, 0x01, 0xaa, 0x05, 0x01];
        let err = read_witness(&mut WireReader::new(&data), &WireLimits::default()).unwrap_err();
        assert!(err.is_unexpected_eof());
    }
}
