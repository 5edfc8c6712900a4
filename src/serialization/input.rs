//! OutPoint and transaction input wire format
//!
//! Input layout:
//! - Previous output hash (32 bytes)
//! - Previous output index (4 bytes, little-endian)
//! - Script length (VarInt)
//! - Signature script bytes
//! - Sequence (4 bytes, little-endian)

use super::reader::WireReader;
use super::varint::{push_varint, read_bounded_length, varint_size};
use crate::config::WireLimits;
use crate::constants::OUTPOINT_SIZE;
use crate::error::Result;
use crate::types::{OutPoint, TransactionInput};

/// Read a fixed-width 36-byte outpoint
pub fn read_outpoint(reader: &mut WireReader<'_>) -> Result<OutPoint> {
    let hash = reader.read_array::<32>()?;
    let index = reader.read_u32_le()?;
    Ok(OutPoint { hash, index })
}

pub fn write_outpoint(buf: &mut Vec<u8>, outpoint: &OutPoint) {
    buf.extend_from_slice(&outpoint.hash);
    buf.extend_from_slice(&outpoint.index.to_le_bytes());
}

/// Read one transaction input
///
/// The script length is checked against `limits.max_script_length` before the
/// script is copied out of the buffer.
pub fn read_input(reader: &mut WireReader<'_>, limits: &WireLimits) -> Result<TransactionInput> {
    let prevout = read_outpoint(reader)?;
    let script_len = read_bounded_length(
        reader,
        "signature script length",
        limits.max_script_length,
        limits.reject_non_canonical_varints,
    )?;
    let script_sig = reader.read_slice(script_len)?.to_vec();
    let sequence = reader.read_u32_le()?;

    Ok(TransactionInput {
        prevout,
        script_sig,
        sequence,
    })
}

/// Append one transaction input; the script length is taken from the script itself
pub fn write_input(buf: &mut Vec<u8>, input: &TransactionInput) {
    write_outpoint(buf, &input.prevout);
    push_varint(buf, input.script_sig.len() as u64);
    buf.extend_from_slice(&input.script_sig);
    buf.extend_from_slice(&input.sequence.to_le_bytes());
}

/// Encoded size of one input
pub fn input_size(input: &TransactionInput) -> usize {
    OUTPOINT_SIZE + varint_size(input.script_sig.len() as u64) + input.script_sig.len() + 4
}
