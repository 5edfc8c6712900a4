//! Transaction output wire format
//!
//! Output layout:
//! - Value (8 bytes, little-endian, signed)
//! - Script length (VarInt)
//! - Pubkey script bytes

use super::reader::WireReader;
use super::varint::{push_varint, read_bounded_length, varint_size};
use crate::config::WireLimits;
use crate::error::Result;
use crate::types::TransactionOutput;

/// Read one transaction output
pub fn read_output(reader: &mut WireReader<'_>, limits: &WireLimits) -> Result<TransactionOutput> {
    let value = reader.read_i64_le()?;
    let script_len = read_bounded_length(
        reader,
        "pubkey script length",
        limits.max_script_length,
        limits.reject_non_canonical_varints,
    )?;
    let script_pubkey = reader.read_slice(script_len)?.to_vec();

    Ok(TransactionOutput {
        value,
        script_pubkey,
    })
}

/// Append one transaction output; the script length is taken from the script itself
pub fn write_output(buf: &mut Vec<u8>, output: &TransactionOutput) {
    buf.extend_from_slice(&output.value.to_le_bytes());
    push_varint(buf, output.script_pubkey.len() as u64);
    buf.extend_from_slice(&output.script_pubkey);
}

/// Encoded size of one output
pub fn output_size(output: &TransactionOutput) -> usize {
    8 + varint_size(output.script_pubkey.len() as u64) + output.script_pubkey.len()
}
