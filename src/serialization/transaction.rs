//! Transaction wire format serialization/deserialization
//!
//! Legacy format:
//! - Version (4 bytes, little-endian, signed)
//! - Input count (VarInt) + inputs
//! - Output count (VarInt) + outputs
//! - Lock time (4 bytes, little-endian)
//!
//! Segwit format (BIP144) inserts a marker byte `0x00` and a non-zero flag
//! byte after the version, and one witness stack per input between the
//! outputs and the lock time.
//!
//! The two formats share a prefix. A `0x00` after the version is either the
//! segwit marker or a zero input count; the byte after it decides.

use super::input::{input_size, read_input, write_input};
use super::output::{output_size, read_output, write_output};
use super::reader::WireReader;
use super::varint::{push_varint, read_bounded_length, varint_size};
use super::witness::{read_witness, witness_encoded_size, write_witness};
use crate::config::{get_codec_config, CodecConfig};
use crate::constants::{
    MIN_INPUT_SIZE, MIN_OUTPUT_SIZE, SEGWIT_MARKER, WITNESS_SCALE_FACTOR,
};
use crate::error::{CodecError, Result};
use crate::types::{Transaction, WireFormat};
use log::{debug, trace};
use std::io::{Read, Write};

/// Decide the sub-encoding from the bytes following the version
///
/// Does not consume anything. `00 xx` with `xx != 0` is segwit; any other
/// prefix, including `00 00`, is legacy and the `0x00` is the input count.
pub fn detect_wire_format(reader: &WireReader<'_>) -> Result<WireFormat> {
    if reader.peek_at(0)? != SEGWIT_MARKER {
        return Ok(WireFormat::Legacy);
    }
    match reader.peek_at(1)? {
        0 => Ok(WireFormat::Legacy),
        flag => Ok(WireFormat::Segwit { flag }),
    }
}

/// Read one transaction from the cursor
///
/// On success the cursor sits just past the lock time. On error the cursor
/// position is unspecified and no partial transaction is returned.
pub fn read_transaction(reader: &mut WireReader<'_>, config: &CodecConfig) -> Result<Transaction> {
    let start = reader.position();
    let result = read_transaction_fields(reader, config);
    if let Err(ref err) = result {
        if config.debug.log_rejections {
            debug!(
                "rejected tx payload starting at offset {start}, failed at offset {}: {err}",
                reader.position()
            );
        }
    }
    result
}

fn read_transaction_fields(
    reader: &mut WireReader<'_>,
    config: &CodecConfig,
) -> Result<Transaction> {
    let limits = &config.limits;
    let verbose = config.debug.enable_verbose_logging;

    let version = reader.read_i32_le()?;

    let format = detect_wire_format(reader)?;
    if format.is_segwit() {
        // Marker and flag were only peeked
        reader.read_slice(2)?;
    }
    if verbose {
        trace!("tx version {version}, wire format {format:?}");
    }

    let input_count = read_bounded_length(
        reader,
        "input count",
        limits.max_message_size / MIN_INPUT_SIZE,
        limits.reject_non_canonical_varints,
    )?;
    // Never reserve more than the remaining bytes could possibly hold
    let mut inputs = Vec::with_capacity(input_count.min(reader.remaining() / MIN_INPUT_SIZE));
    for _ in 0..input_count {
        inputs.push(read_input(reader, limits)?);
    }

    let output_count = read_bounded_length(
        reader,
        "output count",
        limits.max_message_size / MIN_OUTPUT_SIZE,
        limits.reject_non_canonical_varints,
    )?;
    let mut outputs = Vec::with_capacity(output_count.min(reader.remaining() / MIN_OUTPUT_SIZE));
    for _ in 0..output_count {
        outputs.push(read_output(reader, limits)?);
    }
    if verbose {
        trace!(
            "tx read {} inputs, {} outputs, offset {}",
            inputs.len(),
            outputs.len(),
            reader.position()
        );
    }

    let mut witnesses = Vec::new();
    if format.is_segwit() {
        witnesses.reserve(inputs.len());
        for _ in 0..inputs.len() {
            witnesses.push(read_witness(reader, limits)?);
        }
        if verbose {
            trace!("tx read {} witness stacks", witnesses.len());
        }
    }

    let lock_time = reader.read_u32_le()?;

    let flag = match format {
        WireFormat::Legacy => 0,
        WireFormat::Segwit { flag } => flag,
    };

    Ok(Transaction {
        version,
        flag,
        inputs,
        outputs,
        witnesses,
        lock_time,
    })
}

/// Deserialize a transaction from the start of `data`
///
/// Bytes after the lock time are left unread; see
/// [`deserialize_transaction_prefix`] to learn how many were consumed.
///
/// # Examples
///
/// ```
/// use msgtx_codec::serialization::deserialize_transaction;
///
/// // version 1, no inputs, no outputs, lock time 0
/// let tx = deserialize_transaction(&[1, 0, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap();
/// assert_eq!(tx.version, 1);
/// assert!(tx.inputs.is_empty());
/// ```
pub fn deserialize_transaction(data: &[u8]) -> Result<Transaction> {
    deserialize_transaction_with_config(data, &get_codec_config())
}

pub fn deserialize_transaction_with_config(
    data: &[u8],
    config: &CodecConfig,
) -> Result<Transaction> {
    deserialize_transaction_prefix_with_config(data, config).map(|(tx, _)| tx)
}

/// Deserialize a transaction and report the number of bytes it occupied
pub fn deserialize_transaction_prefix(data: &[u8]) -> Result<(Transaction, usize)> {
    deserialize_transaction_prefix_with_config(data, &get_codec_config())
}

pub fn deserialize_transaction_prefix_with_config(
    data: &[u8],
    config: &CodecConfig,
) -> Result<(Transaction, usize)> {
    let mut reader = WireReader::new(data);
    let tx = read_transaction(&mut reader, config)?;
    Ok((tx, reader.position()))
}

/// Deserialize a transaction that must span the whole buffer
pub fn deserialize_transaction_exact(data: &[u8]) -> Result<Transaction> {
    deserialize_transaction_exact_with_config(data, &get_codec_config())
}

pub fn deserialize_transaction_exact_with_config(
    data: &[u8],
    config: &CodecConfig,
) -> Result<Transaction> {
    let (tx, consumed) = deserialize_transaction_prefix_with_config(data, config)?;
    if consumed != data.len() {
        let count = data.len() - consumed;
        if config.debug.log_rejections {
            debug!("rejected tx payload: {count} trailing bytes");
        }
        return Err(CodecError::TrailingBytes { count });
    }
    Ok(tx)
}

/// Deserialize a transaction from a reader holding exactly one payload
///
/// At most `max_message_size + 1` bytes are buffered; a longer payload fails
/// with `CodecError::MalformedLength`.
pub fn deserialize_transaction_from_reader<R: Read>(reader: R) -> Result<Transaction> {
    deserialize_transaction_from_reader_with_config(reader, &get_codec_config())
}

pub fn deserialize_transaction_from_reader_with_config<R: Read>(
    reader: R,
    config: &CodecConfig,
) -> Result<Transaction> {
    let max = config.limits.max_message_size;
    let mut payload = Vec::new();
    reader
        .take((max as u64).saturating_add(1))
        .read_to_end(&mut payload)?;
    if payload.len() > max {
        return Err(CodecError::MalformedLength {
            field: "message size",
            declared: payload.len() as u64,
            max: max as u64,
        });
    }
    deserialize_transaction_with_config(&payload, config)
}

/// Check the invariants encoding relies on and pick the wire format
fn check_encodable(tx: &Transaction) -> Result<WireFormat> {
    let format = tx.wire_format();
    match format {
        WireFormat::Segwit { .. } => {
            if tx.witnesses.len() != tx.inputs.len() {
                return Err(CodecError::WitnessCountMismatch {
                    inputs: tx.inputs.len(),
                    witnesses: tx.witnesses.len(),
                });
            }
        }
        WireFormat::Legacy => {
            // `00 nn` after the version would be read back as marker + flag
            if tx.inputs.is_empty() && !tx.outputs.is_empty() {
                return Err(CodecError::AmbiguousEncoding {
                    outputs: tx.outputs.len(),
                });
            }
        }
    }
    Ok(format)
}

fn encode_into(buf: &mut Vec<u8>, tx: &Transaction, format: WireFormat) {
    buf.extend_from_slice(&tx.version.to_le_bytes());

    if let WireFormat::Segwit { flag } = format {
        buf.push(SEGWIT_MARKER);
        buf.push(flag);
    }

    push_varint(buf, tx.inputs.len() as u64);
    for input in &tx.inputs {
        write_input(buf, input);
    }

    push_varint(buf, tx.outputs.len() as u64);
    for output in &tx.outputs {
        write_output(buf, output);
    }

    if format.is_segwit() {
        for witness in &tx.witnesses {
            write_witness(buf, witness);
        }
    }

    buf.extend_from_slice(&tx.lock_time.to_le_bytes());
}

fn encoded_size(tx: &Transaction, format: WireFormat) -> usize {
    let mut size = 4 // version
        + varint_size(tx.inputs.len() as u64)
        + tx.inputs.iter().map(input_size).sum::<usize>()
        + varint_size(tx.outputs.len() as u64)
        + tx.outputs.iter().map(output_size).sum::<usize>()
        + 4; // lock time
    if format.is_segwit() {
        size += 2 + tx.witnesses.iter().map(witness_encoded_size).sum::<usize>();
    }
    size
}

/// Serialize a transaction to Bitcoin wire format
///
/// The segwit form is written when the transaction carries a flag or any
/// witness data; otherwise the legacy form. Invariants are checked before any
/// byte is produced, so on error nothing is returned.
pub fn serialize_transaction(tx: &Transaction) -> Result<Vec<u8>> {
    serialize_transaction_with_config(tx, &get_codec_config())
}

pub fn serialize_transaction_with_config(
    tx: &Transaction,
    config: &CodecConfig,
) -> Result<Vec<u8>> {
    let format = match check_encodable(tx) {
        Ok(format) => format,
        Err(err) => {
            if config.debug.log_rejections {
                debug!("refusing to encode tx: {err}");
            }
            return Err(err);
        }
    };

    let expected = encoded_size(tx, format);
    let mut result = Vec::with_capacity(expected);
    encode_into(&mut result, tx, format);

    debug_assert_eq!(
        result.len(),
        expected,
        "Encoded size must match the precomputed size"
    );
    if config.debug.enable_verbose_logging {
        trace!("encoded tx as {format:?}, {} bytes", result.len());
    }

    Ok(result)
}

/// Serialize a transaction into an `io::Write` sink, returning the bytes written
pub fn serialize_transaction_to_writer<W: Write>(tx: &Transaction, writer: &mut W) -> Result<usize> {
    serialize_transaction_to_writer_with_config(tx, writer, &get_codec_config())
}

pub fn serialize_transaction_to_writer_with_config<W: Write>(
    tx: &Transaction,
    writer: &mut W,
    config: &CodecConfig,
) -> Result<usize> {
    let bytes = serialize_transaction_with_config(tx, config)?;
    writer.write_all(&bytes)?;
    Ok(bytes.len())
}

/// Serialize without marker, flag or witnesses (the form hashed for the txid)
pub fn serialize_transaction_stripped(tx: &Transaction) -> Vec<u8> {
    let mut result = Vec::with_capacity(encoded_size(tx, WireFormat::Legacy));
    encode_into(&mut result, tx, WireFormat::Legacy);
    result
}

/// Size of the full serialization
pub fn serialized_size(tx: &Transaction) -> usize {
    encoded_size(tx, tx.wire_format())
}

/// Size of the serialization without witness data
pub fn stripped_size(tx: &Transaction) -> usize {
    encoded_size(tx, WireFormat::Legacy)
}

/// Transaction weight (BIP141): stripped size * 3 + total size
pub fn transaction_weight(tx: &Transaction) -> usize {
    stripped_size(tx) * (WITNESS_SCALE_FACTOR - 1) + serialized_size(tx)
}

impl Transaction {
    /// Decode a transaction from the start of `data`
    pub fn unmarshal_binary(data: &[u8]) -> Result<Self> {
        deserialize_transaction(data)
    }

    /// Encode this transaction to wire format
    pub fn marshal_binary(&self) -> Result<Vec<u8>> {
        serialize_transaction(self)
    }
}
