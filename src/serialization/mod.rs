//! Bitcoin `tx` message wire format serialization/deserialization
//!
//! Byte-exact codec for both the legacy and the segwit (BIP144) encodings.
//! All integers are little-endian. Decoding works on a borrowed buffer and
//! copies every variable-length field out, so nothing returned borrows from
//! the caller's memory.

pub mod input;
pub mod output;
pub mod reader;
pub mod transaction;
pub mod varint;
pub mod witness;

pub use reader::WireReader;
pub use transaction::{
    deserialize_transaction, deserialize_transaction_exact,
    deserialize_transaction_exact_with_config, deserialize_transaction_from_reader,
    deserialize_transaction_from_reader_with_config,
    deserialize_transaction_prefix, deserialize_transaction_prefix_with_config,
    deserialize_transaction_with_config, detect_wire_format, read_transaction,
    serialize_transaction, serialize_transaction_stripped, serialize_transaction_to_writer,
    serialize_transaction_to_writer_with_config,
    serialize_transaction_with_config, serialized_size, stripped_size, transaction_weight,
};
pub use varint::{decode_varint, encode_varint, read_varint, write_varint};
