//! Wire format constants for the `tx` message payload

/// Largest value encoded in a single VarInt byte.
pub const VARINT_SINGLE_BYTE_MAX: u64 = 0xfc;

/// VarInt marker: 2-byte little-endian value follows
pub const VARINT_MARKER_U16: u8 = 0xfd;

/// VarInt marker: 4-byte little-endian value follows
pub const VARINT_MARKER_U32: u8 = 0xfe;

/// VarInt marker: 8-byte little-endian value follows
pub const VARINT_MARKER_U64: u8 = 0xff;

/// Segwit marker byte, sits where a legacy input count would be
pub const SEGWIT_MARKER: u8 = 0x00;

/// Flag byte written when encoding a segwit transaction (BIP144)
pub const SEGWIT_FLAG: u8 = 0x01;

/// Transaction hash length in bytes
pub const HASH_SIZE: usize = 32;

/// OutPoint: 32-byte hash + 4-byte index
pub const OUTPOINT_SIZE: usize = HASH_SIZE + 4;

/// Smallest possible encoded input: outpoint + empty script varint + sequence
pub const MIN_INPUT_SIZE: usize = OUTPOINT_SIZE + 1 + 4;

/// Smallest possible encoded output: value + empty script varint
pub const MIN_OUTPUT_SIZE: usize = 8 + 1;

/// Smallest possible encoded witness item: empty length varint
pub const MIN_WITNESS_ITEM_SIZE: usize = 1;

/// Maximum P2P protocol message payload (Bitcoin Core: MAX_PROTOCOL_MESSAGE_LENGTH)
pub const MAX_PROTOCOL_MESSAGE_LENGTH: usize = 4_000_000;

/// Witness scale factor used in weight calculation (BIP141)
pub const WITNESS_SCALE_FACTOR: usize = 4;
