//! Transaction message types carried by the `tx` payload

use serde::{Deserialize, Serialize};

/// Hash type: 256-bit hash, in wire byte order
pub type Hash = [u8; 32];

/// Byte string type
pub type ByteString = Vec<u8>;

/// Witness stack for one input: ordered items, possibly zero-length
pub type Witness = Vec<ByteString>;

/// OutPoint: reference to a previously created output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    pub hash: Hash,
    pub index: u32,
}

impl OutPoint {
    #[inline]
    pub fn new(hash: Hash, index: u32) -> Self {
        OutPoint { hash, index }
    }
}

/// Transaction Input
///
/// The script length is not stored; it is always taken from `script_sig.len()`
/// when encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub prevout: OutPoint,
    pub script_sig: ByteString,
    pub sequence: u32,
}

/// Transaction Output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    /// Satoshis; sign is not checked by the codec
    pub value: i64,
    pub script_pubkey: ByteString,
}

/// Which of the two sub-encodings a payload uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireFormat {
    /// No marker/flag bytes and no witness section
    Legacy,
    /// Marker `0x00` followed by a non-zero flag byte
    Segwit { flag: u8 },
}

impl WireFormat {
    pub fn is_segwit(self) -> bool {
        matches!(self, WireFormat::Segwit { .. })
    }
}

/// Transaction message (`tx` payload)
///
/// `flag` is `0` for the legacy encoding and the received flag byte otherwise.
/// When segwit-encoded, `witnesses` holds one stack per input in input order;
/// an input without witness data has an empty stack.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Transaction {
    pub version: i32,
    pub flag: u8,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub witnesses: Vec<Witness>,
    pub lock_time: u32,
}

impl Transaction {
    /// True if any input carries at least one witness item
    pub fn has_witness_data(&self) -> bool {
        self.witnesses.iter().any(|w| !w.is_empty())
    }

    /// Encoding this transaction is written in
    ///
    /// A stored flag always selects the segwit form. Without one, the segwit
    /// form is still used when witness data is present, with flag `0x01`.
    pub fn wire_format(&self) -> WireFormat {
        if self.flag != 0 {
            WireFormat::Segwit { flag: self.flag }
        } else if self.has_witness_data() {
            WireFormat::Segwit {
                flag: crate::constants::SEGWIT_FLAG,
            }
        } else {
            WireFormat::Legacy
        }
    }

    pub fn is_segwit(&self) -> bool {
        self.wire_format().is_segwit()
    }
}
