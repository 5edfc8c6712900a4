//! Transaction identifiers
//!
//! txid = SHA256(SHA256(stripped serialization))
//! wtxid = SHA256(SHA256(full serialization)) (BIP141)
//!
//! Both are returned in internal byte order, the order used inside an
//! OutPoint on the wire. Block explorers display them reversed.

use crate::error::Result;
use crate::serialization::transaction::{serialize_transaction, serialize_transaction_stripped};
use crate::types::{Hash, Transaction};
use sha2::{Digest, Sha256};

/// Double SHA-256
pub fn sha256d(data: &[u8]) -> Hash {
    let first_hash = Sha256::digest(data);
    let second_hash = Sha256::digest(first_hash);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&second_hash);
    hash
}

/// Calculate the transaction id (witness data excluded)
pub fn calculate_txid(tx: &Transaction) -> Hash {
    sha256d(&serialize_transaction_stripped(tx))
}

/// Calculate the witness transaction id
///
/// Equal to the txid for legacy transactions. Fails if the transaction cannot
/// be encoded.
pub fn calculate_wtxid(tx: &Transaction) -> Result<Hash> {
    Ok(sha256d(&serialize_transaction(tx)?))
}

/// Render a hash in display order (reversed hex)
pub fn hash_to_display_hex(hash: &Hash) -> String {
    let mut reversed = *hash;
    reversed.reverse();
    hex::encode(reversed)
}

impl Transaction {
    pub fn txid(&self) -> Hash {
        calculate_txid(self)
    }

    pub fn wtxid(&self) -> Result<Hash> {
        calculate_wtxid(self)
    }

    /// txid as shown by block explorers and RPC
    pub fn txid_hex(&self) -> String {
        hash_to_display_hex(&self.txid())
    }
}
