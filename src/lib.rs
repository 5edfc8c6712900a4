//! # msgtx-codec
//!
//! Wire codec for the Bitcoin P2P `tx` message payload.
//!
//! Converts a payload buffer handed over by the message framing layer into a
//! fully structured [`Transaction`] and back, byte for byte. Both the legacy
//! encoding and the segregated-witness encoding (BIP144) are supported; the
//! format is detected from the two bytes following the version.
//!
//! The codec is synchronous and stateless: every call works on one buffer
//! and one transaction, so independent messages can be decoded concurrently
//! without locking. Peer-supplied lengths are bounded by [`config::WireLimits`]
//! before anything is allocated for them.
//!
//! ## Usage
//!
//! ```rust
//! use msgtx_codec::serialization::{deserialize_transaction, serialize_transaction};
//! use msgtx_codec::types::*;
//!
//! let tx = Transaction {
//!     version: 2,
//!     flag: 0,
//!     inputs: vec![TransactionInput {
//!         prevout: OutPoint::new([0x11; 32], 0),
//!         script_sig: vec![0x51],
//!         sequence: 0xffffffff,
//!     }],
//!     outputs: vec![TransactionOutput {
//!         value: 1000,
//!         script_pubkey: vec![0x51],
//!     }],
//!     witnesses: vec![],
//!     lock_time: 0,
//! };
//! let bytes = serialize_transaction(&tx).unwrap();
//! assert_eq!(deserialize_transaction(&bytes).unwrap(), tx);
//! ```
//!
//! Out of scope: transport, message framing, consensus validation and
//! script execution.

pub mod config;
pub mod constants;
pub mod error;
pub mod serialization;
pub mod transaction_hash;
pub mod types;

pub use config::{get_codec_config, init_codec_config, CodecConfig, DebugConfig, WireLimits};
pub use error::{CodecError, Result};
pub use types::*;
