#![no_main]
use libfuzzer_sys::fuzz_target;
use msgtx_codec::config::CodecConfig;
use msgtx_codec::serialization::{
    deserialize_transaction_prefix_with_config, serialize_transaction, serialized_size,
};

fuzz_target!(|data: &[u8]| {
    let config = CodecConfig::default();

    let Ok((tx, consumed)) = deserialize_transaction_prefix_with_config(data, &config) else {
        return;
    };

    let serialized = serialize_transaction(&tx).expect("Decoded transaction should encode");

    // Strict decoding only accepts canonical encodings, so the bytes must match exactly
    assert_eq!(
        serialized.as_slice(),
        &data[..consumed],
        "Serialization must reproduce the consumed bytes"
    );
    assert_eq!(serialized.len(), serialized_size(&tx));

    let (roundtrip, _) = deserialize_transaction_prefix_with_config(&serialized, &config)
        .expect("Serialized transaction should deserialize");
    assert_eq!(roundtrip, tx);

    if tx.wire_format().is_segwit() {
        assert_eq!(tx.witnesses.len(), tx.inputs.len());
    } else {
        assert!(tx.witnesses.is_empty());
    }
});
