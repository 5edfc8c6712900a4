use criterion::{black_box, criterion_group, criterion_main, Criterion};
use msgtx_codec::config::CodecConfig;
use msgtx_codec::serialization::{deserialize_transaction_with_config, serialize_transaction};
use msgtx_codec::types::*;

const SEGWIT_TX_HEX: &str = "0100000000010145b87f940bc57475403a3928ecf4cb3b86d2ba192039d4d703126edad14487ca0100000000ffffffff0200093d000000000017a91469f375f23b3d5d37bd942f3c31d7ae5a0cb61f5e87c8db030000000000220020701a8d401c84fb13e6baf169d59684e17abd9fa216c8cc5b9fc63d622ff8c58d0400473044022025863cfe71648bc8703f9f0607558cb7e79fcbebadc080ef1f0d7bfdd6ab1afa0220101ffaeb01b70e3360e87d6b3616886e547593e41c8a09d00cf8803601a9cc7901473044022031caba2ba6b079bc0d995e04f3651f977b5fc22dacceab1046a311fa2fb83898022030f5a852b425bdeb156be3a0a3de5bbc764302fbc1b7ca77058740cd511d49a9016952210375e00eb72e29da82b89367947f29ef34afb75e8654f6ea368e0acdfd92976b7c2103a1b26313f430c4b15bb1fdce663207659d8cac749a0e53d70eff01874496feff2103c96d495bfdd5ba4145e3e046fee45e84a8a48ad05bd8dbb395c011a32cf9f88053ae00000000";

fn create_wide_transaction(inputs: usize, outputs: usize) -> Transaction {
    Transaction {
        version: 2,
        flag: 1,
        inputs: (0..inputs)
            .map(|i| TransactionInput {
                prevout: OutPoint::new([i as u8; 32], i as u32),
                script_sig: vec![],
                sequence: 0xfffffffd,
            })
            .collect(),
        outputs: (0..outputs)
            .map(|i| TransactionOutput {
                value: 1000 * i as i64,
                script_pubkey: vec![0x51; 34],
            })
            .collect(),
        witnesses: (0..inputs).map(|_| vec![vec![0x30; 72], vec![0x02; 33]]).collect(),
        lock_time: 0,
    }
}

fn benchmark_decode_segwit(c: &mut Criterion) {
    let payload = hex::decode(SEGWIT_TX_HEX).unwrap();
    let config = CodecConfig::default();

    c.bench_function("decode_segwit_multisig", |b| {
        b.iter(|| deserialize_transaction_with_config(black_box(&payload), &config).unwrap())
    });
}

fn benchmark_encode_wide(c: &mut Criterion) {
    let tx = create_wide_transaction(50, 50);

    c.bench_function("encode_segwit_50x50", |b| {
        b.iter(|| serialize_transaction(black_box(&tx)).unwrap())
    });
}

fn benchmark_round_trip_wide(c: &mut Criterion) {
    let tx = create_wide_transaction(50, 50);
    let payload = serialize_transaction(&tx).unwrap();
    let config = CodecConfig::default();

    c.bench_function("round_trip_segwit_50x50", |b| {
        b.iter(|| {
            let decoded = deserialize_transaction_with_config(black_box(&payload), &config).unwrap();
            black_box(serialize_transaction(&decoded).unwrap())
        })
    });
}

criterion_group!(
    benches,
    benchmark_decode_segwit,
    benchmark_encode_wide,
    benchmark_round_trip_wide
);
criterion_main!(benches);
