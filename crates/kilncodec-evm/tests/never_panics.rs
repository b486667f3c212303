//! Property tests: no decode path panics, whatever the input bytes.

use std::sync::Arc;

use kilncodec_core::{CallDecoder, NoopLogger, RawLog};
use kilncodec_evm::KilnDecoder;
use proptest::prelude::*;

const SELECTORS: [[u8; 4]; 3] = [
    [0xd0, 0xe3, 0x0d, 0xb0],
    [0xb6, 0xb0, 0x6d, 0xec],
    [0x0f, 0xfa, 0xb6, 0xc2],
];

const DEPOSIT_TOPIC: &str = "649bbc62d0e31342afea4e5cd82d4049e7e1ee912fc0889aa790803be39038c5";

fn decoder() -> KilnDecoder {
    KilnDecoder::new(Arc::new(NoopLogger))
}

// Arbitrary bytes behind a known selector, so the ABI decoder is reached.
fn arb_call_data() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 0..512),
        (0usize..3, prop::collection::vec(any::<u8>(), 0..512)).prop_map(|(i, tail)| {
            let mut data = SELECTORS[i].to_vec();
            data.extend(tail);
            data
        }),
    ]
}

fn arb_topics() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop_oneof![
        prop::collection::vec(prop::collection::vec(any::<u8>(), 0..40), 0..4),
        prop::collection::vec(prop::collection::vec(any::<u8>(), 32..=32), 0..3).prop_map(
            |mut rest| {
                rest.insert(0, hex::decode(DEPOSIT_TOPIC).unwrap());
                rest
            }
        ),
    ]
}

proptest! {
    /// Property: call decoders return without panicking on any input
    #[test]
    fn prop_call_decoders_never_panic(data in arb_call_data()) {
        let d = decoder();
        let _ = d.decode_deposit(&data);
        let _ = d.decode_validators_exit(&data);
        let _ = d.decode_batch_withdraw_cl_fee(&data);
        let _ = d.decode_call(&data);
        let _ = d.operation_for(&data);
    }

    /// Property: at most one call operation accepts any given input
    #[test]
    fn prop_call_operations_are_exclusive(data in arb_call_data()) {
        let d = decoder();
        let hits = [
            d.decode_deposit(&data).is_some(),
            d.decode_validators_exit(&data).is_some(),
            d.decode_batch_withdraw_cl_fee(&data).is_some(),
        ];
        prop_assert!(hits.iter().filter(|h| **h).count() <= 1);
    }

    /// Property: the event decoder returns without panicking on any log
    #[test]
    fn prop_event_decoder_never_panics(
        data in prop::collection::vec(any::<u8>(), 0..1024),
        topics in arb_topics(),
    ) {
        let d = decoder();
        let log = RawLog::new(data, topics);
        let _ = d.decode_deposit_event(&log);
        let _ = d.decode_deposit_events(std::slice::from_ref(&log));
    }

    /// Property: any hex-looking string is either decoded or rejected, never a panic
    #[test]
    fn prop_hex_input_never_panics(s in "(0x)?[0-9a-fA-Fxz]{0,80}") {
        let _ = decoder().decode_call_hex(&s);
    }
}
