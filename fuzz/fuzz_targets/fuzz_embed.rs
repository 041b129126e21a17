#![no_main]
use libfuzzer_sys::fuzz_target;
use text_dedup::minhash::width::U32;
use text_dedup::minhash::{Embedder, PermutationBank};

/// Fuzz the tokenizer and embedder with arbitrary text.
///
/// The embedder must never panic and must always produce a full-length,
/// in-bounds signature, whatever bytes the corpus throws at it.
fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let embedder: Embedder<U32> = Embedder::new(PermutationBank::deterministic(16), 2);
        let signature = embedder.embed(text);
        assert_eq!(signature.len(), 16);
    }
});
