#![no_main]
use libfuzzer_sys::fuzz_target;
use wordcode::{Bitstring, BitstreamDecoder, DictionaryIndex, FrequencyTable, SentenceCodec};

fuzz_target!(|data: (Vec<u16>, Vec<u8>)| {
    let (raw_counts, picks) = data;
    if raw_counts.is_empty() {
        return;
    }

    let words: Vec<(String, u64)> = raw_counts
        .iter()
        .enumerate()
        .map(|(i, &c)| (format!("w{i}"), u64::from(c)))
        .collect();
    let Ok(table) = FrequencyTable::build(words) else {
        return;
    };

    // Arbitrary bits must decode or fail cleanly.
    let bits: Bitstring = picks
        .iter()
        .flat_map(|&b| (0..8).map(move |s| (b >> s) & 1 == 1))
        .collect();
    let _ = BitstreamDecoder::new(&table).decode(&bits);

    // Any sentence over the vocabulary must survive a round trip.
    let live: Vec<&str> = table
        .entries()
        .iter()
        .map(|e| e.word.as_str())
        .filter(|w| *w != wordcode::EOF_MARKER)
        .collect();
    let sentence: Vec<&str> = picks
        .iter()
        .map(|&p| live[p as usize % live.len()])
        .collect();

    let dictionary =
        DictionaryIndex::with_group_bits((0..256u32).map(|i| format!("d{i}")), 8).unwrap();
    let codec = SentenceCodec::new(&table, &dictionary).unwrap();
    let encoded = codec.encode(&sentence).unwrap();
    assert_eq!(codec.decode(&encoded).unwrap(), sentence);
});
