#![allow(missing_docs)]

use proptest::prelude::*;
use wordstream::{
    batching::{batchify, get_window},
    corpus::CorpusTokenizer,
    vocab::WordVocabBuilder,
};

fn word() -> impl Strategy<Value = String> {
    "[a-e]{1,3}"
}

fn corpus_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::collection::vec(word(), 0..6), 0..8).prop_map(|lines| {
        lines
            .into_iter()
            .map(|words| words.join(" "))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

proptest! {
    #[test]
    fn vocab_is_deterministic(text in corpus_text()) {
        let tokenizer = CorpusTokenizer::default();

        let mut a: WordVocabBuilder<u32> = WordVocabBuilder::new();
        let mut b: WordVocabBuilder<u32> = WordVocabBuilder::new();
        let seq_a = tokenizer.tokenize_str(&mut a, &text).unwrap();
        let seq_b = tokenizer.tokenize_str(&mut b, &text).unwrap();

        prop_assert_eq!(seq_a, seq_b);
        prop_assert_eq!(a.freeze(), b.freeze());
    }

    #[test]
    fn add_word_is_idempotent(words in prop::collection::vec(word(), 1..40)) {
        let mut builder: WordVocabBuilder<u32> = WordVocabBuilder::new();
        for w in &words {
            let first = builder.add_word(w).unwrap();
            let size = builder.size();
            let second = builder.add_word(w).unwrap();
            prop_assert_eq!(first, second);
            prop_assert_eq!(builder.size(), size);
        }
    }

    #[test]
    fn ids_are_first_seen_order(words in prop::collection::vec(word(), 1..40)) {
        let mut builder: WordVocabBuilder<u32> = WordVocabBuilder::new();
        let mut seen: Vec<&str> = Vec::new();
        for w in &words {
            let id = builder.add_word(w).unwrap() as usize;
            match seen.iter().position(|s| s == w) {
                Some(idx) => prop_assert_eq!(id, idx),
                None => {
                    prop_assert_eq!(id, seen.len());
                    seen.push(w);
                }
            }
        }
    }

    #[test]
    fn batchify_round_trip(
        seq in prop::collection::vec(0u32..1000, 1..200),
        batch_size in 1usize..12,
    ) {
        let m = batchify(&seq, batch_size).unwrap();
        let usable = (seq.len() / batch_size) * batch_size;

        prop_assert_eq!(m.len(), usable);
        prop_assert_eq!(m.rows(), seq.len() / batch_size);
        prop_assert_eq!(m.to_stream_order(), seq[..usable].to_vec());
    }

    #[test]
    fn window_target_is_shifted_data(
        seq in prop::collection::vec(0u32..1000, 2..200),
        batch_size in 1usize..6,
        max_window in 1usize..30,
        start_seed in any::<usize>(),
    ) {
        let m = batchify(&seq, batch_size).unwrap();
        prop_assume!(m.rows() >= 2);

        let start = start_seed % (m.rows() - 1);
        let w = get_window(&m, start, max_window).unwrap();

        prop_assert_eq!(w.len(), max_window.min(m.rows() - 1 - start));
        prop_assert_eq!(w.data(), m.rows_slice(start..start + w.len()));
        prop_assert_eq!(w.target(), m.rows_slice(start + 1..start + w.len() + 1));

        // target[i] == data[i + 1 row], and the last row comes from `start + len`.
        let b = batch_size;
        prop_assert_eq!(&w.target()[..(w.len() - 1) * b], &w.data()[b..]);
        prop_assert_eq!(&w.target()[(w.len() - 1) * b..], m.row(start + w.len()));
    }

    #[test]
    fn windows_cover_all_targets(
        seq in prop::collection::vec(0u32..1000, 2..200),
        max_window in 1usize..30,
    ) {
        let m = batchify(&seq, 1).unwrap();
        let targets: Vec<u32> = m
            .windows(max_window)
            .unwrap()
            .flat_map(|w| w.target().to_vec())
            .collect();
        prop_assert_eq!(targets, seq[1..].to_vec());
    }
}

#[test]
fn scenario_two_line_vocab() {
    let tokenizer = CorpusTokenizer::default();
    let mut builder: WordVocabBuilder<u32> = WordVocabBuilder::new();
    let seq = tokenizer.tokenize_str(&mut builder, "a b\nb a").unwrap();

    assert_eq!(seq.as_slice(), &[0, 1, 2, 1, 0, 2]);

    let vocab = builder.freeze();
    assert_eq!(vocab.words().collect::<Vec<_>>(), vec!["a", "b", "<eos>"]);
}

#[test]
fn scenario_batchify_seven_by_two() {
    let m = batchify(&[0u32, 1, 2, 3, 4, 5, 6], 2).unwrap();
    assert_eq!(m.rows(), 3);
    assert_eq!(m.as_slice(), &[0, 3, 1, 4, 2, 5]);
}

#[test]
fn scenario_short_last_window() {
    let m = batchify(&[10u32, 11, 12, 13, 14], 1).unwrap();
    let w = get_window(&m, 3, 25).unwrap();
    assert_eq!(w.len(), 1);
    assert_eq!(w.data(), &[13]);
    assert_eq!(w.target(), &[14]);
}
