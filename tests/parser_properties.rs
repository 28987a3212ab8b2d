//! Property tests for corpus segmentation and querying.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use proptest::prelude::*;
use std::collections::HashSet;

use versefinder::corpus::{chapter_id_of, parse, Corpus, ParseOptions};

const BOOKS: &[&str] = &["1 Nephi", "2 Nephi", "Alma", "Mosiah", "Ether", "Moroni"];

fn body_line() -> impl Strategy<Value = String> {
    prop::collection::vec("[A-Za-z]{1,9}[,;.']?", 1..12).prop_map(|words| words.join(" "))
}

fn paragraph() -> impl Strategy<Value = String> {
    prop_oneof![
        6 => (0..BOOKS.len(), 1u32..30, 1u32..60, prop::collection::vec(body_line(), 1..4))
            .prop_map(|(book, chapter, verse, lines)| {
                format!("{} {chapter}:{verse}\n{}", BOOKS[book], lines.join("\n"))
            }),
        1 => (1u32..30).prop_map(|n| format!("Chapter {n}")),
        1 => (0..BOOKS.len(), 1u32..30).prop_map(|(book, chapter)| {
            format!("{} {chapter}:1\n{} {chapter}", BOOKS[book], BOOKS[book].to_uppercase())
        }),
        2 => prop::collection::vec(body_line(), 1..3).prop_map(|lines| lines.join("\n")),
    ]
}

fn corpus_text() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(paragraph(), 0..40),
        prop::sample::select(vec!["\n\n", "\n\n\n", "\n  \n", "\r\n\r\n"]),
    )
        .prop_map(|(paragraphs, separator)| paragraphs.join(separator))
}

fn parse_body(text: &str) -> Corpus {
    parse(text, &ParseOptions::with_front_matter_lines(0))
}

proptest! {
    #[test]
    fn chapter_id_derived_from_reference(text in corpus_text()) {
        let corpus = parse_body(&text);
        for verse in &corpus.verses {
            prop_assert!(!verse.reference.is_empty());
            prop_assert_eq!(verse.chapter_id.as_str(), chapter_id_of(&verse.reference));
            prop_assert!(!verse.text.contains('\n'));
        }
    }

    #[test]
    fn chapters_follow_first_occurrence(text in corpus_text()) {
        let corpus = parse_body(&text);
        let mut seen = HashSet::new();
        let expected: Vec<&str> = corpus
            .verses
            .iter()
            .map(|v| v.chapter_id.as_str())
            .filter(|id| seen.insert(*id))
            .collect();
        let actual: Vec<&str> = corpus.chapters.iter().map(String::as_str).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn words_sorted_lowercase_and_unique(text in corpus_text()) {
        let corpus = parse_body(&text);
        prop_assert!(corpus.words.windows(2).all(|w| w[0] < w[1]));
        for word in &corpus.words {
            prop_assert!(word.len() >= 3);
            prop_assert!(word.bytes().all(|b| b.is_ascii_lowercase()));
        }
    }

    #[test]
    fn sequence_ids_increase(text in corpus_text()) {
        let corpus = parse_body(&text);
        prop_assert!(corpus.verses.windows(2).all(|w| w[0].sequence_id < w[1].sequence_id));
    }

    #[test]
    fn noise_paragraphs_never_become_verses(text in corpus_text()) {
        let corpus = parse_body(&text);
        for verse in &corpus.verses {
            let lower = verse.text.to_lowercase();
            let bare_heading = lower
                .strip_prefix("chapter ")
                .is_some_and(|rest| rest.trim().parse::<u32>().is_ok());
            prop_assert!(!bare_heading);
            prop_assert_ne!(
                verse.text.trim().to_lowercase(),
                chapter_id_of(&verse.reference).to_lowercase()
            );
        }
    }

    #[test]
    fn suggestions_are_bounded_prefix_matches(text in corpus_text(), prefix in "[a-zA-Z]{0,3}") {
        let corpus = parse_body(&text);
        let suggestions = corpus.index().suggest(&prefix);
        let lower = prefix.to_lowercase();
        if prefix.len() < 2 {
            prop_assert!(suggestions.is_empty());
        }
        prop_assert!(suggestions.len() <= 15);
        prop_assert!(suggestions.iter().all(|w| w.starts_with(&lower)));
        prop_assert!(suggestions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn search_results_match_in_order(text in corpus_text(), query in "[a-zA-Z]{1,3}") {
        let corpus = parse_body(&text);
        let results = corpus.index().search(&query).unwrap();
        let needle = query.to_lowercase();
        prop_assert!(results.len() <= 50);
        prop_assert!(results.verses().iter().all(|v| v.text.to_lowercase().contains(&needle)));
        prop_assert!(results.verses().windows(2).all(|w| w[0].sequence_id < w[1].sequence_id));

        let total = corpus.verses.iter().filter(|v| v.text.to_lowercase().contains(&needle)).count();
        prop_assert_eq!(results.len(), total.min(50));
        prop_assert_eq!(results.is_capped(), total >= 50);
    }

    #[test]
    fn serialized_corpus_answers_identically(text in corpus_text(), query in "[a-z]{2,3}") {
        let corpus = parse_body(&text);
        let json = serde_json::to_string(&corpus).unwrap();
        let restored: Corpus = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(corpus.index().suggest(&query), restored.index().suggest(&query));
        prop_assert_eq!(corpus.index().search(&query), restored.index().search(&query));
    }
}
