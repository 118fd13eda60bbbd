//! Property tests for match-span building and cyclic navigation.

use proptest::prelude::*;
use s_editor::search::rebuild;
use s_editor::{MatchIndex, MatchSpan, SearchQuery};

/// The text of `span` in `content`, sliced by chars.
fn slice_chars(content: &str, span: MatchSpan) -> String {
    content.chars().skip(span.start).take(span.len).collect()
}

fn assert_ascending(spans: &[MatchSpan]) -> Result<(), TestCaseError> {
    for w in spans.windows(2) {
        prop_assert!(
            w[0].end() <= w[1].start,
            "overlap or disorder: {:?} then {:?}",
            w[0],
            w[1]
        );
    }
    Ok(())
}

const REGEXES: &[&str] = &[r"a+", r"b|ab", r"[aé]{2}", r"\s+", r"a*", r"日.", r"(?m)^a"];

proptest! {
    #[test]
    fn literal_spans_slice_back_to_pattern(
        content in "[ab é日\n]{0,60}",
        pattern in "[ab]{1,3}",
    ) {
        let spans = rebuild(&content, &SearchQuery::literal(pattern.clone())).unwrap();
        for span in &spans {
            prop_assert_eq!(span.len, pattern.chars().count());
            prop_assert_eq!(slice_chars(&content, *span), pattern.clone());
        }
    }

    #[test]
    fn literal_count_matches_std(
        content in "[ab]{0,60}",
        pattern in "[ab]{1,3}",
    ) {
        let spans = rebuild(&content, &SearchQuery::literal(pattern.clone())).unwrap();
        prop_assert_eq!(spans.len(), content.matches(pattern.as_str()).count());
    }

    #[test]
    fn literal_spans_ascend(
        content in "[ab é]{0,60}",
        pattern in "[ab é]{1,3}",
    ) {
        let spans = rebuild(&content, &SearchQuery::literal(pattern)).unwrap();
        assert_ascending(&spans)?;
    }

    #[test]
    fn regex_spans_ascend_and_are_non_empty(
        content in "[ab é日\n]{0,60}",
        which in 0..REGEXES.len(),
    ) {
        let spans = rebuild(&content, &SearchQuery::regex(REGEXES[which])).unwrap();
        assert_ascending(&spans)?;
        let total = content.chars().count();
        for span in &spans {
            prop_assert!(span.len > 0);
            prop_assert!(span.end() <= total);
        }
    }

    #[test]
    fn next_len_times_is_identity(
        content in "[ab]{1,60}",
        steps in 0usize..10,
    ) {
        let spans = rebuild(&content, &SearchQuery::literal("a")).unwrap();
        let mut index = MatchIndex::from_spans(spans);
        for _ in 0..steps {
            index.select_next();
        }
        let start = index.cursor();
        for _ in 0..index.len() {
            index.select_next();
        }
        prop_assert_eq!(index.cursor(), start);
    }

    #[test]
    fn previous_undoes_next(
        content in "[ab]{1,60}",
        steps in 0usize..10,
    ) {
        let spans = rebuild(&content, &SearchQuery::literal("b")).unwrap();
        let mut index = MatchIndex::from_spans(spans);
        for _ in 0..steps {
            index.select_next();
        }
        let before = index.current();
        index.select_next();
        index.select_previous();
        prop_assert_eq!(index.current(), before);
    }
}
