use crate::audio::domain::transcription::TranscriptSegment;

use super::record::Word;

/// Turns the speech model's raw timed tokens into clean alignment words.
pub struct WordExtractor;

impl WordExtractor {
    /// Walk every segment's words in order, strip punctuation, and round
    /// timestamps to millisecond precision. Words that are nothing but
    /// punctuation are dropped.
    pub fn extract_words(segments: &[TranscriptSegment]) -> Vec<Word> {
        segments
            .iter()
            .flat_map(|segment| segment.words.iter())
            .filter_map(|timed| {
                Self::clean_token(&timed.word).map(|text| Word {
                    text,
                    start: round_ms(timed.start),
                    end: round_ms(timed.end),
                })
            })
            .collect()
    }

    /// Trim a raw token and drop everything except word characters,
    /// apostrophes, and hyphens (inner whitespace survives). Returns None
    /// if nothing is left.
    pub fn clean_token(raw: &str) -> Option<String> {
        let cleaned: String = raw
            .trim()
            .chars()
            .filter(|c| {
                c.is_alphanumeric() || *c == '_' || *c == '\'' || *c == '-' || c.is_whitespace()
            })
            .collect();
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned)
        }
    }
}

/// Round seconds to millisecond precision.
fn round_ms(secs: f64) -> f64 {
    (secs * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::domain::transcription::TimedWord;
    use rstest::rstest;

    fn segment(words: Vec<TimedWord>) -> TranscriptSegment {
        TranscriptSegment {
            text: words.iter().map(|w| w.word.clone()).collect(),
            start: words.first().map(|w| w.start).unwrap_or(0.0),
            end: words.last().map(|w| w.end).unwrap_or(0.0),
            words,
        }
    }

    fn timed(word: &str, start: f64, end: f64) -> TimedWord {
        TimedWord {
            word: word.to_string(),
            start,
            end,
        }
    }

    #[rstest]
    #[case::plain("hello", Some("hello"))]
    #[case::leading_space_and_comma(" Hello,", Some("Hello"))]
    #[case::period("world.", Some("world"))]
    #[case::apostrophe_kept("don't", Some("don't"))]
    #[case::hyphen_kept("well-known", Some("well-known"))]
    #[case::only_punctuation("...", None)]
    #[case::empty("", None)]
    #[case::whitespace_only("   ", None)]
    #[case::unicode("café!", Some("café"))]
    fn test_clean_token(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(WordExtractor::clean_token(raw).as_deref(), expected);
    }

    #[test]
    fn test_extract_strips_and_rounds() {
        let segments = vec![segment(vec![timed(" Hello,", 0.1234, 0.4567)])];
        let words = WordExtractor::extract_words(&segments);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "Hello");
        assert_eq!(words[0].start, 0.123);
        assert_eq!(words[0].end, 0.457);
    }

    #[test]
    fn test_extract_drops_punctuation_only_words() {
        let segments = vec![segment(vec![
            timed(" one", 0.0, 0.3),
            timed(" ...", 0.3, 0.4),
            timed(" two", 0.4, 0.8),
        ])];
        let words = WordExtractor::extract_words(&segments);
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text, "one");
        assert_eq!(words[1].text, "two");
    }

    #[test]
    fn test_extract_preserves_segment_order() {
        let segments = vec![
            segment(vec![timed(" a", 0.0, 0.2)]),
            segment(vec![timed(" b", 0.5, 0.7)]),
        ];
        let words = WordExtractor::extract_words(&segments);
        assert_eq!(words[0].text, "a");
        assert_eq!(words[1].text, "b");
    }

    #[test]
    fn test_extract_empty_segments_give_no_words() {
        assert!(WordExtractor::extract_words(&[]).is_empty());
    }
}
