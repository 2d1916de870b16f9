use serde::{Deserialize, Serialize};

/// A raw word token from the speech model, before any cleaning.
///
/// `word` is the model's own token text and may carry leading whitespace
/// or punctuation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimedWord {
    pub word: String,
    pub start: f64,
    pub end: f64,
}

impl TimedWord {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// A model-defined chunk of audio/text with zero or more timed words.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    pub start: f64,
    pub end: f64,
    pub words: Vec<TimedWord>,
}

/// Full output of one transcription run.
#[derive(Clone, Debug, PartialEq)]
pub struct Transcription {
    pub text: String,
    pub segments: Vec<TranscriptSegment>,
    pub language: Option<String>,
}

impl Transcription {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_timed_word_duration() {
        let w = TimedWord {
            word: " hello".to_string(),
            start: 1.0,
            end: 1.5,
        };
        assert_relative_eq!(w.duration(), 0.5, epsilon = 0.001);
    }

    #[test]
    fn test_word_count_splits_on_whitespace() {
        let t = Transcription {
            text: "one two  three".to_string(),
            segments: vec![],
            language: None,
        };
        assert_eq!(t.word_count(), 3);
    }

    #[test]
    fn test_segment_serializes_words() {
        let seg = TranscriptSegment {
            text: "hi".to_string(),
            start: 0.0,
            end: 1.0,
            words: vec![TimedWord {
                word: " hi".to_string(),
                start: 0.2,
                end: 0.6,
            }],
        };
        let value = serde_json::to_value(&seg).unwrap();
        assert_eq!(value["words"][0]["word"], " hi");
        assert_eq!(value["start"], 0.0);
    }
}
