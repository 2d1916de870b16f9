use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A word with its start/end offsets in seconds within the source audio.
///
/// `text` is punctuation-stripped and non-empty by the time a record is
/// built; timestamps are rounded to millisecond precision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

/// A phoneme with timing. Part of the schema but never produced by this
/// pipeline; kept so records from other aligners load and validate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Phoneme {
    pub symbol: String,
    pub start: f64,
    pub end: f64,
}

/// The alignment record this tool produces: words always, everything else
/// optional. Built once per run and never mutated after export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlignmentRecord {
    pub words: Vec<Word>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phonemes: Option<Vec<Phoneme>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    /// Raw segment structures from the transcription step, passed through
    /// for debugging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whisper_segments: Option<Value>,
}

impl AlignmentRecord {
    pub fn new(words: Vec<Word>) -> Self {
        Self {
            words,
            phonemes: None,
            transcript: None,
            whisper_segments: None,
        }
    }

    pub fn with_transcript(mut self, transcript: impl Into<String>) -> Self {
        self.transcript = Some(transcript.into());
        self
    }

    pub fn with_whisper_segments(mut self, segments: Value) -> Self {
        self.whisper_segments = Some(segments);
        self
    }

    /// The mapping form used by the validator, exporter, and timing checker.
    pub fn to_value(&self) -> Value {
        // Serialization of these plain fields cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, start: f64, end: f64) -> Word {
        Word {
            text: text.to_string(),
            start,
            end,
        }
    }

    #[test]
    fn test_to_value_always_has_words() {
        let value = AlignmentRecord::new(vec![]).to_value();
        assert!(value["words"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_to_value_omits_absent_optional_fields() {
        let value = AlignmentRecord::new(vec![word("hi", 0.0, 0.5)]).to_value();
        let map = value.as_object().unwrap();
        assert!(!map.contains_key("transcript"));
        assert!(!map.contains_key("phonemes"));
        assert!(!map.contains_key("whisper_segments"));
    }

    #[test]
    fn test_to_value_includes_transcript_when_set() {
        let value = AlignmentRecord::new(vec![])
            .with_transcript("hello world")
            .to_value();
        assert_eq!(value["transcript"], "hello world");
    }

    #[test]
    fn test_word_round_trips_through_json() {
        let original = word("hello", 0.123, 0.457);
        let json = serde_json::to_string(&original).unwrap();
        let back: Word = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }
}
