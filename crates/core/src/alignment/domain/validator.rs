use serde_json::Value;

/// Check whether an arbitrary JSON mapping conforms to the alignment-record
/// schema.
///
/// Required: a `words` array whose elements each carry `text`, `start`, and
/// `end`, with numeric `start`/`end`. Optional: a `phonemes` field; only when
/// it is an array must each element carry `symbol`/`start`/`end` with numeric
/// times. Pure structural check, no diagnostics.
pub fn is_valid_alignment(data: &Value) -> bool {
    let Some(map) = data.as_object() else {
        return false;
    };

    let Some(words) = map.get("words").and_then(Value::as_array) else {
        return false;
    };

    for word in words {
        if !has_timed_entry(word, "text") {
            return false;
        }
    }

    if let Some(phonemes) = map.get("phonemes").and_then(Value::as_array) {
        for phoneme in phonemes {
            if !has_timed_entry(phoneme, "symbol") {
                return false;
            }
        }
    }

    true
}

/// An object with the given label key plus numeric `start` and `end`.
/// Only presence is checked for the label, matching the export schema.
fn has_timed_entry(value: &Value, label_key: &str) -> bool {
    let Some(entry) = value.as_object() else {
        return false;
    };
    entry.contains_key(label_key)
        && entry.get("start").is_some_and(Value::is_number)
        && entry.get("end").is_some_and(Value::is_number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_words_list_is_valid() {
        assert!(is_valid_alignment(&json!({"words": []})));
    }

    #[test]
    fn test_complete_word_is_valid() {
        let data = json!({"words": [{"text": "hello", "start": 0.13, "end": 0.41}]});
        assert!(is_valid_alignment(&data));
    }

    #[test]
    fn test_missing_words_field_is_invalid() {
        assert!(!is_valid_alignment(&json!({"transcript": "hello"})));
    }

    #[test]
    fn test_words_not_a_list_is_invalid() {
        assert!(!is_valid_alignment(&json!({"words": "hello"})));
    }

    #[test]
    fn test_non_object_input_is_invalid() {
        assert!(!is_valid_alignment(&json!([1, 2, 3])));
        assert!(!is_valid_alignment(&json!(null)));
    }

    #[test]
    fn test_word_missing_text_is_invalid() {
        let data = json!({"words": [{"start": 0.1, "end": 0.2}]});
        assert!(!is_valid_alignment(&data));
    }

    #[test]
    fn test_word_missing_end_is_invalid() {
        let data = json!({"words": [{"text": "hi", "start": 0.1}]});
        assert!(!is_valid_alignment(&data));
    }

    #[test]
    fn test_word_with_string_start_is_invalid() {
        let data = json!({"words": [{"text": "hi", "start": "0.1", "end": 0.2}]});
        assert!(!is_valid_alignment(&data));
    }

    #[test]
    fn test_word_with_integer_times_is_valid() {
        let data = json!({"words": [{"text": "hi", "start": 0, "end": 1}]});
        assert!(is_valid_alignment(&data));
    }

    #[test]
    fn test_non_object_word_is_invalid() {
        assert!(!is_valid_alignment(&json!({"words": [42]})));
    }

    #[test]
    fn test_valid_phonemes_pass() {
        let data = json!({
            "words": [],
            "phonemes": [{"symbol": "h", "start": 0.13, "end": 0.17}]
        });
        assert!(is_valid_alignment(&data));
    }

    #[test]
    fn test_phoneme_missing_symbol_is_invalid() {
        let data = json!({
            "words": [],
            "phonemes": [{"start": 0.13, "end": 0.17}]
        });
        assert!(!is_valid_alignment(&data));
    }

    #[test]
    fn test_phoneme_with_string_end_is_invalid() {
        let data = json!({
            "words": [],
            "phonemes": [{"symbol": "h", "start": 0.13, "end": "0.17"}]
        });
        assert!(!is_valid_alignment(&data));
    }

    #[test]
    fn test_non_list_phonemes_field_is_skipped() {
        // Matches the schema: the per-element checks only apply when
        // phonemes is actually a sequence.
        let data = json!({"words": [], "phonemes": "none"});
        assert!(is_valid_alignment(&data));
    }

    #[test]
    fn test_extra_top_level_keys_are_ignored() {
        let data = json!({"words": [], "extra": 1, "transcript": "x"});
        assert!(is_valid_alignment(&data));
    }
}
