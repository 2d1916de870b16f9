use serde_json::Value;

use super::alignment_error::AlignmentError;

/// Largest plausible gap or overlap between consecutive words, in seconds.
pub const MAX_WORD_GAP_SECS: f64 = 1.0;

/// Verify that an already-validated alignment record is internally
/// consistent in time.
///
/// Fails fast on the first violation: every word must have `start < end`
/// (error names the word index), and consecutive words must not be more than
/// [`MAX_WORD_GAP_SECS`] apart or overlapped (error names the pair and the
/// measured gap). Phonemes get the `start < end` check only; a record with
/// no `phonemes` field has zero phonemes and passes that part trivially.
///
/// Returns `Ok(true)` when the whole pass is clean.
pub fn verify_timing(data: &Value) -> Result<bool, AlignmentError> {
    let words = data
        .get("words")
        .and_then(Value::as_array)
        .ok_or_else(|| AlignmentError::new("alignment data has no words list"))?;

    let mut prev_end: Option<f64> = None;
    for (i, word) in words.iter().enumerate() {
        let (start, end) = timing_of(word, "word", i)?;
        if start >= end {
            return Err(AlignmentError::new(format!(
                "word {i} has invalid timing: start >= end"
            )));
        }

        if let Some(prev_end) = prev_end {
            let gap = start - prev_end;
            if gap.abs() > MAX_WORD_GAP_SECS {
                return Err(AlignmentError::new(format!(
                    "large gap detected between words {} and {}: {:.3}s",
                    i - 1,
                    i,
                    gap
                )));
            }
        }
        prev_end = Some(end);
    }

    let phonemes = data
        .get("phonemes")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    for (i, phoneme) in phonemes.iter().enumerate() {
        let (start, end) = timing_of(phoneme, "phoneme", i)?;
        if start >= end {
            return Err(AlignmentError::new(format!(
                "phoneme {i} has invalid timing: start >= end"
            )));
        }
    }

    Ok(true)
}

fn timing_of(entry: &Value, kind: &str, index: usize) -> Result<(f64, f64), AlignmentError> {
    let start = entry.get("start").and_then(Value::as_f64);
    let end = entry.get("end").and_then(Value::as_f64);
    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(AlignmentError::new(format!(
            "{kind} {index} has no numeric start/end"
        ))),
    }
}
