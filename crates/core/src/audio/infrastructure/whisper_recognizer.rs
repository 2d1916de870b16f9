use std::path::{Path, PathBuf};

use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::audio::domain::audio_segment::AudioSegment;
use crate::audio::domain::speech_recognizer::SpeechRecognizer;
use crate::audio::domain::transcription::{TimedWord, Transcription, TranscriptSegment};

/// Speech recognizer using whisper.cpp via whisper-rs.
///
/// Produces per-segment text plus word-level timestamps. whisper.cpp reports
/// token-level timestamps; decoder tokens are grouped into words on
/// leading-whitespace boundaries, so a word keeps the model's raw spelling
/// including any leading space or trailing punctuation.
#[derive(Debug)]
pub struct WhisperRecognizer {
    model_path: PathBuf,
}

impl WhisperRecognizer {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if !model_path.exists() {
            return Err(format!("Whisper model not found at: {}", model_path.display()).into());
        }
        Ok(Self {
            model_path: model_path.to_path_buf(),
        })
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl SpeechRecognizer for WhisperRecognizer {
    fn transcribe(
        &self,
        audio: &AudioSegment,
    ) -> Result<Transcription, Box<dyn std::error::Error>> {
        let ctx = WhisperContext::new_with_params(
            self.model_path.to_str().ok_or("Invalid model path")?,
            WhisperContextParameters::default(),
        )
        .map_err(|e| format!("Failed to load Whisper model: {e}"))?;

        let mut state = ctx
            .create_state()
            .map_err(|e| format!("Failed to create Whisper state: {e}"))?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 0 });
        params.set_language(Some("en"));
        params.set_translate(false);
        params.set_token_timestamps(true);
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_n_threads(num_cpus().min(4) as i32);

        state
            .full(params, audio.samples())
            .map_err(|e| format!("Whisper inference failed: {e}"))?;

        let mut segments = Vec::new();
        let num_segments = state.full_n_segments();

        for seg_idx in 0..num_segments {
            let segment = match state.get_segment(seg_idx) {
                Some(s) => s,
                None => continue,
            };

            let mut grouper = WordGrouper::new();
            let mut seg_text = String::new();

            let n_tokens = segment.n_tokens();
            for tok_idx in 0..n_tokens {
                let token = match segment.get_token(tok_idx) {
                    Some(t) => t,
                    None => continue,
                };

                let text = match token.to_str() {
                    Ok(t) => t,
                    Err(_) => continue,
                };

                // Skip special tokens (like [_BEG_], [_SOT_], <|endoftext|>)
                let trimmed = text.trim();
                if trimmed.is_empty() || trimmed.starts_with('[') || trimmed.starts_with('<') {
                    continue;
                }

                let token_data = token.token_data();

                // Token timestamps are in centiseconds (10ms units)
                let start = token_data.t0 as f64 / 100.0;
                let end = token_data.t1 as f64 / 100.0;

                // Skip tokens with invalid timestamps
                if end <= start {
                    continue;
                }

                seg_text.push_str(text);
                grouper.push(text, start, end);
            }

            let words = grouper.finish();
            if words.is_empty() {
                continue;
            }

            let seg_start = words.first().map(|w| w.start).unwrap_or(0.0);
            let seg_end = words.last().map(|w| w.end).unwrap_or(seg_start);
            segments.push(TranscriptSegment {
                text: seg_text.trim().to_string(),
                start: seg_start,
                end: seg_end,
                words,
            });
        }

        let text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();

        Ok(Transcription {
            text,
            segments,
            language: Some("en".to_string()),
        })
    }
}

/// Accumulates decoder tokens into timed words. A token whose text begins
/// with whitespace starts a new word; any other token extends the current one.
struct WordGrouper {
    words: Vec<TimedWord>,
    current: Option<TimedWord>,
}

impl WordGrouper {
    fn new() -> Self {
        Self {
            words: Vec::new(),
            current: None,
        }
    }

    fn push(&mut self, token_text: &str, start: f64, end: f64) {
        let starts_word = token_text.starts_with(char::is_whitespace);
        match self.current {
            Some(ref mut word) if !starts_word => {
                word.word.push_str(token_text);
                word.end = end;
            }
            _ => {
                if let Some(done) = self.current.take() {
                    self.words.push(done);
                }
                self.current = Some(TimedWord {
                    word: token_text.to_string(),
                    start,
                    end,
                });
            }
        }
    }

    fn finish(mut self) -> Vec<TimedWord> {
        if let Some(done) = self.current.take() {
            self.words.push(done);
        }
        self.words
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
