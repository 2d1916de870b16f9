use std::path::Path;

use crate::alignment::domain::alignment_writer::AlignmentWriter;
use crate::alignment::domain::record::AlignmentRecord;
use crate::alignment::domain::word_extractor::WordExtractor;
use crate::audio::domain::audio_reader::AudioReader;
use crate::audio::domain::speech_recognizer::SpeechRecognizer;
use crate::shared::constants::WHISPER_SAMPLE_RATE;

/// What one alignment run produced, for CLI reporting.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignmentSummary {
    /// Whitespace-separated words in the plain transcript.
    pub transcript_words: usize,
    /// Timed words that survived cleaning and landed in the output.
    pub aligned_words: usize,
    /// Decoded audio length in seconds.
    pub audio_secs: f64,
}

/// Orchestrates one alignment run: decode audio, transcribe, clean the
/// word list, export the record. Fully synchronous; each step blocks.
pub struct AlignAudioUseCase {
    reader: Box<dyn AudioReader>,
    recognizer: Box<dyn SpeechRecognizer>,
    writer: Box<dyn AlignmentWriter>,
}

impl AlignAudioUseCase {
    pub fn new(
        reader: Box<dyn AudioReader>,
        recognizer: Box<dyn SpeechRecognizer>,
        writer: Box<dyn AlignmentWriter>,
    ) -> Self {
        Self {
            reader,
            recognizer,
            writer,
        }
    }

    pub fn run(
        &self,
        audio_path: &Path,
        output_path: &Path,
    ) -> Result<AlignmentSummary, Box<dyn std::error::Error>> {
        // 1. Decode to the rate the model expects
        let audio = self.reader.read_audio(audio_path, WHISPER_SAMPLE_RATE)?;

        // 2. Transcribe with word-level timing
        let transcription = self.recognizer.transcribe(&audio)?;

        // 3. Clean raw tokens into alignment words
        let words = WordExtractor::extract_words(&transcription.segments);
        let aligned_words = words.len();

        // 4. Build the record; raw segments ride along for debugging
        let record = AlignmentRecord::new(words)
            .with_transcript(transcription.text.clone())
            .with_whisper_segments(serde_json::to_value(&transcription.segments)?);

        // 5. Export
        self.writer.write(&record.to_value(), output_path)?;

        Ok(AlignmentSummary {
            transcript_words: transcription.word_count(),
            aligned_words,
            audio_secs: audio.duration(),
        })
    }
}
