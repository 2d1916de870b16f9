use super::audio_segment::AudioSegment;
use super::transcription::Transcription;

/// Domain interface for speech-to-text transcription.
///
/// Implementations run inference on audio to produce a transcript with
/// word-level timestamps.
pub trait SpeechRecognizer: Send {
    fn transcribe(
        &self,
        audio: &AudioSegment,
    ) -> Result<Transcription, Box<dyn std::error::Error>>;
}
