use std::path::Path;

use super::audio_segment::AudioSegment;

/// Domain interface for decoding an audio file.
pub trait AudioReader: Send {
    /// Decode the file to mono PCM at the given sample rate.
    fn read_audio(
        &self,
        path: &Path,
        target_sample_rate: u32,
    ) -> Result<AudioSegment, Box<dyn std::error::Error>>;
}
