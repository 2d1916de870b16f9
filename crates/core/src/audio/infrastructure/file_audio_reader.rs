use std::path::Path;

use hound::WavReader;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::audio::domain::audio_reader::AudioReader;
use crate::audio::domain::audio_segment::AudioSegment;

/// Decodes audio files to mono PCM: WAV via hound, MP3/FLAC/OGG via symphonia.
pub struct FileAudioReader;

impl FileAudioReader {
    pub fn new() -> Self {
        Self
    }

    fn load_wav(&self, path: &Path) -> Result<(Vec<f32>, u32, u16), Box<dyn std::error::Error>> {
        let mut reader =
            WavReader::open(path).map_err(|e| format!("Failed to open WAV: {e}"))?;
        let spec = reader.spec();
        log::info!(
            "Loaded WAV: {} Hz, {} channels, {} bits",
            spec.sample_rate,
            spec.channels,
            spec.bits_per_sample
        );

        let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
            (hound::SampleFormat::Float, 32) => reader
                .samples::<f32>()
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| format!("Failed to read samples: {e}"))?,
            (hound::SampleFormat::Int, 16) => reader
                .samples::<i16>()
                .map(|s| s.map(|sample| sample as f32 / 32768.0))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| format!("Failed to read samples: {e}"))?,
            (hound::SampleFormat::Int, 32) => reader
                .samples::<i32>()
                .map(|s| s.map(|sample| sample as f32 / 2147483648.0))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| format!("Failed to read samples: {e}"))?,
            (_, bits) => return Err(format!("Unsupported WAV bit depth: {bits}").into()),
        };

        Ok((samples, spec.sample_rate, spec.channels))
    }

    fn load_compressed(
        &self,
        path: &Path,
    ) -> Result<(Vec<f32>, u32, u16), Box<dyn std::error::Error>> {
        let file = std::fs::File::open(path).map_err(|e| format!("Failed to open file: {e}"))?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| format!("Failed to probe audio format: {e}"))?;

        let mut format = probed.format;
        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or("No audio tracks found")?;

        let track_id = track.id;
        let sample_rate = track
            .codec_params
            .sample_rate
            .ok_or("Could not determine sample rate")?;
        let channels = track
            .codec_params
            .channels
            .map(|c| c.count())
            .unwrap_or(1) as u16;
        let codec_params = track.codec_params.clone();

        log::info!("Loaded audio: {sample_rate} Hz, {channels} channels");

        let mut decoder = symphonia::default::get_codecs()
            .make(&codec_params, &DecoderOptions::default())
            .map_err(|e| format!("Failed to create decoder: {e}"))?;

        let mut samples = Vec::new();
        let mut sample_buf = None;

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(symphonia::core::errors::Error::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => return Err(format!("Failed to read packet: {e}").into()),
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = decoder
                .decode(&packet)
                .map_err(|e| format!("Failed to decode audio: {e}"))?;

            if sample_buf.is_none() {
                let spec = *decoded.spec();
                let capacity = decoded.capacity() as u64;
                sample_buf = Some(SampleBuffer::<f32>::new(capacity, spec));
            }

            if let Some(ref mut buf) = sample_buf {
                buf.copy_interleaved_ref(decoded);
                samples.extend_from_slice(buf.samples());
            }
        }

        Ok((samples, sample_rate, channels))
    }
}

impl Default for FileAudioReader {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioReader for FileAudioReader {
    fn read_audio(
        &self,
        path: &Path,
        target_sample_rate: u32,
    ) -> Result<AudioSegment, Box<dyn std::error::Error>> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or("Could not determine audio file extension")?;

        let (samples, sample_rate, channels) = match extension.as_str() {
            "wav" => self.load_wav(path)?,
            "mp3" | "flac" | "ogg" => self.load_compressed(path)?,
            other => return Err(format!("Unsupported audio format: {other}").into()),
        };

        let mono = downmix(samples, channels);
        let resampled = resample(&mono, sample_rate, target_sample_rate);
        Ok(AudioSegment::new(resampled, target_sample_rate))
    }
}

/// Average interleaved channels into a mono signal.
fn downmix(samples: Vec<f32>, channels: u16) -> Vec<f32> {
    if channels <= 1 {
        return samples;
    }
    samples
        .chunks(channels as usize)
        .map(|chunk| chunk.iter().sum::<f32>() / chunk.len() as f32)
        .collect()
}

/// Nearest-sample linear resampling. Whisper is tolerant of the slight
/// aliasing this introduces.
fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if from_rate == to_rate {
        return samples.to_vec();
    }

    log::info!("Resampling from {from_rate} Hz to {to_rate} Hz");

    let ratio = from_rate as f64 / to_rate as f64;
    let new_len = (samples.len() as f64 / ratio).ceil() as usize;
    let mut resampled = Vec::with_capacity(new_len);

    for i in 0..new_len {
        let src_idx = (i as f64 * ratio) as usize;
        if src_idx < samples.len() {
            resampled.push(samples[src_idx]);
        }
    }

    resampled
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tempfile::TempDir;

    fn write_wav(path: &Path, samples: &[i16], sample_rate: u32, channels: u16) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for s in samples {
            writer.write_sample(*s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_read_mono_wav() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tone.wav");
        write_wav(&path, &[0, 16384, -16384, 0], 16000, 1);

        let seg = FileAudioReader::new().read_audio(&path, 16000).unwrap();
        assert_eq!(seg.sample_rate(), 16000);
        assert_eq!(seg.samples().len(), 4);
        assert_relative_eq!(seg.samples()[1], 0.5, epsilon = 0.001);
    }

    #[test]
    fn test_read_stereo_wav_downmixes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("stereo.wav");
        // Two frames: (L=1.0-ish, R=0), (L=0, R=0)
        write_wav(&path, &[16384, 0, 0, 0], 16000, 2);

        let seg = FileAudioReader::new().read_audio(&path, 16000).unwrap();
        assert_eq!(seg.samples().len(), 2);
        assert_relative_eq!(seg.samples()[0], 0.25, epsilon = 0.001);
    }

    #[test]
    fn test_read_wav_resamples_to_target_rate() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("hi_rate.wav");
        write_wav(&path, &vec![0i16; 32000], 32000, 1);

        let seg = FileAudioReader::new().read_audio(&path, 16000).unwrap();
        assert_eq!(seg.sample_rate(), 16000);
        assert_eq!(seg.samples().len(), 16000);
    }

    #[test]
    fn test_unsupported_extension_is_error() {
        let err = FileAudioReader::new()
            .read_audio(Path::new("notes.txt"), 16000)
            .unwrap_err();
        assert!(err.to_string().contains("Unsupported audio format"));
    }

    #[test]
    fn test_missing_extension_is_error() {
        let result = FileAudioReader::new().read_audio(Path::new("noext"), 16000);
        assert!(result.is_err());
    }

    #[test]
    fn test_downmix_mono_passthrough() {
        let samples = vec![0.1, 0.2, 0.3];
        assert_eq!(downmix(samples.clone(), 1), samples);
    }

    #[test]
    fn test_resample_same_rate_passthrough() {
        let samples = vec![0.1, 0.2];
        assert_eq!(resample(&samples, 16000, 16000), samples);
    }

    #[test]
    fn test_resample_halves_length() {
        let samples = vec![0.0f32; 1000];
        assert_eq!(resample(&samples, 32000, 16000).len(), 500);
    }
}
