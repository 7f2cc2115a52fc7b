use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use okwu_types::{SessionState, WordRecord};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::card::SessionObserver;
use crate::error::SessionError;
use crate::sanitize::clean_file_name;

pub type ClipId = u64;

/// Which recording of a word to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Voice {
    English,
    Igbo,
}

impl Voice {
    pub fn suffix(&self) -> &'static str {
        match self {
            Voice::English => "english",
            Voice::Igbo => "igbo",
        }
    }
}

/// `{root}/{category}/{english}/{english}.{voice}.mp3`, each segment sanitized
pub fn clip_path(root: &Path, word: &WordRecord, voice: Voice) -> PathBuf {
    let category = clean_file_name(word.category.as_str());
    let english = clean_file_name(&word.english);
    root.join(category)
        .join(&english)
        .join(format!("{}.{}.mp3", english, voice.suffix()))
}

/// Audio playback facility
pub trait AudioBackend: Send {
    /// Start playing the clip at `path`
    fn play(&mut self, path: &Path) -> Result<ClipId, SessionError>;

    /// Stop a clip started by `play`, no-op if it already finished
    fn stop(&mut self, clip: ClipId);
}

impl<B: AudioBackend + ?Sized> AudioBackend for Box<B> {
    fn play(&mut self, path: &Path) -> Result<ClipId, SessionError> {
        (**self).play(path)
    }

    fn stop(&mut self, clip: ClipId) {
        (**self).stop(clip)
    }
}

pub type Clip = Decoder<BufReader<File>>;

/// Open and decode a clip, so a missing or unplayable file fails up front
pub fn decode_clip(path: &Path) -> Result<Clip, SessionError> {
    let load_error = |reason: String| SessionError::AudioLoad {
        path: path.display().to_string(),
        reason,
    };

    let file = File::open(path).map_err(|e| load_error(e.to_string()))?;
    Decoder::new(BufReader::new(file)).map_err(|e| load_error(e.to_string()))
}

/// Plays clips on the default output device, one `Sink` per clip
pub struct RodioBackend {
    handle: OutputStreamHandle,
    current: Option<(ClipId, Sink)>,
    next_id: ClipId,
}

impl RodioBackend {
    pub fn new(handle: OutputStreamHandle) -> Self {
        Self {
            handle,
            current: None,
            next_id: 0,
        }
    }

    /// Open the default device. The returned stream must outlive the backend.
    pub fn try_default() -> Result<(OutputStream, Self), SessionError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| SessionError::AudioOutput(e.to_string()))?;
        Ok((stream, Self::new(handle)))
    }
}

impl AudioBackend for RodioBackend {
    fn play(&mut self, path: &Path) -> Result<ClipId, SessionError> {
        let clip = decode_clip(path)?;
        let sink = Sink::try_new(&self.handle).map_err(|e| SessionError::AudioLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        sink.append(clip);

        self.next_id += 1;
        let id = self.next_id;
        if let Some((old, sink)) = self.current.replace((id, sink)) {
            tracing::warn!("Clip {} was still tracked when {} started", old, id);
            sink.stop();
        }
        Ok(id)
    }

    fn stop(&mut self, clip: ClipId) {
        match self.current.take() {
            Some((id, sink)) if id == clip => sink.stop(),
            other => self.current = other,
        }
    }
}

impl Drop for RodioBackend {
    fn drop(&mut self) {
        if let Some((_, sink)) = self.current.take() {
            sink.stop();
        }
    }
}

/// Decodes clips without producing sound, for machines with no output device
#[derive(Debug, Default)]
pub struct SilentBackend {
    next_id: ClipId,
}

impl AudioBackend for SilentBackend {
    fn play(&mut self, path: &Path) -> Result<ClipId, SessionError> {
        decode_clip(path)?;
        self.next_id += 1;
        tracing::debug!("Silent playback of {}", path.display());
        Ok(self.next_id)
    }

    fn stop(&mut self, _clip: ClipId) {}
}

/// Plays the cue matching the session state, one clip at a time.
///
/// Every new cue stops the clip in flight before starting; a clip that fails
/// to load is skipped.
pub struct AudioCueSequencer<B> {
    backend: B,
    root: PathBuf,
    current: Option<ClipId>,
    last_cue: Option<(String, bool, bool)>,
}

impl<B: AudioBackend> AudioCueSequencer<B> {
    pub fn new(backend: B, root: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            root: root.into(),
            current: None,
            last_cue: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_playing(&self) -> bool {
        self.current.is_some()
    }

    pub fn stop(&mut self) {
        if let Some(clip) = self.current.take() {
            self.backend.stop(clip);
        }
    }

    /// Stop and forget the last cue, so the next state plays again
    pub fn reset(&mut self) {
        self.stop();
        self.last_cue = None;
    }

    pub fn play_pronunciation(&mut self, word: &WordRecord) -> Option<ClipId> {
        self.play(word, Voice::English)
    }

    pub fn play_translation(&mut self, word: &WordRecord) -> Option<ClipId> {
        self.play(word, Voice::Igbo)
    }

    fn play(&mut self, word: &WordRecord, voice: Voice) -> Option<ClipId> {
        self.stop();

        let path = clip_path(&self.root, word, voice);
        match self.backend.play(&path) {
            Ok(clip) => {
                tracing::debug!("Playing {} ({:?})", path.display(), voice);
                self.current = Some(clip);
                Some(clip)
            }
            Err(e) => {
                tracing::warn!("Skipping audio: {}", e);
                None
            }
        }
    }
}

impl<B: AudioBackend> SessionObserver for AudioCueSequencer<B> {
    fn on_session_change(&mut self, state: &SessionState) {
        let cue = (
            state.current_word.english.clone(),
            state.is_revealed,
            state.audio_enabled,
        );
        if self.last_cue.as_ref() == Some(&cue) {
            return;
        }
        self.last_cue = Some(cue);

        if !state.audio_enabled {
            self.stop();
            return;
        }

        if state.is_revealed {
            self.play_translation(&state.current_word);
        } else {
            self.play_pronunciation(&state.current_word);
        }
    }
}


#[cfg(test)]
mod tests {
    use okwu_types::{Category, CategoryFilter};

    use super::testing::{Call, RecordingBackend};
    use super::*;

    fn house() -> WordRecord {
        WordRecord {
            english: "house".to_string(),
            igbo: "ụlọ".to_string(),
            category: Category::Noun,
            examples: None,
        }
    }

    fn state(word: WordRecord, revealed: bool, audio: bool) -> SessionState {
        SessionState {
            category_filter: CategoryFilter::All,
            current_word: word,
            is_revealed: revealed,
            reveal_countdown: if revealed { 0 } else { 3 },
            is_suspended: false,
            audio_enabled: audio,
        }
    }

    #[test]
    fn test_clip_path() {
        let mut word = house();
        word.english = "On top of".to_string();
        word.category = Category::Preposition;
        assert_eq!(
            clip_path(Path::new("audio"), &word, Voice::Igbo),
            PathBuf::from("audio/preposition/on_top_of/on_top_of.igbo.mp3")
        );
        assert_eq!(
            clip_path(Path::new("audio"), &house(), Voice::English),
            PathBuf::from("audio/noun/house/house.english.mp3")
        );
    }

    #[test]
    fn test_second_cue_stops_first() {
        let mut seq = AudioCueSequencer::new(RecordingBackend::default(), "audio");
        let first = seq.play_pronunciation(&house()).unwrap();
        seq.play_translation(&house()).unwrap();

        let calls = &seq.backend().calls;
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[1], Call::Stop(first));
        assert_eq!(seq.backend().max_concurrent, 1);
    }

    #[test]
    fn test_observer_plays_by_reveal_flag() {
        let mut seq = AudioCueSequencer::new(RecordingBackend::default(), "audio");
        seq.on_session_change(&state(house(), false, true));
        seq.on_session_change(&state(house(), true, true));

        assert_eq!(
            seq.backend().played(),
            vec![
                PathBuf::from("audio/noun/house/house.english.mp3"),
                PathBuf::from("audio/noun/house/house.igbo.mp3"),
            ]
        );
    }

    #[test]
    fn test_observer_ignores_unchanged_cue() {
        let mut seq = AudioCueSequencer::new(RecordingBackend::default(), "audio");
        let mut s = state(house(), false, true);
        seq.on_session_change(&s);
        s.reveal_countdown = 2;
        seq.on_session_change(&s);
        s.is_suspended = true;
        seq.on_session_change(&s);

        assert_eq!(seq.backend().played().len(), 1);
    }

    #[test]
    fn test_disabled_audio_only_stops() {
        let mut seq = AudioCueSequencer::new(RecordingBackend::default(), "audio");
        seq.on_session_change(&state(house(), false, true));
        assert!(seq.is_playing());

        seq.on_session_change(&state(house(), true, false));
        assert!(!seq.is_playing());
        assert_eq!(seq.backend().played().len(), 1);
        assert!(seq.backend().playing.is_empty());
    }

    #[test]
    fn test_missing_clip_is_skipped() {
        let mut backend = RecordingBackend::default();
        backend
            .missing
            .insert(PathBuf::from("audio/noun/house/house.english.mp3"));
        let mut seq = AudioCueSequencer::new(backend, "audio");

        assert_eq!(seq.play_pronunciation(&house()), None);
        assert!(!seq.is_playing());
        // the next cue still plays
        assert!(seq.play_translation(&house()).is_some());
    }

    /// Smallest valid PCM wav: 16-bit mono at 8 kHz, `samples` of silence
    fn silent_wav(samples: u32) -> Vec<u8> {
        let data_len = samples * 2;
        let mut wav = Vec::with_capacity(44 + data_len as usize);
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&(36 + data_len).to_le_bytes());
        wav.extend_from_slice(b"WAVEfmt ");
        wav.extend_from_slice(&16u32.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
        wav.extend_from_slice(&1u16.to_le_bytes()); // mono
        wav.extend_from_slice(&8000u32.to_le_bytes());
        wav.extend_from_slice(&16000u32.to_le_bytes());
        wav.extend_from_slice(&2u16.to_le_bytes());
        wav.extend_from_slice(&16u16.to_le_bytes());
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&data_len.to_le_bytes());
        wav.resize(44 + data_len as usize, 0);
        wav
    }

    #[test]
    fn test_silent_backend_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = SilentBackend::default();
        let path = dir.path().join("missing.mp3");
        assert!(matches!(
            backend.play(&path),
            Err(SessionError::AudioLoad { .. })
        ));

        std::fs::write(&path, silent_wav(800)).unwrap();
        assert!(backend.play(&path).is_ok());
    }

    #[test]
    fn test_undecodable_clip_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp3");
        std::fs::write(&path, b"this is not an mp3").unwrap();

        match decode_clip(&path) {
            Err(SessionError::AudioLoad { path: p, .. }) => assert!(p.ends_with("clip.mp3")),
            Err(other) => panic!("expected load error, got {other:?}"),
            Ok(_) => panic!("garbage decoded as audio"),
        }
        assert!(matches!(
            SilentBackend::default().play(&path),
            Err(SessionError::AudioLoad { .. })
        ));
    }

    #[test]
    fn test_sequencer_skips_undecodable_clip() {
        let dir = tempfile::tempdir().unwrap();
        let clip_dir = dir.path().join("noun").join("house");
        std::fs::create_dir_all(&clip_dir).unwrap();
        std::fs::write(clip_dir.join("house.english.mp3"), b"garbage").unwrap();
        std::fs::write(clip_dir.join("house.igbo.mp3"), silent_wav(800)).unwrap();

        let mut seq = AudioCueSequencer::new(SilentBackend::default(), dir.path());
        assert_eq!(seq.play_pronunciation(&house()), None);
        assert!(!seq.is_playing());
        assert!(seq.play_translation(&house()).is_some());
        assert!(seq.is_playing());
    }
}
