//=========================================================================
// Audio
//=========================================================================
//
// Music and sound playback behind the `AudioProvider` trait.
//
// Implementations:
// - SilentAudio: no output, remembers what would be playing
// - RodioAudio:  real playback through rodio (feature `sound`)
//
// Loop counts follow the mixer convention: -1 repeats forever, n plays
// the clip n extra times.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use log::debug;

//=== AudioChannel ========================================================

/// Logical mixer channels, each with its own volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioChannel {
    Music,
    Sfx,
    Ambience,
}

impl fmt::Display for AudioChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Music => "music",
            Self::Sfx => "sfx",
            Self::Ambience => "ambience",
        };
        f.write_str(name)
    }
}

//=== AudioError ==========================================================

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    Device(String),

    #[error("failed to open `{name}`: {source}")]
    Open {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode `{name}`: {reason}")]
    Decode { name: String, reason: String },

    #[error("play_music called with nothing loaded")]
    NothingLoaded,
}

//=== AudioProvider =======================================================

/// Playback operations used by game states.
///
/// Files are named relative to the provider's root, e.g.
/// `"music/menu_loop.ogg"`.
pub trait AudioProvider {
    /// Replaces the current music track. Nothing plays until
    /// [`play_music`](Self::play_music).
    fn load_music(&mut self, name: &str) -> Result<(), AudioError>;

    /// Appends a track to play after the loaded one.
    fn queue_music(&mut self, name: &str, loops: i32) -> Result<(), AudioError>;

    /// Starts the loaded track followed by the queue.
    fn play_music(&mut self) -> Result<(), AudioError>;

    /// Plays a one-off clip on `channel`, fading in over `fade_ms`.
    fn play_sound(
        &mut self,
        channel: AudioChannel,
        name: &str,
        loops: i32,
        fade_ms: u32,
    ) -> Result<(), AudioError>;

    /// Sets a channel volume, clamped to `0.0..=1.0`.
    fn set_volume(&mut self, channel: AudioChannel, volume: f32);

    /// Current volume of `channel`.
    fn volume(&self, channel: AudioChannel) -> f32;

    /// Track started by the last `play_music`, if any.
    fn current_music(&self) -> Option<&str>;
}

//=== Volumes =============================================================

/// Per-channel volume table shared by the providers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volumes {
    pub music: f32,
    pub sfx: f32,
    pub ambience: f32,
}

impl Volumes {
    pub fn get(&self, channel: AudioChannel) -> f32 {
        match channel {
            AudioChannel::Music => self.music,
            AudioChannel::Sfx => self.sfx,
            AudioChannel::Ambience => self.ambience,
        }
    }

    pub fn set(&mut self, channel: AudioChannel, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        match channel {
            AudioChannel::Music => self.music = volume,
            AudioChannel::Sfx => self.sfx = volume,
            AudioChannel::Ambience => self.ambience = volume,
        }
    }
}

impl Default for Volumes {
    fn default() -> Self {
        Self {
            music: 0.5,
            sfx: 0.5,
            ambience: 0.5,
        }
    }
}

//=== SilentAudio =========================================================

/// Provider with no output device. Used headless and with `--no-sound`.
#[derive(Debug, Default)]
pub struct SilentAudio {
    volumes: Volumes,
    loaded: Option<String>,
    queue: Vec<(String, i32)>,
    playing: Option<String>,
    sounds: Vec<(AudioChannel, String)>,
}

impl SilentAudio {
    pub fn new(volumes: Volumes) -> Self {
        Self {
            volumes,
            ..Self::default()
        }
    }

    /// Tracks queued behind the current one.
    pub fn queued(&self) -> &[(String, i32)] {
        &self.queue
    }

    /// Every clip passed to `play_sound`, in call order.
    pub fn sounds(&self) -> &[(AudioChannel, String)] {
        &self.sounds
    }
}

impl AudioProvider for SilentAudio {
    fn load_music(&mut self, name: &str) -> Result<(), AudioError> {
        debug!(target: "audio", "(silent) load music {}", name);
        self.loaded = Some(name.to_string());
        self.queue.clear();
        Ok(())
    }

    fn queue_music(&mut self, name: &str, loops: i32) -> Result<(), AudioError> {
        debug!(target: "audio", "(silent) queue music {} loops={}", name, loops);
        self.queue.push((name.to_string(), loops));
        Ok(())
    }

    fn play_music(&mut self) -> Result<(), AudioError> {
        let track = self.loaded.clone().ok_or(AudioError::NothingLoaded)?;
        debug!(target: "audio", "(silent) play music {}", track);
        self.playing = Some(track);
        Ok(())
    }

    fn play_sound(
        &mut self,
        channel: AudioChannel,
        name: &str,
        loops: i32,
        fade_ms: u32,
    ) -> Result<(), AudioError> {
        debug!(
            target: "audio",
            "(silent) play {} on {} loops={} fade={}ms",
            name, channel, loops, fade_ms
        );
        self.sounds.push((channel, name.to_string()));
        Ok(())
    }

    fn set_volume(&mut self, channel: AudioChannel, volume: f32) {
        self.volumes.set(channel, volume);
    }

    fn volume(&self, channel: AudioChannel) -> f32 {
        self.volumes.get(channel)
    }

    fn current_music(&self) -> Option<&str> {
        self.playing.as_deref()
    }
}

//=== RodioAudio ==========================================================

#[cfg(feature = "sound")]
pub use rodio_backend::RodioAudio;

#[cfg(feature = "sound")]
mod rodio_backend {
    use std::collections::HashMap;
    use std::fs::File;
    use std::io::BufReader;
    use std::path::PathBuf;
    use std::time::Duration;

    use log::{debug, info};
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

    use super::{AudioChannel, AudioError, AudioProvider, Volumes};

    type Clip = Box<dyn Source<Item = i16> + Send>;

    /// Provider backed by the default output device.
    ///
    /// Music and ambience keep a sink each so volume changes apply to
    /// what is already playing. Sound effects get a detached sink per clip.
    pub struct RodioAudio {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        root: PathBuf,
        volumes: Volumes,
        music: Sink,
        ambience: Sink,
        loaded: Option<String>,
        queue: Vec<(String, i32)>,
        playing: Option<String>,
        cache: HashMap<String, PathBuf>,
    }

    impl RodioAudio {
        pub fn new(root: impl Into<PathBuf>, volumes: Volumes) -> Result<Self, AudioError> {
            let (stream, handle) =
                OutputStream::try_default().map_err(|e| AudioError::Device(e.to_string()))?;
            let music = Sink::try_new(&handle).map_err(|e| AudioError::Device(e.to_string()))?;
            let ambience = Sink::try_new(&handle).map_err(|e| AudioError::Device(e.to_string()))?;
            music.set_volume(volumes.music);
            ambience.set_volume(volumes.ambience);

            info!(target: "audio", "Audio output opened");
            Ok(Self {
                _stream: stream,
                handle,
                root: root.into(),
                volumes,
                music,
                ambience,
                loaded: None,
                queue: Vec::new(),
                playing: None,
                cache: HashMap::new(),
            })
        }

        fn path_of(&mut self, name: &str) -> PathBuf {
            self.cache
                .entry(name.to_string())
                .or_insert_with(|| self.root.join(name))
                .clone()
        }

        fn decode(&mut self, name: &str) -> Result<Decoder<BufReader<File>>, AudioError> {
            let path = self.path_of(name);
            let file = File::open(&path).map_err(|source| AudioError::Open {
                name: name.to_string(),
                source,
            })?;
            Decoder::new(BufReader::new(file)).map_err(|e| AudioError::Decode {
                name: name.to_string(),
                reason: e.to_string(),
            })
        }

        /// Appends `name` to `sink` honoring the loop convention.
        fn append(&mut self, sink: &Sink, name: &str, loops: i32, fade_ms: u32) -> Result<(), AudioError> {
            let source = self.decode(name)?;
            let fade = Duration::from_millis(u64::from(fade_ms));

            if loops < 0 {
                sink.append(with_fade(Box::new(source.repeat_infinite()), fade));
                return Ok(());
            }

            let buffered = source.buffered();
            sink.append(with_fade(Box::new(buffered.clone()), fade));
            for _ in 0..loops {
                sink.append(buffered.clone());
            }
            Ok(())
        }
    }

    fn with_fade(clip: Clip, fade: Duration) -> Clip {
        if fade.is_zero() {
            clip
        } else {
            Box::new(clip.fade_in(fade))
        }
    }

    impl AudioProvider for RodioAudio {
        fn load_music(&mut self, name: &str) -> Result<(), AudioError> {
            self.path_of(name);
            self.loaded = Some(name.to_string());
            self.queue.clear();
            debug!(target: "audio", "Loaded music {}", name);
            Ok(())
        }

        fn queue_music(&mut self, name: &str, loops: i32) -> Result<(), AudioError> {
            self.queue.push((name.to_string(), loops));
            Ok(())
        }

        fn play_music(&mut self) -> Result<(), AudioError> {
            let track = self.loaded.clone().ok_or(AudioError::NothingLoaded)?;

            let sink = Sink::try_new(&self.handle).map_err(|e| AudioError::Device(e.to_string()))?;
            sink.set_volume(self.volumes.music);
            self.append(&sink, &track, 0, 0)?;
            for (name, loops) in self.queue.clone() {
                self.append(&sink, &name, loops, 0)?;
            }

            // Replacing the sink stops the previous track
            self.music = sink;
            debug!(target: "audio", "Playing music {}", track);
            self.playing = Some(track);
            Ok(())
        }

        fn play_sound(
            &mut self,
            channel: AudioChannel,
            name: &str,
            loops: i32,
            fade_ms: u32,
        ) -> Result<(), AudioError> {
            match channel {
                AudioChannel::Ambience => {
                    let sink = Sink::try_new(&self.handle).map_err(|e| AudioError::Device(e.to_string()))?;
                    sink.set_volume(self.volumes.ambience);
                    self.append(&sink, name, loops, fade_ms)?;
                    self.ambience = sink;
                }
                AudioChannel::Music | AudioChannel::Sfx => {
                    let sink = Sink::try_new(&self.handle).map_err(|e| AudioError::Device(e.to_string()))?;
                    sink.set_volume(self.volumes.get(channel));
                    self.append(&sink, name, loops, fade_ms)?;
                    sink.detach();
                }
            }
            debug!(target: "audio", "Playing {} on {}", name, channel);
            Ok(())
        }

        fn set_volume(&mut self, channel: AudioChannel, volume: f32) {
            self.volumes.set(channel, volume);
            match channel {
                AudioChannel::Music => self.music.set_volume(self.volumes.music),
                AudioChannel::Ambience => self.ambience.set_volume(self.volumes.ambience),
                AudioChannel::Sfx => {}
            }
            debug!(target: "audio", "{} volume set to {}", channel, self.volumes.get(channel));
        }

        fn volume(&self, channel: AudioChannel) -> f32 {
            self.volumes.get(channel)
        }

        fn current_music(&self) -> Option<&str> {
            self.playing.as_deref()
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_without_load_fails() {
        let mut audio = SilentAudio::default();
        assert!(matches!(audio.play_music(), Err(AudioError::NothingLoaded)));
        assert_eq!(audio.current_music(), None);
    }

    #[test]
    fn load_resets_queue() {
        let mut audio = SilentAudio::default();
        audio.load_music("music/a.ogg").unwrap();
        audio.queue_music("music/b.ogg", -1).unwrap();
        audio.load_music("music/c.ogg").unwrap();

        assert!(audio.queued().is_empty());
        audio.play_music().unwrap();
        assert_eq!(audio.current_music(), Some("music/c.ogg"));
    }

    #[test]
    fn volumes_are_clamped_per_channel() {
        let mut audio = SilentAudio::new(Volumes::default());
        audio.set_volume(AudioChannel::Sfx, 3.0);
        audio.set_volume(AudioChannel::Music, -1.0);

        assert_eq!(audio.volume(AudioChannel::Sfx), 1.0);
        assert_eq!(audio.volume(AudioChannel::Music), 0.0);
        assert_eq!(audio.volume(AudioChannel::Ambience), 0.5);
    }

    #[test]
    fn sounds_are_recorded_in_order() {
        let mut audio = SilentAudio::default();
        audio.play_sound(AudioChannel::Ambience, "sfx/ambience.ogg", -1, 3000).unwrap();
        audio.play_sound(AudioChannel::Sfx, "sfx/click.ogg", 0, 0).unwrap();

        assert_eq!(
            audio.sounds(),
            &[
                (AudioChannel::Ambience, "sfx/ambience.ogg".to_string()),
                (AudioChannel::Sfx, "sfx/click.ogg".to_string()),
            ]
        );
    }
}
