use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use super::{loop_position, AudioBackend, TrackHandle};
use crate::error::AudioError;

/// Output through the default audio device.
pub struct RodioBackend {
    // Output stops when the stream is dropped.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    volume: f32,
}

impl RodioBackend {
    /// Open the default output device. `volume` is 0.0 ..= 1.0.
    pub fn open(volume: f32) -> Result<Self, AudioError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| AudioError::Unavailable(e.to_string()))?;
        Ok(Self {
            _stream: stream,
            handle,
            volume: volume.clamp(0.0, 1.0),
        })
    }

    fn sink(&self) -> Result<Sink, AudioError> {
        let sink = Sink::try_new(&self.handle).map_err(|e| AudioError::Unavailable(e.to_string()))?;
        sink.set_volume(self.volume);
        Ok(sink)
    }
}

fn decode(path: &Path) -> Result<Decoder<BufReader<File>>, AudioError> {
    let file = File::open(path).map_err(|source| AudioError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Decoder::new(BufReader::new(file)).map_err(|e| AudioError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Length of a decoded stream, found by counting its samples.
fn measure(path: &Path) -> Result<Duration, AudioError> {
    let source = decode(path)?;
    let per_sec = u64::from(source.channels()) * u64::from(source.sample_rate());
    if per_sec == 0 {
        return Err(AudioError::Decode {
            path: path.to_path_buf(),
            message: "stream reports no samples per second".into(),
        });
    }
    let samples = source.count() as u64;
    Ok(Duration::from_secs_f64(samples as f64 / per_sec as f64))
}

/// Fill `slot` from a background decode pass. MP3 streams without a frame
/// count only report their length this way.
fn measure_in_background(path: PathBuf, slot: Arc<OnceLock<Duration>>) {
    let spawned = thread::Builder::new()
        .name("tepang-measure".into())
        .spawn(move || match measure(&path) {
            Ok(duration) => {
                tracing::debug!(path = %path.display(), secs = duration.as_secs_f64(), "track length measured");
                let _ = slot.set(duration);
            }
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "could not measure track length"),
        });
    if let Err(e) = spawned {
        tracing::warn!(error = %e, "could not start track length measurement");
    }
}

pub struct RodioTrack {
    sink: Sink,
    duration: Arc<OnceLock<Duration>>,
}

impl TrackHandle for RodioTrack {
    fn position_secs(&self) -> f64 {
        // The sink counts across loops.
        loop_position(self.sink.get_pos().as_secs_f64(), self.duration_secs())
    }

    fn duration_secs(&self) -> Option<f64> {
        self.duration.get().map(Duration::as_secs_f64)
    }

    fn stop(&mut self) {
        self.sink.stop();
    }
}

impl Drop for RodioTrack {
    fn drop(&mut self) {
        self.sink.stop();
    }
}

impl AudioBackend for RodioBackend {
    type Track = RodioTrack;

    fn play_once(&mut self, path: &Path) -> Result<(), AudioError> {
        let source = decode(path)?;
        let sink = self.sink()?;
        sink.append(source);
        sink.detach();
        Ok(())
    }

    fn play_looped(&mut self, path: &Path) -> Result<RodioTrack, AudioError> {
        let source = decode(path)?;
        let duration = Arc::new(OnceLock::new());
        match source.total_duration() {
            Some(known) => {
                let _ = duration.set(known);
            }
            None => measure_in_background(path.to_path_buf(), Arc::clone(&duration)),
        }
        let sink = self.sink()?;
        sink.append(source.repeat_infinite());
        sink.play();
        Ok(RodioTrack { sink, duration })
    }
}
