//! Asynchronous texture fetching.
//!
//! A [`TextureSource`] accepts requests without blocking and reports
//! completions when polled from the main thread. [`DirectoryTextureSource`]
//! reads and decodes files on worker threads and hands the results back over
//! a channel.

use std::path::{Path, PathBuf};
use std::thread;

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, warn};

/// Decoded RGBA8 pixels, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    /// A single opaque pixel.
    #[must_use]
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: rgba.to_vec(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TextureLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("texture workers are no longer running")]
    WorkerGone,
}

/// Completion of a texture request.
#[derive(Debug)]
pub enum TextureEvent {
    Loaded { key: String, image: TextureImage },
    Failed { key: String, error: TextureLoadError },
}

/// Non-blocking texture fetch boundary.
pub trait TextureSource {
    /// Start fetching `key`. Never blocks; the outcome arrives via [`poll`](Self::poll).
    fn request(&mut self, key: &str);

    /// Completions that arrived since the last call.
    fn poll(&mut self) -> Vec<TextureEvent>;
}

/// Read and decode an image file into RGBA8.
pub fn load_texture_file(path: &Path) -> Result<TextureImage, TextureLoadError> {
    let bytes = std::fs::read(path).map_err(|source| TextureLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = image::load_from_memory(&bytes).map_err(|source| TextureLoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = decoded.to_rgba8();
    Ok(TextureImage {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

/// Loads textures from files in one directory using a small worker pool.
pub struct DirectoryTextureSource {
    root: PathBuf,
    requests: Sender<String>,
    completions: Receiver<TextureEvent>,
    /// Failures detected on the calling thread, reported on the next poll.
    local: Vec<TextureEvent>,
}

impl DirectoryTextureSource {
    /// Spawn `workers` loader threads (at least one) reading from `root`.
    pub fn new(root: impl Into<PathBuf>, workers: usize) -> Self {
        let root = root.into();
        let (request_tx, request_rx) = crossbeam_channel::unbounded::<String>();
        let (done_tx, done_rx) = crossbeam_channel::unbounded();

        for index in 0..workers.max(1) {
            let requests = request_rx.clone();
            let done = done_tx.clone();
            let root = root.clone();
            let spawned = thread::Builder::new()
                .name(format!("texture-loader-{index}"))
                .spawn(move || worker_loop(&root, &requests, &done));
            if let Err(err) = spawned {
                warn!("failed to spawn texture loader thread: {err}");
            }
        }

        Self {
            root,
            requests: request_tx,
            completions: done_rx,
            local: Vec::new(),
        }
    }

    /// Worker count matching the machine, capped at four.
    #[must_use]
    pub fn default_worker_count() -> usize {
        thread::available_parallelism()
            .map(|n| n.get().min(4))
            .unwrap_or(1)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn worker_loop(root: &Path, requests: &Receiver<String>, done: &Sender<TextureEvent>) {
    for key in requests.iter() {
        let path = root.join(&key);
        let event = match load_texture_file(&path) {
            Ok(image) => {
                debug!(key = %key, width = image.width, height = image.height, "texture decoded");
                TextureEvent::Loaded { key, image }
            }
            Err(error) => TextureEvent::Failed { key, error },
        };
        if done.send(event).is_err() {
            // The source was dropped.
            return;
        }
    }
}

impl TextureSource for DirectoryTextureSource {
    fn request(&mut self, key: &str) {
        if self.requests.send(key.to_string()).is_err() {
            self.local.push(TextureEvent::Failed {
                key: key.to_string(),
                error: TextureLoadError::WorkerGone,
            });
        }
    }

    fn poll(&mut self) -> Vec<TextureEvent> {
        let mut events = std::mem::take(&mut self.local);
        events.extend(self.completions.try_iter());
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for(source: &mut DirectoryTextureSource, count: usize) -> Vec<TextureEvent> {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut events = Vec::new();
        while events.len() < count && Instant::now() < deadline {
            events.extend(source.poll());
            thread::sleep(Duration::from_millis(5));
        }
        events
    }

    #[test]
    fn test_loads_png_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut img = image::RgbaImage::new(2, 3);
        img.put_pixel(1, 0, image::Rgba([255, 0, 0, 128]));
        img.save(dir.path().join("ring.png")).unwrap();

        let mut source = DirectoryTextureSource::new(dir.path(), 2);
        source.request("ring.png");
        let events = wait_for(&mut source, 1);

        assert_eq!(events.len(), 1);
        let TextureEvent::Loaded { key, image } = &events[0] else {
            panic!("expected a loaded texture, got {:?}", events[0]);
        };
        assert_eq!(key, "ring.png");
        assert_eq!((image.width, image.height), (2, 3));
        assert_eq!(&image.rgba[4..8], &[255, 0, 0, 128]);
    }

    #[test]
    fn test_missing_file_fails_without_blocking() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = DirectoryTextureSource::new(dir.path(), 1);
        source.request("8k_sun.jpg");
        let events = wait_for(&mut source, 1);

        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            TextureEvent::Failed {
                key,
                error: TextureLoadError::Io { .. },
            } if key == "8k_sun.jpg"
        ));
    }

    #[test]
    fn test_corrupt_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("2k_mars.jpg"), b"definitely not a jpeg").unwrap();
        let err = load_texture_file(&dir.path().join("2k_mars.jpg")).unwrap_err();
        assert!(matches!(err, TextureLoadError::Decode { .. }));
    }

    #[test]
    fn test_poll_is_empty_without_requests() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = DirectoryTextureSource::new(dir.path(), 1);
        assert!(source.poll().is_empty());
        assert_eq!(source.root(), dir.path());
    }
}
