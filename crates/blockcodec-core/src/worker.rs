//! Background compression with a single-result hand-off.
//!
//! A caller such as a UI event loop starts a job with [`spawn_compression`]
//! and either polls the returned [`CompressionTask`] between frames or
//! blocks on it. The worker owns its inputs; the only shared state is the
//! one-slot channel carrying the result.

use std::path::PathBuf;
use std::sync::mpsc::{sync_channel, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use tracing::debug;

use crate::config::CompressionConfig;
use crate::error::CodecError;
use crate::pipeline::compress_with_config;

type TaskResult = Result<PathBuf, CodecError>;

/// Handle to a compression running on its own thread.
#[derive(Debug)]
pub struct CompressionTask {
    receiver: Option<Receiver<TaskResult>>,
    handle: Option<JoinHandle<()>>,
}

/// Start compressing `path` on a dedicated thread.
pub fn spawn_compression(path: impl Into<PathBuf>, config: CompressionConfig) -> CompressionTask {
    let path = path.into();
    let (sender, receiver) = sync_channel(1);

    let handle = thread::spawn(move || {
        debug!("worker started for {}", path.display());
        let result = compress_with_config(&path, &config);
        // The task may have been dropped; nobody is left to tell
        let _ = sender.send(result);
    });

    CompressionTask {
        receiver: Some(receiver),
        handle: Some(handle),
    }
}

impl CompressionTask {
    /// Check for a result without blocking.
    ///
    /// Returns `None` while the worker is still running. The result is
    /// delivered exactly once; later calls return
    /// `Some(Err(CodecError::NoResult))`, as does a worker that died without
    /// sending.
    pub fn poll(&mut self) -> Option<TaskResult> {
        let Some(receiver) = self.receiver.as_ref() else {
            return Some(Err(CodecError::NoResult));
        };

        match receiver.try_recv() {
            Ok(result) => {
                self.finish();
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.finish();
                Some(Err(CodecError::NoResult))
            }
        }
    }

    /// Block until the worker delivers its result.
    pub fn wait(mut self) -> TaskResult {
        let result = match self.receiver.take() {
            Some(receiver) => receiver.recv().unwrap_or(Err(CodecError::NoResult)),
            None => Err(CodecError::NoResult),
        };
        self.join();
        result
    }

    /// Whether the result has already been taken.
    pub fn is_finished(&self) -> bool {
        self.receiver.is_none()
    }

    fn finish(&mut self) {
        self.receiver = None;
        self.join();
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                debug!("compression worker panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{read_image, DecodedImage};
    use crate::encode::encode_image;
    use image::ImageFormat;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    fn write_gray_png(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("gray.png");
        let image = DecodedImage::solid(16, 8, [128, 128, 128]);
        fs::write(&path, encode_image(&image, ImageFormat::Png, 90).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_wait_returns_output_path() {
        let dir = TempDir::new().unwrap();
        let input = write_gray_png(&dir);

        let task = spawn_compression(&input, CompressionConfig::default());
        let output = task.wait().unwrap();

        assert_eq!(output, dir.path().join("gray_Compressed.png"));
        let result = read_image(&output).unwrap();
        assert_eq!((result.width, result.height), (16, 8));
    }

    #[test]
    fn test_poll_delivers_once() {
        let dir = TempDir::new().unwrap();
        let input = write_gray_png(&dir);

        let mut task = spawn_compression(input, CompressionConfig::default());
        let first = loop {
            if let Some(result) = task.poll() {
                break result;
            }
            thread::sleep(Duration::from_millis(5));
        };

        assert!(first.is_ok());
        assert!(task.is_finished());
        assert!(matches!(task.poll(), Some(Err(CodecError::NoResult))));
    }

    #[test]
    fn test_errors_are_delivered() {
        let dir = TempDir::new().unwrap();
        let task = spawn_compression(dir.path().join("missing.png"), CompressionConfig::default());
        assert!(matches!(task.wait(), Err(CodecError::Decode(_))));
    }

    #[test]
    fn test_invalid_config_is_delivered() {
        let config = CompressionConfig::new().with_multipliers(2.0, -1.0);
        let task = spawn_compression("whatever.png", config);
        assert!(matches!(
            task.wait(),
            Err(CodecError::InvalidConfiguration(_))
        ));
    }
}
