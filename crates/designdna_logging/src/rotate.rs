//! Size-rotated log file
//!
//! `<stem>.log` is the live file. On overflow it becomes `<stem>.log.1`,
//! older generations shift up by one and the oldest beyond `keep` is
//! removed.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub(crate) struct RotatingFile {
    dir: PathBuf,
    stem: String,
    /// Total files kept, live file included
    keep: usize,
    max_bytes: u64,
    live: Option<File>,
    written: u64,
}

impl RotatingFile {
    pub(crate) fn open(dir: PathBuf, app_name: &str, keep: usize, max_bytes: u64) -> io::Result<Self> {
        fs::create_dir_all(&dir)?;
        let mut file = Self {
            dir,
            stem: file_stem(app_name),
            keep: keep.max(1),
            max_bytes,
            live: None,
            written: 0,
        };
        file.reopen()?;
        if file.written > file.max_bytes {
            file.roll()?;
        }
        Ok(file)
    }

    fn generation(&self, index: usize) -> PathBuf {
        if index == 0 {
            self.dir.join(format!("{}.log", self.stem))
        } else {
            self.dir.join(format!("{}.log.{index}", self.stem))
        }
    }

    fn reopen(&mut self) -> io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(self.generation(0))?;
        self.written = file.metadata()?.len();
        self.live = Some(file);
        Ok(())
    }

    fn roll(&mut self) -> io::Result<()> {
        if let Some(mut live) = self.live.take() {
            live.flush()?;
        }

        let oldest = self.keep - 1;
        if oldest > 0 {
            let expired = self.generation(oldest);
            if expired.exists() {
                fs::remove_file(expired)?;
            }
            for index in (0..oldest).rev() {
                let from = self.generation(index);
                if from.exists() {
                    fs::rename(from, self.generation(index + 1))?;
                }
            }
        } else {
            // Single file: truncate in place
            File::create(self.generation(0))?;
        }

        self.reopen()
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.roll()?;
        }
        let live = self
            .live
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "log file unavailable"))?;
        let count = live.write(buf)?;
        self.written += count as u64;
        Ok(count)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.live.as_mut() {
            Some(live) => live.flush(),
            None => Ok(()),
        }
    }
}

/// Cloneable handle handed to the fmt layer.
#[derive(Clone)]
pub(crate) struct SharedLogFile {
    inner: Arc<Mutex<RotatingFile>>,
}

impl SharedLogFile {
    pub(crate) fn new(file: RotatingFile) -> Self {
        Self { inner: Arc::new(Mutex::new(file)) }
    }

    fn with_file<T>(&self, f: impl FnOnce(&mut RotatingFile) -> io::Result<T>) -> io::Result<T> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer lock poisoned"))?;
        f(&mut guard)
    }
}

impl Write for SharedLogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_file(|file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_file(|file| file.flush())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SharedLogFile {
    type Writer = SharedLogFile;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' { ch } else { '_' })
        .collect();
    if stem.is_empty() {
        "designdna".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem_replaces_separators() {
        assert_eq!(file_stem("designdna"), "designdna");
        assert_eq!(file_stem("../evil name"), "___evil_name");
        assert_eq!(file_stem(""), "designdna");
    }

    #[test]
    fn test_rolls_when_full() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = RotatingFile::open(dir.path().to_path_buf(), "app", 3, 10).unwrap();

        file.write_all(b"first-line").unwrap();
        file.write_all(b"second").unwrap();
        file.write_all(b"third").unwrap();
        file.flush().unwrap();

        let read = |name: &str| fs::read_to_string(dir.path().join(name)).unwrap();
        assert_eq!(read("app.log"), "third");
        assert_eq!(read("app.log.1"), "second");
        assert_eq!(read("app.log.2"), "first-line");
    }

    #[test]
    fn test_oldest_generation_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = RotatingFile::open(dir.path().to_path_buf(), "app", 2, 4).unwrap();
        for chunk in [b"aaaa", b"bbbb", b"cccc"] {
            file.write_all(chunk).unwrap();
        }
        file.flush().unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("app.log")).unwrap(), "cccc");
        assert_eq!(fs::read_to_string(dir.path().join("app.log.1")).unwrap(), "bbbb");
        assert!(!dir.path().join("app.log.2").exists());
    }

    #[test]
    fn test_shared_handle_writes_through() {
        let dir = tempfile::tempdir().unwrap();
        let file = RotatingFile::open(dir.path().to_path_buf(), "shared", 2, 1024).unwrap();
        let mut handle = SharedLogFile::new(file);
        let mut clone = handle.clone();
        handle.write_all(b"one ").unwrap();
        clone.write_all(b"two").unwrap();
        handle.flush().unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("shared.log")).unwrap(), "one two");
    }
}
