use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Storage key for the persisted personal best.
pub const HIGH_SCORE_KEY: &str = "clickSpeedHighScore";

/// The single durable scalar this game owns. Reads are tolerant
/// (absence or corruption is just "no best yet"), writes are
/// best-effort and a failure never reaches the session.
pub trait ScoreStore {
    fn read(&self) -> u32;
    fn write(&self, value: u32) -> io::Result<()>;
}

// The file keeps the browser-era shape: one well-known key mapping to a
// decimal integer string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct ScoreFile {
    #[serde(rename = "clickSpeedHighScore")]
    high_score: String,
}

#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: Self::default_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    /// Score file under $HOME/.local/state/clickdash, falling back to
    /// the platform-specific data dir.
    fn default_path() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("clickdash")
                .join("highscore.json")
        } else if let Some(proj_dirs) = ProjectDirs::from("", "", "clickdash") {
            proj_dirs.data_local_dir().join("highscore.json")
        } else {
            PathBuf::from("clickdash_highscore.json")
        }
    }
}

impl Default for FileScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for FileScoreStore {
    fn read(&self) -> u32 {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(file) = serde_json::from_slice::<ScoreFile>(&bytes) {
                if let Ok(value) = file.high_score.parse::<u32>() {
                    return value;
                }
            }
        }
        0
    }

    fn write(&self, value: u32) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = ScoreFile {
            high_score: value.to_string(),
        };
        let data = serde_json::to_vec_pretty(&file).unwrap_or_default();
        fs::write(&self.path, data)
    }
}

/// In-memory store for tests and headless runs. Clones share the same
/// value, so a test can keep one handle and hand the other to a session.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    value: Arc<AtomicU32>,
    writes: Arc<AtomicU32>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of writes accepted so far.
    pub fn writes(&self) -> u32 {
        self.writes.load(Ordering::SeqCst)
    }
}

impl ScoreStore for MemoryScoreStore {
    fn read(&self) -> u32 {
        self.value.load(Ordering::SeqCst)
    }

    fn write(&self, value: u32) -> io::Result<()> {
        self.value.store(value, Ordering::SeqCst);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
