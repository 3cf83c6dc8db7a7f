//! Append-only achievement log
//!
//! The achievement engine records one line per newly mastered achievement.
//! Sinks:
//! - [`FileAchievementLog`]: newline-delimited text file, created on first append
//! - [`MemoryAchievementLog`]: in-process buffer (tests, headless runs)

use std::cell::RefCell;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Default file used by the headless runner
pub const DEFAULT_LOG_PATH: &str = "achievements.log";

/// Durable, append-only line store.
pub trait AchievementLog {
    /// Append one line
    fn append(&mut self, line: &str) -> io::Result<()>;

    /// Every line appended so far, oldest first
    fn read_all(&self) -> io::Result<Vec<String>>;
}

/// Stores lines in a text file, one per line.
#[derive(Debug, Clone)]
pub struct FileAchievementLog {
    path: PathBuf,
}

impl FileAchievementLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileAchievementLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_PATH)
    }
}

impl AchievementLog for FileAchievementLog {
    fn append(&mut self, line: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)
    }

    fn read_all(&self) -> io::Result<Vec<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents.lines().map(str::to_string).collect()),
            // Nothing mastered yet
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}

/// Keeps lines in memory. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemoryAchievementLog {
    lines: Rc<RefCell<Vec<String>>>,
}

impl MemoryAchievementLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lines.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }
}

impl AchievementLog for MemoryAchievementLog {
    fn append(&mut self, line: &str) -> io::Result<()> {
        self.lines.borrow_mut().push(line.to_string());
        Ok(())
    }

    fn read_all(&self) -> io::Result<Vec<String>> {
        Ok(self.lines.borrow().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("void_runner_{}_{}.log", name, std::process::id()))
    }

    #[test]
    fn test_file_log_missing_file_reads_empty() {
        let log = FileAchievementLog::new(temp_path("missing"));
        let _ = fs::remove_file(log.path());
        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_file_log_appends_lines_in_order() {
        let mut log = FileAchievementLog::new(temp_path("append"));
        let _ = fs::remove_file(log.path());

        log.append("Achievement Mastered: Survivor").unwrap();
        log.append("Achievement Mastered: Sharp Shooter").unwrap();

        assert_eq!(
            log.read_all().unwrap(),
            vec![
                "Achievement Mastered: Survivor",
                "Achievement Mastered: Sharp Shooter"
            ]
        );
        fs::remove_file(log.path()).unwrap();
    }

    #[test]
    fn test_file_log_append_into_missing_directory_fails() {
        let mut log = FileAchievementLog::new(temp_path("dir").join("nested").join("x.log"));
        assert!(log.append("Achievement Mastered: Survivor").is_err());
    }

    #[test]
    fn test_memory_log_clones_share_lines() {
        let handle = MemoryAchievementLog::new();
        let mut sink = handle.clone();
        sink.append("a").unwrap();
        assert_eq!(handle.len(), 1);
        assert_eq!(handle.read_all().unwrap(), vec!["a"]);
    }
}
