//! Log tail reader

use std::path::Path;
use tokio::fs;

use crate::logger;

/// Most recent non-blank log lines, oldest first
pub type LogTail = Vec<String>;

/// Read the last `n` non-blank lines of the log at `path`
///
/// Lines that are empty or whitespace-only are skipped and never count
/// toward `n`. A missing or unreadable file yields an empty tail; invalid
/// UTF-8 is replaced rather than rejected.
pub async fn read_recent_logs(path: &Path, n: usize) -> LogTail {
    match fs::read(path).await {
        Ok(bytes) => tail_lines(&String::from_utf8_lossy(&bytes), n),
        Err(e) => {
            logger::log_debug(&format!(
                "log file '{}' unavailable: {e}",
                path.display()
            ));
            Vec::new()
        }
    }
}

/// Keep the last `n` non-blank lines of `content` in file order
pub fn tail_lines(content: &str, n: usize) -> LogTail {
    let mut tail: LogTail = content
        .lines()
        .rev()
        .filter(|line| !line.trim().is_empty())
        .take(n)
        .map(ToString::to_string)
        .collect();
    tail.reverse();
    tail
}
