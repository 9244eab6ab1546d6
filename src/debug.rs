/// Channelled debug log, gated on the config debug flag.
///
/// The game owns the terminal's alternate screen while running, so debug
/// lines go to a file next to the process instead of stdout.  When the flag
/// is off the log is inert and the file is never created.

use std::fs::{File, OpenOptions};
use std::io::Write;

pub const LOG_PATH: &str = "maze_debug.log";

pub struct DebugLog {
    title: String,
    file: Option<File>,
}

impl DebugLog {
    pub fn new(title: &str, enabled: bool) -> DebugLog {
        let file = if enabled {
            OpenOptions::new().create(true).append(true).open(LOG_PATH).ok()
        } else {
            None
        };
        DebugLog {
            title: title.to_string(),
            file,
        }
    }

    /// Append one `[Title/Debug/Channel] message` line.  Logging is
    /// best-effort; write failures are ignored.
    pub fn message(&mut self, channel: &str, message: &str) {
        if let Some(file) = self.file.as_mut() {
            let _ = writeln!(file, "[{}/Debug/{}] {}", self.title, channel, message);
        }
    }
}
