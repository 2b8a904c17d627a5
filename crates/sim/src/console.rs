//! Command history shown next to the views: timestamped status lines.

use std::collections::VecDeque;

use chrono::{Local, NaiveTime};

/// Bounded `[HH:MM:SS] message` history. Oldest lines drop first.
#[derive(Debug, Clone)]
pub struct CommandConsole {
    lines: VecDeque<String>,
    capacity: usize,
}

impl CommandConsole {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Append `message` stamped with the local wall-clock time.
    pub fn log(&mut self, message: &str) {
        self.log_at(Local::now().time(), message);
    }

    pub fn log_at(&mut self, time: NaiveTime, message: &str) {
        let line = format!("[{}] {}", time.format("%H:%M:%S"), message);
        log::info!("{}", line);
        if self.capacity == 0 {
            return;
        }
        while self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
