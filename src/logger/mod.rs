//! In-RAM event log
//!
//! A ring of timestamped entries recorded by the game core. Nothing is kept
//! across power cycles; when the ring is full the oldest entry is dropped.

use heapless::Deque;
use ufmt::{uDisplay, uWrite, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: u32,
    pub log_type: LogType,
    pub message: &'static str,
    pub value: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogType {
    System = 0,
    Game = 1,
    Input = 2,
    Error = 3,
    Debug = 4,
}

impl LogType {
    pub fn tag(self) -> &'static str {
        match self {
            LogType::System => "SYS",
            LogType::Game => "GAM",
            LogType::Input => "INP",
            LogType::Error => "ERR",
            LogType::Debug => "DBG",
        }
    }
}

pub struct Logger<const N: usize> {
    buffer: Deque<LogEntry, N>,
    dropped: u32,
}

impl<const N: usize> Logger<N> {
    pub const fn new() -> Self {
        Self {
            buffer: Deque::new(),
            dropped: 0,
        }
    }

    pub fn log_system(&mut self, timestamp: u32, message: &'static str, value: u32) {
        self.log_entry(timestamp, LogType::System, message, value)
    }

    pub fn log_game(&mut self, timestamp: u32, message: &'static str, value: u32) {
        self.log_entry(timestamp, LogType::Game, message, value)
    }

    pub fn log_input(&mut self, timestamp: u32, message: &'static str, value: u32) {
        self.log_entry(timestamp, LogType::Input, message, value)
    }

    pub fn log_error(&mut self, timestamp: u32, message: &'static str, value: u32) {
        self.log_entry(timestamp, LogType::Error, message, value)
    }

    pub fn log_debug(&mut self, timestamp: u32, message: &'static str, value: u32) {
        self.log_entry(timestamp, LogType::Debug, message, value)
    }

    fn log_entry(&mut self, timestamp: u32, log_type: LogType, message: &'static str, value: u32) {
        let entry = LogEntry {
            timestamp,
            log_type,
            message,
            value,
        };

        if self.buffer.is_full() {
            self.buffer.pop_front();
            self.dropped = self.dropped.saturating_add(1);
        }
        // Cannot fail, a slot was just freed
        let _ = self.buffer.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Entries lost to overflow since the last drain.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.buffer.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.buffer.back()
    }

    /// Hand every entry to `callback`, oldest first, and empty the log.
    pub fn drain(&mut self, mut callback: impl FnMut(&LogEntry)) {
        while let Some(entry) = self.buffer.pop_front() {
            callback(&entry);
        }
        self.dropped = 0;
    }
}

impl<const N: usize> Default for Logger<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// `[GAM] 1234ms phase 2`
impl uDisplay for LogEntry {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        ufmt::uwrite!(
            f,
            "[{}] {}ms {} {}",
            self.log_type.tag(),
            self.timestamp,
            self.message,
            self.value
        )
    }
}
