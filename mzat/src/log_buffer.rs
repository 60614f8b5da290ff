use std::collections::VecDeque;
use std::sync::{Arc, RwLock};
use tracing::Level;

/// One tracing event, flattened to what the log viewer renders
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: chrono::DateTime<chrono::Local>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

/// Thread-safe ring buffer holding the most recent log entries for the
/// logs screen. Clones share the same underlying buffer.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    entries: Arc<RwLock<VecDeque<LogEntry>>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Appends an entry, evicting the oldest one once the buffer is full.
    pub fn push(&self, entry: LogEntry) {
        let mut entries = self.entries.write().unwrap();
        if entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Returns a snapshot of all entries, oldest first.
    pub fn get_entries(&self) -> Vec<LogEntry> {
        self.entries.read().unwrap().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: chrono::Local::now(),
            level: Level::INFO,
            target: "test".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn starts_empty() {
        let buffer = LogBuffer::new(10);
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
    }

    #[test]
    fn push_appends_in_order() {
        let buffer = LogBuffer::new(10);
        buffer.push(entry("first"));
        buffer.push(entry("second"));

        let entries = buffer.get_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "first");
        assert_eq!(entries[1].message, "second");
    }

    #[test]
    fn evicts_oldest_at_capacity() {
        let buffer = LogBuffer::new(3);
        for i in 0..5 {
            buffer.push(entry(&format!("entry {}", i)));
        }

        let entries = buffer.get_entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].message, "entry 2");
        assert_eq!(entries[2].message, "entry 4");
    }

    #[test]
    fn clones_share_storage() {
        let buffer = LogBuffer::new(10);
        let clone = buffer.clone();
        buffer.push(entry("shared"));

        assert_eq!(clone.len(), 1);
        assert_eq!(clone.get_entries()[0].message, "shared");
    }
}
