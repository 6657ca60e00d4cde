//! Caller-facing result shapes.
//!
//! Replies are shaped here and handed to the host as plain values: a single
//! [`NodeInfoRow`], a finite [`ConfigRows`] sequence, or a bare count. How a
//! host materializes them (one row per call, all at once) is its own
//! concern.

use crate::protocol::types::{BackendInfo, ConfigItem, WEIGHT_SCALE};

/// One shaped node info result row.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeInfoRow {
    /// Backend hostname
    pub hostname: String,
    /// Backend port
    pub port: u16,
    /// Human-readable status label
    pub status: &'static str,
    /// Load-balancing weight normalized to `[0, 1]`
    pub weight: f64,
}

impl From<BackendInfo> for NodeInfoRow {
    fn from(info: BackendInfo) -> Self {
        Self {
            hostname: info.hostname,
            port: info.port,
            status: info.status.label(),
            weight: info.weight / WEIGHT_SCALE,
        }
    }
}

/// The rows of one pool status reply, in server order.
///
/// A finite, non-restartable sequence: each row is yielded exactly once
/// over the full drain, and an exhausted `ConfigRows` stays exhausted.
#[derive(Debug)]
pub struct ConfigRows {
    inner: std::vec::IntoIter<ConfigItem>,
}

impl ConfigRows {
    pub(crate) fn new(rows: Vec<ConfigItem>) -> Self {
        Self {
            inner: rows.into_iter(),
        }
    }

    /// Number of rows not yet drained.
    pub fn remaining(&self) -> usize {
        self.inner.len()
    }
}

impl Iterator for ConfigRows {
    type Item = ConfigItem;

    fn next(&mut self) -> Option<ConfigItem> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ConfigRows {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::types::BackendStatus;

    #[test]
    fn node_info_row_shaping() {
        let row = NodeInfoRow::from(BackendInfo {
            hostname: "n1".into(),
            port: 5432,
            status: BackendStatus::Up,
            weight: 1_073_741_823.0,
        });
        assert_eq!(row.hostname, "n1");
        assert_eq!(row.port, 5432);
        assert_eq!(row.status, "Connection in use");
        assert!((row.weight - 0.5).abs() < 1e-9);
    }

    #[test]
    fn config_rows_drain_once_in_order() {
        let mut rows = ConfigRows::new(vec![
            ConfigItem {
                name: "a".into(),
                value: "1".into(),
                description: String::new(),
            },
            ConfigItem {
                name: "b".into(),
                value: "2".into(),
                description: String::new(),
            },
        ]);
        assert_eq!(rows.remaining(), 2);
        assert_eq!(rows.next().unwrap().name, "a");
        assert_eq!(rows.next().unwrap().name, "b");
        assert!(rows.next().is_none());
        assert!(rows.next().is_none());
        assert_eq!(rows.remaining(), 0);
    }
}
