// Rolling score aggregation - smooths per-frame scores for stream display

use std::collections::{HashMap, VecDeque};

use crate::models::scores::Metric;

/// Default trailing-window capacity: ~1 second of frames at 30 fps.
pub const DEFAULT_WINDOW: usize = 30;

/// Per-metric FIFO buffers of recent raw scores, owned by one session.
///
/// Buffers are created lazily on first observation and are independent of
/// each other. There is no automatic reset; the owning session clears or
/// drops the aggregator when its stream ends. Values are trusted to be
/// valid scores in [0, 1]; no validation happens here.
pub struct ScoreAggregator {
    buffers: HashMap<Metric, VecDeque<f32>>,
    capacity: usize,
}

impl ScoreAggregator {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_WINDOW)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffers: HashMap::new(),
            capacity,
        }
    }

    /// Append a raw score, evicting the oldest entry once the window is full.
    pub fn observe(&mut self, metric: Metric, value: f32) {
        let buffer = self
            .buffers
            .entry(metric)
            .or_insert_with(|| VecDeque::with_capacity(self.capacity));
        buffer.push_back(value);
        if buffer.len() > self.capacity {
            buffer.pop_front();
        }
    }

    /// Arithmetic mean of the current window, or None if the metric has
    /// never been observed.
    pub fn mean(&self, metric: Metric) -> Option<f32> {
        let buffer = self.buffers.get(&metric)?;
        if buffer.is_empty() {
            return None;
        }
        Some(buffer.iter().sum::<f32>() / buffer.len() as f32)
    }

    /// Number of scores currently buffered for a metric
    pub fn len(&self, metric: Metric) -> usize {
        self.buffers.get(&metric).map_or(0, VecDeque::len)
    }

    /// Drop all buffered scores
    pub fn clear(&mut self) {
        self.buffers.clear();
    }
}

impl Default for ScoreAggregator {
    fn default() -> Self {
        Self::new()
    }
}
