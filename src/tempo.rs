//! Cross-thread tempo reporting.
//!
//! One bounded lock-free queue carries raw pulse periods from the audio
//! callback to the monitor thread, single producer to single consumer. The
//! producer never blocks: when the monitor has not kept up, the oldest
//! unread measurement is evicted.

use crossbeam::queue::ArrayQueue;
use std::sync::Arc;

/// Creates the connected ends of a tempo channel holding at most `capacity`
/// pending measurements.
pub fn tempo_channel(capacity: usize) -> (TempoSender, TempoReceiver) {
    let queue = Arc::new(ArrayQueue::new(capacity));
    (
        TempoSender {
            queue: queue.clone(),
        },
        TempoReceiver { queue },
    )
}

/// Real-time end: one non-blocking push per detected edge.
pub struct TempoSender {
    queue: Arc<ArrayQueue<u64>>,
}

impl TempoSender {
    /// Records a measured period in frames. Never blocks.
    pub fn push(&self, period: u64) {
        let _ = self.queue.force_push(period);
    }
}

/// Monitor end: non-blocking pops on a coarse polling cadence.
pub struct TempoReceiver {
    queue: Arc<ArrayQueue<u64>>,
}

impl TempoReceiver {
    pub fn pop(&self) -> Option<u64> {
        self.queue.pop()
    }
}

/// Converts a pulse period in frames to beats per minute.
pub fn period_to_bpm(sample_rate: u32, period: u64) -> f32 {
    (sample_rate as f32 * 60.0) / period as f32
}
