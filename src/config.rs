// config.rs

use std::time::Duration;

/// MIDI clock resolution: pulses per quarter note.
pub const CLOCK_PPQN: usize = 24;

/// Default rising-edge threshold on the fast/slow average difference.
pub const DEFAULT_THRESHOLD: f32 = 0.2;

/// Default smoothing weight of the fast moving average.
pub const DEFAULT_FAST_WEIGHT: f32 = 0.25;

/// Default smoothing weight of the slow moving average.
pub const DEFAULT_SLOW_WEIGHT: f32 = 0.0625;

/// Pending pulse-period measurements held for the monitor thread. When the
/// monitor falls behind, the oldest measurement is evicted.
pub const TEMPO_QUEUE_CAPACITY: usize = 8;

/// Pending clock events held for the MIDI dispatch thread.
pub const CLOCK_QUEUE_CAPACITY: usize = 256;

/// Monitor thread polling interval.
pub const MONITOR_POLL: Duration = Duration::from_millis(5);

/// MIDI dispatch thread polling interval.
pub const DISPATCH_POLL: Duration = Duration::from_millis(1);

/// Largest CV chunk handed to the converter in one pass. Capture blocks
/// longer than this are split.
pub const MAX_BLOCK_FRAMES: usize = 4096;
