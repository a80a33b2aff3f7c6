//! MIDI clock emission from measured pulse periods.
//!
//! The emitter walks the 24 sub-intervals of the most recently measured
//! period and decides at which frame offsets of each audio block a Clock
//! byte is due. Everything here runs on the audio thread: no allocation, no
//! locks, no I/O.

use crate::config::CLOCK_PPQN;
use crate::segmentation::FairSegmentation;

/// MIDI System Real-Time Clock, sent 24 times per quarter note.
pub const CLOCK: u8 = 0xF8;

/// Segmentation of one pulse period into the 24 clock sub-intervals.
pub type ClockSegmentation = FairSegmentation<CLOCK_PPQN>;

/// Most MIDI events a single block can carry.
pub const MAX_BLOCK_EVENTS: usize = 256;

const MAX_EVENT_BYTES: usize = 4;

/// Write-only view of one audio block's MIDI output buffer.
///
/// Mirrors the event-reservation interface of an audio engine's MIDI port:
/// the buffer is cleared once per block, then byte spans are reserved at
/// frame offsets within the block. Implementations must not allocate in
/// `reserve`.
pub trait MidiSink {
    /// Discards any MIDI content carried over from a previous block.
    fn clear(&mut self);

    /// Reserves `len` bytes at `offset` frames into the block.
    ///
    /// Returns `None` when the block buffer cannot take another event.
    fn reserve(&mut self, offset: u32, len: usize) -> Option<&mut [u8]>;
}

/// Fixed-capacity MIDI event buffer for one block.
///
/// Backs both the live engine bridge and the tests; all storage is inline so
/// a reservation never touches the allocator.
pub struct BlockEvents {
    offsets: [u32; MAX_BLOCK_EVENTS],
    lengths: [u8; MAX_BLOCK_EVENTS],
    bytes: [[u8; MAX_EVENT_BYTES]; MAX_BLOCK_EVENTS],
    count: usize,
}

impl BlockEvents {
    pub fn new() -> Self {
        BlockEvents {
            offsets: [0; MAX_BLOCK_EVENTS],
            lengths: [0; MAX_BLOCK_EVENTS],
            bytes: [[0; MAX_EVENT_BYTES]; MAX_BLOCK_EVENTS],
            count: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterates the reserved events as `(frame offset, bytes)`.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[u8])> {
        (0..self.count).map(|i| (self.offsets[i], &self.bytes[i][..self.lengths[i] as usize]))
    }
}

impl Default for BlockEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl MidiSink for BlockEvents {
    fn clear(&mut self) {
        self.count = 0;
    }

    fn reserve(&mut self, offset: u32, len: usize) -> Option<&mut [u8]> {
        if len > MAX_EVENT_BYTES || self.count == MAX_BLOCK_EVENTS {
            return None;
        }
        let slot = self.count;
        self.count += 1;
        self.offsets[slot] = offset;
        self.lengths[slot] = len as u8;
        Some(&mut self.bytes[slot][..len])
    }
}

enum EmitterState {
    /// No pulse period established yet; nothing to emit.
    Idle,
    /// Walking the sub-intervals of the most recent period.
    Tracking {
        segmentation: ClockSegmentation,
        /// Index of the next sub-interval boundary, `0..=CLOCK_PPQN`.
        pulse: usize,
        /// Frames left until that boundary, relative to the current position.
        frames_until_next: u64,
    },
}

/// Decides, per audio block, at which frame offsets a Clock byte is due.
///
/// A detected edge resets the phase: the edge frame carries sub-interval 0
/// and the segmentation is rebuilt from the newly measured period, so timing
/// error never outlives one pulse period. Once all 24 sub-intervals of a
/// period have been emitted with no new edge, emission pauses rather than
/// fabricate a clock without a physical pulse.
pub struct ClockEmitter {
    state: EmitterState,
}

impl ClockEmitter {
    pub fn new() -> Self {
        ClockEmitter {
            state: EmitterState::Idle,
        }
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.state, EmitterState::Tracking { .. })
    }

    /// Re-synchronizes to an edge at `offset` with a freshly measured
    /// `period`, emitting sub-interval 0 at the edge frame itself.
    pub fn sync<S: MidiSink>(&mut self, offset: u32, period: u64, sink: &mut S) {
        let segmentation = ClockSegmentation::new(period);
        write_clock(sink, offset);
        // Sub-intervals shorter than a frame are stretched to one frame, so
        // a block never carries two Clock bytes at the same offset.
        let frames_until_next = segmentation.length(0).max(1);
        self.state = EmitterState::Tracking {
            segmentation,
            pulse: 1,
            frames_until_next,
        };
    }

    /// Emits every sub-interval boundary due in `[from, to)` and leaves the
    /// frame countdown relative to `to`.
    pub fn advance<S: MidiSink>(&mut self, from: u32, to: u32, sink: &mut S) {
        let EmitterState::Tracking {
            segmentation,
            pulse,
            frames_until_next,
        } = &mut self.state
        else {
            return;
        };

        let to = u64::from(to);
        let mut position = u64::from(from);
        while *pulse < CLOCK_PPQN {
            let due = position + *frames_until_next;
            if due >= to {
                *frames_until_next = due - to;
                return;
            }
            write_clock(sink, due as u32);
            *frames_until_next = segmentation.length(*pulse).max(1);
            *pulse += 1;
            position = due;
        }
    }
}

impl Default for ClockEmitter {
    fn default() -> Self {
        Self::new()
    }
}

fn write_clock<S: MidiSink>(sink: &mut S, offset: u32) {
    if let Some(span) = sink.reserve(offset, 1) {
        span[0] = CLOCK;
    }
}
