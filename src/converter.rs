//! Real-time glue: one CV block in, clock bytes and tempo measurements out.

use crate::clock::{ClockEmitter, MidiSink};
use crate::dsp::EdgeDetector;
use crate::tempo::TempoSender;

/// Converts a CV pulse train into a 24-ppqn MIDI clock stream, one audio
/// block at a time.
///
/// This is the whole of the real-time path: it scans the block through the
/// edge detector, interleaves scheduled clock emission with edge
/// re-synchronization, and pushes each measured period into the tempo
/// channel. No allocation, locking or I/O happens here.
pub struct CvClockConverter {
    detector: EdgeDetector,
    emitter: ClockEmitter,
    tempo: TempoSender,
}

impl CvClockConverter {
    pub fn new(detector: EdgeDetector, tempo: TempoSender) -> Self {
        CvClockConverter {
            detector,
            emitter: ClockEmitter::new(),
            tempo,
        }
    }

    /// Processes one block of mono CV samples, writing Clock bytes into
    /// `sink` at their exact frame offsets.
    pub fn process_block<S: MidiSink>(&mut self, cv: &[f32], sink: &mut S) {
        sink.clear();

        let mut position: u32 = 0;
        for (frame, &sample) in cv.iter().enumerate() {
            if let Some(period) = self.detector.process_sample(sample) {
                let frame = frame as u32;
                // Ticks still owed from the previous period land before the
                // edge takes over the phase.
                self.emitter.advance(position, frame, sink);
                if period > 0 {
                    self.emitter.sync(frame, period, sink);
                    self.tempo.push(period);
                }
                position = frame;
            }
        }
        self.emitter.advance(position, cv.len() as u32, sink);
    }
}
