use crate::midi::{ClockOutput, Result};

/// Clock output that only counts sends, for tests without MIDI hardware.
#[derive(Debug, Default)]
pub struct MockClockOutput {
    sent: usize,
}

impl MockClockOutput {
    pub fn new() -> Self {
        MockClockOutput { sent: 0 }
    }

    pub fn sent(&self) -> usize {
        self.sent
    }
}

impl ClockOutput for MockClockOutput {
    fn send_clock(&mut self) -> Result<()> {
        self.sent += 1;
        Ok(())
    }
}
