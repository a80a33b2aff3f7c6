//! Console BPM readout, refreshing in place.

use crate::config::MONITOR_POLL;
use crate::tempo::{period_to_bpm, TempoReceiver};
use indicatif::{ProgressBar, ProgressStyle};
use std::thread;

pub fn create_bpm_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{prefix:.bold.dim} {spinner} {wide_msg}")
            .unwrap(),
    );
    pb.set_prefix("Tempo");
    pb
}

/// Converts one pending period measurement, if any.
pub fn next_bpm(tempo: &TempoReceiver, sample_rate: u32) -> Option<f32> {
    tempo.pop().map(|period| period_to_bpm(sample_rate, period))
}

/// Monitor loop: one non-blocking pop per poll, nothing to do when the
/// channel is empty. Not timing-critical.
pub fn run_bpm_monitor(tempo: TempoReceiver, sample_rate: u32) {
    let spinner = create_bpm_spinner();
    loop {
        if let Some(bpm) = next_bpm(&tempo, sample_rate) {
            spinner.set_message(format!("{:.1} BPM", bpm));
            spinner.tick();
        }
        thread::sleep(MONITOR_POLL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tempo::tempo_channel;

    #[test]
    fn spinner_template_is_valid() {
        let spinner = create_bpm_spinner();
        spinner.set_message("120.0 BPM");
        spinner.tick();
    }

    #[test]
    fn next_bpm_converts_pending_measurements() {
        let (tx, rx) = tempo_channel(8);
        assert_eq!(next_bpm(&rx, 48_000), None);
        tx.push(28_800);
        assert_eq!(next_bpm(&rx, 48_000), Some(100.0));
        assert_eq!(next_bpm(&rx, 48_000), None);
    }
}
