use cvsyncrs::clock::{BlockEvents, CLOCK};
use cvsyncrs::converter::CvClockConverter;
use cvsyncrs::dsp::EdgeDetector;
use cvsyncrs::tempo::tempo_channel;

const PULSE_WIDTH: usize = 4;

/// Rectangular CV pulses at the given start frames. With the default
/// weights and threshold, the detector fires on the second sample of each
/// pulse, so edge spacing equals pulse spacing.
fn pulse_train(starts: &[u64], len: usize) -> Vec<f32> {
    let mut samples = vec![0.0f32; len];
    for &start in starts {
        for i in 0..PULSE_WIDTH {
            let at = start as usize + i;
            if at < len {
                samples[at] = 1.0;
            }
        }
    }
    samples
}

/// Feeds `samples` through a fresh converter in `block`-sized chunks and
/// returns the emitted clock offsets (absolute frames) and the measured
/// periods, in order.
fn run_blocks(samples: &[f32], block: usize) -> (Vec<u64>, Vec<u64>) {
    let (tx, rx) = tempo_channel(8);
    let mut converter = CvClockConverter::new(EdgeDetector::new(0.2), tx);
    let mut sink = BlockEvents::new();
    let mut clocks = Vec::new();
    let mut periods = Vec::new();

    let mut base = 0u64;
    for chunk in samples.chunks(block) {
        converter.process_block(chunk, &mut sink);
        for (offset, bytes) in sink.iter() {
            assert_eq!(bytes, [CLOCK]);
            clocks.push(base + u64::from(offset));
        }
        while let Some(period) = rx.pop() {
            periods.push(period);
        }
        base += chunk.len() as u64;
    }
    (clocks, periods)
}

#[test]
fn steady_train_emits_24_ticks_per_period_with_zero_drift() {
    // 48 kHz worth of numbers: pulses every 480 frames, 1000 full periods.
    let starts: Vec<u64> = (0..=1000).map(|i| 1000 + 480 * i).collect();
    let samples = pulse_train(&starts, 482_000);
    let (clocks, periods) = run_blocks(&samples, 64);

    // The first edge measures frames-since-start; every later one measures
    // exactly 480.
    assert_eq!(periods.len(), 1001);
    assert_eq!(periods[0], 1001);
    assert!(periods[1..].iter().all(|&p| p == 480));

    // From the second edge on, the clock sits on an exact 20-frame grid:
    // no cumulative drift over 1000 periods.
    let second_edge = 1001 + 480;
    let grid: Vec<u64> = clocks.into_iter().filter(|&c| c >= second_edge).collect();
    assert_eq!(grid.len(), 1000 * 24);
    for (k, &tick) in grid.iter().enumerate() {
        assert_eq!(tick, second_edge + 20 * k as u64);
    }
}

#[test]
fn emission_is_independent_of_the_block_size() {
    let starts: Vec<u64> = (0..=20).map(|i| 1000 + 480 * i).collect();
    let samples = pulse_train(&starts, 11_500);

    let (reference, reference_periods) = run_blocks(&samples, 64);
    for block in [1usize, 17, 480, 1024] {
        let (clocks, periods) = run_blocks(&samples, block);
        assert_eq!(clocks, reference, "block size {}", block);
        assert_eq!(periods, reference_periods, "block size {}", block);
    }
}

#[test]
fn a_single_edge_after_a_long_gap_resynchronizes_cleanly() {
    let samples = pulse_train(&[2000, 50_000, 50_480, 50_960], 52_000);
    let (clocks, periods) = run_blocks(&samples, 64);

    assert_eq!(periods, vec![2001, 48_000, 480, 480]);

    // The stale first period (24 ticks over ~2001 frames) is exhausted long
    // before the gap ends; nothing may be emitted while waiting.
    assert!(
        clocks.iter().all(|&c| !(4000..50_001).contains(&c)),
        "clock stalled during the gap"
    );

    // The edge ending the gap restarts at sub-interval 0 with no residue
    // from the stale period: one tick at the edge itself, none before the
    // next edge (its period spans the whole gap).
    let after_gap: Vec<u64> = clocks
        .iter()
        .copied()
        .filter(|&c| (50_001..50_481).contains(&c))
        .collect();
    assert_eq!(after_gap, vec![50_001]);

    // The following 480-frame period plays out as a clean 20-frame grid.
    let settled: Vec<u64> = clocks
        .iter()
        .copied()
        .filter(|&c| (50_481..50_961).contains(&c))
        .collect();
    let expected: Vec<u64> = (0..24).map(|k| 50_481 + 20 * k).collect();
    assert_eq!(settled, expected);
}

#[test]
fn periods_shorter_than_24_frames_emit_one_tick_per_frame() {
    // Pulses 12 frames apart. At this density the slow average keeps some
    // baseline between pulses, so the third crossing needs one extra sample:
    // edges land at 113 and 126, measuring periods of 12 and 13 frames.
    let samples = pulse_train(&[100, 112, 124], 300);
    let (clocks, periods) = run_blocks(&samples, 64);

    assert_eq!(periods, vec![101, 12, 13]);

    // A 12-frame period has zero-length sub-intervals; they take the next
    // frame instead of doubling up, so the edge at 126 cuts the walk short.
    let first: Vec<u64> = clocks
        .iter()
        .copied()
        .filter(|&c| (113..126).contains(&c))
        .collect();
    assert_eq!(first, (113..126).collect::<Vec<u64>>());

    // The last period runs all 24 ticks on consecutive frames.
    let second: Vec<u64> = clocks.iter().copied().filter(|&c| c >= 126).collect();
    assert_eq!(second, (126..150).collect::<Vec<u64>>());

    // At most one message per frame offset, in order.
    assert!(clocks.windows(2).all(|pair| pair[0] < pair[1]));
}
