use cvsyncrs::segmentation::FairSegmentation;

type ClockSeg = FairSegmentation<24>;

#[test]
fn lengths_always_sum_to_the_period() {
    for period in [0u64, 1, 5, 23, 24, 25, 47, 48, 479, 480, 481, 961, 48_000, 1_000_003] {
        let seg = ClockSeg::new(period);
        let total: u64 = (0..seg.divisions()).map(|i| seg.length(i)).sum();
        assert_eq!(total, period, "period {}", period);
    }
}

#[test]
fn long_interval_count_equals_the_remainder() {
    for period in 0u64..=2000 {
        let seg = ClockSeg::new(period);
        let base = period / 24;
        let long = (0..24).filter(|&i| seg.length(i) == base + 1).count() as u64;
        assert_eq!(long, period % 24, "period {}", period);
        assert!(
            (0..24).all(|i| seg.length(i) == base || seg.length(i) == base + 1),
            "period {}: lengths may differ by at most one frame",
            period
        );
    }
}

#[test]
fn single_extra_frame_lands_on_index_zero() {
    let seg = ClockSeg::new(25);
    assert_eq!(seg.length(0), 2);
    for i in 1..24 {
        assert_eq!(seg.length(i), 1);
    }
}

#[test]
fn single_short_interval_lands_on_the_last_index() {
    let seg = ClockSeg::new(47);
    for i in 0..23 {
        assert_eq!(seg.length(i), 2);
    }
    assert_eq!(seg.length(23), 1);
}

#[test]
fn long_intervals_spread_rather_than_cluster() {
    // 36 = 24 + 12: the twelve long sub-intervals alternate with the short
    let seg = ClockSeg::new(36);
    for i in 0..24 {
        let expected = if i % 2 == 0 { 2 } else { 1 };
        assert_eq!(seg.length(i), expected, "index {}", i);
    }
}
