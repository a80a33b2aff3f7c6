use clap::Parser;
use cvsyncrs::cli::{validate_args, validate_device, Args};

#[test]
fn defaults_match_the_recommended_detector_settings() {
    let args = Args::parse_from(["cvsyncrs"]);
    assert_eq!(args.threshold, 0.2);
    assert_eq!(args.fast_weight, 0.25);
    assert_eq!(args.slow_weight, 0.0625);
    assert!(args.midi_out.is_none());
    assert!(args.audio_in.is_none());
    assert!(validate_args(&args).is_ok());
}

#[test]
fn non_positive_threshold_is_rejected() {
    let args = Args::parse_from(["cvsyncrs", "--threshold=-0.5"]);
    assert!(validate_args(&args).is_err());

    let args = Args::parse_from(["cvsyncrs", "--threshold=0"]);
    assert!(validate_args(&args).is_err());
}

#[test]
fn weights_outside_the_unit_interval_are_rejected() {
    let args = Args::parse_from(["cvsyncrs", "--fast-weight=1.5"]);
    assert!(validate_args(&args).is_err());

    let args = Args::parse_from(["cvsyncrs", "--slow-weight=0"]);
    assert!(validate_args(&args).is_err());
}

#[test]
fn substring_match_accepts_partial_port_names() {
    let devices = vec!["Hammerfall DSP HDSP MIDI 1".to_string()];
    assert!(validate_device("HDSP", &devices).is_ok());
}

#[test]
fn unknown_port_error_lists_the_alternatives() {
    let devices = vec!["Port A".to_string(), "Port B".to_string()];
    let error_msg = validate_device("Nope", &devices).unwrap_err();
    assert!(error_msg.contains("Nope"));
    assert!(error_msg.contains("Port A"));
    assert!(error_msg.contains("Port B"));
}
