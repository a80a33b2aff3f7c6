use clap::Parser;

use crate::config::{DEFAULT_FAST_WEIGHT, DEFAULT_SLOW_WEIGHT, DEFAULT_THRESHOLD};

#[derive(Parser, Debug)]
#[command(author, version, about = "CV pulse train to MIDI clock converter", long_about = None)]
pub struct Args {
    /// List available MIDI output ports and audio input devices
    #[arg(long)]
    pub device_list: bool,

    /// MIDI output port to send clock on (substring match)
    #[arg(long)]
    pub midi_out: Option<String>,

    /// Audio input device carrying the CV pulse train (substring match)
    #[arg(long)]
    pub audio_in: Option<String>,

    /// Rising-edge threshold on the fast/slow average difference
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f32,

    /// Smoothing weight of the fast moving average, in (0, 1]
    #[arg(long, default_value_t = DEFAULT_FAST_WEIGHT)]
    pub fast_weight: f32,

    /// Smoothing weight of the slow moving average, in (0, 1]
    #[arg(long, default_value_t = DEFAULT_SLOW_WEIGHT)]
    pub slow_weight: f32,
}

/// Rejects detector settings that would be programming errors downstream.
/// These are checked once, before any real-time processing begins.
pub fn validate_args(args: &Args) -> Result<(), String> {
    if args.threshold <= 0.0 {
        return Err(format!(
            "Error: threshold must be positive, got {}",
            args.threshold
        ));
    }
    for (name, weight) in [
        ("fast-weight", args.fast_weight),
        ("slow-weight", args.slow_weight),
    ] {
        if !(weight > 0.0 && weight <= 1.0) {
            return Err(format!(
                "Error: {} must lie in (0, 1], got {}",
                name, weight
            ));
        }
    }
    Ok(())
}

pub fn validate_device(device_name: &str, devices: &[String]) -> Result<(), String> {
    if !devices.iter().any(|d| d.contains(device_name)) {
        let mut error_msg = format!(
            "Error: Device '{}' not found in available devices:\n",
            device_name
        );
        for device in devices {
            error_msg.push_str(&format!("  - {}\n", device));
        }
        return Err(error_msg);
    }
    Ok(())
}
