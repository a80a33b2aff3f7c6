use clap::Parser;
use cvsyncrs::{
    cli::{validate_args, validate_device, Args},
    config::TEMPO_QUEUE_CAPACITY,
    converter::CvClockConverter,
    dsp::EdgeDetector,
    engine::{self, CvClockEngine},
    logging,
    midi::{self, DefaultClockOutput},
    scheduler::{Scheduler, ThreadScheduler},
    tempo::tempo_channel,
    ui,
};
use dialoguer::{console, theme::ColorfulTheme, Select};
use std::{thread, time::Duration};

fn main() {
    initialize_logging();
    let args = Args::parse();

    if args.device_list {
        list_available_devices();
        return;
    }

    if let Err(error_msg) = validate_args(&args) {
        log::error!("{}", error_msg);
        eprintln!("{}", error_msg);
        std::process::exit(1);
    }

    let midi_port = match resolve_midi_port(&args) {
        Ok(port) => port,
        Err(error_msg) => {
            log::error!("{}", error_msg);
            eprintln!("{}", error_msg);
            std::process::exit(1);
        }
    };

    let output = match DefaultClockOutput::new(midi_port.as_deref()) {
        Ok(output) => output,
        Err(err) => {
            let error_msg = format!("Error connecting to MIDI output: {}", err);
            log::error!("{}", error_msg);
            eprintln!("{}", error_msg);
            std::process::exit(1);
        }
    };

    let (tempo_tx, tempo_rx) = tempo_channel(TEMPO_QUEUE_CAPACITY);
    let detector = EdgeDetector::with_weights(args.threshold, args.fast_weight, args.slow_weight);
    let converter = CvClockConverter::new(detector, tempo_tx);

    let scheduler = ThreadScheduler::new();
    let engine = match CvClockEngine::start(converter, output, args.audio_in.as_deref(), &scheduler)
    {
        Ok(engine) => engine,
        Err(err) => {
            let error_msg = format!("Error starting audio engine: {}", err);
            log::error!("{}", error_msg);
            eprintln!("{}", error_msg);
            std::process::exit(1);
        }
    };

    let sample_rate = engine.sample_rate();
    scheduler.spawn("bpm-monitor", move || {
        ui::run_bpm_monitor(tempo_rx, sample_rate);
    });

    run_application_loop();
}

fn initialize_logging() {
    logging::init_logger().expect("Logger initialization failed");
    log::info!("cvsyncrs starting");
}

fn list_available_devices() {
    println!("Available MIDI output ports:");
    for port in midi::list_output_ports() {
        println!("  - {}", port);
    }
    println!("Available audio input devices:");
    for device in engine::list_input_devices() {
        println!("  - {}", device);
    }
}

/// Resolves the MIDI output port name: `--midi-out` when given, otherwise an
/// interactive pick when several ports exist and a terminal is attached.
fn resolve_midi_port(args: &Args) -> Result<Option<String>, String> {
    let ports = midi::list_output_ports();

    if let Some(name) = &args.midi_out {
        validate_device(name, &ports)?;
        return Ok(Some(name.clone()));
    }

    if ports.is_empty() {
        return Err("Error: no MIDI output ports available".to_string());
    }
    if ports.len() == 1 || !console::user_attended() {
        log::info!("Using MIDI output port '{}'", ports[0]);
        return Ok(Some(ports[0].clone()));
    }

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select a MIDI output port")
        .items(&ports)
        .default(0)
        .interact()
        .map_err(|err| format!("Device selection failed: {}", err))?;
    Ok(Some(ports[selection].clone()))
}

fn run_application_loop() {
    log::info!("Engine running. Press Ctrl+C to exit...");
    println!("Press Ctrl+C to exit...");
    loop {
        thread::sleep(Duration::from_secs(1));
    }
}
