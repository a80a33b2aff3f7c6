//! Audio engine binding: CV capture via cpal, clock bytes out via midir.
//!
//! The capture callback is the real-time context: it converts the incoming
//! frames to mono `f32` in a pre-allocated scratch buffer, runs the
//! converter, and hands the resulting clock events to a dispatch thread over
//! a bounded lock-free queue. All buffers are reserved before the stream
//! starts; the callback itself never allocates, locks or performs I/O.

use crate::clock::{BlockEvents, CLOCK};
use crate::config::{CLOCK_QUEUE_CAPACITY, DISPATCH_POLL, MAX_BLOCK_FRAMES};
use crate::converter::CvClockConverter;
use crate::midi::{ClockOutput, MidiError};
use crate::scheduler::Scheduler;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, FromSample, Sample, SizedSample, Stream, StreamConfig};
use crossbeam::queue::ArrayQueue;
use log::{error, info};
use std::fmt;
use std::sync::Arc;
use std::thread;

/// Errors raised while bringing the engine up.
#[derive(Debug)]
pub enum EngineError {
    /// No usable audio input device
    NoInputDevice(String),
    /// The device's sample format has no conversion wired up
    UnsupportedFormat(String),
    /// Stream negotiation or startup failed
    Stream(String),
    /// MIDI output failed
    Midi(MidiError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::NoInputDevice(msg) => write!(f, "no audio input device: {}", msg),
            EngineError::UnsupportedFormat(format) => {
                write!(f, "unsupported sample format: {}", format)
            }
            EngineError::Stream(msg) => write!(f, "audio stream error: {}", msg),
            EngineError::Midi(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<cpal::DefaultStreamConfigError> for EngineError {
    fn from(err: cpal::DefaultStreamConfigError) -> Self {
        EngineError::Stream(err.to_string())
    }
}

impl From<cpal::BuildStreamError> for EngineError {
    fn from(err: cpal::BuildStreamError) -> Self {
        EngineError::Stream(err.to_string())
    }
}

impl From<cpal::PlayStreamError> for EngineError {
    fn from(err: cpal::PlayStreamError) -> Self {
        EngineError::Stream(err.to_string())
    }
}

impl From<MidiError> for EngineError {
    fn from(err: MidiError) -> Self {
        EngineError::Midi(err)
    }
}

/// Running CV-to-clock engine. Dropping it stops capture.
pub struct CvClockEngine {
    _stream: Stream,
    sample_rate: u32,
}

impl CvClockEngine {
    /// Opens the capture stream, starts the clock dispatch thread and begins
    /// processing.
    pub fn start<O, S>(
        converter: CvClockConverter,
        output: O,
        input_device: Option<&str>,
        scheduler: &S,
    ) -> Result<Self, EngineError>
    where
        O: ClockOutput + 'static,
        S: Scheduler,
    {
        let host = cpal::default_host();
        let device = find_input_device(&host, input_device)?;
        let supported = device.default_input_config()?;
        let sample_rate = supported.sample_rate().0;
        let channels = usize::from(supported.channels());

        info!(
            "CV input: '{}' @ {} Hz, {} channel(s), {:?}",
            device.name().unwrap_or_default(),
            sample_rate,
            channels,
            supported.sample_format()
        );

        let clock_queue = Arc::new(ArrayQueue::new(CLOCK_QUEUE_CAPACITY));
        spawn_dispatch(scheduler, clock_queue.clone(), output);

        let config = supported.config();
        let stream = match supported.sample_format() {
            cpal::SampleFormat::F32 => {
                build_stream::<f32>(&device, &config, channels, converter, clock_queue)
            }
            cpal::SampleFormat::I16 => {
                build_stream::<i16>(&device, &config, channels, converter, clock_queue)
            }
            cpal::SampleFormat::U16 => {
                build_stream::<u16>(&device, &config, channels, converter, clock_queue)
            }
            other => return Err(EngineError::UnsupportedFormat(format!("{:?}", other))),
        }?;
        stream.play()?;

        Ok(CvClockEngine {
            _stream: stream,
            sample_rate,
        })
    }

    /// Sample rate negotiated with the capture device, in frames per second.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

/// Names of every audio input device on the default host.
pub fn list_input_devices() -> Vec<String> {
    let mut names = Vec::new();

    if let Ok(devices) = cpal::default_host().input_devices() {
        for device in devices {
            if let Ok(name) = device.name() {
                names.push(name);
            }
        }
    }

    names
}

fn find_input_device(host: &cpal::Host, name: Option<&str>) -> Result<Device, EngineError> {
    match name {
        Some(name) => {
            let mut devices = host
                .input_devices()
                .map_err(|err| EngineError::NoInputDevice(err.to_string()))?;
            devices
                .find(|d| d.name().map(|n| n.contains(name)).unwrap_or(false))
                .ok_or_else(|| EngineError::NoInputDevice(name.to_string()))
        }
        None => host
            .default_input_device()
            .ok_or_else(|| EngineError::NoInputDevice("no default input device".to_string())),
    }
}

fn build_stream<T>(
    device: &Device,
    config: &StreamConfig,
    channels: usize,
    mut converter: CvClockConverter,
    clock_queue: Arc<ArrayQueue<u32>>,
) -> Result<Stream, EngineError>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    // Everything the callback touches is reserved here, outside the
    // real-time path.
    let mut scratch = vec![0.0f32; MAX_BLOCK_FRAMES];
    let mut sink = BlockEvents::new();

    let stream = device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            let mut filled = 0;
            for frame in data.chunks(channels) {
                scratch[filled] = f32::from_sample(frame[0]);
                filled += 1;
                if filled == scratch.len() {
                    run_block(&mut converter, &scratch[..filled], &mut sink, &clock_queue);
                    filled = 0;
                }
            }
            if filled > 0 {
                run_block(&mut converter, &scratch[..filled], &mut sink, &clock_queue);
            }
        },
        move |err| error!("CV input stream error: {}", err),
        None,
    )?;

    Ok(stream)
}

#[inline]
fn run_block(
    converter: &mut CvClockConverter,
    cv: &[f32],
    sink: &mut BlockEvents,
    clock_queue: &ArrayQueue<u32>,
) {
    converter.process_block(cv, sink);
    for (offset, bytes) in sink.iter() {
        if bytes.first() == Some(&CLOCK) {
            // Dropping a tick under dispatch overload beats blocking the
            // audio thread.
            let _ = clock_queue.force_push(offset);
        }
    }
}

fn spawn_dispatch<S, O>(scheduler: &S, queue: Arc<ArrayQueue<u32>>, mut output: O)
where
    S: Scheduler,
    O: ClockOutput + 'static,
{
    scheduler.spawn("clock-dispatch", move || {
        info!("MIDI clock dispatch thread started");
        loop {
            drain(&queue, &mut output);
            thread::sleep(DISPATCH_POLL);
        }
    });
}

fn drain<O: ClockOutput>(queue: &ArrayQueue<u32>, output: &mut O) -> usize {
    let mut sent = 0;
    while queue.pop().is_some() {
        if let Err(err) = output.send_clock() {
            error!("Failed to send MIDI clock: {}", err);
        }
        sent += 1;
    }
    sent
}
