use crate::clock::CLOCK;
use crate::midi::{ClockOutput, MidiError, Result};
use log::info;
use midir::{MidiOutput, MidiOutputConnection};

/// MIDI clock output over a midir port connection.
pub struct MidirClockOutput {
    connection: MidiOutputConnection,
}

impl MidirClockOutput {
    /// Connects to the first output port whose name contains `port_name`, or
    /// to the first available port when none is given.
    pub fn new(port_name: Option<&str>) -> Result<Self> {
        let midi_out = MidiOutput::new("cvsyncrs-out")?;
        let ports = midi_out.ports();

        let port = match port_name {
            Some(name) => ports
                .iter()
                .find(|p| midi_out.port_name(p).unwrap_or_default().contains(name))
                .ok_or_else(|| MidiError::DeviceNotFound(name.to_string()))?,
            None => ports.first().ok_or_else(|| {
                MidiError::DeviceNotFound("no MIDI output ports available".to_string())
            })?,
        };

        let name = midi_out.port_name(port).unwrap_or_default();
        let connection = midi_out.connect(port, "cvsyncrs-clock")?;
        info!("Connected MIDI clock output to '{}'", name);

        Ok(MidirClockOutput { connection })
    }
}

impl ClockOutput for MidirClockOutput {
    fn send_clock(&mut self) -> Result<()> {
        self.connection.send(&[CLOCK])?;
        Ok(())
    }
}

/// Names of every MIDI output port currently available.
pub fn list_output_ports() -> Vec<String> {
    let mut ports = Vec::new();

    if let Ok(midi_out) = MidiOutput::new("cvsyncrs-list") {
        for port in midi_out.ports() {
            if let Ok(name) = midi_out.port_name(&port) {
                ports.push(name);
            }
        }
    }

    ports
}
