//! SCPI command helpers for Agilent/Keysight oscilloscopes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{InstrumentError, InstrumentResult};

/// Line-oriented SCPI transport provided by the instrument driver.
pub trait ScpiTransport {
    /// Sends a command that produces no reply.
    fn write(&mut self, command: &str) -> InstrumentResult<()>;

    /// Sends a query and returns the raw reply.
    fn ask(&mut self, command: &str) -> InstrumentResult<String>;
}

/// Marker axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Horizontal (time) axis.
    X,
    /// Vertical axis.
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::Y => write!(f, "Y"),
        }
    }
}

/// Trigger sweep mode (`:TRIGger:SWEep`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerSweep {
    /// Free-run when no trigger occurs.
    Auto,
    /// Acquire only on trigger.
    Normal,
}

impl fmt::Display for TriggerSweep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "AUTO"),
            Self::Normal => write!(f, "NORMal"),
        }
    }
}

/// Acquisition control commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunControl {
    /// Continuous acquisition.
    Run,
    /// Stop acquiring.
    Stop,
    /// Single acquisition.
    Single,
}

impl fmt::Display for RunControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Run => write!(f, "RUN"),
            Self::Stop => write!(f, "STOP"),
            Self::Single => write!(f, "SINGle"),
        }
    }
}

/// Convenience commands over an oscilloscope's SCPI transport.
#[derive(Debug)]
pub struct Scope<T> {
    transport: T,
    marker_unit: String,
}

impl<T: ScpiTransport> Scope<T> {
    /// Wraps a transport. Marker positions default to seconds.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            marker_unit: "s".to_string(),
        }
    }

    /// Sets the unit appended by [`Scope::set_marker_position`].
    #[must_use]
    pub fn with_marker_unit(mut self, unit: impl Into<String>) -> Self {
        self.marker_unit = unit.into();
        self
    }

    /// Borrows the wrapped transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutably borrows the wrapped transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Sets a channel's label.
    pub fn set_channel_label(&mut self, channel: u8, label: &str) -> InstrumentResult<()> {
        check_label(label)?;
        self.write(&format!(":CHANnel{channel}:LABel \"{label}\""))
    }

    /// Sets the labels of channels 1 to 4 in one command.
    pub fn set_channel_labels(&mut self, labels: [&str; 4]) -> InstrumentResult<()> {
        for label in labels {
            check_label(label)?;
        }
        let command = labels
            .iter()
            .enumerate()
            .map(|(i, label)| format!(":CHAN{}:LABel \"{label}\"", i + 1))
            .collect::<Vec<_>>()
            .join(";");
        self.write(&command)
    }

    /// Enables a measurement (e.g. `"VMAX"`) on a channel.
    pub fn set_channel_measurement(&mut self, channel: u8, kind: &str) -> InstrumentResult<()> {
        check_mnemonic(kind)?;
        self.write(&format!(":MEAS:{kind} CHANnel{channel}"))
    }

    /// Queries a measurement (e.g. `"VMAX"`) on a channel.
    pub fn get_channel_measurement(&mut self, channel: u8, kind: &str) -> InstrumentResult<f64> {
        check_mnemonic(kind)?;
        self.ask_f64(&format!(":MEASure:{kind}? CHANnel{channel}"))
    }

    /// Sets the channel tracked by a marker pair.
    pub fn set_marker_source(&mut self, cursor: u8, source: u8) -> InstrumentResult<()> {
        self.write(&format!(":MARKer:X{cursor}Y{cursor}source CHANnel{source}"))
    }

    /// Moves a marker, in the configured unit.
    pub fn set_marker_position(
        &mut self,
        cursor: u8,
        axis: Axis,
        position: f64,
    ) -> InstrumentResult<()> {
        let unit = self.marker_unit.clone();
        self.set_marker_position_in(cursor, axis, position, &unit)
    }

    /// Moves a marker, in an explicit unit.
    pub fn set_marker_position_in(
        &mut self,
        cursor: u8,
        axis: Axis,
        position: f64,
        unit: &str,
    ) -> InstrumentResult<()> {
        if !position.is_finite() {
            return Err(InstrumentError::invalid_argument(format!(
                "marker position {position} is not finite"
            )));
        }
        self.write(&format!(":MARKer:{axis}{cursor}Position {position} {unit}"))
    }

    /// Reads a marker's position.
    pub fn get_marker_position(&mut self, cursor: u8, axis: Axis) -> InstrumentResult<f64> {
        self.ask_f64(&format!(":MARKer:{axis}{cursor}Position?"))
    }

    /// Reads the distance between the two markers on an axis.
    pub fn get_marker_delta(&mut self, axis: Axis) -> InstrumentResult<f64> {
        self.ask_f64(&format!(":MARKer:{axis}DELta?"))
    }

    /// Shows or hides channel labels.
    pub fn display_labels(&mut self, on: bool) -> InstrumentResult<()> {
        let status = if on { "ON" } else { "OFF" };
        self.write(&format!(":DISPLAY:LABEL {status}"))
    }

    /// Sets the trigger sweep mode.
    pub fn set_trigger_mode(&mut self, mode: TriggerSweep) -> InstrumentResult<()> {
        self.write(&format!(":TRIGger:SWEep {mode}"))
    }

    /// Runs, stops or single-shots acquisition.
    pub fn set_trigger_control(&mut self, control: RunControl) -> InstrumentResult<()> {
        self.write(&format!(":{control}"))
    }

    /// Clears the status registers, including the trigger event.
    pub fn clear_trigger(&mut self) -> InstrumentResult<()> {
        self.write("*CLS")
    }

    /// Returns true if the scope has triggered since the last read.
    pub fn get_triggered(&mut self) -> InstrumentResult<bool> {
        let command = ":TER?";
        let reply = self.transport.ask(command)?;
        reply
            .trim()
            .parse::<i64>()
            .map(|v| v != 0)
            .map_err(|_| InstrumentError::invalid_response(command, reply))
    }

    fn write(&mut self, command: &str) -> InstrumentResult<()> {
        tracing::debug!(command, "SCPI write");
        self.transport.write(command)
    }

    fn ask_f64(&mut self, command: &str) -> InstrumentResult<f64> {
        let reply = self.transport.ask(command)?;
        tracing::debug!(command, reply = reply.trim(), "SCPI query");
        reply
            .trim()
            .parse::<f64>()
            .map_err(|_| InstrumentError::invalid_response(command, reply))
    }
}

fn check_label(label: &str) -> InstrumentResult<()> {
    if label.contains('"') {
        return Err(InstrumentError::invalid_argument(format!(
            "channel label {label:?} contains a double quote"
        )));
    }
    Ok(())
}

fn check_mnemonic(kind: &str) -> InstrumentResult<()> {
    if kind.is_empty() || !kind.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(InstrumentError::invalid_argument(format!(
            "measurement {kind:?} is not a SCPI mnemonic"
        )));
    }
    Ok(())
}
