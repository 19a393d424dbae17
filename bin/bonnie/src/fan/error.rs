use std::error;
use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// Failure on the normal actuation path, passed through as-is.
    Transport(bond::Error),
    /// Failure while overriding the bridge's believed state. Carries the
    /// failing call and the device so diagnostics can attribute it.
    Belief {
        call: &'static str,
        device_id: String,
        source: bond::Error,
    },
    InvalidPreset(String),
    InvalidPercentage(u8),
    /// The bridge reported a speed value that is not in the device's
    /// discovered command list. The capability snapshot is stale.
    UnknownSpeedValue { device_id: String, value: u32 },
    NoSpeedSteps(String),
    Unsupported(&'static str),
}

impl From<bond::Error> for Error {
    fn from(err: bond::Error) -> Self {
        Self::Transport(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "{err}"),
            Self::Belief {
                call,
                device_id,
                source,
            } => write!(
                f,
                "the bridge returned an error calling {call} for {device_id}: {source}"
            ),
            Self::InvalidPreset(name) => write!(f, "invalid preset mode: {name}"),
            Self::InvalidPercentage(value) => {
                write!(f, "percentage {value} is out of range 0..=100")
            }
            Self::UnknownSpeedValue { device_id, value } => write!(
                f,
                "speed value {value} reported for {device_id} is not in its command list"
            ),
            Self::NoSpeedSteps(device_id) => {
                write!(f, "{device_id} does not expose any speed steps")
            }
            Self::Unsupported(command) => write!(f, "unsupported command: {command}"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Transport(err) | Error::Belief { source: err, .. } => Some(err),
            _ => None,
        }
    }
}
