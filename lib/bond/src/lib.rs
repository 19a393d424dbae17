mod action;
pub use action::{Action, ActionKind};

mod bpup;
pub use bpup::{BpupClient, BpupMessage, BPUP_PORT};

mod client;
pub use client::Client;

mod device;
pub use device::{Command, Device};

mod device_type;
pub use device_type::DeviceType;

mod direction;
pub use direction::Direction;

mod error;
pub use error::Error;

mod state;
pub use state::DeviceState;

pub type Result<T> = std::result::Result<T, Error>;
