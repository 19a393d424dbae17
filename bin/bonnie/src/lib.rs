mod action;
pub use action::{Action, ActionType};

mod direction;
pub use direction::Direction;

mod error;
pub use error::Error;

pub mod fan;
pub use fan::{discover_fans, Fan, FanKind, FireplaceFan};

pub mod speed;
pub use speed::SpeedRange;

mod state_payload;
pub use state_payload::StatePayload;

mod storage;
pub use storage::Storage;

mod topic;
pub use topic::Topic;

mod update_state;
pub use update_state::{perform_action, prepare_state};

pub type ErasedError = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T> = std::result::Result<T, ErasedError>;
