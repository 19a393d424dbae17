use std::fmt;
use std::str::FromStr;

use serde::de::{value, Error};

#[derive(Debug, PartialEq)]
pub enum Topic {
    Action,
    State(String),
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Topic::Action => write!(f, "bonnie/action"),
            Topic::State(device_id) => write!(f, "bonnie/state/{}", device_id),
        }
    }
}

impl FromStr for Topic {
    type Err = value::Error;

    fn from_str(s: &str) -> std::result::Result<Topic, Self::Err> {
        const ERROR_MSG: &str = "supported topics are bonnie/action and bonnie/state/<device_id>";

        match s {
            "bonnie/action" => Ok(Topic::Action),
            _ => match s.strip_prefix("bonnie/state/") {
                Some(device_id) if !device_id.is_empty() => {
                    Ok(Topic::State(device_id.to_string()))
                }
                _ => Err(value::Error::custom(ERROR_MSG)),
            },
        }
    }
}
