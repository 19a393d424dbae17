use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Reverse,
}

impl From<Direction> for bond::Direction {
    fn from(value: Direction) -> Self {
        match value {
            Direction::Forward => bond::Direction::Forward,
            Direction::Reverse => bond::Direction::Reverse,
        }
    }
}

impl From<bond::Direction> for Direction {
    fn from(value: bond::Direction) -> Self {
        match value {
            bond::Direction::Forward => Direction::Forward,
            bond::Direction::Reverse => Direction::Reverse,
        }
    }
}
