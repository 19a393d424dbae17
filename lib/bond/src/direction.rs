use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::Deserialize;

/// Fan rotation direction, `1` forward and `-1` reverse on the wire.
/// Any other value the bridge may report is read as forward.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

impl serde::Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Direction::Forward => serializer.serialize_i8(1),
            Direction::Reverse => serializer.serialize_i8(-1),
        }
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i8::deserialize(deserializer)?;

        Ok(if value == -1 {
            Direction::Reverse
        } else {
            Direction::Forward
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        assert_eq!(serde_json::to_string(&Direction::Forward).unwrap(), "1");
        assert_eq!(serde_json::to_string(&Direction::Reverse).unwrap(), "-1");

        let direction: Direction = serde_json::from_str("-1").unwrap();
        assert_eq!(direction, Direction::Reverse);

        let direction: Direction = serde_json::from_str("1").unwrap();
        assert_eq!(direction, Direction::Forward);

        let direction: Direction = serde_json::from_str("0").unwrap();
        assert_eq!(direction, Direction::Forward);
    }
}
