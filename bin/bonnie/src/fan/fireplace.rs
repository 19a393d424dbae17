use log::debug;

use bond::{Action, Device, DeviceState};

use super::{Dispatch, Error, Features};
use crate::speed::SpeedRange;

/// A fireplace blower fan. Unlike a ceiling fan it has no raw speed
/// integer: the device works in its own percentage values, and only the
/// values enumerated in its command list are valid.
pub struct FireplaceFan<D = bond::Client> {
    device: Device,
    dispatch: D,
    features: Features,
    speeds: Vec<u32>,
    speed_range: SpeedRange,
    power: Option<bool>,
    percentage: Option<u8>,
}

impl<D: Dispatch> FireplaceFan<D> {
    pub fn new(device: Device, dispatch: D) -> FireplaceFan<D> {
        let features = Features::for_fireplace_fan(&device);
        let speeds = device.fp_fan_speeds();
        let speed_range = SpeedRange::new(1, speeds.len() as u32);

        FireplaceFan {
            device,
            dispatch,
            features,
            speeds,
            speed_range,
            power: None,
            percentage: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.device.id
    }

    pub fn name(&self) -> &str {
        &self.device.name
    }

    pub fn supported_features(&self) -> Features {
        self.features
    }

    pub fn speed_count(&self) -> u32 {
        self.speed_range.speed_count()
    }

    pub fn apply_state(&mut self, state: &DeviceState) -> Result<(), Error> {
        self.power = state.fpfan_power;
        self.percentage = None;

        if let Some(value) = state.fpfan_speed {
            if value != 0 {
                self.percentage = Some(self.from_bond_percentage(value)?);
            }
        }

        Ok(())
    }

    pub fn percentage(&self) -> u8 {
        match (self.power, self.percentage) {
            (Some(true), Some(percentage)) => percentage,
            _ => 0,
        }
    }

    /// Maps a platform percentage to the nearest enumerated device value,
    /// rounding up.
    fn to_bond_percentage(&self, percentage: u8) -> Result<u32, Error> {
        let step = self.speed_range.percentage_to_step(percentage);

        let Some(&value) = self.speeds.get(step.saturating_sub(1) as usize) else {
            return Err(Error::NoSpeedSteps(self.id().to_string()));
        };

        let value = value.min(100);
        debug!(
            "converted percentage {} to device value {} for {}",
            percentage,
            value,
            self.id()
        );

        Ok(value)
    }

    fn from_bond_percentage(&self, value: u32) -> Result<u8, Error> {
        match self.speeds.binary_search(&value) {
            Ok(index) => Ok(self.speed_range.step_to_percentage(index as u32 + 1)),
            Err(_) => Err(Error::UnknownSpeedValue {
                device_id: self.id().to_string(),
                value,
            }),
        }
    }

    pub async fn set_percentage(&self, percentage: u8) -> Result<(), Error> {
        if percentage > 100 {
            return Err(Error::InvalidPercentage(percentage));
        }

        if percentage == 0 {
            return self.turn_off().await;
        }

        let value = self.to_bond_percentage(percentage)?;

        self.dispatch
            .dispatch(self.id(), Action::set_fp_fan(value))
            .await?;

        Ok(())
    }

    pub async fn turn_on(&self, percentage: Option<u8>) -> Result<(), Error> {
        match percentage {
            Some(percentage) => self.set_percentage(percentage).await,
            None => {
                self.dispatch
                    .dispatch(self.id(), Action::turn_fp_fan_on())
                    .await?;
                Ok(())
            }
        }
    }

    pub async fn turn_off(&self) -> Result<(), Error> {
        self.dispatch
            .dispatch(self.id(), Action::turn_fp_fan_off())
            .await?;

        Ok(())
    }

    pub async fn set_power_belief(&self, power: bool) -> Result<(), Error> {
        self.dispatch
            .dispatch(
                self.id(),
                Action::set_state_belief("fpfan_power", power as u32),
            )
            .await
            .map_err(|source| Error::Belief {
                call: "set_fpfan_power_belief",
                device_id: self.id().to_string(),
                source,
            })
    }

    pub async fn set_speed_belief(&self, percentage: u8) -> Result<(), Error> {
        if percentage > 100 {
            return Err(Error::InvalidPercentage(percentage));
        }

        if percentage == 0 {
            return self.set_power_belief(false).await;
        }

        self.set_power_belief(true).await?;

        let value = self.to_bond_percentage(percentage)?;

        self.dispatch
            .dispatch(self.id(), Action::set_state_belief("fpfan_speed", value))
            .await
            .map_err(|source| Error::Belief {
                call: "set_fpfan_speed_belief",
                device_id: self.id().to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::fan::tests::{fireplace_device, Recorder};

    fn state(power: u8, speed: Option<u32>) -> DeviceState {
        serde_json::from_value(match speed {
            Some(speed) => serde_json::json!({"fpfan_power": power, "fpfan_speed": speed}),
            None => serde_json::json!({"fpfan_power": power}),
        })
        .unwrap()
    }

    #[test]
    fn test_speed_table_is_sorted_and_distinct() {
        let fan = FireplaceFan::new(fireplace_device(&[100, 33, 66, 33]), Recorder::new());

        assert_eq!(fan.speeds, vec![33, 66, 100]);
        assert_eq!(fan.speed_count(), 3);
    }

    #[tokio::test]
    async fn test_set_percentage_maps_to_device_value() {
        let recorder = Recorder::new();
        let fan = FireplaceFan::new(fireplace_device(&[33, 66, 100]), recorder.clone());

        fan.set_percentage(40).await.unwrap();

        assert_eq!(
            recorder.calls(),
            vec![("6409d2a2".to_string(), Action::set_fp_fan(66))]
        );
    }

    #[tokio::test]
    async fn test_set_percentage_zero_turns_off() {
        let recorder = Recorder::new();
        let fan = FireplaceFan::new(fireplace_device(&[33, 66, 100]), recorder.clone());

        fan.set_percentage(0).await.unwrap();

        assert_eq!(
            recorder.calls(),
            vec![("6409d2a2".to_string(), Action::turn_fp_fan_off())]
        );
    }

    #[tokio::test]
    async fn test_turn_on_without_percentage() {
        let recorder = Recorder::new();
        let fan = FireplaceFan::new(fireplace_device(&[33, 66, 100]), recorder.clone());

        fan.turn_on(None).await.unwrap();

        assert_eq!(
            recorder.calls(),
            vec![("6409d2a2".to_string(), Action::turn_fp_fan_on())]
        );
    }

    #[test]
    fn test_percentage_round_trip() {
        let fan = FireplaceFan::new(fireplace_device(&[25, 50, 75, 100]), Recorder::new());

        for &value in &fan.speeds {
            let percentage = fan.from_bond_percentage(value).unwrap();
            assert_eq!(fan.to_bond_percentage(percentage).unwrap(), value);
        }
    }

    #[test]
    fn test_state_projection() {
        let mut fan = FireplaceFan::new(fireplace_device(&[33, 66, 100]), Recorder::new());

        fan.apply_state(&state(1, Some(66))).unwrap();
        assert_eq!(fan.percentage(), 66);

        fan.apply_state(&state(0, Some(66))).unwrap();
        assert_eq!(fan.percentage(), 0);

        fan.apply_state(&state(1, Some(0))).unwrap();
        assert_eq!(fan.percentage(), 0);

        fan.apply_state(&state(1, None)).unwrap();
        assert_eq!(fan.percentage(), 0);
    }

    #[test]
    fn test_unknown_speed_value_is_an_error() {
        let mut fan = FireplaceFan::new(fireplace_device(&[33, 66, 100]), Recorder::new());

        let err = fan.apply_state(&state(1, Some(42))).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownSpeedValue { value: 42, .. }
        ));
        assert_eq!(fan.percentage(), 0);
    }

    #[tokio::test]
    async fn test_empty_speed_table() {
        let recorder = Recorder::new();
        let fan = FireplaceFan::new(fireplace_device(&[]), recorder.clone());

        assert_eq!(fan.speed_count(), 0);

        let err = fan.set_percentage(50).await.unwrap_err();
        assert!(matches!(err, Error::NoSpeedSteps(_)));
        assert!(recorder.calls().is_empty());
    }

    #[tokio::test]
    async fn test_speed_belief_sequence() {
        let recorder = Recorder::new();
        let fan = FireplaceFan::new(fireplace_device(&[33, 66, 100]), recorder.clone());

        fan.set_speed_belief(40).await.unwrap();

        assert_eq!(
            recorder.calls(),
            vec![
                (
                    "6409d2a2".to_string(),
                    Action::set_state_belief("fpfan_power", 1)
                ),
                (
                    "6409d2a2".to_string(),
                    Action::set_state_belief("fpfan_speed", 66)
                ),
            ]
        );
    }

    #[tokio::test]
    async fn test_speed_belief_zero_only_clears_power() {
        let recorder = Recorder::new();
        let fan = FireplaceFan::new(fireplace_device(&[33, 66, 100]), recorder.clone());

        fan.set_speed_belief(0).await.unwrap();

        assert_eq!(
            recorder.calls(),
            vec![(
                "6409d2a2".to_string(),
                Action::set_state_belief("fpfan_power", 0)
            )]
        );
    }
}
