mod error;
pub use error::Error;

mod fireplace;
pub use fireplace::FireplaceFan;

use std::collections::HashMap;

use async_trait::async_trait;
use log::{debug, info};

use bond::{Action, Device, DeviceState};

use crate::speed::SpeedRange;
use crate::{ActionType, Direction, StatePayload};

pub const PRESET_MODE_BREEZE: &str = "breeze";

const DEFAULT_MAX_SPEED: u32 = 3;

/// Sends one named action to the bridge for a device. The production
/// implementation is `bond::Client`; tests record calls instead.
#[async_trait]
pub trait Dispatch: Send + Sync {
    async fn dispatch(&self, device_id: &str, action: Action) -> Result<(), bond::Error>;
}

#[async_trait]
impl Dispatch for bond::Client {
    async fn dispatch(&self, device_id: &str, action: Action) -> Result<(), bond::Error> {
        self.action(device_id, action).await
    }
}

/// Feature bitmask computed once at construction from the capability
/// descriptor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Features(u8);

impl Features {
    pub const SET_SPEED: Features = Features(1);
    pub const DIRECTION: Features = Features(1 << 1);
    pub const PRESET: Features = Features(1 << 2);

    pub const fn contains(&self, other: Features) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn with(self, other: Features) -> Features {
        Features(self.0 | other.0)
    }

    fn for_fan(device: &Device) -> Features {
        let mut features = Features::default();

        if device.supports_speed() {
            features = features.with(Features::SET_SPEED);
        }
        if device.supports_direction() {
            features = features.with(Features::DIRECTION);
        }
        if device.supports_breeze() {
            features = features.with(Features::PRESET);
        }

        features
    }

    fn for_fireplace_fan(device: &Device) -> Features {
        if device.supports_fp_fan() {
            Features::SET_SPEED
        } else {
            Features::default()
        }
    }
}

/// A fan with continuous-style speed control: the device reports a raw
/// integer speed in `1..=max_speed`.
pub struct Fan<D = bond::Client> {
    device: Device,
    dispatch: D,
    features: Features,
    speed_range: SpeedRange,
    power: Option<bool>,
    speed: Option<u32>,
    direction: Option<Direction>,
    preset_mode: Option<&'static str>,
}

impl<D: Dispatch> Fan<D> {
    pub fn new(device: Device, dispatch: D) -> Fan<D> {
        let features = Features::for_fan(&device);
        let speed_range = SpeedRange::new(1, device.max_speed.unwrap_or(DEFAULT_MAX_SPEED));

        Fan {
            device,
            dispatch,
            features,
            speed_range,
            power: None,
            speed: None,
            direction: None,
            preset_mode: None,
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

    pub fn apply_state(&mut self, state: &DeviceState) {
        self.power = state.power;
        self.speed = state.speed;
        self.direction = state.direction.map(Direction::from);
        self.preset_mode = match state.breeze.first() {
            Some(&mode) if mode != 0 => Some(PRESET_MODE_BREEZE),
            _ => None,
        };
    }

    /// Current speed as a percentage. Zero whenever the device is off or
    /// reports no speed, even if a stale speed value remains in the
    /// snapshot.
    pub fn percentage(&self) -> u8 {
        match (self.power, self.speed) {
            (Some(true), Some(speed)) if speed > 0 => self.speed_range.step_to_percentage(speed),
            _ => 0,
        }
    }

    pub fn current_direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn preset_mode(&self) -> Option<&'static str> {
        self.preset_mode
    }

    pub async fn set_percentage(&self, percentage: u8) -> Result<(), Error> {
        if percentage > 100 {
            return Err(Error::InvalidPercentage(percentage));
        }

        if percentage == 0 {
            return self.turn_off().await;
        }

        let speed = self.speed_range.percentage_to_step(percentage);
        debug!(
            "converted percentage {} to speed {} for {}",
            percentage,
            speed,
            self.id()
        );

        self.dispatch
            .dispatch(self.id(), Action::set_speed(speed))
            .await?;

        Ok(())
    }

    pub async fn turn_on(
        &self,
        percentage: Option<u8>,
        preset_mode: Option<&str>,
    ) -> Result<(), Error> {
        if let Some(preset_mode) = preset_mode {
            self.set_preset_mode(preset_mode).await
        } else if let Some(percentage) = percentage {
            self.set_percentage(percentage).await
        } else {
            self.dispatch.dispatch(self.id(), Action::turn_on()).await?;
            Ok(())
        }
    }

    /// Preset teardown precedes power-off, so turning off an active
    /// breeze issues exactly two actions in that order.
    pub async fn turn_off(&self) -> Result<(), Error> {
        if self.preset_mode == Some(PRESET_MODE_BREEZE) {
            self.dispatch
                .dispatch(self.id(), Action::breeze_off())
                .await?;
        }

        self.dispatch
            .dispatch(self.id(), Action::turn_off())
            .await?;

        Ok(())
    }

    pub async fn set_preset_mode(&self, preset_mode: &str) -> Result<(), Error> {
        if preset_mode != PRESET_MODE_BREEZE || !self.device.supports_breeze() {
            return Err(Error::InvalidPreset(preset_mode.to_string()));
        }

        self.dispatch
            .dispatch(self.id(), Action::breeze_on())
            .await?;

        Ok(())
    }

    pub async fn set_direction(&self, direction: Direction) -> Result<(), Error> {
        self.dispatch
            .dispatch(self.id(), Action::set_direction(direction.into()))
            .await?;

        Ok(())
    }

    pub async fn set_power_belief(&self, power: bool) -> Result<(), Error> {
        self.dispatch
            .dispatch(self.id(), Action::set_power_state_belief(power))
            .await
            .map_err(|source| Error::Belief {
                call: "set_power_state_belief",
                device_id: self.id().to_string(),
                source,
            })
    }

    pub async fn set_speed_belief(&self, percentage: u8) -> Result<(), Error> {
        if percentage > 100 {
            return Err(Error::InvalidPercentage(percentage));
        }

        debug!(
            "set_speed_belief called with percentage {} for {}",
            percentage,
            self.id()
        );

        if percentage == 0 {
            return self.set_power_belief(false).await;
        }

        self.set_power_belief(true).await?;

        let speed = self.speed_range.percentage_to_step(percentage);

        self.dispatch
            .dispatch(self.id(), Action::set_speed_belief(speed))
            .await
            .map_err(|source| Error::Belief {
                call: "set_speed_belief",
                device_id: self.id().to_string(),
                source,
            })
    }
}

/// The two adapter shapes behind one registry entry.
pub enum FanKind<D = bond::Client> {
    Ceiling(Fan<D>),
    Fireplace(FireplaceFan<D>),
}

impl<D: Dispatch> FanKind<D> {
    pub fn id(&self) -> &str {
        match self {
            FanKind::Ceiling(fan) => fan.id(),
            FanKind::Fireplace(fan) => fan.id(),
        }
    }

    pub fn apply_state(&mut self, state: &DeviceState) -> Result<(), Error> {
        match self {
            FanKind::Ceiling(fan) => {
                fan.apply_state(state);
                Ok(())
            }
            FanKind::Fireplace(fan) => fan.apply_state(state),
        }
    }

    pub fn state_payload(&self) -> StatePayload {
        match self {
            FanKind::Ceiling(fan) => StatePayload {
                device_id: fan.id().to_string(),
                percentage: fan.percentage(),
                speed_count: fan.speed_count(),
                direction: fan.current_direction(),
                preset_mode: fan.preset_mode().map(str::to_string),
            },
            FanKind::Fireplace(fan) => StatePayload {
                device_id: fan.id().to_string(),
                percentage: fan.percentage(),
                speed_count: fan.speed_count(),
                direction: None,
                preset_mode: None,
            },
        }
    }

    pub async fn handle(&self, action: &ActionType) -> Result<(), Error> {
        match (self, action) {
            (
                FanKind::Ceiling(fan),
                ActionType::TurnOn {
                    percentage,
                    preset_mode,
                },
            ) => fan.turn_on(*percentage, preset_mode.as_deref()).await,
            (FanKind::Ceiling(fan), ActionType::TurnOff) => fan.turn_off().await,
            (FanKind::Ceiling(fan), ActionType::SetPercentage(percentage)) => {
                fan.set_percentage(*percentage).await
            }
            (FanKind::Ceiling(fan), ActionType::SetDirection(direction)) => {
                fan.set_direction(*direction).await
            }
            (FanKind::Ceiling(fan), ActionType::SetPresetMode(name)) => {
                fan.set_preset_mode(name).await
            }
            (FanKind::Ceiling(fan), ActionType::SetSpeedBelief(percentage)) => {
                fan.set_speed_belief(*percentage).await
            }
            (
                FanKind::Fireplace(fan),
                ActionType::TurnOn {
                    percentage,
                    preset_mode,
                },
            ) => match preset_mode {
                Some(name) => Err(Error::InvalidPreset(name.clone())),
                None => fan.turn_on(*percentage).await,
            },
            (FanKind::Fireplace(fan), ActionType::TurnOff) => fan.turn_off().await,
            (FanKind::Fireplace(fan), ActionType::SetPercentage(percentage)) => {
                fan.set_percentage(*percentage).await
            }
            (FanKind::Fireplace(fan), ActionType::SetSpeedBelief(percentage)) => {
                fan.set_speed_belief(*percentage).await
            }
            (FanKind::Fireplace(_), ActionType::SetDirection(_)) => {
                Err(Error::Unsupported("set_direction"))
            }
            (FanKind::Fireplace(_), ActionType::SetPresetMode(_)) => {
                Err(Error::Unsupported("set_preset_mode"))
            }
        }
    }
}

/// Builds one adapter per qualifying device known to the bridge.
pub async fn discover_fans(client: &bond::Client) -> crate::Result<HashMap<String, FanKind>> {
    let mut fans = HashMap::new();

    for device_id in client.devices().await? {
        let device = client.device(&device_id).await?;

        if device.device_type.is_fan() {
            info!("found fan {} ({})", device.name, device.id);
            fans.insert(device_id, FanKind::Ceiling(Fan::new(device, client.clone())));
        } else if device.device_type.is_fireplace() && device.supports_fp_fan() {
            info!("found fireplace fan {} ({})", device.name, device.id);
            fans.insert(
                device_id,
                FanKind::Fireplace(FireplaceFan::new(device, client.clone())),
            );
        }
    }

    Ok(fans)
}
