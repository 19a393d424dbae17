/// Inclusive range of discrete speed steps a device supports.
///
/// Maps between the platform's 0..=100 percentage scale and step numbers
/// `low..=high`. A range with `high < low` has no usable steps.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SpeedRange {
    low: u32,
    high: u32,
}

impl SpeedRange {
    pub const fn new(low: u32, high: u32) -> SpeedRange {
        SpeedRange { low, high }
    }

    pub const fn speed_count(&self) -> u32 {
        if self.low <= self.high {
            self.high - self.low + 1
        } else {
            0
        }
    }

    /// Maps a percentage in 1..=100 onto the range, rounding up so any
    /// nonzero request lands on at least the lowest step. Percentage 0
    /// never reaches this function: command handlers route it to the
    /// turn-off path instead.
    pub fn percentage_to_step(&self, percentage: u8) -> u32 {
        let scaled = self.speed_count() * u32::from(percentage);
        self.low - 1 + scaled.div_ceil(100)
    }

    /// Floor inverse of [`SpeedRange::percentage_to_step`], clamped to
    /// 0..=100. The pair round-trips to within one step's worth.
    pub fn step_to_percentage(&self, step: u32) -> u8 {
        let steps = self.speed_count();
        if steps == 0 {
            return 0;
        }

        let percentage = (step.saturating_sub(self.low) + 1) * 100 / steps;
        percentage.min(100) as u8
    }
}
