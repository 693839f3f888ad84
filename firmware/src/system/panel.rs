//! The two manual buttons and their indicator LEDs.

use super::hal::gpio;

use punkto_control::hal::{self, Button};

pub type RaiseSwitchPin = gpio::gpioe::PE2<gpio::Input>;
pub type LowerSwitchPin = gpio::gpioe::PE3<gpio::Input>;
pub type RaiseIndicatorPin = gpio::gpioe::PE4<gpio::Output>;
pub type LowerIndicatorPin = gpio::gpioe::PE5<gpio::Output>;

pub struct SwitchPins {
    pub raise: RaiseSwitchPin,
    pub lower: LowerSwitchPin,
}

pub struct IndicatorPins {
    pub raise: RaiseIndicatorPin,
    pub lower: LowerIndicatorPin,
}

pub struct Panel {
    switches: SwitchPins,
    indicators: IndicatorPins,
}

impl Panel {
    #[must_use]
    pub fn new(switches: SwitchPins, indicators: IndicatorPins) -> Self {
        Self {
            switches,
            indicators,
        }
    }
}

impl hal::Panel for Panel {
    fn pressed(&self, button: Button) -> bool {
        // Momentary switches to ground with pull-ups, low means pressed.
        match button {
            Button::Raise => self.switches.raise.is_low(),
            Button::Lower => self.switches.lower.is_low(),
        }
    }

    fn set_indicator(&mut self, button: Button, on: bool) {
        match button {
            Button::Raise => self.indicators.raise.set_state(on.into()),
            Button::Lower => self.indicators.lower.set_state(on.into()),
        }
    }
}
