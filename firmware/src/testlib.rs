use punkto_control::hal::{Button, Panel as _};

use crate::system::panel::Panel;

/// Block until either button goes from released to pressed, return which.
pub fn wait_for_button_click(panel: &mut Panel) -> Button {
    let mut was_down = [false; 2];
    loop {
        for (index, button) in [Button::Raise, Button::Lower].into_iter().enumerate() {
            let is_down = panel.pressed(button);
            if !was_down[index] && is_down {
                return button;
            }
            was_down[index] = is_down;
        }
        cortex_m::asm::delay(400_000_000 / 1000);
    }
}
