// XInput style gamepad polling
//
// Controllers don't send window messages. Once per frame every slot is
// read and compared against what we saw last time, and the differences
// are raised as button and analog events.

use crate::event::ApplicationEvents;
use crate::platform::Platform;
use utils::log;

/// Number of controller slots XInput exposes
pub const XUSER_MAX_COUNT: u32 = 4;
pub const XINPUT_GAMEPAD_LEFT_THUMB_DEADZONE: i16 = 7849;
pub const XINPUT_GAMEPAD_RIGHT_THUMB_DEADZONE: i16 = 8689;
pub const XINPUT_GAMEPAD_TRIGGER_THRESHOLD: u8 = 30;

bitflags::bitflags! {
    #[derive(Default)]
    pub struct GamepadButtons: u16 {
        const DPAD_UP = 0x0001;
        const DPAD_DOWN = 0x0002;
        const DPAD_LEFT = 0x0004;
        const DPAD_RIGHT = 0x0008;
        const START = 0x0010;
        const BACK = 0x0020;
        const LEFT_THUMB = 0x0040;
        const RIGHT_THUMB = 0x0080;
        const LEFT_SHOULDER = 0x0100;
        const RIGHT_SHOULDER = 0x0200;
        const A = 0x1000;
        const B = 0x2000;
        const X = 0x4000;
        const Y = 0x8000;
    }
}

/// Every single button, in the order events are raised
const BUTTON_LIST: [GamepadButtons; 14] = [
    GamepadButtons::DPAD_UP,
    GamepadButtons::DPAD_DOWN,
    GamepadButtons::DPAD_LEFT,
    GamepadButtons::DPAD_RIGHT,
    GamepadButtons::START,
    GamepadButtons::BACK,
    GamepadButtons::LEFT_THUMB,
    GamepadButtons::RIGHT_THUMB,
    GamepadButtons::LEFT_SHOULDER,
    GamepadButtons::RIGHT_SHOULDER,
    GamepadButtons::A,
    GamepadButtons::B,
    GamepadButtons::X,
    GamepadButtons::Y,
];

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GamepadAxis {
    LeftTrigger,
    RightTrigger,
    LeftStickX,
    LeftStickY,
    RightStickX,
    RightStickY,
}

const AXIS_LIST: [GamepadAxis; 6] = [
    GamepadAxis::LeftTrigger,
    GamepadAxis::RightTrigger,
    GamepadAxis::LeftStickX,
    GamepadAxis::LeftStickY,
    GamepadAxis::RightStickX,
    GamepadAxis::RightStickY,
];

/// One XINPUT_STATE reading
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct GamepadState {
    /// Changes whenever anything on the controller changes
    pub packet: u32,
    pub buttons: GamepadButtons,
    pub left_trigger: u8,
    pub right_trigger: u8,
    pub thumb_lx: i16,
    pub thumb_ly: i16,
    pub thumb_rx: i16,
    pub thumb_ry: i16,
}

impl GamepadState {
    /// Normalized analog values, in `AXIS_LIST` order
    fn axes(&self) -> [f32; 6] {
        [
            normalize_trigger(self.left_trigger),
            normalize_trigger(self.right_trigger),
            normalize_stick(self.thumb_lx, XINPUT_GAMEPAD_LEFT_THUMB_DEADZONE),
            normalize_stick(self.thumb_ly, XINPUT_GAMEPAD_LEFT_THUMB_DEADZONE),
            normalize_stick(self.thumb_rx, XINPUT_GAMEPAD_RIGHT_THUMB_DEADZONE),
            normalize_stick(self.thumb_ry, XINPUT_GAMEPAD_RIGHT_THUMB_DEADZONE),
        ]
    }
}

/// Map a trigger reading to [0, 1], zero below the threshold
pub fn normalize_trigger(value: u8) -> f32 {
    if value <= XINPUT_GAMEPAD_TRIGGER_THRESHOLD {
        return 0.0;
    }

    (value - XINPUT_GAMEPAD_TRIGGER_THRESHOLD) as f32
        / (u8::MAX - XINPUT_GAMEPAD_TRIGGER_THRESHOLD) as f32
}

/// Map a stick reading to [-1, 1], zero inside the dead zone
///
/// The range is made symmetric first, -32768 counts as -32767.
pub fn normalize_stick(value: i16, dead_zone: i16) -> f32 {
    let value = utils::partial_max(value as i32, -(i16::MAX as i32));
    let magnitude = value.abs();
    if magnitude <= dead_zone as i32 {
        return 0.0;
    }

    let scaled = (magnitude - dead_zone as i32) as f32 / (i16::MAX - dead_zone) as f32;
    match value < 0 {
        true => -scaled,
        false => scaled,
    }
}

#[derive(Debug, Default, Copy, Clone)]
struct SlotState {
    ss_connected: bool,
    /// Packet number of the last reading we processed
    ss_packet: Option<u32>,
    ss_buttons: GamepadButtons,
    ss_axes: [f32; 6],
}

pub struct GamepadPoller {
    gp_slots: [SlotState; XUSER_MAX_COUNT as usize],
}

impl Default for GamepadPoller {
    fn default() -> Self {
        Self::new()
    }
}

impl GamepadPoller {
    pub fn new() -> Self {
        Self {
            gp_slots: [SlotState::default(); XUSER_MAX_COUNT as usize],
        }
    }

    pub fn is_connected(&self, slot: u32) -> bool {
        self.gp_slots
            .get(slot as usize)
            .map(|s| s.ss_connected)
            .unwrap_or(false)
    }

    /// Buttons currently held on `slot`
    pub fn held_buttons(&self, slot: u32) -> GamepadButtons {
        self.gp_slots
            .get(slot as usize)
            .map(|s| s.ss_buttons)
            .unwrap_or(GamepadButtons::empty())
    }

    /// Read every slot and raise events for whatever changed
    pub fn poll<P: Platform, E: ApplicationEvents>(&mut self, platform: &P, events: &mut E) {
        for slot in 0..XUSER_MAX_COUNT {
            let state = platform.get_gamepad_state(slot);
            let ss = &mut self.gp_slots[slot as usize];

            let state = match state {
                Some(state) => state,
                None => {
                    if ss.ss_connected {
                        log::info!("Gamepad {} disconnected", slot);
                        // Nothing will ever report these going up
                        for button in BUTTON_LIST.iter() {
                            if ss.ss_buttons.contains(*button) {
                                events.on_gamepad_button_up(slot, *button);
                            }
                        }
                        *ss = SlotState::default();
                    }
                    continue;
                }
            };

            if !ss.ss_connected {
                log::info!("Gamepad {} connected", slot);
                ss.ss_connected = true;
            }
            if ss.ss_packet == Some(state.packet) {
                continue;
            }
            ss.ss_packet = Some(state.packet);

            let pressed = state.buttons - ss.ss_buttons;
            let released = ss.ss_buttons - state.buttons;
            for button in BUTTON_LIST.iter() {
                if pressed.contains(*button) {
                    events.on_gamepad_button_down(slot, *button);
                } else if released.contains(*button) {
                    events.on_gamepad_button_up(slot, *button);
                }
            }
            ss.ss_buttons = state.buttons;

            let axes = state.axes();
            for (i, axis) in AXIS_LIST.iter().enumerate() {
                if axes[i] != ss.ss_axes[i] {
                    events.on_gamepad_analog(slot, *axis, axes[i]);
                }
            }
            ss.ss_axes = axes;
        }
    }
}
