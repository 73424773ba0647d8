//! Event Handling
//!
//! `ApplicationEvents` is the whole output contract of the host: the game
//! implements it and the host calls into it while pumping messages. Every
//! method has a no-op default so implementors only write the ones they
//! care about.
//!
//! `EventQueue` is a ready made implementation that records everything
//! into a queue the main loop drains once per frame.

use crate::gamepad::{GamepadAxis, GamepadButtons};
use crate::input::{Modifiers, MouseButton, VirtualKey};
use crate::{Rect, WindowId};
use std::collections::VecDeque;

/// How the mouse moved
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseMotion {
    /// Cursor position in client coordinates
    Absolute { x: i32, y: i32 },
    /// Raw device delta while the window is tracked
    Relative { dx: i32, dy: i32 },
}

/// Arguments of the cancelable close request
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct CloseArgs {
    /// Set to keep the window open
    pub cancel: bool,
}

#[allow(unused_variables)]
pub trait ApplicationEvents {
    fn on_mouse_enter(&mut self, window: WindowId) {}
    fn on_mouse_leave(&mut self, window: WindowId) {}
    fn on_mouse_move(&mut self, window: WindowId, motion: MouseMotion, modifiers: Modifiers) {}
    /// Wheel movement in notches, only the axis that moved is non-zero
    fn on_mouse_wheel(&mut self, window: WindowId, dx: f32, dy: f32, modifiers: Modifiers) {}
    fn on_mouse_button_down(
        &mut self,
        window: WindowId,
        button: MouseButton,
        x: i32,
        y: i32,
        double_click: bool,
        modifiers: Modifiers,
    ) {
    }
    fn on_mouse_button_up(
        &mut self,
        window: WindowId,
        button: MouseButton,
        x: i32,
        y: i32,
        modifiers: Modifiers,
    ) {
    }

    fn on_key_down(&mut self, window: WindowId, key: VirtualKey, modifiers: Modifiers, repeat: bool) {}
    fn on_key_up(&mut self, window: WindowId, key: VirtualKey, modifiers: Modifiers) {}
    fn on_character(&mut self, window: WindowId, character: char, repeat: bool) {}

    fn on_gamepad_analog(&mut self, slot: u32, axis: GamepadAxis, value: f32) {}
    fn on_gamepad_button_down(&mut self, slot: u32, button: GamepadButtons) {}
    fn on_gamepad_button_up(&mut self, slot: u32, button: GamepadButtons) {}

    /// The user asked to close `window`. Setting `args.cancel` keeps it open.
    fn on_window_close(&mut self, window: WindowId, args: &mut CloseArgs) {}
    fn on_window_activated(&mut self, window: WindowId, active: bool) {}
    fn on_window_size_changed(&mut self, window: WindowId, width: i32, height: i32) {}
    fn on_window_location_changed(&mut self, window: WindowId, x: i32, y: i32) {}
    fn on_window_resize_started(&mut self, window: WindowId) {}
    fn on_window_resize_completed(&mut self, window: WindowId, bounds: Rect<i32>) {}
    fn on_window_dpi_changed(&mut self, window: WindowId, dpi: u32, scale: f32) {}

    fn on_end_session(&mut self, logoff: bool) {}
    fn on_system_suspending(&mut self) {}
    fn on_system_resuming(&mut self) {}
    fn on_display_change(&mut self) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    MouseEnter {
        window: WindowId,
    },
    MouseLeave {
        window: WindowId,
    },
    MouseMove {
        window: WindowId,
        motion: MouseMotion,
        modifiers: Modifiers,
    },
    MouseWheel {
        window: WindowId,
        dx: f32,
        dy: f32,
        modifiers: Modifiers,
    },
    MouseButtonDown {
        window: WindowId,
        button: MouseButton,
        x: i32,
        y: i32,
        double_click: bool,
        modifiers: Modifiers,
    },
    MouseButtonUp {
        window: WindowId,
        button: MouseButton,
        x: i32,
        y: i32,
        modifiers: Modifiers,
    },
    KeyDown {
        window: WindowId,
        key: VirtualKey,
        modifiers: Modifiers,
        repeat: bool,
    },
    KeyUp {
        window: WindowId,
        key: VirtualKey,
        modifiers: Modifiers,
    },
    Character {
        window: WindowId,
        character: char,
        repeat: bool,
    },
    GamepadAnalog {
        slot: u32,
        axis: GamepadAxis,
        value: f32,
    },
    GamepadButtonDown {
        slot: u32,
        button: GamepadButtons,
    },
    GamepadButtonUp {
        slot: u32,
        button: GamepadButtons,
    },
    WindowClose {
        window: WindowId,
        cancelled: bool,
    },
    WindowActivated {
        window: WindowId,
        active: bool,
    },
    WindowSizeChanged {
        window: WindowId,
        width: i32,
        height: i32,
    },
    WindowLocationChanged {
        window: WindowId,
        x: i32,
        y: i32,
    },
    WindowResizeStarted {
        window: WindowId,
    },
    WindowResizeCompleted {
        window: WindowId,
        bounds: Rect<i32>,
    },
    WindowDpiChanged {
        window: WindowId,
        dpi: u32,
        scale: f32,
    },
    EndSession {
        logoff: bool,
    },
    SystemSuspending,
    SystemResuming,
    DisplayChange,
}

/// Records every host callback as an `Event`
pub struct EventQueue {
    /// Unhandled events, in the order they were raised.
    /// The app drains this in its main loop.
    es_events: VecDeque<Event>,
    /// Answer given to every close request
    es_cancel_close: bool,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            es_events: VecDeque::new(),
            es_cancel_close: false,
        }
    }

    /// Choose whether close requests get cancelled
    pub fn set_cancel_close(&mut self, cancel: bool) {
        self.es_cancel_close = cancel;
    }

    pub fn len(&self) -> usize {
        self.es_events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.es_events.is_empty()
    }

    /// Drain the queue of currently unhandled events
    pub fn drain_events<'a>(&'a mut self) -> std::collections::vec_deque::Drain<'a, Event> {
        self.es_events.drain(0..)
    }

    fn push(&mut self, event: Event) {
        self.es_events.push_back(event);
    }
}

impl ApplicationEvents for EventQueue {
    fn on_mouse_enter(&mut self, window: WindowId) {
        self.push(Event::MouseEnter { window: window });
    }

    fn on_mouse_leave(&mut self, window: WindowId) {
        self.push(Event::MouseLeave { window: window });
    }

    fn on_mouse_move(&mut self, window: WindowId, motion: MouseMotion, modifiers: Modifiers) {
        self.push(Event::MouseMove {
            window: window,
            motion: motion,
            modifiers: modifiers,
        });
    }

    fn on_mouse_wheel(&mut self, window: WindowId, dx: f32, dy: f32, modifiers: Modifiers) {
        self.push(Event::MouseWheel {
            window: window,
            dx: dx,
            dy: dy,
            modifiers: modifiers,
        });
    }

    fn on_mouse_button_down(
        &mut self,
        window: WindowId,
        button: MouseButton,
        x: i32,
        y: i32,
        double_click: bool,
        modifiers: Modifiers,
    ) {
        self.push(Event::MouseButtonDown {
            window: window,
            button: button,
            x: x,
            y: y,
            double_click: double_click,
            modifiers: modifiers,
        });
    }

    fn on_mouse_button_up(
        &mut self,
        window: WindowId,
        button: MouseButton,
        x: i32,
        y: i32,
        modifiers: Modifiers,
    ) {
        self.push(Event::MouseButtonUp {
            window: window,
            button: button,
            x: x,
            y: y,
            modifiers: modifiers,
        });
    }

    fn on_key_down(&mut self, window: WindowId, key: VirtualKey, modifiers: Modifiers, repeat: bool) {
        self.push(Event::KeyDown {
            window: window,
            key: key,
            modifiers: modifiers,
            repeat: repeat,
        });
    }

    fn on_key_up(&mut self, window: WindowId, key: VirtualKey, modifiers: Modifiers) {
        self.push(Event::KeyUp {
            window: window,
            key: key,
            modifiers: modifiers,
        });
    }

    fn on_character(&mut self, window: WindowId, character: char, repeat: bool) {
        self.push(Event::Character {
            window: window,
            character: character,
            repeat: repeat,
        });
    }

    fn on_gamepad_analog(&mut self, slot: u32, axis: GamepadAxis, value: f32) {
        self.push(Event::GamepadAnalog {
            slot: slot,
            axis: axis,
            value: value,
        });
    }

    fn on_gamepad_button_down(&mut self, slot: u32, button: GamepadButtons) {
        self.push(Event::GamepadButtonDown {
            slot: slot,
            button: button,
        });
    }

    fn on_gamepad_button_up(&mut self, slot: u32, button: GamepadButtons) {
        self.push(Event::GamepadButtonUp {
            slot: slot,
            button: button,
        });
    }

    fn on_window_close(&mut self, window: WindowId, args: &mut CloseArgs) {
        args.cancel = self.es_cancel_close;
        self.push(Event::WindowClose {
            window: window,
            cancelled: args.cancel,
        });
    }

    fn on_window_activated(&mut self, window: WindowId, active: bool) {
        self.push(Event::WindowActivated {
            window: window,
            active: active,
        });
    }

    fn on_window_size_changed(&mut self, window: WindowId, width: i32, height: i32) {
        self.push(Event::WindowSizeChanged {
            window: window,
            width: width,
            height: height,
        });
    }

    fn on_window_location_changed(&mut self, window: WindowId, x: i32, y: i32) {
        self.push(Event::WindowLocationChanged {
            window: window,
            x: x,
            y: y,
        });
    }

    fn on_window_resize_started(&mut self, window: WindowId) {
        self.push(Event::WindowResizeStarted { window: window });
    }

    fn on_window_resize_completed(&mut self, window: WindowId, bounds: Rect<i32>) {
        self.push(Event::WindowResizeCompleted {
            window: window,
            bounds: bounds,
        });
    }

    fn on_window_dpi_changed(&mut self, window: WindowId, dpi: u32, scale: f32) {
        self.push(Event::WindowDpiChanged {
            window: window,
            dpi: dpi,
            scale: scale,
        });
    }

    fn on_end_session(&mut self, logoff: bool) {
        self.push(Event::EndSession { logoff: logoff });
    }

    fn on_system_suspending(&mut self) {
        self.push(Event::SystemSuspending);
    }

    fn on_system_resuming(&mut self) {
        self.push(Event::SystemResuming);
    }

    fn on_display_change(&mut self) {
        self.push(Event::DisplayChange);
    }
}
