//! # Anemone host layer
//!
//! The host owns the native side of a game: its windows, the message pump
//! that drives them, keyboard/mouse/gamepad input and the display layout.
//! Everything the OS reports is translated into calls on an
//! `ApplicationEvents` implementation provided by the game.
//!
//! The layer is split the following way:
//! * `msg` - the native message ABI: message ids, key codes and the
//!   bit-packing helpers for message parameters.
//! * `platform` - the `Platform` capability table. Every native call the
//!   host makes goes through it. `Win32Platform` talks to the OS and
//!   `HeadlessPlatform` simulates it in memory for tests.
//! * `input` - `HostInput`, the keyboard/mouse translation state machine
//!   and the single mouse tracking (raw input capture) session.
//! * `window` - `HostWindow`, one native window and its message handlers.
//! * `application` - `HostApplication`, the message pump, the window
//!   arena and the cursor table.
//! * `gamepad` - per frame XInput style polling.
//! * `display` - display device/monitor enumeration.
//! * `event` - the `ApplicationEvents` interface and a recording queue.
//!
//! ```ignore
//! let mut app = HostApplication::new(HeadlessPlatform::new(), EventQueue::new())?;
//! let id = app.make_window(&WindowDesc::new("Anemone"))?;
//!
//! while app.is_running() {
//!     app.process_messages();
//!     for event in app.events_mut().drain_events() {
//!         // react to input
//!     }
//! }
//! ```

// Shared helpers
extern crate utils;
pub use utils::region::Rect;

pub mod application;
pub mod display;
pub mod event;
pub mod gamepad;
pub mod input;
pub mod msg;
pub mod platform;
pub mod window;

#[cfg(test)]
mod tests;

pub use application::{CursorTable, HostApplication, WindowMut};
pub use display::{Display, DisplayMetrics, DisplayOrientation};
pub use event::{ApplicationEvents, CloseArgs, Event, EventQueue, MouseMotion};
pub use gamepad::{GamepadAxis, GamepadButtons, GamepadPoller, GamepadState};
pub use input::{HostInput, Modifiers, MouseButton, VirtualKey};
pub use msg::{CursorHandle, MessagePayload, NativeHandle, NativeMessage, WindowMessageResult};
pub use platform::headless::HeadlessPlatform;
#[cfg(windows)]
pub use platform::win32::Win32Platform;
pub use platform::{DeferredMessage, MessageSink, Platform};
pub use window::{CursorType, FramePolicy, HostWindow, WindowDesc, WindowMode, WindowType};

use thiserror::Error;
use utils::arena::ArenaId;

/// Stable name of a window owned by a `HostApplication`.
///
/// Ids stay valid (but resolve to nothing) after the window is released,
/// they are never reused for a different window.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct WindowId(pub(crate) ArenaId);

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WindowId({})", self.0.get_raw_id())
    }
}

#[allow(non_camel_case_types)]
#[derive(Error, Debug, PartialEq)]
pub enum HostError {
    #[error("Could not register the window class")]
    CLASS_REGISTRATION_FAILED,
    #[error("Could not create window \"{0}\"")]
    WINDOW_CREATION_FAILED(String),
    #[error("Window id does not refer to a live window")]
    INVALID_WINDOW,
}

pub type Result<T> = std::result::Result<T, HostError>;
