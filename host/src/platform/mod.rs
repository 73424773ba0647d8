// The native capability table
//
// Every call the host makes into the window system goes through
// `Platform`. The application picks one implementation at startup and
// everything above this module is generic over it.

use crate::display::{DisplayDevice, MonitorInfo};
use crate::gamepad::GamepadState;
use crate::msg::*;
use crate::window::{FramePolicy, WindowStyle};
use crate::Rect;

pub mod headless;
#[cfg(windows)]
pub mod win32;

/// Receives messages from the platform's dispatch.
///
/// `HostApplication` implements this. The platform decodes any pointer
/// payload before the call and writes changes back after it.
pub trait MessageSink {
    fn dispatch_message(
        &mut self,
        message: NativeMessage,
        payload: MessagePayload<'_>,
    ) -> WindowMessageResult;
}

/// A message that arrived while no sink could take it
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DeferredMessage {
    pub message: NativeMessage,
    /// WM_DPICHANGED's suggested window rectangle
    pub suggested_rect: Option<Rect<i32>>,
}

impl DeferredMessage {
    pub fn new(message: NativeMessage) -> Self {
        Self {
            message: message,
            suggested_rect: None,
        }
    }

    pub fn payload(&self) -> MessagePayload<'static> {
        match self.suggested_rect {
            Some(rect) => MessagePayload::SuggestedRect(rect),
            None => MessagePayload::None,
        }
    }
}

/// Notifications worth replaying when they arrive outside of dispatch
pub fn is_deferred(msg: u32) -> bool {
    matches!(
        msg,
        WM_SIZE
            | WM_MOVE
            | WM_ACTIVATE
            | WM_ACTIVATEAPP
            | WM_CLOSE
            | WM_DESTROY
            | WM_DISPLAYCHANGE
            | WM_DPICHANGED
            | WM_ENDSESSION
            | WM_POWERBROADCAST
    )
}

/// Parameters for creating a native window
#[derive(Debug, Clone)]
pub struct CreateWindowParams<'a> {
    pub title: &'a str,
    pub style: WindowStyle,
    /// Outer bounds in screen coordinates
    pub bounds: Rect<i32>,
    pub parent: Option<NativeHandle>,
    /// Answers the frame messages sent during creation
    pub policy: FramePolicy,
}

/// Saved show state and restored position of a window
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WindowPlacement {
    pub show_cmd: i32,
    pub normal_position: Rect<i32>,
}

/// One raw mouse record read during WM_INPUT
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct RawMouse {
    /// MOUSE_MOVE_* flags
    pub flags: u16,
    pub last_x: i32,
    pub last_y: i32,
}

pub trait Platform: Sized {
    /// Take the next queued message without blocking and route it to
    /// `sink`. Messages the window system sends while the queue is read
    /// reach `sink` as well.
    ///
    /// Returns false once the queue is empty.
    fn pump_message<S: MessageSink + AsRef<Self>>(sink: &mut S) -> bool;
    /// Messages that arrived while no sink was available, in arrival order
    fn take_deferred_messages(&self) -> Vec<DeferredMessage>;
    /// Keep `policy` for answering frame messages of `handle` that are
    /// sent while the window can't be reached
    fn set_frame_policy(&self, handle: NativeHandle, policy: FramePolicy);

    fn register_window_class(&self) -> bool;
    fn create_window(&self, params: &CreateWindowParams) -> Option<NativeHandle>;
    fn destroy_window(&self, handle: NativeHandle) -> bool;
    fn show_window(&self, handle: NativeHandle, cmd: i32);
    fn is_window_visible(&self, handle: NativeHandle) -> bool;
    fn enable_window(&self, handle: NativeHandle, enable: bool);
    fn is_window_enabled(&self, handle: NativeHandle) -> bool;
    fn is_minimized(&self, handle: NativeHandle) -> bool;
    fn is_maximized(&self, handle: NativeHandle) -> bool;
    fn set_foreground(&self, handle: NativeHandle) -> bool;
    fn set_focus(&self, handle: NativeHandle) -> bool;
    fn bring_to_front(&self, handle: NativeHandle) -> bool;

    /// Outer bounds in screen coordinates
    fn get_window_rect(&self, handle: NativeHandle) -> Option<Rect<i32>>;
    /// Client area in client coordinates, the origin is always (0, 0)
    fn get_client_rect(&self, handle: NativeHandle) -> Option<Rect<i32>>;
    /// Client area in screen coordinates
    fn client_rect_to_screen(&self, handle: NativeHandle) -> Option<Rect<i32>>;
    fn set_window_pos(&self, handle: NativeHandle, bounds: Rect<i32>) -> bool;
    fn set_window_style(&self, handle: NativeHandle, style: WindowStyle) -> bool;
    fn get_window_placement(&self, handle: NativeHandle) -> Option<WindowPlacement>;
    fn set_window_placement(&self, handle: NativeHandle, placement: &WindowPlacement) -> bool;
    fn get_window_text(&self, handle: NativeHandle) -> String;
    fn set_window_text(&self, handle: NativeHandle, text: &str) -> bool;

    /// Load one of the shared IDC_* cursors
    fn load_system_cursor(&self, id: u32) -> CursorHandle;
    fn set_cursor(&self, cursor: CursorHandle);
    fn get_cursor_pos(&self) -> Option<(i32, i32)>;
    fn set_cursor_pos(&self, x: i32, y: i32) -> bool;
    /// Confine the cursor to `rect`, or release it with None
    fn clip_cursor(&self, rect: Option<Rect<i32>>) -> bool;
    /// Ask for a WM_MOUSELEAVE when the cursor leaves `handle`
    fn track_mouse_leave(&self, handle: NativeHandle) -> bool;

    /// Route raw mouse input to `target`, or stop it with None
    fn register_raw_mouse(&self, target: Option<NativeHandle>) -> bool;
    /// Read the mouse record of a WM_INPUT message
    fn read_raw_mouse(&self, lparam: isize) -> Option<RawMouse>;
    /// MAPVK_VSC_TO_VK_EX, 0 if the scan code has no mapping
    fn map_scan_code(&self, scan_code: u32) -> u32;
    /// Physical state of a virtual key right now
    fn is_key_down(&self, vk: u32) -> bool;
    /// Controller state of `slot`, None if nothing is connected there
    fn get_gamepad_state(&self, slot: u32) -> Option<GamepadState>;

    fn get_system_metric(&self, index: i32) -> i32;
    fn enum_display_devices(&self) -> Vec<DisplayDevice>;
    fn enum_monitors(&self) -> Vec<MonitorInfo>;
    /// Tell the user the application is going down
    fn show_fatal_error(&self, title: &str, message: &str);
    /// HINSTANCE of the module that owns the window class
    fn module_handle(&self) -> isize;
}
