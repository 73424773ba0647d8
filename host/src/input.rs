// Keyboard and mouse translation
//
// HostInput turns the input messages of every window into
// ApplicationEvents calls. It also owns the single mouse tracking
// session: while a window is tracked the cursor is hidden and clipped to
// it, and motion is reported as raw device deltas instead of cursor
// positions.

use crate::event::{ApplicationEvents, MouseMotion};
use crate::msg::*;
use crate::platform::Platform;
use crate::{Rect, WindowId};
use utils::log;

bitflags::bitflags! {
    #[derive(Default)]
    pub struct Modifiers: u16 {
        const NONE = 0x0000;
        const LSHIFT = 0x0001;
        const RSHIFT = 0x0002;
        const LCTRL = 0x0040;
        const RCTRL = 0x0080;
        const LALT = 0x0100;
        const RALT = 0x0200;
        const LGUI = 0x0400;
        const RGUI = 0x0800;
        const SHIFT = Self::LSHIFT.bits | Self::RSHIFT.bits;
        const CTRL = Self::LCTRL.bits | Self::RCTRL.bits;
        const ALT = Self::LALT.bits | Self::RALT.bits;
    }
}

/// Mouse buttons
///
/// `SIDE` and `EXTRA` are the first and second X buttons.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    LEFT,
    MIDDLE,
    RIGHT,
    SIDE,
    EXTRA,
}

/// Keys reported in key events
///
/// Modifier keys always come through with their side resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum VirtualKey {
    UNKNOWN,
    BACKSPACE,
    TAB,
    CLEAR,
    RETURN,
    PAUSE,
    CAPSLOCK,
    ESCAPE,
    SPACE,
    PAGEUP,
    PAGEDOWN,
    END,
    HOME,
    LEFT,
    UP,
    RIGHT,
    DOWN,
    PRINTSCREEN,
    INSERT,
    DELETE,
    NUM0,
    NUM1,
    NUM2,
    NUM3,
    NUM4,
    NUM5,
    NUM6,
    NUM7,
    NUM8,
    NUM9,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    LGUI,
    RGUI,
    APPLICATION,
    KP_0,
    KP_1,
    KP_2,
    KP_3,
    KP_4,
    KP_5,
    KP_6,
    KP_7,
    KP_8,
    KP_9,
    KP_MULTIPLY,
    KP_PLUS,
    KP_SEPARATOR,
    KP_MINUS,
    KP_PERIOD,
    KP_DIVIDE,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    NUMLOCK,
    SCROLLLOCK,
    LSHIFT,
    RSHIFT,
    LCTRL,
    RCTRL,
    LALT,
    RALT,
    SEMICOLON,
    EQUALS,
    COMMA,
    MINUS,
    PERIOD,
    SLASH,
    BACKQUOTE,
    LEFTBRACKET,
    BACKSLASH,
    RIGHTBRACKET,
    QUOTE,
}

impl VirtualKey {
    /// Translate a Win32 virtual key code
    pub fn from_native(vk: u32) -> VirtualKey {
        CT_WIN32_TO_HOST.val_to_key(vk).unwrap_or(VirtualKey::UNKNOWN)
    }

    /// The Win32 virtual key code for this key
    pub fn to_native(&self) -> Option<u32> {
        CT_WIN32_TO_HOST.key_to_val(*self)
    }

    pub fn is_modifier(&self) -> bool {
        match self {
            Self::LCTRL
            | Self::LSHIFT
            | Self::LALT
            | Self::LGUI
            | Self::RCTRL
            | Self::RSHIFT
            | Self::RALT
            | Self::RGUI => true,
            _ => false,
        }
    }
}

/// Generic table for Keycode translations
///
/// A list of (our code, foreign code) pairs that can be searched in
/// either direction.
struct CodeTranslator<K: PartialEq + Copy, T: PartialEq + Copy> {
    ct_table: Vec<(K, T)>,
}

impl<K: PartialEq + Copy, T: PartialEq + Copy> CodeTranslator<K, T> {
    fn val_to_key(&self, val: T) -> Option<K> {
        self.ct_table
            .iter()
            .find(|entry| entry.1 == val)
            .map(|entry| entry.0)
    }

    fn key_to_val(&self, code: K) -> Option<T> {
        self.ct_table
            .iter()
            .find(|entry| entry.0 == code)
            .map(|entry| entry.1)
    }
}

lazy_static::lazy_static! {
    static ref CT_WIN32_TO_HOST: CodeTranslator<VirtualKey, u32> = {
        let mut table = vec![
            (VirtualKey::BACKSPACE,    VK_BACK),
            (VirtualKey::TAB,          VK_TAB),
            (VirtualKey::CLEAR,        VK_CLEAR),
            (VirtualKey::RETURN,       VK_RETURN),
            (VirtualKey::PAUSE,        VK_PAUSE),
            (VirtualKey::CAPSLOCK,     VK_CAPITAL),
            (VirtualKey::ESCAPE,       VK_ESCAPE),
            (VirtualKey::SPACE,        VK_SPACE),
            (VirtualKey::PAGEUP,       VK_PRIOR),
            (VirtualKey::PAGEDOWN,     VK_NEXT),
            (VirtualKey::END,          VK_END),
            (VirtualKey::HOME,         VK_HOME),
            (VirtualKey::LEFT,         VK_LEFT),
            (VirtualKey::UP,           VK_UP),
            (VirtualKey::RIGHT,        VK_RIGHT),
            (VirtualKey::DOWN,         VK_DOWN),
            (VirtualKey::PRINTSCREEN,  VK_SNAPSHOT),
            (VirtualKey::INSERT,       VK_INSERT),
            (VirtualKey::DELETE,       VK_DELETE),
            (VirtualKey::LGUI,         VK_LWIN),
            (VirtualKey::RGUI,         VK_RWIN),
            (VirtualKey::APPLICATION,  VK_APPS),
            (VirtualKey::KP_MULTIPLY,  VK_MULTIPLY),
            (VirtualKey::KP_PLUS,      VK_ADD),
            (VirtualKey::KP_SEPARATOR, VK_SEPARATOR),
            (VirtualKey::KP_MINUS,     VK_SUBTRACT),
            (VirtualKey::KP_PERIOD,    VK_DECIMAL),
            (VirtualKey::KP_DIVIDE,    VK_DIVIDE),
            (VirtualKey::NUMLOCK,      VK_NUMLOCK),
            (VirtualKey::SCROLLLOCK,   VK_SCROLL),
            (VirtualKey::LSHIFT,       VK_LSHIFT),
            (VirtualKey::RSHIFT,       VK_RSHIFT),
            (VirtualKey::LCTRL,        VK_LCONTROL),
            (VirtualKey::RCTRL,        VK_RCONTROL),
            (VirtualKey::LALT,         VK_LMENU),
            (VirtualKey::RALT,         VK_RMENU),
            (VirtualKey::SEMICOLON,    VK_OEM_1),
            (VirtualKey::EQUALS,       VK_OEM_PLUS),
            (VirtualKey::COMMA,        VK_OEM_COMMA),
            (VirtualKey::MINUS,        VK_OEM_MINUS),
            (VirtualKey::PERIOD,       VK_OEM_PERIOD),
            (VirtualKey::SLASH,        VK_OEM_2),
            (VirtualKey::BACKQUOTE,    VK_OEM_3),
            (VirtualKey::LEFTBRACKET,  VK_OEM_4),
            (VirtualKey::BACKSLASH,    VK_OEM_5),
            (VirtualKey::RIGHTBRACKET, VK_OEM_6),
            (VirtualKey::QUOTE,        VK_OEM_7),
        ];

        // The contiguous ranges: digits, letters, keypad and function keys
        let digits = [
            VirtualKey::NUM0, VirtualKey::NUM1, VirtualKey::NUM2, VirtualKey::NUM3,
            VirtualKey::NUM4, VirtualKey::NUM5, VirtualKey::NUM6, VirtualKey::NUM7,
            VirtualKey::NUM8, VirtualKey::NUM9,
        ];
        let letters = [
            VirtualKey::A, VirtualKey::B, VirtualKey::C, VirtualKey::D, VirtualKey::E,
            VirtualKey::F, VirtualKey::G, VirtualKey::H, VirtualKey::I, VirtualKey::J,
            VirtualKey::K, VirtualKey::L, VirtualKey::M, VirtualKey::N, VirtualKey::O,
            VirtualKey::P, VirtualKey::Q, VirtualKey::R, VirtualKey::S, VirtualKey::T,
            VirtualKey::U, VirtualKey::V, VirtualKey::W, VirtualKey::X, VirtualKey::Y,
            VirtualKey::Z,
        ];
        let keypad = [
            VirtualKey::KP_0, VirtualKey::KP_1, VirtualKey::KP_2, VirtualKey::KP_3,
            VirtualKey::KP_4, VirtualKey::KP_5, VirtualKey::KP_6, VirtualKey::KP_7,
            VirtualKey::KP_8, VirtualKey::KP_9,
        ];
        let function = [
            VirtualKey::F1, VirtualKey::F2, VirtualKey::F3, VirtualKey::F4,
            VirtualKey::F5, VirtualKey::F6, VirtualKey::F7, VirtualKey::F8,
            VirtualKey::F9, VirtualKey::F10, VirtualKey::F11, VirtualKey::F12,
        ];
        for (base, keys) in [
            (VK_0, &digits[..]),
            (VK_A, &letters[..]),
            (VK_NUMPAD0, &keypad[..]),
            (VK_F1, &function[..]),
        ] {
            for (i, key) in keys.iter().enumerate() {
                table.push((*key, base + i as u32));
            }
        }

        CodeTranslator { ct_table: table }
    };
}

/// Last absolute raw position before any sample arrived
const RAW_POSITION_UNSET: (i32, i32) = (i32::MAX, i32::MAX);

/// Scan codes of the right hand shift key
const RSHIFT_SCAN_CODE: u32 = 0x36;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Tracking {
    t_handle: NativeHandle,
    /// Client area the cursor is confined to, in screen coordinates
    t_clip: Rect<i32>,
    /// Where to put the cursor back when tracking ends
    t_restore: Option<(i32, i32)>,
}

pub struct HostInput {
    hi_modifiers: Modifiers,
    /// The window whose raw input we capture, if any
    hi_tracking: Option<Tracking>,
    /// Last absolute raw mouse position, in screen pixels
    hi_last_raw_position: (i32, i32),
    /// Window the cursor is currently over, for enter/leave
    hi_hovered: Option<NativeHandle>,
}

impl Default for HostInput {
    fn default() -> Self {
        Self::new()
    }
}

impl HostInput {
    pub fn new() -> Self {
        Self {
            hi_modifiers: Modifiers::NONE,
            hi_tracking: None,
            hi_last_raw_position: RAW_POSITION_UNSET,
            hi_hovered: None,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        self.hi_modifiers
    }

    /// Translate one input message for `window`.
    ///
    /// Returns `Unhandled` for anything that isn't input, the window gets
    /// a chance to handle those next.
    pub fn process_message<P: Platform, E: ApplicationEvents>(
        &mut self,
        platform: &P,
        events: &mut E,
        window: WindowId,
        msg: &NativeMessage,
    ) -> WindowMessageResult {
        match msg.msg {
            WM_KEYUP | WM_SYSKEYUP => self.handle_key(platform, events, window, msg, false),
            WM_KEYDOWN | WM_SYSKEYDOWN => self.handle_key(platform, events, window, msg, true),
            WM_INPUT => self.handle_raw_input(platform, events, window, msg),
            WM_LBUTTONDOWN => self.handle_button(events, window, msg, MouseButton::LEFT, true, false),
            WM_LBUTTONUP => self.handle_button(events, window, msg, MouseButton::LEFT, false, false),
            WM_LBUTTONDBLCLK => self.handle_button(events, window, msg, MouseButton::LEFT, true, true),
            WM_MBUTTONDOWN => self.handle_button(events, window, msg, MouseButton::MIDDLE, true, false),
            WM_MBUTTONUP => self.handle_button(events, window, msg, MouseButton::MIDDLE, false, false),
            WM_MBUTTONDBLCLK => self.handle_button(events, window, msg, MouseButton::MIDDLE, true, true),
            WM_RBUTTONDOWN => self.handle_button(events, window, msg, MouseButton::RIGHT, true, false),
            WM_RBUTTONUP => self.handle_button(events, window, msg, MouseButton::RIGHT, false, false),
            WM_RBUTTONDBLCLK => self.handle_button(events, window, msg, MouseButton::RIGHT, true, true),
            WM_XBUTTONDOWN | WM_XBUTTONUP | WM_XBUTTONDBLCLK => {
                let button = match get_xbutton_wparam(msg.wparam) {
                    XBUTTON1 => MouseButton::SIDE,
                    _ => MouseButton::EXTRA,
                };
                self.handle_button(
                    events,
                    window,
                    msg,
                    button,
                    msg.msg != WM_XBUTTONUP,
                    msg.msg == WM_XBUTTONDBLCLK,
                );
                // X button messages must return TRUE when processed
                WindowMessageResult::Handled(1)
            }
            WM_MOUSEMOVE => self.handle_mouse_move(platform, events, window, msg),
            WM_MOUSELEAVE => {
                if self.hi_hovered == Some(msg.hwnd) {
                    self.hi_hovered = None;
                }
                events.on_mouse_leave(window);
                WindowMessageResult::Handled(0)
            }
            WM_MOUSEWHEEL => self.handle_wheel(events, window, msg, false),
            WM_MOUSEHWHEEL => self.handle_wheel(events, window, msg, true),
            _ => WindowMessageResult::Unhandled,
        }
    }

    /// Pick the sided virtual key for a generic Shift/Control/Menu key
    fn resolve_modifier_key<P: Platform>(
        &self,
        platform: &P,
        vk: u32,
        scan_code: u32,
        extended: bool,
    ) -> u32 {
        let scan = match extended {
            true => scan_code | EXTENDED_SCAN_PREFIX,
            false => scan_code,
        };
        let mapped = platform.map_scan_code(scan);

        match vk {
            VK_SHIFT => match mapped {
                VK_LSHIFT | VK_RSHIFT => mapped,
                _ if scan_code == RSHIFT_SCAN_CODE => VK_RSHIFT,
                _ => VK_LSHIFT,
            },
            VK_CONTROL => match mapped {
                VK_LCONTROL | VK_RCONTROL => mapped,
                _ if extended => VK_RCONTROL,
                _ => VK_LCONTROL,
            },
            VK_MENU => match mapped {
                VK_LMENU | VK_RMENU => mapped,
                _ if extended => VK_RMENU,
                _ => VK_LMENU,
            },
            _ => vk,
        }
    }

    fn update_modifiers(&mut self, vk: u32, pressed: bool) {
        let flag = match vk {
            VK_LSHIFT => Modifiers::LSHIFT,
            VK_RSHIFT => Modifiers::RSHIFT,
            VK_LCONTROL => Modifiers::LCTRL,
            VK_RCONTROL => Modifiers::RCTRL,
            VK_LMENU => Modifiers::LALT,
            VK_RMENU => Modifiers::RALT,
            _ => return,
        };
        self.hi_modifiers.set(flag, pressed);
    }

    fn handle_key<P: Platform, E: ApplicationEvents>(
        &mut self,
        platform: &P,
        events: &mut E,
        window: WindowId,
        msg: &NativeMessage,
        pressed: bool,
    ) -> WindowMessageResult {
        let vk = msg.wparam as u32;
        let flags = hiword(msg.lparam as usize);
        let scan_code = (flags & 0xff) as u32;
        let extended = flags & KF_EXTENDED != 0;
        let repeat = flags & KF_REPEAT != 0;

        let key = match vk {
            VK_SHIFT | VK_CONTROL | VK_MENU => {
                let sided = self.resolve_modifier_key(platform, vk, scan_code, extended);
                self.update_modifiers(sided, pressed);
                sided
            }
            _ => vk,
        };

        if vk == VK_SHIFT && !pressed {
            // Windows doesn't say which shift went up when both were held,
            // so both sides are cleared and reported.
            self.hi_modifiers.remove(Modifiers::SHIFT);
            events.on_key_down(window, VirtualKey::LSHIFT, self.hi_modifiers, false);
            events.on_key_down(window, VirtualKey::RSHIFT, self.hi_modifiers, false);
        } else {
            let key = VirtualKey::from_native(key);
            match pressed {
                true => events.on_key_down(window, key, self.hi_modifiers, repeat),
                false => events.on_key_up(window, key, self.hi_modifiers),
            }
        }

        match msg.msg {
            // The default handling drives Alt+F4 and the system menu
            WM_SYSKEYDOWN | WM_SYSKEYUP => WindowMessageResult::Unhandled,
            _ => WindowMessageResult::Handled(0),
        }
    }

    fn handle_raw_input<P: Platform, E: ApplicationEvents>(
        &mut self,
        platform: &P,
        events: &mut E,
        window: WindowId,
        msg: &NativeMessage,
    ) -> WindowMessageResult {
        let raw = match platform.read_raw_mouse(msg.lparam) {
            Some(raw) => raw,
            None => return WindowMessageResult::Unhandled,
        };

        let (dx, dy) = if raw.flags & MOUSE_MOVE_ABSOLUTE != 0 {
            let (origin, size) = match raw.flags & MOUSE_VIRTUAL_DESKTOP != 0 {
                true => (
                    (
                        platform.get_system_metric(SM_XVIRTUALSCREEN),
                        platform.get_system_metric(SM_YVIRTUALSCREEN),
                    ),
                    (
                        platform.get_system_metric(SM_CXVIRTUALSCREEN),
                        platform.get_system_metric(SM_CYVIRTUALSCREEN),
                    ),
                ),
                false => (
                    (0, 0),
                    (
                        platform.get_system_metric(SM_CXSCREEN),
                        platform.get_system_metric(SM_CYSCREEN),
                    ),
                ),
            };
            let x = (raw.last_x as f32 / RAW_ABSOLUTE_RANGE * size.0 as f32) as i32 + origin.0;
            let y = (raw.last_y as f32 / RAW_ABSOLUTE_RANGE * size.1 as f32) as i32 + origin.1;

            let last = self.hi_last_raw_position;
            self.hi_last_raw_position = (x, y);
            match last == RAW_POSITION_UNSET {
                // First sample only establishes where we are
                true => (0, 0),
                false => (x - last.0, y - last.1),
            }
        } else {
            (raw.last_x, raw.last_y)
        };

        if dx != 0 || dy != 0 {
            events.on_mouse_move(
                window,
                MouseMotion::Relative { dx: dx, dy: dy },
                self.hi_modifiers,
            );
        }

        // DefWindowProc has to see WM_INPUT to release the input buffer
        WindowMessageResult::Unhandled
    }

    fn handle_button<E: ApplicationEvents>(
        &mut self,
        events: &mut E,
        window: WindowId,
        msg: &NativeMessage,
        button: MouseButton,
        pressed: bool,
        double_click: bool,
    ) -> WindowMessageResult {
        let x = get_x_lparam(msg.lparam);
        let y = get_y_lparam(msg.lparam);

        match pressed {
            true => events.on_mouse_button_down(window, button, x, y, double_click, self.hi_modifiers),
            false => events.on_mouse_button_up(window, button, x, y, self.hi_modifiers),
        }
        WindowMessageResult::Handled(0)
    }

    fn handle_mouse_move<P: Platform, E: ApplicationEvents>(
        &mut self,
        platform: &P,
        events: &mut E,
        window: WindowId,
        msg: &NativeMessage,
    ) -> WindowMessageResult {
        // Raw input reports motion while tracking
        if self.hi_tracking.is_some() {
            return WindowMessageResult::Handled(0);
        }

        if self.hi_hovered != Some(msg.hwnd) {
            self.hi_hovered = Some(msg.hwnd);
            events.on_mouse_enter(window);
            if !platform.track_mouse_leave(msg.hwnd) {
                log::error!("TrackMouseEvent failed for {:?}", msg.hwnd);
            }
        }

        events.on_mouse_move(
            window,
            MouseMotion::Absolute {
                x: get_x_lparam(msg.lparam),
                y: get_y_lparam(msg.lparam),
            },
            self.hi_modifiers,
        );
        WindowMessageResult::Handled(0)
    }

    fn handle_wheel<E: ApplicationEvents>(
        &mut self,
        events: &mut E,
        window: WindowId,
        msg: &NativeMessage,
        horizontal: bool,
    ) -> WindowMessageResult {
        let delta = get_wheel_delta_wparam(msg.wparam) as f32 / WHEEL_DELTA as f32;

        match horizontal {
            true => events.on_mouse_wheel(window, delta, 0.0, self.hi_modifiers),
            false => events.on_mouse_wheel(window, 0.0, delta, self.hi_modifiers),
        }
        WindowMessageResult::Handled(0)
    }

    /// Capture the mouse for `handle`.
    ///
    /// Raw input gets routed to the window, the cursor is hidden and
    /// confined to its client area. Any other tracked window is released
    /// first. Returns false if raw input could not be set up.
    pub fn start_tracking<P: Platform>(&mut self, platform: &P, handle: NativeHandle) -> bool {
        if let Some(prev) = self.tracked() {
            if prev == handle {
                return true;
            }
            self.stop_tracking(platform, prev);
        }

        if !platform.register_raw_mouse(Some(handle)) {
            log::error!("Could not register raw mouse input for {:?}", handle);
            return false;
        }

        let restore = platform.get_cursor_pos();
        let clip = match platform.client_rect_to_screen(handle) {
            Some(clip) => clip,
            None => {
                log::error!("Could not get the client area of {:?}", handle);
                platform.register_raw_mouse(None);
                return false;
            }
        };
        if !platform.clip_cursor(Some(clip)) {
            log::error!("ClipCursor failed for {:?}", handle);
        }

        self.hi_last_raw_position = RAW_POSITION_UNSET;
        platform.set_cursor(CursorHandle::NULL);

        log::debug!("Tracking mouse in {:?}", handle);
        self.hi_tracking = Some(Tracking {
            t_handle: handle,
            t_clip: clip,
            t_restore: restore,
        });
        return true;
    }

    /// Release the mouse captured by `handle`.
    ///
    /// Does nothing unless `handle` is the tracked window.
    pub fn stop_tracking<P: Platform>(&mut self, platform: &P, handle: NativeHandle) {
        let tracking = match self.hi_tracking {
            Some(t) if t.t_handle == handle => t,
            _ => return,
        };
        self.hi_tracking = None;

        if !platform.register_raw_mouse(None) {
            log::error!("Could not unregister raw mouse input");
        }
        if !platform.clip_cursor(None) {
            log::error!("Could not release the cursor clip");
        }
        if let Some((x, y)) = tracking.t_restore {
            platform.set_cursor_pos(x, y);
        }
        log::debug!("Stopped tracking mouse in {:?}", handle);
    }

    pub fn is_tracking(&self, handle: NativeHandle) -> bool {
        self.tracked() == Some(handle)
    }

    pub fn tracked(&self) -> Option<NativeHandle> {
        self.hi_tracking.map(|t| t.t_handle)
    }

    /// The rectangle the cursor is confined to while tracking
    pub fn clip_rect(&self) -> Option<Rect<i32>> {
        self.hi_tracking.map(|t| t.t_clip)
    }

    /// Read the modifier keys straight from the keyboard state
    pub fn capture_modifiers<P: Platform>(&self, platform: &P) -> Modifiers {
        let mut mods = Modifiers::NONE;

        for (vk, flag) in [
            (VK_LSHIFT, Modifiers::LSHIFT),
            (VK_RSHIFT, Modifiers::RSHIFT),
            (VK_LCONTROL, Modifiers::LCTRL),
            (VK_RCONTROL, Modifiers::RCTRL),
            (VK_LMENU, Modifiers::LALT),
            (VK_RMENU, Modifiers::RALT),
        ] {
            if platform.is_key_down(vk) {
                mods |= flag;
            }
        }

        mods
    }

    pub fn on_window_activated<P: Platform>(&mut self, platform: &P, handle: NativeHandle, active: bool) {
        self.hi_modifiers = self.capture_modifiers(platform);
        if !active {
            self.stop_tracking(platform, handle);
        }
    }

    pub fn on_application_activated<P: Platform>(&mut self, platform: &P, active: bool) {
        self.hi_modifiers = self.capture_modifiers(platform);
        if !active {
            if let Some(handle) = self.tracked() {
                self.stop_tracking(platform, handle);
            }
        }
    }

    /// Forget a window that is going away
    pub(crate) fn forget_window<P: Platform>(&mut self, platform: &P, handle: NativeHandle) {
        self.stop_tracking(platform, handle);
        if self.hi_hovered == Some(handle) {
            self.hi_hovered = None;
        }
    }
}
