// Native windows
//
// A HostWindow owns one native window. It handles whatever message
// traffic is left after input translation: closing, resizing, activation,
// DPI changes and a few system notifications, and it manages the
// windowed/fullscreen/borderless mode of game windows.

use crate::application::CursorTable;
use crate::event::{ApplicationEvents, CloseArgs};
use crate::input::HostInput;
use crate::msg::*;
use crate::platform::{CreateWindowParams, Platform, WindowPlacement};
use crate::{HostError, Rect, Result, WindowId};
use utils::log;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WindowType {
    /// The main game window, the only type that can change modes
    Game,
    /// Child window embedded in another window
    Viewport,
    Form,
    Dialog,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WindowMode {
    Windowed,
    Fullscreen,
    Borderless,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CursorType {
    None,
    Arrow,
    IBeam,
    Wait,
    Cross,
    UpArrow,
    SizeNWSE,
    SizeNESW,
    SizeWE,
    SizeNS,
    SizeAll,
    No,
    Hand,
    AppStarting,
    Help,
}

/// Native style bits of a window
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WindowStyle {
    pub style: u32,
    pub ex_style: u32,
}

/// Resolve the native style of a window
pub fn window_style(ty: WindowType, mode: WindowMode) -> WindowStyle {
    let (style, ex_style) = match (ty, mode) {
        (WindowType::Game, WindowMode::Windowed) => (
            WS_OVERLAPPEDWINDOW | WS_CLIPSIBLINGS | WS_CLIPCHILDREN,
            WS_EX_APPWINDOW,
        ),
        (WindowType::Game, WindowMode::Fullscreen | WindowMode::Borderless) => (
            WS_POPUP | WS_CLIPSIBLINGS | WS_CLIPCHILDREN,
            WS_EX_APPWINDOW | WS_EX_TOPMOST,
        ),
        (WindowType::Viewport, _) => (
            WS_CHILD | WS_CLIPSIBLINGS | WS_CLIPCHILDREN,
            WS_EX_TRANSPARENT,
        ),
        (WindowType::Form, _) => (WS_OVERLAPPEDWINDOW, WS_EX_APPWINDOW),
        (WindowType::Dialog, _) => (WS_CAPTION | WS_SYSMENU, WS_EX_DLGMODALFRAME),
    };

    WindowStyle {
        style: style,
        ex_style: ex_style,
    }
}

/// How the frame of a window answers WM_GETMINMAXINFO and WM_NCCALCSIZE.
///
/// Calls like SetWindowPos and ShowWindow send those synchronously, often
/// while the window is already borrowed. The platform keeps a copy of the
/// policy for every window and answers from it when the window can't be
/// reached.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct FramePolicy {
    /// Smallest outer size
    pub min_size: Option<(i32, i32)>,
    /// Largest client size
    pub max_size: Option<(i32, i32)>,
    /// Borderless game window, trimmed when maximized across monitors
    pub trim_maximized: bool,
}

impl FramePolicy {
    /// Fill in the track sizes, `border` is outer size minus client size
    pub fn apply_min_max(&self, info: &mut MinMaxInfo, border: (i32, i32)) {
        if let Some(min) = self.min_size {
            info.min_track_size = min;
        }
        if let Some((width, height)) = self.max_size {
            info.max_track_size = (width + border.0, height + border.1);
        }
    }

    /// How far the client area is inset on each side, None to keep the
    /// default frame
    pub fn maximized_trim<P: Platform>(&self, platform: &P, handle: NativeHandle) -> Option<(i32, i32)> {
        if !self.trim_maximized
            || !platform.is_maximized(handle)
            || platform.get_system_metric(SM_CMONITORS) <= 1
        {
            return None;
        }

        Some((
            platform.get_system_metric(SM_CXSIZEFRAME) + platform.get_system_metric(SM_CXPADDEDBORDER),
            platform.get_system_metric(SM_CYSIZEFRAME) + platform.get_system_metric(SM_CXPADDEDBORDER),
        ))
    }
}

/// Size of the frame around the client area of `handle`
pub fn frame_border<P: Platform>(platform: &P, handle: NativeHandle) -> (i32, i32) {
    match (platform.get_window_rect(handle), platform.get_client_rect(handle)) {
        (Some(bounds), Some(client)) => (
            bounds.width() - client.width(),
            bounds.height() - client.height(),
        ),
        _ => (0, 0),
    }
}

/// Parameters for `HostApplication::make_window`
#[derive(Debug, Clone, PartialEq)]
pub struct WindowDesc {
    pub title: String,
    pub window_type: WindowType,
    pub mode: WindowMode,
    /// Outer bounds in screen coordinates
    pub bounds: Rect<i32>,
    pub min_size: Option<(i32, i32)>,
    pub max_size: Option<(i32, i32)>,
    pub cursor: CursorType,
    pub input_enabled: bool,
    pub visible: bool,
    /// Required for viewports
    pub parent: Option<WindowId>,
}

impl WindowDesc {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            window_type: WindowType::Game,
            mode: WindowMode::Windowed,
            bounds: Rect::new(100, 100, 1280, 720),
            min_size: None,
            max_size: None,
            cursor: CursorType::Arrow,
            input_enabled: true,
            visible: true,
            parent: None,
        }
    }

    pub fn window_type(mut self, ty: WindowType) -> Self {
        self.window_type = ty;
        self
    }

    pub fn mode(mut self, mode: WindowMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn bounds(mut self, bounds: Rect<i32>) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn min_size(mut self, size: Option<(i32, i32)>) -> Self {
        self.min_size = size;
        self
    }

    pub fn max_size(mut self, size: Option<(i32, i32)>) -> Self {
        self.max_size = size;
        self
    }

    pub fn cursor(mut self, cursor: CursorType) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn input_enabled(mut self, enabled: bool) -> Self {
        self.input_enabled = enabled;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn parent(mut self, parent: Option<WindowId>) -> Self {
        self.parent = parent;
        self
    }
}

/// Everything a window handler may touch besides the window itself
pub(crate) struct WindowContext<'a, P: Platform, E: ApplicationEvents> {
    pub platform: &'a P,
    pub events: &'a mut E,
    pub input: &'a mut HostInput,
    pub cursors: &'a CursorTable,
    pub id: WindowId,
}

pub struct HostWindow {
    w_handle: NativeHandle,
    w_parent: Option<WindowId>,
    w_type: WindowType,
    w_mode: WindowMode,
    w_cursor: CursorType,
    w_min_size: Option<(i32, i32)>,
    w_max_size: Option<(i32, i32)>,
    /// Last known outer bounds, kept while minimized
    w_bounds: Rect<i32>,
    /// Last known client area, kept while minimized
    w_client_bounds: Rect<i32>,
    w_input_enabled: bool,
    w_closed: bool,
    w_active: bool,
    /// Between WM_ENTERSIZEMOVE and WM_EXITSIZEMOVE
    w_resizing: bool,
    /// First half of a UTF-16 surrogate pair from WM_CHAR
    w_high_surrogate: Option<u16>,
    /// Where the window was before leaving windowed mode
    w_placement: Option<WindowPlacement>,
}

impl HostWindow {
    /// Create the native window described by `desc`
    pub(crate) fn new<P: Platform>(
        platform: &P,
        desc: &WindowDesc,
        parent: Option<NativeHandle>,
    ) -> Result<Self> {
        if desc.window_type == WindowType::Viewport && parent.is_none() {
            log::error!("Viewport window \"{}\" has no parent", desc.title);
            return Err(HostError::WINDOW_CREATION_FAILED(desc.title.clone()));
        }

        // Only game windows have modes, everything else stays windowed
        let mode = match desc.window_type {
            WindowType::Game => desc.mode,
            _ => WindowMode::Windowed,
        };

        let policy = FramePolicy {
            min_size: desc.min_size,
            max_size: desc.max_size,
            trim_maximized: desc.window_type == WindowType::Game && mode == WindowMode::Borderless,
        };
        let handle = platform
            .create_window(&CreateWindowParams {
                title: &desc.title,
                style: window_style(desc.window_type, mode),
                bounds: desc.bounds,
                parent: parent,
                policy: policy,
            })
            .ok_or_else(|| HostError::WINDOW_CREATION_FAILED(desc.title.clone()))?;

        let mut ret = Self {
            w_handle: handle,
            w_parent: desc.parent,
            w_type: desc.window_type,
            w_mode: mode,
            w_cursor: desc.cursor,
            w_min_size: desc.min_size,
            w_max_size: desc.max_size,
            w_bounds: desc.bounds,
            w_client_bounds: Rect::new(0, 0, desc.bounds.width(), desc.bounds.height()),
            w_input_enabled: desc.input_enabled,
            w_closed: false,
            w_active: false,
            w_resizing: false,
            w_high_surrogate: None,
            w_placement: None,
        };

        if desc.visible {
            match mode {
                WindowMode::Windowed => platform.show_window(handle, SW_SHOW),
                _ => platform.show_window(handle, SW_SHOWMAXIMIZED),
            }
        }
        ret.refresh_bounds(platform);

        log::debug!("Created window {:?} \"{}\"", handle, desc.title);
        Ok(ret)
    }

    pub fn handle(&self) -> NativeHandle {
        self.w_handle
    }

    /// The window this one was created inside of
    pub fn parent(&self) -> Option<WindowId> {
        self.w_parent
    }

    pub fn frame_policy(&self) -> FramePolicy {
        FramePolicy {
            min_size: self.w_min_size,
            max_size: self.w_max_size,
            trim_maximized: self.w_type == WindowType::Game && self.w_mode == WindowMode::Borderless,
        }
    }

    fn publish_frame_policy<P: Platform>(&self, platform: &P) {
        platform.set_frame_policy(self.w_handle, self.frame_policy());
    }

    pub fn window_type(&self) -> WindowType {
        self.w_type
    }

    pub fn mode(&self) -> WindowMode {
        self.w_mode
    }

    pub fn cursor_type(&self) -> CursorType {
        self.w_cursor
    }

    /// The cursor shown over the client area, applied on the next
    /// WM_SETCURSOR
    pub fn set_cursor_type(&mut self, cursor: CursorType) {
        self.w_cursor = cursor;
    }

    pub fn min_size(&self) -> Option<(i32, i32)> {
        self.w_min_size
    }

    pub fn set_min_size<P: Platform>(&mut self, platform: &P, size: Option<(i32, i32)>) {
        self.w_min_size = size;
        self.publish_frame_policy(platform);
    }

    pub fn max_size(&self) -> Option<(i32, i32)> {
        self.w_max_size
    }

    pub fn set_max_size<P: Platform>(&mut self, platform: &P, size: Option<(i32, i32)>) {
        self.w_max_size = size;
        self.publish_frame_policy(platform);
    }

    pub fn is_closed(&self) -> bool {
        self.w_closed
    }

    pub fn is_active(&self) -> bool {
        self.w_active
    }

    pub fn is_resizing(&self) -> bool {
        self.w_resizing
    }

    pub fn is_input_enabled(&self) -> bool {
        self.w_input_enabled
    }

    /// When disabled, input messages skip translation entirely
    pub fn set_input_enabled(&mut self, enabled: bool) {
        self.w_input_enabled = enabled;
    }

    /// Ask to close the window.
    ///
    /// The game gets a chance to cancel. Returns true if the window is
    /// now closed.
    pub(crate) fn close<P: Platform, E: ApplicationEvents>(
        &mut self,
        cx: &mut WindowContext<P, E>,
    ) -> bool {
        if self.w_closed {
            return true;
        }

        let mut args = CloseArgs::default();
        cx.events.on_window_close(cx.id, &mut args);
        if args.cancel {
            log::debug!("Close of {:?} was cancelled", self.w_handle);
            return false;
        }

        cx.input.forget_window(cx.platform, self.w_handle);
        if !cx.platform.destroy_window(self.w_handle) {
            log::error!("DestroyWindow failed for {:?}", self.w_handle);
        }
        self.w_handle = NativeHandle::NULL;
        self.w_closed = true;
        return true;
    }

    /// Tear down without asking, used when the application exits
    pub(crate) fn destroy<P: Platform>(&mut self, platform: &P, input: &mut HostInput) {
        if self.w_closed {
            return;
        }
        input.forget_window(platform, self.w_handle);
        platform.destroy_window(self.w_handle);
        self.w_handle = NativeHandle::NULL;
        self.w_closed = true;
    }

    pub fn minimize<P: Platform>(&self, platform: &P) {
        platform.show_window(self.w_handle, SW_MINIMIZE);
    }

    pub fn maximize<P: Platform>(&self, platform: &P) {
        platform.show_window(self.w_handle, SW_SHOWMAXIMIZED);
    }

    pub fn restore<P: Platform>(&self, platform: &P) {
        platform.show_window(self.w_handle, SW_RESTORE);
    }

    pub fn bring_to_front<P: Platform>(&self, platform: &P) {
        if !platform.bring_to_front(self.w_handle) {
            log::error!("BringWindowToTop failed for {:?}", self.w_handle);
        }
    }

    pub fn focus<P: Platform>(&self, platform: &P) {
        if !platform.set_focus(self.w_handle) {
            log::error!("SetFocus failed for {:?}", self.w_handle);
        }
    }

    pub fn activate<P: Platform>(&self, platform: &P) {
        if !platform.set_foreground(self.w_handle) {
            log::error!("SetForegroundWindow failed for {:?}", self.w_handle);
        }
    }

    pub fn is_minimized<P: Platform>(&self, platform: &P) -> bool {
        platform.is_minimized(self.w_handle)
    }

    pub fn is_maximized<P: Platform>(&self, platform: &P) -> bool {
        platform.is_maximized(self.w_handle)
    }

    pub fn is_visible<P: Platform>(&self, platform: &P) -> bool {
        platform.is_window_visible(self.w_handle)
    }

    pub fn set_visible<P: Platform>(&self, platform: &P, visible: bool) {
        match visible {
            true => platform.show_window(self.w_handle, SW_SHOW),
            false => platform.show_window(self.w_handle, SW_HIDE),
        }
    }

    pub fn is_enabled<P: Platform>(&self, platform: &P) -> bool {
        platform.is_window_enabled(self.w_handle)
    }

    pub fn set_enabled<P: Platform>(&self, platform: &P, enabled: bool) {
        platform.enable_window(self.w_handle, enabled);
    }

    pub fn title<P: Platform>(&self, platform: &P) -> String {
        platform.get_window_text(self.w_handle)
    }

    pub fn set_title<P: Platform>(&self, platform: &P, title: &str) {
        if !platform.set_window_text(self.w_handle, title) {
            log::error!("SetWindowText failed for {:?}", self.w_handle);
        }
    }

    /// Switch between windowed, fullscreen and borderless.
    ///
    /// Only game windows have modes, for any other type this logs and
    /// does nothing.
    pub fn set_mode<P: Platform>(&mut self, platform: &P, mode: WindowMode) {
        if self.w_type != WindowType::Game {
            log::error!(
                "Cannot set mode {:?} on a {:?} window, only game windows have modes",
                mode,
                self.w_type
            );
            return;
        }
        if mode == self.w_mode {
            return;
        }

        if self.w_mode == WindowMode::Windowed {
            self.w_placement = platform.get_window_placement(self.w_handle);
        }
        self.w_mode = mode;
        // Before the style change, it recalculates the frame
        self.publish_frame_policy(platform);

        if !platform.set_window_style(self.w_handle, window_style(self.w_type, mode)) {
            log::error!("Could not change the style of {:?}", self.w_handle);
        }

        match mode {
            WindowMode::Windowed => {
                if let Some(placement) = self.w_placement.take() {
                    platform.set_window_placement(self.w_handle, &placement);
                }
            }
            WindowMode::Fullscreen | WindowMode::Borderless => {
                // Re-apply the position so the new frame takes effect
                let bounds = self.bounds(platform);
                platform.set_window_pos(self.w_handle, bounds);
                platform.show_window(self.w_handle, SW_SHOWMAXIMIZED);
            }
        }
        self.refresh_bounds(platform);
    }

    fn refresh_bounds<P: Platform>(&mut self, platform: &P) {
        if platform.is_minimized(self.w_handle) {
            return;
        }
        if let Some(bounds) = platform.get_window_rect(self.w_handle) {
            self.w_bounds = bounds;
        }
        if let Some(client) = platform.get_client_rect(self.w_handle) {
            self.w_client_bounds = client;
        }
    }

    /// Outer bounds in screen coordinates.
    ///
    /// While minimized this is where the window was before.
    pub fn bounds<P: Platform>(&mut self, platform: &P) -> Rect<i32> {
        self.refresh_bounds(platform);
        self.w_bounds
    }

    /// Client area, the origin is always (0, 0)
    pub fn client_bounds<P: Platform>(&mut self, platform: &P) -> Rect<i32> {
        self.refresh_bounds(platform);
        self.w_client_bounds
    }

    pub fn set_bounds<P: Platform>(&mut self, platform: &P, bounds: Rect<i32>) {
        if !platform.set_window_pos(self.w_handle, bounds) {
            log::error!("SetWindowPos failed for {:?}", self.w_handle);
        }
        self.refresh_bounds(platform);
    }

    /// Handle a message input translation didn't
    pub(crate) fn process_message<P: Platform, E: ApplicationEvents>(
        &mut self,
        cx: &mut WindowContext<P, E>,
        msg: &NativeMessage,
        payload: MessagePayload<'_>,
    ) -> WindowMessageResult {
        match msg.msg {
            WM_CLOSE => {
                self.close(cx);
                WindowMessageResult::Handled(0)
            }
            WM_DESTROY => {
                // Destroyed from outside, e.g. along with its parent
                if !self.w_closed {
                    cx.input.forget_window(cx.platform, self.w_handle);
                    self.w_handle = NativeHandle::NULL;
                    self.w_closed = true;
                }
                WindowMessageResult::Handled(0)
            }
            WM_CHAR => self.handle_char(cx, msg),
            WM_DPICHANGED => {
                let dpi = loword(msg.wparam) as u32;
                if let MessagePayload::SuggestedRect(rect) = payload {
                    cx.platform.set_window_pos(self.w_handle, rect);
                    self.refresh_bounds(cx.platform);
                }
                cx.events
                    .on_window_dpi_changed(cx.id, dpi, dpi as f32 / USER_DEFAULT_SCREEN_DPI as f32);
                WindowMessageResult::Handled(0)
            }
            WM_SIZE => {
                if msg.wparam != SIZE_MINIMIZED && !self.w_resizing {
                    self.refresh_bounds(cx.platform);
                    cx.events.on_window_size_changed(
                        cx.id,
                        loword(msg.lparam as usize) as i32,
                        hiword(msg.lparam as usize) as i32,
                    );
                }
                WindowMessageResult::Handled(0)
            }
            WM_MOVE => {
                if !self.w_resizing && !cx.platform.is_minimized(self.w_handle) {
                    self.refresh_bounds(cx.platform);
                    cx.events.on_window_location_changed(
                        cx.id,
                        get_x_lparam(msg.lparam),
                        get_y_lparam(msg.lparam),
                    );
                }
                WindowMessageResult::Handled(0)
            }
            WM_ENTERSIZEMOVE => {
                self.w_resizing = true;
                cx.events.on_window_resize_started(cx.id);
                WindowMessageResult::Handled(0)
            }
            WM_EXITSIZEMOVE => {
                self.w_resizing = false;
                let bounds = self.bounds(cx.platform);
                cx.events.on_window_resize_completed(cx.id, bounds);
                WindowMessageResult::Handled(0)
            }
            WM_GETMINMAXINFO => match payload {
                MessagePayload::MinMaxInfo(info) => {
                    let border = frame_border(cx.platform, self.w_handle);
                    self.frame_policy().apply_min_max(info, border);
                    WindowMessageResult::Handled(0)
                }
                _ => WindowMessageResult::Unhandled,
            },
            WM_NCCALCSIZE => match payload {
                MessagePayload::NcCalcSize(rect) => {
                    match self.frame_policy().maximized_trim(cx.platform, self.w_handle) {
                        Some((dx, dy)) => {
                            *rect = rect.inset(dx, dy);
                            WindowMessageResult::Handled(0)
                        }
                        None => WindowMessageResult::Unhandled,
                    }
                }
                _ => WindowMessageResult::Unhandled,
            },
            WM_ACTIVATE => {
                let active = loword(msg.wparam) != WA_INACTIVE;
                self.w_active = active;
                cx.input
                    .on_window_activated(cx.platform, self.w_handle, active);
                cx.events.on_window_activated(cx.id, active);
                // Default processing moves keyboard focus
                WindowMessageResult::Unhandled
            }
            WM_ACTIVATEAPP => {
                cx.input
                    .on_application_activated(cx.platform, msg.wparam != 0);
                WindowMessageResult::Handled(0)
            }
            WM_SETCURSOR => {
                if loword(msg.lparam as usize) != HTCLIENT {
                    return WindowMessageResult::Unhandled;
                }
                match cx.input.is_tracking(self.w_handle) {
                    true => cx.platform.set_cursor(CursorHandle::NULL),
                    false => cx.platform.set_cursor(cx.cursors.get(self.w_cursor)),
                }
                WindowMessageResult::Handled(1)
            }
            WM_SYSCOMMAND => match msg.wparam & 0xFFF0 {
                SC_SCREENSAVE | SC_MONITORPOWER => WindowMessageResult::Handled(0),
                // No system menu popping up when a game uses Alt
                SC_KEYMENU if self.w_type == WindowType::Game => WindowMessageResult::Handled(0),
                _ => WindowMessageResult::Unhandled,
            },
            WM_ENDSESSION => {
                if msg.wparam != 0 {
                    cx.events
                        .on_end_session(msg.lparam as u32 & ENDSESSION_LOGOFF != 0);
                }
                WindowMessageResult::Handled(0)
            }
            WM_POWERBROADCAST => {
                match msg.wparam {
                    PBT_APMSUSPEND => cx.events.on_system_suspending(),
                    PBT_APMRESUMESUSPEND | PBT_APMRESUMEAUTOMATIC => cx.events.on_system_resuming(),
                    _ => {}
                }
                WindowMessageResult::Handled(1)
            }
            WM_DISPLAYCHANGE => {
                cx.events.on_display_change();
                WindowMessageResult::Unhandled
            }
            _ => WindowMessageResult::Unhandled,
        }
    }

    fn handle_char<P: Platform, E: ApplicationEvents>(
        &mut self,
        cx: &mut WindowContext<P, E>,
        msg: &NativeMessage,
    ) -> WindowMessageResult {
        let unit = msg.wparam as u16;
        let repeat = hiword(msg.lparam as usize) & KF_REPEAT != 0;

        let character = match unit {
            0xD800..=0xDBFF => {
                self.w_high_surrogate = Some(unit);
                return WindowMessageResult::Handled(0);
            }
            0xDC00..=0xDFFF => match self.w_high_surrogate.take() {
                Some(high) => char::decode_utf16([high, unit])
                    .next()
                    .and_then(|r| r.ok()),
                None => None,
            },
            _ => {
                self.w_high_surrogate = None;
                char::from_u32(unit as u32)
            }
        };

        match character {
            Some(c) => cx.events.on_character(cx.id, c, repeat),
            None => log::debug!("Dropping unpaired surrogate {:#x}", unit),
        }
        WindowMessageResult::Handled(0)
    }
}
