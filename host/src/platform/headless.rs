/// Headless Platform
///
/// An in-memory stand-in for the native window system. Windows are plain
/// records, the message queue is filled by the caller, and the cursor,
/// keyboard, raw input and controllers are whatever the caller set them
/// to. This is what the host's tests run against, and what the binary
/// falls back to off Windows.
///
/// Nothing here ever has a sink to send to outside of `pump_message`, so
/// the calls that send messages on Windows behave like they do there when
/// the window is busy: notifications are saved for the next pump and the
/// frame messages are answered from the window's `FramePolicy`.
use super::{
    is_deferred, CreateWindowParams, DeferredMessage, MessageSink, Platform, RawMouse,
    WindowPlacement,
};
use crate::display::{DisplayDevice, MonitorInfo};
use crate::gamepad::{GamepadState, XUSER_MAX_COUNT};
use crate::msg::*;
use crate::window::{frame_border, FramePolicy, WindowStyle};
use crate::Rect;

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use utils::log;

/// Frame of a captioned window: left, top, right, bottom
const CAPTION_BORDER: (i32, i32, i32, i32) = (8, 31, 8, 8);

#[derive(Debug, Clone)]
struct FakeWindow {
    fw_title: String,
    fw_style: WindowStyle,
    fw_parent: Option<NativeHandle>,
    /// Outer bounds in screen coordinates
    fw_bounds: Rect<i32>,
    /// Bounds to go back to when restored
    fw_normal: Rect<i32>,
    fw_visible: bool,
    fw_enabled: bool,
    fw_minimized: bool,
    fw_maximized: bool,
    fw_policy: FramePolicy,
    /// Client inset from the last WM_NCCALCSIZE
    fw_client_trim: (i32, i32),
}

impl FakeWindow {
    fn border(&self) -> (i32, i32, i32, i32) {
        match self.fw_style.style & WS_CAPTION == WS_CAPTION {
            true => CAPTION_BORDER,
            false => (0, 0, 0, 0),
        }
    }

    fn client_size(&self) -> (i32, i32) {
        let b = self.border();
        let (tx, ty) = self.fw_client_trim;
        (
            utils::partial_max(self.fw_bounds.width() - b.0 - b.2 - 2 * tx, 0),
            utils::partial_max(self.fw_bounds.height() - b.1 - b.3 - 2 * ty, 0),
        )
    }
}

struct HeadlessState {
    hs_queue: VecDeque<NativeMessage>,
    hs_deferred: Vec<DeferredMessage>,
    hs_class_registered: bool,
    hs_fail_class_registration: bool,
    hs_next_handle: isize,
    hs_windows: HashMap<NativeHandle, FakeWindow>,
    hs_foreground: Option<NativeHandle>,
    hs_focus: Option<NativeHandle>,
    hs_cursor: CursorHandle,
    hs_cursor_pos: (i32, i32),
    hs_clip: Option<Rect<i32>>,
    hs_leave_tracked: HashSet<NativeHandle>,
    hs_raw_target: Option<NativeHandle>,
    hs_fail_raw_registration: bool,
    hs_raw_input: VecDeque<RawMouse>,
    hs_keys_down: HashSet<u32>,
    hs_gamepads: [Option<GamepadState>; XUSER_MAX_COUNT as usize],
    hs_metrics: HashMap<i32, i32>,
    hs_devices: Vec<DisplayDevice>,
    hs_monitors: Vec<MonitorInfo>,
    hs_fatal_errors: Vec<String>,
}

pub struct HeadlessPlatform {
    hp_state: RefCell<HeadlessState>,
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessPlatform {
    /// A single 1920x1080 display with nothing connected
    pub fn new() -> Self {
        let metrics = [
            (SM_CXSCREEN, 1920),
            (SM_CYSCREEN, 1080),
            (SM_XVIRTUALSCREEN, 0),
            (SM_YVIRTUALSCREEN, 0),
            (SM_CXVIRTUALSCREEN, 1920),
            (SM_CYVIRTUALSCREEN, 1080),
            (SM_CMONITORS, 1),
            (SM_CXSIZEFRAME, 4),
            (SM_CYSIZEFRAME, 4),
            (SM_CXPADDEDBORDER, 4),
        ];

        Self {
            hp_state: RefCell::new(HeadlessState {
                hs_queue: VecDeque::new(),
                hs_deferred: Vec::new(),
                hs_class_registered: false,
                hs_fail_class_registration: false,
                hs_next_handle: 0x100,
                hs_windows: HashMap::new(),
                hs_foreground: None,
                hs_focus: None,
                hs_cursor: CursorHandle::NULL,
                hs_cursor_pos: (0, 0),
                hs_clip: None,
                hs_leave_tracked: HashSet::new(),
                hs_raw_target: None,
                hs_fail_raw_registration: false,
                hs_raw_input: VecDeque::new(),
                hs_keys_down: HashSet::new(),
                hs_gamepads: [None; XUSER_MAX_COUNT as usize],
                hs_metrics: metrics.iter().copied().collect(),
                hs_devices: Vec::new(),
                hs_monitors: Vec::new(),
                hs_fatal_errors: Vec::new(),
            }),
        }
    }

    /// Queue a message for the next pump
    pub fn post_message(&self, message: NativeMessage) {
        self.hp_state.borrow_mut().hs_queue.push_back(message);
    }

    /// Send a message from outside the pump, the way the system does.
    ///
    /// Notifications are saved for the next pump, anything else only gets
    /// default processing.
    pub fn send_message(&self, message: NativeMessage, suggested_rect: Option<Rect<i32>>) {
        if !is_deferred(message.msg) {
            log::debug!("Default processing for sent message {:#x}", message.msg);
            return;
        }
        self.hp_state.borrow_mut().hs_deferred.push(DeferredMessage {
            message: message,
            suggested_rect: suggested_rect,
        });
    }

    pub fn frame_policy(&self, handle: NativeHandle) -> Option<FramePolicy> {
        self.hp_state
            .borrow()
            .hs_windows
            .get(&handle)
            .map(|w| w.fw_policy)
    }

    /// Queue a raw mouse record for the next WM_INPUT
    pub fn push_raw_mouse(&self, raw: RawMouse) {
        self.hp_state.borrow_mut().hs_raw_input.push_back(raw);
    }

    pub fn set_key_down(&self, vk: u32, down: bool) {
        let mut state = self.hp_state.borrow_mut();
        match down {
            true => state.hs_keys_down.insert(vk),
            false => state.hs_keys_down.remove(&vk),
        };
    }

    pub fn set_gamepad(&self, slot: u32, gamepad: Option<GamepadState>) {
        self.hp_state.borrow_mut().hs_gamepads[slot as usize] = gamepad;
    }

    pub fn set_metric(&self, index: i32, value: i32) {
        self.hp_state.borrow_mut().hs_metrics.insert(index, value);
    }

    pub fn add_display_device(&self, device: DisplayDevice) {
        self.hp_state.borrow_mut().hs_devices.push(device);
    }

    pub fn add_monitor(&self, monitor: MonitorInfo) {
        self.hp_state.borrow_mut().hs_monitors.push(monitor);
    }

    /// Make the next class registration fail
    pub fn fail_class_registration(&self, fail: bool) {
        self.hp_state.borrow_mut().hs_fail_class_registration = fail;
    }

    /// Make raw input registration fail
    pub fn fail_raw_registration(&self, fail: bool) {
        self.hp_state.borrow_mut().hs_fail_raw_registration = fail;
    }

    pub fn is_class_registered(&self) -> bool {
        self.hp_state.borrow().hs_class_registered
    }

    pub fn window_exists(&self, handle: NativeHandle) -> bool {
        self.hp_state.borrow().hs_windows.contains_key(&handle)
    }

    pub fn window_count(&self) -> usize {
        self.hp_state.borrow().hs_windows.len()
    }

    pub fn window_style(&self, handle: NativeHandle) -> Option<WindowStyle> {
        self.hp_state
            .borrow()
            .hs_windows
            .get(&handle)
            .map(|w| w.fw_style)
    }

    /// Minimize or restore without going through ShowWindow's bookkeeping
    pub fn set_minimized(&self, handle: NativeHandle, minimized: bool) {
        if let Some(w) = self.hp_state.borrow_mut().hs_windows.get_mut(&handle) {
            w.fw_minimized = minimized;
        }
    }

    pub fn set_maximized(&self, handle: NativeHandle, maximized: bool) {
        if let Some(w) = self.hp_state.borrow_mut().hs_windows.get_mut(&handle) {
            w.fw_maximized = maximized;
        }
    }

    pub fn cursor(&self) -> CursorHandle {
        self.hp_state.borrow().hs_cursor
    }

    pub fn cursor_clip(&self) -> Option<Rect<i32>> {
        self.hp_state.borrow().hs_clip
    }

    pub fn cursor_pos(&self) -> (i32, i32) {
        self.hp_state.borrow().hs_cursor_pos
    }

    pub fn raw_input_target(&self) -> Option<NativeHandle> {
        self.hp_state.borrow().hs_raw_target
    }

    pub fn is_leave_tracked(&self, handle: NativeHandle) -> bool {
        self.hp_state.borrow().hs_leave_tracked.contains(&handle)
    }

    pub fn foreground(&self) -> Option<NativeHandle> {
        self.hp_state.borrow().hs_foreground
    }

    pub fn fatal_errors(&self) -> Vec<String> {
        self.hp_state.borrow().hs_fatal_errors.clone()
    }

    fn with_window<T>(&self, handle: NativeHandle, f: impl FnOnce(&mut FakeWindow) -> T) -> Option<T> {
        self.hp_state.borrow_mut().hs_windows.get_mut(&handle).map(f)
    }

    /// What WM_NCCALCSIZE does after a frame change
    fn recalc_frame(&self, handle: NativeHandle) {
        let policy = match self.frame_policy(handle) {
            Some(p) => p,
            None => return,
        };
        let trim = policy.maximized_trim(self, handle).unwrap_or((0, 0));
        self.with_window(handle, |w| w.fw_client_trim = trim);
    }

    /// What WM_GETMINMAXINFO does to a requested outer size
    fn track_size(&self, handle: NativeHandle, width: i32, height: i32) -> (i32, i32) {
        let policy = match self.frame_policy(handle) {
            Some(p) => p,
            None => return (width, height),
        };
        let mut info = MinMaxInfo {
            min_track_size: (0, 0),
            max_track_size: (i32::MAX, i32::MAX),
        };
        policy.apply_min_max(&mut info, frame_border(self, handle));

        (
            utils::partial_clamp(width, info.min_track_size.0, info.max_track_size.0),
            utils::partial_clamp(height, info.min_track_size.1, info.max_track_size.1),
        )
    }

    fn screen_rect(&self) -> Rect<i32> {
        Rect::new(
            0,
            0,
            self.get_system_metric(SM_CXSCREEN),
            self.get_system_metric(SM_CYSCREEN),
        )
    }
}

impl Platform for HeadlessPlatform {
    fn pump_message<S: MessageSink + AsRef<Self>>(sink: &mut S) -> bool {
        let queued = <S as AsRef<Self>>::as_ref(sink)
            .hp_state
            .borrow_mut()
            .hs_queue
            .pop_front();
        match queued {
            Some(message) => {
                sink.dispatch_message(message, MessagePayload::None);
                true
            }
            None => false,
        }
    }

    fn take_deferred_messages(&self) -> Vec<DeferredMessage> {
        std::mem::take(&mut self.hp_state.borrow_mut().hs_deferred)
    }

    fn set_frame_policy(&self, handle: NativeHandle, policy: FramePolicy) {
        self.with_window(handle, |w| w.fw_policy = policy);
    }

    fn register_window_class(&self) -> bool {
        let mut state = self.hp_state.borrow_mut();
        if state.hs_fail_class_registration {
            return false;
        }
        state.hs_class_registered = true;
        true
    }

    fn create_window(&self, params: &CreateWindowParams) -> Option<NativeHandle> {
        let mut state = self.hp_state.borrow_mut();
        if !state.hs_class_registered {
            log::error!("Creating a window before the class was registered");
            return None;
        }
        if let Some(parent) = params.parent {
            if !state.hs_windows.contains_key(&parent) {
                return None;
            }
        }

        let handle = NativeHandle(state.hs_next_handle);
        state.hs_next_handle += 1;
        state.hs_windows.insert(
            handle,
            FakeWindow {
                fw_title: params.title.to_string(),
                fw_style: params.style,
                fw_parent: params.parent,
                fw_bounds: params.bounds,
                fw_normal: params.bounds,
                fw_visible: false,
                fw_enabled: true,
                fw_minimized: false,
                fw_maximized: false,
                fw_policy: params.policy,
                fw_client_trim: (0, 0),
            },
        );
        Some(handle)
    }

    fn destroy_window(&self, handle: NativeHandle) -> bool {
        let mut state = self.hp_state.borrow_mut();
        if !state.hs_windows.contains_key(&handle) {
            return false;
        }

        // Descendants go with it, parents hear about it first
        let mut doomed = vec![handle];
        let mut next = 0;
        while next < doomed.len() {
            let parent = doomed[next];
            doomed.extend(
                state
                    .hs_windows
                    .iter()
                    .filter(|(_, w)| w.fw_parent == Some(parent))
                    .map(|(h, _)| *h),
            );
            next += 1;
        }

        for h in doomed {
            state.hs_windows.remove(&h);
            state.hs_leave_tracked.remove(&h);
            if state.hs_foreground == Some(h) {
                state.hs_foreground = None;
            }
            if state.hs_focus == Some(h) {
                state.hs_focus = None;
            }
            state
                .hs_deferred
                .push(DeferredMessage::new(NativeMessage::new(h, WM_DESTROY, 0, 0)));
        }
        true
    }

    fn show_window(&self, handle: NativeHandle, cmd: i32) {
        let screen = self.screen_rect();
        self.with_window(handle, |w| match cmd {
            SW_HIDE => w.fw_visible = false,
            SW_MINIMIZE => {
                w.fw_visible = true;
                w.fw_minimized = true;
            }
            SW_SHOWMAXIMIZED => {
                if !w.fw_maximized && !w.fw_minimized {
                    w.fw_normal = w.fw_bounds;
                }
                w.fw_visible = true;
                w.fw_minimized = false;
                w.fw_maximized = true;
                w.fw_bounds = screen;
            }
            SW_RESTORE | SW_SHOWNORMAL => {
                w.fw_visible = true;
                w.fw_minimized = false;
                if w.fw_maximized {
                    w.fw_maximized = false;
                    w.fw_bounds = w.fw_normal;
                }
            }
            _ => w.fw_visible = true,
        });
        self.recalc_frame(handle);
    }

    fn is_window_visible(&self, handle: NativeHandle) -> bool {
        self.with_window(handle, |w| w.fw_visible).unwrap_or(false)
    }

    fn enable_window(&self, handle: NativeHandle, enable: bool) {
        self.with_window(handle, |w| w.fw_enabled = enable);
    }

    fn is_window_enabled(&self, handle: NativeHandle) -> bool {
        self.with_window(handle, |w| w.fw_enabled).unwrap_or(false)
    }

    fn is_minimized(&self, handle: NativeHandle) -> bool {
        self.with_window(handle, |w| w.fw_minimized).unwrap_or(false)
    }

    fn is_maximized(&self, handle: NativeHandle) -> bool {
        self.with_window(handle, |w| w.fw_maximized).unwrap_or(false)
    }

    fn set_foreground(&self, handle: NativeHandle) -> bool {
        if !self.window_exists(handle) {
            return false;
        }
        let mut state = self.hp_state.borrow_mut();
        state.hs_foreground = Some(handle);
        state.hs_focus = Some(handle);
        true
    }

    fn set_focus(&self, handle: NativeHandle) -> bool {
        if !self.window_exists(handle) {
            return false;
        }
        self.hp_state.borrow_mut().hs_focus = Some(handle);
        true
    }

    fn bring_to_front(&self, handle: NativeHandle) -> bool {
        self.window_exists(handle)
    }

    fn get_window_rect(&self, handle: NativeHandle) -> Option<Rect<i32>> {
        self.with_window(handle, |w| match w.fw_minimized {
            // Where Windows parks minimized windows
            true => Rect::new(-32000, -32000, 160, 28),
            false => w.fw_bounds,
        })
    }

    fn get_client_rect(&self, handle: NativeHandle) -> Option<Rect<i32>> {
        self.with_window(handle, |w| match w.fw_minimized {
            true => Rect::new(0, 0, 0, 0),
            false => {
                let (width, height) = w.client_size();
                Rect::new(0, 0, width, height)
            }
        })
    }

    fn client_rect_to_screen(&self, handle: NativeHandle) -> Option<Rect<i32>> {
        self.with_window(handle, |w| {
            let b = w.border();
            let (tx, ty) = w.fw_client_trim;
            let (width, height) = w.client_size();
            Rect::new(
                w.fw_bounds.left() + b.0 + tx,
                w.fw_bounds.top() + b.1 + ty,
                width,
                height,
            )
        })
    }

    fn set_window_pos(&self, handle: NativeHandle, bounds: Rect<i32>) -> bool {
        let (width, height) = self.track_size(handle, bounds.width(), bounds.height());
        let bounds = Rect::new(bounds.left(), bounds.top(), width, height);
        let ret = self.with_window(handle, |w| w.fw_bounds = bounds).is_some();
        self.recalc_frame(handle);
        ret
    }

    fn set_window_style(&self, handle: NativeHandle, style: WindowStyle) -> bool {
        let ret = self.with_window(handle, |w| w.fw_style = style).is_some();
        // SWP_FRAMECHANGED
        self.recalc_frame(handle);
        ret
    }

    fn get_window_placement(&self, handle: NativeHandle) -> Option<WindowPlacement> {
        self.with_window(handle, |w| WindowPlacement {
            show_cmd: match (w.fw_minimized, w.fw_maximized) {
                (true, _) => SW_MINIMIZE,
                (false, true) => SW_SHOWMAXIMIZED,
                _ => SW_SHOWNORMAL,
            },
            normal_position: match w.fw_maximized {
                true => w.fw_normal,
                false => w.fw_bounds,
            },
        })
    }

    fn set_window_placement(&self, handle: NativeHandle, placement: &WindowPlacement) -> bool {
        let screen = self.screen_rect();
        let ret = self.with_window(handle, |w| {
            w.fw_normal = placement.normal_position;
            w.fw_minimized = placement.show_cmd == SW_MINIMIZE;
            w.fw_maximized = placement.show_cmd == SW_SHOWMAXIMIZED;
            w.fw_bounds = match w.fw_maximized {
                true => screen,
                false => placement.normal_position,
            };
        })
        .is_some();
        self.recalc_frame(handle);
        ret
    }

    fn get_window_text(&self, handle: NativeHandle) -> String {
        self.with_window(handle, |w| w.fw_title.clone())
            .unwrap_or_default()
    }

    fn set_window_text(&self, handle: NativeHandle, text: &str) -> bool {
        self.with_window(handle, |w| w.fw_title = text.to_string())
            .is_some()
    }

    fn load_system_cursor(&self, id: u32) -> CursorHandle {
        CursorHandle(id as isize)
    }

    fn set_cursor(&self, cursor: CursorHandle) {
        self.hp_state.borrow_mut().hs_cursor = cursor;
    }

    fn get_cursor_pos(&self) -> Option<(i32, i32)> {
        Some(self.hp_state.borrow().hs_cursor_pos)
    }

    fn set_cursor_pos(&self, x: i32, y: i32) -> bool {
        self.hp_state.borrow_mut().hs_cursor_pos = (x, y);
        true
    }

    fn clip_cursor(&self, rect: Option<Rect<i32>>) -> bool {
        let mut state = self.hp_state.borrow_mut();
        state.hs_clip = rect;
        if let Some(clip) = rect {
            let (x, y) = state.hs_cursor_pos;
            state.hs_cursor_pos = (
                utils::partial_clamp(x, clip.left(), clip.right() - 1),
                utils::partial_clamp(y, clip.top(), clip.bottom() - 1),
            );
        }
        true
    }

    fn track_mouse_leave(&self, handle: NativeHandle) -> bool {
        if !self.window_exists(handle) {
            return false;
        }
        self.hp_state.borrow_mut().hs_leave_tracked.insert(handle);
        true
    }

    fn register_raw_mouse(&self, target: Option<NativeHandle>) -> bool {
        let mut state = self.hp_state.borrow_mut();
        if target.is_some() && state.hs_fail_raw_registration {
            return false;
        }
        state.hs_raw_target = target;
        true
    }

    fn read_raw_mouse(&self, _lparam: isize) -> Option<RawMouse> {
        self.hp_state.borrow_mut().hs_raw_input.pop_front()
    }

    fn map_scan_code(&self, scan_code: u32) -> u32 {
        match scan_code {
            0x2A => VK_LSHIFT,
            0x36 => VK_RSHIFT,
            0x1D => VK_LCONTROL,
            0xE01D => VK_RCONTROL,
            0x38 => VK_LMENU,
            0xE038 => VK_RMENU,
            _ => 0,
        }
    }

    fn is_key_down(&self, vk: u32) -> bool {
        self.hp_state.borrow().hs_keys_down.contains(&vk)
    }

    fn get_gamepad_state(&self, slot: u32) -> Option<GamepadState> {
        self.hp_state
            .borrow()
            .hs_gamepads
            .get(slot as usize)
            .copied()
            .flatten()
    }

    fn get_system_metric(&self, index: i32) -> i32 {
        self.hp_state
            .borrow()
            .hs_metrics
            .get(&index)
            .copied()
            .unwrap_or(0)
    }

    fn enum_display_devices(&self) -> Vec<DisplayDevice> {
        self.hp_state.borrow().hs_devices.clone()
    }

    fn enum_monitors(&self) -> Vec<MonitorInfo> {
        self.hp_state.borrow().hs_monitors.clone()
    }

    fn show_fatal_error(&self, title: &str, message: &str) {
        log::error!("{}: {}", title, message);
        self.hp_state
            .borrow_mut()
            .hs_fatal_errors
            .push(message.to_string());
    }

    fn module_handle(&self) -> isize {
        0
    }
}
