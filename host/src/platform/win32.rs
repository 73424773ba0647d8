// Win32 Platform
//
// The real thing, on top of windows-sys. Messages reach us through the
// class window procedure, which forwards them to the MessageSink that is
// currently pumping. A sink is installed for the whole of `pump_message`,
// so messages sent from inside PeekMessageW get to it too, and taken away
// while one of its handlers runs so nothing can re-enter it.
//
// Messages that find no sink are sent from inside a call the host made.
// Notifications are saved for replay, WM_GETMINMAXINFO and WM_NCCALCSIZE
// are answered from the window's FramePolicy, everything else gets default
// processing.

#![allow(non_snake_case)]

use super::{
    is_deferred, CreateWindowParams, DeferredMessage, MessageSink, Platform, RawMouse,
    WindowPlacement,
};
use crate::display::{DisplayDevice, DisplayOrientation, MonitorInfo};
use crate::gamepad::{GamepadButtons, GamepadState};
use crate::msg::*;
use crate::window::{frame_border, FramePolicy, WindowStyle};
use crate::Rect;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::mem::size_of;
use utils::log;

use windows_sys::Win32::Foundation::{
    BOOL, ERROR_SUCCESS, HWND, LPARAM, LRESULT, POINT, RECT, WPARAM,
};
use windows_sys::Win32::Graphics::Gdi::{
    ClientToScreen, EnumDisplayDevicesW, EnumDisplayMonitors, EnumDisplaySettingsExW,
    GetMonitorInfoW, DEVMODEW, DISPLAY_DEVICEW, ENUM_CURRENT_SETTINGS, HDC, HMONITOR,
    MONITORINFO, MONITORINFOEXW,
};
use windows_sys::Win32::System::LibraryLoader::GetModuleHandleW;
use windows_sys::Win32::UI::HiDpi::{
    SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
};
use windows_sys::Win32::UI::Input::KeyboardAndMouse::{
    EnableWindow, GetAsyncKeyState, IsWindowEnabled, MapVirtualKeyW, SetFocus, TrackMouseEvent,
    TME_LEAVE, TRACKMOUSEEVENT,
};
use windows_sys::Win32::UI::Input::XboxController::{XInputGetState, XINPUT_STATE};
use windows_sys::Win32::UI::Input::{
    GetRawInputData, RegisterRawInputDevices, RAWINPUT, RAWINPUTDEVICE, RAWINPUTHEADER,
    RIDEV_REMOVE, RID_INPUT, RIM_TYPEMOUSE,
};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    BringWindowToTop, ClipCursor, CreateWindowExW, DefWindowProcW, DestroyWindow,
    DispatchMessageW, GetClientRect, GetCursorPos, GetSystemMetrics, GetWindowPlacement,
    GetWindowRect, GetWindowTextLengthW, GetWindowTextW, IsIconic, IsWindowVisible, IsZoomed,
    LoadCursorW, MessageBoxW, PeekMessageW, RegisterClassExW, SetCursor, SetCursorPos,
    SetForegroundWindow, SetWindowLongW, SetWindowPlacement, SetWindowPos, SetWindowTextW,
    ShowWindow, TranslateMessage, CS_DBLCLKS, CS_HREDRAW, CS_OWNDC, CS_VREDRAW, GWL_EXSTYLE,
    GWL_STYLE, HWND_NOTOPMOST, HWND_TOPMOST, MB_ICONERROR, MB_OK, MINMAXINFO, MSG,
    NCCALCSIZE_PARAMS, PM_REMOVE, SWP_FRAMECHANGED, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE,
    SWP_NOZORDER, WINDOWPLACEMENT,
    WNDCLASSEXW,
};

/// Name of the one window class every host window uses
const WINDOW_CLASS_NAME: &str = "AnemoneWindow";

// HID usage of a generic mouse
const HID_USAGE_PAGE_GENERIC: u16 = 0x01;
const HID_USAGE_GENERIC_MOUSE: u16 = 0x02;

const DISPLAY_DEVICE_ATTACHED_TO_DESKTOP: u32 = 0x0000_0001;
const DISPLAY_DEVICE_PRIMARY_DEVICE: u32 = 0x0000_0004;
const DISPLAY_DEVICE_MIRRORING_DRIVER: u32 = 0x0000_0008;
const MONITORINFOF_PRIMARY: u32 = 0x0000_0001;

thread_local! {
    /// The sink of the dispatch in progress on this thread
    static SINK: Cell<Option<*mut (dyn MessageSink + 'static)>> = Cell::new(None);
    /// Messages that arrived while no sink was installed
    static DEFERRED: RefCell<Vec<DeferredMessage>> = RefCell::new(Vec::new());
    /// Frame answers for every live window
    static POLICIES: RefCell<HashMap<HWND, FramePolicy>> = RefCell::new(HashMap::new());
    /// Policy of the window inside CreateWindowExW, its handle isn't known yet
    static PENDING_POLICY: Cell<Option<FramePolicy>> = Cell::new(None);
}

/// Install `sink` for the duration of `f`
fn with_sink<T>(sink: &mut dyn MessageSink, f: impl FnOnce() -> T) -> T {
    // The pointer only lives in SINK for the duration of this call
    let sink: *mut (dyn MessageSink + '_) = sink;
    let sink: *mut (dyn MessageSink + 'static) = unsafe { std::mem::transmute(sink) };

    let prev = SINK.with(|s| s.replace(Some(sink)));
    let ret = f();
    SINK.with(|s| s.set(prev));
    ret
}

fn frame_policy(hwnd: HWND) -> Option<FramePolicy> {
    POLICIES
        .with(|p| p.borrow().get(&hwnd).copied())
        .or_else(|| PENDING_POLICY.with(|p| p.get()))
}

fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

fn from_wide(s: &[u16]) -> String {
    let len = s.iter().position(|c| *c == 0).unwrap_or(s.len());
    String::from_utf16_lossy(&s[..len])
}

fn rect_from_native(r: &RECT) -> Rect<i32> {
    Rect::from_edges(r.left, r.top, r.right, r.bottom)
}

fn rect_to_native(r: &Rect<i32>) -> RECT {
    RECT {
        left: r.left(),
        top: r.top(),
        right: r.right(),
        bottom: r.bottom(),
    }
}

unsafe fn read_min_max(mmi: *const MINMAXINFO) -> MinMaxInfo {
    MinMaxInfo {
        min_track_size: ((*mmi).ptMinTrackSize.x, (*mmi).ptMinTrackSize.y),
        max_track_size: ((*mmi).ptMaxTrackSize.x, (*mmi).ptMaxTrackSize.y),
    }
}

unsafe fn write_min_max(mmi: *mut MINMAXINFO, info: &MinMaxInfo) {
    (*mmi).ptMinTrackSize = POINT {
        x: info.min_track_size.0,
        y: info.min_track_size.1,
    };
    (*mmi).ptMaxTrackSize = POINT {
        x: info.max_track_size.0,
        y: info.max_track_size.1,
    };
}

/// A message sent while no sink can take it
unsafe fn handle_unattended(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    let handle = NativeHandle(hwnd);

    match msg {
        WM_GETMINMAXINFO => {
            if let Some(policy) = frame_policy(hwnd) {
                let mmi = lparam as *mut MINMAXINFO;
                let mut info = read_min_max(mmi);
                policy.apply_min_max(&mut info, frame_border(&Win32Platform::current(), handle));
                write_min_max(mmi, &info);
                return 0;
            }
        }
        WM_NCCALCSIZE if wparam != 0 => {
            let trim = frame_policy(hwnd)
                .and_then(|p| p.maximized_trim(&Win32Platform::current(), handle));
            if let Some((dx, dy)) = trim {
                let params = lparam as *mut NCCALCSIZE_PARAMS;
                (*params).rgrc[0] = rect_to_native(&rect_from_native(&(*params).rgrc[0]).inset(dx, dy));
                return 0;
            }
        }
        _ if is_deferred(msg) => {
            let suggested_rect = match msg {
                WM_DPICHANGED => Some(rect_from_native(&*(lparam as *const RECT))),
                _ => None,
            };
            DEFERRED.with(|d| {
                d.borrow_mut().push(DeferredMessage {
                    message: NativeMessage::new(handle, msg, wparam, lparam),
                    suggested_rect: suggested_rect,
                })
            });
            // Closing is the host's decision, not DefWindowProc's
            if msg == WM_CLOSE {
                return 0;
            }
        }
        _ => {}
    }

    DefWindowProcW(hwnd, msg, wparam, lparam)
}

unsafe extern "system" fn wnd_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if msg == WM_NCDESTROY {
        POLICIES.with(|p| p.borrow_mut().remove(&hwnd));
    }

    let sink = match SINK.with(|s| s.take()) {
        Some(sink) => sink,
        None => return handle_unattended(hwnd, msg, wparam, lparam),
    };
    let message = NativeMessage::new(NativeHandle(hwnd), msg, wparam, lparam);

    let result = match msg {
        WM_GETMINMAXINFO => {
            let mmi = lparam as *mut MINMAXINFO;
            let mut info = read_min_max(mmi);
            let res = (*sink).dispatch_message(message, MessagePayload::MinMaxInfo(&mut info));
            write_min_max(mmi, &info);
            res
        }
        WM_NCCALCSIZE if wparam != 0 => {
            let params = lparam as *mut NCCALCSIZE_PARAMS;
            let mut rect = rect_from_native(&(*params).rgrc[0]);
            let res = (*sink).dispatch_message(message, MessagePayload::NcCalcSize(&mut rect));
            (*params).rgrc[0] = rect_to_native(&rect);
            res
        }
        WM_DPICHANGED => {
            let suggested = rect_from_native(&*(lparam as *const RECT));
            (*sink).dispatch_message(message, MessagePayload::SuggestedRect(suggested))
        }
        _ => (*sink).dispatch_message(message, MessagePayload::None),
    };

    // Put the sink back before default processing, modal loops in
    // DefWindowProc dispatch messages of their own
    SINK.with(|s| s.set(Some(sink)));

    match result {
        WindowMessageResult::Handled(ret) => ret,
        WindowMessageResult::Unhandled => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

pub struct Win32Platform {
    wp_instance: isize,
}

impl Win32Platform {
    pub fn new() -> Self {
        unsafe {
            if SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2) == 0 {
                log::debug!("Could not enable per monitor DPI awareness");
            }

            Self {
                wp_instance: GetModuleHandleW(std::ptr::null()),
            }
        }
    }

    /// A handle for use inside the window procedure
    fn current() -> Self {
        Self {
            wp_instance: unsafe { GetModuleHandleW(std::ptr::null()) },
        }
    }

    fn display_orientation(device_name: &[u16]) -> DisplayOrientation {
        unsafe {
            let mut mode: DEVMODEW = std::mem::zeroed();
            mode.dmSize = size_of::<DEVMODEW>() as u16;
            if EnumDisplaySettingsExW(device_name.as_ptr(), ENUM_CURRENT_SETTINGS, &mut mode, 0) == 0 {
                return DisplayOrientation::Default;
            }

            match mode.Anonymous1.Anonymous2.dmDisplayOrientation as u32 {
                1 => DisplayOrientation::Rotate90,
                2 => DisplayOrientation::Rotate180,
                3 => DisplayOrientation::Rotate270,
                _ => DisplayOrientation::Default,
            }
        }
    }
}

unsafe extern "system" fn monitor_enum_proc(
    monitor: HMONITOR,
    _hdc: HDC,
    _rect: *mut RECT,
    data: LPARAM,
) -> BOOL {
    let monitors = &mut *(data as *mut Vec<MonitorInfo>);

    let mut info: MONITORINFOEXW = std::mem::zeroed();
    info.monitorInfo.cbSize = size_of::<MONITORINFOEXW>() as u32;
    if GetMonitorInfoW(monitor, &mut info as *mut MONITORINFOEXW as *mut MONITORINFO) != 0 {
        monitors.push(MonitorInfo {
            device_name: from_wide(&info.szDevice),
            bounds: rect_from_native(&info.monitorInfo.rcMonitor),
            work_area: rect_from_native(&info.monitorInfo.rcWork),
            primary: info.monitorInfo.dwFlags & MONITORINFOF_PRIMARY != 0,
        });
    }

    // keep enumerating
    1
}

impl Platform for Win32Platform {
    fn pump_message<S: MessageSink + AsRef<Self>>(sink: &mut S) -> bool {
        // Sent messages are delivered inside PeekMessageW
        with_sink(sink, || unsafe {
            let mut msg: MSG = std::mem::zeroed();
            if PeekMessageW(&mut msg, 0, 0, 0, PM_REMOVE) == 0 {
                return false;
            }
            TranslateMessage(&msg);
            DispatchMessageW(&msg);
            true
        })
    }

    fn take_deferred_messages(&self) -> Vec<DeferredMessage> {
        DEFERRED.with(|d| std::mem::take(&mut *d.borrow_mut()))
    }

    fn set_frame_policy(&self, handle: NativeHandle, policy: FramePolicy) {
        POLICIES.with(|p| p.borrow_mut().insert(handle.0, policy));
    }

    fn register_window_class(&self) -> bool {
        let class_name = to_wide(WINDOW_CLASS_NAME);
        unsafe {
            let wc = WNDCLASSEXW {
                cbSize: size_of::<WNDCLASSEXW>() as u32,
                style: CS_HREDRAW | CS_VREDRAW | CS_OWNDC | CS_DBLCLKS,
                lpfnWndProc: Some(wnd_proc),
                hInstance: self.wp_instance,
                hCursor: LoadCursorW(0, IDC_ARROW as usize as *const u16),
                lpszClassName: class_name.as_ptr(),
                ..std::mem::zeroed()
            };
            RegisterClassExW(&wc) != 0
        }
    }

    fn create_window(&self, params: &CreateWindowParams) -> Option<NativeHandle> {
        let class_name = to_wide(WINDOW_CLASS_NAME);
        let title = to_wide(params.title);
        PENDING_POLICY.with(|p| p.set(Some(params.policy)));
        let hwnd = unsafe {
            CreateWindowExW(
                params.style.ex_style,
                class_name.as_ptr(),
                title.as_ptr(),
                params.style.style,
                params.bounds.left(),
                params.bounds.top(),
                params.bounds.width(),
                params.bounds.height(),
                params.parent.map(|p| p.0).unwrap_or(0),
                0,
                self.wp_instance,
                std::ptr::null(),
            )
        };

        PENDING_POLICY.with(|p| p.set(None));

        match hwnd {
            0 => None,
            hwnd => {
                self.set_frame_policy(NativeHandle(hwnd), params.policy);
                Some(NativeHandle(hwnd))
            }
        }
    }

    fn destroy_window(&self, handle: NativeHandle) -> bool {
        unsafe { DestroyWindow(handle.0) != 0 }
    }

    fn show_window(&self, handle: NativeHandle, cmd: i32) {
        unsafe {
            ShowWindow(handle.0, cmd as _);
        }
    }

    fn is_window_visible(&self, handle: NativeHandle) -> bool {
        unsafe { IsWindowVisible(handle.0) != 0 }
    }

    fn enable_window(&self, handle: NativeHandle, enable: bool) {
        unsafe {
            EnableWindow(handle.0, enable as BOOL);
        }
    }

    fn is_window_enabled(&self, handle: NativeHandle) -> bool {
        unsafe { IsWindowEnabled(handle.0) != 0 }
    }

    fn is_minimized(&self, handle: NativeHandle) -> bool {
        unsafe { IsIconic(handle.0) != 0 }
    }

    fn is_maximized(&self, handle: NativeHandle) -> bool {
        unsafe { IsZoomed(handle.0) != 0 }
    }

    fn set_foreground(&self, handle: NativeHandle) -> bool {
        unsafe { SetForegroundWindow(handle.0) != 0 }
    }

    fn set_focus(&self, handle: NativeHandle) -> bool {
        unsafe { SetFocus(handle.0) != 0 }
    }

    fn bring_to_front(&self, handle: NativeHandle) -> bool {
        unsafe { BringWindowToTop(handle.0) != 0 }
    }

    fn get_window_rect(&self, handle: NativeHandle) -> Option<Rect<i32>> {
        unsafe {
            let mut rect: RECT = std::mem::zeroed();
            match GetWindowRect(handle.0, &mut rect) {
                0 => None,
                _ => Some(rect_from_native(&rect)),
            }
        }
    }

    fn get_client_rect(&self, handle: NativeHandle) -> Option<Rect<i32>> {
        unsafe {
            let mut rect: RECT = std::mem::zeroed();
            match GetClientRect(handle.0, &mut rect) {
                0 => None,
                _ => Some(rect_from_native(&rect)),
            }
        }
    }

    fn client_rect_to_screen(&self, handle: NativeHandle) -> Option<Rect<i32>> {
        let client = self.get_client_rect(handle)?;
        unsafe {
            let mut origin = POINT { x: 0, y: 0 };
            if ClientToScreen(handle.0, &mut origin) == 0 {
                return None;
            }
            Some(Rect::new(origin.x, origin.y, client.width(), client.height()))
        }
    }

    fn set_window_pos(&self, handle: NativeHandle, bounds: Rect<i32>) -> bool {
        unsafe {
            SetWindowPos(
                handle.0,
                0,
                bounds.left(),
                bounds.top(),
                bounds.width(),
                bounds.height(),
                SWP_NOZORDER | SWP_NOACTIVATE,
            ) != 0
        }
    }

    fn set_window_style(&self, handle: NativeHandle, style: WindowStyle) -> bool {
        unsafe {
            SetWindowLongW(handle.0, GWL_STYLE, style.style as i32);
            SetWindowLongW(handle.0, GWL_EXSTYLE, style.ex_style as i32);

            // Style changes only apply after a frame change
            let insert_after = match style.ex_style & WS_EX_TOPMOST != 0 {
                true => HWND_TOPMOST,
                false => HWND_NOTOPMOST,
            };
            SetWindowPos(
                handle.0,
                insert_after,
                0,
                0,
                0,
                0,
                SWP_FRAMECHANGED | SWP_NOACTIVATE | SWP_NOSIZE | SWP_NOMOVE,
            ) != 0
        }
    }

    fn get_window_placement(&self, handle: NativeHandle) -> Option<WindowPlacement> {
        unsafe {
            let mut wp: WINDOWPLACEMENT = std::mem::zeroed();
            wp.length = size_of::<WINDOWPLACEMENT>() as u32;
            if GetWindowPlacement(handle.0, &mut wp) == 0 {
                return None;
            }
            Some(WindowPlacement {
                show_cmd: wp.showCmd as i32,
                normal_position: rect_from_native(&wp.rcNormalPosition),
            })
        }
    }

    fn set_window_placement(&self, handle: NativeHandle, placement: &WindowPlacement) -> bool {
        unsafe {
            let mut wp: WINDOWPLACEMENT = std::mem::zeroed();
            wp.length = size_of::<WINDOWPLACEMENT>() as u32;
            wp.showCmd = placement.show_cmd as _;
            wp.rcNormalPosition = rect_to_native(&placement.normal_position);
            SetWindowPlacement(handle.0, &wp) != 0
        }
    }

    fn get_window_text(&self, handle: NativeHandle) -> String {
        unsafe {
            let len = GetWindowTextLengthW(handle.0);
            if len <= 0 {
                return String::new();
            }
            let mut buf = vec![0u16; len as usize + 1];
            let copied = GetWindowTextW(handle.0, buf.as_mut_ptr(), buf.len() as i32);
            buf.truncate(utils::partial_max(copied, 0) as usize);
            String::from_utf16_lossy(&buf)
        }
    }

    fn set_window_text(&self, handle: NativeHandle, text: &str) -> bool {
        let text = to_wide(text);
        unsafe { SetWindowTextW(handle.0, text.as_ptr()) != 0 }
    }

    fn load_system_cursor(&self, id: u32) -> CursorHandle {
        // MAKEINTRESOURCE
        CursorHandle(unsafe { LoadCursorW(0, id as usize as *const u16) })
    }

    fn set_cursor(&self, cursor: CursorHandle) {
        unsafe {
            SetCursor(cursor.0);
        }
    }

    fn get_cursor_pos(&self) -> Option<(i32, i32)> {
        unsafe {
            let mut pos = POINT { x: 0, y: 0 };
            match GetCursorPos(&mut pos) {
                0 => None,
                _ => Some((pos.x, pos.y)),
            }
        }
    }

    fn set_cursor_pos(&self, x: i32, y: i32) -> bool {
        unsafe { SetCursorPos(x, y) != 0 }
    }

    fn clip_cursor(&self, rect: Option<Rect<i32>>) -> bool {
        unsafe {
            match rect {
                Some(rect) => ClipCursor(&rect_to_native(&rect)) != 0,
                None => ClipCursor(std::ptr::null()) != 0,
            }
        }
    }

    fn track_mouse_leave(&self, handle: NativeHandle) -> bool {
        unsafe {
            let mut tme = TRACKMOUSEEVENT {
                cbSize: size_of::<TRACKMOUSEEVENT>() as u32,
                dwFlags: TME_LEAVE,
                hwndTrack: handle.0,
                dwHoverTime: 0,
            };
            TrackMouseEvent(&mut tme) != 0
        }
    }

    fn register_raw_mouse(&self, target: Option<NativeHandle>) -> bool {
        let device = RAWINPUTDEVICE {
            usUsagePage: HID_USAGE_PAGE_GENERIC,
            usUsage: HID_USAGE_GENERIC_MOUSE,
            dwFlags: match target {
                Some(_) => 0,
                None => RIDEV_REMOVE,
            },
            hwndTarget: target.map(|t| t.0).unwrap_or(0),
        };
        unsafe { RegisterRawInputDevices(&device, 1, size_of::<RAWINPUTDEVICE>() as u32) != 0 }
    }

    fn read_raw_mouse(&self, lparam: isize) -> Option<RawMouse> {
        unsafe {
            let mut raw: RAWINPUT = std::mem::zeroed();
            let mut size = size_of::<RAWINPUT>() as u32;
            let read = GetRawInputData(
                lparam,
                RID_INPUT,
                &mut raw as *mut RAWINPUT as *mut _,
                &mut size,
                size_of::<RAWINPUTHEADER>() as u32,
            );
            if read == u32::MAX || raw.header.dwType != RIM_TYPEMOUSE {
                return None;
            }

            let mouse = raw.data.mouse;
            Some(RawMouse {
                flags: mouse.usFlags as u16,
                last_x: mouse.lLastX,
                last_y: mouse.lLastY,
            })
        }
    }

    fn map_scan_code(&self, scan_code: u32) -> u32 {
        unsafe { MapVirtualKeyW(scan_code, MAPVK_VSC_TO_VK_EX) }
    }

    fn is_key_down(&self, vk: u32) -> bool {
        unsafe { (GetAsyncKeyState(vk as i32) as u16 & 0x8000) != 0 }
    }

    fn get_gamepad_state(&self, slot: u32) -> Option<GamepadState> {
        unsafe {
            let mut state: XINPUT_STATE = std::mem::zeroed();
            if XInputGetState(slot, &mut state) != ERROR_SUCCESS {
                return None;
            }

            let pad = state.Gamepad;
            Some(GamepadState {
                packet: state.dwPacketNumber,
                buttons: GamepadButtons::from_bits_truncate(pad.wButtons as u16),
                left_trigger: pad.bLeftTrigger,
                right_trigger: pad.bRightTrigger,
                thumb_lx: pad.sThumbLX,
                thumb_ly: pad.sThumbLY,
                thumb_rx: pad.sThumbRX,
                thumb_ry: pad.sThumbRY,
            })
        }
    }

    fn get_system_metric(&self, index: i32) -> i32 {
        unsafe { GetSystemMetrics(index) }
    }

    fn enum_display_devices(&self) -> Vec<DisplayDevice> {
        let mut ret = Vec::new();

        for index in 0.. {
            let mut dev: DISPLAY_DEVICEW = unsafe { std::mem::zeroed() };
            dev.cb = size_of::<DISPLAY_DEVICEW>() as u32;
            if unsafe { EnumDisplayDevicesW(std::ptr::null(), index, &mut dev, 0) } == 0 {
                break;
            }

            let flags = dev.StateFlags as u32;
            ret.push(DisplayDevice {
                name: from_wide(&dev.DeviceName),
                attached: flags & DISPLAY_DEVICE_ATTACHED_TO_DESKTOP != 0,
                mirroring: flags & DISPLAY_DEVICE_MIRRORING_DRIVER != 0,
                primary: flags & DISPLAY_DEVICE_PRIMARY_DEVICE != 0,
                orientation: Self::display_orientation(&dev.DeviceName),
            });
        }

        ret
    }

    fn enum_monitors(&self) -> Vec<MonitorInfo> {
        let mut monitors: Vec<MonitorInfo> = Vec::new();
        unsafe {
            EnumDisplayMonitors(
                0,
                std::ptr::null(),
                Some(monitor_enum_proc),
                &mut monitors as *mut Vec<MonitorInfo> as LPARAM,
            );
        }
        monitors
    }

    fn show_fatal_error(&self, title: &str, message: &str) {
        let title = to_wide(title);
        let message = to_wide(message);
        unsafe {
            MessageBoxW(0, message.as_ptr(), title.as_ptr(), MB_OK | MB_ICONERROR);
        }
    }

    fn module_handle(&self) -> isize {
        self.wp_instance
    }
}
