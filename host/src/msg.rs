// Native message ABI
//
// Message ids, key codes and flag values are the Win32 numbers. They are
// kept as plain integers so the translation code above the platform layer
// builds and is tested on any OS.

use crate::Rect;

// Window messages
pub const WM_CREATE: u32 = 0x0001;
pub const WM_DESTROY: u32 = 0x0002;
pub const WM_MOVE: u32 = 0x0003;
pub const WM_SIZE: u32 = 0x0005;
pub const WM_ACTIVATE: u32 = 0x0006;
pub const WM_CLOSE: u32 = 0x0010;
pub const WM_QUIT: u32 = 0x0012;
pub const WM_ENDSESSION: u32 = 0x0016;
pub const WM_ACTIVATEAPP: u32 = 0x001C;
pub const WM_SETCURSOR: u32 = 0x0020;
pub const WM_GETMINMAXINFO: u32 = 0x0024;
pub const WM_DISPLAYCHANGE: u32 = 0x007E;
pub const WM_NCCREATE: u32 = 0x0081;
pub const WM_NCDESTROY: u32 = 0x0082;
pub const WM_NCCALCSIZE: u32 = 0x0083;
pub const WM_INPUT: u32 = 0x00FF;
pub const WM_KEYDOWN: u32 = 0x0100;
pub const WM_KEYUP: u32 = 0x0101;
pub const WM_CHAR: u32 = 0x0102;
pub const WM_SYSKEYDOWN: u32 = 0x0104;
pub const WM_SYSKEYUP: u32 = 0x0105;
pub const WM_SYSCOMMAND: u32 = 0x0112;
pub const WM_MOUSEMOVE: u32 = 0x0200;
pub const WM_LBUTTONDOWN: u32 = 0x0201;
pub const WM_LBUTTONUP: u32 = 0x0202;
pub const WM_LBUTTONDBLCLK: u32 = 0x0203;
pub const WM_RBUTTONDOWN: u32 = 0x0204;
pub const WM_RBUTTONUP: u32 = 0x0205;
pub const WM_RBUTTONDBLCLK: u32 = 0x0206;
pub const WM_MBUTTONDOWN: u32 = 0x0207;
pub const WM_MBUTTONUP: u32 = 0x0208;
pub const WM_MBUTTONDBLCLK: u32 = 0x0209;
pub const WM_MOUSEWHEEL: u32 = 0x020A;
pub const WM_XBUTTONDOWN: u32 = 0x020B;
pub const WM_XBUTTONUP: u32 = 0x020C;
pub const WM_XBUTTONDBLCLK: u32 = 0x020D;
pub const WM_MOUSEHWHEEL: u32 = 0x020E;
pub const WM_POWERBROADCAST: u32 = 0x0218;
pub const WM_ENTERSIZEMOVE: u32 = 0x0231;
pub const WM_EXITSIZEMOVE: u32 = 0x0232;
pub const WM_MOUSELEAVE: u32 = 0x02A3;
pub const WM_DPICHANGED: u32 = 0x02E0;

// WM_SYSCOMMAND
pub const SC_CLOSE: usize = 0xF060;
pub const SC_KEYMENU: usize = 0xF100;
pub const SC_SCREENSAVE: usize = 0xF140;
pub const SC_MONITORPOWER: usize = 0xF170;

// WM_SIZE
pub const SIZE_RESTORED: usize = 0;
pub const SIZE_MINIMIZED: usize = 1;
pub const SIZE_MAXIMIZED: usize = 2;

pub const WA_INACTIVE: u16 = 0;
pub const HTCLIENT: u16 = 1;
pub const ENDSESSION_LOGOFF: u32 = 0x8000_0000;
pub const USER_DEFAULT_SCREEN_DPI: u32 = 96;

// WM_POWERBROADCAST
pub const PBT_APMSUSPEND: usize = 0x0004;
pub const PBT_APMRESUMESUSPEND: usize = 0x0007;
pub const PBT_APMRESUMEAUTOMATIC: usize = 0x0012;

// ShowWindow commands
pub const SW_HIDE: i32 = 0;
pub const SW_SHOWNORMAL: i32 = 1;
pub const SW_SHOWMAXIMIZED: i32 = 3;
pub const SW_SHOW: i32 = 5;
pub const SW_MINIMIZE: i32 = 6;
pub const SW_RESTORE: i32 = 9;

// Window styles
pub const WS_POPUP: u32 = 0x8000_0000;
pub const WS_CHILD: u32 = 0x4000_0000;
pub const WS_VISIBLE: u32 = 0x1000_0000;
pub const WS_CLIPSIBLINGS: u32 = 0x0400_0000;
pub const WS_CLIPCHILDREN: u32 = 0x0200_0000;
pub const WS_CAPTION: u32 = 0x00C0_0000;
pub const WS_SYSMENU: u32 = 0x0008_0000;
pub const WS_THICKFRAME: u32 = 0x0004_0000;
pub const WS_OVERLAPPEDWINDOW: u32 = 0x00CF_0000;
pub const WS_EX_DLGMODALFRAME: u32 = 0x0000_0001;
pub const WS_EX_TOPMOST: u32 = 0x0000_0008;
pub const WS_EX_TRANSPARENT: u32 = 0x0000_0020;
pub const WS_EX_APPWINDOW: u32 = 0x0004_0000;

// GetSystemMetrics
pub const SM_CXSCREEN: i32 = 0;
pub const SM_CYSCREEN: i32 = 1;
pub const SM_CXSIZEFRAME: i32 = 32;
pub const SM_CYSIZEFRAME: i32 = 33;
pub const SM_XVIRTUALSCREEN: i32 = 76;
pub const SM_YVIRTUALSCREEN: i32 = 77;
pub const SM_CXVIRTUALSCREEN: i32 = 78;
pub const SM_CYVIRTUALSCREEN: i32 = 79;
pub const SM_CMONITORS: i32 = 80;
pub const SM_CXPADDEDBORDER: i32 = 92;

// System cursors (IDC_*)
pub const IDC_ARROW: u32 = 32512;
pub const IDC_IBEAM: u32 = 32513;
pub const IDC_WAIT: u32 = 32514;
pub const IDC_CROSS: u32 = 32515;
pub const IDC_UPARROW: u32 = 32516;
pub const IDC_SIZENWSE: u32 = 32642;
pub const IDC_SIZENESW: u32 = 32643;
pub const IDC_SIZEWE: u32 = 32644;
pub const IDC_SIZENS: u32 = 32645;
pub const IDC_SIZEALL: u32 = 32646;
pub const IDC_NO: u32 = 32648;
pub const IDC_HAND: u32 = 32649;
pub const IDC_APPSTARTING: u32 = 32650;
pub const IDC_HELP: u32 = 32651;

// Keystroke flags, in the high word of lParam
pub const KF_EXTENDED: u16 = 0x0100;
pub const KF_REPEAT: u16 = 0x4000;
pub const KF_UP: u16 = 0x8000;

// MapVirtualKey
pub const MAPVK_VSC_TO_VK_EX: u32 = 3;
/// Prefix for extended scan codes passed to MAPVK_VSC_TO_VK_EX
pub const EXTENDED_SCAN_PREFIX: u32 = 0xE000;

// Raw mouse flags
pub const MOUSE_MOVE_RELATIVE: u16 = 0x00;
pub const MOUSE_MOVE_ABSOLUTE: u16 = 0x01;
pub const MOUSE_VIRTUAL_DESKTOP: u16 = 0x02;
/// Absolute raw mouse coordinates are normalized into [0, 65535]
pub const RAW_ABSOLUTE_RANGE: f32 = 65535.0;

pub const WHEEL_DELTA: i16 = 120;
pub const XBUTTON1: u16 = 0x0001;
pub const XBUTTON2: u16 = 0x0002;

// Virtual keys
pub const VK_LBUTTON: u32 = 0x01;
pub const VK_RBUTTON: u32 = 0x02;
pub const VK_MBUTTON: u32 = 0x04;
pub const VK_XBUTTON1: u32 = 0x05;
pub const VK_XBUTTON2: u32 = 0x06;
pub const VK_BACK: u32 = 0x08;
pub const VK_TAB: u32 = 0x09;
pub const VK_CLEAR: u32 = 0x0C;
pub const VK_RETURN: u32 = 0x0D;
pub const VK_SHIFT: u32 = 0x10;
pub const VK_CONTROL: u32 = 0x11;
pub const VK_MENU: u32 = 0x12;
pub const VK_PAUSE: u32 = 0x13;
pub const VK_CAPITAL: u32 = 0x14;
pub const VK_ESCAPE: u32 = 0x1B;
pub const VK_SPACE: u32 = 0x20;
pub const VK_PRIOR: u32 = 0x21;
pub const VK_NEXT: u32 = 0x22;
pub const VK_END: u32 = 0x23;
pub const VK_HOME: u32 = 0x24;
pub const VK_LEFT: u32 = 0x25;
pub const VK_UP: u32 = 0x26;
pub const VK_RIGHT: u32 = 0x27;
pub const VK_DOWN: u32 = 0x28;
pub const VK_SNAPSHOT: u32 = 0x2C;
pub const VK_INSERT: u32 = 0x2D;
pub const VK_DELETE: u32 = 0x2E;
// '0'..'9' and 'A'..'Z' are their ASCII values
pub const VK_0: u32 = 0x30;
pub const VK_A: u32 = 0x41;
pub const VK_LWIN: u32 = 0x5B;
pub const VK_RWIN: u32 = 0x5C;
pub const VK_APPS: u32 = 0x5D;
pub const VK_NUMPAD0: u32 = 0x60;
pub const VK_MULTIPLY: u32 = 0x6A;
pub const VK_ADD: u32 = 0x6B;
pub const VK_SEPARATOR: u32 = 0x6C;
pub const VK_SUBTRACT: u32 = 0x6D;
pub const VK_DECIMAL: u32 = 0x6E;
pub const VK_DIVIDE: u32 = 0x6F;
pub const VK_F1: u32 = 0x70;
pub const VK_NUMLOCK: u32 = 0x90;
pub const VK_SCROLL: u32 = 0x91;
pub const VK_LSHIFT: u32 = 0xA0;
pub const VK_RSHIFT: u32 = 0xA1;
pub const VK_LCONTROL: u32 = 0xA2;
pub const VK_RCONTROL: u32 = 0xA3;
pub const VK_LMENU: u32 = 0xA4;
pub const VK_RMENU: u32 = 0xA5;
pub const VK_OEM_1: u32 = 0xBA;
pub const VK_OEM_PLUS: u32 = 0xBB;
pub const VK_OEM_COMMA: u32 = 0xBC;
pub const VK_OEM_MINUS: u32 = 0xBD;
pub const VK_OEM_PERIOD: u32 = 0xBE;
pub const VK_OEM_2: u32 = 0xBF;
pub const VK_OEM_3: u32 = 0xC0;
pub const VK_OEM_4: u32 = 0xDB;
pub const VK_OEM_5: u32 = 0xDC;
pub const VK_OEM_6: u32 = 0xDD;
pub const VK_OEM_7: u32 = 0xDE;

/// An opaque native window handle (HWND)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct NativeHandle(pub isize);

impl NativeHandle {
    pub const NULL: NativeHandle = NativeHandle(0);

    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

/// An opaque native cursor handle (HCURSOR)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct CursorHandle(pub isize);

impl CursorHandle {
    pub const NULL: CursorHandle = CursorHandle(0);

    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

/// One window message as the window procedure receives it
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NativeMessage {
    pub hwnd: NativeHandle,
    pub msg: u32,
    pub wparam: usize,
    pub lparam: isize,
}

impl NativeMessage {
    pub fn new(hwnd: NativeHandle, msg: u32, wparam: usize, lparam: isize) -> Self {
        Self {
            hwnd: hwnd,
            msg: msg,
            wparam: wparam,
            lparam: lparam,
        }
    }
}

/// Outcome of handling a message
///
/// `Unhandled` tells the platform to run its default processing,
/// `Handled` carries the value the window procedure returns.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WindowMessageResult {
    Unhandled,
    Handled(isize),
}

impl WindowMessageResult {
    pub fn is_handled(&self) -> bool {
        matches!(self, WindowMessageResult::Handled(_))
    }
}

/// Size limits filled in during WM_GETMINMAXINFO, in outer window pixels
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct MinMaxInfo {
    pub min_track_size: (i32, i32),
    pub max_track_size: (i32, i32),
}

/// Data some messages carry behind their lParam pointer.
///
/// The platform decodes the pointer before dispatch and writes any
/// changes back after.
#[derive(Debug)]
pub enum MessagePayload<'a> {
    None,
    /// WM_GETMINMAXINFO
    MinMaxInfo(&'a mut MinMaxInfo),
    /// WM_NCCALCSIZE with wParam TRUE, the proposed window rectangle
    NcCalcSize(&'a mut Rect<i32>),
    /// WM_DPICHANGED, the rectangle the OS suggests for the new DPI
    SuggestedRect(Rect<i32>),
}

pub fn loword(v: usize) -> u16 {
    (v & 0xffff) as u16
}

pub fn hiword(v: usize) -> u16 {
    ((v >> 16) & 0xffff) as u16
}

/// Signed x coordinate packed in the low word
pub fn get_x_lparam(lparam: isize) -> i32 {
    loword(lparam as usize) as i16 as i32
}

/// Signed y coordinate packed in the high word
pub fn get_y_lparam(lparam: isize) -> i32 {
    hiword(lparam as usize) as i16 as i32
}

pub fn get_wheel_delta_wparam(wparam: usize) -> i16 {
    hiword(wparam) as i16
}

pub fn get_xbutton_wparam(wparam: usize) -> u16 {
    hiword(wparam)
}

/// Pack two words the way MAKELPARAM does
pub fn make_lparam(lo: u16, hi: u16) -> isize {
    ((hi as u32) << 16 | lo as u32) as i32 as isize
}
