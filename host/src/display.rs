// Display enumeration
//
// Display devices and monitors come from two different enumerations.
// Devices know their orientation and whether they drive the desktop,
// monitors know where they are. The two are joined by device name.

use crate::msg::*;
use crate::platform::Platform;
use crate::Rect;
use utils::log;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DisplayOrientation {
    #[default]
    Default,
    Rotate90,
    Rotate180,
    Rotate270,
}

/// An entry of the display device enumeration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayDevice {
    pub name: String,
    pub attached: bool,
    pub mirroring: bool,
    pub primary: bool,
    pub orientation: DisplayOrientation,
}

/// An entry of the monitor enumeration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MonitorInfo {
    pub device_name: String,
    pub bounds: Rect<i32>,
    pub work_area: Rect<i32>,
    pub primary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Display {
    pub name: String,
    pub primary: bool,
    pub orientation: DisplayOrientation,
    /// Desktop area covered by this display
    pub bounds: Rect<i32>,
    /// `bounds` minus the taskbar and docked toolbars
    pub work_area: Rect<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayMetrics {
    pub displays: Vec<Display>,
    /// Bounding box of every display
    pub virtual_desktop: Rect<i32>,
}

impl DisplayMetrics {
    pub fn primary(&self) -> Option<&Display> {
        self.displays.iter().find(|d| d.primary)
    }
}

/// Join the two enumerations.
///
/// Devices that are mirroring another or not part of the desktop are
/// skipped. A device with no monitor keeps empty rectangles.
pub fn join_displays(devices: &[DisplayDevice], monitors: &[MonitorInfo]) -> Vec<Display> {
    let mut ret = Vec::new();

    for dev in devices.iter().filter(|d| d.attached && !d.mirroring) {
        let mut display = Display {
            name: dev.name.clone(),
            primary: dev.primary,
            orientation: dev.orientation,
            bounds: Rect::default(),
            work_area: Rect::default(),
        };

        match monitors.iter().find(|m| m.device_name == dev.name) {
            Some(mon) => {
                display.bounds = mon.bounds;
                display.work_area = mon.work_area;
            }
            None => log::debug!("No monitor found for display {}", dev.name),
        }

        ret.push(display);
    }

    return ret;
}

/// Query the platform for the current display layout
pub fn collect<P: Platform>(platform: &P) -> DisplayMetrics {
    let devices = platform.enum_display_devices();
    let monitors = platform.enum_monitors();

    DisplayMetrics {
        displays: join_displays(&devices, &monitors),
        virtual_desktop: Rect::new(
            platform.get_system_metric(SM_XVIRTUALSCREEN),
            platform.get_system_metric(SM_YVIRTUALSCREEN),
            platform.get_system_metric(SM_CXVIRTUALSCREEN),
            platform.get_system_metric(SM_CYVIRTUALSCREEN),
        ),
    }
}
