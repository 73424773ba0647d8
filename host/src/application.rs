// The host application
//
// HostApplication owns the platform, the game's event sink, the input
// state, the gamepad poller and every window. Windows live in an arena
// and are named by WindowId. Native handles are mapped back to ids with
// an explicit registry so the message dispatch never needs to store
// anything inside the native window.

use crate::display::{self, DisplayMetrics};
use crate::event::ApplicationEvents;
use crate::gamepad::GamepadPoller;
use crate::input::HostInput;
use crate::msg::*;
use crate::platform::{MessageSink, Platform};
use crate::window::{CursorType, HostWindow, WindowContext, WindowDesc, WindowMode};
use crate::{HostError, Rect, Result, WindowId};

use std::collections::HashMap;
use std::ops::Deref;
use utils::arena::Arena;
use utils::log;

/// IDC_* resource for every cursor type
const CURSOR_RESOURCES: [(CursorType, u32); 14] = [
    (CursorType::Arrow, IDC_ARROW),
    (CursorType::IBeam, IDC_IBEAM),
    (CursorType::Wait, IDC_WAIT),
    (CursorType::Cross, IDC_CROSS),
    (CursorType::UpArrow, IDC_UPARROW),
    (CursorType::SizeNWSE, IDC_SIZENWSE),
    (CursorType::SizeNESW, IDC_SIZENESW),
    (CursorType::SizeWE, IDC_SIZEWE),
    (CursorType::SizeNS, IDC_SIZENS),
    (CursorType::SizeAll, IDC_SIZEALL),
    (CursorType::No, IDC_NO),
    (CursorType::Hand, IDC_HAND),
    (CursorType::AppStarting, IDC_APPSTARTING),
    (CursorType::Help, IDC_HELP),
];

/// The system cursors, loaded once
pub struct CursorTable {
    ct_cursors: Vec<(CursorType, CursorHandle)>,
}

impl CursorTable {
    pub fn load<P: Platform>(platform: &P) -> Self {
        Self {
            ct_cursors: CURSOR_RESOURCES
                .iter()
                .map(|(ty, id)| (*ty, platform.load_system_cursor(*id)))
                .collect(),
        }
    }

    /// The handle for `ty`, null for `CursorType::None`
    pub fn get(&self, ty: CursorType) -> CursorHandle {
        self.ct_cursors
            .iter()
            .find(|(t, _)| *t == ty)
            .map(|(_, c)| *c)
            .unwrap_or(CursorHandle::NULL)
    }
}

pub struct HostApplication<P: Platform, E: ApplicationEvents> {
    ha_platform: P,
    ha_events: E,
    ha_input: HostInput,
    ha_gamepads: GamepadPoller,
    ha_windows: Arena<HostWindow>,
    /// Native handle to window, for routing messages
    ha_registry: HashMap<NativeHandle, WindowId>,
    ha_cursors: CursorTable,
}

impl<P: Platform, E: ApplicationEvents> HostApplication<P, E> {
    pub fn new(platform: P, events: E) -> Result<Self> {
        if !platform.register_window_class() {
            log::error!("Could not register the window class");
            return Err(HostError::CLASS_REGISTRATION_FAILED);
        }
        let cursors = CursorTable::load(&platform);

        Ok(Self {
            ha_platform: platform,
            ha_events: events,
            ha_input: HostInput::new(),
            ha_gamepads: GamepadPoller::new(),
            ha_windows: Arena::new(),
            ha_registry: HashMap::new(),
            ha_cursors: cursors,
        })
    }

    pub fn make_window(&mut self, desc: &WindowDesc) -> Result<WindowId> {
        let parent = match desc.parent {
            Some(id) => Some(
                self.ha_windows
                    .get(id.0)
                    .map(|w| w.handle())
                    .ok_or(HostError::INVALID_WINDOW)?,
            ),
            None => None,
        };

        let window = HostWindow::new(&self.ha_platform, desc, parent)?;
        let handle = window.handle();
        let id = WindowId(self.ha_windows.insert(window));
        self.ha_registry.insert(handle, id);

        // Messages sent during creation couldn't be routed yet
        self.replay_deferred_messages();
        return Ok(id);
    }

    /// Pump every pending message without blocking, then poll gamepads
    pub fn process_messages(&mut self) {
        while P::pump_message(self) {}
        self.replay_deferred_messages();
        self.close_orphans();

        self.ha_gamepads
            .poll(&self.ha_platform, &mut self.ha_events);
    }

    fn replay_deferred_messages(&mut self) {
        for deferred in self.ha_platform.take_deferred_messages() {
            self.dispatch_message(deferred.message, deferred.payload());
        }
    }

    /// Close windows whose parent is closed or released.
    ///
    /// The native children went down with their parent.
    fn close_orphans(&mut self) {
        loop {
            let orphans: Vec<_> = self
                .ha_windows
                .iter()
                .filter(|(_, w)| !w.is_closed())
                .filter(|(_, w)| match w.parent() {
                    Some(parent) => self
                        .ha_windows
                        .get(parent.0)
                        .map(|p| p.is_closed())
                        .unwrap_or(true),
                    None => false,
                })
                .map(|(id, _)| id)
                .collect();
            if orphans.is_empty() {
                return;
            }

            for id in orphans {
                if let Some(window) = self.ha_windows.get_mut(id) {
                    log::debug!("Closing {:?} along with its parent", window.handle());
                    self.ha_registry.remove(&window.handle());
                    window.destroy(&self.ha_platform, &mut self.ha_input);
                }
            }
        }
    }

    /// The loaded handle for a cursor type
    pub fn get_cursor(&self, ty: CursorType) -> CursorHandle {
        self.ha_cursors.get(ty)
    }

    pub fn get_display_metrics(&self) -> DisplayMetrics {
        display::collect(&self.ha_platform)
    }

    pub fn window(&self, id: WindowId) -> Option<&HostWindow> {
        self.ha_windows.get(id.0)
    }

    /// Borrow a window together with what it needs to act on the OS
    pub fn window_mut(&mut self, id: WindowId) -> Option<WindowMut<'_, P, E>> {
        let window = self.ha_windows.get_mut(id.0)?;

        Some(WindowMut {
            wm_window: window,
            wm_cx: WindowContext {
                platform: &self.ha_platform,
                events: &mut self.ha_events,
                input: &mut self.ha_input,
                cursors: &self.ha_cursors,
                id: id,
            },
            wm_registry: &mut self.ha_registry,
        })
    }

    /// Ids of every window that hasn't been released
    pub fn windows(&self) -> Vec<WindowId> {
        self.ha_windows.ids().into_iter().map(WindowId).collect()
    }

    pub fn find_window(&self, handle: NativeHandle) -> Option<WindowId> {
        self.ha_registry.get(&handle).copied()
    }

    /// True while at least one window is open
    pub fn is_running(&self) -> bool {
        self.ha_windows.iter().any(|(_, w)| !w.is_closed())
    }

    /// Drop closed windows from the arena.
    ///
    /// Their ids stop resolving afterwards.
    pub fn release_closed_windows(&mut self) -> usize {
        self.close_orphans();
        let closed: Vec<_> = self
            .ha_windows
            .iter()
            .filter(|(_, w)| w.is_closed())
            .map(|(id, _)| id)
            .collect();

        for id in closed.iter() {
            self.ha_windows.remove(*id);
            self.ha_registry.retain(|_, v| v.0 != *id);
        }
        closed.len()
    }

    pub fn platform(&self) -> &P {
        &self.ha_platform
    }

    pub fn events(&self) -> &E {
        &self.ha_events
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.ha_events
    }

    pub fn input(&self) -> &HostInput {
        &self.ha_input
    }

    pub fn gamepads(&self) -> &GamepadPoller {
        &self.ha_gamepads
    }

    /// Capture the mouse for `id`, see `HostInput::start_tracking`
    pub fn start_tracking(&mut self, id: WindowId) -> bool {
        match self.ha_windows.get(id.0) {
            Some(w) if !w.is_closed() => {
                self.ha_input.start_tracking(&self.ha_platform, w.handle())
            }
            _ => false,
        }
    }

    pub fn stop_tracking(&mut self, id: WindowId) {
        if let Some(w) = self.ha_windows.get(id.0) {
            self.ha_input.stop_tracking(&self.ha_platform, w.handle());
        }
    }

    /// Tell the user something fatal happened
    pub fn report_fatal_error(&self, message: &str) {
        log::error!("{}", message);
        self.ha_platform.show_fatal_error("Anemone", message);
    }
}

impl<P: Platform, E: ApplicationEvents> AsRef<P> for HostApplication<P, E> {
    fn as_ref(&self) -> &P {
        &self.ha_platform
    }
}

impl<P: Platform, E: ApplicationEvents> MessageSink for HostApplication<P, E> {
    /// Route one message to the window it belongs to.
    ///
    /// Input translation gets the first look if the window accepts input,
    /// the window's own handlers get whatever is left.
    fn dispatch_message(
        &mut self,
        message: NativeMessage,
        payload: MessagePayload<'_>,
    ) -> WindowMessageResult {
        let id = match self.ha_registry.get(&message.hwnd) {
            Some(id) => *id,
            None => return WindowMessageResult::Unhandled,
        };
        let window = match self.ha_windows.get_mut(id.0) {
            Some(w) => w,
            None => return WindowMessageResult::Unhandled,
        };

        if window.is_input_enabled() {
            let res = self.ha_input.process_message(
                &self.ha_platform,
                &mut self.ha_events,
                id,
                &message,
            );
            if res.is_handled() {
                return res;
            }
        }

        let mut cx = WindowContext {
            platform: &self.ha_platform,
            events: &mut self.ha_events,
            input: &mut self.ha_input,
            cursors: &self.ha_cursors,
            id: id,
        };
        let res = window.process_message(&mut cx, &message, payload);

        if window.is_closed() {
            self.ha_registry.remove(&message.hwnd);
        }
        return res;
    }
}

impl<P: Platform, E: ApplicationEvents> Drop for HostApplication<P, E> {
    fn drop(&mut self) {
        for (_, window) in self.ha_windows.iter_mut() {
            window.destroy(&self.ha_platform, &mut self.ha_input);
        }
        self.ha_registry.clear();
    }
}

/// A window borrowed from its application
///
/// Read-only accessors come through `Deref`, operations that act on the
/// OS are forwarded with the application's context filled in.
pub struct WindowMut<'a, P: Platform, E: ApplicationEvents> {
    wm_window: &'a mut HostWindow,
    wm_cx: WindowContext<'a, P, E>,
    wm_registry: &'a mut HashMap<NativeHandle, WindowId>,
}

impl<'a, P: Platform, E: ApplicationEvents> Deref for WindowMut<'a, P, E> {
    type Target = HostWindow;

    fn deref(&self) -> &HostWindow {
        self.wm_window
    }
}

impl<'a, P: Platform, E: ApplicationEvents> WindowMut<'a, P, E> {
    pub fn id(&self) -> WindowId {
        self.wm_cx.id
    }

    /// Ask to close the window, returns false if the game cancelled
    pub fn close(&mut self) -> bool {
        let handle = self.wm_window.handle();
        let closed = self.wm_window.close(&mut self.wm_cx);
        if closed {
            self.wm_registry.remove(&handle);
        }
        closed
    }

    pub fn minimize(&self) {
        self.wm_window.minimize(self.wm_cx.platform);
    }

    pub fn maximize(&self) {
        self.wm_window.maximize(self.wm_cx.platform);
    }

    pub fn restore(&self) {
        self.wm_window.restore(self.wm_cx.platform);
    }

    pub fn bring_to_front(&self) {
        self.wm_window.bring_to_front(self.wm_cx.platform);
    }

    pub fn focus(&self) {
        self.wm_window.focus(self.wm_cx.platform);
    }

    pub fn activate(&self) {
        self.wm_window.activate(self.wm_cx.platform);
    }

    pub fn is_visible(&self) -> bool {
        self.wm_window.is_visible(self.wm_cx.platform)
    }

    pub fn set_visible(&self, visible: bool) {
        self.wm_window.set_visible(self.wm_cx.platform, visible);
    }

    pub fn is_enabled(&self) -> bool {
        self.wm_window.is_enabled(self.wm_cx.platform)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.wm_window.set_enabled(self.wm_cx.platform, enabled);
    }

    pub fn is_minimized(&self) -> bool {
        self.wm_window.is_minimized(self.wm_cx.platform)
    }

    pub fn is_maximized(&self) -> bool {
        self.wm_window.is_maximized(self.wm_cx.platform)
    }

    pub fn set_input_enabled(&mut self, enabled: bool) {
        self.wm_window.set_input_enabled(enabled);
    }

    pub fn set_mode(&mut self, mode: WindowMode) {
        self.wm_window.set_mode(self.wm_cx.platform, mode);
    }

    pub fn title(&self) -> String {
        self.wm_window.title(self.wm_cx.platform)
    }

    pub fn set_title(&self, title: &str) {
        self.wm_window.set_title(self.wm_cx.platform, title);
    }

    pub fn set_min_size(&mut self, size: Option<(i32, i32)>) {
        self.wm_window.set_min_size(self.wm_cx.platform, size);
    }

    pub fn set_max_size(&mut self, size: Option<(i32, i32)>) {
        self.wm_window.set_max_size(self.wm_cx.platform, size);
    }

    pub fn set_cursor_type(&mut self, cursor: CursorType) {
        self.wm_window.set_cursor_type(cursor);
    }

    pub fn bounds(&mut self) -> Rect<i32> {
        self.wm_window.bounds(self.wm_cx.platform)
    }

    pub fn client_bounds(&mut self) -> Rect<i32> {
        self.wm_window.client_bounds(self.wm_cx.platform)
    }

    pub fn set_bounds(&mut self, bounds: Rect<i32>) {
        self.wm_window.set_bounds(self.wm_cx.platform, bounds);
    }

    pub fn start_tracking(&mut self) -> bool {
        self.wm_cx
            .input
            .start_tracking(self.wm_cx.platform, self.wm_window.handle())
    }

    pub fn stop_tracking(&mut self) {
        self.wm_cx
            .input
            .stop_tracking(self.wm_cx.platform, self.wm_window.handle());
    }
}
