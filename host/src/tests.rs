use super::*;
use crate::display::{join_displays, DisplayDevice, MonitorInfo};
use crate::gamepad::{normalize_stick, normalize_trigger, XINPUT_GAMEPAD_LEFT_THUMB_DEADZONE};
use crate::msg::*;
use crate::platform::RawMouse;
use crate::window::window_style;

type TestApp = HostApplication<HeadlessPlatform, EventQueue>;

fn new_app() -> TestApp {
    HostApplication::new(HeadlessPlatform::new(), EventQueue::new()).unwrap()
}

fn game_window(app: &mut TestApp) -> (WindowId, NativeHandle) {
    let id = app.make_window(&WindowDesc::new("game")).unwrap();
    let handle = app.window(id).unwrap().handle();
    (id, handle)
}

fn post(app: &TestApp, handle: NativeHandle, msg: u32, wparam: usize, lparam: isize) {
    app.platform()
        .post_message(NativeMessage::new(handle, msg, wparam, lparam));
}

fn drain(app: &mut TestApp) -> Vec<Event> {
    app.events_mut().drain_events().collect()
}

/// lParam of a keyboard message: repeat count 1, scan code and flags
fn key_lparam(scan_code: u16, flags: u16) -> isize {
    make_lparam(1, scan_code | flags)
}

#[test]
fn class_registration_failure_is_reported() {
    let platform = HeadlessPlatform::new();
    platform.fail_class_registration(true);

    let res = HostApplication::new(platform, EventQueue::new());
    assert_eq!(res.err(), Some(HostError::CLASS_REGISTRATION_FAILED));
}

#[test]
fn window_creation_registers_handle() {
    let mut app = new_app();
    assert!(app.platform().is_class_registered());

    let (id, handle) = game_window(&mut app);
    assert!(!handle.is_null());
    assert!(app.platform().window_exists(handle));
    assert_eq!(app.find_window(handle), Some(id));
    assert_eq!(app.windows(), vec![id]);
    assert!(app.is_running());

    let mut win = app.window_mut(id).unwrap();
    assert!(win.is_visible());
    assert_eq!(win.title(), "game");
    assert_eq!(win.bounds(), Rect::new(100, 100, 1280, 720));
    // caption frame is 8 on the sides and bottom, 31 on top
    assert_eq!(win.client_bounds(), Rect::new(0, 0, 1264, 681));
}

#[test]
fn viewport_requires_parent() {
    let mut app = new_app();
    let desc = WindowDesc::new("viewport").window_type(WindowType::Viewport);
    assert_eq!(
        app.make_window(&desc).err(),
        Some(HostError::WINDOW_CREATION_FAILED("viewport".to_string()))
    );

    let (parent, parent_handle) = game_window(&mut app);
    let child = app
        .make_window(&desc.clone().parent(Some(parent)))
        .unwrap();
    let child_handle = app.window(child).unwrap().handle();
    assert!(app.platform().window_exists(child_handle));
    assert_ne!(child_handle, parent_handle);
}

fn viewport_in(app: &mut TestApp, parent: WindowId) -> (WindowId, NativeHandle) {
    let desc = WindowDesc::new("viewport")
        .window_type(WindowType::Viewport)
        .parent(Some(parent));
    let id = app.make_window(&desc).unwrap();
    let handle = app.window(id).unwrap().handle();
    (id, handle)
}

#[test]
fn closing_a_parent_closes_its_children() {
    let mut app = new_app();
    let (parent, _) = game_window(&mut app);
    let (child, child_handle) = viewport_in(&mut app, parent);
    let (grandchild, _) = viewport_in(&mut app, child);

    assert!(app.window_mut(parent).unwrap().close());
    assert!(!app.platform().window_exists(child_handle));

    // WM_DESTROY reaches the children on the next pump
    app.process_messages();
    assert!(app.window(child).unwrap().is_closed());
    assert!(app.window(grandchild).unwrap().is_closed());
    assert_eq!(app.find_window(child_handle), None);
    assert!(!app.is_running());

    assert_eq!(app.release_closed_windows(), 3);
    assert!(app.windows().is_empty());
}

#[test]
fn children_are_released_with_their_parent() {
    let mut app = new_app();
    let (parent, _) = game_window(&mut app);
    let (other, _) = game_window(&mut app);
    let (child, _) = viewport_in(&mut app, parent);

    assert!(app.window_mut(parent).unwrap().close());
    assert_eq!(app.release_closed_windows(), 2);
    assert!(app.window(child).is_none());
    assert_eq!(app.windows(), vec![other]);
    assert!(app.is_running());
}

#[test]
fn released_parent_is_invalid() {
    let mut app = new_app();
    let (parent, _) = game_window(&mut app);
    assert!(app.window_mut(parent).unwrap().close());
    assert_eq!(app.release_closed_windows(), 1);

    let desc = WindowDesc::new("orphan").parent(Some(parent));
    assert_eq!(app.make_window(&desc).err(), Some(HostError::INVALID_WINDOW));
}

#[test]
fn non_game_windows_are_always_windowed() {
    let mut app = new_app();
    let desc = WindowDesc::new("form")
        .window_type(WindowType::Form)
        .mode(WindowMode::Fullscreen);
    let id = app.make_window(&desc).unwrap();
    let handle = app.window(id).unwrap().handle();

    assert_eq!(app.window(id).unwrap().mode(), WindowMode::Windowed);
    assert!(!app.platform().is_maximized(handle));
}

#[test]
fn set_mode_on_form_does_nothing() {
    let mut app = new_app();
    let id = app
        .make_window(&WindowDesc::new("form").window_type(WindowType::Form))
        .unwrap();
    let handle = app.window(id).unwrap().handle();
    let style = app.platform().window_style(handle);

    app.window_mut(id).unwrap().set_mode(WindowMode::Borderless);

    assert_eq!(app.window(id).unwrap().mode(), WindowMode::Windowed);
    assert_eq!(app.platform().window_style(handle), style);
    assert!(!app.platform().is_maximized(handle));
}

#[test]
fn set_mode_round_trips_placement() {
    let mut app = new_app();
    let (id, handle) = game_window(&mut app);

    {
        let mut win = app.window_mut(id).unwrap();
        win.set_mode(WindowMode::Borderless);
        assert_eq!(win.mode(), WindowMode::Borderless);
        assert!(win.is_maximized());
        assert_eq!(win.bounds(), Rect::new(0, 0, 1920, 1080));
    }
    let style = app.platform().window_style(handle).unwrap();
    assert_eq!(style, window_style(WindowType::Game, WindowMode::Borderless));
    assert!(style.ex_style & WS_EX_TOPMOST != 0);

    let mut win = app.window_mut(id).unwrap();
    win.set_mode(WindowMode::Windowed);
    assert!(!win.is_maximized());
    assert_eq!(win.bounds(), Rect::new(100, 100, 1280, 720));
    drop(win);
    assert_eq!(
        app.platform().window_style(handle),
        Some(window_style(WindowType::Game, WindowMode::Windowed))
    );
}

#[test]
fn bounds_are_kept_while_minimized() {
    let mut app = new_app();
    let (id, _) = game_window(&mut app);

    let mut win = app.window_mut(id).unwrap();
    win.minimize();
    assert!(win.is_minimized());
    assert_eq!(win.bounds(), Rect::new(100, 100, 1280, 720));
    assert_eq!(win.client_bounds(), Rect::new(0, 0, 1264, 681));

    win.restore();
    win.set_bounds(Rect::new(50, 60, 816, 639));
    assert_eq!(win.client_bounds(), Rect::new(0, 0, 800, 600));
}

#[test]
fn close_can_be_cancelled() {
    let mut app = new_app();
    let (id, handle) = game_window(&mut app);

    app.events_mut().set_cancel_close(true);
    post(&app, handle, WM_CLOSE, 0, 0);
    app.process_messages();

    assert_eq!(
        drain(&mut app),
        vec![Event::WindowClose {
            window: id,
            cancelled: true
        }]
    );
    assert!(!app.window(id).unwrap().is_closed());
    assert!(app.platform().window_exists(handle));
    assert!(app.is_running());

    app.events_mut().set_cancel_close(false);
    post(&app, handle, WM_CLOSE, 0, 0);
    app.process_messages();

    assert_eq!(
        drain(&mut app),
        vec![Event::WindowClose {
            window: id,
            cancelled: false
        }]
    );
    let window = app.window(id).unwrap();
    assert!(window.is_closed());
    assert!(window.handle().is_null());
    assert!(!app.platform().window_exists(handle));
    assert_eq!(app.find_window(handle), None);
    assert!(!app.is_running());

    assert_eq!(app.release_closed_windows(), 1);
    assert!(app.window(id).is_none());
    assert!(app.windows().is_empty());
}

#[test]
fn close_through_window_mut() {
    let mut app = new_app();
    let (id, handle) = game_window(&mut app);

    assert!(app.window_mut(id).unwrap().close());
    assert!(app.window(id).unwrap().is_closed());
    assert_eq!(app.find_window(handle), None);
    assert_eq!(app.platform().window_count(), 0);

    // messages for the dead handle go nowhere
    post(&app, handle, WM_KEYDOWN, VK_A as usize, key_lparam(0x1E, 0));
    app.process_messages();
    assert_eq!(
        drain(&mut app),
        vec![Event::WindowClose {
            window: id,
            cancelled: false
        }]
    );
}

#[test]
fn shift_release_reports_both_sides() {
    let mut app = new_app();
    let (id, handle) = game_window(&mut app);

    post(&app, handle, WM_KEYDOWN, VK_SHIFT as usize, key_lparam(0x2A, 0));
    post(&app, handle, WM_KEYUP, VK_SHIFT as usize, key_lparam(0x2A, KF_UP));
    app.process_messages();

    assert_eq!(
        drain(&mut app),
        vec![
            Event::KeyDown {
                window: id,
                key: VirtualKey::LSHIFT,
                modifiers: Modifiers::LSHIFT,
                repeat: false
            },
            Event::KeyDown {
                window: id,
                key: VirtualKey::LSHIFT,
                modifiers: Modifiers::NONE,
                repeat: false
            },
            Event::KeyDown {
                window: id,
                key: VirtualKey::RSHIFT,
                modifiers: Modifiers::NONE,
                repeat: false
            },
        ]
    );
    assert_eq!(app.input().modifiers(), Modifiers::NONE);
}

#[test]
fn modifier_sides_are_resolved() {
    let mut app = new_app();
    let (id, handle) = game_window(&mut app);

    post(&app, handle, WM_KEYDOWN, VK_CONTROL as usize, key_lparam(0x1D, KF_EXTENDED));
    post(&app, handle, WM_KEYDOWN, VK_A as usize, key_lparam(0x1E, KF_REPEAT));
    post(&app, handle, WM_KEYUP, VK_CONTROL as usize, key_lparam(0x1D, KF_EXTENDED | KF_UP));
    app.process_messages();

    assert_eq!(
        drain(&mut app),
        vec![
            Event::KeyDown {
                window: id,
                key: VirtualKey::RCTRL,
                modifiers: Modifiers::RCTRL,
                repeat: false
            },
            Event::KeyDown {
                window: id,
                key: VirtualKey::A,
                modifiers: Modifiers::RCTRL,
                repeat: true
            },
            Event::KeyUp {
                window: id,
                key: VirtualKey::RCTRL,
                modifiers: Modifiers::NONE
            },
        ]
    );
}

#[test]
fn system_keys_fall_through_to_default_handling() {
    let mut app = new_app();
    let (id, handle) = game_window(&mut app);

    let res = app.dispatch_message(
        NativeMessage::new(handle, WM_SYSKEYDOWN, VK_F1 as usize + 3, key_lparam(0x3E, 0)),
        MessagePayload::None,
    );
    assert_eq!(res, WindowMessageResult::Unhandled);
    assert_eq!(
        drain(&mut app),
        vec![Event::KeyDown {
            window: id,
            key: VirtualKey::F4,
            modifiers: Modifiers::NONE,
            repeat: false
        }]
    );

    let res = app.dispatch_message(
        NativeMessage::new(handle, WM_KEYDOWN, VK_ESCAPE as usize, key_lparam(0x01, 0)),
        MessagePayload::None,
    );
    assert_eq!(res, WindowMessageResult::Handled(0));
}

#[test]
fn disabled_input_skips_translation() {
    let mut app = new_app();
    let (id, handle) = game_window(&mut app);
    app.window_mut(id).unwrap().set_input_enabled(false);

    let res = app.dispatch_message(
        NativeMessage::new(handle, WM_KEYDOWN, VK_A as usize, key_lparam(0x1E, 0)),
        MessagePayload::None,
    );
    assert_eq!(res, WindowMessageResult::Unhandled);
    assert!(app.events().is_empty());

    // window handlers still run
    post(&app, handle, WM_ENTERSIZEMOVE, 0, 0);
    app.process_messages();
    assert_eq!(
        drain(&mut app),
        vec![Event::WindowResizeStarted { window: id }]
    );
}

#[test]
fn surrogate_pairs_are_joined() {
    let mut app = new_app();
    let (id, handle) = game_window(&mut app);

    post(&app, handle, WM_CHAR, 0xD83D, key_lparam(0, 0));
    post(&app, handle, WM_CHAR, 0xDE00, key_lparam(0, 0));
    // a low surrogate on its own is dropped
    post(&app, handle, WM_CHAR, 0xDE00, key_lparam(0, 0));
    post(&app, handle, WM_CHAR, 'x' as usize, key_lparam(0, KF_REPEAT));
    app.process_messages();

    assert_eq!(
        drain(&mut app),
        vec![
            Event::Character {
                window: id,
                character: '😀',
                repeat: false
            },
            Event::Character {
                window: id,
                character: 'x',
                repeat: true
            },
        ]
    );
}

#[test]
fn mouse_enter_move_and_leave() {
    let mut app = new_app();
    let (id, handle) = game_window(&mut app);

    post(&app, handle, WM_MOUSEMOVE, 0, make_lparam(10, 20));
    post(&app, handle, WM_MOUSEMOVE, 0, make_lparam(11, 20));
    post(&app, handle, WM_MOUSELEAVE, 0, 0);
    app.process_messages();

    assert!(app.platform().is_leave_tracked(handle));
    assert_eq!(
        drain(&mut app),
        vec![
            Event::MouseEnter { window: id },
            Event::MouseMove {
                window: id,
                motion: MouseMotion::Absolute { x: 10, y: 20 },
                modifiers: Modifiers::NONE
            },
            Event::MouseMove {
                window: id,
                motion: MouseMotion::Absolute { x: 11, y: 20 },
                modifiers: Modifiers::NONE
            },
            Event::MouseLeave { window: id },
        ]
    );
}

#[test]
fn buttons_and_wheel() {
    let mut app = new_app();
    let (id, handle) = game_window(&mut app);

    post(&app, handle, WM_LBUTTONDBLCLK, 0, make_lparam(5, 6));
    post(&app, handle, WM_RBUTTONUP, 0, make_lparam(7, 8));
    post(&app, handle, WM_MOUSEWHEEL, (WHEEL_DELTA as u16 as usize) << 16, 0);
    post(&app, handle, WM_MOUSEHWHEEL, ((-WHEEL_DELTA) as u16 as usize) << 16, 0);
    app.process_messages();

    assert_eq!(
        drain(&mut app),
        vec![
            Event::MouseButtonDown {
                window: id,
                button: MouseButton::LEFT,
                x: 5,
                y: 6,
                double_click: true,
                modifiers: Modifiers::NONE
            },
            Event::MouseButtonUp {
                window: id,
                button: MouseButton::RIGHT,
                x: 7,
                y: 8,
                modifiers: Modifiers::NONE
            },
            Event::MouseWheel {
                window: id,
                dx: 0.0,
                dy: 1.0,
                modifiers: Modifiers::NONE
            },
            Event::MouseWheel {
                window: id,
                dx: -1.0,
                dy: 0.0,
                modifiers: Modifiers::NONE
            },
        ]
    );
}

#[test]
fn x_buttons_return_true() {
    let mut app = new_app();
    let (id, handle) = game_window(&mut app);

    let res = app.dispatch_message(
        NativeMessage::new(handle, WM_XBUTTONDOWN, (XBUTTON2 as usize) << 16, make_lparam(1, 2)),
        MessagePayload::None,
    );
    assert_eq!(res, WindowMessageResult::Handled(1));
    assert_eq!(
        drain(&mut app),
        vec![Event::MouseButtonDown {
            window: id,
            button: MouseButton::EXTRA,
            x: 1,
            y: 2,
            double_click: false,
            modifiers: Modifiers::NONE
        }]
    );
}

#[test]
fn first_absolute_raw_sample_only_sets_origin() {
    let mut app = new_app();
    let (id, handle) = game_window(&mut app);

    for (x, y) in [(0, 0), (RAW_ABSOLUTE_RANGE as i32, RAW_ABSOLUTE_RANGE as i32)] {
        app.platform().push_raw_mouse(RawMouse {
            flags: MOUSE_MOVE_ABSOLUTE,
            last_x: x,
            last_y: y,
        });
        post(&app, handle, WM_INPUT, 0, 0);
    }
    app.platform().push_raw_mouse(RawMouse {
        flags: MOUSE_MOVE_RELATIVE,
        last_x: -3,
        last_y: 4,
    });
    post(&app, handle, WM_INPUT, 0, 0);
    app.process_messages();

    assert_eq!(
        drain(&mut app),
        vec![
            Event::MouseMove {
                window: id,
                motion: MouseMotion::Relative { dx: 1920, dy: 1080 },
                modifiers: Modifiers::NONE
            },
            Event::MouseMove {
                window: id,
                motion: MouseMotion::Relative { dx: -3, dy: 4 },
                modifiers: Modifiers::NONE
            },
        ]
    );
}

fn post_absolute(app: &TestApp, handle: NativeHandle, x: i32, y: i32) {
    app.platform().push_raw_mouse(RawMouse {
        flags: MOUSE_MOVE_ABSOLUTE,
        last_x: x,
        last_y: y,
    });
    post(app, handle, WM_INPUT, 0, 0);
}

#[test]
fn each_tracking_session_restarts_the_absolute_origin() {
    let mut app = new_app();
    let (id, handle) = game_window(&mut app);
    let full = RAW_ABSOLUTE_RANGE as i32;
    let across = vec![Event::MouseMove {
        window: id,
        motion: MouseMotion::Relative { dx: 1920, dy: 1080 },
        modifiers: Modifiers::NONE,
    }];

    assert!(app.start_tracking(id));
    post_absolute(&app, handle, 0, 0);
    app.process_messages();
    assert!(app.events().is_empty());
    post_absolute(&app, handle, full, full);
    app.process_messages();
    assert_eq!(drain(&mut app), across);

    app.stop_tracking(id);
    assert!(app.start_tracking(id));

    // (0, 0) is far from the last sample, but it's a new session
    post_absolute(&app, handle, 0, 0);
    app.process_messages();
    assert!(app.events().is_empty());

    post_absolute(&app, handle, full, full);
    app.process_messages();
    assert_eq!(drain(&mut app), across);
}

#[test]
fn tracking_hides_and_clips_cursor() {
    let mut app = new_app();
    let (id, handle) = game_window(&mut app);
    app.platform().set_cursor_pos(500, 400);

    assert!(app.start_tracking(id));
    assert!(app.input().is_tracking(handle));
    assert_eq!(app.platform().raw_input_target(), Some(handle));
    assert_eq!(
        app.platform().cursor_clip(),
        Some(Rect::new(108, 131, 1264, 681))
    );
    assert_eq!(app.input().clip_rect(), app.platform().cursor_clip());
    assert!(app.platform().cursor().is_null());

    // cursor messages are swallowed while raw input reports motion
    post(&app, handle, WM_MOUSEMOVE, 0, make_lparam(10, 20));
    post(&app, handle, WM_SETCURSOR, handle.0 as usize, make_lparam(HTCLIENT, 0));
    app.process_messages();
    assert!(app.events().is_empty());
    assert!(app.platform().cursor().is_null());

    app.stop_tracking(id);
    assert_eq!(app.input().tracked(), None);
    assert_eq!(app.platform().raw_input_target(), None);
    assert_eq!(app.platform().cursor_clip(), None);
    assert_eq!(app.platform().cursor_pos(), (500, 400));
}

#[test]
fn tracking_moves_between_windows() {
    let mut app = new_app();
    let (first, first_handle) = game_window(&mut app);
    let (second, second_handle) = game_window(&mut app);

    assert!(app.start_tracking(first));
    assert!(app.start_tracking(second));
    assert_eq!(app.input().tracked(), Some(second_handle));
    assert_eq!(app.platform().raw_input_target(), Some(second_handle));

    // tracking the same window again is fine
    assert!(app.start_tracking(second));

    // stopping a window that isn't tracked changes nothing
    app.platform().set_cursor_pos(300, 200);
    let clip = app.platform().cursor_clip();
    let pos = app.platform().cursor_pos();
    let target = app.platform().raw_input_target();
    assert!(clip.is_some());

    app.stop_tracking(first);
    assert!(app.input().is_tracking(second_handle));
    assert!(!app.input().is_tracking(first_handle));
    assert_eq!(app.input().clip_rect(), clip);
    assert_eq!(app.platform().cursor_clip(), clip);
    assert_eq!(app.platform().cursor_pos(), pos);
    assert_eq!(app.platform().raw_input_target(), target);
}

#[test]
fn mouse_moves_are_dropped_while_any_window_is_tracked() {
    let mut app = new_app();
    let (first, _) = game_window(&mut app);
    let (_, second_handle) = game_window(&mut app);

    assert!(app.start_tracking(first));
    post(&app, second_handle, WM_MOUSEMOVE, 0, make_lparam(10, 20));
    app.process_messages();
    assert!(app.events().is_empty());
}

#[test]
fn tracking_fails_without_raw_input() {
    let mut app = new_app();
    let (id, _) = game_window(&mut app);
    app.platform().fail_raw_registration(true);

    assert!(!app.start_tracking(id));
    assert_eq!(app.input().tracked(), None);
    assert_eq!(app.platform().cursor_clip(), None);
}

#[test]
fn deactivation_stops_tracking() {
    let mut app = new_app();
    let (id, handle) = game_window(&mut app);
    app.platform().set_key_down(VK_LSHIFT, true);

    assert!(app.window_mut(id).unwrap().start_tracking());
    post(&app, handle, WM_ACTIVATE, WA_INACTIVE as usize, 0);
    app.process_messages();

    assert_eq!(app.input().tracked(), None);
    assert_eq!(app.input().modifiers(), Modifiers::LSHIFT);
    assert!(!app.window(id).unwrap().is_active());
    assert_eq!(
        drain(&mut app),
        vec![Event::WindowActivated {
            window: id,
            active: false
        }]
    );

    // losing the application has the same effect
    assert!(app.start_tracking(id));
    post(&app, handle, WM_ACTIVATEAPP, 0, 0);
    app.process_messages();
    assert_eq!(app.input().tracked(), None);
}

#[test]
fn client_cursor_follows_cursor_type() {
    let mut app = new_app();
    let (id, handle) = game_window(&mut app);
    let set_cursor = NativeMessage::new(handle, WM_SETCURSOR, handle.0 as usize, make_lparam(HTCLIENT, 0));

    let res = app.dispatch_message(set_cursor, MessagePayload::None);
    assert_eq!(res, WindowMessageResult::Handled(1));
    assert_eq!(app.platform().cursor(), app.get_cursor(CursorType::Arrow));

    app.window_mut(id).unwrap().set_cursor_type(CursorType::Hand);
    app.dispatch_message(set_cursor, MessagePayload::None);
    assert_eq!(app.platform().cursor(), CursorHandle(IDC_HAND as isize));

    app.window_mut(id).unwrap().set_cursor_type(CursorType::None);
    app.dispatch_message(set_cursor, MessagePayload::None);
    assert!(app.platform().cursor().is_null());

    // outside the client area the default handling picks the cursor
    let caption = NativeMessage::new(handle, WM_SETCURSOR, handle.0 as usize, make_lparam(2, 0));
    assert_eq!(
        app.dispatch_message(caption, MessagePayload::None),
        WindowMessageResult::Unhandled
    );
}

#[test]
fn cursor_table_covers_every_type() {
    let platform = HeadlessPlatform::new();
    let table = CursorTable::load(&platform);

    assert!(table.get(CursorType::None).is_null());
    assert_eq!(table.get(CursorType::Arrow), CursorHandle(IDC_ARROW as isize));
    assert_eq!(table.get(CursorType::IBeam), CursorHandle(IDC_IBEAM as isize));
    assert_eq!(table.get(CursorType::Help), CursorHandle(IDC_HELP as isize));
}

#[test]
fn resizing_suppresses_size_and_move() {
    let mut app = new_app();
    let (id, handle) = game_window(&mut app);

    post(&app, handle, WM_ENTERSIZEMOVE, 0, 0);
    post(&app, handle, WM_SIZE, SIZE_RESTORED, make_lparam(800, 600));
    post(&app, handle, WM_MOVE, 0, make_lparam(20, 30));
    post(&app, handle, WM_EXITSIZEMOVE, 0, 0);
    post(&app, handle, WM_SIZE, SIZE_RESTORED, make_lparam(1264, 681));
    post(&app, handle, WM_MOVE, 0, make_lparam(108, 131));
    // minimizing is not a size change
    post(&app, handle, WM_SIZE, SIZE_MINIMIZED, 0);
    app.process_messages();

    assert_eq!(
        drain(&mut app),
        vec![
            Event::WindowResizeStarted { window: id },
            Event::WindowResizeCompleted {
                window: id,
                bounds: Rect::new(100, 100, 1280, 720)
            },
            Event::WindowSizeChanged {
                window: id,
                width: 1264,
                height: 681
            },
            Event::WindowLocationChanged {
                window: id,
                x: 108,
                y: 131
            },
        ]
    );
    assert!(!app.window(id).unwrap().is_resizing());
}

#[test]
fn move_while_minimized_is_ignored() {
    let mut app = new_app();
    let (_, handle) = game_window(&mut app);
    app.platform().set_minimized(handle, true);

    post(&app, handle, WM_MOVE, 0, make_lparam(0x8300, 0x8300));
    app.process_messages();
    assert!(app.events().is_empty());
}

#[test]
fn min_max_info_limits_client_size() {
    let mut app = new_app();
    let desc = WindowDesc::new("limits")
        .min_size(Some((320, 240)))
        .max_size(Some((800, 600)));
    let id = app.make_window(&desc).unwrap();
    let handle = app.window(id).unwrap().handle();

    let mut info = MinMaxInfo {
        min_track_size: (1, 1),
        max_track_size: (4000, 4000),
    };
    let res = app.dispatch_message(
        NativeMessage::new(handle, WM_GETMINMAXINFO, 0, 0),
        MessagePayload::MinMaxInfo(&mut info),
    );

    assert_eq!(res, WindowMessageResult::Handled(0));
    assert_eq!(info.min_track_size, (320, 240));
    // plus the 16x39 frame of a captioned window
    assert_eq!(info.max_track_size, (816, 639));
}

#[test]
fn maximized_borderless_frame_is_trimmed_on_multi_monitor() {
    let mut app = new_app();
    let desc = WindowDesc::new("borderless").mode(WindowMode::Borderless);
    let id = app.make_window(&desc).unwrap();
    let handle = app.window(id).unwrap().handle();
    assert!(app.platform().is_maximized(handle));
    let calc = NativeMessage::new(handle, WM_NCCALCSIZE, 1, 0);

    // a single monitor leaves the rectangle alone
    let mut rect = Rect::new(0, 0, 1920, 1080);
    let res = app.dispatch_message(calc, MessagePayload::NcCalcSize(&mut rect));
    assert_eq!(res, WindowMessageResult::Unhandled);
    assert_eq!(rect, Rect::new(0, 0, 1920, 1080));

    app.platform().set_metric(SM_CMONITORS, 2);
    let res = app.dispatch_message(calc, MessagePayload::NcCalcSize(&mut rect));
    assert_eq!(res, WindowMessageResult::Handled(0));
    assert_eq!(rect, Rect::new(8, 8, 1904, 1064));
}

#[test]
fn borderless_switch_trims_frame_on_multi_monitor() {
    let mut app = new_app();
    let (id, handle) = game_window(&mut app);
    app.platform().set_metric(SM_CMONITORS, 2);

    let mut win = app.window_mut(id).unwrap();
    win.set_mode(WindowMode::Borderless);
    // the frame change during the switch trims 8 from every edge
    assert_eq!(win.client_bounds(), Rect::new(0, 0, 1904, 1064));
    drop(win);
    assert!(app.platform().frame_policy(handle).unwrap().trim_maximized);

    let mut win = app.window_mut(id).unwrap();
    win.set_mode(WindowMode::Windowed);
    assert_eq!(win.client_bounds(), Rect::new(0, 0, 1264, 681));
    drop(win);
    assert!(!app.platform().frame_policy(handle).unwrap().trim_maximized);
}

#[test]
fn size_limits_apply_to_set_bounds() {
    let mut app = new_app();
    let desc = WindowDesc::new("limits").max_size(Some((800, 600)));
    let id = app.make_window(&desc).unwrap();

    let mut win = app.window_mut(id).unwrap();
    win.set_bounds(Rect::new(0, 0, 2000, 2000));
    assert_eq!(win.bounds(), Rect::new(0, 0, 816, 639));
    assert_eq!(win.client_bounds(), Rect::new(0, 0, 800, 600));

    win.set_max_size(None);
    win.set_min_size(Some((400, 300)));
    win.set_bounds(Rect::new(0, 0, 100, 100));
    assert_eq!(win.bounds(), Rect::new(0, 0, 400, 300));
    win.set_bounds(Rect::new(0, 0, 2000, 2000));
    assert_eq!(win.bounds(), Rect::new(0, 0, 2000, 2000));
}

#[test]
fn notifications_sent_outside_the_pump_are_replayed() {
    let mut app = new_app();
    let (id, handle) = game_window(&mut app);
    let suggested = Rect::new(40, 40, 1600, 900);

    app.platform().send_message(
        NativeMessage::new(handle, WM_DPICHANGED, (120 << 16) | 120, 0),
        Some(suggested),
    );
    app.platform()
        .send_message(NativeMessage::new(handle, WM_POWERBROADCAST, PBT_APMSUSPEND, 0), None);
    // only gets default processing
    app.platform().send_message(
        NativeMessage::new(handle, WM_SETCURSOR, handle.0 as usize, make_lparam(HTCLIENT, 0)),
        None,
    );
    assert!(app.events().is_empty());

    app.process_messages();
    assert_eq!(
        drain(&mut app),
        vec![
            Event::WindowDpiChanged {
                window: id,
                dpi: 120,
                scale: 1.25
            },
            Event::SystemSuspending,
        ]
    );
    assert_eq!(app.window_mut(id).unwrap().bounds(), suggested);
    assert!(app.platform().cursor().is_null());
}

#[test]
fn dpi_change_moves_to_suggested_rect() {
    let mut app = new_app();
    let (id, handle) = game_window(&mut app);

    let suggested = Rect::new(50, 50, 1920, 1080);
    let res = app.dispatch_message(
        NativeMessage::new(handle, WM_DPICHANGED, (144 << 16) | 144, 0),
        MessagePayload::SuggestedRect(suggested),
    );

    assert_eq!(res, WindowMessageResult::Handled(0));
    assert_eq!(app.window_mut(id).unwrap().bounds(), suggested);
    assert_eq!(
        drain(&mut app),
        vec![Event::WindowDpiChanged {
            window: id,
            dpi: 144,
            scale: 1.5
        }]
    );
}

#[test]
fn game_windows_block_the_key_menu() {
    let mut app = new_app();
    let (_, game) = game_window(&mut app);
    let form = app
        .make_window(&WindowDesc::new("form").window_type(WindowType::Form))
        .unwrap();
    let form = app.window(form).unwrap().handle();

    let syscommand = |handle, cmd| NativeMessage::new(handle, WM_SYSCOMMAND, cmd, 0);
    assert_eq!(
        app.dispatch_message(syscommand(game, SC_KEYMENU), MessagePayload::None),
        WindowMessageResult::Handled(0)
    );
    assert_eq!(
        app.dispatch_message(syscommand(form, SC_KEYMENU), MessagePayload::None),
        WindowMessageResult::Unhandled
    );
    // the low bits are used by the system and ignored
    assert_eq!(
        app.dispatch_message(syscommand(form, SC_SCREENSAVE | 0x2), MessagePayload::None),
        WindowMessageResult::Handled(0)
    );
    assert_eq!(
        app.dispatch_message(syscommand(game, SC_CLOSE), MessagePayload::None),
        WindowMessageResult::Unhandled
    );
}

#[test]
fn session_and_power_notifications() {
    let mut app = new_app();
    let (_, handle) = game_window(&mut app);

    post(&app, handle, WM_ENDSESSION, 1, ENDSESSION_LOGOFF as isize);
    // the session isn't ending after all
    post(&app, handle, WM_ENDSESSION, 0, 0);
    post(&app, handle, WM_POWERBROADCAST, PBT_APMSUSPEND, 0);
    post(&app, handle, WM_POWERBROADCAST, PBT_APMRESUMEAUTOMATIC, 0);
    post(&app, handle, WM_DISPLAYCHANGE, 32, 0);
    app.process_messages();

    assert_eq!(
        drain(&mut app),
        vec![
            Event::EndSession { logoff: true },
            Event::SystemSuspending,
            Event::SystemResuming,
            Event::DisplayChange,
        ]
    );
}

fn pad(packet: u32, buttons: GamepadButtons, left_trigger: u8) -> GamepadState {
    GamepadState {
        packet: packet,
        buttons: buttons,
        left_trigger: left_trigger,
        ..Default::default()
    }
}

#[test]
fn gamepad_changes_become_events() {
    let mut app = new_app();

    app.platform()
        .set_gamepad(1, Some(pad(1, GamepadButtons::A, u8::MAX)));
    app.process_messages();
    assert!(app.gamepads().is_connected(1));
    assert_eq!(
        drain(&mut app),
        vec![
            Event::GamepadButtonDown {
                slot: 1,
                button: GamepadButtons::A
            },
            Event::GamepadAnalog {
                slot: 1,
                axis: GamepadAxis::LeftTrigger,
                value: 1.0
            },
        ]
    );

    // same packet, nothing new
    app.process_messages();
    assert!(app.events().is_empty());

    app.platform()
        .set_gamepad(1, Some(pad(2, GamepadButtons::B | GamepadButtons::START, 0)));
    app.process_messages();
    assert_eq!(
        drain(&mut app),
        vec![
            Event::GamepadButtonDown {
                slot: 1,
                button: GamepadButtons::START
            },
            Event::GamepadButtonUp {
                slot: 1,
                button: GamepadButtons::A
            },
            Event::GamepadButtonDown {
                slot: 1,
                button: GamepadButtons::B
            },
            Event::GamepadAnalog {
                slot: 1,
                axis: GamepadAxis::LeftTrigger,
                value: 0.0
            },
        ]
    );
    assert_eq!(
        app.gamepads().held_buttons(1),
        GamepadButtons::B | GamepadButtons::START
    );

    // unplugging releases whatever was held
    app.platform().set_gamepad(1, None);
    app.process_messages();
    assert_eq!(
        drain(&mut app),
        vec![
            Event::GamepadButtonUp {
                slot: 1,
                button: GamepadButtons::START
            },
            Event::GamepadButtonUp {
                slot: 1,
                button: GamepadButtons::B
            },
        ]
    );
    assert!(!app.gamepads().is_connected(1));
    assert!(app.gamepads().held_buttons(1).is_empty());
}

#[test]
fn analog_normalization() {
    assert_eq!(normalize_trigger(0), 0.0);
    assert_eq!(normalize_trigger(30), 0.0);
    assert_eq!(normalize_trigger(255), 1.0);

    let dead = XINPUT_GAMEPAD_LEFT_THUMB_DEADZONE;
    assert_eq!(normalize_stick(dead, dead), 0.0);
    assert_eq!(normalize_stick(-dead, dead), 0.0);
    assert_eq!(normalize_stick(i16::MAX, dead), 1.0);
    assert_eq!(normalize_stick(i16::MIN, dead), -1.0);
    assert!(normalize_stick(20000, dead) > 0.0);
}

fn device(name: &str, attached: bool, mirroring: bool, primary: bool) -> DisplayDevice {
    DisplayDevice {
        name: name.to_string(),
        attached: attached,
        mirroring: mirroring,
        primary: primary,
        orientation: DisplayOrientation::Default,
    }
}

#[test]
fn displays_join_devices_and_monitors() {
    let devices = [
        device("\\\\.\\DISPLAY1", true, false, true),
        device("\\\\.\\DISPLAY2", true, true, false),
        device("\\\\.\\DISPLAY3", false, false, false),
        DisplayDevice {
            orientation: DisplayOrientation::Rotate90,
            ..device("\\\\.\\DISPLAY4", true, false, false)
        },
    ];
    let monitors = [MonitorInfo {
        device_name: "\\\\.\\DISPLAY1".to_string(),
        bounds: Rect::new(0, 0, 1920, 1080),
        work_area: Rect::new(0, 0, 1920, 1040),
        primary: true,
    }];

    let displays = join_displays(&devices, &monitors);
    assert_eq!(displays.len(), 2);
    assert_eq!(displays[0].name, "\\\\.\\DISPLAY1");
    assert!(displays[0].primary);
    assert_eq!(displays[0].work_area, Rect::new(0, 0, 1920, 1040));
    // no monitor, so no area
    assert_eq!(displays[1].name, "\\\\.\\DISPLAY4");
    assert_eq!(displays[1].orientation, DisplayOrientation::Rotate90);
    assert_eq!(displays[1].bounds, Rect::default());
}

#[test]
fn display_metrics_from_platform() {
    let app = new_app();
    app.platform()
        .add_display_device(device("\\\\.\\DISPLAY1", true, false, true));
    app.platform().add_monitor(MonitorInfo {
        device_name: "\\\\.\\DISPLAY1".to_string(),
        bounds: Rect::new(0, 0, 1920, 1080),
        work_area: Rect::new(0, 40, 1920, 1040),
        primary: true,
    });

    let metrics = app.get_display_metrics();
    assert_eq!(metrics.virtual_desktop, Rect::new(0, 0, 1920, 1080));
    assert_eq!(metrics.primary().map(|d| d.bounds), Some(Rect::new(0, 0, 1920, 1080)));
}

#[test]
fn fatal_errors_reach_the_user() {
    let app = new_app();
    app.report_fatal_error("device lost");
    assert_eq!(app.platform().fatal_errors(), vec!["device lost".to_string()]);
}

#[test]
fn virtual_keys_translate_both_ways() {
    assert_eq!(VirtualKey::from_native(VK_A + 25), VirtualKey::Z);
    assert_eq!(VirtualKey::from_native(VK_F1 + 11), VirtualKey::F12);
    assert_eq!(VirtualKey::from_native(0xFF), VirtualKey::UNKNOWN);
    assert_eq!(VirtualKey::ESCAPE.to_native(), Some(VK_ESCAPE));
    assert!(VirtualKey::RALT.is_modifier());
    assert!(!VirtualKey::SPACE.is_modifier());
}
