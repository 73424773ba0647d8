//! # Anemone
//!
//! Here we put together the host layer and the presentation layer. A single
//! game window is created and driven by the message pump, and on Windows a
//! Vulkan swapchain clears it every frame.
//!
//! * `host` - windows, the message pump, keyboard/mouse/gamepad input and
//!   display enumeration, on top of a `Platform` implementation.
//! * `present` - a Vulkan instance, device and the `VulkanSwapChain`.
//! * `config` - startup settings read from `ANEMONE_*` environment variables.
//!
//! Off Windows the headless platform is used. Nothing ever posts messages
//! to it, so the loop just runs until the frame cap.

extern crate host;
extern crate present;
extern crate utils;

mod config;
#[cfg(windows)]
mod render;

use config::Config;
use host::{
    ApplicationEvents, Event, EventQueue, HostApplication, MouseButton, Platform, VirtualKey,
    WindowDesc, WindowId, WindowMode,
};
use utils::log;
use utils::timing::FrameCounter;
use utils::{Context, Result};

use std::time::Duration;

/// Frames to run when nothing else stops the headless loop
#[cfg(not(windows))]
const HEADLESS_FRAME_CAP: u64 = 60;

/// How often the frame rate gets logged
const FRAME_REPORT_PERIOD: Duration = Duration::from_secs(5);

/// React to what the host reported this frame
fn handle_event<P: Platform, E: ApplicationEvents>(
    app: &mut HostApplication<P, E>,
    game: WindowId,
    event: &Event,
) {
    match event {
        Event::KeyDown {
            key: VirtualKey::ESCAPE,
            window,
            ..
        } => {
            // Escape first releases the mouse, then closes
            if app.input().tracked().is_some() {
                app.stop_tracking(*window);
            } else if let Some(mut win) = app.window_mut(*window) {
                if !win.close() {
                    log::info!("Closing {} was cancelled", window);
                }
            }
        }
        Event::KeyDown {
            key: VirtualKey::F11,
            window,
            repeat: false,
            ..
        } if *window == game => {
            if let Some(mut win) = app.window_mut(game) {
                let mode = match win.mode() {
                    WindowMode::Windowed => WindowMode::Borderless,
                    _ => WindowMode::Windowed,
                };
                log::info!("Switching {} to {:?}", game, mode);
                win.set_mode(mode);
            }
        }
        Event::MouseButtonDown {
            button: MouseButton::LEFT,
            window,
            ..
        } => {
            if !app.start_tracking(*window) {
                log::error!("Could not capture the mouse for {}", window);
            }
        }
        Event::WindowClose { window, cancelled } => {
            log::info!("Window {} close requested (cancelled: {})", window, cancelled)
        }
        Event::EndSession { .. } => log::info!("Session is ending"),
        ev => log::debug!("{:?}", ev),
    }
}

fn run<P: Platform>(platform: P, config: &Config) -> Result<()> {
    let mut app = HostApplication::new(platform, EventQueue::new())
        .context("Could not start the host application")?;

    let metrics = app.get_display_metrics();
    for display in metrics.displays.iter() {
        log::info!(
            "Display {}: {:?} work area {:?}{}",
            display.name,
            display.bounds,
            display.work_area,
            if display.primary { " (primary)" } else { "" }
        );
    }

    let (width, height) = config.window_size;
    let desc = WindowDesc::new(&config.window_title)
        .mode(config.window_mode)
        .bounds(host::Rect::new(100, 100, width, height));
    let game = app
        .make_window(&desc)
        .context("Could not create the game window")?;

    #[cfg(windows)]
    let mut renderer = {
        let client = match app.window_mut(game) {
            Some(mut win) => win.client_bounds(),
            None => host::Rect::default(),
        };
        let hwnd = app.window(game).map(|w| w.handle().0).unwrap_or(0);
        match render::Renderer::new(
            &config.window_title,
            config.validation,
            app.platform().module_handle(),
            hwnd,
            (client.width(), client.height()),
        ) {
            Ok(r) => r,
            Err(e) => {
                app.report_fatal_error(&format!("Could not initialize Vulkan: {:#}", e));
                return Err(e);
            }
        }
    };

    #[cfg(not(windows))]
    let max_frames = Some(config.max_frames.unwrap_or(HEADLESS_FRAME_CAP));
    #[cfg(windows)]
    let max_frames = config.max_frames;

    let mut counter = FrameCounter::new(FRAME_REPORT_PERIOD);
    let mut frames: u64 = 0;

    log::debug!("Begin render loop...");
    while app.is_running() {
        app.process_messages();

        let events: Vec<Event> = app.events_mut().drain_events().collect();
        for event in events.iter() {
            #[cfg(windows)]
            if let Event::WindowSizeChanged {
                window,
                width,
                height,
            } = event
            {
                if *window == game {
                    renderer.resize(*width, *height);
                }
            }
            handle_event(&mut app, game, event);
        }

        if app.release_closed_windows() > 0 && !app.is_running() {
            break;
        }

        #[cfg(windows)]
        if let Err(e) = renderer.draw_frame() {
            app.report_fatal_error(&format!("Rendering failed: {:#}", e));
            return Err(e);
        }
        #[cfg(not(windows))]
        std::thread::sleep(Duration::from_millis(16));

        frames += 1;
        if let Some((count, avg)) = counter.tick() {
            log::info!("{} frames, {:?} per frame", count, avg);
        }
        if max_frames.map(|max| frames >= max).unwrap_or(false) {
            log::info!("Reached the frame limit of {}", frames);
            break;
        }
    }

    Ok(())
}

/// Log why we are going down and exit with an error
fn report_application_stop(err: utils::Error) -> ! {
    log::error!("Application stopped: {:#}", err);
    std::process::exit(1);
}

fn main() {
    utils::logging::init();

    let config = match Config::from_env().context("Invalid configuration") {
        Ok(config) => config,
        Err(e) => report_application_stop(e),
    };
    log::debug!("{:?}", config);

    #[cfg(windows)]
    let platform = host::Win32Platform::new();
    #[cfg(not(windows))]
    let platform = host::HeadlessPlatform::new();

    if let Err(e) = run(platform, &config) {
        report_application_stop(e);
    }
    log::info!("Exiting");
}
