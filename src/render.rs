// Vulkan output for the game window
//
// The swapchain only needs two things from the host: a way to create a
// surface for the window and the window's current drawable size. Both come
// from WindowSurface, the size is fed from the window's size events.

use present::{
    create_win32_surface, vk, CreateInfo, Device, FrameStatus, Instance, PresentStatus,
    SurfaceBackend, VulkanSwapChain,
};
use utils::{log, Result};

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

fn drawable_size(width: i32, height: i32) -> Option<(u32, u32)> {
    match width > 0 && height > 0 {
        true => Some((width as u32, height as u32)),
        false => None,
    }
}

/// Surface source for a native window
pub struct WindowSurface {
    ws_hinstance: isize,
    ws_hwnd: isize,
    /// Client area size, None while the window has no area
    ws_drawable: Rc<Cell<Option<(u32, u32)>>>,
}

impl SurfaceBackend for WindowSurface {
    fn create_surface(
        &self,
        entry: &present::ash::Entry,
        inst: &present::ash::Instance,
    ) -> std::result::Result<vk::SurfaceKHR, vk::Result> {
        create_win32_surface(
            entry,
            inst,
            self.ws_hinstance as vk::HINSTANCE,
            self.ws_hwnd as vk::HWND,
        )
    }

    fn get_vulkan_drawable_size(&self) -> Option<vk::Extent2D> {
        self.ws_drawable.get().map(|(width, height)| vk::Extent2D {
            width: width,
            height: height,
        })
    }
}

pub struct Renderer {
    r_swapchain: VulkanSwapChain,
    r_drawable: Rc<Cell<Option<(u32, u32)>>>,
}

impl Renderer {
    /// Bring up Vulkan for the window `hwnd` of module `hinstance`
    pub fn new(
        app_name: &str,
        validation: bool,
        hinstance: isize,
        hwnd: isize,
        client_size: (i32, i32),
    ) -> Result<Self> {
        let info = CreateInfo::builder()
            .application_name(app_name)
            .enable_validation(validation)
            .build();
        let inst = Arc::new(Instance::new(&info)?);
        let dev = Arc::new(Device::new(inst)?);

        let drawable = Rc::new(Cell::new(drawable_size(client_size.0, client_size.1)));
        let ret = Self {
            r_swapchain: VulkanSwapChain::new(
                dev,
                Box::new(WindowSurface {
                    ws_hinstance: hinstance,
                    ws_hwnd: hwnd,
                    ws_drawable: drawable.clone(),
                }),
            )?,
            r_drawable: drawable,
        };

        log::info!(
            "Swapchain ready: {} images, {:?}",
            ret.r_swapchain.image_count(),
            ret.r_swapchain.format().map(|f| f.format)
        );
        Ok(ret)
    }

    /// Record the window's new client size, zero means minimized
    pub fn resize(&self, width: i32, height: i32) {
        self.r_drawable.set(drawable_size(width, height));
    }

    /// Draw and present one frame
    ///
    /// Returns false if the frame was dropped.
    pub fn draw_frame(&mut self) -> Result<bool> {
        if self.r_drawable.get().is_none() {
            return Ok(false);
        }

        match self.r_swapchain.start()? {
            FrameStatus::Ready { .. } => {}
            FrameStatus::OutOfDate => return Ok(false),
        }

        Ok(self.r_swapchain.present()? == PresentStatus::Presented)
    }
}
