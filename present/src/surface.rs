// Window surface creation
//
// The swapchain does not know what kind of window it draws to. Whoever
// owns the window hands it a SurfaceBackend that can produce a
// VkSurfaceKHR and report the window's drawable size.

use ash::extensions::khr;
use ash::{vk, Entry};

pub trait SurfaceBackend {
    /// Create the VkSurfaceKHR for this window.
    ///
    /// The swapchain owns the returned surface and destroys it on drop.
    fn create_surface(
        &self,
        entry: &Entry,
        inst: &ash::Instance,
    ) -> Result<vk::SurfaceKHR, vk::Result>;

    /// Helper for getting the drawable (client area) size of the window.
    ///
    /// Returns None if not supported, in which case the extent has to
    /// come from the surface capabilities.
    fn get_vulkan_drawable_size(&self) -> Option<vk::Extent2D>;
}

/// Create a surface for a Win32 window
///
/// `hinstance` is the module that registered the window class and `hwnd`
/// the window itself.
pub fn create_win32_surface(
    entry: &Entry,
    inst: &ash::Instance,
    hinstance: vk::HINSTANCE,
    hwnd: vk::HWND,
) -> Result<vk::SurfaceKHR, vk::Result> {
    let create_info = vk::Win32SurfaceCreateInfoKHR::builder()
        .hinstance(hinstance)
        .hwnd(hwnd);
    let win32_surface = khr::Win32Surface::new(entry, inst);

    unsafe { win32_surface.create_win32_surface(&create_info, None) }
}
