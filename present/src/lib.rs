//! # Vulkan presentation for Anemone host windows
//!
//! This crate owns the small amount of Vulkan needed to get pixels onto a
//! host window: an instance, a device with a graphics queue, a
//! `VkSurfaceKHR` for the window and the `VulkanSwapChain` that drives the
//! per-frame acquire/record/present loop.
//!
//! ```ignore
//! let info = CreateInfo::builder().application_name("Anemone").build();
//! let inst = Arc::new(Instance::new(&info)?);
//! let dev = Arc::new(Device::new(inst)?);
//! let mut swapchain = VulkanSwapChain::new(dev, Box::new(window_backend))?;
//!
//! loop {
//!     if let FrameStatus::Ready { .. } = swapchain.start()? {
//!         // record into swapchain.current_command_buffer()
//!         swapchain.present()?;
//!     }
//! }
//! ```
//!
//! ## Requirements
//!
//! A Vulkan 1.3 driver (dynamic rendering is core there). The following
//! extensions are used:
//! * VK_KHR_surface plus the platform surface extension (VK_KHR_win32_surface)
//! * VK_KHR_swapchain
//! * VK_EXT_debug_utils when validation is enabled

mod device;
mod instance;
mod surface;
mod swapchain;
#[cfg(test)]
mod tests;

pub use device::Device;
pub use instance::Instance;
pub use surface::{create_win32_surface, SurfaceBackend};
pub use swapchain::{
    choose_extent, choose_image_count, choose_present_mode, choose_swapchain_format, FrameCursor,
    FrameStatus, PresentStatus, VulkanSwapChain, CLEAR_COLOR, DESIRED_IMAGE_COUNT,
    MAX_FRAMES_IN_FLIGHT,
};

// Re-export ash so callers implementing SurfaceBackend use the same version
pub use ash;
pub use ash::vk;

use std::ffi::CStr;
use thiserror::Error;

#[allow(non_camel_case_types)]
#[derive(Error, Debug, PartialEq)]
pub enum PresentError {
    #[error("Could not load the Vulkan library")]
    VK_LOADER_UNAVAILABLE,
    #[error("Could not create a Vulkan instance: {0}")]
    COULD_NOT_CREATE_INSTANCE(vk::Result),
    #[error("No Vulkan physical device available")]
    NO_PHYSICAL_DEVICE,
    #[error("No queue family supports graphics")]
    NO_GRAPHICS_QUEUE,
    #[error("Could not create a Vulkan device: {0}")]
    COULD_NOT_CREATE_DEVICE(vk::Result),
    #[error("Could not create a surface for the window: {0}")]
    COULD_NOT_CREATE_SURFACE(vk::Result),
    #[error("The graphics queue cannot present to this surface")]
    VK_SURF_NOT_SUPPORTED,
    #[error("Could not query the surface: {0}")]
    SURFACE_QUERY_FAILED(vk::Result),
    #[error("The surface reported no usable formats")]
    INVALID_FORMAT,
    #[error("Could not create the swapchain: {0}")]
    COULD_NOT_CREATE_SWAPCHAIN(vk::Result),
    #[error("Could not create swapchain image views: {0}")]
    COULD_NOT_CREATE_IMAGE(vk::Result),
    #[error("Could not create synchronization objects: {0}")]
    COULD_NOT_CREATE_SYNC(vk::Result),
    #[error("Command buffer operation failed: {0}")]
    COMMAND_BUFFER_FAILED(vk::Result),
    #[error("In-flight fence operation failed: {0}")]
    FENCE_FAILED(vk::Result),
    #[error("vkAcquireNextImageKHR failed: {0}")]
    COULD_NOT_ACQUIRE_NEXT_IMAGE(vk::Result),
    #[error("vkQueueSubmit failed: {0}")]
    SUBMIT_FAILED(vk::Result),
    #[error("vkQueuePresentKHR failed: {0}")]
    PRESENT_FAILED(vk::Result),
    #[error("vkDeviceWaitIdle failed: {0}")]
    WAIT_IDLE_FAILED(vk::Result),
}

pub type Result<T> = std::result::Result<T, PresentError>;

/// Parameters for Instance creation.
pub struct CreateInfo {
    pub application_name: String,
    /// Enable VK_LAYER_KHRONOS_validation and the debug messenger
    pub enable_validation: bool,
    /// Instance extensions needed to create surfaces for our windows.
    /// VK_KHR_surface is always added.
    pub surface_extensions: Vec<&'static CStr>,
}

impl CreateInfo {
    pub fn builder() -> CreateInfoBuilder {
        CreateInfoBuilder {
            ci: CreateInfo {
                application_name: "Anemone".to_string(),
                enable_validation: cfg!(debug_assertions),
                surface_extensions: vec![ash::extensions::khr::Win32Surface::name()],
            },
        }
    }
}

/// Implements the builder pattern for easier instance creation
pub struct CreateInfoBuilder {
    ci: CreateInfo,
}

impl CreateInfoBuilder {
    pub fn application_name(mut self, name: &str) -> Self {
        self.ci.application_name = name.to_string();
        self
    }

    pub fn enable_validation(mut self, enable: bool) -> Self {
        self.ci.enable_validation = enable;
        self
    }

    /// Replace the list of platform surface extensions
    pub fn surface_extensions(mut self, exts: &[&'static CStr]) -> Self {
        self.ci.surface_extensions = exts.to_vec();
        self
    }

    pub fn build(self) -> CreateInfo {
        self.ci
    }
}
