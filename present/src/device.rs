// Vulkan device representation
//
// This stores per-GPU state: the logical device and the graphics queue
// used for both rendering and presentation.

use ash::extensions::khr;
use ash::vk;

use crate::instance::Instance;
use crate::{PresentError, Result};
use utils::log;

use std::ffi::CStr;
use std::sync::Arc;

/// Present Device
///
/// The logical device and graphics queue of one GPU.
pub struct Device {
    pub(crate) inst: Arc<Instance>,
    /// the logical device we are using
    pub(crate) dev: ash::Device,
    /// the physical device selected to display to
    pub(crate) pdev: vk::PhysicalDevice,
    pub(crate) graphics_queue_family: u32,
    pub(crate) graphics_queue: vk::Queue,
}

impl Device {
    /// Create the logical device with swapchain and dynamic rendering enabled
    ///
    /// The swapchain extension and dynamic rendering are the only
    /// things we ask for.
    fn create_device(
        inst: &ash::Instance,
        pdev: vk::PhysicalDevice,
        queue_family: u32,
    ) -> Result<ash::Device> {
        let dev_extension_names = [khr::Swapchain::name().as_ptr()];

        let mut vulkan13_features =
            vk::PhysicalDeviceVulkan13Features::builder().dynamic_rendering(true);

        // for now we only have one graphics queue, so one priority
        let priorities = [1.0];
        let queue_infos = [vk::DeviceQueueCreateInfo::builder()
            .queue_family_index(queue_family)
            .queue_priorities(&priorities)
            .build()];

        let dev_create_info = vk::DeviceCreateInfo::builder()
            .queue_create_infos(&queue_infos)
            .enabled_extension_names(&dev_extension_names)
            .push_next(&mut vulkan13_features);

        unsafe {
            inst.create_device(pdev, &dev_create_info, None)
                .map_err(PresentError::COULD_NOT_CREATE_DEVICE)
        }
    }

    /// Choose a queue family
    ///
    /// returns an index into the array of queue types. Presentation
    /// support is checked later against the window's surface.
    fn select_queue_family(inst: &ash::Instance, pdev: vk::PhysicalDevice) -> Option<u32> {
        // get the properties per queue family
        unsafe { inst.get_physical_device_queue_family_properties(pdev) }
            .iter()
            .position(|info| info.queue_flags.contains(vk::QueueFlags::GRAPHICS))
            .map(|index| index as u32)
    }

    /// Choose a vkPhysicalDevice and its graphics queue family.
    ///
    /// Discrete GPUs are preferred, otherwise the first device with a
    /// graphics queue is used.
    fn select_pdev(inst: &ash::Instance) -> Result<(vk::PhysicalDevice, u32)> {
        let pdevices = unsafe {
            inst.enumerate_physical_devices()
                .or(Err(PresentError::NO_PHYSICAL_DEVICE))?
        };
        if pdevices.is_empty() {
            return Err(PresentError::NO_PHYSICAL_DEVICE);
        }

        let mut candidates: Vec<(vk::PhysicalDevice, u32, bool)> = pdevices
            .iter()
            .filter_map(|&pdev| {
                let family = Self::select_queue_family(inst, pdev)?;
                let props = unsafe { inst.get_physical_device_properties(pdev) };
                let discrete = props.device_type == vk::PhysicalDeviceType::DISCRETE_GPU;
                Some((pdev, family, discrete))
            })
            .collect();
        // stable sort keeps enumeration order within each group
        candidates.sort_by_key(|&(_, _, discrete)| !discrete);

        candidates
            .first()
            .map(|&(pdev, family, _)| (pdev, family))
            .ok_or(PresentError::NO_GRAPHICS_QUEUE)
    }

    /// Create a new default Device
    ///
    /// Picks the first physical device in the Instance with a graphics queue.
    pub fn new(instance: Arc<Instance>) -> Result<Self> {
        let (pdev, family) = Self::select_pdev(&instance.inst)?;

        let props = unsafe { instance.inst.get_physical_device_properties(pdev) };
        let name = unsafe { CStr::from_ptr(props.device_name.as_ptr()) };
        log::info!(
            "Using GPU {:?} (queue family {})",
            name.to_string_lossy(),
            family
        );

        let dev = Self::create_device(&instance.inst, pdev, family)?;
        let queue = unsafe { dev.get_device_queue(family, 0) };

        Ok(Self {
            inst: instance,
            dev: dev,
            pdev: pdev,
            graphics_queue_family: family,
            graphics_queue: queue,
        })
    }

    /// Block until all GPU work on this device has completed
    pub fn wait_idle(&self) -> Result<()> {
        unsafe {
            self.dev
                .device_wait_idle()
                .map_err(PresentError::WAIT_IDLE_FAILED)
        }
    }

    /// The raw ash device, for callers recording their own commands
    pub fn raw(&self) -> &ash::Device {
        &self.dev
    }
}

impl Drop for Device {
    fn drop(&mut self) {
        unsafe {
            if let Err(e) = self.dev.device_wait_idle() {
                log::error!("vkDeviceWaitIdle failed during teardown: {:?}", e);
            }
            self.dev.destroy_device(None);
        }
    }
}
