// The per-window present loop
//
// VulkanSwapChain owns the surface of one window along with every
// swapchain dependent object. A frame is a `start` (wait, acquire, begin
// recording) followed by a `present` (finish recording, submit, present).
// When the surface goes out of date all of it is torn down and rebuilt.

use ash::extensions::khr;
use ash::vk;

use crate::device::Device;
use crate::surface::SurfaceBackend;
use crate::{PresentError, Result};
use utils::{log, partial_clamp, partial_max};

use std::sync::Arc;

/// Number of frames whose command buffers may be pending on the GPU
pub const MAX_FRAMES_IN_FLIGHT: usize = 3;

/// Prefer triple buffering
pub const DESIRED_IMAGE_COUNT: u32 = 3;

/// Magenta, so an image nobody drew to is obvious
pub const CLEAR_COLOR: [f32; 4] = [1.0, 0.0, 1.0, 1.0];

/// Result of `VulkanSwapChain::start`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrameStatus {
    /// An image was acquired and its command buffer is recording inside
    /// a dynamic rendering pass.
    Ready { image_index: u32 },
    /// The surface changed (or has no area). The swapchain was rebuilt
    /// and this frame is dropped, call `start` again next tick.
    OutOfDate,
}

/// Result of `VulkanSwapChain::present`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PresentStatus {
    Presented,
    /// The image was submitted but the surface went out of date while
    /// presenting. The swapchain was rebuilt, the frame is not re-presented.
    Recreated,
    /// No frame was started
    Skipped,
}

/// choose a vkSurfaceFormatKHR for the vkSurfaceKHR
///
/// B8G8R8A8_SRGB with the sRGB nonlinear color space wherever it appears
/// in the list, otherwise whatever the surface lists first.
pub fn choose_swapchain_format(formats: &[vk::SurfaceFormatKHR]) -> Option<vk::SurfaceFormatKHR> {
    formats
        .iter()
        .find(|fmt| {
            fmt.format == vk::Format::B8G8R8A8_SRGB
                && fmt.color_space == vk::ColorSpaceKHR::SRGB_NONLINEAR
        })
        .or(formats.first())
        .copied()
}

/// Mailbox if the surface offers it.
///
/// FIFO is the fallback even if it is missing from the list, every
/// implementation is required to support it.
pub fn choose_present_mode(modes: &[vk::PresentModeKHR]) -> vk::PresentModeKHR {
    modes
        .iter()
        .cloned()
        .find(|&mode| mode == vk::PresentModeKHR::MAILBOX)
        .unwrap_or(vk::PresentModeKHR::FIFO)
}

/// How many images we want the swapchain to contain
pub fn choose_image_count(caps: &vk::SurfaceCapabilitiesKHR) -> u32 {
    match caps.max_image_count {
        // zero means there is no upper limit
        0 => partial_max(DESIRED_IMAGE_COUNT, caps.min_image_count),
        max => partial_clamp(DESIRED_IMAGE_COUNT, caps.min_image_count, max),
    }
}

/// The resolution of the swapchain images
///
/// The surface dictates it through `current_extent` unless the width is
/// the special value u32::MAX, in which case the window's drawable size is
/// clamped into the supported range.
pub fn choose_extent(
    caps: &vk::SurfaceCapabilitiesKHR,
    drawable: Option<vk::Extent2D>,
) -> vk::Extent2D {
    if caps.current_extent.width != u32::MAX {
        return caps.current_extent;
    }

    let size = drawable.unwrap_or(caps.min_image_extent);
    vk::Extent2D {
        width: partial_clamp(
            size.width,
            caps.min_image_extent.width,
            caps.max_image_extent.width,
        ),
        height: partial_clamp(
            size.height,
            caps.min_image_extent.height,
            caps.max_image_extent.height,
        ),
    }
}

/// Tracks which sync objects and which command buffer the next frame uses.
///
/// The sync objects cycle through the image count, the command buffers
/// through MAX_FRAMES_IN_FLIGHT. The two need not be equal so they wrap
/// independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameCursor {
    fc_image_count: usize,
    fc_semaphore_index: usize,
    fc_frame_index: usize,
}

impl FrameCursor {
    pub fn new(image_count: usize) -> Self {
        assert!(image_count > 0, "A swapchain needs at least one image");
        Self {
            fc_image_count: image_count,
            fc_semaphore_index: 0,
            fc_frame_index: 0,
        }
    }

    pub fn semaphore_index(&self) -> usize {
        self.fc_semaphore_index
    }

    pub fn frame_index(&self) -> usize {
        self.fc_frame_index
    }

    pub fn image_count(&self) -> usize {
        self.fc_image_count
    }

    /// Move on to the next frame. Called once per present.
    pub fn advance(&mut self) {
        self.fc_semaphore_index = (self.fc_semaphore_index + 1) % self.fc_image_count;
        self.fc_frame_index = (self.fc_frame_index + 1) % MAX_FRAMES_IN_FLIGHT;
    }
}

/// A layout change recorded as a pipeline barrier
struct LayoutTransition {
    old_layout: vk::ImageLayout,
    new_layout: vk::ImageLayout,
    src_stage: vk::PipelineStageFlags,
    src_access: vk::AccessFlags,
    dst_stage: vk::PipelineStageFlags,
    dst_access: vk::AccessFlags,
}

const TO_COLOR_ATTACHMENT: LayoutTransition = LayoutTransition {
    old_layout: vk::ImageLayout::UNDEFINED,
    new_layout: vk::ImageLayout::COLOR_ATTACHMENT_OPTIMAL,
    src_stage: vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT,
    src_access: vk::AccessFlags::empty(),
    dst_stage: vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT,
    dst_access: vk::AccessFlags::COLOR_ATTACHMENT_WRITE,
};

const TO_PRESENT: LayoutTransition = LayoutTransition {
    old_layout: vk::ImageLayout::COLOR_ATTACHMENT_OPTIMAL,
    new_layout: vk::ImageLayout::PRESENT_SRC_KHR,
    src_stage: vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT,
    src_access: vk::AccessFlags::COLOR_ATTACHMENT_WRITE,
    dst_stage: vk::PipelineStageFlags::BOTTOM_OF_PIPE,
    dst_access: vk::AccessFlags::empty(),
};

const COLOR_RANGE: vk::ImageSubresourceRange = vk::ImageSubresourceRange {
    aspect_mask: vk::ImageAspectFlags::COLOR,
    base_mip_level: 0,
    level_count: 1,
    base_array_layer: 0,
    layer_count: 1,
};

/// Per image synchronization, indexed by FrameCursor::semaphore_index
#[derive(Copy, Clone)]
struct SyncObjects {
    so_image_available: vk::Semaphore,
    so_render_finished: vk::Semaphore,
    so_in_flight: vk::Fence,
}

/// Per frame in flight recording state
struct FrameResources {
    fr_pool: vk::CommandPool,
    fr_cbuf: vk::CommandBuffer,
    /// The sync slot whose fence guards the last submission of fr_cbuf
    fr_last_slot: Option<usize>,
}

/// Everything that is rebuilt when the surface goes out of date
struct SwapchainState {
    ss_swapchain: vk::SwapchainKHR,
    ss_format: vk::SurfaceFormatKHR,
    ss_extent: vk::Extent2D,
    ss_images: Vec<vk::Image>,
    ss_views: Vec<vk::ImageView>,
    ss_sync: Vec<SyncObjects>,
    ss_frames: Vec<FrameResources>,
    ss_cursor: FrameCursor,
}

pub struct VulkanSwapChain {
    sc_dev: Arc<Device>,
    sc_back: Box<dyn SurfaceBackend>,
    // function pointer loaders
    sc_surface_loader: khr::Surface,
    sc_swapchain_loader: khr::Swapchain,
    // the actual surface (KHR extension)
    sc_surface: vk::SurfaceKHR,
    /// None while the window has no drawable area
    sc_state: Option<SwapchainState>,
    /// Image acquired by `start` that `present` still has to hand back
    sc_current: Option<u32>,
}

/// Wait for a fence, retrying on spurious timeouts
fn wait_for_fence(dev: &ash::Device, fence: vk::Fence) -> Result<()> {
    loop {
        match unsafe { dev.wait_for_fences(&[fence], true, u64::MAX) } {
            Ok(()) => return Ok(()),
            Err(vk::Result::TIMEOUT) => {
                log::debug!("vkWaitForFences: vk::Result::TIMEOUT, retrying");
                continue;
            }
            Err(e) => return Err(PresentError::FENCE_FAILED(e)),
        }
    }
}

fn record_transition(
    dev: &ash::Device,
    cbuf: vk::CommandBuffer,
    image: vk::Image,
    t: &LayoutTransition,
) {
    let barrier = vk::ImageMemoryBarrier::builder()
        .old_layout(t.old_layout)
        .new_layout(t.new_layout)
        .src_access_mask(t.src_access)
        .dst_access_mask(t.dst_access)
        .src_queue_family_index(vk::QUEUE_FAMILY_IGNORED)
        .dst_queue_family_index(vk::QUEUE_FAMILY_IGNORED)
        .image(image)
        .subresource_range(COLOR_RANGE)
        .build();

    unsafe {
        dev.cmd_pipeline_barrier(
            cbuf,
            t.src_stage,
            t.dst_stage,
            vk::DependencyFlags::empty(),
            &[],
            &[],
            &[barrier],
        );
    }
}

impl VulkanSwapChain {
    /// Create the surface for `back` and an initial swapchain for it.
    pub fn new(dev: Arc<Device>, back: Box<dyn SurfaceBackend>) -> Result<Self> {
        let surface_loader = khr::Surface::new(&dev.inst.loader, &dev.inst.inst);
        let surface = back
            .create_surface(&dev.inst.loader, &dev.inst.inst)
            .map_err(PresentError::COULD_NOT_CREATE_SURFACE)?;

        // ensure compatibility with the surface
        let supported = unsafe {
            surface_loader.get_physical_device_surface_support(
                dev.pdev,
                dev.graphics_queue_family,
                surface,
            )
        };
        if supported != Ok(true) {
            unsafe { surface_loader.destroy_surface(surface, None) };
            return Err(PresentError::VK_SURF_NOT_SUPPORTED);
        }

        let swapchain_loader = khr::Swapchain::new(&dev.inst.inst, &dev.dev);

        let mut ret = Self {
            sc_dev: dev,
            sc_back: back,
            sc_surface_loader: surface_loader,
            sc_swapchain_loader: swapchain_loader,
            sc_surface: surface,
            sc_state: None,
            sc_current: None,
        };
        // on failure Drop releases the surface
        ret.create_swapchain()?;

        Ok(ret)
    }

    /// Populates sc_state with a new vkSwapchain and its dependents
    ///
    /// If the surface currently has no area (the window is minimized)
    /// sc_state is left empty.
    fn create_swapchain(&mut self) -> Result<()> {
        let pdev = self.sc_dev.pdev;
        let (caps, formats, modes) = unsafe {
            (
                self.sc_surface_loader
                    .get_physical_device_surface_capabilities(pdev, self.sc_surface)
                    .map_err(PresentError::SURFACE_QUERY_FAILED)?,
                self.sc_surface_loader
                    .get_physical_device_surface_formats(pdev, self.sc_surface)
                    .map_err(PresentError::SURFACE_QUERY_FAILED)?,
                self.sc_surface_loader
                    .get_physical_device_surface_present_modes(pdev, self.sc_surface)
                    .map_err(PresentError::SURFACE_QUERY_FAILED)?,
            )
        };

        let format = choose_swapchain_format(&formats).ok_or(PresentError::INVALID_FORMAT)?;
        let present_mode = choose_present_mode(&modes);
        let extent = choose_extent(&caps, self.sc_back.get_vulkan_drawable_size());
        if extent.width == 0 || extent.height == 0 {
            log::debug!("Surface has no area, deferring swapchain creation");
            self.sc_state = None;
            return Ok(());
        }

        let transform = if caps
            .supported_transforms
            .contains(vk::SurfaceTransformFlagsKHR::IDENTITY)
        {
            vk::SurfaceTransformFlagsKHR::IDENTITY
        } else {
            caps.current_transform
        };

        let create_info = vk::SwapchainCreateInfoKHR::builder()
            .surface(self.sc_surface)
            .min_image_count(choose_image_count(&caps))
            .image_color_space(format.color_space)
            .image_format(format.format)
            .image_extent(extent)
            .image_usage(vk::ImageUsageFlags::COLOR_ATTACHMENT)
            .image_sharing_mode(vk::SharingMode::EXCLUSIVE)
            .pre_transform(transform)
            .composite_alpha(vk::CompositeAlphaFlagsKHR::OPAQUE)
            .present_mode(present_mode)
            .clipped(true)
            .image_array_layers(1);

        let swapchain = unsafe {
            self.sc_swapchain_loader
                .create_swapchain(&create_info, None)
                .map_err(PresentError::COULD_NOT_CREATE_SWAPCHAIN)?
        };

        let mut state = SwapchainState {
            ss_swapchain: swapchain,
            ss_format: format,
            ss_extent: extent,
            ss_images: Vec::new(),
            ss_views: Vec::new(),
            ss_sync: Vec::new(),
            ss_frames: Vec::new(),
            ss_cursor: FrameCursor::new(1),
        };

        if let Err(e) = self.populate_state(&mut state) {
            self.destroy_state(state);
            return Err(e);
        }

        log::debug!(
            "Created swapchain: {}x{} {:?} {:?} with {} images",
            extent.width,
            extent.height,
            format.format,
            present_mode,
            state.ss_images.len()
        );
        self.sc_state = Some(state);
        Ok(())
    }

    /// Get the swapchain images and create views, sync objects and
    /// command buffers for them.
    fn populate_state(&self, state: &mut SwapchainState) -> Result<()> {
        let dev = &self.sc_dev.dev;

        state.ss_images = unsafe {
            self.sc_swapchain_loader
                .get_swapchain_images(state.ss_swapchain)
                .map_err(PresentError::COULD_NOT_CREATE_SWAPCHAIN)?
        };
        if state.ss_images.is_empty() {
            return Err(PresentError::COULD_NOT_CREATE_SWAPCHAIN(
                vk::Result::ERROR_INITIALIZATION_FAILED,
            ));
        }

        for image in state.ss_images.iter() {
            // we want to interact with this image as a 2D
            // array of pixels (i.e. the "normal" way)
            let create_info = vk::ImageViewCreateInfo::builder()
                .view_type(vk::ImageViewType::TYPE_2D)
                .format(state.ss_format.format)
                .components(vk::ComponentMapping {
                    r: vk::ComponentSwizzle::R,
                    g: vk::ComponentSwizzle::G,
                    b: vk::ComponentSwizzle::B,
                    a: vk::ComponentSwizzle::A,
                })
                // this view pertains to the entire image
                .subresource_range(COLOR_RANGE)
                .image(*image);

            state.ss_views.push(unsafe {
                dev.create_image_view(&create_info, None)
                    .map_err(PresentError::COULD_NOT_CREATE_IMAGE)?
            });
        }

        let sema_info = vk::SemaphoreCreateInfo::builder();
        // Signaled so the first wait on each slot falls through
        let fence_info = vk::FenceCreateInfo::builder().flags(vk::FenceCreateFlags::SIGNALED);
        for _ in 0..state.ss_images.len() {
            unsafe {
                let available = dev
                    .create_semaphore(&sema_info, None)
                    .map_err(PresentError::COULD_NOT_CREATE_SYNC)?;
                let finished = match dev.create_semaphore(&sema_info, None) {
                    Ok(s) => s,
                    Err(e) => {
                        dev.destroy_semaphore(available, None);
                        return Err(PresentError::COULD_NOT_CREATE_SYNC(e));
                    }
                };
                let fence = match dev.create_fence(&fence_info, None) {
                    Ok(f) => f,
                    Err(e) => {
                        dev.destroy_semaphore(available, None);
                        dev.destroy_semaphore(finished, None);
                        return Err(PresentError::COULD_NOT_CREATE_SYNC(e));
                    }
                };

                state.ss_sync.push(SyncObjects {
                    so_image_available: available,
                    so_render_finished: finished,
                    so_in_flight: fence,
                });
            }
        }

        let pool_info = vk::CommandPoolCreateInfo::builder()
            .flags(vk::CommandPoolCreateFlags::RESET_COMMAND_BUFFER)
            .queue_family_index(self.sc_dev.graphics_queue_family);
        for _ in 0..MAX_FRAMES_IN_FLIGHT {
            unsafe {
                let pool = dev
                    .create_command_pool(&pool_info, None)
                    .map_err(PresentError::COMMAND_BUFFER_FAILED)?;
                let alloc_info = vk::CommandBufferAllocateInfo::builder()
                    .command_pool(pool)
                    .level(vk::CommandBufferLevel::PRIMARY)
                    .command_buffer_count(1);
                let cbuf = match dev.allocate_command_buffers(&alloc_info) {
                    Ok(bufs) if !bufs.is_empty() => bufs[0],
                    Ok(_) => {
                        dev.destroy_command_pool(pool, None);
                        return Err(PresentError::COMMAND_BUFFER_FAILED(
                            vk::Result::ERROR_INITIALIZATION_FAILED,
                        ));
                    }
                    Err(e) => {
                        dev.destroy_command_pool(pool, None);
                        return Err(PresentError::COMMAND_BUFFER_FAILED(e));
                    }
                };

                state.ss_frames.push(FrameResources {
                    fr_pool: pool,
                    fr_cbuf: cbuf,
                    fr_last_slot: None,
                });
            }
        }

        state.ss_cursor = FrameCursor::new(state.ss_images.len());
        Ok(())
    }

    /// Destroy the swapchain, its views and the per-image sync objects
    ///
    /// The caller must make sure the device is idle.
    fn destroy_state(&self, state: SwapchainState) {
        let dev = &self.sc_dev.dev;

        unsafe {
            for sync in state.ss_sync.iter() {
                dev.destroy_semaphore(sync.so_image_available, None);
                dev.destroy_semaphore(sync.so_render_finished, None);
                dev.destroy_fence(sync.so_in_flight, None);
            }
            for view in state.ss_views.iter() {
                dev.destroy_image_view(*view, None);
            }
            // this frees the command buffers too
            for frame in state.ss_frames.iter() {
                dev.destroy_command_pool(frame.fr_pool, None);
            }
            self.sc_swapchain_loader
                .destroy_swapchain(state.ss_swapchain, None);
        }
    }

    /// Rebuild the swapchain for the surface's current size
    ///
    /// Called on VK_ERROR_OUT_OF_DATE_KHR or SUBOPTIMAL_KHR, when the window
    /// was resized or moved to another output.
    fn recreate_swapchain(&mut self) -> Result<()> {
        // first wait for the device to finish working
        self.sc_dev.wait_idle()?;

        if let Some(state) = self.sc_state.take() {
            self.destroy_state(state);
        }
        self.sc_current = None;

        self.create_swapchain()
    }

    /// Begin a frame
    ///
    /// Waits for the sync slot to be free, acquires an image and leaves
    /// this frame's command buffer recording inside a dynamic rendering
    /// pass that clears the image to CLEAR_COLOR.
    pub fn start(&mut self) -> Result<FrameStatus> {
        assert!(
            self.sc_current.is_none(),
            "VulkanSwapChain::start called twice without present"
        );

        // The window may have been minimized when we last tried
        if self.sc_state.is_none() {
            self.create_swapchain()?;
        }

        let dev = self.sc_dev.clone();
        let state = match self.sc_state.as_mut() {
            Some(state) => state,
            None => return Ok(FrameStatus::OutOfDate),
        };

        let slot = state.ss_cursor.semaphore_index();
        let sync = state.ss_sync[slot];
        wait_for_fence(&dev.dev, sync.so_in_flight)?;

        let acquired = unsafe {
            self.sc_swapchain_loader.acquire_next_image(
                state.ss_swapchain,
                u64::MAX,
                sync.so_image_available,
                vk::Fence::null(),
            )
        };
        let image_index = match acquired {
            // suboptimal images still present fine
            Ok((index, _)) => index,
            Err(vk::Result::ERROR_OUT_OF_DATE_KHR) => {
                log::debug!("vkAcquireNextImageKHR: out of date, recreating swapchain");
                self.recreate_swapchain()?;
                return Ok(FrameStatus::OutOfDate);
            }
            Err(e) => return Err(PresentError::COULD_NOT_ACQUIRE_NEXT_IMAGE(e)),
        };

        let frame = &mut state.ss_frames[state.ss_cursor.frame_index()];
        // The command buffer may still be pending from a submission that
        // was fenced by another slot
        if let Some(prev) = frame.fr_last_slot {
            if prev != slot {
                wait_for_fence(&dev.dev, state.ss_sync[prev].so_in_flight)?;
            }
        }
        frame.fr_last_slot = Some(slot);
        let cbuf = frame.fr_cbuf;

        let image = state.ss_images[image_index as usize];
        let view = state.ss_views[image_index as usize];
        let extent = state.ss_extent;

        unsafe {
            dev.dev
                .reset_fences(&[sync.so_in_flight])
                .map_err(PresentError::FENCE_FAILED)?;
            dev.dev
                .reset_command_buffer(cbuf, vk::CommandBufferResetFlags::empty())
                .map_err(PresentError::COMMAND_BUFFER_FAILED)?;

            let begin_info = vk::CommandBufferBeginInfo::builder()
                .flags(vk::CommandBufferUsageFlags::ONE_TIME_SUBMIT);
            dev.dev
                .begin_command_buffer(cbuf, &begin_info)
                .map_err(PresentError::COMMAND_BUFFER_FAILED)?;
        }

        record_transition(&dev.dev, cbuf, image, &TO_COLOR_ATTACHMENT);

        let color_attachments = [vk::RenderingAttachmentInfo::builder()
            .image_view(view)
            .image_layout(vk::ImageLayout::COLOR_ATTACHMENT_OPTIMAL)
            .load_op(vk::AttachmentLoadOp::CLEAR)
            .store_op(vk::AttachmentStoreOp::STORE)
            .clear_value(vk::ClearValue {
                color: vk::ClearColorValue {
                    float32: CLEAR_COLOR,
                },
            })
            .build()];
        let rendering_info = vk::RenderingInfo::builder()
            .render_area(vk::Rect2D {
                offset: vk::Offset2D { x: 0, y: 0 },
                extent: extent,
            })
            .layer_count(1)
            .color_attachments(&color_attachments);
        unsafe { dev.dev.cmd_begin_rendering(cbuf, &rendering_info) };

        self.sc_current = Some(image_index);
        Ok(FrameStatus::Ready { image_index })
    }

    /// Finish the frame begun by `start` and present it.
    ///
    /// A no-op if no frame is recording, which happens after `start`
    /// returned `FrameStatus::OutOfDate`.
    pub fn present(&mut self) -> Result<PresentStatus> {
        let image_index = match self.sc_current.take() {
            Some(index) => index,
            None => return Ok(PresentStatus::Skipped),
        };
        let dev = self.sc_dev.clone();
        let state = match self.sc_state.as_mut() {
            Some(state) => state,
            None => return Ok(PresentStatus::Skipped),
        };

        let sync = state.ss_sync[state.ss_cursor.semaphore_index()];
        let cbuf = state.ss_frames[state.ss_cursor.frame_index()].fr_cbuf;
        let image = state.ss_images[image_index as usize];

        unsafe { dev.dev.cmd_end_rendering(cbuf) };
        record_transition(&dev.dev, cbuf, image, &TO_PRESENT);

        let wait_semas = [sync.so_image_available];
        let wait_stages = [vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT];
        let cbufs = [cbuf];
        let signal_semas = [sync.so_render_finished];
        let submit_info = vk::SubmitInfo::builder()
            .wait_semaphores(&wait_semas)
            .wait_dst_stage_mask(&wait_stages)
            .command_buffers(&cbufs)
            .signal_semaphores(&signal_semas)
            .build();

        unsafe {
            dev.dev
                .end_command_buffer(cbuf)
                .map_err(PresentError::COMMAND_BUFFER_FAILED)?;
            dev.dev
                .queue_submit(dev.graphics_queue, &[submit_info], sync.so_in_flight)
                .map_err(PresentError::SUBMIT_FAILED)?;
        }

        let swapchains = [state.ss_swapchain];
        let indices = [image_index];
        let present_info = vk::PresentInfoKHR::builder()
            .wait_semaphores(&signal_semas)
            .swapchains(&swapchains)
            .image_indices(&indices);
        let result = unsafe {
            self.sc_swapchain_loader
                .queue_present(dev.graphics_queue, &present_info)
        };
        state.ss_cursor.advance();

        match result {
            Ok(false) => Ok(PresentStatus::Presented),
            Ok(true) | Err(vk::Result::ERROR_OUT_OF_DATE_KHR) => {
                log::debug!("vkQueuePresentKHR: out of date, recreating swapchain");
                self.recreate_swapchain()?;
                Ok(PresentStatus::Recreated)
            }
            Err(e) => Err(PresentError::PRESENT_FAILED(e)),
        }
    }

    /// The command buffer being recorded between `start` and `present`
    pub fn current_command_buffer(&self) -> Option<vk::CommandBuffer> {
        if self.sc_current.is_none() {
            return None;
        }
        let state = self.sc_state.as_ref()?;
        Some(state.ss_frames[state.ss_cursor.frame_index()].fr_cbuf)
    }

    /// Current resolution, None while the window has no area
    pub fn extent(&self) -> Option<vk::Extent2D> {
        self.sc_state.as_ref().map(|s| s.ss_extent)
    }

    pub fn format(&self) -> Option<vk::SurfaceFormatKHR> {
        self.sc_state.as_ref().map(|s| s.ss_format)
    }

    pub fn image_count(&self) -> usize {
        self.sc_state.as_ref().map(|s| s.ss_images.len()).unwrap_or(0)
    }
}

impl Drop for VulkanSwapChain {
    fn drop(&mut self) {
        log::debug!("Destroying swapchain");
        if let Err(e) = self.sc_dev.wait_idle() {
            log::error!("Could not idle the device before teardown: {}", e);
        }
        if let Some(state) = self.sc_state.take() {
            self.destroy_state(state);
        }
        unsafe {
            self.sc_surface_loader
                .destroy_surface(self.sc_surface, None);
        }
    }
}
