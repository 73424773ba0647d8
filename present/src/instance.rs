// Vulkan instance
//
// This holds the loader, the instance and the optional validation
// messenger shared by every Device.

use ash::extensions::{ext, khr};
use ash::{vk, Entry};

use crate::{CreateInfo, PresentError, Result};
use utils::log;

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_void};

const VALIDATION_LAYER: &[u8] = b"VK_LAYER_KHRONOS_validation\0";

// Route validation output into our log by severity
unsafe extern "system" fn vulkan_debug_callback(
    message_severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    message_types: vk::DebugUtilsMessageTypeFlagsEXT,
    p_callback_data: *const vk::DebugUtilsMessengerCallbackDataEXT,
    _p_user_data: *mut c_void,
) -> vk::Bool32 {
    let message = match p_callback_data.as_ref() {
        Some(data) if !data.p_message.is_null() => CStr::from_ptr(data.p_message).to_string_lossy(),
        _ => return vk::FALSE,
    };

    if message_severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::ERROR) {
        log::error!("[VK][{:?}] {}", message_types, message);
    } else if message_severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::WARNING) {
        log::warn!("[VK][{:?}] {}", message_types, message);
    } else {
        log::debug!("[VK][{:?}] {}", message_types, message);
    }
    vk::FALSE
}

/// A Vulkan Instance
///
/// This holds our basic vulkan session data. Devices are created from it
/// and keep it alive through an `Arc`.
pub struct Instance {
    /// validation messenger, None when validation is off
    debug: Option<(ext::DebugUtils, vk::DebugUtilsMessengerEXT)>,

    /// function pointers loaded from the Vulkan library
    pub(crate) loader: Entry,
    pub(crate) inst: ash::Instance,
}

impl Instance {
    /// Register vulkan_debug_callback with a new messenger
    fn setup_debug(
        entry: &Entry,
        instance: &ash::Instance,
    ) -> Option<(ext::DebugUtils, vk::DebugUtilsMessengerEXT)> {
        let debug_info = vk::DebugUtilsMessengerCreateInfoEXT::builder()
            .message_severity(
                vk::DebugUtilsMessageSeverityFlagsEXT::ERROR
                    | vk::DebugUtilsMessageSeverityFlagsEXT::WARNING
                    | vk::DebugUtilsMessageSeverityFlagsEXT::INFO,
            )
            .message_type(
                vk::DebugUtilsMessageTypeFlagsEXT::GENERAL
                    | vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE
                    | vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION,
            )
            .pfn_user_callback(Some(vulkan_debug_callback));

        let dr_loader = ext::DebugUtils::new(entry, instance);
        match unsafe { dr_loader.create_debug_utils_messenger(&debug_info, None) } {
            Ok(callback) => Some((dr_loader, callback)),
            Err(e) => {
                // Validation output is a nicety, keep going without it
                log::error!("Could not create the Vulkan debug messenger: {:?}", e);
                None
            }
        }
    }

    /// Is the validation layer installed on this system
    fn validation_available(entry: &Entry) -> bool {
        let layers = match entry.enumerate_instance_layer_properties() {
            Ok(layers) => layers,
            Err(_) => return false,
        };
        let wanted = unsafe { CStr::from_bytes_with_nul_unchecked(VALIDATION_LAYER) };

        layers
            .iter()
            .any(|l| unsafe { CStr::from_ptr(l.layer_name.as_ptr()) } == wanted)
    }

    /// Create a vkInstance
    ///
    /// The Vulkan library is opened at runtime so that a missing driver is
    /// reported as an error instead of failing to launch.
    pub fn new(info: &CreateInfo) -> Result<Self> {
        let entry = unsafe { Entry::load() }.map_err(|e| {
            log::error!("Could not load the Vulkan loader: {}", e);
            PresentError::VK_LOADER_UNAVAILABLE
        })?;
        // Interior nul bytes can't be expressed, drop them
        let app_name = CString::new(info.application_name.replace('\0', ""))
            .unwrap_or_else(|_| CString::default());

        let enable_validation = info.enable_validation && Self::validation_available(&entry);
        if info.enable_validation && !enable_validation {
            log::warn!("Validation requested but VK_LAYER_KHRONOS_validation is not installed");
        }

        let mut layer_names_raw: Vec<*const c_char> = Vec::new();
        if enable_validation {
            layer_names_raw.push(VALIDATION_LAYER.as_ptr() as *const c_char);
        }

        let mut extension_names_raw: Vec<*const c_char> = vec![khr::Surface::name().as_ptr()];
        for ext in info.surface_extensions.iter() {
            extension_names_raw.push(ext.as_ptr());
        }
        if enable_validation {
            extension_names_raw.push(ext::DebugUtils::name().as_ptr());
        }

        let appinfo = vk::ApplicationInfo::builder()
            .application_name(&app_name)
            .application_version(0)
            .engine_name(&app_name)
            .engine_version(0)
            .api_version(vk::API_VERSION_1_3);

        let create_info = vk::InstanceCreateInfo::builder()
            .application_info(&appinfo)
            .enabled_layer_names(&layer_names_raw)
            .enabled_extension_names(&extension_names_raw);

        let instance: ash::Instance = unsafe {
            entry
                .create_instance(&create_info, None)
                .map_err(PresentError::COULD_NOT_CREATE_INSTANCE)?
        };
        log::debug!(
            "Created Vulkan instance (validation: {}, extensions: {})",
            enable_validation,
            extension_names_raw.len()
        );

        let debug = match enable_validation {
            true => Self::setup_debug(&entry, &instance),
            false => None,
        };

        Ok(Self {
            debug: debug,
            loader: entry,
            inst: instance,
        })
    }
}

impl Drop for Instance {
    fn drop(&mut self) {
        unsafe {
            if let Some((loader, callback)) = self.debug.take() {
                loader.destroy_debug_utils_messenger(callback, None);
            }
            self.inst.destroy_instance(None);
        }
    }
}
