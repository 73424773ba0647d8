use super::*;
use ash::vk;

fn surface_format(format: vk::Format, color_space: vk::ColorSpaceKHR) -> vk::SurfaceFormatKHR {
    vk::SurfaceFormatKHR {
        format: format,
        color_space: color_space,
    }
}

#[test]
fn format_prefers_srgb_bgra_anywhere_in_list() {
    let formats = [
        surface_format(vk::Format::R8G8B8A8_UNORM, vk::ColorSpaceKHR::SRGB_NONLINEAR),
        surface_format(
            vk::Format::B8G8R8A8_SRGB,
            vk::ColorSpaceKHR::EXTENDED_SRGB_LINEAR_EXT,
        ),
        surface_format(vk::Format::B8G8R8A8_SRGB, vk::ColorSpaceKHR::SRGB_NONLINEAR),
    ];

    let chosen = choose_swapchain_format(&formats).unwrap();
    assert_eq!(chosen.format, vk::Format::B8G8R8A8_SRGB);
    assert_eq!(chosen.color_space, vk::ColorSpaceKHR::SRGB_NONLINEAR);
}

#[test]
fn format_falls_back_to_first_entry() {
    let formats = [
        surface_format(vk::Format::A2B10G10R10_UNORM_PACK32, vk::ColorSpaceKHR::HDR10_ST2084_EXT),
        surface_format(vk::Format::B8G8R8A8_UNORM, vk::ColorSpaceKHR::SRGB_NONLINEAR),
    ];

    let chosen = choose_swapchain_format(&formats).unwrap();
    assert_eq!(chosen.format, vk::Format::A2B10G10R10_UNORM_PACK32);
    assert_eq!(chosen.color_space, vk::ColorSpaceKHR::HDR10_ST2084_EXT);

    assert!(choose_swapchain_format(&[]).is_none());
}

#[test]
fn present_mode_mailbox_else_fifo() {
    assert_eq!(
        choose_present_mode(&[
            vk::PresentModeKHR::FIFO,
            vk::PresentModeKHR::IMMEDIATE,
            vk::PresentModeKHR::MAILBOX,
        ]),
        vk::PresentModeKHR::MAILBOX
    );
    // FIFO is returned even when the list doesn't mention it
    assert_eq!(
        choose_present_mode(&[vk::PresentModeKHR::IMMEDIATE]),
        vk::PresentModeKHR::FIFO
    );
    assert_eq!(choose_present_mode(&[]), vk::PresentModeKHR::FIFO);
}

#[test]
fn image_count_is_clamped() {
    let mut caps = vk::SurfaceCapabilitiesKHR {
        min_image_count: 2,
        max_image_count: 8,
        ..Default::default()
    };
    assert_eq!(choose_image_count(&caps), DESIRED_IMAGE_COUNT);

    caps.max_image_count = 2;
    assert_eq!(choose_image_count(&caps), 2);

    caps.min_image_count = 4;
    caps.max_image_count = 0;
    assert_eq!(choose_image_count(&caps), 4);
}

#[test]
fn extent_follows_surface_unless_undefined() {
    let mut caps = vk::SurfaceCapabilitiesKHR {
        current_extent: vk::Extent2D {
            width: 800,
            height: 600,
        },
        min_image_extent: vk::Extent2D {
            width: 1,
            height: 1,
        },
        max_image_extent: vk::Extent2D {
            width: 4096,
            height: 2048,
        },
        ..Default::default()
    };
    let drawable = Some(vk::Extent2D {
        width: 5000,
        height: 300,
    });

    let e = choose_extent(&caps, drawable);
    assert_eq!((e.width, e.height), (800, 600));

    caps.current_extent.width = u32::MAX;
    let e = choose_extent(&caps, drawable);
    assert_eq!((e.width, e.height), (4096, 300));

    let e = choose_extent(&caps, None);
    assert_eq!((e.width, e.height), (1, 1));
}

#[test]
fn cursor_indices_wrap_independently() {
    let mut cursor = FrameCursor::new(2);
    let mut seen = Vec::new();
    for _ in 0..6 {
        seen.push((cursor.semaphore_index(), cursor.frame_index()));
        cursor.advance();
    }

    assert_eq!(
        seen,
        vec![(0, 0), (1, 1), (0, 2), (1, 0), (0, 1), (1, 2)]
    );
    // both wrapped back to the start after lcm(2, 3) frames
    assert_eq!((cursor.semaphore_index(), cursor.frame_index()), (0, 0));
}

#[test]
fn cursor_with_more_images_than_frames() {
    let mut cursor = FrameCursor::new(4);
    for _ in 0..MAX_FRAMES_IN_FLIGHT {
        cursor.advance();
    }
    assert_eq!(cursor.frame_index(), 0);
    assert_eq!(cursor.semaphore_index(), 3);
    assert_eq!(cursor.image_count(), 4);
}

#[test]
#[should_panic]
fn cursor_rejects_empty_swapchain() {
    FrameCursor::new(0);
}

#[test]
fn create_info_builder() {
    let info = CreateInfo::builder()
        .application_name("Demo")
        .enable_validation(false)
        .surface_extensions(&[])
        .build();

    assert_eq!(info.application_name, "Demo");
    assert!(!info.enable_validation);
    assert!(info.surface_extensions.is_empty());

    let info = CreateInfo::builder().build();
    assert_eq!(info.surface_extensions.len(), 1);
}
