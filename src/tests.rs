// waffle/src/tests.rs
//
//! Tests of the dispatcher and object lifecycle, run against the in-memory backend.
//!
//! The selected platform is process-global, so every test here is serialized.

use crate::api::{self, InitAttributes};
use crate::error::{self, ErrorCode};
use crate::platform::mock::{MockCounters, MockPlatform, SCREEN_SIZE};
use crate::{Config, ConfigAttributes, Context, ContextApi, Display, DlLibrary, Platform};
use crate::{GLInfo, Window, WindowAttributes};

use euclid::default::Size2D;
use serial_test::serial;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread;

fn init_mock() -> Arc<MockCounters> {
    if api::is_initialized() {
        api::teardown().unwrap();
    }
    let platform = MockPlatform::new(Platform::SurfacelessEgl);
    let counters = platform.counters.clone();
    api::init_with_backend(Arc::new(platform)).unwrap();
    counters
}

fn teardown_if_initialized() {
    if api::is_initialized() {
        api::teardown().unwrap();
    }
}

#[test]
#[serial]
fn test_calls_before_init_fail() {
    teardown_if_initialized();

    let err = Display::connect(None).unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotInitialized);
    assert_eq!(error::get_code(), ErrorCode::NotInitialized);

    assert_eq!(api::get_proc_address("glClear").unwrap_err().code(),
               ErrorCode::NotInitialized);
    assert_eq!(api::dl_can_open(DlLibrary::OpenGl).unwrap_err().code(),
               ErrorCode::NotInitialized);
    assert_eq!(api::teardown().unwrap_err().code(), ErrorCode::NotInitialized);
    assert_eq!(api::current_platform(), None);
}

#[test]
#[serial]
fn test_init_twice_fails_until_teardown() {
    init_mock();
    assert_eq!(api::current_platform(), Some(Platform::SurfacelessEgl));

    let err = api::init_with_backend(Arc::new(MockPlatform::new(Platform::Glx))).unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyInitialized);
    let err = api::init(&InitAttributes::new(Platform::Glx)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyInitialized);
    assert_eq!(api::current_platform(), Some(Platform::SurfacelessEgl));

    api::teardown().unwrap();
    assert!(!api::is_initialized());

    api::init_with_backend(Arc::new(MockPlatform::new(Platform::Glx))).unwrap();
    assert_eq!(api::current_platform(), Some(Platform::Glx));
    api::teardown().unwrap();
}

#[test]
#[serial]
fn test_platforms_left_out_of_the_build_are_rejected() {
    teardown_if_initialized();

    for platform in [Platform::Nacl, Platform::Gbm, Platform::Wgl] {
        let err = api::init(&InitAttributes::new(platform)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::BuiltWithoutSupport);
        assert!(!api::is_initialized());
    }

    // WAFFLE_PLATFORM, WAFFLE_PLATFORM_NACL
    let err = api::init_from_attrib_list(&[0x0010, 0x0018, 0]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::BuiltWithoutSupport);
    assert_eq!(error::get_info().code, ErrorCode::BuiltWithoutSupport);
}

#[test]
#[serial]
fn test_full_lifecycle() {
    let counters = init_mock();

    let display = Display::connect(None).unwrap();
    assert_eq!(display.platform(), Platform::SurfacelessEgl);
    assert!(display.supports_context_api(ContextApi::OpenGl).unwrap());
    assert!(!display.supports_context_api(ContextApi::OpenGlEs1).unwrap());

    let attributes = ConfigAttributes::new(ContextApi::OpenGl).rgba_sizes(8, 8, 8, 8)
                                                                .depth_size(24);
    let config = Config::choose(&display, &attributes).unwrap();
    assert_eq!(config.display_id(), display.id());
    assert_eq!(config.attributes().depth_size, Some(24));

    let context = Context::create(&config, None).unwrap();
    assert_eq!(context.api(), ContextApi::OpenGl);
    let mut window = Window::create(&config, 320, 240).unwrap();
    assert_eq!(window.size(), Size2D::new(320, 240));

    window.show().unwrap();
    crate::make_current(&display, Some(&window), Some(&context)).unwrap();
    window.swap_buffers().unwrap();
    window.swap_buffers().unwrap();
    assert_eq!(counters.swaps.load(Ordering::SeqCst), 2);

    window.resize(640, 480).unwrap();
    assert_eq!(window.size(), Size2D::new(640, 480));

    crate::make_current(&display, None, None).unwrap();
    window.destroy().unwrap();
    context.destroy().unwrap();
    config.destroy();
    display.disconnect();

    assert_eq!(counters.windows_destroyed.load(Ordering::SeqCst), 1);
    assert_eq!(counters.contexts_destroyed.load(Ordering::SeqCst), 1);
    assert_eq!(error::get_code(), ErrorCode::NoError);
    api::teardown().unwrap();
}

#[test]
#[serial]
fn test_fullscreen_windows_take_the_screen_size() {
    init_mock();
    let display = Display::connect(None).unwrap();
    let config = Config::choose(&display, &ConfigAttributes::new(ContextApi::OpenGlEs2)).unwrap();

    let window = Window::create_with_attributes(&config, &WindowAttributes::fullscreen()).unwrap();
    assert_eq!(window.size(), SCREEN_SIZE);

    // WAFFLE_WINDOW_FULLSCREEN, true
    let window = Window::create_from_attrib_list(&config, &[0x0312, 1, 0]).unwrap();
    assert_eq!(window.size(), SCREEN_SIZE);
    api::teardown().unwrap();
}

#[test]
#[serial]
fn test_objects_from_different_displays_do_not_mix() {
    init_mock();
    let first = Display::connect(None).unwrap();
    let second = Display::connect(None).unwrap();
    assert_ne!(first.id(), second.id());

    let attributes = ConfigAttributes::new(ContextApi::OpenGl);
    let first_config = Config::choose(&first, &attributes).unwrap();
    let second_config = Config::choose(&second, &attributes).unwrap();
    let first_context = Context::create(&first_config, None).unwrap();
    let second_window = Window::create(&second_config, 64, 64).unwrap();

    let err = crate::make_current(&first, Some(&second_window), Some(&first_context)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::BadDisplayMatch);
    let err = crate::make_current(&second, None, Some(&first_context)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::BadDisplayMatch);

    let err = Context::create(&second_config, Some(&first_context)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::BadDisplayMatch);
    assert_eq!(error::get_code(), ErrorCode::BadDisplayMatch);

    let shared = Context::create(&first_config, Some(&first_context)).unwrap();
    assert_eq!(shared.display_id(), first.id());
    api::teardown().unwrap();
}

#[test]
#[serial]
fn test_window_without_context_is_rejected() {
    init_mock();
    let display = Display::connect(None).unwrap();
    let config = Config::choose(&display, &ConfigAttributes::new(ContextApi::OpenGl)).unwrap();
    let window = Window::create(&config, 64, 64).unwrap();

    let err = crate::make_current(&display, Some(&window), None).unwrap_err();
    assert_eq!(err.code(), ErrorCode::BadParameter);
    api::teardown().unwrap();
}

#[test]
#[serial]
fn test_unsupported_api_is_reported_by_choose() {
    init_mock();
    let display = Display::connect(None).unwrap();

    let err = Config::choose(&display, &ConfigAttributes::new(ContextApi::OpenGlEs1)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::UnsupportedOnPlatform);

    let err = api::dl_sym(DlLibrary::OpenGlEs1, "glClear").unwrap_err();
    assert_eq!(err.code(), ErrorCode::UnsupportedOnPlatform);
    assert!(!api::dl_can_open(DlLibrary::OpenGlEs1).unwrap());
    assert!(!api::dl_sym(DlLibrary::OpenGl, "glGetString").unwrap().is_null());
    assert_eq!(api::dl_sym(DlLibrary::OpenGl, "glFoo").unwrap_err().code(), ErrorCode::Unknown);
    assert!(api::get_proc_address("eglFoo").unwrap().is_null());

    let err = Display::connect(Some("unreachable")).unwrap_err();
    assert_eq!(err.code(), ErrorCode::Unknown);
    api::teardown().unwrap();
}

#[test]
#[serial]
fn test_error_record_is_per_thread_and_reset_by_success() {
    init_mock();

    assert!(Display::connect(Some("unreachable")).is_err());
    assert_eq!(error::get_code(), ErrorCode::Unknown);
    assert!(error::get_info().message.contains("unreachable"));

    let other = thread::spawn(|| error::get_code()).join().unwrap();
    assert_eq!(other, ErrorCode::NoError);
    assert_eq!(error::get_code(), ErrorCode::Unknown);

    let display = Display::connect(None).unwrap();
    assert_eq!(error::get_info(),
               error::ErrorInfo { code: ErrorCode::NoError, message: String::new() });
    drop(display);
    api::teardown().unwrap();
}

#[test]
#[serial]
fn test_objects_outlive_teardown() {
    let counters = init_mock();
    let display = Display::connect(None).unwrap();
    let config = Config::choose(&display, &ConfigAttributes::new(ContextApi::OpenGl)).unwrap();
    let context = Context::create(&config, None).unwrap();
    let mut window = Window::create(&config, 32, 32).unwrap();

    api::teardown().unwrap();
    assert!(!api::is_initialized());

    window.swap_buffers().unwrap();
    crate::make_current(&display, Some(&window), Some(&context)).unwrap();
    drop(window);
    drop(context);
    assert_eq!(counters.windows_destroyed.load(Ordering::SeqCst), 1);
    assert_eq!(counters.contexts_destroyed.load(Ordering::SeqCst), 1);
}

#[test]
#[serial]
fn test_dropping_destroys_exactly_once() {
    let counters = init_mock();
    let display = Display::connect(None).unwrap();
    let config = Config::choose(&display, &ConfigAttributes::new(ContextApi::OpenGl)).unwrap();

    let context = Context::create(&config, None).unwrap();
    drop(context);
    let context = Context::create(&config, None).unwrap();
    context.destroy().unwrap();

    assert_eq!(counters.contexts_destroyed.load(Ordering::SeqCst), 2);
    api::teardown().unwrap();
}

#[test]
#[serial]
fn test_zero_sized_windows_are_rejected() {
    let counters = init_mock();
    let display = Display::connect(None).unwrap();
    let config = Config::choose(&display, &ConfigAttributes::new(ContextApi::OpenGl)).unwrap();

    let err = Window::create(&config, 0, 240).unwrap_err();
    assert_eq!(err.code(), ErrorCode::BadParameter);
    assert_eq!(error::get_code(), ErrorCode::BadParameter);
    let err = Window::create_with_attributes(&config, &WindowAttributes::windowed(320, 0))
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::BadParameter);

    // WAFFLE_WINDOW_WIDTH, 0, WAFFLE_WINDOW_HEIGHT, 240
    let err = Window::create_from_attrib_list(&config, &[0x0310, 0, 0x0311, 240, 0]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::BadAttribute);
    let err = Window::create_from_attrib_list(&config, &[0x0310, -5, 0x0311, 240, 0]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::BadAttribute);

    let mut window = Window::create(&config, 320, 240).unwrap();
    let err = window.resize(0, 240).unwrap_err();
    assert_eq!(err.code(), ErrorCode::BadParameter);
    assert_eq!(window.size(), Size2D::new(320, 240));

    drop(window);
    assert_eq!(counters.windows_destroyed.load(Ordering::SeqCst), 1);
    api::teardown().unwrap();
}

#[cfg(rwh)]
#[test]
#[serial]
fn test_wrapping_windows_is_unsupported_by_default() {
    use rwh_06::{RawWindowHandle, XlibWindowHandle};

    init_mock();
    let display = Display::connect(None).unwrap();
    let config = Config::choose(&display, &ConfigAttributes::new(ContextApi::OpenGl)).unwrap();

    let handle = RawWindowHandle::Xlib(XlibWindowHandle::new(1));
    let err = Window::from_raw_window_handle(&config, handle).unwrap_err();
    assert_eq!(err.code(), ErrorCode::UnsupportedOnPlatform);
    assert_eq!(error::get_code(), ErrorCode::UnsupportedOnPlatform);
    api::teardown().unwrap();
}

#[test]
#[serial]
fn test_init_from_attrib_list_checks_initialization_first() {
    init_mock();

    // A malformed list still reports that a platform is already selected.
    let err = api::init_from_attrib_list(&[0x0201, 8]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyInitialized);
    // WAFFLE_PLATFORM, WAFFLE_PLATFORM_GLX
    let err = api::init_from_attrib_list(&[0x0010, 0x0013, 0]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyInitialized);
    assert_eq!(api::current_platform(), Some(Platform::SurfacelessEgl));
    api::teardown().unwrap();
}

#[test]
#[serial]
fn test_symbol_names_with_nul_are_recorded_as_errors() {
    init_mock();

    let err = api::get_proc_address("glGet\0String").unwrap_err();
    assert_eq!(err.code(), ErrorCode::BadParameter);
    assert_eq!(error::get_code(), ErrorCode::BadParameter);

    assert!(!api::get_proc_address("glGetString").unwrap().is_null());
    assert_eq!(error::get_code(), ErrorCode::NoError);

    let err = api::dl_sym(DlLibrary::OpenGl, "gl\0Clear").unwrap_err();
    assert_eq!(err.code(), ErrorCode::BadParameter);
    assert!(error::get_info().message.contains("NUL"));
    api::teardown().unwrap();
}

#[test]
#[serial]
fn test_gl_info_fails_without_gl() {
    teardown_if_initialized();
    let err = GLInfo::query(ContextApi::OpenGl).unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotInitialized);

    api::init_with_backend(Arc::new(MockPlatform::without_gl(Platform::Glx))).unwrap();
    let err = GLInfo::query(ContextApi::OpenGl).unwrap_err();
    assert_eq!(err.code(), ErrorCode::Unknown);
    assert!(err.message().contains("glGetString"));
    assert_eq!(error::get_code(), ErrorCode::Unknown);
    api::teardown().unwrap();

    // glGetString resolves, but no context is current so it returns null.
    init_mock();
    let err = GLInfo::query(ContextApi::OpenGlEs2).unwrap_err();
    assert_eq!(err.code(), ErrorCode::Unknown);
    assert!(err.message().contains("context current"));
    api::teardown().unwrap();
}
