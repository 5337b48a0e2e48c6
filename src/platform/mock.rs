// waffle/src/platform/mock.rs
//
//! An in-memory backend for exercising the dispatcher without native libraries.

use super::{ConfigBackend, ContextBackend, DisplayBackend, PlatformBackend, WindowBackend};
use super::downcast;
use crate::config_attributes::ConfigAttributes;
use crate::enums::{ContextApi, DlLibrary, Platform};
use crate::error::Error;
use crate::native::{NativeConfig, NativeContext, NativeDisplay, NativeWindow};
use crate::window_attributes::WindowAttributes;

use euclid::default::Size2D;
use std::any::Any;
use std::ffi::CStr;
use std::os::raw::c_void;
use std::ptr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub(crate) const SCREEN_SIZE: Size2D<u32> = Size2D::new(1920, 1080);

type GetStringFn = unsafe extern "system" fn(u32) -> *const u8;

// Stands in for glGetString with no context current.
unsafe extern "system" fn get_string(_: u32) -> *const u8 {
    ptr::null()
}

/// Counts native objects so tests can check that each is destroyed exactly once.
#[derive(Default)]
pub(crate) struct MockCounters {
    pub(crate) contexts_destroyed: AtomicUsize,
    pub(crate) windows_destroyed: AtomicUsize,
    pub(crate) swaps: AtomicUsize,
}

pub(crate) struct MockPlatform {
    platform: Platform,
    apis: Vec<ContextApi>,
    resolves_gl: bool,
    pub(crate) counters: Arc<MockCounters>,
}

impl MockPlatform {
    /// A platform supporting desktop GL and GLES2. Of the GL entry points only `glGetString`
    /// resolves.
    pub(crate) fn new(platform: Platform) -> MockPlatform {
        MockPlatform {
            platform,
            apis: vec![ContextApi::OpenGl, ContextApi::OpenGlEs2],
            resolves_gl: true,
            counters: Arc::new(MockCounters::default()),
        }
    }

    /// Like `new()`, but no symbol resolves.
    pub(crate) fn without_gl(platform: Platform) -> MockPlatform {
        MockPlatform { resolves_gl: false, ..MockPlatform::new(platform) }
    }
}

impl PlatformBackend for MockPlatform {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn connect(&self, name: Option<&str>) -> Result<Box<dyn DisplayBackend>, Error> {
        if name == Some("unreachable") {
            return Err(Error::unknown("failed to connect to \"unreachable\""));
        }
        Ok(Box::new(MockDisplay {
            apis: self.apis.clone(),
            counters: self.counters.clone(),
        }))
    }

    fn get_proc_address(&self, name: &CStr) -> *const c_void {
        if self.resolves_gl && name.to_bytes() == b"glGetString" {
            get_string as GetStringFn as *const c_void
        } else {
            ptr::null()
        }
    }

    fn dl_can_open(&self, library: DlLibrary) -> bool {
        matches!(library, DlLibrary::OpenGl | DlLibrary::OpenGlEs2)
    }

    fn dl_sym(&self, library: DlLibrary, name: &CStr) -> Result<*const c_void, Error> {
        if !self.dl_can_open(library) {
            return Err(Error::unsupported(format!("{} is not supported on this platform",
                                                  library)));
        }
        let symbol = self.get_proc_address(name);
        if symbol.is_null() {
            return Err(Error::unknown(format!("dlsym(\"{}\") failed", name.to_string_lossy())));
        }
        Ok(symbol)
    }
}

struct MockDisplay {
    apis: Vec<ContextApi>,
    counters: Arc<MockCounters>,
}

impl DisplayBackend for MockDisplay {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn supports_context_api(&self, api: ContextApi) -> bool {
        self.apis.contains(&api)
    }

    fn choose_config(&self, attributes: &ConfigAttributes)
                     -> Result<Box<dyn ConfigBackend>, Error> {
        if attributes.samples > 16 {
            return Err(Error::unknown("no configuration has that many samples"));
        }
        Ok(Box::new(MockConfig {
            attributes: attributes.clone(),
            counters: self.counters.clone(),
        }))
    }

    fn make_current(&self,
                    window: Option<&dyn WindowBackend>,
                    context: Option<&dyn ContextBackend>)
                    -> Result<(), Error> {
        if let Some(window) = window {
            downcast::<MockWindow>(window.as_any(), "window")?;
        }
        if let Some(context) = context {
            if downcast::<MockContext>(context.as_any(), "context")?.destroyed {
                return Err(Error::bad_parameter("the context was destroyed"));
            }
        }
        Ok(())
    }

    fn native(&self) -> NativeDisplay {
        NativeDisplay::SurfacelessEgl { egl_display: ptr::null() }
    }
}

struct MockConfig {
    attributes: ConfigAttributes,
    counters: Arc<MockCounters>,
}

impl ConfigBackend for MockConfig {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn create_context(&self, shared: Option<&dyn ContextBackend>)
                      -> Result<Box<dyn ContextBackend>, Error> {
        if let Some(shared) = shared {
            downcast::<MockContext>(shared.as_any(), "context")?;
        }
        Ok(Box::new(MockContext {
            api: self.attributes.context_api,
            destroyed: false,
            counters: self.counters.clone(),
        }))
    }

    fn create_window(&self, attributes: &WindowAttributes)
                     -> Result<Box<dyn WindowBackend>, Error> {
        let size = if attributes.fullscreen { SCREEN_SIZE } else { attributes.size };
        Ok(Box::new(MockWindow {
            size,
            destroyed: false,
            counters: self.counters.clone(),
        }))
    }

    fn native(&self) -> NativeConfig {
        NativeConfig::Egl { egl_display: ptr::null(), egl_config: ptr::null() }
    }
}

struct MockContext {
    api: ContextApi,
    destroyed: bool,
    counters: Arc<MockCounters>,
}

impl ContextBackend for MockContext {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn api(&self) -> ContextApi {
        self.api
    }

    fn native(&self) -> NativeContext {
        NativeContext::Egl { egl_display: ptr::null(), egl_context: ptr::null() }
    }

    fn destroy(&mut self) -> Result<(), Error> {
        if !self.destroyed {
            self.destroyed = true;
            self.counters.contexts_destroyed.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

struct MockWindow {
    size: Size2D<u32>,
    destroyed: bool,
    counters: Arc<MockCounters>,
}

impl WindowBackend for MockWindow {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn show(&mut self) -> Result<(), Error> {
        Ok(())
    }

    fn swap_buffers(&mut self) -> Result<(), Error> {
        self.counters.swaps.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn resize(&mut self, size: Size2D<u32>) -> Result<(), Error> {
        self.size = size;
        Ok(())
    }

    fn size(&self) -> Size2D<u32> {
        self.size
    }

    fn native(&self) -> NativeWindow {
        NativeWindow::SurfacelessEgl { egl_surface: ptr::null() }
    }

    fn destroy(&mut self) -> Result<(), Error> {
        if !self.destroyed {
            self.destroyed = true;
            self.counters.windows_destroyed.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}
