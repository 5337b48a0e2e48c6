// waffle/src/platform/generic/egl/mod.rs
//
//! Functionality common to EGL-based backends.
//!
//! The platform-specific parts (how to reach the native display, and how to make native windows)
//! are supplied through `EglHooks`, `EglConnection` and `EglNativeWindow`.

pub(crate) mod config;
pub(crate) mod context;
pub(crate) mod display;
pub(crate) mod error;
pub(crate) mod ffi;
pub(crate) mod library;
pub(crate) mod window;

use self::display::EglDisplay;
use self::library::EglLibrary;
use crate::dl::ClientLibraries;
use crate::egl::types::{EGLDisplay, EGLNativeWindowType, EGLSurface, EGLenum, EGLint};
use crate::enums::{DlLibrary, Platform};
use crate::error::Error;
use crate::native::{NativeDisplay, NativeWindow};
use crate::platform::{DisplayBackend, PlatformBackend};
use crate::window_attributes::WindowAttributes;

use euclid::default::Size2D;
use std::ffi::CStr;
use std::os::raw::c_void;
use std::sync::Arc;

#[cfg(rwh)]
use rwh_06::RawWindowHandle;

/// What distinguishes one EGL platform from another.
pub(crate) trait EglHooks: Send + Sync + 'static {
    fn platform(&self) -> Platform;

    /// The `EGL_PLATFORM_*` value for `eglGetPlatformDisplay`, or `None` to use `eglGetDisplay`.
    fn egl_platform(&self) -> Option<EGLenum>;

    fn client_libraries(&self) -> ClientLibraries;

    fn supports_desktop_gl(&self) -> bool {
        true
    }

    fn connect(&self, name: Option<&str>) -> Result<Box<dyn EglConnection>, Error>;
}

/// The native display connection behind an EGL display.
pub(crate) trait EglConnection {
    /// Passed to `eglGetPlatformDisplay` or `eglGetDisplay`.
    fn native_display(&self) -> *mut c_void;

    fn native(&self, egl_display: EGLDisplay) -> NativeDisplay;

    /// `EGL_SURFACE_TYPE` bits that chosen configs must have.
    fn surface_type(&self) -> EGLint {
        crate::egl::WINDOW_BIT as EGLint
    }

    /// `visual_id` is the config's `EGL_NATIVE_VISUAL_ID`.
    fn create_window(&self, visual_id: EGLint, attributes: &WindowAttributes)
                     -> Result<Box<dyn EglNativeWindow>, Error>;

    #[cfg(rwh)]
    fn wrap_window(&self, handle: RawWindowHandle) -> Result<Box<dyn EglNativeWindow>, Error> {
        drop(handle);
        Err(Error::unsupported("this platform cannot wrap application windows"))
    }
}

/// The native half of an EGL window.
pub(crate) trait EglNativeWindow {
    /// Passed to `eglCreateWindowSurface`. `None` creates a pbuffer instead.
    fn egl_window(&self) -> Option<EGLNativeWindowType>;

    fn show(&mut self) -> Result<(), Error>;

    fn resize(&mut self, size: Size2D<u32>) -> Result<(), Error>;

    fn size(&self) -> Size2D<u32>;

    /// Runs before `eglSwapBuffers`.
    fn prepare_swap(&mut self) -> Result<(), Error> {
        Ok(())
    }

    fn native(&self, egl_surface: EGLSurface) -> NativeWindow;
}

/// A platform backed by EGL.
pub(crate) struct EglPlatform<H> {
    hooks: H,
    library: Arc<EglLibrary>,
}

impl<H> EglPlatform<H> where H: EglHooks {
    pub(crate) fn new(hooks: H) -> Result<EglPlatform<H>, Error> {
        let library = Arc::new(EglLibrary::open(hooks.client_libraries())?);
        Ok(EglPlatform { hooks, library })
    }
}

impl<H> PlatformBackend for EglPlatform<H> where H: EglHooks {
    #[inline]
    fn platform(&self) -> Platform {
        self.hooks.platform()
    }

    fn connect(&self, name: Option<&str>) -> Result<Box<dyn DisplayBackend>, Error> {
        let connection = self.hooks.connect(name)?;
        let display = EglDisplay::new(self.library.clone(),
                                      connection,
                                      self.hooks.egl_platform(),
                                      self.hooks.supports_desktop_gl())?;
        Ok(Box::new(display))
    }

    fn get_proc_address(&self, name: &CStr) -> *const c_void {
        self.library.get_proc_address(name)
    }

    fn dl_can_open(&self, library: DlLibrary) -> bool {
        self.library.client_libraries.can_open(library)
    }

    fn dl_sym(&self, library: DlLibrary, name: &CStr) -> Result<*const c_void, Error> {
        self.library.client_libraries.sym(library, name)
    }
}
