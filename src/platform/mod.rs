// waffle/src/platform/mod.rs
//
//! Platform-specific backends and the dispatch table they implement.

use crate::config_attributes::ConfigAttributes;
use crate::enums::{ContextApi, DlLibrary, Platform};
use crate::error::{Error, ErrorCode};
use crate::native::{NativeConfig, NativeContext, NativeDisplay, NativeWindow};
use crate::window_attributes::WindowAttributes;

use euclid::default::Size2D;
use std::any::Any;
use std::ffi::CStr;
use std::os::raw::c_void;
use std::sync::Arc;

#[cfg(rwh)]
use rwh_06::RawWindowHandle;

pub(crate) mod generic;

#[cfg(android)]
pub(crate) mod android;

#[cfg(cgl)]
pub(crate) mod macos;

#[cfg(linux)]
pub(crate) mod unix;

#[cfg(test)]
pub(crate) mod mock;

/// A selected platform: the root of the dispatch table.
///
/// One of these is installed by `init()` and shared by every object created from it.
pub(crate) trait PlatformBackend: Send + Sync {
    fn platform(&self) -> Platform;

    /// Opens a connection to the native display. `name` is platform-specific.
    fn connect(&self, name: Option<&str>) -> Result<Box<dyn DisplayBackend>, Error>;

    /// May return null.
    fn get_proc_address(&self, name: &CStr) -> *const c_void;

    fn dl_can_open(&self, library: DlLibrary) -> bool;

    fn dl_sym(&self, library: DlLibrary, name: &CStr) -> Result<*const c_void, Error>;
}

pub(crate) trait DisplayBackend {
    fn as_any(&self) -> &dyn Any;

    fn supports_context_api(&self, api: ContextApi) -> bool;

    /// `attributes` has already been validated.
    fn choose_config(&self, attributes: &ConfigAttributes)
                     -> Result<Box<dyn ConfigBackend>, Error>;

    /// Binds `context` to `window` on this thread, or releases the current context if both are
    /// `None`. Both objects were created from this display.
    fn make_current(&self,
                    window: Option<&dyn WindowBackend>,
                    context: Option<&dyn ContextBackend>)
                    -> Result<(), Error>;

    fn native(&self) -> NativeDisplay;
}

pub(crate) trait ConfigBackend {
    fn as_any(&self) -> &dyn Any;

    /// `shared` was created from the same display.
    fn create_context(&self, shared: Option<&dyn ContextBackend>)
                      -> Result<Box<dyn ContextBackend>, Error>;

    /// `attributes` has already been validated.
    fn create_window(&self, attributes: &WindowAttributes)
                     -> Result<Box<dyn WindowBackend>, Error>;

    /// Wraps a window owned by the application.
    #[cfg(rwh)]
    fn wrap_window(&self, handle: RawWindowHandle) -> Result<Box<dyn WindowBackend>, Error> {
        drop(handle);
        Err(Error::unsupported("this platform cannot wrap application windows"))
    }

    fn native(&self) -> NativeConfig;
}

pub(crate) trait ContextBackend {
    fn as_any(&self) -> &dyn Any;

    fn api(&self) -> ContextApi;

    fn native(&self) -> NativeContext;

    /// Destroys the native context. Calling this more than once is harmless.
    fn destroy(&mut self) -> Result<(), Error>;
}

pub(crate) trait WindowBackend {
    fn as_any(&self) -> &dyn Any;

    fn show(&mut self) -> Result<(), Error>;

    fn swap_buffers(&mut self) -> Result<(), Error>;

    /// `size` has already been validated.
    fn resize(&mut self, size: Size2D<u32>) -> Result<(), Error>;

    fn size(&self) -> Size2D<u32>;

    fn native(&self) -> NativeWindow;

    /// Destroys the native window. Calling this more than once is harmless.
    fn destroy(&mut self) -> Result<(), Error>;
}

/// Recovers a backend's concrete type from a trait object handed back to it.
pub(crate) fn downcast<'a, T: 'static>(object: &'a dyn Any, what: &str) -> Result<&'a T, Error> {
    object.downcast_ref::<T>().ok_or_else(|| {
        Error::new(ErrorCode::BadDisplayMatch,
                   format!("the {} was created by a different platform", what))
    })
}

/// Constructs the backend for `platform`.
pub(crate) fn create(platform: Platform) -> Result<Arc<dyn PlatformBackend>, Error> {
    log::debug!("creating platform {}", platform);
    match platform {
        #[cfg(glx)]
        Platform::Glx => Ok(Arc::new(unix::glx::GlxPlatform::new()?)),
        #[cfg(x11_egl)]
        Platform::X11Egl => Ok(Arc::new(generic::egl::EglPlatform::new(
            unix::x11_egl::X11EglHooks::new()?,
        )?)),
        #[cfg(wayland)]
        Platform::Wayland => Ok(Arc::new(generic::egl::EglPlatform::new(
            unix::wayland::WaylandHooks::new()?,
        )?)),
        #[cfg(surfaceless_egl)]
        Platform::SurfacelessEgl => Ok(Arc::new(generic::egl::EglPlatform::new(
            unix::surfaceless::SurfacelessHooks,
        )?)),
        #[cfg(android)]
        Platform::Android => Ok(Arc::new(generic::egl::EglPlatform::new(
            android::AndroidHooks,
        )?)),
        #[cfg(cgl)]
        Platform::Cgl => Ok(Arc::new(macos::cgl::CglPlatform::new()?)),
        _ => Err(Error::new(ErrorCode::BuiltWithoutSupport,
                            format!("waffle was built without support for {}", platform))),
    }
}
