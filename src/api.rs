// waffle/src/api.rs
//
//! Library initialization, teardown, and the entry points that need only the selected platform.

use crate::attrib_list::AttribList;
use crate::context::Context;
use crate::display::Display;
use crate::enums::{DlLibrary, Enum, Platform};
use crate::error::{self, Error, ErrorCode};
use crate::platform::{self, PlatformBackend};
use crate::window::Window;

use std::ffi::{CStr, CString};
use std::os::raw::c_void;
use std::sync::{Arc, Mutex, MutexGuard};

static PLATFORM: Mutex<Option<Arc<dyn PlatformBackend>>> = Mutex::new(None);

/// How to initialize the library.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InitAttributes {
    /// The platform every later call dispatches to.
    pub platform: Platform,
}

impl InitAttributes {
    #[inline]
    pub fn new(platform: Platform) -> InitAttributes {
        InitAttributes { platform }
    }

    /// Parses a `[WAFFLE_PLATFORM, value, NONE]` attribute list.
    pub fn from_attrib_list(attrib_list: &[i32]) -> Result<InitAttributes, Error> {
        let list = AttribList::new(attrib_list)?;
        list.check_keys(&[Enum::PLATFORM])?;
        match list.get(Enum::PLATFORM) {
            Some(value) => Ok(InitAttributes::new(Platform::try_from(value)?)),
            None => Err(Error::bad_attribute("required attribute WAFFLE_PLATFORM is missing")),
        }
    }
}

fn lock() -> MutexGuard<'static, Option<Arc<dyn PlatformBackend>>> {
    // The slot is only ever assigned whole, so a poisoned lock still holds a consistent value.
    PLATFORM.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn install<F>(platform: Platform, create: F) -> Result<(), Error>
where
    F: FnOnce(Platform) -> Result<Arc<dyn PlatformBackend>, Error>,
{
    let mut slot = lock();
    if let Some(ref current) = *slot {
        return Err(Error::new(ErrorCode::AlreadyInitialized,
                              format!("already initialized with {}", current.platform())));
    }
    let backend = create(platform)?;
    log::debug!("initialized with {}", platform);
    *slot = Some(backend);
    Ok(())
}

/// Selects the platform that every subsequent call dispatches to.
///
/// Fails with `AlreadyInitialized` if a platform is already selected, and with
/// `BuiltWithoutSupport` if the platform was not compiled into this build.
pub fn init(attributes: &InitAttributes) -> Result<(), Error> {
    error::track(|| install(attributes.platform, platform::create))
}

/// Like `init()`, taking a `[WAFFLE_PLATFORM, value, NONE]` attribute list.
pub fn init_from_attrib_list(attrib_list: &[i32]) -> Result<(), Error> {
    error::track(|| {
        if let Some(ref current) = *lock() {
            return Err(Error::new(ErrorCode::AlreadyInitialized,
                                  format!("already initialized with {}", current.platform())));
        }
        let attributes = InitAttributes::from_attrib_list(attrib_list)?;
        install(attributes.platform, platform::create)
    })
}

/// Installs a ready-made backend. Used by tests to run the dispatcher without native libraries.
#[cfg(test)]
pub(crate) fn init_with_backend(backend: Arc<dyn PlatformBackend>) -> Result<(), Error> {
    error::track(|| install(backend.platform(), move |_| Ok(backend)))
}

/// Releases the selected platform.
///
/// Objects created before teardown hold their own reference to the platform and stay usable
/// until they are dropped. The library may be initialized again afterwards.
pub fn teardown() -> Result<(), Error> {
    error::track(|| match lock().take() {
        Some(backend) => {
            log::debug!("tore down {}", backend.platform());
            Ok(())
        }
        None => Err(Error::new(ErrorCode::NotInitialized, "waffle is not initialized")),
    })
}

/// True between a successful `init()` and the following `teardown()`.
pub fn is_initialized() -> bool {
    lock().is_some()
}

/// The selected platform, if any.
pub fn current_platform() -> Option<Platform> {
    lock().as_ref().map(|backend| backend.platform())
}

pub(crate) fn platform_backend() -> Result<Arc<dyn PlatformBackend>, Error> {
    lock().clone()
          .ok_or_else(|| Error::new(ErrorCode::NotInitialized, "waffle is not initialized"))
}

fn c_name(name: &str) -> Result<CString, Error> {
    CString::new(name)
        .map_err(|_| Error::bad_parameter(format!("symbol name {:?} contains NUL", name)))
}

/// Looks up a GL or extension function with the platform's GetProcAddress.
///
/// The result may be null, and a non-null result does not imply that the current context
/// supports the function.
pub fn get_proc_address(name: &str) -> Result<*const c_void, Error> {
    error::track(|| get_proc_address_cstr(&c_name(name)?))
}

pub(crate) fn get_proc_address_cstr(name: &CStr) -> Result<*const c_void, Error> {
    Ok(platform_backend()?.get_proc_address(name))
}

/// True if the platform's client library for `library` can be opened.
pub fn dl_can_open(library: DlLibrary) -> Result<bool, Error> {
    error::track(|| Ok(platform_backend()?.dl_can_open(library)))
}

/// Looks up `name` in the platform's client library for `library`.
pub fn dl_sym(library: DlLibrary, name: &str) -> Result<*const c_void, Error> {
    error::track(|| dl_sym_cstr(library, &c_name(name)?))
}

pub(crate) fn dl_sym_cstr(library: DlLibrary, name: &CStr) -> Result<*const c_void, Error> {
    platform_backend()?.dl_sym(library, name)
}

/// Makes `context` current on this thread, rendering to `window`.
///
/// Passing `None` for both releases the thread's current context. The window and context must
/// have been created from `display`.
pub fn make_current(display: &Display,
                    window: Option<&Window>,
                    context: Option<&Context>)
                    -> Result<(), Error> {
    error::track(|| {
        if window.is_some() && context.is_none() {
            return Err(Error::bad_parameter("a window cannot be made current without a context"));
        }
        if let Some(window) = window {
            display.check_match(window.display_id(), "window")?;
        }
        if let Some(context) = context {
            display.check_match(context.display_id(), "context")?;
        }
        display.backend().make_current(window.map(Window::backend),
                                       context.map(Context::backend))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_attributes_require_a_platform() {
        let err = InitAttributes::from_attrib_list(&[0]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadAttribute);
        assert!(err.message().contains("WAFFLE_PLATFORM"));

        let err = InitAttributes::from_attrib_list(&[0x0010, 0x020b, 0]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadAttribute);

        let err = InitAttributes::from_attrib_list(&[0x0010, 0x0013, 0x0201, 8]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadAttribute);

        let attrs = InitAttributes::from_attrib_list(&[0x0010, 0x0019, 0]).unwrap();
        assert_eq!(attrs.platform, Platform::SurfacelessEgl);
    }

    #[test]
    fn symbol_names_must_not_contain_nul() {
        assert_eq!(c_name("glClear\0x").unwrap_err().code(), ErrorCode::BadParameter);
        assert_eq!(c_name("glClear").unwrap().as_bytes(), b"glClear");
    }
}
