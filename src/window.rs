// waffle/src/window.rs
//
//! Native windows that contexts render into.

use crate::config::Config;
use crate::display::DisplayId;
use crate::error::{self, Error};
use crate::native::{NativeDisplay, NativeWindow};
use crate::platform::WindowBackend;
use crate::window_attributes::{self, WindowAttributes};

use euclid::default::Size2D;
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;

#[cfg(rwh)]
use rwh_06::{DisplayHandle, HandleError, HasDisplayHandle, HasWindowHandle, RawWindowHandle,
             WindowHandle};

/// A window, or on surfaceless platforms an offscreen surface, that can be rendered to.
///
/// Windows start hidden; call `show()` to map them.
pub struct Window {
    display_id: DisplayId,
    #[cfg_attr(not(rwh), allow(dead_code))]
    display_native: NativeDisplay,
    backend: Box<dyn WindowBackend>,
    phantom: PhantomData<*mut ()>,
}

impl Window {
    /// Creates a window of the given size, compatible with `config`.
    pub fn create(config: &Config, width: u32, height: u32) -> Result<Window, Error> {
        error::track(|| {
            window_attributes::check_size(width, height)?;
            Window::create_validated(config, &WindowAttributes::windowed(width, height))
        })
    }

    pub fn create_with_attributes(config: &Config, attributes: &WindowAttributes)
                                  -> Result<Window, Error> {
        error::track(|| {
            attributes.validate()?;
            Window::create_validated(config, attributes)
        })
    }

    /// Like `create_with_attributes()`, taking a `[key, value, ..., NONE]` attribute list.
    pub fn create_from_attrib_list(config: &Config, attrib_list: &[i32])
                                   -> Result<Window, Error> {
        error::track(|| {
            let attributes = WindowAttributes::from_attrib_list(attrib_list)?;
            Window::create_validated(config, &attributes)
        })
    }

    fn create_validated(config: &Config, attributes: &WindowAttributes) -> Result<Window, Error> {
        let backend = config.backend().create_window(attributes)?;
        log::debug!("created {}x{} window on {:?}",
                    backend.size().width,
                    backend.size().height,
                    config.display_id());
        Ok(Window::from_backend(config, backend))
    }

    /// Wraps a native window owned by the application.
    ///
    /// Needed on platforms whose windows are created by the system, such as Android. The native
    /// window must outlive the returned `Window`.
    #[cfg(rwh)]
    pub fn from_raw_window_handle(config: &Config, handle: RawWindowHandle)
                                  -> Result<Window, Error> {
        error::track(|| {
            let backend = config.backend().wrap_window(handle)?;
            Ok(Window::from_backend(config, backend))
        })
    }

    fn from_backend(config: &Config, backend: Box<dyn WindowBackend>) -> Window {
        Window {
            display_id: config.display_id(),
            display_native: config.display_native(),
            backend,
            phantom: PhantomData,
        }
    }

    pub fn show(&mut self) -> Result<(), Error> {
        error::track(|| self.backend.show())
    }

    /// Presents the back buffer. A no-op for single-buffered configs.
    pub fn swap_buffers(&mut self) -> Result<(), Error> {
        error::track(|| self.backend.swap_buffers())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        error::track(|| {
            window_attributes::check_size(width, height)?;
            self.backend.resize(Size2D::new(width, height))
        })
    }

    #[inline]
    pub fn size(&self) -> Size2D<u32> {
        self.backend.size()
    }

    #[inline]
    pub fn display_id(&self) -> DisplayId {
        self.display_id
    }

    /// The native window handles.
    #[inline]
    pub fn native(&self) -> NativeWindow {
        self.backend.native()
    }

    /// Destroys the window, reporting native failures.
    pub fn destroy(mut self) -> Result<(), Error> {
        error::track(|| self.backend.destroy())
    }

    #[inline]
    pub(crate) fn backend(&self) -> &dyn WindowBackend {
        &*self.backend
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        if let Err(err) = self.backend.destroy() {
            log::warn!("failed to destroy window: {}", err);
        }
    }
}

impl Debug for Window {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let size = self.size();
        write!(f, "Window({:?}, {}x{})", self.display_id, size.width, size.height)
    }
}

#[cfg(rwh)]
impl HasWindowHandle for Window {
    fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
        let raw = self.native().raw_window_handle()?;
        Ok(unsafe { WindowHandle::borrow_raw(raw) })
    }
}

#[cfg(rwh)]
impl HasDisplayHandle for Window {
    fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
        let raw = self.display_native.raw_display_handle()?;
        Ok(unsafe { DisplayHandle::borrow_raw(raw) })
    }
}
