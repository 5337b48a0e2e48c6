// waffle/src/platform/unix/wayland/window.rs
//
//! `xdg_toplevel` windows with a `wl_egl_window` for EGL to render into.

use super::{ToplevelState, WaylandShared};
use crate::egl::types::{EGLNativeWindowType, EGLSurface};
use crate::error::Error;
use crate::native::NativeWindow;
use crate::platform::generic::egl::EglNativeWindow;
use crate::window_attributes::WindowAttributes;

use euclid::default::Size2D;
use std::os::raw::{c_int, c_void};
use std::rc::Rc;
use std::sync::Arc;
use wayland_client::protocol::wl_surface::WlSurface;
use wayland_client::Proxy;
use wayland_protocols::xdg::shell::client::xdg_surface::XdgSurface;
use wayland_protocols::xdg::shell::client::xdg_toplevel::XdgToplevel;
use wayland_sys::egl::{wl_egl_window, wayland_egl_handle};

// Compositors answer the first commit with a configure; allow a few round trips for it.
const MAX_CONFIGURE_ROUNDTRIPS: usize = 4;

pub(crate) struct WaylandWindow {
    shared: Rc<WaylandShared>,
    surface: WlSurface,
    xdg_surface: XdgSurface,
    toplevel: XdgToplevel,
    wl_egl_window: *mut wl_egl_window,
    size: Size2D<u32>,
}

impl WaylandWindow {
    pub(crate) fn new(shared: &Rc<WaylandShared>, attributes: &WindowAttributes)
                      -> Result<WaylandWindow, Error> {
        let globals = shared.globals()?;
        let qh = globals.queue.borrow().handle();
        let state = Arc::new(ToplevelState::default());

        let surface = globals.compositor.create_surface(&qh, ());
        let xdg_surface = globals.wm_base.get_xdg_surface(&surface, &qh, state.clone());
        let toplevel = xdg_surface.get_toplevel(&qh, state.clone());
        toplevel.set_title("waffle".to_owned());
        if attributes.fullscreen {
            toplevel.set_fullscreen(None);
        }
        surface.commit();

        let mut roundtrips = 0;
        while !state.is_configured() {
            if roundtrips == MAX_CONFIGURE_ROUNDTRIPS {
                toplevel.destroy();
                xdg_surface.destroy();
                surface.destroy();
                return Err(Error::unknown("the compositor never configured the window"));
            }
            shared.roundtrip()?;
            roundtrips += 1;
        }

        let size = if attributes.fullscreen {
            let (width, height) = state.size()
                                       .or_else(|| shared.output_size())
                                       .ok_or_else(|| {
                                           Error::unknown("could not determine the screen size")
                                       })?;
            Size2D::new(width as u32, height as u32)
        } else {
            attributes.size
        };

        let wl_egl_window = unsafe {
            (wayland_egl_handle().wl_egl_window_create)(surface.id().as_ptr(),
                                                      size.width as c_int,
                                                      size.height as c_int)
        };
        if wl_egl_window.is_null() {
            toplevel.destroy();
            xdg_surface.destroy();
            surface.destroy();
            return Err(Error::unknown("wl_egl_window_create failed"));
        }

        log::debug!("created a {}x{} Wayland window", size.width, size.height);
        Ok(WaylandWindow {
            shared: shared.clone(),
            surface,
            xdg_surface,
            toplevel,
            wl_egl_window,
            size,
        })
    }
}

impl EglNativeWindow for WaylandWindow {
    #[inline]
    fn egl_window(&self) -> Option<EGLNativeWindowType> {
        Some(self.wl_egl_window as EGLNativeWindowType)
    }

    fn show(&mut self) -> Result<(), Error> {
        self.surface.commit();
        self.shared.dispatch_pending()
    }

    fn resize(&mut self, size: Size2D<u32>) -> Result<(), Error> {
        unsafe {
            (wayland_egl_handle().wl_egl_window_resize)(self.wl_egl_window,
                                                      size.width as c_int,
                                                      size.height as c_int,
                                                      0,
                                                      0);
        }
        self.size = size;
        Ok(())
    }

    #[inline]
    fn size(&self) -> Size2D<u32> {
        self.size
    }

    fn prepare_swap(&mut self) -> Result<(), Error> {
        self.shared.dispatch_pending()
    }

    fn native(&self, egl_surface: EGLSurface) -> NativeWindow {
        NativeWindow::Wayland {
            wl_display: self.shared.wl_display() as *mut c_void,
            wl_surface: self.surface.id().as_ptr() as *mut c_void,
            wl_egl_window: self.wl_egl_window as *mut c_void,
            egl_surface,
        }
    }
}

impl Drop for WaylandWindow {
    fn drop(&mut self) {
        unsafe { (wayland_egl_handle().wl_egl_window_destroy)(self.wl_egl_window) };
        self.toplevel.destroy();
        self.xdg_surface.destroy();
        self.surface.destroy();
        if let Ok(globals) = self.shared.globals() {
            if let Err(err) = globals.connection.flush() {
                log::warn!("wl_display_flush failed: {}", err);
            }
        }
    }
}
