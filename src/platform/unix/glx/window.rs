// waffle/src/platform/unix/glx/window.rs
//
//! X11 windows rendered to through GLX.

use super::config::GlxConfig;
use super::display::GlxDisplayShared;
use crate::error::Error;
use crate::native::NativeWindow;
use crate::platform::unix::x11::window::XlibWindow;
use crate::platform::WindowBackend;
use crate::window_attributes::WindowAttributes;

use euclid::default::Size2D;
use std::any::Any;
use std::rc::Rc;
use x11_dl::xlib;

pub(crate) struct GlxWindow {
    display: Rc<GlxDisplayShared>,
    // `None` once destroyed.
    x: Option<XlibWindow>,
    size: Size2D<u32>,
}

impl GlxWindow {
    pub(crate) fn new(config: &GlxConfig, attributes: &WindowAttributes)
                      -> Result<GlxWindow, Error> {
        let x = XlibWindow::new(&config.display.x, config.visual_id, attributes)?;
        Ok(GlxWindow { display: config.display.clone(), size: x.size(), x: Some(x) })
    }

    /// The GLX drawable, which is the X window itself.
    #[inline]
    pub(crate) fn drawable(&self) -> xlib::Window {
        self.x.as_ref().map_or(0, XlibWindow::window)
    }

    fn x_window(&mut self) -> Result<&mut XlibWindow, Error> {
        self.x.as_mut().ok_or_else(|| Error::bad_parameter("the window was destroyed"))
    }
}

impl WindowBackend for GlxWindow {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn show(&mut self) -> Result<(), Error> {
        self.x_window()?.show()
    }

    fn swap_buffers(&mut self) -> Result<(), Error> {
        let drawable = self.x_window()?.window();
        unsafe {
            self.display.library.glx.SwapBuffers(self.display.glx_display(), drawable);
        }
        Ok(())
    }

    fn resize(&mut self, size: Size2D<u32>) -> Result<(), Error> {
        self.x_window()?.resize(size)?;
        self.size = size;
        Ok(())
    }

    #[inline]
    fn size(&self) -> Size2D<u32> {
        self.size
    }

    fn native(&self) -> NativeWindow {
        NativeWindow::Glx {
            xlib_display: self.display.x.display_ptr(),
            xlib_window: self.drawable(),
        }
    }

    fn destroy(&mut self) -> Result<(), Error> {
        drop(self.x.take());
        Ok(())
    }
}
