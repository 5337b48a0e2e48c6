// waffle/src/platform/unix/x11/window.rs
//
//! Plain X11 windows for the GLX and X11/EGL backends.

use super::error;
use super::XlibDisplay;
use crate::error::Error;
use crate::window_attributes::WindowAttributes;

use euclid::default::Size2D;
use std::mem;
use std::os::raw::{c_uchar, c_uint};
use std::rc::Rc;
use x11_dl::xlib;

pub(crate) struct XlibWindow {
    display: Rc<XlibDisplay>,
    window: xlib::Window,
    colormap: xlib::Colormap,
    size: Size2D<u32>,
}

impl XlibWindow {
    /// Creates an unmapped window with the given visual.
    pub(crate) fn new(display: &Rc<XlibDisplay>,
                      visual_id: xlib::VisualID,
                      attributes: &WindowAttributes)
                      -> Result<XlibWindow, Error> {
        let xlib = &display.xlib;
        let size = if attributes.fullscreen {
            let (width, height) = display.screen_size();
            Size2D::new(width, height)
        } else {
            attributes.size
        };

        unsafe {
            let mut template: xlib::XVisualInfo = mem::zeroed();
            template.visualid = visual_id;
            template.screen = display.screen();
            let mut visual_count = 0;
            let visual_info = (xlib.XGetVisualInfo)(display.display(),
                                                    xlib::VisualIDMask | xlib::VisualScreenMask,
                                                    &mut template,
                                                    &mut visual_count);
            if visual_info.is_null() || visual_count == 0 {
                return Err(Error::unknown(format!("no X visual with id 0x{:x}", visual_id)));
            }
            let (visual, depth) = ((*visual_info).visual, (*visual_info).depth);
            (xlib.XFree)(visual_info as *mut _);

            let root = display.root_window();
            let ((window, colormap), x_error) = error::trap_errors(display, || {
                let colormap = (xlib.XCreateColormap)(display.display(),
                                                      root,
                                                      visual,
                                                      xlib::AllocNone);
                let mut window_attributes: xlib::XSetWindowAttributes = mem::zeroed();
                window_attributes.colormap = colormap;
                window_attributes.border_pixel = 0;
                window_attributes.event_mask = xlib::StructureNotifyMask | xlib::ExposureMask;
                let window = (xlib.XCreateWindow)(display.display(),
                                                  root,
                                                  0,
                                                  0,
                                                  size.width as c_uint,
                                                  size.height as c_uint,
                                                  0,
                                                  depth,
                                                  xlib::InputOutput as c_uint,
                                                  visual,
                                                  xlib::CWBorderPixel |
                                                  xlib::CWColormap |
                                                  xlib::CWEventMask,
                                                  &mut window_attributes);
                (window, colormap)
            });
            if window == 0 || x_error.is_some() {
                if window != 0 {
                    (xlib.XDestroyWindow)(display.display(), window);
                }
                (xlib.XFreeColormap)(display.display(), colormap);
                return Err(error::x_error(display, "XCreateWindow", x_error));
            }

            let window = XlibWindow { display: display.clone(), window, colormap, size };
            if attributes.fullscreen {
                window.request_fullscreen();
            }
            Ok(window)
        }
    }

    /// Asks the window manager to show the window fullscreen once it is mapped.
    fn request_fullscreen(&self) {
        let xlib = &self.display.xlib;
        unsafe {
            let wm_state = (xlib.XInternAtom)(self.display.display(),
                                              c"_NET_WM_STATE".as_ptr(),
                                              xlib::False);
            let fullscreen = (xlib.XInternAtom)(self.display.display(),
                                                c"_NET_WM_STATE_FULLSCREEN".as_ptr(),
                                                xlib::False);
            (xlib.XChangeProperty)(self.display.display(),
                                   self.window,
                                   wm_state,
                                   xlib::XA_ATOM,
                                   32,
                                   xlib::PropModeReplace,
                                   &fullscreen as *const xlib::Atom as *const c_uchar,
                                   1);
        }
    }

    #[inline]
    pub(crate) fn window(&self) -> xlib::Window {
        self.window
    }

    #[inline]
    pub(crate) fn display(&self) -> &Rc<XlibDisplay> {
        &self.display
    }

    #[inline]
    pub(crate) fn size(&self) -> Size2D<u32> {
        self.size
    }

    pub(crate) fn show(&mut self) -> Result<(), Error> {
        let xlib = &self.display.xlib;
        let ((), x_error) = error::trap_errors(&self.display, || unsafe {
            (xlib.XMapWindow)(self.display.display(), self.window);
        });
        match x_error {
            Some(_) => Err(error::x_error(&self.display, "XMapWindow", x_error)),
            None => Ok(()),
        }
    }

    pub(crate) fn resize(&mut self, size: Size2D<u32>) -> Result<(), Error> {
        let xlib = &self.display.xlib;
        let ((), x_error) = error::trap_errors(&self.display, || unsafe {
            (xlib.XResizeWindow)(self.display.display(),
                                 self.window,
                                 size.width as c_uint,
                                 size.height as c_uint);
        });
        if x_error.is_some() {
            return Err(error::x_error(&self.display, "XResizeWindow", x_error));
        }
        self.size = size;
        Ok(())
    }
}

impl Drop for XlibWindow {
    fn drop(&mut self) {
        let xlib = &self.display.xlib;
        unsafe {
            (xlib.XDestroyWindow)(self.display.display(), self.window);
            (xlib.XFreeColormap)(self.display.display(), self.colormap);
        }
        self.display.flush();
    }
}
