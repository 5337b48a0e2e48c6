// waffle/src/platform/generic/egl/window.rs
//
//! EGL window surfaces.

use super::config::EglConfig;
use super::display::EglDisplayShared;
use super::error;
use super::EglNativeWindow;
use crate::egl;
use crate::egl::types::{EGLSurface, EGLint};
use crate::error::Error;
use crate::native::NativeWindow;
use crate::platform::WindowBackend;

use euclid::default::Size2D;
use std::any::Any;
use std::rc::Rc;

pub(crate) struct EglWindow {
    display: Rc<EglDisplayShared>,
    egl_surface: EGLSurface,
    // Destroyed after the surface.
    native: Box<dyn EglNativeWindow>,
}

impl EglWindow {
    pub(crate) fn new(config: &EglConfig, native: Box<dyn EglNativeWindow>)
                      -> Result<EglWindow, Error> {
        let display = &config.display;
        let egl = &display.library.egl;
        unsafe {
            let egl_surface = match native.egl_window() {
                Some(egl_window) => {
                    let render_buffer = if config.attributes.double_buffered {
                        egl::BACK_BUFFER
                    } else {
                        egl::SINGLE_BUFFER
                    };
                    let surface_attributes = [
                        egl::RENDER_BUFFER as EGLint, render_buffer as EGLint,
                        egl::NONE as EGLint,
                    ];
                    let egl_surface = egl.CreateWindowSurface(display.egl_display,
                                                              config.egl_config,
                                                              egl_window,
                                                              surface_attributes.as_ptr());
                    if egl_surface == egl::NO_SURFACE {
                        return Err(error::last_error(egl, "eglCreateWindowSurface"));
                    }
                    egl_surface
                }
                None => {
                    let size = native.size();
                    let pbuffer_attributes = [
                        egl::WIDTH as EGLint,   size.width as EGLint,
                        egl::HEIGHT as EGLint,  size.height as EGLint,
                        egl::NONE as EGLint,
                    ];
                    let egl_surface = egl.CreatePbufferSurface(display.egl_display,
                                                               config.egl_config,
                                                               pbuffer_attributes.as_ptr());
                    if egl_surface == egl::NO_SURFACE {
                        return Err(error::last_error(egl, "eglCreatePbufferSurface"));
                    }
                    egl_surface
                }
            };

            Ok(EglWindow { display: display.clone(), egl_surface, native })
        }
    }

    #[inline]
    pub(crate) fn egl_surface(&self) -> EGLSurface {
        self.egl_surface
    }
}

impl WindowBackend for EglWindow {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn show(&mut self) -> Result<(), Error> {
        self.native.show()
    }

    fn swap_buffers(&mut self) -> Result<(), Error> {
        self.native.prepare_swap()?;
        let egl = &self.display.library.egl;
        unsafe {
            if egl.SwapBuffers(self.display.egl_display, self.egl_surface) == egl::FALSE {
                return Err(error::last_error(egl, "eglSwapBuffers"));
            }
        }
        Ok(())
    }

    fn resize(&mut self, size: Size2D<u32>) -> Result<(), Error> {
        self.native.resize(size)
    }

    #[inline]
    fn size(&self) -> Size2D<u32> {
        self.native.size()
    }

    fn native(&self) -> NativeWindow {
        self.native.native(self.egl_surface)
    }

    fn destroy(&mut self) -> Result<(), Error> {
        if self.egl_surface == egl::NO_SURFACE {
            return Ok(());
        }
        let egl = &self.display.library.egl;
        let egl_surface = self.egl_surface;
        self.egl_surface = egl::NO_SURFACE;
        unsafe {
            if egl.DestroySurface(self.display.egl_display, egl_surface) == egl::FALSE {
                return Err(error::last_error(egl, "eglDestroySurface"));
            }
        }
        Ok(())
    }
}
