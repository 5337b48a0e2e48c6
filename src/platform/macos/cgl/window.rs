// waffle/src/platform/macos/cgl/window.rs
//
//! AppKit windows.

use super::display::current_ns_context;
use super::error::{cgl_error, kCGLNoError};
use crate::error::Error;
use crate::native::NativeWindow;
use crate::platform::WindowBackend;
use crate::window_attributes::WindowAttributes;

use cgl::{CGLFlushDrawable, CGLGetCurrentContext};
use euclid::default::Size2D;
use objc2::rc::Retained;
use objc2::{msg_send, MainThreadMarker};
use objc2_app_kit::{NSApplication, NSBackingStoreType, NSScreen, NSView, NSWindow};
use objc2_app_kit::NSWindowStyleMask;
use objc2_foundation::{NSPoint, NSRect, NSSize, NSString};
use std::any::Any;
use std::os::raw::c_void;

pub(crate) struct CglWindow {
    // `None` once destroyed.
    window: Option<Retained<NSWindow>>,
    size: Size2D<u32>,
    // The drawable must be told about size changes before the next swap.
    resized: bool,
}

impl CglWindow {
    pub(crate) fn new(attributes: &WindowAttributes) -> Result<CglWindow, Error> {
        let mtm = MainThreadMarker::new().ok_or_else(|| {
            Error::unsupported("AppKit windows can only be created on the main thread")
        })?;
        let _ = NSApplication::sharedApplication(mtm);

        let (size, style) = if attributes.fullscreen {
            let screen = NSScreen::mainScreen(mtm)
                .ok_or_else(|| Error::unknown("there is no main screen"))?;
            let frame = screen.frame();
            (Size2D::new(frame.size.width as u32, frame.size.height as u32),
             NSWindowStyleMask::Borderless)
        } else {
            (attributes.size,
             NSWindowStyleMask::Titled | NSWindowStyleMask::Closable |
             NSWindowStyleMask::Miniaturizable | NSWindowStyleMask::Resizable)
        };

        let rect = NSRect::new(NSPoint::new(0.0, 0.0),
                               NSSize::new(size.width as f64, size.height as f64));
        let window = unsafe {
            NSWindow::initWithContentRect_styleMask_backing_defer(mtm.alloc(),
                                                                  rect,
                                                                  style,
                                                                  NSBackingStoreType::Buffered,
                                                                  false)
        };
        unsafe { window.setReleasedWhenClosed(false) };
        window.setTitle(&NSString::from_str("waffle"));
        if window.contentView().is_none() {
            return Err(Error::unknown("the new NSWindow has no content view"));
        }

        Ok(CglWindow { window: Some(window), size, resized: false })
    }

    fn window(&self) -> Result<&NSWindow, Error> {
        self.window.as_deref().ok_or_else(|| Error::bad_parameter("the window was destroyed"))
    }

    pub(crate) fn view(&self) -> Result<Retained<NSView>, Error> {
        self.window()?
            .contentView()
            .ok_or_else(|| Error::unknown("the NSWindow has no content view"))
    }
}

impl WindowBackend for CglWindow {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn show(&mut self) -> Result<(), Error> {
        self.window()?.makeKeyAndOrderFront(None);
        Ok(())
    }

    fn swap_buffers(&mut self) -> Result<(), Error> {
        if self.resized {
            if let Some(ns_context) = current_ns_context() {
                let _: () = unsafe { msg_send![&*ns_context, update] };
            }
            self.resized = false;
        }
        unsafe {
            let err = CGLFlushDrawable(CGLGetCurrentContext());
            if err != kCGLNoError {
                return Err(cgl_error("CGLFlushDrawable", err));
            }
        }
        Ok(())
    }

    fn resize(&mut self, size: Size2D<u32>) -> Result<(), Error> {
        self.window()?.setContentSize(NSSize::new(size.width as f64, size.height as f64));
        self.size = size;
        self.resized = true;
        Ok(())
    }

    #[inline]
    fn size(&self) -> Size2D<u32> {
        self.size
    }

    fn native(&self) -> NativeWindow {
        let ns_window = self.window.as_ref().map_or(std::ptr::null_mut(), |window| {
            Retained::as_ptr(window) as *mut c_void
        });
        let ns_view = self.view().map_or(std::ptr::null_mut(), |view| {
            Retained::as_ptr(&view) as *mut c_void
        });
        NativeWindow::Cgl { ns_window, ns_view }
    }

    fn destroy(&mut self) -> Result<(), Error> {
        if let Some(window) = self.window.take() {
            window.close();
        }
        Ok(())
    }
}
