// waffle/src/platform/macos/cgl/context.rs
//
//! CGL contexts, each wrapped in an `NSOpenGLContext` so that it can draw into views.

use super::config::CglConfig;
use super::error::{cgl_error, kCGLNoError};
use super::ffi::CglContextRef;
use crate::enums::ContextApi;
use crate::error::Error;
use crate::native::NativeContext;
use crate::platform::ContextBackend;

use cgl::{CGLContextObj, CGLCreateContext, CGLDestroyContext};
use objc2::rc::{Allocated, Retained};
use objc2::runtime::AnyObject;
use objc2::{class, msg_send};
use std::any::Any;
use std::ptr;

pub(crate) struct CglContext {
    cgl_context: CGLContextObj,
    ns_context: Option<Retained<AnyObject>>,
}

impl CglContext {
    pub(crate) fn new(config: &CglConfig, shared: Option<&CglContext>)
                      -> Result<CglContext, Error> {
        let shared = shared.map_or(ptr::null_mut(), |shared| shared.cgl_context);
        unsafe {
            let mut cgl_context = ptr::null_mut();
            let err = CGLCreateContext(config.cgl_pixel_format, shared, &mut cgl_context);
            if err != kCGLNoError {
                return Err(cgl_error("CGLCreateContext", err));
            }

            let allocated: Allocated<AnyObject> = msg_send![class!(NSOpenGLContext), alloc];
            let ns_context: Option<Retained<AnyObject>> =
                msg_send![allocated, initWithCGLContextObj: CglContextRef(cgl_context)];
            if ns_context.is_none() {
                CGLDestroyContext(cgl_context);
                return Err(Error::unknown("-[NSOpenGLContext initWithCGLContextObj:] failed"));
            }

            Ok(CglContext { cgl_context, ns_context })
        }
    }

    #[inline]
    pub(crate) fn cgl_context(&self) -> CGLContextObj {
        self.cgl_context
    }

    pub(crate) fn ns_context(&self) -> Result<&AnyObject, Error> {
        self.ns_context.as_deref().ok_or_else(|| Error::bad_parameter("the context was destroyed"))
    }
}

impl ContextBackend for CglContext {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn api(&self) -> ContextApi {
        ContextApi::OpenGl
    }

    #[inline]
    fn native(&self) -> NativeContext {
        NativeContext::Cgl { cgl_context: self.cgl_context }
    }

    fn destroy(&mut self) -> Result<(), Error> {
        if self.cgl_context.is_null() {
            return Ok(());
        }
        // The NSOpenGLContext holds a reference to the CGL context; let it go first.
        drop(self.ns_context.take());
        let cgl_context = self.cgl_context;
        self.cgl_context = ptr::null_mut();
        unsafe {
            let err = CGLDestroyContext(cgl_context);
            if err != kCGLNoError {
                return Err(cgl_error("CGLDestroyContext", err));
            }
        }
        Ok(())
    }
}
