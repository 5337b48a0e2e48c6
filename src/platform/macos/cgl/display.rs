// waffle/src/platform/macos/cgl/display.rs
//
//! CGL "displays". There is no connection to open; a display only carries the client libraries.

use super::config::CglConfig;
use super::context::CglContext;
use super::error::{cgl_error, kCGLNoError};
use super::window::CglWindow;
use crate::config_attributes::ConfigAttributes;
use crate::dl::ClientLibraries;
use crate::enums::ContextApi;
use crate::error::Error;
use crate::native::NativeDisplay;
use crate::platform::{self, ConfigBackend, ContextBackend, DisplayBackend, WindowBackend};

use cgl::CGLSetCurrentContext;
use objc2::rc::Retained;
use objc2::runtime::AnyObject;
use objc2::{class, msg_send};
use std::any::Any;
use std::ptr;
use std::sync::Arc;

pub(crate) struct CglDisplay {
    client_libraries: Arc<ClientLibraries>,
}

impl CglDisplay {
    pub(crate) fn new(client_libraries: Arc<ClientLibraries>) -> CglDisplay {
        CglDisplay { client_libraries }
    }
}

impl DisplayBackend for CglDisplay {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn supports_context_api(&self, api: ContextApi) -> bool {
        api == ContextApi::OpenGl && self.client_libraries.can_open(api.dl_library())
    }

    fn choose_config(&self, attributes: &ConfigAttributes)
                     -> Result<Box<dyn ConfigBackend>, Error> {
        Ok(Box::new(CglConfig::choose(attributes)?))
    }

    fn make_current(&self,
                    window: Option<&dyn WindowBackend>,
                    context: Option<&dyn ContextBackend>)
                    -> Result<(), Error> {
        let window = match window {
            Some(window) => Some(platform::downcast::<CglWindow>(window.as_any(), "window")?),
            None => None,
        };
        let context = match context {
            Some(context) => Some(platform::downcast::<CglContext>(context.as_any(), "context")?),
            None => None,
        };

        unsafe {
            match (window, context) {
                (Some(window), Some(context)) => {
                    let ns_context = context.ns_context()?;
                    let view = window.view()?;
                    let _: () = msg_send![ns_context, setView: &*view];
                    let _: () = msg_send![ns_context, makeCurrentContext];
                }
                (None, Some(context)) => {
                    let err = CGLSetCurrentContext(context.cgl_context());
                    if err != kCGLNoError {
                        return Err(cgl_error("CGLSetCurrentContext", err));
                    }
                }
                _ => {
                    let _: () = msg_send![class!(NSOpenGLContext), clearCurrentContext];
                    let err = CGLSetCurrentContext(ptr::null_mut());
                    if err != kCGLNoError {
                        return Err(cgl_error("CGLSetCurrentContext", err));
                    }
                }
            }
        }
        Ok(())
    }

    #[inline]
    fn native(&self) -> NativeDisplay {
        NativeDisplay::Cgl
    }
}

/// The `NSOpenGLContext` current on this thread, if any.
pub(crate) fn current_ns_context() -> Option<Retained<AnyObject>> {
    unsafe { msg_send![class!(NSOpenGLContext), currentContext] }
}
