// waffle/src/platform/unix/glx/context.rs
//
//! GLX rendering contexts.

use super::config::GlxConfig;
use super::display::{GlxDisplayInfo, GlxDisplayShared};
use super::ffi::*;
use crate::config_attributes::{ConfigAttributes, ContextFlags};
use crate::enums::{ContextApi, ContextProfile};
use crate::error::Error;
use crate::glx;
use crate::glx::types::GLXContext;
use crate::native::NativeContext;
use crate::platform::unix::x11::error;
use crate::platform::ContextBackend;

use std::any::Any;
use std::os::raw::{c_int, c_void};
use std::ptr;
use std::rc::Rc;
use x11_dl::xlib;

pub(crate) struct GlxContext {
    display: Rc<GlxDisplayShared>,
    glx_context: GLXContext,
    api: ContextApi,
}

impl GlxContext {
    pub(crate) fn new(config: &GlxConfig, shared: Option<&GlxContext>)
                      -> Result<GlxContext, Error> {
        let display = &config.display;
        let attributes = &config.attributes;
        let glx = &display.library.glx;
        let glx_display = display.glx_display();
        let shared = shared.map_or(ptr::null(), |shared| shared.glx_context);

        let (glx_context, x_error) = match display.library.create_context_attribs {
            Some(create_context_attribs) if display.info.has_create_context() => {
                let context_attributes = glx_context_attributes(attributes, &display.info);
                error::trap_errors(&display.x, || unsafe {
                    create_context_attribs(glx_display,
                                           config.glx_fb_config,
                                           shared,
                                           xlib::True,
                                           context_attributes.as_ptr())
                })
            }
            _ => {
                error::trap_errors(&display.x, || unsafe {
                    glx.CreateNewContext(glx_display,
                                         config.glx_fb_config,
                                         glx::RGBA_TYPE as c_int,
                                         shared,
                                         xlib::True)
                })
            }
        };
        if glx_context.is_null() || x_error.is_some() {
            if !glx_context.is_null() {
                unsafe { glx.DestroyContext(glx_display, glx_context) };
            }
            return Err(error::x_error(&display.x, "glXCreateContext", x_error));
        }

        Ok(GlxContext {
            display: display.clone(),
            glx_context,
            api: attributes.context_api,
        })
    }

    #[inline]
    pub(crate) fn glx_context(&self) -> GLXContext {
        self.glx_context
    }
}

/// The `glXCreateContextAttribsARB()` list for `attributes`, ending in `None`.
pub(crate) fn glx_context_attributes(attributes: &ConfigAttributes, info: &GlxDisplayInfo)
                                     -> Vec<c_int> {
    let version = attributes.context_version;
    let mut list = vec![
        GLX_CONTEXT_MAJOR_VERSION_ARB, version.major as c_int,
        GLX_CONTEXT_MINOR_VERSION_ARB, version.minor as c_int,
    ];

    let profile_mask = if attributes.context_api.is_gles() {
        Some(GLX_CONTEXT_ES_PROFILE_BIT_EXT)
    } else if attributes.is_gl_at_least(3, 2) &&
            info.has_extension("GLX_ARB_create_context_profile") {
        match attributes.resolved_profile() {
            Some(ContextProfile::Compatibility) => Some(GLX_CONTEXT_COMPATIBILITY_PROFILE_BIT_ARB),
            Some(ContextProfile::Core) | None => Some(GLX_CONTEXT_CORE_PROFILE_BIT_ARB),
        }
    } else {
        None
    };
    if let Some(profile_mask) = profile_mask {
        list.extend_from_slice(&[GLX_CONTEXT_PROFILE_MASK_ARB, profile_mask]);
    }

    let flags = attributes.context_flags;
    let mut glx_flags = 0;
    if flags.contains(ContextFlags::FORWARD_COMPATIBLE) {
        glx_flags |= GLX_CONTEXT_FORWARD_COMPATIBLE_BIT_ARB;
    }
    if flags.contains(ContextFlags::DEBUG) {
        glx_flags |= GLX_CONTEXT_DEBUG_BIT_ARB;
    }
    if flags.contains(ContextFlags::ROBUST_ACCESS) {
        glx_flags |= GLX_CONTEXT_ROBUST_ACCESS_BIT_ARB;
    }
    if glx_flags != 0 {
        list.extend_from_slice(&[GLX_CONTEXT_FLAGS_ARB, glx_flags]);
    }

    list.push(0);
    list
}

impl ContextBackend for GlxContext {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn api(&self) -> ContextApi {
        self.api
    }

    fn native(&self) -> NativeContext {
        NativeContext::Glx {
            xlib_display: self.display.x.display_ptr(),
            glx_context: self.glx_context as *const c_void,
        }
    }

    fn destroy(&mut self) -> Result<(), Error> {
        if self.glx_context.is_null() {
            return Ok(());
        }
        let glx = &self.display.library.glx;
        let glx_display = self.display.glx_display();
        let glx_context = self.glx_context;
        self.glx_context = ptr::null();
        let ((), x_error) = error::trap_errors(&self.display.x, || unsafe {
            glx.DestroyContext(glx_display, glx_context);
        });
        match x_error {
            Some(_) => Err(error::x_error(&self.display.x, "glXDestroyContext", x_error)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(extensions: &str) -> GlxDisplayInfo {
        GlxDisplayInfo {
            extensions: extensions.to_owned(),
            has_create_context_attribs: true,
        }
    }

    #[test]
    fn gles_contexts_use_the_es_profile() {
        let attributes = ConfigAttributes::new(ContextApi::OpenGlEs3).version(3, 1);
        let list = glx_context_attributes(&attributes, &info("GLX_ARB_create_context"));
        assert_eq!(list, vec![
            GLX_CONTEXT_MAJOR_VERSION_ARB, 3,
            GLX_CONTEXT_MINOR_VERSION_ARB, 1,
            GLX_CONTEXT_PROFILE_MASK_ARB, GLX_CONTEXT_ES_PROFILE_BIT_EXT,
            0,
        ]);
    }

    #[test]
    fn gl_profiles_need_the_profile_extension() {
        let attributes = ConfigAttributes::new(ContextApi::OpenGl)
            .version(3, 3)
            .profile(ContextProfile::Compatibility)
            .flags(ContextFlags::DEBUG | ContextFlags::ROBUST_ACCESS);
        let list = glx_context_attributes(
            &attributes,
            &info("GLX_ARB_create_context GLX_ARB_create_context_profile"),
        );
        assert_eq!(list, vec![
            GLX_CONTEXT_MAJOR_VERSION_ARB, 3,
            GLX_CONTEXT_MINOR_VERSION_ARB, 3,
            GLX_CONTEXT_PROFILE_MASK_ARB, GLX_CONTEXT_COMPATIBILITY_PROFILE_BIT_ARB,
            GLX_CONTEXT_FLAGS_ARB, GLX_CONTEXT_DEBUG_BIT_ARB | GLX_CONTEXT_ROBUST_ACCESS_BIT_ARB,
            0,
        ]);

        let list = glx_context_attributes(&ConfigAttributes::new(ContextApi::OpenGl).version(3, 2),
                                          &info("GLX_ARB_create_context"));
        assert!(!list.contains(&GLX_CONTEXT_PROFILE_MASK_ARB));
    }
}
