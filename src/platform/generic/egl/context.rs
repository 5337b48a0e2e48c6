// waffle/src/platform/generic/egl/context.rs
//
//! Functionality common to backends using EGL contexts.

use super::config::EglConfig;
use super::display::{EglDisplayInfo, EglDisplayShared};
use super::error;
use super::ffi::*;
use crate::config_attributes::{ConfigAttributes, ContextFlags};
use crate::egl;
use crate::egl::types::{EGLContext, EGLenum, EGLint};
use crate::enums::{ContextApi, ContextProfile};
use crate::error::Error;
use crate::native::NativeContext;
use crate::platform::ContextBackend;

use std::any::Any;
use std::rc::Rc;

pub(crate) struct EglContext {
    display: Rc<EglDisplayShared>,
    egl_context: EGLContext,
    api: ContextApi,
}

impl EglContext {
    pub(crate) fn new(config: &EglConfig, shared: Option<&EglContext>)
                      -> Result<EglContext, Error> {
        let display = &config.display;
        let attributes = &config.attributes;
        let context_attributes = egl_context_attributes(attributes, &display.info)?;

        let egl = &display.library.egl;
        unsafe {
            bind_api(display, attributes.context_api)?;
            let shared = shared.map_or(egl::NO_CONTEXT, |shared| shared.egl_context);
            let egl_context = egl.CreateContext(display.egl_display,
                                                config.egl_config,
                                                shared,
                                                context_attributes.as_ptr());
            if egl_context == egl::NO_CONTEXT {
                return Err(error::last_error(egl, "eglCreateContext"));
            }

            Ok(EglContext {
                display: display.clone(),
                egl_context,
                api: attributes.context_api,
            })
        }
    }

    #[inline]
    pub(crate) fn egl_context(&self) -> EGLContext {
        self.egl_context
    }

    /// Selects this context's API for the calling thread.
    pub(crate) fn bind_api(&self) -> Result<(), Error> {
        bind_api(&self.display, self.api)
    }
}

fn bind_api(display: &EglDisplayShared, api: ContextApi) -> Result<(), Error> {
    let egl = &display.library.egl;
    let egl_api: EGLenum = match api {
        ContextApi::OpenGl => egl::OPENGL_API,
        _ => egl::OPENGL_ES_API,
    };
    unsafe {
        if egl.BindAPI(egl_api) == egl::FALSE {
            return Err(error::last_error(egl, "eglBindAPI"));
        }
    }
    Ok(())
}

/// The `eglCreateContext()` list for `attributes`, ending in `EGL_NONE`.
pub(crate) fn egl_context_attributes(attributes: &ConfigAttributes, info: &EglDisplayInfo)
                                     -> Result<Vec<EGLint>, Error> {
    let api = attributes.context_api;
    let version = attributes.context_version;
    let mut list = vec![];

    if !info.has_create_context() {
        if attributes.needs_create_context_ext() && !(api == ContextApi::OpenGlEs3 &&
                                                      info.has_context_versions() &&
                                                      attributes.context_flags.is_empty() &&
                                                      version.minor == 0) {
            return Err(Error::unsupported(format!(
                "creating a {} {} context with these flags requires EGL_KHR_create_context",
                api, version
            )));
        }
        if api.is_gles() {
            list.extend_from_slice(&[egl::CONTEXT_CLIENT_VERSION as EGLint,
                                     version.major as EGLint]);
        }
        list.push(egl::NONE as EGLint);
        return Ok(list);
    }

    list.extend_from_slice(&[
        EGL_CONTEXT_MAJOR_VERSION_KHR, version.major as EGLint,
        EGL_CONTEXT_MINOR_VERSION_KHR, version.minor as EGLint,
    ]);

    if attributes.is_gl_at_least(3, 2) {
        let profile_bit = match attributes.resolved_profile() {
            Some(ContextProfile::Compatibility) => {
                EGL_CONTEXT_OPENGL_COMPATIBILITY_PROFILE_BIT_KHR
            }
            Some(ContextProfile::Core) | None => EGL_CONTEXT_OPENGL_CORE_PROFILE_BIT_KHR,
        };
        list.extend_from_slice(&[EGL_CONTEXT_OPENGL_PROFILE_MASK_KHR, profile_bit]);
    }

    let flags = attributes.context_flags;
    let mut egl_flags = 0;
    if flags.contains(ContextFlags::FORWARD_COMPATIBLE) {
        egl_flags |= EGL_CONTEXT_OPENGL_FORWARD_COMPATIBLE_BIT_KHR;
    }
    if flags.contains(ContextFlags::DEBUG) {
        egl_flags |= EGL_CONTEXT_OPENGL_DEBUG_BIT_KHR;
    }
    if flags.contains(ContextFlags::ROBUST_ACCESS) {
        if api == ContextApi::OpenGl {
            egl_flags |= EGL_CONTEXT_OPENGL_ROBUST_ACCESS_BIT_KHR;
        } else if info.has_extension("EGL_EXT_create_context_robustness") {
            list.extend_from_slice(&[EGL_CONTEXT_OPENGL_ROBUST_ACCESS_EXT, egl::TRUE as EGLint]);
        } else {
            return Err(Error::unsupported(
                "robust OpenGL ES contexts require EGL_EXT_create_context_robustness",
            ));
        }
    }
    if egl_flags != 0 {
        list.extend_from_slice(&[EGL_CONTEXT_FLAGS_KHR, egl_flags]);
    }

    list.push(egl::NONE as EGLint);
    Ok(list)
}

impl ContextBackend for EglContext {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn api(&self) -> ContextApi {
        self.api
    }

    fn native(&self) -> NativeContext {
        NativeContext::Egl {
            egl_display: self.display.egl_display,
            egl_context: self.egl_context,
        }
    }

    fn destroy(&mut self) -> Result<(), Error> {
        if self.egl_context == egl::NO_CONTEXT {
            return Ok(());
        }
        let egl = &self.display.library.egl;
        let egl_context = self.egl_context;
        self.egl_context = egl::NO_CONTEXT;
        unsafe {
            if egl.DestroyContext(self.display.egl_display, egl_context) == egl::FALSE {
                return Err(error::last_error(egl, "eglDestroyContext"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn info(major: EGLint, minor: EGLint, extensions: &str) -> EglDisplayInfo {
        EglDisplayInfo {
            major_version: major,
            minor_version: minor,
            client_apis: "OpenGL OpenGL_ES".to_owned(),
            extensions: extensions.to_owned(),
        }
    }

    #[test]
    fn legacy_contexts_use_the_client_version() {
        let list = egl_context_attributes(&ConfigAttributes::new(ContextApi::OpenGlEs2),
                                          &info(1, 4, "")).unwrap();
        assert_eq!(list, vec![egl::CONTEXT_CLIENT_VERSION as EGLint, 2, egl::NONE as EGLint]);

        let list = egl_context_attributes(&ConfigAttributes::new(ContextApi::OpenGl),
                                          &info(1, 4, "")).unwrap();
        assert_eq!(list, vec![egl::NONE as EGLint]);

        let attributes = ConfigAttributes::new(ContextApi::OpenGlEs1).version(1, 1);
        let list = egl_context_attributes(&attributes, &info(1, 4, "")).unwrap();
        assert_eq!(list, vec![egl::CONTEXT_CLIENT_VERSION as EGLint, 1, egl::NONE as EGLint]);
    }

    #[test]
    fn versions_and_flags_need_create_context() {
        let attributes = ConfigAttributes::new(ContextApi::OpenGl).version(3, 3);
        let err = egl_context_attributes(&attributes, &info(1, 4, "")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnsupportedOnPlatform);

        let attributes = ConfigAttributes::new(ContextApi::OpenGlEs2)
            .flags(ContextFlags::DEBUG);
        let err = egl_context_attributes(&attributes, &info(1, 5, "")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnsupportedOnPlatform);

        let attributes = ConfigAttributes::new(ContextApi::OpenGlEs3);
        let list = egl_context_attributes(&attributes, &info(1, 5, "")).unwrap();
        assert_eq!(list, vec![egl::CONTEXT_CLIENT_VERSION as EGLint, 3, egl::NONE as EGLint]);
    }

    #[test]
    fn core_profiles_and_flags_are_requested() {
        let attributes = ConfigAttributes::new(ContextApi::OpenGl)
            .version(4, 5)
            .flags(ContextFlags::FORWARD_COMPATIBLE | ContextFlags::DEBUG);
        let list = egl_context_attributes(&attributes, &info(1, 4, "EGL_KHR_create_context"))
            .unwrap();
        assert_eq!(list, vec![
            EGL_CONTEXT_MAJOR_VERSION_KHR, 4,
            EGL_CONTEXT_MINOR_VERSION_KHR, 5,
            EGL_CONTEXT_OPENGL_PROFILE_MASK_KHR, EGL_CONTEXT_OPENGL_CORE_PROFILE_BIT_KHR,
            EGL_CONTEXT_FLAGS_KHR, 3,
            egl::NONE as EGLint,
        ]);
    }

    #[test]
    fn robust_gles_needs_the_robustness_extension() {
        let attributes = ConfigAttributes::new(ContextApi::OpenGlEs2)
            .flags(ContextFlags::ROBUST_ACCESS);
        let err = egl_context_attributes(&attributes, &info(1, 4, "EGL_KHR_create_context"))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnsupportedOnPlatform);

        let extensions = "EGL_KHR_create_context EGL_EXT_create_context_robustness";
        let list = egl_context_attributes(&attributes, &info(1, 4, extensions)).unwrap();
        assert!(list.contains(&EGL_CONTEXT_OPENGL_ROBUST_ACCESS_EXT));
    }
}
