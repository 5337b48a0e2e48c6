// waffle/src/platform/unix/glx/display.rs
//
//! GLX displays.

use super::config::GlxConfig;
use super::context::GlxContext;
use super::window::GlxWindow;
use super::GlxLibrary;
use crate::config_attributes::{ConfigAttributes, ContextFlags};
use crate::enums::ContextApi;
use crate::error::Error;
use crate::glx::types::Display as GlxDisplayPtr;
use crate::native::NativeDisplay;
use crate::platform::unix::x11::{error, XlibDisplay, XlibLibrary};
use crate::platform::{self, ConfigBackend, ContextBackend, DisplayBackend, WindowBackend};

use std::any::Any;
use std::ffi::CStr;
use std::rc::Rc;
use std::sync::Arc;

/// The GLX extensions of a display's screen.
#[derive(Clone, Debug, Default)]
pub(crate) struct GlxDisplayInfo {
    pub(crate) extensions: String,
    pub(crate) has_create_context_attribs: bool,
}

impl GlxDisplayInfo {
    #[inline]
    pub(crate) fn has_extension(&self, name: &str) -> bool {
        self.extensions.split_ascii_whitespace().any(|extension| extension == name)
    }

    #[inline]
    pub(crate) fn has_create_context(&self) -> bool {
        self.has_create_context_attribs && self.has_extension("GLX_ARB_create_context")
    }

    pub(crate) fn supports_context_api(&self, api: ContextApi) -> bool {
        match api {
            ContextApi::OpenGl => true,
            ContextApi::OpenGlEs1 | ContextApi::OpenGlEs3 => {
                self.has_create_context() &&
                    self.has_extension("GLX_ARB_create_context_profile") &&
                    self.has_extension("GLX_EXT_create_context_es_profile")
            }
            ContextApi::OpenGlEs2 => {
                self.has_create_context() &&
                    self.has_extension("GLX_ARB_create_context_profile") &&
                    (self.has_extension("GLX_EXT_create_context_es2_profile") ||
                     self.has_extension("GLX_EXT_create_context_es_profile"))
            }
        }
    }

    /// Checks that a context for `attributes` can be created on this display.
    pub(crate) fn check_attributes(&self, attributes: &ConfigAttributes) -> Result<(), Error> {
        if !self.has_create_context() && attributes.needs_create_context_ext() {
            return Err(Error::unsupported(format!(
                "creating a {} {} context with these flags requires GLX_ARB_create_context",
                attributes.context_api, attributes.context_version
            )));
        }
        if attributes.context_profile.is_some() &&
                !self.has_extension("GLX_ARB_create_context_profile") {
            return Err(Error::unsupported(
                "OpenGL profiles require GLX_ARB_create_context_profile",
            ));
        }
        if attributes.context_flags.contains(ContextFlags::ROBUST_ACCESS) &&
                !self.has_extension("GLX_ARB_create_context_robustness") {
            return Err(Error::unsupported(
                "robust access requires GLX_ARB_create_context_robustness",
            ));
        }
        Ok(())
    }
}

/// State shared by a display and everything created from it.
pub(crate) struct GlxDisplayShared {
    pub(crate) library: Arc<GlxLibrary>,
    pub(crate) x: Rc<XlibDisplay>,
    pub(crate) info: GlxDisplayInfo,
}

impl GlxDisplayShared {
    #[inline]
    pub(crate) fn glx_display(&self) -> *mut GlxDisplayPtr {
        self.x.display() as *mut GlxDisplayPtr
    }
}

pub(crate) struct GlxDisplay {
    pub(crate) shared: Rc<GlxDisplayShared>,
}

impl GlxDisplay {
    pub(crate) fn new(library: Arc<GlxLibrary>, xlib: Arc<XlibLibrary>, name: Option<&str>)
                      -> Result<GlxDisplay, Error> {
        let x = XlibDisplay::open(xlib, name)?;
        let glx = &library.glx;
        let glx_display = x.display() as *mut GlxDisplayPtr;
        unsafe {
            let (mut major_version, mut minor_version) = (0, 0);
            if glx.QueryVersion(glx_display, &mut major_version, &mut minor_version) == 0 {
                return Err(Error::unknown("glXQueryVersion failed; is GLX available?"));
            }
            if (major_version, minor_version) < (1, 3) {
                return Err(Error::unsupported(format!(
                    "GLX {}.{} is too old; 1.3 is required",
                    major_version, minor_version
                )));
            }

            let extensions = glx.QueryExtensionsString(glx_display, x.screen());
            let extensions = if extensions.is_null() {
                String::new()
            } else {
                CStr::from_ptr(extensions).to_string_lossy().into_owned()
            };
            log::debug!("GLX {}.{}: {}", major_version, minor_version, extensions);

            let info = GlxDisplayInfo {
                extensions,
                has_create_context_attribs: library.create_context_attribs.is_some(),
            };
            Ok(GlxDisplay { shared: Rc::new(GlxDisplayShared { library, x, info }) })
        }
    }
}

impl DisplayBackend for GlxDisplay {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn supports_context_api(&self, api: ContextApi) -> bool {
        self.shared.info.supports_context_api(api) &&
            self.shared.library.client_libraries.can_open(api.dl_library())
    }

    fn choose_config(&self, attributes: &ConfigAttributes)
                     -> Result<Box<dyn ConfigBackend>, Error> {
        self.shared.info.check_attributes(attributes)?;
        Ok(Box::new(GlxConfig::choose(&self.shared, attributes)?))
    }

    fn make_current(&self,
                    window: Option<&dyn WindowBackend>,
                    context: Option<&dyn ContextBackend>)
                    -> Result<(), Error> {
        let drawable = match window {
            Some(window) => {
                platform::downcast::<GlxWindow>(window.as_any(), "window")?.drawable()
            }
            None => 0,
        };
        let glx_context = match context {
            Some(context) => {
                platform::downcast::<GlxContext>(context.as_any(), "context")?.glx_context()
            }
            None => std::ptr::null(),
        };

        let glx = &self.shared.library.glx;
        let glx_display = self.shared.glx_display();
        let (ok, x_error) = error::trap_errors(&self.shared.x, || unsafe {
            glx.MakeContextCurrent(glx_display, drawable, drawable, glx_context)
        });
        if ok == 0 || x_error.is_some() {
            return Err(error::x_error(&self.shared.x, "glXMakeContextCurrent", x_error));
        }
        Ok(())
    }

    fn native(&self) -> NativeDisplay {
        NativeDisplay::Glx {
            xlib_display: self.shared.x.display_ptr(),
            screen: self.shared.x.screen(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn info(extensions: &str, has_create_context_attribs: bool) -> GlxDisplayInfo {
        GlxDisplayInfo {
            extensions: extensions.to_owned(),
            has_create_context_attribs,
        }
    }

    #[test]
    fn gles_needs_the_es_profile_extensions() {
        let plain = info("GLX_ARB_create_context GLX_ARB_create_context_profile", true);
        assert!(plain.supports_context_api(ContextApi::OpenGl));
        assert!(!plain.supports_context_api(ContextApi::OpenGlEs2));

        let es2 = info("GLX_ARB_create_context GLX_ARB_create_context_profile \
                        GLX_EXT_create_context_es2_profile", true);
        assert!(es2.supports_context_api(ContextApi::OpenGlEs2));
        assert!(!es2.supports_context_api(ContextApi::OpenGlEs3));

        let es = info("GLX_ARB_create_context GLX_ARB_create_context_profile \
                       GLX_EXT_create_context_es_profile", true);
        assert!(es.supports_context_api(ContextApi::OpenGlEs1));
        assert!(es.supports_context_api(ContextApi::OpenGlEs3));
        assert!(!info(&es.extensions, false).supports_context_api(ContextApi::OpenGlEs3));
    }

    #[test]
    fn versions_and_flags_need_create_context() {
        let legacy = info("", false);
        assert!(legacy.check_attributes(&ConfigAttributes::new(ContextApi::OpenGl)).is_ok());

        let attributes = ConfigAttributes::new(ContextApi::OpenGl).version(3, 3);
        let err = legacy.check_attributes(&attributes).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnsupportedOnPlatform);

        let modern = info("GLX_ARB_create_context GLX_ARB_create_context_profile", true);
        assert!(modern.check_attributes(&attributes).is_ok());
        let robust = attributes.flags(ContextFlags::ROBUST_ACCESS);
        let err = modern.check_attributes(&robust).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnsupportedOnPlatform);
    }
}
