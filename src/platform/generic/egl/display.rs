// waffle/src/platform/generic/egl/display.rs
//
//! EGL displays.

use super::config::EglConfig;
use super::context::EglContext;
use super::error;
use super::library::{has_extension, EglLibrary};
use super::window::EglWindow;
use super::EglConnection;
use crate::config_attributes::ConfigAttributes;
use crate::egl;
use crate::egl::types::{EGLAttrib, EGLDisplay, EGLenum, EGLint};
use crate::enums::ContextApi;
use crate::error::Error;
use crate::native::NativeDisplay;
use crate::platform::{self, ConfigBackend, ContextBackend, DisplayBackend, WindowBackend};

use std::any::Any;
use std::ffi::CStr;
use std::rc::Rc;
use std::sync::Arc;

/// Extensions and version of an initialized EGL display.
#[derive(Clone, Debug, Default)]
pub(crate) struct EglDisplayInfo {
    pub(crate) major_version: EGLint,
    pub(crate) minor_version: EGLint,
    pub(crate) client_apis: String,
    pub(crate) extensions: String,
}

impl EglDisplayInfo {
    #[inline]
    pub(crate) fn is_at_least(&self, major: EGLint, minor: EGLint) -> bool {
        (self.major_version, self.minor_version) >= (major, minor)
    }

    #[inline]
    pub(crate) fn has_extension(&self, name: &str) -> bool {
        has_extension(&self.extensions, name)
    }

    /// True if contexts can be created with explicit versions, profiles and flags.
    #[inline]
    pub(crate) fn has_create_context(&self) -> bool {
        self.has_extension("EGL_KHR_create_context")
    }

    /// EGL 1.5 accepts `EGL_CONTEXT_MAJOR_VERSION` without any extension.
    #[inline]
    pub(crate) fn has_context_versions(&self) -> bool {
        self.has_create_context() || self.is_at_least(1, 5)
    }

    fn has_client_api(&self, name: &str) -> bool {
        // `EGL_CLIENT_APIS` only exists since EGL 1.2; before that OpenGL ES was the only API.
        if !self.is_at_least(1, 2) {
            return name == "OpenGL_ES";
        }
        has_extension(&self.client_apis, name)
    }

    pub(crate) fn supports_context_api(&self, api: ContextApi, desktop_gl: bool) -> bool {
        match api {
            ContextApi::OpenGl => {
                desktop_gl && self.is_at_least(1, 4) && self.has_client_api("OpenGL")
            }
            ContextApi::OpenGlEs1 | ContextApi::OpenGlEs2 => self.has_client_api("OpenGL_ES"),
            ContextApi::OpenGlEs3 => {
                self.has_context_versions() && self.has_client_api("OpenGL_ES")
            }
        }
    }
}

/// State shared by a display and everything created from it.
pub(crate) struct EglDisplayShared {
    pub(crate) library: Arc<EglLibrary>,
    pub(crate) egl_display: EGLDisplay,
    pub(crate) info: EglDisplayInfo,
    pub(crate) desktop_gl: bool,
    // Dropped after `eglTerminate()` runs in `drop()`.
    pub(crate) connection: Box<dyn EglConnection>,
}

impl Drop for EglDisplayShared {
    fn drop(&mut self) {
        unsafe {
            let egl = &self.library.egl;
            if egl.Terminate(self.egl_display) == egl::FALSE {
                log::warn!("{}", error::last_error(egl, "eglTerminate"));
            }
        }
    }
}

pub(crate) struct EglDisplay {
    pub(crate) shared: Rc<EglDisplayShared>,
}

impl EglDisplay {
    pub(crate) fn new(library: Arc<EglLibrary>,
                      connection: Box<dyn EglConnection>,
                      egl_platform: Option<EGLenum>,
                      desktop_gl: bool)
                      -> Result<EglDisplay, Error> {
        unsafe {
            let egl_display = get_display(&library, &*connection, egl_platform)?;

            let egl = &library.egl;
            let (mut major_version, mut minor_version) = (0, 0);
            if egl.Initialize(egl_display, &mut major_version, &mut minor_version) == egl::FALSE {
                return Err(error::last_error(egl, "eglInitialize"));
            }

            let info = EglDisplayInfo {
                major_version,
                minor_version,
                client_apis: query_string(&library, egl_display, egl::CLIENT_APIS),
                extensions: query_string(&library, egl_display, egl::EXTENSIONS),
            };
            log::debug!("initialized EGL {}.{} ({})",
                        info.major_version,
                        info.minor_version,
                        info.client_apis);

            Ok(EglDisplay {
                shared: Rc::new(EglDisplayShared {
                    library,
                    egl_display,
                    info,
                    desktop_gl,
                    connection,
                }),
            })
        }
    }
}

unsafe fn get_display(library: &EglLibrary,
                      connection: &dyn EglConnection,
                      egl_platform: Option<EGLenum>)
                      -> Result<EGLDisplay, Error> {
    let egl = &library.egl;
    let native_display = connection.native_display();
    let egl_display = match egl_platform {
        Some(egl_platform) if egl.GetPlatformDisplay.is_loaded() => {
            let attributes = [egl::NONE as EGLAttrib];
            egl.GetPlatformDisplay(egl_platform, native_display, attributes.as_ptr())
        }
        Some(egl_platform) => match library.get_platform_display_ext() {
            Some(get_platform_display_ext) => {
                let attributes = [egl::NONE as EGLint];
                get_platform_display_ext(egl_platform, native_display, attributes.as_ptr())
            }
            None => egl.GetDisplay(native_display as egl::types::EGLNativeDisplayType),
        },
        None => egl.GetDisplay(native_display as egl::types::EGLNativeDisplayType),
    };
    if egl_display == egl::NO_DISPLAY {
        return Err(error::last_error(egl, "eglGetDisplay"));
    }
    Ok(egl_display)
}

unsafe fn query_string(library: &EglLibrary, egl_display: EGLDisplay, name: EGLenum) -> String {
    let string = library.egl.QueryString(egl_display, name as EGLint);
    if string.is_null() {
        return String::new();
    }
    CStr::from_ptr(string).to_string_lossy().into_owned()
}

impl DisplayBackend for EglDisplay {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn supports_context_api(&self, api: ContextApi) -> bool {
        let shared = &self.shared;
        shared.info.supports_context_api(api, shared.desktop_gl) &&
            shared.library.client_libraries.can_open(api.dl_library())
    }

    fn choose_config(&self, attributes: &ConfigAttributes)
                     -> Result<Box<dyn ConfigBackend>, Error> {
        Ok(Box::new(EglConfig::choose(&self.shared, attributes)?))
    }

    fn make_current(&self,
                    window: Option<&dyn WindowBackend>,
                    context: Option<&dyn ContextBackend>)
                    -> Result<(), Error> {
        let window = match window {
            Some(window) => Some(platform::downcast::<EglWindow>(window.as_any(), "window")?),
            None => None,
        };
        let context = match context {
            Some(context) => Some(platform::downcast::<EglContext>(context.as_any(), "context")?),
            None => None,
        };

        let egl = &self.shared.library.egl;
        let egl_display = self.shared.egl_display;
        let egl_surface = window.map_or(egl::NO_SURFACE, |window| window.egl_surface());
        unsafe {
            let egl_context = match context {
                Some(context) => {
                    context.bind_api()?;
                    context.egl_context()
                }
                None => egl::NO_CONTEXT,
            };
            if egl.MakeCurrent(egl_display, egl_surface, egl_surface, egl_context) == egl::FALSE {
                return Err(error::last_error(egl, "eglMakeCurrent"));
            }
        }
        Ok(())
    }

    fn native(&self) -> NativeDisplay {
        self.shared.connection.native(self.shared.egl_display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(major: EGLint, minor: EGLint, client_apis: &str, extensions: &str) -> EglDisplayInfo {
        EglDisplayInfo {
            major_version: major,
            minor_version: minor,
            client_apis: client_apis.to_owned(),
            extensions: extensions.to_owned(),
        }
    }

    #[test]
    fn desktop_gl_needs_egl_1_4_and_the_client_api() {
        let mesa = info(1, 5, "OpenGL OpenGL_ES", "EGL_KHR_create_context");
        assert!(mesa.supports_context_api(ContextApi::OpenGl, true));
        assert!(!mesa.supports_context_api(ContextApi::OpenGl, false));
        assert!(!info(1, 3, "OpenGL OpenGL_ES", "").supports_context_api(ContextApi::OpenGl, true));
        assert!(!info(1, 4, "OpenGL_ES", "").supports_context_api(ContextApi::OpenGl, true));
    }

    #[test]
    fn gles3_needs_context_versions() {
        let old = info(1, 4, "OpenGL_ES", "");
        assert!(old.supports_context_api(ContextApi::OpenGlEs2, true));
        assert!(!old.supports_context_api(ContextApi::OpenGlEs3, true));
        assert!(info(1, 4, "OpenGL_ES", "EGL_KHR_create_context")
            .supports_context_api(ContextApi::OpenGlEs3, true));
        assert!(info(1, 5, "OpenGL_ES", "").supports_context_api(ContextApi::OpenGlEs3, true));
    }

    #[test]
    fn egl_1_1_only_has_gles() {
        let old = info(1, 1, "", "");
        assert!(old.supports_context_api(ContextApi::OpenGlEs1, true));
        assert!(!old.supports_context_api(ContextApi::OpenGl, true));
    }
}
