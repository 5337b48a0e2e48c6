// waffle/src/platform/generic/egl/config.rs
//
//! Choosing EGL framebuffer configurations.

use super::context::EglContext;
use super::display::EglDisplayShared;
use super::error;
use super::ffi::EGL_OPENGL_ES3_BIT_KHR;
use super::window::EglWindow;
use crate::config_attributes::ConfigAttributes;
use crate::egl;
use crate::egl::types::{EGLConfig, EGLenum, EGLint};
use crate::enums::ContextApi;
use crate::error::Error;
use crate::native::NativeConfig;
use crate::platform::{self, ConfigBackend, ContextBackend, WindowBackend};
use crate::window_attributes::WindowAttributes;

use std::any::Any;
use std::ptr;
use std::rc::Rc;

#[cfg(rwh)]
use rwh_06::RawWindowHandle;

pub(crate) struct EglConfig {
    pub(crate) display: Rc<EglDisplayShared>,
    pub(crate) egl_config: EGLConfig,
    pub(crate) attributes: ConfigAttributes,
}

impl EglConfig {
    pub(crate) fn choose(display: &Rc<EglDisplayShared>, attributes: &ConfigAttributes)
                         -> Result<EglConfig, Error> {
        if attributes.accum_buffer {
            return Err(Error::unsupported("EGL does not support accumulation buffers"));
        }

        let config_attributes =
            egl_config_attributes(attributes, display.connection.surface_type());
        let egl = &display.library.egl;
        unsafe {
            let (mut egl_config, mut config_count) = (ptr::null(), 0);
            if egl.ChooseConfig(display.egl_display,
                                config_attributes.as_ptr(),
                                &mut egl_config,
                                1,
                                &mut config_count) == egl::FALSE {
                return Err(error::last_error(egl, "eglChooseConfig"));
            }
            if config_count == 0 {
                return Err(Error::unknown("eglChooseConfig found no matching configuration"));
            }

            Ok(EglConfig {
                display: display.clone(),
                egl_config,
                attributes: attributes.clone(),
            })
        }
    }

    pub(crate) fn get_attr(&self, attr: EGLenum) -> Result<EGLint, Error> {
        let egl = &self.display.library.egl;
        let mut value = 0;
        unsafe {
            if egl.GetConfigAttrib(self.display.egl_display,
                                   self.egl_config,
                                   attr as EGLint,
                                   &mut value) == egl::FALSE {
                return Err(error::last_error(egl, "eglGetConfigAttrib"));
            }
        }
        Ok(value)
    }
}

/// `EGL_RENDERABLE_TYPE` bit for a client API.
pub(crate) fn renderable_type(api: ContextApi) -> EGLint {
    match api {
        ContextApi::OpenGl => egl::OPENGL_BIT as EGLint,
        ContextApi::OpenGlEs1 => egl::OPENGL_ES_BIT as EGLint,
        ContextApi::OpenGlEs2 => egl::OPENGL_ES2_BIT as EGLint,
        ContextApi::OpenGlEs3 => EGL_OPENGL_ES3_BIT_KHR,
    }
}

fn size_or_dont_care(size: Option<u32>) -> EGLint {
    size.map_or(egl::DONT_CARE as EGLint, |size| size as EGLint)
}

/// The `eglChooseConfig()` list for `attributes`, ending in `EGL_NONE`.
pub(crate) fn egl_config_attributes(attributes: &ConfigAttributes, surface_type: EGLint)
                                    -> Vec<EGLint> {
    vec![
        egl::RED_SIZE as EGLint,            size_or_dont_care(attributes.red_size),
        egl::GREEN_SIZE as EGLint,          size_or_dont_care(attributes.green_size),
        egl::BLUE_SIZE as EGLint,           size_or_dont_care(attributes.blue_size),
        egl::ALPHA_SIZE as EGLint,          size_or_dont_care(attributes.alpha_size),
        egl::DEPTH_SIZE as EGLint,          size_or_dont_care(attributes.depth_size),
        egl::STENCIL_SIZE as EGLint,        size_or_dont_care(attributes.stencil_size),
        egl::SAMPLE_BUFFERS as EGLint,      attributes.sample_buffers as EGLint,
        egl::SAMPLES as EGLint,             attributes.samples as EGLint,
        egl::RENDERABLE_TYPE as EGLint,     renderable_type(attributes.context_api),
        egl::SURFACE_TYPE as EGLint,        surface_type,
        egl::NONE as EGLint,
    ]
}

impl ConfigBackend for EglConfig {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn create_context(&self, shared: Option<&dyn ContextBackend>)
                      -> Result<Box<dyn ContextBackend>, Error> {
        let shared = match shared {
            Some(shared) => Some(platform::downcast::<EglContext>(shared.as_any(), "context")?),
            None => None,
        };
        Ok(Box::new(EglContext::new(self, shared)?))
    }

    fn create_window(&self, attributes: &WindowAttributes)
                     -> Result<Box<dyn WindowBackend>, Error> {
        let visual_id = self.get_attr(egl::NATIVE_VISUAL_ID)?;
        let native = self.display.connection.create_window(visual_id, attributes)?;
        Ok(Box::new(EglWindow::new(self, native)?))
    }

    #[cfg(rwh)]
    fn wrap_window(&self, handle: RawWindowHandle) -> Result<Box<dyn WindowBackend>, Error> {
        let native = self.display.connection.wrap_window(handle)?;
        Ok(Box::new(EglWindow::new(self, native)?))
    }

    fn native(&self) -> NativeConfig {
        NativeConfig::Egl {
            egl_display: self.display.egl_display,
            egl_config: self.egl_config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ContextFlags;

    fn value_of(list: &[EGLint], key: EGLint) -> Option<EGLint> {
        list.chunks(2).find(|pair| pair[0] == key).map(|pair| pair[1])
    }

    #[test]
    fn unset_sizes_are_dont_care() {
        let attributes = ConfigAttributes::new(ContextApi::OpenGlEs2).depth_size(24);
        let list = egl_config_attributes(&attributes, egl::WINDOW_BIT as EGLint);
        assert_eq!(value_of(&list, egl::RED_SIZE as EGLint), Some(egl::DONT_CARE as EGLint));
        assert_eq!(value_of(&list, egl::DEPTH_SIZE as EGLint), Some(24));
        assert_eq!(value_of(&list, egl::RENDERABLE_TYPE as EGLint),
                   Some(egl::OPENGL_ES2_BIT as EGLint));
        assert_eq!(list.last(), Some(&(egl::NONE as EGLint)));
    }

    #[test]
    fn renderable_type_follows_the_api() {
        let attributes = ConfigAttributes::new(ContextApi::OpenGl)
            .version(3, 2)
            .flags(ContextFlags::DEBUG)
            .multisample(4);
        let list = egl_config_attributes(&attributes, egl::PBUFFER_BIT as EGLint);
        assert_eq!(value_of(&list, egl::RENDERABLE_TYPE as EGLint),
                   Some(egl::OPENGL_BIT as EGLint));
        assert_eq!(value_of(&list, egl::SURFACE_TYPE as EGLint),
                   Some(egl::PBUFFER_BIT as EGLint));
        assert_eq!(value_of(&list, egl::SAMPLE_BUFFERS as EGLint), Some(1));
        assert_eq!(value_of(&list, egl::SAMPLES as EGLint), Some(4));
        assert_eq!(renderable_type(ContextApi::OpenGlEs3), EGL_OPENGL_ES3_BIT_KHR);
    }
}
