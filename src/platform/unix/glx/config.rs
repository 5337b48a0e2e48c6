// waffle/src/platform/unix/glx/config.rs
//
//! Choosing GLX framebuffer configurations.

use super::context::GlxContext;
use super::display::GlxDisplayShared;
use super::window::GlxWindow;
use crate::config_attributes::ConfigAttributes;
use crate::error::Error;
use crate::glx;
use crate::glx::types::GLXFBConfig;
use crate::native::NativeConfig;
use crate::platform::{self, ConfigBackend, ContextBackend, WindowBackend};
use crate::window_attributes::WindowAttributes;

use std::any::Any;
use std::os::raw::{c_int, c_void};
use std::rc::Rc;
use x11_dl::xlib;

const ACCUM_CHANNEL_SIZE: c_int = 8;

pub(crate) struct GlxConfig {
    pub(crate) display: Rc<GlxDisplayShared>,
    pub(crate) glx_fb_config: GLXFBConfig,
    pub(crate) visual_id: xlib::VisualID,
    pub(crate) attributes: ConfigAttributes,
}

impl GlxConfig {
    pub(crate) fn choose(display: &Rc<GlxDisplayShared>, attributes: &ConfigAttributes)
                         -> Result<GlxConfig, Error> {
        let config_attributes = glx_config_attributes(attributes);
        let glx = &display.library.glx;
        let xlib = &display.x.xlib;
        unsafe {
            let mut config_count = 0;
            let configs = glx.ChooseFBConfig(display.glx_display(),
                                             display.x.screen(),
                                             config_attributes.as_ptr(),
                                             &mut config_count);
            if configs.is_null() || config_count == 0 {
                if !configs.is_null() {
                    (xlib.XFree)(configs as *mut c_void);
                }
                return Err(Error::unknown("glXChooseFBConfig found no matching configuration"));
            }
            let glx_fb_config = *configs;
            (xlib.XFree)(configs as *mut c_void);

            let visual_info = glx.GetVisualFromFBConfig(display.glx_display(), glx_fb_config);
            if visual_info.is_null() {
                return Err(Error::unknown("glXGetVisualFromFBConfig failed"));
            }
            let visual_id = (*visual_info).visualid as xlib::VisualID;
            (xlib.XFree)(visual_info as *mut c_void);

            Ok(GlxConfig {
                display: display.clone(),
                glx_fb_config,
                visual_id,
                attributes: attributes.clone(),
            })
        }
    }
}

fn size_or_dont_care(size: Option<u32>) -> c_int {
    size.map_or(glx::DONT_CARE as c_int, |size| size as c_int)
}

/// The `glXChooseFBConfig()` list for `attributes`, ending in `None`.
pub(crate) fn glx_config_attributes(attributes: &ConfigAttributes) -> Vec<c_int> {
    let accum_size = if attributes.accum_buffer { ACCUM_CHANNEL_SIZE } else { 0 };
    vec![
        glx::X_RENDERABLE as c_int,     xlib::True,
        glx::DRAWABLE_TYPE as c_int,    glx::WINDOW_BIT as c_int,
        glx::RENDER_TYPE as c_int,      glx::RGBA_BIT as c_int,
        glx::RED_SIZE as c_int,         size_or_dont_care(attributes.red_size),
        glx::GREEN_SIZE as c_int,       size_or_dont_care(attributes.green_size),
        glx::BLUE_SIZE as c_int,        size_or_dont_care(attributes.blue_size),
        glx::ALPHA_SIZE as c_int,       size_or_dont_care(attributes.alpha_size),
        glx::DEPTH_SIZE as c_int,       size_or_dont_care(attributes.depth_size),
        glx::STENCIL_SIZE as c_int,     size_or_dont_care(attributes.stencil_size),
        glx::SAMPLE_BUFFERS as c_int,   attributes.sample_buffers as c_int,
        glx::SAMPLES as c_int,          attributes.samples as c_int,
        glx::DOUBLEBUFFER as c_int,     attributes.double_buffered as c_int,
        glx::ACCUM_RED_SIZE as c_int,   accum_size,
        glx::ACCUM_GREEN_SIZE as c_int, accum_size,
        glx::ACCUM_BLUE_SIZE as c_int,  accum_size,
        glx::ACCUM_ALPHA_SIZE as c_int, accum_size,
        0,
    ]
}

impl ConfigBackend for GlxConfig {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn create_context(&self, shared: Option<&dyn ContextBackend>)
                      -> Result<Box<dyn ContextBackend>, Error> {
        let shared = match shared {
            Some(shared) => Some(platform::downcast::<GlxContext>(shared.as_any(), "context")?),
            None => None,
        };
        Ok(Box::new(GlxContext::new(self, shared)?))
    }

    fn create_window(&self, attributes: &WindowAttributes)
                     -> Result<Box<dyn WindowBackend>, Error> {
        Ok(Box::new(GlxWindow::new(self, attributes)?))
    }

    fn native(&self) -> NativeConfig {
        NativeConfig::Glx {
            xlib_display: self.display.x.display_ptr(),
            glx_fbconfig: self.glx_fb_config as *const c_void,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::ContextApi;

    fn value_of(list: &[c_int], key: u32) -> Option<c_int> {
        list.chunks(2).find(|pair| pair[0] == key as c_int).map(|pair| pair[1])
    }

    #[test]
    fn accumulation_buffers_are_requested_per_channel() {
        let attributes = ConfigAttributes::new(ContextApi::OpenGl).accum_buffer(true);
        let list = glx_config_attributes(&attributes);
        assert_eq!(value_of(&list, glx::ACCUM_RED_SIZE), Some(ACCUM_CHANNEL_SIZE));
        assert_eq!(value_of(&list, glx::ACCUM_ALPHA_SIZE), Some(ACCUM_CHANNEL_SIZE));
        assert_eq!(value_of(&list, glx::DOUBLEBUFFER), Some(1));
        assert_eq!(list.last(), Some(&0));

        let list = glx_config_attributes(&ConfigAttributes::new(ContextApi::OpenGl));
        assert_eq!(value_of(&list, glx::ACCUM_RED_SIZE), Some(0));
        assert_eq!(value_of(&list, glx::RED_SIZE), Some(glx::DONT_CARE as c_int));
    }
}
