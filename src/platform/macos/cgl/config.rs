// waffle/src/platform/macos/cgl/config.rs
//
//! CGL pixel formats.

use super::context::CglContext;
use super::error::{cgl_error, kCGLNoError};
use super::ffi::{kCGLOGLPVersion_3_2_Core, kCGLOGLPVersion_GL4_Core, kCGLOGLPVersion_Legacy};
use super::window::CglWindow;
use crate::config_attributes::{ConfigAttributes, ContextFlags};
use crate::enums::{ContextApi, ContextProfile};
use crate::error::Error;
use crate::info::GLVersion;
use crate::native::NativeConfig;
use crate::platform::{self, ConfigBackend, ContextBackend, WindowBackend};
use crate::window_attributes::WindowAttributes;

use cgl::{kCGLPFAAccumSize, kCGLPFAAlphaSize, kCGLPFAColorSize, kCGLPFADepthSize};
use cgl::{kCGLPFADoubleBuffer, kCGLPFAMultisample, kCGLPFAOpenGLProfile};
use cgl::{kCGLPFASampleBuffers, kCGLPFASamples, kCGLPFAStencilSize};
use cgl::{CGLChoosePixelFormat, CGLPixelFormatAttribute, CGLPixelFormatObj};
use cgl::CGLReleasePixelFormat;
use std::any::Any;
use std::ptr;

const ACCUM_SIZE: CGLPixelFormatAttribute = 32;

pub(crate) struct CglConfig {
    pub(crate) cgl_pixel_format: CGLPixelFormatObj,
    pub(crate) attributes: ConfigAttributes,
}

impl Drop for CglConfig {
    fn drop(&mut self) {
        unsafe { CGLReleasePixelFormat(self.cgl_pixel_format) }
    }
}

impl CglConfig {
    pub(crate) fn choose(attributes: &ConfigAttributes) -> Result<CglConfig, Error> {
        let pixel_format_attributes = cgl_pixel_format_attributes(attributes)?;
        unsafe {
            let (mut cgl_pixel_format, mut cgl_pixel_format_count) = (ptr::null_mut(), 0);
            let err = CGLChoosePixelFormat(pixel_format_attributes.as_ptr(),
                                           &mut cgl_pixel_format,
                                           &mut cgl_pixel_format_count);
            if err != kCGLNoError {
                return Err(cgl_error("CGLChoosePixelFormat", err));
            }
            if cgl_pixel_format.is_null() || cgl_pixel_format_count == 0 {
                return Err(Error::unknown("CGLChoosePixelFormat found no matching pixel format"));
            }
            Ok(CglConfig { cgl_pixel_format, attributes: attributes.clone() })
        }
    }
}

/// Picks the `kCGLPFAOpenGLProfile` for the requested version.
///
/// macOS offers a legacy 2.1 profile, a 3.2 core profile and a 4.1 core profile; nothing else.
fn cgl_profile(attributes: &ConfigAttributes) -> Result<CGLPixelFormatAttribute, Error> {
    let version = attributes.context_version;
    if attributes.context_api != ContextApi::OpenGl {
        return Err(Error::unsupported(format!("CGL does not support {}", attributes.context_api)));
    }
    if version < GLVersion::new(3, 0) {
        return Ok(kCGLOGLPVersion_Legacy);
    }
    if version < GLVersion::new(3, 2) {
        return Err(Error::unsupported(format!(
            "CGL cannot create OpenGL {} contexts; request 3.2 or later",
            version
        )));
    }
    if attributes.resolved_profile() == Some(ContextProfile::Compatibility) {
        return Err(Error::unsupported(
            "CGL supports only the core profile for OpenGL 3.2 and later",
        ));
    }
    if version.major >= 4 {
        Ok(kCGLOGLPVersion_GL4_Core)
    } else {
        Ok(kCGLOGLPVersion_3_2_Core)
    }
}

/// The `CGLChoosePixelFormat()` list for `attributes`, ending in zero.
pub(crate) fn cgl_pixel_format_attributes(attributes: &ConfigAttributes)
                                          -> Result<Vec<CGLPixelFormatAttribute>, Error> {
    let profile = cgl_profile(attributes)?;
    if attributes.context_flags.intersects(ContextFlags::DEBUG | ContextFlags::ROBUST_ACCESS) {
        return Err(Error::unsupported("CGL does not support debug or robust contexts"));
    }

    let color_size = [attributes.red_size, attributes.green_size, attributes.blue_size]
        .iter()
        .map(|size| size.unwrap_or(0))
        .sum::<u32>();

    let mut list = vec![
        kCGLPFAOpenGLProfile, profile,
        kCGLPFAColorSize,     color_size as CGLPixelFormatAttribute,
        kCGLPFAAlphaSize,     attributes.alpha_size.unwrap_or(0) as CGLPixelFormatAttribute,
        kCGLPFADepthSize,     attributes.depth_size.unwrap_or(0) as CGLPixelFormatAttribute,
        kCGLPFAStencilSize,   attributes.stencil_size.unwrap_or(0) as CGLPixelFormatAttribute,
    ];
    if attributes.sample_buffers {
        list.extend_from_slice(&[
            kCGLPFAMultisample,
            kCGLPFASampleBuffers, 1,
            kCGLPFASamples,       attributes.samples as CGLPixelFormatAttribute,
        ]);
    }
    if attributes.double_buffered {
        list.push(kCGLPFADoubleBuffer);
    }
    if attributes.accum_buffer {
        list.extend_from_slice(&[kCGLPFAAccumSize, ACCUM_SIZE]);
    }
    list.push(0);
    Ok(list)
}

impl ConfigBackend for CglConfig {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn create_context(&self, shared: Option<&dyn ContextBackend>)
                      -> Result<Box<dyn ContextBackend>, Error> {
        let shared = match shared {
            Some(shared) => Some(platform::downcast::<CglContext>(shared.as_any(), "context")?),
            None => None,
        };
        Ok(Box::new(CglContext::new(self, shared)?))
    }

    fn create_window(&self, attributes: &WindowAttributes)
                     -> Result<Box<dyn WindowBackend>, Error> {
        Ok(Box::new(CglWindow::new(attributes)?))
    }

    #[inline]
    fn native(&self) -> NativeConfig {
        NativeConfig::Cgl { cgl_pixel_format: self.cgl_pixel_format }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn profile_of(attributes: ConfigAttributes) -> Result<CGLPixelFormatAttribute, ErrorCode> {
        cgl_pixel_format_attributes(&attributes).map(|list| list[1]).map_err(|err| err.code())
    }

    #[test]
    fn versions_map_onto_the_three_profiles() {
        let gl = ConfigAttributes::new(ContextApi::OpenGl);
        assert_eq!(profile_of(gl.clone()), Ok(kCGLOGLPVersion_Legacy));
        assert_eq!(profile_of(gl.clone().version(2, 1)), Ok(kCGLOGLPVersion_Legacy));
        assert_eq!(profile_of(gl.clone().version(3, 1)), Err(ErrorCode::UnsupportedOnPlatform));
        assert_eq!(profile_of(gl.clone().version(3, 2)), Ok(kCGLOGLPVersion_3_2_Core));
        assert_eq!(profile_of(gl.clone().version(4, 1)), Ok(kCGLOGLPVersion_GL4_Core));
        assert_eq!(profile_of(gl.version(3, 3).profile(ContextProfile::Compatibility)),
                   Err(ErrorCode::UnsupportedOnPlatform));
    }

    #[test]
    fn gles_and_debug_contexts_are_unsupported() {
        assert_eq!(profile_of(ConfigAttributes::new(ContextApi::OpenGlEs2)),
                   Err(ErrorCode::UnsupportedOnPlatform));
        let debug = ConfigAttributes::new(ContextApi::OpenGl).flags(ContextFlags::DEBUG);
        assert_eq!(profile_of(debug), Err(ErrorCode::UnsupportedOnPlatform));
    }
}
