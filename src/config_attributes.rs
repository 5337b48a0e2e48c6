// waffle/src/config_attributes.rs
//
//! The attributes a framebuffer configuration and its contexts are chosen with.

use crate::attrib_list::AttribList;
use crate::enums::{ContextApi, ContextProfile, Enum};
use crate::error::Error;
use crate::info::GLVersion;

use bitflags::bitflags;

bitflags! {
    /// Optional context creation flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ContextFlags: u8 {
        /// Remove deprecated functionality. Desktop OpenGL 3.0 and later only.
        const FORWARD_COMPATIBLE = 0x01;
        /// Request a debug context.
        const DEBUG              = 0x02;
        /// Request robust buffer access.
        const ROBUST_ACCESS      = 0x04;
    }
}

/// Describes the context and framebuffer that `Config::choose()` looks for.
///
/// Sizes of `None` mean "don't care".
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigAttributes {
    pub context_api: ContextApi,
    pub context_version: GLVersion,
    /// `None` selects the default: core for desktop OpenGL 3.2 and later, no profile otherwise.
    pub context_profile: Option<ContextProfile>,
    pub context_flags: ContextFlags,
    pub red_size: Option<u32>,
    pub green_size: Option<u32>,
    pub blue_size: Option<u32>,
    pub alpha_size: Option<u32>,
    pub depth_size: Option<u32>,
    pub stencil_size: Option<u32>,
    pub sample_buffers: bool,
    pub samples: u32,
    pub double_buffered: bool,
    pub accum_buffer: bool,
}

const CONFIG_KEYS: [Enum; 17] = [
    Enum::CONTEXT_API,
    Enum::CONTEXT_MAJOR_VERSION,
    Enum::CONTEXT_MINOR_VERSION,
    Enum::CONTEXT_PROFILE,
    Enum::CONTEXT_FORWARD_COMPATIBLE,
    Enum::CONTEXT_DEBUG,
    Enum::CONTEXT_ROBUST_ACCESS,
    Enum::RED_SIZE,
    Enum::GREEN_SIZE,
    Enum::BLUE_SIZE,
    Enum::ALPHA_SIZE,
    Enum::DEPTH_SIZE,
    Enum::STENCIL_SIZE,
    Enum::SAMPLE_BUFFERS,
    Enum::SAMPLES,
    Enum::DOUBLE_BUFFERED,
    Enum::ACCUM_BUFFER,
];

impl ConfigAttributes {
    /// Attributes for `api` with every other field at its default.
    pub fn new(api: ContextApi) -> ConfigAttributes {
        ConfigAttributes {
            context_api: api,
            context_version: default_version(api),
            context_profile: None,
            context_flags: ContextFlags::empty(),
            red_size: None,
            green_size: None,
            blue_size: None,
            alpha_size: None,
            depth_size: None,
            stencil_size: None,
            sample_buffers: false,
            samples: 0,
            double_buffered: true,
            accum_buffer: false,
        }
    }

    #[inline]
    pub fn version(mut self, major: u8, minor: u8) -> ConfigAttributes {
        self.context_version = GLVersion::new(major, minor);
        self
    }

    #[inline]
    pub fn profile(mut self, profile: ContextProfile) -> ConfigAttributes {
        self.context_profile = Some(profile);
        self
    }

    #[inline]
    pub fn flags(mut self, flags: ContextFlags) -> ConfigAttributes {
        self.context_flags = flags;
        self
    }

    /// Sets the red, green, blue and alpha sizes at once.
    #[inline]
    pub fn rgba_sizes(mut self, red: u32, green: u32, blue: u32, alpha: u32) -> ConfigAttributes {
        self.red_size = Some(red);
        self.green_size = Some(green);
        self.blue_size = Some(blue);
        self.alpha_size = Some(alpha);
        self
    }

    #[inline]
    pub fn depth_size(mut self, size: u32) -> ConfigAttributes {
        self.depth_size = Some(size);
        self
    }

    #[inline]
    pub fn stencil_size(mut self, size: u32) -> ConfigAttributes {
        self.stencil_size = Some(size);
        self
    }

    /// Requests `samples` samples per pixel. Zero disables multisampling.
    #[inline]
    pub fn multisample(mut self, samples: u32) -> ConfigAttributes {
        self.sample_buffers = samples > 0;
        self.samples = samples;
        self
    }

    #[inline]
    pub fn double_buffered(mut self, double_buffered: bool) -> ConfigAttributes {
        self.double_buffered = double_buffered;
        self
    }

    #[inline]
    pub fn accum_buffer(mut self, accum_buffer: bool) -> ConfigAttributes {
        self.accum_buffer = accum_buffer;
        self
    }

    /// Parses and validates a `[key, value, ..., NONE]` attribute list.
    pub fn from_attrib_list(attrib_list: &[i32]) -> Result<ConfigAttributes, Error> {
        let list = AttribList::new(attrib_list)?;
        list.check_keys(&CONFIG_KEYS)?;

        let api = match list.get(Enum::CONTEXT_API) {
            Some(value) => ContextApi::try_from(value)?,
            None => {
                return Err(Error::bad_attribute(
                    "required attribute WAFFLE_CONTEXT_API is missing",
                ))
            }
        };

        let mut attrs = ConfigAttributes::new(api);

        let default = default_version(api);
        let major = version_component(&list, Enum::CONTEXT_MAJOR_VERSION, default.major)?;
        let minor = version_component(&list, Enum::CONTEXT_MINOR_VERSION, default.minor)?;
        attrs.context_version = GLVersion::new(major, minor);

        attrs.context_profile = match list.get(Enum::CONTEXT_PROFILE) {
            None | Some(-1) => None,
            Some(value) if value == Enum::NONE.raw() => None,
            Some(value) => Some(ContextProfile::try_from(value)?),
        };
        if list.get(Enum::CONTEXT_PROFILE) == Some(Enum::NONE.raw()) && attrs.is_gl_at_least(3, 2)
        {
            return Err(Error::bad_attribute(
                "for OpenGL >= 3.2, WAFFLE_CONTEXT_PROFILE must be \
                 WAFFLE_CONTEXT_CORE_PROFILE or WAFFLE_CONTEXT_COMPATIBILITY_PROFILE",
            ));
        }

        let mut flags = ContextFlags::empty();
        flags.set(
            ContextFlags::FORWARD_COMPATIBLE,
            list.get_bool(Enum::CONTEXT_FORWARD_COMPATIBLE, false)?,
        );
        flags.set(ContextFlags::DEBUG, list.get_bool(Enum::CONTEXT_DEBUG, false)?);
        flags.set(
            ContextFlags::ROBUST_ACCESS,
            list.get_bool(Enum::CONTEXT_ROBUST_ACCESS, false)?,
        );
        attrs.context_flags = flags;

        attrs.red_size = list.get_size(Enum::RED_SIZE)?;
        attrs.green_size = list.get_size(Enum::GREEN_SIZE)?;
        attrs.blue_size = list.get_size(Enum::BLUE_SIZE)?;
        attrs.alpha_size = list.get_size(Enum::ALPHA_SIZE)?;
        attrs.depth_size = list.get_size(Enum::DEPTH_SIZE)?;
        attrs.stencil_size = list.get_size(Enum::STENCIL_SIZE)?;
        attrs.sample_buffers = list.get_bool(Enum::SAMPLE_BUFFERS, false)?;
        attrs.samples = list.get_size(Enum::SAMPLES)?.unwrap_or(0);
        attrs.double_buffered = list.get_bool(Enum::DOUBLE_BUFFERED, true)?;
        attrs.accum_buffer = list.get_bool(Enum::ACCUM_BUFFER, false)?;

        attrs.validate()?;
        Ok(attrs)
    }

    /// Checks the API, version, profile and flags for consistency.
    pub fn validate(&self) -> Result<(), Error> {
        let GLVersion { major, minor } = self.context_version;
        match self.context_api {
            ContextApi::OpenGl => {
                if major < 1 {
                    return Err(Error::bad_attribute(format!(
                        "OpenGL version {}.{} is invalid; the major version must be at least 1",
                        major, minor
                    )));
                }
            }
            ContextApi::OpenGlEs1 => {
                if major != 1 || minor > 1 {
                    return Err(Error::bad_attribute(format!(
                        "for OpenGL ES1, the context version must be 1.0 or 1.1, not {}.{}",
                        major, minor
                    )));
                }
            }
            ContextApi::OpenGlEs2 => {
                if major != 2 {
                    return Err(Error::bad_attribute(format!(
                        "for OpenGL ES2, WAFFLE_CONTEXT_MAJOR_VERSION must be 2, not {}",
                        major
                    )));
                }
            }
            ContextApi::OpenGlEs3 => {
                if major != 3 {
                    return Err(Error::bad_attribute(format!(
                        "for OpenGL ES3, WAFFLE_CONTEXT_MAJOR_VERSION must be 3, not {}",
                        major
                    )));
                }
            }
        }

        if let Some(profile) = self.context_profile {
            if self.context_api.is_gles() {
                return Err(Error::bad_attribute(format!(
                    "{} does not accept a context profile, but {} was requested",
                    self.context_api, profile
                )));
            }
            if !self.is_gl_at_least(3, 2) {
                return Err(Error::bad_attribute(format!(
                    "{} requires OpenGL 3.2 or later, but {}.{} was requested",
                    profile, major, minor
                )));
            }
        }

        if self.context_flags.contains(ContextFlags::FORWARD_COMPATIBLE)
            && !self.is_gl_at_least(3, 0)
        {
            return Err(Error::bad_attribute(
                "WAFFLE_CONTEXT_FORWARD_COMPATIBLE requires desktop OpenGL 3.0 or later",
            ));
        }

        if self.samples > 0 && !self.sample_buffers {
            return Err(Error::bad_attribute(
                "WAFFLE_SAMPLES is nonzero but WAFFLE_SAMPLE_BUFFERS is false",
            ));
        }

        Ok(())
    }

    /// The profile the context will actually be created with.
    pub fn resolved_profile(&self) -> Option<ContextProfile> {
        match self.context_profile {
            Some(profile) => Some(profile),
            None if self.is_gl_at_least(3, 2) => Some(ContextProfile::Core),
            None => None,
        }
    }

    /// True if this requests desktop OpenGL at `major.minor` or later.
    #[inline]
    pub fn is_gl_at_least(&self, major: u8, minor: u8) -> bool {
        self.context_api == ContextApi::OpenGl
            && self.context_version >= GLVersion::new(major, minor)
    }

    /// True if context creation needs more than the bare legacy entry point, i.e. a
    /// `*_create_context` extension.
    pub(crate) fn needs_create_context_ext(&self) -> bool {
        match self.context_api {
            ContextApi::OpenGl => {
                self.context_version != GLVersion::new(1, 0)
                    || self.context_profile.is_some()
                    || !self.context_flags.is_empty()
            }
            // A client version of 1 already yields the newest 1.x context.
            ContextApi::OpenGlEs1 => !self.context_flags.is_empty(),
            ContextApi::OpenGlEs2 => {
                self.context_version.minor != 0 || !self.context_flags.is_empty()
            }
            ContextApi::OpenGlEs3 => true,
        }
    }
}

fn default_version(api: ContextApi) -> GLVersion {
    match api {
        ContextApi::OpenGl | ContextApi::OpenGlEs1 => GLVersion::new(1, 0),
        ContextApi::OpenGlEs2 => GLVersion::new(2, 0),
        ContextApi::OpenGlEs3 => GLVersion::new(3, 0),
    }
}

fn version_component(list: &AttribList, key: Enum, default: u8) -> Result<u8, Error> {
    match list.get(key) {
        None | Some(-1) => Ok(default),
        Some(value) if (0..=i32::from(u8::MAX)).contains(&value) => Ok(value as u8),
        Some(value) => Err(Error::bad_attribute(format!(
            "{} has bad value {}",
            key, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn parse(list: &[i32]) -> Result<ConfigAttributes, Error> {
        ConfigAttributes::from_attrib_list(list)
    }

    fn assert_bad_attribute(list: &[i32]) {
        match parse(list) {
            Err(err) => assert_eq!(err.code(), ErrorCode::BadAttribute, "{}", err),
            Ok(attrs) => panic!("{:?} unexpectedly parsed to {:?}", list, attrs),
        }
    }

    #[test]
    fn context_api_is_required() {
        let err = parse(&[0x0201, 8, 0]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadAttribute);
        assert!(err.message().contains("WAFFLE_CONTEXT_API"));
        assert_bad_attribute(&[]);
        assert_bad_attribute(&[0x020a, 0x0013, 0]);
    }

    #[test]
    fn defaults_follow_the_api() {
        let gl = parse(&[0x020a, 0x020b, 0]).unwrap();
        assert_eq!(gl, ConfigAttributes::new(ContextApi::OpenGl));
        assert_eq!(gl.context_version, GLVersion::new(1, 0));
        assert!(gl.double_buffered);
        assert_eq!(gl.red_size, None);
        assert_eq!(gl.resolved_profile(), None);

        let es2 = parse(&[0x020a, 0x020d]).unwrap();
        assert_eq!(es2.context_version, GLVersion::new(2, 0));
        let es3 = parse(&[0x020a, 0x0214]).unwrap();
        assert_eq!(es3.context_version, GLVersion::new(3, 0));
    }

    #[test]
    fn gl_3_2_defaults_to_core() {
        let attrs = parse(&[0x020a, 0x020b, 0x020e, 3, 0x020f, 2, 0]).unwrap();
        assert_eq!(attrs.context_profile, None);
        assert_eq!(attrs.resolved_profile(), Some(ContextProfile::Core));

        let compat = parse(&[0x020a, 0x020b, 0x020e, 4, 0x020f, 5, 0x0210, 0x0212]).unwrap();
        assert_eq!(compat.resolved_profile(), Some(ContextProfile::Compatibility));

        // An explicit NONE profile is not allowed once profiles exist.
        assert_bad_attribute(&[0x020a, 0x020b, 0x020e, 3, 0x020f, 3, 0x0210, 0]);
    }

    #[test]
    fn profiles_require_gl_3_2() {
        assert_bad_attribute(&[0x020a, 0x020b, 0x020e, 3, 0x020f, 1, 0x0210, 0x0211]);
        assert_bad_attribute(&[0x020a, 0x020d, 0x0210, 0x0211]);
        assert_bad_attribute(&[0x020a, 0x020b, 0x020e, 3, 0x020f, 2, 0x0210, 0x0201]);
    }

    #[test]
    fn es_versions_are_checked() {
        assert!(parse(&[0x020a, 0x020c, 0x020e, 1, 0x020f, 1]).is_ok());
        assert_bad_attribute(&[0x020a, 0x020c, 0x020e, 1, 0x020f, 2]);
        assert_bad_attribute(&[0x020a, 0x020c, 0x020e, 2]);
        assert!(parse(&[0x020a, 0x020d, 0x020e, 2, 0x020f, 1]).is_ok());
        assert_bad_attribute(&[0x020a, 0x020d, 0x020e, 3]);
        assert!(parse(&[0x020a, 0x0214, 0x020e, 3, 0x020f, 2]).is_ok());
        assert_bad_attribute(&[0x020a, 0x0214, 0x020e, 2]);
        assert_bad_attribute(&[0x020a, 0x020b, 0x020e, 0]);
        assert_bad_attribute(&[0x020a, 0x020b, 0x020e, -5]);
    }

    #[test]
    fn forward_compatible_requires_gl_3() {
        assert_bad_attribute(&[0x020a, 0x020b, 0x020e, 2, 0x020f, 1, 0x0215, 1]);
        assert_bad_attribute(&[0x020a, 0x020d, 0x0215, 1]);
        let attrs = parse(&[0x020a, 0x020b, 0x020e, 3, 0x0215, 1, 0x0216, 1]).unwrap();
        assert!(attrs.context_flags.contains(ContextFlags::FORWARD_COMPATIBLE));
        assert!(attrs.context_flags.contains(ContextFlags::DEBUG));
        assert!(!attrs.context_flags.contains(ContextFlags::ROBUST_ACCESS));
    }

    #[test]
    fn framebuffer_attributes_are_parsed() {
        let attrs = parse(&[
            0x020a, 0x020d, 0x0201, 8, 0x0202, 8, 0x0203, 8, 0x0204, -1, 0x0205, 24, 0x0206, 8,
            0x0207, 1, 0x0208, 4, 0x0209, 0, 0x0213, 1, 0,
        ])
        .unwrap();
        assert_eq!(attrs.red_size, Some(8));
        assert_eq!(attrs.alpha_size, None);
        assert_eq!(attrs.depth_size, Some(24));
        assert!(attrs.sample_buffers);
        assert_eq!(attrs.samples, 4);
        assert!(!attrs.double_buffered);
        assert!(attrs.accum_buffer);
    }

    #[test]
    fn samples_require_sample_buffers() {
        assert_bad_attribute(&[0x020a, 0x020b, 0x0208, 4]);
        let built = ConfigAttributes::new(ContextApi::OpenGl).multisample(4);
        assert!(built.validate().is_ok());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert_bad_attribute(&[0x020a, 0x020b, 0x0010, 0x0013]);
        assert_bad_attribute(&[0x020a, 0x020b, 0x0310, 640]);
    }

    #[test]
    fn builder_matches_attrib_list() {
        let built = ConfigAttributes::new(ContextApi::OpenGl)
            .version(4, 5)
            .profile(ContextProfile::Core)
            .flags(ContextFlags::DEBUG)
            .rgba_sizes(8, 8, 8, 8)
            .depth_size(24);
        let parsed = parse(&[
            0x020a, 0x020b, 0x020e, 4, 0x020f, 5, 0x0210, 0x0211, 0x0216, 1, 0x0201, 8, 0x0202,
            8, 0x0203, 8, 0x0204, 8, 0x0205, 24, 0,
        ])
        .unwrap();
        assert_eq!(built, parsed);
    }

    #[test]
    fn create_context_extension_requirements() {
        assert!(!ConfigAttributes::new(ContextApi::OpenGl).needs_create_context_ext());
        assert!(ConfigAttributes::new(ContextApi::OpenGl)
            .version(2, 1)
            .needs_create_context_ext());
        assert!(!ConfigAttributes::new(ContextApi::OpenGlEs2).needs_create_context_ext());
        assert!(!ConfigAttributes::new(ContextApi::OpenGlEs1)
            .version(1, 1)
            .needs_create_context_ext());
        assert!(ConfigAttributes::new(ContextApi::OpenGlEs3).needs_create_context_ext());
        assert!(ConfigAttributes::new(ContextApi::OpenGlEs2)
            .flags(ContextFlags::DEBUG)
            .needs_create_context_ext());
    }
}
