// waffle/src/enums.rs
//
//! The numeric attribute vocabulary and its typed views.

use crate::error::Error;

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A raw attribute key or value, as found in attribute lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Enum(pub i32);

impl Enum {
    pub const DONT_CARE: Enum = Enum(-1);
    pub const NONE: Enum = Enum(0);

    pub const PLATFORM: Enum = Enum(0x0010);
    pub const PLATFORM_ANDROID: Enum = Enum(0x0011);
    pub const PLATFORM_CGL: Enum = Enum(0x0012);
    pub const PLATFORM_GLX: Enum = Enum(0x0013);
    pub const PLATFORM_WAYLAND: Enum = Enum(0x0014);
    pub const PLATFORM_X11_EGL: Enum = Enum(0x0015);
    pub const PLATFORM_GBM: Enum = Enum(0x0016);
    pub const PLATFORM_WGL: Enum = Enum(0x0017);
    pub const PLATFORM_NACL: Enum = Enum(0x0018);
    pub const PLATFORM_SURFACELESS_EGL: Enum = Enum(0x0019);

    pub const RED_SIZE: Enum = Enum(0x0201);
    pub const GREEN_SIZE: Enum = Enum(0x0202);
    pub const BLUE_SIZE: Enum = Enum(0x0203);
    pub const ALPHA_SIZE: Enum = Enum(0x0204);
    pub const DEPTH_SIZE: Enum = Enum(0x0205);
    pub const STENCIL_SIZE: Enum = Enum(0x0206);
    pub const SAMPLE_BUFFERS: Enum = Enum(0x0207);
    pub const SAMPLES: Enum = Enum(0x0208);
    pub const DOUBLE_BUFFERED: Enum = Enum(0x0209);

    pub const CONTEXT_API: Enum = Enum(0x020a);
    pub const CONTEXT_OPENGL: Enum = Enum(0x020b);
    pub const CONTEXT_OPENGL_ES1: Enum = Enum(0x020c);
    pub const CONTEXT_OPENGL_ES2: Enum = Enum(0x020d);
    pub const CONTEXT_MAJOR_VERSION: Enum = Enum(0x020e);
    pub const CONTEXT_MINOR_VERSION: Enum = Enum(0x020f);
    pub const CONTEXT_PROFILE: Enum = Enum(0x0210);
    pub const CONTEXT_CORE_PROFILE: Enum = Enum(0x0211);
    pub const CONTEXT_COMPATIBILITY_PROFILE: Enum = Enum(0x0212);
    pub const ACCUM_BUFFER: Enum = Enum(0x0213);
    pub const CONTEXT_OPENGL_ES3: Enum = Enum(0x0214);
    pub const CONTEXT_FORWARD_COMPATIBLE: Enum = Enum(0x0215);
    pub const CONTEXT_DEBUG: Enum = Enum(0x0216);
    pub const CONTEXT_ROBUST_ACCESS: Enum = Enum(0x0217);

    pub const DL_OPENGL: Enum = Enum(0x0301);
    pub const DL_OPENGL_ES1: Enum = Enum(0x0302);
    pub const DL_OPENGL_ES2: Enum = Enum(0x0303);
    pub const DL_OPENGL_ES3: Enum = Enum(0x0304);

    pub const WINDOW_WIDTH: Enum = Enum(0x0310);
    pub const WINDOW_HEIGHT: Enum = Enum(0x0311);
    pub const WINDOW_FULLSCREEN: Enum = Enum(0x0312);

    /// The raw value.
    #[inline]
    pub fn raw(self) -> i32 {
        self.0
    }

    /// The symbolic name of this value, or `None` if it is not part of the vocabulary.
    #[inline]
    pub fn name(self) -> Option<&'static str> {
        enum_to_string(self.0)
    }
}

impl Display for Enum {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "0x{:x}", self.0),
        }
    }
}

impl From<Enum> for i32 {
    #[inline]
    fn from(e: Enum) -> i32 {
        e.0
    }
}

/// Returns the symbolic name of a raw enum value, or `None` if the value is unknown.
pub fn enum_to_string(value: i32) -> Option<&'static str> {
    let name = match Enum(value) {
        Enum::DONT_CARE => "WAFFLE_DONT_CARE",
        Enum::NONE => "WAFFLE_NONE",
        Enum::PLATFORM => "WAFFLE_PLATFORM",
        Enum::PLATFORM_ANDROID => "WAFFLE_PLATFORM_ANDROID",
        Enum::PLATFORM_CGL => "WAFFLE_PLATFORM_CGL",
        Enum::PLATFORM_GLX => "WAFFLE_PLATFORM_GLX",
        Enum::PLATFORM_WAYLAND => "WAFFLE_PLATFORM_WAYLAND",
        Enum::PLATFORM_X11_EGL => "WAFFLE_PLATFORM_X11_EGL",
        Enum::PLATFORM_GBM => "WAFFLE_PLATFORM_GBM",
        Enum::PLATFORM_WGL => "WAFFLE_PLATFORM_WGL",
        Enum::PLATFORM_NACL => "WAFFLE_PLATFORM_NACL",
        Enum::PLATFORM_SURFACELESS_EGL => "WAFFLE_PLATFORM_SURFACELESS_EGL",
        Enum::RED_SIZE => "WAFFLE_RED_SIZE",
        Enum::GREEN_SIZE => "WAFFLE_GREEN_SIZE",
        Enum::BLUE_SIZE => "WAFFLE_BLUE_SIZE",
        Enum::ALPHA_SIZE => "WAFFLE_ALPHA_SIZE",
        Enum::DEPTH_SIZE => "WAFFLE_DEPTH_SIZE",
        Enum::STENCIL_SIZE => "WAFFLE_STENCIL_SIZE",
        Enum::SAMPLE_BUFFERS => "WAFFLE_SAMPLE_BUFFERS",
        Enum::SAMPLES => "WAFFLE_SAMPLES",
        Enum::DOUBLE_BUFFERED => "WAFFLE_DOUBLE_BUFFERED",
        Enum::CONTEXT_API => "WAFFLE_CONTEXT_API",
        Enum::CONTEXT_OPENGL => "WAFFLE_CONTEXT_OPENGL",
        Enum::CONTEXT_OPENGL_ES1 => "WAFFLE_CONTEXT_OPENGL_ES1",
        Enum::CONTEXT_OPENGL_ES2 => "WAFFLE_CONTEXT_OPENGL_ES2",
        Enum::CONTEXT_OPENGL_ES3 => "WAFFLE_CONTEXT_OPENGL_ES3",
        Enum::CONTEXT_MAJOR_VERSION => "WAFFLE_CONTEXT_MAJOR_VERSION",
        Enum::CONTEXT_MINOR_VERSION => "WAFFLE_CONTEXT_MINOR_VERSION",
        Enum::CONTEXT_PROFILE => "WAFFLE_CONTEXT_PROFILE",
        Enum::CONTEXT_CORE_PROFILE => "WAFFLE_CONTEXT_CORE_PROFILE",
        Enum::CONTEXT_COMPATIBILITY_PROFILE => "WAFFLE_CONTEXT_COMPATIBILITY_PROFILE",
        Enum::CONTEXT_FORWARD_COMPATIBLE => "WAFFLE_CONTEXT_FORWARD_COMPATIBLE",
        Enum::CONTEXT_DEBUG => "WAFFLE_CONTEXT_DEBUG",
        Enum::CONTEXT_ROBUST_ACCESS => "WAFFLE_CONTEXT_ROBUST_ACCESS",
        Enum::ACCUM_BUFFER => "WAFFLE_ACCUM_BUFFER",
        Enum::DL_OPENGL => "WAFFLE_DL_OPENGL",
        Enum::DL_OPENGL_ES1 => "WAFFLE_DL_OPENGL_ES1",
        Enum::DL_OPENGL_ES2 => "WAFFLE_DL_OPENGL_ES2",
        Enum::DL_OPENGL_ES3 => "WAFFLE_DL_OPENGL_ES3",
        Enum::WINDOW_WIDTH => "WAFFLE_WINDOW_WIDTH",
        Enum::WINDOW_HEIGHT => "WAFFLE_WINDOW_HEIGHT",
        Enum::WINDOW_FULLSCREEN => "WAFFLE_WINDOW_FULLSCREEN",
        _ => return None,
    };
    Some(name)
}

/// Generates the conversions shared by the typed views over `Enum`.
macro_rules! enum_view {
    ($ty:ident, $what:expr, { $($variant:ident => $value:ident, $short:expr;)* }) => {
        impl $ty {
            /// The raw enum value of this variant.
            #[inline]
            pub fn to_enum(self) -> Enum {
                match self {
                    $($ty::$variant => Enum::$value,)*
                }
            }

            /// The short lowercase name of this variant, as accepted by `from_str()`.
            pub fn short_name(self) -> &'static str {
                match self {
                    $($ty::$variant => $short,)*
                }
            }

            /// Every variant, in declaration order.
            pub fn all() -> &'static [$ty] {
                &[$($ty::$variant,)*]
            }
        }

        impl TryFrom<i32> for $ty {
            type Error = Error;

            fn try_from(value: i32) -> Result<$ty, Error> {
                match Enum(value) {
                    $(Enum::$value => Ok($ty::$variant),)*
                    other => Err(Error::bad_attribute(format!(
                        "{} is not a valid {}", other, $what
                    ))),
                }
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<$ty, Error> {
                let lower = s.to_ascii_lowercase();
                $(if lower == $short || Some(s) == Enum::$value.name() {
                    return Ok($ty::$variant);
                })*
                Err(Error::bad_parameter(format!("'{}' is not a valid {}", s, $what)))
            }
        }

        impl Display for $ty {
            fn fmt(&self, f: &mut Formatter) -> fmt::Result {
                Display::fmt(&self.to_enum(), f)
            }
        }
    }
}

/// A native windowing system and GL binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    /// EGL on Android.
    Android,
    /// CGL on macOS.
    Cgl,
    /// GLX on X11.
    Glx,
    /// EGL on Wayland.
    Wayland,
    /// EGL on X11.
    X11Egl,
    /// EGL on GBM. Enumerated only.
    Gbm,
    /// WGL on Windows. Enumerated only.
    Wgl,
    /// Native Client. Enumerated only.
    Nacl,
    /// EGL with `EGL_MESA_platform_surfaceless`.
    SurfacelessEgl,
}

enum_view!(Platform, "platform", {
    Android => PLATFORM_ANDROID, "android";
    Cgl => PLATFORM_CGL, "cgl";
    Glx => PLATFORM_GLX, "glx";
    Wayland => PLATFORM_WAYLAND, "wayland";
    X11Egl => PLATFORM_X11_EGL, "x11_egl";
    Gbm => PLATFORM_GBM, "gbm";
    Wgl => PLATFORM_WGL, "wgl";
    Nacl => PLATFORM_NACL, "nacl";
    SurfacelessEgl => PLATFORM_SURFACELESS_EGL, "surfaceless_egl";
});

impl Platform {
    /// Returns true if this platform's backend was compiled into this build.
    pub fn is_built(self) -> bool {
        match self {
            Platform::Android => cfg!(android),
            Platform::Cgl => cfg!(cgl),
            Platform::Glx => cfg!(glx),
            Platform::Wayland => cfg!(wayland),
            Platform::X11Egl => cfg!(x11_egl),
            Platform::SurfacelessEgl => cfg!(surfaceless_egl),
            Platform::Gbm | Platform::Wgl | Platform::Nacl => false,
        }
    }

    /// Every platform compiled into this build.
    pub fn built() -> Vec<Platform> {
        Platform::all()
            .iter()
            .copied()
            .filter(|p| p.is_built())
            .collect()
    }
}

/// The rendering API of a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContextApi {
    /// Desktop OpenGL.
    OpenGl,
    /// OpenGL ES 1.x.
    OpenGlEs1,
    /// OpenGL ES 2.x.
    OpenGlEs2,
    /// OpenGL ES 3.x.
    OpenGlEs3,
}

enum_view!(ContextApi, "context API", {
    OpenGl => CONTEXT_OPENGL, "gl";
    OpenGlEs1 => CONTEXT_OPENGL_ES1, "gles1";
    OpenGlEs2 => CONTEXT_OPENGL_ES2, "gles2";
    OpenGlEs3 => CONTEXT_OPENGL_ES3, "gles3";
});

impl ContextApi {
    /// True for the OpenGL ES APIs.
    #[inline]
    pub fn is_gles(self) -> bool {
        self != ContextApi::OpenGl
    }

    /// The client library that exports this API's entry points.
    #[inline]
    pub fn dl_library(self) -> DlLibrary {
        match self {
            ContextApi::OpenGl => DlLibrary::OpenGl,
            ContextApi::OpenGlEs1 => DlLibrary::OpenGlEs1,
            ContextApi::OpenGlEs2 => DlLibrary::OpenGlEs2,
            ContextApi::OpenGlEs3 => DlLibrary::OpenGlEs3,
        }
    }
}

/// The profile of a desktop OpenGL 3.2+ context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContextProfile {
    Core,
    Compatibility,
}

enum_view!(ContextProfile, "context profile", {
    Core => CONTEXT_CORE_PROFILE, "core";
    Compatibility => CONTEXT_COMPATIBILITY_PROFILE, "compat";
});

/// A client library whose symbols can be looked up with `dl_sym()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DlLibrary {
    OpenGl,
    OpenGlEs1,
    OpenGlEs2,
    OpenGlEs3,
}

enum_view!(DlLibrary, "dl library", {
    OpenGl => DL_OPENGL, "gl";
    OpenGlEs1 => DL_OPENGL_ES1, "gles1";
    OpenGlEs2 => DL_OPENGL_ES2, "gles2";
    OpenGlEs3 => DL_OPENGL_ES3, "gles3";
});

impl DlLibrary {
    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            DlLibrary::OpenGl => 0,
            DlLibrary::OpenGlEs1 => 1,
            DlLibrary::OpenGlEs2 => 2,
            DlLibrary::OpenGlEs3 => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn names_are_the_symbolic_constants() {
        assert_eq!(enum_to_string(0x0013), Some("WAFFLE_PLATFORM_GLX"));
        assert_eq!(enum_to_string(-1), Some("WAFFLE_DONT_CARE"));
        assert_eq!(enum_to_string(0x0214), Some("WAFFLE_CONTEXT_OPENGL_ES3"));
        assert_eq!(enum_to_string(0x0312), Some("WAFFLE_WINDOW_FULLSCREEN"));
        assert_eq!(enum_to_string(0x0400), None);
        assert_eq!(Enum(0x0400).to_string(), "0x400");
        assert_eq!(Enum::SAMPLES.to_string(), "WAFFLE_SAMPLES");
    }

    #[test]
    fn typed_views_convert_from_raw_values() {
        assert_eq!(Platform::try_from(0x0014).unwrap(), Platform::Wayland);
        assert_eq!(ContextApi::try_from(0x020d).unwrap(), ContextApi::OpenGlEs2);
        assert_eq!(
            ContextProfile::try_from(0x0212).unwrap(),
            ContextProfile::Compatibility
        );
        assert_eq!(DlLibrary::try_from(0x0304).unwrap(), DlLibrary::OpenGlEs3);

        let err = Platform::try_from(Enum::CONTEXT_API.raw()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadAttribute);
        assert!(err.message().contains("WAFFLE_CONTEXT_API"));
    }

    #[test]
    fn typed_views_parse_short_and_symbolic_names() {
        assert_eq!("x11_egl".parse::<Platform>().unwrap(), Platform::X11Egl);
        assert_eq!("GLX".parse::<Platform>().unwrap(), Platform::Glx);
        assert_eq!(
            "WAFFLE_PLATFORM_SURFACELESS_EGL".parse::<Platform>().unwrap(),
            Platform::SurfacelessEgl
        );
        assert_eq!("gles1".parse::<ContextApi>().unwrap(), ContextApi::OpenGlEs1);
        assert_eq!(
            "core".parse::<ContextProfile>().unwrap(),
            ContextProfile::Core
        );
        assert_eq!(
            "directx".parse::<Platform>().unwrap_err().code(),
            ErrorCode::BadParameter
        );
    }

    #[test]
    fn every_view_variant_round_trips() {
        for &platform in Platform::all() {
            assert_eq!(Platform::try_from(platform.to_enum().raw()).unwrap(), platform);
            assert_eq!(platform.short_name().parse::<Platform>().unwrap(), platform);
        }
        for &api in ContextApi::all() {
            assert_eq!(api.dl_library().to_enum().raw() - 0x0301, api.dl_library().index() as i32);
        }
    }

    #[test]
    fn unsupported_platforms_are_never_built() {
        assert!(!Platform::Nacl.is_built());
        assert!(!Platform::Gbm.is_built());
        assert!(!Platform::Wgl.is_built());
        assert!(!Platform::built().contains(&Platform::Nacl));
    }
}
