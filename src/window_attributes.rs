// waffle/src/window_attributes.rs
//
//! The attributes a window is created with.

use crate::attrib_list::AttribList;
use crate::enums::Enum;
use crate::error::Error;

use euclid::default::Size2D;

/// The size and mode of a new window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowAttributes {
    /// Ignored for fullscreen windows, which take the size of the screen.
    pub size: Size2D<u32>,
    pub fullscreen: bool,
}

impl WindowAttributes {
    /// A windowed window of the given size.
    #[inline]
    pub fn windowed(width: u32, height: u32) -> WindowAttributes {
        WindowAttributes {
            size: Size2D::new(width, height),
            fullscreen: false,
        }
    }

    /// A window covering the screen.
    #[inline]
    pub fn fullscreen() -> WindowAttributes {
        WindowAttributes {
            size: Size2D::zero(),
            fullscreen: true,
        }
    }

    /// Parses a `[key, value, ..., NONE]` list of `WINDOW_WIDTH`, `WINDOW_HEIGHT` and
    /// `WINDOW_FULLSCREEN`.
    pub fn from_attrib_list(attrib_list: &[i32]) -> Result<WindowAttributes, Error> {
        let list = AttribList::new(attrib_list)?;
        list.check_keys(&[
            Enum::WINDOW_WIDTH,
            Enum::WINDOW_HEIGHT,
            Enum::WINDOW_FULLSCREEN,
        ])?;

        let fullscreen = list.get_bool(Enum::WINDOW_FULLSCREEN, false)?;
        let width = list.get(Enum::WINDOW_WIDTH);
        let height = list.get(Enum::WINDOW_HEIGHT);
        if fullscreen {
            return Ok(WindowAttributes::fullscreen());
        }

        let (width, height) = match (width, height) {
            (Some(width), Some(height)) => (width, height),
            (None, _) => {
                return Err(Error::bad_attribute(
                    "WAFFLE_WINDOW_WIDTH is required unless WAFFLE_WINDOW_FULLSCREEN is true",
                ))
            }
            (_, None) => {
                return Err(Error::bad_attribute(
                    "WAFFLE_WINDOW_HEIGHT is required unless WAFFLE_WINDOW_FULLSCREEN is true",
                ))
            }
        };
        if width <= 0 || height <= 0 {
            return Err(Error::bad_attribute(format!(
                "window size {}x{} is invalid; both dimensions must be positive",
                width, height
            )));
        }
        Ok(WindowAttributes::windowed(width as u32, height as u32))
    }

    /// Checks that a windowed size is usable by every backend.
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.fullscreen {
            return Ok(());
        }
        check_size(self.size.width, self.size.height)
    }
}

/// Window sizes must be positive and representable as a native `int`.
pub(crate) fn check_size(width: u32, height: u32) -> Result<(), Error> {
    let max = i32::MAX as u32;
    if width == 0 || height == 0 || width > max || height > max {
        return Err(Error::bad_parameter(format!(
            "window size {}x{} is invalid; both dimensions must be in 1..={}",
            width, height, max
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn width_and_height_are_required_unless_fullscreen() {
        let attrs = WindowAttributes::from_attrib_list(&[0x0310, 640, 0x0311, 480, 0]).unwrap();
        assert_eq!(attrs, WindowAttributes::windowed(640, 480));

        let err = WindowAttributes::from_attrib_list(&[0x0310, 640]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadAttribute);
        assert!(err.message().contains("WAFFLE_WINDOW_HEIGHT"));

        let attrs = WindowAttributes::from_attrib_list(&[0x0312, 1]).unwrap();
        assert!(attrs.fullscreen);
        let attrs = WindowAttributes::from_attrib_list(&[0x0312, 1, 0x0310, 10, 0x0311, 10]).unwrap();
        assert!(attrs.fullscreen);
    }

    #[test]
    fn sizes_must_be_positive() {
        let err = WindowAttributes::from_attrib_list(&[0x0310, 0, 0x0311, 480]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadAttribute);
        let err = WindowAttributes::from_attrib_list(&[0x0310, 640, 0x0311, -1]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadAttribute);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = WindowAttributes::from_attrib_list(&[0x0310, 64, 0x0311, 64, 0x0201, 8])
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadAttribute);
    }

    #[test]
    fn programmatic_sizes_are_checked() {
        assert!(WindowAttributes::windowed(1, 1).validate().is_ok());
        assert!(WindowAttributes::fullscreen().validate().is_ok());
        assert_eq!(
            WindowAttributes::windowed(0, 10).validate().unwrap_err().code(),
            ErrorCode::BadParameter
        );
        assert_eq!(
            check_size(u32::MAX, 10).unwrap_err().code(),
            ErrorCode::BadParameter
        );
    }
}
