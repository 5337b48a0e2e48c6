// waffle/src/attrib_list.rs
//
//! Flat `[key, value, key, value, ..., NONE]` attribute lists.

use crate::enums::Enum;
use crate::error::Error;

/// A borrowed attribute list.
///
/// The list ends at the first `NONE` key or at the end of the slice, whichever comes first.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AttribList<'a> {
    attribs: &'a [i32],
}

/// One key/value pair and the index of its key in the list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Attrib {
    pub(crate) index: usize,
    pub(crate) key: Enum,
    pub(crate) value: i32,
}

impl<'a> AttribList<'a> {
    /// Wraps a list, rejecting a trailing key that has no value.
    pub(crate) fn new(attribs: &'a [i32]) -> Result<AttribList<'a>, Error> {
        let mut index = 0;
        while index < attribs.len() {
            if attribs[index] == Enum::NONE.raw() {
                return Ok(AttribList {
                    attribs: &attribs[..index],
                });
            }
            if index + 1 >= attribs.len() {
                return Err(Error::bad_attribute(format!(
                    "attribute {} at attrib_list[{}] has no value",
                    Enum(attribs[index]),
                    index
                )));
            }
            index += 2;
        }
        Ok(AttribList { attribs })
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = Attrib> + 'a {
        self.attribs
            .chunks_exact(2)
            .enumerate()
            .map(|(pair, kv)| Attrib {
                index: pair * 2,
                key: Enum(kv[0]),
                value: kv[1],
            })
    }

    /// The value of the first occurrence of `key`.
    pub(crate) fn get(&self, key: Enum) -> Option<i32> {
        self.iter().find(|attrib| attrib.key == key).map(|attrib| attrib.value)
    }

    /// Fails with `BadAttribute` on the first key not in `allowed`.
    pub(crate) fn check_keys(&self, allowed: &[Enum]) -> Result<(), Error> {
        match self.iter().find(|attrib| !allowed.contains(&attrib.key)) {
            None => Ok(()),
            Some(attrib) => Err(Error::bad_attribute(format!(
                "unrecognized attribute {} at attrib_list[{}]",
                attrib.key, attrib.index
            ))),
        }
    }

    /// Reads a boolean attribute. `DONT_CARE` and absence both yield `default`.
    pub(crate) fn get_bool(&self, key: Enum, default: bool) -> Result<bool, Error> {
        match self.get(key) {
            None => Ok(default),
            Some(-1) => Ok(default),
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            Some(value) => Err(Error::bad_attribute(format!(
                "{} has bad value 0x{:x}; must be true(1), false(0), or WAFFLE_DONT_CARE(-1)",
                key, value
            ))),
        }
    }

    /// Reads a size attribute. `DONT_CARE` and absence both yield `None`.
    pub(crate) fn get_size(&self, key: Enum) -> Result<Option<u32>, Error> {
        match self.get(key) {
            None | Some(-1) => Ok(None),
            Some(value) if value >= 0 => Ok(Some(value as u32)),
            Some(value) => Err(Error::bad_attribute(format!(
                "{} has bad value {}; must be non-negative or WAFFLE_DONT_CARE",
                key, value
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn iteration_stops_at_none() {
        let raw = [0x0201, 8, 0x0202, 8, 0, 0x0203, 8];
        let list = AttribList::new(&raw).unwrap();
        let keys: Vec<Enum> = list.iter().map(|a| a.key).collect();
        assert_eq!(keys, vec![Enum::RED_SIZE, Enum::GREEN_SIZE]);
        assert_eq!(list.get(Enum::BLUE_SIZE), None);
    }

    #[test]
    fn unterminated_lists_are_accepted() {
        let raw = [0x0201, 8];
        let list = AttribList::new(&raw).unwrap();
        assert_eq!(list.get(Enum::RED_SIZE), Some(8));
        assert_eq!(AttribList::new(&[]).unwrap().iter().count(), 0);
    }

    #[test]
    fn dangling_key_is_rejected() {
        let err = AttribList::new(&[0x0201, 8, 0x0202]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadAttribute);
        assert!(err.message().contains("attrib_list[2]"));
    }

    #[test]
    fn first_occurrence_wins() {
        let raw = [0x0205, 24, 0x0205, 16];
        assert_eq!(AttribList::new(&raw).unwrap().get(Enum::DEPTH_SIZE), Some(24));
    }

    #[test]
    fn unknown_keys_report_their_index() {
        let raw = [0x0201, 8, 0x0999, 1];
        let err = AttribList::new(&raw)
            .unwrap()
            .check_keys(&[Enum::RED_SIZE])
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadAttribute);
        assert_eq!(err.message(), "unrecognized attribute 0x999 at attrib_list[2]");
    }

    #[test]
    fn booleans_and_sizes_are_validated() {
        let raw = [0x0209, 0, 0x0213, -1, 0x0207, 2, 0x0205, -1, 0x0206, -3];
        let list = AttribList::new(&raw).unwrap();
        assert_eq!(list.get_bool(Enum::DOUBLE_BUFFERED, true), Ok(false));
        assert_eq!(list.get_bool(Enum::ACCUM_BUFFER, true), Ok(true));
        assert_eq!(
            list.get_bool(Enum::SAMPLE_BUFFERS, false).unwrap_err().code(),
            ErrorCode::BadAttribute
        );
        assert_eq!(list.get_size(Enum::DEPTH_SIZE), Ok(None));
        assert_eq!(
            list.get_size(Enum::STENCIL_SIZE).unwrap_err().code(),
            ErrorCode::BadAttribute
        );
    }
}
