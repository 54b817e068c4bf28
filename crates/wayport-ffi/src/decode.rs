// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Decoding of raw host input.
//!
//! This is the only place that knows about the sentinel conventions of the C
//! interface:
//!
//! * A null pointer or a zero length means the attribute was not provided.
//! * A per-point array whose length is not the coordinate count is dropped.
//!   Bearings pack two values per point; an odd length is dropped as well.
//! * A negative bearing value or radius marks that slot absent.
//! * A null or empty string marks a hint or approach slot absent.
//! * Scalars that are not strictly positive mean "engine default".

use libc::c_char;
use std::borrow::Cow;
use std::ffi::CStr;
use wayport_core::{geo::Coordinate, optional::OptionalArray};
use wayport_model::{
    annotations::AnnotationFlags, hint::Hint, index::CoordinateIndex, options::OptionToken,
    options::Approach, point::Bearing,
};

/// Views a raw array. Null or zero length yields an empty slice.
///
/// # Safety
///
/// A non-null `ptr` must point to `len` initialized values that outlive `'a`.
pub(crate) unsafe fn slice<'a, T>(ptr: *const T, len: usize) -> &'a [T] {
    if ptr.is_null() || len == 0 {
        &[]
    } else {
        std::slice::from_raw_parts(ptr, len)
    }
}

/// Reads a NUL-terminated string. Null yields `None`; invalid UTF-8 is
/// replaced lossily.
///
/// # Safety
///
/// A non-null `ptr` must point to a NUL-terminated string that outlives `'a`.
pub(crate) unsafe fn text<'a>(ptr: *const c_char) -> Option<Cow<'a, str>> {
    if ptr.is_null() {
        None
    } else {
        Some(CStr::from_ptr(ptr).to_string_lossy())
    }
}

/// Like `text`, but an empty string is also `None`.
///
/// # Safety
///
/// See `text`.
pub(crate) unsafe fn non_empty_text<'a>(ptr: *const c_char) -> Option<Cow<'a, str>> {
    text(ptr).filter(|s| !s.is_empty())
}

/// Resolves an option token.
///
/// # Safety
///
/// See `text`.
pub(crate) unsafe fn option<T: OptionToken>(ptr: *const c_char) -> T {
    T::resolve(text(ptr).as_deref())
}

/// Reads `count` interleaved longitude/latitude pairs.
///
/// # Safety
///
/// A non-null `ptr` must point to `2 * count` values.
pub(crate) unsafe fn coordinates(ptr: *const f64, count: usize) -> Vec<Coordinate> {
    let values = slice(ptr, count.saturating_mul(2));
    Coordinate::from_interleaved(values, count)
}

/// Reads a list of coordinate positions.
///
/// # Safety
///
/// A non-null `ptr` must point to `len` values.
pub(crate) unsafe fn indices(ptr: *const usize, len: usize) -> Vec<CoordinateIndex> {
    slice(ptr, len).iter().copied().map(CoordinateIndex::new).collect()
}

/// Reads a list of strings, skipping null entries.
///
/// # Safety
///
/// A non-null `ptr` must point to `len` pointers, each null or NUL-terminated.
pub(crate) unsafe fn strings(ptr: *const *const c_char, len: usize) -> Vec<String> {
    slice(ptr, len)
        .iter()
        .filter_map(|s| text(*s))
        .map(Cow::into_owned)
        .collect()
}

/// Merges annotation tokens. An empty or null list is "not requested".
///
/// A non-empty list is requested even if every entry is null; null entries
/// are skipped while merging.
///
/// # Safety
///
/// See `strings`.
pub(crate) unsafe fn annotations(ptr: *const *const c_char, len: usize) -> Option<AnnotationFlags> {
    if slice(ptr, len).is_empty() {
        return None;
    }
    Some(AnnotationFlags::merge(strings(ptr, len)))
}

fn cardinality_matches(attribute: &str, received: usize, expected: usize) -> bool {
    if received != expected {
        log::debug!(
            "dropping `{}`: expected {} entries, received {}",
            attribute,
            expected,
            received
        );
        return false;
    }
    true
}

/// Decodes a per-point array of primitives, one slot per value.
///
/// # Safety
///
/// A non-null `ptr` must point to `len` values.
unsafe fn per_point<T, U, F>(
    attribute: &str,
    ptr: *const T,
    len: usize,
    expected: usize,
    decode: F,
) -> OptionalArray<U>
where
    T: Copy,
    F: FnMut(T) -> Option<U>,
{
    let raw = slice(ptr, len);
    if raw.is_empty() || !cardinality_matches(attribute, raw.len(), expected) {
        return OptionalArray::absent();
    }
    OptionalArray::from_slots(raw.iter().copied().map(decode).collect())
}

/// Decodes bearings packed as `[value0, range0, value1, range1, ...]`.
///
/// `len` counts values, not pairs.
///
/// # Safety
///
/// A non-null `ptr` must point to `len` values.
pub(crate) unsafe fn bearings(ptr: *const f64, len: usize, expected: usize) -> OptionalArray<Bearing> {
    let raw = slice(ptr, len);
    if raw.is_empty() {
        return OptionalArray::absent();
    }
    if raw.len() % 2 != 0 {
        log::debug!("dropping `bearings`: odd number of values ({})", raw.len());
        return OptionalArray::absent();
    }
    if !cardinality_matches("bearings", raw.len() / 2, expected) {
        return OptionalArray::absent();
    }
    raw.chunks_exact(2)
        .map(|pair| Bearing::from_raw(pair[0], pair[1]))
        .collect()
}

/// Decodes radiuses; a negative value marks the slot absent.
///
/// # Safety
///
/// A non-null `ptr` must point to `len` values.
pub(crate) unsafe fn radiuses(ptr: *const f64, len: usize, expected: usize) -> OptionalArray<f64> {
    per_point("radiuses", ptr, len, expected, |r| (r >= 0.0).then_some(r))
}

/// Decodes timestamps; every slot is present.
///
/// # Safety
///
/// A non-null `ptr` must point to `len` values.
pub(crate) unsafe fn timestamps(ptr: *const u32, len: usize, expected: usize) -> OptionalArray<u32> {
    per_point("timestamps", ptr, len, expected, Some)
}

/// Decodes hint tokens; a null or empty token marks the slot absent.
///
/// # Safety
///
/// See `strings`.
pub(crate) unsafe fn hints(
    ptr: *const *const c_char,
    len: usize,
    expected: usize,
) -> OptionalArray<Hint> {
    per_point("hints", ptr, len, expected, |s| {
        non_empty_text(s).map(|t| Hint::from_base64(&t))
    })
}

/// Decodes approaches; a null or empty token marks the slot absent.
///
/// # Safety
///
/// See `strings`.
pub(crate) unsafe fn approaches(
    ptr: *const *const c_char,
    len: usize,
    expected: usize,
) -> OptionalArray<Approach> {
    per_point("approaches", ptr, len, expected, |s| {
        non_empty_text(s).map(|t| Approach::resolve(Some(t.as_ref())))
    })
}

/// Keeps a floating-point override only if it is strictly positive.
pub(crate) fn positive_f64(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Keeps an integer override only if it is strictly positive.
pub(crate) fn positive_u32(value: i32) -> Option<u32> {
    u32::try_from(value).ok().filter(|v| *v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::ffi::CString;
    use std::ptr::null;

    #[test]
    fn test_null_and_empty_are_absent() {
        unsafe {
            assert!(radiuses(null(), 3, 3).is_absent());
            assert!(radiuses([1.0].as_ptr(), 0, 0).is_absent());
            assert!(bearings(null(), 4, 2).is_absent());
            assert!(hints(null(), 2, 2).is_absent());
        }
    }

    #[test]
    fn test_radiuses_negative_slot_is_absent() {
        let raw = [10.0, -1.0, 0.0];
        let decoded = unsafe { radiuses(raw.as_ptr(), raw.len(), 3) };
        assert_eq!(decoded.slots(), Some(&[Some(10.0), None, Some(0.0)][..]));
    }

    #[test]
    fn test_radiuses_length_mismatch_drops_all() {
        let raw = [10.0, 20.0];
        let decoded = unsafe { radiuses(raw.as_ptr(), raw.len(), 3) };
        assert!(decoded.is_absent());
    }

    #[test]
    fn test_bearings_pairs_for_every_point() {
        let raw = [0.0, 90.0, 180.0, 45.0, 359.0, 10.0];
        let decoded = unsafe { bearings(raw.as_ptr(), raw.len(), 3) };
        assert_eq!(decoded.present_count(), 3);
        assert_eq!(decoded.get(0), Some(&Bearing::new(0, 90)));
        assert_eq!(decoded.get(1), Some(&Bearing::new(180, 45)));
        assert_eq!(decoded.get(2), Some(&Bearing::new(359, 10)));
    }

    #[test]
    fn test_bearings_odd_length_drops_all() {
        let raw = [0.0, 90.0, 180.0];
        assert!(unsafe { bearings(raw.as_ptr(), raw.len(), 2) }.is_absent());
    }

    #[test]
    fn test_bearings_negative_value_marks_slot() {
        let raw = [-1.0, 0.0, 270.0, 30.0];
        let decoded = unsafe { bearings(raw.as_ptr(), raw.len(), 2) };
        assert_eq!(decoded.get(0), None);
        assert_eq!(decoded.get(1), Some(&Bearing::new(270, 30)));
        assert!(decoded.is_present());
    }

    #[test]
    fn test_string_slots() {
        let curb = CString::new("curb").unwrap();
        let empty = CString::new("").unwrap();
        let other = CString::new("sideways").unwrap();
        let raw = [curb.as_ptr(), null(), empty.as_ptr(), other.as_ptr()];
        let decoded = unsafe { approaches(raw.as_ptr(), raw.len(), 4) };
        assert_eq!(
            decoded.slots(),
            Some(&[Some(Approach::Curb), None, None, Some(Approach::Unrestricted)][..])
        );
    }

    #[test]
    fn test_hints_keep_malformed_tokens() {
        let good = CString::new("AAEC").unwrap();
        let bad = CString::new("@@@").unwrap();
        let raw = [good.as_ptr(), bad.as_ptr()];
        let decoded = unsafe { hints(raw.as_ptr(), raw.len(), 2) };
        assert!(decoded.get(0).unwrap().is_decodable());
        assert!(!decoded.get(1).unwrap().is_decodable());
    }

    #[test]
    fn test_strings_skip_null_entries() {
        let toll = CString::new("toll").unwrap();
        let raw = [null(), toll.as_ptr()];
        assert_eq!(unsafe { strings(raw.as_ptr(), raw.len()) }, vec!["toll"]);
    }

    #[test]
    fn test_annotations_not_requested() {
        assert_eq!(unsafe { annotations(null(), 0) }, None);
        let raw: [*const c_char; 1] = [null()];
        assert_eq!(unsafe { annotations(raw.as_ptr(), 0) }, None);
    }

    #[test]
    fn test_annotations_null_entries_are_requested_and_empty() {
        let raw: [*const c_char; 2] = [null(), null()];
        assert_eq!(
            unsafe { annotations(raw.as_ptr(), raw.len()) },
            Some(AnnotationFlags::NONE)
        );

        let speed = CString::new("speed").unwrap();
        let mixed = [null(), speed.as_ptr()];
        assert_eq!(
            unsafe { annotations(mixed.as_ptr(), mixed.len()) },
            Some(AnnotationFlags::SPEED)
        );
    }

    #[test]
    fn test_coordinates_null_pointer_with_count() {
        assert!(unsafe { coordinates(null(), 5) }.is_empty());
        let raw = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(unsafe { coordinates(raw.as_ptr(), 2) }.len(), 2);
    }

    #[test]
    fn test_positive_scalars() {
        assert_eq!(positive_f64(0.0), None);
        assert_eq!(positive_f64(-3.0), None);
        assert_eq!(positive_f64(f64::NAN), None);
        assert_eq!(positive_f64(2.5), Some(2.5));
        assert_eq!(positive_u32(0), None);
        assert_eq!(positive_u32(-1), None);
        assert_eq!(positive_u32(7), Some(7));
    }

    proptest! {
        #[test]
        fn prop_radiuses_all_or_nothing(
            raw in proptest::collection::vec(-50.0f64..50.0, 0..12),
            n in 0usize..12,
        ) {
            let decoded = unsafe { radiuses(raw.as_ptr(), raw.len(), n) };
            if raw.is_empty() || raw.len() != n {
                prop_assert!(decoded.is_absent());
            } else {
                prop_assert_eq!(decoded.len(), n);
                for (slot, value) in decoded.iter().zip(&raw) {
                    prop_assert_eq!(slot.is_some(), *value >= 0.0);
                }
            }
        }

        #[test]
        fn prop_bearings_all_or_nothing(
            raw in proptest::collection::vec(-10.0f64..360.0, 0..16),
            n in 0usize..8,
        ) {
            let decoded = unsafe { bearings(raw.as_ptr(), raw.len(), n) };
            if raw.is_empty() || raw.len() % 2 != 0 || raw.len() / 2 != n {
                prop_assert!(decoded.is_absent());
            } else {
                prop_assert_eq!(decoded.len(), n);
            }
        }
    }
}
