//! Encoded polyline codec.
//!
//! Directions APIs return route geometry in the compact "encoded polyline"
//! format: each point is a latitude/longitude delta from the previous point,
//! scaled by `1e5`, zig-zag encoded and packed five bits per printable
//! character. [`decode`] turns that text into a [`Route`]; [`encode`] is the
//! inverse.
//!
//! Unlike a naive decoder, [`decode`] never reads past the end of its input:
//! a value whose continuation bit is still set on the last character yields
//! [`PolylineError::Truncated`].

use thiserror::Error;

use crate::{Coordinate, CoordinateError, Route};

/// Offset added to every 5-bit chunk to make it printable.
const CHAR_OFFSET: u8 = 63;
/// Largest byte a well-formed polyline may contain (`63 + 0x3f`).
const MAX_CHAR: u8 = 126;
/// Continuation flag inside a chunk.
const CONTINUATION: u64 = 0x20;
/// Payload bits inside a chunk.
const CHUNK_MASK: u64 = 0x1f;
/// Bits per chunk.
const CHUNK_BITS: u32 = 5;
/// Values end within seven chunks, i.e. 35 bits of payload.
const MAX_SHIFT: u32 = 35;
/// Fixed-point precision of the encoding.
const PRECISION: f64 = 1e5;

/// Errors returned by [`decode`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolylineError {
    /// The input ended while a value was still being read.
    #[error("polyline truncated at byte {offset}")]
    Truncated {
        /// Byte offset where more input was expected.
        offset: usize,
    },
    /// A byte outside the printable polyline alphabet was found.
    #[error("invalid polyline byte {byte:#04x} at offset {offset}")]
    InvalidCharacter {
        /// Byte offset of the offending character.
        offset: usize,
        /// The offending byte.
        byte: u8,
    },
    /// A value did not terminate within seven chunks (35 bits of payload).
    #[error("polyline value starting before offset {offset} overflows 35 bits")]
    Overflow {
        /// Byte offset where the overflow was detected.
        offset: usize,
    },
    /// A decoded point was not a valid coordinate.
    #[error("decoded point at offset {offset} is invalid: {source}")]
    OutOfRange {
        /// Byte offset where the point started.
        offset: usize,
        /// Validation failure.
        #[source]
        source: CoordinateError,
    },
}

/// Decode an encoded polyline into a route.
///
/// An empty string decodes to an empty route.
///
/// # Errors
///
/// Returns [`PolylineError`] when the text is truncated, contains bytes
/// outside the polyline alphabet, or decodes to an invalid coordinate.
///
/// # Examples
/// ```
/// use wayfare_core::polyline::decode;
///
/// # fn main() -> Result<(), wayfare_core::PolylineError> {
/// let route = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@")?;
/// assert_eq!(route.len(), 3);
/// let first = route.origin().expect("non-empty");
/// assert!((first.latitude() - 38.5).abs() < 1e-9);
/// assert!((first.longitude() + 120.2).abs() < 1e-9);
/// # Ok(())
/// # }
/// ```
pub fn decode(encoded: &str) -> Result<Route, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut cursor = 0_usize;
    let mut latitude = 0_i64;
    let mut longitude = 0_i64;
    let mut points = Vec::new();

    while cursor < bytes.len() {
        let start = cursor;
        latitude += read_value(bytes, &mut cursor)?;
        longitude += read_value(bytes, &mut cursor)?;
        let point = Coordinate::new(to_degrees(latitude), to_degrees(longitude))
            .map_err(|source| PolylineError::OutOfRange {
                offset: start,
                source,
            })?;
        points.push(point);
    }

    Ok(Route::new(points))
}

/// Encode points as a polyline with five decimal places of precision.
///
/// # Examples
/// ```
/// use wayfare_core::Coordinate;
/// use wayfare_core::polyline::encode;
///
/// # fn main() -> Result<(), wayfare_core::CoordinateError> {
/// let points = [
///     Coordinate::new(38.5, -120.2)?,
///     Coordinate::new(40.7, -120.95)?,
///     Coordinate::new(43.252, -126.453)?,
/// ];
/// assert_eq!(encode(&points), "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn encode(points: &[Coordinate]) -> String {
    let mut out = String::with_capacity(points.len() * 8);
    let mut previous = (0_i64, 0_i64);
    for point in points {
        let current = (to_fixed(point.latitude()), to_fixed(point.longitude()));
        write_value(current.0 - previous.0, &mut out);
        write_value(current.1 - previous.1, &mut out);
        previous = current;
    }
    out
}

fn read_value(bytes: &[u8], cursor: &mut usize) -> Result<i64, PolylineError> {
    let mut result = 0_u64;
    let mut shift = 0_u32;
    loop {
        let offset = *cursor;
        let byte = *bytes.get(offset).ok_or(PolylineError::Truncated { offset })?;
        if !(CHAR_OFFSET..=MAX_CHAR).contains(&byte) {
            return Err(PolylineError::InvalidCharacter { offset, byte });
        }
        if shift >= MAX_SHIFT {
            return Err(PolylineError::Overflow { offset });
        }
        let chunk = u64::from(byte - CHAR_OFFSET);
        result |= (chunk & CHUNK_MASK) << shift;
        shift += CHUNK_BITS;
        *cursor = offset + 1;
        if chunk & CONTINUATION == 0 {
            break;
        }
    }
    // At most 35 bits were accumulated, so the shifted value fits in i64.
    let magnitude = i64::try_from(result >> 1).unwrap_or(i64::MAX);
    Ok(if result & 1 == 1 { !magnitude } else { magnitude })
}

fn write_value(delta: i64, out: &mut String) {
    let zigzag = if delta < 0 { !(delta << 1) } else { delta << 1 };
    let mut value = zigzag.unsigned_abs();
    while value >= CONTINUATION {
        out.push(chunk_char((value & CHUNK_MASK) | CONTINUATION));
        value >>= CHUNK_BITS;
    }
    out.push(chunk_char(value));
}

fn chunk_char(chunk: u64) -> char {
    // Chunks are at most six bits wide.
    let low = u8::try_from(chunk & 0x3f).unwrap_or(0);
    char::from(low + CHAR_OFFSET)
}

// Payloads are at most 32 bits, well inside f64's exact integer range.
fn to_degrees(fixed: i64) -> f64 {
    fixed as f64 / PRECISION
}

fn to_fixed(degrees: f64) -> i64 {
    (degrees * PRECISION).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SAMPLE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[rstest]
    fn decodes_reference_sample() {
        let route = decode(SAMPLE).expect("sample decodes");
        let expected = [(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)];
        assert_eq!(route.len(), expected.len());
        for (point, (lat, lng)) in route.points().iter().zip(expected) {
            assert_close(point.latitude(), lat);
            assert_close(point.longitude(), lng);
        }
    }

    #[rstest]
    fn empty_input_decodes_to_empty_route() {
        let route = decode("").expect("empty input");
        assert!(route.is_empty());
    }

    #[rstest]
    #[case::mid_latitude("_p~i", 4)]
    #[case::missing_longitude("_p~iF", 5)]
    #[case::mid_second_point("_p~iF~ps|U_ulL", 14)]
    fn truncated_input_is_rejected(#[case] input: &str, #[case] offset: usize) {
        let err = decode(input).expect_err("truncated");
        assert_eq!(err, PolylineError::Truncated { offset });
    }

    #[rstest]
    #[case::space("_p~iF ps|U", 5, b' ')]
    #[case::non_ascii("_p~iF\u{e9}", 5, 0xc3)]
    fn invalid_bytes_are_rejected(#[case] input: &str, #[case] offset: usize, #[case] byte: u8) {
        let err = decode(input).expect_err("invalid byte");
        assert_eq!(err, PolylineError::InvalidCharacter { offset, byte });
    }

    #[rstest]
    fn endless_continuation_overflows() {
        let err = decode("~~~~~~~~~~").expect_err("overflow");
        assert_eq!(err, PolylineError::Overflow { offset: 7 });
        assert!(err.to_string().contains("35 bits"), "{err}");
    }

    #[rstest]
    fn seven_chunk_values_are_the_longest_accepted() {
        let route = decode("______??").expect("seven chunks fit");
        assert_eq!(route.len(), 1);
        let err = decode("_______??").expect_err("eight chunks overflow");
        assert_eq!(err, PolylineError::Overflow { offset: 7 });
    }

    #[rstest]
    fn out_of_range_points_are_rejected() {
        let far_north = Coordinate::new(89.0, 0.0).expect("valid");
        // Two 89 degree steps north accumulate to 178 degrees.
        let mut encoded = encode(&[far_north]);
        encoded.push_str(&encode(&[far_north]));
        let err = decode(&encoded).expect_err("latitude overflow");
        assert!(matches!(err, PolylineError::OutOfRange { .. }));
    }

    #[rstest]
    fn encodes_reference_sample() {
        let points = [
            Coordinate::new(38.5, -120.2).expect("valid"),
            Coordinate::new(40.7, -120.95).expect("valid"),
            Coordinate::new(43.252, -126.453).expect("valid"),
        ];
        assert_eq!(encode(&points), SAMPLE);
    }

    #[rstest]
    fn encodes_zero_deltas_as_question_marks() {
        let origin = Coordinate::new(0.0, 0.0).expect("valid");
        assert_eq!(encode(&[origin, origin]), "????");
    }
}
