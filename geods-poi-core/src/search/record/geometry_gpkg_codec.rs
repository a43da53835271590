//! decoding of GeoPackage binary geometry blobs holding a single point.
//!
//! a blob is a header followed by a standard WKB payload:
//!
//! ```text
//! magic "GP" | version u8 | flags u8 | srs_id i32 | envelope (0, 32, 48 or 64 bytes) | WKB
//! ```
//!
//! the default [`HeaderPolicy::FixedOffset`] always skips the first 8 bytes and
//! so assumes no envelope is present. [`HeaderPolicy::Envelope`] reads the
//! envelope indicator from the flags byte instead.
use geo::Geometry;
use geozero::{wkb::Wkb, ToGeo, ToWkt};
use serde::{Deserialize, Serialize};

/// magic, version, flags and srs_id
pub const GPKG_FIXED_HEADER_LEN: usize = 8;
const GPKG_MAGIC: &[u8; 2] = b"GP";
const FLAGS_OFFSET: usize = 3;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryDecodeError {
    #[error("input of {len} bytes is too short to contain a GeoPackage header and WKB data")]
    TooShort { len: usize },
    #[error("invalid GeoPackage header: {0}")]
    InvalidHeader(String),
    #[error("error unmarshaling WKB: {0}")]
    Wkb(String),
    #[error("decoded geometry is not a Point, but a {0}")]
    NotAPoint(&'static str),
    #[error("error marshaling to WKT: {0}")]
    Wkt(String),
}

/// where the WKB payload starts within a blob.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HeaderPolicy {
    /// skip exactly [`GPKG_FIXED_HEADER_LEN`] bytes. headers that claim an
    /// envelope are logged as inconsistent but not rejected.
    #[default]
    FixedOffset,
    /// skip the fixed header plus the envelope declared in the flags byte.
    Envelope,
}

/// a decoded point and its WKT rendering, longitude first.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedPoint {
    pub long: f64,
    pub lat: f64,
    pub wkt: String,
}

/// decodes a GeoPackage geometry blob that must contain a single point.
pub fn decode_point(blob: &[u8], policy: HeaderPolicy) -> Result<DecodedPoint, GeometryDecodeError> {
    if blob.len() < GPKG_FIXED_HEADER_LEN {
        return Err(GeometryDecodeError::TooShort { len: blob.len() });
    }

    let payload_offset = match policy {
        HeaderPolicy::FixedOffset => {
            match envelope_len(blob) {
                Ok(0) => {}
                Ok(n) => log::warn!(
                    "geometry header {} declares a {n} byte envelope, inconsistent with fixed offset {GPKG_FIXED_HEADER_LEN}",
                    header_hex(blob)
                ),
                Err(e) => log::warn!(
                    "geometry header {} is inconsistent with fixed offset {GPKG_FIXED_HEADER_LEN}: {e}",
                    header_hex(blob)
                ),
            }
            GPKG_FIXED_HEADER_LEN
        }
        HeaderPolicy::Envelope => GPKG_FIXED_HEADER_LEN + envelope_len(blob)?,
    };

    let payload = blob.get(payload_offset..).ok_or_else(|| {
        GeometryDecodeError::InvalidHeader(format!(
            "envelope ends at byte {payload_offset} but the blob is only {} bytes",
            blob.len()
        ))
    })?;

    let geometry = Wkb(payload.to_vec())
        .to_geo()
        .map_err(|e| GeometryDecodeError::Wkb(e.to_string()))?;

    let point = match geometry {
        Geometry::Point(point) => point,
        other => return Err(GeometryDecodeError::NotAPoint(geometry_kind(&other))),
    };

    let wkt = Geometry::Point(point)
        .to_wkt()
        .map_err(|e| GeometryDecodeError::Wkt(e.to_string()))?;

    Ok(DecodedPoint {
        long: point.x(),
        lat: point.y(),
        wkt,
    })
}

/// envelope size in bytes declared by the header of `blob`.
fn envelope_len(blob: &[u8]) -> Result<usize, GeometryDecodeError> {
    if blob.get(..GPKG_MAGIC.len()) != Some(GPKG_MAGIC.as_slice()) {
        return Err(GeometryDecodeError::InvalidHeader(String::from(
            "missing 'GP' magic bytes",
        )));
    }
    let flags = blob.get(FLAGS_OFFSET).copied().ok_or_else(|| {
        GeometryDecodeError::InvalidHeader(String::from("missing flags byte"))
    })?;

    match (flags >> 1) & 0b111 {
        0 => Ok(0),
        1 => Ok(32),
        2 | 3 => Ok(48),
        4 => Ok(64),
        indicator => Err(GeometryDecodeError::InvalidHeader(format!(
            "invalid envelope contents indicator {indicator}"
        ))),
    }
}

fn header_hex(blob: &[u8]) -> String {
    hex::encode(&blob[..blob.len().min(GPKG_FIXED_HEADER_LEN)])
}

fn geometry_kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // POINT(-0.12 51.5), little endian WKB, srs 4326, no envelope
    const CAFE_POINT: &str = "47500001e61000000101000000b81e85eb51b8bebf0000000000c04940";
    // POINT(1 2), big endian WKB
    const BIG_ENDIAN_POINT: &str = "47500001e610000000000000013ff00000000000004000000000000000";
    // LINESTRING(0 0, 1 1)
    const LINESTRING: &str = "47500001e610000001020000000200000000000000000000000000000000000000000000000000f03f000000000000f03f";
    // MULTIPOINT((3 4))
    const MULTIPOINT: &str =
        "47500001e6100000010400000001000000010100000000000000000008400000000000001040";
    // POINT(-0.12 51.5) preceded by an xy envelope (flags 0x03)
    const ENVELOPE_POINT: &str = "47500003e61000009a9999999999c9bf9a9999999999b9bf3333333333b34940cdcccccccccc49400101000000b81e85eb51b8bebf0000000000c04940";

    fn blob(hex_str: &str) -> Vec<u8> {
        hex::decode(hex_str).expect("test invariant failed: fixture is not valid hex")
    }

    #[test]
    fn test_decode_point() {
        let point = decode_point(&blob(CAFE_POINT), HeaderPolicy::FixedOffset).unwrap();
        assert_eq!(point.long, -0.12);
        assert_eq!(point.lat, 51.5);
        assert_eq!(point.wkt, "POINT(-0.12 51.5)");
    }

    #[test]
    fn test_decode_big_endian_point() {
        let point = decode_point(&blob(BIG_ENDIAN_POINT), HeaderPolicy::FixedOffset).unwrap();
        assert_eq!((point.long, point.lat), (1.0, 2.0));
        assert_eq!(point.wkt, "POINT(1 2)");
    }

    #[test]
    fn test_too_short() {
        for len in 0..GPKG_FIXED_HEADER_LEN {
            let result = decode_point(&blob(CAFE_POINT)[..len], HeaderPolicy::FixedOffset);
            assert_eq!(result, Err(GeometryDecodeError::TooShort { len }));
        }
    }

    #[test]
    fn test_header_without_payload() {
        let result = decode_point(&blob(CAFE_POINT)[..8], HeaderPolicy::FixedOffset);
        assert!(matches!(result, Err(GeometryDecodeError::Wkb(_))));
    }

    #[test]
    fn test_truncated_payload() {
        let result = decode_point(&blob(CAFE_POINT)[..20], HeaderPolicy::FixedOffset);
        assert!(matches!(result, Err(GeometryDecodeError::Wkb(_))));
    }

    #[test]
    fn test_not_a_point() {
        let result = decode_point(&blob(LINESTRING), HeaderPolicy::FixedOffset);
        assert_eq!(result, Err(GeometryDecodeError::NotAPoint("LineString")));

        let result = decode_point(&blob(MULTIPOINT), HeaderPolicy::FixedOffset);
        let err = result.unwrap_err();
        assert_eq!(err, GeometryDecodeError::NotAPoint("MultiPoint"));
        assert_eq!(
            err.to_string(),
            "decoded geometry is not a Point, but a MultiPoint"
        );
    }

    #[test]
    fn test_envelope_policy_skips_envelope() {
        let point = decode_point(&blob(ENVELOPE_POINT), HeaderPolicy::Envelope).unwrap();
        assert_eq!(point.wkt, "POINT(-0.12 51.5)");
    }

    #[test]
    fn test_envelope_policy_without_envelope() {
        let point = decode_point(&blob(CAFE_POINT), HeaderPolicy::Envelope).unwrap();
        assert_eq!(point.wkt, "POINT(-0.12 51.5)");
    }

    #[test]
    fn test_envelope_policy_rejects_bad_magic() {
        let mut bytes = blob(CAFE_POINT);
        bytes[0] = b'X';
        let result = decode_point(&bytes, HeaderPolicy::Envelope);
        assert!(matches!(result, Err(GeometryDecodeError::InvalidHeader(_))));

        // fixed offset only warns about the same header
        let point = decode_point(&bytes, HeaderPolicy::FixedOffset).unwrap();
        assert_eq!(point.wkt, "POINT(-0.12 51.5)");
    }

    #[test]
    fn test_envelope_policy_rejects_invalid_indicator() {
        let mut bytes = blob(CAFE_POINT);
        bytes[FLAGS_OFFSET] = 0b0000_1011;
        let result = decode_point(&bytes, HeaderPolicy::Envelope);
        assert!(matches!(result, Err(GeometryDecodeError::InvalidHeader(_))));
    }

    #[test]
    fn test_envelope_longer_than_blob() {
        let bytes = &blob(ENVELOPE_POINT)[..20];
        let result = decode_point(bytes, HeaderPolicy::Envelope);
        assert!(matches!(result, Err(GeometryDecodeError::InvalidHeader(_))));
    }
}
