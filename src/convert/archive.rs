//! Archived `NSColor` blobs as Terminal.app stores them.
//!
//! Each color value in a `.terminal` profile is a binary property list
//! produced by `NSKeyedArchiver`:
//!
//! ```text
//! $archiver = "NSKeyedArchiver"
//! $version  = 100000
//! $top      = { root = UID(1) }
//! $objects  = [ "$null",
//!               { NSColorSpace = 1, NSRGB = <"r g b\0">, $class = UID(2) },
//!               { $classname = "NSColor", $classes = ["NSColor", "NSObject"] } ]
//! ```
//!
//! `NSColorSpace = 1` is the calibrated RGB space. Components are written as
//! ASCII text with ten significant digits; alpha is only present when it is
//! not 1.

use std::io::Cursor;

use plist::{Dictionary, Integer, Uid, Value};

const ARCHIVER: &str = "NSKeyedArchiver";
const ARCHIVE_VERSION: i64 = 100_000;
const CALIBRATED_RGB_SPACE: u64 = 1;
const DEVICE_RGB_SPACE: u64 = 2;

/// A calibrated RGB color with components nominally in [0, 1].
/// Values are carried as-is; nothing here clamps them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibratedRgb {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl CalibratedRgb {
    pub fn opaque(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue, alpha: 1.0 }
    }

    fn components_text(&self) -> String {
        let mut parts = vec![
            format_component(self.red),
            format_component(self.green),
            format_component(self.blue),
        ];
        if self.alpha != 1.0 {
            parts.push(format_component(self.alpha));
        }
        parts.join(" ")
    }
}

/// Archive a color the way `NSKeyedArchiver.archivedData(withRootObject:)` does.
pub fn encode_color(color: &CalibratedRgb) -> Result<Vec<u8>, plist::Error> {
    let mut rgb = color.components_text().into_bytes();
    rgb.push(0);

    let mut color_object = Dictionary::new();
    color_object.insert("NSColorSpace".to_string(), Value::Integer(Integer::from(CALIBRATED_RGB_SPACE)));
    color_object.insert("NSRGB".to_string(), Value::Data(rgb));
    color_object.insert("$class".to_string(), Value::Uid(Uid::new(2)));

    let mut class_object = Dictionary::new();
    class_object.insert("$classname".to_string(), Value::String("NSColor".to_string()));
    class_object.insert(
        "$classes".to_string(),
        Value::Array(vec![
            Value::String("NSColor".to_string()),
            Value::String("NSObject".to_string()),
        ]),
    );

    let mut top = Dictionary::new();
    top.insert("root".to_string(), Value::Uid(Uid::new(1)));

    let mut archive = Dictionary::new();
    archive.insert("$archiver".to_string(), Value::String(ARCHIVER.to_string()));
    archive.insert("$version".to_string(), Value::Integer(Integer::from(ARCHIVE_VERSION)));
    archive.insert("$top".to_string(), Value::Dictionary(top));
    archive.insert(
        "$objects".to_string(),
        Value::Array(vec![
            Value::String("$null".to_string()),
            Value::Dictionary(color_object),
            Value::Dictionary(class_object),
        ]),
    );

    let mut buf = Vec::new();
    Value::Dictionary(archive).to_writer_binary(&mut buf)?;
    Ok(buf)
}

/// Read a color back out of an archived `NSColor` blob.
/// Returns None for anything that is not an RGB `NSColor` archive.
pub fn decode_color(data: &[u8]) -> Option<CalibratedRgb> {
    let archive = Value::from_reader(Cursor::new(data)).ok()?;
    let archive = archive.as_dictionary()?;
    if archive.get("$archiver")?.as_string()? != ARCHIVER {
        return None;
    }

    let objects = archive.get("$objects")?.as_array()?;
    let root = archive
        .get("$top")?
        .as_dictionary()?
        .get("root")?
        .as_uid()?
        .get();
    let color = objects.get(usize::try_from(root).ok()?)?.as_dictionary()?;

    let space = color.get("NSColorSpace")?.as_unsigned_integer()?;
    if space != CALIBRATED_RGB_SPACE && space != DEVICE_RGB_SPACE {
        return None;
    }

    let raw = color.get("NSRGB")?.as_data()?;
    let raw = raw.strip_suffix(b"\0").unwrap_or(raw);
    let text = std::str::from_utf8(raw).ok()?;
    let components = text
        .split_whitespace()
        .map(|s| s.parse::<f64>().ok())
        .collect::<Option<Vec<_>>>()?;

    match components.as_slice() {
        [r, g, b] => Some(CalibratedRgb::opaque(*r, *g, *b)),
        [r, g, b, a] => Some(CalibratedRgb { red: *r, green: *g, blue: *b, alpha: *a }),
        _ => None,
    }
}

/// Format a component like C's `%.10g`.
fn format_component(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let sci = format!("{:.9e}", value);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if (-4..10).contains(&exp) {
        let fixed = format!("{:.*}", (9 - exp) as usize, value);
        trim_fraction(&fixed).to_string()
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.abs())
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nsrgb_text(data: &[u8]) -> String {
        let archive = Value::from_reader(Cursor::new(data)).unwrap();
        let objects = archive
            .as_dictionary()
            .unwrap()
            .get("$objects")
            .unwrap()
            .as_array()
            .unwrap()
            .clone();
        let raw = objects[1]
            .as_dictionary()
            .unwrap()
            .get("NSRGB")
            .unwrap()
            .as_data()
            .unwrap()
            .to_vec();
        String::from_utf8(raw).unwrap()
    }

    #[test]
    fn test_format_component() {
        assert_eq!(format_component(1.0), "1");
        assert_eq!(format_component(0.0), "0");
        assert_eq!(format_component(0.5), "0.5");
        assert_eq!(format_component(0.25), "0.25");
        assert_eq!(format_component(f64::from(0.99999994_f32)), "0.9999999404");
        assert_eq!(format_component(0.19215686274509805), "0.1921568627");
        assert_eq!(format_component(1.5), "1.5");
        assert_eq!(format_component(-0.25), "-0.25");
        assert_eq!(format_component(12345678901.0), "1.23456789e+10");
        assert_eq!(format_component(0.00001), "1e-05");
        assert_eq!(format_component(0.0001), "0.0001");
    }

    #[test]
    fn test_encode_writes_nsrgb_text() {
        let data = encode_color(&CalibratedRgb::opaque(1.0, 0.0, 0.5)).unwrap();
        assert!(data.starts_with(b"bplist00"));
        assert_eq!(nsrgb_text(&data), "1 0 0.5\0");
    }

    #[test]
    fn test_encode_appends_alpha_when_translucent() {
        let color = CalibratedRgb { red: 0.0, green: 0.0, blue: 0.0, alpha: 0.5 };
        let data = encode_color(&color).unwrap();
        assert_eq!(nsrgb_text(&data), "0 0 0 0.5\0");
    }

    #[test]
    fn test_encode_archive_layout() {
        let data = encode_color(&CalibratedRgb::opaque(0.0, 0.0, 0.0)).unwrap();
        let archive = Value::from_reader(Cursor::new(&data)).unwrap();
        let archive = archive.as_dictionary().unwrap();
        assert_eq!(archive.get("$archiver").unwrap().as_string(), Some("NSKeyedArchiver"));
        assert_eq!(archive.get("$version").unwrap().as_unsigned_integer(), Some(100_000));

        let objects = archive.get("$objects").unwrap().as_array().unwrap();
        assert_eq!(objects.len(), 3);
        assert_eq!(objects[0].as_string(), Some("$null"));

        let color = objects[1].as_dictionary().unwrap();
        assert_eq!(color.get("NSColorSpace").unwrap().as_unsigned_integer(), Some(1));
        assert_eq!(color.get("$class").unwrap().as_uid().unwrap().get(), 2);

        let class = objects[2].as_dictionary().unwrap();
        assert_eq!(class.get("$classname").unwrap().as_string(), Some("NSColor"));
    }

    #[test]
    fn test_decode_encoded_color() {
        let data = encode_color(&CalibratedRgb::opaque(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(decode_color(&data), Some(CalibratedRgb::opaque(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_out_of_range_components_pass_through() {
        let data = encode_color(&CalibratedRgb::opaque(1.5, -0.25, 2.0)).unwrap();
        assert_eq!(nsrgb_text(&data), "1.5 -0.25 2\0");
        assert_eq!(decode_color(&data), Some(CalibratedRgb::opaque(1.5, -0.25, 2.0)));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(decode_color(b""), None);
        assert_eq!(decode_color(b"not a plist"), None);

        let mut buf = Vec::new();
        Value::String("NSColor".to_string()).to_writer_binary(&mut buf).unwrap();
        assert_eq!(decode_color(&buf), None);
    }
}
