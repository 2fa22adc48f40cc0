//! The `Contents.json` manifest of an Xcode asset catalog icon set.
//!
//! The manifest is built from the [`IconSpec`] table alone, never from the
//! rendered files, so its bytes are identical on every run.
//!
//! # JSON Format
//!
//! Output matches what Xcode itself writes: two-space indentation and a
//! space on both sides of each colon.
//!
//! ```json
//! {
//!   "images" : [
//!     {
//!       "filename" : "icon_16x16.png",
//!       "idiom" : "mac",
//!       "scale" : "1x",
//!       "size" : "16x16"
//!     }
//!   ],
//!   "info" : {
//!     "author" : "xcode",
//!     "version" : 1
//!   }
//! }
//! ```

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::ser::{Formatter, PrettyFormatter};

use crate::iconset::IconSpec;

/// File name of the manifest inside the icon set directory.
pub const MANIFEST_FILENAME: &str = "Contents.json";

const IDIOM_MAC: &str = "mac";
const AUTHOR: &str = "xcode";
const FORMAT_VERSION: u32 = 1;

/// One `images` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestImage {
    pub filename: String,
    pub idiom: String,
    pub scale: String,
    pub size: String,
}

impl From<&IconSpec> for ManifestImage {
    fn from(spec: &IconSpec) -> Self {
        Self {
            filename: spec.filename.to_string(),
            idiom: IDIOM_MAC.to_string(),
            scale: spec.scale_label(),
            size: spec.size_label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestInfo {
    pub author: String,
    pub version: u32,
}

impl Default for ManifestInfo {
    fn default() -> Self {
        Self {
            author: AUTHOR.to_string(),
            version: FORMAT_VERSION,
        }
    }
}

/// An icon set manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub images: Vec<ManifestImage>,
    pub info: ManifestInfo,
}

impl Manifest {
    /// Describes `specs` in order.
    pub fn for_icon_set(specs: &[IconSpec]) -> Self {
        Self {
            images: specs.iter().map(ManifestImage::from).collect(),
            info: ManifestInfo::default(),
        }
    }

    /// Serializes in Xcode's layout, with a trailing newline.
    pub fn to_xcode_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, XcodeFormatter::new());
        self.serialize(&mut ser)?;
        buf.push(b'\n');
        Ok(buf)
    }

    /// Deserializes a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// XcodeFormatter
// ============================================================================

/// Pretty printer that writes `"key" : value` instead of `"key": value`.
struct XcodeFormatter {
    inner: PrettyFormatter<'static>,
}

impl XcodeFormatter {
    fn new() -> Self {
        Self {
            inner: PrettyFormatter::with_indent(b"  "),
        }
    }
}

impl Formatter for XcodeFormatter {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b" : ")
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iconset::MAC_ICON_SET;

    const EXPECTED: &str = r#"{
  "images" : [
    {
      "filename" : "icon_16x16.png",
      "idiom" : "mac",
      "scale" : "1x",
      "size" : "16x16"
    },
    {
      "filename" : "icon_16x16@2x.png",
      "idiom" : "mac",
      "scale" : "2x",
      "size" : "16x16"
    },
    {
      "filename" : "icon_32x32.png",
      "idiom" : "mac",
      "scale" : "1x",
      "size" : "32x32"
    },
    {
      "filename" : "icon_32x32@2x.png",
      "idiom" : "mac",
      "scale" : "2x",
      "size" : "32x32"
    },
    {
      "filename" : "icon_128x128.png",
      "idiom" : "mac",
      "scale" : "1x",
      "size" : "128x128"
    },
    {
      "filename" : "icon_128x128@2x.png",
      "idiom" : "mac",
      "scale" : "2x",
      "size" : "128x128"
    },
    {
      "filename" : "icon_256x256.png",
      "idiom" : "mac",
      "scale" : "1x",
      "size" : "256x256"
    },
    {
      "filename" : "icon_256x256@2x.png",
      "idiom" : "mac",
      "scale" : "2x",
      "size" : "256x256"
    },
    {
      "filename" : "icon_512x512.png",
      "idiom" : "mac",
      "scale" : "1x",
      "size" : "512x512"
    },
    {
      "filename" : "icon_512x512@2x.png",
      "idiom" : "mac",
      "scale" : "2x",
      "size" : "512x512"
    }
  ],
  "info" : {
    "author" : "xcode",
    "version" : 1
  }
}
"#;

    #[test]
    fn matches_xcode_layout_byte_for_byte() {
        let bytes = Manifest::for_icon_set(&MAC_ICON_SET).to_xcode_json().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), EXPECTED);
    }

    #[test]
    fn output_is_stable() {
        let first = Manifest::for_icon_set(&MAC_ICON_SET).to_xcode_json().unwrap();
        let second = Manifest::for_icon_set(&MAC_ICON_SET).to_xcode_json().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn parses_back() {
        let manifest = Manifest::from_json(EXPECTED).unwrap();
        assert_eq!(manifest.images.len(), 10);
        assert_eq!(manifest.images[3].filename, "icon_32x32@2x.png");
        assert_eq!(manifest.images[3].scale, "2x");
        assert_eq!(manifest.info, ManifestInfo::default());
        assert_eq!(manifest, Manifest::for_icon_set(&MAC_ICON_SET));
    }

    #[test]
    fn empty_icon_set() {
        let manifest = Manifest::for_icon_set(&[]);
        assert!(manifest.images.is_empty());
        assert_eq!(manifest.info.version, 1);
    }
}
