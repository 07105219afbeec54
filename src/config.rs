//! Codec configuration.
//!
//! Handles loading, validating, and merging `rasterkit.toml` files. Stock
//! defaults are the base layer; each file on top only needs the keys it
//! wants to override, and tables merge key by key
//! (see [`load_layered_config`]).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [decode]
//! # Probe order when the format is unknown
//! priority = ["jpeg", "png", "gif", "webp", "tiff", "bmp", "wbmp"]
//!
//! [jpeg]
//! quality = 0               # 1-100, 0 = encoder default
//! # progressive = true      # omit to keep the image's interlace flag
//!
//! [png]
//! compression = -1          # -1 default, 0 none, 1-9 zlib level
//! # alpha = false           # omit to keep the image's save-alpha flag
//!
//! [bmp]
//! compression = false       # RLE (palette bitmaps only)
//!
//! [wbmp]
//! foreground = "#000000"    # color written as the foreground bit
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::color::Color;
use crate::format::{DecodableFormat, EncodableFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up by [`load_raw_config`].
pub const CONFIG_FILE_NAME: &str = "rasterkit.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Codec configuration loaded from `rasterkit.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    pub decode: DecodeConfig,
    pub jpeg: JpegConfig,
    pub png: PngConfig,
    pub bmp: BmpConfig,
    pub wbmp: WbmpConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecodeConfig {
    /// Formats tried, in order, when the input format is unknown.
    pub priority: Vec<DecodableFormat>,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            priority: DecodableFormat::ANY.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JpegConfig {
    /// 1-100; 0 leaves the encoder default.
    pub quality: i32,
    pub progressive: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PngConfig {
    pub compression: i32,
    pub alpha: Option<bool>,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: -1,
            alpha: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BmpConfig {
    pub compression: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WbmpConfig {
    /// Hex color (`#rgb`, `#rrggbb`, `#rrggbbaa`) written as foreground.
    pub foreground: String,
}

impl Default for WbmpConfig {
    fn default() -> Self {
        Self {
            foreground: "#000000".to_string(),
        }
    }
}

impl WbmpConfig {
    pub fn foreground_color(&self) -> Result<Color, ConfigError> {
        Color::from_hex(&self.foreground, false)
            .map_err(|e| ConfigError::Validation(format!("wbmp.foreground: {e}")))
    }
}

impl CodecConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0..=100).contains(&self.jpeg.quality) {
            return Err(ConfigError::Validation(
                "jpeg.quality must be 0-100".into(),
            ));
        }
        if !(-1..=9).contains(&self.png.compression) {
            return Err(ConfigError::Validation(
                "png.compression must be -1-9".into(),
            ));
        }
        if self.decode.priority.is_empty() {
            return Err(ConfigError::Validation(
                "decode.priority must not be empty".into(),
            ));
        }
        self.wbmp.foreground_color()?;
        Ok(())
    }

    /// The parameterized encodable variant of `kind` built from this config.
    ///
    /// Returns `Ok(None)` for formats that can only be decoded.
    pub fn encodable(&self, kind: DecodableFormat) -> Result<Option<EncodableFormat>, ConfigError> {
        Ok(Some(match kind {
            DecodableFormat::Bmp => EncodableFormat::Bmp {
                compression: self.bmp.compression,
            },
            DecodableFormat::Jpeg => EncodableFormat::Jpeg {
                quality: self.jpeg.quality,
                progressive: self.jpeg.progressive,
            },
            DecodableFormat::Png => EncodableFormat::Png {
                compression: self.png.compression,
                alpha: self.png.alpha,
            },
            DecodableFormat::Wbmp => EncodableFormat::Wbmp {
                foreground_index: self.wbmp.foreground_color()?.to_native().packed(),
            },
            other => return Ok(EncodableFormat::defaults(other)),
        }))
    }

    /// Probe order for [`decode_any`](crate::codec::decode_any).
    pub fn decode_priority(&self) -> &[DecodableFormat] {
        &self.decode.priority
    }
}

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(CodecConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `rasterkit.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no config file.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    log::debug!("loaded {}", config_path.display());
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<CodecConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: CodecConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `rasterkit.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<CodecConfig, ConfigError> {
    load_layered_config(&[dir])
}

/// Load and stack the `rasterkit.toml` of each directory, later ones on top.
///
/// A shared base directory followed by the working directory is the usual
/// order. Directories without a config file are skipped. Only the merged
/// result is validated, so a lower layer may be incomplete.
///
/// ```text
/// stock defaults
///   ← base/rasterkit.toml      [png] compression = 9
///   ← project/rasterkit.toml   [png] alpha = false
///   = [png] compression = 9, alpha = false
/// ```
pub fn load_layered_config(dirs: &[&Path]) -> Result<CodecConfig, ConfigError> {
    let mut merged = stock_defaults_value()?;
    for dir in dirs {
        if let Some(overlay) = load_raw_config(dir)? {
            merged = merge_toml(merged, overlay);
        }
    }
    resolve_config(merged, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = CodecConfig::default();
        assert_eq!(config.decode.priority, DecodableFormat::ANY.to_vec());
        assert_eq!(config.jpeg.quality, 0);
        assert_eq!(config.jpeg.progressive, None);
        assert_eq!(config.png.compression, -1);
        assert!(!config.bmp.compression);
        assert_eq!(config.wbmp.foreground, "#000000");
        config.validate().unwrap();
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[png]
alpha = false
"##;
        let config: CodecConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.png.alpha, Some(false));
        // Defaults preserved
        assert_eq!(config.png.compression, -1);
        assert_eq!(config.jpeg.quality, 0);
    }

    #[test]
    fn parse_priority_list() {
        let toml = r#"
[decode]
priority = ["png", "webp"]
"#;
        let config: CodecConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.decode_priority(),
            [DecodableFormat::Png, DecodableFormat::WebP]
        );
    }

    #[test]
    fn unknown_format_in_priority_rejected() {
        let toml = r#"
[decode]
priority = ["png", "heic"]
"#;
        assert!(toml::from_str::<CodecConfig>(toml).is_err());
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn validate_rejects_out_of_range_values() {
        let mut config = CodecConfig::default();
        config.jpeg.quality = 101;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let mut config = CodecConfig::default();
        config.png.compression = 10;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let mut config = CodecConfig::default();
        config.decode.priority.clear();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let mut config = CodecConfig::default();
        config.wbmp.foreground = "#12345".into();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // Encodable formats
    // =========================================================================

    #[test]
    fn encodable_carries_config_values() {
        let mut config = CodecConfig::default();
        config.jpeg.quality = 85;
        config.jpeg.progressive = Some(true);
        config.png.compression = 9;
        config.wbmp.foreground = "#ff0000".into();

        assert_eq!(
            config.encodable(DecodableFormat::Jpeg).unwrap(),
            Some(EncodableFormat::Jpeg {
                quality: 85,
                progressive: Some(true)
            })
        );
        assert_eq!(
            config.encodable(DecodableFormat::Png).unwrap(),
            Some(EncodableFormat::Png {
                compression: 9,
                alpha: None
            })
        );
        assert_eq!(
            config.encodable(DecodableFormat::Wbmp).unwrap(),
            Some(EncodableFormat::Wbmp {
                foreground_index: Color::RED.to_native().packed()
            })
        );
        assert_eq!(
            config.encodable(DecodableFormat::Gif).unwrap(),
            Some(EncodableFormat::Gif)
        );
        assert_eq!(config.encodable(DecodableFormat::Tga).unwrap(), None);
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_overlay_wins_and_base_survives() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str("[png]\ncompression = 3").unwrap();
        let merged = merge_toml(base, overlay);
        let config: CodecConfig = merged.try_into().unwrap();
        assert_eq!(config.png.compression, 3);
        assert_eq!(config.decode.priority, DecodableFormat::ANY.to_vec());
    }

    #[test]
    fn merge_replaces_arrays_whole() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str("[decode]\npriority = [\"gif\"]").unwrap();
        let config: CodecConfig = merge_toml(base, overlay).try_into().unwrap();
        assert_eq!(config.decode.priority, [DecodableFormat::Gif]);
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, CodecConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            r##"
[jpeg]
quality = 60

[wbmp]
foreground = "#fff"
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.jpeg.quality, 60);
        assert_eq!(config.wbmp.foreground, "#fff");
        assert_eq!(config.png.compression, -1);
    }

    #[test]
    fn load_config_rejects_unknown_keys() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "[jpeg]\nqualty = 60\n").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn load_config_rejects_invalid_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "[png]\ncompression = 12\n").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn layered_config_merges_tables_key_by_key() {
        let base = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        fs::write(
            base.path().join(CONFIG_FILE_NAME),
            "[png]\ncompression = 9\n\n[jpeg]\nquality = 40\n",
        )
        .unwrap();
        fs::write(
            project.path().join(CONFIG_FILE_NAME),
            "[png]\nalpha = false\n\n[jpeg]\nquality = 90\n",
        )
        .unwrap();

        let config = load_layered_config(&[base.path(), project.path()]).unwrap();
        // sibling key from the lower layer survives
        assert_eq!(config.png.compression, 9);
        assert_eq!(config.png.alpha, Some(false));
        assert_eq!(config.jpeg.quality, 90);
        assert_eq!(config.decode.priority, DecodableFormat::ANY.to_vec());
    }

    #[test]
    fn layered_config_skips_missing_layers() {
        let base = TempDir::new().unwrap();
        let empty = TempDir::new().unwrap();
        fs::write(base.path().join(CONFIG_FILE_NAME), "[bmp]\ncompression = true\n").unwrap();

        let config = load_layered_config(&[base.path(), empty.path()]).unwrap();
        assert!(config.bmp.compression);
        assert_eq!(load_layered_config(&[]).unwrap(), CodecConfig::default());
    }

    #[test]
    fn layered_config_validates_the_merged_result() {
        let base = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        fs::write(base.path().join(CONFIG_FILE_NAME), "[jpeg]\nquality = 500\n").unwrap();
        fs::write(project.path().join(CONFIG_FILE_NAME), "[jpeg]\nquality = 70\n").unwrap();
        assert_eq!(
            load_layered_config(&[base.path(), project.path()])
                .unwrap()
                .jpeg
                .quality,
            70
        );
        assert!(matches!(
            load_layered_config(&[project.path(), base.path()]),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn load_config_rejects_malformed_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "[jpeg\nquality = ").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }
}
