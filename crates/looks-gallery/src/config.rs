//! YAML session configuration.
//!
//! ```yaml
//! gallery:
//!   looks: [Original, Mono, Chrome, Sepia]
//!   initial: 0
//! preview:
//!   max_dimension: 256
//! parameters:
//!   brightness: { min: -100, max: 100, curve: { kind: linear, k: 0.01 } }
//!   contrast:
//!     min: -100
//!     max: 100
//!     curve: { kind: piecewise, native_min: 0, neutral: 1, native_max: 2 }
//!   saturation: { min: 0, max: 200, curve: { kind: linear, k: 0.01 } }
//!   warmth: { min: 0, max: 100, curve: { kind: linear, k: 65 } }
//! ```
//!
//! Every section is optional. Missing sections fall back to the built-in
//! gallery, initial look `0`, full-size previews and the default parameter
//! table. A `parameters` section must cover every parameter.
//!
//! Everything is checked in [`SessionConfig::build`], so a bad config stops
//! the session before the first slider moves.

use crate::{EditSession, Gallery, GalleryError, GalleryResult};
use looks_ops::PhotoEffect;
use looks_tools::{ColourCorrection, Parameter, ParameterSpec, ParameterTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Gallery section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GallerySection {
    /// Preset names in display order.
    pub looks: Vec<String>,
    /// Index of the look applied when the session starts.
    pub initial: usize,
}

impl Default for GallerySection {
    fn default() -> Self {
        Self {
            looks: PhotoEffect::ALL.iter().map(|e| e.name().to_string()).collect(),
            initial: 0,
        }
    }
}

/// Preview section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSection {
    /// Longest preview side in pixels; full size when absent.
    pub max_dimension: Option<u32>,
}

/// Session configuration as read from YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Looks offered and the initial pick.
    pub gallery: GallerySection,
    /// Preview rendering.
    pub preview: PreviewSection,
    /// Parameter curves; the default table when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<BTreeMap<Parameter, ParameterSpec>>,
}

impl SessionConfig {
    /// Loads configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> GalleryResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GalleryError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading session config");
        Self::from_yaml_str(&content)
    }

    /// Loads configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> GalleryResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serializes back to YAML.
    pub fn to_yaml_string(&self) -> GalleryResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validated parameter table.
    pub fn parameter_table(&self) -> GalleryResult<ParameterTable> {
        match &self.parameters {
            Some(specs) => Ok(ParameterTable::from_specs(specs.clone())?),
            None => Ok(ParameterTable::default()),
        }
    }

    /// Validated gallery.
    pub fn gallery(&self) -> GalleryResult<Gallery> {
        let gallery = Gallery::from_names(self.gallery.looks.as_slice())?;
        if self.gallery.initial >= gallery.len() {
            return Err(GalleryError::InitialOutOfRange {
                index: self.gallery.initial,
                len: gallery.len(),
            });
        }
        Ok(gallery)
    }

    /// Checks the whole configuration without building a session.
    pub fn validate(&self) -> GalleryResult<()> {
        self.parameter_table()?;
        self.gallery()?;
        Ok(())
    }

    /// Builds a session from this configuration.
    pub fn build(&self) -> GalleryResult<EditSession> {
        let table = Arc::new(self.parameter_table()?);
        let gallery = Arc::new(self.gallery()?);
        debug!(
            looks = gallery.len(),
            initial = self.gallery.initial,
            preview = ?self.preview.max_dimension,
            "building edit session"
        );
        let session = EditSession::new(gallery, self.gallery.initial)?
            .with_tool(ColourCorrection::with_table(table));
        Ok(match self.preview.max_dimension {
            Some(max_dim) => session.with_preview_size(max_dim),
            None => session,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use looks_tools::{Parameterized, ToolError};
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SessionConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
        let session = config.build().unwrap();
        assert_eq!(session.gallery().len(), PhotoEffect::ALL.len());
        assert_eq!(session.cache().thumbnail(), None);
        assert_eq!(**session.tool().table(), ParameterTable::default());
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
gallery:
  looks: [original, mono, chrome]
  initial: 2
preview:
  max_dimension: 128
parameters:
  brightness: { min: -50, max: 50, curve: { kind: linear, k: 0.02 } }
  contrast:
    min: -100
    max: 100
    curve: { kind: piecewise, native_min: 0.5, neutral: 1, native_max: 3 }
  saturation: { min: 0, max: 200, curve: { kind: linear, k: 0.01 } }
  warmth: { min: 0, max: 100, curve: { kind: linear, k: 65 } }
"#;
        let config = SessionConfig::from_yaml_str(yaml).unwrap();
        let mut session = config.build().unwrap();
        assert_eq!(session.gallery().names(), vec!["Original", "Mono", "Chrome"]);
        assert_eq!(session.selection().applied(), 2);
        assert_eq!(session.cache().thumbnail(), Some(128));
        assert_eq!(session.tool().max_value(Parameter::Brightness), 50.0);
        assert_eq!(session.set_value(80.0, Parameter::Brightness).unwrap(), 50.0);
        assert!((session.tool().color_controls().brightness - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_look() {
        let config = SessionConfig::from_yaml_str("gallery: { looks: [Original, Vivid] }").unwrap();
        assert!(matches!(config.build(), Err(GalleryError::UnknownLook { ref name }) if name == "Vivid"));
    }

    #[test]
    fn test_initial_out_of_range() {
        let config = SessionConfig::from_yaml_str("gallery: { looks: [Original, Mono], initial: 2 }").unwrap();
        assert!(matches!(
            config.validate(),
            Err(GalleryError::InitialOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_duplicate_looks() {
        let config = SessionConfig::from_yaml_str("gallery: { looks: [Mono, mono] }").unwrap();
        assert!(matches!(config.validate(), Err(GalleryError::DuplicateName { .. })));
    }

    #[test]
    fn test_incomplete_parameters() {
        let yaml = "parameters: { brightness: { min: -100, max: 100, curve: { kind: linear, k: 0.01 } } }";
        let config = SessionConfig::from_yaml_str(yaml).unwrap();
        assert!(matches!(
            config.build(),
            Err(GalleryError::Tool(ToolError::MissingParameter(Parameter::Contrast)))
        ));
    }

    #[test]
    fn test_zero_scale() {
        let mut config = SessionConfig::default();
        let mut specs: BTreeMap<_, _> = ParameterTable::default().into();
        specs.insert(Parameter::Warmth, ParameterSpec::linear(0.0, 100.0, 0.0));
        config.parameters = Some(specs);
        assert!(matches!(
            config.validate(),
            Err(GalleryError::Tool(ToolError::InvalidScale { parameter: Parameter::Warmth, .. }))
        ));
    }

    #[test]
    fn test_bad_yaml() {
        assert!(matches!(
            SessionConfig::from_yaml_str("gallery: [not, a, map]"),
            Err(GalleryError::Yaml(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gallery:\n  looks: [Original, Sepia]\n  initial: 1").unwrap();
        let config = SessionConfig::from_file(file.path()).unwrap();
        assert_eq!(config.gallery.initial, 1);
        assert_eq!(config.build().unwrap().selection().applied(), 1);

        let missing = SessionConfig::from_file("/nonexistent/looks.yaml");
        assert!(matches!(missing, Err(GalleryError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_roundtrip() {
        let config = SessionConfig {
            preview: PreviewSection {
                max_dimension: Some(64),
            },
            ..SessionConfig::default()
        };
        let yaml = config.to_yaml_string().unwrap();
        assert_eq!(SessionConfig::from_yaml_str(&yaml).unwrap(), config);
    }
}
