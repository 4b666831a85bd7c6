//! Draggable configuration, loadable from JSON.

use crate::limits::MovementLimits;
use crate::spring::SpringSpec;
use crate::tracker::DEFAULT_RENDER_SIZE;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// What is drawn inside the draggable surface.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Content {
    /// A plain filled surface of `render_size`.
    #[default]
    Shape,
    /// Host-provided children; the size comes from layout.
    Children,
    /// An image loaded from `source`.
    Image { source: String },
    /// A text label on the filled surface.
    Text { text: String },
}

/// Options recognised by a draggable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraggableConfig {
    /// Rest position, left edge.
    pub x: f64,
    /// Rest position, top edge.
    pub y: f64,
    /// Stacking order.
    pub z: i32,
    /// Width and height used until layout reports a size.
    pub render_size: f64,
    /// Spring back to the origin on release instead of staying put.
    pub should_reverse: bool,
    /// Suppress all gesture capture.
    pub disabled: bool,
    #[serde(flatten)]
    pub limits: MovementLimits,
    pub content: Content,
    /// Fill colour of the default surface.
    pub render_color: Option<String>,
    /// Draw the surface as a circle.
    pub is_circle: bool,
    /// Outline the current bounds.
    pub debug: bool,
    pub long_press_delay_ms: u64,
    pub spring: SpringSpec,
}

impl Default for DraggableConfig {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 1,
            render_size: DEFAULT_RENDER_SIZE,
            should_reverse: false,
            disabled: false,
            limits: MovementLimits::NONE,
            content: Content::default(),
            render_color: None,
            is_circle: false,
            debug: false,
            long_press_delay_ms: 500,
            spring: SpringSpec::default(),
        }
    }
}

impl DraggableConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded draggable config from {:?}", path);
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rest position.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Size assumed before the first layout report.
    pub fn initial_size(&self) -> Size {
        Size::new(self.render_size, self.render_size)
    }

    /// Hold time before a long press fires.
    pub fn long_press_delay(&self) -> Duration {
        Duration::from_millis(self.long_press_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = DraggableConfig::from_json("{}").unwrap();
        assert_eq!(config, DraggableConfig::default());
        assert_eq!(config.initial_size(), Size::new(36.0, 36.0));
        assert_eq!(config.z, 1);
    }

    #[test]
    fn test_parse_full_config() {
        let json = r##"{
            "x": 10, "y": 20, "z": 3,
            "render_size": 48,
            "should_reverse": true,
            "min_x": 0, "max_x": 300, "max_y": 500,
            "content": { "type": "text", "text": "Drag me" },
            "render_color": "#ff8800",
            "is_circle": true,
            "long_press_delay_ms": 800,
            "spring": { "stiffness": 200 }
        }"##;
        let config = DraggableConfig::from_json(json).unwrap();

        assert_eq!(config.origin(), Point::new(10.0, 20.0));
        assert!(config.should_reverse);
        assert_eq!(config.limits.min_x, Some(0.0));
        assert_eq!(config.limits.min_y, None);
        assert_eq!(config.limits.max_y, Some(500.0));
        assert_eq!(
            config.content,
            Content::Text {
                text: "Drag me".into()
            }
        );
        assert_eq!(config.long_press_delay(), Duration::from_millis(800));
        assert!((config.spring.stiffness - 200.0).abs() < f64::EPSILON);
        assert!((config.spring.damping - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_inverted_limits_are_accepted() {
        let config = DraggableConfig::from_json(r#"{ "min_x": 100, "max_x": 0 }"#).unwrap();
        assert_eq!(config.limits.min_x, Some(100.0));
        assert_eq!(config.limits.max_x, Some(0.0));
    }

    #[test]
    fn test_invalid_json() {
        let err = DraggableConfig::from_json("{ x: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "x": 7, "disabled": true }}"#).unwrap();

        let config = DraggableConfig::load(file.path()).unwrap();
        assert!(config.disabled);
        assert!((config.x - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DraggableConfig::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_json_roundtrip_keeps_limits_flat() {
        let config = DraggableConfig {
            limits: MovementLimits::new(None, Some(5.0), None, None),
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert!(json.contains("\"min_y\": 5.0"));
        assert_eq!(DraggableConfig::from_json(&json).unwrap(), config);
    }
}
