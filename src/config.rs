//! Visualization configuration
//!
//! Layout forces and render settings, loadable from a TOML file. Every field
//! has a default so partial files are accepted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ChainvizError, Result};
use crate::layout::Viewport;

/// Config file looked up in the working directory
pub const CONFIG_FILENAME: &str = ".chainviz.toml";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    /// Force simulation settings
    pub layout: LayoutConfig,

    /// Surface settings
    pub render: RenderConfig,
}

/// Force simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Target distance of the link force
    pub link_distance: f32,

    /// Link force strength
    pub link_strength: f32,

    /// Many-body strength (negative repels)
    pub charge_strength: f32,

    /// Centering force strength
    pub center_strength: f32,

    /// Alpha below which the simulation stops ticking
    pub alpha_min: f32,

    /// Per-tick alpha decay rate
    pub alpha_decay: f32,

    /// Fraction of velocity removed per tick
    pub velocity_decay: f32,

    /// Alpha used when restarting after a rebuild
    pub reheat_alpha: f32,

    /// Upper bound on ticks when settling outside an event loop
    pub max_ticks: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let alpha_min: f32 = 0.001;
        Self {
            link_distance: 100.0,
            link_strength: 0.5,
            charge_strength: -30.0,
            center_strength: 1.0,
            alpha_min,
            // cools from 1.0 to alpha_min in ~300 ticks
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            velocity_decay: 0.4,
            reheat_alpha: 0.5,
            max_ticks: 300,
        }
    }
}

/// Surface settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Viewport width
    pub width: f32,

    /// Viewport height
    pub height: f32,

    /// Label font size; also scales node markers
    pub font_size: f32,

    /// Opacity of elements outside the hovered neighborhood
    pub dim_opacity: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 600.0,
            font_size: 16.0,
            dim_opacity: 0.1,
        }
    }
}

impl RenderConfig {
    /// Drawing area of the configured size
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }
}

impl VizConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ChainvizError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ChainvizError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `.chainviz.toml` from the current directory.
    /// Returns `Ok(None)` if the file does not exist, `Err` if malformed.
    pub fn load_optional() -> Result<Option<Self>> {
        let path = Path::new(CONFIG_FILENAME);
        if !path.exists() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ChainvizError::ConfigWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_layout_defaults() {
        let config = LayoutConfig::default();
        assert_eq!(config.link_distance, 100.0);
        assert_eq!(config.link_strength, 0.5);
        assert_eq!(config.charge_strength, -30.0);
        assert_eq!(config.reheat_alpha, 0.5);
        assert!((config.alpha_decay - 0.0228).abs() < 0.001);
    }

    #[test]
    fn test_render_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.font_size, 16.0);
        assert_eq!(config.dim_opacity, 0.1);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("viz.toml");

        let mut config = VizConfig::default();
        config.layout.link_distance = 42.0;
        config.render.dim_opacity = 0.25;
        config.save(&path).unwrap();

        let loaded = VizConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("viz.toml");
        std::fs::write(&path, "[render]\nwidth = 300.0\n").unwrap();

        let loaded = VizConfig::load(&path).unwrap();
        assert_eq!(loaded.render.width, 300.0);
        assert_eq!(loaded.render.height, 600.0);
        assert_eq!(loaded.layout, LayoutConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        let err = VizConfig::load(Path::new("/nonexistent/chainviz.toml")).unwrap_err();
        assert!(matches!(err, ChainvizError::ConfigRead { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("viz.toml");
        std::fs::write(&path, "[layout\nlink_distance = ").unwrap();

        let err = VizConfig::load(&path).unwrap_err();
        assert!(matches!(err, ChainvizError::ConfigParse { .. }));
    }
}
