//! Viewer settings

use serde::{Deserialize, Serialize};

use crate::i18n::Lang;

/// Grid display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    /// Show grid
    pub visible: bool,
    /// Grid cell size in meters
    pub size: f32,
    /// Number of grid lines in each direction from origin
    pub range: i32,
    /// Grid line opacity (0.0 - 1.0)
    pub opacity: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            visible: true,
            size: 1.0,
            range: 10,
            opacity: 0.5,
        }
    }
}

/// Camera and pointer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraSettings {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Degrees of orbit per pixel of drag
    pub orbit_sensitivity: f32,
    /// Zoom factor per scroll point
    pub zoom_sensitivity: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            orbit_sensitivity: 0.4,
            zoom_sensitivity: 0.002,
        }
    }
}

/// Viewport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportSettings {
    /// Background color RGB
    pub background_color: [u8; 3],
    /// Selection outline color RGB
    pub selection_color: [u8; 3],
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            background_color: [0xf5, 0xf7, 0xfb],
            selection_color: [0x0e, 0xa5, 0xe9],
        }
    }
}

/// All viewer settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewerSettings {
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub viewport: ViewportSettings,
    #[serde(default)]
    pub language: Lang,
}

impl ViewerSettings {
    fn config_path() -> Option<std::path::PathBuf> {
        directories::ProjectDirs::from("com", "plan3d", "plan3d")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| Self::load_from(&path).ok())
            .unwrap_or_default()
    }

    /// Load settings from a specific file
    pub fn load_from(path: &std::path::Path) -> Result<Self, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        serde_json::from_str(&json).map_err(|e| format!("Invalid settings JSON: {e}"))
    }

    /// Save settings to file
    pub fn save(&self) {
        let Some(path) = Self::config_path() else {
            return;
        };
        if let Err(e) = self.save_to(&path) {
            tracing::warn!("{e}");
        }
    }

    /// Save settings to a specific file, creating parent directories
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), String> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| format!("Failed to create {}: {e}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {e}"))?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write {}: {e}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("plan3d-settings-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_save_load_roundtrip() {
        let path = temp_path("roundtrip.json");
        let mut s = ViewerSettings::default();
        s.grid.visible = false;
        s.language = Lang::En;
        s.save_to(&path).unwrap();
        assert_eq!(ViewerSettings::load_from(&path).unwrap(), s);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let path = temp_path("partial.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"language": "En"}"#).unwrap();
        let s = ViewerSettings::load_from(&path).unwrap();
        assert_eq!(s.language, Lang::En);
        assert_eq!(s.grid, GridSettings::default());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let path = temp_path("corrupt.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();
        assert!(ViewerSettings::load_from(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
