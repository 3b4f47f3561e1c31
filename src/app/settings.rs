use eframe::egui;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

/// Errors raised while reading or writing the settings file.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorSettings {
    /// Radius of a node disc; also the ordinary pick radius.
    pub node_radius: f32,
    pub edge_pick_radius: f32,
    pub selector_cell_size: f32,
    /// Gap between the selector strip and the top-right canvas corner.
    pub selector_margin: f32,
    pub show_grid: bool,
    pub grid_size: f32,
    pub node_color: Rgba,
    pub node_highlight_color: Rgba,
    pub active_color: Rgba,
    pub edge_color: Rgba,
    pub selector_color: Rgba,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            node_radius: 20.0,
            edge_pick_radius: 5.0,
            selector_cell_size: 45.0,
            selector_margin: 10.0,
            show_grid: true,
            grid_size: 64.0,
            node_color: Rgba::rgb(0x40, 0xbf, 0xbf),
            node_highlight_color: Rgba::rgb(0x62, 0xdf, 0xdf),
            active_color: Rgba::rgb(0x40, 0xbf, 0xbf),
            edge_color: Rgba::rgb(0x40, 0x40, 0x40),
            selector_color: Rgba::rgb(0, 0, 0),
        }
    }
}

impl EditorSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        let lengths = [
            ("node_radius", self.node_radius),
            ("edge_pick_radius", self.edge_pick_radius),
            ("selector_cell_size", self.selector_cell_size),
            ("grid_size", self.grid_size),
        ];
        for (field, value) in lengths {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::Invalid {
                    field,
                    reason: format!("expected a positive length, got {value}"),
                });
            }
        }
        if !self.selector_margin.is_finite() || self.selector_margin < 0.0 {
            return Err(SettingsError::Invalid {
                field: "selector_margin",
                reason: format!("expected a non-negative length, got {}", self.selector_margin),
            });
        }
        Ok(())
    }
}

pub fn load_settings(path: &str) -> Result<EditorSettings, SettingsError> {
    let s = std::fs::read_to_string(path)?;
    let settings = if path.ends_with(".json") {
        serde_json::from_str::<EditorSettings>(&s)?
    } else {
        match toml::from_str::<EditorSettings>(&s) {
            Ok(settings) => settings,
            Err(toml_err) => {
                serde_json::from_str::<EditorSettings>(&s).map_err(|_| toml_err)?
            }
        }
    };
    settings.validate()?;
    Ok(settings)
}

pub fn save_settings(path: &str, settings: &EditorSettings) -> Result<(), SettingsError> {
    if path.ends_with(".json") {
        let json = serde_json::to_string_pretty(settings)?;
        std::fs::write(path, json)?;
    } else {
        let toml = toml::to_string_pretty(settings)?;
        std::fs::write(path, toml)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_in(dir: &tempfile::TempDir, name: &str) -> String {
        dir.path().join(name).display().to_string()
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = path_in(&dir, "settings.toml");
        std::fs::write(&path, "node_radius = 12.5\nshow_grid = false\n").unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.node_radius, 12.5);
        assert!(!settings.show_grid);
        assert_eq!(settings.edge_pick_radius, 5.0);
        assert_eq!(settings.selector_cell_size, 45.0);
    }

    #[test]
    fn toml_round_trips_through_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = path_in(&dir, "settings.toml");
        let mut settings = EditorSettings::default();
        settings.grid_size = 32.0;
        settings.active_color = Rgba::rgb(200, 40, 40);

        save_settings(&path, &settings).unwrap();
        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn json_file_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = path_in(&dir, "settings.json");
        std::fs::write(&path, r#"{ "edge_pick_radius": 8.0 }"#).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.edge_pick_radius, 8.0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_settings(&path_in(&dir, "absent.toml")).unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }

    #[test]
    fn garbage_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = path_in(&dir, "settings.toml");
        std::fs::write(&path, "node_radius = [").unwrap();
        assert!(matches!(load_settings(&path), Err(SettingsError::Toml(_))));
    }

    #[test]
    fn non_positive_radius_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = path_in(&dir, "settings.toml");
        std::fs::write(&path, "node_radius = 0.0\n").unwrap();
        let err = load_settings(&path).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "node_radius",
                ..
            }
        ));
    }
}
