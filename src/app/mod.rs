use crate::model;
use eframe::egui;
use tracing::{debug, info, warn};

mod help;
mod interaction;
mod mode;
mod render;
mod settings;
mod update;

pub use interaction::{Button, Interaction};
pub use mode::{Mode, ModeSelector};
pub use render::Scene;
pub use settings::{EditorSettings, SettingsError};

/// Pan translation between node-local and canvas coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct View {
    pub offset: egui::Vec2,
}

impl View {
    pub fn world_to_screen(&self, world: egui::Pos2) -> egui::Pos2 {
        world + self.offset
    }

    pub fn screen_to_world(&self, screen: egui::Pos2) -> egui::Pos2 {
        screen - self.offset
    }

    pub fn pan(&mut self, delta: egui::Vec2) {
        self.offset += delta;
    }
}

/// One editing session: the graph, the viewport, the mode strip and the
/// transient pointer state. Every pointer or wheel event funnels through
/// here and ends with a full scene rebuild.
pub struct Editor {
    graph: model::Graph,
    view: View,
    selector: ModeSelector,
    interaction: Interaction,
    pointer: Option<egui::Pos2>,
    node_radius: f32,
    edge_pick_radius: f32,
    canvas_size: egui::Vec2,
    scene: Scene,
    redraws: u64,
}

impl Editor {
    pub fn new(settings: &EditorSettings) -> Self {
        let mut editor = Self {
            graph: model::Graph::default(),
            view: View::default(),
            selector: ModeSelector::new(settings.selector_cell_size, settings.selector_margin),
            interaction: Interaction::Idle,
            pointer: None,
            node_radius: settings.node_radius,
            edge_pick_radius: settings.edge_pick_radius,
            canvas_size: egui::Vec2::ZERO,
            scene: Scene::default(),
            redraws: 0,
        };
        editor.refresh();
        editor
    }

    pub fn graph(&self) -> &model::Graph {
        &self.graph
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn mode(&self) -> Mode {
        self.selector.mode()
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Number of scene rebuilds so far, one per state-affecting event.
    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    pub fn set_canvas_size(&mut self, size: egui::Vec2) {
        if size == self.canvas_size {
            return;
        }
        self.canvas_size = size;
        self.selector.anchor(size.x);
        self.refresh();
    }

    pub fn apply_settings(&mut self, settings: &EditorSettings) {
        self.node_radius = settings.node_radius;
        self.edge_pick_radius = settings.edge_pick_radius;
        self.selector.resize(
            settings.selector_cell_size,
            settings.selector_margin,
            self.canvas_size.x,
        );
        self.interaction.reset();
        self.refresh();
    }

    /// Keyboard shortcut path into the mode strip.
    pub fn select_mode(&mut self, mode: Mode) {
        self.set_mode(mode);
        self.refresh();
    }

    /// Drops any drag or pending link.
    pub fn cancel(&mut self) {
        if !self.interaction.is_idle() {
            debug!(interaction = ?self.interaction, "cancelled");
        }
        self.interaction.reset();
        self.refresh();
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.selector.mode() == mode {
            return;
        }
        self.selector.select(mode);
        self.mode_changed();
    }

    pub(super) fn mode_changed(&mut self) {
        debug!(mode = ?self.selector.mode(), "mode changed");
        self.interaction.reset();
    }

    fn refresh(&mut self) {
        self.scene = self.build_scene();
        self.redraws += 1;
    }
}

pub struct GraphApp {
    editor: Editor,
    settings: EditorSettings,
    settings_path: String,
    status: Option<String>,
    show_help: bool,
}

impl GraphApp {
    fn config_path() -> Option<String> {
        if let Some(home) = std::env::var_os("HOME") {
            let path = std::path::PathBuf::from(home)
                .join(".config")
                .join("graphsketch.toml");
            if path.exists() {
                return Some(path.display().to_string());
            }
        }
        if std::path::Path::new("settings.toml").exists() {
            return Some("settings.toml".to_string());
        }
        None
    }

    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings_path = Self::config_path().unwrap_or_else(|| "settings.toml".to_string());
        let (settings, status) = Self::read_settings(&settings_path);
        Self::with_settings(settings, settings_path, status)
    }

    fn with_settings(settings: EditorSettings, settings_path: String, status: Option<String>) -> Self {
        Self {
            editor: Editor::new(&settings),
            settings,
            settings_path,
            status,
            show_help: false,
        }
    }

    /// A press that reached the canvas; it also retires the last settings
    /// message.
    pub(super) fn press_canvas(&mut self, pos: egui::Pos2, button: Button) {
        self.status = None;
        self.editor.on_pointer_down(pos, button);
    }

    pub(super) fn status_text(&self) -> String {
        if let Some(source) = self.editor.interaction().pending_source() {
            format!("Linking from node {}", source + 1)
        } else if let Some(status) = &self.status {
            status.clone()
        } else {
            "Ready".to_string()
        }
    }

    fn read_settings(path: &str) -> (EditorSettings, Option<String>) {
        match settings::load_settings(path) {
            Ok(settings) => {
                info!(path, "loaded settings");
                (settings, None)
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path, "no settings file, using defaults");
                (EditorSettings::default(), None)
            }
            Err(e) => {
                warn!(path, error = %e, "failed to load settings, using defaults");
                (EditorSettings::default(), Some(format!("Settings: {e}")))
            }
        }
    }

    pub(super) fn reload_settings(&mut self) {
        let (settings, status) = Self::read_settings(&self.settings_path);
        self.editor.apply_settings(&settings);
        self.settings = settings;
        self.status = status.or_else(|| Some(format!("Reloaded {}", self.settings_path)));
    }

    pub(super) fn persist_settings(&mut self) {
        match settings::save_settings(&self.settings_path, &self.settings) {
            Ok(()) => {
                debug!(path = %self.settings_path, "saved settings");
                self.status = Some(format!("Saved {}", self.settings_path));
            }
            Err(e) => {
                warn!(path = %self.settings_path, error = %e, "failed to save settings");
                self.status = Some(format!("Settings: {e}"));
            }
        }
    }
}
