use eframe::egui;

use super::settings::EditorSettings;
use super::{Editor, Mode, View};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorKind {
    #[default]
    Default,
    Pointer,
}

/// One draw call, in canvas coordinates (viewport offset already applied).
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Edge {
        from: egui::Pos2,
        to: egui::Pos2,
        highlighted: bool,
    },
    /// Rubber band from a pending link source to the pointer.
    Preview { from: egui::Pos2, to: egui::Pos2 },
    Node {
        center: egui::Pos2,
        label: String,
        highlighted: bool,
    },
    ModeSelector {
        origin: egui::Pos2,
        cell_size: f32,
        active: usize,
    },
}

/// Full draw list for one editor state. Rebuilt from scratch after every
/// event; there is no diffing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub commands: Vec<DrawCommand>,
    pub cursor: CursorKind,
}

/// Drawing backend the scene is replayed onto.
pub trait Surface {
    fn draw_edge(&mut self, from: egui::Pos2, to: egui::Pos2, highlighted: bool);
    fn draw_node(&mut self, center: egui::Pos2, label: &str, highlighted: bool);
    fn draw_mode_selector(&mut self, origin: egui::Pos2, cell_size: f32, active: usize);
    fn set_cursor(&mut self, cursor: CursorKind);

    fn draw_preview(&mut self, from: egui::Pos2, to: egui::Pos2) {
        self.draw_edge(from, to, true);
    }
}

impl Scene {
    pub fn replay(&self, surface: &mut impl Surface) {
        for command in &self.commands {
            match command {
                DrawCommand::Edge {
                    from,
                    to,
                    highlighted,
                } => surface.draw_edge(*from, *to, *highlighted),
                DrawCommand::Preview { from, to } => surface.draw_preview(*from, *to),
                DrawCommand::Node {
                    center,
                    label,
                    highlighted,
                } => surface.draw_node(*center, label, *highlighted),
                DrawCommand::ModeSelector {
                    origin,
                    cell_size,
                    active,
                } => surface.draw_mode_selector(*origin, *cell_size, *active),
            }
        }
        surface.set_cursor(self.cursor);
    }

    #[cfg(test)]
    pub fn highlighted_nodes(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Node {
                    label,
                    highlighted: true,
                    ..
                } => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Editor {
    /// Edges first, then the link preview, then nodes, then the mode strip
    /// on top. Labels are the 1-based position in the node list.
    pub(super) fn build_scene(&self) -> Scene {
        let hover = self.hover();
        let graph = &self.graph;
        let mut commands =
            Vec::with_capacity(graph.edges().len() + graph.nodes().len() + 2);

        for (i, edge) in graph.edges().iter().enumerate() {
            let Some((a, b)) = graph.edge_endpoints(edge) else {
                continue;
            };
            commands.push(DrawCommand::Edge {
                from: self.view.world_to_screen(a),
                to: self.view.world_to_screen(b),
                highlighted: hover.edge == Some(i),
            });
        }
        if let Some((from, to)) = hover.preview {
            commands.push(DrawCommand::Preview { from, to });
        }
        for (i, node) in graph.nodes().iter().enumerate() {
            commands.push(DrawCommand::Node {
                center: self.view.world_to_screen(node.to_pos2()),
                label: (i + 1).to_string(),
                highlighted: hover.node == Some(i) || hover.source == Some(i),
            });
        }
        commands.push(DrawCommand::ModeSelector {
            origin: self.selector.origin(),
            cell_size: self.selector.cell_size(),
            active: self.selector.index(),
        });

        Scene {
            commands,
            cursor: hover.cursor,
        }
    }
}

pub(super) fn mode_button(ui: &mut egui::Ui, mode: Mode, current: Mode) -> bool {
    let label = format!("{} ({})", mode.label(), mode.glyph());
    ui.selectable_label(current == mode, label).clicked()
}

pub(super) fn draw_background(
    painter: &egui::Painter,
    rect: egui::Rect,
    view: &View,
    spacing: f32,
) {
    let bg = painter.ctx().style().visuals.extreme_bg_color;
    painter.rect_filled(rect, 0.0, bg);
    if spacing < 8.0 {
        return;
    }
    let grid_color = egui::Color32::from_gray(60);
    let start = rect.min + view.offset;
    let x0 = ((rect.min.x - start.x) / spacing).floor() * spacing + start.x;
    let y0 = ((rect.min.y - start.y) / spacing).floor() * spacing + start.y;
    let mut x = x0;
    while x < rect.max.x {
        painter.line_segment(
            [egui::pos2(x, rect.min.y), egui::pos2(x, rect.max.y)],
            egui::Stroke::new(1.0, grid_color),
        );
        x += spacing;
    }
    let mut y = y0;
    while y < rect.max.y {
        painter.line_segment(
            [egui::pos2(rect.min.x, y), egui::pos2(rect.max.x, y)],
            egui::Stroke::new(1.0, grid_color),
        );
        y += spacing;
    }
}

/// Paints scenes with an egui painter. Canvas coordinates are shifted by
/// `origin`, the top-left of the allocated canvas rect.
pub(super) struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    origin: egui::Vec2,
    settings: &'a EditorSettings,
}

impl<'a> PainterSurface<'a> {
    pub(super) fn new(
        painter: &'a egui::Painter,
        origin: egui::Pos2,
        settings: &'a EditorSettings,
    ) -> Self {
        Self {
            painter,
            origin: origin.to_vec2(),
            settings,
        }
    }
}

impl Surface for PainterSurface<'_> {
    fn draw_edge(&mut self, from: egui::Pos2, to: egui::Pos2, highlighted: bool) {
        let stroke = if highlighted {
            egui::Stroke::new(3.0, self.settings.active_color.to_color32())
        } else {
            egui::Stroke::new(2.0, self.settings.edge_color.to_color32())
        };
        self.painter
            .line_segment([from + self.origin, to + self.origin], stroke);
    }

    fn draw_preview(&mut self, from: egui::Pos2, to: egui::Pos2) {
        let stroke = egui::Stroke::new(2.0, self.settings.active_color.to_color32());
        draw_dashed_line(self.painter, from + self.origin, to + self.origin, stroke, 10.0, 5.0);
    }

    fn draw_node(&mut self, center: egui::Pos2, label: &str, highlighted: bool) {
        let center = center + self.origin;
        let radius = self.settings.node_radius;
        let font_id = egui::FontId::proportional(radius);
        if highlighted {
            self.painter
                .circle_filled(center, radius, self.settings.node_highlight_color.to_color32());
            self.painter.text(
                center,
                egui::Align2::CENTER_CENTER,
                label,
                font_id,
                egui::Color32::WHITE,
            );
        } else {
            let color = self.settings.node_color.to_color32();
            self.painter
                .circle_stroke(center, radius, egui::Stroke::new(1.5, color));
            self.painter
                .text(center, egui::Align2::CENTER_CENTER, label, font_id, color);
        }
    }

    fn draw_mode_selector(&mut self, origin: egui::Pos2, cell_size: f32, active: usize) {
        let origin = origin + self.origin;
        let frame = egui::Stroke::new(1.0, self.settings.selector_color.to_color32());
        let font_id = egui::FontId::proportional(cell_size / 1.8);
        for (i, mode) in Mode::ALL.iter().enumerate() {
            let cell = egui::Rect::from_min_size(
                origin + egui::vec2(0.0, i as f32 * cell_size),
                egui::vec2(cell_size, cell_size),
            );
            let color = if i == active {
                self.settings.active_color.to_color32()
            } else {
                self.settings.selector_color.to_color32()
            };
            self.painter.rect_stroke(cell, 0.0, frame, egui::StrokeKind::Middle);
            self.painter.text(
                cell.center(),
                egui::Align2::CENTER_CENTER,
                mode.glyph(),
                font_id.clone(),
                color,
            );
        }
    }

    fn set_cursor(&mut self, cursor: CursorKind) {
        let icon = match cursor {
            CursorKind::Default => egui::CursorIcon::Default,
            CursorKind::Pointer => egui::CursorIcon::PointingHand,
        };
        self.painter.ctx().set_cursor_icon(icon);
    }
}

fn draw_dashed_line(
    painter: &egui::Painter,
    a: egui::Pos2,
    b: egui::Pos2,
    stroke: egui::Stroke,
    dash_len: f32,
    gap_len: f32,
) {
    let v = b - a;
    let len = v.length();
    if len <= f32::EPSILON {
        return;
    }
    let dir = v / len;
    let mut pos = 0.0;
    let mut drawing = true;
    while pos < len {
        let seg_len = if drawing { dash_len } else { gap_len };
        let next_pos = (pos + seg_len).min(len);
        if drawing {
            let start = a + dir * pos;
            let end = a + dir * next_pos;
            painter.line_segment([start, end], stroke);
        }
        pos = next_pos;
        drawing = !drawing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Button;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        cursor: Option<CursorKind>,
    }

    impl Surface for Recorder {
        fn draw_edge(&mut self, from: egui::Pos2, to: egui::Pos2, highlighted: bool) {
            self.calls.push(format!(
                "edge {},{} {},{} {}",
                from.x, from.y, to.x, to.y, highlighted
            ));
        }

        fn draw_node(&mut self, center: egui::Pos2, label: &str, highlighted: bool) {
            self.calls
                .push(format!("node {label} {},{} {}", center.x, center.y, highlighted));
        }

        fn draw_mode_selector(&mut self, _origin: egui::Pos2, _cell_size: f32, active: usize) {
            self.calls.push(format!("selector {active}"));
        }

        fn set_cursor(&mut self, cursor: CursorKind) {
            self.cursor = Some(cursor);
        }
    }

    fn editor_with_nodes(points: &[(f32, f32)]) -> Editor {
        let mut editor = Editor::new(&EditorSettings::default());
        editor.set_canvas_size(egui::vec2(800.0, 600.0));
        editor.select_mode(Mode::NodeEdit);
        for &(x, y) in points {
            editor.on_pointer_down(egui::pos2(x, y), Button::Primary);
            editor.on_pointer_up(egui::pos2(x, y));
        }
        editor
    }

    fn replay(editor: &Editor) -> Recorder {
        let mut recorder = Recorder::default();
        editor.scene().replay(&mut recorder);
        recorder
    }

    #[test]
    fn empty_editor_draws_only_the_selector() {
        let editor = Editor::new(&EditorSettings::default());
        let recorder = replay(&editor);
        assert_eq!(recorder.calls, vec!["selector 0"]);
        assert_eq!(recorder.cursor, Some(CursorKind::Default));
    }

    #[test]
    fn scene_applies_viewport_offset_and_ordering() {
        let mut editor = editor_with_nodes(&[(100.0, 100.0), (300.0, 100.0)]);
        editor.graph.add_edge(0, 1);
        editor.view.pan(egui::vec2(10.0, 20.0));
        editor.on_pointer_move(egui::pos2(500.0, 500.0));

        let recorder = replay(&editor);
        assert_eq!(
            recorder.calls,
            vec![
                "edge 110,120 310,120 false",
                "node 1 110,120 false",
                "node 2 310,120 false",
                "selector 1",
            ]
        );
    }

    #[test]
    fn labels_renumber_after_deletion() {
        let mut editor = editor_with_nodes(&[(100.0, 100.0), (200.0, 100.0), (300.0, 100.0)]);
        editor.on_pointer_down(egui::pos2(100.0, 100.0), Button::Secondary);
        editor.on_pointer_move(egui::pos2(500.0, 500.0));
        let recorder = replay(&editor);
        assert_eq!(
            recorder.calls,
            vec!["node 1 200,100 false", "node 2 300,100 false", "selector 1"]
        );
    }

    #[test]
    fn hovering_node_in_node_mode_highlights_it() {
        let mut editor = editor_with_nodes(&[(100.0, 100.0), (300.0, 100.0)]);
        editor.on_pointer_move(egui::pos2(305.0, 95.0));
        assert_eq!(editor.scene().highlighted_nodes(), vec!["2"]);
        assert_eq!(editor.scene().cursor, CursorKind::Pointer);

        editor.on_pointer_move(egui::pos2(200.0, 300.0));
        assert!(editor.scene().highlighted_nodes().is_empty());
        assert_eq!(editor.scene().cursor, CursorKind::Default);
    }

    #[test]
    fn dragged_node_stays_highlighted() {
        let mut editor = editor_with_nodes(&[(100.0, 100.0)]);
        editor.on_pointer_down(egui::pos2(100.0, 100.0), Button::Primary);
        editor.on_pointer_move(egui::pos2(400.0, 400.0));
        assert_eq!(editor.scene().highlighted_nodes(), vec!["1"]);
    }

    #[test]
    fn link_mode_prefers_node_over_edge() {
        let mut editor = editor_with_nodes(&[(100.0, 100.0), (300.0, 100.0)]);
        editor.graph.add_edge(0, 1);
        editor.select_mode(Mode::EdgeEdit);

        editor.on_pointer_move(egui::pos2(115.0, 100.0));
        assert_eq!(editor.scene().highlighted_nodes(), vec!["1"]);
        assert!(matches!(
            editor.scene().commands[0],
            DrawCommand::Edge {
                highlighted: false,
                ..
            }
        ));

        editor.on_pointer_move(egui::pos2(200.0, 103.0));
        assert!(editor.scene().highlighted_nodes().is_empty());
        assert!(matches!(
            editor.scene().commands[0],
            DrawCommand::Edge {
                highlighted: true,
                ..
            }
        ));
        assert_eq!(editor.scene().cursor, CursorKind::Pointer);
    }

    #[test]
    fn pending_link_draws_preview_and_valid_targets() {
        let mut editor =
            editor_with_nodes(&[(100.0, 100.0), (300.0, 100.0), (300.0, 300.0)]);
        editor.graph.add_edge(0, 2);
        editor.select_mode(Mode::EdgeEdit);
        editor.on_pointer_down(egui::pos2(100.0, 100.0), Button::Primary);
        editor.on_pointer_up(egui::pos2(100.0, 100.0));

        editor.on_pointer_move(egui::pos2(200.0, 200.0));
        assert!(editor.scene().commands.contains(&DrawCommand::Preview {
            from: egui::pos2(100.0, 100.0),
            to: egui::pos2(200.0, 200.0),
        }));
        assert_eq!(editor.scene().highlighted_nodes(), vec!["1"]);

        // Valid target.
        editor.on_pointer_move(egui::pos2(300.0, 100.0));
        assert_eq!(editor.scene().highlighted_nodes(), vec!["1", "2"]);
        assert_eq!(editor.scene().cursor, CursorKind::Pointer);

        // Already linked to the source.
        editor.on_pointer_move(egui::pos2(300.0, 300.0));
        assert_eq!(editor.scene().highlighted_nodes(), vec!["1"]);
        assert_eq!(editor.scene().cursor, CursorKind::Default);
    }

    #[test]
    fn preview_defaults_to_an_active_edge() {
        let mut editor = editor_with_nodes(&[(100.0, 100.0)]);
        editor.select_mode(Mode::EdgeEdit);
        editor.on_pointer_down(egui::pos2(100.0, 100.0), Button::Primary);
        editor.on_pointer_move(egui::pos2(150.0, 100.0));
        let recorder = replay(&editor);
        assert_eq!(recorder.calls[0], "edge 100,100 150,100 true");
    }

    #[test]
    fn hovering_other_selector_cell_shows_pointer() {
        let mut editor = editor_with_nodes(&[]);
        // Active cell is NodeEdit (index 1).
        editor.on_pointer_move(egui::pos2(770.0, 75.0));
        assert_eq!(editor.scene().cursor, CursorKind::Default);
        editor.on_pointer_move(egui::pos2(770.0, 30.0));
        assert_eq!(editor.scene().cursor, CursorKind::Pointer);
    }

    #[test]
    fn pointer_leaving_clears_hover() {
        let mut editor = editor_with_nodes(&[(100.0, 100.0)]);
        editor.on_pointer_move(egui::pos2(100.0, 100.0));
        assert_eq!(editor.scene().highlighted_nodes(), vec!["1"]);
        editor.on_pointer_leave();
        assert!(editor.scene().highlighted_nodes().is_empty());
    }
}
