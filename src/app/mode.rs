use eframe::egui;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Pan,
    NodeEdit,
    EdgeEdit,
}

impl Mode {
    /// Selector order; wheel cycling walks this list.
    pub const ALL: [Mode; 3] = [Mode::Pan, Mode::NodeEdit, Mode::EdgeEdit];

    pub fn glyph(self) -> &'static str {
        match self {
            Mode::Pan => "P",
            Mode::NodeEdit => "N",
            Mode::EdgeEdit => "E",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Pan => "Pan",
            Mode::NodeEdit => "Node editing",
            Mode::EdgeEdit => "Link editing",
        }
    }
}

/// Vertical strip of square cells, one per mode, pinned near the top-right
/// corner of the canvas.
#[derive(Clone, Debug)]
pub struct ModeSelector {
    index: usize,
    origin: egui::Pos2,
    cell_size: f32,
    margin: f32,
}

impl ModeSelector {
    pub fn new(cell_size: f32, margin: f32) -> Self {
        Self {
            index: 0,
            origin: egui::pos2(margin, margin),
            cell_size,
            margin,
        }
    }

    pub fn mode(&self) -> Mode {
        Mode::ALL[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn origin(&self) -> egui::Pos2 {
        self.origin
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn rect(&self) -> egui::Rect {
        egui::Rect::from_min_size(
            self.origin,
            egui::vec2(self.cell_size, self.cell_size * Mode::ALL.len() as f32),
        )
    }

    /// Re-anchors the strip against the right edge of a canvas this wide.
    pub fn anchor(&mut self, canvas_width: f32) {
        self.origin = egui::pos2(
            canvas_width - self.margin - self.cell_size,
            self.margin,
        );
    }

    pub fn resize(&mut self, cell_size: f32, margin: f32, canvas_width: f32) {
        self.cell_size = cell_size;
        self.margin = margin;
        self.anchor(canvas_width);
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn hit_test(&self, p: egui::Pos2) -> bool {
        let r = self.rect();
        p.x >= r.min.x && p.x < r.max.x && p.y >= r.min.y && p.y < r.max.y
    }

    /// Row under `p`. Not clamped: only meaningful after [`Self::hit_test`].
    pub fn cell_index_at(&self, p: egui::Pos2) -> i32 {
        ((p.y - self.origin.y) / self.cell_size).floor() as i32
    }

    /// Selects the cell under `p`. Returns the newly selected mode, or `None`
    /// when `p` misses the strip.
    pub fn select_at(&mut self, p: egui::Pos2) -> Option<Mode> {
        if !self.hit_test(p) {
            return None;
        }
        let index = usize::try_from(self.cell_index_at(p)).ok()?;
        if index >= Mode::ALL.len() {
            return None;
        }
        self.index = index;
        Some(self.mode())
    }

    pub fn select(&mut self, mode: Mode) {
        if let Some(index) = Mode::ALL.iter().position(|m| *m == mode) {
            self.index = index;
        }
    }

    pub fn cycle(&mut self, direction: i32) -> Mode {
        let n = Mode::ALL.len() as i32;
        self.index = (self.index as i32 + n + direction.signum()).rem_euclid(n) as usize;
        self.mode()
    }
}
