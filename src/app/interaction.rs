//! Pointer state machine for the canvas.
//!
//! ```text
//! Idle -> Panning          (primary down, pan mode)
//! Idle -> DraggingNode     (primary down, node mode: grab or create)
//! Idle -> EdgePending      (primary down on a node, link mode)
//! EdgePending -> Idle      (primary down anywhere, link mode; links on a valid target)
//!
//! Panning | DraggingNode -> Idle   (pointer up)
//! EdgePending -> EdgePending       (pointer up: links are click-click)
//! Any -> Idle                      (mode change, wheel)
//! ```

use eframe::egui;
use tracing::{debug, trace};

use super::render::CursorKind;
use super::{Editor, Mode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    /// Creates, grabs and links.
    Primary,
    /// Deletes.
    Secondary,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Interaction {
    #[default]
    Idle,

    Panning {
        /// Pointer position at the previous move, in canvas coordinates.
        last: egui::Pos2,
    },

    DraggingNode {
        index: usize,
        last: egui::Pos2,
    },

    /// First click of the two-click link protocol landed on `source`.
    EdgePending { source: usize },
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Panning { .. } | Self::DraggingNode { .. })
    }

    pub fn dragged_node(&self) -> Option<usize> {
        match self {
            Self::DraggingNode { index, .. } => Some(*index),
            _ => None,
        }
    }

    pub fn pending_source(&self) -> Option<usize> {
        match self {
            Self::EdgePending { source } => Some(*source),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    /// Pointer release ends drags but keeps a pending link source.
    pub fn release(&mut self) {
        if !matches!(self, Self::EdgePending { .. }) {
            *self = Self::Idle;
        }
    }

    /// Follows the node renumbering done by `Graph::remove_node`.
    pub fn node_removed(&mut self, removed: usize) {
        match self {
            Self::DraggingNode { index, .. } | Self::EdgePending { source: index } => {
                if *index == removed {
                    *self = Self::Idle;
                } else if *index > removed {
                    *index -= 1;
                }
            }
            Self::Idle | Self::Panning { .. } => {}
        }
    }
}

/// Feedback derived from the pointer position; never mutates the model.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(super) struct Hover {
    pub node: Option<usize>,
    pub edge: Option<usize>,
    pub source: Option<usize>,
    pub preview: Option<(egui::Pos2, egui::Pos2)>,
    pub cursor: CursorKind,
}

impl Editor {
    pub fn on_pointer_down(&mut self, pos: egui::Pos2, button: Button) {
        self.pointer = Some(pos);

        if self.selector.hit_test(pos) {
            let previous = self.selector.mode();
            if let Some(mode) = self.selector.select_at(pos) {
                if mode != previous {
                    self.mode_changed();
                }
            }
            self.refresh();
            return;
        }

        let world = self.view.screen_to_world(pos);
        match (self.selector.mode(), button) {
            (Mode::Pan, Button::Primary) => {
                self.interaction = Interaction::Panning { last: pos };
            }
            (Mode::Pan, Button::Secondary) => {}
            (Mode::NodeEdit, Button::Primary) => {
                let pick = self.graph.place_node(world, self.node_radius * 2.0);
                debug!(?pick, x = world.x, y = world.y, "node press");
                self.interaction = Interaction::DraggingNode {
                    index: pick.index(),
                    last: pos,
                };
            }
            (Mode::NodeEdit, Button::Secondary) => {
                if let Some(index) = self.graph.remove_node_at(world, self.node_radius) {
                    debug!(index, "node removed");
                    self.interaction.node_removed(index);
                }
            }
            (Mode::EdgeEdit, Button::Primary) => self.press_link(world),
            (Mode::EdgeEdit, Button::Secondary) => {
                if let Some(index) = self.graph.remove_edge_at(world, self.edge_pick_radius) {
                    debug!(index, "edge removed");
                }
            }
        }
        self.refresh();
    }

    fn press_link(&mut self, world: egui::Pos2) {
        let hit = self.graph.find_node_at(world, self.node_radius);
        match self.interaction.pending_source() {
            None => {
                if let Some(source) = hit {
                    debug!(source, "edge source picked");
                    self.interaction = Interaction::EdgePending { source };
                }
            }
            Some(source) => {
                if let Some(target) = hit {
                    if self.graph.add_edge(source, target) {
                        debug!(source, target, "edge added");
                    }
                }
                self.interaction = Interaction::Idle;
            }
        }
    }

    pub fn on_pointer_move(&mut self, pos: egui::Pos2) {
        self.pointer = Some(pos);
        match &mut self.interaction {
            Interaction::Panning { last } => {
                let delta = pos - *last;
                *last = pos;
                self.view.pan(delta);
            }
            Interaction::DraggingNode { index, last } => {
                let delta = pos - *last;
                *last = pos;
                self.graph.translate_node(*index, delta);
            }
            Interaction::Idle | Interaction::EdgePending { .. } => {}
        }
        self.refresh();
    }

    pub fn on_pointer_up(&mut self, pos: egui::Pos2) {
        self.pointer = Some(pos);
        if let Some(index) = self.interaction.dragged_node() {
            debug!(index, "node drag finished");
        }
        self.interaction.release();
        self.refresh();
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer = None;
        self.refresh();
    }

    /// `delta_y` uses the browser convention: positive scrolls down and
    /// advances to the next mode.
    pub fn on_wheel(&mut self, delta_y: f32) {
        if delta_y == 0.0 || delta_y.is_nan() {
            return;
        }
        let direction = if delta_y > 0.0 { 1 } else { -1 };
        let mode = self.selector.cycle(direction);
        debug!(?mode, "mode cycled");
        self.interaction.reset();
        self.refresh();
    }

    pub(super) fn hover(&self) -> Hover {
        let mut hover = Hover::default();
        let Some(pos) = self.pointer else {
            return hover;
        };

        if let Interaction::EdgePending { source } = self.interaction {
            if let Some(node) = self.graph.node(source) {
                hover.preview = Some((self.view.world_to_screen(node.to_pos2()), pos));
            }
            hover.source = Some(source);
        }

        if self.selector.hit_test(pos) && !self.interaction.is_dragging() {
            if self.selector.cell_index_at(pos) != self.selector.index() as i32 {
                hover.cursor = CursorKind::Pointer;
            }
            return hover;
        }

        let world = self.view.screen_to_world(pos);
        match (self.selector.mode(), self.interaction) {
            (_, Interaction::DraggingNode { index, .. }) => {
                hover.node = Some(index);
                hover.cursor = CursorKind::Pointer;
            }
            (Mode::NodeEdit, _) => {
                if let Some(index) = self.graph.find_node_at(world, self.node_radius) {
                    hover.node = Some(index);
                    hover.cursor = CursorKind::Pointer;
                }
            }
            (Mode::EdgeEdit, Interaction::EdgePending { source }) => {
                if let Some(target) = self.graph.find_node_at(world, self.node_radius) {
                    if target != source && !self.graph.has_edge(source, target) {
                        hover.node = Some(target);
                        hover.cursor = CursorKind::Pointer;
                    }
                }
            }
            (Mode::EdgeEdit, _) => {
                if let Some(index) = self.graph.find_node_at(world, self.node_radius) {
                    hover.node = Some(index);
                    hover.cursor = CursorKind::Pointer;
                } else if let Some(index) = self.graph.find_edge_at(world, self.edge_pick_radius) {
                    hover.edge = Some(index);
                    hover.cursor = CursorKind::Pointer;
                }
            }
            (Mode::Pan, _) => {}
        }
        trace!(?hover, "hover");
        hover
    }
}
