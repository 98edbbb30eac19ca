//! Application state for the TUI.

use std::cell::Cell;
use std::rc::Rc;

use super::surface::RowAction;
use crate::config::PickerConfig;
use crate::network::{AntennaId, Network, Satellite, TargetId};
use crate::picker::{AntennaPicker, Node};

/// The current UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal navigation mode.
    Normal,
    /// Help overlay mode.
    Help,
}

/// Main application state for the TUI.
pub struct App {
    /// The network the picker writes into.
    pub network: Network,

    /// Picker for the antenna being edited.
    pub picker: AntennaPicker,

    /// Cursor position among the visible rows.
    pub cursor: usize,

    /// Identities of the visible rows, in display order, as of the last frame.
    pub rows: Vec<TargetId>,

    /// Action the next render pass applies to the cursor row.
    pub pending: Option<RowAction>,

    /// Current UI mode.
    pub mode: Mode,

    /// Paint orbit colors.
    pub show_colors: bool,

    /// Application should quit.
    pub should_quit: bool,

    /// Status message to display.
    pub status_message: Option<String>,

    /// Set by the picker when its antenna goes away.
    closed: Rc<Cell<bool>>,

    probes: usize,
}

impl App {
    /// Create a new App instance.
    pub fn new(
        network: Network,
        antenna: AntennaId,
        config: &PickerConfig,
        show_colors: bool,
    ) -> Self {
        let closed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&closed);
        let picker = AntennaPicker::new(&network, antenna, config.style(), config.builder())
            .on_quit(move || flag.set(true));

        let mut app = Self {
            network,
            picker,
            cursor: 0,
            rows: Vec::new(),
            pending: None,
            mode: Mode::Normal,
            show_colors,
            should_quit: false,
            status_message: None,
            closed,
            probes: 0,
        };
        app.sync_rows();
        app
    }

    /// Recompute the visible rows from the picker's tree.
    pub fn sync_rows(&mut self) {
        let rows = {
            let tree = self.picker.tree();
            let mut rows = Vec::with_capacity(tree.len());
            let mut stack: Vec<&Node> = tree.top_level().iter().rev().collect();
            while let Some(node) = stack.pop() {
                rows.push(node.id);
                if node.expanded {
                    stack.extend(node.children.iter().rev());
                }
            }
            rows
        };
        self.set_rows(rows);
    }

    pub fn set_rows(&mut self, rows: Vec<TargetId>) {
        self.rows = rows;
        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.rows.is_empty() {
            return;
        }
        let last = self.rows.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    pub fn cursor_to_top(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_to_bottom(&mut self) {
        self.cursor = self.rows.len().saturating_sub(1);
    }

    pub fn cursor_id(&self) -> Option<TargetId> {
        self.rows.get(self.cursor).copied()
    }

    /// Queue a toggle or selection for the next frame.
    pub fn queue(&mut self, action: RowAction) {
        self.pending = Some(action);
    }

    pub fn antenna_name(&self) -> &str {
        self.network
            .antennas()
            .get(self.picker.antenna())
            .map(|a| a.name.as_str())
            .unwrap_or("?")
    }

    /// Name of the antenna's current target, or the sentinel label.
    pub fn target_label(&self) -> String {
        let view = self.network.view();
        let target = view.target_of(self.picker.antenna());
        match view.target_name(target) {
            Some(name) => name.to_string(),
            None => self.picker.tree().sentinel().label.clone(),
        }
    }

    /// Register a probe around the body under the cursor.
    pub fn add_probe(&mut self) {
        let Some(body) = self
            .cursor_id()
            .and_then(|id| self.network.bodies().get(id))
            .map(|b| (b.id, b.name.clone()))
        else {
            self.status_message = Some("Probes can only orbit bodies".to_string());
            return;
        };

        self.probes += 1;
        let name = format!("Probe {}", self.probes);
        self.network
            .register_satellite(Satellite::new(TargetId::new(), name.clone(), body.0));
        self.status_message = Some(format!("Registered {} around {}", name, body.1));
        self.sync_rows();
    }

    /// Unregister the satellite under the cursor.
    pub fn remove_satellite(&mut self) {
        let Some(id) = self
            .cursor_id()
            .filter(|id| self.network.satellites().get(*id).is_some())
        else {
            self.status_message = Some("Only satellites can be unregistered".to_string());
            return;
        };

        if let Some(satellite) = self.network.unregister_satellite(id) {
            self.status_message = Some(format!("Unregistered {}", satellite.name));
        }
        self.sync_rows();
    }

    /// Quit once the picker has been closed.
    pub fn check_closed(&mut self) {
        if self.closed.get() {
            self.should_quit = true;
        }
    }
}
