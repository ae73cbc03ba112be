use serde::{Deserialize, Serialize};

use crate::run::RunStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub node_text_color: String,
    pub node_muted_text_color: String,
    pub status_pending: String,
    pub status_running: String,
    pub status_completed: String,
    pub status_failed: String,
    pub active_gradient_start: String,
    pub active_gradient_end: String,
    pub active_border: String,
    pub edge_color: String,
    pub edge_active_color: String,
    pub edge_label_color: String,
    pub edge_label_background: String,
}

impl Theme {
    /// Dark console palette used by the run monitor this crate grew out of.
    pub fn console() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            background: "#0e1118".to_string(),
            node_text_color: "#f5f7fb".to_string(),
            node_muted_text_color: "#c3cad8".to_string(),
            status_pending: "#9e9e9e".to_string(),
            status_running: "#2196f3".to_string(),
            status_completed: "#4caf50".to_string(),
            status_failed: "#f44336".to_string(),
            active_gradient_start: "#2f80ed".to_string(),
            active_gradient_end: "#56ccf2".to_string(),
            active_border: "rgba(255,255,255,0.6)".to_string(),
            edge_color: "#5c6c84".to_string(),
            edge_active_color: "#56ccf2".to_string(),
            edge_label_color: "#9aa8c0".to_string(),
            edge_label_background: "rgba(15, 23, 42, 0.9)".to_string(),
        }
    }

    pub fn light() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            background: "#ffffff".to_string(),
            node_text_color: "#1c2430".to_string(),
            node_muted_text_color: "#5a6577".to_string(),
            status_pending: "#bdbdbd".to_string(),
            status_running: "#64b5f6".to_string(),
            status_completed: "#81c784".to_string(),
            status_failed: "#e57373".to_string(),
            active_gradient_start: "#2f80ed".to_string(),
            active_gradient_end: "#56ccf2".to_string(),
            active_border: "rgba(28,36,48,0.5)".to_string(),
            edge_color: "#8a99b3".to_string(),
            edge_active_color: "#2f80ed".to_string(),
            edge_label_color: "#5a6577".to_string(),
            edge_label_background: "rgba(238,242,248,0.9)".to_string(),
        }
    }

    /// One of the four fixed status colors; unknown statuses never reach
    /// here because deserialization already folds them into `Pending`.
    pub fn status_color(&self, status: RunStatus) -> &str {
        match status {
            RunStatus::Pending => &self.status_pending,
            RunStatus::Running => &self.status_running,
            RunStatus::Completed => &self.status_completed,
            RunStatus::Failed => &self.status_failed,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::console()
    }
}
