use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::theme::Theme;

/// Routing used for ordinary (non-self-loop) edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeRouting {
    Straight,
    #[default]
    Step,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Horizontal distance between rank columns.
    pub column_spacing: f32,
    /// Vertical distance between slots within a rank.
    pub row_spacing: f32,
    pub node_width: f32,
    pub node_height: f32,
    /// How far a self-loop arc swings away from its node box.
    pub self_loop_offset: f32,
    pub edge_routing: EdgeRouting,
    pub label_line_height: f32,
    /// Margin around the whole drawing when rendered.
    pub padding: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            column_spacing: 240.0,
            row_spacing: 140.0,
            node_width: 140.0,
            node_height: 72.0,
            self_loop_offset: 60.0,
            edge_routing: EdgeRouting::Step,
            label_line_height: 1.2,
            padding: 40.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    theme: Option<String>,
    #[serde(rename = "themeVariables")]
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutOverrides>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    background: Option<String>,
    node_text_color: Option<String>,
    status_pending: Option<String>,
    status_running: Option<String>,
    status_completed: Option<String>,
    status_failed: Option<String>,
    edge_color: Option<String>,
    edge_active_color: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutOverrides {
    column_spacing: Option<f32>,
    row_spacing: Option<f32>,
    node_width: Option<f32>,
    node_height: Option<f32>,
    self_loop_offset: Option<f32>,
    edge_routing: Option<EdgeRouting>,
    padding: Option<f32>,
}

/// Load a config file (JSON5, so comments and trailing commas are fine)
/// on top of the defaults. `None` returns the defaults untouched.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = json5::from_str(&contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match theme_name {
            "console" | "dark" => config.theme = Theme::console(),
            "light" => config.theme = Theme::light(),
            other => anyhow::bail!("unknown theme: {other}"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.node_text_color {
            config.theme.node_text_color = v;
        }
        if let Some(v) = vars.status_pending {
            config.theme.status_pending = v;
        }
        if let Some(v) = vars.status_running {
            config.theme.status_running = v;
        }
        if let Some(v) = vars.status_completed {
            config.theme.status_completed = v;
        }
        if let Some(v) = vars.status_failed {
            config.theme.status_failed = v;
        }
        if let Some(v) = vars.edge_color {
            config.theme.edge_color = v;
        }
        if let Some(v) = vars.edge_active_color {
            config.theme.edge_active_color = v;
        }
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.column_spacing {
            config.layout.column_spacing = v;
        }
        if let Some(v) = layout.row_spacing {
            config.layout.row_spacing = v;
        }
        if let Some(v) = layout.node_width {
            config.layout.node_width = v;
        }
        if let Some(v) = layout.node_height {
            config.layout.node_height = v;
        }
        if let Some(v) = layout.self_loop_offset {
            config.layout.self_loop_offset = v;
        }
        if let Some(v) = layout.edge_routing {
            config.layout.edge_routing = v;
        }
        if let Some(v) = layout.padding {
            config.layout.padding = v;
        }
    }

    Ok(config)
}
