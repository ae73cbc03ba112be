#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod plan;
pub mod plan_dump;
pub mod render;
pub mod run;
pub mod templates;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig};
pub use layout::compute_layout;
pub use plan::{classify_edges, compute_plan, resolve_node_visual};
pub use run::parse_run_state;
pub use theme::Theme;
