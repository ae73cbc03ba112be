use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::plan::RenderPlan;

pub fn plan_to_json(plan: &RenderPlan) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(plan)?)
}

pub fn write_plan_dump(path: &Path, plan: &RenderPlan) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, plan)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::plan::compute_plan;
    use crate::run::RunState;
    use crate::templates::WorkflowKind;
    use crate::theme::Theme;

    #[test]
    fn dump_exposes_ranks_and_edge_kinds() {
        let run = RunState::for_template(WorkflowKind::PostReview);
        let plan = compute_plan(&run, &Theme::console(), &LayoutConfig::default());
        let json = plan_to_json(&plan).unwrap();
        assert!(json.contains("\"rank\""));
        assert!(json.contains("\"selfLoop\""));
        assert!(json.contains("\"is_active\""));
    }
}
