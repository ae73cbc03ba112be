use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::config::load_config;
use crate::plan::compute_plan;
use crate::plan_dump::{plan_to_json, write_plan_dump};
#[cfg(feature = "png")]
use crate::render::write_output_png;
use crate::render::{render_svg, write_output_svg};
use crate::run::{parse_run_state, RunError, RunState};
use crate::templates::WorkflowKind;

#[derive(Parser, Debug)]
#[command(name = "flowviz", version, about = "Workflow-run graph visualizer")]
pub struct Args {
    /// Run-state JSON file, or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Render a built-in workflow template instead of a run snapshot
    #[arg(short = 'W', long = "workflow", conflicts_with = "input")]
    pub workflow: Option<String>,

    /// Override the run's current node (handy when previewing templates)
    #[arg(long = "current-node")]
    pub current_node: Option<String>,

    /// Output file. Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON5 file (theme name, themeVariables, layout overrides)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    #[cfg(feature = "png")]
    Png,
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let mut run_state = load_run_state(&args)?;
    if let Some(current) = args.current_node.clone() {
        run_state.current_node = Some(current);
    }

    let plan = compute_plan(&run_state, &config.theme, &config.layout);

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&plan, &config.theme, &config.layout);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        #[cfg(feature = "png")]
        OutputFormat::Png => {
            let svg = render_svg(&plan, &config.theme, &config.layout);
            let output = args
                .output
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("Output path required for png output"))?;
            write_output_png(&svg, output, &config.render)?;
        }
        OutputFormat::Json => match args.output.as_deref() {
            Some(path) => write_plan_dump(path, &plan)?,
            None => println!("{}", plan_to_json(&plan)?),
        },
    }

    Ok(())
}

fn load_run_state(args: &Args) -> Result<RunState> {
    if let Some(token) = &args.workflow {
        let kind = WorkflowKind::from_token(token)
            .ok_or_else(|| RunError::UnknownWorkflow(token.clone()))?;
        return Ok(RunState::for_template(kind));
    }
    let input = read_input(args.input.as_deref())?;
    Ok(parse_run_state(&input)?)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
