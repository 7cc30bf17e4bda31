use clap::Parser;
use gui_bridge::bridge::GuiBridge;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tripcore::view::Command;
use tripcore::DashboardConfig;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Headless driver for the trip analytics dashboard")]
struct Args {
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Comma-separated command script, e.g. `run,reset,run`
    #[arg(long, value_delimiter = ',')]
    commands: Vec<Command>,
    /// Fix the sampler seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = DashboardConfig::default().scatter_points)]
    scatter_points: usize,
    /// Emit one JSON snapshot per step instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Append a one-line summary per step to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.commands, args.seed, args.scatter_points)
    };

    let gui_bridge = GuiBridge::new(args.json);
    let runner = Runner::new(workflow_config);
    let result = runner.execute()?;

    gui_bridge.publish("boot", &result.boot)?;
    for step in &result.steps {
        gui_bridge.publish(&step.command.to_string(), &step.model)?;
    }
    gui_bridge.publish_status(&format!(
        "runs {} resets {} render failures {}",
        result.metrics.runs, result.metrics.resets, result.metrics.render_failures
    ));

    if let Some(report_path) = args.report {
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&report_path)?;
        for step in &result.steps {
            let line = format!(
                "command={} state={} trips={} avg_speed={} avg_fare={} p95_speed={} peak_hours={:?}\n",
                step.command,
                step.model.state,
                step.model.kpis.total_trips,
                step.model.kpis.avg_speed,
                step.model.kpis.avg_fare,
                step.model.kpis.p95_speed,
                step.model.peak_hours
            );
            file.write_all(line.as_bytes())?;
        }
    }

    Ok(())
}
