//! `tsad` - batch transforms for synthetic anomaly-detection datasets.

mod cli;

use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use tsad_toolkit::labeling::LabelingConfig;
use tsad_toolkit::simulate::{AnomalyKind, SimulatorConfig};
use tsad_toolkit::{bench, detect, labeling, simulate, stats};

use cli::{BenchCommand, Cli, Command, LabelPreset, MetricArg, RuleArg};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Simulate(args) => run_simulate(args),
        Command::Label(args) => run_label(args),
        Command::Merge(args) => run_merge(args),
        Command::Detect(args) => run_detect(args),
        Command::Stats(args) => run_stats(args),
        Command::Latex(args) => run_latex(args),
        Command::Bench(command) => run_bench(command),
    }
}

fn run_simulate(args: cli::SimulateArgs) -> anyhow::Result<()> {
    let mut config = match (args.metric, args.sleep_anomaly) {
        (MetricArg::Cpu, false) => SimulatorConfig::cpu_default(args.output),
        (MetricArg::Cpu, true) => {
            let mut c = SimulatorConfig::cpu_default(args.output);
            c.anomaly = AnomalyKind::SleepIncrease {
                extra: Duration::from_secs(2),
            };
            c
        }
        (MetricArg::Ram, false) => SimulatorConfig::ram_default(args.output),
        (MetricArg::Ram, true) => SimulatorConfig::ram_sleep_default(args.output),
    };
    if let Some(secs) = args.runtime_secs {
        config.total_runtime = Duration::from_secs(secs);
    }
    if let Some(secs) = args.initial_secs {
        config.initial_normal_period = Duration::from_secs(secs);
    }
    if let Some(odds) = args.anomaly_odds {
        config.anomaly_odds = odds;
    }

    simulate::run(&config).context("simulation failed")?;
    Ok(())
}

fn run_label(args: cli::LabelArgs) -> anyhow::Result<()> {
    let config = match &args.policy {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read policy file {}", path.display()))?;
            serde_json::from_str::<LabelingConfig>(&raw)
                .with_context(|| format!("invalid policy file {}", path.display()))?
        }
        None => match args.preset {
            LabelPreset::CpuLoad => LabelingConfig::cpu_load(),
            LabelPreset::CpuSleep => LabelingConfig::cpu_sleep(),
            LabelPreset::RamSleep => LabelingConfig::ram_sleep(),
        },
    };

    labeling::convert_log(&args.input, &args.output, &args.metric_column, &config)?;
    Ok(())
}

fn run_merge(args: cli::MergeArgs) -> anyhow::Result<()> {
    labeling::merge_hardware_log(
        &args.data,
        &args.log,
        &args.value_column,
        &args.anomaly_tag,
        &args.output,
    )?;
    Ok(())
}

fn run_detect(args: cli::DetectArgs) -> anyhow::Result<()> {
    let rule = match args.rule {
        RuleArg::MediumSpike => detect::BaselineRule::medium_spike(),
        RuleArg::SleepLow => detect::BaselineRule::sleep_low(),
    };
    let counts = detect::run_baseline(&args.input, &rule)?;

    println!("True Positives (TP): {}", counts.true_positives);
    println!("False Positives (FP): {}", counts.false_positives);
    println!("False Negatives (FN): {}", counts.false_negatives);
    println!("Precision: {:.4}", counts.precision());
    println!("Sensitivity (Recall): {:.4}", counts.recall());
    Ok(())
}

fn run_stats(args: cli::StatsArgs) -> anyhow::Result<()> {
    let output = args.output.unwrap_or_else(|| {
        let stem = args
            .input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("dataset");
        args.input.with_file_name(format!("{stem}_metrics.txt"))
    });
    let summary = stats::write_stats_report(&args.input, &output)?;
    print!("{}", summary.report());
    Ok(())
}

fn run_latex(args: cli::LatexArgs) -> anyhow::Result<()> {
    let output = args.output.unwrap_or_else(|| args.input.with_extension("tex"));
    stats::latex::write_table(&args.input, &output)?;
    Ok(())
}

fn run_bench(command: BenchCommand) -> anyhow::Result<()> {
    match command {
        BenchCommand::Pivot(args) => {
            bench::pivot_long_to_wide(&args.input, &args.output, &args.index, &args.column, &args.value)?;
        }
        BenchCommand::Compare(args) => {
            bench::compare_wide_tables(&args.ours, &args.theirs, &args.output)?;
        }
        BenchCommand::Sort(args) => {
            bench::sort_by_avg_abs_diff(&args.path)?;
        }
        BenchCommand::Summary(args) => {
            let metrics: Vec<&str> = args.metrics.iter().map(String::as_str).collect();
            bench::summarize_dataset_dir(&args.input_dir, &metrics, &args.output)?;
        }
    }
    Ok(())
}
