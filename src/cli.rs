//! Command-line surface: one subcommand per batch transform.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "tsad", version, about = "Synthetic time-series anomaly dataset toolkit")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a workload simulation and record a raw execution log.
    Simulate(SimulateArgs),
    /// Convert a raw execution log into a Data,Label training dataset.
    Label(LabelArgs),
    /// Join a hardware-monitor CSV against an execution log by timestamp.
    Merge(MergeArgs),
    /// Score a rule-based baseline detector against a labeled dataset.
    Detect(DetectArgs),
    /// Compute anomaly-sequence statistics for a labeled dataset.
    Stats(StatsArgs),
    /// Render a model-metrics CSV as a LaTeX table.
    Latex(LatexArgs),
    /// Benchmark-result aggregation.
    #[command(subcommand)]
    Bench(BenchCommand),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum MetricArg {
    Cpu,
    Ram,
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Where the execution log is written.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Which measurement the sampler records.
    #[arg(long, value_enum, default_value = "cpu")]
    pub metric: MetricArg,

    /// Use the sleep-timer anomaly instead of a workload spike (RAM runs).
    #[arg(long)]
    pub sleep_anomaly: bool,

    /// Total runtime in seconds (default: the profile's).
    #[arg(long)]
    pub runtime_secs: Option<u64>,

    /// Leading all-normal period in seconds (default: the profile's).
    #[arg(long)]
    pub initial_secs: Option<u64>,

    /// One-in-N anomaly draw per mixed-period round.
    #[arg(long)]
    pub anomaly_odds: Option<u32>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LabelPreset {
    /// Exact anomaly tag, propagate forward by one sample.
    CpuLoad,
    /// Exact anomaly tag only.
    CpuSleep,
    /// Anomaly tag prefix plus idle absorption around sleep anomalies.
    RamSleep,
}

#[derive(Args, Debug)]
pub struct LabelArgs {
    #[arg(short, long)]
    pub input: PathBuf,

    #[arg(short, long)]
    pub output: PathBuf,

    /// Metric column to read from the log.
    #[arg(long, default_value = "cpu_percent")]
    pub metric_column: String,

    /// Built-in policy preset.
    #[arg(long, value_enum, default_value = "cpu-load")]
    pub preset: LabelPreset,

    /// JSON policy file overriding the preset.
    #[arg(long)]
    pub policy: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Monitor CSV with `time` and a value column.
    #[arg(long)]
    pub data: PathBuf,

    /// Execution log with `timestamp` and `state` columns.
    #[arg(long)]
    pub log: PathBuf,

    #[arg(short, long)]
    pub output: PathBuf,

    /// Value column taken from the monitor CSV.
    #[arg(long, default_value = "User%")]
    pub value_column: String,

    /// State tag treated as anomalous.
    #[arg(long, default_value = "anomaly")]
    pub anomaly_tag: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum RuleArg {
    /// 530 < value < 700, runs of exactly 3 or 4 samples.
    MediumSpike,
    /// value < 60 sustained for more than 7 samples.
    SleepLow,
}

#[derive(Args, Debug)]
pub struct DetectArgs {
    #[arg(short, long)]
    pub input: PathBuf,

    #[arg(long, value_enum, default_value = "sleep-low")]
    pub rule: RuleArg,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    #[arg(short, long)]
    pub input: PathBuf,

    /// Report path (default: `<input stem>_metrics.txt` next to the input).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct LatexArgs {
    #[arg(short, long)]
    pub input: PathBuf,

    /// Table path (default: the input with a `.tex` extension).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum BenchCommand {
    /// Pivot a long `file,model,<metric>` table into a wide one.
    Pivot(PivotArgs),
    /// Compare two wide score tables model by model.
    Compare(CompareArgs),
    /// Sort a comparison summary by avg_abs_diff, largest first.
    Sort(SortArgs),
    /// Summarize per-dataset score files in a directory.
    Summary(SummaryArgs),
}

#[derive(Args, Debug)]
pub struct PivotArgs {
    #[arg(short, long)]
    pub input: PathBuf,

    #[arg(short, long)]
    pub output: PathBuf,

    #[arg(long, default_value = "file")]
    pub index: String,

    #[arg(long, default_value = "model")]
    pub column: String,

    #[arg(long, default_value = "VUS-PR")]
    pub value: String,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// The reproduced (wide) score table.
    pub ours: PathBuf,

    /// The published (wide) score table.
    pub theirs: PathBuf,

    #[arg(short, long)]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct SortArgs {
    /// Comparison summary rewritten in place.
    pub path: PathBuf,
}

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Directory of per-dataset score CSVs.
    #[arg(short, long)]
    pub input_dir: PathBuf,

    #[arg(short, long)]
    pub output: PathBuf,

    /// Metric columns to summarize.
    #[arg(long, value_delimiter = ',', default_values_t = vec!["VUS-PR".to_string(), "VUS-ROC".to_string()])]
    pub metrics: Vec<String>,
}
