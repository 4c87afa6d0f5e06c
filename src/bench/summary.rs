use std::path::Path;

use serde::Serialize;

use crate::error::{Result, ToolkitError};

/// Statistical model family used when averaging benchmark scores.
pub const STATISTICAL_MODELS: [&str; 15] = [
    "Sub-IForest",
    "Sub-LOF",
    "IForest",
    "KShapeAD",
    "SAND",
    "KMeansAD",
    "Sub-MCD",
    "LOF",
    "Sub-KNN",
    "POLY",
    "Sub-PCA",
    "Sub-HBOS",
    "Sub-OCSVM",
    "MatrixProfile",
    "SR",
];

/// Neural-network model family.
pub const NEURAL_NET_MODELS: [&str; 8] = [
    "LSTMAD",
    "USAD",
    "TranAD",
    "OmniAnomaly",
    "CNN",
    "AnomalyTransformer",
    "FITS",
    "AutoEncoder",
];

/// One summary row: a dataset/metric pair with best model and family means.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub dataset: String,
    pub metric: String,
    pub best_model: String,
    pub best_score: f64,
    pub avg_all: f64,
    pub avg_statistical: f64,
    pub avg_neural_net: f64,
}

/// Summarize every per-dataset score CSV in a directory.
///
/// Each file needs a `Model` column plus the requested metric columns;
/// files missing one of them are skipped with a warning. The variant name
/// `KMeansAD_U` is normalized to `KMeansAD` before family matching.
pub fn summarize_dataset_dir(input_dir: &Path, metrics: &[&str], output: &Path) -> Result<Vec<DatasetSummary>> {
    if !input_dir.is_dir() {
        return Err(ToolkitError::FileNotFound(input_dir.to_path_buf()));
    }

    let mut paths: Vec<_> = std::fs::read_dir(input_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map_or(false, |ext| ext == "csv"))
        .collect();
    paths.sort();

    let mut summaries = Vec::new();
    for path in &paths {
        match summarize_file(path, metrics) {
            Ok(mut rows) => summaries.append(&mut rows),
            Err(e) => log::warn!("skipping {}: {}", path.display(), e),
        }
    }

    if summaries.is_empty() {
        log::info!("nothing to process: no usable score files in {}", input_dir.display());
        return Ok(summaries);
    }

    write_summaries(output, &summaries)?;
    log::info!(
        "summarized {} datasets -> {}",
        summaries.len() / metrics.len().max(1),
        output.display()
    );
    Ok(summaries)
}

fn summarize_file(path: &Path, metrics: &[&str]) -> Result<Vec<DatasetSummary>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let model_idx = headers.iter().position(|h| h.trim() == "Model");
    let metric_indices: Vec<Option<usize>> = metrics
        .iter()
        .map(|m| headers.iter().position(|h| h.trim() == *m))
        .collect();

    let mut missing: Vec<&str> = Vec::new();
    if model_idx.is_none() {
        missing.push("Model");
    }
    for (metric, idx) in metrics.iter().zip(&metric_indices) {
        if idx.is_none() {
            missing.push(*metric);
        }
    }
    if !missing.is_empty() {
        return Err(ToolkitError::MissingColumns {
            path: path.to_path_buf(),
            columns: missing.join(", "),
        });
    }
    let model_idx = model_idx.unwrap();

    // (model, score per metric)
    let mut scores: Vec<(String, Vec<Option<f64>>)> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut model = record.get(model_idx).unwrap_or("").trim().to_string();
        if model == "KMeansAD_U" {
            model = "KMeansAD".to_string();
        }
        let row_scores = metric_indices
            .iter()
            .map(|idx| idx.and_then(|i| record.get(i)).and_then(|c| c.trim().parse::<f64>().ok()))
            .collect();
        scores.push((model, row_scores));
    }

    let dataset = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();

    let mut rows = Vec::with_capacity(metrics.len());
    for (metric_pos, metric) in metrics.iter().enumerate() {
        let valid: Vec<(&str, f64)> = scores
            .iter()
            .filter_map(|(m, s)| s[metric_pos].map(|v| (m.as_str(), v)))
            .collect();
        if valid.is_empty() {
            continue;
        }

        let (best_model, best_score) = valid
            .iter()
            .fold(valid[0], |acc, &(m, v)| if v > acc.1 { (m, v) } else { acc });

        rows.push(DatasetSummary {
            dataset: dataset.clone(),
            metric: metric.to_string(),
            best_model: best_model.to_string(),
            best_score,
            avg_all: mean(valid.iter().map(|(_, v)| *v)),
            avg_statistical: mean(
                valid
                    .iter()
                    .filter(|(m, _)| STATISTICAL_MODELS.contains(m))
                    .map(|(_, v)| *v),
            ),
            avg_neural_net: mean(
                valid
                    .iter()
                    .filter(|(m, _)| NEURAL_NET_MODELS.contains(m))
                    .map(|(_, v)| *v),
            ),
        });
    }
    Ok(rows)
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let collected: Vec<f64> = values.collect();
    if collected.is_empty() {
        0.0
    } else {
        collected.iter().sum::<f64>() / collected.len() as f64
    }
}

fn write_summaries(output: &Path, summaries: &[DatasetSummary]) -> Result<()> {
    let mut writer = csv::Writer::from_path(output)?;
    writer.write_record([
        "dataset",
        "metric",
        "best_model",
        "best_score",
        "avg_all",
        "avg_statistical",
        "avg_neural_net",
    ])?;
    for s in summaries {
        writer.write_record(&[
            s.dataset.clone(),
            s.metric.clone(),
            s.best_model.clone(),
            s.best_score.to_string(),
            s.avg_all.to_string(),
            s.avg_statistical.to_string(),
            s.avg_neural_net.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
