use std::path::Path;

use crate::constants::{DATA_COLUMN, LABEL_COLUMN};
use crate::error::Result;

use super::record::LabeledSample;

/// Write a `Data,Label` training dataset.
///
/// Writing happens only after the full sequence is processed in memory, so a
/// failed run never leaves a partial output file behind.
pub fn write_training_data(path: &Path, samples: &[LabeledSample]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([DATA_COLUMN, LABEL_COLUMN])?;
    for sample in samples {
        writer.write_record([sample.value.to_string(), sample.label.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}
