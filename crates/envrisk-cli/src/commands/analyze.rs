//! Analyze command implementation

use crate::cli::AnalyzeArgs;
use crate::config_loader::load_config_with_overrides;
use crate::output::OutputWriter;
use crate::output_types::{AnalyzeOutput, OutputFiles};
use anyhow::{bail, Context, Result};
use envrisk_analysis::{
    assess_batch, prioritize_areas, project_heatmap, CandidateSets, DemographicTable,
};
use envrisk_core::config::{validate_vulnerability, CliConfigOverrides};
use envrisk_core::features::parse_records;
use envrisk_core::models::MeasurementRecord;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tabled::Tabled;

pub fn execute(
    args: AnalyzeArgs,
    config_path: Option<&Path>,
    output: &OutputWriter,
) -> Result<()> {
    let demographic = args
        .demographic
        .map(|value| validate_vulnerability("demographic_vulnerability", value))
        .transpose()?;

    let config = load_config_with_overrides(
        config_path,
        CliConfigOverrides {
            demographic_vulnerability: demographic,
            output_dir: args.output_dir.clone(),
            report_top: args.top,
        },
    )?;

    // Load inputs
    let air = load_records(&args.air, "air-quality")?;
    let water = load_records(&args.water, "water-quality")?;
    let superfund = load_records(&args.superfund, "superfund")?;
    let locations = match &args.locations {
        Some(path) => load_records(path, "location")?,
        None => air.clone(),
    };

    if locations.is_empty() {
        bail!("No locations to assess");
    }

    output.info(format!(
        "Assessing {} locations against {} superfund sites, {} air stations and {} water sources",
        locations.len(),
        superfund.len(),
        air.len(),
        water.len()
    ));

    // Risk assessment, prioritization, heatmap
    let candidates = CandidateSets {
        superfund_sites: &superfund,
        air_stations: &air,
        water_sources: &water,
    };
    let demographics = DemographicTable::from_config(&config);
    let batch = assess_batch(&locations, &candidates, &demographics);

    for failure in &batch.failures {
        output.warning(format!(
            "Skipped location #{} ({}): {}",
            failure.index, failure.location, failure.reason
        ));
    }

    let priority_areas = prioritize_areas(&batch.assessments);

    let heatmap = if batch.assessments.is_empty() {
        output.warning("No location could be assessed; heatmap not generated");
        None
    } else {
        Some(project_heatmap(&batch.assessments)?)
    };

    // Save outputs
    let files = if args.dry_run {
        output.info("Dry run: no files written");
        None
    } else {
        let output_dir = &config.output_dir.value;
        fs::create_dir_all(output_dir).with_context(|| {
            format!("Failed to create output directory {}", output_dir.display())
        })?;

        let risk_assessments =
            write_json(&output_dir.join("risk_assessments.json"), &batch.assessments)?;
        let priority_file = write_json(&output_dir.join("priority_areas.json"), &priority_areas)?;
        let heatmap_path = output_dir.join("heatmap_data.json");
        let heatmap_file = match &heatmap {
            Some(heatmap) => Some(write_json(&heatmap_path, heatmap)?),
            None => {
                // a heatmap from an earlier run would not match the new assessments
                remove_stale(&heatmap_path)?;
                None
            }
        };

        Some(OutputFiles {
            risk_assessments: risk_assessments.display().to_string(),
            priority_areas: priority_file.display().to_string(),
            heatmap: heatmap_file.map(|p| p.display().to_string()),
        })
    };

    let top_n = config.report_top.value;
    let high_priority_count = batch.high_priority_count();

    if output.is_json() {
        output.result(AnalyzeOutput {
            locations_assessed: batch.assessments.len(),
            high_priority_count,
            failures: batch.failures,
            top_priorities: priority_areas.into_iter().take(top_n).collect(),
            files,
        })?;
        return Ok(());
    }

    output.section("Top Priority Areas");

    #[derive(Tabled)]
    struct PriorityRow {
        #[tabled(rename = "Rank")]
        rank: usize,
        #[tabled(rename = "Location")]
        location: String,
        #[tabled(rename = "Risk")]
        composite_risk: f64,
        #[tabled(rename = "Category")]
        category: String,
        #[tabled(rename = "Recommended Actions")]
        actions: String,
    }

    let rows: Vec<PriorityRow> = priority_areas
        .iter()
        .take(top_n)
        .map(|area| PriorityRow {
            rank: area.rank,
            location: area.assessment.location.clone(),
            composite_risk: area.assessment.composite_risk,
            category: area.assessment.category.to_string(),
            actions: area.recommended_actions.join("\n"),
        })
        .collect();
    output.table(rows);

    output.section("Summary");
    output.kv("Assessed", batch.assessments.len());
    output.kv("Skipped", batch.failures.len());
    output.kv("High priority", high_priority_count);
    if let Some(heatmap) = &heatmap {
        output.kv("Heatmap points", heatmap.metadata.point_count);
    }

    if let Some(files) = files {
        output.success(format!("Saved {}", files.risk_assessments));
        output.success(format!("Saved {}", files.priority_areas));
        if let Some(heatmap) = files.heatmap {
            output.success(format!("Saved {}", heatmap));
        }
    }

    Ok(())
}

/// Read and flatten one input file
fn load_records(path: &Path, kind: &str) -> Result<Vec<MeasurementRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} data from {}", kind, path.display()))?;

    let records = parse_records(&content)
        .with_context(|| format!("Failed to parse {} data in {}", kind, path.display()))?;

    tracing::debug!(kind, count = records.len(), path = %path.display(), "loaded records");
    Ok(records)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<PathBuf> {
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path.to_path_buf())
}

fn remove_stale(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)
            .with_context(|| format!("Failed to remove stale {}", path.display()))?;
        tracing::info!(path = %path.display(), "removed stale output");
    }
    Ok(())
}
