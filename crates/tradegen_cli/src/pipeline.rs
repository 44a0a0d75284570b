//! End-to-end generation run.
//!
//! Select scenario, validate, generate, derive, then write the report. Each
//! step is logged; validation failures stop the run before anything is drawn
//! or written.

use crate::config::AppConfig;
use crate::error::Result;
use std::time::Instant;
use tracing::{info, warn};
use tradegen_core::{
    derive_with_rule, validate, DerivationSummary, FlagRule, GenerationReport, Scenario,
    TradeGenerator,
};
use tradegen_report::{sink_for, TradeReport, WrittenReport};

/// Pipeline processing step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStep {
    /// Looking up the scenario
    SelectingScenario,
    /// Checking scenario parameters
    Validating,
    /// Drawing records
    Generating,
    /// Computing trade values and flags
    Deriving,
    /// Writing the report
    WritingReport,
}

impl PipelineStep {
    /// Get the step name for display
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectingScenario => "Selecting Scenario",
            Self::Validating => "Validating",
            Self::Generating => "Generating",
            Self::Deriving => "Deriving",
            Self::WritingReport => "Writing Report",
        }
    }
}

/// What a run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Scenario used
    pub scenario: String,
    /// Records requested
    pub requested: usize,
    /// Records generated
    pub generated: usize,
    /// Records skipped by the generator
    pub skipped: usize,
    /// Flag counts
    pub derivation: DerivationSummary,
    /// Report file details
    pub report: WrittenReport,
    /// Execution duration in milliseconds
    pub duration_ms: u64,
}

/// Execute one run with a validated configuration.
pub fn run(config: &AppConfig) -> Result<RunSummary> {
    let start = Instant::now();
    let settings = &config.run;

    let step = PipelineStep::SelectingScenario;
    let catalog = config.catalog()?;
    let scenario = catalog.select(&settings.scenario)?;
    info!(
        step = step.name(),
        scenario = %scenario.name,
        quantity_range = %scenario.quantity_range,
        statuses = %scenario.status_distribution,
        "Scenario selected"
    );

    let step = PipelineStep::Validating;
    validate(&scenario.quantity_range, &scenario.status_distribution)?;
    let threshold = settings.threshold()?;
    let format = settings.report_format()?;
    info!(step = step.name(), "Scenario parameters valid");

    let step = PipelineStep::Generating;
    info!(
        step = step.name(),
        num_records = settings.num_records,
        parallel = settings.parallel,
        seed = ?settings.seed,
        "Generating trade records"
    );
    let generated = generate(config, scenario)?;

    let step = PipelineStep::Deriving;
    let rule = FlagRule::new(threshold);
    let skipped = generated.skipped_count();
    let rows = derive_with_rule(generated.records, &rule);
    let derivation = DerivationSummary::from_records(&rows, &rule);
    info!(
        step = step.name(),
        total = derivation.total,
        flagged = derivation.flagged,
        failed = derivation.failed,
        large = derivation.large,
        "Derived trade values and review flags"
    );

    let step = PipelineStep::WritingReport;
    let report = TradeReport::new(&scenario.name, &rows, settings.num_records, threshold);
    let written = sink_for(format, &settings.output_path).write(&report)?;
    for warning in &written.warnings {
        warn!(step = step.name(), "{}", warning);
    }

    let duration_ms = start.elapsed().as_millis() as u64;
    info!(
        path = %written.path.display(),
        rows = written.rows,
        duration_ms,
        "Run complete"
    );

    Ok(RunSummary {
        scenario: scenario.name.clone(),
        requested: settings.num_records,
        generated: rows.len(),
        skipped,
        derivation,
        report: written,
        duration_ms,
    })
}

fn generate(config: &AppConfig, scenario: &Scenario) -> Result<GenerationReport> {
    let settings = &config.run;
    let generator = TradeGenerator::new(config.symbol_table(), config.price_table());
    let range = &scenario.quantity_range;
    let statuses = &scenario.status_distribution;

    let report = match (settings.parallel, settings.seed) {
        (true, seed) => {
            let seed = seed.unwrap_or_else(rand::random);
            generator.generate_parallel(settings.num_records, range, statuses, seed)?
        }
        (false, Some(seed)) => generator.generate_seeded(settings.num_records, range, statuses, seed)?,
        (false, None) => generator.generate(settings.num_records, range, statuses)?,
    };
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_names() {
        assert_eq!(PipelineStep::SelectingScenario.name(), "Selecting Scenario");
        assert_eq!(PipelineStep::WritingReport.name(), "Writing Report");
    }
}
