use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::echo::{combine, find_echoes};
use crate::export::{ExportError, ExportOutcome, PassExporter};
use crate::logs::{load_log_records, load_telemetry, Direction, LogRecord, TelemetrySample};
use crate::passes::{extract_track, group_into_passes, pass_statistics, Pass, PassStatistics, Track};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("export error: {0}")]
    Export(#[from] ExportError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parsed contents of the three input logs.
#[derive(Debug, Clone, Default)]
pub struct Inputs {
    pub transmissions: Vec<LogRecord>,
    pub receptions: Vec<LogRecord>,
    pub telemetry: Vec<TelemetrySample>,
}

impl Inputs {
    /// Load all logs named in `config`. Missing files count as empty.
    pub fn load(config: &Config) -> Self {
        Self {
            transmissions: load_log_records(&config.logs.tx, Direction::Tx),
            receptions: load_log_records(&config.logs.rx, Direction::Rx),
            telemetry: load_telemetry(&config.logs.telemetry),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PassReport {
    /// 1-based position in the run.
    pub number: usize,
    pub pass: Pass,
    pub statistics: PassStatistics,
    pub track: Option<Track>,
}

#[derive(Debug, Clone)]
pub struct Analysis {
    pub total_echoes: usize,
    pub passes: Vec<PassReport>,
}

/// Match, correlate, segment and summarise. Pure over the loaded inputs.
pub fn analyze(config: &Config, inputs: &Inputs) -> Analysis {
    let m = &config.matching;
    let echoes = find_echoes(
        &inputs.transmissions,
        &inputs.receptions,
        &config.callsign,
        m.echo_tolerance,
    );
    let total_echoes = echoes.len();

    let combined = combine(echoes, &inputs.telemetry, m.telemetry_max_diff);
    let passes = group_into_passes(combined, m.max_pass_gap)
        .into_iter()
        .enumerate()
        .map(|(i, pass)| PassReport {
            number: i + 1,
            statistics: pass_statistics(&pass),
            track: extract_track(&pass, &inputs.telemetry, m.track_margin),
            pass,
        })
        .collect::<Vec<_>>();

    log::info!("Found {} echoes in {} pass(es)", total_echoes, passes.len());
    Analysis {
        total_echoes,
        passes,
    }
}

/// Write every pass's files into the configured output directory.
pub fn export(config: &Config, analysis: &Analysis) -> Result<Vec<ExportOutcome>, PipelineError> {
    let exporter = PassExporter::new(config.output_dir.clone())?;
    analysis
        .passes
        .iter()
        .map(|report| {
            exporter
                .export(
                    &report.pass,
                    report.statistics.center_drift_hz(),
                    report.track.as_ref(),
                )
                .map_err(PipelineError::from)
        })
        .collect()
}

/// Full batch run: load, analyze and optionally export.
pub fn run(config: &Config, write_files: bool) -> Result<Analysis, PipelineError> {
    config.validate()?;

    let inputs = Inputs::load(config);
    log::info!(
        "Loaded {} transmissions, {} receptions, {} telemetry samples",
        inputs.transmissions.len(),
        inputs.receptions.len(),
        inputs.telemetry.len()
    );

    let analysis = analyze(config, &inputs);
    if write_files {
        export(config, &analysis)?;
    }
    Ok(analysis)
}
