use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Instant;

use anyhow::{Context, Result};
use framestat_core::analyzer::SingleImageAnalyzer;
use framestat_core::batch::{BatchAnalyzer, BatchOptions};
use framestat_core::config::SamplingConfig;
use framestat_core::filters::butterworth::ButterworthParams;
use framestat_core::grid::ColorMode;
use framestat_core::io::folder::list_images;
use framestat_core::io::image_io::{load_image, save_image};
use framestat_core::roi::Roi;
use tracing::info;

use crate::messages::{BatchReport, WorkerCommand, WorkerResult};
use crate::progress::ChannelProgressReporter;

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("framestat-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })
        .expect("Failed to spawn worker thread");

    cmd_tx
}

fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn send_log(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Log { message: msg.into() });
}

fn send_error(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Error { message: msg.into() });
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::ScanFolder {
                folder,
                sort_by_name,
            } => {
                let paths = list_images(&folder, sort_by_name);
                send(&tx, &ctx, WorkerResult::FolderScanned { folder, paths });
            }
            WorkerCommand::PreviewImage { path, color_mode } => {
                handle_preview(path, color_mode, &tx, &ctx);
            }
            WorkerCommand::AnalyzeFolder {
                folder,
                options,
                sampling,
            } => {
                handle_analyze(&folder, options, &sampling, &tx, &ctx);
            }
            WorkerCommand::SaveSmoothed {
                source,
                output,
                roi,
                params,
                color_mode,
            } => match save_smoothed(&source, &output, roi, params, color_mode) {
                Ok(()) => send(&tx, &ctx, WorkerResult::ImageSaved { path: output }),
                Err(e) => send_error(&tx, &ctx, format!("{e:#}")),
            },
        }
    }
}

fn handle_preview(
    path: PathBuf,
    color_mode: ColorMode,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let image = match load_image(&path, color_mode) {
        Ok(image) => image,
        Err(e) => {
            send_error(tx, ctx, format!("Failed to open image: {e}"));
            return;
        }
    };

    let analyzer = SingleImageAnalyzer::from_grid(image.to_gray());
    send(
        tx,
        ctx,
        WorkerResult::ImagePreview {
            path,
            summary: analyzer.gray_level_summary(),
            center_point: analyzer.center_point(),
            entropy: analyzer.entropy(),
            image,
        },
    );
}

fn handle_analyze(
    folder: &Path,
    options: BatchOptions,
    sampling: &SamplingConfig,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    send_log(tx, ctx, format!("Analyzing {}...", folder.display()));
    let start = Instant::now();
    let reporter = ChannelProgressReporter::new(tx.clone(), ctx.clone());

    let batch = match BatchAnalyzer::load_reported(folder, options, &reporter) {
        Ok(batch) => batch,
        Err(e) => {
            send_error(tx, ctx, format!("Cannot start analysis: {e}"));
            return;
        }
    };

    for failure in batch.failures() {
        send_log(
            tx,
            ctx,
            format!("Skipped {}: {}", failure.path.display(), failure.error),
        );
    }

    let report = build_report(&batch, sampling);
    info!(images = report.paths.len(), "Batch analysis finished");
    send(
        tx,
        ctx,
        WorkerResult::AnalysisComplete {
            report,
            elapsed: start.elapsed(),
        },
    );
}

fn build_report(batch: &BatchAnalyzer, sampling: &SamplingConfig) -> BatchReport {
    let profiles = batch
        .column_profile_with_block(sampling.column_x, sampling.sample_count, sampling.block_size)
        .and_then(|columns| {
            let rows = batch.row_profile_with_block(
                sampling.row_y,
                sampling.sample_count,
                sampling.block_size,
            )?;
            Ok((columns, rows))
        });
    let (column_profile, row_profile, profile_error) = match profiles {
        Ok((columns, rows)) => (columns, rows, None),
        Err(e) => (Vec::new(), Vec::new(), Some(e.to_string())),
    };

    BatchReport {
        paths: batch.paths().iter().map(|p| p.to_path_buf()).collect(),
        roi: batch.options().roi,
        center_points: batch.center_points(),
        average_values: batch.average_values(),
        center_minus_average: batch.center_points_without_shift(),
        entropies: batch.entropies(),
        column_profile,
        row_profile,
        profile_error,
        skipped: batch.failures().len(),
    }
}

fn save_smoothed(
    source: &Path,
    output: &Path,
    roi: Option<Roi>,
    params: Option<ButterworthParams>,
    color_mode: ColorMode,
) -> Result<()> {
    let mut analyzer = SingleImageAnalyzer::open(source, color_mode)?
        .apply_roi(roi.as_ref())
        .context("ROI does not fit this image")?;
    if let Some(params) = params {
        analyzer = analyzer.butterworth_smooth(&params);
    }
    save_image(analyzer.grid(), output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(())
}
