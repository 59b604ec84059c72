use anyhow::{anyhow, Context};
use eframe::egui;
use iris_lens::app::{IrisLensApp, APP_NAME};
use iris_lens::config::PipelineConfig;
use iris_lens::pipeline;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = PipelineConfig::default();
    let output = pipeline::run(&config).context("running the iris pipeline")?;
    for run in &output.runs {
        log::info!(
            "{}: {} epochs, best loss {:.4}",
            run.title,
            run.report.iterations,
            run.report.best_loss
        );
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let figures = output.figures;
    eframe::run_native(
        APP_NAME,
        options,
        Box::new(|_cc| Ok(Box::new(IrisLensApp::new(figures)))),
    )
    .map_err(|e| anyhow!("viewer failed: {e}"))
}
