use anyhow::Result;
use trend_grid::{Config, TrendPipeline};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::discover()?;
    let report = TrendPipeline::new(config)?.run()?;

    for chart in &report.charts {
        log::info!(
            "{}: {} line(s) → {}",
            chart.data_type,
            chart.lines,
            chart.output.path().display()
        );
    }
    Ok(())
}
