use anyhow::Result;
use bench_history::settings::{get_settings, CliOptions};
use bench_history::tracing::{get_subscriber, init_subscriber};
use bench_history::{Aggregator, BenchHistoryResult};
use clap::Parser;

fn main() -> Result<()> {
    let subscriber = get_subscriber("bench_history", "info");
    init_subscriber(subscriber)?;

    let main_span = tracing::info_span!("main");
    let _main_span_guard = main_span.enter();

    let options = CliOptions::parse();
    tracing::info!(?options, "CLI parsed");

    let outcome = update_history(&options)?;
    tracing::info!(
        history_len=%outcome.history_len, recent_len=%outcome.recent_len,
        all_data=?outcome.all_data_path, recent_data=?outcome.recent_data_path,
        "benchmark data published."
    );
    Ok(())
}

#[tracing::instrument(level = "info")]
fn update_history(options: &CliOptions) -> BenchHistoryResult<bench_history::AggregateOutcome> {
    let settings = get_settings(options)?;
    let build_dir = settings.build.resolve_build_dir()?;
    let aggregator = Aggregator::from_settings(&settings, build_dir)?;
    Ok(aggregator.run()?)
}
