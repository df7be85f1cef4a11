// Engine main entry point
use anyhow::Context;
use engine::config::EngineSettings;
use engine::services::DashboardReport;
use engine::OrderTable;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting order metrics engine...");

    let settings = match std::env::args().nth(1) {
        Some(path) => EngineSettings::from_json_file(&path)
            .with_context(|| format!("Could not load settings from '{}'", path))?,
        None => EngineSettings::default(),
    };
    info!(data_path = %settings.data_path.display(), "Loading orders");

    // The table is loaded once and held for the lifetime of the report.
    let table = OrderTable::load(&settings.data_path, settings.delimiter_byte())
        .with_context(|| format!("Could not load orders from '{}'", settings.data_path.display()))?;

    let report = DashboardReport::build(&table, &settings)?;
    println!("{}", report.render(&settings)?);

    Ok(())
}
