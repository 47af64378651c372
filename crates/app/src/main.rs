use anyhow::Context;

fn main() -> anyhow::Result<()> {
    bookstore_observability::init();

    let config = bookstore_app::DemoConfig::standard().context("failed to build demo catalog")?;

    let stdout = std::io::stdout();
    let report = bookstore_app::run_demo(&config, &mut stdout.lock())?;

    tracing::info!(
        purchases = report.outcomes.len(),
        failed = report.failures().count(),
        purged = report.purged.len(),
        remaining = report.remaining,
        "demo finished"
    );
    Ok(())
}
