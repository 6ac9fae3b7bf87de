use anyhow::Context;
use clap::Parser;
use imgprobe::cli::Cli;
use imgprobe::{Config, ConsoleReporter, Crawler, DesktopNotifier, Settings, logging};
use imgprobe_fetch::Prober;
use imgprobe_fs::Store;
use imgprobe_source::CompositeSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    let config = match &cli.config {
        Some(path) => Config::load(path).context("failed to load configuration")?,
        None => Config::default(),
    };
    let settings = Settings::resolve(cli, config);
    tracing::debug!(?settings, "resolved settings");

    let client = settings
        .client
        .clone()
        .build()
        .context("failed to build HTTP client")?;
    let prober = Prober::new(client).with_options(settings.probe.clone());

    let store = Store::new(&settings.output_dir).with_file_mode(settings.file_mode);
    let mut crawler = Crawler::new(prober, store).with_delay(settings.delay);
    if settings.print {
        crawler = crawler.with_reporter(ConsoleReporter::stdout());
    }
    if settings.notify {
        let mut notifier = DesktopNotifier::default();
        if let Some(icon) = &settings.notify_icon {
            notifier = notifier.with_icon(icon);
        }
        crawler = crawler.with_notifier(notifier);
    }

    let mut source =
        CompositeSource::from_inputs(settings.identifiers, settings.files, settings.random_length);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("cannot listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
        tracing::info!("interrupted, stopping");
    };

    crawler.run_until(&mut source, shutdown).await?;
    Ok(())
}
