use clap::Parser;
use morse_news::audio::open_sink;
use morse_news::domain::ports::{HeadlineSource, ToneSink};
use morse_news::utils::{logger, validation::Validate};
use morse_news::{
    AppConfig, BroadcastEngine, CliConfig, MorseError, RssHeadlineSource, SilentSink,
    StaticHeadlineSource,
};

fn report_config_error(e: &MorseError) -> ! {
    tracing::error!("❌ Configuration validation failed: {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(1);
}

async fn broadcast<H: HeadlineSource, S: ToneSink>(
    source: H,
    sink: S,
    config: &AppConfig,
    cli: &CliConfig,
) -> morse_news::Result<()> {
    let engine = BroadcastEngine::new(source, sink);

    if cli.dry_run {
        let plan = engine.plan(config).await?;
        print!("{}", plan.render(cli.json)?);
        if cli.json {
            println!();
        }
        return Ok(());
    }

    let result = engine.run(config).await?;
    tracing::info!(
        "✅ Played \"{}\" ({} tones, {} failed)",
        result.headline,
        result.report.tones_emitted,
        result.report.tones_failed
    );
    Ok(())
}

async fn run(config: &AppConfig, cli: &CliConfig) -> morse_news::Result<()> {
    // Dry runs never touch the audio hardware.
    let sink: Box<dyn ToneSink> = if cli.dry_run {
        Box::new(SilentSink)
    } else {
        open_sink(&config.sink_options()).await
    };

    match &config.text {
        Some(text) => broadcast(StaticHeadlineSource::new(text.clone()), sink, config, cli).await,
        None => {
            let source = RssHeadlineSource::new(config.feed_url.clone(), config.timeout())?;
            tracing::info!("Headline feed: {}", source.feed_url());
            broadcast(source, sink, config, cli).await
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let file = match cli.load_file() {
        Ok(file) => file,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    logger::init_logger(cli.log_format(file.as_ref()), cli.verbose(file.as_ref()));
    tracing::info!("Starting morse-news");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve(file.as_ref()) {
        Ok(config) => config,
        Err(e) => report_config_error(&e),
    };
    if let Err(e) = config.validate() {
        report_config_error(&e);
    }
    if !config.frequency_is_recommended() {
        tracing::warn!(
            "Tone frequency {} Hz is outside the recommended 400-1200 Hz range",
            config.frequency_hz
        );
    }

    // Playback problems are never fatal; only a bad feed URL or client setup exits 1.
    if let Err(e) = run(&config, &cli).await {
        tracing::error!("❌ {}", e);
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        if e.is_config_error() {
            std::process::exit(1);
        }
    }
}
