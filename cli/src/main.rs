//! CLI entrypoint for Content Moderation
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use moderation_application::{
    ClassificationOracle, FixedActionReview, HumanReviewPort, LlmClassificationOracle,
    ModerationProgressNotifier, RunModerationError, RunModerationUseCase,
};
use moderation_infrastructure::{
    ChannelHumanReview, ConfigLoader, ContentFixture, FileConfig, FixtureClassificationOracle,
    OpenAiGateway, OracleProvider, sample_fixture, serve_json_lines,
};
use moderation_presentation::{
    Cli, ConsoleHumanReview, OracleChoice, ProgressReporter, ReviewMode, SimpleProgress,
    formatter_for, stdin_lines,
};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    // .env may hold OPENAI_API_KEY or MODERATION_* overrides
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting content-moderation");

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };
    apply_cli_overrides(&mut config, &cli);
    config.validate()?;

    if cli.show_config {
        println!("{}", ConfigLoader::describe_sources(cli.config.as_deref()));
        println!("{}", config.to_toml()?);
        return Ok(());
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    // === Content ===
    let fixture = match &cli.content {
        Some(path) => ContentFixture::load(path)
            .with_context(|| format!("failed to load content from {}", path.display()))?,
        None => sample_fixture().context("built-in sample posts are invalid")?,
    };
    info!("Loaded {} content item(s)", fixture.items.len());

    // === Dependency Injection ===
    let oracle = build_oracle(&config, &fixture)?;
    let review = build_review(&cli, &config)?;

    let use_case = RunModerationUseCase::new(oracle, review);
    let params = config.to_pipeline_params();

    // Execute with or without progress reporting
    let outcome = if cli.quiet {
        use_case.execute(fixture.items, &params).await
    } else {
        // Spinners only make sense on a terminal
        let progress: Box<dyn ModerationProgressNotifier> = if std::io::stderr().is_terminal() {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(SimpleProgress)
        };
        use_case
            .execute_with_progress(fixture.items, &params, progress.as_ref())
            .await
    };

    let (results, cancelled) = match outcome {
        Ok(results) => (results, None),
        Err(RunModerationError::Cancelled { results, total }) => {
            warn!("Moderation cancelled after {} of {} item(s)", results.len(), total);
            let resolved = results.len();
            (results, Some((resolved, total)))
        }
        Err(e) => return Err(e.into()),
    };

    // Output results
    let formatter = formatter_for(config.output.format);
    println!("{}", formatter.format(&results));

    match cancelled {
        Some((resolved, total)) => Err(anyhow!(
            "moderation cancelled: {} of {} item(s) resolved",
            resolved,
            total
        )),
        None => Ok(()),
    }
}

/// Install the stderr logger and, with `--log-file`, a non-blocking file logger.
///
/// The returned guard flushes the file writer when dropped.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow!("--log-file must name a file: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to initialize logging")?;

    Ok(guard)
}

fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(choice) = cli.oracle {
        config.oracle.provider = match choice {
            OracleChoice::Openai => OracleProvider::OpenAi,
            OracleChoice::Fixture => OracleProvider::Fixture,
        };
    }
    if let Some(model) = &cli.model {
        config.oracle.model = model.clone();
    }
    if let Some(moderator) = &cli.moderator {
        config.review.moderator_name = moderator.clone();
    }
    if let Some(format) = cli.output {
        config.output.format = format.into();
    }
}

fn build_oracle(
    config: &FileConfig,
    fixture: &ContentFixture,
) -> Result<Arc<dyn ClassificationOracle>> {
    match config.oracle.provider {
        OracleProvider::OpenAi => {
            let settings = config.oracle.to_openai_settings()?;
            let gateway = Arc::new(OpenAiGateway::new(settings)?);
            info!(
                "Using OpenAI-compatible oracle with model {}",
                config.oracle.model
            );
            Ok(Arc::new(LlmClassificationOracle::new(
                gateway,
                config.oracle.to_oracle_params(),
            )))
        }
        OracleProvider::Fixture => {
            info!(
                "Using fixture oracle ({} canned assessment(s))",
                fixture.assessments.len()
            );
            Ok(Arc::new(FixtureClassificationOracle::from_fixture(fixture)))
        }
    }
}

fn build_review(cli: &Cli, config: &FileConfig) -> Result<Arc<dyn HumanReviewPort>> {
    let max_attempts = config.review.max_attempts;

    if let Some(action) = cli.auto {
        info!("Non-interactive review: every item gets '{}'", action);
        return Ok(Arc::new(FixedActionReview::new(action)));
    }

    match cli.review {
        ReviewMode::Console => Ok(Arc::new(
            ConsoleHumanReview::new(max_attempts).context("failed to start console review")?,
        )),
        ReviewMode::JsonLines => {
            info!("Reviews are exchanged as JSON lines on stdin/stdout");
            let (gate, tickets) = ChannelHumanReview::channel(1, max_attempts);
            let lines = stdin_lines().context("failed to read review replies from stdin")?;
            tokio::spawn(serve_json_lines(tickets, lines, std::io::stdout()));
            Ok(Arc::new(gate))
        }
    }
}
