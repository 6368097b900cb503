use std::path::Path;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tokio::sync::mpsc;

use pokeguesser::application::errors::BotError;
use pokeguesser::application::pipeline::{
    ClassifierAdapter, EventListener, ImageAcquirer, ResponseScheduler, TriggerFilter,
};
use pokeguesser::application::services::BatteryService;
use pokeguesser::domain::traits::{ChatSink, Model};
use pokeguesser::infrastructure::adapters::{ConsoleAdapter, DiscordAdapter};
use pokeguesser::infrastructure::config::Config;
use pokeguesser::infrastructure::http::HttpImageSource;
use pokeguesser::infrastructure::model::LinearModel;
use pokeguesser::infrastructure::server;

#[derive(Parser)]
#[command(name = "pokeguesser")]
#[command(about = "Discord bot that guesses pokemon by image", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Args)]
struct RunArgs {
    /// Discord auth token (overrides config)
    #[arg(short, long)]
    auth: Option<String>,

    /// Whether the token is a bot token (overrides config)
    #[arg(short = 'b', long = "is-bot")]
    is_bot: Option<bool>,

    /// Target bot's username and tag
    #[arg(short, long)]
    target: Option<String>,

    /// Seconds to wait before guessing
    #[arg(short, long, allow_hyphen_values = true)]
    delay: Option<i64>,

    /// Send the guess as a hint before guessing
    #[arg(short = 'H', long)]
    hints: bool,

    /// Read events from stdin instead of Discord
    #[arg(long)]
    console: bool,
}

impl RunArgs {
    /// Command-line values win over the file and environment
    fn apply(self, config: &mut Config) {
        if let Some(token) = self.auth {
            config.discord.token = Some(token);
        }
        if let Some(is_bot) = self.is_bot {
            config.discord.is_bot = is_bot;
        }
        if let Some(target) = self.target {
            config.bot.target = target;
        }
        if let Some(delay) = self.delay {
            config.bot.delay_seconds = delay;
        }
        config.bot.hints |= self.hints;
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run(RunArgs),
    /// Start the inference endpoint
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => load_config(&cli.config).and_then(|mut config| {
            let console = args.console;
            args.apply(&mut config);
            block_on(run_bot(config, console))
        }),
        Commands::Serve { bind } => load_config(&cli.config).and_then(|mut config| {
            if let Some(bind) = bind {
                config.endpoint.bind = bind;
            }
            block_on(run_endpoint(config))
        }),
        Commands::Version => {
            println!("pokeguesser v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn block_on<F>(future: F) -> Result<(), BotError>
where
    F: std::future::Future<Output = Result<(), BotError>>,
{
    tokio::runtime::Runtime::new()?.block_on(future)
}

fn load_config(path: &str) -> Result<Config, BotError> {
    let mut config = if Path::new(path).exists() {
        Config::load(path)?
    } else {
        tracing::info!("No config at {}, using defaults", path);
        Config::default()
    };
    config.apply_env()?;
    Ok(config)
}

async fn run_bot(config: Config, console: bool) -> Result<(), BotError> {
    let model = LinearModel::load(&config.classifier.model_path)?;
    tracing::info!(
        "Loaded model '{}' ({} classes, {} features)",
        model.name(),
        model.num_classes(),
        model.input_len()
    );

    let use_console = console || config.discord.token.is_none();
    let discord = if use_console {
        None
    } else {
        Some(Arc::new(DiscordAdapter::new(config.bot_token()?)))
    };
    let console_adapter = Arc::new(ConsoleAdapter::new());

    let sink: Arc<dyn ChatSink> = match &discord {
        Some(adapter) => adapter.clone() as Arc<dyn ChatSink>,
        None => console_adapter.clone() as Arc<dyn ChatSink>,
    };

    let info = sink.sink_info();
    tracing::info!(
        "Starting {} on {}: target={}, delay={}s, hints={}",
        info.name,
        info.platform,
        config.bot.target,
        config.delay().as_secs(),
        config.bot.hints
    );

    let filter = TriggerFilter::new(&config.bot.target, &config.bot.spawn_marker);
    let acquirer = ImageAcquirer::new(Arc::new(HttpImageSource::new()))
        .with_size(config.classifier.image_width, config.classifier.image_height);
    let classifier = ClassifierAdapter::new(Arc::new(model));
    let scheduler = ResponseScheduler::new(sink, config.bot.hints, config.delay())
        .with_command_prefix(&config.bot.command_prefix);

    let mut listener = EventListener::new(filter, acquirer, classifier, scheduler);
    if let Some(max) = config.bot.max_concurrent_sequences {
        listener = listener.with_concurrency_limit(max);
    }
    let listener = Arc::new(listener);

    let (tx, rx) = mpsc::unbounded_channel();
    let listening = tokio::spawn(listener.run(rx));

    match discord {
        Some(adapter) => adapter.run(tx).await?,
        None => console_adapter.read_events(tx).await?,
    }

    listening
        .await
        .map_err(|e| BotError::Internal(e.to_string()))?;
    Ok(())
}

async fn run_endpoint(config: Config) -> Result<(), BotError> {
    let model = LinearModel::load(&config.endpoint.model_path)?;
    tracing::info!(
        "Loaded model '{}' ({} classes), {} compositions, {} packagings",
        model.name(),
        model.num_classes(),
        config.endpoint.composition_map.len(),
        config.endpoint.packaging_map.len()
    );

    let service = Arc::new(BatteryService::new(
        Arc::new(model),
        config.endpoint.composition_map,
        config.endpoint.packaging_map,
    ));
    server::serve(service, &config.endpoint.bind).await
}

fn init_config() -> Result<(), BotError> {
    let config = Config::default();
    let yaml = serde_yaml::to_string(&config).map_err(|e| BotError::Internal(e.to_string()))?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
    Ok(())
}
