use anyhow::{Context, Result};
use aurora::app::cli::Args;
use aurora::app::events::AppEvent;
use aurora::app::input_handler::{self, Effect};
use aurora::app::{tmux, App};
use aurora::catalog::{parse_origin, CatalogClient};
use aurora::config::AppConfig;
use aurora::notifier::{NotificationBackend, Notifier, OscFlavor, TerminalBackend};
use aurora::player::{self, MediaSignal, Transport};
use aurora::ui;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Media clock refresh ("time updated")
const TIME_UPDATE: Duration = Duration::from_millis(250);
/// Animation tick for the notification popup
const TICK: Duration = Duration::from_millis(33);

/// Logs go to a file; the terminal belongs to the UI.
fn init_logging() -> Option<WorkerGuard> {
    let log_dir = dirs::cache_dir()?.join("aurora");
    std::fs::create_dir_all(&log_dir).ok()?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "aurora.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_env("AURORA_LOG")
        .unwrap_or_else(|_| EnvFilter::new("aurora=info"));

    tracing_subscriber::fmt()
        .with_writer(file_writer)
        .with_target(true)
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init()
        .ok()?;
    Some(guard)
}

fn spawn_catalog_fetch(catalog: &CatalogClient, tx: &mpsc::Sender<AppEvent>) {
    let catalog = catalog.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = catalog.fetch().await;
        let _ = tx.send(AppEvent::CatalogLoaded(result)).await;
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();

    let args = Args::parse();
    if args.generate_config {
        println!("{}", AppConfig::default().to_toml()?);
        return Ok(());
    }

    let _log_guard = init_logging();

    let mut config = AppConfig::load();
    config.apply_args(&args);
    let origin = parse_origin(&config.server).context("invalid server address")?;
    info!(server = %origin, "Starting Aurora");

    let client = reqwest::Client::builder()
        .user_agent(concat!("aurora/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_default();
    let catalog = CatalogClient::new(client.clone(), origin.clone());

    let (tx, mut rx) = mpsc::channel(100);

    // Media load outcomes arrive on their own channel and are forwarded
    let (media_tx, mut media_rx) = mpsc::unbounded_channel();
    let (_output_stream, media) = player::open_media(client, media_tx);
    let tx_media = tx.clone();
    tokio::spawn(async move {
        while let Some(signal) = media_rx.recv().await {
            let event = match signal {
                MediaSignal::Ready { source, duration } => AppEvent::MediaReady { source, duration },
                MediaSignal::Failed { source, reason } => AppEvent::MediaFailed { source, reason },
            };
            if tx_media.send(event).await.is_err() {
                break;
            }
        }
    });

    let desktop: Option<Box<dyn NotificationBackend>> = if config.desktop_notifications {
        Some(Box::new(TerminalBackend::new(io::stdout(), OscFlavor::detect())))
    } else {
        None
    };
    let mut notifier = Notifier::new(config.notifications, desktop);
    notifier.request_permission();

    let transport = Transport::new(media, origin);
    let mut app = App::new(&config, transport, notifier);
    app.tmux_pane = tmux::current_pane();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 1. Input Event Task
    let tx_input = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if tx_input.send(AppEvent::Input(event)).await.is_err() {
                break;
            }
        }
    });

    // 2. Catalog, once at startup
    spawn_catalog_fetch(&catalog, &tx);

    // 3. Media clock
    let tx_time = tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TIME_UPDATE);
        loop {
            interval.tick().await;
            if tx_time.send(AppEvent::TimeUpdated).await.is_err() {
                break;
            }
        }
    });

    // 4. Animation Tick Task ⚡
    let tx_tick = tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK);
        loop {
            interval.tick().await;
            if tx_tick.send(AppEvent::Tick).await.is_err() {
                break;
            }
        }
    });

    let mut rng = rand::thread_rng();

    while app.is_running {
        terminal.draw(|f| ui::ui(f, &mut app))?;

        let Some(event) = rx.recv().await else {
            break;
        };
        match event {
            AppEvent::Input(event) => {
                let size = terminal
                    .size()
                    .map(|s| (s.width, s.height))
                    .unwrap_or_default();
                match input_handler::handle_event(event, &mut app, size) {
                    Some(Effect::ReloadCatalog) => {
                        info!("Reloading catalog");
                        spawn_catalog_fetch(&catalog, &tx);
                    }
                    Some(Effect::Fullscreen(active)) => {
                        if let Err(e) = tx.try_send(AppEvent::FullscreenChanged(active)) {
                            error!(error = %e, "Dropped fullscreen change");
                        }
                    }
                    None => {}
                }
            }
            AppEvent::CatalogLoaded(result) => app.on_catalog_loaded(result, &mut rng),
            AppEvent::MediaReady { source, duration } => app.on_media_ready(&source, duration),
            AppEvent::MediaFailed { source, reason } => app.on_media_failed(&source, &reason),
            AppEvent::TimeUpdated => app.on_time_update(),
            AppEvent::FullscreenChanged(active) => app.on_fullscreen_changed(active),
            AppEvent::Tick => app.on_tick(Instant::now()),
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    info!("Bye");
    Ok(())
}
