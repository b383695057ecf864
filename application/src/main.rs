use std::{io, process::ExitCode, sync::OnceLock};

use application::{cli, Args, Config, Service, Terminal};
use service::infra::{File, Http, Memory, Scoped};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_target(false)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || LOG_LEVEL.get().copied().unwrap_or(log::Level::WARN)
                            >= *meta.level()
                })),
        )
        .init();

    match start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

async fn start() -> Result<(), u8> {
    let Args {
        config,
        api_url,
        command,
    } = Args::parse().map_err(|e| {
        _ = e.print();
        u8::try_from(e.exit_code()).unwrap_or(2)
    })?;

    let Config {
        mut api,
        store,
        log,
    } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
        78
    })?;
    if let Some(url) = api_url {
        api.url = url;
    }

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let http = Http::new(&(&api).into()).map_err(|e| {
        log::error!("failed to initialize `Http` client: {e}");
        70
    })?;
    let service = Service::new(
        (&api).into(),
        http,
        Scoped::new(File::new(store.path), Memory::default()),
        Terminal,
    );

    cli::run(&service, command).await.map_err(|e| {
        log::debug!("{}", e.detailed());
        eprintln!("{e}");
        e.exit_code
    })
}
