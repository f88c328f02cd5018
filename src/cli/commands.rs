use crate::cli::args::{Cli, Commands};
use crate::config::ServerConfig;
use crate::error::Result;
use crate::readers::ObservationReader;
use crate::server::{self, AppState};
use crate::services::QueryService;
use crate::storage::ObservationStore;
use tracing::{debug, info};

pub async fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.log_level());

    match cli.command {
        Commands::Serve {
            config,
            database,
            bind,
        } => {
            let config = ServerConfig::load(config.as_deref())?
                .with_database_url(database)
                .with_bind_address(bind)
                .validated()?;

            info!("Serving observations from {}", config.database_url);
            let store =
                ObservationStore::connect(&config.database_url, config.max_connections).await?;
            let state = AppState::new(QueryService::new(store), &config.site_title);

            server::serve(state, &config.bind_address).await?;
        }

        Commands::Import {
            input,
            database,
            skip_invalid,
        } => {
            info!("Importing {} into {}", input.display(), database);

            let reader = ObservationReader::with_skip_invalid(skip_invalid);
            let observations = reader.read_observations(&input)?;
            info!("Read {} observations", observations.len());

            let store = ObservationStore::connect_writable(&database).await?;
            let inserted = store.insert_observations(&observations).await?;

            let summary = store.summary().await?;
            store.close().await;

            println!("Imported {} observations\n", inserted);
            println!("{}", summary.summary());
        }

        Commands::Info { config, database } => {
            let config = ServerConfig::load(config.as_deref())?
                .with_database_url(database)
                .validated()?;

            let store = ObservationStore::connect(&config.database_url, 1).await?;
            let service = QueryService::new(store);
            let summary = service.dataset_summary().await?;

            println!("{}", summary.summary());
            if !summary.is_empty() {
                let stations = service.list_stations().await?;
                println!("Stations: {}", stations.join(", "));
            }
        }
    }

    Ok(())
}

fn setup_logging(log_level: &str) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("climate_api={}", log_level)));

    // try_init: a subscriber may already be installed when run from tests
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .try_init();

    debug!("Logging initialized at level: {}", log_level);
}
