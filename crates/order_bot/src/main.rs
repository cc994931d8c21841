use anyhow::{Context, Result};
use base::chat::TelegramGateway;
use base::requests::ureq::UreqRequestApi;
use base::settings::BotSettings;
use base::stores::{JsonFileOrderStore, OrderStore};
use order_bot::commands::handlers::order_command_registry;
use order_bot::{logger, run_bot, Dispatcher, OrderBook};

fn main() -> Result<()> {
    let settings = BotSettings::from_env()?;
    logger::init_logger(&settings)?;

    log::info!("starting the order bot: {:?}", settings);

    run(settings).map_err(|e| {
        log::error!("the order bot stopped: {:?}", e);
        e
    })
}

fn run(settings: BotSettings) -> Result<()> {
    let store = JsonFileOrderStore::new(settings.orders_file.clone());
    store
        .init()
        .context("an error occurred on initializing the order store")?;

    let mut dispatcher = Dispatcher::new(
        settings.prefix,
        order_command_registry()?,
        OrderBook::new(store),
    );

    let mut gateway =
        TelegramGateway::new(settings.token, settings.poll_timeout, UreqRequestApi::new());

    run_bot(&mut gateway, &mut dispatcher)
}
