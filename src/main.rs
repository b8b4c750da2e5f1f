use eyre::{Context, Result};
use regbot::api::new_client;
use regbot::app::{App, commands};
use regbot::cli::Command;
use regbot::config::{Configuration, init_logger, verbose};
use regbot::storage::new_storage;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let mut cmd = Command::new();
    if cmd.version() {
        cmd.print_version();
        return Ok(());
    }

    std::panic::set_hook(Box::new(|panic_info| {
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let config = cmd.get_config()?;
    init_logger(&config.log)?;
    Configuration::init(config.clone())?;
    verbose!("[+] Logger initialized");

    verbose!("[+] Initializing storage...");
    let storage = new_storage(&config.storage)
        .await
        .wrap_err("initializing storage")?;
    verbose!("[+] Storage initialized");

    verbose!("[+] Connecting to {}", config.api.base_url);
    let api = new_client(&config.api).wrap_err("initializing api client")?;

    let app = App::new(api, storage, config);
    app.session
        .restore(&app.api)
        .await
        .wrap_err("restoring session")?;
    verbose!("[+] Session restored");

    commands::run(&app, cmd.take_command()).await
}
