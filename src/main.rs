use std::process;

use mealdesk::{
    application::{error::AppError, feedback::Toast},
    config,
    infra::telemetry,
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

mod commands;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        eprintln!("{}", Toast::error(error.presentation_message()));
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    let report = error.report();
    if dispatcher::has_been_set() {
        error!(source = report.source, error = %report.chain(), "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(source = report.source, error = %report.chain(), "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;
    telemetry::init(&settings.logging)?;

    let ctx = commands::Ctx::build(&settings)?;
    let janitor = ctx.cache.spawn_janitor();
    info!(
        target = "mealdesk::cli",
        base_url = %settings.api.base_url,
        signed_in = ctx.tokens.token().is_some(),
        "starting"
    );

    let result = commands::dispatch(&ctx, cli_args.command).await;

    if let Some(handle) = janitor {
        handle.abort();
        let _ = handle.await;
    }
    result
}
