//! Push Sender - sends one push request to the gateway one or more times.

use std::env;

use tokio_util::sync::CancellationToken;

use push_sender::{logging, AttemptReport, Classification, Config, Dispatcher};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_usage() {
    println!("usage: push-sender <request.json> [attempts]");
    println!();
    println!("Sends the push described in <request.json> [attempts] times (default from config).");
    println!("Configuration: push-sender.toml and PUSH__SECTION__KEY environment variables.");
}

fn print_report(report: &AttemptReport, total: u32) {
    let push_id = report.push_id.as_deref().unwrap_or("-");
    match &report.result {
        Ok(outcome) => {
            println!(
                "[{}/{}] {} push_id={} ({} ms)",
                report.attempt,
                total,
                outcome.status_line(),
                push_id,
                report.elapsed.as_millis()
            );
            match &outcome.classification {
                Classification::Success => println!("Push succeeded."),
                Classification::Failure => match &outcome.gateway_error {
                    Some(error) => println!("Push failed: {}", error),
                    None => println!("Push failed."),
                },
                Classification::ParseError(body) => {
                    println!("Unable to determine delivery outcome. Response body: {}", body)
                }
            }
        }
        Err(e) => println!("[{}/{}] Attempt failed: {}", report.attempt, total, e),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("push-sender {}", VERSION);
        return Ok(());
    }
    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    // Load configuration
    let config = Config::load().map_err(push_sender::Error::from)?;
    logging::init(&config.logging.level);

    let attempts = match args.get(1) {
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| format!("Invalid attempt count: {}", raw))?,
        None => config.dispatch.attempts,
    };

    let request = push_sender::load_request(&args[0])?;
    let dispatcher = Dispatcher::from_config(&config)?;
    tracing::info!("Sending to gateway at {}", config.gateway.url);

    // Ctrl-C stops the loop before the next attempt
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current attempt");
            signal_token.cancel();
        }
    });

    let summary = dispatcher
        .dispatch_with(&request, attempts, &cancel, |report| {
            print_report(&report, attempts)
        })
        .await?;

    println!(
        "Sent {} of {}: {} succeeded, {} failed, {} unparsed, {} errors{}",
        summary.attempted,
        summary.requested,
        summary.succeeded,
        summary.failed,
        summary.unparsed,
        summary.errored,
        if summary.cancelled { " (cancelled)" } else { "" }
    );

    Ok(())
}
