//! Daily job scheduling.
//!
//! Registers the configured `HH:MM` send time as a daily cron job and
//! keeps the scheduler handle alive until a shutdown signal — dropping it
//! stops the job.

use std::sync::Arc;

use henko_core::BotConfig;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::job;

/// Starts the scheduler and blocks until ctrl-c / SIGTERM.
///
/// # Errors
///
/// Returns an error when the send time is malformed or the scheduler
/// cannot be initialised or started. Cycle failures are logged by the job
/// itself and do not stop the loop.
pub async fn run(config: BotConfig) -> anyhow::Result<()> {
    let (hour, minute) = config.send_time_hm()?;
    let cron = format!("0 {minute} {hour} * * *");
    let config = Arc::new(config);

    let scheduler = JobScheduler::new().await?;
    let job_config = Arc::clone(&config);
    let daily = Job::new_async(cron.as_str(), move |_uuid, _lock| {
        let config = Arc::clone(&job_config);
        Box::pin(async move {
            tracing::info!("scheduler: starting daily product run");
            if let Err(e) = job::run_cycle(&config).await {
                tracing::error!(error = %e, "scheduler: daily product run failed");
            }
            tracing::info!("scheduler: daily product run complete");
        })
    })?;
    scheduler.add(daily).await?;
    scheduler.start().await?;

    tracing::info!(
        send_time = %config.send_time,
        "scheduler started; waiting for the daily send time (ctrl-c to stop)"
    );
    shutdown_signal().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, stopping the bot");
}
