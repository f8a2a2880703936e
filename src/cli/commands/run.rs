use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::monitor::{Monitor, MonitorRequest};
use crate::notify::{dispatch, should_notify};
use crate::service::SafeClient;
use crate::types::MonitoredWallet;
use clap::Args;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args)]
pub struct RunCommand {
    /// Config file (defaults to ./config.toml when present)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Additional wallet to monitor, repeatable
    #[arg(long = "wallet", value_name = "CHAIN:ADDRESS")]
    wallets: Vec<MonitoredWallet>,

    /// Client gateway base URL (overrides config.toml)
    #[arg(long)]
    base_url: Option<String>,

    /// Per-request timeout in seconds (overrides config.toml)
    #[arg(long)]
    timeout_seconds: Option<u64>,

    /// Print the message instead of sending it to channels
    #[arg(long)]
    dry_run: bool,

    /// Print the full result as JSON instead of sending it to channels
    #[arg(long)]
    json: bool,
}

impl RunCommand {
    pub async fn run(&self) -> AppResult<()> {
        let mut app_config = AppConfig::load(self.config.as_deref())?;

        // CLI arguments extend/override config values
        app_config.wallets.extend(self.wallets.iter().cloned());
        if let Some(base_url) = self.base_url.clone() {
            app_config.service.base_url = base_url;
        }
        if let Some(timeout) = self.timeout_seconds {
            app_config.service.timeout_seconds = timeout;
        }
        app_config.check_addresses();
        let channels = app_config.channel_configs();

        info!("Configuration:");
        info!("  Gateway: {}", app_config.service.base_url);
        info!("  Wallets: {}", app_config.wallets.len());
        info!("  Signer aliases: {}", app_config.signers.len());
        info!(
            "  Channels: {}",
            channels
                .iter()
                .filter(|c| c.is_enabled())
                .map(|c| c.name())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let monitor = Monitor::new(SafeClient::new(app_config.service.clone())?);
        let request = MonitorRequest {
            wallets: app_config.wallets,
            aliases: app_config.signers,
            options: app_config.display,
        };

        let result = monitor.run(&request).await?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }
        if result.is_empty() {
            info!("No pending transactions");
            return Ok(());
        }

        let message = result.joined_message();
        if self.dry_run {
            println!("{}", message);
            return Ok(());
        }

        if should_notify(&result, &channels) {
            let report = dispatch(&message, &channels).await;
            if !report.all_succeeded() {
                warn!(
                    "Delivered to {} of {} channel(s)",
                    report.delivered(),
                    report.outcomes.len()
                );
            }
        } else {
            warn!("No enabled notification channels, printing summary to stdout");
            println!("{}", message);
        }

        Ok(())
    }
}
