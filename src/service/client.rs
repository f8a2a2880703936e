use crate::config::ServiceConfig;
use crate::errors::{ServiceError, ServiceResult};
use crate::service::dto::{QueuedItemDto, QueuedPageDto, SafeInfoDto, TransactionDetailsDto};
use crate::service::{wallet_url, with_retry, SafeService};
use crate::types::{Chain, QueuedTransaction, WalletInfo};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Upper bound on `next` links followed for one queue
pub const MAX_QUEUE_PAGES: usize = 10;

/// Safe client-gateway client with per-request timeout and retry
#[derive(Clone)]
pub struct SafeClient {
    http: reqwest::Client,
    config: ServiceConfig,
}

impl SafeClient {
    pub fn new(config: ServiceConfig) -> ServiceResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("safe-queue-monitor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ServiceError::RequestFailed {
                endpoint: config.base_url.clone(),
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn chain_url(&self, chain: Chain, path: &str) -> String {
        format!(
            "{}/v1/chains/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            chain.chain_id(),
            path
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ServiceResult<T> {
        with_retry(&self.config, url, || self.get_once(url)).await
    }

    async fn get_once<T: DeserializeOwned>(&self, url: &str) -> ServiceResult<T> {
        debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::HttpStatus {
                status: status.as_u16(),
                endpoint: url.to_string(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ServiceError::DeserialisationFailed(format!("{}: {}", url, e)))
    }

    fn transport_error(&self, url: &str, error: reqwest::Error) -> ServiceError {
        if error.is_timeout() {
            ServiceError::Timeout {
                timeout_seconds: self.config.timeout_seconds,
                endpoint: url.to_string(),
            }
        } else {
            ServiceError::RequestFailed {
                endpoint: url.to_string(),
                message: error.to_string(),
            }
        }
    }
}

#[async_trait]
impl SafeService for SafeClient {
    async fn fetch_ownership(&self, address: &str, chain: Chain) -> ServiceResult<WalletInfo> {
        let url = self.chain_url(chain, &format!("safes/{}", address));
        let info: SafeInfoDto = self.get_json(&url).await?;
        Ok(info.into())
    }

    async fn fetch_queued_transactions(
        &self,
        address: &str,
        chain: Chain,
    ) -> ServiceResult<Vec<QueuedTransaction>> {
        let mut url = Some(self.chain_url(
            chain,
            &format!("safes/{}/transactions/queued", address),
        ));
        let mut transactions = Vec::new();
        let mut pages = 0;

        while let Some(page_url) = url.take() {
            if pages == MAX_QUEUE_PAGES {
                warn!(
                    "Queue for {}:{} exceeds {} pages, remaining transactions ignored",
                    chain, address, MAX_QUEUE_PAGES
                );
                break;
            }
            pages += 1;

            let page: QueuedPageDto = self.get_json(&page_url).await?;
            transactions.extend(page.results.into_iter().filter_map(|item| match item {
                QueuedItemDto::Transaction { transaction } => transaction.into_queued(address),
                QueuedItemDto::Other => None,
            }));
            url = page.next.filter(|next| !next.is_empty());
        }

        Ok(transactions)
    }

    async fn fetch_note(&self, transaction_id: &str, chain: Chain) -> ServiceResult<Option<String>> {
        let url = self.chain_url(chain, &format!("transactions/{}", transaction_id));
        let details: TransactionDetailsDto = self.get_json(&url).await?;
        Ok(details.into_note())
    }

    fn wallet_url(&self, address: &str, chain: Chain) -> String {
        wallet_url(&self.config.app_url, address, chain)
    }
}
