//! Per-record query protocol
//!
//! Drives one lookup against the shared page: navigate to the form, fill
//! the identifier, submit, wait for result cards and read them back.

use std::time::Duration;
use tracing::{debug, info, warn};

use super::cards::{collect_fields, parse_cards};
use super::errors::{LookupError, Stage};
use super::stage_timeout::with_stage_timeout;
use super::types::{
    CARD_SELECTOR, CedulaRecord, INPUT_SELECTOR, Identifier, LookupOutcome, SUBMIT_SELECTOR,
};
use crate::browser::QueryPage;
use crate::config::ScraperConfig;

/// Runs the query protocol for one identifier at a time.
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    endpoint: String,
    navigation_timeout: Duration,
    element_timeout: Duration,
    poll_interval: Duration,
}

impl RecordExtractor {
    #[must_use]
    pub fn new(
        endpoint: impl Into<String>,
        navigation_timeout: Duration,
        element_timeout: Duration,
        poll_interval: Duration,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            navigation_timeout,
            element_timeout,
            poll_interval,
        }
    }

    #[must_use]
    pub fn from_config(config: &ScraperConfig) -> Self {
        Self::new(
            config.get_endpoint(),
            config.navigation_timeout(),
            config.element_timeout(),
            config.poll_interval(),
        )
    }

    /// Look up `identifier`, reducing every failure to `LookupOutcome::Failed`.
    pub async fn extract<P>(&self, page: &P, identifier: &Identifier) -> LookupOutcome
    where
        P: QueryPage + ?Sized,
    {
        info!("Looking up cedula: {}", identifier);

        match self.run_protocol(page, identifier).await {
            Ok(record) => {
                info!("Extracted record for {}", record.name);
                debug!(
                    "  birth date: {}, province: {}",
                    record.birth_date, record.province
                );
                LookupOutcome::Found(record)
            }
            Err(e) => {
                warn!("Lookup failed for cedula {}: {}", identifier, e);
                LookupOutcome::Failed(e)
            }
        }
    }

    async fn run_protocol<P>(
        &self,
        page: &P,
        identifier: &Identifier,
    ) -> Result<CedulaRecord, LookupError>
    where
        P: QueryPage + ?Sized,
    {
        with_stage_timeout(Stage::Navigate, self.navigation_timeout, async {
            page.navigate(&self.endpoint)
                .await
                .map_err(|e| LookupError::browser(Stage::Navigate, &e))
        })
        .await?;

        self.wait_for_element(page, INPUT_SELECTOR, Stage::InputField)
            .await?;

        page.clear_input(INPUT_SELECTOR)
            .await
            .map_err(|e| LookupError::browser(Stage::Fill, &e))?;
        page.type_into(INPUT_SELECTOR, identifier.as_str())
            .await
            .map_err(|e| LookupError::browser(Stage::Fill, &e))?;

        page.click(SUBMIT_SELECTOR)
            .await
            .map_err(|e| LookupError::browser(Stage::Submit, &e))?;

        self.wait_for_element(page, CARD_SELECTOR, Stage::ResultCards)
            .await?;

        let html = page
            .html()
            .await
            .map_err(|e| LookupError::browser(Stage::Extract, &e))?;
        let cards = parse_cards(&html);
        debug!("Found {} result cards", cards.len());

        Ok(collect_fields(&cards).normalize(identifier))
    }

    /// Poll until `selector` matches, bounded by the element timeout.
    async fn wait_for_element<P>(
        &self,
        page: &P,
        selector: &str,
        stage: Stage,
    ) -> Result<(), LookupError>
    where
        P: QueryPage + ?Sized,
    {
        with_stage_timeout(stage, self.element_timeout, async {
            loop {
                if page.element_exists(selector).await {
                    return Ok(());
                }
                tokio::time::sleep(self.poll_interval).await;
            }
        })
        .await
    }
}
