//! Exhaustion controller: the batched generation loop
//!
//! Per batch: one generator call, concurrent embedding fetches, then a
//! strictly sequential assignment pass in the generator's output order.
//! Embeddings may arrive in parallel, but two mutually similar items
//! assigned concurrently could each miss the other and spawn two clusters,
//! so assignment is single-writer by construction: the session owns the
//! registry and applies assignments one at a time.

use std::sync::Arc;

use chrono::Utc;
use futures_util::future::join_all;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::report::{Item, SessionReport, StopReason};
use crate::cluster::{ClusterRegistry, FrequencySpectrum};
use crate::config::SessionConfig;
use crate::error::WellspringError;
use crate::estimator::ExhaustionEstimate;
use crate::provider::{Embedder, IdeaGenerator};

/// Prior-items count past which unbounded prompt growth is flagged once.
const PRIOR_GROWTH_WARN_AT: usize = 200;

/// Drives one session: generate candidates in batches, embed them, assign
/// them to clusters, and stop once the Chao1 exhaustion estimate says the
/// idea space is sufficiently explored (or the batch budget runs out).
pub struct ExhaustionController {
    generator: Arc<dyn IdeaGenerator>,
    embedder: Arc<dyn Embedder>,
    config: SessionConfig,
}

impl ExhaustionController {
    pub fn new(
        generator: Arc<dyn IdeaGenerator>,
        embedder: Arc<dyn Embedder>,
        config: SessionConfig,
    ) -> Self {
        Self {
            generator,
            embedder,
            config,
        }
    }

    /// Run a session to completion for one prompt.
    ///
    /// Configuration is validated before any collaborator call; an invalid
    /// config is the only fatal error. Generator failures become zero-item
    /// batches, and per-item embedder failures or degenerate embeddings
    /// drop just that item.
    pub async fn run(&self, prompt: &str) -> Result<SessionReport, WellspringError> {
        self.config.validate()?;

        let session_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!(%session_id, batch_size = self.config.batch_size, "starting exhaustion session");

        let mut registry = ClusterRegistry::new(self.config.join_threshold as f32);
        let mut items: Vec<Item> = Vec::new();
        let mut spectrum = FrequencySpectrum::default();
        let mut estimate = ExhaustionEstimate::from_spectrum(&spectrum);
        let mut stop_reason = StopReason::Budget;
        let mut growth_flagged = false;

        'batches: for batch_index in 0..self.config.max_batches {
            let prior = self.prior_slice(&items);
            if !growth_flagged && prior.len() > PRIOR_GROWTH_WARN_AT {
                warn!(
                    prior_items = prior.len(),
                    "prior-items block passed to the generator keeps growing; \
                     prompt size is a known scaling limit for long sessions"
                );
                growth_flagged = true;
            }

            let texts = match self
                .generator
                .generate(prompt, self.config.batch_size, &prior)
                .await
            {
                Ok(texts) => texts,
                Err(error) => {
                    warn!(batch = batch_index, %error, "generator failed; treating as zero-item batch");
                    Vec::new()
                }
            };
            if texts.is_empty() {
                debug!(batch = batch_index, "zero-item batch");
                continue;
            }

            // Fetch embeddings concurrently; join_all preserves input order
            // so the sequential apply phase below sees items exactly as the
            // generator produced them.
            let embeddings = join_all(texts.iter().map(|text| self.embedder.embed(text))).await;

            for (text, embedding) in texts.into_iter().zip(embeddings) {
                let embedding = match embedding {
                    Ok(vector) => vector,
                    Err(error) => {
                        warn!(%error, item = %text, "embedding failed; dropping item");
                        continue;
                    }
                };

                let cluster = match registry.assign(&embedding) {
                    Ok(id) => id,
                    Err(error) => {
                        warn!(%error, item = %text, "degenerate embedding; dropping item");
                        continue;
                    }
                };

                items.push(Item {
                    text,
                    embedding,
                    cluster,
                });
                spectrum = FrequencySpectrum::from_registry(&registry);
                estimate = ExhaustionEstimate::from_spectrum(&spectrum);
                debug!(
                    n = spectrum.total_items,
                    u = spectrum.observed,
                    estimated_total = estimate.estimated_total,
                    exhaustion_pct = estimate.exhaustion_pct,
                    %cluster,
                    "assigned item"
                );

                if estimate.exhaustion_pct / 100.0 > self.config.stop_threshold
                    && spectrum.total_items >= self.config.minimum_items
                {
                    // Remaining items queued in this batch are discarded.
                    stop_reason = StopReason::Threshold;
                    break 'batches;
                }
            }
        }

        info!(
            %session_id,
            n = spectrum.total_items,
            u = spectrum.observed,
            exhaustion_pct = estimate.exhaustion_pct,
            stop_reason = stop_reason.as_str(),
            "session finished"
        );

        Ok(SessionReport {
            session_id,
            prompt: prompt.to_string(),
            total_items: spectrum.total_items,
            observed_clusters: spectrum.observed,
            singletons: spectrum.singletons,
            doubletons: spectrum.doubletons,
            estimated_total: estimate.estimated_total,
            exhaustion_pct: estimate.exhaustion_pct,
            stop_reason,
            items,
            started_at,
            finished_at: Utc::now(),
        })
    }

    /// Prior item texts for the next generation request, tail-capped by
    /// `prior_context_limit` when set.
    fn prior_slice(&self, items: &[Item]) -> Vec<String> {
        let skip = match self.config.prior_context_limit {
            Some(limit) if items.len() > limit => items.len() - limit,
            _ => 0,
        };
        items[skip..].iter().map(|item| item.text.clone()).collect()
    }
}
