//! Name enrichment policy
//!
//! Wraps the nationality lookup and absorbs every failure into a
//! sentinel draft, so a batch always resolves one draft per input name.

use futures::future::join_all;
use tracing::warn;

use leadflow_common::countries::country_name;
use leadflow_common::db::models::{LeadDraft, LeadStatus};

use super::nationalize::{CountryCandidate, NationalizeClient};

/// Sentinel code recorded when no country could be established.
const UNKNOWN_CODE: &str = "XX";

/// Enrich a single name. Infallible from the caller's perspective:
/// lookup failures become the "Error" sentinel, an empty prediction the
/// "Unknown" sentinel, both with probability 0 and status To Check.
pub async fn enrich_name(client: &NationalizeClient, name: &str) -> LeadDraft {
    let name = name.trim();

    match client.lookup(name).await {
        Ok(candidates) => match top_candidate(&candidates) {
            Some(top) => {
                let display = country_name(&top.country_id)
                    .map(str::to_string)
                    .unwrap_or_else(|| top.country_id.clone());

                LeadDraft {
                    name: name.to_string(),
                    most_likely_country: display,
                    country_code: top.country_id.clone(),
                    probability: top.probability,
                    status: LeadStatus::from_probability(top.probability),
                }
            }
            None => LeadDraft {
                name: name.to_string(),
                most_likely_country: "Unknown".to_string(),
                country_code: UNKNOWN_CODE.to_string(),
                probability: 0.0,
                status: LeadStatus::ToCheck,
            },
        },
        Err(err) => {
            warn!(name, error = %err, "enrichment lookup failed, recording sentinel");
            LeadDraft {
                name: name.to_string(),
                most_likely_country: "Error".to_string(),
                country_code: UNKNOWN_CODE.to_string(),
                probability: 0.0,
                status: LeadStatus::ToCheck,
            }
        }
    }
}

/// Highest-probability candidate. On equal probabilities the earliest
/// candidate wins.
fn top_candidate(candidates: &[CountryCandidate]) -> Option<&CountryCandidate> {
    let mut best: Option<&CountryCandidate> = None;
    for candidate in candidates {
        match best {
            Some(current) if candidate.probability <= current.probability => {}
            _ => best = Some(candidate),
        }
    }
    best
}

/// Enrich every name concurrently. Results come back in input order, and
/// per-name sentinels mean one bad lookup never stalls the batch.
pub async fn enrich_batch(client: &NationalizeClient, names: &[String]) -> Vec<LeadDraft> {
    join_all(names.iter().map(|name| enrich_name(client, name))).await
}
