//! Advice collaborator: one outbound call to a generative-language API.
//! Failures never propagate past this module; callers always get a string
//! or an explicit busy error.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::AdviceSettings;
use crate::core::metrics;
use crate::domain::{Budget, ExpenseRecord};
use crate::errors::{Result, TrackerError};

/// Shown when the provider cannot be reached or returns garbage.
pub const FALLBACK_MESSAGE: &str =
    "AI insights currently unavailable. Tip: try to limit 'Entertainment' spending this week!";

/// Shown instead of calling out when there is nothing to analyze.
pub const EMPTY_LEDGER_MESSAGE: &str = "Add some expenses to see AI-powered financial advice!";

/// Builds the single text prompt the provider sees: budget limit, total
/// spent, remaining amount, and one line per expense.
pub fn build_prompt(records: &[ExpenseRecord], budget: Budget, currency_symbol: &str) -> String {
    let total_spent = metrics::total_spent(records);
    let remaining = metrics::remaining(records, budget);
    let listing = records
        .iter()
        .map(|record| {
            format!(
                "{}: {} - {}{} ({})",
                record.date,
                record.category.label(),
                currency_symbol,
                record.amount,
                record.note
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "As a student financial mentor, analyze these expenses and provide 3-4 bullet points \
         of concise, actionable advice.\n\
         Currency: {symbol}\n\
         Monthly Budget: {symbol}{limit}\n\
         Total Spent: {symbol}{spent}\n\
         Remaining: {symbol}{remaining}\n\
         \n\
         Expenses:\n\
         {listing}\n\
         \n\
         Keep it friendly, student-centric, and encouraging. Focus on everyday spending \
         patterns and saving tips.",
        symbol = currency_symbol,
        limit = budget.monthly_limit,
        spent = total_spent,
        remaining = remaining,
        listing = listing,
    )
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "topP")]
    top_p: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

/// Blocking client for the advice provider. The in-flight flag is a
/// cooperative guard: a second request while one is pending is refused,
/// never queued.
pub struct AdviceClient {
    settings: AdviceSettings,
    client: reqwest::blocking::Client,
    in_flight: AtomicBool,
}

impl AdviceClient {
    pub fn new(settings: AdviceSettings) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|err| TrackerError::Advice(err.to_string()))?;
        Ok(Self {
            settings,
            client,
            in_flight: AtomicBool::new(false),
        })
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Requests spending advice for the given snapshot. Provider failures
    /// of any kind collapse to [`FALLBACK_MESSAGE`]; the only error is
    /// [`TrackerError::AdviceBusy`] when a request is already pending.
    pub fn request_insight(
        &self,
        records: &[ExpenseRecord],
        budget: Budget,
        currency_symbol: &str,
    ) -> Result<String> {
        if records.is_empty() {
            return Ok(EMPTY_LEDGER_MESSAGE.to_string());
        }
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(TrackerError::AdviceBusy);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let prompt = build_prompt(records, budget, currency_symbol);
        match self.generate(&prompt) {
            Ok(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
            Ok(_) => {
                tracing::warn!("advice provider returned an empty completion");
                Ok(FALLBACK_MESSAGE.to_string())
            }
            Err(err) => {
                tracing::warn!("advice request failed: {err}");
                Ok(FALLBACK_MESSAGE.to_string())
            }
        }
    }

    fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = std::env::var(&self.settings.api_key_env).map_err(|_| {
            TrackerError::Advice(format!(
                "missing API credential (set {})",
                self.settings.api_key_env
            ))
        })?;

        let url = format!(
            "{}/{}:generateContent?key={}",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.model,
            api_key
        );
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                top_p: 0.8,
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .map_err(|err| TrackerError::Advice(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TrackerError::Advice(format!("HTTP {status}")));
        }

        let body: GenerateResponse = response
            .json()
            .map_err(|err| TrackerError::Advice(err.to_string()))?;
        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| TrackerError::Advice("no completion in response".into()))?;
        Ok(text)
    }
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
