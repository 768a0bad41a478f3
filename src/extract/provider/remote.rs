use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ConstraintProvider, ProviderError};
use crate::extract::models::Constraints;
use crate::lexicon::{BudgetTier, CategoryId, Lexicon};

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    options: ChatOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

/// What the model is asked to return. Category and tier arrive as raw
/// strings and are resolved against the closed enums; anything the model
/// gets wrong degrades to the same defaults the rule-based extractor uses.
#[derive(Debug, Deserialize)]
struct RemoteAnalysis {
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    budget_type: Option<String>,
    #[serde(default)]
    specific_budget: Option<u64>,
}

const SYSTEM_PROMPT: &str = "You are a shopping query analyzer. Respond only with valid JSON.";

/// LLM-backed constraint extraction over an Ollama-compatible chat endpoint.
/// The ceiling is always re-derived through the lexicon so the Constraints
/// invariant holds regardless of what the model returns.
pub struct RemoteProvider {
    base_url: String,
    model: String,
    api_key: Option<String>,
    temperature: f64,
    lexicon: Arc<Lexicon>,
    client: Client,
}

impl RemoteProvider {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        temperature: f64,
        lexicon: Arc<Lexicon>,
    ) -> Result<Self, ProviderError> {
        let base_url = base_url.into();
        let model = model.into();
        info!("Remote provider initialized (model={}, url={})", model, base_url);
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            base_url,
            model,
            api_key,
            temperature,
            lexicon,
            client,
        })
    }

    fn build_user_prompt(query: &str) -> String {
        format!(
            r#"Analyze this shopping query: "{query}"

Return a JSON object with:
- category: one of "apparel", "mobiles", "electronics", or null
- budget_type: one of "low", "medium", "high", or null
- specific_budget: the explicit price ceiling in whole currency units, or null"#
        )
    }

    fn into_constraints(&self, analysis: RemoteAnalysis, raw_query: &str) -> Constraints {
        let category = analysis
            .category
            .as_deref()
            .and_then(|c| CategoryId::from_str(&c.to_lowercase()).ok());

        let explicit_price = analysis.specific_budget;
        let budget_tier = if explicit_price.is_some() {
            BudgetTier::Specific
        } else {
            analysis
                .budget_type
                .as_deref()
                .and_then(|t| BudgetTier::from_str(&t.to_lowercase()).ok())
                .filter(|t| *t != BudgetTier::Specific)
                .unwrap_or_default()
        };
        let budget_ceiling = explicit_price
            .unwrap_or_else(|| self.lexicon.default_budget(category, budget_tier));

        Constraints {
            category,
            budget_ceiling,
            budget_tier,
            explicit_price,
            original_query: raw_query.to_string(),
        }
    }
}

#[async_trait]
impl ConstraintProvider for RemoteProvider {
    async fn extract(&self, query: &str) -> Result<Constraints, ProviderError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Self::build_user_prompt(query),
                },
            ],
            stream: false,
            options: ChatOptions {
                temperature: self.temperature,
            },
            format: Some("json".to_string()),
        };

        let mut builder = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await?
            .error_for_status()
            .map_err(ProviderError::Http)?
            .json::<ChatResponse>()
            .await?;

        debug!("Remote analysis response: {}", response.message.content);

        let analysis: RemoteAnalysis = serde_json::from_str(&response.message.content)?;
        Ok(self.into_constraints(analysis, query))
    }

    fn provider_name(&self) -> &str {
        "remote"
    }
}
