#[cfg(test)]
#[path = "claude_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Generator;
use crate::domain::models::GeneratorName;
use crate::domain::models::GeneratorPrompt;

const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Model {
    id: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ModelListResponse {
    data: Vec<Model>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct MessageRequest {
    role: String,
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<MessageRequest>,
    stream: bool,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    _type: String,
    #[serde(default)]
    text: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionResponse {
    content: Vec<ContentBlock>,
}

pub struct Claude {
    url: String,
    token: String,
    model: String,
    timeout: String,
    generation_timeout: String,
}

impl Default for Claude {
    fn default() -> Claude {
        return Claude {
            url: Config::get(ConfigKey::ClaudeURL),
            token: Config::get(ConfigKey::ClaudeToken),
            model: Config::get(ConfigKey::Model),
            timeout: Config::get(ConfigKey::GeneratorHealthCheckTimeout),
            generation_timeout: Config::get(ConfigKey::GeneratorTimeout),
        };
    }
}

impl Claude {
    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        return reqwest::Client::new()
            .get(format!("{url}{path}", url = self.url))
            .header("x-api-key", &self.token)
            .header("anthropic-version", API_VERSION);
    }
}

#[async_trait]
impl Generator for Claude {
    fn name(&self) -> GeneratorName {
        return GeneratorName::Claude;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Claude URL is not defined");
        }
        if self.token.is_empty() {
            bail!("Claude token is not defined");
        }

        let res = self
            .get("/v1/models")
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        let res = match res {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, "Claude is not reachable");
                bail!("Claude is not reachable");
            }
        };

        let status = res.status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "Claude health check failed");
            bail!("Claude health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn list_models(&self) -> Result<Vec<String>> {
        let res = self
            .get("/v1/models")
            .send()
            .await?
            .json::<ModelListResponse>()
            .await?;

        let mut models: Vec<String> = res
            .data
            .iter()
            .map(|model| {
                return model.id.to_string();
            })
            .collect();

        models.sort();

        return Ok(models);
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion(&self, prompt: &GeneratorPrompt) -> Result<String> {
        let req = CompletionRequest {
            model: self.model.to_string(),
            max_tokens: MAX_TOKENS,
            messages: vec![MessageRequest {
                role: "user".to_string(),
                content: prompt.text.to_string(),
            }],
            stream: false,
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/v1/messages", url = self.url))
            .header("x-api-key", &self.token)
            .header("anthropic-version", API_VERSION)
            .timeout(Duration::from_millis(
                self.generation_timeout.parse::<u64>()?,
            ))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make completion request to Claude"
            );
            bail!(format!(
                "Failed to make completion request to Claude, {}",
                res.status().as_u16()
            ));
        }

        let ores = res.json::<CompletionResponse>().await?;
        let text = ores
            .content
            .into_iter()
            .filter(|block| return block._type == "text")
            .map(|block| return block.text)
            .collect::<Vec<String>>()
            .join("");

        return Ok(text);
    }
}
