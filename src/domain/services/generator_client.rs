#[cfg(test)]
#[path = "generator_client_test.rs"]
mod tests;

use anyhow::Result;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::GeneratorBox;
use crate::domain::models::GeneratorPrompt;
use crate::domain::models::Question;
use crate::domain::models::QuizError;
use crate::domain::models::QuizResponse;
use crate::infrastructure::generators::GeneratorManager;

pub const DEFAULT_QUESTION_COUNT: usize = 10;

/// Strips Markdown fences and any chatter around the JSON object a model
/// returned.
pub fn clean_response(text: &str) -> String {
    let stripped = text.replace("```json", "").replace("```", "");
    let trimmed = stripped.trim();

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            return trimmed[start..=end].to_string();
        }
    }

    return trimmed.to_string();
}

/// Parses and validates a raw completion into questions. An empty
/// `questions` array is returned as an empty list.
pub fn parse_questions(text: &str) -> Result<Vec<Question>> {
    let cleaned = clean_response(text);
    if cleaned.is_empty() {
        return Err(QuizError::EmptyResponse.into());
    }

    let res = serde_json::from_str::<QuizResponse>(&cleaned)?;
    let mut questions = vec![];
    for (idx, payload) in res.questions.into_iter().enumerate() {
        questions.push(Question::from_payload(idx + 1, payload)?);
    }

    return Ok(questions);
}

/// Turns a topic into a validated list of questions using one generator
/// request.
pub struct GeneratorClient {
    generator: GeneratorBox,
    question_count: usize,
}

impl GeneratorClient {
    pub fn new(generator: GeneratorBox, question_count: usize) -> GeneratorClient {
        return GeneratorClient {
            generator,
            question_count,
        };
    }

    pub fn from_config() -> Result<GeneratorClient> {
        let generator = GeneratorManager::get(&Config::get(ConfigKey::Generator))?;
        let question_count = Config::get(ConfigKey::QuestionCount)
            .parse::<usize>()
            .unwrap_or(DEFAULT_QUESTION_COUNT);

        return Ok(GeneratorClient::new(generator, question_count));
    }

    pub async fn health_check(&self) -> Result<()> {
        return self.generator.health_check().await;
    }

    pub async fn generate_questions(&self, topic: &str) -> Result<Vec<Question>> {
        if topic.trim().is_empty() {
            return Err(QuizError::EmptyTopic.into());
        }

        let prompt = GeneratorPrompt::new(topic, self.question_count);
        tracing::info!(
            generator = %self.generator.name(),
            topic = %prompt.topic,
            question_count = prompt.question_count,
            "Requesting questions"
        );

        let completion = self.generator.get_completion(&prompt).await?;
        tracing::debug!(completion = %completion, "Generator completion");

        let questions = parse_questions(&completion)?;
        if questions.len() != self.question_count {
            tracing::warn!(
                requested = self.question_count,
                received = questions.len(),
                "Generator returned a different number of questions"
            );
        }

        return Ok(questions);
    }
}
