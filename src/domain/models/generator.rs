#[cfg(test)]
#[path = "generator_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum GeneratorName {
    Ollama,
    OpenAI,
    Gemini,
    Claude,
}

impl GeneratorName {
    pub fn parse(text: String) -> Option<GeneratorName> {
        return GeneratorName::iter().find(|e| return e.to_string() == text);
    }

    /// Model used when none has been configured.
    pub fn default_model(&self) -> &'static str {
        match self {
            GeneratorName::Ollama => return "llama2",
            GeneratorName::OpenAI => return "gpt-3.5-turbo",
            GeneratorName::Gemini => return "models/gemini-pro",
            GeneratorName::Claude => return "claude-3-haiku-20240307",
        }
    }
}

pub struct GeneratorPrompt {
    pub topic: String,
    pub question_count: usize,
    pub text: String,
}

impl GeneratorPrompt {
    pub fn new(topic: &str, question_count: usize) -> GeneratorPrompt {
        let topic = topic.trim();
        let text = format!(
            r#"
Generate {question_count} multiple choice quiz questions in JSON format on the topic: "{topic}".
Each question must contain:
- the question text (question)
- an array of exactly 4 answer options (answers)
- the index of the correct answer (correctIndex, from 0 to 3)

Requirements:
- exactly 1 correct answer
- 3 incorrect answers
- respond strictly with JSON and no additional text (markdown code blocks are allowed)

Example structure:
{{
  "questions": [
    {{
      "question": "Question?",
      "answers": ["A", "B", "C", "D"],
      "correctIndex": 0
    }}
  ]
}}
"#
        );

        return GeneratorPrompt {
            topic: topic.to_string(),
            question_count,
            text: text.trim().to_string(),
        };
    }
}

#[async_trait]
pub trait Generator {
    /// Returns the name of the generator.
    fn name(&self) -> GeneratorName;

    /// Used at startup to verify all configurations are available to work with
    /// the generator.
    async fn health_check(&self) -> Result<()>;

    /// Lists all models available on the generator, used by the `models`
    /// subcommand.
    async fn list_models(&self) -> Result<Vec<String>>;

    /// Sends the prompt to the model and returns its full text response. One
    /// call is one request; retrying is left to the caller.
    async fn get_completion(&self, prompt: &GeneratorPrompt) -> Result<String>;
}

pub type GeneratorBox = Box<dyn Generator + Send + Sync>;
