pub mod claude;
pub mod gemini;
pub mod ollama;
pub mod openai;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::GeneratorBox;
use crate::domain::models::GeneratorName;

pub struct GeneratorManager {}

impl GeneratorManager {
    pub fn get(name: &str) -> Result<GeneratorBox> {
        match GeneratorName::parse(name.to_string()) {
            Some(GeneratorName::Ollama) => return Ok(Box::<ollama::Ollama>::default()),
            Some(GeneratorName::OpenAI) => return Ok(Box::<openai::OpenAI>::default()),
            Some(GeneratorName::Gemini) => return Ok(Box::<gemini::Gemini>::default()),
            Some(GeneratorName::Claude) => return Ok(Box::<claude::Claude>::default()),
            None => bail!(format!("No generator implemented for {name}")),
        }
    }
}
