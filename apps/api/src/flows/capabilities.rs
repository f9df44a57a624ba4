//! The capability seam between the orchestrator and the model. The
//! orchestrator only ever sees this trait; tests swap in mocks, production
//! wires in `LlmCapabilities`.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::flows::prompts;
use crate::flows::types::{
    ContentEvaluation, ResumeFragment, ScoreSkillsResponse, SkillScore, TaskKind,
};
use crate::llm_client::LlmClient;

/// The five AI capabilities, one method per task kind.
#[async_trait]
pub trait AiCapabilities: Send + Sync {
    async fn parse(&self, resume_text: &str) -> Result<ResumeFragment, AppError>;

    async fn generate(&self, description: &str) -> Result<ResumeFragment, AppError>;

    async fn score_skills(
        &self,
        skills: &str,
        job_description: &str,
    ) -> Result<Vec<SkillScore>, AppError>;

    async fn evaluate(&self, resume_content: &str) -> Result<ContentEvaluation, AppError>;

    async fn apply_fixes(
        &self,
        resume_content: &str,
        suggested_fixes: &[String],
    ) -> Result<ResumeFragment, AppError>;
}

/// Production implementation backed by the shared `LlmClient`.
pub struct LlmCapabilities {
    llm: LlmClient,
}

impl LlmCapabilities {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl AiCapabilities for LlmCapabilities {
    async fn parse(&self, resume_text: &str) -> Result<ResumeFragment, AppError> {
        self.llm
            .call_json(&prompts::parse_prompt(resume_text), prompts::PARSE_SYSTEM)
            .await
            .map_err(|e| AppError::llm(TaskKind::Parse, e))
    }

    async fn generate(&self, description: &str) -> Result<ResumeFragment, AppError> {
        self.llm
            .call_json(&prompts::generate_prompt(description), prompts::GENERATE_SYSTEM)
            .await
            .map_err(|e| AppError::llm(TaskKind::Generate, e))
    }

    async fn score_skills(
        &self,
        skills: &str,
        job_description: &str,
    ) -> Result<Vec<SkillScore>, AppError> {
        let response: ScoreSkillsResponse = self
            .llm
            .call_json(&prompts::score_prompt(skills, job_description), prompts::SCORE_SYSTEM)
            .await
            .map_err(|e| AppError::llm(TaskKind::Score, e))?;
        Ok(response.scores)
    }

    async fn evaluate(&self, resume_content: &str) -> Result<ContentEvaluation, AppError> {
        self.llm
            .call_json(&prompts::analyze_prompt(resume_content), prompts::ANALYZE_SYSTEM)
            .await
            .map_err(|e| AppError::llm(TaskKind::Analyze, e))
    }

    async fn apply_fixes(
        &self,
        resume_content: &str,
        suggested_fixes: &[String],
    ) -> Result<ResumeFragment, AppError> {
        let fixes = suggested_fixes
            .iter()
            .map(|f| format!("- {f}"))
            .collect::<Vec<_>>()
            .join("\n");
        self.llm
            .call_json(
                &prompts::apply_fixes_prompt(resume_content, &fixes),
                prompts::APPLY_FIXES_SYSTEM,
            )
            .await
            .map_err(|e| AppError::llm(TaskKind::ApplyFixes, e))
    }
}
