//! Task orchestration — the lifecycle of every AI-backed operation. Each
//! run claims the session's task slot, calls the capability WITHOUT holding
//! the session lock, releases the slot, and only then merges results. A
//! failed capability call therefore never leaves the document partially
//! mutated or the slot stuck in flight.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::document::model::ResumeDocument;
use crate::document::reconcile::merge_fragment;
use crate::errors::AppError;
use crate::flows::capabilities::AiCapabilities;
use crate::flows::extract;
use crate::flows::types::{ResumeFragment, TaskKind};
use crate::session::{AnalysisState, SessionStore, SessionView};

/// Documents serializing below this length carry too little content for a
/// meaningful evaluation.
pub const MIN_ANALYZE_CONTENT_LEN: usize = 50;

#[derive(Clone)]
pub struct Orchestrator {
    sessions: SessionStore,
    capabilities: Arc<dyn AiCapabilities>,
}

impl Orchestrator {
    pub fn new(sessions: SessionStore, capabilities: Arc<dyn AiCapabilities>) -> Self {
        Self {
            sessions,
            capabilities,
        }
    }

    /// Parses raw resume text and merges the extracted fragment into the
    /// session's document.
    pub async fn run_parse(
        &self,
        id: Uuid,
        resume_text: &str,
    ) -> Result<SessionView, AppError> {
        if resume_text.trim().is_empty() {
            return Err(AppError::Validation(
                "Resume text must not be empty".to_string(),
            ));
        }

        self.sessions.begin_task(id, TaskKind::Parse).await?;
        let result = self.capabilities.parse(resume_text).await;
        self.sessions.finish_task(id).await;

        self.merge_into(id, result?).await
    }

    /// Extracts text from an uploaded PDF, then runs the parse flow on it.
    pub async fn run_import(&self, id: Uuid, bytes: &[u8]) -> Result<SessionView, AppError> {
        let text = extract::pdf_text(bytes)?;
        info!("Extracted {} chars from uploaded PDF", text.len());
        self.run_parse(id, &text).await
    }

    /// Generates a full resume from a free-form description of the person.
    pub async fn run_generate(
        &self,
        id: Uuid,
        description: &str,
    ) -> Result<SessionView, AppError> {
        if description.trim().is_empty() {
            return Err(AppError::Validation(
                "Describe the person to generate a resume for".to_string(),
            ));
        }

        self.sessions.begin_task(id, TaskKind::Generate).await?;
        let result = self.capabilities.generate(description).await;
        self.sessions.finish_task(id).await;

        self.merge_into(id, result?).await
    }

    /// Scores the document's skills against a job description. The scores
    /// are stored on the session, sorted descending; the document itself is
    /// untouched.
    pub async fn run_score(
        &self,
        id: Uuid,
        job_description: &str,
    ) -> Result<SessionView, AppError> {
        if job_description.trim().is_empty() {
            return Err(AppError::Validation(
                "Job description must not be empty".to_string(),
            ));
        }

        let skills = self
            .sessions
            .with_session(id, |session| Ok(session.document.skills.clone()))
            .await?;
        if skills.is_empty() {
            return Err(AppError::Validation(
                "Add skills to the resume before scoring".to_string(),
            ));
        }

        self.sessions.begin_task(id, TaskKind::Score).await?;
        let result = self
            .capabilities
            .score_skills(&skills.join(", "), job_description)
            .await;
        self.sessions.finish_task(id).await;

        let mut scores = result?;
        scores.sort_by(|a, b| b.score.cmp(&a.score));

        self.sessions
            .with_session(id, move |session| {
                session.skill_scores = Some(scores);
                Ok(SessionView::from(&*session))
            })
            .await
    }

    /// Evaluates the document's content. Results are cached against the
    /// exact serialized document; an unchanged document short-circuits
    /// without invoking the capability.
    pub async fn run_analyze(&self, id: Uuid) -> Result<SessionView, AppError> {
        let (serialized, cached) = self
            .sessions
            .with_session(id, |session| {
                let serialized = serialize_document(&session.document)?;
                let cached = session
                    .analysis
                    .as_ref()
                    .is_some_and(|a| a.analyzed_content == serialized);
                Ok((serialized, cached))
            })
            .await?;

        if serialized.len() < MIN_ANALYZE_CONTENT_LEN {
            return Err(AppError::Validation(
                "Not enough resume content to analyze".to_string(),
            ));
        }

        if cached {
            debug!("Document unchanged since last analysis, reusing cached evaluation");
            return self.sessions.view(id).await;
        }

        self.sessions.begin_task(id, TaskKind::Analyze).await?;
        let result = self.capabilities.evaluate(&serialized).await;
        self.sessions.finish_task(id).await;

        let evaluation = result?;
        self.sessions
            .with_session(id, move |session| {
                session.analysis = Some(AnalysisState {
                    evaluation,
                    analyzed_content: serialized,
                    fixes_applied: false,
                });
                Ok(SessionView::from(&*session))
            })
            .await
    }

    /// Applies the last analysis's suggested fixes to the document, then
    /// re-keys the analysis cache to the post-merge document so an immediate
    /// re-analyze reuses the cache.
    pub async fn run_apply_fixes(&self, id: Uuid) -> Result<SessionView, AppError> {
        let (content, fixes) = self
            .sessions
            .with_session(id, |session| {
                let analysis = session.analysis.as_ref().ok_or_else(|| {
                    AppError::Validation(
                        "Analyze the resume before applying fixes".to_string(),
                    )
                })?;
                if analysis.fixes_applied {
                    return Err(AppError::Validation(
                        "Fixes were already applied; edit or re-analyze first".to_string(),
                    ));
                }
                if analysis.evaluation.suggested_fixes.is_empty() {
                    return Err(AppError::Validation(
                        "The last analysis suggested no fixes".to_string(),
                    ));
                }
                Ok((
                    serialize_document(&session.document)?,
                    analysis.evaluation.suggested_fixes.clone(),
                ))
            })
            .await?;

        self.sessions.begin_task(id, TaskKind::ApplyFixes).await?;
        let result = self.capabilities.apply_fixes(&content, &fixes).await;
        self.sessions.finish_task(id).await;

        let fragment = result?;
        self.sessions
            .with_session(id, move |session| {
                merge_fragment(&mut session.document, fragment);
                let rekeyed = serialize_document(&session.document)?;
                if let Some(analysis) = session.analysis.as_mut() {
                    analysis.analyzed_content = rekeyed;
                    analysis.fixes_applied = true;
                }
                Ok(SessionView::from(&*session))
            })
            .await
    }

    /// Merges a capability-returned fragment under the write lock. Merging
    /// changes the document, so any "fixes applied" marker is cleared the
    /// same way a manual edit clears it.
    async fn merge_into(
        &self,
        id: Uuid,
        fragment: ResumeFragment,
    ) -> Result<SessionView, AppError> {
        self.sessions
            .with_session(id, move |session| {
                merge_fragment(&mut session.document, fragment);
                if let Some(analysis) = session.analysis.as_mut() {
                    analysis.fixes_applied = false;
                }
                Ok(SessionView::from(&*session))
            })
            .await
    }
}

fn serialize_document(doc: &ResumeDocument) -> Result<String, AppError> {
    serde_json::to_string(doc).map_err(|e| anyhow::Error::from(e).into())
}
