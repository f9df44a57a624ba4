//! Sessions — the explicit application-state object that owns one resume
//! document plus its transient AI state. All mutation funnels through the
//! store's entry points; handlers never reach into session fields directly.
//!
//! Sessions are in-memory only and die with the process.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::document::model::ResumeDocument;
use crate::errors::AppError;
use crate::flows::types::{ContentEvaluation, SkillScore, TaskKind, TaskState};

/// A cached content evaluation. `analyzed_content` is the exact serialized
/// document the evaluation was computed from; it doubles as the cache key.
#[derive(Debug, Clone)]
pub struct AnalysisState {
    pub evaluation: ContentEvaluation,
    pub analyzed_content: String,
    pub fixes_applied: bool,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub document: ResumeDocument,
    pub skill_scores: Option<Vec<SkillScore>>,
    pub analysis: Option<AnalysisState>,
    pub task: TaskState,
    pub created_at: DateTime<Utc>,
}

impl Session {
    fn new() -> Self {
        Session {
            id: Uuid::new_v4(),
            document: ResumeDocument::template(),
            skill_scores: None,
            analysis: None,
            task: TaskState::Idle,
            created_at: Utc::now(),
        }
    }
}

/// What clients see of a session. The raw cache key stays internal.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub document: ResumeDocument,
    pub skill_scores: Option<Vec<SkillScore>>,
    pub analysis: Option<AnalysisView>,
    pub task: TaskState,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisView {
    pub evaluation: ContentEvaluation,
    pub fixes_applied: bool,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        SessionView {
            id: session.id,
            created_at: session.created_at,
            document: session.document.clone(),
            skill_scores: session.skill_scores.clone(),
            analysis: session.analysis.as_ref().map(|a| AnalysisView {
                evaluation: a.evaluation.clone(),
                fixes_applied: a.fixes_applied,
            }),
            task: session.task,
        }
    }
}

/// Process-local session map shared across handlers via `AppState`.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub async fn create(&self) -> SessionView {
        let session = Session::new();
        let view = SessionView::from(&session);
        self.inner.write().await.insert(session.id, session);
        view
    }

    pub async fn view(&self, id: Uuid) -> Result<SessionView, AppError> {
        let guard = self.inner.read().await;
        let session = guard
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        Ok(SessionView::from(session))
    }

    /// Runs a closure against the full session under the write lock.
    pub async fn with_session<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> Result<R, AppError>,
    ) -> Result<R, AppError> {
        let mut guard = self.inner.write().await;
        let session = guard
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        f(session)
    }

    /// Applies a manual edit to the document. An edit that actually changes
    /// the document invalidates the "fixes applied" marker (the
    /// fix-application control reappears once the document diverges from the
    /// applied result); no-op edits such as stale-id updates leave it alone.
    pub async fn edit<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut ResumeDocument) -> Result<R, AppError>,
    ) -> Result<R, AppError> {
        self.with_session(id, |session| {
            let before = session.document.clone();
            let out = f(&mut session.document)?;
            if session.document != before {
                if let Some(analysis) = session.analysis.as_mut() {
                    analysis.fixes_applied = false;
                }
            }
            Ok(out)
        })
        .await
    }

    /// Claims the session's task slot. One task at a time: claiming while
    /// another is in flight is rejected, not queued.
    pub async fn begin_task(&self, id: Uuid, kind: TaskKind) -> Result<(), AppError> {
        self.with_session(id, |session| match session.task {
            TaskState::Idle => {
                session.task = TaskState::InFlight { kind };
                Ok(())
            }
            TaskState::InFlight { kind: current } => Err(AppError::TaskInFlight(current)),
        })
        .await
    }

    /// Releases the task slot. Called on success and failure alike; a
    /// vanished session just means there is nothing to release.
    pub async fn finish_task(&self, id: Uuid) {
        let mut guard = self.inner.write().await;
        if let Some(session) = guard.get_mut(&id) {
            session.task = TaskState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::patch::{ItemCollection, ItemField, PatchField};

    async fn seed_applied_analysis(store: &SessionStore, id: Uuid) {
        store
            .with_session(id, |session| {
                session.analysis = Some(AnalysisState {
                    evaluation: ContentEvaluation {
                        clarity_score: 80,
                        grammar_score: 90,
                        ats_score: 70,
                        effectiveness_feedback: "ok".to_string(),
                        suggested_fixes: vec![],
                    },
                    analyzed_content: "{}".to_string(),
                    fixes_applied: true,
                });
                Ok(())
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_then_view_round_trips() {
        let store = SessionStore::default();
        let created = store.create().await;
        let viewed = store.view(created.id).await.unwrap();
        assert_eq!(viewed.id, created.id);
        assert_eq!(viewed.document, created.document);
        assert_eq!(viewed.task, TaskState::Idle);
    }

    #[tokio::test]
    async fn test_view_unknown_session_is_not_found() {
        let store = SessionStore::default();
        let err = store.view(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_task_slot_rejects_concurrent_start() {
        let store = SessionStore::default();
        let id = store.create().await.id;

        store.begin_task(id, TaskKind::Parse).await.unwrap();
        let err = store.begin_task(id, TaskKind::Score).await.unwrap_err();
        assert!(matches!(err, AppError::TaskInFlight(TaskKind::Parse)));

        store.finish_task(id).await;
        store.begin_task(id, TaskKind::Score).await.unwrap();
    }

    #[tokio::test]
    async fn test_edit_clears_fixes_applied() {
        let store = SessionStore::default();
        let id = store.create().await.id;
        seed_applied_analysis(&store, id).await;

        store
            .edit(id, |doc| {
                doc.apply_patch(vec![PatchField::Name(Some("New Name".to_string()))]);
                Ok(())
            })
            .await
            .unwrap();

        let view = store.view(id).await.unwrap();
        assert!(!view.analysis.unwrap().fixes_applied);
    }

    #[tokio::test]
    async fn test_no_op_edit_keeps_fixes_applied() {
        let store = SessionStore::default();
        let id = store.create().await.id;
        seed_applied_analysis(&store, id).await;

        // Stale item id and missing section id are silent no-ops; the
        // document is unchanged, so the marker must survive.
        store
            .edit(id, |doc| {
                doc.update_item(
                    ItemCollection::Experience,
                    "no-such-id",
                    ItemField::Title,
                    "Ghost".to_string(),
                )
            })
            .await
            .unwrap();
        store
            .edit(id, |doc| {
                doc.set_section_enabled("no-such-section", false);
                Ok(())
            })
            .await
            .unwrap();

        let view = store.view(id).await.unwrap();
        assert!(view.analysis.unwrap().fixes_applied);
    }
}
