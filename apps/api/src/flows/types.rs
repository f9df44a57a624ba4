//! Shared types for the AI flows: the five task kinds, the per-session task
//! state machine, and the structured request/response records exchanged with
//! the model. None of these ever persist into the resume document itself.

use serde::{Deserialize, Serialize};

use crate::document::model::{EducationItem, ExperienceItem, ProjectItem};

/// The five AI-backed operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
    Parse,
    Generate,
    Score,
    Analyze,
    ApplyFixes,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Parse => "parse",
            TaskKind::Generate => "generate",
            TaskKind::Score => "score",
            TaskKind::Analyze => "analyze",
            TaskKind::ApplyFixes => "apply-fixes",
        }
    }
}

/// Explicit per-session task slot. One task at a time; starting a second
/// while one is in flight is a representable, rejectable state rather than
/// an unchecked race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TaskState {
    Idle,
    InFlight { kind: TaskKind },
}

impl Default for TaskState {
    fn default() -> Self {
        TaskState::Idle
    }
}

/// A content-only resume fragment as returned by the parse, generate, and
/// apply-fixes capabilities. Carries no section or theme metadata, and item
/// ids are not guaranteed (the merge step assigns missing ones).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeFragment {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub experience: Option<Vec<ExperienceItem>>,
    #[serde(default)]
    pub education: Option<Vec<EducationItem>>,
    #[serde(default)]
    pub projects: Option<Vec<ProjectItem>>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
}

/// One skill's market relevance, 0-100. Transient; sorted descending before
/// display and never written into the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillScore {
    pub skill: String,
    pub score: u32,
}

/// Wire shape of the score-skills capability response.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreSkillsResponse {
    pub scores: Vec<SkillScore>,
}

/// Content evaluation result. Cached against the exact serialized document
/// it was computed from; invalidated whenever the document changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEvaluation {
    pub clarity_score: u32,
    pub grammar_score: u32,
    pub ats_score: u32,
    pub effectiveness_feedback: String,
    pub suggested_fixes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_kind_serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&TaskKind::ApplyFixes).unwrap(), r#""apply-fixes""#);
        assert_eq!(TaskKind::ApplyFixes.as_str(), "apply-fixes");
    }

    #[test]
    fn test_task_state_wire_shape() {
        let idle = serde_json::to_value(TaskState::Idle).unwrap();
        assert_eq!(idle["state"], "idle");
        let busy = serde_json::to_value(TaskState::InFlight { kind: TaskKind::Parse }).unwrap();
        assert_eq!(busy["state"], "in_flight");
        assert_eq!(busy["kind"], "parse");
    }

    #[test]
    fn test_fragment_deserializes_sparse_response() {
        let fragment: ResumeFragment = serde_json::from_str(
            r#"{
                "name": "Jordan Reyes",
                "experience": [
                    {"title": "Engineer", "company": "Acme", "dates": "2021", "description": "Built things."}
                ],
                "skills": ["Rust", "SQL"]
            }"#,
        )
        .unwrap();
        assert_eq!(fragment.name.as_deref(), Some("Jordan Reyes"));
        assert_eq!(fragment.experience.as_ref().unwrap().len(), 1);
        assert!(fragment.experience.as_ref().unwrap()[0].id.is_empty());
        assert!(fragment.education.is_none());
        assert!(fragment.summary.is_none());
    }

    #[test]
    fn test_evaluation_round_trips() {
        let evaluation = ContentEvaluation {
            clarity_score: 82,
            grammar_score: 95,
            ats_score: 70,
            effectiveness_feedback: "Solid, but quantify more outcomes.".to_string(),
            suggested_fixes: vec!["Add metrics to the first bullet.".to_string()],
        };
        let json = serde_json::to_string(&evaluation).unwrap();
        let back: ContentEvaluation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, evaluation);
    }
}
