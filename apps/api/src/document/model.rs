//! Resume document model — the canonical in-memory representation of one
//! resume: personal fields, the repeatable item collections, the ordered
//! section descriptors that drive the preview, and the theme.
//!
//! Item identifiers are uuid strings assigned at creation (or at fragment
//! merge, when an AI response omits them) and never reassigned. Every
//! per-item operation joins on the identifier, not position or content.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::theme::ThemeSpec;

/// Generates a fresh item/section identifier. Uuid v4 — treated as
/// practically collision-free, not formally unique.
pub fn new_item_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceItem {
    #[serde(default)]
    pub id: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub dates: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationItem {
    #[serde(default)]
    pub id: String,
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub dates: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectItem {
    #[serde(default)]
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub dates: Option<String>,
    pub url: Option<String>,
}

/// The closed set of section kinds. Standard kinds exist exactly once and
/// use the kind name as their descriptor id; `custom` sections carry a
/// generated uuid id and free-text content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Summary,
    Experience,
    Projects,
    Education,
    Skills,
    Custom,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Summary => "summary",
            SectionKind::Experience => "experience",
            SectionKind::Projects => "projects",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Custom => "custom",
        }
    }
}

/// Metadata controlling visibility, order, and title of one content block.
/// Disabling a standard section hides it without touching the underlying
/// data; only custom sections own their content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDescriptor {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub title: String,
    pub enabled: bool,
    #[serde(default)]
    pub content: Option<String>,
}

/// The fixed standard-section template: one descriptor per standard kind,
/// default titles, all enabled. Reconciliation overlays prior descriptors
/// onto this after AI responses, which never carry section metadata.
pub fn standard_sections() -> Vec<SectionDescriptor> {
    [
        (SectionKind::Summary, "Professional Summary"),
        (SectionKind::Experience, "Work Experience"),
        (SectionKind::Projects, "Projects"),
        (SectionKind::Education, "Education"),
        (SectionKind::Skills, "Skills"),
    ]
    .into_iter()
    .map(|(kind, title)| SectionDescriptor {
        id: kind.as_str().to_string(),
        kind,
        title: title.to_string(),
        enabled: true,
        content: None,
    })
    .collect()
}

/// The root aggregate. One per session, in memory only; replaced wholesale
/// or patched incrementally for the session's duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceItem>,
    #[serde(default)]
    pub education: Vec<EducationItem>,
    #[serde(default)]
    pub projects: Vec<ProjectItem>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default = "standard_sections")]
    pub sections: Vec<SectionDescriptor>,
    #[serde(default)]
    pub theme: ThemeSpec,
}

impl ResumeDocument {
    /// The built-in starter resume every session begins from.
    pub fn template() -> Self {
        ResumeDocument {
            name: Some("Alex Doe".to_string()),
            email: Some("alex.doe@example.com".to_string()),
            phone: Some("123-456-7890".to_string()),
            summary: Some(
                "Innovative and deadline-driven Software Engineer with 5+ years of experience \
                 designing and developing user-centered digital products from initial concept \
                 to final, polished deliverable."
                    .to_string(),
            ),
            experience: vec![
                ExperienceItem {
                    id: new_item_id(),
                    title: Some("Senior Software Engineer".to_string()),
                    company: Some("Tech Solutions Inc.".to_string()),
                    dates: Some("2020 - Present".to_string()),
                    description: Some(
                        "Lead development of a new microservices-based architecture, improving \
                         system scalability by 40%."
                            .to_string(),
                    ),
                },
                ExperienceItem {
                    id: new_item_id(),
                    title: Some("Software Engineer".to_string()),
                    company: Some("Innovate LLC".to_string()),
                    dates: Some("2018 - 2020".to_string()),
                    description: Some(
                        "Developed and maintained front-end features for a large-scale \
                         e-commerce platform."
                            .to_string(),
                    ),
                },
            ],
            education: vec![EducationItem {
                id: new_item_id(),
                institution: Some("State University".to_string()),
                degree: Some("B.S. in Computer Science".to_string()),
                dates: Some("2014 - 2018".to_string()),
            }],
            projects: vec![ProjectItem {
                id: new_item_id(),
                name: Some("E-commerce Search Platform".to_string()),
                description: Some(
                    "Built a high-performance search engine for an e-commerce site, resulting \
                     in a 30% increase in conversion rates."
                        .to_string(),
                ),
                dates: Some("2022".to_string()),
                url: Some("project-search.example.com".to_string()),
            }],
            skills: vec![
                "Rust".to_string(),
                "TypeScript".to_string(),
                "PostgreSQL".to_string(),
                "AWS".to_string(),
                "Docker".to_string(),
            ],
            sections: standard_sections(),
            theme: ThemeSpec::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_has_one_descriptor_per_standard_kind() {
        let doc = ResumeDocument::template();
        for kind in [
            SectionKind::Summary,
            SectionKind::Experience,
            SectionKind::Projects,
            SectionKind::Education,
            SectionKind::Skills,
        ] {
            let count = doc.sections.iter().filter(|s| s.kind == kind).count();
            assert_eq!(count, 1, "expected exactly one {kind:?} descriptor");
        }
        assert!(doc.sections.iter().all(|s| s.enabled));
    }

    #[test]
    fn test_template_item_ids_are_unique_and_nonempty() {
        let doc = ResumeDocument::template();
        let mut ids: Vec<&str> = doc
            .experience
            .iter()
            .map(|i| i.id.as_str())
            .chain(doc.education.iter().map(|i| i.id.as_str()))
            .chain(doc.projects.iter().map(|i| i.id.as_str()))
            .collect();
        assert!(ids.iter().all(|id| !id.is_empty()));
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), doc.experience.len() + doc.education.len() + doc.projects.len());
    }

    #[test]
    fn test_section_kind_serializes_lowercase() {
        let json = serde_json::to_string(&SectionKind::Custom).unwrap();
        assert_eq!(json, r#""custom""#);
        let kind: SectionKind = serde_json::from_str(r#""experience""#).unwrap();
        assert_eq!(kind, SectionKind::Experience);
    }

    #[test]
    fn test_descriptor_uses_type_as_wire_name() {
        let descriptor = &standard_sections()[0];
        let json = serde_json::to_value(descriptor).unwrap();
        assert_eq!(json["type"], "summary");
        assert_eq!(json["id"], "summary");
    }

    #[test]
    fn test_document_deserializes_with_missing_sections_and_theme() {
        // AI fragments and hand-written payloads may omit both; defaults
        // must kick in rather than failing deserialization.
        let doc: ResumeDocument = serde_json::from_str(r#"{"name": "Sam"}"#).unwrap();
        assert_eq!(doc.sections.len(), 5);
        assert_eq!(doc.theme, ThemeSpec::default());
        assert!(doc.experience.is_empty());
    }

    #[test]
    fn test_item_without_id_deserializes_to_empty_id() {
        let item: ExperienceItem =
            serde_json::from_str(r#"{"title": "Engineer", "company": "Acme"}"#).unwrap();
        assert!(item.id.is_empty());
    }
}
