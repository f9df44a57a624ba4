//! Preview renderer — a pure projection of the document into the tree a
//! client paints. Holds no state of its own: every edit made against the
//! preview travels back through the update protocol.
//!
//! Skip rules: disabled descriptors render nothing; standard sections with
//! no backing data render nothing (absent summary, empty item lists, empty
//! skills); custom sections render whenever enabled.

use serde::Serialize;

use crate::document::model::{
    EducationItem, ExperienceItem, ProjectItem, ResumeDocument, SectionDescriptor, SectionKind,
};
use crate::document::theme::ThemeSpec;

#[derive(Debug, Clone, Serialize)]
pub struct Preview {
    pub header: PreviewHeader,
    pub sections: Vec<RenderedSection>,
    pub theme: ThemeSpec,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreviewHeader {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedSection {
    pub id: String,
    pub title: String,
    pub body: SectionBody,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SectionBody {
    Summary { text: String },
    Experience { items: Vec<ExperienceItem> },
    Projects { items: Vec<ProjectItem> },
    Education { items: Vec<EducationItem> },
    Skills { skills: Vec<String> },
    Custom { content: String },
}

/// Projects the document into its render tree, in section order.
pub fn render(doc: &ResumeDocument) -> Preview {
    let sections = doc
        .sections
        .iter()
        .filter(|s| s.enabled)
        .filter_map(|s| {
            body_for(doc, s).map(|body| RenderedSection {
                id: s.id.clone(),
                title: s.title.clone(),
                body,
            })
        })
        .collect();

    Preview {
        header: PreviewHeader {
            name: doc.name.clone(),
            email: doc.email.clone(),
            phone: doc.phone.clone(),
        },
        sections,
        theme: doc.theme.clone(),
    }
}

fn body_for(doc: &ResumeDocument, section: &SectionDescriptor) -> Option<SectionBody> {
    match section.kind {
        SectionKind::Summary => doc
            .summary
            .as_ref()
            .map(|text| SectionBody::Summary { text: text.clone() }),
        SectionKind::Experience => (!doc.experience.is_empty()).then(|| SectionBody::Experience {
            items: doc.experience.clone(),
        }),
        SectionKind::Projects => (!doc.projects.is_empty()).then(|| SectionBody::Projects {
            items: doc.projects.clone(),
        }),
        SectionKind::Education => (!doc.education.is_empty()).then(|| SectionBody::Education {
            items: doc.education.clone(),
        }),
        SectionKind::Skills => (!doc.skills.is_empty()).then(|| SectionBody::Skills {
            skills: doc.skills.clone(),
        }),
        SectionKind::Custom => Some(SectionBody::Custom {
            content: section.content.clone().unwrap_or_default(),
        }),
    }
}
