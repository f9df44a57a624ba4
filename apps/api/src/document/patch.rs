//! Document update protocol — the single mutation surface for the resume
//! document. Every UI edit and every AI response lands here.
//!
//! Patches are a tagged union, one variant per top-level field group.
//! Applying a variant is shallow replacement of that group; omitted groups
//! are untouched, and collections named in a patch replace the prior
//! collection wholesale (no element-wise merge at this layer). Unknown
//! fields fail serde deserialization instead of being silently accepted.
//!
//! Stale-reference guards are deliberate: updating or moving a missing item
//! id is a silent no-op, never an error.

use serde::{Deserialize, Serialize};

use crate::document::model::{
    new_item_id, EducationItem, ExperienceItem, ProjectItem, ResumeDocument, SectionDescriptor,
    SectionKind,
};
use crate::document::theme::ThemeSpec;
use crate::errors::AppError;

/// One top-level field group to replace. Wire form is externally tagged:
/// `{"skills": ["Rust"]}`, `{"theme": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchField {
    Name(Option<String>),
    Email(Option<String>),
    Phone(Option<String>),
    Summary(Option<String>),
    Experience(Vec<ExperienceItem>),
    Education(Vec<EducationItem>),
    Projects(Vec<ProjectItem>),
    Skills(Vec<String>),
    Sections(Vec<SectionDescriptor>),
    Theme(ThemeSpec),
}

/// Collections addressable by per-item field updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCollection {
    Experience,
    Education,
    Projects,
}

/// Collections addressable by id-pair reordering. Skills are plain strings
/// without identifiers, so they reorder via a whole-collection patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReorderCollection {
    Experience,
    Education,
    Projects,
    Sections,
}

/// A single editable field on a collection item. Which fields apply depends
/// on the collection; a mismatch is a validation error, not a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemField {
    Title,
    Company,
    Dates,
    Description,
    Institution,
    Degree,
    Name,
    Url,
}

impl ItemField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemField::Title => "title",
            ItemField::Company => "company",
            ItemField::Dates => "dates",
            ItemField::Description => "description",
            ItemField::Institution => "institution",
            ItemField::Degree => "degree",
            ItemField::Name => "name",
            ItemField::Url => "url",
        }
    }
}

impl ResumeDocument {
    /// Applies a sequence of patch fields by shallow replacement.
    pub fn apply_patch(&mut self, fields: Vec<PatchField>) {
        for field in fields {
            self.apply_field(field);
        }
    }

    fn apply_field(&mut self, field: PatchField) {
        match field {
            PatchField::Name(v) => self.name = v,
            PatchField::Email(v) => self.email = v,
            PatchField::Phone(v) => self.phone = v,
            PatchField::Summary(v) => self.summary = v,
            PatchField::Experience(v) => self.experience = v,
            PatchField::Education(v) => self.education = v,
            PatchField::Projects(v) => self.projects = v,
            PatchField::Skills(v) => self.skills = v,
            PatchField::Sections(v) => self.sections = v,
            PatchField::Theme(v) => self.theme = v,
        }
    }

    /// Replaces one field on the item with the given id. A missing id is a
    /// stale UI reference and a silent no-op; a field that does not belong
    /// to the collection is rejected.
    pub fn update_item(
        &mut self,
        collection: ItemCollection,
        item_id: &str,
        field: ItemField,
        value: String,
    ) -> Result<(), AppError> {
        match collection {
            ItemCollection::Experience => {
                let Some(item) = self.experience.iter_mut().find(|i| i.id == item_id) else {
                    tracing::debug!(item_id, "experience item not found; ignoring update");
                    return Ok(());
                };
                match field {
                    ItemField::Title => item.title = Some(value),
                    ItemField::Company => item.company = Some(value),
                    ItemField::Dates => item.dates = Some(value),
                    ItemField::Description => item.description = Some(value),
                    other => return Err(field_mismatch("experience", other)),
                }
            }
            ItemCollection::Education => {
                let Some(item) = self.education.iter_mut().find(|i| i.id == item_id) else {
                    tracing::debug!(item_id, "education item not found; ignoring update");
                    return Ok(());
                };
                match field {
                    ItemField::Institution => item.institution = Some(value),
                    ItemField::Degree => item.degree = Some(value),
                    ItemField::Dates => item.dates = Some(value),
                    other => return Err(field_mismatch("education", other)),
                }
            }
            ItemCollection::Projects => {
                let Some(item) = self.projects.iter_mut().find(|i| i.id == item_id) else {
                    tracing::debug!(item_id, "project item not found; ignoring update");
                    return Ok(());
                };
                match field {
                    ItemField::Name => item.name = Some(value),
                    ItemField::Description => item.description = Some(value),
                    ItemField::Dates => item.dates = Some(value),
                    ItemField::Url => item.url = Some(value),
                    other => return Err(field_mismatch("projects", other)),
                }
            }
        }
        Ok(())
    }

    /// Moves the item with `moving_id` to the position currently held by
    /// `target_id` (classic array-move: remove, then reinsert; all other
    /// elements keep their relative order). No-op if either id is missing
    /// or the ids are equal.
    pub fn move_item(&mut self, collection: ReorderCollection, moving_id: &str, target_id: &str) {
        match collection {
            ReorderCollection::Experience => {
                move_by_id(&mut self.experience, |i| &i.id, moving_id, target_id)
            }
            ReorderCollection::Education => {
                move_by_id(&mut self.education, |i| &i.id, moving_id, target_id)
            }
            ReorderCollection::Projects => {
                move_by_id(&mut self.projects, |i| &i.id, moving_id, target_id)
            }
            ReorderCollection::Sections => {
                move_by_id(&mut self.sections, |s| &s.id, moving_id, target_id)
            }
        }
    }

    /// Sets `enabled` on one section. Does not reorder and never deletes
    /// content: a disabled standard section keeps its backing data.
    pub fn set_section_enabled(&mut self, section_id: &str, enabled: bool) {
        if let Some(section) = self.sections.iter_mut().find(|s| s.id == section_id) {
            section.enabled = enabled;
        }
    }

    pub fn set_section_title(&mut self, section_id: &str, title: String) {
        if let Some(section) = self.sections.iter_mut().find(|s| s.id == section_id) {
            section.title = title;
        }
    }

    pub fn set_section_content(&mut self, section_id: &str, content: String) {
        if let Some(section) = self.sections.iter_mut().find(|s| s.id == section_id) {
            section.content = Some(content);
        }
    }

    /// Appends a new custom section with a fresh id and placeholder content.
    /// Returns the new section's id.
    pub fn add_custom_section(&mut self) -> String {
        let id = new_item_id();
        self.sections.push(SectionDescriptor {
            id: id.clone(),
            kind: SectionKind::Custom,
            title: "New Section".to_string(),
            enabled: true,
            content: Some("This is a new custom section. Click to edit!".to_string()),
        });
        id
    }

    /// Removes a custom section entirely. Data loss is intentional and
    /// irreversible within the session. Standard sections cannot be removed
    /// (disable them instead); a missing id is a stale reference and a
    /// silent no-op.
    pub fn remove_section(&mut self, section_id: &str) -> Result<(), AppError> {
        let Some(section) = self.sections.iter().find(|s| s.id == section_id) else {
            tracing::debug!(section_id, "section not found; ignoring removal");
            return Ok(());
        };
        if section.kind != SectionKind::Custom {
            return Err(AppError::Validation(format!(
                "only custom sections can be removed; disable the '{}' section instead",
                section.title
            )));
        }
        self.sections.retain(|s| s.id != section_id);
        Ok(())
    }
}

fn field_mismatch(collection: &str, field: ItemField) -> AppError {
    AppError::Validation(format!(
        "field '{}' does not apply to {collection} items",
        field.as_str()
    ))
}

fn move_by_id<T>(items: &mut Vec<T>, id_of: impl Fn(&T) -> &str, moving_id: &str, target_id: &str) {
    if moving_id == target_id {
        return;
    }
    let Some(from) = items.iter().position(|i| id_of(i) == moving_id) else {
        return;
    };
    let Some(to) = items.iter().position(|i| id_of(i) == target_id) else {
        return;
    };
    let item = items.remove(from);
    items.insert(to, item);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exp(id: &str, title: &str) -> ExperienceItem {
        ExperienceItem {
            id: id.to_string(),
            title: Some(title.to_string()),
            company: None,
            dates: None,
            description: None,
        }
    }

    fn doc_with_experience(ids: &[&str]) -> ResumeDocument {
        let mut doc = ResumeDocument::template();
        doc.experience = ids.iter().map(|id| exp(id, id)).collect();
        doc
    }

    fn experience_order(doc: &ResumeDocument) -> Vec<&str> {
        doc.experience.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_patch_replaces_only_named_groups() {
        let mut doc = ResumeDocument::template();
        let before_experience = doc.experience.clone();
        let before_sections = doc.sections.clone();
        let before_skills = doc.skills.clone();
        let before_education = doc.education.clone();

        let new_theme = ThemeSpec {
            heading_color: "hsl(10 20% 30%)".to_string(),
            ..ThemeSpec::default()
        };
        doc.apply_patch(vec![PatchField::Theme(new_theme.clone())]);

        assert_eq!(doc.theme, new_theme);
        assert_eq!(doc.experience, before_experience);
        assert_eq!(doc.sections, before_sections);
        assert_eq!(doc.skills, before_skills);
        assert_eq!(doc.education, before_education);
    }

    #[test]
    fn test_patch_collection_replacement_is_wholesale() {
        let mut doc = doc_with_experience(&["a", "b"]);
        doc.apply_patch(vec![PatchField::Experience(vec![exp("c", "C")])]);
        assert_eq!(experience_order(&doc), vec!["c"]);
    }

    #[test]
    fn test_patch_scalar_can_clear_field() {
        let mut doc = ResumeDocument::template();
        doc.apply_patch(vec![PatchField::Summary(None)]);
        assert_eq!(doc.summary, None);
    }

    #[test]
    fn test_patch_rejects_unknown_field_at_deserialization() {
        let err = serde_json::from_str::<Vec<PatchField>>(r#"[{"nickname": "Al"}]"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_patch_deserializes_known_fields() {
        let fields: Vec<PatchField> =
            serde_json::from_str(r#"[{"name": "Sam"}, {"skills": ["Rust", "Go"]}]"#).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], PatchField::Name(Some("Sam".to_string())));
    }

    #[test]
    fn test_update_item_missing_id_is_noop() {
        let mut doc = doc_with_experience(&["a", "b"]);
        let before = doc.experience.clone();
        doc.update_item(
            ItemCollection::Experience,
            "ghost",
            ItemField::Title,
            "CTO".to_string(),
        )
        .unwrap();
        assert_eq!(doc.experience, before);
    }

    #[test]
    fn test_update_item_replaces_single_field() {
        let mut doc = doc_with_experience(&["a", "b"]);
        doc.update_item(
            ItemCollection::Experience,
            "b",
            ItemField::Company,
            "Acme".to_string(),
        )
        .unwrap();
        assert_eq!(doc.experience[1].company.as_deref(), Some("Acme"));
        assert_eq!(doc.experience[0].company, None);
        assert_eq!(doc.experience[1].title.as_deref(), Some("b"));
    }

    #[test]
    fn test_update_item_mismatched_field_is_rejected() {
        let mut doc = doc_with_experience(&["a"]);
        let err = doc
            .update_item(
                ItemCollection::Experience,
                "a",
                ItemField::Degree,
                "PhD".to_string(),
            )
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_move_item_to_earlier_position() {
        let mut doc = doc_with_experience(&["a", "b", "c", "d"]);
        doc.move_item(ReorderCollection::Experience, "d", "b");
        assert_eq!(experience_order(&doc), vec!["a", "d", "b", "c"]);
    }

    #[test]
    fn test_move_item_to_later_position() {
        let mut doc = doc_with_experience(&["a", "b", "c", "d"]);
        doc.move_item(ReorderCollection::Experience, "a", "c");
        assert_eq!(experience_order(&doc), vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn test_move_item_onto_itself_is_noop() {
        let mut doc = doc_with_experience(&["a", "b", "c"]);
        doc.move_item(ReorderCollection::Experience, "b", "b");
        assert_eq!(experience_order(&doc), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_move_item_missing_id_is_noop() {
        let mut doc = doc_with_experience(&["a", "b"]);
        doc.move_item(ReorderCollection::Experience, "ghost", "a");
        doc.move_item(ReorderCollection::Experience, "a", "ghost");
        assert_eq!(experience_order(&doc), vec!["a", "b"]);
    }

    #[test]
    fn test_move_sections_reorders_descriptors() {
        let mut doc = ResumeDocument::template();
        doc.move_item(ReorderCollection::Sections, "skills", "summary");
        assert_eq!(doc.sections[0].id, "skills");
        assert_eq!(doc.sections[1].id, "summary");
    }

    #[test]
    fn test_section_toggle_keeps_order_and_data() {
        let mut doc = ResumeDocument::template();
        let order_before: Vec<String> = doc.sections.iter().map(|s| s.id.clone()).collect();
        doc.set_section_enabled("experience", false);

        let order_after: Vec<String> = doc.sections.iter().map(|s| s.id.clone()).collect();
        assert_eq!(order_before, order_after);
        assert!(!doc.sections.iter().find(|s| s.id == "experience").unwrap().enabled);
        assert!(!doc.experience.is_empty(), "backing data must survive disable");
    }

    #[test]
    fn test_add_custom_section_appends_enabled_with_fresh_id() {
        let mut doc = ResumeDocument::template();
        let id = doc.add_custom_section();
        let section = doc.sections.last().unwrap();
        assert_eq!(section.id, id);
        assert_eq!(section.kind, SectionKind::Custom);
        assert!(section.enabled);
        assert!(section.content.is_some());
        assert!(doc.sections.iter().filter(|s| s.id == id).count() == 1);
    }

    #[test]
    fn test_remove_custom_section_deletes_descriptor() {
        let mut doc = ResumeDocument::template();
        let id = doc.add_custom_section();
        doc.remove_section(&id).unwrap();
        assert!(doc.sections.iter().all(|s| s.id != id));
    }

    #[test]
    fn test_remove_standard_section_is_rejected() {
        let mut doc = ResumeDocument::template();
        let err = doc.remove_section("experience").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(doc.sections.iter().any(|s| s.id == "experience"));
    }

    #[test]
    fn test_remove_missing_section_is_noop() {
        let mut doc = ResumeDocument::template();
        let before = doc.sections.clone();
        doc.remove_section("ghost").unwrap();
        assert_eq!(doc.sections, before);
    }
}
