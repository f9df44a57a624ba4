//! Reconciliation — overlays a content-only AI fragment onto the current
//! document. AI responses never carry section or theme metadata, so the
//! section list is re-derived here: prior descriptors (user-customized
//! titles, enabled flags, order, and custom sections) are kept, and any
//! standard kind the prior list lost is appended from the fixed template.

use std::collections::HashSet;

use crate::document::model::{new_item_id, standard_sections, ResumeDocument, SectionDescriptor};
use crate::flows::types::ResumeFragment;

/// Merges a fragment into the document. Only fields the fragment carries are
/// replaced; every returned item missing an id gets a fresh one; sections
/// are reconciled afterwards. The theme is never touched (fragments cannot
/// carry one).
pub fn merge_fragment(doc: &mut ResumeDocument, fragment: ResumeFragment) {
    let ResumeFragment {
        name,
        email,
        phone,
        summary,
        experience,
        education,
        projects,
        skills,
    } = fragment;

    if let Some(v) = name {
        doc.name = Some(v);
    }
    if let Some(v) = email {
        doc.email = Some(v);
    }
    if let Some(v) = phone {
        doc.phone = Some(v);
    }
    if let Some(v) = summary {
        doc.summary = Some(v);
    }
    if let Some(mut items) = experience {
        assign_missing_ids(&mut items, |i| &mut i.id);
        doc.experience = items;
    }
    if let Some(mut items) = education {
        assign_missing_ids(&mut items, |i| &mut i.id);
        doc.education = items;
    }
    if let Some(mut items) = projects {
        assign_missing_ids(&mut items, |i| &mut i.id);
        doc.projects = items;
    }
    if let Some(v) = skills {
        doc.skills = v;
    }

    doc.sections = reconcile_sections(&doc.sections);
}

/// Re-derives the section list after a merge: prior descriptors survive
/// as-is (order included), duplicates collapse to the first occurrence, and
/// standard kinds absent from the prior list are appended in template order.
pub fn reconcile_sections(prev: &[SectionDescriptor]) -> Vec<SectionDescriptor> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out: Vec<SectionDescriptor> = prev
        .iter()
        .filter(|s| seen.insert(s.id.as_str()))
        .cloned()
        .collect();

    for template in standard_sections() {
        if !out.iter().any(|s| s.id == template.id) {
            out.push(template);
        }
    }
    out
}

fn assign_missing_ids<T>(items: &mut [T], id_mut: impl Fn(&mut T) -> &mut String) {
    for item in items {
        let id = id_mut(item);
        if id.is_empty() {
            *id = new_item_id();
        }
    }
}
