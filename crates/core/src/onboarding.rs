//! Onboarding import planning.
//!
//! During onboarding a user submits, per passion, a batch of rough
//! project ideas with free-text "next steps". The plan step filters that
//! batch into concrete projects to create: blank titles and blank steps
//! are skipped rather than failing the whole batch. This partial-success
//! policy is deliberate and covered by tests.

/// Raw per-project input from the onboarding form.
#[derive(Debug, Clone)]
pub struct ProjectSeed {
    pub title: String,
    pub description: String,
    pub next_steps: Vec<String>,
}

/// A project the import will actually create: an initial "Next Steps"
/// milestone holding one task per step, plus an optional note entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedProject {
    pub title: String,
    pub description: Option<String>,
    pub steps: Vec<String>,
    pub note: Option<String>,
}

/// Filter a passion's project seeds into the projects to create.
///
/// Skips seeds with a blank title, drops blank steps, and skips seeds
/// left with no steps at all. `specific_area` / `current_level` become a
/// shared note attached to every planned project of this passion.
pub fn plan_projects(
    seeds: &[ProjectSeed],
    specific_area: Option<&str>,
    current_level: Option<&str>,
) -> Vec<PlannedProject> {
    let note = build_note(specific_area, current_level);

    seeds
        .iter()
        .filter_map(|seed| {
            let title = seed.title.trim();
            if title.is_empty() {
                return None;
            }
            let steps: Vec<String> = seed
                .next_steps
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            if steps.is_empty() {
                return None;
            }
            let description = seed.description.trim();
            Some(PlannedProject {
                title: title.to_string(),
                description: (!description.is_empty()).then(|| description.to_string()),
                steps,
                note: note.clone(),
            })
        })
        .collect()
}

fn build_note(specific_area: Option<&str>, current_level: Option<&str>) -> Option<String> {
    let mut lines = Vec::new();
    if let Some(area) = specific_area.map(str::trim).filter(|s| !s.is_empty()) {
        lines.push(format!("Specific focus: {area}"));
    }
    if let Some(level) = current_level.map(str::trim).filter(|s| !s.is_empty()) {
        lines.push(format!("Current level: {}", capitalize(level)));
    }
    (!lines.is_empty()).then(|| lines.join("\n"))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(title: &str, steps: &[&str]) -> ProjectSeed {
        ProjectSeed {
            title: title.to_string(),
            description: String::new(),
            next_steps: steps.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn blank_title_is_skipped_not_fatal() {
        let planned = plan_projects(
            &[seed("  ", &["step"]), seed("Birdhouse", &["cut wood"])],
            None,
            None,
        );
        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].title, "Birdhouse");
    }

    #[test]
    fn blank_steps_are_dropped() {
        let planned = plan_projects(&[seed("Quilt", &["", "  ", "buy fabric"])], None, None);
        assert_eq!(planned[0].steps, vec!["buy fabric".to_string()]);
    }

    #[test]
    fn project_with_no_usable_steps_is_skipped() {
        let planned = plan_projects(&[seed("Quilt", &["", "  "])], None, None);
        assert!(planned.is_empty());
    }

    #[test]
    fn note_combines_area_and_level() {
        let planned = plan_projects(
            &[seed("Quilt", &["buy fabric"])],
            Some("hand stitching"),
            Some("beginner"),
        );
        assert_eq!(
            planned[0].note.as_deref(),
            Some("Specific focus: hand stitching\nCurrent level: Beginner")
        );
    }

    #[test]
    fn no_note_when_both_fields_blank() {
        let planned = plan_projects(&[seed("Quilt", &["buy fabric"])], Some("  "), None);
        assert_eq!(planned[0].note, None);
    }
}
