use chrono::NaiveDate;

use crate::ExerciseEntry;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientContext {
    pub name: String,
    pub goals: Vec<String>,
    pub experience_level: Option<String>,
    pub limitations: Vec<String>,
    pub equipment: Vec<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgramRequest {
    pub client: ClientContext,
    pub blocks: u32,
    pub days_per_week: u32,
    pub session_minutes: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub focus: Option<String>,
}

impl Default for ProgramRequest {
    fn default() -> Self {
        Self {
            client: ClientContext::default(),
            blocks: 1,
            days_per_week: 3,
            session_minutes: None,
            start_date: None,
            focus: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

const SYSTEM_PROMPT: &str = "You are an experienced strength and conditioning coach. \
You design periodized training programs using only exercises from the provided library.";

const OUTPUT_FORMAT: &str = r#"OUTPUT FORMAT:
Return ONLY a JSON object with this exact structure:
{
  "blocks": [
    {
      "name": "Block name",
      "durationWeeks": 4,
      "days": [
        {
          "name": "Day name",
          "isRestDay": false,
          "exercises": [
            {
              "exerciseId": "id from the library",
              "exerciseName": "name from the library",
              "sets": 3,
              "reps": "8-10",
              "restSeconds": 90,
              "tempo": null,
              "notes": null
            }
          ]
        }
      ]
    }
  ]
}"#;

/// Render the generation prompt.
///
/// Every library entry is listed with its ID and name verbatim, so a well-behaved response can
/// echo valid IDs.
#[must_use]
pub fn assemble_prompt(request: &ProgramRequest, library: &[ExerciseEntry]) -> Prompt {
    let mut user = String::new();

    user.push_str("CLIENT:\n");
    user.push_str(&format_client(&request.client));

    user.push_str("\nCONSTRAINTS:\n");
    user.push_str(&format!("- Blocks: {}\n", request.blocks));
    user.push_str(&format!("- Training days per week: {}\n", request.days_per_week));
    if let Some(minutes) = request.session_minutes {
        user.push_str(&format!("- Session length: {minutes} minutes\n"));
    }
    if let Some(date) = request.start_date {
        user.push_str(&format!("- Start date: {date}\n"));
    }
    if let Some(focus) = &request.focus {
        user.push_str(&format!("- Focus: {focus}\n"));
    }

    user.push_str("\nEXERCISE LIBRARY:\n");
    user.push_str(&format_library(library));

    user.push_str("\nRULES:\n");
    user.push_str("1. Use ONLY exercises from the library above\n");
    user.push_str("2. Copy \"exerciseId\" and \"exerciseName\" exactly as listed\n");
    user.push_str("3. Mark rest days with \"isRestDay\": true and no exercises\n");
    user.push_str("4. For any field that has no meaningful value, use null\n");

    user.push('\n');
    user.push_str(OUTPUT_FORMAT);

    Prompt {
        system: SYSTEM_PROMPT.to_string(),
        user,
    }
}

fn format_client(client: &ClientContext) -> String {
    let mut output = String::new();
    output.push_str(&format!("- Name: {}\n", client.name));
    if let Some(level) = &client.experience_level {
        output.push_str(&format!("- Experience: {level}\n"));
    }
    if !client.goals.is_empty() {
        output.push_str(&format!("- Goals: {}\n", client.goals.join(", ")));
    }
    if !client.limitations.is_empty() {
        output.push_str(&format!("- Limitations: {}\n", client.limitations.join(", ")));
    }
    if !client.equipment.is_empty() {
        output.push_str(&format!("- Equipment: {}\n", client.equipment.join(", ")));
    }
    if let Some(notes) = &client.notes {
        output.push_str(&format!("- Notes: {notes}\n"));
    }
    output
}

fn format_library(library: &[ExerciseEntry]) -> String {
    if library.is_empty() {
        return "(no exercises available)\n".to_string();
    }

    library
        .iter()
        .map(|entry| {
            let mut details = vec![entry.category.clone()];
            if !entry.muscle_groups.is_empty() {
                details.push(
                    entry
                        .muscle_groups
                        .iter()
                        .map(String::as_str)
                        .collect::<Vec<_>>()
                        .join(", "),
                );
            }
            if let Some(equipment) = &entry.equipment_needed {
                details.push(equipment.clone());
            }
            if let Some(difficulty) = &entry.difficulty {
                details.push(difficulty.clone());
            }
            details.retain(|d| !d.is_empty());

            if details.is_empty() {
                format!("- {}: {}\n", entry.id, entry.name)
            } else {
                format!("- {}: {} ({})\n", entry.id, entry.name, details.join("; "))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;

    use crate::Name;

    use super::*;

    fn library() -> Vec<ExerciseEntry> {
        vec![
            ExerciseEntry {
                id: "e1".into(),
                name: Name::new("Bench Press").unwrap(),
                category: "strength".to_string(),
                muscle_groups: BTreeSet::from(["triceps".to_string(), "chest".to_string()]),
                equipment_needed: Some("barbell".to_string()),
                difficulty: Some("intermediate".to_string()),
            },
            ExerciseEntry {
                id: "e2".into(),
                name: Name::new("Rowing Intervals").unwrap(),
                category: String::new(),
                muscle_groups: BTreeSet::new(),
                equipment_needed: None,
                difficulty: None,
            },
        ]
    }

    #[test]
    fn test_format_library() {
        assert_eq!(
            format_library(&library()),
            "- e1: Bench Press (strength; chest, triceps; barbell; intermediate)\n\
             - e2: Rowing Intervals\n"
        );
        assert_eq!(format_library(&[]), "(no exercises available)\n");
    }

    #[test]
    fn test_format_client() {
        assert_eq!(
            format_client(&ClientContext {
                name: "Alice".to_string(),
                goals: vec!["strength".to_string(), "fat loss".to_string()],
                experience_level: Some("beginner".to_string()),
                limitations: vec!["left knee".to_string()],
                equipment: vec![],
                notes: None,
            }),
            "- Name: Alice\n\
             - Experience: beginner\n\
             - Goals: strength, fat loss\n\
             - Limitations: left knee\n"
        );
    }

    #[test]
    fn test_assemble_prompt() {
        let prompt = assemble_prompt(
            &ProgramRequest {
                client: ClientContext {
                    name: "Bob".to_string(),
                    ..ClientContext::default()
                },
                blocks: 2,
                days_per_week: 4,
                session_minutes: Some(60),
                start_date: NaiveDate::from_ymd_opt(2026, 1, 5),
                focus: Some("hypertrophy".to_string()),
            },
            &library(),
        );

        assert_eq!(prompt.system, SYSTEM_PROMPT);
        assert!(prompt.user.starts_with("CLIENT:\n- Name: Bob\n"));
        assert!(prompt.user.contains("- Blocks: 2\n"));
        assert!(prompt.user.contains("- Training days per week: 4\n"));
        assert!(prompt.user.contains("- Session length: 60 minutes\n"));
        assert!(prompt.user.contains("- Start date: 2026-01-05\n"));
        assert!(prompt.user.contains("- Focus: hypertrophy\n"));
        assert!(prompt.user.contains("- e1: Bench Press ("));
        assert!(prompt.user.contains("- e2: Rowing Intervals\n"));
        assert!(prompt.user.ends_with(OUTPUT_FORMAT));
    }

    #[test]
    fn test_assemble_prompt_defaults() {
        let prompt = assemble_prompt(&ProgramRequest::default(), &[]);

        assert!(prompt.user.contains("- Blocks: 1\n"));
        assert!(prompt.user.contains("- Training days per week: 3\n"));
        assert!(!prompt.user.contains("Session length"));
        assert!(!prompt.user.contains("Start date"));
        assert!(prompt.user.contains("(no exercises available)\n"));
    }
}
