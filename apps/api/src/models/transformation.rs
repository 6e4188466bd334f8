use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One successful rewrite. Append-only; never updated after insert.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TransformationRecord {
    pub id: Uuid,
    pub account_id: Uuid,
    pub original_text: String,
    pub transformed_text: String,
    pub job_description: String,
    pub score: f64,
    pub created_at: DateTime<Utc>,
}

impl TransformationRecord {
    /// First `max_chars` characters of the rewritten text, on one line.
    pub fn preview(&self, max_chars: usize) -> String {
        let flat: String = self
            .transformed_text
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if flat.chars().count() <= max_chars {
            return flat;
        }
        let mut cut: String = flat.chars().take(max_chars).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str) -> TransformationRecord {
        TransformationRecord {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            original_text: String::new(),
            transformed_text: text.to_string(),
            job_description: String::new(),
            score: 50.0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_preview_flattens_lines() {
        assert_eq!(record("Jane Doe\n\nEngineer").preview(100), "Jane Doe Engineer");
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let preview = record("Zoë Ångström résumé").preview(5);
        assert_eq!(preview, "Zoë Å…");
    }
}
