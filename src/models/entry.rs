use super::day_type::DayType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectLine {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hours: f64,
}

impl ProjectLine {
    pub fn new(id: String, description: &str, hours: f64) -> Self {
        Self {
            id,
            description: description.to_string(),
            hours,
        }
    }
}

/// One day of a period. Owns its project lines exclusively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayEntry {
    pub date: NaiveDate,
    pub day_type: DayType,
    #[serde(default)]
    pub project_lines: Vec<ProjectLine>,
    #[serde(default)]
    pub absence_code: String,
    #[serde(default)]
    pub notes: String,
}

impl DayEntry {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Sum of project hours, ignoring non-finite values.
    pub fn worked_hours(&self) -> f64 {
        self.project_lines
            .iter()
            .filter(|l| l.hours.is_finite())
            .map(|l| l.hours)
            .sum()
    }

    pub fn has_absence(&self) -> bool {
        !self.absence_code.trim().is_empty()
    }

    /// A day counts as an export line when it carries hours or an absence.
    pub fn is_reportable(&self) -> bool {
        self.worked_hours() > 0.0 || self.has_absence()
    }

    /// Next free line id for this day: `PL-YYYYMMDD-NNN`.
    pub fn next_line_id(&self) -> String {
        let prefix = format!("PL-{}-", self.date.format("%Y%m%d"));
        let max = self
            .project_lines
            .iter()
            .filter_map(|l| l.id.strip_prefix(&prefix))
            .filter_map(|n| n.parse::<u32>().ok())
            .max()
            .unwrap_or(0);

        format!("{prefix}{:03}", max + 1)
    }

    pub fn line_mut(&mut self, line_id: &str) -> Option<&mut ProjectLine> {
        self.project_lines.iter_mut().find(|l| l.id == line_id)
    }
}

/// Partial update of a day entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayPatch {
    pub absence_code: Option<String>,
    pub notes: Option<String>,
}

/// Partial update of a project line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinePatch {
    pub description: Option<String>,
    pub hours: Option<f64>,
}
