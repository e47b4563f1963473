// ABOUTME: Display categories for Jira statuses and priorities
// ABOUTME: Maps free-form workflow names onto a handful of colour buckets

use owo_colors::OwoColorize;

/// Coarse bucket for a workflow status name. Jira workflows are user-defined,
/// so this is keyword-based rather than an exhaustive list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    Done,
    InProgress,
    ToDo,
    Other,
}

impl From<&str> for StatusCategory {
    fn from(name: &str) -> Self {
        let lowered = name.to_lowercase();
        let has = |needle: &str| lowered.contains(needle);

        if has("done") || has("closed") || has("resolved") {
            StatusCategory::Done
        } else if has("progress") || has("review") {
            StatusCategory::InProgress
        } else if has("to do") || has("open") || has("backlog") {
            StatusCategory::ToDo
        } else {
            StatusCategory::Other
        }
    }
}

impl StatusCategory {
    pub fn paint(self, text: &str) -> String {
        match self {
            StatusCategory::Done => text.green().to_string(),
            StatusCategory::InProgress => text.yellow().to_string(),
            StatusCategory::ToDo => text.blue().to_string(),
            StatusCategory::Other => text.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityLevel {
    Critical,
    High,
    Medium,
    Low,
    Other,
}

impl From<&str> for PriorityLevel {
    fn from(name: &str) -> Self {
        let lowered = name.to_lowercase();

        if lowered.contains("highest") || lowered.contains("critical") {
            PriorityLevel::Critical
        } else if lowered.contains("high") {
            PriorityLevel::High
        } else if lowered.contains("medium") {
            PriorityLevel::Medium
        } else if lowered.contains("low") {
            PriorityLevel::Low
        } else {
            PriorityLevel::Other
        }
    }
}

impl PriorityLevel {
    pub fn paint(self, text: &str) -> String {
        match self {
            PriorityLevel::Critical => text.red().bold().to_string(),
            PriorityLevel::High => text.red().to_string(),
            PriorityLevel::Medium => text.yellow().to_string(),
            PriorityLevel::Low => text.green().to_string(),
            PriorityLevel::Other => text.to_string(),
        }
    }
}
