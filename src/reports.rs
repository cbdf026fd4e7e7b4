//! Reporting Views
//!
//! The six reporting views and their row types. Each report kind declares
//! its column set up front instead of deriving it from response data, so an
//! empty result set still renders a stable header. Row fields are optional
//! and tolerate server omissions; missing values render as "-".

use serde::Deserialize;

use crate::model::format_timestamp;

/// The six mutually exclusive reporting tabs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportKind {
    DoubleBookedUsers,
    ViolatingEvents,
    ResourceUtilization,
    InvalidParentEvents,
    ExternalAttendees,
    UnderutilizedResources,
}

/// Slider bounds for the parameterized reports
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThresholdSpec {
    pub label: &'static str,
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl ThresholdSpec {
    pub fn clamp(&self, value: i64) -> u32 {
        value.clamp(self.min as i64, self.max as i64) as u32
    }
}

impl ReportKind {
    pub const ALL: [ReportKind; 6] = [
        ReportKind::DoubleBookedUsers,
        ReportKind::ViolatingEvents,
        ReportKind::ResourceUtilization,
        ReportKind::InvalidParentEvents,
        ReportKind::ExternalAttendees,
        ReportKind::UnderutilizedResources,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReportKind::DoubleBookedUsers => "Double-Booked Users",
            ReportKind::ViolatingEvents => "Violating Events",
            ReportKind::ResourceUtilization => "Resource Utilization",
            ReportKind::InvalidParentEvents => "Invalid Parent Events",
            ReportKind::ExternalAttendees => "External Attendees",
            ReportKind::UnderutilizedResources => "Underutilized Resources",
        }
    }

    /// Declared column set for this report
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            ReportKind::DoubleBookedUsers => &["Name", "Email", "Overlapping Events"],
            ReportKind::ViolatingEvents => &["Title", "Start", "End", "Violation"],
            ReportKind::ResourceUtilization => {
                &["Resource", "Type", "Allocations", "Usage Hours"]
            }
            ReportKind::InvalidParentEvents => &["Title", "Parent Event", "Reason"],
            ReportKind::ExternalAttendees => &["Title", "External Attendees", "Capacity"],
            ReportKind::UnderutilizedResources => &["Resource", "Type", "Usage Hours"],
        }
    }

    /// Slider parameter for the two threshold-driven reports
    pub fn threshold(self) -> Option<ThresholdSpec> {
        match self {
            ReportKind::ExternalAttendees => Some(ThresholdSpec {
                label: "Threshold",
                min: 1,
                max: 50,
                default: 10,
            }),
            ReportKind::UnderutilizedResources => Some(ThresholdSpec {
                label: "Minimum Usage Hours",
                min: 0,
                max: 100,
                default: 10,
            }),
            _ => None,
        }
    }
}

// ============================================
// Row types
// ============================================

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DoubleBookedUserRow {
    pub name: Option<String>,
    pub email: Option<String>,
    pub overlapping_events: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViolatingEventRow {
    pub title: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub violation: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceUtilizationRow {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub allocations: Option<u32>,
    pub usage_hours: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvalidParentEventRow {
    pub title: Option<String>,
    pub parent_event_id: Option<String>,
    pub reason: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExternalAttendeeRow {
    pub title: Option<String>,
    pub external_attendees: Option<u32>,
    pub capacity: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UnderutilizedResourceRow {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub usage_hours: Option<f64>,
}

/// A loaded report: one variant per kind
#[derive(Clone, Debug, PartialEq)]
pub enum Report {
    DoubleBookedUsers(Vec<DoubleBookedUserRow>),
    ViolatingEvents(Vec<ViolatingEventRow>),
    ResourceUtilization(Vec<ResourceUtilizationRow>),
    InvalidParentEvents(Vec<InvalidParentEventRow>),
    ExternalAttendees(Vec<ExternalAttendeeRow>),
    UnderutilizedResources(Vec<UnderutilizedResourceRow>),
}

impl Report {
    /// An empty report of the given kind
    pub fn empty(kind: ReportKind) -> Report {
        match kind {
            ReportKind::DoubleBookedUsers => Report::DoubleBookedUsers(Vec::new()),
            ReportKind::ViolatingEvents => Report::ViolatingEvents(Vec::new()),
            ReportKind::ResourceUtilization => Report::ResourceUtilization(Vec::new()),
            ReportKind::InvalidParentEvents => Report::InvalidParentEvents(Vec::new()),
            ReportKind::ExternalAttendees => Report::ExternalAttendees(Vec::new()),
            ReportKind::UnderutilizedResources => Report::UnderutilizedResources(Vec::new()),
        }
    }

    pub fn kind(&self) -> ReportKind {
        match self {
            Report::DoubleBookedUsers(_) => ReportKind::DoubleBookedUsers,
            Report::ViolatingEvents(_) => ReportKind::ViolatingEvents,
            Report::ResourceUtilization(_) => ReportKind::ResourceUtilization,
            Report::InvalidParentEvents(_) => ReportKind::InvalidParentEvents,
            Report::ExternalAttendees(_) => ReportKind::ExternalAttendees,
            Report::UnderutilizedResources(_) => ReportKind::UnderutilizedResources,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        match self {
            Report::DoubleBookedUsers(rows) => rows.len(),
            Report::ViolatingEvents(rows) => rows.len(),
            Report::ResourceUtilization(rows) => rows.len(),
            Report::InvalidParentEvents(rows) => rows.len(),
            Report::ExternalAttendees(rows) => rows.len(),
            Report::UnderutilizedResources(rows) => rows.len(),
        }
    }

    /// Rows rendered as display cells, one string per declared column
    pub fn cells(&self) -> Vec<Vec<String>> {
        match self {
            Report::DoubleBookedUsers(rows) => rows
                .iter()
                .map(|row| {
                    vec![
                        text_cell(&row.name),
                        text_cell(&row.email),
                        count_cell(&row.overlapping_events),
                    ]
                })
                .collect(),
            Report::ViolatingEvents(rows) => rows
                .iter()
                .map(|row| {
                    vec![
                        text_cell(&row.title),
                        time_cell(&row.start_time),
                        time_cell(&row.end_time),
                        text_cell(&row.violation),
                    ]
                })
                .collect(),
            Report::ResourceUtilization(rows) => rows
                .iter()
                .map(|row| {
                    vec![
                        text_cell(&row.name),
                        text_cell(&row.kind),
                        count_cell(&row.allocations),
                        hours_cell(&row.usage_hours),
                    ]
                })
                .collect(),
            Report::InvalidParentEvents(rows) => rows
                .iter()
                .map(|row| {
                    vec![
                        text_cell(&row.title),
                        text_cell(&row.parent_event_id),
                        text_cell(&row.reason),
                    ]
                })
                .collect(),
            Report::ExternalAttendees(rows) => rows
                .iter()
                .map(|row| {
                    vec![
                        text_cell(&row.title),
                        count_cell(&row.external_attendees),
                        count_cell(&row.capacity),
                    ]
                })
                .collect(),
            Report::UnderutilizedResources(rows) => rows
                .iter()
                .map(|row| {
                    vec![
                        text_cell(&row.name),
                        text_cell(&row.kind),
                        hours_cell(&row.usage_hours),
                    ]
                })
                .collect(),
        }
    }
}

fn text_cell(value: &Option<String>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.clone(),
        _ => "-".to_string(),
    }
}

fn count_cell(value: &Option<u32>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn hours_cell(value: &Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}", v))
        .unwrap_or_else(|| "-".to_string())
}

fn time_cell(value: &Option<String>) -> String {
    value
        .as_deref()
        .map(format_timestamp)
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_match_declared_columns() {
        let reports = [
            Report::DoubleBookedUsers(vec![DoubleBookedUserRow::default()]),
            Report::ViolatingEvents(vec![ViolatingEventRow::default()]),
            Report::ResourceUtilization(vec![ResourceUtilizationRow::default()]),
            Report::InvalidParentEvents(vec![InvalidParentEventRow::default()]),
            Report::ExternalAttendees(vec![ExternalAttendeeRow::default()]),
            Report::UnderutilizedResources(vec![UnderutilizedResourceRow::default()]),
        ];

        for report in reports {
            let columns = report.kind().columns();
            for row in report.cells() {
                assert_eq!(row.len(), columns.len(), "{:?}", report.kind());
            }
        }
    }

    #[test]
    fn test_empty_report_keeps_kind_and_columns() {
        for kind in ReportKind::ALL {
            let report = Report::empty(kind);
            assert_eq!(report.kind(), kind);
            assert!(report.is_empty());
            assert!(!kind.columns().is_empty());
        }
    }

    #[test]
    fn test_missing_values_render_placeholder() {
        let report = Report::ResourceUtilization(vec![ResourceUtilizationRow {
            name: Some("Projector".to_string()),
            kind: None,
            allocations: None,
            usage_hours: None,
        }]);

        let cells = report.cells();
        assert_eq!(cells[0], vec!["Projector", "-", "-", "-"]);
    }

    #[test]
    fn test_hours_render_one_decimal() {
        let report = Report::UnderutilizedResources(vec![UnderutilizedResourceRow {
            name: Some("Room A".to_string()),
            kind: Some("exclusive".to_string()),
            usage_hours: Some(2.25),
        }]);

        assert_eq!(report.cells()[0][2], "2.2");
    }

    #[test]
    fn test_only_two_reports_are_parameterized() {
        let parameterized: Vec<_> = ReportKind::ALL
            .iter()
            .filter(|kind| kind.threshold().is_some())
            .collect();
        assert_eq!(parameterized.len(), 2);
    }

    #[test]
    fn test_threshold_clamp() {
        let spec = ReportKind::ExternalAttendees.threshold().unwrap();
        assert_eq!(spec.clamp(0), 1);
        assert_eq!(spec.clamp(10), 10);
        assert_eq!(spec.clamp(500), 50);

        let spec = ReportKind::UnderutilizedResources.threshold().unwrap();
        assert_eq!(spec.clamp(-5), 0);
        assert_eq!(spec.clamp(100), 100);
    }

    #[test]
    fn test_row_deserialization_tolerates_omissions() {
        let row: DoubleBookedUserRow =
            serde_json::from_str(r#"{"name": "Ada", "overlappingEvents": 3}"#).unwrap();
        assert_eq!(row.name.as_deref(), Some("Ada"));
        assert_eq!(row.email, None);
        assert_eq!(row.overlapping_events, Some(3));
    }
}
