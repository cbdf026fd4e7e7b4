//! Domain Records
//!
//! Server-defined entities (passed through unchanged) and the form state
//! types that build request payloads from raw input values.

use chrono::{Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel value for the "global" organization choice in selects.
pub const GLOBAL_ORG: &str = "global";

/// An organization that scopes users, events and resources
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
}

/// A registered user belonging to an organization
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub organization_id: Option<String>,
}

/// A bookable event
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// RFC 3339 timestamp
    pub start_time: String,
    /// RFC 3339 timestamp
    pub end_time: String,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub parent_event_id: Option<String>,
}

/// Resource scheduling semantics, decided server-side
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Exclusive,
    Shareable,
    Consumable,
}

impl ResourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Exclusive => "exclusive",
            ResourceType::Shareable => "shareable",
            ResourceType::Consumable => "consumable",
        }
    }

    pub fn from_value(value: &str) -> ResourceType {
        match value {
            "shareable" => ResourceType::Shareable,
            "consumable" => ResourceType::Consumable,
            _ => ResourceType::Exclusive,
        }
    }
}

/// A bookable resource, optionally scoped to an organization
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: ResourceType,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub organization: Option<Organization>,
    #[serde(default)]
    pub max_concurrent: Option<u32>,
    #[serde(default)]
    pub total_quantity: Option<u32>,
}

impl Resource {
    /// Organization name for display; resources without one are global.
    pub fn organization_label(&self) -> String {
        self.organization
            .as_ref()
            .map(|org| org.name.clone())
            .unwrap_or_else(|| "Global".to_string())
    }
}

/// An attendance record linking an event to a user or an external attendee
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: String,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub event: Option<Event>,
}

impl Attendance {
    pub fn is_external(&self) -> bool {
        self.user_id.is_none()
    }

    pub fn display_name(&self) -> String {
        self.user
            .as_ref()
            .map(|u| u.name.clone())
            .or_else(|| self.name.clone())
            .unwrap_or_else(|| "-".to_string())
    }

    pub fn display_email(&self) -> String {
        self.user
            .as_ref()
            .map(|u| u.email.clone())
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| "-".to_string())
    }
}

// ============================================
// Form state and request payloads
// ============================================

/// Event create form state (raw input values)
#[derive(Clone, Debug, PartialEq)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    /// `datetime-local` input value, e.g. "2024-05-01T09:30"
    pub start_time: String,
    pub end_time: String,
    pub capacity: u32,
    pub organization_id: String,
    /// Empty string means top-level event
    pub parent_event_id: String,
}

impl Default for EventForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            start_time: String::new(),
            end_time: String::new(),
            capacity: 10,
            organization_id: String::new(),
            parent_event_id: String::new(),
        }
    }
}

/// Wire payload for creating or updating an event
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub title: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub capacity: u32,
    pub organization_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_event_id: Option<String>,
}

impl EventForm {
    /// Build the wire payload, normalizing date-time inputs to RFC 3339 UTC.
    /// The parent reference is attached only when one was chosen.
    pub fn payload(&self) -> Result<EventPayload, String> {
        if self.organization_id.trim().is_empty() {
            return Err("Please select an organization".to_string());
        }

        Ok(EventPayload {
            title: self.title.clone(),
            description: self.description.clone(),
            start_time: local_to_rfc3339(&self.start_time)?,
            end_time: local_to_rfc3339(&self.end_time)?,
            capacity: self.capacity,
            organization_id: self.organization_id.clone(),
            parent_event_id: non_empty(&self.parent_event_id).map(str::to_string),
        })
    }
}

/// Resource create form state
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceForm {
    pub name: String,
    pub description: String,
    pub kind: ResourceType,
    /// Organization id, or [`GLOBAL_ORG`] for a shared resource
    pub organization_id: String,
    pub max_concurrent: String,
    pub total_quantity: String,
}

impl Default for ResourceForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            kind: ResourceType::Exclusive,
            organization_id: GLOBAL_ORG.to_string(),
            max_concurrent: String::new(),
            total_quantity: String::new(),
        }
    }
}

/// Wire payload for creating a resource. The organization reference
/// serializes as JSON null for global resources, never as "global".
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePayload {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ResourceType,
    pub organization_id: Option<String>,
    pub max_concurrent: Option<u32>,
    pub total_quantity: Option<u32>,
}

impl ResourceForm {
    /// Build the wire payload. Only the capacity field matching the chosen
    /// type is carried: maxConcurrent for shareable, totalQuantity for
    /// consumable.
    pub fn payload(&self) -> ResourcePayload {
        let organization_id = match self.organization_id.trim() {
            "" | GLOBAL_ORG => None,
            id => Some(id.to_string()),
        };

        ResourcePayload {
            name: self.name.clone(),
            description: self.description.clone(),
            kind: self.kind,
            organization_id,
            max_concurrent: match self.kind {
                ResourceType::Shareable => self.max_concurrent.trim().parse().ok(),
                _ => None,
            },
            total_quantity: match self.kind {
                ResourceType::Consumable => self.total_quantity.trim().parse().ok(),
                _ => None,
            },
        }
    }
}

/// Attendance registration form state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegistrationForm {
    pub event_id: String,
    pub user_id: String,
    pub email: String,
    pub name: String,
}

/// Wire payload for attendance registration. Either a user reference or an
/// external name/email pair goes on the wire, never both.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPayload {
    pub event_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RegistrationForm {
    /// Select a registered user, clearing the external attendee fields.
    /// An empty id switches back to external entry.
    pub fn select_user(&mut self, user_id: &str) {
        self.user_id = user_id.to_string();
        if !user_id.is_empty() {
            self.email.clear();
            self.name.clear();
        }
    }

    pub fn payload(&self) -> Result<RegistrationPayload, String> {
        if self.event_id.is_empty() {
            return Err("Please select an event".to_string());
        }

        if self.user_id.is_empty() {
            Ok(RegistrationPayload {
                event_id: self.event_id.clone(),
                user_id: None,
                email: non_empty(&self.email).map(str::to_string),
                name: non_empty(&self.name).map(str::to_string),
            })
        } else {
            Ok(RegistrationPayload {
                event_id: self.event_id.clone(),
                user_id: Some(self.user_id.clone()),
                email: None,
                name: None,
            })
        }
    }
}

// ============================================
// Helpers
// ============================================

/// None for empty or whitespace-only strings
pub fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// The organization scope for an event's user list. Events without an
/// organization reference have no user scope.
pub fn user_scope(event: Option<&Event>) -> Option<String> {
    event.and_then(|e| e.organization_id.clone())
}

/// Convert a `datetime-local` input value to RFC 3339 UTC.
pub fn local_to_rfc3339(value: &str) -> Result<String, String> {
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| format!("Invalid date/time: {}", value))?;

    let local = Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| format!("Invalid date/time: {}", value))?;

    Ok(local
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Format an RFC 3339 timestamp for display, falling back to the raw value.
pub fn format_timestamp(value: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Local).format("%b %d, %Y %H:%M").to_string())
        .unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event(organization_id: Option<&str>) -> Event {
        Event {
            id: "evt-1".to_string(),
            title: "Workshop".to_string(),
            description: None,
            start_time: "2024-05-01T09:00:00Z".to_string(),
            end_time: "2024-05-01T11:00:00Z".to_string(),
            capacity: 20,
            organization_id: organization_id.map(str::to_string),
            parent_event_id: None,
        }
    }

    #[test]
    fn test_registration_with_user_omits_external_fields() {
        let mut form = RegistrationForm {
            event_id: "evt-1".to_string(),
            email: "ada@example.com".to_string(),
            name: "Ada".to_string(),
            ..Default::default()
        };
        form.select_user("usr-1");

        let payload = form.payload().unwrap();
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["userId"], "usr-1");
        assert!(json.get("email").is_none());
        assert!(json.get("name").is_none());
    }

    #[test]
    fn test_registration_external_omits_user_field() {
        let form = RegistrationForm {
            event_id: "evt-1".to_string(),
            email: "ada@example.com".to_string(),
            name: "Ada".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_value(&form.payload().unwrap()).unwrap();

        assert!(json.get("userId").is_none());
        assert_eq!(json["email"], "ada@example.com");
        assert_eq!(json["name"], "Ada");
    }

    #[test]
    fn test_registration_requires_event() {
        let form = RegistrationForm::default();
        assert!(form.payload().is_err());
    }

    #[test]
    fn test_select_user_clears_external_fields() {
        let mut form = RegistrationForm {
            event_id: "evt-1".to_string(),
            email: "ada@example.com".to_string(),
            name: "Ada".to_string(),
            ..Default::default()
        };

        form.select_user("usr-1");
        assert!(form.email.is_empty());
        assert!(form.name.is_empty());

        // Switching back to external entry keeps the fields empty
        form.select_user("");
        assert!(form.user_id.is_empty());
    }

    #[test]
    fn test_global_resource_sends_null_organization() {
        let form = ResourceForm {
            name: "Projector".to_string(),
            organization_id: GLOBAL_ORG.to_string(),
            ..Default::default()
        };

        let json = serde_json::to_value(form.payload()).unwrap();

        // null, never the sentinel string
        assert!(json["organizationId"].is_null());
    }

    #[test]
    fn test_consumable_carries_total_quantity_only() {
        let form = ResourceForm {
            name: "Coffee".to_string(),
            kind: ResourceType::Consumable,
            max_concurrent: "5".to_string(),
            total_quantity: "100".to_string(),
            ..Default::default()
        };

        let payload = form.payload();
        assert_eq!(payload.total_quantity, Some(100));
        assert_eq!(payload.max_concurrent, None);
    }

    #[test]
    fn test_shareable_carries_max_concurrent_only() {
        let form = ResourceForm {
            name: "Room".to_string(),
            kind: ResourceType::Shareable,
            max_concurrent: "3".to_string(),
            total_quantity: "100".to_string(),
            ..Default::default()
        };

        let payload = form.payload();
        assert_eq!(payload.max_concurrent, Some(3));
        assert_eq!(payload.total_quantity, None);
    }

    #[test]
    fn test_event_payload_omits_empty_parent() {
        let form = EventForm {
            title: "Workshop".to_string(),
            start_time: "2024-05-01T09:00".to_string(),
            end_time: "2024-05-01T11:00".to_string(),
            organization_id: "org-1".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_value(form.payload().unwrap()).unwrap();
        assert!(json.get("parentEventId").is_none());
    }

    #[test]
    fn test_event_payload_attaches_chosen_parent() {
        let form = EventForm {
            title: "Breakout".to_string(),
            start_time: "2024-05-01T09:00".to_string(),
            end_time: "2024-05-01T10:00".to_string(),
            organization_id: "org-1".to_string(),
            parent_event_id: "evt-9".to_string(),
            ..Default::default()
        };

        let payload = form.payload().unwrap();
        assert_eq!(payload.parent_event_id.as_deref(), Some("evt-9"));
    }

    #[test]
    fn test_event_payload_requires_organization() {
        let form = EventForm {
            title: "Workshop".to_string(),
            start_time: "2024-05-01T09:00".to_string(),
            end_time: "2024-05-01T11:00".to_string(),
            ..Default::default()
        };
        assert!(form.payload().is_err());
    }

    #[test]
    fn test_local_to_rfc3339_normalizes() {
        let normalized = local_to_rfc3339("2024-05-01T09:30").unwrap();
        assert!(normalized.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&normalized).is_ok());
    }

    #[test]
    fn test_local_to_rfc3339_rejects_garbage() {
        assert!(local_to_rfc3339("not a date").is_err());
        assert!(local_to_rfc3339("").is_err());
    }

    #[test]
    fn test_user_scope_requires_organization() {
        let unscoped = sample_event(None);
        assert_eq!(user_scope(Some(&unscoped)), None);

        let scoped = sample_event(Some("org-1"));
        assert_eq!(user_scope(Some(&scoped)), Some("org-1".to_string()));

        assert_eq!(user_scope(None), None);
    }

    #[test]
    fn test_resource_type_round_trip() {
        for kind in [
            ResourceType::Exclusive,
            ResourceType::Shareable,
            ResourceType::Consumable,
        ] {
            assert_eq!(ResourceType::from_value(kind.as_str()), kind);
        }
    }

    #[test]
    fn test_attendance_display_prefers_user_record() {
        let attendance = Attendance {
            id: "att-1".to_string(),
            event_id: Some("evt-1".to_string()),
            user_id: Some("usr-1".to_string()),
            name: Some("stale".to_string()),
            email: None,
            user: Some(User {
                id: "usr-1".to_string(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                organization_id: None,
            }),
            event: None,
        };

        assert!(!attendance.is_external());
        assert_eq!(attendance.display_name(), "Ada");
        assert_eq!(attendance.display_email(), "ada@example.com");
    }
}
