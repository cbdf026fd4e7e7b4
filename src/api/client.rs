//! HTTP API Client
//!
//! One function per backend operation. Each builds a URL against the
//! configured base, sends JSON where applicable, and surfaces the server's
//! `message` field on non-success status (with a generic fallback). No
//! retries, no timeouts, no schema validation beyond serde.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::model::{
    Attendance, Event, EventPayload, Organization, RegistrationPayload, Resource,
    ResourcePayload, User,
};
use crate::reports::{
    DoubleBookedUserRow, ExternalAttendeeRow, InvalidParentEventRow, Report, ReportKind,
    ResourceUtilizationRow, UnderutilizedResourceRow, ViolatingEventRow,
};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:3000";

/// Local storage key for the API base URL override, set out-of-band
/// (no settings surface exists in the console)
const API_BASE_KEY: &str = "eventdesk_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(url)) = storage.get_item(API_BASE_KEY) {
                url
            } else {
                DEFAULT_API_BASE.to_string()
            }
        } else {
            DEFAULT_API_BASE.to_string()
        }
    } else {
        DEFAULT_API_BASE.to_string()
    };
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

// ============ Error handling ============

/// Error body shape the backend sends on non-success status
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Read the server's error message, or fall back to a generic one.
async fn read_error(response: Response, fallback: &str) -> String {
    response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| fallback.to_string())
}

async fn get_json<T: DeserializeOwned>(url: &str, fallback: &str) -> Result<T, String> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(read_error(response, fallback).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

async fn post_json<B: Serialize, T: DeserializeOwned>(
    url: &str,
    body: &B,
    fallback: &str,
) -> Result<T, String> {
    let response = Request::post(url)
        .json(body)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(read_error(response, fallback).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// POST where the caller has no use for the response body
async fn post_json_discard<B: Serialize>(url: &str, body: &B, fallback: &str) -> Result<(), String> {
    let response = Request::post(url)
        .json(body)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(read_error(response, fallback).await);
    }

    Ok(())
}

fn scoped_url(base: &str, path: &str, organization_id: Option<&str>) -> String {
    match organization_id {
        Some(org) => format!("{}{}?organizationId={}", base, path, org),
        None => format!("{}{}", base, path),
    }
}

// ============ Organizations and users ============

pub async fn fetch_organizations() -> Result<Vec<Organization>, String> {
    let url = format!("{}/organizations", get_api_base());
    get_json(&url, "Failed to load organizations").await
}

pub async fn fetch_users(organization_id: Option<&str>) -> Result<Vec<User>, String> {
    let url = scoped_url(&get_api_base(), "/users", organization_id);
    get_json(&url, "Failed to load users").await
}

// ============ Events ============

pub async fn fetch_events(organization_id: Option<&str>) -> Result<Vec<Event>, String> {
    let url = scoped_url(&get_api_base(), "/events", organization_id);
    get_json(&url, "Failed to load events").await
}

pub async fn create_event(payload: &EventPayload) -> Result<Event, String> {
    let url = format!("{}/events", get_api_base());
    post_json(&url, payload, "Failed to create event").await
}

pub async fn update_event(id: &str, payload: &EventPayload) -> Result<Event, String> {
    let url = format!("{}/events/{}", get_api_base(), id);

    let response = Request::put(&url)
        .json(payload)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(read_error(response, "Failed to update event").await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

pub async fn delete_event(id: &str) -> Result<(), String> {
    let url = format!("{}/events/{}", get_api_base(), id);

    let response = Request::delete(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(read_error(response, "Failed to delete event").await);
    }

    Ok(())
}

// ============ Resources ============

pub async fn fetch_resources(organization_id: Option<&str>) -> Result<Vec<Resource>, String> {
    let url = scoped_url(&get_api_base(), "/resources", organization_id);
    get_json(&url, "Failed to load resources").await
}

pub async fn create_resource(payload: &ResourcePayload) -> Result<Resource, String> {
    let url = format!("{}/resources", get_api_base());
    post_json(&url, payload, "Failed to create resource").await
}

/// Allocate a resource to an event. Allocation arithmetic and conflict
/// detection happen server-side; this only reports the outcome.
pub async fn allocate_resource(
    event_id: &str,
    resource_id: &str,
    quantity: u32,
) -> Result<(), String> {
    #[derive(Serialize)]
    struct AllocateRequest {
        quantity: u32,
    }

    let url = format!(
        "{}/events/{}/resources/{}",
        get_api_base(),
        event_id,
        resource_id
    );

    post_json_discard(&url, &AllocateRequest { quantity }, "Failed to allocate resource").await
}

// ============ Attendance ============

pub async fn register_attendance(payload: &RegistrationPayload) -> Result<(), String> {
    let url = format!("{}/attendance/register", get_api_base());
    post_json_discard(&url, payload, "Failed to register for event").await
}

pub async fn event_attendees(event_id: &str) -> Result<Vec<Attendance>, String> {
    let url = format!("{}/attendance/event/{}", get_api_base(), event_id);
    get_json(&url, "Failed to load attendees").await
}

pub async fn user_attendances(user_id: &str) -> Result<Vec<Attendance>, String> {
    let url = format!("{}/attendance/user/{}", get_api_base(), user_id);
    get_json(&url, "Failed to load user registrations").await
}

// ============ Reporting ============

pub async fn double_booked_users() -> Result<Vec<DoubleBookedUserRow>, String> {
    let url = format!("{}/reporting/double-booked-users", get_api_base());
    get_json(&url, "Failed to load report").await
}

pub async fn violating_events() -> Result<Vec<ViolatingEventRow>, String> {
    let url = format!("{}/reporting/violating-events", get_api_base());
    get_json(&url, "Failed to load report").await
}

pub async fn resource_utilization() -> Result<Vec<ResourceUtilizationRow>, String> {
    let url = format!("{}/reporting/resource-utilization", get_api_base());
    get_json(&url, "Failed to load report").await
}

pub async fn invalid_parent_events() -> Result<Vec<InvalidParentEventRow>, String> {
    let url = format!("{}/reporting/invalid-parent-events", get_api_base());
    get_json(&url, "Failed to load report").await
}

pub async fn events_with_external_attendees(
    threshold: u32,
) -> Result<Vec<ExternalAttendeeRow>, String> {
    let url = format!(
        "{}/reporting/external-attendees?threshold={}",
        get_api_base(),
        threshold
    );
    get_json(&url, "Failed to load report").await
}

pub async fn underutilized_resources(
    min_usage_hours: u32,
) -> Result<Vec<UnderutilizedResourceRow>, String> {
    let url = format!(
        "{}/reporting/underutilized-resources?minUsageHours={}",
        get_api_base(),
        min_usage_hours
    );
    get_json(&url, "Failed to load report").await
}

/// Fetch one report by kind. `threshold` is only consulted for the two
/// parameterized reports.
pub async fn fetch_report(kind: ReportKind, threshold: u32) -> Result<Report, String> {
    match kind {
        ReportKind::DoubleBookedUsers => {
            double_booked_users().await.map(Report::DoubleBookedUsers)
        }
        ReportKind::ViolatingEvents => violating_events().await.map(Report::ViolatingEvents),
        ReportKind::ResourceUtilization => {
            resource_utilization().await.map(Report::ResourceUtilization)
        }
        ReportKind::InvalidParentEvents => {
            invalid_parent_events().await.map(Report::InvalidParentEvents)
        }
        ReportKind::ExternalAttendees => events_with_external_attendees(threshold)
            .await
            .map(Report::ExternalAttendees),
        ReportKind::UnderutilizedResources => underutilized_resources(threshold)
            .await
            .map(Report::UnderutilizedResources),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_url_appends_organization() {
        assert_eq!(
            scoped_url("http://localhost:3000", "/events", Some("org-1")),
            "http://localhost:3000/events?organizationId=org-1"
        );
        assert_eq!(
            scoped_url("http://localhost:3000", "/events", None),
            "http://localhost:3000/events"
        );
    }

    #[test]
    fn test_error_body_tolerates_missing_message() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.message.is_none());

        let body: ErrorBody = serde_json::from_str(r#"{"message": "Capacity exceeded"}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("Capacity exceeded"));
    }
}
