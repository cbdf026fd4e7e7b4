//! Attendance Page
//!
//! Registration form and attendee list. Selecting an event loads its
//! attendees and, when the event belongs to an organization, that
//! organization's users. A selected user's existing registrations are shown
//! as a conflict-awareness aid only; the server alone enforces any
//! double-booking rule.

use leptos::*;

use crate::api;
use crate::components::loading::InlineLoading;
use crate::components::Loading;
use crate::model::{user_scope, Attendance, Event, RegistrationForm, User};
use crate::state::GlobalState;

/// Apply the outcome of a successful registration: the refreshed attendee
/// list replaces the displayed one and every selection (form, user list,
/// the selected user's registrations) clears.
fn apply_registration_success(
    refreshed: Vec<Attendance>,
    form: RwSignal<RegistrationForm>,
    set_attendees: WriteSignal<Vec<Attendance>>,
    set_users: WriteSignal<Vec<User>>,
    set_user_events: WriteSignal<Vec<Attendance>>,
) {
    set_attendees.set(refreshed);
    form.set(RegistrationForm::default());
    set_users.set(Vec::new());
    set_user_events.set(Vec::new());
}

/// Attendance management page
#[component]
pub fn Attendance() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (events, set_events) = create_signal(Vec::<Event>::new());
    let (attendees, set_attendees) = create_signal(Vec::<Attendance>::new());
    let (users, set_users) = create_signal(Vec::<User>::new());
    let (user_events, set_user_events) = create_signal(Vec::<Attendance>::new());
    let (loading, set_loading) = create_signal(true);
    let (loading_users, set_loading_users) = create_signal(false);
    let form = create_rw_signal(RegistrationForm::default());

    // Load all events on mount
    create_effect(move |_| {
        spawn_local(async move {
            set_loading.set(true);
            match api::fetch_events(None).await {
                Ok(list) => set_events.set(list),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to load events: {}", e).into())
                }
            }
            set_loading.set(false);
        });
    });

    let on_event_change = move |ev: web_sys::Event| {
        let event_id = event_target_value(&ev);

        form.update(|f| {
            f.event_id = event_id.clone();
            f.select_user("");
        });
        set_attendees.set(Vec::new());
        set_users.set(Vec::new());
        set_user_events.set(Vec::new());

        if event_id.is_empty() {
            return;
        }

        let scope = user_scope(events.get_untracked().iter().find(|e| e.id == event_id));

        spawn_local(async move {
            match api::event_attendees(&event_id).await {
                Ok(list) => set_attendees.set(list),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to load attendees: {}", e).into())
                }
            }

            // No organization reference means no user scope: leave the
            // user list empty and the selector disabled.
            if let Some(org) = scope {
                set_loading_users.set(true);
                match api::fetch_users(Some(&org)).await {
                    Ok(list) => set_users.set(list),
                    Err(e) => {
                        web_sys::console::error_1(
                            &format!("Failed to load users: {}", e).into(),
                        );
                        set_users.set(Vec::new());
                    }
                }
                set_loading_users.set(false);
            }
        });
    };

    let on_user_change = move |ev: web_sys::Event| {
        let user_id = event_target_value(&ev);
        form.update(|f| f.select_user(&user_id));

        if user_id.is_empty() {
            set_user_events.set(Vec::new());
            return;
        }

        spawn_local(async move {
            match api::user_attendances(&user_id).await {
                Ok(list) => set_user_events.set(list),
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("Failed to load user registrations: {}", e).into(),
                    );
                    set_user_events.set(Vec::new());
                }
            }
        });
    };

    let state_for_submit = state.clone();
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let payload = match form.get().payload() {
            Ok(payload) => payload,
            Err(e) => {
                state_for_submit.show_error(&e);
                return;
            }
        };

        let state = state_for_submit.clone();
        spawn_local(async move {
            match api::register_attendance(&payload).await {
                Ok(()) => {
                    // Refresh the roster before clearing selection so the
                    // new attendee is not dropped
                    let refreshed = match api::event_attendees(&payload.event_id).await {
                        Ok(list) => list,
                        Err(e) => {
                            web_sys::console::error_1(
                                &format!("Failed to load attendees: {}", e).into(),
                            );
                            Vec::new()
                        }
                    };
                    apply_registration_success(
                        refreshed,
                        form,
                        set_attendees,
                        set_users,
                        set_user_events,
                    );
                    state.show_success("Registration successful");
                }
                Err(e) => state.show_error(&format!("Error registering: {}", e)),
            }
        });
    };

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"Attendance"</h1>
                <p class="text-gray-400 mt-1">"Register users and external attendees"</p>
            </div>

            {move || {
                if loading.get() {
                    view! { <Loading /> }.into_view()
                } else {
                    view! {
                        <div class="grid lg:grid-cols-2 gap-6">
                            // Registration form
                            <section class="bg-gray-800 rounded-xl p-6">
                                <h2 class="text-xl font-semibold mb-4">"Register for Event"</h2>

                                <form on:submit=on_submit.clone() class="space-y-4">
                                    <div>
                                        <label class="block text-sm text-gray-400 mb-2">"Event"</label>
                                        <select
                                            required
                                            prop:value=move || form.get().event_id
                                            on:change=on_event_change.clone()
                                            class="w-full bg-gray-700 rounded-lg px-4 py-2
                                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                                        >
                                            <option value="">"Select Event"</option>
                                            {move || events.get().into_iter().map(|event| {
                                                let label = format!(
                                                    "{} - {}",
                                                    event.title,
                                                    crate::model::format_timestamp(&event.start_time),
                                                );
                                                view! { <option value=event.id.clone()>{label}</option> }
                                            }).collect_view()}
                                        </select>
                                    </div>

                                    <div>
                                        <label class="block text-sm text-gray-400 mb-2">
                                            "User (optional)"
                                            {move || loading_users.get().then(|| view! {
                                                <span class="ml-2"><InlineLoading /></span>
                                            })}
                                        </label>
                                        <select
                                            prop:value=move || form.get().user_id
                                            on:change=on_user_change.clone()
                                            disabled=move || {
                                                form.get().event_id.is_empty()
                                                    || loading_users.get()
                                                    || users.get().is_empty()
                                            }
                                            class="w-full bg-gray-700 rounded-lg px-4 py-2
                                                   border border-gray-600 focus:border-primary-500 focus:outline-none
                                                   disabled:opacity-50"
                                        >
                                            <option value="">
                                                "Select User (or leave empty for external attendee)"
                                            </option>
                                            {move || users.get().into_iter().map(|user| {
                                                let label = format!("{} ({})", user.name, user.email);
                                                view! { <option value=user.id.clone()>{label}</option> }
                                            }).collect_view()}
                                        </select>

                                        // Existing registrations of the selected user
                                        {move || {
                                            let registrations = user_events.get();
                                            (!form.get().user_id.is_empty() && !registrations.is_empty())
                                                .then(|| view! {
                                                    <div class="mt-2 p-3 bg-gray-700 rounded-lg text-sm">
                                                        <p class="font-medium mb-1">"User is registered for:"</p>
                                                        <ul class="list-disc list-inside space-y-1 text-gray-300">
                                                            {registrations.into_iter().map(|attendance| {
                                                                let label = attendance.event.as_ref().map(|event| {
                                                                    format!(
                                                                        "{} - {} to {}",
                                                                        event.title,
                                                                        crate::model::format_timestamp(&event.start_time),
                                                                        crate::model::format_timestamp(&event.end_time),
                                                                    )
                                                                }).unwrap_or_else(|| "-".to_string());
                                                                view! { <li>{label}</li> }
                                                            }).collect_view()}
                                                        </ul>
                                                    </div>
                                                })
                                        }}
                                    </div>

                                    // External attendee fields, hidden once a user is chosen
                                    {move || form.get().user_id.is_empty().then(|| view! {
                                        <div>
                                            <label class="block text-sm text-gray-400 mb-2">"Email (for external)"</label>
                                            <input
                                                type="email"
                                                placeholder="Enter email for external attendee"
                                                prop:value=move || form.get().email
                                                on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                                                class="w-full bg-gray-700 rounded-lg px-4 py-2
                                                       border border-gray-600 focus:border-primary-500 focus:outline-none"
                                            />
                                        </div>
                                        <div>
                                            <label class="block text-sm text-gray-400 mb-2">"Name (for external)"</label>
                                            <input
                                                type="text"
                                                placeholder="Enter name for external attendee"
                                                prop:value=move || form.get().name
                                                on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                                                class="w-full bg-gray-700 rounded-lg px-4 py-2
                                                       border border-gray-600 focus:border-primary-500 focus:outline-none"
                                            />
                                        </div>
                                    })}

                                    <button
                                        type="submit"
                                        class="px-4 py-2 bg-green-600 hover:bg-green-700 rounded-lg font-medium transition-colors"
                                    >
                                        "Register"
                                    </button>
                                </form>
                            </section>

                            // Attendee list for the selected event
                            <section class="bg-gray-800 rounded-xl p-6">
                                <h2 class="text-xl font-semibold mb-4">"Event Attendees"</h2>

                                {move || {
                                    if form.get().event_id.is_empty() {
                                        view! {
                                            <p class="text-gray-400">"Select an event to view attendees"</p>
                                        }.into_view()
                                    } else {
                                        let rows = attendees.get();
                                        if rows.is_empty() {
                                            view! {
                                                <p class="text-gray-400">"No attendees registered yet"</p>
                                            }.into_view()
                                        } else {
                                            view! {
                                                <table class="w-full">
                                                    <thead class="bg-gray-700 text-left text-sm text-gray-300">
                                                        <tr>
                                                            <th class="px-4 py-2">"Name"</th>
                                                            <th class="px-4 py-2">"Email"</th>
                                                            <th class="px-4 py-2">"Type"</th>
                                                        </tr>
                                                    </thead>
                                                    <tbody>
                                                        {rows.into_iter().map(|attendance| view! {
                                                            <tr class="border-t border-gray-700">
                                                                <td class="px-4 py-2">{attendance.display_name()}</td>
                                                                <td class="px-4 py-2 text-gray-300">{attendance.display_email()}</td>
                                                                <td class="px-4 py-2">
                                                                    {if attendance.is_external() { "External" } else { "User" }}
                                                                </td>
                                                            </tr>
                                                        }).collect_view()}
                                                    </tbody>
                                                </table>
                                            }.into_view()
                                        }
                                    }
                                }}
                            </section>
                        </div>
                    }.into_view()
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_attendance(id: &str) -> Attendance {
        Attendance {
            id: id.to_string(),
            event_id: Some("evt-1".to_string()),
            user_id: None,
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            user: None,
            event: None,
        }
    }

    #[test]
    fn test_registration_success_refreshes_attendees_and_clears_selection() {
        let runtime = create_runtime();

        let form = create_rw_signal(RegistrationForm {
            event_id: "evt-1".to_string(),
            user_id: "usr-1".to_string(),
            ..Default::default()
        });
        let (attendees, set_attendees) = create_signal(vec![sample_attendance("att-1")]);
        let (users, set_users) = create_signal(vec![User {
            id: "usr-1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            organization_id: None,
        }]);
        let (user_events, set_user_events) = create_signal(vec![sample_attendance("att-2")]);

        apply_registration_success(
            vec![sample_attendance("att-1"), sample_attendance("att-3")],
            form,
            set_attendees,
            set_users,
            set_user_events,
        );

        // The just-registered attendee shows up instead of being dropped
        assert_eq!(attendees.get_untracked().len(), 2);
        assert_eq!(form.get_untracked(), RegistrationForm::default());
        assert!(users.get_untracked().is_empty());
        assert!(user_events.get_untracked().is_empty());

        runtime.dispose();
    }
}
