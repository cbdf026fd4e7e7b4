//! Events Page
//!
//! Event list scoped to an organization, with a create form and per-row
//! resource allocation. All validity checks happen server-side.

use leptos::*;
use wasm_bindgen::JsCast;

use crate::api;
use crate::components::Loading;
use crate::model::{non_empty, Event, EventForm, Organization, Resource};
use crate::state::GlobalState;

/// Load the event and resource lists for the selected organization.
/// Resources are always loaded so global ones stay allocatable; events
/// need an organization scope.
async fn load_lists(
    org: String,
    set_events: WriteSignal<Vec<Event>>,
    set_resources: WriteSignal<Vec<Resource>>,
    set_loading: WriteSignal<bool>,
) {
    set_loading.set(true);

    match api::fetch_resources(non_empty(&org)).await {
        Ok(resources) => set_resources.set(resources),
        Err(e) => {
            web_sys::console::error_1(&format!("Failed to load resources: {}", e).into())
        }
    }

    if org.is_empty() {
        set_events.set(Vec::new());
    } else {
        match api::fetch_events(Some(&org)).await {
            Ok(events) => set_events.set(events),
            Err(e) => {
                web_sys::console::error_1(&format!("Failed to load events: {}", e).into())
            }
        }
    }

    set_loading.set(false);
}

/// Events management page
#[component]
pub fn Events() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (organizations, set_organizations) = create_signal(Vec::<Organization>::new());
    let (events, set_events) = create_signal(Vec::<Event>::new());
    let (resources, set_resources) = create_signal(Vec::<Resource>::new());
    let (loading, set_loading) = create_signal(true);
    let (show_form, set_show_form) = create_signal(false);
    let (selected_org, set_selected_org) = create_signal(String::new());
    let form = create_rw_signal(EventForm::default());

    // Load organizations once; default to the first one.
    create_effect(move |_| {
        spawn_local(async move {
            match api::fetch_organizations().await {
                Ok(orgs) => {
                    if selected_org.get_untracked().is_empty() {
                        if let Some(first) = orgs.first() {
                            let id = first.id.clone();
                            form.update(|f| f.organization_id = id.clone());
                            set_selected_org.set(id);
                        }
                    }
                    set_organizations.set(orgs);
                }
                Err(e) => web_sys::console::error_1(
                    &format!("Failed to load organizations: {}", e).into(),
                ),
            }
        });
    });

    // Reload events and resources whenever the organization changes.
    create_effect(move |_| {
        let org = selected_org.get();
        spawn_local(load_lists(org, set_events, set_resources, set_loading));
    });

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
            match api::create_event(&payload).await {
                Ok(_) => {
                    let org = selected_org.get_untracked();
                    set_show_form.set(false);
                    form.set(EventForm {
                        organization_id: org.clone(),
                        ..EventForm::default()
                    });
                    state.show_success("Event created");
                    load_lists(org, set_events, set_resources, set_loading).await;
                }
                Err(e) => state.show_error(&format!("Error creating event: {}", e)),
            }
        });
    };

    let state_for_allocate = state.clone();
    let on_allocate = move |event_id: String, resource_id: String| {
        let state = state_for_allocate.clone();
        spawn_local(async move {
            match api::allocate_resource(&event_id, &resource_id, 1).await {
                Ok(()) => {
                    let org = selected_org.get_untracked();
                    load_lists(org, set_events, set_resources, set_loading).await;
                }
                Err(e) => state.show_error(&format!("Error allocating resource: {}", e)),
            }
        });
    };

    let state_for_delete = state.clone();
    let on_delete = move |event_id: String| {
        let state = state_for_delete.clone();
        spawn_local(async move {
            match api::delete_event(&event_id).await {
                Ok(()) => {
                    let org = selected_org.get_untracked();
                    state.show_success("Event deleted");
                    load_lists(org, set_events, set_resources, set_loading).await;
                }
                Err(e) => state.show_error(&format!("Error deleting event: {}", e)),
            }
        });
    };

    view! {
        <div class="space-y-6">
            // Header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Events"</h1>
                    <p class="text-gray-400 mt-1">"Schedule and manage events"</p>
                </div>

                <button
                    on:click=move |_| set_show_form.update(|v| *v = !*v)
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                >
                    {move || if show_form.get() { "Cancel" } else { "+ Create Event" }}
                </button>
            </div>

            // Organization scope selector
            <div class="max-w-xs">
                <label class="block text-sm text-gray-400 mb-2">"Organization"</label>
                <select
                    prop:value=move || selected_org.get()
                    on:change=move |ev| {
                        let org = event_target_value(&ev);
                        form.update(|f| f.organization_id = org.clone());
                        set_selected_org.set(org);
                    }
                    class="w-full bg-gray-700 rounded-lg px-4 py-2
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                >
                    <option value="">"Select Organization"</option>
                    {move || organizations.get().into_iter().map(|org| view! {
                        <option value=org.id.clone()>{org.name}</option>
                    }).collect_view()}
                </select>
            </div>

            // Create form
            {move || {
                if show_form.get() {
                    view! {
                        <form on:submit=on_submit.clone() class="bg-gray-800 rounded-xl p-6 space-y-4">
                            <div class="grid md:grid-cols-2 gap-4">
                                <div>
                                    <label class="block text-sm text-gray-400 mb-2">"Title"</label>
                                    <input
                                        type="text"
                                        required
                                        prop:value=move || form.get().title
                                        on:input=move |ev| form.update(|f| f.title = event_target_value(&ev))
                                        class="w-full bg-gray-700 rounded-lg px-4 py-2
                                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                                    />
                                </div>
                                <div>
                                    <label class="block text-sm text-gray-400 mb-2">"Capacity"</label>
                                    <input
                                        type="number"
                                        required
                                        min="1"
                                        prop:value=move || form.get().capacity.to_string()
                                        on:input=move |ev| {
                                            if let Ok(capacity) = event_target_value(&ev).parse() {
                                                form.update(|f| f.capacity = capacity);
                                            }
                                        }
                                        class="w-full bg-gray-700 rounded-lg px-4 py-2
                                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                                    />
                                </div>
                                <div>
                                    <label class="block text-sm text-gray-400 mb-2">"Start Time"</label>
                                    <input
                                        type="datetime-local"
                                        required
                                        prop:value=move || form.get().start_time
                                        on:input=move |ev| form.update(|f| f.start_time = event_target_value(&ev))
                                        class="w-full bg-gray-700 rounded-lg px-4 py-2
                                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                                    />
                                </div>
                                <div>
                                    <label class="block text-sm text-gray-400 mb-2">"End Time"</label>
                                    <input
                                        type="datetime-local"
                                        required
                                        prop:value=move || form.get().end_time
                                        on:input=move |ev| form.update(|f| f.end_time = event_target_value(&ev))
                                        class="w-full bg-gray-700 rounded-lg px-4 py-2
                                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                                    />
                                </div>
                                <div>
                                    <label class="block text-sm text-gray-400 mb-2">"Parent Event"</label>
                                    <select
                                        prop:value=move || form.get().parent_event_id
                                        on:change=move |ev| {
                                            form.update(|f| f.parent_event_id = event_target_value(&ev))
                                        }
                                        class="w-full bg-gray-700 rounded-lg px-4 py-2
                                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                                    >
                                        <option value="">"None (top-level event)"</option>
                                        {move || events.get().into_iter().map(|event| view! {
                                            <option value=event.id.clone()>{event.title}</option>
                                        }).collect_view()}
                                    </select>
                                </div>
                                <div class="md:col-span-2">
                                    <label class="block text-sm text-gray-400 mb-2">"Description"</label>
                                    <textarea
                                        rows="3"
                                        prop:value=move || form.get().description
                                        on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                                        class="w-full bg-gray-700 rounded-lg px-4 py-2
                                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                                    />
                                </div>
                            </div>

                            <button
                                type="submit"
                                class="px-4 py-2 bg-green-600 hover:bg-green-700 rounded-lg font-medium transition-colors"
                            >
                                "Create Event"
                            </button>
                        </form>
                    }.into_view()
                } else {
                    view! {}.into_view()
                }
            }}

            // Event list
            {move || {
                if loading.get() {
                    view! { <Loading /> }.into_view()
                } else {
                    let rows = events.get();
                    if rows.is_empty() {
                        view! {
                            <div class="bg-gray-800 rounded-xl p-6 text-center text-gray-400">
                                "No events for this organization yet."
                            </div>
                        }.into_view()
                    } else {
                        let on_allocate = on_allocate.clone();
                        let on_delete = on_delete.clone();
                        view! {
                            <div class="bg-gray-800 rounded-xl overflow-hidden">
                                <table class="w-full">
                                    <thead class="bg-gray-700 text-left text-sm text-gray-300">
                                        <tr>
                                            <th class="px-4 py-3">"Title"</th>
                                            <th class="px-4 py-3">"Start"</th>
                                            <th class="px-4 py-3">"End"</th>
                                            <th class="px-4 py-3">"Capacity"</th>
                                            <th class="px-4 py-3">"Actions"</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {rows.into_iter().map(|event| {
                                            let on_allocate = on_allocate.clone();
                                            let on_delete = on_delete.clone();
                                            view! {
                                                <EventRow
                                                    event=event
                                                    resources=resources
                                                    on_allocate=on_allocate
                                                    on_delete=on_delete
                                                />
                                            }
                                        }).collect_view()}
                                    </tbody>
                                </table>
                            </div>
                        }.into_view()
                    }
                }
            }}
        </div>
    }
}

/// Single event row with allocation select and delete action
#[component]
fn EventRow(
    event: Event,
    resources: ReadSignal<Vec<Resource>>,
    on_allocate: impl Fn(String, String) + 'static,
    on_delete: impl Fn(String) + 'static,
) -> impl IntoView {
    let event_id_for_allocate = event.id.clone();
    let event_id_for_delete = event.id.clone();

    view! {
        <tr class="border-t border-gray-700">
            <td class="px-4 py-3">{event.title.clone()}</td>
            <td class="px-4 py-3 text-gray-300">
                {crate::model::format_timestamp(&event.start_time)}
            </td>
            <td class="px-4 py-3 text-gray-300">
                {crate::model::format_timestamp(&event.end_time)}
            </td>
            <td class="px-4 py-3">{event.capacity}</td>
            <td class="px-4 py-3">
                <div class="flex items-center space-x-2">
                    <select
                        on:change=move |ev| {
                            let resource_id = event_target_value(&ev);
                            if resource_id.is_empty() {
                                return;
                            }
                            // Reset so the same resource can be picked again
                            if let Some(select) = ev
                                .target()
                                .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
                            {
                                select.set_value("");
                            }
                            on_allocate(event_id_for_allocate.clone(), resource_id);
                        }
                        class="bg-gray-700 rounded-lg px-2 py-1 text-sm
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    >
                        <option value="">"Allocate Resource"</option>
                        {move || resources.get().into_iter().map(|resource| view! {
                            <option value=resource.id.clone()>
                                {format!("{} ({})", resource.name, resource.kind.as_str())}
                            </option>
                        }).collect_view()}
                    </select>

                    <button
                        on:click=move |_| on_delete(event_id_for_delete.clone())
                        class="px-2 py-1 text-sm text-red-400 hover:text-red-300 hover:bg-gray-700 rounded transition-colors"
                    >
                        "Delete"
                    </button>
                </div>
            </td>
        </tr>
    }
}
