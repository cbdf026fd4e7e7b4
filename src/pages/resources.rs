//! Resources Page
//!
//! Resource list with a create form. The capacity field shown depends on
//! the chosen type; the "global" organization choice maps to a null
//! organization reference on the wire.

use leptos::*;

use crate::api;
use crate::components::Loading;
use crate::model::{Organization, Resource, ResourceForm, ResourceType, GLOBAL_ORG};
use crate::state::GlobalState;

async fn load_resources(set_resources: WriteSignal<Vec<Resource>>, set_loading: WriteSignal<bool>) {
    set_loading.set(true);
    match api::fetch_resources(None).await {
        Ok(resources) => set_resources.set(resources),
        Err(e) => web_sys::console::error_1(&format!("Failed to load resources: {}", e).into()),
    }
    set_loading.set(false);
}

/// Resources management page
#[component]
pub fn Resources() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (organizations, set_organizations) = create_signal(Vec::<Organization>::new());
    let (resources, set_resources) = create_signal(Vec::<Resource>::new());
    let (loading, set_loading) = create_signal(true);
    let (show_form, set_show_form) = create_signal(false);
    let form = create_rw_signal(ResourceForm::default());

    // Initial load
    create_effect(move |_| {
        spawn_local(async move {
            match api::fetch_organizations().await {
                Ok(orgs) => set_organizations.set(orgs),
                Err(e) => web_sys::console::error_1(
                    &format!("Failed to load organizations: {}", e).into(),
                ),
            }
            load_resources(set_resources, set_loading).await;
        });
    });

    let state_for_submit = state.clone();
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let payload = form.get().payload();
        let state = state_for_submit.clone();
        spawn_local(async move {
            match api::create_resource(&payload).await {
                Ok(_) => {
                    set_show_form.set(false);
                    form.set(ResourceForm::default());
                    state.show_success("Resource created");
                    load_resources(set_resources, set_loading).await;
                }
                Err(e) => state.show_error(&format!("Error creating resource: {}", e)),
            }
        });
    };

    view! {
        <div class="space-y-6">
            // Header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Resources"</h1>
                    <p class="text-gray-400 mt-1">"Rooms, equipment and consumables"</p>
                </div>

                <button
                    on:click=move |_| set_show_form.update(|v| *v = !*v)
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                >
                    {move || if show_form.get() { "Cancel" } else { "+ Create Resource" }}
                </button>
            </div>

            // Create form
            {move || {
                if show_form.get() {
                    view! {
                        <form on:submit=on_submit.clone() class="bg-gray-800 rounded-xl p-6 space-y-4">
                            <div class="grid md:grid-cols-2 gap-4">
                                <div>
                                    <label class="block text-sm text-gray-400 mb-2">"Name"</label>
                                    <input
                                        type="text"
                                        required
                                        prop:value=move || form.get().name
                                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                                        class="w-full bg-gray-700 rounded-lg px-4 py-2
                                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                                    />
                                </div>
                                <div>
                                    <label class="block text-sm text-gray-400 mb-2">"Organization"</label>
                                    <select
                                        prop:value=move || form.get().organization_id
                                        on:change=move |ev| {
                                            form.update(|f| f.organization_id = event_target_value(&ev))
                                        }
                                        class="w-full bg-gray-700 rounded-lg px-4 py-2
                                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                                    >
                                        <option value=GLOBAL_ORG>
                                            "Global (shared across all organizations)"
                                        </option>
                                        {move || organizations.get().into_iter().map(|org| view! {
                                            <option value=org.id.clone()>{org.name}</option>
                                        }).collect_view()}
                                    </select>
                                </div>
                                <div>
                                    <label class="block text-sm text-gray-400 mb-2">"Type"</label>
                                    <select
                                        prop:value=move || form.get().kind.as_str()
                                        on:change=move |ev| {
                                            form.update(|f| {
                                                f.kind = ResourceType::from_value(&event_target_value(&ev))
                                            })
                                        }
                                        class="w-full bg-gray-700 rounded-lg px-4 py-2
                                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                                    >
                                        <option value="exclusive">"Exclusive"</option>
                                        <option value="shareable">"Shareable"</option>
                                        <option value="consumable">"Consumable"</option>
                                    </select>
                                </div>

                                // Type-conditional capacity field
                                {move || match form.get().kind {
                                    ResourceType::Shareable => view! {
                                        <div>
                                            <label class="block text-sm text-gray-400 mb-2">"Max Concurrent"</label>
                                            <input
                                                type="number"
                                                min="1"
                                                prop:value=move || form.get().max_concurrent
                                                on:input=move |ev| {
                                                    form.update(|f| f.max_concurrent = event_target_value(&ev))
                                                }
                                                class="w-full bg-gray-700 rounded-lg px-4 py-2
                                                       border border-gray-600 focus:border-primary-500 focus:outline-none"
                                            />
                                        </div>
                                    }.into_view(),
                                    ResourceType::Consumable => view! {
                                        <div>
                                            <label class="block text-sm text-gray-400 mb-2">"Total Quantity"</label>
                                            <input
                                                type="number"
                                                min="1"
                                                prop:value=move || form.get().total_quantity
                                                on:input=move |ev| {
                                                    form.update(|f| f.total_quantity = event_target_value(&ev))
                                                }
                                                class="w-full bg-gray-700 rounded-lg px-4 py-2
                                                       border border-gray-600 focus:border-primary-500 focus:outline-none"
                                            />
                                        </div>
                                    }.into_view(),
                                    ResourceType::Exclusive => view! {}.into_view(),
                                }}

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
                                "Create Resource"
                            </button>
                        </form>
                    }.into_view()
                } else {
                    view! {}.into_view()
                }
            }}

            // Resource list
            {move || {
                if loading.get() {
                    view! { <Loading /> }.into_view()
                } else {
                    let rows = resources.get();
                    if rows.is_empty() {
                        view! {
                            <div class="bg-gray-800 rounded-xl p-6 text-center text-gray-400">
                                "No resources yet. Create your first one!"
                            </div>
                        }.into_view()
                    } else {
                        view! {
                            <div class="bg-gray-800 rounded-xl overflow-hidden">
                                <table class="w-full">
                                    <thead class="bg-gray-700 text-left text-sm text-gray-300">
                                        <tr>
                                            <th class="px-4 py-3">"Name"</th>
                                            <th class="px-4 py-3">"Type"</th>
                                            <th class="px-4 py-3">"Organization"</th>
                                            <th class="px-4 py-3">"Details"</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {rows.into_iter().map(|resource| view! {
                                            <ResourceRow resource=resource />
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

/// Single resource row
#[component]
fn ResourceRow(resource: Resource) -> impl IntoView {
    let details = match resource.kind {
        ResourceType::Shareable => resource
            .max_concurrent
            .map(|max| format!("Max concurrent: {}", max)),
        ResourceType::Consumable => resource
            .total_quantity
            .map(|total| format!("Total quantity: {}", total)),
        ResourceType::Exclusive => None,
    };

    view! {
        <tr class="border-t border-gray-700">
            <td class="px-4 py-3">{resource.name.clone()}</td>
            <td class="px-4 py-3">
                <span class="px-2 py-0.5 bg-gray-700 rounded-full text-sm capitalize">
                    {resource.kind.as_str()}
                </span>
            </td>
            <td class="px-4 py-3 text-gray-300">{resource.organization_label()}</td>
            <td class="px-4 py-3 text-gray-300">{details.unwrap_or_else(|| "-".to_string())}</td>
        </tr>
    }
}
