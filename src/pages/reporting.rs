//! Reporting Page
//!
//! Six tabbed report views. Two of them take a bounded slider parameter;
//! dragging updates the label immediately and the report reloads when the
//! slider is released. Loads are generation-guarded so a slow response for
//! an earlier tab or threshold never overwrites a fresher one.

use leptos::*;

use crate::api;
use crate::components::Loading;
use crate::reports::{Report, ReportKind};
use crate::state::LoadGeneration;

/// Reporting page with tabbed views
#[component]
pub fn Reporting() -> impl IntoView {
    let active_tab = create_rw_signal(ReportKind::DoubleBookedUsers);
    let (report, set_report) = create_signal(None::<Report>);
    let (loading, set_loading) = create_signal(true);

    // Per-report slider values, kept across tab switches
    let (threshold, set_threshold) = create_signal(
        ReportKind::ExternalAttendees.threshold().map(|s| s.default).unwrap_or(0),
    );
    let (min_usage, set_min_usage) = create_signal(
        ReportKind::UnderutilizedResources.threshold().map(|s| s.default).unwrap_or(0),
    );

    let generation = store_value(LoadGeneration::default());

    let load = move || {
        let kind = active_tab.get_untracked();
        let param = match kind {
            ReportKind::ExternalAttendees => threshold.get_untracked(),
            ReportKind::UnderutilizedResources => min_usage.get_untracked(),
            _ => 0,
        };
        let token = generation.with_value(|g| g.begin());

        spawn_local(async move {
            set_loading.set(true);

            let result = api::fetch_report(kind, param).await;

            // A newer load has started; drop this response.
            if !generation.with_value(|g| g.is_current(token)) {
                return;
            }

            match result {
                Ok(loaded) => set_report.set(Some(loaded)),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to load report: {}", e).into());
                    set_report.set(Some(Report::empty(kind)));
                }
            }
            set_loading.set(false);
        });
    };

    // Initial load
    create_effect(move |_| {
        load();
    });

    let select_tab = move |kind: ReportKind| {
        if active_tab.get_untracked() == kind {
            return;
        }
        active_tab.set(kind);
        set_report.set(None);
        load();
    };

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"Reporting"</h1>
                <p class="text-gray-400 mt-1">"Scheduling conflicts and utilization insights"</p>
            </div>

            // Tab bar
            <div class="flex flex-wrap gap-2">
                {ReportKind::ALL.into_iter().map(|kind| view! {
                    <button
                        on:click=move |_| select_tab(kind)
                        class=move || {
                            if active_tab.get() == kind {
                                "px-4 py-2 bg-primary-600 rounded-lg font-medium transition-colors"
                            } else {
                                "px-4 py-2 bg-gray-800 hover:bg-gray-700 rounded-lg font-medium transition-colors"
                            }
                        }
                    >
                        {kind.label()}
                    </button>
                }).collect_view()}
            </div>

            // Slider for the parameterized reports
            {move || {
                let kind = active_tab.get();
                kind.threshold().map(|spec| {
                    let (value, set_value) = match kind {
                        ReportKind::UnderutilizedResources => (min_usage, set_min_usage),
                        _ => (threshold, set_threshold),
                    };

                    view! {
                        <div class="bg-gray-800 rounded-xl p-4 flex items-center space-x-4">
                            <label class="text-sm text-gray-400 whitespace-nowrap">
                                {spec.label} ": " {move || value.get()}
                            </label>
                            <input
                                type="range"
                                min=spec.min
                                max=spec.max
                                prop:value=move || value.get().to_string()
                                on:input=move |ev| {
                                    if let Ok(raw) = event_target_value(&ev).parse::<i64>() {
                                        set_value.set(spec.clamp(raw));
                                    }
                                }
                                on:change=move |_| load()
                                class="flex-1 accent-primary-600"
                            />
                        </div>
                    }
                })
            }}

            // Report table
            {move || {
                if loading.get() {
                    view! { <Loading /> }.into_view()
                } else {
                    match report.get() {
                        Some(loaded) if !loaded.is_empty() => {
                            let columns = loaded.kind().columns();
                            view! {
                                <div class="bg-gray-800 rounded-xl overflow-hidden">
                                    <table class="w-full">
                                        <thead class="bg-gray-700 text-left text-sm text-gray-300">
                                            <tr>
                                                {columns.iter().map(|column| view! {
                                                    <th class="px-4 py-3">{*column}</th>
                                                }).collect_view()}
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {loaded.cells().into_iter().map(|row| view! {
                                                <tr class="border-t border-gray-700">
                                                    {row.into_iter().map(|cell| view! {
                                                        <td class="px-4 py-3 text-gray-300">{cell}</td>
                                                    }).collect_view()}
                                                </tr>
                                            }).collect_view()}
                                        </tbody>
                                    </table>
                                </div>
                            }.into_view()
                        }
                        _ => view! {
                            <div class="bg-gray-800 rounded-xl p-6 text-center text-gray-400">
                                "No data available"
                            </div>
                        }.into_view(),
                    }
                }
            }}
        </div>
    }
}
