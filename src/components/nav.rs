//! Navigation Component
//!
//! Header bar with the brand and one link per page. The active link is
//! derived from the current route path; the root path counts as the
//! events page, which is also what the router renders there.

use leptos::*;
use leptos_router::*;

const LINKS: [(&str, &str); 4] = [
    ("/events", "Events"),
    ("/resources", "Resources"),
    ("/attendance", "Attendance"),
    ("/reporting", "Reporting"),
];

/// Whether `href` is the page the given route path shows.
fn is_active(path: &str, href: &str) -> bool {
    path == href || (href == "/events" && path == "/")
}

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let pathname = use_location().pathname;

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Brand
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-2xl">"📅"</span>
                        <span class="text-xl font-bold text-white">"EventDesk"</span>
                    </A>

                    // Page links; the router intercepts local anchors,
                    // so these navigate client-side
                    <div class="flex items-center space-x-1">
                        {LINKS.into_iter().map(|(href, label)| view! {
                            <a
                                href=href
                                class=move || {
                                    if is_active(&pathname.get(), href) {
                                        "px-4 py-2 rounded-lg bg-gray-700 text-white"
                                    } else {
                                        "px-4 py-2 rounded-lg text-gray-300 \
                                         hover:text-white hover:bg-gray-700 transition-colors"
                                    }
                                }
                            >
                                {label}
                            </a>
                        }).collect_view()}
                    </div>
                </div>
            </div>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_highlights_events() {
        assert!(is_active("/", "/events"));
        assert!(!is_active("/", "/reporting"));
    }

    #[test]
    fn test_each_link_matches_only_its_own_path() {
        for (href, _) in LINKS {
            for (other, _) in LINKS {
                assert_eq!(is_active(other, href), href == other);
            }
        }
    }
}
