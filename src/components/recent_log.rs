//! Recent Log Component
//!
//! Last few records kept by the rolling logger, newest at the bottom.
//! Read once when mounted.

use leptos::prelude::*;

#[component]
pub fn RecentLog(limit: usize) -> impl IntoView {
    let lines: Vec<String> = rolling_logger::recent_tail(limit)
        .iter()
        .map(|line| line.to_string())
        .collect();

    view! {
        <pre class="recent-log">
            {lines.into_iter().map(|line| view! { <div class="log-line">{line}</div> }).collect_view()}
        </pre>
    }
}
