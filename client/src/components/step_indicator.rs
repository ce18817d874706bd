//! Numbered step dots for the login and signup wizards.

#[cfg(test)]
#[path = "step_indicator_test.rs"]
mod step_indicator_test;

use leptos::prelude::*;

/// CSS modifier for step `n` given the current step.
#[must_use]
pub fn step_class(n: usize, current: usize) -> &'static str {
    match n.cmp(&current) {
        std::cmp::Ordering::Less => "step step--done",
        std::cmp::Ordering::Equal => "step step--current",
        std::cmp::Ordering::Greater => "step",
    }
}

#[component]
pub fn StepIndicator(#[prop(into)] current: Signal<usize>, total: usize) -> impl IntoView {
    view! {
        <div class="steps">
            {(1..=total)
                .map(|n| {
                    view! {
                        <div class=move || step_class(n, current.get())>
                            {move || if n < current.get() { "✓".to_owned() } else { n.to_string() }}
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

