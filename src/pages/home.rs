use leptos::prelude::*;

use crate::components::arch_diagram::ArchDiagram;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<main class="portfolio-main">
				<header class="arch-header">
					<h2>"How This Site Runs"</h2>
					<p class="subtitle">
						"Click a component to see what it does and how it connects."
					</p>
				</header>
				<ArchDiagram />
			</main>
		</ErrorBoundary>
	}
}
