use yew::prelude::*;

use crate::components::data_requirements_form::DataRequirementsForm;

#[function_component(Landing)]
pub fn landing() -> Html {
    // Scroll to top only on initial mount
    use_effect_with_deps(
        move |_| {
            if let Some(window) = web_sys::window() {
                window.scroll_to_with_x_and_y(0.0, 0.0);
            }
            || ()
        },
        (),
    );

    html! {
        <main style="min-height: 100vh; display: flex; flex-direction: column; align-items: center; padding: 4rem 1rem; background: #f7f7f7;">
            <section style="width: 100%; max-width: 720px;">
                <span style="display: inline-block; padding: 0.4rem 1.2rem; border: 1px solid #fe5c02; border-radius: 999px; color: #fe5c02; font-size: 0.75rem;">
                    {"Data Collection Services"}
                </span>
                <h1 style="font-size: 2rem; margin: 1rem 0 0.5rem;">{"Tell Us About Your Data Needs"}</h1>
                <p style="color: #4b5563; margin-bottom: 2rem;">
                    {"Share your requirements and we'll get back to you within 24 hours."}
                </p>
                <DataRequirementsForm />
            </section>
        </main>
    }
}
