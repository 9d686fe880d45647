use yew::prelude::*;
use log::{info, Level};

mod config;
mod lead {
    pub mod draft;
    pub mod intake;
    pub mod store;
}
mod components {
    pub mod data_requirements_form;
}
mod pages {
    pub mod landing;
}

use pages::landing::Landing;

#[function_component]
fn App() -> Html {
    html! {
        <Landing />
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    config::warn_if_unconfigured();
    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
