use yew::prelude::*;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use wasm_bindgen_futures::spawn_local;
use gloo_timers::callback::Timeout;

use crate::lead::draft::{DraftField, FieldSet, HardwareOption, BUDGET_OPTIONS};
use crate::lead::intake::{self, IntakeForm, Notice};
use crate::lead::store::SupabaseStore;

const NOTICE_MS: u32 = 5_000;

#[function_component(DataRequirementsForm)]
pub fn data_requirements_form() -> Html {
    let form_ref = use_mut_ref(|| IntakeForm::new(FieldSet::WithPhone));
    let force = use_force_update();
    let notice = use_state(|| None::<Notice>);

    // Auto-dismiss the toast; a newer notice replaces the pending timeout.
    {
        let notice_setter = notice.clone();
        use_effect_with_deps(
            move |current: &Option<Notice>| {
                let timeout = current.map(|_| {
                    Timeout::new(NOTICE_MS, move || notice_setter.set(None))
                });
                move || drop(timeout)
            },
            *notice,
        );
    }

    let on_input = {
        let form = form_ref.clone();
        let force = force.clone();
        move |field: DraftField| {
            let form = form.clone();
            let force = force.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                form.borrow_mut().update_field(field, input.value());
                force.force_update();
            })
        }
    };

    let on_textarea = {
        let form = form_ref.clone();
        let force = force.clone();
        move |field: DraftField| {
            let form = form.clone();
            let force = force.clone();
            Callback::from(move |e: InputEvent| {
                let area: HtmlTextAreaElement = e.target_unchecked_into();
                form.borrow_mut().update_field(field, area.value());
                force.force_update();
            })
        }
    };

    let on_hardware = {
        let form = form_ref.clone();
        let force = force.clone();
        move |option: HardwareOption| {
            let form = form.clone();
            let force = force.clone();
            Callback::from(move |e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                form.borrow_mut().toggle_hardware_option(option, input.checked());
                force.force_update();
            })
        }
    };

    let on_budget = {
        let form = form_ref.clone();
        let force = force.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            form.borrow_mut().update_field(DraftField::BudgetRange, select.value());
            force.force_update();
        })
    };

    let onsubmit = {
        let form = form_ref.clone();
        let force = force.clone();
        let notice = notice.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form = form.clone();
            let force = force.clone();
            let notice = notice.clone();
            spawn_local(async move {
                let store = SupabaseStore::from_config();
                let started = force.clone();
                if let Some(outcome) = intake::submit(&form, &store, move || started.force_update()).await {
                    log::info!("Lead submission finished: {:?}", outcome);
                    notice.set(Some(outcome));
                }
                force.force_update();
            });
        })
    };

    let (draft, submitting, collects_phone) = {
        let form = form_ref.borrow();
        (form.draft().clone(), form.is_submitting(), form.field_set().collects_phone())
    };

    html! {
        <div class="requirements-card">
            <style>
            {r#".requirements-card {
                border-radius: 24px;
                overflow: hidden;
                box-shadow: 0 8px 32px rgba(0, 0, 0, 0.12);
                background: #fff;
                border: 1px solid #ececec;
            }
            .requirements-card form { padding: 2rem; display: flex; flex-direction: column; gap: 1.25rem; }
            .requirements-card input[type=text],
            .requirements-card input[type=email],
            .requirements-card input[type=tel],
            .requirements-card textarea,
            .requirements-card select {
                width: 100%;
                padding: 0.75rem 1rem;
                border-radius: 12px;
                border: 1px solid #d1d5db;
            }
            .hardware-grid { display: grid; grid-template-columns: repeat(2, 1fr); gap: 0.5rem; }
            .submit-button {
                padding: 0.75rem 1.5rem;
                border: none;
                border-radius: 999px;
                background: #fe5c02;
                color: #fff;
                font-weight: 500;
                cursor: pointer;
            }
            .submit-button:disabled { opacity: 0.6; cursor: not-allowed; }
            .toast { margin: 1rem 2rem 0; padding: 0.75rem 1rem; border-radius: 12px; }
            .toast-success { background: #e7f7ec; color: #14532d; }
            .toast-error { background: #fdecec; color: #7f1d1d; }"#}
            </style>
            {
                if let Some(current) = *notice {
                    let kind = if current.is_error() { "toast-error" } else { "toast-success" };
                    html! { <div class={classes!("toast", kind)} role="status">{ current.message() }</div> }
                } else {
                    html! {}
                }
            }
            <form onsubmit={onsubmit}>
                <h3>{"Personal Information"}</h3>
                <input type="text" name={DraftField::FullName.name()} placeholder="Name *"
                    value={draft.full_name.clone()} oninput={on_input(DraftField::FullName)} />
                <input type="email" name={DraftField::Email.name()} placeholder="Email address *"
                    value={draft.email.clone()} oninput={on_input(DraftField::Email)} />
                if collects_phone {
                    <input type="tel" name={DraftField::Phone.name()} placeholder="Phone number *"
                        value={draft.phone.clone()} oninput={on_input(DraftField::Phone)} />
                }
                <input type="text" name={DraftField::Company.name()} placeholder="Company *"
                    value={draft.company.clone()} oninput={on_input(DraftField::Company)} />
                <input type="text" name={DraftField::RoleTitle.name()} placeholder="Role/Title (optional)"
                    value={draft.role_title.clone()} oninput={on_input(DraftField::RoleTitle)} />

                <h3>{"Data Requirements"}</h3>
                <textarea name={DraftField::DataType.name()} rows="3"
                    placeholder="What type of data do you need? E.g., 'Bimanual manipulation data of robots assembling electronics'"
                    value={draft.data_type.clone()} oninput={on_textarea(DraftField::DataType)} />
                <textarea name={DraftField::DataAmount.name()} rows="3"
                    placeholder="How much data do you need? E.g., '5,000 successful demonstrations with diverse object configurations'"
                    value={draft.data_amount.clone()} oninput={on_textarea(DraftField::DataAmount)} />
                <textarea name={DraftField::Timeline.name()} rows="2"
                    placeholder="When do you need the data by? E.g., 'Within 6 weeks for our next training cycle'"
                    value={draft.timeline.clone()} oninput={on_textarea(DraftField::Timeline)} />

                <div>
                    <label>{"What hardware setup is required?"}</label>
                    <div class="hardware-grid">
                        { for HardwareOption::ALL.iter().map(|option| html! {
                            <label key={option.label()}>
                                <input type="checkbox" value={option.label()}
                                    checked={draft.is_selected(*option)}
                                    onchange={on_hardware(*option)} />
                                <span>{ option.label() }</span>
                            </label>
                        }) }
                    </div>
                </div>

                <textarea name={DraftField::AdditionalHardware.name()} rows="3"
                    placeholder="Additional hardware requirements - Describe any specific sensors, tools, or equipment needed"
                    value={draft.additional_hardware.clone()} oninput={on_textarea(DraftField::AdditionalHardware)} />

                <select name={DraftField::BudgetRange.name()} onchange={on_budget}>
                    <option value="" selected={draft.budget_range.is_empty()}>{"What's your budget range?"}</option>
                    { for BUDGET_OPTIONS.iter().map(|(code, label)| html! {
                        <option value={*code} selected={draft.budget_range == *code}>{ *label }</option>
                    }) }
                </select>

                <button type="submit" class="submit-button" disabled={submitting}>
                    { if submitting { "Submitting..." } else { "Submit" } }
                </button>
            </form>
        </div>
    }
}
