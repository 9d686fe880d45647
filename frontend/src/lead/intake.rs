use std::cell::RefCell;

use crate::lead::draft::{DraftField, FieldSet, HardwareOption, LeadDraft, NewLead};
use crate::lead::store::{FailureKind, LeadStore, StoreError};

/// The one message shown to the user for a submit attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    Submitted,
    MissingRequired,
    StoreNotConfigured,
    Unreachable,
    SubmitFailed,
    Unexpected,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::Submitted => "Your data requirements have been submitted! We'll get back to you within 24 hours.",
            Notice::MissingRequired => "Please fill in all required fields",
            Notice::StoreNotConfigured => "Our submission service isn't set up correctly yet. Please email hello@hyphenbox.com instead.",
            Notice::Unreachable => "We couldn't reach our servers. Check your connection and try again.",
            Notice::SubmitFailed => "Something went wrong while submitting. Please try again.",
            Notice::Unexpected => "An unexpected error occurred. Please try again.",
        }
    }

    pub fn is_error(self) -> bool {
        !matches!(self, Notice::Submitted)
    }
}

pub enum SubmitStart {
    /// Validation passed and the form is now submitting.
    Ready(NewLead),
    Rejected(Notice),
    /// A submission is already running; the attempt is ignored.
    InFlight,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IntakeForm {
    field_set: FieldSet,
    draft: LeadDraft,
    submitting: bool,
}

impl IntakeForm {
    pub fn new(field_set: FieldSet) -> Self {
        Self {
            field_set,
            draft: LeadDraft::default(),
            submitting: false,
        }
    }

    pub fn draft(&self) -> &LeadDraft {
        &self.draft
    }

    pub fn field_set(&self) -> FieldSet {
        self.field_set
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn update_field(&mut self, field: DraftField, value: String) {
        self.draft.set(field, value);
    }

    pub fn toggle_hardware_option(&mut self, option: HardwareOption, selected: bool) {
        self.draft.toggle_hardware(option, selected);
    }

    pub fn begin_submit(&mut self) -> SubmitStart {
        if self.submitting {
            return SubmitStart::InFlight;
        }
        if let Some(field) = self.draft.first_missing(self.field_set) {
            log::info!("Submit blocked, {} is empty", field.name());
            return SubmitStart::Rejected(Notice::MissingRequired);
        }
        self.submitting = true;
        SubmitStart::Ready(self.draft.to_new_lead(self.field_set))
    }

    /// Always clears the submitting flag. The draft is only reset on success.
    pub fn finish_submit(&mut self, outcome: Result<(), StoreError>) -> Notice {
        self.submitting = false;
        match outcome {
            Ok(()) => {
                self.draft = LeadDraft::default();
                Notice::Submitted
            }
            Err(e) => {
                log::error!("Lead submission failed: {}", e);
                match e.kind() {
                    FailureKind::Configuration => Notice::StoreNotConfigured,
                    FailureKind::Unreachable => Notice::Unreachable,
                    FailureKind::Other => Notice::SubmitFailed,
                    FailureKind::Unexpected => Notice::Unexpected,
                }
            }
        }
    }
}

/// Runs one submission against a form shared with the view. The borrow is not
/// held across the insert, so the view can render the submitting state;
/// `on_started` fires once the flag is set and before the insert is issued.
pub async fn submit<S: LeadStore>(
    form: &RefCell<IntakeForm>,
    store: &S,
    on_started: impl FnOnce(),
) -> Option<Notice> {
    let start = form.borrow_mut().begin_submit();
    let lead = match start {
        SubmitStart::Ready(lead) => lead,
        SubmitStart::Rejected(notice) => return Some(notice),
        SubmitStart::InFlight => return None,
    };
    on_started();

    let outcome = store.insert(&lead).await;
    let notice = form.borrow_mut().finish_submit(outcome);
    Some(notice)
}
