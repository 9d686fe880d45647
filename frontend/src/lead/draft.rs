use serde::{Serialize, Serializer};

/// Hardware setups a lead can tick, in the order the form shows them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HardwareOption {
    Umi,
    Aloha,
    CustomManipulator,
    MobileRobot,
    DepthCameras,
    MotionCapture,
    VrControllers,
    Other,
}

impl HardwareOption {
    pub const ALL: [HardwareOption; 8] = [
        HardwareOption::Umi,
        HardwareOption::Aloha,
        HardwareOption::CustomManipulator,
        HardwareOption::MobileRobot,
        HardwareOption::DepthCameras,
        HardwareOption::MotionCapture,
        HardwareOption::VrControllers,
        HardwareOption::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HardwareOption::Umi => "UMI",
            HardwareOption::Aloha => "ALOHA",
            HardwareOption::CustomManipulator => "Custom Manipulator",
            HardwareOption::MobileRobot => "Mobile Robot",
            HardwareOption::DepthCameras => "Depth Cameras",
            HardwareOption::MotionCapture => "Motion Capture",
            HardwareOption::VrControllers => "VR Controllers",
            HardwareOption::Other => "Other (please specify)",
        }
    }
}

impl Serialize for HardwareOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Budget select options as `(code, label)`. The code is what gets stored.
pub const BUDGET_OPTIONS: [(&str, &str); 5] = [
    ("under-10k", "Under $10k"),
    ("10k-50k", "$10k-$50k"),
    ("50k-100k", "$50k-$100k"),
    ("100k-plus", "$100k+"),
    ("discuss", "Let's discuss"),
];

/// Which contact fields the form collects. Phone was added as a fourth
/// required field after launch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldSet {
    Core,
    WithPhone,
}

impl FieldSet {
    pub fn required(self) -> &'static [DraftField] {
        match self {
            FieldSet::Core => &[DraftField::FullName, DraftField::Email, DraftField::Company],
            FieldSet::WithPhone => &[
                DraftField::FullName,
                DraftField::Email,
                DraftField::Phone,
                DraftField::Company,
            ],
        }
    }

    pub fn collects_phone(self) -> bool {
        matches!(self, FieldSet::WithPhone)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftField {
    FullName,
    Email,
    Phone,
    Company,
    RoleTitle,
    DataType,
    DataAmount,
    Timeline,
    AdditionalHardware,
    BudgetRange,
}

impl DraftField {
    /// Value of the `name` attribute on the matching form control.
    pub fn name(self) -> &'static str {
        match self {
            DraftField::FullName => "fullName",
            DraftField::Email => "email",
            DraftField::Phone => "phone",
            DraftField::Company => "company",
            DraftField::RoleTitle => "roleTitle",
            DraftField::DataType => "dataType",
            DraftField::DataAmount => "dataAmount",
            DraftField::Timeline => "timeline",
            DraftField::AdditionalHardware => "additionalHardware",
            DraftField::BudgetRange => "budgetRange",
        }
    }
}

/// In-memory form state before submission.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LeadDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub role_title: String,
    pub data_type: String,
    pub data_amount: String,
    pub timeline: String,
    pub hardware_setup: Vec<HardwareOption>,
    pub additional_hardware: String,
    pub budget_range: String,
}

impl LeadDraft {
    fn slot(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::FullName => &mut self.full_name,
            DraftField::Email => &mut self.email,
            DraftField::Phone => &mut self.phone,
            DraftField::Company => &mut self.company,
            DraftField::RoleTitle => &mut self.role_title,
            DraftField::DataType => &mut self.data_type,
            DraftField::DataAmount => &mut self.data_amount,
            DraftField::Timeline => &mut self.timeline,
            DraftField::AdditionalHardware => &mut self.additional_hardware,
            DraftField::BudgetRange => &mut self.budget_range,
        }
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::FullName => &self.full_name,
            DraftField::Email => &self.email,
            DraftField::Phone => &self.phone,
            DraftField::Company => &self.company,
            DraftField::RoleTitle => &self.role_title,
            DraftField::DataType => &self.data_type,
            DraftField::DataAmount => &self.data_amount,
            DraftField::Timeline => &self.timeline,
            DraftField::AdditionalHardware => &self.additional_hardware,
            DraftField::BudgetRange => &self.budget_range,
        }
    }

    pub fn set(&mut self, field: DraftField, value: String) {
        *self.slot(field) = value;
    }

    pub fn is_selected(&self, option: HardwareOption) -> bool {
        self.hardware_setup.contains(&option)
    }

    pub fn toggle_hardware(&mut self, option: HardwareOption, selected: bool) {
        if selected {
            if !self.is_selected(option) {
                self.hardware_setup.push(option);
            }
        } else {
            self.hardware_setup.retain(|o| *o != option);
        }
    }

    /// Raw emptiness check; whitespace counts as a value.
    pub fn first_missing(&self, field_set: FieldSet) -> Option<DraftField> {
        field_set
            .required()
            .iter()
            .copied()
            .find(|field| self.get(*field).is_empty())
    }

    pub fn to_new_lead(&self, field_set: FieldSet) -> NewLead {
        NewLead {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone: field_set.collects_phone().then(|| self.phone.clone()),
            company: self.company.clone(),
            role_title: optional(&self.role_title),
            data_type: optional(&self.data_type),
            data_amount: optional(&self.data_amount),
            timeline: optional(&self.timeline),
            hardware_setup: if self.hardware_setup.is_empty() {
                None
            } else {
                Some(self.hardware_setup.clone())
            },
            additional_hardware: optional(&self.additional_hardware),
            budget_range: optional(&self.budget_range),
        }
    }
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Insert payload for the `data_requirements` table. Empty optionals go out as
/// explicit `null`s so the row records "no data" rather than "".
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewLead {
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub company: String,
    pub role_title: Option<String>,
    pub data_type: Option<String>,
    pub data_amount: Option<String>,
    pub timeline: Option<String>,
    pub hardware_setup: Option<Vec<HardwareOption>>,
    pub additional_hardware: Option<String>,
    pub budget_range: Option<String>,
}
