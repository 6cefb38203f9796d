//! The single add/view/edit form of the dashboard.
//!
//! Only `Adding` and `Editing` accept submissions. A successful submit
//! returns the editor to `Closed`; a failed one leaves it open so the
//! user keeps what they typed.

use crate::models::{Billing, RecordId, Status, SubscriptionDraft, SubscriptionRecord, parse_renewal};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("price must be a non-negative number, got '{0}'")]
    Price(String),

    #[error("renewal date '{0}' is not a valid date")]
    RenewalDate(String),

    #[error("billing must be Monthly or Yearly, got '{0}'")]
    Billing(String),

    #[error("status must be Active or Expired, got '{0}'")]
    Status(String),
}

/// Opening a form while another one is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a form is already open ({0:?}); close it first")]
pub struct EditorBusy(pub EditorMode);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum EditorMode {
    #[default]
    Closed,
    Adding,
    Viewing,
    Editing,
}

/// Raw form values, as the browser sends them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubscriptionForm {
    pub id: String,
    pub name: String,
    pub category: String,
    pub billing: String,
    pub price: String,
    pub renewal_date: String,
    pub status: String,
}

impl Default for SubscriptionForm {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            category: String::new(),
            billing: "Monthly".to_string(),
            price: String::new(),
            renewal_date: String::new(),
            status: "Active".to_string(),
        }
    }
}

impl From<&SubscriptionRecord> for SubscriptionForm {
    fn from(record: &SubscriptionRecord) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name.clone(),
            category: record.category.clone(),
            billing: format!("{:?}", record.billing),
            price: record.price.to_string(),
            renewal_date: record.renewal_date.clone(),
            status: format!("{:?}", record.status),
        }
    }
}

impl SubscriptionForm {
    pub fn validate(&self) -> Result<SubscriptionDraft, ValidationError> {
        let name = required("name", &self.name)?;
        let category = required("category", &self.category)?;
        let renewal_date = required("renewal date", &self.renewal_date)?;
        let price_text = required("price", &self.price)?;

        let price = price_text
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite() && *price >= 0.0)
            .ok_or_else(|| ValidationError::Price(price_text.clone()))?;
        let billing =
            Billing::parse(&self.billing).ok_or_else(|| ValidationError::Billing(self.billing.clone()))?;
        let status =
            Status::parse(&self.status).ok_or_else(|| ValidationError::Status(self.status.clone()))?;

        let draft = SubscriptionDraft {
            name,
            category,
            billing,
            price,
            renewal_date,
            status,
        };
        validate_draft(&draft)?;
        Ok(draft)
    }
}

/// Checks applied to every draft before it is sent upstream.
pub fn validate_draft(draft: &SubscriptionDraft) -> Result<(), ValidationError> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::Missing("name"));
    }
    if draft.category.trim().is_empty() {
        return Err(ValidationError::Missing("category"));
    }
    if !draft.price.is_finite() || draft.price < 0.0 {
        return Err(ValidationError::Price(draft.price.to_string()));
    }
    if parse_renewal(&draft.renewal_date).is_none() {
        return Err(ValidationError::RenewalDate(draft.renewal_date.clone()));
    }
    if draft.status == Status::Other {
        return Err(ValidationError::Status("Other".to_string()));
    }
    Ok(())
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(trimmed.to_string())
}

/// What a submit asks the record manager to do.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAction {
    None,
    Create(SubscriptionDraft),
    Update(RecordId, SubscriptionDraft),
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Editor {
    mode: EditorMode,
    form: SubscriptionForm,
}

impl Editor {
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn form(&self) -> &SubscriptionForm {
        &self.form
    }

    pub fn open_add(&mut self) -> Result<(), EditorBusy> {
        self.open(EditorMode::Adding, SubscriptionForm::default())
    }

    pub fn open_view(&mut self, record: &SubscriptionRecord) -> Result<(), EditorBusy> {
        self.open(EditorMode::Viewing, SubscriptionForm::from(record))
    }

    pub fn open_edit(&mut self, record: &SubscriptionRecord) -> Result<(), EditorBusy> {
        self.open(EditorMode::Editing, SubscriptionForm::from(record))
    }

    /// Forms only open from `Closed`; an open form is never replaced.
    fn open(&mut self, mode: EditorMode, form: SubscriptionForm) -> Result<(), EditorBusy> {
        if self.mode != EditorMode::Closed {
            return Err(EditorBusy(self.mode));
        }
        self.form = form;
        self.mode = mode;
        Ok(())
    }

    pub fn close(&mut self) {
        self.mode = EditorMode::Closed;
        self.form = SubscriptionForm::default();
    }

    /// Records the submitted values and works out the upstream call.
    ///
    /// In `Editing` the id always comes from the record that was opened,
    /// never from the submitted form.
    pub fn submit(&mut self, values: SubscriptionForm) -> Result<SubmitAction, ValidationError> {
        match self.mode {
            EditorMode::Closed | EditorMode::Viewing => Ok(SubmitAction::None),
            EditorMode::Adding => {
                self.form = SubscriptionForm {
                    id: String::new(),
                    ..values
                };
                Ok(SubmitAction::Create(self.form.validate()?))
            }
            EditorMode::Editing => {
                let id = RecordId::new(self.form.id.clone());
                self.form = SubscriptionForm {
                    id: self.form.id.clone(),
                    ..values
                };
                Ok(SubmitAction::Update(id, self.form.validate()?))
            }
        }
    }
}
