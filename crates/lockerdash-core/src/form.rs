//! Structured customer form.
//!
//! All fields are collected together and validated before anything is sent,
//! so a cancelled or incomplete form never reaches the network.

use thiserror::Error;

use crate::api::{Customer, CustomerUpdate, NewCustomer};

/// Form validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("Invalid email address")]
    InvalidEmail,
}

/// Whether the form creates a customer or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: i64 },
}

/// Focusable form fields, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Username,
    Email,
    /// Edit-only switch that enables the password field.
    ChangePassword,
    Password,
}

/// Validated form content, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(NewCustomer),
    Update { id: i64, update: CustomerUpdate },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerForm {
    pub mode: FormMode,
    pub username: String,
    pub email: String,
    pub password: String,
    /// Edit mode only: send a new password.
    pub change_password: bool,
    pub focus: FormField,
    /// Last validation error, shown inline.
    pub error: Option<FormError>,
}

impl CustomerForm {
    pub const fn create() -> Self {
        Self {
            mode: FormMode::Create,
            username: String::new(),
            email: String::new(),
            password: String::new(),
            change_password: false,
            focus: FormField::Username,
            error: None,
        }
    }

    /// Edit form pre-filled from a freshly fetched record.
    pub fn edit(customer: &Customer) -> Self {
        Self {
            mode: FormMode::Edit { id: customer.id },
            username: customer.username.clone(),
            email: customer.email.clone(),
            ..Self::create()
        }
    }

    /// Fields reachable with Tab in the current mode.
    pub fn fields(&self) -> &'static [FormField] {
        match (self.mode, self.change_password) {
            (FormMode::Create, _) => &[FormField::Username, FormField::Email, FormField::Password],
            (FormMode::Edit { .. }, false) => {
                &[FormField::Username, FormField::Email, FormField::ChangePassword]
            }
            (FormMode::Edit { .. }, true) => &[
                FormField::Username,
                FormField::Email,
                FormField::ChangePassword,
                FormField::Password,
            ],
        }
    }

    pub fn focus_next(&mut self) {
        let fields = self.fields();
        let pos = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(pos + 1) % fields.len()];
    }

    pub fn focus_prev(&mut self) {
        let fields = self.fields();
        let pos = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(pos + fields.len() - 1) % fields.len()];
    }

    /// Text buffer of the focused field; `None` for the toggle.
    pub fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Username => Some(&mut self.username),
            FormField::Email => Some(&mut self.email),
            FormField::Password => Some(&mut self.password),
            FormField::ChangePassword => None,
        }
    }

    pub fn toggle_change_password(&mut self) {
        if matches!(self.mode, FormMode::Edit { .. }) {
            self.change_password = !self.change_password;
            if !self.change_password {
                self.password.clear();
            }
        }
    }

    /// Validate every field at once.
    pub fn submit(&self) -> Result<Submission, FormError> {
        let username = required("Username", &self.username)?;
        let email = required("Email", &self.email)?;
        if !email.contains('@') {
            return Err(FormError::InvalidEmail);
        }

        match self.mode {
            FormMode::Create => {
                if self.password.is_empty() {
                    return Err(FormError::Missing("Password"));
                }
                Ok(Submission::Create(NewCustomer {
                    username,
                    email,
                    password: self.password.clone(),
                }))
            }
            FormMode::Edit { id } => {
                let password = if self.change_password {
                    if self.password.is_empty() {
                        return Err(FormError::Missing("Password"));
                    }
                    Some(self.password.clone())
                } else {
                    None
                };
                Ok(Submission::Update {
                    id,
                    update: CustomerUpdate {
                        username: Some(username),
                        email: Some(email),
                        password,
                        active: None,
                    },
                })
            }
        }
    }
}

fn required(name: &'static str, value: &str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FormError::Missing(name))
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn filled() -> CustomerForm {
        CustomerForm {
            username: "ann".into(),
            email: "a@x.com".into(),
            password: "secret".into(),
            ..CustomerForm::create()
        }
    }

    #[test]
    fn complete_create_form_submits() {
        let Submission::Create(body) = filled().submit().unwrap() else {
            panic!("expected create");
        };
        assert_eq!(body.username, "ann");
        assert_eq!(body.password, "secret");
    }

    #[test]
    fn any_empty_create_field_is_rejected() {
        for field in ["username", "email", "password"] {
            let mut form = filled();
            match field {
                "username" => form.username.clear(),
                "email" => form.email = "   ".into(),
                _ => form.password.clear(),
            }
            assert!(
                matches!(form.submit(), Err(FormError::Missing(_))),
                "{field} empty should fail"
            );
        }
    }

    #[test]
    fn email_without_at_is_rejected() {
        let mut form = filled();
        form.email = "ann.example.com".into();
        assert_eq!(form.submit(), Err(FormError::InvalidEmail));
    }

    #[test]
    fn edit_prefills_and_omits_password_by_default() {
        let customer = Customer {
            id: 4,
            username: "zeynep".into(),
            email: "z@x.com".into(),
            active: true,
            role: None,
            created_at: None,
        };
        let form = CustomerForm::edit(&customer);
        assert_eq!(form.username, "zeynep");
        let Submission::Update { id, update } = form.submit().unwrap() else {
            panic!("expected update");
        };
        assert_eq!(id, 4);
        assert!(update.password.is_none());
        assert!(update.active.is_none());
    }

    #[test]
    fn edit_with_password_toggle_sends_password() {
        let customer = Customer {
            id: 4,
            username: "zeynep".into(),
            email: "z@x.com".into(),
            active: true,
            role: None,
            created_at: None,
        };
        let mut form = CustomerForm::edit(&customer);
        form.toggle_change_password();
        assert_eq!(form.submit(), Err(FormError::Missing("Password")));
        form.password = "n3w".into();
        let Submission::Update { update, .. } = form.submit().unwrap() else {
            panic!("expected update");
        };
        assert_eq!(update.password.as_deref(), Some("n3w"));
    }

    #[test]
    fn tab_order_depends_on_mode() {
        let mut form = CustomerForm::create();
        form.focus_next();
        form.focus_next();
        assert_eq!(form.focus, FormField::Password);
        form.focus_next();
        assert_eq!(form.focus, FormField::Username);
        form.focus_prev();
        assert_eq!(form.focus, FormField::Password);
    }

    #[test]
    fn toggle_is_ignored_on_create() {
        let mut form = CustomerForm::create();
        form.toggle_change_password();
        assert!(!form.change_password);
    }
}
