//! Form values, validation and submission state.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{LoginRequest, RegisterRequest, UpdateUserRequest, User};

pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";

const MIN_PASSWORD_LEN: usize = 6;

/// Validation messages keyed by field.
pub type FieldErrors<F> = BTreeMap<F, String>;

/// A set of named inputs with its own validation rules.
pub trait FormModel: Clone {
    type Field: Copy + Ord + std::fmt::Debug + 'static;

    fn fields() -> &'static [Self::Field];

    fn value(&self, field: Self::Field) -> &str;

    fn set(&mut self, field: Self::Field, value: String);

    fn validate(&self) -> FieldErrors<Self::Field>;
}

/// Values, errors and interaction state of one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState<M: FormModel> {
    initial: M,
    values: M,
    errors: FieldErrors<M::Field>,
    touched: BTreeSet<M::Field>,
    submitting: bool,
}

impl<M: FormModel> FormState<M> {
    pub fn new(initial: M) -> Self {
        Self {
            values: initial.clone(),
            initial,
            errors: BTreeMap::new(),
            touched: BTreeSet::new(),
            submitting: false,
        }
    }

    pub fn values(&self) -> &M {
        &self.values
    }

    pub fn value(&self, field: M::Field) -> &str {
        self.values.value(field)
    }

    pub fn errors(&self) -> &FieldErrors<M::Field> {
        &self.errors
    }

    pub fn error(&self, field: M::Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_touched(&self, field: M::Field) -> bool {
        self.touched.contains(&field)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Record an edit. Any error shown for the field is cleared.
    pub fn change(&mut self, field: M::Field, value: impl Into<String>) {
        self.values.set(field, value.into());
        self.errors.remove(&field);
    }

    /// Overwrite a value without touching errors.
    pub fn set_value(&mut self, field: M::Field, value: impl Into<String>) {
        self.values.set(field, value.into());
    }

    /// Mark `field` as visited and surface its validation error, if any.
    pub fn blur(&mut self, field: M::Field) {
        self.touched.insert(field);
        if let Some(message) = self.values.validate().remove(&field) {
            self.errors.insert(field, message);
        }
    }

    /// Validate every field. Returns `true` and enters the submitting state
    /// when the form may be sent.
    pub fn submit(&mut self) -> bool {
        self.errors = self.values.validate();
        self.touched = M::fields().iter().copied().collect();
        if self.errors.is_empty() {
            self.submitting = true;
            true
        } else {
            false
        }
    }

    /// Leave the submitting state once the request settled.
    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.initial.clone());
    }
}

fn require<F: Ord>(errors: &mut FieldErrors<F>, field: F, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.insert(field, format!("{label} is required"));
    }
}

fn check_new_password<F: Ord>(
    errors: &mut FieldErrors<F>,
    password: (F, &str),
    confirmation: (F, &str),
) {
    if password.1 != confirmation.1 {
        errors.insert(confirmation.0, PASSWORDS_DO_NOT_MATCH.to_string());
    }
    if !password.1.is_empty() && password.1.chars().count() < MIN_PASSWORD_LEN {
        errors.insert(password.0, PASSWORD_TOO_SHORT.to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

impl FormModel for LoginForm {
    type Field = LoginField;

    fn fields() -> &'static [LoginField] {
        &[LoginField::Email, LoginField::Password]
    }

    fn value(&self, field: LoginField) -> &str {
        match field {
            LoginField::Email => &self.email,
            LoginField::Password => &self.password,
        }
    }

    fn set(&mut self, field: LoginField, value: String) {
        match field {
            LoginField::Email => self.email = value,
            LoginField::Password => self.password = value,
        }
    }

    fn validate(&self) -> FieldErrors<LoginField> {
        let mut errors = BTreeMap::new();
        require(&mut errors, LoginField::Email, &self.email, "Email");
        require(&mut errors, LoginField::Password, &self.password, "Password");
        errors
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RegistrationField {
    Name,
    Email,
    Password,
    ConfirmPassword,
    DateOfBirth,
    DeviceId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub date_of_birth: String,
    pub device_id: String,
}

impl RegistrationForm {
    /// The request body; the confirmation never leaves the form.
    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            date_of_birth: self.date_of_birth.clone(),
            device_id: self.device_id.trim().to_string(),
        }
    }
}

impl FormModel for RegistrationForm {
    type Field = RegistrationField;

    fn fields() -> &'static [RegistrationField] {
        use RegistrationField::{ConfirmPassword, DateOfBirth, DeviceId, Email, Name, Password};
        &[Name, Email, Password, ConfirmPassword, DateOfBirth, DeviceId]
    }

    fn value(&self, field: RegistrationField) -> &str {
        match field {
            RegistrationField::Name => &self.name,
            RegistrationField::Email => &self.email,
            RegistrationField::Password => &self.password,
            RegistrationField::ConfirmPassword => &self.confirm_password,
            RegistrationField::DateOfBirth => &self.date_of_birth,
            RegistrationField::DeviceId => &self.device_id,
        }
    }

    fn set(&mut self, field: RegistrationField, value: String) {
        match field {
            RegistrationField::Name => self.name = value,
            RegistrationField::Email => self.email = value,
            RegistrationField::Password => self.password = value,
            RegistrationField::ConfirmPassword => self.confirm_password = value,
            RegistrationField::DateOfBirth => self.date_of_birth = value,
            RegistrationField::DeviceId => self.device_id = value,
        }
    }

    fn validate(&self) -> FieldErrors<RegistrationField> {
        let mut errors = BTreeMap::new();
        require(&mut errors, RegistrationField::Name, &self.name, "Name");
        require(&mut errors, RegistrationField::Email, &self.email, "Email");
        require(&mut errors, RegistrationField::Password, &self.password, "Password");
        require(
            &mut errors,
            RegistrationField::DateOfBirth,
            &self.date_of_birth,
            "Date of birth",
        );
        require(&mut errors, RegistrationField::DeviceId, &self.device_id, "Device ID");
        check_new_password(
            &mut errors,
            (RegistrationField::Password, &self.password),
            (RegistrationField::ConfirmPassword, &self.confirm_password),
        );
        errors
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProfileField {
    Name,
    Email,
    DateOfBirth,
    DeviceId,
    Password,
    ConfirmPassword,
}

/// Editable copy of the signed-in user's profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub date_of_birth: String,
    pub device_id: String,
    /// Left blank to keep the current password.
    pub password: String,
    pub confirm_password: String,
}

impl ProfileForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            date_of_birth: user.date_of_birth.clone(),
            device_id: user.device_id.clone(),
            password: String::new(),
            confirm_password: String::new(),
        }
    }

    /// Fields that differ from `user`. Blank inputs are never sent; a new
    /// password is sent whenever one is given.
    pub fn changes(&self, user: &User) -> UpdateUserRequest {
        fn changed(value: &str, current: &str) -> Option<String> {
            (!value.is_empty() && value != current).then(|| value.to_string())
        }

        UpdateUserRequest {
            name: changed(&self.name, &user.name),
            email: changed(&self.email, &user.email),
            password: (!self.password.is_empty()).then(|| self.password.clone()),
            date_of_birth: changed(&self.date_of_birth, &user.date_of_birth),
            device_id: changed(&self.device_id, &user.device_id),
        }
    }

    /// Blank both password inputs after a successful save.
    pub fn clear_passwords(state: &mut FormState<Self>) {
        state.set_value(ProfileField::Password, "");
        state.set_value(ProfileField::ConfirmPassword, "");
    }
}

impl FormModel for ProfileForm {
    type Field = ProfileField;

    fn fields() -> &'static [ProfileField] {
        use ProfileField::{ConfirmPassword, DateOfBirth, DeviceId, Email, Name, Password};
        &[Name, Email, DateOfBirth, DeviceId, Password, ConfirmPassword]
    }

    fn value(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::Email => &self.email,
            ProfileField::DateOfBirth => &self.date_of_birth,
            ProfileField::DeviceId => &self.device_id,
            ProfileField::Password => &self.password,
            ProfileField::ConfirmPassword => &self.confirm_password,
        }
    }

    fn set(&mut self, field: ProfileField, value: String) {
        match field {
            ProfileField::Name => self.name = value,
            ProfileField::Email => self.email = value,
            ProfileField::DateOfBirth => self.date_of_birth = value,
            ProfileField::DeviceId => self.device_id = value,
            ProfileField::Password => self.password = value,
            ProfileField::ConfirmPassword => self.confirm_password = value,
        }
    }

    fn validate(&self) -> FieldErrors<ProfileField> {
        let mut errors = BTreeMap::new();
        if !self.password.is_empty() {
            check_new_password(
                &mut errors,
                (ProfileField::Password, &self.password),
                (ProfileField::ConfirmPassword, &self.confirm_password),
            );
        }
        errors
    }
}
