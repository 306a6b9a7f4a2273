use serde::Serialize;
use validator::{Validate, ValidationError, ValidationErrors};

use super::{birth_date_for_server, strip_hyphens, validate_birth_date, validate_phone_number};

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    #[validate(length(min = 1, message = "user id is required"))]
    pub user_id: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    #[validate(length(min = 4, max = 20, message = "user id must be 4-20 characters"))]
    pub user_id: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[serde(skip)]
    #[validate(must_match(other = "password", message = "passwords do not match"))]
    pub password_confirm: String,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,
    #[validate(custom(function = "validate_birth_date"))]
    pub birth_date: String,
}

impl SignupForm {
    /// Проверяет форму и приводит телефон и дату к серверному виду.
    pub fn prepare(mut self) -> Result<Self, ValidationErrors> {
        self.validate()?;
        self.phone_number = strip_hyphens(self.phone_number.trim());
        self.birth_date = birth_date_for_server(self.birth_date.trim());
        Ok(self)
    }
}

/// Редактирование профиля. Пароль меняется, только если он введён.
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "validate_password_confirmation"))]
pub struct ProfileForm {
    pub user_id: String,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,
    #[validate(custom(function = "validate_birth_date"))]
    pub birth_date: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: Option<String>,
    pub password_confirm: Option<String>,
}

fn validate_password_confirmation(form: &ProfileForm) -> Result<(), ValidationError> {
    if form.password.is_some() && form.password != form.password_confirm {
        return Err(ValidationError::new("password_confirm")
            .with_message("new passwords do not match".into()));
    }
    Ok(())
}

/// Тело `PUT /api/members/my`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub user_id: String,
    pub email: String,
    pub phone_number: String,
    pub birth_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ProfileForm {
    pub fn prepare(mut self) -> Result<ProfileUpdate, ValidationErrors> {
        // Пустое поле пароля означает «не менять»
        self.password = self.password.filter(|p| !p.is_empty());
        self.password_confirm = self.password_confirm.filter(|p| !p.is_empty());
        self.validate()?;

        Ok(ProfileUpdate {
            user_id: self.user_id,
            email: self.email,
            phone_number: strip_hyphens(self.phone_number.trim()),
            birth_date: birth_date_for_server(self.birth_date.trim()),
            password: self.password,
        })
    }
}

/// Телефон гостя для бронирования без входа.
#[derive(Debug, Clone, Validate)]
pub struct GuestContact {
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,
}

impl GuestContact {
    /// Проверенный номер в серверном виде (только цифры).
    pub fn parse(raw: &str) -> Result<String, ValidationErrors> {
        let contact = GuestContact { phone_number: raw.trim().to_string() };
        contact.validate()?;
        Ok(strip_hyphens(&contact.phone_number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup() -> SignupForm {
        SignupForm {
            user_id: "hong123".into(),
            password: "s3cretpass".into(),
            password_confirm: "s3cretpass".into(),
            email: "hong@example.com".into(),
            phone_number: "010-1234-5678".into(),
            birth_date: "1990-01-01".into(),
        }
    }

    #[test]
    fn signup_is_normalised() {
        let form = signup().prepare().unwrap();
        assert_eq!(form.phone_number, "01012345678");
        assert_eq!(form.birth_date, "19900101");

        let body = serde_json::to_value(&form).unwrap();
        assert!(body.get("passwordConfirm").is_none());
        assert_eq!(body["userId"], "hong123");
    }

    #[test]
    fn signup_rejects_short_or_mismatched_password() {
        let short = SignupForm { password: "short".into(), password_confirm: "short".into(), ..signup() };
        let errors = short.prepare().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));

        let mismatch = SignupForm { password_confirm: "different1".into(), ..signup() };
        let errors = mismatch.prepare().unwrap_err();
        assert!(errors.field_errors().contains_key("password_confirm"));
    }

    #[test]
    fn profile_without_password_omits_it() {
        let update = ProfileForm {
            user_id: "hong123".into(),
            email: "hong@example.com".into(),
            phone_number: "010-1234-5678".into(),
            birth_date: "1990-01-01".into(),
            password: Some(String::new()),
            password_confirm: None,
        }
        .prepare()
        .unwrap();

        assert_eq!(update.password, None);
        let body = serde_json::to_value(&update).unwrap();
        assert!(body.get("password").is_none());
        assert_eq!(body["phoneNumber"], "01012345678");
    }

    #[test]
    fn profile_password_must_be_confirmed() {
        let result = ProfileForm {
            user_id: "hong123".into(),
            email: "hong@example.com".into(),
            phone_number: "01012345678".into(),
            birth_date: "19900101".into(),
            password: Some("newpassword".into()),
            password_confirm: Some("newpasswort".into()),
        }
        .prepare();
        assert!(result.is_err());
    }

    #[test]
    fn guest_contact_strips_hyphens() {
        assert_eq!(GuestContact::parse(" 010-1234-5678 ").unwrap(), "01012345678");
        assert!(GuestContact::parse("   ").is_err());
    }
}
