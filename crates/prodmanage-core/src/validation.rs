//! Client-side form validation.
//!
//! Each validator returns the first failing message per field, keyed by the
//! field's wire name (`fullName`, `confirmPassword`, ...) so the map lines up
//! with the backend's own `errors` object. An empty map means the form may
//! be submitted.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

use prodmanage_types::{LoginForm, ProductFormData, ProductPatch, RegistrationForm};
use regex::Regex;
use url::Url;

pub type FieldErrors = BTreeMap<String, String>;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
const MIN_PASSWORD_LEN: usize = 6;
const MIN_FULL_NAME_LEN: usize = 2;
const PHONE_DIGITS: RangeInclusive<usize> = 10..=15;

static EMAIL_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).ok());

pub fn validate_product(form: &ProductFormData) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_title(&mut errors, &form.title);
    check_image(&mut errors, &form.image);
    check_description(&mut errors, &form.description);
    check_price(&mut errors, form.price);
    errors
}

/// Checks only the fields present in `patch`.
pub fn validate_patch(patch: &ProductPatch) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Some(title) = &patch.title {
        check_title(&mut errors, title);
    }
    if let Some(image) = &patch.image {
        check_image(&mut errors, image);
    }
    if let Some(description) = &patch.description {
        check_description(&mut errors, description);
    }
    if let Some(price) = patch.price {
        check_price(&mut errors, price);
    }
    errors
}

/// Validates a login form as it will be submitted, i.e. after
/// [`normalize_login`].
pub fn validate_login(form: &LoginForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_email(&mut errors, &form.email);
    check_password(&mut errors, &form.password);
    errors
}

/// Validates a registration form as it will be submitted, i.e. after
/// [`normalize_registration`].
pub fn validate_registration(form: &RegistrationForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let full_name = form.full_name.trim();
    if full_name.is_empty() {
        insert(&mut errors, "fullName", "Full Name is required");
    } else if full_name.chars().count() < MIN_FULL_NAME_LEN {
        insert(
            &mut errors,
            "fullName",
            "Full Name must be at least 2 characters long",
        );
    }

    check_email(&mut errors, &form.email);

    if form.phone.trim().is_empty() {
        insert(&mut errors, "phone", "Phone number is required");
    } else {
        let digits = form.phone.chars().filter(char::is_ascii_digit).count();
        if !PHONE_DIGITS.contains(&digits) {
            insert(&mut errors, "phone", "Phone must contain 10 to 15 digits only");
        }
    }

    check_password(&mut errors, &form.password);

    if form.confirm_password.is_empty() {
        insert(
            &mut errors,
            "confirmPassword",
            "Confirm Password is required",
        );
    } else if form.confirm_password != form.password {
        insert(&mut errors, "confirmPassword", "Passwords do not match");
    }

    errors
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn normalize_login(form: LoginForm) -> LoginForm {
    LoginForm {
        email: normalize_email(&form.email),
        password: form.password,
    }
}

/// Trims the title and image URL, leaving the description as typed.
pub fn normalize_product(form: ProductFormData) -> ProductFormData {
    ProductFormData {
        title: form.title.trim().to_string(),
        image: form.image.trim().to_string(),
        ..form
    }
}

/// Trims whichever of the title and image URL the patch carries.
pub fn normalize_patch(patch: ProductPatch) -> ProductPatch {
    ProductPatch {
        title: patch.title.map(|title| title.trim().to_string()),
        image: patch.image.map(|image| image.trim().to_string()),
        ..patch
    }
}

pub fn normalize_registration(form: RegistrationForm) -> RegistrationForm {
    RegistrationForm {
        full_name: form.full_name.trim().to_string(),
        email: normalize_email(&form.email),
        ..form
    }
}

/// True for absolute http(s)/ftp URLs with a host.
pub fn is_valid_url(value: &str) -> bool {
    Url::parse(value).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https" | "ftp") && url.host_str().is_some()
    })
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(value))
}

fn check_title(errors: &mut FieldErrors, title: &str) {
    if title.trim().is_empty() {
        insert(errors, "title", "Title is required");
    }
}

fn check_image(errors: &mut FieldErrors, image: &str) {
    if image.trim().is_empty() {
        insert(errors, "image", "Image URL is required");
    } else if !is_valid_url(image) {
        insert(errors, "image", "Must be a valid URL");
    }
}

fn check_description(errors: &mut FieldErrors, description: &str) {
    if description.trim().is_empty() {
        insert(errors, "description", "Description is required");
    }
}

fn check_price(errors: &mut FieldErrors, price: f64) {
    if !price.is_finite() || price <= 0.0 {
        insert(errors, "price", "Price must be a positive number");
    }
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    if email.is_empty() {
        insert(errors, "email", "Email is required");
    } else if !is_valid_email(email) {
        insert(errors, "email", "Must be a valid email format");
    }
}

fn check_password(errors: &mut FieldErrors, password: &str) {
    if password.is_empty() {
        insert(errors, "password", "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        insert(
            errors,
            "password",
            "Password must be at least 6 characters long",
        );
    }
}

fn insert(errors: &mut FieldErrors, field: &str, message: &str) {
    errors
        .entry(field.to_string())
        .or_insert_with(|| message.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> RegistrationForm {
        RegistrationForm {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        }
    }

    #[test]
    fn test_valid_product_passes() {
        let form = ProductFormData {
            title: "A".to_string(),
            image: "http://x/1.png".to_string(),
            description: "d".to_string(),
            price: 9.99,
        };
        assert!(validate_product(&form).is_empty());
    }

    #[test]
    fn test_product_messages() {
        let form = ProductFormData {
            title: "  ".to_string(),
            image: "not a url".to_string(),
            description: String::new(),
            price: 0.0,
        };

        let errors = validate_product(&form);
        assert_eq!(errors["title"], "Title is required");
        assert_eq!(errors["image"], "Must be a valid URL");
        assert_eq!(errors["description"], "Description is required");
        assert_eq!(errors["price"], "Price must be a positive number");

        let errors = validate_product(&ProductFormData {
            image: String::new(),
            price: f64::NAN,
            ..form.clone()
        });
        assert_eq!(errors["image"], "Image URL is required");
        assert_eq!(errors["price"], "Price must be a positive number");

        let errors = validate_product(&ProductFormData {
            price: f64::INFINITY,
            ..form
        });
        assert_eq!(errors["price"], "Price must be a positive number");
    }

    #[test]
    fn test_patch_checks_only_present_fields() {
        assert!(validate_patch(&ProductPatch::default()).is_empty());

        let patch = ProductPatch {
            price: Some(-1.0),
            ..Default::default()
        };
        let errors = validate_patch(&patch);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("price"));

        let patch = ProductPatch {
            price: Some(f64::INFINITY),
            ..Default::default()
        };
        assert_eq!(
            validate_patch(&patch)["price"],
            "Price must be a positive number"
        );
    }

    #[test]
    fn test_product_and_patch_trim_alike() {
        let form = normalize_product(ProductFormData {
            title: "  Lamp ".to_string(),
            image: " http://x/1.png ".to_string(),
            description: " d ".to_string(),
            price: 5.0,
        });
        let patch = normalize_patch(ProductPatch {
            title: Some("  Lamp ".to_string()),
            image: Some(" http://x/1.png ".to_string()),
            ..Default::default()
        });

        assert_eq!(form.title, "Lamp");
        assert_eq!(form.image, "http://x/1.png");
        assert_eq!(form.description, " d ");
        assert_eq!(patch.title.as_deref(), Some("Lamp"));
        assert_eq!(patch.image.as_deref(), Some("http://x/1.png"));
        assert!(validate_patch(&patch).is_empty());
    }

    #[test]
    fn test_url_requires_scheme_and_host() {
        assert!(is_valid_url("https://via.placeholder.com/300x200"));
        assert!(!is_valid_url("file:///tmp/x.png"));
        assert!(!is_valid_url("http//missing-colon"));
        assert!(!is_valid_url("mailto:a@b.com"));
    }

    #[test]
    fn test_login_email_and_password() {
        let form = normalize_login(LoginForm {
            email: "  Ada@Example.COM ".to_string(),
            password: "secret1".to_string(),
        });
        assert_eq!(form.email, "ada@example.com");
        assert!(validate_login(&form).is_empty());

        let errors = validate_login(&LoginForm {
            email: "ada@localhost".to_string(),
            password: "12345".to_string(),
        });
        assert_eq!(errors["email"], "Must be a valid email format");
        assert_eq!(errors["password"], "Password must be at least 6 characters long");

        let errors = validate_login(&LoginForm {
            email: String::new(),
            password: String::new(),
        });
        assert_eq!(errors["email"], "Email is required");
        assert_eq!(errors["password"], "Password is required");
    }

    #[test]
    fn test_registration_valid_after_normalization() {
        let form = normalize_registration(RegistrationForm {
            full_name: "  Ada Lovelace ".to_string(),
            email: "ADA@example.com".to_string(),
            ..registration()
        });
        assert_eq!(form.full_name, "Ada Lovelace");
        assert_eq!(form.email, "ada@example.com");
        assert!(validate_registration(&form).is_empty());
    }

    #[test]
    fn test_registration_messages() {
        let errors = validate_registration(&RegistrationForm {
            full_name: " A ".to_string(),
            phone: "555-1234".to_string(),
            confirm_password: "secret2".to_string(),
            ..registration()
        });
        assert_eq!(errors["fullName"], "Full Name must be at least 2 characters long");
        assert_eq!(errors["phone"], "Phone must contain 10 to 15 digits only");
        assert_eq!(errors["confirmPassword"], "Passwords do not match");
        assert!(!errors.contains_key("email"));

        let errors = validate_registration(&RegistrationForm {
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            password: String::new(),
            confirm_password: String::new(),
        });
        assert_eq!(errors["fullName"], "Full Name is required");
        assert_eq!(errors["email"], "Email is required");
        assert_eq!(errors["phone"], "Phone number is required");
        assert_eq!(errors["password"], "Password is required");
        assert_eq!(errors["confirmPassword"], "Confirm Password is required");
    }

    #[test]
    fn test_phone_digit_bounds() {
        let with_phone = |phone: &str| RegistrationForm {
            phone: phone.to_string(),
            ..registration()
        };
        assert!(validate_registration(&with_phone("+1 555 123 4567")).is_empty());
        assert!(validate_registration(&with_phone("123456789012345")).is_empty());
        assert!(!validate_registration(&with_phone("1234567890123456")).is_empty());
    }
}
