use serde::Serialize;

const RESET_DOMAIN: &str = "@srmist.edu.in";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Validation {
    fn ok() -> Validation {
        Validation {
            valid: true,
            error: None,
        }
    }

    fn fail(message: impl Into<String>) -> Validation {
        Validation {
            valid: false,
            error: Some(message.into()),
        }
    }
}

/// Login form rule: `local@domain.tld`, no whitespace, exactly one `@`.
pub fn login_email(email: &str) -> Validation {
    if is_well_formed(email) {
        Validation::ok()
    } else {
        Validation::fail("Please enter a valid email address")
    }
}

/// Password-reset form rule: anything typed must carry an `@` and the
/// institute domain. Empty input stays neutral (invalid, but no message),
/// mirroring the form's untouched state.
pub fn reset_email(email: &str) -> Validation {
    if email.trim().is_empty() {
        return Validation {
            valid: false,
            error: None,
        };
    }
    if !email.contains('@') {
        return Validation::fail(format!(
            "Please include an '@' in the email address. '{}' is missing an '@'.",
            email
        ));
    }
    if !email.ends_with(RESET_DOMAIN) {
        return Validation::fail(
            "Please use your SRM email address (ending with @srmist.edu.in).",
        );
    }
    Validation::ok()
}

fn is_well_formed(email: &str) -> bool {
    if email.chars().any(|c| c.is_whitespace()) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}
