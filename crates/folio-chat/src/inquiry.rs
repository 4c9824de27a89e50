//! Project inquiry form on the project screen.

use folio_core::template::fill;

/// Why an inquiry was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InquiryError {
    /// Name, email or project type left blank.
    MissingRequired,
    InvalidEmail,
}

impl InquiryError {
    /// Translation key of the message shown in the form status line.
    pub fn translation_key(&self) -> &'static str {
        match self {
            Self::MissingRequired => "inquiryErrorRequired",
            Self::InvalidEmail => "inquiryErrorEmail",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectInquiry {
    pub name: String,
    pub email: String,
    pub project_type: String,
    pub description: String,
}

impl ProjectInquiry {
    /// Trims every field.
    pub fn new(name: &str, email: &str, project_type: &str, description: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            project_type: project_type.trim().to_string(),
            description: description.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), InquiryError> {
        if self.name.is_empty() || self.email.is_empty() || self.project_type.is_empty() {
            return Err(InquiryError::MissingRequired);
        }
        if !is_valid_email(&self.email) {
            return Err(InquiryError::InvalidEmail);
        }
        Ok(())
    }

    fn vars(&self) -> [(&str, &str); 4] {
        [
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("type", self.project_type.as_str()),
            ("description", self.description.as_str()),
        ]
    }

    pub fn subject(&self, template: &str) -> String {
        fill(template, &self.vars())
    }

    pub fn body(&self, template: &str) -> String {
        fill(template, &self.vars())
    }
}

/// `local@domain.tld`: one `@`, no whitespace, and a dot inside the domain
/// with text on both sides.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
