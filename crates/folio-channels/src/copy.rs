use folio_core::template::fill;

/// Localized text wrapped around the user's message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelCopy {
    /// Name substituted for `{name}`.
    pub owner: String,
    /// WhatsApp text template with `{name}` and `{message}`.
    pub greeting: String,
    pub subject: String,
    /// Email body template with `{name}` and `{message}`.
    pub body: String,
}

impl ChannelCopy {
    /// Build from a translation lookup, falling back to Dutch copy for keys
    /// the lookup does not have.
    pub fn from_lookup<'a>(owner: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> Self {
        Self {
            owner: owner.to_string(),
            greeting: lookup("whatsappGreeting").unwrap_or("Hi {name}! {message}").to_string(),
            subject: lookup("emailSubject")
                .unwrap_or("Project aanvraag via portfolio")
                .to_string(),
            body: lookup("emailBody")
                .unwrap_or("Hi {name},\n\n{message}\n\nGroet,")
                .to_string(),
        }
    }

    pub fn whatsapp_text(&self, message: &str) -> String {
        fill(&self.greeting, &[("name", &self.owner), ("message", message)])
    }

    pub fn email_body(&self, message: &str) -> String {
        fill(&self.body, &[("name", &self.owner), ("message", message)])
    }
}
