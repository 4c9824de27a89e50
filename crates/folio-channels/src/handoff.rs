use folio_core::{
    config::ContactConfig, error::FolioError, message::PendingOutboundMessage, traits::Navigator,
};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::{copy::ChannelCopy, email::EmailChannel, whatsapp::WhatsAppChannel};

/// External contact channels the site can hand off to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    WhatsApp,
    Email,
}

impl ChannelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WhatsApp => "whatsapp",
            Self::Email => "email",
        }
    }

    /// Analytics event emitted when the visitor picks this channel.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::WhatsApp => "contact_choice_whatsapp",
            Self::Email => "contact_choice_email",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelKind {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "whatsapp" => Ok(Self::WhatsApp),
            "email" | "mail" => Ok(Self::Email),
            other => Err(FolioError::Channel(format!("unknown channel: {other}"))),
        }
    }
}

/// A channel that turns a message into an external URI and opens it.
pub trait ContactChannel {
    fn kind(&self) -> ChannelKind;

    /// The URI for `message`. User text is always percent-encoded.
    fn build_uri(
        &self,
        message: &PendingOutboundMessage,
        copy: &ChannelCopy,
    ) -> Result<String, FolioError>;

    /// Open a built URI the way this channel expects.
    fn open(&self, uri: &str, nav: &mut dyn Navigator);
}

/// The configured channels.
#[derive(Debug, Clone, Default)]
pub struct ContactHandoff {
    whatsapp: Option<WhatsAppChannel>,
    email: Option<EmailChannel>,
}

impl ContactHandoff {
    /// Channels with a blank target are left unconfigured.
    pub fn from_config(config: &ContactConfig) -> Self {
        let whatsapp = WhatsAppChannel::new(&config.whatsapp_number);
        if whatsapp.is_none() {
            warn!("contact.whatsapp_number has no digits; WhatsApp hand-off disabled");
        }
        let email = EmailChannel::new(&config.email);
        if email.is_none() {
            warn!("contact.email is empty; email hand-off disabled");
        }
        Self { whatsapp, email }
    }

    pub fn channel(&self, kind: ChannelKind) -> Option<&dyn ContactChannel> {
        match kind {
            ChannelKind::WhatsApp => self.whatsapp.as_ref().map(|c| c as &dyn ContactChannel),
            ChannelKind::Email => self.email.as_ref().map(|c| c as &dyn ContactChannel),
        }
    }

    pub fn email(&self) -> Option<&EmailChannel> {
        self.email.as_ref()
    }

    /// Build the URI for `kind` without opening it.
    pub fn uri(
        &self,
        kind: ChannelKind,
        message: &PendingOutboundMessage,
        copy: &ChannelCopy,
    ) -> Result<String, FolioError> {
        let channel = self
            .channel(kind)
            .ok_or_else(|| FolioError::Channel(format!("{kind} is not configured")))?;
        channel.build_uri(message, copy)
    }

    /// Build and open. Returns the URI handed to the navigator.
    pub fn dispatch(
        &self,
        kind: ChannelKind,
        message: &PendingOutboundMessage,
        copy: &ChannelCopy,
        nav: &mut dyn Navigator,
    ) -> Result<String, FolioError> {
        let channel = self
            .channel(kind)
            .ok_or_else(|| FolioError::Channel(format!("{kind} is not configured")))?;
        let uri = channel.build_uri(message, copy)?;
        channel.open(&uri, nav);
        Ok(uri)
    }

    /// Open a composed email directly (used by the project inquiry form).
    pub fn send_email(
        &self,
        subject: &str,
        body: &str,
        nav: &mut dyn Navigator,
    ) -> Result<String, FolioError> {
        let email = self
            .email
            .as_ref()
            .ok_or_else(|| FolioError::Channel("email is not configured".into()))?;
        let uri = email.uri(subject, body);
        email.open(&uri, nav);
        Ok(uri)
    }
}
