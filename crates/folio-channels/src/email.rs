//! Email hand-off through `mailto:` links.

use folio_core::{error::FolioError, message::PendingOutboundMessage, traits::Navigator};
use tracing::info;

use crate::{
    copy::ChannelCopy,
    handoff::{ChannelKind, ContactChannel},
};

#[derive(Debug, Clone)]
pub struct EmailChannel {
    address: String,
}

impl EmailChannel {
    /// Returns `None` for a blank address.
    pub fn new(address: &str) -> Option<Self> {
        let address = address.trim();
        if address.is_empty() {
            None
        } else {
            Some(Self {
                address: address.to_string(),
            })
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// `mailto:<address>?subject=<encoded>&body=<encoded>`.
    pub fn uri(&self, subject: &str, body: &str) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.address,
            urlencoding::encode(subject),
            urlencoding::encode(body)
        )
    }
}

impl ContactChannel for EmailChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Email
    }

    fn build_uri(
        &self,
        message: &PendingOutboundMessage,
        copy: &ChannelCopy,
    ) -> Result<String, FolioError> {
        Ok(self.uri(&copy.subject, &copy.email_body(message.as_str())))
    }

    fn open(&self, uri: &str, nav: &mut dyn Navigator) {
        info!("Handing off to email client");
        nav.assign(uri);
    }
}
