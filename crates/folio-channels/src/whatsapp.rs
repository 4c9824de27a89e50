//! WhatsApp hand-off through `wa.me` click-to-chat links.

use folio_core::{error::FolioError, message::PendingOutboundMessage, traits::Navigator};
use tracing::info;

use crate::{
    copy::ChannelCopy,
    handoff::{ChannelKind, ContactChannel},
};

/// Opens a chat with a fixed number, pre-filled with the composed message.
#[derive(Debug, Clone)]
pub struct WhatsAppChannel {
    number: String,
}

impl WhatsAppChannel {
    /// `number` may be formatted (`+31 6-57…`); only digits are kept.
    /// Returns `None` when no digits remain.
    pub fn new(number: &str) -> Option<Self> {
        let number: String = number.chars().filter(char::is_ascii_digit).collect();
        if number.is_empty() {
            None
        } else {
            Some(Self { number })
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    /// `https://wa.me/<digits>?text=<encoded>`.
    pub fn uri(&self, text: &str) -> String {
        format!("https://wa.me/{}?text={}", self.number, urlencoding::encode(text))
    }
}

impl ContactChannel for WhatsAppChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::WhatsApp
    }

    fn build_uri(
        &self,
        message: &PendingOutboundMessage,
        copy: &ChannelCopy,
    ) -> Result<String, FolioError> {
        Ok(self.uri(&copy.whatsapp_text(message.as_str())))
    }

    fn open(&self, uri: &str, nav: &mut dyn Navigator) {
        info!("Handing off to WhatsApp");
        nav.open_new_context(uri);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn copy() -> ChannelCopy {
        ChannelCopy::from_lookup("Nathalja", |_| None)
    }

    #[test]
    fn test_number_reduced_to_digits() {
        let channel = WhatsAppChannel::new("+31 (0)6-5759 1440").unwrap();
        assert_eq!(channel.number(), "310657591440");
        assert!(WhatsAppChannel::new("n/a").is_none());
    }

    #[test]
    fn test_hallo_is_fully_encoded() {
        let channel = WhatsAppChannel::new("31657591440").unwrap();
        let uri = channel
            .build_uri(&PendingOutboundMessage::new("Hallo!"), &copy())
            .unwrap();
        assert_eq!(uri, "https://wa.me/31657591440?text=Hi%20Nathalja%21%20Hallo%21");
        assert!(!uri.contains(' '));
        assert!(!uri.contains('!'));
    }

    #[test]
    fn test_query_breaking_characters_escaped() {
        let channel = WhatsAppChannel::new("31657591440").unwrap();
        let uri = channel
            .build_uri(&PendingOutboundMessage::new("a&b=c?#d\ne"), &copy())
            .unwrap();
        let text = uri.split_once("?text=").unwrap().1;
        assert!(!text.contains(['&', '=', '?', '#', '\n']));
        assert!(text.contains("%26") && text.contains("%0A"));
    }
}
