use serde::{Deserialize, Serialize};
use url::Url;

use crate::{ContactConfig, PageError, Result};

const CLICK_TO_CHAT: &str = "https://wa.me/";

/// Values typed into the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSubmission {
    pub name: String,
    pub phone: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            message: message.into(),
        }
    }

    /// Builds the chat text. Name and message are required, phone is optional.
    pub fn compose(&self, config: &ContactConfig) -> Result<String> {
        let name = self.name.trim();
        let phone = self.phone.trim();
        let message = self.message.trim();
        if name.is_empty() {
            return Err(PageError::MissingField("name"));
        }
        if message.is_empty() {
            return Err(PageError::MissingField("message"));
        }

        let mut text = format!("*New message from {}:*\n\n", config.site_name);
        text.push_str(&format!("*Name:* {name}\n"));
        if !phone.is_empty() {
            text.push_str(&format!("*Phone:* {phone}\n"));
        }
        text.push_str(&format!("*Message:*\n{message}"));
        Ok(text)
    }

    /// Click-to-chat link that opens the composed message for the site's number.
    ///
    /// The number is only ever a single path segment on the chat host.
    pub fn redirect_url(&self, config: &ContactConfig) -> Result<Url> {
        config.validate()?;
        let text = self.compose(config)?;
        let mut url = Url::parse(CLICK_TO_CHAT)?;
        url.path_segments_mut()
            .map_err(|()| PageError::msg("click-to-chat URL cannot carry a path"))?
            .clear()
            .push(&config.phone_number);
        url.query_pairs_mut().append_pair("text", &text);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_message_with_optional_phone() {
        let config = ContactConfig::default();
        let with_phone = ContactSubmission::new(" Ana ", "0414-555", " Need a site ");
        let without = ContactSubmission::new("Ana", "   ", "Need a site");

        assert_eq!(
            with_phone.compose(&config).unwrap(),
            "*New message from AS.Desarrolladores:*\n\n*Name:* Ana\n*Phone:* 0414-555\n*Message:*\nNeed a site"
        );
        assert!(!without.compose(&config).unwrap().contains("Phone"));
    }

    #[test]
    fn blank_required_fields_are_rejected() {
        let config = ContactConfig::default();

        let err = ContactSubmission::new("  ", "", "hello").compose(&config).unwrap_err();
        assert!(matches!(err, PageError::MissingField("name")));
        let err = ContactSubmission::new("Ana", "", "\n").compose(&config).unwrap_err();
        assert!(matches!(err, PageError::MissingField("message")));
    }

    #[test]
    fn redirect_targets_configured_number() {
        let config = ContactConfig::default();
        let url = ContactSubmission::new("Ana", "", "Hi & bye")
            .redirect_url(&config)
            .unwrap();

        assert_eq!(url.host_str(), Some("wa.me"));
        assert_eq!(url.path(), "/584246018457");
        let (key, text) = url.query_pairs().next().unwrap();
        assert_eq!(key, "text");
        assert!(text.ends_with("*Message:*\nHi & bye"));
        assert!(!url.as_str().contains(' '));
    }

    #[test]
    fn number_cannot_redirect_off_the_chat_host() {
        let submission = ContactSubmission::new("Ana", "", "Hi");

        for number in ["//evil.example/chat", "../evil", "https://evil.example", "58 424"] {
            let config = ContactConfig {
                phone_number: number.to_string(),
                ..ContactConfig::default()
            };
            let err = submission.redirect_url(&config).unwrap_err();
            assert!(matches!(err, PageError::InvalidConfig(_)), "{number}");
        }
    }
}
