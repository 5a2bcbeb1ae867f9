//! Registry of available source importers.
//!
//! Handlers are compile-time known: adding a source system means adding
//! a match arm and a descriptor here. Lookup by unknown key returns
//! `None` and surfaces as a 400 at the API layer.

use serde::Deserialize;
use ticketport_core::importer::SourceImporter;
use ticketport_core::ticket::SourceKind;
use ticketport_zendesk::{ZendeskApi, ZendeskImporter};

/// Credentials for a remote help-desk workspace, as supplied per request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceCredentials {
    pub domain: String,
    pub email: String,
    pub access_token: String,
}

/// Static metadata for one registered importer.
#[derive(Debug, Clone, Copy)]
pub struct ImporterDescriptor {
    pub name: &'static str,
    pub handler: &'static str,
    pub kind: SourceKind,
}

/// All registered importers, in stats display order.
pub fn descriptors() -> Vec<ImporterDescriptor> {
    vec![ImporterDescriptor {
        name: "Zendesk",
        handler: ticketport_zendesk::importer::HANDLER,
        kind: SourceKind::Saas,
    }]
}

/// Construct the importer for `handler`, or `None` if the key is not
/// registered.
pub fn build(
    handler: &str,
    credentials: &SourceCredentials,
    client: reqwest::Client,
) -> Option<Box<dyn SourceImporter>> {
    match handler {
        ticketport_zendesk::importer::HANDLER => {
            let api = ZendeskApi::with_client(
                client,
                base_url_from_domain(&credentials.domain),
                credentials.email.clone(),
                credentials.access_token.clone(),
            );
            Some(Box::new(ZendeskImporter::new(api)))
        }
        _ => None,
    }
}

/// Accept either a bare domain (`acme.zendesk.com`) or a full URL;
/// bare domains get `https://`.
fn base_url_from_domain(domain: &str) -> String {
    let trimmed = domain.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_handler_builds() {
        let credentials = SourceCredentials {
            domain: "acme.zendesk.com".to_string(),
            email: "agent@acme.com".to_string(),
            access_token: "token".to_string(),
        };
        let importer = build("zendesk", &credentials, reqwest::Client::new()).unwrap();
        assert_eq!(importer.handler(), "zendesk");
        assert_eq!(importer.display_name(), "Zendesk");
    }

    #[test]
    fn unknown_handler_is_none() {
        let credentials = SourceCredentials::default();
        assert!(build("helpscout", &credentials, reqwest::Client::new()).is_none());
    }

    #[test]
    fn descriptors_match_buildable_handlers() {
        let credentials = SourceCredentials::default();
        for descriptor in descriptors() {
            assert!(
                build(descriptor.handler, &credentials, reqwest::Client::new()).is_some(),
                "descriptor {} has no construction arm",
                descriptor.handler
            );
        }
    }

    #[test]
    fn bare_domains_get_https() {
        assert_eq!(
            base_url_from_domain("acme.zendesk.com"),
            "https://acme.zendesk.com"
        );
        assert_eq!(
            base_url_from_domain("https://acme.zendesk.com/"),
            "https://acme.zendesk.com"
        );
        assert_eq!(
            base_url_from_domain("http://localhost:8200"),
            "http://localhost:8200"
        );
    }
}
