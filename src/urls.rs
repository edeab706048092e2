//! URL resolution
//!
//! Pure functions from a [`ServiceClient`] and identifiers to resource and
//! collection URLs of the shape `<endpoint>/<collection>[/<id>]`.
//!
//! Resource packages wrap these in their own helpers:
//!
//! ```rust,ignore
//! fn list_url(c: &ServiceClient) -> Url {
//!     urls::collection_url(c, "system_updates")
//! }
//!
//! fn show_url(c: &ServiceClient, id: &str) -> Url {
//!     urls::resource_url(c, "system_updates", id)
//! }
//! ```

use crate::http::ServiceClient;
use url::Url;

/// URL of a whole collection: `<endpoint>/<collection>`
pub fn collection_url(client: &ServiceClient, collection: &str) -> Url {
    client.service_url([collection])
}

/// URL of one resource: `<endpoint>/<collection>/<id>`
///
/// `id` is escaped as a single segment, so an id containing `/` or `?`
/// still addresses a resource under `collection` and nothing else.
pub fn resource_url(client: &ServiceClient, collection: &str, id: &str) -> Url {
    client.service_url([collection, id])
}

/// Recover `(collection, id)` from a URL built under `client`'s endpoint
///
/// Returns `None` for URLs outside the endpoint or with more than two
/// segments below it. Segments are returned as they appear in the URL, i.e.
/// still percent-encoded.
pub fn split_resource_url(client: &ServiceClient, url: &Url) -> Option<(String, Option<String>)> {
    let base = client.endpoint().as_str();
    let rest = url.as_str().strip_prefix(base)?;
    let path = rest.split(['?', '#']).next().unwrap_or_default();

    let mut segments = path.split('/').filter(|s| !s.is_empty());
    let collection = segments.next()?.to_string();
    let id = segments.next().map(str::to_string);
    if segments.next().is_some() {
        return None;
    }
    Some((collection, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client(endpoint: &str) -> ServiceClient {
        ServiceClient::builder(endpoint).build().unwrap()
    }

    #[test]
    fn test_collection_url() {
        let c = client("https://mlb.example.com/v1.0/");
        assert_eq!(
            collection_url(&c, "system_updates").as_str(),
            "https://mlb.example.com/v1.0/system_updates"
        );
    }

    #[test]
    fn test_resource_url() {
        let c = client("https://mlb.example.com/v1.0/");
        assert_eq!(
            resource_url(&c, "system_updates", "31746df7-92f9-4b5e-ad05-59f6684a54eb").as_str(),
            "https://mlb.example.com/v1.0/system_updates/31746df7-92f9-4b5e-ad05-59f6684a54eb"
        );
    }

    #[test]
    fn test_empty_collection_name_is_endpoint() {
        let c = client("https://mlb.example.com/v1.0/");
        assert_eq!(collection_url(&c, ""), *c.endpoint());
        assert_eq!(resource_url(&c, "", "").as_str(), "https://mlb.example.com/v1.0/");
    }

    #[test]
    fn test_endpoint_without_trailing_slash() {
        let c = client("https://compute.example.com/v2");
        assert_eq!(c.endpoint().as_str(), "https://compute.example.com/v2/");
        assert_eq!(
            resource_url(&c, "os-keypairs", "firstkey").as_str(),
            "https://compute.example.com/v2/os-keypairs/firstkey"
        );
    }

    #[test]
    fn test_endpoint_at_host_root() {
        let c = client("http://127.0.0.1:8080");
        assert_eq!(
            collection_url(&c, "os-keypairs").as_str(),
            "http://127.0.0.1:8080/os-keypairs"
        );
    }

    #[test]
    fn test_id_separators_are_escaped() {
        let c = client("https://compute.example.com/v2/");
        let url = resource_url(&c, "os-keypairs", "a/b?c#d");
        assert_eq!(
            url.as_str(),
            "https://compute.example.com/v2/os-keypairs/a%2Fb%3Fc%23d"
        );
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
        assert_eq!(url.path_segments().unwrap().count(), 3);
    }

    #[test]
    fn test_empty_id_has_no_trailing_slash() {
        let c = client("https://compute.example.com/v2/");
        assert_eq!(resource_url(&c, "servers", ""), collection_url(&c, "servers"));
    }

    #[test]
    fn test_round_trip_url_safe_ids() {
        let c = client("https://compute.example.com/v2/");
        for id in ["firstkey", "a-b_c.d~e", "31746df7-92f9-4b5e-ad05-59f6684a54eb", "0"] {
            let url = resource_url(&c, "os-keypairs", id);
            let (collection, parsed) = split_resource_url(&c, &url).unwrap();
            assert_eq!(collection, "os-keypairs");
            assert_eq!(parsed.as_deref(), Some(id));
        }
    }

    #[test]
    fn test_split_collection_url() {
        let c = client("https://compute.example.com/v2/");
        let url = collection_url(&c, "servers");
        assert_eq!(
            split_resource_url(&c, &url),
            Some(("servers".to_string(), None))
        );
    }

    #[test]
    fn test_split_rejects_foreign_urls() {
        let c = client("https://compute.example.com/v2/");
        let other = Url::parse("https://other.example.com/v2/servers/1").unwrap();
        assert!(split_resource_url(&c, &other).is_none());

        let deep = Url::parse("https://compute.example.com/v2/servers/1/action").unwrap();
        assert!(split_resource_url(&c, &deep).is_none());
    }
}
