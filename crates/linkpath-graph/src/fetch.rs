//! Dereferencing remote documents.
//!
//! The aggregating graph treats fetching as a pluggable capability: anything
//! implementing [`Dereferencer`] can supply the triples behind an IRI. The
//! bundled [`HttpDereferencer`] performs a blocking GET and hands the body to
//! a decoder selected by content type. Every failure mode (transport error,
//! non-2xx status, unknown content type, decode error) is absorbed: the
//! graph simply does not grow.

use crate::GraphError;
use linkpath_core::model::Triple;
use std::collections::HashMap;
use tracing::debug;

/// Accept header sent when dereferencing an IRI.
pub const ACCEPT: &str =
    "text/turtle, application/rdf+xml;q=0.9, application/xml;q=0.1, text/xml;q=0.1";

/// Decodes one retrieved document body into triples.
pub trait RdfDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Triple>, GraphError>;
}

/// Best-effort supplier of the triples behind an IRI.
pub trait Dereferencer {
    fn dereference(&mut self, iri: &str) -> Vec<Triple>;
}

/// A [`Dereferencer`] that never fetches anything. Used for graphs that are
/// fully seeded up front.
#[derive(Debug, Default)]
pub struct NullDereferencer;

impl Dereferencer for NullDereferencer {
    fn dereference(&mut self, _iri: &str) -> Vec<Triple> {
        Vec::new()
    }
}

/// HTTP dereferencer with a content-type keyed decoder registry.
pub struct HttpDereferencer {
    client: reqwest::blocking::Client,
    decoders: HashMap<String, Box<dyn RdfDecoder>>,
}

impl HttpDereferencer {
    /// Create a dereferencer with an empty decoder registry. Redirects are
    /// followed by the underlying client.
    pub fn new() -> Self {
        HttpDereferencer {
            client: reqwest::blocking::Client::new(),
            decoders: HashMap::new(),
        }
    }

    /// Register a decoder for a media type, e.g. `application/n-triples`.
    pub fn register_decoder<M: Into<String>>(&mut self, media_type: M, decoder: Box<dyn RdfDecoder>) {
        self.decoders.insert(media_type.into(), decoder);
    }

    fn decode(&self, media_type: &str, body: &str) -> Vec<Triple> {
        match self.decoders.get(media_type) {
            Some(decoder) => match decoder.decode(body) {
                Ok(triples) => triples,
                Err(error) => {
                    debug!(media_type, %error, "discarding undecodable document");
                    Vec::new()
                }
            },
            None => {
                debug!(media_type, "no decoder registered for content type");
                Vec::new()
            }
        }
    }
}

impl Default for HttpDereferencer {
    fn default() -> Self {
        Self::new()
    }
}

impl Dereferencer for HttpDereferencer {
    fn dereference(&mut self, iri: &str) -> Vec<Triple> {
        let response = match self
            .client
            .get(iri)
            .header(reqwest::header::ACCEPT, ACCEPT)
            .send()
        {
            Ok(response) => response,
            Err(error) => {
                debug!(iri, %error, "dereference request failed");
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            debug!(iri, status = %response.status(), "dereference returned non-success status");
            return Vec::new();
        }

        let media_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or("").trim().to_ascii_lowercase())
            .unwrap_or_default();

        let body = match response.text() {
            Ok(body) => body,
            Err(error) => {
                debug!(iri, %error, "failed to read response body");
                return Vec::new();
            }
        };

        self.decode(&media_type, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ntriples::NTriplesDecoder;

    #[test]
    fn test_null_dereferencer_returns_nothing() {
        let mut deref = NullDereferencer;
        assert!(deref.dereference("http://example.com/x").is_empty());
    }

    #[test]
    fn test_decode_with_registered_decoder() {
        let mut deref = HttpDereferencer::new();
        deref.register_decoder("application/n-triples", Box::new(NTriplesDecoder));

        let triples = deref.decode(
            "application/n-triples",
            "<http://a> <http://b> <http://c> .",
        );
        assert_eq!(triples.len(), 1);
    }

    #[test]
    fn test_decode_unknown_content_type_is_empty() {
        let deref = HttpDereferencer::new();
        assert!(deref.decode("text/html", "<html></html>").is_empty());
    }

    #[test]
    fn test_decode_error_is_absorbed() {
        let mut deref = HttpDereferencer::new();
        deref.register_decoder("application/n-triples", Box::new(NTriplesDecoder));
        assert!(deref
            .decode("application/n-triples", "this is not n-triples")
            .is_empty());
    }
}
