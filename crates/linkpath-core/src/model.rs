//! RDF term and triple data model

use serde::{Deserialize, Serialize};

/// Namespace of the RDF vocabulary.
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// Namespace of the RDFS vocabulary.
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
/// Namespace of the OWL vocabulary.
pub const OWL_NS: &str = "http://www.w3.org/2002/07/owl#";
/// The `rdf:type` predicate.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// An RDF term: IRI, blank node or literal.
///
/// Literals carry their lexical form plus an optional datatype IRI and an
/// optional language tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Term {
    Iri(String),
    BlankNode(String),
    Literal {
        lexical: String,
        datatype: Option<String>,
        language: Option<String>,
    },
}

impl Term {
    /// Create an IRI term.
    pub fn iri<S: Into<String>>(iri: S) -> Self {
        Term::Iri(iri.into())
    }

    /// Create a blank node term from its label.
    pub fn blank<S: Into<String>>(id: S) -> Self {
        Term::BlankNode(id.into())
    }

    /// Create a plain literal with no datatype or language tag.
    pub fn literal<S: Into<String>>(lexical: S) -> Self {
        Term::Literal {
            lexical: lexical.into(),
            datatype: None,
            language: None,
        }
    }

    /// Create a literal with a datatype IRI.
    pub fn typed_literal<S: Into<String>, D: Into<String>>(lexical: S, datatype: D) -> Self {
        Term::Literal {
            lexical: lexical.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    /// Create a literal with a language tag.
    pub fn tagged_literal<S: Into<String>, L: Into<String>>(lexical: S, language: L) -> Self {
        Term::Literal {
            lexical: lexical.into(),
            datatype: None,
            language: Some(language.into()),
        }
    }

    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Term::BlankNode(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal { .. })
    }

    /// The lexical face of the term: the IRI string, the blank node label or
    /// the literal's lexical form.
    pub fn lexical(&self) -> &str {
        match self {
            Term::Iri(iri) => iri,
            Term::BlankNode(id) => id,
            Term::Literal { lexical, .. } => lexical,
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "{}", iri),
            Term::BlankNode(id) => write!(f, "_:{}", id),
            Term::Literal { lexical, .. } => write!(f, "{}", lexical),
        }
    }
}

/// An RDF triple. The predicate is always an IRI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Term,
    pub predicate: String,
    pub object: Term,
}

impl Triple {
    pub fn new<P: Into<String>>(subject: Term, predicate: P, object: Term) -> Self {
        Triple {
            subject,
            predicate: predicate.into(),
            object,
        }
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)
    }
}
