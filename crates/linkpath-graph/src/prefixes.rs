//! Prefix to namespace bindings

use linkpath_core::model::{OWL_NS, RDFS_NS, RDF_NS};

/// An ordered set of prefix -> namespace bindings.
///
/// The `rdf`, `rdfs` and `owl` prefixes are pre-registered with their
/// standard namespaces.
#[derive(Debug, Clone)]
pub struct PrefixMap {
    bindings: Vec<(String, String)>,
}

impl Default for PrefixMap {
    fn default() -> Self {
        let mut map = PrefixMap { bindings: Vec::new() };
        map.bind("rdf", RDF_NS);
        map.bind("rdfs", RDFS_NS);
        map.bind("owl", OWL_NS);
        map
    }
}

impl PrefixMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a binding, overwriting any existing binding for the prefix.
    pub fn bind<P: Into<String>, N: Into<String>>(&mut self, prefix: P, namespace: N) {
        let prefix = prefix.into();
        let namespace = namespace.into();
        match self.bindings.iter_mut().find(|(p, _)| *p == prefix) {
            Some(binding) => binding.1 = namespace,
            None => self.bindings.push((prefix, namespace)),
        }
    }

    /// The namespace bound to a prefix, if any.
    pub fn resolve(&self, prefix: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, ns)| ns.as_str())
    }

    /// Expand a `prefix:local` qualified name to a full IRI.
    pub fn expand(&self, qname: &str) -> Option<String> {
        let (prefix, local) = qname.split_once(':')?;
        self.resolve(prefix).map(|ns| format!("{}{}", ns, local))
    }

    /// Iterate over the bindings in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(p, n)| (p.as_str(), n.as_str()))
    }
}
