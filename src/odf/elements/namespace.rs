//! Namespace handling utilities for ODF XML elements.
//!
//! This module provides qualified names, the well-known ODF namespace
//! prefixes, and the scoped prefix resolution the tree builder uses while
//! reading `content.xml`.
//!
//! # References
//!
//! - ODF 1.2, Part 1, section 1.5 (namespaces)

use phf::{Map, phf_map};

// ============================================================================
// NAMESPACE CONSTANTS
// ============================================================================

/// Office namespace
pub const OFFICENS: &str = "urn:oasis:names:tc:opendocument:xmlns:office:1.0";

/// Table namespace
pub const TABLENS: &str = "urn:oasis:names:tc:opendocument:xmlns:table:1.0";

/// Text namespace
pub const TEXTNS: &str = "urn:oasis:names:tc:opendocument:xmlns:text:1.0";

// ============================================================================
// NAMESPACE MAPPING (compile-time perfect hash map)
// ============================================================================

/// URI to prefix mapping (compile-time perfect hash map for zero-cost lookups)
static URI_TO_PREFIX: Map<&'static str, &'static str> = phf_map! {
    "urn:oasis:names:tc:opendocument:xmlns:chart:1.0" => "chart",
    "urn:oasis:names:tc:opendocument:xmlns:config:1.0" => "config",
    "http://purl.org/dc/elements/1.1/" => "dc",
    "urn:oasis:names:tc:opendocument:xmlns:drawing:1.0" => "draw",
    "urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0" => "fo",
    "urn:oasis:names:tc:opendocument:xmlns:form:1.0" => "form",
    "urn:org:documentfoundation:names:experimental:office:xmlns:loext:1.0" => "loext",
    "urn:oasis:names:tc:opendocument:xmlns:meta:1.0" => "meta",
    "urn:oasis:names:tc:opendocument:xmlns:datastyle:1.0" => "number",
    "urn:oasis:names:tc:opendocument:xmlns:office:1.0" => "office",
    "urn:oasis:names:tc:opendocument:xmlns:of:1.2" => "of",
    "http://openoffice.org/2004/calc" => "oooc",
    "urn:oasis:names:tc:opendocument:xmlns:script:1.0" => "script",
    "urn:oasis:names:tc:opendocument:xmlns:style:1.0" => "style",
    "urn:oasis:names:tc:opendocument:xmlns:svg-compatible:1.0" => "svg",
    "urn:oasis:names:tc:opendocument:xmlns:table:1.0" => "table",
    "urn:oasis:names:tc:opendocument:xmlns:text:1.0" => "text",
    "http://www.w3.org/1999/xlink" => "xlink",
    "http://www.w3.org/XML/1998/namespace" => "xml",
    "urn:org:documentfoundation:names:experimental:calc:xmlns:calcext:1.0" => "calcext",
};

/// Prefix to URI mapping (compile-time perfect hash map for zero-cost lookups)
static PREFIX_TO_URI: Map<&'static str, &'static str> = phf_map! {
    "chart" => "urn:oasis:names:tc:opendocument:xmlns:chart:1.0",
    "config" => "urn:oasis:names:tc:opendocument:xmlns:config:1.0",
    "dc" => "http://purl.org/dc/elements/1.1/",
    "draw" => "urn:oasis:names:tc:opendocument:xmlns:drawing:1.0",
    "fo" => "urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0",
    "form" => "urn:oasis:names:tc:opendocument:xmlns:form:1.0",
    "loext" => "urn:org:documentfoundation:names:experimental:office:xmlns:loext:1.0",
    "meta" => "urn:oasis:names:tc:opendocument:xmlns:meta:1.0",
    "number" => "urn:oasis:names:tc:opendocument:xmlns:datastyle:1.0",
    "office" => "urn:oasis:names:tc:opendocument:xmlns:office:1.0",
    "of" => "urn:oasis:names:tc:opendocument:xmlns:of:1.2",
    "oooc" => "http://openoffice.org/2004/calc",
    "script" => "urn:oasis:names:tc:opendocument:xmlns:script:1.0",
    "style" => "urn:oasis:names:tc:opendocument:xmlns:style:1.0",
    "svg" => "urn:oasis:names:tc:opendocument:xmlns:svg-compatible:1.0",
    "table" => "urn:oasis:names:tc:opendocument:xmlns:table:1.0",
    "text" => "urn:oasis:names:tc:opendocument:xmlns:text:1.0",
    "xlink" => "http://www.w3.org/1999/xlink",
    "xml" => "http://www.w3.org/XML/1998/namespace",
    "calcext" => "urn:org:documentfoundation:names:experimental:calc:xmlns:calcext:1.0",
};

// ============================================================================
// QUALIFIED NAME
// ============================================================================

/// Qualified name with namespace support
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName {
    /// Namespace URI
    pub namespace_uri: Option<String>,
    /// Local name (without prefix)
    pub local_name: String,
    /// Full qualified name (with prefix if present)
    pub qualified_name: String,
}

impl QualifiedName {
    /// Create a qualified name from a namespace URI and local name.
    ///
    /// Well-known ODF namespaces get their standard prefix in the
    /// qualified form.
    pub fn new(namespace_uri: Option<&str>, local_name: &str) -> Self {
        let qualified_name = match namespace_uri.map(Self::uri_to_prefix) {
            Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, local_name),
            _ => local_name.to_string(),
        };

        Self {
            namespace_uri: namespace_uri.map(str::to_string),
            local_name: local_name.to_string(),
            qualified_name,
        }
    }

    /// Parse a prefixed name ("table:table-row") against the well-known
    /// ODF prefixes.
    pub fn from_string(name: &str) -> Self {
        match name.split_once(':') {
            Some((prefix, local_name)) => Self {
                namespace_uri: Self::prefix_to_uri(prefix).map(str::to_string),
                local_name: local_name.to_string(),
                qualified_name: name.to_string(),
            },
            None => Self {
                namespace_uri: None,
                local_name: name.to_string(),
                qualified_name: name.to_string(),
            },
        }
    }

    /// Convert namespace URI to standard prefix using compile-time perfect hash map
    #[inline]
    fn uri_to_prefix(uri: &str) -> &'static str {
        URI_TO_PREFIX.get(uri).copied().unwrap_or("")
    }

    /// Convert prefix to namespace URI using compile-time perfect hash map
    #[inline]
    pub(crate) fn prefix_to_uri(prefix: &str) -> Option<&'static str> {
        PREFIX_TO_URI.get(prefix).copied()
    }

    /// Check if this name is `local_name` in namespace `namespace_uri`
    #[inline]
    pub fn is(&self, namespace_uri: &str, local_name: &str) -> bool {
        self.local_name == local_name && self.namespace_uri.as_deref() == Some(namespace_uri)
    }

    /// Check if this name matches another qualified name
    pub fn matches(&self, other: &QualifiedName) -> bool {
        self.namespace_uri == other.namespace_uri && self.local_name == other.local_name
    }
}

impl From<&str> for QualifiedName {
    fn from(name: &str) -> Self {
        Self::from_string(name)
    }
}

impl std::fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.qualified_name)
    }
}

// ============================================================================
// SCOPED RESOLUTION
// ============================================================================

/// One element's worth of `xmlns` declarations
#[derive(Debug, Clone, Default)]
struct Scope {
    prefixes: Vec<(String, String)>,
    default_namespace: Option<String>,
}

/// Stack of in-scope namespace declarations, one frame per open element.
///
/// Undeclared prefixes fall back to the well-known ODF prefixes, so
/// fragments cut out of a larger document still resolve.
#[derive(Debug, Clone, Default)]
pub struct NamespaceScopes {
    frames: Vec<Scope>,
}

impl NamespaceScopes {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a frame for an element whose start tag declared `declarations`
    /// (`("xmlns", uri)` or `("xmlns:prefix", uri)` pairs).
    pub fn push<'a>(&mut self, declarations: impl IntoIterator<Item = (&'a str, &'a str)>) {
        let mut scope = Scope::default();
        for (key, uri) in declarations {
            if key == "xmlns" {
                scope.default_namespace = Some(uri.to_string());
            } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                scope.prefixes.push((prefix.to_string(), uri.to_string()));
            }
        }
        self.frames.push(scope);
    }

    /// Close the innermost frame
    pub fn pop(&mut self) {
        self.frames.pop();
    }

    /// Resolve a prefix to its namespace URI
    pub fn resolve_prefix(&self, prefix: &str) -> Option<&str> {
        self.frames
            .iter()
            .rev()
            .flat_map(|scope| scope.prefixes.iter().rev())
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
            .or_else(|| QualifiedName::prefix_to_uri(prefix))
    }

    /// Innermost default namespace, if any
    pub fn default_namespace(&self) -> Option<&str> {
        self.frames
            .iter()
            .rev()
            .find_map(|scope| scope.default_namespace.as_deref())
    }

    /// Resolve an element tag name; unprefixed names take the default namespace
    pub fn element_name(&self, raw: &str) -> QualifiedName {
        match raw.split_once(':') {
            Some((prefix, local)) => QualifiedName::new(self.resolve_prefix(prefix), local),
            None => QualifiedName::new(self.default_namespace(), raw),
        }
    }

    /// Resolve an attribute name; unprefixed attributes have no namespace
    pub fn attribute_name(&self, raw: &str) -> QualifiedName {
        match raw.split_once(':') {
            Some((prefix, local)) => QualifiedName::new(self.resolve_prefix(prefix), local),
            None => QualifiedName::new(None, raw),
        }
    }
}
