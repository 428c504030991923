//! REST actions and their declared parameters.

use std::fmt;

use crate::path::{split_words, RestPath};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Patch => "PATCH",
            HttpVerb::Delete => "DELETE",
        };
        write!(f, "{s}")
    }
}

/// One declared parameter of a REST action.
#[derive(Debug, Clone, PartialEq)]
pub enum RestParam {
    Path { name: String },
    Query { name: String },
    /// Body object, optionally carrying the declared type name of its
    /// schema definition and its field names.
    Body {
        type_name: Option<String>,
        fields: Vec<String>,
    },
}

impl RestParam {
    pub fn path(name: impl Into<String>) -> Self {
        Self::Path { name: name.into() }
    }

    pub fn query(name: impl Into<String>) -> Self {
        Self::Query { name: name.into() }
    }

    pub fn body(type_name: Option<&str>, fields: &[&str]) -> Self {
        Self::Body {
            type_name: type_name.map(str::to_string),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Name of a path or query parameter.
    pub fn name(&self) -> Option<&str> {
        match self {
            RestParam::Path { name } | RestParam::Query { name } => Some(name),
            RestParam::Body { .. } => None,
        }
    }
}

/// One HTTP action on one path.
#[derive(Debug, Clone, PartialEq)]
pub struct RestCallAction {
    pub verb: HttpVerb,
    pub path: RestPath,
    pub params: Vec<RestParam>,
    /// Opaque name of the authentication info attached to this action.
    pub auth: Option<String>,
}

impl RestCallAction {
    pub fn new(verb: HttpVerb, path: RestPath, params: Vec<RestParam>) -> Self {
        Self {
            verb,
            path,
            params,
            auth: None,
        }
    }

    /// Stable identity of the action: verb plus path.
    pub fn name(&self) -> String {
        format!("{}:{}", self.verb, self.path)
    }

    pub fn body_param(&self) -> Option<&RestParam> {
        self.params
            .iter()
            .find(|p| matches!(p, RestParam::Body { .. }))
    }

    /// Word tokens of every body field name.
    pub fn body_field_tokens(&self) -> Vec<String> {
        match self.body_param() {
            Some(RestParam::Body { fields, .. }) => {
                fields.iter().flat_map(|f| split_words(f)).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Word tokens of the declared body type name, if any.
    pub fn body_type_tokens(&self) -> Vec<String> {
        match self.body_param() {
            Some(RestParam::Body {
                type_name: Some(name),
                ..
            }) => split_words(name),
            _ => Vec::new(),
        }
    }
}
