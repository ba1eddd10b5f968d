//! REST route descriptions.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// REST API base URL.
pub const API_BASE_URL: &str = "https://discord.com/api/v10";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ResourceError {
    #[error("route {route} has no value for `{name}`")]
    MissingParam { route: String, name: String },

    #[error("route {route} has an unclosed placeholder")]
    UnclosedPlaceholder { route: String },
}

/// A REST route: method, path template and the values for its placeholders.
///
/// Templates use `{name}` placeholders, e.g. `/channels/{channel_id}/messages`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    method: Method,
    template: String,
    params: BTreeMap<String, String>,
}

impl Resource {
    #[must_use]
    pub fn new(method: Method, template: impl Into<String>) -> Self {
        Self {
            method,
            template: template.into(),
            params: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(name.into(), value.to_string());
        self
    }

    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// The uncompiled path, shared by every request to this route.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Fills in every placeholder of the template.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if a placeholder has no value or is not closed.
    pub fn compile(&self) -> Result<String, ResourceError> {
        let mut path = String::with_capacity(self.template.len() + 16);
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find('{') {
            path.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after
                .find('}')
                .ok_or_else(|| ResourceError::UnclosedPlaceholder {
                    route: self.template.clone(),
                })?;
            let name = &after[..end];
            let value = self
                .params
                .get(name)
                .ok_or_else(|| ResourceError::MissingParam {
                    route: self.template.clone(),
                    name: name.to_string(),
                })?;
            path.push_str(value);
            rest = &after[end + 1..];
        }
        path.push_str(rest);

        Ok(path)
    }

    /// Full URL of the compiled route.
    ///
    /// # Errors
    ///
    /// Same as [`Resource::compile`].
    pub fn url(&self) -> Result<String, ResourceError> {
        Ok(format!("{API_BASE_URL}{}", self.compile()?))
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.compile() {
            Ok(path) => write!(f, "{} {path}", self.method),
            Err(_) => write!(f, "{} {}", self.method, self.template),
        }
    }
}
