use thiserror::Error;

use crate::{utils::url::Url, Logger};

/// Query parameter carrying the credential when none is configured.
pub(crate) const DEFAULT_TOKEN_QUERY_PARAMETER: &str = "token";

/// A media resource the hosting view asked to play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SourceRequest {
    /// Locator of the resource, as given by the hosting view.
    url: Url,

    /// If `true`, the resource can only be loaded with the session's credential.
    authentication_required: bool,
}

impl SourceRequest {
    pub(crate) fn new(url: Url, authentication_required: bool) -> Self {
        Self {
            url,
            authentication_required,
        }
    }

    pub(crate) fn url(&self) -> &Url {
        &self.url
    }

    pub(crate) fn authentication_required(&self) -> bool {
        self.authentication_required
    }
}

/// Outcome of resolving a `SourceRequest`: either the locator the media element should load,
/// or the reason why nothing can be loaded.
pub(crate) type ResolvedSource = Result<Url, SourceResolutionError>;

/// Reasons for which a locator requiring authentication could not be resolved.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SourceResolutionError {
    #[error("You are not signed in. Please sign in again to play this media.")]
    MissingToken,
    #[error("Your session is no longer valid. Please sign in again to play this media.")]
    Unauthenticated,
}

/// Turn a `SourceRequest` into the final locator, given the session's credential.
///
/// When authentication is not required the locator is returned unchanged, whatever the
/// credential. Otherwise the credential is appended as the `query_parameter` query
/// parameter, keeping the query string already present.
pub(crate) fn resolve_source(
    request: &SourceRequest,
    token: Option<&str>,
    query_parameter: &str,
) -> ResolvedSource {
    if !request.authentication_required {
        return Ok(request.url.clone());
    }
    match token {
        None => Err(SourceResolutionError::MissingToken),
        Some(token) if token.trim().is_empty() => Err(SourceResolutionError::Unauthenticated),
        Some(token) => Ok(request.url.with_query_param(query_parameter, token)),
    }
}

/// Resolves `SourceRequest`s, re-using the last result as long as neither the request nor
/// the credential changed.
pub(crate) struct SourceResolver {
    query_parameter: String,
    last: Option<CachedResolution>,
}

struct CachedResolution {
    request: SourceRequest,
    token: Option<String>,
    resolved: ResolvedSource,
}

impl SourceResolver {
    pub(crate) fn new() -> Self {
        Self {
            query_parameter: DEFAULT_TOKEN_QUERY_PARAMETER.to_owned(),
            last: None,
        }
    }

    /// Update the query parameter the credential is carried in.
    pub(crate) fn set_query_parameter(&mut self, query_parameter: String) {
        if query_parameter != self.query_parameter {
            self.query_parameter = query_parameter;
            self.invalidate();
        }
    }

    /// Resolve `request`, calling `token_lookup` only if authentication is required.
    pub(crate) fn resolve(
        &mut self,
        request: &SourceRequest,
        token_lookup: impl FnOnce() -> Option<String>,
    ) -> ResolvedSource {
        let token = if request.authentication_required {
            token_lookup()
        } else {
            None
        };

        if let Some(cached) = &self.last {
            if &cached.request == request && cached.token == token {
                Logger::debug("Source: Re-using previous resolution");
                return cached.resolved.clone();
            }
        }

        let resolved = resolve_source(request, token.as_deref(), &self.query_parameter);
        match &resolved {
            Ok(_) => Logger::lazy_debug(&|| {
                format!(
                    "Source: Resolved {} (authenticated: {})",
                    request.url, request.authentication_required
                )
            }),
            Err(err) => Logger::lazy_warn(&|| format!("Source: Cannot resolve locator: {err:?}")),
        }
        self.last = Some(CachedResolution {
            request: request.clone(),
            token,
            resolved: resolved.clone(),
        });
        resolved
    }

    /// Forget the last resolution, forcing the next `resolve` call to compute it again.
    pub(crate) fn invalidate(&mut self) {
        self.last = None;
    }
}
