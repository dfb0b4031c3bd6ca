//! Client-side route table
//!
//! Routes are declared as a tree of [`Route`]s and compiled into a flat,
//! ordered [`RouteTable`]. Matching follows the history router the console
//! runs under:
//!
//! - `:name` binds one non-empty path segment
//! - matching ignores case, a trailing slash, the query and the fragment
//! - children are tried before their parent, in declaration order
//! - `*` routes are always tried last

mod admin;

use std::collections::BTreeMap;

use regex::Regex;
use serde::Serialize;

use crate::views::{Loading, View};

pub use admin::admin_routes;

/// Depth at which a redirect chain is treated as a loop
const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("no route named {0}")]
    UnknownRoute(String),

    #[error("route {route} needs parameter {param}")]
    MissingParam { route: String, param: String },

    #[error("no route matches {0}")]
    NoMatch(String),

    #[error("redirect loop at {0}")]
    RedirectLoop(String),

    #[error("invalid route pattern {pattern}: {reason}")]
    Pattern { pattern: String, reason: String },
}

/// Per-route metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteMeta {
    pub title: Option<&'static str>,
    pub requires_auth: bool,
    pub permission: Option<&'static str>,
}

/// What a route does once matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RouteTarget {
    View(View),
    Redirect(&'static str),
}

/// One declared route
#[derive(Debug, Clone)]
pub struct Route {
    pub path: &'static str,
    pub name: Option<&'static str>,
    pub target: RouteTarget,
    pub meta: RouteMeta,
    pub children: Vec<Route>,
}

impl Route {
    pub fn view(path: &'static str, name: &'static str, view: View) -> Self {
        Self {
            path,
            name: Some(name),
            target: RouteTarget::View(view),
            meta: RouteMeta::default(),
            children: Vec::new(),
        }
    }

    /// Layout route that only hosts children
    pub fn layout(path: &'static str, view: View, children: Vec<Route>) -> Self {
        Self {
            path,
            name: None,
            target: RouteTarget::View(view),
            meta: RouteMeta::default(),
            children,
        }
    }

    pub fn redirect(path: &'static str, to: &'static str) -> Self {
        Self {
            path,
            name: None,
            target: RouteTarget::Redirect(to),
            meta: RouteMeta::default(),
            children: Vec::new(),
        }
    }

    pub fn title(mut self, title: &'static str) -> Self {
        self.meta.title = Some(title);
        self
    }

    pub fn requires_auth(mut self) -> Self {
        self.meta.requires_auth = true;
        self
    }

    pub fn permission(mut self, permission: &'static str) -> Self {
        self.meta.permission = Some(permission);
        self
    }
}

/// A route flattened to its full path, ready to match
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    pub path: String,
    pub name: Option<&'static str>,
    pub target: RouteTarget,
    pub meta: RouteMeta,
    /// Views from the outermost layout down to this route
    pub chain: Vec<View>,
    keys: Vec<String>,
    regex: Regex,
}

impl CompiledRoute {
    fn compile(
        path: String,
        route: &Route,
        chain: Vec<View>,
    ) -> Result<Self, RouteError> {
        let (pattern, keys) = pattern_for(&path);
        let regex = Regex::new(&pattern).map_err(|e| RouteError::Pattern {
            pattern: path.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            path,
            name: route.name,
            target: route.target,
            meta: route.meta.clone(),
            chain,
            keys,
            regex,
        })
    }

    /// Parameter names in path order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn loading(&self) -> Loading {
        match self.target {
            RouteTarget::View(view) => view.loading(),
            RouteTarget::Redirect(_) => Loading::Eager,
        }
    }

    fn captures(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let caps = self.regex.captures(path)?;
        Some(
            self.keys
                .iter()
                .enumerate()
                .filter_map(|(i, key)| {
                    caps.get(i + 1)
                        .map(|m| (key.clone(), m.as_str().to_string()))
                })
                .collect(),
        )
    }

    fn is_wildcard(&self) -> bool {
        self.path == "*"
    }
}

/// Outcome of resolving a location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRoute {
    pub name: Option<&'static str>,
    /// Pattern of the matched route
    pub pattern: String,
    /// Path that was matched, without query or fragment
    pub path: String,
    pub params: BTreeMap<String, String>,
    pub view: Option<View>,
    pub matched: Vec<View>,
    pub meta: RouteMeta,
    pub loading: Loading,
    /// Original path when a redirect was followed
    pub redirected_from: Option<String>,
}

/// Compiled, ordered route table
#[derive(Debug, Clone)]
pub struct RouteTable {
    base: String,
    routes: Vec<CompiledRoute>,
}

impl RouteTable {
    /// Compile `routes` under history base `base`
    pub fn new(base: &str, routes: &[Route]) -> Result<Self, RouteError> {
        let mut compiled = Vec::new();
        for route in routes {
            flatten(route, None, &[], &mut compiled)?;
        }
        // wildcards go last regardless of where they were declared
        let (wild, mut ordered): (Vec<_>, Vec<_>) =
            compiled.into_iter().partition(CompiledRoute::is_wildcard);
        ordered.extend(wild);

        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            routes: ordered,
        })
    }

    /// The admin console table
    pub fn admin() -> Result<Self, RouteError> {
        Self::new(crate::constants::ADMIN_ROUTER_BASE, &admin_routes())
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn routes(&self) -> &[CompiledRoute] {
        &self.routes
    }

    pub fn by_name(&self, name: &str) -> Option<&CompiledRoute> {
        self.routes.iter().find(|r| r.name == Some(name))
    }

    /// First route matching `path`, with its parameters
    pub fn find(&self, path: &str) -> Option<(&CompiledRoute, BTreeMap<String, String>)> {
        let path = clean_path(path);
        self.routes
            .iter()
            .find_map(|route| route.captures(&path).map(|params| (route, params)))
    }

    /// Resolve an application path, following redirects
    pub fn resolve(&self, path: &str) -> Result<ResolvedRoute, RouteError> {
        let original = clean_path(path);
        let mut current = original.clone();

        for _ in 0..MAX_REDIRECTS {
            let (route, params) = self
                .find(&current)
                .ok_or_else(|| RouteError::NoMatch(current.clone()))?;

            match route.target {
                RouteTarget::Redirect(to) => {
                    tracing::debug!(from = %current, %to, "following redirect");
                    current = to.to_string();
                }
                RouteTarget::View(view) => {
                    return Ok(ResolvedRoute {
                        name: route.name,
                        pattern: route.path.clone(),
                        redirected_from: (current != original).then(|| original.clone()),
                        path: current,
                        params,
                        view: Some(view),
                        matched: route.chain.clone(),
                        meta: route.meta.clone(),
                        loading: route.loading(),
                    });
                }
            }
        }

        Err(RouteError::RedirectLoop(original))
    }

    /// Resolve a browser location, stripping the history base first
    pub fn resolve_location(&self, location: &str) -> Result<ResolvedRoute, RouteError> {
        self.resolve(&self.strip_base(location))
    }

    /// Application path for a browser location
    pub fn strip_base(&self, location: &str) -> String {
        let path = clean_path(location);
        if self.base.is_empty() {
            return path;
        }
        let lower = path.to_ascii_lowercase();
        let base = self.base.to_ascii_lowercase();
        if lower == base {
            "/".to_string()
        } else if lower.starts_with(&format!("{}/", base)) {
            path[self.base.len()..].to_string()
        } else {
            path
        }
    }

    /// Application path for a named route
    pub fn path_for(&self, name: &str, params: &BTreeMap<String, String>) -> Result<String, RouteError> {
        let route = self
            .by_name(name)
            .ok_or_else(|| RouteError::UnknownRoute(name.to_string()))?;

        let segments = route
            .path
            .split('/')
            .map(|segment| match segment.strip_prefix(':') {
                Some(key) => params.get(key).cloned().ok_or_else(|| RouteError::MissingParam {
                    route: name.to_string(),
                    param: key.to_string(),
                }),
                None => Ok(segment.to_string()),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(segments.join("/"))
    }

    /// Browser location for a named route, including the history base
    pub fn href(&self, name: &str, params: &BTreeMap<String, String>) -> Result<String, RouteError> {
        let path = self.path_for(name, params)?;
        Ok(format!("{}{}", self.base, path))
    }
}

fn flatten(
    route: &Route,
    parent: Option<&str>,
    parent_chain: &[View],
    out: &mut Vec<CompiledRoute>,
) -> Result<(), RouteError> {
    let path = join_path(parent, route.path);
    let mut chain = parent_chain.to_vec();
    if let RouteTarget::View(view) = route.target {
        chain.push(view);
    }

    for child in &route.children {
        flatten(child, Some(&path), &chain, out)?;
    }
    out.push(CompiledRoute::compile(path, route, chain)?);
    Ok(())
}

fn join_path(parent: Option<&str>, path: &str) -> String {
    match parent {
        _ if path.starts_with('/') || path == "*" => path.to_string(),
        None => path.to_string(),
        Some(parent) if path.is_empty() => parent.to_string(),
        Some(parent) => format!("{}/{}", parent.trim_end_matches('/'), path),
    }
}

/// Regex for a route path plus its parameter names
fn pattern_for(path: &str) -> (String, Vec<String>) {
    if path == "*" {
        return ("^(.*)$".to_string(), vec!["pathMatch".to_string()]);
    }

    let mut keys = Vec::new();
    let body = path
        .trim_end_matches('/')
        .split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(key) => {
                keys.push(key.to_string());
                "([^/]+?)".to_string()
            }
            None => regex::escape(segment),
        })
        .collect::<Vec<_>>()
        .join("/");

    (format!("(?i)^{}/?$", body), keys)
}

/// Drop query and fragment, make sure the path is rooted
fn clean_path(location: &str) -> String {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    let path = &location[..end];
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_pattern_for() {
        let (pattern, keys) = pattern_for("/contest/:contestId/edit");
        assert_eq!(pattern, "(?i)^/contest/([^/]+?)/edit/?$");
        assert_eq!(keys, vec!["contestId"]);

        let (pattern, keys) = pattern_for("/");
        assert_eq!(pattern, "(?i)^/?$");
        assert!(keys.is_empty());
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path(Some("/"), ""), "/");
        assert_eq!(join_path(Some("/"), "/user"), "/user");
        assert_eq!(join_path(Some("/"), "admin/generate-tags"), "/admin/generate-tags");
        assert_eq!(join_path(Some("/contest"), "list"), "/contest/list");
        assert_eq!(join_path(None, "*"), "*");
    }

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path("/problems?page=2#top"), "/problems");
        assert_eq!(clean_path("user"), "/user");
        assert_eq!(clean_path(""), "/");
    }

    #[test]
    fn test_redirect_loop_detected() {
        let table = RouteTable::new(
            "/",
            &[Route::redirect("/a", "/b"), Route::redirect("/b", "/a")],
        )
        .unwrap();
        assert_eq!(
            table.resolve("/a"),
            Err(RouteError::RedirectLoop("/a".to_string()))
        );
    }

    #[test]
    fn test_no_match_without_wildcard() {
        let table = RouteTable::new("/", &[Route::view("/login", "login", View::Login)]).unwrap();
        assert!(matches!(table.resolve("/nowhere"), Err(RouteError::NoMatch(_))));
    }

    #[test]
    fn test_path_for_missing_param() {
        let table = RouteTable::new(
            "/",
            &[Route::view("/contest/:contestId/edit", "edit-contest", View::Contest)],
        )
        .unwrap();
        assert_eq!(
            table.path_for("edit-contest", &params(&[])),
            Err(RouteError::MissingParam {
                route: "edit-contest".to_string(),
                param: "contestId".to_string(),
            })
        );
        assert_eq!(
            table.path_for("edit-contest", &params(&[("contestId", "7")])).unwrap(),
            "/contest/7/edit"
        );
        assert!(matches!(
            table.path_for("nope", &params(&[])),
            Err(RouteError::UnknownRoute(_))
        ));
    }
}
