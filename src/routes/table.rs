// src/routes/table.rs
//! Ordered route table and its resolver.
//!
//! Resolution is two linear passes: first every `Exact` route in declaration
//! order, then every `Prefix` route. An exact route therefore wins over a
//! prefix route no matter where either is declared.

use axum::http::Method;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Health,
    Greeting,
    Chat,
    Asset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    Exact(&'static str),
    /// Matches any path starting with the prefix; the rest of the path is
    /// captured as the single positional parameter.
    Prefix(&'static str),
}

#[derive(Debug)]
pub struct Route {
    pub matcher: Matcher,
    pub methods: &'static [(Method, Endpoint)],
}

impl Route {
    fn endpoint_for(&self, method: &Method) -> Option<Endpoint> {
        self.methods
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, endpoint)| *endpoint)
    }

    fn allowed(&self) -> Vec<Method> {
        self.methods.iter().map(|(m, _)| m.clone()).collect()
    }
}

pub static ROUTES: &[Route] = &[
    Route {
        matcher: Matcher::Exact("/api/health"),
        methods: &[(Method::GET, Endpoint::Health)],
    },
    Route {
        matcher: Matcher::Exact("/api/greeting"),
        methods: &[(Method::GET, Endpoint::Greeting)],
    },
    Route {
        matcher: Matcher::Exact("/api/chat"),
        methods: &[(Method::POST, Endpoint::Chat)],
    },
    // Anything not claimed above falls through to the static assets.
    Route {
        matcher: Matcher::Prefix("/"),
        methods: &[(Method::GET, Endpoint::Asset)],
    },
];

#[derive(Debug, PartialEq, Eq)]
pub enum Resolution<'p> {
    Matched {
        endpoint: Endpoint,
        params: Vec<&'p str>,
    },
    MethodNotAllowed {
        allowed: Vec<Method>,
    },
    NotFound,
}

pub fn resolve<'p>(routes: &[Route], method: &Method, path: &'p str) -> Resolution<'p> {
    let exact = routes
        .iter()
        .find(|route| matches!(route.matcher, Matcher::Exact(p) if p == path))
        .map(|route| (route, Vec::new()));

    let matched = exact.or_else(|| {
        routes.iter().find_map(|route| match route.matcher {
            Matcher::Prefix(prefix) => path.strip_prefix(prefix).map(|rest| (route, vec![rest])),
            Matcher::Exact(_) => None,
        })
    });

    let Some((route, params)) = matched else {
        return Resolution::NotFound;
    };

    match route.endpoint_for(method) {
        Some(endpoint) => Resolution::Matched { endpoint, params },
        None => Resolution::MethodNotAllowed {
            allowed: route.allowed(),
        },
    }
}
