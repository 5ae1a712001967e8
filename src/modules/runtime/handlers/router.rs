//! Route table

use smartpos_types::Collection;
use std::fmt;
use std::str::FromStr;

/// HTTP methods the gateway forwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Options,
}

impl FromStr for Method {
    type Err = String;

    /// Exact, case-sensitive match: `get` is not `GET`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            "OPTIONS" => Ok(Method::Options),
            _ => Err(format!("Unsupported method: {}", s)),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
        })
    }
}

/// Operations the handler can dispatch to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Health,
    List(Collection),
    CreateTransaction,
}

/// Every routable `(method, path)` pair. Paths match exactly, with no
/// trailing-slash or case normalization.
pub const ROUTES: &[(Method, &str, Route)] = &[
    (Method::Get, "/api/health", Route::Health),
    (Method::Get, "/api/items", Route::List(Collection::Items)),
    (Method::Get, "/api/transactions", Route::List(Collection::Transactions)),
    (Method::Get, "/api/sessions", Route::List(Collection::Sessions)),
    (Method::Get, "/api/customers", Route::List(Collection::Customers)),
    (Method::Post, "/api/transactions", Route::CreateTransaction),
];

impl Route {
    /// Look up the route for a raw method and path
    pub fn resolve(method: &str, path: &str) -> Option<Route> {
        let method: Method = method.parse().ok()?;
        ROUTES
            .iter()
            .find(|(m, p, _)| *m == method && *p == path)
            .map(|(_, _, route)| *route)
    }
}
