//! Authentication and authorization.
//!
//! Houses OAuth scope handling ([`AuthScopes`]) and the install-time OAuth
//! flow ([`oauth`]).

pub mod oauth;
mod scopes;

pub use scopes::AuthScopes;
