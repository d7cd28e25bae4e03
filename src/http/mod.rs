//! HTTP transport layer for the Model Context Protocol
//!
//! Provides the external API routing: the stateless `/mcp` endpoint, the
//! `/sse` + `/message` pair, and the shared metadata endpoints.

pub mod handlers;
pub mod sse;
