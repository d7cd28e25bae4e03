//! Model Context Protocol (MCP) server handling and JSON-RPC implementations
//!
//! Provides protocol-level specifics surrounding JSON-RPC validation, negotiation, formatting,
//! routing, and the registry that maps capability names to handlers.

pub mod registry;
pub mod rpc;
pub mod server;
