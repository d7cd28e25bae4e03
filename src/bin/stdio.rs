use std::process::ExitCode;

use tutorial_mcp_server::{bootstrap, transport::TransportKind};

fn main() -> ExitCode {
    bootstrap::main(TransportKind::Stdio)
}
