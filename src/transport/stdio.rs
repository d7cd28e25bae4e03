use std::io;

use async_trait::async_trait;
use serde_json::Value;
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader},
    sync::mpsc,
};
use tracing::{debug, info};

use crate::mcp::rpc::{json_rpc_error, PARSE_ERROR};
use crate::mcp::server::handle_json_rpc_payload;
use crate::transport::{Transport, TransportError, TransportKind};
use crate::AppState;

const OUTBOUND_CAPACITY: usize = 64;

/// Newline-delimited JSON-RPC over the process's stdin and stdout.
#[derive(Debug, Default)]
pub struct StdioTransport;

#[async_trait]
impl Transport for StdioTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Stdio
    }

    async fn serve(self: Box<Self>, state: AppState) -> Result<(), TransportError> {
        serve_lines(state, tokio::io::stdin(), tokio::io::stdout()).await
    }
}

/// Dispatches every inbound line on its own task; a single writer keeps
/// outbound lines whole. Returns once the reader hits EOF and every pending
/// response has been written.
pub async fn serve_lines<R, W>(state: AppState, reader: R, writer: W) -> Result<(), TransportError>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (sender, mut receiver) = mpsc::channel::<Value>(OUTBOUND_CAPACITY);

    let writer_task = tokio::spawn(async move {
        let mut writer = writer;
        while let Some(message) = receiver.recv().await {
            let mut line = message.to_string();
            line.push('\n');
            writer.write_all(line.as_bytes()).await?;
            writer.flush().await?;
        }
        Ok::<(), io::Error>(())
    });

    let mut reader = BufReader::new(reader);
    let mut buffer = Vec::new();
    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer).await? == 0 {
            break;
        }

        // Raw bytes: a line that is not UTF-8 is a parse error, not a transport failure.
        let line = buffer.trim_ascii();
        if line.is_empty() {
            continue;
        }

        let payload: Value = match serde_json::from_slice(line) {
            Ok(value) => value,
            Err(err) => {
                debug!(error = %err, "discarding unparseable stdio line");
                if sender
                    .send(json_rpc_error(None, PARSE_ERROR, "Parse error"))
                    .await
                    .is_err()
                {
                    break;
                }
                continue;
            }
        };

        let state = state.clone();
        let sender = sender.clone();
        tokio::spawn(async move {
            if let Some(response) = handle_json_rpc_payload(&state, payload).await {
                // A closed channel means the writer already failed.
                let _ = sender.send(response).await;
            }
        });
    }

    info!("stdin closed");
    drop(sender);
    writer_task.await.map_err(io::Error::other)??;
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use tokio::io::AsyncReadExt;

    use super::serve_lines;
    use crate::{build_registry, AppState};

    async fn run(input: &str) -> Vec<Value> {
        let state = AppState::new(None, build_registry());
        let (mut client, server) = tokio::io::duplex(256 * 1024);

        serve_lines(state, input.as_bytes(), server)
            .await
            .expect("stdio transport should finish cleanly");

        let mut output = String::new();
        client
            .read_to_string(&mut output)
            .await
            .expect("read transport output");
        output
            .lines()
            .map(|line| serde_json::from_str(line).expect("each output line is json"))
            .collect()
    }

    #[tokio::test]
    async fn answers_each_request_on_its_own_line() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"calculator","arguments":{"operation":"multiply","first_number":6,"second_number":7}}}"#,
            "\n",
        );

        let responses = run(input).await;
        assert_eq!(responses.len(), 2);

        let product = responses
            .iter()
            .find(|response| response["id"] == 2)
            .expect("calculator response");
        assert_eq!(
            product["result"]["content"][0]["text"],
            "6.00 × 7.00 = 42.000000"
        );
        assert!(responses.iter().any(|response| response["id"] == 1));
    }

    #[tokio::test]
    async fn unparseable_line_gets_parse_error() {
        let responses = run("{not json\n").await;

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["error"]["code"], -32700);
    }

    #[tokio::test]
    async fn invalid_utf8_line_does_not_end_the_session() {
        let mut input = b"\xff\xfe\n".to_vec();
        input.extend_from_slice(br#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#);
        input.push(b'\n');

        let state = AppState::new(None, build_registry());
        let (mut client, server) = tokio::io::duplex(64 * 1024);
        serve_lines(state, input.as_slice(), server)
            .await
            .expect("bad bytes must not fail the transport");

        let mut output = String::new();
        client
            .read_to_string(&mut output)
            .await
            .expect("read transport output");
        let responses: Vec<Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).expect("each output line is json"))
            .collect();

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["error"]["code"], -32700);
        assert_eq!(responses[1]["id"], 1);
        assert!(responses[1]["result"].is_object());
    }

    #[tokio::test]
    async fn final_line_without_newline_is_answered() {
        let responses = run(r#"{"jsonrpc":"2.0","id":"last","method":"ping"}"#).await;

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["id"], "last");
    }

    #[tokio::test]
    async fn empty_input_ends_cleanly() {
        assert!(run("").await.is_empty());
    }
}
