//! Line transport for the MCP server.
//!
//! - Messages are JSON, one per line
//! - Responses must not contain embedded newlines
//! - The input side is read until EOF
//! - stderr is reserved for logging
//!
//! The transport is generic over its streams so the server loop can be driven
//! by in-memory buffers as well as by stdin/stdout.

use std::io;

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// A newline-delimited message transport.
pub struct LineTransport<R, W> {
    reader: R,
    writer: W,
}

/// The transport used in production.
pub type StdioTransport = LineTransport<BufReader<tokio::io::Stdin>, tokio::io::Stdout>;

impl LineTransport<BufReader<tokio::io::Stdin>, tokio::io::Stdout> {
    /// Creates a transport over the process's stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> LineTransport<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a transport over arbitrary streams.
    #[must_use]
    pub const fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Reads the next line without its terminator.
    ///
    /// Returns `None` at EOF. Invalid UTF-8 is replaced rather than treated as
    /// a stream failure, so it surfaces as a parse error for that line only.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails.
    pub async fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buffer = Vec::new();
        let bytes_read = self.reader.read_until(b'\n', &mut buffer).await?;

        if bytes_read == 0 {
            return Ok(None);
        }

        if buffer.last() == Some(&b'\n') {
            buffer.pop();
            if buffer.last() == Some(&b'\r') {
                buffer.pop();
            }
        }

        Ok(Some(String::from_utf8_lossy(&buffer).into_owned()))
    }

    /// Serialises a message and writes it as one line.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation or writing fails.
    pub async fn write_message<T: Serialize>(&mut self, message: &T) -> io::Result<()> {
        let json = serde_json::to_string(message)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        self.write_raw(&json).await
    }

    /// Writes a raw JSON string with newline termination and flushes.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    async fn write_raw(&mut self, json: &str) -> io::Result<()> {
        debug_assert!(
            !json.contains('\n'),
            "JSON message must not contain embedded newlines"
        );

        self.writer.write_all(json.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;

        Ok(())
    }

    /// Returns the writer, consuming the transport.
    pub fn into_writer(self) -> W {
        self.writer
    }
}
