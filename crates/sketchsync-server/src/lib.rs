//! SketchSync relay server.
//!
//! Holds the single authoritative [`Sketch`] and relays every mutation line
//! between connected editors.
//!
//! ## Per-connection lifecycle
//!
//! 1. Accept -> register a connection id with the live set
//! 2. Sync -> replay one `add` line per shape (ascending id, current count)
//! 3. Stream -> apply each inbound line to the store, fan it out to every
//!    *other* connection; forward relayed lines from peers
//! 4. Close -> EOF or I/O error deregisters the connection on every exit path
//!
//! Applying a line and publishing it to the relay channel happen under the
//! sketch lock, and a newcomer snapshots + subscribes under that same lock,
//! so every client observes the full mutation history in one total order and
//! a newcomer misses nothing and sees nothing twice. The lock is never held
//! across socket I/O; a slow client only degrades its own stream.

use sketchsync_core::protocol::{Command, ProtocolError};
use sketchsync_core::sketch::Sketch;
use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::{AsyncWrite, AsyncWriteExt, AsyncBufReadExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{Mutex, broadcast};
use tracing::{info, warn};

/// Default listen port, overridable via `SKETCHSYNC_PORT`.
pub const DEFAULT_PORT: u16 = 4242;

/// Relay backlog per connection before a slow client starts missing lines.
const RELAY_CAPACITY: usize = 256;

/// One line in flight, tagged with the connection that sent it so the
/// sender's own subscription can skip it.
#[derive(Debug, Clone)]
struct Relay {
    from: u64,
    line: Arc<str>,
}

/// Shared server state: the authoritative sketch, the fan-out channel, and
/// the live-connection registry.
pub struct ServerState {
    sketch: Mutex<Sketch>,
    relay_tx: broadcast::Sender<Relay>,
    clients: Mutex<HashSet<u64>>,
    next_client_id: AtomicU64,
}

impl ServerState {
    pub fn new() -> Self {
        let (relay_tx, _) = broadcast::channel(RELAY_CAPACITY);
        Self {
            sketch: Mutex::new(Sketch::new()),
            relay_tx,
            clients: Mutex::new(HashSet::new()),
            next_client_id: AtomicU64::new(1),
        }
    }

    pub async fn client_count(&self) -> usize {
        self.clients.lock().await.len()
    }

    async fn register(&self) -> u64 {
        let id = self.next_client_id.fetch_add(1, Ordering::Relaxed);
        self.clients.lock().await.insert(id);
        id
    }

    async fn deregister(&self, id: u64) {
        self.clients.lock().await.remove(&id);
    }

    /// Apply one inbound line to the authoritative sketch and publish it for
    /// every other live connection. Parse failures leave the store and the
    /// relay untouched.
    async fn apply_and_relay(&self, from: u64, line: &str) -> Result<(), ProtocolError> {
        let command: Command = line.parse()?;
        let mut sketch = self.sketch.lock().await;
        command.apply(&mut sketch);
        // Channel send is non-blocking; no receivers just means no peers yet.
        let _ = self.relay_tx.send(Relay {
            from,
            line: line.into(),
        });
        Ok(())
    }

    /// Snapshot the current sketch as `add` lines and subscribe to the relay
    /// in one atomic step, so a newcomer's replay is a consistent prefix of
    /// the mutation history.
    async fn snapshot_and_subscribe(&self) -> (Vec<String>, broadcast::Receiver<Relay>) {
        let sketch = self.sketch.lock().await;
        let rx = self.relay_tx.subscribe();
        let count = sketch.shape_count();
        let lines = sketch
            .iter()
            .map(|(id, shape)| format!("add {id} {count} {shape}"))
            .collect();
        (lines, rx)
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Accept loop: spawns one handler task per connection and touches no shared
/// state itself.
pub async fn serve(listener: TcpListener, state: Arc<ServerState>) -> std::io::Result<()> {
    loop {
        let (stream, addr) = listener.accept().await?;
        let state = Arc::clone(&state);
        tokio::spawn(handle_client(stream, addr, state));
    }
}

/// Drive one client connection from sync through streaming to close.
async fn handle_client(stream: TcpStream, addr: SocketAddr, state: Arc<ServerState>) {
    let client_id = state.register().await;
    info!(client_id, %addr, "client connected");

    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    // Newcomer sync: the full current state, before any live line.
    let (snapshot, mut relay_rx) = state.snapshot_and_subscribe().await;
    for line in &snapshot {
        if write_line(&mut write_half, line).await.is_err() {
            state.deregister(client_id).await;
            info!(client_id, "client disconnected during sync");
            return;
        }
    }

    loop {
        tokio::select! {
            inbound = lines.next_line() => match inbound {
                Ok(Some(line)) => {
                    if let Err(e) = state.apply_and_relay(client_id, &line).await {
                        warn!(client_id, error = %e, line, "dropping undecodable line");
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(client_id, error = %e, "read failed");
                    break;
                }
            },
            relayed = relay_rx.recv() => match relayed {
                Ok(relay) => {
                    // Broadcast exclusion: never echo a line back to its sender.
                    if relay.from != client_id
                        && write_line(&mut write_half, &relay.line).await.is_err()
                    {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(client_id, skipped, "relay backlog overflowed, client missed lines");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }

    state.deregister(client_id).await;
    info!(client_id, "client disconnected");
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, line: &str) -> std::io::Result<()> {
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await
}
