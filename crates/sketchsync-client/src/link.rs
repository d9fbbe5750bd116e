//! TCP link to the relay server.
//!
//! A background thread blocks on the inbound stream and turns each received
//! protocol line into an event; the GUI thread drains them with
//! [`ServerLink::poll_events`] between frames. Outbound lines are written
//! directly from the caller's thread. Teardown is driven by socket shutdown:
//! closing either side unblocks the reader, which reports `Disconnected` and
//! exits.

use std::io::{self, BufRead, BufReader, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::{self, JoinHandle};

/// Events from the server link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    /// One protocol line received from the server.
    Line(String),
    /// The connection ended (peer close or I/O error). Terminal.
    Disconnected,
}

/// A connection to the sketch relay server.
pub struct ServerLink {
    stream: TcpStream,
    event_rx: Receiver<LinkEvent>,
    connected: bool,
    _reader: JoinHandle<()>,
}

impl ServerLink {
    /// Connect and start the background reader.
    pub fn connect(addr: impl ToSocketAddrs) -> io::Result<Self> {
        let stream = TcpStream::connect(addr)?;
        let reader_stream = stream.try_clone()?;
        let (event_tx, event_rx) = channel();
        let reader = thread::spawn(move || read_loop(reader_stream, &event_tx));
        log::info!("connected to sketch server");
        Ok(Self {
            stream,
            event_rx,
            connected: true,
            _reader: reader,
        })
    }

    /// Send one protocol line.
    pub fn send(&mut self, line: &str) -> io::Result<()> {
        self.stream.write_all(line.as_bytes())?;
        self.stream.write_all(b"\n")
    }

    /// Drain pending events (non-blocking).
    pub fn poll_events(&mut self) -> Vec<LinkEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            if event == LinkEvent::Disconnected {
                self.connected = false;
            }
            events.push(event);
        }
        events
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Close the connection; the reader thread exits at its next read.
    pub fn disconnect(&mut self) {
        let _ = self.stream.shutdown(Shutdown::Both);
        self.connected = false;
    }
}

impl Drop for ServerLink {
    fn drop(&mut self) {
        self.disconnect();
    }
}

fn read_loop(stream: TcpStream, event_tx: &Sender<LinkEvent>) {
    let reader = BufReader::new(stream);
    for line in reader.lines() {
        match line {
            Ok(line) => {
                // Receiver gone means the link was dropped; just exit.
                if event_tx.send(LinkEvent::Line(line)).is_err() {
                    return;
                }
            }
            Err(e) => {
                log::warn!("server link read error: {e}");
                break;
            }
        }
    }
    log::info!("server link closed");
    let _ = event_tx.send(LinkEvent::Disconnected);
}
