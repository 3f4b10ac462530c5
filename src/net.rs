//! TCP adapters.
//!
//! Received data is copied out through the allocation policy, so a read
//! can land in the caller's arena scope like any other construction
//! primitive result.

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};

use crate::arena::Arena;
use crate::bytes::Bytes;
use crate::concat::try_concat_bytes;
use crate::error::Result;

/// Upper bound on the bytes returned by a single read.
pub const READ_CHUNK: usize = 4096;

#[derive(Debug)]
pub struct Listener {
    inner: TcpListener,
}

#[derive(Debug)]
pub struct Conn {
    inner: TcpStream,
}

impl Listener {
    pub fn bind<A: ToSocketAddrs>(addr: A) -> io::Result<Self> {
        Ok(Self {
            inner: TcpListener::bind(addr)?,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.inner.local_addr()
    }

    /// Block until a peer connects. Nagle is disabled on the new stream
    /// when the platform allows it.
    pub fn accept(&self) -> io::Result<Conn> {
        let (stream, peer) = self.inner.accept()?;
        if let Err(e) = stream.set_nodelay(true) {
            log::debug!("set_nodelay failed for {}: {}", peer, e);
        }
        log::debug!("accepted connection from {}", peer);
        Ok(Conn { inner: stream })
    }
}

impl Conn {
    pub fn connect<A: ToSocketAddrs>(addr: A) -> io::Result<Self> {
        Ok(Self {
            inner: TcpStream::connect(addr)?,
        })
    }

    /// One read of at most [`READ_CHUNK`] bytes, heap-owned.
    /// [`Bytes::Empty`] means the peer closed the stream.
    pub fn read(&mut self) -> Result<Bytes<'static>> {
        self.read_in(None)
    }

    /// Like [`Conn::read`], but the result is allocated through `arena`
    /// when it has room.
    pub fn read_in<'a>(&mut self, arena: Option<&'a Arena<'_>>) -> Result<Bytes<'a>> {
        let mut chunk = [0u8; READ_CHUNK];
        let n = self.inner.read(&mut chunk)?;
        Ok(try_concat_bytes(arena, Some(&chunk[..n]), None)?)
    }

    pub fn write(&mut self, data: &[u8]) -> io::Result<()> {
        self.inner.write_all(data)?;
        self.inner.flush()
    }
}
