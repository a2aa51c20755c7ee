// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Byte-stream adapters over an initialized [`Cipher`].
//!
//! Both adapters report every cipher failure as a single `io::Error` of kind
//! `Other` whose inner error is the [`CryptoError`]. Neither supports
//! mark/reset.

use crate::cipher::front::Cipher;
use crate::config::{ResolverConfig, DEFAULT_STREAM_BUFFER_SIZE};
use crate::error::CryptoError;
use std::io::{self, Read, Write};

fn stream_error(error: CryptoError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, error)
}

/// Transforms bytes as they are read from the wrapped source.
pub struct CipherReader<R> {
    inner: R,
    cipher: Cipher,
    staging: Vec<u8>,
    buf: Vec<u8>,
    buf_off: usize,
    max_buf: usize,
    finalized: bool,
}

impl<R: Read> CipherReader<R> {
    pub fn new(inner: R, cipher: Cipher) -> Self {
        Self::with_capacity(inner, cipher, DEFAULT_STREAM_BUFFER_SIZE)
    }

    /// `capacity` bounds how much is pulled from the source per refill.
    pub fn with_capacity(inner: R, cipher: Cipher, capacity: usize) -> Self {
        Self {
            inner,
            cipher,
            staging: vec![0u8; capacity.max(1)],
            buf: Vec::new(),
            buf_off: 0,
            max_buf: 0,
            finalized: false,
        }
    }

    pub fn with_config(inner: R, cipher: Cipher, config: &ResolverConfig) -> Self {
        Self::with_capacity(inner, cipher, config.stream_buffer_size)
    }

    /// Transformed bytes ready to be read without touching the source.
    pub fn available(&self) -> usize {
        self.max_buf - self.buf_off
    }

    pub fn cipher(&self) -> &Cipher {
        &self.cipher
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> (R, Cipher) {
        (self.inner, self.cipher)
    }

    /// Refills the output buffer. `Ok(false)` means end of stream.
    fn next_chunk(&mut self) -> io::Result<bool> {
        loop {
            if self.finalized {
                return Ok(false);
            }

            let read = loop {
                match self.inner.read(&mut self.staging) {
                    Ok(n) => break n,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                }
            };

            if read == 0 {
                let output = self.cipher.do_final().map_err(stream_error)?;
                self.finalized = true;
                self.set_buf(output);
                return Ok(self.max_buf > 0);
            }

            // a partial block yields nothing yet; keep pulling instead of
            // reporting a false end of stream
            if let Some(output) = self
                .cipher
                .update(&self.staging[..read])
                .map_err(stream_error)?
            {
                self.set_buf(output);
                return Ok(true);
            }
        }
    }

    fn set_buf(&mut self, output: Vec<u8>) {
        self.max_buf = output.len();
        self.buf = output;
        self.buf_off = 0;
    }
}

impl<R: Read> Read for CipherReader<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if out.is_empty() {
            return Ok(0);
        }
        if self.buf_off >= self.max_buf && !self.next_chunk()? {
            return Ok(0);
        }

        let n = out.len().min(self.max_buf - self.buf_off);
        out[..n].copy_from_slice(&self.buf[self.buf_off..self.buf_off + n]);
        self.buf_off += n;
        Ok(n)
    }
}

impl<R> std::fmt::Debug for CipherReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherReader")
            .field("cipher", &self.cipher)
            .field("available", &(self.max_buf - self.buf_off))
            .field("finalized", &self.finalized)
            .finish()
    }
}

/// Transforms bytes on their way to the wrapped sink.
///
/// Output is forwarded as soon as the cipher releases it. [`close`] must be
/// called to emit the final block; dropping an unclosed writer does not
/// finalize.
///
/// [`close`]: CipherWriter::close
pub struct CipherWriter<W: Write> {
    inner: Option<W>,
    cipher: Cipher,
}

impl<W: Write> CipherWriter<W> {
    pub fn new(inner: W, cipher: Cipher) -> Self {
        Self {
            inner: Some(inner),
            cipher,
        }
    }

    pub fn cipher(&self) -> &Cipher {
        &self.cipher
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }

    /// The sink, until the writer is closed.
    pub fn get_ref(&self) -> Option<&W> {
        self.inner.as_ref()
    }

    /// Runs `do_final` once, forwards its output, flushes and releases the
    /// sink. Later calls do nothing.
    pub fn close(&mut self) -> io::Result<()> {
        match self.inner.take() {
            Some(mut sink) => self.finish_into(&mut sink),
            None => Ok(()),
        }
    }

    /// Closes the writer and hands the sink back. Fails with `BrokenPipe`
    /// when the writer was already closed.
    pub fn into_inner(mut self) -> io::Result<W> {
        let mut sink = self
            .inner
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "cipher writer closed"))?;
        self.finish_into(&mut sink)?;
        Ok(sink)
    }

    fn finish_into(&mut self, sink: &mut W) -> io::Result<()> {
        let written = match self.cipher.do_final() {
            Ok(output) => sink.write_all(&output),
            Err(e) => Err(stream_error(e)),
        };
        let flushed = sink.flush();
        written.and(flushed)
    }
}

impl<W: Write> Write for CipherWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let sink = self
            .inner
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "cipher writer closed"))?;

        if let Some(output) = self.cipher.update(buf).map_err(stream_error)? {
            sink.write_all(&output)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.inner.as_mut() {
            Some(sink) => sink.flush(),
            None => Ok(()),
        }
    }
}

impl<W: Write> Drop for CipherWriter<W> {
    fn drop(&mut self) {
        if self.inner.is_some() {
            log::warn!(
                "CipherWriter for {} dropped without close; final block not written",
                self.cipher.algorithm()
            );
        }
    }
}

impl<W: Write> std::fmt::Debug for CipherWriter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherWriter")
            .field("cipher", &self.cipher)
            .field("closed", &self.inner.is_none())
            .finish()
    }
}
