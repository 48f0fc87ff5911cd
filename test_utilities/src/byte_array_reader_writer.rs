// Copyright (c) 2019, MASQ (https://masq.ai) and/or its affiliates. All rights reserved.

use std::cmp::min;
use std::io;
use std::io::{Error, Read, Write};
use std::sync::{Arc, Mutex};

// Stands in for stdout/stderr so tests can look at what the loader printed.
#[derive(Clone, Default)]
pub struct ByteArrayWriter {
    inner_arc: Arc<Mutex<Vec<u8>>>,
}

impl ByteArrayWriter {
    pub fn new() -> ByteArrayWriter {
        Self::default()
    }

    pub fn get_bytes(&self) -> Vec<u8> {
        self.inner_arc.lock().unwrap().clone()
    }

    pub fn get_string(&self) -> String {
        String::from_utf8(self.get_bytes()).unwrap()
    }
}

impl Write for ByteArrayWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner_arc.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// Serves CSV text from memory; can be told to fail its first read.
pub struct ByteArrayReader {
    byte_array: Vec<u8>,
    position: usize,
    next_error: Option<Error>,
}

impl ByteArrayReader {
    pub fn new(byte_array: &[u8]) -> ByteArrayReader {
        ByteArrayReader {
            byte_array: byte_array.to_vec(),
            position: 0,
            next_error: None,
        }
    }

    pub fn reject_next_read(mut self, error: Error) -> ByteArrayReader {
        self.next_error = Some(error);
        self
    }
}

impl Read for ByteArrayReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(error) = self.next_error.take() {
            return Err(error);
        }
        let to_copy = min(buf.len(), self.byte_array.len() - self.position);
        buf[..to_copy].copy_from_slice(&self.byte_array[self.position..self.position + to_copy]);
        self.position += to_copy;
        Ok(to_copy)
    }
}
