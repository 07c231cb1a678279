#![allow(dead_code)]

use std::collections::VecDeque;

use tm1638::Transport;

/// One strobe-framed exchange as seen on the bus.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub written: Vec<u8>,
    pub read: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MockError {
    Bad,
}

/// In-memory transport that records frames and replays key scan bytes.
pub struct MockTransport {
    frames: Vec<Frame>,
    current: Option<Frame>,
    replies: VecDeque<Vec<u8>>,
    fail_writes: bool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            frames: vec![],
            current: None,
            replies: VecDeque::new(),
            fail_writes: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::new()
        }
    }

    pub fn expect_read(&mut self, bytes: &[u8]) {
        self.replies.push_back(bytes.to_vec());
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn written(&self) -> Vec<Vec<u8>> {
        self.frames.iter().map(|f| f.written.clone()).collect()
    }

    pub fn verify(&self) {
        assert!(self.current.is_none(), "frame left open");
        assert_eq!(self.replies.len(), 0, "less reads were performed than expected");
    }
}

impl Transport for MockTransport {
    type Error = MockError;

    fn begin_transaction(&mut self) -> Result<(), MockError> {
        assert!(self.current.is_none(), "nested begin_transaction");
        self.current = Some(Frame::default());
        Ok(())
    }

    fn end_transaction(&mut self) -> Result<(), MockError> {
        let frame = self.current.take().expect("end_transaction without begin");
        self.frames.push(frame);
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), MockError> {
        if self.fail_writes {
            return Err(MockError::Bad);
        }
        let frame = self.current.as_mut().expect("write outside of a frame");
        frame.written.extend_from_slice(bytes);
        Ok(())
    }

    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<(), MockError> {
        let frame = self.current.as_mut().expect("read outside of a frame");
        let reply = self.replies.pop_front().expect("unexpected read");
        assert_eq!(buffer.len(), reply.len());
        buffer.copy_from_slice(&reply);
        frame.read += buffer.len();
        Ok(())
    }
}

/// The two frames of a register write.
pub fn register_write(start: u8, data: &[u8]) -> Vec<Vec<u8>> {
    let mut second = vec![0xC0 | start];
    second.extend_from_slice(data);
    vec![vec![0x40], second]
}
