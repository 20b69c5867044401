//! Pointer fake.

use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::port::Pointer;

/// Returns queued click positions in order.
#[derive(Debug, Default)]
pub struct FakePointer {
    clicks: VecDeque<(i32, i32)>,
}

impl FakePointer {
    pub fn new<I: IntoIterator<Item = (i32, i32)>>(clicks: I) -> Self {
        Self {
            clicks: clicks.into_iter().collect(),
        }
    }
}

impl Pointer for FakePointer {
    fn wait_for_click(&mut self) -> Result<(i32, i32)> {
        self.clicks.pop_front().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "no click queued",
            ))
        })
    }
}
