//! One-pass iterator over the records of a log download.

use std::fmt;
use std::iter::FusedIterator;

use dt174b_protocol::LogRecord;

use crate::error::DeviceResult;

type NextRecord<'a> = Box<dyn FnMut() -> DeviceResult<Option<LogRecord>> + 'a>;

/// Records pulled lazily from the device.
///
/// The source is asked for one record at a time. It ends the sequence by
/// returning `Ok(None)`; an error is yielded once and also ends it.
pub struct LogRecords<'a> {
    next: NextRecord<'a>,
    finished: bool,
}

impl<'a> LogRecords<'a> {
    /// Build from a function that reads the next record.
    pub fn from_fn<F>(next: F) -> Self
    where
        F: FnMut() -> DeviceResult<Option<LogRecord>> + 'a,
    {
        LogRecords {
            next: Box::new(next),
            finished: false,
        }
    }
}

impl Iterator for LogRecords<'_> {
    type Item = DeviceResult<LogRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match (self.next)() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for LogRecords<'_> {}

impl fmt::Debug for LogRecords<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogRecords")
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
