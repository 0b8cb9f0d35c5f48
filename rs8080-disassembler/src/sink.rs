use crate::Listing;
use std::io::{self, Write};

/// Receives every listing line a decoder produces.
pub trait ListingSink {
    fn emit(&mut self, listing: &Listing) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl ListingSink for Vec<String> {
    fn emit(&mut self, listing: &Listing) -> io::Result<()> {
        self.push(listing.to_string());
        Ok(())
    }
}

impl<S: ListingSink + ?Sized> ListingSink for &mut S {
    fn emit(&mut self, listing: &Listing) -> io::Result<()> {
        (**self).emit(listing)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// Writes one line per listing.
pub struct WriteSink<W: Write> {
    inner: W,
}

impl<W: Write> WriteSink<W> {
    pub fn new(inner: W) -> Self {
        WriteSink { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ListingSink for WriteSink<W> {
    fn emit(&mut self, listing: &Listing) -> io::Result<()> {
        writeln!(self.inner, "{}", listing)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Sends each listing to `primary`, then to `record`.
pub struct Tee<A, B> {
    primary: A,
    record: B,
}

impl<A: ListingSink, B: ListingSink> Tee<A, B> {
    pub fn new(primary: A, record: B) -> Self {
        Tee { primary, record }
    }
}

impl<A: ListingSink, B: ListingSink> ListingSink for Tee<A, B> {
    fn emit(&mut self, listing: &Listing) -> io::Result<()> {
        self.primary.emit(listing)?;
        self.record.emit(listing)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.primary.flush()?;
        self.record.flush()
    }
}
