//! Optional-field presence mask.
//!
//! Every packet carries one null-mask ahead of its records. Each optional
//! field anywhere in the record tree takes the next flag from the mask, in
//! the order the fields are visited, so the mask must be drained exactly as
//! the schema walks the stream.
//!
//! The mask header byte selects one of two forms:
//!
//! - `0nnxxxxx`: short form. The low 5 header bits are mask bits and `nn`
//!   more bytes (0-3) follow, giving 5, 13, 21 or 29 flags.
//! - `1lxxxxxx`: long form. If `l` is clear, the low 6 bits are a byte count;
//!   if set, the count is those 6 bits followed by a big-endian `u16`. That
//!   many mask bytes follow.
//!
//! Bits are read MSB-first. A set bit marks the field as absent.

use std::collections::VecDeque;

use crate::cursor::ByteCursor;
use crate::error::{DecodeError, DecodeResult};

/// Number of mask bits carried by a short-form header byte.
const SHORT_HEADER_BITS: u32 = 5;

/// How strictly undrained flags are treated once a decode completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaskPolicy {
    /// Every flag the mask produced must have been consumed.
    #[default]
    Exact,
    /// Up to 7 leftover flags are accepted as padding of the last mask byte.
    AllowBytePadding,
}

/// One recorded flag pop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskTraceEntry {
    /// The `Record.field` that asked for the flag.
    pub field: &'static str,
    /// Whether the field was present.
    pub present: bool,
}

/// A single-use queue of presence flags.
#[derive(Debug, Clone, Default)]
pub struct OptionalMask {
    flags: VecDeque<bool>,
    consumed: usize,
    trace: Option<Vec<MaskTraceEntry>>,
}

impl OptionalMask {
    /// Decode a null-mask from the cursor.
    pub fn read(cursor: &mut ByteCursor<'_>) -> DecodeResult<Self> {
        let header = cursor.read_u8("null-mask header")?;
        let mut mask = Self::default();

        if header & 0x80 == 0 {
            let extra = usize::from((header >> 5) & 0x03);
            mask.push_bits(header, SHORT_HEADER_BITS);
            for &byte in cursor.take(extra, "null-mask")? {
                mask.push_bits(byte, 8);
            }
        } else {
            let high = usize::from(header & 0x3F);
            let len = if header & 0x40 == 0 {
                high
            } else {
                (high << 16) | usize::from(cursor.read_u16("null-mask length")?)
            };
            for &byte in cursor.take(len, "null-mask")? {
                mask.push_bits(byte, 8);
            }
        }

        tracing::debug!(flags = mask.flags.len(), "decoded null-mask");
        Ok(mask)
    }

    /// Build a mask from presence flags directly.
    pub fn from_flags(flags: impl IntoIterator<Item = bool>) -> Self {
        Self {
            flags: flags.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Record every pop as a `(field, flag)` pair.
    #[must_use]
    pub fn with_trace(mut self) -> Self {
        self.trace = Some(Vec::new());
        self
    }

    /// Append the low `count` bits of `byte`, most significant first.
    fn push_bits(&mut self, byte: u8, count: u32) {
        for bit in (0..count).rev() {
            self.flags.push_back(byte & (1 << bit) == 0);
        }
    }

    /// Take the presence flag for `field`, which would be read at byte
    /// `offset` of the payload.
    pub fn pop(&mut self, field: &'static str, offset: usize) -> DecodeResult<bool> {
        let Some(present) = self.flags.pop_front() else {
            return Err(DecodeError::MaskExhausted {
                field,
                consumed: self.consumed,
                offset,
            });
        };

        self.consumed += 1;
        tracing::trace!(field, present, "optional flag");
        if let Some(trace) = &mut self.trace {
            trace.push(MaskTraceEntry { field, present });
        }
        Ok(present)
    }

    /// Take the next `N` flags in order. Nothing is consumed if fewer than
    /// `N` remain.
    pub fn pop_n<const N: usize>(
        &mut self,
        field: &'static str,
        offset: usize,
    ) -> DecodeResult<[bool; N]> {
        if self.flags.len() < N {
            return Err(DecodeError::MaskExhausted {
                field,
                consumed: self.consumed,
                offset,
            });
        }

        let mut out = [false; N];
        for flag in &mut out {
            *flag = self.pop(field, offset)?;
        }
        Ok(out)
    }

    /// Flags not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.flags.len()
    }

    /// Flags consumed so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// The recorded pops, if tracing is enabled.
    #[must_use]
    pub fn trace(&self) -> Option<&[MaskTraceEntry]> {
        self.trace.as_deref()
    }

    /// Check that the mask was drained according to `policy` once the decode
    /// stopped at byte `offset`, returning the trace (empty unless tracing
    /// was enabled).
    pub fn finish(self, policy: MaskPolicy, offset: usize) -> DecodeResult<Vec<MaskTraceEntry>> {
        let remaining = self.flags.len();
        let tolerated = match policy {
            MaskPolicy::Exact => 0,
            MaskPolicy::AllowBytePadding => 7,
        };
        if remaining > tolerated {
            return Err(DecodeError::MaskNotDrained { remaining, offset });
        }
        if remaining > 0 {
            tracing::debug!(remaining, "ignoring null-mask padding");
        }
        Ok(self.trace.unwrap_or_default())
    }
}
