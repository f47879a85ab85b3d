// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed-size binary wire records exchanged between the controller and a jet
//! worker process. No framing delimiters: each side reads exactly the record
//! size it expects next.
//!
//! Kept synchronous and dependency-free (plain `Read`/`Write`) because the
//! controller issues writes while holding the scheduler's mutex, and the jet
//! binary reads in a plain blocking loop — neither side wants an async
//! runtime pulled into this codec.

use crate::error::ProtocolError;
use std::io::{Read, Write};

/// Fuel restored by a completed refuel, shared by the scheduler (which
/// applies it to a jet's tracked fuel on `Refueled`) and the jet worker
/// (which applies the identical amount to its own counter before reporting).
pub const REFUEL_AMOUNT: i32 = 75;

/// Controller -> jet commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StartLanding,
    Refuel,
    Shutdown,
}

impl Command {
    fn tag(self) -> u32 {
        match self {
            Command::StartLanding => 0,
            Command::Refuel => 1,
            Command::Shutdown => 2,
        }
    }

    fn from_tag(tag: u32) -> Result<Self, ProtocolError> {
        match tag {
            0 => Ok(Command::StartLanding),
            1 => Ok(Command::Refuel),
            2 => Ok(Command::Shutdown),
            other => Err(ProtocolError::UnknownCommandTag(other)),
        }
    }

    pub fn encode(self, w: &mut impl Write) -> Result<(), ProtocolError> {
        w.write_all(&self.tag().to_be_bytes())?;
        Ok(())
    }

    pub fn decode(r: &mut impl Read) -> Result<Self, ProtocolError> {
        let mut buf = [0u8; 4];
        read_exact_or_eof(r, &mut buf)?;
        Command::from_tag(u32::from_be_bytes(buf))
    }
}

/// Jet -> controller feedback. `data` carries the jet's current fuel for
/// every variant except `Landed`/`Refueling`, where it is unused (sent as 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    FuelLow,
    Emergency,
    Landed,
    WaitingFuel,
    Refueling,
    Refueled,
}

impl FeedbackKind {
    fn tag(self) -> u32 {
        match self {
            FeedbackKind::FuelLow => 1,
            FeedbackKind::Emergency => 2,
            FeedbackKind::Landed => 3,
            FeedbackKind::WaitingFuel => 4,
            FeedbackKind::Refueling => 6,
            FeedbackKind::Refueled => 7,
        }
    }

    fn from_tag(tag: u32) -> Result<Self, ProtocolError> {
        match tag {
            1 => Ok(FeedbackKind::FuelLow),
            2 => Ok(FeedbackKind::Emergency),
            3 => Ok(FeedbackKind::Landed),
            4 => Ok(FeedbackKind::WaitingFuel),
            6 => Ok(FeedbackKind::Refueling),
            7 => Ok(FeedbackKind::Refueled),
            other => Err(ProtocolError::UnknownFeedbackTag(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub data: i32,
}

impl Feedback {
    pub fn new(kind: FeedbackKind, data: i32) -> Self {
        Self { kind, data }
    }

    pub fn encode(self, w: &mut impl Write) -> Result<(), ProtocolError> {
        w.write_all(&self.kind.tag().to_be_bytes())?;
        w.write_all(&self.data.to_be_bytes())?;
        Ok(())
    }

    pub fn decode(r: &mut impl Read) -> Result<Self, ProtocolError> {
        let mut tag_buf = [0u8; 4];
        read_exact_or_eof(r, &mut tag_buf)?;
        let kind = FeedbackKind::from_tag(u32::from_be_bytes(tag_buf))?;

        let mut data_buf = [0u8; 4];
        r.read_exact(&mut data_buf)?;
        let data = i32::from_be_bytes(data_buf);

        Ok(Feedback { kind, data })
    }
}

/// Like `Read::read_exact`, but distinguishes a clean EOF on the first byte
/// (the other side closed the channel) from a genuinely truncated record.
fn read_exact_or_eof(r: &mut impl Read, buf: &mut [u8]) -> Result<(), ProtocolError> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) if filled == 0 => {
                return Err(ProtocolError::Io(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "channel closed",
                )))
            }
            Ok(0) => {
                return Err(ProtocolError::Truncated {
                    expected: buf.len(),
                    got: filled,
                })
            }
            Ok(n) => filled += n,
            Err(e) => return Err(ProtocolError::Io(e)),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn command_round_trips() {
        for cmd in [Command::StartLanding, Command::Refuel, Command::Shutdown] {
            let mut buf = Vec::new();
            cmd.encode(&mut buf).unwrap();
            let decoded = Command::decode(&mut Cursor::new(buf)).unwrap();
            assert_eq!(decoded, cmd);
        }
    }

    #[test]
    fn feedback_round_trips() {
        let kinds = [
            FeedbackKind::FuelLow,
            FeedbackKind::Emergency,
            FeedbackKind::Landed,
            FeedbackKind::WaitingFuel,
            FeedbackKind::Refueling,
            FeedbackKind::Refueled,
        ];
        for kind in kinds {
            let fb = Feedback::new(kind, 42);
            let mut buf = Vec::new();
            fb.encode(&mut buf).unwrap();
            let decoded = Feedback::decode(&mut Cursor::new(buf)).unwrap();
            assert_eq!(decoded, fb);
        }
    }

    #[test]
    fn unknown_command_tag_is_an_error() {
        let buf = 99u32.to_be_bytes().to_vec();
        let err = Command::decode(&mut Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, ProtocolError::UnknownCommandTag(99)));
    }

    #[test]
    fn clean_eof_on_first_byte_is_reported() {
        let buf: Vec<u8> = vec![];
        let err = Command::decode(&mut Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, ProtocolError::Io(_)));
    }

    #[test]
    fn truncated_read_is_reported() {
        let buf = vec![0u8, 1u8];
        let err = Command::decode(&mut Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, ProtocolError::Truncated { .. }));
    }
}
