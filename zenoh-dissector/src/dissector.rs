//
// Copyright (c) 2023 ZettaScale Technology
//
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// http://www.eclipse.org/legal/epl-2.0, or the Apache License, Version 2.0
// which is available at https://www.apache.org/licenses/LICENSE-2.0.
//
// SPDX-License-Identifier: EPL-2.0 OR Apache-2.0
//
// Contributors:
//   ZettaScale Zenoh Team, <zenoh@zettascale.tech>
//
use std::borrow::Cow;

use tracing::{debug, trace};
use zenoh_buffers::{reader::Reader, ZCursor};
use zenoh_protocol::transport::BATCH_LEN_SIZE;

use crate::{
    decoder::{self, Failure},
    DecodeError, DecodedFrame, Diagnostic, DissectorConfig, FieldRecord, FieldValue, Framing,
    Message, Outcome,
};

/// Splits frames into message layers.
///
/// A `Dissector` only holds its configuration: it can be copied around and shared between
/// threads, each call to [`Dissector::dissect`] working on its own frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dissector {
    config: DissectorConfig,
}

impl Dissector {
    pub const fn new(config: DissectorConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &DissectorConfig {
        &self.config
    }

    /// Decodes every message of `frame`, stopping at the first one that cannot be decoded.
    ///
    /// Messages decoded before a failure are always returned, along with a diagnostic of the
    /// failure in [`DecodedFrame::outcome`].
    pub fn dissect<'a>(&self, frame: &'a [u8]) -> DecodedFrame<'a> {
        let mut run = Dissection::new(self.config, frame);
        let mut state = State::Scanning;
        loop {
            state = match state {
                State::Scanning => run.scan(),
                State::Decoding => run.decode(),
                State::Done => return run.finish(Outcome::Done),
                State::Failed(diagnostic) => {
                    debug!("{}", diagnostic);
                    return run.finish(Outcome::Failed(diagnostic));
                }
            };
        }
    }
}

/// Dissects `frame` with the default configuration.
pub fn dissect(frame: &[u8]) -> DecodedFrame<'_> {
    Dissector::default().dissect(frame)
}

enum State<'a> {
    /// Looking for the next message, or the next batch in stream framing.
    Scanning,
    /// A message starts at the current position.
    Decoding,
    Done,
    Failed(Diagnostic<'a>),
}

#[derive(Debug, Clone, Copy)]
struct Batch {
    /// Offset of the length prefix.
    offset: usize,
    len: usize,
    /// Whether the length was already reported on a layer.
    reported: bool,
}

struct Dissection<'a> {
    config: DissectorConfig,
    frame: ZCursor<'a>,
    /// The bytes messages are currently read from: the whole frame, or the current batch.
    window: ZCursor<'a>,
    batch: Option<Batch>,
    messages: Vec<Message<'a>>,
}

impl<'a> Dissection<'a> {
    fn new(config: DissectorConfig, frame: &'a [u8]) -> Self {
        let frame = ZCursor::new(frame);
        let window = match config.framing {
            Framing::Datagram => frame,
            // Nothing to read until the first batch is found
            Framing::Stream => ZCursor::new(&frame.buffer()[..0]),
        };
        Self {
            config,
            frame,
            window,
            batch: None,
            messages: Vec::new(),
        }
    }

    fn scan(&mut self) -> State<'a> {
        if self.window.can_read() {
            return State::Decoding;
        }
        match self.config.framing {
            Framing::Datagram => State::Done,
            Framing::Stream => self.next_batch(),
        }
    }

    fn next_batch(&mut self) -> State<'a> {
        if !self.frame.can_read() {
            return State::Done;
        }

        let offset = self.frame.pos();
        let mut prefix = [0u8; BATCH_LEN_SIZE];
        if let Err(e) = self.frame.read_exact(&mut prefix) {
            return State::Failed(Diagnostic {
                header: None,
                error: e.into(),
                fields: vec![],
            });
        }
        let len = u16::from_le_bytes(prefix) as usize;

        match self.frame.split_to(len) {
            Ok(window) => {
                if len == 0 {
                    trace!("Skipping empty batch at offset {}", offset);
                }
                self.window = window;
                self.batch = Some(Batch {
                    offset,
                    len,
                    reported: false,
                });
                State::Scanning
            }
            Err(e) => State::Failed(Diagnostic {
                header: None,
                error: DecodeError::LengthMismatch {
                    offset: e.offset,
                    batch: offset,
                    declared: len,
                    actual: e.available,
                },
                fields: vec![self.len_field(offset, len)],
            }),
        }
    }

    fn decode(&mut self) -> State<'a> {
        let offset = self.window.pos();
        if self.messages.len() >= self.config.max_messages {
            return State::Failed(Diagnostic {
                header: None,
                error: DecodeError::TooManyMessages {
                    offset,
                    limit: self.config.max_messages,
                },
                fields: vec![],
            });
        }

        match decoder::decode(&mut self.window) {
            Ok(mut message) => {
                self.report_batch(&mut message.offset, &mut message.fields);
                message.raw = &self.window.buffer()[message.offset..self.window.pos()];
                trace!("{}", message);

                if message.is_unknown() {
                    let header = message.header;
                    self.messages.push(message);
                    return State::Failed(Diagnostic {
                        header: Some(header),
                        error: DecodeError::UnknownKind {
                            offset,
                            id: header.id(),
                        },
                        fields: vec![],
                    });
                }

                self.messages.push(message);
                State::Scanning
            }
            Err(Failure {
                header,
                error,
                mut fields,
            }) => {
                let error = self.overrun(error);
                let mut start = offset;
                self.report_batch(&mut start, &mut fields);
                State::Failed(Diagnostic {
                    header: Some(header),
                    error,
                    fields,
                })
            }
        }
    }

    /// Prepends the batch length to the first layer of a batch.
    fn report_batch(&mut self, start: &mut usize, fields: &mut Vec<FieldRecord<'a>>) {
        if let Some(batch) = self.batch.as_mut().filter(|b| !b.reported) {
            batch.reported = true;
            let (offset, len) = (batch.offset, batch.len);
            fields.insert(0, self.len_field(offset, len));
            *start = offset;
        }
    }

    /// In stream framing, a read past the end of the batch means the batch is shorter than
    /// the messages it holds. Wanted lengths come off the wire and can be anything.
    fn overrun(&self, error: DecodeError) -> DecodeError {
        match (self.batch, error) {
            (Some(batch), DecodeError::OutOfBounds { offset, wanted, .. }) => {
                DecodeError::LengthMismatch {
                    offset,
                    batch: batch.offset,
                    declared: batch.len,
                    actual: offset
                        .saturating_add(wanted)
                        .saturating_sub(batch.offset + BATCH_LEN_SIZE),
                }
            }
            (_, error) => error,
        }
    }

    fn len_field(&self, offset: usize, len: usize) -> FieldRecord<'a> {
        FieldRecord {
            name: Cow::Borrowed("len"),
            value: FieldValue::UInt(len as u64),
            raw: &self.frame.buffer()[offset..offset + BATCH_LEN_SIZE],
            offset,
        }
    }

    fn finish(self, outcome: Outcome<'a>) -> DecodedFrame<'a> {
        DecodedFrame {
            messages: self.messages,
            outcome,
        }
    }
}

