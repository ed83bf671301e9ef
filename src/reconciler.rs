//! Frame-by-frame reconciliation of incoming TUIO `alive`/`set`/`fseq` messages into add/update/
//! remove events, grounded on the reference dispatcher's `_sort_matchs`/`_call_listener` pair:
//! each `alive` message is diffed against the variant's current table to classify session ids
//! into update (still alive) / remove (dropped) / add (new), and `fseq` flushes one [`Frame`].
//!
//! Per spec, the pending buffers are dispatcher-global: a `fseq` on any one of the nine variants
//! flushes everything accumulated across all of them since the last flush, not just that
//! variant's own changes.

use std::collections::HashMap;
use std::time::Duration;

use indexmap::IndexMap;
use rosc::{OscTime, OscType};

use crate::error::TuioError;
use crate::osc::{decode_bundle, DecodedMessage};
use crate::profile::{Blob, Cursor, Entity, Object};
use crate::router::{Kind, Variant};

const MSG_SOURCE: &str = "source";
const MSG_ALIVE: &str = "alive";
const MSG_SET: &str = "set";
const MSG_FSEQ: &str = "fseq";

/// One reconciled frame, ready for [`crate::dispatcher::Dispatcher::dispatch`].
#[derive(Debug, Default)]
pub struct Frame {
    pub frame_time: Duration,
    pub added: Vec<Entity>,
    pub updated: Vec<Entity>,
    pub removed: Vec<Entity>,
}

/// Tracks the live entity set per variant and accumulates the dispatcher-global pending buffers
/// between `fseq` flushes.
///
/// The add/update buffers hold `(variant, session_id)` rather than entity snapshots, since a
/// `set` for a session id classified this cycle can (and usually does) arrive after the `alive`
/// that classified it, but before the `fseq` that flushes it — [`Self::flush`] looks the id back
/// up in the live table so the emitted entity reflects every `set` applied before the flush.
/// `removed` entities can receive no further `set` once dropped from their table (invariant 4),
/// so those are captured as snapshots at `alive`-time instead.
pub struct FrameReconciler {
    tables: HashMap<Variant, IndexMap<i32, Entity>>,
    sources: HashMap<Variant, String>,
    pending_add: Vec<(Variant, i32)>,
    pending_update: Vec<(Variant, i32)>,
    pending_remove: Vec<Entity>,
    strict_decoding: bool,
}

impl Default for FrameReconciler {
    fn default() -> Self {
        Self::new(false)
    }
}

impl FrameReconciler {
    /// `strict_decoding` selects what happens to a message that fails to parse as a well-formed
    /// TUIO `set`/`alive`: `true` aborts the whole datagram (the pre-existing behavior), `false`
    /// logs and skips just that message so the terminating `fseq` still flushes.
    pub fn new(strict_decoding: bool) -> Self {
        let mut tables = HashMap::with_capacity(Variant::ALL.len());
        for variant in Variant::ALL {
            tables.insert(variant, IndexMap::new());
        }
        FrameReconciler {
            tables,
            sources: HashMap::new(),
            pending_add: Vec::new(),
            pending_update: Vec::new(),
            pending_remove: Vec::new(),
            strict_decoding,
        }
    }

    /// The name last announced via a `source` message for this variant, if any.
    pub fn source(&self, variant: Variant) -> Option<&str> {
        self.sources.get(&variant).map(String::as_str)
    }

    /// Currently tracked entities for one variant, in table order.
    pub fn entities(&self, variant: Variant) -> impl Iterator<Item = &Entity> {
        self.tables[&variant].values()
    }

    /// Decodes one UDP datagram and folds its messages into the running reconciliation state.
    /// Returns one [`Frame`] per `fseq` message encountered (almost always zero or one — a
    /// well-behaved source sends exactly one frame per datagram).
    ///
    /// A malformed `set`/`alive` fails only that message, not the datagram, unless
    /// `strict_decoding` is set — this keeps a bad message from swallowing the `fseq` that would
    /// otherwise flush every other message already folded in.
    pub fn process_datagram(&mut self, datagram: &[u8]) -> Result<Vec<Frame>, TuioError> {
        let messages = decode_bundle(datagram)?;
        let mut frames = Vec::new();
        for message in messages {
            match self.process_message(message) {
                Ok(Some(frame)) => frames.push(frame),
                Ok(None) => {}
                Err(err @ (TuioError::MalformedTuioSet { .. } | TuioError::MissingArguments { .. })) => {
                    if self.strict_decoding {
                        return Err(err);
                    }
                    tracing::warn!(error = %err, "skipping malformed TUIO message");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(frames)
    }

    fn process_message(&mut self, message: DecodedMessage) -> Result<Option<Frame>, TuioError> {
        let Some(variant) = Variant::from_address(&message.address) else {
            return Err(TuioError::UnknownAddress(message.address));
        };

        let Some(kind_tag) = message.args.first() else {
            return Err(TuioError::MissingArguments {
                address: message.address,
            });
        };
        let OscType::String(kind_tag) = kind_tag else {
            return Err(TuioError::MissingArguments {
                address: message.address,
            });
        };
        let kind_tag = kind_tag.clone();
        let rest = &message.args[1..];

        match kind_tag.as_str() {
            MSG_SOURCE => {
                if let Some(OscType::String(name)) = rest.first() {
                    self.sources.insert(variant, name.clone());
                }
                Ok(None)
            }
            MSG_ALIVE => {
                self.reconcile_alive(variant, rest)?;
                Ok(None)
            }
            MSG_SET => {
                self.apply_set(variant, rest)?;
                Ok(None)
            }
            MSG_FSEQ => Ok(Some(self.flush(message.timetag))),
            _ => Err(TuioError::UnknownAddress(message.address)),
        }
    }

    /// Diffs an `alive` message's session ids against the variant's table, exactly mirroring
    /// the reference `_sort_matchs`: ids that are already tracked become updates, ids that drop
    /// out of the list become removes, and unseen ids become adds. A session id repeated within
    /// one `alive` message is only matched once (first occurrence), since the table is keyed by
    /// session id and can hold each entity at most once.
    fn reconcile_alive(&mut self, variant: Variant, args: &[OscType]) -> Result<(), TuioError> {
        let alive_ids: Vec<i32> = args
            .iter()
            .map(|arg| arg.clone().int())
            .collect::<Option<_>>()
            .ok_or_else(|| TuioError::MalformedTuioSet {
                address: variant.address().to_string(),
                expected: "alive session_id...",
                got: args.to_vec(),
            })?;

        let table = self.tables.get_mut(&variant).expect("all variants seeded");
        let mut next_table = IndexMap::with_capacity(alive_ids.len());

        for session_id in &alive_ids {
            if next_table.contains_key(session_id) {
                continue;
            }
            if let Some(entity) = table.shift_remove(session_id) {
                self.pending_update.push((variant, *session_id));
                next_table.insert(*session_id, entity);
            } else {
                let entity = new_entity(variant, *session_id);
                self.pending_add.push((variant, *session_id));
                next_table.insert(*session_id, entity);
            }
        }

        for (_, entity) in table.drain(..) {
            self.pending_remove.push(entity);
        }

        *table = next_table;
        Ok(())
    }

    fn apply_set(&mut self, variant: Variant, args: &[OscType]) -> Result<(), TuioError> {
        let session_id = args
            .first()
            .and_then(|v| v.clone().int())
            .ok_or_else(|| TuioError::MissingArguments {
                address: variant.address().to_string(),
            })?;

        let table = self.tables.get_mut(&variant).expect("all variants seeded");
        if let Some(entity) = table.get_mut(&session_id) {
            entity.apply_set(&args[1..])?;
        }
        Ok(())
    }

    /// Flushes the dispatcher-global pending buffers into one [`Frame`] and clears them.
    ///
    /// Added/updated ids are materialized from the live tables here, so any `set` applied to
    /// them between their `alive` classification and this flush is reflected in the emitted
    /// entity rather than whatever state they were in when classified.
    fn flush(&mut self, timetag: OscTime) -> Frame {
        let added = self.materialize(std::mem::take(&mut self.pending_add));
        let updated = self.materialize(std::mem::take(&mut self.pending_update));
        Frame {
            frame_time: osc_time_to_duration(timetag),
            added,
            updated,
            removed: std::mem::take(&mut self.pending_remove),
        }
    }

    /// Looks up each `(variant, session_id)` in the live tables, dropping any that are no longer
    /// present (e.g. removed again before this flush).
    fn materialize(&self, ids: Vec<(Variant, i32)>) -> Vec<Entity> {
        ids.into_iter()
            .filter_map(|(variant, session_id)| {
                self.tables.get(&variant)?.get(&session_id).cloned()
            })
            .collect()
    }
}

fn new_entity(variant: Variant, session_id: i32) -> Entity {
    match variant.kind() {
        Kind::Cursor => Entity::Cursor(Cursor::new(variant, session_id)),
        Kind::Object => Entity::Object(Object::new(variant, session_id)),
        Kind::Blob => Entity::Blob(Blob::new(variant, session_id)),
    }
}

fn osc_time_to_duration(timetag: OscTime) -> Duration {
    Duration::new(timetag.seconds as u64, 0) + Duration::from_secs_f64(
        timetag.fractional as f64 / u32::MAX as f64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::osc::encode_bundle;
    use rosc::OscMessage;

    fn alive_message(address: &str, ids: &[i32]) -> OscMessage {
        let mut args = vec![OscType::String(MSG_ALIVE.into())];
        args.extend(ids.iter().map(|id| OscType::Int(*id)));
        OscMessage {
            addr: address.into(),
            args,
        }
    }

    fn fseq_message(address: &str, seq: i32) -> OscMessage {
        OscMessage {
            addr: address.into(),
            args: vec![OscType::String(MSG_FSEQ.into()), OscType::Int(seq)],
        }
    }

    fn cursor_set_message(address: &str, session_id: i32, x: f32, y: f32) -> OscMessage {
        OscMessage {
            addr: address.into(),
            args: vec![
                OscType::String(MSG_SET.into()),
                OscType::Int(session_id),
                OscType::Float(x),
                OscType::Float(y),
                OscType::Float(0.0),
                OscType::Float(0.0),
                OscType::Float(0.0),
            ],
        }
    }

    fn cursor_position(entity: &Entity) -> [f32; 2] {
        match entity {
            Entity::Cursor(Cursor::D2(c)) => c.position,
            _ => panic!("expected a 2D cursor"),
        }
    }

    #[test]
    fn first_alive_produces_only_adds() {
        let bytes = encode_bundle(
            OscTime {
                seconds: 0,
                fractional: 0,
            },
            vec![
                alive_message("/tuio/2Dcur", &[1, 2]),
                fseq_message("/tuio/2Dcur", 0),
            ],
        )
        .unwrap();

        let mut reconciler = FrameReconciler::new(false);
        let frames = reconciler.process_datagram(&bytes).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].added.len(), 2);
        assert!(frames[0].updated.is_empty());
        assert!(frames[0].removed.is_empty());
    }

    #[test]
    fn dropping_a_session_id_produces_a_remove_and_update() {
        let mut reconciler = FrameReconciler::new(false);
        let first = encode_bundle(
            OscTime {
                seconds: 0,
                fractional: 0,
            },
            vec![
                alive_message("/tuio/2Dcur", &[1, 2]),
                fseq_message("/tuio/2Dcur", 0),
            ],
        )
        .unwrap();
        reconciler.process_datagram(&first).unwrap();

        let second = encode_bundle(
            OscTime {
                seconds: 0,
                fractional: 0,
            },
            vec![
                alive_message("/tuio/2Dcur", &[1]),
                fseq_message("/tuio/2Dcur", 1),
            ],
        )
        .unwrap();
        let frames = reconciler.process_datagram(&second).unwrap();
        assert_eq!(frames[0].updated.len(), 1);
        assert_eq!(frames[0].removed.len(), 1);
        assert!(frames[0].added.is_empty());
    }

    #[test]
    fn add_event_reflects_the_set_applied_before_flush() {
        let bytes = encode_bundle(
            OscTime {
                seconds: 0,
                fractional: 0,
            },
            vec![
                alive_message("/tuio/2Dcur", &[42]),
                cursor_set_message("/tuio/2Dcur", 42, 0.5, 0.5),
                fseq_message("/tuio/2Dcur", 1),
            ],
        )
        .unwrap();

        let mut reconciler = FrameReconciler::new(false);
        let frames = reconciler.process_datagram(&bytes).unwrap();
        assert_eq!(frames[0].added.len(), 1);
        assert_eq!(cursor_position(&frames[0].added[0]), [0.5, 0.5]);
    }

    #[test]
    fn update_event_reflects_the_set_applied_before_flush() {
        let mut reconciler = FrameReconciler::new(false);
        let first = encode_bundle(
            OscTime {
                seconds: 0,
                fractional: 0,
            },
            vec![
                alive_message("/tuio/2Dcur", &[1]),
                fseq_message("/tuio/2Dcur", 0),
            ],
        )
        .unwrap();
        reconciler.process_datagram(&first).unwrap();

        let second = encode_bundle(
            OscTime {
                seconds: 0,
                fractional: 0,
            },
            vec![
                alive_message("/tuio/2Dcur", &[1]),
                cursor_set_message("/tuio/2Dcur", 1, 0.7, 0.9),
                fseq_message("/tuio/2Dcur", 1),
            ],
        )
        .unwrap();
        let frames = reconciler.process_datagram(&second).unwrap();
        assert_eq!(frames[0].updated.len(), 1);
        assert_eq!(cursor_position(&frames[0].updated[0]), [0.7, 0.9]);
    }

    #[test]
    fn malformed_set_is_skipped_but_fseq_still_flushes() {
        let bytes = encode_bundle(
            OscTime {
                seconds: 0,
                fractional: 0,
            },
            vec![
                alive_message("/tuio/2Dcur", &[1]),
                OscMessage {
                    addr: "/tuio/2Dcur".into(),
                    args: vec![OscType::String(MSG_SET.into()), OscType::Int(1)],
                },
                fseq_message("/tuio/2Dcur", 0),
            ],
        )
        .unwrap();

        let mut reconciler = FrameReconciler::new(false);
        let frames = reconciler.process_datagram(&bytes).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].added.len(), 1);
    }

    #[test]
    fn strict_decoding_aborts_the_datagram_on_a_malformed_set() {
        let bytes = encode_bundle(
            OscTime {
                seconds: 0,
                fractional: 0,
            },
            vec![
                alive_message("/tuio/2Dcur", &[1]),
                OscMessage {
                    addr: "/tuio/2Dcur".into(),
                    args: vec![OscType::String(MSG_SET.into()), OscType::Int(1)],
                },
                fseq_message("/tuio/2Dcur", 0),
            ],
        )
        .unwrap();

        let mut reconciler = FrameReconciler::new(true);
        assert!(matches!(
            reconciler.process_datagram(&bytes),
            Err(TuioError::MalformedTuioSet { .. })
        ));
    }

    #[test]
    fn pending_buffers_are_shared_across_variants() {
        let bytes = encode_bundle(
            OscTime {
                seconds: 0,
                fractional: 0,
            },
            vec![
                alive_message("/tuio/2Dcur", &[1]),
                alive_message("/tuio/2Dobj", &[2]),
                fseq_message("/tuio/2Dcur", 0),
            ],
        )
        .unwrap();

        let mut reconciler = FrameReconciler::new(false);
        let frames = reconciler.process_datagram(&bytes).unwrap();
        assert_eq!(frames[0].added.len(), 2);
    }

    #[test]
    fn unknown_address_is_reported() {
        let bytes = encode_bundle(
            OscTime {
                seconds: 0,
                fractional: 0,
            },
            vec![OscMessage {
                addr: "/tuio/4Dcur".into(),
                args: vec![OscType::String(MSG_ALIVE.into())],
            }],
        )
        .unwrap();

        let mut reconciler = FrameReconciler::new(false);
        assert!(matches!(
            reconciler.process_datagram(&bytes),
            Err(TuioError::UnknownAddress(_))
        ));
    }
}
