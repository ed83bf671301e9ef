//! Builds the OSC bundle for one outgoing TUIO frame, generalizing the reference server's
//! `send_full_messages` (source + alive + set... + fseq, single variant) to all nine profile
//! variants and to the `ChangedOnly` mode a `FullState`-only sender doesn't need.

use rosc::{OscMessage, OscTime, OscType};
use serde::{Deserialize, Serialize};

use crate::error::TuioError;
use crate::osc::encode_bundle;
use crate::profile::Entity;
use crate::router::Variant;

/// Whether a frame re-sends every live entity's `set`, or only the ones that changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SenderMode {
    /// Always emit a `set` for every currently alive entity, every frame.
    #[default]
    FullState,
    /// Only emit a `set` for entities flagged dirty since the last frame.
    ChangedOnly,
}

/// Stateless bundle builder; the caller ([`crate::server::Server`]) owns the entity tables and
/// frame/dirty bookkeeping and hands this one variant's worth of entities per call.
pub struct Sender {
    mode: SenderMode,
}

impl Sender {
    pub fn new(mode: SenderMode) -> Self {
        Sender { mode }
    }

    pub fn mode(&self) -> SenderMode {
        self.mode
    }

    /// Encodes one variant's frame: `source`, `alive` (every live session id), a `set` per
    /// entity selected by `self.mode`, and `fseq`. `entities` pairs each live entity with whether
    /// it changed this frame.
    pub fn encode_frame(
        &self,
        variant: Variant,
        source_name: &str,
        frame_id: i32,
        timetag: OscTime,
        entities: &[(Entity, bool)],
    ) -> Result<Vec<u8>, TuioError> {
        let address = variant.address();
        let mut messages = Vec::with_capacity(entities.len() + 3);

        messages.push(OscMessage {
            addr: address.to_string(),
            args: vec![
                OscType::String("source".into()),
                OscType::String(source_name.to_string()),
            ],
        });

        let mut alive_args = vec![OscType::String("alive".into())];
        alive_args.extend(entities.iter().map(|(e, _)| OscType::Int(e.session_id())));
        messages.push(OscMessage {
            addr: address.to_string(),
            args: alive_args,
        });

        for (entity, dirty) in entities {
            if self.mode == SenderMode::ChangedOnly && !dirty {
                continue;
            }
            let mut args = vec![OscType::String("set".into())];
            args.extend(entity.to_set_args());
            messages.push(OscMessage {
                addr: address.to_string(),
                args,
            });
        }

        messages.push(OscMessage {
            addr: address.to_string(),
            args: vec![OscType::String("fseq".into()), OscType::Int(frame_id)],
        });

        encode_bundle(timetag, messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::osc::decode_bundle;
    use crate::profile::Cursor;

    #[test]
    fn full_state_emits_a_set_for_every_entity_regardless_of_dirty() {
        let sender = Sender::new(SenderMode::FullState);
        let entities = vec![
            (Entity::Cursor(Cursor::new(Variant::Cursor2D, 1)), false),
            (Entity::Cursor(Cursor::new(Variant::Cursor2D, 2)), false),
        ];
        let bytes = sender
            .encode_frame(
                Variant::Cursor2D,
                "test",
                0,
                OscTime {
                    seconds: 0,
                    fractional: 0,
                },
                &entities,
            )
            .unwrap();

        let decoded = decode_bundle(&bytes).unwrap();
        let set_count = decoded
            .iter()
            .filter(|m| m.args.first() == Some(&OscType::String("set".into())))
            .count();
        assert_eq!(set_count, 2);
    }

    #[test]
    fn changed_only_skips_clean_entities() {
        let sender = Sender::new(SenderMode::ChangedOnly);
        let entities = vec![
            (Entity::Cursor(Cursor::new(Variant::Cursor2D, 1)), true),
            (Entity::Cursor(Cursor::new(Variant::Cursor2D, 2)), false),
        ];
        let bytes = sender
            .encode_frame(
                Variant::Cursor2D,
                "test",
                0,
                OscTime {
                    seconds: 0,
                    fractional: 0,
                },
                &entities,
            )
            .unwrap();

        let decoded = decode_bundle(&bytes).unwrap();
        let set_count = decoded
            .iter()
            .filter(|m| m.args.first() == Some(&OscType::String("set".into())))
            .count();
        assert_eq!(set_count, 1);
    }

    #[test]
    fn ends_with_fseq() {
        let sender = Sender::new(SenderMode::FullState);
        let bytes = sender
            .encode_frame(
                Variant::Blob3D,
                "test",
                7,
                OscTime {
                    seconds: 0,
                    fractional: 0,
                },
                &[],
            )
            .unwrap();
        let decoded = decode_bundle(&bytes).unwrap();
        let last = decoded.last().unwrap();
        assert_eq!(last.args[0], OscType::String("fseq".into()));
        assert_eq!(last.args[1], OscType::Int(7));
    }
}
