//! OSC 1.0 wire format, delegated to `rosc`.
//!
//! This module owns exactly one thing beyond what `rosc` already provides: flattening a
//! (possibly nested) `OscPacket` into the depth-first, in-order list of messages the reconciler
//! consumes. `rosc` never nests bundles inside the TUIO-generating trackers this crate talks to,
//! but the OSC 1.0 grammar allows it, so the walk has to be able to recurse.

use rosc::{decoder, encoder, OscBundle, OscMessage, OscPacket, OscTime, OscType};

use crate::error::TuioError;

/// A single decoded OSC message, with the bundle timetag (or a synthetic one, see
/// [`decode_bundle`]) it arrived under.
#[derive(Debug, Clone)]
pub struct DecodedMessage {
    pub address: String,
    pub timetag: OscTime,
    pub args: Vec<OscType>,
}

/// An OSC time tag of all zeros, used when a datagram carries a bare message with no bundle
/// wrapper and therefore no timetag of its own.
const UNTIMED: OscTime = OscTime {
    seconds: 0,
    fractional: 0,
};

/// Decodes a raw UDP datagram into a flat, in-order list of TUIO-relevant messages.
///
/// Fails with [`TuioError::MalformedPacket`] if `rosc` cannot parse the slice at all; this is
/// the only decode failure that aborts the whole datagram rather than a single message.
pub fn decode_bundle(datagram: &[u8]) -> Result<Vec<DecodedMessage>, TuioError> {
    let (_, packet) = decoder::decode_udp(datagram)?;
    let mut out = Vec::new();
    flatten_packet(packet, UNTIMED, &mut out);
    Ok(out)
}

fn flatten_packet(packet: OscPacket, timetag: OscTime, out: &mut Vec<DecodedMessage>) {
    match packet {
        OscPacket::Message(msg) => out.push(DecodedMessage {
            address: msg.addr,
            timetag,
            args: msg.args,
        }),
        OscPacket::Bundle(bundle) => flatten_bundle(bundle, out),
    }
}

fn flatten_bundle(bundle: OscBundle, out: &mut Vec<DecodedMessage>) {
    let timetag = bundle.timetag;
    for packet in bundle.content {
        flatten_packet(packet, timetag, out);
    }
}

/// Encodes a single TUIO message as a standalone OSC packet (used for the sender's per-message
/// construction before it's folded into a bundle).
pub fn encode_message(address: &str, args: Vec<OscType>) -> Result<Vec<u8>, TuioError> {
    let packet = OscPacket::Message(OscMessage {
        addr: address.to_string(),
        args,
    });
    encoder::encode(&packet).map_err(TuioError::EncodeFailed)
}

/// Encodes a full bundle (source + alive + sets + fseq) with the given timetag.
pub fn encode_bundle(timetag: OscTime, messages: Vec<OscMessage>) -> Result<Vec<u8>, TuioError> {
    let packet = OscPacket::Bundle(OscBundle {
        timetag,
        content: messages.into_iter().map(OscPacket::Message).collect(),
    });
    encoder::encode(&packet).map_err(TuioError::EncodeFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosc::OscType;

    #[test]
    fn round_trips_a_single_message() {
        let bytes = encode_message(
            "/tuio/2Dcur",
            vec![OscType::String("alive".into()), OscType::Int(42)],
        )
        .unwrap();

        let decoded = decode_bundle(&bytes).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].address, "/tuio/2Dcur");
        assert_eq!(
            decoded[0].args,
            vec![OscType::String("alive".into()), OscType::Int(42)]
        );
    }

    #[test]
    fn flattens_a_bundle_in_order() {
        let bytes = encode_bundle(
            UNTIMED,
            vec![
                OscMessage {
                    addr: "/tuio/2Dcur".into(),
                    args: vec![OscType::String("alive".into())],
                },
                OscMessage {
                    addr: "/tuio/2Dcur".into(),
                    args: vec![OscType::String("fseq".into()), OscType::Int(1)],
                },
            ],
        )
        .unwrap();

        let decoded = decode_bundle(&bytes).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].args[0], OscType::String("alive".into()));
        assert_eq!(decoded[1].args[0], OscType::String("fseq".into()));
    }

    #[test]
    fn malformed_packet_is_reported() {
        let garbage = [0xffu8; 8];
        assert!(matches!(
            decode_bundle(&garbage),
            Err(TuioError::MalformedPacket(_))
        ));
    }
}
