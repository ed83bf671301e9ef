use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use rosc::OscTime;
use tuio_rs::{Cursor, Entity, Sender, SenderMode, Variant};

fn main() {
    let destination = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3333);
    let transport = tuio_rs::transport::UdpSender::new().expect("failed to bind socket");
    let sender = Sender::new(SenderMode::FullState);

    let entities = vec![
        (Entity::Cursor(Cursor::new(Variant::Cursor2D, 0)), true),
        (Entity::Cursor(Cursor::new(Variant::Cursor2D, 1)), true),
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
        .expect("failed to encode frame");

    transport
        .send_to(&bytes, destination)
        .expect("sending OSC packet");
}
