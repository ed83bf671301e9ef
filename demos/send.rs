use std::time::Duration;

use tuio_rs::{Server, ServerConfig, Variant};

fn main() {
    tracing_subscriber::fmt::init();

    let mut server = Server::new(ServerConfig::default()).expect("failed to bind server socket");

    let cursor_id = server.create_cursor(Variant::Cursor2D);
    let object_id = server.create_object(Variant::Object2D);
    server.commit_frame().expect("failed to send frame");

    std::thread::sleep(Duration::from_secs(2));

    server.update(Variant::Cursor2D, cursor_id, |entity| {
        if let tuio_rs::Entity::Cursor(tuio_rs::Cursor::D2(cursor)) = entity {
            cursor.position = [1.0, 1.0];
        }
    });
    server.update(Variant::Object2D, object_id, |entity| {
        if let tuio_rs::Entity::Object(tuio_rs::Object::D2(object)) = entity {
            object.position = [1.0, 1.0];
        }
    });
    server.commit_frame().expect("failed to send frame");

    std::thread::sleep(Duration::from_secs(2));
}
