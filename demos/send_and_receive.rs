use std::time::Duration;

use dyn_partial_eq::DynPartialEq;
use tuio_rs::{
    Blob, Client, ClientConfig, Cursor, Entity, Listener, Object, Server, ServerConfig, Variant,
};

#[derive(DynPartialEq, PartialEq)]
struct PrintListener;

impl Listener for PrintListener {
    fn add_cursor(&mut self, cursor: &Cursor) {
        println!("new cursor: {cursor:?}");
    }
    fn update_cursor(&mut self, cursor: &Cursor) {
        println!("update cursor: {cursor:?}");
    }
    fn remove_cursor(&mut self, cursor: &Cursor) {
        println!("remove cursor: {cursor:?}");
    }
    fn add_object(&mut self, object: &Object) {
        println!("new object: {object:?}");
    }
    fn update_object(&mut self, object: &Object) {
        println!("update object: {object:?}");
    }
    fn remove_object(&mut self, object: &Object) {
        println!("remove object: {object:?}");
    }
    fn add_blob(&mut self, blob: &Blob) {
        println!("new blob: {blob:?}");
    }
    fn update_blob(&mut self, blob: &Blob) {
        println!("update blob: {blob:?}");
    }
    fn remove_blob(&mut self, blob: &Blob) {
        println!("remove blob: {blob:?}");
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let client = Client::new(ClientConfig::default()).expect("failed to bind client socket");
    client.add_listener(PrintListener);
    client.connect();

    let mut server = Server::new(ServerConfig::default()).expect("failed to bind server socket");

    let cursor_id = server.create_cursor(Variant::Cursor2D);
    let object_id = server.create_object(Variant::Object2D);
    let blob_id = server.create_blob(Variant::Blob2D);
    server.commit_frame().expect("failed to send frame");
    std::thread::sleep(Duration::from_secs(1));

    server.update(Variant::Cursor2D, cursor_id, |entity| {
        if let Entity::Cursor(Cursor::D2(cursor)) = entity {
            cursor.position = [1.0, 1.0];
        }
    });
    server.update(Variant::Object2D, object_id, |entity| {
        if let Entity::Object(Object::D2(object)) = entity {
            object.position = [1.0, 1.0];
            object.angle = 90f32.to_radians();
        }
    });
    server.update(Variant::Blob2D, blob_id, |entity| {
        if let Entity::Blob(Blob::D2(blob)) = entity {
            blob.position = [1.0, 1.0];
            blob.angle = 90f32.to_radians();
            blob.dimension = [0.2, 0.2];
            blob.area = 0.04;
        }
    });
    server.commit_frame().expect("failed to send frame");
    std::thread::sleep(Duration::from_secs(1));

    server.remove(Variant::Cursor2D, cursor_id);
    server.remove(Variant::Object2D, object_id);
    server.remove(Variant::Blob2D, blob_id);
    server.commit_frame().expect("failed to send frame");
    std::thread::sleep(Duration::from_secs(1));
}
