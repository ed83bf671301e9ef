use std::time::Duration;

use dyn_partial_eq::DynPartialEq;
use tuio_rs::{Blob, Client, ClientConfig, Cursor, Listener, Object};

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

    loop {
        std::thread::sleep(Duration::from_secs(1));
    }
}
