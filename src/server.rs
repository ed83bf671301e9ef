//! The sending end of the library: tracks entities per variant and commits them to the wire as
//! TUIO bundles, generalizing the reference crate's single-variant `server::Server` (one
//! `cursor_list`, one destination) to all nine profile variants, multiple destinations, and the
//! [`SenderMode::ChangedOnly`] dirty-tracking mode it never had.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use std::time::SystemTime;

use indexmap::IndexMap;
use rosc::OscTime;

use crate::config::ServerConfig;
use crate::error::TuioError;
use crate::profile::{Blob, Cursor, Entity, Object};
use crate::router::Variant;
use crate::sender::Sender;
use crate::transport::UdpSender;

pub struct Server {
    config: ServerConfig,
    sender: Sender,
    transport: UdpSender,
    destination: std::net::SocketAddr,
    frame_id: i32,
    next_session_id: i32,
    tables: HashMap<Variant, IndexMap<i32, Entity>>,
    dirty: HashMap<Variant, HashSet<i32>>,
}

impl Server {
    pub fn new(config: ServerConfig) -> Result<Self, TuioError> {
        let destination = std::net::SocketAddr::from_str(&config.destination_addr)
            .map_err(|e| TuioError::InvalidAddress(config.destination_addr.clone(), e))?;
        let sender = Sender::new(config.sender_mode);
        let transport = UdpSender::new()?;

        let mut tables = HashMap::with_capacity(Variant::ALL.len());
        for variant in Variant::ALL {
            tables.insert(variant, IndexMap::new());
        }

        Ok(Server {
            config,
            sender,
            transport,
            destination,
            frame_id: 0,
            next_session_id: 0,
            tables,
            dirty: HashMap::new(),
        })
    }

    fn fresh_session_id(&mut self) -> i32 {
        let id = self.next_session_id;
        self.next_session_id += 1;
        id
    }

    fn insert(&mut self, variant: Variant, session_id: i32, entity: Entity) {
        self.tables.get_mut(&variant).unwrap().insert(session_id, entity);
        self.dirty.entry(variant).or_default().insert(session_id);
    }

    pub fn create_cursor(&mut self, variant: Variant) -> i32 {
        let id = self.fresh_session_id();
        self.insert(variant, id, Entity::Cursor(Cursor::new(variant, id)));
        id
    }

    pub fn create_object(&mut self, variant: Variant) -> i32 {
        let id = self.fresh_session_id();
        self.insert(variant, id, Entity::Object(Object::new(variant, id)));
        id
    }

    pub fn create_blob(&mut self, variant: Variant) -> i32 {
        let id = self.fresh_session_id();
        self.insert(variant, id, Entity::Blob(Blob::new(variant, id)));
        id
    }

    /// Mutates a tracked entity and marks it dirty for the next `commit_frame`. A no-op if no
    /// entity with that session id is tracked under `variant`.
    pub fn update<F: FnOnce(&mut Entity)>(&mut self, variant: Variant, session_id: i32, f: F) {
        if let Some(entity) = self
            .tables
            .get_mut(&variant)
            .and_then(|table| table.get_mut(&session_id))
        {
            f(entity);
            self.dirty.entry(variant).or_default().insert(session_id);
        }
    }

    /// Stops tracking an entity; it is reported in the next `commit_frame`'s `alive` list one
    /// last time as absent (i.e. it simply disappears from the list), same as the live TUIO
    /// wire protocol communicates removal.
    pub fn remove(&mut self, variant: Variant, session_id: i32) {
        if let Some(table) = self.tables.get_mut(&variant) {
            table.shift_remove(&session_id);
        }
        if let Some(dirty) = self.dirty.get_mut(&variant) {
            dirty.remove(&session_id);
        }
    }

    /// Encodes and sends one bundle per variant (source + alive + set... + fseq), using the
    /// configured [`crate::sender::SenderMode`] to decide which entities get a `set`.
    pub fn commit_frame(&mut self) -> Result<(), TuioError> {
        self.frame_id += 1;
        let timetag = OscTime::try_from(SystemTime::now())
            .unwrap_or(OscTime { seconds: 0, fractional: 0 });

        for variant in Variant::ALL {
            let table = &self.tables[&variant];
            let dirty = self.dirty.get(&variant);
            let entities: Vec<(Entity, bool)> = table
                .values()
                .map(|entity| {
                    let is_dirty = dirty.is_some_and(|d| d.contains(&entity.session_id()));
                    (entity.clone(), is_dirty)
                })
                .collect();

            let bytes = self.sender.encode_frame(
                variant,
                &self.config.source_name,
                self.frame_id,
                timetag,
                &entities,
            )?;
            self.transport.send_to(&bytes, self.destination)?;
        }

        self.dirty.clear();
        Ok(())
    }
}
