//! Typed state of each tracked entity across the nine TUIO profile variants.
//!
//! Nine concrete structs (`Cursor2D`/`Cursor25D`/`Cursor3D`, `Object2D`/.../ `Blob3D`) are kept
//! distinct rather than unified behind one `Kinematics` record: their wire orderings and
//! attribute sets differ enough (see spec §4.2) that a shared representation would mean either
//! padding every variant to the widest shape or punning fields across incompatible meanings.
//! Each kind is additionally wrapped in a dimension-tagged enum (`Cursor`, `Object`, `Blob`) so
//! the [`crate::listener::Listener`] contract has exactly one concrete type per kind to accept,
//! regardless of which dimension produced it.

pub mod blob;
pub mod cursor;
pub mod object;

pub use blob::{Blob, Blob25D, Blob2D, Blob3D};
pub use cursor::{Cursor, Cursor25D, Cursor2D, Cursor3D};
pub use object::{Object, Object25D, Object2D, Object3D};

use rosc::OscType;

use crate::error::TuioError;
use crate::router::Variant;

/// Reads `args[index]` as a float, recording a [`TuioError::MalformedTuioSet`] naming `address`
/// and the full argument list on mismatch or missing index.
pub(crate) fn expect_float(
    address: &str,
    expected: &'static str,
    args: &[OscType],
    index: usize,
) -> Result<f32, TuioError> {
    args.get(index)
        .and_then(|v| v.clone().float())
        .ok_or_else(|| TuioError::MalformedTuioSet {
            address: address.to_string(),
            expected,
            got: args.to_vec(),
        })
}

/// Reads `args[index]` as an int, same error shape as [`expect_float`].
pub(crate) fn expect_int(
    address: &str,
    expected: &'static str,
    args: &[OscType],
    index: usize,
) -> Result<i32, TuioError> {
    args.get(index)
        .and_then(|v| v.clone().int())
        .ok_or_else(|| TuioError::MalformedTuioSet {
            address: address.to_string(),
            expected,
            got: args.to_vec(),
        })
}

pub(crate) fn check_arity(
    address: &str,
    expected: &'static str,
    expected_len: usize,
    args: &[OscType],
) -> Result<(), TuioError> {
    if args.len() != expected_len {
        return Err(TuioError::MalformedTuioSet {
            address: address.to_string(),
            expected,
            got: args.to_vec(),
        });
    }
    Ok(())
}

/// One tracked entity of any kind/dimension, tagged so the [`crate::dispatcher::Dispatcher`] can
/// demux to the right `Listener` method at dispatch time. Pending-event buffers in
/// [`crate::reconciler::FrameReconciler`] hold these directly, mixing all nine variants together
/// (see spec §4.4) rather than nine separate buffers.
#[derive(Debug, Clone)]
pub enum Entity {
    Cursor(Cursor),
    Object(Object),
    Blob(Blob),
}

impl Entity {
    pub fn session_id(&self) -> i32 {
        match self {
            Entity::Cursor(c) => c.session_id(),
            Entity::Object(o) => o.session_id(),
            Entity::Blob(b) => b.session_id(),
        }
    }

    pub fn variant(&self) -> Variant {
        match self {
            Entity::Cursor(c) => c.variant(),
            Entity::Object(o) => o.variant(),
            Entity::Blob(b) => b.variant(),
        }
    }

    pub fn apply_set(&mut self, args: &[OscType]) -> Result<(), TuioError> {
        match self {
            Entity::Cursor(c) => c.apply_set(args),
            Entity::Object(o) => o.apply_set(args),
            Entity::Blob(b) => b.apply_set(args),
        }
    }

    pub fn to_set_args(&self) -> Vec<OscType> {
        match self {
            Entity::Cursor(c) => c.to_set_args(),
            Entity::Object(o) => o.to_set_args(),
            Entity::Blob(b) => b.to_set_args(),
        }
    }
}
