use rosc::OscType;

use super::{check_arity, expect_float};
use crate::error::TuioError;
use crate::router::Variant;

/// TUIO Cursor, 2D profile. Wire order for `set` fields: `x y Vx Vy m`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cursor2D {
    session_id: i32,
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    pub motion_acceleration: f32,
}

/// TUIO Cursor, 2.5D profile. Wire order: `x y z Vx Vy Vz m`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cursor25D {
    session_id: i32,
    pub position: [f32; 3],
    pub velocity: [f32; 3],
    pub motion_acceleration: f32,
}

/// TUIO Cursor, 3D profile. Identical shape to [`Cursor25D`] — cursors carry no orientation at
/// either dimension — kept as a distinct type for variant-table separation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cursor3D {
    session_id: i32,
    pub position: [f32; 3],
    pub velocity: [f32; 3],
    pub motion_acceleration: f32,
}

macro_rules! impl_cursor {
    ($ty:ident, $variant:expr, $expected:expr, $pos_len:expr) => {
        impl $ty {
            pub fn new(session_id: i32) -> Self {
                Self {
                    session_id,
                    ..Default::default()
                }
            }

            pub fn session_id(&self) -> i32 {
                self.session_id
            }

            pub const fn variant(&self) -> Variant {
                $variant
            }

            /// Applies a `set` message's fields (everything after `"set"` and the session id).
            pub fn apply_set(&mut self, args: &[OscType]) -> Result<(), TuioError> {
                let address = $variant.address();
                check_arity(address, $expected, $pos_len * 2 + 1, args)?;
                for i in 0..$pos_len {
                    self.position[i] = expect_float(address, $expected, args, i)?;
                }
                for i in 0..$pos_len {
                    self.velocity[i] = expect_float(address, $expected, args, $pos_len + i)?;
                }
                self.motion_acceleration = expect_float(address, $expected, args, $pos_len * 2)?;
                Ok(())
            }

            /// Serializes this entity's current state as `set` message fields (session id first).
            pub fn to_set_args(&self) -> Vec<OscType> {
                let mut args = vec![OscType::Int(self.session_id)];
                args.extend(self.position.iter().map(|v| OscType::Float(*v)));
                args.extend(self.velocity.iter().map(|v| OscType::Float(*v)));
                args.push(OscType::Float(self.motion_acceleration));
                args
            }
        }
    };
}

impl_cursor!(Cursor2D, Variant::Cursor2D, "x y Vx Vy m", 2);
impl_cursor!(Cursor25D, Variant::Cursor25D, "x y z Vx Vy Vz m", 3);
impl_cursor!(Cursor3D, Variant::Cursor3D, "x y z Vx Vy Vz m", 3);

/// A cursor of any dimension, the type the [`crate::listener::Listener`] contract's
/// `add_cursor`/`update_cursor`/`remove_cursor` methods receive.
#[derive(Debug, Clone)]
pub enum Cursor {
    D2(Cursor2D),
    D25(Cursor25D),
    D3(Cursor3D),
}

impl Cursor {
    pub fn new(variant: Variant, session_id: i32) -> Self {
        match variant {
            Variant::Cursor2D => Cursor::D2(Cursor2D::new(session_id)),
            Variant::Cursor25D => Cursor::D25(Cursor25D::new(session_id)),
            Variant::Cursor3D => Cursor::D3(Cursor3D::new(session_id)),
            _ => panic!("not a cursor variant: {variant:?}"),
        }
    }

    pub fn session_id(&self) -> i32 {
        match self {
            Cursor::D2(c) => c.session_id(),
            Cursor::D25(c) => c.session_id(),
            Cursor::D3(c) => c.session_id(),
        }
    }

    pub fn variant(&self) -> Variant {
        match self {
            Cursor::D2(c) => c.variant(),
            Cursor::D25(c) => c.variant(),
            Cursor::D3(c) => c.variant(),
        }
    }

    pub fn apply_set(&mut self, args: &[OscType]) -> Result<(), TuioError> {
        match self {
            Cursor::D2(c) => c.apply_set(args),
            Cursor::D25(c) => c.apply_set(args),
            Cursor::D3(c) => c.apply_set(args),
        }
    }

    pub fn to_set_args(&self) -> Vec<OscType> {
        match self {
            Cursor::D2(c) => c.to_set_args(),
            Cursor::D25(c) => c.to_set_args(),
            Cursor::D3(c) => c.to_set_args(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_a_well_formed_set() {
        let mut cursor = Cursor2D::new(42);
        let args = vec![
            OscType::Float(0.5),
            OscType::Float(0.5),
            OscType::Float(0.0),
            OscType::Float(0.0),
            OscType::Float(0.0),
        ];
        cursor.apply_set(&args).unwrap();
        assert_eq!(cursor.position, [0.5, 0.5]);
    }

    #[test]
    fn rejects_wrong_arity() {
        let mut cursor = Cursor2D::new(42);
        let args = vec![OscType::Float(0.1)];
        assert!(matches!(
            cursor.apply_set(&args),
            Err(TuioError::MalformedTuioSet { .. })
        ));
    }

    #[test]
    fn set_args_round_trip() {
        let mut cursor = Cursor25D::new(7);
        cursor.position = [1.0, 2.0, 3.0];
        cursor.velocity = [0.1, 0.2, 0.3];
        cursor.motion_acceleration = 9.0;

        let args = cursor.to_set_args();
        let mut round_tripped = Cursor25D::new(7);
        round_tripped.apply_set(&args[1..]).unwrap();
        assert_eq!(round_tripped.position, cursor.position);
        assert_eq!(round_tripped.velocity, cursor.velocity);
        assert_eq!(round_tripped.motion_acceleration, cursor.motion_acceleration);
    }
}
