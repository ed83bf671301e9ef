use rosc::OscType;

use super::{check_arity, expect_float, expect_int};
use crate::error::TuioError;
use crate::router::Variant;

/// TUIO Object, 2D profile. Wire order for `set` fields: `i x y a Vx Vy Va m r`.
#[derive(Debug, Clone, PartialEq)]
pub struct Object2D {
    session_id: i32,
    pub class_id: i32,
    pub position: [f32; 2],
    pub angle: f32,
    pub velocity: [f32; 2],
    pub velocity_rotation: f32,
    pub motion_acceleration: f32,
    pub rotation_acceleration: f32,
}

/// TUIO Object, 2.5D profile. Wire order: `i x y z a Vx Vy Vz Va m r`.
#[derive(Debug, Clone, PartialEq)]
pub struct Object25D {
    session_id: i32,
    pub class_id: i32,
    pub position: [f32; 3],
    pub angle: f32,
    pub velocity: [f32; 3],
    pub velocity_rotation: f32,
    pub motion_acceleration: f32,
    pub rotation_acceleration: f32,
}

/// TUIO Object, 3D profile. Unlike the lower dimensions, `angle` and `velocity_rotation` are
/// full 3-vectors (`a b c` / `A B C`) since a 3D object can rotate about any axis. Wire order:
/// `i x y z a b c Vx Vy Vz Va Vb Vc m r`.
#[derive(Debug, Clone, PartialEq)]
pub struct Object3D {
    session_id: i32,
    pub class_id: i32,
    pub position: [f32; 3],
    pub angle: [f32; 3],
    pub velocity: [f32; 3],
    pub velocity_rotation: [f32; 3],
    pub motion_acceleration: f32,
    pub rotation_acceleration: f32,
}

macro_rules! impl_planar_object {
    ($ty:ident, $variant:expr, $expected:expr, $dim:expr) => {
        impl Default for $ty {
            fn default() -> Self {
                Self {
                    session_id: 0,
                    class_id: -1,
                    position: [0.0; $dim],
                    angle: 0.0,
                    velocity: [0.0; $dim],
                    velocity_rotation: 0.0,
                    motion_acceleration: 0.0,
                    rotation_acceleration: 0.0,
                }
            }
        }

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

            pub fn apply_set(&mut self, args: &[OscType]) -> Result<(), TuioError> {
                let address = $variant.address();
                check_arity(address, $expected, $dim * 2 + 5, args)?;
                self.class_id = expect_int(address, $expected, args, 0)?;
                for i in 0..$dim {
                    self.position[i] = expect_float(address, $expected, args, 1 + i)?;
                }
                self.angle = expect_float(address, $expected, args, 1 + $dim)?;
                for i in 0..$dim {
                    self.velocity[i] = expect_float(address, $expected, args, 2 + $dim + i)?;
                }
                self.velocity_rotation = expect_float(address, $expected, args, 2 + $dim * 2)?;
                self.motion_acceleration = expect_float(address, $expected, args, 3 + $dim * 2)?;
                self.rotation_acceleration = expect_float(address, $expected, args, 4 + $dim * 2)?;
                Ok(())
            }

            pub fn to_set_args(&self) -> Vec<OscType> {
                let mut args = vec![OscType::Int(self.session_id), OscType::Int(self.class_id)];
                args.extend(self.position.iter().map(|v| OscType::Float(*v)));
                args.push(OscType::Float(self.angle));
                args.extend(self.velocity.iter().map(|v| OscType::Float(*v)));
                args.push(OscType::Float(self.velocity_rotation));
                args.push(OscType::Float(self.motion_acceleration));
                args.push(OscType::Float(self.rotation_acceleration));
                args
            }
        }
    };
}

impl_planar_object!(Object2D, Variant::Object2D, "i x y a Vx Vy Va m r", 2);
impl_planar_object!(
    Object25D,
    Variant::Object25D,
    "i x y z a Vx Vy Vz Va m r",
    3
);

impl Default for Object3D {
    fn default() -> Self {
        Self {
            session_id: 0,
            class_id: -1,
            position: [0.0; 3],
            angle: [0.0; 3],
            velocity: [0.0; 3],
            velocity_rotation: [0.0; 3],
            motion_acceleration: 0.0,
            rotation_acceleration: 0.0,
        }
    }
}

impl Object3D {
    const EXPECTED: &'static str = "i x y z a b c Vx Vy Vz Va Vb Vc m r";

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
        Variant::Object3D
    }

    pub fn apply_set(&mut self, args: &[OscType]) -> Result<(), TuioError> {
        let address = Variant::Object3D.address();
        check_arity(address, Self::EXPECTED, 15, args)?;
        self.class_id = expect_int(address, Self::EXPECTED, args, 0)?;
        for i in 0..3 {
            self.position[i] = expect_float(address, Self::EXPECTED, args, 1 + i)?;
        }
        for i in 0..3 {
            self.angle[i] = expect_float(address, Self::EXPECTED, args, 4 + i)?;
        }
        for i in 0..3 {
            self.velocity[i] = expect_float(address, Self::EXPECTED, args, 7 + i)?;
        }
        for i in 0..3 {
            self.velocity_rotation[i] = expect_float(address, Self::EXPECTED, args, 10 + i)?;
        }
        self.motion_acceleration = expect_float(address, Self::EXPECTED, args, 13)?;
        self.rotation_acceleration = expect_float(address, Self::EXPECTED, args, 14)?;
        Ok(())
    }

    pub fn to_set_args(&self) -> Vec<OscType> {
        let mut args = vec![OscType::Int(self.session_id), OscType::Int(self.class_id)];
        args.extend(self.position.iter().map(|v| OscType::Float(*v)));
        args.extend(self.angle.iter().map(|v| OscType::Float(*v)));
        args.extend(self.velocity.iter().map(|v| OscType::Float(*v)));
        args.extend(self.velocity_rotation.iter().map(|v| OscType::Float(*v)));
        args.push(OscType::Float(self.motion_acceleration));
        args.push(OscType::Float(self.rotation_acceleration));
        args
    }
}

/// An object of any dimension, the type the [`crate::listener::Listener`] contract's
/// `add_object`/`update_object`/`remove_object` methods receive.
#[derive(Debug, Clone)]
pub enum Object {
    D2(Object2D),
    D25(Object25D),
    D3(Object3D),
}

impl Object {
    pub fn new(variant: Variant, session_id: i32) -> Self {
        match variant {
            Variant::Object2D => Object::D2(Object2D::new(session_id)),
            Variant::Object25D => Object::D25(Object25D::new(session_id)),
            Variant::Object3D => Object::D3(Object3D::new(session_id)),
            _ => panic!("not an object variant: {variant:?}"),
        }
    }

    pub fn session_id(&self) -> i32 {
        match self {
            Object::D2(o) => o.session_id(),
            Object::D25(o) => o.session_id(),
            Object::D3(o) => o.session_id(),
        }
    }

    pub fn variant(&self) -> Variant {
        match self {
            Object::D2(o) => o.variant(),
            Object::D25(o) => o.variant(),
            Object::D3(o) => o.variant(),
        }
    }

    pub fn apply_set(&mut self, args: &[OscType]) -> Result<(), TuioError> {
        match self {
            Object::D2(o) => o.apply_set(args),
            Object::D25(o) => o.apply_set(args),
            Object::D3(o) => o.apply_set(args),
        }
    }

    pub fn to_set_args(&self) -> Vec<OscType> {
        match self {
            Object::D2(o) => o.to_set_args(),
            Object::D25(o) => o.to_set_args(),
            Object::D3(o) => o.to_set_args(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_id_defaults_to_minus_one() {
        assert_eq!(Object2D::new(1).class_id, -1);
        assert_eq!(Object3D::new(1).class_id, -1);
    }

    #[test]
    fn applies_a_well_formed_2d_set() {
        let mut object = Object2D::new(7);
        let args = vec![
            OscType::Int(3),
            OscType::Float(0.1),
            OscType::Float(0.2),
            OscType::Float(0.0),
            OscType::Float(0.0),
            OscType::Float(0.0),
            OscType::Float(0.0),
            OscType::Float(0.0),
            OscType::Float(0.0),
        ];
        object.apply_set(&args).unwrap();
        assert_eq!(object.class_id, 3);
        assert_eq!(object.position, [0.1, 0.2]);
    }

    #[test]
    fn object_3d_set_args_round_trip() {
        let mut object = Object3D::new(9);
        object.class_id = 2;
        object.position = [1.0, 2.0, 3.0];
        object.angle = [0.1, 0.2, 0.3];
        object.velocity = [0.4, 0.5, 0.6];
        object.velocity_rotation = [0.7, 0.8, 0.9];
        object.motion_acceleration = 1.5;
        object.rotation_acceleration = 2.5;

        let args = object.to_set_args();
        let mut round_tripped = Object3D::new(9);
        round_tripped.apply_set(&args[1..]).unwrap();
        assert_eq!(round_tripped.class_id, object.class_id);
        assert_eq!(round_tripped.angle, object.angle);
        assert_eq!(round_tripped.velocity_rotation, object.velocity_rotation);
    }
}
