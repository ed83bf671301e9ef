use rosc::OscType;

use super::{check_arity, expect_float};
use crate::error::TuioError;
use crate::router::Variant;

/// TUIO Blob, 2D profile. Wire order: `x y a w h f Vx Vy Va m r`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Blob2D {
    session_id: i32,
    pub position: [f32; 2],
    pub angle: f32,
    pub dimension: [f32; 2],
    pub area: f32,
    pub velocity: [f32; 2],
    pub velocity_rotation: f32,
    pub motion_acceleration: f32,
    pub rotation_acceleration: f32,
}

/// TUIO Blob, 2.5D profile. Wire order: `x y z a w h f Vx Vy Vz Va m r`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Blob25D {
    session_id: i32,
    pub position: [f32; 3],
    pub angle: f32,
    pub dimension: [f32; 2],
    pub area: f32,
    pub velocity: [f32; 3],
    pub velocity_rotation: f32,
    pub motion_acceleration: f32,
    pub rotation_acceleration: f32,
}

/// TUIO Blob, 3D profile. `angle` and `velocity_rotation` are full 3-vectors, the bounding shape
/// is a `width height depth` box, and `area` becomes a `volume`. Wire order:
/// `x y z a b c w h d v Vx Vy Vz Va Vb Vc m r`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Blob3D {
    session_id: i32,
    pub position: [f32; 3],
    pub angle: [f32; 3],
    pub dimension: [f32; 3],
    pub volume: f32,
    pub velocity: [f32; 3],
    pub velocity_rotation: [f32; 3],
    pub motion_acceleration: f32,
    pub rotation_acceleration: f32,
}

macro_rules! impl_planar_blob {
    ($ty:ident, $variant:expr, $expected:expr, $dim:expr) => {
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
                check_arity(address, $expected, $dim * 2 + 7, args)?;
                for i in 0..$dim {
                    self.position[i] = expect_float(address, $expected, args, i)?;
                }
                self.angle = expect_float(address, $expected, args, $dim)?;
                self.dimension[0] = expect_float(address, $expected, args, $dim + 1)?;
                self.dimension[1] = expect_float(address, $expected, args, $dim + 2)?;
                self.area = expect_float(address, $expected, args, $dim + 3)?;
                for i in 0..$dim {
                    self.velocity[i] = expect_float(address, $expected, args, $dim + 4 + i)?;
                }
                self.velocity_rotation =
                    expect_float(address, $expected, args, $dim * 2 + 4)?;
                self.motion_acceleration =
                    expect_float(address, $expected, args, $dim * 2 + 5)?;
                self.rotation_acceleration =
                    expect_float(address, $expected, args, $dim * 2 + 6)?;
                Ok(())
            }

            pub fn to_set_args(&self) -> Vec<OscType> {
                let mut args = vec![OscType::Int(self.session_id)];
                args.extend(self.position.iter().map(|v| OscType::Float(*v)));
                args.push(OscType::Float(self.angle));
                args.extend(self.dimension.iter().map(|v| OscType::Float(*v)));
                args.push(OscType::Float(self.area));
                args.extend(self.velocity.iter().map(|v| OscType::Float(*v)));
                args.push(OscType::Float(self.velocity_rotation));
                args.push(OscType::Float(self.motion_acceleration));
                args.push(OscType::Float(self.rotation_acceleration));
                args
            }
        }
    };
}

impl_planar_blob!(Blob2D, Variant::Blob2D, "x y a w h f Vx Vy Va m r", 2);
impl_planar_blob!(
    Blob25D,
    Variant::Blob25D,
    "x y z a w h f Vx Vy Vz Va m r",
    3
);

impl Blob3D {
    const EXPECTED: &'static str = "x y z a b c w h d v Vx Vy Vz Va Vb Vc m r";

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
        Variant::Blob3D
    }

    pub fn apply_set(&mut self, args: &[OscType]) -> Result<(), TuioError> {
        let address = Variant::Blob3D.address();
        check_arity(address, Self::EXPECTED, 18, args)?;
        for i in 0..3 {
            self.position[i] = expect_float(address, Self::EXPECTED, args, i)?;
        }
        for i in 0..3 {
            self.angle[i] = expect_float(address, Self::EXPECTED, args, 3 + i)?;
        }
        for i in 0..3 {
            self.dimension[i] = expect_float(address, Self::EXPECTED, args, 6 + i)?;
        }
        self.volume = expect_float(address, Self::EXPECTED, args, 9)?;
        for i in 0..3 {
            self.velocity[i] = expect_float(address, Self::EXPECTED, args, 10 + i)?;
        }
        for i in 0..3 {
            self.velocity_rotation[i] = expect_float(address, Self::EXPECTED, args, 13 + i)?;
        }
        self.motion_acceleration = expect_float(address, Self::EXPECTED, args, 16)?;
        self.rotation_acceleration = expect_float(address, Self::EXPECTED, args, 17)?;
        Ok(())
    }

    pub fn to_set_args(&self) -> Vec<OscType> {
        let mut args = vec![OscType::Int(self.session_id)];
        args.extend(self.position.iter().map(|v| OscType::Float(*v)));
        args.extend(self.angle.iter().map(|v| OscType::Float(*v)));
        args.extend(self.dimension.iter().map(|v| OscType::Float(*v)));
        args.push(OscType::Float(self.volume));
        args.extend(self.velocity.iter().map(|v| OscType::Float(*v)));
        args.extend(self.velocity_rotation.iter().map(|v| OscType::Float(*v)));
        args.push(OscType::Float(self.motion_acceleration));
        args.push(OscType::Float(self.rotation_acceleration));
        args
    }
}

/// A blob of any dimension, the type the [`crate::listener::Listener`] contract's
/// `add_blob`/`update_blob`/`remove_blob` methods receive.
#[derive(Debug, Clone)]
pub enum Blob {
    D2(Blob2D),
    D25(Blob25D),
    D3(Blob3D),
}

impl Blob {
    pub fn new(variant: Variant, session_id: i32) -> Self {
        match variant {
            Variant::Blob2D => Blob::D2(Blob2D::new(session_id)),
            Variant::Blob25D => Blob::D25(Blob25D::new(session_id)),
            Variant::Blob3D => Blob::D3(Blob3D::new(session_id)),
            _ => panic!("not a blob variant: {variant:?}"),
        }
    }

    pub fn session_id(&self) -> i32 {
        match self {
            Blob::D2(b) => b.session_id(),
            Blob::D25(b) => b.session_id(),
            Blob::D3(b) => b.session_id(),
        }
    }

    pub fn variant(&self) -> Variant {
        match self {
            Blob::D2(b) => b.variant(),
            Blob::D25(b) => b.variant(),
            Blob::D3(b) => b.variant(),
        }
    }

    pub fn apply_set(&mut self, args: &[OscType]) -> Result<(), TuioError> {
        match self {
            Blob::D2(b) => b.apply_set(args),
            Blob::D25(b) => b.apply_set(args),
            Blob::D3(b) => b.apply_set(args),
        }
    }

    pub fn to_set_args(&self) -> Vec<OscType> {
        match self {
            Blob::D2(b) => b.to_set_args(),
            Blob::D25(b) => b.to_set_args(),
            Blob::D3(b) => b.to_set_args(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_a_well_formed_2d_set() {
        let mut blob = Blob2D::new(1);
        let args = vec![
            OscType::Float(0.1),
            OscType::Float(0.2),
            OscType::Float(0.0),
            OscType::Float(0.3),
            OscType::Float(0.4),
            OscType::Float(0.12),
            OscType::Float(0.0),
            OscType::Float(0.0),
            OscType::Float(0.0),
            OscType::Float(0.0),
            OscType::Float(0.0),
        ];
        blob.apply_set(&args).unwrap();
        assert_eq!(blob.position, [0.1, 0.2]);
        assert_eq!(blob.dimension, [0.3, 0.4]);
        assert_eq!(blob.area, 0.12);
    }

    #[test]
    fn rejects_wrong_arity() {
        let mut blob = Blob2D::new(1);
        assert!(matches!(
            blob.apply_set(&[OscType::Float(0.1)]),
            Err(TuioError::MalformedTuioSet { .. })
        ));
    }

    #[test]
    fn blob_3d_set_args_round_trip() {
        let mut blob = Blob3D::new(5);
        blob.position = [1.0, 2.0, 3.0];
        blob.angle = [0.1, 0.2, 0.3];
        blob.dimension = [4.0, 5.0, 6.0];
        blob.volume = 120.0;
        blob.velocity = [0.01, 0.02, 0.03];
        blob.velocity_rotation = [0.1, 0.1, 0.1];
        blob.motion_acceleration = 0.5;
        blob.rotation_acceleration = 0.25;

        let args = blob.to_set_args();
        let mut round_tripped = Blob3D::new(5);
        round_tripped.apply_set(&args[1..]).unwrap();
        assert_eq!(round_tripped.dimension, blob.dimension);
        assert_eq!(round_tripped.volume, blob.volume);
        assert_eq!(round_tripped.velocity_rotation, blob.velocity_rotation);
    }
}
