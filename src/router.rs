//! Maps an OSC address to the profile variant it carries.

/// One of the nine TUIO profile variants: {Cursor, Object, Blob} × {2D, 2.5D, 3D}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Cursor2D,
    Cursor25D,
    Cursor3D,
    Object2D,
    Object25D,
    Object3D,
    Blob2D,
    Blob25D,
    Blob3D,
}

impl Variant {
    /// All nine variants, in a stable order (used to iterate tables deterministically).
    pub const ALL: [Variant; 9] = [
        Variant::Cursor2D,
        Variant::Cursor25D,
        Variant::Cursor3D,
        Variant::Object2D,
        Variant::Object25D,
        Variant::Object3D,
        Variant::Blob2D,
        Variant::Blob25D,
        Variant::Blob3D,
    ];

    /// Resolves an OSC address to its variant, if it is one of the nine TUIO addresses.
    pub fn from_address(address: &str) -> Option<Variant> {
        Some(match address {
            "/tuio/2Dcur" => Variant::Cursor2D,
            "/tuio/25Dcur" => Variant::Cursor25D,
            "/tuio/3Dcur" => Variant::Cursor3D,
            "/tuio/2Dobj" => Variant::Object2D,
            "/tuio/25Dobj" => Variant::Object25D,
            "/tuio/3Dobj" => Variant::Object3D,
            "/tuio/2Dblb" => Variant::Blob2D,
            "/tuio/25Dblb" => Variant::Blob25D,
            "/tuio/3Dblb" => Variant::Blob3D,
            _ => return None,
        })
    }

    /// The stable OSC address prefix for this variant.
    pub const fn address(self) -> &'static str {
        match self {
            Variant::Cursor2D => "/tuio/2Dcur",
            Variant::Cursor25D => "/tuio/25Dcur",
            Variant::Cursor3D => "/tuio/3Dcur",
            Variant::Object2D => "/tuio/2Dobj",
            Variant::Object25D => "/tuio/25Dobj",
            Variant::Object3D => "/tuio/3Dobj",
            Variant::Blob2D => "/tuio/2Dblb",
            Variant::Blob25D => "/tuio/25Dblb",
            Variant::Blob3D => "/tuio/3Dblb",
        }
    }

    pub const fn kind(self) -> Kind {
        match self {
            Variant::Cursor2D | Variant::Cursor25D | Variant::Cursor3D => Kind::Cursor,
            Variant::Object2D | Variant::Object25D | Variant::Object3D => Kind::Object,
            Variant::Blob2D | Variant::Blob25D | Variant::Blob3D => Kind::Blob,
        }
    }
}

/// The entity kind a variant belongs to, independent of dimension. Matches the three-method
/// groups of the [`crate::listener::Listener`] contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Cursor,
    Object,
    Blob,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_address() {
        for variant in Variant::ALL {
            assert_eq!(Variant::from_address(variant.address()), Some(variant));
        }
    }

    #[test]
    fn unknown_address_is_none() {
        assert_eq!(Variant::from_address("/tuio/4Dcur"), None);
        assert_eq!(Variant::from_address("/synth/volume"), None);
    }
}
