//! The static castle scene.
//!
//! The scene is a flat, ordered table of objects built once from literal
//! constants. The order of [`castle`] is also the draw order.

use cgmath::{Rad, Vector3};

/// Errors raised while building scene objects.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SceneError {
    #[error("object `{name}` has a degenerate scale {scale:?}")]
    DegenerateScale { name: &'static str, scale: [f32; 3] },
}

/// Places a unit primitive in world space: `vertex * scale + translation`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Transform {
    /// Builds a transform, rejecting zero or non-finite scale components
    /// which would collapse the primitive.
    pub fn new(
        name: &'static str,
        translation: [f32; 3],
        scale: [f32; 3],
    ) -> Result<Self, SceneError> {
        if scale.iter().any(|s| *s == 0.0 || !s.is_finite()) {
            return Err(SceneError::DegenerateScale { name, scale });
        }
        Ok(Self {
            translation: translation.into(),
            scale: scale.into(),
        })
    }
}

/// Rotation about the world X axis applied to a single object's world matrix.
///
/// Not `PartialEq`: `TimeDriven` holds a function pointer, and those don't
/// compare reliably. Match on the variant instead.
#[derive(Copy, Clone, Debug)]
pub enum Rotation {
    None,
    Static(Rad<f32>),
    /// Angle computed from the scaled frame time.
    TimeDriven(fn(f64) -> Rad<f32>),
}

impl Rotation {
    /// The angle to apply at time `t`, if any.
    pub fn angle_at(&self, t: f64) -> Option<Rad<f32>> {
        match self {
            Rotation::None => None,
            Rotation::Static(angle) => Some(*angle),
            Rotation::TimeDriven(angle_fn) => Some(angle_fn(t)),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Wall,
    Plane,
}

/// Texture assigned to an object. The discriminant is the texture's
/// position in the bound texture set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Material {
    Stone,
    Door,
    House,
    Wall,
    Bark,
    Leaves,
    Path,
    Water,
    Grass,
}

impl Material {
    pub const ALL: [Material; 9] = [
        Material::Stone,
        Material::Door,
        Material::House,
        Material::Wall,
        Material::Bark,
        Material::Leaves,
        Material::Path,
        Material::Water,
        Material::Grass,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Material::Stone => "stone",
            Material::Door => "door",
            Material::House => "house",
            Material::Wall => "wall",
            Material::Bark => "bark",
            Material::Leaves => "leaves",
            Material::Path => "path",
            Material::Water => "water",
            Material::Grass => "grass",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Colour used when the texture image can't be loaded.
    pub fn fallback_colour(self) -> [u8; 4] {
        match self {
            Material::Stone => [128, 128, 136, 255],
            Material::Door => [110, 70, 30, 255],
            Material::House => [190, 150, 110, 255],
            Material::Wall => [160, 155, 145, 255],
            Material::Bark => [90, 60, 35, 255],
            Material::Leaves => [40, 120, 50, 255],
            Material::Path => [200, 180, 130, 255],
            Material::Water => [50, 110, 200, 255],
            Material::Grass => [80, 160, 70, 255],
        }
    }
}

#[derive(Clone, Debug)]
pub struct SceneObject {
    pub name: &'static str,
    pub kind: ObjectKind,
    pub transform: Transform,
    pub rotation: Rotation,
    pub material: Material,
}

impl SceneObject {
    pub fn wall(
        name: &'static str,
        translation: [f32; 3],
        scale: [f32; 3],
        material: Material,
    ) -> Result<Self, SceneError> {
        Ok(Self {
            name,
            kind: ObjectKind::Wall,
            transform: Transform::new(name, translation, scale)?,
            rotation: Rotation::None,
            material,
        })
    }

    /// A ground quad. Plane vertices only carry x and y, so the quad is laid
    /// flat by rotating it a quarter turn about X; the z translation ends up
    /// as the height `-z` above the ground.
    pub fn ground(
        name: &'static str,
        translation: [f32; 3],
        scale: [f32; 3],
        material: Material,
    ) -> Result<Self, SceneError> {
        Ok(Self {
            name,
            kind: ObjectKind::Plane,
            transform: Transform::new(name, translation, scale)?,
            rotation: Rotation::Static(Rad(std::f32::consts::FRAC_PI_2)),
            material,
        })
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Door opening angle for the scaled time `t`.
///
/// `t` is folded into a triangle wave over `[0, 1]` with period 2 and eased
/// through `asin`, giving a quarter-turn swing that slows down at both ends.
/// The fold happens in `f64` so a long-running clock keeps its precision.
pub fn door_swing(t: f64) -> Rad<f32> {
    let x = t.rem_euclid(2.0);
    let x = if x <= 1.0 { x } else { 2.0 - x };
    Rad(-x.asin() as f32)
}

/// Tree trunk and crown positions on the ground (x, z).
const TREES: [(f32, f32); 4] = [(-14.0, 8.0), (14.0, 8.0), (-14.0, -22.0), (14.0, -22.0)];

/// Builds the castle in draw order: tower, door, house, front walls, back
/// walls, lateral walls, four trunk/crown pairs, then path, water and grass.
///
/// The gate sits on the X axis so the door swings about its bottom edge.
pub fn castle() -> Result<Vec<SceneObject>, SceneError> {
    let mut objects = vec![
        SceneObject::wall("tower", [-5.0, 6.0, -12.0], [1.5, 6.0, 1.5], Material::Stone)?,
        SceneObject::wall("door", [0.0, 2.0, 0.25], [1.5, 2.0, 0.25], Material::Door)?
            .with_rotation(Rotation::TimeDriven(door_swing)),
        SceneObject::wall("house", [3.0, 2.5, -10.0], [3.0, 2.5, 2.5], Material::House)?,
        SceneObject::wall("front wall left", [-4.75, 2.5, 0.25], [3.25, 2.5, 0.5], Material::Wall)?,
        SceneObject::wall("front wall right", [4.75, 2.5, 0.25], [3.25, 2.5, 0.5], Material::Wall)?,
        SceneObject::wall("back wall left", [-4.0, 2.5, -16.0], [4.0, 2.5, 0.5], Material::Wall)?,
        SceneObject::wall("back wall right", [4.0, 2.5, -16.0], [4.0, 2.5, 0.5], Material::Wall)?,
        SceneObject::wall("left wall", [-8.5, 2.5, -8.0], [0.5, 2.5, 8.0], Material::Wall)?,
        SceneObject::wall("right wall", [8.5, 2.5, -8.0], [0.5, 2.5, 8.0], Material::Wall)?,
    ];
    for (x, z) in TREES {
        objects.push(SceneObject::wall("tree trunk", [x, 1.5, z], [0.4, 1.5, 0.4], Material::Bark)?);
        objects.push(SceneObject::wall("tree crown", [x, 4.0, z], [1.5, 1.0, 1.5], Material::Leaves)?);
    }
    // Ground quads: x/y span the floor, -z is the height which keeps the
    // path and the pond above the grass.
    objects.push(SceneObject::ground("path", [0.0, 8.5, -0.02], [1.5, 8.0, 1.0], Material::Path)?);
    objects.push(SceneObject::ground("water", [-15.0, -6.0, -0.01], [4.0, 6.0, 1.0], Material::Water)?);
    objects.push(SceneObject::ground("grass", [0.0, -6.0, 0.0], [30.0, 30.0, 1.0], Material::Grass)?);
    Ok(objects)
}
