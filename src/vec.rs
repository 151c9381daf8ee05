//! Role-typed 3D vectors.
//!
//! Spatial quantities (positions and directions) and colours share one storage
//! type, `glam::Vec3A`, but are distinct nominal types. Arithmetic never mixes
//! the two; crossing roles goes through [`Vec3::to_colour`] or
//! [`Colour::to_vec3`].

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use glam::Vec3A;

/// Magnitude below which every component counts as zero.
const NEAR_ZERO: f32 = 1e-8;

/// Operators and constructors common to both roles.
macro_rules! role_vector {
    ($name:ident) => {
        impl $name {
            /// All components zero.
            pub const ZERO: Self = Self(Vec3A::ZERO);
            /// All components one.
            pub const ONE: Self = Self(Vec3A::ONE);

            /// Create a vector from three components.
            pub const fn new(x: f32, y: f32, z: f32) -> Self {
                Self(Vec3A::new(x, y, z))
            }

            /// Create a vector with every component set to `v`.
            pub const fn splat(v: f32) -> Self {
                Self(Vec3A::splat(v))
            }

            /// True when every component is below `1e-8` in magnitude.
            pub fn near_zero(&self) -> bool {
                self.0.abs().max_element() < NEAR_ZERO
            }
        }

        impl Add for $name {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl AddAssign for $name {
            fn add_assign(&mut self, rhs: Self) {
                self.0 += rhs.0;
            }
        }

        impl Sub for $name {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl SubAssign for $name {
            fn sub_assign(&mut self, rhs: Self) {
                self.0 -= rhs.0;
            }
        }

        impl Neg for $name {
            type Output = Self;
            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl Mul<f32> for $name {
            type Output = Self;
            fn mul(self, s: f32) -> Self {
                Self(self.0 * s)
            }
        }

        impl Mul<$name> for f32 {
            type Output = $name;
            fn mul(self, v: $name) -> $name {
                $name(self * v.0)
            }
        }

        impl MulAssign<f32> for $name {
            fn mul_assign(&mut self, s: f32) {
                self.0 *= s;
            }
        }

        impl Div<f32> for $name {
            type Output = Self;
            fn div(self, s: f32) -> Self {
                Self(self.0 / s)
            }
        }

        impl DivAssign<f32> for $name {
            fn div_assign(&mut self, s: f32) {
                self.0 /= s;
            }
        }
    };
}

/// Spatial vector: a position or a direction in world space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3(Vec3A);

/// A position in world space.
pub type Point3 = Vec3;

/// Linear RGB colour. Components are unbounded while light accumulates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Colour(Vec3A);

role_vector!(Vec3);
role_vector!(Colour);

impl Vec3 {
    pub fn x(&self) -> f32 {
        self.0.x
    }

    pub fn y(&self) -> f32 {
        self.0.y
    }

    pub fn z(&self) -> f32 {
        self.0.z
    }

    pub fn dot(&self, rhs: Vec3) -> f32 {
        self.0.dot(rhs.0)
    }

    pub fn cross(&self, rhs: Vec3) -> Vec3 {
        Vec3(self.0.cross(rhs.0))
    }

    pub fn length_squared(&self) -> f32 {
        self.0.length_squared()
    }

    pub fn length(&self) -> f32 {
        self.0.length()
    }

    /// Unit vector in the same direction.
    ///
    /// A zero-length (or non-finite) input yields [`Vec3::ZERO`] instead of NaNs.
    pub fn normalize(&self) -> Vec3 {
        Vec3(self.0.normalize_or_zero())
    }

    /// Normalise in place, with the same zero-length rule as [`Vec3::normalize`].
    pub fn normalize_mut(&mut self) -> &mut Self {
        self.0 = self.0.normalize_or_zero();
        self
    }

    /// Reinterpret the components as a colour, e.g. to visualise a normal.
    pub fn to_colour(self) -> Colour {
        Colour(self.0)
    }
}

impl Colour {
    pub fn r(&self) -> f32 {
        self.0.x
    }

    pub fn g(&self) -> f32 {
        self.0.y
    }

    pub fn b(&self) -> f32 {
        self.0.z
    }

    /// Gamma-2 transform: square root of each channel, negatives clamped to zero.
    pub fn gamma2(&self) -> Colour {
        Colour::new(
            self.0.x.max(0.0).sqrt(),
            self.0.y.max(0.0).sqrt(),
            self.0.z.max(0.0).sqrt(),
        )
    }

    /// Linear blend, `t = 0` gives `self` and `t = 1` gives `other`.
    pub fn lerp(&self, other: Colour, t: f32) -> Colour {
        Colour(self.0.lerp(other.0, t))
    }

    /// Reinterpret the channels as a spatial vector.
    pub fn to_vec3(self) -> Vec3 {
        Vec3(self.0)
    }
}

/// Component-wise product, used to apply attenuation.
impl Mul for Colour {
    type Output = Colour;
    fn mul(self, rhs: Colour) -> Colour {
        Colour(self.0 * rhs.0)
    }
}

impl MulAssign for Colour {
    fn mul_assign(&mut self, rhs: Colour) {
        self.0 *= rhs.0;
    }
}
