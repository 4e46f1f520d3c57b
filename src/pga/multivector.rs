//! Dense multivector for 3D projective geometric algebra
//!
//! Basis blades are indexed by bitmask: bit 0 is the degenerate `e0`
//! (e0² = 0), bits 1..=3 are `e1`, `e2`, `e3` (each squaring to +1).
//! Blades are stored in canonical ascending order, so `e31` lives in
//! slot `e13` with a sign flip; the typed wrappers handle that mapping.

const E0: usize = 0b0001;

/// Blade bitmask plus the sign relating a named component to the canonical blade
pub(crate) type BladeRef = (usize, f32);

pub(crate) const SCALAR: BladeRef = (0b0000, 1.0);
pub(crate) const E01: BladeRef = (0b0011, 1.0);
pub(crate) const E02: BladeRef = (0b0101, 1.0);
pub(crate) const E03: BladeRef = (0b1001, 1.0);
pub(crate) const E23: BladeRef = (0b1100, 1.0);
pub(crate) const E31: BladeRef = (0b1010, -1.0);
pub(crate) const E12: BladeRef = (0b0110, 1.0);
pub(crate) const E0123: BladeRef = (0b1111, 1.0);

pub(crate) const E032: BladeRef = (0b1101, -1.0);
pub(crate) const E013: BladeRef = (0b1011, 1.0);
pub(crate) const E021: BladeRef = (0b0111, -1.0);
pub(crate) const E123: BladeRef = (0b1110, 1.0);

/// Sign produced by reordering the product of two canonical blades
#[inline]
fn reorder_sign(a: usize, b: usize) -> f32 {
    let mut a = a >> 1;
    let mut swaps = 0;
    while a != 0 {
        swaps += (a & b).count_ones();
        a >>= 1;
    }
    if swaps % 2 == 0 { 1.0 } else { -1.0 }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct Multivector([f32; 16]);

impl Multivector {
    pub fn from_components(components: &[(BladeRef, f32)]) -> Self {
        let mut mv = Self::default();
        for &((mask, sign), value) in components {
            mv.0[mask] += sign * value;
        }
        mv
    }

    #[inline]
    pub fn get(&self, (mask, sign): BladeRef) -> f32 {
        sign * self.0[mask]
    }

    /// Geometric product `self * rhs`
    pub fn geometric(&self, rhs: &Self) -> Self {
        let mut out = [0.0_f32; 16];
        for (a, &x) in self.0.iter().enumerate() {
            if x == 0.0 {
                continue;
            }
            for (b, &y) in rhs.0.iter().enumerate() {
                // Shared e0 annihilates the product
                if y == 0.0 || a & b & E0 != 0 {
                    continue;
                }
                out[a ^ b] += reorder_sign(a, b) * x * y;
            }
        }
        Self(out)
    }
}
