use std::ops;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct V3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

pub fn sub(x: &V3, y: &V3) -> V3 {
    V3 {
        x: x.x - y.x,
        y: x.y - y.y,
        z: x.z - y.z,
    }
}

pub fn abs2(x: &V3) -> f32 {
    x.x * x.x + x.y * x.y + x.z * x.z
}

pub fn abs(x: &V3) -> f32 {
    abs2(x).sqrt()
}

pub fn v(x: f32, y: f32, z: f32) -> V3 {
    V3 { x, y, z }
}

pub fn mul(scalar: f32, x: &V3) -> V3 {
    V3 {
        x: x.x * scalar,
        y: x.y * scalar,
        z: x.z * scalar,
    }
}

/// Component-wise product, used for anisotropic scaling.
pub fn scale(x: &V3, s: &V3) -> V3 {
    V3 {
        x: x.x * s.x,
        y: x.y * s.y,
        z: x.z * s.z,
    }
}

pub fn add(x: &V3, y: &V3) -> V3 {
    V3 {
        x: x.x + y.x,
        y: x.y + y.y,
        z: x.z + y.z,
    }
}

pub fn dot(x: &V3, y: &V3) -> f32 {
    x.x * y.x + x.y * y.y + x.z * y.z
}

/// White and Nylander's generalized power of a 3-vector.
///
/// Orders 2, 3 and 4 have closed forms. Any other order is first decomposed
/// through factors of 4, 3 and 2 (in that order), and only an order with none
/// of those factors goes through the spherical-coordinates formula. The two
/// paths do not agree numerically, and the shape of the Mandelbulb depends on
/// which one a given order takes.
///
/// `n` must be non-zero.
pub fn pow_wn(p: &V3, n: u32) -> V3 {
    let V3 { x, y, z } = *p;
    match n {
        2 => v(x * x - y * y - z * z, 2. * x * z, 2. * x * y),
        3 => v(
            x * x * x - 3. * x * (y * y + z * z),
            -y * y * y + 3. * y * x * x - y * z * z,
            z * z * z - 3. * z * x + z * y * y,
        ),
        4 => v(
            x * x * x * x * x - 10. * x * x * x * (y * y + z * z)
                + 5. * x * (y * y * y * y + z * z * z * z),
            y * y * y * y * y - 10. * y * y * y * (z * z + x * x)
                + 5. * y * (z * z * z * z + x * x * x * x),
            z * z * z * z * z - 10. * z * z * z * (x * x + y * y)
                + 5. * z * (x * x * x * x + y * y * y * y),
        ),
        _ if n % 4 == 0 => pow_wn(&pow_wn(p, 4), n / 4),
        _ if n % 3 == 0 => pow_wn(&pow_wn(p, 3), n / 3),
        _ if n % 2 == 0 => pow_wn(&pow_wn(p, 2), n / 2),
        _ => {
            let r = abs(p);
            let phi = y.atan2(x);
            let theta = (x * x + y * y).sqrt().atan2(z);
            let rn = r.powi(n as i32);
            let nf = n as f32;
            v(
                rn * (nf * theta).sin() * (nf * phi).cos(),
                rn * (nf * theta).sin() * (nf * phi).sin(),
                rn * (nf * theta).cos(),
            )
        }
    }
}

impl ops::Add<V3> for V3 {
    type Output = V3;

    fn add(self, rhs: V3) -> V3 {
        return add(&self, &rhs);
    }
}

impl ops::Sub<V3> for V3 {
    type Output = V3;

    fn sub(self, rhs: V3) -> V3 {
        return sub(&self, &rhs);
    }
}

impl ops::Mul<V3> for f32 {
    type Output = V3;

    fn mul(self, rhs: V3) -> Self::Output {
        return mul(self, &rhs);
    }
}

impl ops::AddAssign<V3> for V3 {
    fn add_assign(&mut self, rhs: V3) {
        *self = add(self, &rhs);
    }
}

pub const O: V3 = V3 {
    x: 0.,
    y: 0.,
    z: 0.,
};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_v3_eq(a: V3, b: V3) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-5);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-5);
        assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-5);
    }

    #[test]
    fn power_of_zero_stays_at_origin() {
        for n in 1..=12 {
            assert_eq!(abs2(&pow_wn(&O, n)), 0.);
        }
    }

    #[test]
    fn square_uses_closed_form() {
        let p = v(0.5, 0.25, -0.5);
        assert_v3_eq(pow_wn(&p, 2), v(0.25 - 0.0625 - 0.25, -0.5, 0.25));
    }

    #[test]
    fn cube_uses_closed_form() {
        let p = v(1., 2., 3.);
        // x^3 - 3x(y^2+z^2), -y^3 + 3yx^2 - yz^2, z^3 - 3zx + zy^2
        assert_v3_eq(pow_wn(&p, 3), v(1. - 39., -8. + 6. - 18., 27. - 9. + 12.));
    }

    #[test]
    fn fourth_order_uses_closed_form() {
        let p = v(1., 2., 3.);
        // x^5 - 10x^3(y^2+z^2) + 5x(y^4+z^4) and its cyclic permutations
        assert_v3_eq(
            pow_wn(&p, 4),
            v(1. - 130. + 485., 32. - 800. + 820., 243. - 1350. + 255.),
        );
    }

    #[test]
    fn composite_order_is_decomposed() {
        let p = v(0.3, -0.2, 0.4);
        assert_v3_eq(pow_wn(&p, 8), pow_wn(&pow_wn(&p, 4), 2));
        assert_v3_eq(pow_wn(&p, 9), pow_wn(&pow_wn(&p, 3), 3));
        assert_v3_eq(pow_wn(&p, 10), pow_wn(&pow_wn(&p, 2), 5));
    }

    #[test]
    fn prime_order_uses_spherical_formula() {
        let p = v(0.0, 0.0, 0.5);
        // On the z axis theta = 0, so the result stays on the z axis with r^n.
        assert_v3_eq(pow_wn(&p, 5), v(0., 0., 0.5f32.powi(5)));
        let q = pow_wn(&v(0.3, 0.4, 0.), 7);
        assert_abs_diff_eq!(abs(&q), 0.5f32.powi(7), epsilon = 1e-6);
    }

    #[test]
    fn first_order_is_identity() {
        let p = v(0.1, -0.7, 0.2);
        assert_v3_eq(pow_wn(&p, 1), p);
    }
}
