use crate::foundation::core::{Affine, Rect};

pub(crate) fn lerp_f64(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Union of two optional boxes; `None` contributes nothing.
pub(crate) fn union_bounds(a: Option<Rect>, b: Option<Rect>) -> Option<Rect> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.union(b)),
        (Some(r), None) | (None, Some(r)) => Some(r),
        (None, None) => None,
    }
}

/// Edge-wise comparison with a tolerance scaled by the magnitude of the coordinates.
pub(crate) fn rects_close(a: Rect, b: Rect, rel_tol: f64) -> bool {
    fn close(x: f64, y: f64, rel_tol: f64) -> bool {
        let scale = x.abs().max(y.abs()).max(1.0);
        (x - y).abs() <= rel_tol * scale
    }
    close(a.x0, b.x0, rel_tol)
        && close(a.y0, b.y0, rel_tol)
        && close(a.x1, b.x1, rel_tol)
        && close(a.y1, b.y1, rel_tol)
}

pub(crate) fn is_invertible(t: Affine) -> bool {
    let det = t.determinant();
    det.is_finite() && det != 0.0
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
