use crate::foundation::math::lerp_f64;

/// Maps normalized progress to an interpolation factor.
///
/// Curves are evaluated on `[0, 1]` but are not required to stay inside it.
pub trait Curve {
    /// Evaluate the curve at `x`.
    fn apply(&self, x: f64) -> f64;
}

impl<F> Curve for F
where
    F: Fn(f64) -> f64,
{
    fn apply(&self, x: f64) -> f64 {
        self(x)
    }
}

/// Named easing curves.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// `x`
    Linear,
    /// `x^2`
    EaseIn,
    /// `1 - (1 - x)^2`
    EaseOut,
    /// Linear blend from ease-in to ease-out, weighted by `x`.
    EaseInOut,
    /// `1 - f(x)`; plays a curve backwards, e.g. an unbuild of a build action.
    Reverse(Box<Ease>),
}

impl Ease {
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Self::Linear => x,
            Self::EaseIn => x * x,
            Self::EaseOut => 1.0 - (1.0 - x) * (1.0 - x),
            Self::EaseInOut => {
                let ease_in = x * x;
                let ease_out = 1.0 - (1.0 - x) * (1.0 - x);
                lerp_f64(ease_in, ease_out, x)
            }
            Self::Reverse(inner) => 1.0 - inner.apply(x),
        }
    }

    /// Reverse this curve. Reversing a reversed curve returns the original.
    pub fn reversed(self) -> Self {
        match self {
            Self::Reverse(inner) => *inner,
            other => Self::Reverse(Box::new(other)),
        }
    }
}

impl Curve for Ease {
    fn apply(&self, x: f64) -> f64 {
        Ease::apply(self, x)
    }
}

/// `1 - f(x)` over an arbitrary curve.
#[derive(Clone, Debug)]
pub struct Reversed<C>(pub C);

impl<C: Curve> Curve for Reversed<C> {
    fn apply(&self, x: f64) -> f64 {
        1.0 - self.0.apply(x)
    }
}

pub fn reverse<C: Curve>(curve: C) -> Reversed<C> {
    Reversed(curve)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
