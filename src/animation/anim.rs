use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::animation::ease::Curve;
use crate::foundation::core::{Affine, Point, Vec2};
use crate::foundation::error::{StagehandError, StagehandResult};
use crate::schedule::window::ScheduleWindow;

/// Something that happens over a schedule window.
///
/// The timeline drives `activate` on the first active frame, `animate` on every active
/// frame, and `terminate` once the schedule is over. Implementations may memoize, but must
/// tolerate being called out of temporal order, repeatedly, or not at all.
pub trait Animation {
    /// The window is opening; capture start state here.
    fn activate(&mut self, _window: &ScheduleWindow) -> StagehandResult<()> {
        Ok(())
    }

    fn animate(&mut self, window: &ScheduleWindow) -> StagehandResult<()>;

    /// The window is closing; land on the end state here.
    fn terminate(&mut self, window: &ScheduleWindow) -> StagehandResult<()>;
}

/// Animation handle as stored by the timeline and shared with callers.
pub type SharedAnimation = Rc<RefCell<dyn Animation>>;

/// Wrap an animation into a [`SharedAnimation`].
pub fn shared<A: Animation + 'static>(animation: A) -> SharedAnimation {
    Rc::new(RefCell::new(animation))
}

/// Interpolation contract for animated value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with factor `t`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for f32 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (*a as f64 + ((*b as f64 - *a as f64) * t)) as f32
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.lerp(*b, t)
    }
}

impl Lerp for Affine {
    /// Coefficient-wise blend; exact at the endpoints, not a decomposed rotation blend.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let (ca, cb) = (a.as_coeffs(), b.as_coeffs());
        let mut out = [0.0; 6];
        for (o, (x, y)) in out.iter_mut().zip(ca.iter().zip(cb.iter())) {
            *o = x + (y - x) * t;
        }
        Affine::new(out)
    }
}

/// Animation over a finite window, reduced to a single interpolated factor.
///
/// `animate` feeds `curve(percent_complete)` to the action; `terminate` always feeds
/// `curve(1.0)` so the end state is exact even when the last sampled frame fell short.
pub struct InterpolatedAnimation<C, A> {
    curve: C,
    action: A,
}

impl<C, A> InterpolatedAnimation<C, A>
where
    C: Curve,
    A: FnMut(f64),
{
    pub fn new(curve: C, action: A) -> Self {
        Self { curve, action }
    }
}

impl<C, A> Animation for InterpolatedAnimation<C, A>
where
    C: Curve,
    A: FnMut(f64),
{
    fn animate(&mut self, window: &ScheduleWindow) -> StagehandResult<()> {
        if !window.is_finite() {
            return Err(StagehandError::animation(
                "interpolated animation requires a finite schedule window",
            ));
        }
        // zero-length windows have no interior; treat them as complete
        let percent = if window.is_instantaneous() {
            1.0
        } else {
            window.percent_complete()?
        };
        (self.action)(self.curve.apply(percent));
        Ok(())
    }

    fn terminate(&mut self, _window: &ScheduleWindow) -> StagehandResult<()> {
        (self.action)(self.curve.apply(1.0));
        Ok(())
    }
}

impl<C, A> fmt::Debug for InterpolatedAnimation<C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterpolatedAnimation").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
