//! Ripple Effect - Capability interface toward the feedback renderer.
//!
//! The coordinator drives visual feedback through exactly three operations;
//! geometry, timing curves, and painting are entirely the renderer's
//! business. The effect is single-channel: [`start`] and [`pulsate`] replace
//! whatever animation is running, [`stop`] ends it.
//!
//! [`start`]: RippleEffect::start
//! [`pulsate`]: RippleEffect::pulsate
//! [`stop`]: RippleEffect::stop

/// Where a ripple expands from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RippleOrigin {
    /// Expand from the center of the surface (keyboard activation, or the
    /// `center_ripple` configuration).
    Centered,
    /// Expand from a pointer position in the surface's coordinate space.
    At { x: f32, y: f32 },
}

/// Callback invoked by the renderer once a stop animation has completed.
pub type StopComplete = Box<dyn FnOnce()>;

/// Imperative handle to the surface's feedback animation.
///
/// Implemented by the rendering collaborator, owned by the surface as
/// `Rc<dyn RippleEffect>`. Handlers may call these re-entrantly from a stop
/// completion (stop-then-start, stop-then-pulsate), so implementations must
/// not hold internal borrows across the `on_complete` invocation.
pub trait RippleEffect {
    /// Begin an expanding ripple at the given origin.
    fn start(&self, origin: RippleOrigin);

    /// End the running animation. `on_complete` fires when the stop
    /// animation has finished; synchronous invocation is allowed.
    fn stop(&self, on_complete: Option<StopComplete>);

    /// Begin the slow attention pulse used for sustained keyboard focus.
    fn pulsate(&self);
}
