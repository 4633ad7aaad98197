//! The actor contract: something with a lifecycle that is updated and drawn
//! once per frame by the [`ActorList`](super::actor_list::ActorList) owning it.

/// Liveness flag plus age in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lifecycle {
    alive: bool,
    age: f32,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            alive: true,
            age: 0.0,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline]
    pub fn age(&self) -> f32 {
        self.age
    }

    /// Age by `dt` seconds. A dead lifecycle stops ageing.
    pub fn advance(&mut self, dt: f32) {
        if self.alive {
            self.age += dt;
        }
    }

    /// Idempotent.
    pub fn kill(&mut self) {
        self.alive = false;
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

/// Anything that lives in an actor list.
///
/// Implementors only supply access to their [`Lifecycle`]; the default
/// `update` just ages the actor. Override `update` for behaviour and call
/// `self.lifecycle_mut().advance(dt)` (or [`Actor::kill`]) as needed.
pub trait Actor {
    fn lifecycle(&self) -> &Lifecycle;
    fn lifecycle_mut(&mut self) -> &mut Lifecycle;

    fn update(&mut self, dt: f32) -> anyhow::Result<()> {
        self.lifecycle_mut().advance(dt);
        Ok(())
    }

    fn is_alive(&self) -> bool {
        self.lifecycle().is_alive()
    }

    fn age(&self) -> f32 {
        self.lifecycle().age()
    }

    fn kill(&mut self) {
        self.lifecycle_mut().kill();
    }
}

/// An actor that can render itself onto a surface of type `S`.
///
/// Drawing must not change liveness. The default draws nothing.
pub trait Draw<S: ?Sized>: Actor {
    fn draw(&self, _surface: &mut S) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Heterogeneous actor stored in a list drawing onto `S`.
pub type DynActor<S> = Box<dyn Draw<S>>;

impl<A: Actor + ?Sized> Actor for Box<A> {
    fn lifecycle(&self) -> &Lifecycle {
        (**self).lifecycle()
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        (**self).lifecycle_mut()
    }

    fn update(&mut self, dt: f32) -> anyhow::Result<()> {
        (**self).update(dt)
    }

    fn is_alive(&self) -> bool {
        (**self).is_alive()
    }

    fn age(&self) -> f32 {
        (**self).age()
    }

    fn kill(&mut self) {
        (**self).kill()
    }
}

impl<S: ?Sized, A: Draw<S> + ?Sized> Draw<S> for Box<A> {
    fn draw(&self, surface: &mut S) -> anyhow::Result<()> {
        (**self).draw(surface)
    }
}
