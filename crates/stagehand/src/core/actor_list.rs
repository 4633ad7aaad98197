use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use log::trace;

use super::actor::{Actor, Draw};

type Pending<A> = Rc<RefCell<Vec<A>>>;

/// Ordered owning storage for actors, using a flat Vec.
///
/// One `update` is one pass: every actor alive when its turn comes is
/// updated, in insertion order. Actors spawned during the pass (through a
/// [`Spawner`]) are appended once dispatch finishes and first run on the next
/// pass. Dead actors are then removed in a single sweep, so after `update`
/// returns every stored actor is alive.
pub struct ActorList<A> {
    actors: Vec<A>,
    pending: Pending<A>,
}

impl<A: Actor> ActorList<A> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            actors: Vec::with_capacity(capacity),
            pending: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Append an actor. It takes part in the next pass.
    pub fn add(&mut self, actor: A) {
        self.actors.push(actor);
    }

    /// A handle actors can keep to add to this list while it is mid-pass.
    pub fn spawner(&self) -> Spawner<A> {
        Spawner {
            pending: Rc::downgrade(&self.pending),
        }
    }

    /// Run one update pass, then append spawns and sweep the dead.
    ///
    /// The first actor error ends dispatch and is returned as is; the append
    /// and sweep still run, so the list stays consistent.
    pub fn update(&mut self, dt: f32) -> anyhow::Result<()> {
        let mut result = Ok(());
        for actor in self.actors.iter_mut() {
            if !actor.is_alive() {
                continue;
            }
            if let Err(e) = actor.update(dt) {
                result = Err(e);
                break;
            }
        }
        self.flush_pending();
        self.sweep();
        result
    }

    /// Draw every live actor in order. The first error stops the pass.
    pub fn draw<S: ?Sized>(&self, surface: &mut S) -> anyhow::Result<()>
    where
        A: Draw<S>,
    {
        for actor in self.actors.iter().filter(|a| a.is_alive()) {
            actor.draw(surface)?;
        }
        Ok(())
    }

    fn flush_pending(&mut self) {
        let mut pending = self.pending.borrow_mut();
        if !pending.is_empty() {
            trace!("actor list: {} spawned", pending.len());
            self.actors.append(&mut pending);
        }
    }

    fn sweep(&mut self) {
        let before = self.actors.len();
        self.actors.retain(|a| a.is_alive());
        let removed = before - self.actors.len();
        if removed > 0 {
            trace!("actor list: swept {removed}, {} remain", self.actors.len());
        }
    }

    /// Stored actors, dead or alive.
    pub fn count(&self) -> usize {
        self.actors.len()
    }

    pub fn count_alive(&self) -> usize {
        self.actors.iter().filter(|a| a.is_alive()).count()
    }

    /// Spawns waiting for the end of the current pass.
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty() && self.pending.borrow().is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &A> {
        self.actors.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut A> {
        self.actors.iter_mut()
    }

    pub fn get(&self, index: usize) -> Option<&A> {
        self.actors.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut A> {
        self.actors.get_mut(index)
    }

    /// Take an actor out, preserving the order of the rest. Pair with
    /// [`ActorList::add`] on another list to move it.
    pub fn remove(&mut self, index: usize) -> Option<A> {
        if index < self.actors.len() {
            Some(self.actors.remove(index))
        } else {
            None
        }
    }

    /// Kill everything; the actors are swept on the next pass.
    pub fn kill_all(&mut self) {
        for actor in self.actors.iter_mut() {
            actor.kill();
        }
    }

    /// Kill and drop every actor immediately, pending spawns included.
    pub fn clear(&mut self) {
        self.kill_all();
        self.actors.clear();
        self.pending.borrow_mut().clear();
    }
}

impl<A: Actor> Default for ActorList<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Actor> Extend<A> for ActorList<A> {
    fn extend<I: IntoIterator<Item = A>>(&mut self, iter: I) {
        self.actors.extend(iter);
    }
}

impl<A> fmt::Debug for ActorList<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorList")
            .field("count", &self.actors.len())
            .field("pending", &self.pending.borrow().len())
            .finish()
    }
}

/// Adds actors to an [`ActorList`] without borrowing it.
pub struct Spawner<A> {
    pending: Weak<RefCell<Vec<A>>>,
}

impl<A> Spawner<A> {
    /// Queue `actor` for the owning list. Hands the actor back if the list
    /// has been dropped.
    pub fn spawn(&self, actor: A) -> Result<(), A> {
        match self.pending.upgrade() {
            Some(pending) => {
                pending.borrow_mut().push(actor);
                Ok(())
            }
            None => Err(actor),
        }
    }

    /// Whether the owning list still exists.
    pub fn is_connected(&self) -> bool {
        self.pending.strong_count() > 0
    }
}

impl<A> Clone for Spawner<A> {
    fn clone(&self) -> Self {
        Self {
            pending: self.pending.clone(),
        }
    }
}

impl<A> fmt::Debug for Spawner<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spawner")
            .field("connected", &self.is_connected())
            .finish()
    }
}
