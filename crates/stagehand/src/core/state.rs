//! Single-active-state machine layered over [`Game`].

use std::fmt;
use std::ops::{Deref, DerefMut};

use log::{debug, warn};

use crate::api::error::GameError;
use crate::api::game::{Context, Game, GameConfig};

/// One mode of a game: a title screen, a level, a pause menu.
///
/// Only `update` is required. `enter` runs when the state becomes active and
/// `exit` when it is replaced.
pub trait State<S: ?Sized> {
    /// Label used in transition logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn enter(&mut self, _ctx: &mut Context) -> anyhow::Result<()> {
        Ok(())
    }

    fn update(&mut self, ctx: &mut StateContext<'_, S>, dt: f32) -> anyhow::Result<()>;

    fn draw(&self, _surface: &mut S) -> anyhow::Result<()> {
        Ok(())
    }

    fn exit(&mut self, _ctx: &mut Context) -> anyhow::Result<()> {
        Ok(())
    }
}

/// What a state sees during `update`: the shared [`Context`] (through
/// deref) plus the ability to request the next state.
pub struct StateContext<'a, S: ?Sized> {
    ctx: &'a mut Context,
    next: Option<Box<dyn State<S>>>,
}

impl<'a, S: ?Sized> StateContext<'a, S> {
    /// Replace the running state once the current `update` returns.
    /// Only one request per update.
    pub fn change_state<T: State<S> + 'static>(&mut self, state: T) -> Result<(), GameError> {
        self.change_state_boxed(Box::new(state))
    }

    pub fn change_state_boxed(&mut self, state: Box<dyn State<S>>) -> Result<(), GameError> {
        if self.next.is_some() {
            return Err(GameError::TransitionPending);
        }
        self.next = Some(state);
        Ok(())
    }

    pub fn has_pending_transition(&self) -> bool {
        self.next.is_some()
    }
}

impl<S: ?Sized> Deref for StateContext<'_, S> {
    type Target = Context;

    fn deref(&self) -> &Context {
        &*self.ctx
    }
}

impl<S: ?Sized> DerefMut for StateContext<'_, S> {
    fn deref_mut(&mut self) -> &mut Context {
        &mut *self.ctx
    }
}

/// A [`Game`] that forwards to whichever [`State`] is active.
///
/// A transition requested from inside `State::update` is applied right after
/// that update returns: the old state's `exit` and the new state's `enter`
/// run in the same frame, and the new state is first updated next frame.
pub struct GameWithStates<S: ?Sized> {
    config: GameConfig,
    current: Option<Box<dyn State<S>>>,
    queued: Option<Box<dyn State<S>>>,
    idle_warned: bool,
}

impl<S: ?Sized> GameWithStates<S> {
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            current: None,
            queued: None,
            idle_warned: false,
        }
    }

    /// Start in `state`, entered during `init`.
    pub fn with_initial<T: State<S> + 'static>(mut self, state: T) -> Self {
        self.queued = Some(Box::new(state));
        self
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Switch states now: `exit` the current one, then `enter` the new one.
    /// For use between frames; states request changes via [`StateContext`].
    ///
    /// A failed `exit` keeps the old state active. A failed `enter` leaves
    /// no state active.
    pub fn change_state<T: State<S> + 'static>(
        &mut self,
        ctx: &mut Context,
        state: T,
    ) -> anyhow::Result<()> {
        self.apply(ctx, Box::new(state))
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref().map(|s| s.name())
    }

    pub fn has_state(&self) -> bool {
        self.current.is_some()
    }

    fn apply(&mut self, ctx: &mut Context, mut next: Box<dyn State<S>>) -> anyhow::Result<()> {
        match self.current.take() {
            Some(mut old) => {
                debug!("state: {} -> {}", old.name(), next.name());
                if let Err(e) = old.exit(ctx) {
                    self.current = Some(old);
                    return Err(e);
                }
            }
            None => debug!("state: entering {}", next.name()),
        }
        next.enter(ctx)?;
        self.current = Some(next);
        self.idle_warned = false;
        Ok(())
    }
}

impl<S: ?Sized> Default for GameWithStates<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized> fmt::Debug for GameWithStates<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameWithStates")
            .field("current", &self.current_name())
            .field("queued", &self.queued.as_deref().map(|s| s.name()))
            .finish()
    }
}

impl<S: ?Sized> Game<S> for GameWithStates<S> {
    fn config(&self) -> GameConfig {
        self.config.clone()
    }

    fn init(&mut self, ctx: &mut Context) -> anyhow::Result<()> {
        if let Some(next) = self.queued.take() {
            self.apply(ctx, next)?;
        }
        Ok(())
    }

    fn update(&mut self, ctx: &mut Context, dt: f32) -> anyhow::Result<()> {
        if let Some(next) = self.queued.take() {
            self.apply(ctx, next)?;
        }
        let Some(state) = self.current.as_mut() else {
            if !self.idle_warned {
                warn!("state machine has no active state; frames are skipped");
                self.idle_warned = true;
            }
            return Ok(());
        };

        let mut sctx = StateContext {
            ctx: &mut *ctx,
            next: None,
        };
        let result = state.update(&mut sctx, dt);
        let next = sctx.next.take();
        result?;

        if let Some(next) = next {
            self.apply(ctx, next)?;
        }
        Ok(())
    }

    fn draw(&self, surface: &mut S) -> anyhow::Result<()> {
        match &self.current {
            Some(state) => state.draw(surface),
            None => Ok(()),
        }
    }
}
