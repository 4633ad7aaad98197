//! The fireworks show: a countdown, the show itself, and a finale that lets
//! the last sparks burn out before quitting.

use std::rc::Rc;

use anyhow::anyhow;
use glam::Vec2;
use log::{debug, info};
use stagehand::math::{Range, SineWave};
use stagehand::{
    Actor, ActorList, Context, Draw, DynActor, Emitter, EmitterPresets, Lifecycle, Spawner, State,
    StateContext,
};

use crate::host::AsciiSurface;

/// Seconds of launching before the finale.
const SHOW_LENGTH: f32 = 8.0;

pub struct Countdown {
    remaining: f32,
    presets: Rc<EmitterPresets>,
    world: Vec2,
}

impl Countdown {
    pub fn new(seconds: f32, presets: Rc<EmitterPresets>, world: Vec2) -> Self {
        Self {
            remaining: seconds,
            presets,
            world,
        }
    }
}

impl State<AsciiSurface> for Countdown {
    fn name(&self) -> &str {
        "countdown"
    }

    fn update(&mut self, ctx: &mut StateContext<'_, AsciiSurface>, dt: f32) -> anyhow::Result<()> {
        let before = self.remaining.ceil();
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            ctx.change_state(Show::new(self.presets.clone(), self.world)?)?;
        } else if self.remaining.ceil() < before {
            info!("{}...", self.remaining.ceil());
        }
        Ok(())
    }
}

/// Fires emitters from presets into the show's emitter list, on a schedule
/// set by two sine waves: one for the gap between launches, one sweeping the
/// launch point across the sky.
pub struct Launcher {
    life: Lifecycle,
    spawner: Spawner<Emitter>,
    presets: Rc<EmitterPresets>,
    gap: SineWave,
    sweep: SineWave,
    height: f32,
    cooldown: f32,
    launched: usize,
}

impl Launcher {
    pub fn new(
        spawner: Spawner<Emitter>,
        presets: Rc<EmitterPresets>,
        world: Vec2,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            life: Lifecycle::new(),
            spawner,
            presets,
            gap: SineWave::new(3.0, Range::new(0.3, 1.0)?, 0.0)?,
            sweep: SineWave::new(5.0, Range::new(world.x * 0.15, world.x * 0.85)?, 0.25)?,
            height: world.y * 0.65,
            cooldown: 0.0,
            launched: 0,
        })
    }

    fn launch(&mut self) -> anyhow::Result<()> {
        let names = self.presets.names();
        if names.is_empty() {
            return Ok(());
        }
        let name = names[self.launched % names.len()];
        let position = Vec2::new(self.sweep.sample(self.age()), self.height);
        let emitter = self.presets.emitter(name, position)?;
        self.spawner
            .spawn(emitter)
            .map_err(|_| anyhow!("emitter list dropped during the show"))?;
        self.launched += 1;
        debug!("launched '{name}' at {position}");
        Ok(())
    }
}

impl Actor for Launcher {
    fn lifecycle(&self) -> &Lifecycle {
        &self.life
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.life
    }

    fn update(&mut self, dt: f32) -> anyhow::Result<()> {
        self.life.advance(dt);
        if self.age() >= SHOW_LENGTH {
            self.kill();
            return Ok(());
        }
        self.cooldown -= dt;
        while self.cooldown <= 0.0 {
            self.launch()?;
            self.cooldown += self.gap.sample(self.age());
        }
        Ok(())
    }
}

impl Draw<AsciiSurface> for Launcher {}

pub struct Show {
    crew: ActorList<DynActor<AsciiSurface>>,
    emitters: ActorList<Emitter>,
}

impl Show {
    pub fn new(presets: Rc<EmitterPresets>, world: Vec2) -> anyhow::Result<Self> {
        let emitters = ActorList::new();
        let mut crew: ActorList<DynActor<AsciiSurface>> = ActorList::new();
        crew.add(Box::new(Launcher::new(emitters.spawner(), presets, world)?));
        Ok(Self { crew, emitters })
    }
}

impl State<AsciiSurface> for Show {
    fn name(&self) -> &str {
        "show"
    }

    fn enter(&mut self, _ctx: &mut Context) -> anyhow::Result<()> {
        info!("show starts");
        Ok(())
    }

    fn update(&mut self, ctx: &mut StateContext<'_, AsciiSurface>, dt: f32) -> anyhow::Result<()> {
        self.crew.update(dt)?;
        self.emitters.update(dt)?;
        if self.crew.is_empty() {
            ctx.change_state(Finale::new(std::mem::take(&mut self.emitters)))?;
        }
        Ok(())
    }

    fn draw(&self, surface: &mut AsciiSurface) -> anyhow::Result<()> {
        self.crew.draw(surface)?;
        self.emitters.draw(surface)
    }
}

pub struct Finale {
    emitters: ActorList<Emitter>,
}

impl Finale {
    pub fn new(emitters: ActorList<Emitter>) -> Self {
        Self { emitters }
    }
}

impl State<AsciiSurface> for Finale {
    fn name(&self) -> &str {
        "finale"
    }

    fn enter(&mut self, _ctx: &mut Context) -> anyhow::Result<()> {
        info!("finale, {} emitters still burning", self.emitters.count());
        for emitter in self.emitters.iter_mut() {
            emitter.release();
        }
        Ok(())
    }

    fn update(&mut self, ctx: &mut StateContext<'_, AsciiSurface>, dt: f32) -> anyhow::Result<()> {
        self.emitters.update(dt)?;
        if self.emitters.is_empty() {
            info!("finale done after {:.1}s", ctx.stats().elapsed);
            ctx.quit();
        }
        Ok(())
    }

    fn draw(&self, surface: &mut AsciiSurface) -> anyhow::Result<()> {
        self.emitters.draw(surface)
    }
}
