//! Stowage sandbox - runs the transfer policies against the in-memory world.

use std::sync::Arc;

use chrono::Utc;
use stowage_domain::{
    AfterInteractEvent, AmbientTrigger, Coordinates, EntityId, GetVerbsEvent, PrototypeId,
    UseInHandEvent,
};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stowage_engine::infrastructure::{
    clock::FixedClock, config::EngineConfig, in_memory::InMemoryAdapters, ports::ContainerPort,
};
use stowage_engine::App;

const BUILTIN_CATALOG: &str = include_str!("../catalog/default.json");

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stowage_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Stowage sandbox");

    let config = EngineConfig::from_env()?;
    let catalog = Arc::new(config.load_catalog(BUILTIN_CATALOG)?);
    tracing::info!(
        prototypes = catalog.len(),
        authority = %config.authority,
        "Prototype catalog loaded"
    );

    let adapters = InMemoryAdapters::new(catalog.clone(), Arc::new(FixedClock::new(Utc::now())));
    let mut events = adapters.events.subscribe();
    let printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(json) => println!("{json}"),
                    Err(e) => tracing::warn!(error = %e, "Failed to serialize engine event"),
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event printer fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let app = App::new(adapters.ports(), catalog, config);
    let sandbox = Sandbox {
        app: &app,
        adapters: &adapters,
    };
    sandbox.parcel_round_trip()?;
    sandbox.surprise_egg()?;
    sandbox.gift_wrap()?;
    sandbox.destroyed_parcel()?;
    sandbox.quick_pickup()?;

    // Closing the channel lets the printer drain and stop.
    drop(app);
    drop(adapters);
    printer.await?;

    tracing::info!("Sandbox finished");
    Ok(())
}

struct Sandbox<'a> {
    app: &'a App,
    adapters: &'a InMemoryAdapters,
}

impl Sandbox<'_> {
    fn spawn(&self, prototype: &str, at: Coordinates) -> anyhow::Result<EntityId> {
        Ok(self.app.spawner.spawn(&PrototypeId::new(prototype)?, at)?)
    }

    /// Advance the clock and feed every completion back through the dispatcher.
    fn wait(&self, millis: u64) {
        self.adapters
            .clock
            .advance(stowage_domain::Delay::from_millis(millis));
        for mut completed in self.adapters.scheduler.tick() {
            self.app.dispatcher.do_after_completed(&mut completed);
        }
    }

    fn parcel_round_trip(&self) -> anyhow::Result<()> {
        tracing::info!("Scenario: wrap a widget, then unwrap it");
        let player = self.spawn("Player", Coordinates::ORIGIN)?;
        let wrapper = self.spawn("ParcelWrap", Coordinates::ORIGIN)?;
        let widget = self.spawn("Widget", Coordinates::new(1.0, 0.0))?;

        let mut verbs = GetVerbsEvent::new(player, widget, Some(wrapper));
        self.app.dispatcher.get_verbs(&mut verbs);
        for verb in &verbs.verbs {
            tracing::info!(verb = %verb.text, category = ?verb.category, "Verb offered");
        }

        let mut interact = AfterInteractEvent::new(player, wrapper, Some(widget), true);
        self.app.dispatcher.after_interact(&mut interact);

        if let Some(parcel) = self.holder_of(widget) {
            let mut open = UseInHandEvent::new(player, parcel);
            self.app.dispatcher.use_in_hand(&mut open);
        }
        Ok(())
    }

    fn surprise_egg(&self) -> anyhow::Result<()> {
        tracing::info!("Scenario: break open a surprise egg");
        let player = self.spawn("Player", Coordinates::ORIGIN)?;
        let egg = self.spawn("SurpriseEgg", Coordinates::new(0.0, 2.0))?;

        let mut open = UseInHandEvent::new(player, egg);
        self.app.dispatcher.use_in_hand(&mut open);
        self.wait(1500);
        Ok(())
    }

    fn gift_wrap(&self) -> anyhow::Result<()> {
        tracing::info!("Scenario: gift-wrap a widget");
        let player = self.spawn("Player", Coordinates::ORIGIN)?;
        let wrapper = self.spawn("GiftWrapper", Coordinates::ORIGIN)?;
        let widget = self.spawn("Widget", Coordinates::new(2.0, 2.0))?;

        let mut interact = AfterInteractEvent::new(player, wrapper, Some(widget), true);
        self.app.dispatcher.after_interact(&mut interact);
        self.wait(2000);
        Ok(())
    }

    fn destroyed_parcel(&self) -> anyhow::Result<()> {
        tracing::info!("Scenario: destroy a parcel with something inside");
        let player = self.spawn("Player", Coordinates::ORIGIN)?;
        let wrapper = self.spawn("ParcelWrap", Coordinates::ORIGIN)?;
        let toolbox = self.spawn("Toolbox", Coordinates::new(-1.0, 0.0))?;

        let mut interact = AfterInteractEvent::new(player, wrapper, Some(toolbox), true);
        self.app.dispatcher.after_interact(&mut interact);
        if let Some(parcel) = self.holder_of(toolbox) {
            if let Some(Err(e)) = self.app.dispatcher.ambient(parcel, AmbientTrigger::Destroyed) {
                tracing::warn!(error = %e, "Parcel release failed");
            }
        }
        for (message, anchor) in self.adapters.popups.shown() {
            tracing::info!(message = %message, anchor = %anchor, "Popup shown");
        }
        Ok(())
    }

    fn quick_pickup(&self) -> anyhow::Result<()> {
        tracing::info!("Scenario: scoop widgets into a satchel");
        let player = self.spawn("Player", Coordinates::ORIGIN)?;
        let satchel = self.spawn("Satchel", Coordinates::ORIGIN)?;
        for x in 1..=2 {
            let widget = self.spawn("Widget", Coordinates::new(x as f32, 1.0))?;
            let mut interact = AfterInteractEvent::new(player, satchel, Some(widget), true);
            self.app.dispatcher.after_interact(&mut interact);
            tracing::info!(widget = %widget, picked_up = interact.handled, "Quick pickup attempt");
            self.wait(500);
        }
        Ok(())
    }

    fn holder_of(&self, entity: EntityId) -> Option<EntityId> {
        self.adapters
            .world
            .containing(entity)
            .map(|container| container.owner)
    }
}
