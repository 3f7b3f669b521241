use log::{info, warn, LevelFilter};
use speedflip::app::Trainer;
use speedflip::config::SPEEDFLIP_PACK_CODE;
use speedflip::game::tunables::{self, Tunables};
use speedflip::sim::Simulation;
use std::error::Error;

const ROUNDS_PER_BOT: usize = 3;

fn main() -> Result<(), Box<dyn Error>> {
    // --- Logging Setup ---
    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Info) // Default level
        .filter_module("speedflip::sim", LevelFilter::Info)
        .filter_module("speedflip::ui", LevelFilter::Warn) // Per-frame draw chatter
        .init();

    info!("Speedflip trainer harness starting...");

    // --- Settings ---
    tunables::load();
    let settings = tunables::get();

    // --- Trainer + simulated host ---
    let mut sim = Simulation::new(settings.speed);
    let mut trainer = Trainer::default();
    if !trainer.on_training_loaded(Some(SPEEDFLIP_PACK_CODE), &settings, &mut sim.host) {
        warn!("Trainer is disabled in settings, nothing to run.");
        return Ok(());
    }

    let mut played = 0;
    let mut hits = 0;
    let mut run = |trainer: &mut Trainer, sim: &mut Simulation, rounds: usize, label: &str| {
        for round in 1..=rounds {
            let report = sim.run_round(trainer, &settings);
            info!("[{} {}/{}] {} ticks: {}", label, round, rounds, report.ticks, report.summary);
            played += 1;
            if report.hit {
                hits += 1;
            }
        }
    };

    trainer.load_bot_26();
    run(&mut trainer, &mut sim, ROUNDS_PER_BOT, "bot 26");

    if trainer.replay_last_attempt() {
        run(&mut trainer, &mut sim, 1, "replay");
    }

    trainer.load_bot_45();
    run(&mut trainer, &mut sim, ROUNDS_PER_BOT, "bot 45");

    // Nobody at the controls: the round times out.
    trainer.enable_manual_mode();
    run(&mut trainer, &mut sim, 1, "idle");

    persist_speed(&trainer, &settings);
    info!("Harness finished: {}/{} hits, game speed {:.0}%.", hits, played, sim.host.speed * 100.0);
    Ok(())
}

fn persist_speed(trainer: &Trainer, settings: &Tunables) {
    if !settings.remember_speed {
        return;
    }
    if let Some(speed) = trainer.remembered_speed() {
        tunables::update(|t| t.speed = speed);
        tunables::save();
    }
}
