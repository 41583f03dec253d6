//! Cloud Hopper entry point
//!
//! Headless driver: runs the simulation at the reference cadence and logs
//! the run. A rendering host drives `tick` exactly the same way - once per
//! display frame with the measured elapsed scale - then draws from the
//! room's read-only accessors.

use cloud_hopper::HighScores;
use cloud_hopper::persistence::MemoryStore;
use cloud_hopper::sim::{Room, RoomConfig, TickInput, tick};

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(7);

    let mut store = MemoryStore::default();
    let mut scores = HighScores::load(&store);

    let mut room = Room::new(RoomConfig {
        seed,
        ..RoomConfig::default()
    });
    let input = TickInput::default();

    let mut ticks = 0u32;
    while !room.ended() && ticks < 100_000 {
        tick(&mut room, &input, 1.0);
        ticks += 1;
    }

    log::info!(
        "run over after {} ticks: score {} at level {}",
        ticks,
        room.score(),
        room.level()
    );
    if scores.record(room.score(), &mut store) {
        log::info!("new best score");
    }

    println!(
        "score {}  level {}  best {}",
        room.score(),
        room.level(),
        scores.best().unwrap_or(0)
    );
}
