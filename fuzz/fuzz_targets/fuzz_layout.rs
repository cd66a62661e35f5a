#![no_main]

use ghostgate::{Arena, Simulation, SimulationConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(arena) = text.parse::<Arena>() else {
        return;
    };
    let Ok(mut sim) = Simulation::from_arena(&arena, SimulationConfig::default(), None) else {
        return;
    };

    // Any parsed arena must simulate without panicking
    for _ in 0..50 {
        let report = sim.tick(arena.player_starts);
        assert!(report.hits <= 2);
    }
    assert!(sim.barrier().hits() <= 2);
});
