#![no_main]

use ghostgate::TrainedPath;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(path) = TrainedPath::parse(text) {
        // Anything accepted must be non-negative and continuous
        let waypoints = path.waypoints();
        for p in waypoints {
            assert!(p.x >= 0 && p.y >= 0, "negative waypoint {p}");
        }
        for w in waypoints.windows(2) {
            assert!(w[0] == w[1] || w[0].is_adjacent(w[1]), "jump {} -> {}", w[0], w[1]);
        }
        let json = path.to_json().unwrap();
        assert_eq!(TrainedPath::parse(&json).unwrap(), path);
    }
});
