//! Default value functions for serde deserialization.

// === NDT ===

pub fn cell_side() -> f64 {
    0.5
}

pub fn frame_size() -> f64 {
    100.0
}

pub fn window_radius() -> u32 {
    1
}

pub fn regularization() -> f64 {
    0.01
}

// === Map accumulator ===

pub fn map_size() -> f64 {
    25.0
}

pub fn map_update_interval() -> u64 {
    10
}

// === Particle swarm ===

pub fn population_size() -> usize {
    40
}

pub fn iterations() -> usize {
    60
}

pub fn num_threads() -> i32 {
    -1 // all hardware threads
}

pub fn search_radius() -> [f64; 3] {
    [0.5, 0.5, 0.35]
}

pub fn inertia_start() -> f64 {
    0.9
}

pub fn inertia_end() -> f64 {
    0.4
}

pub fn cognitive() -> f64 {
    1.5
}

pub fn social() -> f64 {
    1.5
}

pub fn initial_velocity_fraction() -> f64 {
    0.1
}

pub fn max_velocity_fraction() -> f64 {
    0.5
}

// === Publishing ===

pub fn publish_rate_hz() -> f64 {
    30.0
}

pub fn channel_capacity() -> usize {
    64
}

// === Export ===

pub fn output_dir() -> String {
    "./output".to_string()
}

pub fn prefix() -> String {
    "ndtpso".to_string()
}
