//! Writes a synthetic input directory for the default data types.
//!
//! Uses the configured `input_dir` (see `trends.toml`), so a subsequent
//! `trend-grid` run picks the files up directly.

use std::fmt::Write as _;
use std::fs;

use trend_grid::Config;

/// Quarter-by-quarter trend: linear drift, one seasonal wave and noise.
fn generate_trend(
    quarters: usize,
    drift: f64,
    amplitude: f64,
    noise_level: f64,
    rng: &mut SimpleRng,
) -> Vec<f64> {
    (0..quarters)
        .map(|q| {
            let t = q as f64;
            let season = amplitude * (t * std::f64::consts::FRAC_PI_2).sin();
            100.0 + drift * t + season + rng.gauss(0.0, noise_level)
        })
        .collect()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() {
    let config = Config::discover().expect("Failed to load configuration");
    let mut rng = SimpleRng::new(42);

    fs::create_dir_all(&config.input_dir).expect("Failed to create input directory");

    // (suffix, drift, seasonal amplitude)
    let variants = [("A", 1.5, 4.0), ("B", -0.8, 6.0), ("C", 0.3, 10.0)];
    let quarters = 40;

    let mut written = 0;
    for data_type in &config.data_types {
        for &(suffix, drift, amplitude) in &variants {
            let values = generate_trend(quarters, drift, amplitude, 1.5, &mut rng);

            let mut text = String::from("quarter value\n");
            for (q, v) in values.iter().enumerate() {
                writeln!(text, "{q} {v:.4}").expect("writing to a String");
            }

            let name = format!("{data_type}_eco_trendPO_500val_{suffix}.dat");
            let path = config.input_dir.join(&name);
            fs::write(&path, text).expect("Failed to write sample file");
            written += 1;
        }
    }

    println!(
        "Wrote {written} series ({quarters} quarters each) to {}",
        config.input_dir.display()
    );
}
