/// Scramble alphabet: uppercase letters, digits, and a small symbol set.
pub const GLITCH_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*";

/// Tuning defaults. These are configurable, not invariants: the tick rate
/// and solve step are aesthetic constants carried over from the original
/// effect.
pub const GLITCH_TICK_MS: u64 = 30;
pub const GLITCH_SOLVE_STEP: f64 = 1.0 / 3.0;

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct GlitchConfig {
    pub tick_ms: u64,
    pub solve_step: f64,
}

impl Default for GlitchConfig {
    fn default() -> Self {
        Self {
            tick_ms: GLITCH_TICK_MS,
            solve_step: GLITCH_SOLVE_STEP,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlitchState {
    Idle,
    Glitching,
}

/// Hover-triggered character scramble.
///
/// While glitching, each tick reveals a growing verbatim prefix of the
/// original text and re-randomizes every remaining character from the fixed
/// alphabet. The run always terminates with the displayed text exactly equal
/// to the original. Randomness is seeded, so runs are reproducible.
#[derive(Clone, Debug)]
pub struct GlitchText {
    original: Vec<char>,
    displayed: String,
    config: GlitchConfig,
    state: GlitchState,
    counter: f64,
    rng: u64,
}

impl GlitchText {
    pub fn new(text: impl Into<String>, seed: u64) -> Self {
        let original: Vec<char> = text.into().chars().collect();
        let displayed: String = original.iter().collect();
        Self {
            original,
            displayed,
            config: GlitchConfig::default(),
            state: GlitchState::Idle,
            counter: 0.0,
            rng: splitmix64(seed ^ 0x9E37_79B9_7F4A_7C15),
        }
    }

    pub fn with_config(mut self, config: GlitchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn state(&self) -> GlitchState {
        self.state
    }

    pub fn displayed(&self) -> &str {
        &self.displayed
    }

    pub fn tick_ms(&self) -> u64 {
        self.config.tick_ms
    }

    /// Starts a run. Re-entrant calls while glitching are no-ops.
    /// Returns true if a new run started.
    pub fn pointer_enter(&mut self) -> bool {
        if self.state == GlitchState::Glitching {
            return false;
        }
        self.state = GlitchState::Glitching;
        self.counter = 0.0;
        tracing::debug!(len = self.original.len(), "glitch run started");
        true
    }

    /// One timer tick: renders the current frame, then either finishes the
    /// run (solved counter has reached the text length) or advances it.
    pub fn tick(&mut self) -> &str {
        if self.state != GlitchState::Glitching {
            return &self.displayed;
        }

        let solved = ((self.counter + 1e-9).floor().max(0.0) as usize).min(self.original.len());
        let mut out = String::with_capacity(self.displayed.len());
        for i in 0..self.original.len() {
            if i < solved {
                out.push(self.original[i]);
            } else {
                out.push(self.random_char());
            }
        }
        self.displayed = out;

        // Tolerance absorbs accumulated rounding from fractional steps
        // (fifteen additions of 1/3 land a hair under 5.0).
        if self.counter + 1e-9 >= self.original.len() as f64 {
            self.state = GlitchState::Idle;
            self.displayed = self.original.iter().collect();
        } else {
            self.counter += self.config.solve_step;
        }
        &self.displayed
    }

    /// Number of ticks a full run takes: ceil(len / step) advancing ticks
    /// plus the final tick that observes completion.
    pub fn ticks_to_complete(&self) -> u64 {
        let len = self.original.len() as f64;
        if len == 0.0 {
            return 1;
        }
        ((len / self.config.solve_step) - 1e-9).ceil() as u64 + 1
    }

    fn random_char(&mut self) -> char {
        self.rng = splitmix64(self.rng);
        let chars: &[u8] = GLITCH_ALPHABET.as_bytes();
        chars[(self.rng % chars.len() as u64) as usize] as char
    }
}

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
