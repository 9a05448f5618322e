/// Animation playback clock.
///
/// Tracks the current and previous animation time of one playback stream;
/// the pair defines the interval an edge-triggered update scans for
/// threshold crossings. Looping wraps with Euclidean modulo; [`wrapped`]
/// records whether the latest update crossed the loop seam, so the
/// consumer can split its scan there. `previous_time() > time()` alone is
/// not a wrap signal, since reverse playback produces it too.
///
/// [`wrapped`]: Self::wrapped
#[derive(Debug, Clone)]
pub struct PlaybackController {
    time: f32,
    previous_time: f32,
    speed: f32,
    playing: bool,
    looping: bool,
    wrapped: bool,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self {
            time: 0.0,
            previous_time: 0.0,
            speed: 1.0,
            playing: true,
            looping: true,
            wrapped: false,
        }
    }
}

impl PlaybackController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current animation time, in `[0, duration]`.
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Animation time at the previous [`update`](Self::update).
    #[must_use]
    pub fn previous_time(&self) -> f32 {
        self.previous_time
    }

    /// Whether the latest [`update`](Self::update) crossed the loop seam,
    /// in either direction.
    #[must_use]
    pub fn wrapped(&self) -> bool {
        self.wrapped
    }

    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    #[must_use]
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Scrubs to an absolute time.
    ///
    /// Also rewrites `previous_time` so the jump spans no interval: a seek
    /// must not manufacture threshold crossings.
    pub fn set_time(&mut self, time: f32) {
        self.time = time;
        self.previous_time = time;
        self.wrapped = false;
    }

    /// Advances the clock by `dt * speed` within `[0, duration]`.
    pub fn update(&mut self, duration: f32, dt: f32) {
        self.previous_time = self.time;
        self.wrapped = false;
        if !self.playing || duration <= 0.0 {
            return;
        }

        let advanced = self.time + dt * self.speed;
        self.time = if self.looping {
            // Landing outside [0, duration) in either direction means the
            // step crossed the loop seam.
            self.wrapped = !(0.0..duration).contains(&advanced);
            advanced.rem_euclid(duration)
        } else {
            advanced.clamp(0.0, duration)
        };
    }

    /// Rewinds to t = 0 with no interval spanned.
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.previous_time = 0.0;
        self.wrapped = false;
    }
}
