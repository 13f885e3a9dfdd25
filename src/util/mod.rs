pub fn init_globals() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .init();
}

/* Exponentially smoothed value, for per-batch loss logging */
pub(crate) struct RunningAverage {
    value: f64,
    epsilon: f64,
    seen: bool,
}

impl RunningAverage {
    pub fn new(epsilon: f64) -> Self {
        assert!((0.0..1.0).contains(&epsilon));
        Self {
            value: 0.0,
            epsilon,
            seen: false,
        }
    }

    pub fn set(&mut self, new_value: f64) {
        if self.seen {
            self.value = (1.0 - self.epsilon) * self.value + self.epsilon * new_value;
        } else {
            self.value = new_value;
            self.seen = true;
        }
    }

    pub fn get(&self) -> f64 {
        self.value
    }
}
